//! groovyparse: The Groovy front end CLI.
//!
//! Usage:
//!   groovyparse [options] [file-or-directory...]
//!
//! Lexes and parses each file, reports style warnings and the first fatal
//! error per file, and optionally dumps the tokens or the syntax tree.

mod diagnostic;
mod files;

use clap::{ArgAction, Parser as ClapParser};
use groovy_ast::visitor::OutlinePrinter;
use groovy_diagnostics::{Diagnostic, GroovyError};
use groovy_options::{ParserOptions, ProjectConfig};
use rayon::prelude::*;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::diagnostic::ParseDiagnostic;

const DEFAULT_PROJECT_FILE: &str = "groovyparse.json";

#[derive(ClapParser, Debug)]
#[command(name = "groovyparse", about = "Parse Groovy sources and report syntax errors", version)]
struct Cli {
    /// Groovy files or directories to parse.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Path to a groovyparse.json project file.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Print the token stream of each file.
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree as an indented outline.
    #[arg(long)]
    ast: bool,

    /// Print the syntax tree as JSON.
    #[arg(long)]
    json: bool,

    /// Treat `assert` as an ordinary identifier.
    #[arg(long = "no-assert")]
    no_assert: bool,

    /// Treat `enum` as an ordinary identifier.
    #[arg(long = "no-enum")]
    no_enum: bool,

    /// Keep whitespace and comments in the token stream.
    #[arg(long)]
    whitespace: bool,

    /// Accept `{ |a, b| ... }` closure parameters.
    #[arg(long = "legacy-closures")]
    legacy_closures: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// What happened to one input file.
enum Outcome {
    Parsed,
    Failed { error: GroovyError, source: String },
    Unreadable(String),
}

struct FileReport {
    path: String,
    /// Token or tree dumps destined for stdout.
    output: String,
    warnings: Vec<Diagnostic>,
    outcome: Outcome,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let use_color = stderr_is_terminal();
    install_report_handler(use_color);

    let (paths, config) = resolve_input_files(&cli);
    if paths.is_empty() {
        print_error("no input files found", use_color);
        process::exit(1);
    }
    let options = build_options(&cli, config.as_ref());
    tracing::debug!(files = paths.len(), ?options, "parsing");

    let reports: Vec<FileReport> = paths.par_iter().map(|path| process_file(path, &options, &cli)).collect();

    let mut failures = 0;
    for report in &reports {
        print!("{}", report.output);
        for warning in &report.warnings {
            print_warning(warning, use_color);
        }
        match &report.outcome {
            Outcome::Parsed => {}
            Outcome::Failed { error, source } => {
                failures += 1;
                let report = miette::Report::new(ParseDiagnostic::from_error(error, &report.path, source));
                eprintln!("{:?}", report);
            }
            Outcome::Unreadable(message) => {
                failures += 1;
                print_error(message, use_color);
            }
        }
    }

    tracing::info!(files = reports.len(), failures, "done");
    if failures > 0 {
        if use_color {
            eprintln!("{}{} of {} files failed to parse.{}", GRAY, failures, reports.len(), RESET);
        } else {
            eprintln!("{} of {} files failed to parse.", failures, reports.len());
        }
        process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbosity))))
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "groovyparse=warn,groovy_parser=warn,groovy_scanner=warn",
        1 => "groovyparse=info,groovy_parser=info,groovy_scanner=info",
        2 => "groovyparse=debug,groovy_parser=debug,groovy_scanner=debug",
        _ => "groovyparse=trace,groovy_parser=trace,groovy_scanner=trace",
    }
}

fn install_report_handler(use_color: bool) {
    let installed = miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .color(use_color)
                .unicode(use_color)
                .context_lines(2)
                .build(),
        )
    }));
    if let Err(error) = installed {
        tracing::warn!(%error, "could not install the error report handler");
    }
}

fn resolve_input_files(cli: &Cli) -> (Vec<PathBuf>, Option<ProjectConfig>) {
    if let Some(ref project) = cli.project {
        load_project(Path::new(project))
    } else if !cli.files.is_empty() {
        (files::expand_paths(&cli.files), None)
    } else if Path::new(DEFAULT_PROJECT_FILE).exists() {
        load_project(Path::new(DEFAULT_PROJECT_FILE))
    } else {
        (Vec::new(), None)
    }
}

fn load_project(path: &Path) -> (Vec<PathBuf>, Option<ProjectConfig>) {
    match groovy_options::parse_config_file(path) {
        Ok(config) => (files::discover_project_files(&config, path), Some(config)),
        Err(e) => {
            print_error(&format!("failed to read project '{}': {}", path.display(), e), stderr_is_terminal());
            process::exit(1);
        }
    }
}

/// Project options with command-line flags applied on top.
fn build_options(cli: &Cli, config: Option<&ProjectConfig>) -> ParserOptions {
    let mut options = config.map(ProjectConfig::options).unwrap_or_default();
    if cli.no_assert {
        options.assert_keyword_enabled = false;
    }
    if cli.no_enum {
        options.enum_keyword_enabled = false;
    }
    if cli.whitespace {
        options.whitespace_included = true;
    }
    if cli.legacy_closures {
        options.legacy_closure_syntax = true;
    }
    options
}

fn process_file(path: &Path, options: &ParserOptions, cli: &Cli) -> FileReport {
    let name = path.display().to_string();
    let _span = tracing::debug_span!("file", path = %name).entered();

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileReport::unreadable(name.clone(), format!("cannot read {}: {}", name, e)),
    };
    let source = match simdutf8::basic::from_utf8(&bytes) {
        Ok(text) => text,
        Err(_) => return FileReport::unreadable(name.clone(), format!("{} is not valid UTF-8", name)),
    };

    let mut output = String::new();
    if cli.tokens {
        match groovy_scanner::tokenize_with_file(source, Some(&name), options) {
            Ok(tokens) => {
                for token in &tokens {
                    let _ = write!(output, "{}:{}\t{}\t{:?}", token.line, token.column, token.kind.name(), token.text);
                    if token.kind.is_number() {
                        match groovy_scanner::decode_number(token.kind, &token.text) {
                            Ok(value) => {
                                let _ = write!(output, "\t{:?}", value);
                            }
                            Err(e) => tracing::warn!(%e, line = token.line, "undecodable number"),
                        }
                    }
                    output.push('\n');
                }
            }
            Err(error) => return FileReport::failed(name, output, error, source),
        }
    }

    match groovy_parser::parse(source, Some(&name), options) {
        Ok(parsed) => {
            if cli.ast {
                output.push_str(&OutlinePrinter::print(&parsed.root));
            }
            if cli.json {
                match serde_json::to_string_pretty(&parsed.root) {
                    Ok(json) => {
                        output.push_str(&json);
                        output.push('\n');
                    }
                    Err(e) => return FileReport::unreadable(name, format!("cannot serialize tree: {}", e)),
                }
            }
            if !cli.tokens && !cli.ast && !cli.json {
                let _ = writeln!(output, "{}: {} nodes", name, parsed.root.node_count());
            }
            FileReport {
                path: name,
                output,
                warnings: parsed.warnings,
                outcome: Outcome::Parsed,
            }
        }
        Err(error) => FileReport::failed(name, output, error, source),
    }
}

impl FileReport {
    fn failed(path: String, output: String, error: GroovyError, source: &str) -> Self {
        Self {
            path,
            output,
            warnings: Vec::new(),
            outcome: Outcome::Failed {
                error,
                source: source.to_string(),
            },
        }
    }

    fn unreadable(path: String, message: String) -> Self {
        Self {
            path,
            output: String::new(),
            warnings: Vec::new(),
            outcome: Outcome::Unreadable(message),
        }
    }
}

fn print_warning(diag: &Diagnostic, use_color: bool) {
    if !use_color {
        eprintln!("{}", diag);
        return;
    }
    if let Some(ref file) = diag.file {
        eprint!("{}{}{}", CYAN, file, RESET);
        if let Some(position) = diag.position {
            eprint!(":{}", position);
        }
        eprint!(": ");
    }
    eprintln!("{}{}warning{} {}GRV{}{}: {}", BOLD, YELLOW, RESET, CYAN, diag.code, RESET, diag.message_text);
    if let Some(ref fix) = diag.fix {
        eprintln!("  {}solution:{} {}", GRAY, RESET, fix);
    }
}

fn print_error(msg: &str, use_color: bool) {
    if use_color {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn stderr_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_project_options() {
        let cli = Cli::parse_from(["groovyparse", "--no-assert", "--legacy-closures", "a.groovy"]);
        let config = groovy_options::parse_config(r#"{"parserOptions": {"enumKeywordEnabled": false}}"#).unwrap();
        let options = build_options(&cli, Some(&config));
        assert!(!options.assert_keyword_enabled);
        assert!(!options.enum_keyword_enabled);
        assert!(options.legacy_closure_syntax);
        assert!(!options.whitespace_included);
    }

    #[test]
    fn test_verbosity_directives() {
        assert!(directive_for_verbosity(0).contains("groovy_parser=warn"));
        assert!(directive_for_verbosity(1).contains("groovy_parser=info"));
        assert!(directive_for_verbosity(9).contains("groovy_parser=trace"));
    }

    #[test]
    fn test_verbose_help_matches_directives() {
        use clap::CommandFactory;
        let command = Cli::command();
        let verbose = command.get_arguments().find(|a| a.get_id() == "verbose").unwrap();
        let help = verbose.get_help().unwrap().to_string();
        assert!(help.contains("-v: info"));
        assert!(help.contains("-vv: debug"));
        assert!(directive_for_verbosity(1).contains("=info"));
        assert!(directive_for_verbosity(2).contains("=debug"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let cli = Cli::parse_from(["groovyparse", "does/not/exist.groovy"]);
        let report = process_file(Path::new("does/not/exist.groovy"), &ParserOptions::default(), &cli);
        assert!(matches!(report.outcome, Outcome::Unreadable(_)));
    }
}

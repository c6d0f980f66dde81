//! groovy_options: Parser options and `groovyparse.json` project files.
//!
//! Parses project configuration files and provides the [`ParserOptions`]
//! structure shared by the lexer, the parser and the CLI.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The default cap on speculative trial parses for one compilation unit.
pub const DEFAULT_MAX_SPECULATIVE_PARSES: u32 = 1_000_000;

/// Options that change how source text is lexed and parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Lex `assert` as a keyword. When off it is an ordinary identifier.
    pub assert_keyword_enabled: bool,
    /// Lex `enum` as a keyword. When off it is an ordinary identifier.
    pub enum_keyword_enabled: bool,
    /// Keep whitespace, comments and raw newlines in the token stream.
    pub whitespace_included: bool,
    /// Accept `{ |a, b| ... }` closure parameters.
    pub legacy_closure_syntax: bool,
    /// Upper bound on syntactic-predicate trials for one unit.
    pub max_speculative_parses: u32,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            assert_keyword_enabled: true,
            enum_keyword_enabled: true,
            whitespace_included: false,
            legacy_closure_syntax: false,
            max_speculative_parses: DEFAULT_MAX_SPECULATIVE_PARSES,
        }
    }
}

impl ParserOptions {
    pub fn with_whitespace_included(mut self, on: bool) -> Self {
        self.whitespace_included = on;
        self
    }

    pub fn with_legacy_closure_syntax(mut self, on: bool) -> Self {
        self.legacy_closure_syntax = on;
        self
    }
}

/// The `groovyparse.json` file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub parser_options: Option<ParserOptions>,
    /// Individual source files, relative to the config file.
    pub files: Option<Vec<String>>,
    /// Directories searched recursively for `.groovy` files.
    pub include: Option<Vec<String>>,
    /// Path fragments that exclude a discovered file.
    pub exclude: Option<Vec<String>>,
}

impl ProjectConfig {
    /// The configured parser options, or the defaults.
    pub fn options(&self) -> ParserOptions {
        self.parser_options.clone().unwrap_or_default()
    }

    /// Whether `path` matches one of the `exclude` fragments.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.exclude
            .iter()
            .flatten()
            .any(|fragment| text.contains(fragment.as_str()))
    }
}

/// Errors raised while loading a project file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a project file from a string.
pub fn parse_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a project file from a path.
pub fn parse_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

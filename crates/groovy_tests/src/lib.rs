//! Conformance corpus runner for the Groovy front end.
//!
//! Each case is a Groovy snippet filed under a category. A case either must
//! parse or must be rejected; the suite records what actually happened and
//! prints per-category pass rates.

use groovy_options::ParserOptions;
use rustc_hash::FxHashMap;

/// Whether a case is expected to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Accept,
    Reject,
}

/// Result of running one case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub name: String,
    pub category: String,
    pub source: String,
    pub expectation: Expectation,
    pub parse_ok: bool,
    /// `GRV<code>: <message>` of the error that stopped the parse.
    pub parse_error: Option<String>,
    pub warning_count: usize,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        match self.expectation {
            Expectation::Accept => self.parse_ok,
            Expectation::Reject => !self.parse_ok,
        }
    }
}

/// Parse one snippet with `options`.
pub fn run_case(name: &str, category: &str, source: &str, expectation: Expectation, options: &ParserOptions) -> CaseResult {
    let file_name = format!("{}.groovy", name);
    let (parse_ok, parse_error, warning_count) = match groovy_parser::parse(source, Some(&file_name), options) {
        Ok(output) => (true, None, output.warnings.len()),
        Err(error) => {
            let diagnostic = error.diagnostic();
            (false, Some(format!("GRV{}: {}", diagnostic.code, diagnostic.message_text)), 0)
        }
    };
    CaseResult {
        name: name.to_string(),
        category: category.to_string(),
        source: source.to_string(),
        expectation,
        parse_ok,
        parse_error,
        warning_count,
    }
}

/// Conformance suite runner.
pub struct ConformanceSuite {
    options: ParserOptions,
    pub cases: Vec<CaseResult>,
}

impl Default for ConformanceSuite {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl ConformanceSuite {
    pub fn new(options: ParserOptions) -> Self {
        Self { options, cases: Vec::new() }
    }

    pub fn accept(&mut self, name: &str, category: &str, source: &str) {
        let result = run_case(name, category, source, Expectation::Accept, &self.options);
        self.cases.push(result);
    }

    pub fn reject(&mut self, name: &str, category: &str, source: &str) {
        let result = run_case(name, category, source, Expectation::Reject, &self.options);
        self.cases.push(result);
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failures(&self) -> Vec<&CaseResult> {
        self.cases.iter().filter(|c| !c.passed()).collect()
    }

    /// `(passed, total)` per category, sorted by category name.
    pub fn by_category(&self) -> Vec<(String, usize, usize)> {
        let mut categories: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
        for case in &self.cases {
            let entry = categories.entry(case.category.as_str()).or_insert((0, 0));
            if case.passed() {
                entry.0 += 1;
            }
            entry.1 += 1;
        }
        let mut rows: Vec<_> = categories
            .into_iter()
            .map(|(category, (passed, total))| (category.to_string(), passed, total))
            .collect();
        rows.sort();
        rows
    }

    pub fn print_summary(&self) {
        let total = self.cases.len();
        let passed = self.passed();
        println!("\n=== Groovy Conformance Summary ===");
        println!("Total cases: {}", total);
        println!("Passed: {}", passed);
        println!("Failed: {}", total - passed);
        println!("Pass rate: {:.2}%", percent(passed, total));

        println!("\n--- Results by Category ---");
        for (category, passed, total) in self.by_category() {
            println!("  {}: {}/{} ({:.2}%)", category, passed, total, percent(passed, total));
        }

        let failures = self.failures();
        if !failures.is_empty() {
            println!("\n--- Failed Cases ---");
            for failure in failures.iter().take(10) {
                let outcome = match (&failure.expectation, &failure.parse_error) {
                    (Expectation::Accept, Some(error)) => error.clone(),
                    (Expectation::Reject, _) => "parsed but should have been rejected".to_string(),
                    (Expectation::Accept, None) => "unknown".to_string(),
                };
                println!("  [{}] {}: {}", failure.category, failure.name, outcome);
                println!("    source: {:?}", failure.source);
            }
        }
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expectations() {
        let mut suite = ConformanceSuite::default();
        suite.accept("ok", "basic", "x = 1");
        suite.reject("bad", "basic", "x = ");
        suite.accept("wrong", "basic", "x = ");
        assert_eq!(suite.passed(), 2);
        let failures = suite.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "wrong");
        assert!(failures[0].parse_error.as_deref().is_some_and(|e| e.starts_with("GRV")));
    }

    #[test]
    fn test_by_category_is_sorted() {
        let mut suite = ConformanceSuite::default();
        suite.accept("b1", "zeta", "a()");
        suite.accept("a1", "alpha", "b()");
        suite.accept("a2", "alpha", "c(");
        assert_eq!(suite.by_category(), vec![("alpha".to_string(), 1, 2), ("zeta".to_string(), 1, 1)]);
    }

    #[test]
    fn test_warnings_are_counted() {
        let result = run_case("w", "basic", "x = 1; { println 1 }", Expectation::Accept, &ParserOptions::default());
        assert!(result.parse_ok);
        assert_eq!(result.warning_count, 1);
    }
}

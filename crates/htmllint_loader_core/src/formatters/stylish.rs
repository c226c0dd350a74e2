//! Stylish problem report.
//!
//! ```text
//!
//! src/index.html
//!
//!    3:3   problem  'fooBar' must match dash  id-class-style
//!   12:12  problem  the `align` attribute is banned  attr-bans
//!
//! ✖ HtmlLint found 2 problems
//! ```

use std::sync::OnceLock;

use console::Style;
use htmllint_engine::{EngineError, Issue, LintEngine};
use regex::Regex;

use super::table::{self, Align};
use crate::render::render_issue;

/// Placeholder between the line and column cells, collapsed after layout.
const SEPARATOR: &str = ":line-col-separator:";

const PROBLEM: &str = "problem";

const COLUMN_ALIGN: [Align; 4] = [Align::Left, Align::Right, Align::Center, Align::Left];

static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();

fn separator_re() -> &'static Regex {
    SEPARATOR_RE.get_or_init(|| {
        Regex::new(&format!(r"\s*{}\s*", regex::escape(SEPARATOR)))
            .expect("Invalid separator pattern")
    })
}

/// Formats issues into the stylish report.
#[derive(Debug, Clone, Copy)]
pub struct StylishFormatter {
    colors: bool,
}

impl Default for StylishFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl StylishFormatter {
    /// Creates a formatter that styles output when stderr supports colors.
    pub fn new() -> Self {
        Self {
            colors: console::colors_enabled_stderr(),
        }
    }

    /// Forces styling on or off.
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    fn style(&self) -> Style {
        Style::new().force_styling(self.colors)
    }

    /// Builds the report for a non-empty list of issues.
    ///
    /// Messages come from [`render_issue`]; a failing engine renderer aborts
    /// the report.
    pub fn format<E: LintEngine>(
        &self,
        engine: &E,
        resource_path: &str,
        issues: &[Issue],
    ) -> Result<String, EngineError> {
        let dim = self.style().white().dim();
        let white = self.style().white();
        let yellow = self.style().yellow();

        let rows = issues
            .iter()
            .map(|issue| {
                Ok(vec![
                    String::new(),
                    dim.apply_to(issue.line).to_string(),
                    SEPARATOR.to_string(),
                    dim.apply_to(issue.line).to_string(),
                    yellow.apply_to(PROBLEM).to_string(),
                    white.apply_to(render_issue(engine, issue)?).to_string(),
                    dim.apply_to(&issue.rule).to_string(),
                ])
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        let separator = dim.apply_to(":").to_string();
        let table = table::render(&rows, &COLUMN_ALIGN);
        let table = separator_re().replace_all(&table, separator.as_str());

        let header = self.style().white().underlined().apply_to(resource_path);
        let footer = self.style().yellow().bold().apply_to(format!(
            "\u{2716} HtmlLint found {} {}",
            issues.len(),
            pluralize(PROBLEM, issues.len())
        ));

        Ok(format!("\n{}\n\n{}\n\n{}\n", header, table, footer))
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

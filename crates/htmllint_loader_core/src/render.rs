//! Issue message rendering.

use htmllint_engine::{EngineError, Issue, LintEngine};

/// Issue code for a value that does not match its required format.
pub const FORMAT_MISMATCH_CODE: &str = "E011";

/// Renders the human-readable message for one issue.
///
/// Format mismatches that carry both the offending value and the expected
/// format read `'<value>' must match <format>`. Everything else goes to the
/// engine's own renderer.
pub fn render_issue<E: LintEngine>(engine: &E, issue: &Issue) -> Result<String, EngineError> {
    if issue.code == FORMAT_MISMATCH_CODE
        && let (Some(value), Some(format)) = (issue.data_text("value"), issue.data_text("format"))
    {
        return Ok(format!("'{}' must match {}", value, format));
    }
    engine.render_issue(issue)
}

//! Per-invocation loader options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::SearchStrategy;

/// Options supplied by the host for one file.
///
/// Deserializes from the camelCase keys a bundler passes to its loaders:
///
/// ```json
/// { "config": "./.htmllintrc", "failOnProblem": true, "search": "upward" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderOptions {
    /// Path of a configuration file to read instead of searching.
    pub config: Option<PathBuf>,

    /// Report problems as build errors instead of warnings.
    pub fail_on_problem: bool,

    /// Search policy used when `config` is not set.
    pub search: SearchStrategy,
}

impl LoaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit configuration path.
    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Sets whether problems break the build.
    pub fn with_fail_on_problem(mut self, fail: bool) -> Self {
        self.fail_on_problem = fail;
        self
    }

    /// Sets the search policy.
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = LoaderOptions::new();

        assert_eq!(options.config, None);
        assert!(!options.fail_on_problem);
        assert_eq!(options.search, SearchStrategy::Layered);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: LoaderOptions = serde_json::from_str(
            r#"{ "config": "lint/.htmllintrc", "failOnProblem": true, "search": "upward" }"#,
        )
        .unwrap();

        assert_eq!(
            options,
            LoaderOptions::new()
                .with_config("lint/.htmllintrc")
                .with_fail_on_problem(true)
                .with_search(SearchStrategy::Upward)
        );
    }

    #[test]
    fn test_deserialize_empty_object() {
        let options: LoaderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, LoaderOptions::default());
    }
}

//! Lint engine abstraction.
//!
//! The loader never lints anything itself. It talks to an engine through the
//! `LintEngine` trait, and obtains a fresh engine for every file through an
//! `EngineFactory`, so the plugin set registered for one file is never
//! visible to another file linted concurrently.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{EngineError, Issue};

/// A plugin reference taken from the `plugins` entry of a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginSpec {
    /// Bare module name: `"htmllint-plugin-foo"`.
    Name(String),
    /// Detailed definition object.
    Detail(PluginSpecDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpecDetail {
    pub name: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl PluginSpec {
    /// Returns the plugin name.
    pub fn name(&self) -> &str {
        match self {
            PluginSpec::Name(name) => name,
            PluginSpec::Detail(detail) => &detail.name,
        }
    }
}

/// A lint engine instance.
///
/// Implementations must not mutate anything other than their own instance
/// state in `use_plugins`.
pub trait LintEngine: Send + Sync {
    /// Registers extension plugins on this instance before linting.
    fn use_plugins(&mut self, plugins: &[PluginSpec]) -> Result<(), EngineError>;

    /// Lints `source` with the given options and returns every issue found.
    fn lint(
        &self,
        source: &str,
        options: &Map<String, Value>,
    ) -> impl Future<Output = Result<Vec<Issue>, EngineError>> + Send;

    /// Renders the generic message for an issue.
    fn render_issue(&self, issue: &Issue) -> Result<String, EngineError> {
        if let Some(message) = &issue.message {
            return Ok(message.clone());
        }
        if issue.data.is_empty() {
            return Ok(issue.code.clone());
        }
        let data = serde_json::to_string(&issue.data)?;
        Ok(format!("{} {}", issue.code, data))
    }
}

/// Produces one engine per loader invocation.
pub trait EngineFactory: Send + Sync {
    type Engine: LintEngine;

    /// Creates a new engine with no plugins registered.
    fn create(&self) -> Self::Engine;
}

impl<F, E> EngineFactory for F
where
    F: Fn() -> E + Send + Sync,
    E: LintEngine,
{
    type Engine = E;

    fn create(&self) -> E {
        self()
    }
}

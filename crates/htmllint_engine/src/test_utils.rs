//! Test utilities for htmllint_engine.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use crate::{EngineError, Issue, LintEngine, PluginSpec};

/// One recorded `lint` call.
#[derive(Debug, Clone, PartialEq)]
pub struct LintCall {
    pub source: String,
    pub options: Map<String, Value>,
    pub plugins: Vec<PluginSpec>,
}

/// Shared log of every `lint` call made on engines that share it.
pub type CallLog = Arc<Mutex<Vec<LintCall>>>;

#[derive(Debug, Clone)]
enum Outcome {
    Issues(Vec<Issue>),
    Fail(String),
}

/// Engine returning a canned result, recording what it was asked to lint.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    outcome: Outcome,
    plugins: Vec<PluginSpec>,
    render_failure: Option<String>,
    log: CallLog,
}

impl ScriptedEngine {
    /// Engine that reports the given issues.
    pub fn issues(issues: Vec<Issue>) -> Self {
        Self::with_outcome(Outcome::Issues(issues))
    }

    /// Engine that fails every lint call.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail(message.into()))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            plugins: Vec::new(),
            render_failure: None,
            log: CallLog::default(),
        }
    }

    /// Records calls into `log`.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Makes the generic renderer fail.
    pub fn with_render_failure(mut self, message: impl Into<String>) -> Self {
        self.render_failure = Some(message.into());
        self
    }
}

impl LintEngine for ScriptedEngine {
    fn use_plugins(&mut self, plugins: &[PluginSpec]) -> Result<(), EngineError> {
        self.plugins.extend_from_slice(plugins);
        Ok(())
    }

    async fn lint(
        &self,
        source: &str,
        options: &Map<String, Value>,
    ) -> Result<Vec<Issue>, EngineError> {
        self.log
            .lock()
            .expect("call log poisoned")
            .push(LintCall {
                source: source.to_string(),
                options: options.clone(),
                plugins: self.plugins.clone(),
            });
        tokio::task::yield_now().await;

        match &self.outcome {
            Outcome::Issues(issues) => Ok(issues.clone()),
            Outcome::Fail(message) => Err(EngineError::failed(message.clone())),
        }
    }

    fn render_issue(&self, issue: &Issue) -> Result<String, EngineError> {
        if let Some(message) = &self.render_failure {
            return Err(EngineError::render(message.clone()));
        }
        Ok(issue
            .message
            .clone()
            .unwrap_or_else(|| format!("{} violated", issue.rule)))
    }
}

//! Engine backed by an external linter process.
//!
//! The process receives a JSON request on stdin:
//!
//! ```json
//! { "source": "<html>...", "config": { ... }, "plugins": [ ... ] }
//! ```
//!
//! and must print a JSON array of issues on stdout, exiting with status 0.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::{EngineError, Issue, LintEngine, PluginSpec};

/// Request written to the engine process.
#[derive(Debug, Serialize)]
struct LintRequest<'a> {
    source: &'a str,
    config: &'a Map<String, Value>,
    plugins: &'a [PluginSpec],
}

/// Runs an external program once per `lint` call.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    args: Vec<String>,
    plugins: Vec<PluginSpec>,
}

impl CommandEngine {
    /// Creates an engine that runs `program` without arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Appends a command-line argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several command-line arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Plugins registered on this instance.
    pub fn plugins(&self) -> &[PluginSpec] {
        &self.plugins
    }
}

impl LintEngine for CommandEngine {
    fn use_plugins(&mut self, plugins: &[PluginSpec]) -> Result<(), EngineError> {
        if let Some(empty) = plugins.iter().position(|p| p.name().trim().is_empty()) {
            return Err(EngineError::plugin(format!(
                "plugin at index {} has an empty name",
                empty
            )));
        }
        self.plugins.extend_from_slice(plugins);
        Ok(())
    }

    async fn lint(
        &self,
        source: &str,
        options: &Map<String, Value>,
    ) -> Result<Vec<Issue>, EngineError> {
        let request = serde_json::to_vec(&LintRequest {
            source,
            config: options,
            plugins: &self.plugins,
        })?;

        debug!(
            "Running lint engine {} ({} plugins)",
            self.program.display(),
            self.plugins.len()
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::failed("engine stdin is not available"))?;
        let writer = tokio::spawn(async move {
            stdin.write_all(&request).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await?;

        match writer.await {
            Ok(Ok(())) => {}
            // The engine may exit without reading all of its input.
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(e) => return Err(EngineError::failed(format!("stdin writer panicked: {}", e))),
        }

        if !output.status.success() {
            return Err(EngineError::failed(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let issues: Vec<Issue> = serde_json::from_slice(&output.stdout)?;
        debug!("Lint engine reported {} issues", issues.len());
        Ok(issues)
    }
}

//! The per-file loader.

use std::io;
use std::path::{Path, PathBuf};

use htmllint_engine::{EngineFactory, LintEngine};
use tracing::{Instrument, debug, info_span};

use crate::formatters::StylishFormatter;
use crate::resolver::{ConfigResolver, ResolveConfig, ResolvedConfig};
use crate::{LoaderContext, LoaderError, LoaderOptions};

/// Lints files passing through a bundler pipeline.
///
/// One `Loader` can serve many files, concurrently if the host wishes: each
/// call to [`Loader::run`] gets its own engine from the factory, so plugin
/// registration never leaks between files.
pub struct Loader<F> {
    options: LoaderOptions,
    factory: F,
    cwd: PathBuf,
    resolver: ConfigResolver,
    formatter: StylishFormatter,
}

impl<F: EngineFactory> Loader<F> {
    /// Creates a loader rooted at the process working directory.
    pub fn new(options: LoaderOptions, factory: F) -> io::Result<Self> {
        Ok(Self::with_cwd(options, factory, std::env::current_dir()?))
    }

    /// Creates a loader rooted at `cwd`.
    ///
    /// `cwd` anchors relative config paths, the fixed fallback config and the
    /// paths shown in reports.
    pub fn with_cwd(options: LoaderOptions, factory: F, cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let resolver = ConfigResolver::from_options(&options, &cwd);
        Self {
            options,
            factory,
            cwd,
            resolver,
            formatter: StylishFormatter::new(),
        }
    }

    /// Replaces the configuration resolver chosen from the options.
    pub fn with_resolver(mut self, resolver: ConfigResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the report formatter.
    pub fn with_formatter(mut self, formatter: StylishFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Lints one file and hands its source back unchanged.
    ///
    /// Problems found in the file are emitted on `ctx` as a warning, or as an
    /// error when `fail_on_problem` is set, and still return `Ok`. Failing to
    /// resolve the configuration or to run the engine returns `Err` without
    /// emitting anything.
    pub async fn run<C>(&self, ctx: &mut C, source: String) -> Result<String, LoaderError>
    where
        C: LoaderContext + Send,
    {
        let resource_path = ctx.resource_path().to_path_buf();
        let span = info_span!("htmllint", resource = %resource_path.display());

        async move {
            ctx.set_cacheable(true);
            let shown_path = display_path(&resource_path, &self.cwd);

            debug!("Resolving config");
            let ResolvedConfig { mut config, path } =
                self.resolver.resolve(&resource_path).await?;

            debug!("Configuring engine from {}", path.display());
            ctx.add_dependency(&path);
            let plugins = config
                .take_plugins()
                .map_err(|message| LoaderError::config_parse(&path, message))?;
            let mut engine = self.factory.create();
            engine.use_plugins(&plugins)?;

            debug!("Linting with {} plugins", plugins.len());
            let issues = engine.lint(&source, config.options()).await?;

            if issues.is_empty() {
                debug!("No problems found");
                return Ok(source);
            }

            debug!("Reporting {} problems", issues.len());
            let report = self.formatter.format(&engine, &shown_path, &issues)?;
            let problems = LoaderError::lint_issues(report);
            if self.options.fail_on_problem {
                ctx.emit_error(problems);
            } else {
                ctx.emit_warning(problems);
            }

            Ok(source)
        }
        .instrument(span)
        .await
    }
}

/// Path shown in reports: relative to `cwd` when inside it, else unchanged.
pub fn display_path(resource_path: &Path, cwd: &Path) -> String {
    match resource_path.strip_prefix(cwd) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => resource_path.display().to_string(),
    }
}

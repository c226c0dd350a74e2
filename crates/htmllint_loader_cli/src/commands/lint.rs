//! Lint command implementation

use std::path::PathBuf;
use std::sync::Arc;

use htmllint_engine::{CommandEngine, EngineFactory};
use htmllint_loader_core::{Loader, RecordingContext};
use miette::{IntoDiagnostic, Result, miette};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::cli::Cli;
use crate::utils::{absolute_paths, create_tokio_runtime};

/// What one file produced.
struct FileOutcome {
    path: PathBuf,
    ctx: RecordingContext,
    result: Result<()>,
}

/// Lints every file concurrently. Returns whether anything failed the build.
pub fn run_lint(cli: &Cli) -> Result<bool> {
    let files = absolute_paths(&cli.files)?;
    let engine = CommandEngine::new(&cli.engine).args(cli.engine_args.iter().cloned());
    let loader = Loader::new(cli.loader_options(), move || engine.clone()).into_diagnostic()?;

    let runtime = create_tokio_runtime()?;
    let outcomes = runtime.block_on(lint_files(Arc::new(loader), files))?;

    let mut failed = false;
    for outcome in &outcomes {
        failed |= print_outcome(outcome);
    }

    let problems = outcomes
        .iter()
        .filter(|o| !o.ctx.warnings.is_empty() || !o.ctx.errors.is_empty())
        .count();
    info!("Checked {} files, {} with problems", outcomes.len(), problems);

    Ok(failed)
}

/// Runs the loader over `files`, returning outcomes in input order.
async fn lint_files<F>(loader: Arc<Loader<F>>, files: Vec<PathBuf>) -> Result<Vec<FileOutcome>>
where
    F: EngineFactory + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let loader = Arc::clone(&loader);
        tasks.spawn(async move { (index, lint_file(&loader, path).await) });
    }

    let mut outcomes: Vec<Option<FileOutcome>> = Vec::new();
    outcomes.resize_with(tasks.len(), || None);
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined.into_diagnostic()?;
        outcomes[index] = Some(outcome);
    }

    Ok(outcomes.into_iter().flatten().collect())
}

async fn lint_file<F: EngineFactory>(loader: &Loader<F>, path: PathBuf) -> FileOutcome {
    let mut ctx = RecordingContext::new(&path);
    let result = match tokio::fs::read_to_string(&path).await {
        Ok(source) => loader
            .run(&mut ctx, source)
            .await
            .map(|_| ())
            .into_diagnostic(),
        Err(e) => Err(miette!("Failed to read {}: {}", path.display(), e)),
    };

    FileOutcome { path, ctx, result }
}

/// Prints what the loader emitted for one file. Returns whether it failed.
fn print_outcome(outcome: &FileOutcome) -> bool {
    for dependency in &outcome.ctx.dependencies {
        debug!(
            "{} depends on {}",
            outcome.path.display(),
            dependency.display()
        );
    }

    for report in outcome.ctx.warnings.iter().chain(&outcome.ctx.errors) {
        eprint!("{}", report);
    }

    if let Err(e) = &outcome.result {
        error!("{}: {:?}", outcome.path.display(), e);
        return true;
    }

    !outcome.ctx.errors.is_empty()
}

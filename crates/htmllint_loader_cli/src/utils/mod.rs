//! CLI utility functions

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result, WrapErr};
use tokio::runtime::Runtime;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .thread_name("htmllint-loader")
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Makes file arguments absolute, as a bundler hands them to its loaders.
pub fn absolute_paths(files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    files
        .iter()
        .map(|file| {
            std::path::absolute(file)
                .into_diagnostic()
                .wrap_err_with(|| format!("Invalid file path {}", file.display()))
        })
        .collect()
}

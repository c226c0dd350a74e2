//! Host pipeline seam.

use std::path::{Path, PathBuf};

use crate::LoaderError;

/// What the loader needs from the bundler processing a file.
///
/// Completion is not part of this trait: it is the value returned by
/// [`crate::Loader::run`].
pub trait LoaderContext {
    /// Absolute path of the file being transformed.
    fn resource_path(&self) -> &Path;

    /// Registers a file whose changes must invalidate this file's output.
    fn add_dependency(&mut self, path: &Path);

    /// Reports a non-fatal problem.
    fn emit_warning(&mut self, warning: LoaderError);

    /// Reports a build-breaking problem.
    fn emit_error(&mut self, error: LoaderError);

    /// Marks whether this file's output may be cached by the host.
    fn set_cacheable(&mut self, _cacheable: bool) {}
}

/// A context that records everything the loader reports.
///
/// Used by hosts that collect results for later printing, and by tests.
#[derive(Debug, Default)]
pub struct RecordingContext {
    resource_path: PathBuf,
    pub dependencies: Vec<PathBuf>,
    pub warnings: Vec<LoaderError>,
    pub errors: Vec<LoaderError>,
    pub cacheable: Option<bool>,
}

impl RecordingContext {
    pub fn new(resource_path: impl Into<PathBuf>) -> Self {
        Self {
            resource_path: resource_path.into(),
            ..Self::default()
        }
    }
}

impl LoaderContext for RecordingContext {
    fn resource_path(&self) -> &Path {
        &self.resource_path
    }

    fn add_dependency(&mut self, path: &Path) {
        self.dependencies.push(path.to_path_buf());
    }

    fn emit_warning(&mut self, warning: LoaderError) {
        self.warnings.push(warning);
    }

    fn emit_error(&mut self, error: LoaderError) {
        self.errors.push(error);
    }

    fn set_cacheable(&mut self, cacheable: bool) {
        self.cacheable = Some(cacheable);
    }
}

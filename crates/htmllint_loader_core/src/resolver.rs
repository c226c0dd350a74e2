//! Configuration resolution.
//!
//! Three policies locate the configuration for a linted file:
//!
//! - [`ExplicitPathResolver`]: a configured file path, read as-is.
//! - [`UpwardSearchResolver`]: `.htmllintrc` in the file's directory or any
//!   ancestor, falling back to `<cwd>/.htmllintrc`.
//! - [`LayeredSearchResolver`]: every supported file name and format, per
//!   directory, from the file's directory upward.
//!
//! [`ConfigResolver`] picks one of them from the loader options.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CONFIG_NAMESPACE, Configuration, RC_FILE_NAME};
use crate::{LoaderError, LoaderOptions};

/// A configuration together with the file it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub config: Configuration,
    pub path: PathBuf,
}

/// Search policy used when no explicit configuration path is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// `.htmllintrc` upward, then `<cwd>/.htmllintrc`.
    Upward,
    /// All supported file names and formats, upward.
    #[default]
    Layered,
}

/// A configuration resolution policy.
pub trait ResolveConfig {
    /// Resolves the configuration that applies to `resource_path`.
    fn resolve(
        &self,
        resource_path: &Path,
    ) -> impl Future<Output = Result<ResolvedConfig, LoaderError>> + Send;
}

/// Loads a single, explicitly configured file.
#[derive(Debug, Clone)]
pub struct ExplicitPathResolver {
    path: PathBuf,
}

impl ExplicitPathResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResolveConfig for ExplicitPathResolver {
    async fn resolve(&self, resource_path: &Path) -> Result<ResolvedConfig, LoaderError> {
        debug!("Loading explicit config {}", self.path.display());
        load_required(&self.path, resource_path).await
    }
}

/// Searches ancestors for one file name, with a fixed fallback path.
#[derive(Debug, Clone)]
pub struct UpwardSearchResolver {
    file_name: String,
    fallback: PathBuf,
}

impl UpwardSearchResolver {
    /// Searches for `.htmllintrc`, falling back to `<cwd>/.htmllintrc`.
    pub fn new(cwd: &Path) -> Self {
        Self {
            file_name: RC_FILE_NAME.to_string(),
            fallback: cwd.join(RC_FILE_NAME),
        }
    }

    /// Overrides the file name searched for.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Overrides the fallback path.
    pub fn with_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl ResolveConfig for UpwardSearchResolver {
    async fn resolve(&self, resource_path: &Path) -> Result<ResolvedConfig, LoaderError> {
        for dir in search_start(resource_path).ancestors() {
            let candidate = dir.join(&self.file_name);
            if is_file(&candidate).await {
                debug!("Found config {}", candidate.display());
                return load_required(&candidate, resource_path).await;
            }
        }

        if !is_file(&self.fallback).await {
            return Err(LoaderError::config_not_found(resource_path));
        }
        debug!("No config above file, using {}", self.fallback.display());
        load_required(&self.fallback, resource_path).await
    }
}

/// Searches every supported file name and format, directory by directory.
#[derive(Debug, Clone)]
pub struct LayeredSearchResolver {
    search_places: Vec<String>,
    stop_dir: Option<PathBuf>,
}

impl LayeredSearchResolver {
    /// Creates a resolver for a configuration namespace.
    ///
    /// Search places per directory, in order: `package.json` (namespace
    /// property), `.<ns>rc`, `.<ns>rc.json`, `.<ns>rc.yaml`, `.<ns>rc.yml`.
    pub fn new(namespace: &str) -> Self {
        Self {
            search_places: vec![
                "package.json".to_string(),
                format!(".{}rc", namespace),
                format!(".{}rc.json", namespace),
                format!(".{}rc.yaml", namespace),
                format!(".{}rc.yml", namespace),
            ],
            stop_dir: None,
        }
    }

    /// Stops searching after this directory.
    pub fn with_stop_dir(mut self, stop_dir: impl Into<PathBuf>) -> Self {
        self.stop_dir = Some(stop_dir.into());
        self
    }

    /// Stops searching after the user's home directory, when there is one.
    ///
    /// Files outside the home directory are still searched up to the root.
    pub fn stop_at_home(self) -> Self {
        match std::env::home_dir() {
            Some(home) => self.with_stop_dir(home),
            None => self,
        }
    }

}

impl Default for LayeredSearchResolver {
    fn default() -> Self {
        Self::new(CONFIG_NAMESPACE)
    }
}

impl ResolveConfig for LayeredSearchResolver {
    async fn resolve(&self, resource_path: &Path) -> Result<ResolvedConfig, LoaderError> {
        for dir in search_start(resource_path).ancestors() {
            for place in &self.search_places {
                let candidate = dir.join(place);
                if !is_file(&candidate).await {
                    continue;
                }
                match Configuration::load(&candidate).await? {
                    Some(config) => {
                        debug!("Found config {}", candidate.display());
                        return Ok(ResolvedConfig {
                            config,
                            path: candidate,
                        });
                    }
                    None => debug!("Skipping {} (no configuration)", candidate.display()),
                }
            }

            if self.stop_dir.as_deref() == Some(dir) {
                break;
            }
        }

        Err(LoaderError::config_not_found(resource_path))
    }
}

/// The resolution policy selected by the loader options.
#[derive(Debug, Clone)]
pub enum ConfigResolver {
    Explicit(ExplicitPathResolver),
    Upward(UpwardSearchResolver),
    Layered(LayeredSearchResolver),
}

impl ConfigResolver {
    /// Selects a policy: an explicit path wins, otherwise the search strategy.
    ///
    /// Relative explicit paths are resolved against `cwd`. The layered search
    /// stops at the user's home directory.
    pub fn from_options(options: &LoaderOptions, cwd: &Path) -> Self {
        match (&options.config, options.search) {
            (Some(path), _) => ConfigResolver::Explicit(ExplicitPathResolver::new(cwd.join(path))),
            (None, SearchStrategy::Upward) => {
                ConfigResolver::Upward(UpwardSearchResolver::new(cwd))
            }
            (None, SearchStrategy::Layered) => {
                ConfigResolver::Layered(LayeredSearchResolver::default().stop_at_home())
            }
        }
    }
}

impl ResolveConfig for ConfigResolver {
    async fn resolve(&self, resource_path: &Path) -> Result<ResolvedConfig, LoaderError> {
        match self {
            ConfigResolver::Explicit(r) => r.resolve(resource_path).await,
            ConfigResolver::Upward(r) => r.resolve(resource_path).await,
            ConfigResolver::Layered(r) => r.resolve(resource_path).await,
        }
    }
}

/// Directory the search starts from: the one containing the linted file.
fn search_start(resource_path: &Path) -> &Path {
    resource_path.parent().unwrap_or(resource_path)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Loads a file that must contain a configuration.
///
/// A file without one (blank, or `package.json` lacking the property) counts
/// as no configuration found for `resource_path`.
async fn load_required(path: &Path, resource_path: &Path) -> Result<ResolvedConfig, LoaderError> {
    match Configuration::load(path).await? {
        Some(config) => Ok(ResolvedConfig {
            config,
            path: path.to_path_buf(),
        }),
        None => {
            debug!("{} holds no configuration", path.display());
            Err(LoaderError::config_not_found(resource_path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_explicit_loads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lint.json");
        fs::write(&path, r#"{ "indent-width": 2 }"#).unwrap();

        let resolved = ExplicitPathResolver::new(&path)
            .resolve(&dir.path().join("index.html"))
            .await
            .unwrap();

        assert_eq!(resolved.path, path);
        assert_eq!(resolved.config.len(), 1);
    }

    #[rstest]
    #[case::blank_rc(".htmllintrc", "")]
    #[case::blank_json("lint.json", "  \n")]
    #[case::package_without_property("package.json", r#"{ "name": "site" }"#)]
    #[tokio::test]
    async fn test_explicit_without_configuration_is_not_found(
        #[case] file_name: &str,
        #[case] content: &str,
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(file_name);
        fs::write(&path, content).unwrap();
        let resource = dir.path().join("index.html");

        let err = ExplicitPathResolver::new(&path)
            .resolve(&resource)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
        assert_eq!(
            err.to_string(),
            format!("cannot find config for {}!", resource.display())
        );
    }

    #[tokio::test]
    async fn test_explicit_directory_is_read_error() {
        let dir = tempdir().unwrap();
        let not_a_file = dir.path().join("config");
        fs::create_dir_all(&not_a_file).unwrap();

        let err = ExplicitPathResolver::new(&not_a_file)
            .resolve(&dir.path().join("index.html"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigRead);
        assert!(err.to_string().contains("config"));
    }

    #[tokio::test]
    async fn test_upward_blank_fallback_is_not_found() {
        let root = tempdir().unwrap();
        let cwd = root.path().join("project");
        fs::create_dir_all(&cwd).unwrap();
        fs::write(cwd.join(".htmllintrc"), "\n").unwrap();
        let resource = root.path().join("vendor/widget.html");

        let err = UpwardSearchResolver::new(&cwd)
            .with_file_name(".htmllintrc-absent")
            .with_fallback(cwd.join(".htmllintrc"))
            .resolve(&resource)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
        assert!(err.to_string().contains("widget.html"));
    }

    #[test]
    fn test_layered_from_options_stops_at_home() {
        let resolver = ConfigResolver::from_options(&LoaderOptions::default(), Path::new("/work"));

        match resolver {
            ConfigResolver::Layered(layered) => {
                assert_eq!(layered.stop_dir, std::env::home_dir());
            }
            other => panic!("expected layered search, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_layered_ignores_config_above_home() {
        let root = tempdir().unwrap();
        let home = root.path().join("home");
        let project = home.join("proj");
        fs::create_dir_all(&project).unwrap();
        fs::write(root.path().join(".htmllintrc"), "{}").unwrap();
        let resource = project.join("index.html");

        let err = LayeredSearchResolver::default()
            .with_stop_dir(&home)
            .resolve(&resource)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
        assert!(err.to_string().contains("index.html"));
    }

    #[tokio::test]
    async fn test_upward_finds_nearest_ancestor() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".htmllintrc"), r#"{ "level": "root" }"#).unwrap();
        fs::write(dir.path().join("a/.htmllintrc"), r#"{ "level": "a" }"#).unwrap();

        let resolved = UpwardSearchResolver::new(&dir.path().join("elsewhere"))
            .resolve(&nested.join("page.html"))
            .await
            .unwrap();

        assert_eq!(resolved.path, dir.path().join("a/.htmllintrc"));
        assert_eq!(resolved.config.get("level").unwrap(), "a");
    }

    #[tokio::test]
    async fn test_upward_includes_start_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".htmllintrc"), "{}").unwrap();

        let resolved = UpwardSearchResolver::new(dir.path())
            .resolve(&dir.path().join("page.html"))
            .await
            .unwrap();

        assert_eq!(resolved.path, dir.path().join(".htmllintrc"));
    }

    #[tokio::test]
    async fn test_upward_custom_file_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".lintrc"), "{}").unwrap();

        let resolved = UpwardSearchResolver::new(dir.path())
            .with_file_name(".lintrc")
            .with_fallback(dir.path().join("missing"))
            .resolve(&dir.path().join("page.html"))
            .await
            .unwrap();

        assert_eq!(resolved.path, dir.path().join(".lintrc"));
    }

    #[tokio::test]
    async fn test_layered_search_order_within_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".htmllintrc.yml"), "from: yml\n").unwrap();
        fs::write(dir.path().join(".htmllintrc.json"), r#"{ "from": "json" }"#).unwrap();

        let resolved = LayeredSearchResolver::default()
            .resolve(&dir.path().join("index.html"))
            .await
            .unwrap();

        assert_eq!(resolved.path, dir.path().join(".htmllintrc.json"));
    }

    #[tokio::test]
    async fn test_layered_skips_package_json_without_property() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "site" }"#).unwrap();
        fs::write(dir.path().join(".htmllintrc.yaml"), "indent-width: 4\n").unwrap();

        let resolved = LayeredSearchResolver::default()
            .resolve(&dir.path().join("index.html"))
            .await
            .unwrap();

        assert_eq!(resolved.path, dir.path().join(".htmllintrc.yaml"));
    }

    #[tokio::test]
    async fn test_layered_prefers_package_json_property() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "site", "htmllint": { "line-max-len": 80 } }"#,
        )
        .unwrap();
        fs::write(dir.path().join(".htmllintrc"), "{}").unwrap();

        let resolved = LayeredSearchResolver::default()
            .resolve(&dir.path().join("index.html"))
            .await
            .unwrap();

        assert_eq!(resolved.path, dir.path().join("package.json"));
        assert_eq!(resolved.config.get("line-max-len").unwrap(), 80);
    }

    #[tokio::test]
    async fn test_layered_skips_empty_files() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("pages");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(".htmllintrc"), "\n").unwrap();
        fs::write(dir.path().join(".htmllintrc"), "{}").unwrap();

        let resolved = LayeredSearchResolver::default()
            .resolve(&nested.join("index.html"))
            .await
            .unwrap();

        assert_eq!(resolved.path, dir.path().join(".htmllintrc"));
    }

    #[tokio::test]
    async fn test_layered_stop_dir() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("project");
        fs::create_dir_all(&project).unwrap();
        fs::write(dir.path().join(".htmllintrc"), "{}").unwrap();

        let err = LayeredSearchResolver::default()
            .with_stop_dir(&project)
            .resolve(&project.join("index.html"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
        assert!(err.to_string().contains("index.html"));
    }

    #[tokio::test]
    async fn test_layered_invalid_file_is_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".htmllintrc.json"), "{ oops").unwrap();

        let err = LayeredSearchResolver::default()
            .resolve(&dir.path().join("index.html"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigParse);
    }

    #[test]
    fn test_from_options_selects_policy() {
        let cwd = Path::new("/work");

        let explicit = ConfigResolver::from_options(
            &LoaderOptions::default().with_config("conf/.htmllintrc"),
            cwd,
        );
        let upward = ConfigResolver::from_options(
            &LoaderOptions::default().with_search(SearchStrategy::Upward),
            cwd,
        );
        let layered = ConfigResolver::from_options(&LoaderOptions::default(), cwd);

        match explicit {
            ConfigResolver::Explicit(r) => {
                assert_eq!(r.path, PathBuf::from("/work/conf/.htmllintrc"))
            }
            other => panic!("Expected explicit resolver, got {:?}", other),
        }
        match upward {
            ConfigResolver::Upward(r) => {
                assert_eq!(r.fallback, PathBuf::from("/work/.htmllintrc"))
            }
            other => panic!("Expected upward resolver, got {:?}", other),
        }
        assert!(matches!(layered, ConfigResolver::Layered(_)));
    }
}

//! Lint configuration.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use htmllint_engine::PluginSpec;
use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::LoaderError;

/// Namespace used for `package.json` properties and file names.
pub const CONFIG_NAMESPACE: &str = "htmllint";

/// Conventional configuration file name.
pub const RC_FILE_NAME: &str = ".htmllintrc";

/// Key holding the plugin list.
const PLUGINS_KEY: &str = "plugins";

/// How a configuration file's text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `package.json`; the configuration is its `htmllint` property.
    PackageJson,
    /// JSON with comments.
    Json,
    /// YAML.
    Yaml,
    /// Extensionless rc file: JSON first, then YAML.
    Rc,
}

impl ConfigFormat {
    /// Picks the format from a file name.
    pub fn from_path(path: &Path) -> Self {
        if path.file_name().and_then(|n| n.to_str()) == Some("package.json") {
            return ConfigFormat::PackageJson;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Rc,
        }
    }
}

/// Options handed to the lint engine, keyed by option name.
///
/// Only `plugins` has a meaning here; every other key is passed through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Map<String, Value>);

impl Configuration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds a configuration from a parsed value, which must be a mapping.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!(
                "expected a mapping at the top level, found {}",
                value_kind(&other)
            )),
        }
    }

    /// Parses configuration text.
    ///
    /// Returns `Ok(None)` when the text holds no configuration: a blank file,
    /// or a `package.json` without an `htmllint` property.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Option<Self>, String> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = match format {
            ConfigFormat::Json => parse_json(content)?,
            ConfigFormat::Yaml => parse_yaml(content)?,
            ConfigFormat::Rc => match parse_json(content) {
                Ok(value) => value,
                Err(json_err) => parse_yaml(content).map_err(|_| json_err)?,
            },
            ConfigFormat::PackageJson => {
                let mut package = parse_json(content)?;
                match package.get_mut(CONFIG_NAMESPACE) {
                    Some(section) => section.take(),
                    None => return Ok(None),
                }
            }
        };

        Self::from_value(value).map(Some)
    }

    /// Reads and parses a configuration file.
    ///
    /// A missing file is `ConfigNotFound`; any other read failure is
    /// `ConfigRead`. `Ok(None)` has the same meaning as in [`Self::parse`].
    pub async fn load(path: &Path) -> Result<Option<Self>, LoaderError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                return Err(LoaderError::config_not_found(path));
            }
            Err(source) => {
                return Err(LoaderError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse(&content, ConfigFormat::from_path(path))
            .map_err(|message| LoaderError::config_parse(path, message))
    }

    /// Removes the `plugins` entry and returns it.
    ///
    /// An absent or `null` entry yields no plugins.
    pub fn take_plugins(&mut self) -> Result<Vec<PluginSpec>, String> {
        match self.0.remove(PLUGINS_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| format!("invalid `{}` entry: {}", PLUGINS_KEY, e)),
        }
    }

    /// Returns an option value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets an option value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the options as passed to the engine.
    pub fn options(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_json(content: &str) -> Result<Value, String> {
    jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
        .map_err(|e| format!("Invalid JSON: {}", e))?
        .ok_or_else(|| "Invalid JSON: no value".to_string())
}

fn parse_yaml(content: &str) -> Result<Value, String> {
    serde_yaml::from_str(content).map_err(|e| format!("Invalid YAML: {}", e))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

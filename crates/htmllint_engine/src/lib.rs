//! # htmllint_engine
//!
//! Lint engine seam for htmllint-loader.
//!
//! This crate provides:
//! - The `Issue` record reported by an engine
//! - The `LintEngine` and `EngineFactory` traits
//! - Plugin references (`PluginSpec`)
//! - `CommandEngine`, which delegates linting to an external process
//!
//! ## Example
//!
//! ```rust,ignore
//! use htmllint_engine::{CommandEngine, LintEngine};
//!
//! let mut engine = CommandEngine::new("htmllint-json");
//! engine.use_plugins(&plugins)?;
//! let issues = engine.lint("<div id=\"fooBar\"></div>", &options).await?;
//! ```

mod command;
mod engine;
mod error;
mod issue;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use command::CommandEngine;
pub use engine::{EngineFactory, LintEngine, PluginSpec, PluginSpecDetail};
pub use error::EngineError;
pub use issue::Issue;

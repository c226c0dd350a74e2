//! # htmllint_loader_core
//!
//! Runs htmllint over files as they pass through a bundler pipeline.
//!
//! This crate provides:
//! - The per-file `Loader` orchestrator
//! - Configuration discovery (explicit path, upward search, layered search)
//! - Stylish problem reports
//!
//! ## Example
//!
//! ```rust,ignore
//! use htmllint_engine::CommandEngine;
//! use htmllint_loader_core::{Loader, LoaderOptions, RecordingContext};
//!
//! let loader = Loader::new(LoaderOptions::default(), || CommandEngine::new("htmllint-json"))?;
//! let mut ctx = RecordingContext::new("/site/src/index.html");
//! let source = loader.run(&mut ctx, source).await?;
//! for warning in &ctx.warnings {
//!     eprintln!("{}", warning);
//! }
//! ```

mod config;
pub mod context;
mod error;
pub mod formatters;
mod loader;
mod options;
pub mod render;
pub mod resolver;

pub use config::{CONFIG_NAMESPACE, ConfigFormat, Configuration, RC_FILE_NAME};
pub use context::{LoaderContext, RecordingContext};
pub use error::{ErrorKind, LoaderError};
pub use formatters::StylishFormatter;
pub use loader::{Loader, display_path};
pub use options::LoaderOptions;
pub use render::render_issue;
pub use resolver::{
    ConfigResolver, ExplicitPathResolver, LayeredSearchResolver, ResolveConfig, ResolvedConfig,
    SearchStrategy, UpwardSearchResolver,
};

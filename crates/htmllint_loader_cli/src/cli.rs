//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use htmllint_loader_core::{LoaderOptions, SearchStrategy};

/// htmllint-loader - lint HTML files the way a bundler loader would
#[derive(Parser)]
#[command(name = "htmllint-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files to lint
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Lint engine program (JSON request on stdin, JSON issues on stdout)
    #[arg(long, value_name = "PROGRAM")]
    pub engine: PathBuf,

    /// Argument passed to the engine program (repeatable)
    #[arg(long = "engine-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    /// Configuration file path, relative to the working directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report problems as errors instead of warnings
    #[arg(long)]
    pub fail_on_problem: bool,

    /// How to look for a configuration when --config is not given
    #[arg(long, value_enum, default_value_t = Search::Layered)]
    pub search: Search,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Search {
    /// .htmllintrc in the file's directory or above, then ./.htmllintrc
    Upward,
    /// package.json and every .htmllintrc variant, from the file's directory up
    Layered,
}

impl From<Search> for SearchStrategy {
    fn from(search: Search) -> Self {
        match search {
            Search::Upward => SearchStrategy::Upward,
            Search::Layered => SearchStrategy::Layered,
        }
    }
}

impl Cli {
    /// Loader options selected by the flags.
    pub fn loader_options(&self) -> LoaderOptions {
        let options = LoaderOptions::new()
            .with_fail_on_problem(self.fail_on_problem)
            .with_search(self.search.into());
        match &self.config {
            Some(path) => options.with_config(path),
            None => options,
        }
    }
}

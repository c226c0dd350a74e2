//! Report formatters.

pub mod stylish;
mod table;

pub use stylish::StylishFormatter;

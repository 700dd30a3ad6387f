//! # tagcloud
//!
//! Turns text into a validated tag-cloud configuration and a word frequency
//! table, ready for a renderer to lay out and paint.
//!
//! ## Features
//!
//! - Strict, ordered validation of user options with first-cause errors
//! - Closed catalogs for color schemes, spirals and image formats
//! - Word sources from a text file or an explicit list
//! - Configurable chain of word modifications with stop-word exclusion
//!
//! ## Quick Start
//!
//! ```no_run
//! use tagcloud::RawOptions;
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = RawOptions::builder()
//!     .input_file("speech.txt")
//!     .size(1600, 900)
//!     .font_name("DejaVu Sans")
//!     .modifications(["strip-punctuation", "normalize"])
//!     .build();
//!
//! let config = tagcloud::resolve(options)?;
//! for (word, count) in config.frequencies().most_frequent(10) {
//!     println!("{word}: {count}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **RawOptions**: unvalidated user input
//! 2. **ConfigResolver**: validates options step by step, stopping at the first failure
//! 3. **HandlerRegistry**: maps modification names to word transforms
//! 4. **WordPipeline**: folds every source word through the transforms and counts the results

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod font;
mod handler;
mod options;
mod pipeline;
mod resolver;
mod source;
mod stopwords;

pub use config::{
    ColorScheme, Configuration, FontSpec, ImageFormat, InputFormat, Point, Size, Spiral,
    SpiralKind,
};
pub use error::{Error, Result};
pub use font::{FontCatalog, SystemFontCatalog};
pub use handler::{BuiltinHandler, HandlerCatalog, HandlerRegistry, Resolution, Transform};
pub use options::{RawOptions, RawOptionsBuilder};
pub use pipeline::{PipelineStats, WordFrequencies, WordPipeline};
pub use resolver::ConfigResolver;
pub use source::{FileWords, SourceReader, Words};
pub use stopwords::StopWords;

/// Resolves options with the built-in stop words and the system fonts.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Any option fails validation
/// - Any requested modification is unknown
/// - The input file cannot be read
pub fn resolve(options: RawOptions) -> Result<Configuration> {
    let registry = HandlerRegistry::new(StopWords::builtin());
    ConfigResolver::new(registry, SystemFontCatalog::load()).resolve(options)
}

//! # Russian Legal Citation Extractor
//!
//! ## Overview
//! Extracts structured legal citations from free-form Russian-language text.
//! Each citation resolves to a `(law_id, article, point, subpoint)` tuple.
//!
//! ## Architecture
//! The system is a pipeline:
//! - `normalize`: typographic folding (quotes, dashes, whitespace)
//! - `alias`: AliasCompiler, fuzzy law-name recognition
//! - `pattern`: PatternCompiler, the three citation orderings
//! - `matcher`: Matcher + CrossProduct
//! - `values`: ValueExpander, enumerations and ranges
//! - `pruner`: SpecificityPruner + Deduplicator
//! - `recognizer`: orchestrates the above into `CompiledRecognizer`/`recognize`
//! - `alias_dict`: JSON loading of the alias dictionary
//! - `config`/`errors`/`api`: ambient server stack
//!
//! ## Usage
//! ```rust,no_run
//! use ru_legal_citation_extractor::{alias_dict, recognizer::{CompiledRecognizer, recognize}};
//!
//! let dict = alias_dict::load_from_path("aliases.json").unwrap();
//! let recognizer = CompiledRecognizer::build(&dict).unwrap();
//! let refs = recognize("ст. 145 УК РФ, п. 2, подп. б", &recognizer);
//! println!("Found {} citations", refs.len());
//! ```

// Core pipeline
pub mod normalize;
pub mod alias;
pub mod pattern;
pub mod matcher;
pub mod values;
pub mod pruner;
pub mod recognizer;
pub mod alias_dict;

// Ambient stack
pub mod config;
pub mod errors;
pub mod api;

// Re-exports for convenience
pub use config::Config;
pub use errors::{CitationError, Result};
pub use recognizer::{recognize, CompiledRecognizer, ParsedRef};

use std::sync::Arc;

/// Shared application state handed to every HTTP request handler: a
/// read-only configuration and a read-only, already-compiled recognizer.
/// Mirrors the teacher's `Arc<Config>` / `Arc<SearchEngine>` shape in
/// `AppState`, minus the mutable storage layer this domain has no use for.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub recognizer: Arc<recognizer::CompiledRecognizer>,
}

//! # CompiledRecognizer
//!
//! ## Purpose
//! Orchestrates the full pipeline: normalize, compile once from an
//! [`AliasDict`], then for each call run the matcher, expand values, prune
//! subsumed bare records and deduplicate. `CompiledRecognizer` is built once
//! at startup and shared read-only across every request, matching the
//! teacher's `Arc<search::SearchEngine>` held in `AppState`.

use crate::alias;
use crate::alias_dict::AliasDict;
use crate::errors::Result;
use crate::matcher;
use crate::normalize;
use crate::pattern::{self, CompiledPatterns};
use crate::pruner;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fully recognized citation: a `(law_id, article, point, subpoint)`
/// tuple. `article`, `point` and `subpoint` are `None` when the grammar
/// didn't capture that axis for a given match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRef {
    pub law_id: i64,
    pub article: Option<String>,
    pub point: Option<String>,
    pub subpoint: Option<String>,
}

/// The compiled patterns and law-id resolution map, built once from an
/// [`AliasDict`] and shared read-only by every `recognize` call.
pub struct CompiledRecognizer {
    patterns: CompiledPatterns,
    group_to_law: HashMap<String, i64>,
}

impl CompiledRecognizer {
    /// Compile the alias dictionary into the three top-level patterns.
    /// Fails with `RecognizerBuildFailure`/`AliasLoadFailure` if the
    /// dictionary is empty or a malformed alias produces an invalid pattern;
    /// this is the only place the core ever returns an error.
    pub fn build(dict: &AliasDict) -> Result<Self> {
        let compiled_alias = alias::compile(dict)?;
        let patterns = pattern::compile(&compiled_alias)?;
        Ok(Self {
            patterns,
            group_to_law: compiled_alias.group_to_law,
        })
    }
}

/// Recognize every citation in `text` against `recognizer`. Never fails on
/// input content: an empty or unrecognizable input yields an empty vector.
pub fn recognize(text: &str, recognizer: &CompiledRecognizer) -> Vec<ParsedRef> {
    if text.is_empty() {
        return Vec::new();
    }

    let normalized = normalize::normalize(text);
    let raw_matches = matcher::find_matches(&recognizer.patterns, &normalized, &recognizer.group_to_law);
    let raw_items = matcher::expand_matches(&raw_matches);
    let pruned = pruner::prune(raw_items);

    pruner::dedup(pruned)
        .into_iter()
        .map(|t| ParsedRef {
            law_id: t.law_id,
            article: t.article,
            point: t.point,
            subpoint: t.subpoint,
        })
        .collect()
}

//! # Matcher & CrossProduct
//!
//! ## Purpose
//! Runs the three compiled patterns over normalized text, resolves each
//! match's `law_id`, expands its value fragments, and emits every
//! combination from the Cartesian product of (articles × points ×
//! subpoints) as a `RawItem`.

use crate::pattern::CompiledPatterns;
use crate::values;
use fancy_regex::{Captures, Regex};
use std::collections::HashMap;

/// A single top-level pattern hit, before value expansion.
#[derive(Debug, Clone)]
pub struct RawMatch {
    pub start: usize,
    pub end: usize,
    pub law_id: i64,
    pub article_vals: Option<String>,
    pub point_vals: Option<String>,
    pub subp_vals: Option<String>,
}

/// One Cartesian expansion of a [`RawMatch`].
#[derive(Debug, Clone)]
pub struct RawItem {
    pub law_id: i64,
    pub article: Option<String>,
    pub point: Option<String>,
    pub subpoint: Option<String>,
    pub span: (usize, usize),
}

fn resolve_law_id(caps: &Captures, group_to_law: &HashMap<String, i64>) -> Option<i64> {
    group_to_law
        .iter()
        .find(|(name, _)| caps.name(name).is_some())
        .map(|(_, id)| *id)
}

fn group_str(caps: &Captures, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

fn run_pattern(
    regex: &Regex,
    text: &str,
    group_to_law: &HashMap<String, i64>,
    out: &mut Vec<RawMatch>,
) {
    for caps in regex.captures_iter(text) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(e) => {
                tracing::warn!("pattern match error, skipping: {e}");
                continue;
            }
        };
        let Some(whole) = caps.get(0) else { continue };
        let Some(law_id) = resolve_law_id(&caps, group_to_law) else {
            continue;
        };

        out.push(RawMatch {
            start: whole.start(),
            end: whole.end(),
            law_id,
            article_vals: group_str(&caps, "article_vals"),
            point_vals: group_str(&caps, "point_vals"),
            subp_vals: group_str(&caps, "subp_vals"),
        });
    }
}

/// Scan `text` with all three compiled patterns, returning raw matches
/// sorted by `(start, end)`.
pub fn find_matches(
    patterns: &CompiledPatterns,
    text: &str,
    group_to_law: &HashMap<String, i64>,
) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    run_pattern(&patterns.p_after, text, group_to_law, &mut matches);
    run_pattern(&patterns.p_before, text, group_to_law, &mut matches);
    run_pattern(&patterns.p_mid, text, group_to_law, &mut matches);
    matches.sort_by_key(|m| (m.start, m.end));
    matches
}

/// Expand one axis: an absent fragment is the single-element list `[None]`;
/// a present fragment is a non-empty list of `Some(value)`.
fn expand_axis(fragment: &Option<String>, expand_hyphens: bool) -> Vec<Option<String>> {
    match fragment {
        None => vec![None],
        Some(raw) => values::expand(raw, expand_hyphens)
            .into_iter()
            .map(Some)
            .collect(),
    }
}

/// Expand every [`RawMatch`] into its Cartesian product of `RawItem`s.
pub fn expand_matches(matches: &[RawMatch]) -> Vec<RawItem> {
    let mut items = Vec::new();
    for m in matches {
        let articles = expand_axis(&m.article_vals, false);
        let points = expand_axis(&m.point_vals, true);
        let subpoints = expand_axis(&m.subp_vals, true);

        for article in &articles {
            for point in &points {
                for subpoint in &subpoints {
                    items.push(RawItem {
                        law_id: m.law_id,
                        article: article.clone(),
                        point: point.clone(),
                        subpoint: subpoint.clone(),
                        span: (m.start, m.end),
                    });
                }
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fragment_expands_to_single_none() {
        assert_eq!(expand_axis(&None, true), vec![None]);
    }

    #[test]
    fn present_fragment_expands_to_some_values() {
        assert_eq!(
            expand_axis(&Some("1, 2".to_string()), true),
            vec![Some("1".to_string()), Some("2".to_string())]
        );
    }

    #[test]
    fn cross_product_covers_every_axis_combination() {
        let matches = vec![RawMatch {
            start: 0,
            end: 10,
            law_id: 15,
            article_vals: Some("66".to_string()),
            point_vals: Some("3, 23".to_string()),
            subp_vals: Some("а, б".to_string()),
        }];
        let items = expand_matches(&matches);
        assert_eq!(items.len(), 4);
        assert!(items
            .iter()
            .all(|i| i.law_id == 15 && i.article.as_deref() == Some("66")));
    }
}

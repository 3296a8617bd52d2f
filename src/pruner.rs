//! # SpecificityPruner & Deduplicator
//!
//! ## Purpose
//! Drops bare `(law_id, article, point, None)` records that are subsumed by
//! a more specific overlapping `(law_id, article, point, Some(subpoint))`
//! record, then removes exact duplicate tuples while preserving first-seen
//! order.

use crate::matcher::RawItem;
use std::collections::HashMap;

fn spans_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Drop items with `subpoint = None` that overlap a more specific sibling
/// sharing `(law_id, article, point)` with a non-null subpoint.
pub fn prune(items: Vec<RawItem>) -> Vec<RawItem> {
    let mut groups: HashMap<(i64, Option<String>, Option<String>), Vec<&RawItem>> =
        HashMap::new();
    for item in &items {
        groups
            .entry((item.law_id, item.article.clone(), item.point.clone()))
            .or_default()
            .push(item);
    }

    items
        .iter()
        .filter(|item| {
            if item.subpoint.is_some() {
                return true;
            }
            let key = (item.law_id, item.article.clone(), item.point.clone());
            let siblings = &groups[&key];
            !siblings
                .iter()
                .any(|s| s.subpoint.is_some() && spans_overlap(s.span, item.span))
        })
        .cloned()
        .collect()
}

/// A final, deduplicated citation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tuple {
    pub law_id: i64,
    pub article: Option<String>,
    pub point: Option<String>,
    pub subpoint: Option<String>,
}

/// Remove exact duplicate `(law_id, article, point, subpoint)` tuples,
/// preserving the order the first occurrence of each was produced in.
pub fn dedup(items: Vec<RawItem>) -> Vec<Tuple> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let tuple = Tuple {
            law_id: item.law_id,
            article: item.article,
            point: item.point,
            subpoint: item.subpoint,
        };
        if seen.insert(tuple.clone()) {
            out.push(tuple);
        }
    }
    out
}

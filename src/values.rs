//! # ValueExpander
//!
//! ## Purpose
//! Splits a captured value fragment (`article_vals`, `point_vals`,
//! `subp_vals`) into an ordered, deduplicated list of atomic values,
//! expanding hyphenated ranges where the caller asks for it.
//!
//! Articles are never range-expanded (`expand_hyphens = false`); points and
//! subpoints are (`expand_hyphens = true`). That policy lives in the caller
//! (`matcher.rs`), not here: this module only implements the mechanics.

use regex::Regex;
use std::sync::OnceLock;

/// The Cyrillic alphabet in collation order, with `ё` inserted immediately
/// after `е` (it is not code-point-contiguous with the rest of the range).
const CYRILLIC_LOWER: &[char] = &[
    'а', 'б', 'в', 'г', 'д', 'е', 'ё', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с',
    'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
];

fn connector_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s*[,;]\s*|\s+(?:и|или|либо)\s+").expect("static connector regex")
    })
}

/// Split a captured fragment into pieces and expand hyphenated ranges,
/// deduplicating while preserving first-seen order.
pub fn expand(fragment: &str, expand_hyphens: bool) -> Vec<String> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return Vec::new();
    }

    if is_single_letter(fragment) {
        return vec![fragment.to_string()];
    }

    let mut out = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for piece in connector_split_re().split(fragment) {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }

        let expanded = if expand_hyphens && piece.contains('-') {
            expand_piece(piece)
        } else {
            vec![piece.to_string()]
        };

        for value in expanded {
            if seen.insert(value.clone()) {
                out.push(value);
            }
        }
    }

    out
}

fn is_single_letter(s: &str) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_alphabetic(),
        _ => false,
    }
}

/// Expand a single hyphenated piece into its range, or return the two
/// endpoints unchanged if it isn't a recognized letter or numeric range.
fn expand_piece(piece: &str) -> Vec<String> {
    let Some((a, b)) = piece.split_once('-') else {
        return vec![piece.to_string()];
    };
    let (a, b) = (a.trim(), b.trim());

    if let Some(letters) = expand_letter_range(a, b) {
        return letters;
    }
    if let Some(numbers) = expand_numeric_range(a, b) {
        return numbers;
    }

    vec![a.to_string(), b.to_string()]
}

fn expand_letter_range(a: &str, b: &str) -> Option<Vec<String>> {
    let mut ac = a.chars();
    let (a_ch, None) = (ac.next()?, ac.next()) else {
        return None;
    };
    let mut bc = b.chars();
    let (b_ch, None) = (bc.next()?, bc.next()) else {
        return None;
    };

    if a_ch.is_ascii_alphabetic() && b_ch.is_ascii_alphabetic() {
        return expand_ascii_letter_range(a_ch, b_ch);
    }

    let a_lower = a_ch.to_lowercase().next()?;
    let b_lower = b_ch.to_lowercase().next()?;
    let a_idx = CYRILLIC_LOWER.iter().position(|&c| c == a_lower)?;
    let b_idx = CYRILLIC_LOWER.iter().position(|&c| c == b_lower)?;

    let (lo, hi) = if a_idx <= b_idx {
        (a_idx, b_idx)
    } else {
        (b_idx, a_idx)
    };
    let upper = a_ch.is_uppercase();
    Some(
        CYRILLIC_LOWER[lo..=hi]
            .iter()
            .map(|&c| if upper { c.to_uppercase().to_string() } else { c.to_string() })
            .collect(),
    )
}

fn expand_ascii_letter_range(a_ch: char, b_ch: char) -> Option<Vec<String>> {
    let a_lower = a_ch.to_ascii_lowercase() as u8;
    let b_lower = b_ch.to_ascii_lowercase() as u8;
    if !a_lower.is_ascii_lowercase() || !b_lower.is_ascii_lowercase() {
        return None;
    }
    let (lo, hi) = if a_lower <= b_lower {
        (a_lower, b_lower)
    } else {
        (b_lower, a_lower)
    };
    let upper = a_ch.is_uppercase();
    Some(
        (lo..=hi)
            .map(|b| {
                let c = b as char;
                if upper {
                    c.to_ascii_uppercase().to_string()
                } else {
                    c.to_string()
                }
            })
            .collect(),
    )
}

fn parse_dotted(s: &str) -> Option<Vec<u64>> {
    if s.is_empty() {
        return None;
    }
    s.split('.').map(|part| part.parse::<u64>().ok()).collect()
}

fn expand_numeric_range(a: &str, b: &str) -> Option<Vec<String>> {
    let a_parts = parse_dotted(a)?;
    let b_parts = parse_dotted(b)?;

    // "1-3": both bare single integers.
    if a_parts.len() == 1 && b_parts.len() == 1 {
        let (lo, hi) = order(a_parts[0], b_parts[0]);
        return Some((lo..=hi).map(|n| n.to_string()).collect());
    }

    // "43.2-6": left dotted, right bare.
    if a_parts.len() > 1 && b_parts.len() == 1 {
        let prefix = &a_parts[..a_parts.len() - 1];
        let left_last = *a_parts.last().unwrap();
        let (lo, hi) = order(left_last, b_parts[0]);
        return Some(
            (lo..=hi)
                .map(|n| format_dotted(prefix, n))
                .collect(),
        );
    }

    // "3.4.1-3.4.5": both dotted, same length, shared prefix.
    if a_parts.len() == b_parts.len()
        && a_parts.len() > 1
        && a_parts[..a_parts.len() - 1] == b_parts[..b_parts.len() - 1]
    {
        let prefix = &a_parts[..a_parts.len() - 1];
        let (lo, hi) = order(*a_parts.last().unwrap(), *b_parts.last().unwrap());
        return Some(
            (lo..=hi)
                .map(|n| format_dotted(prefix, n))
                .collect(),
        );
    }

    None
}

fn order(a: u64, b: u64) -> (u64, u64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn format_dotted(prefix: &[u64], last: u64) -> String {
    if prefix.is_empty() {
        return last.to_string();
    }
    let mut parts: Vec<String> = prefix.iter().map(|n| n.to_string()).collect();
    parts.push(last.to_string());
    parts.join(".")
}

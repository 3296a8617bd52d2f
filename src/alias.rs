//! # AliasCompiler
//!
//! ## Purpose
//! Consumes the alias dictionary and produces `LAW_NAMED` (a regex fragment
//! whose alternatives are tagged by `law_id` via named groups `LID_<id>`),
//! its non-capturing twin `LAW_NONCAP`, and the `group -> law_id` map.
//!
//! Alias compilation injects two kinds of fuzziness: look-alike character
//! classes (Cyrillic letters that share a glyph with a Latin letter) and
//! morphological tails (Russian declension endings), so that `"ст. 5
//! Налогового кодекса РФ"` matches the same alias as `"НК РФ"`.

use crate::alias_dict::AliasDict;
use crate::errors::{CitationError, Result};
use std::collections::HashMap;

/// Output of alias compilation: the two regex fragments and the group map
/// the matcher uses to resolve a match back to a `law_id`.
pub struct CompiledAlias {
    /// Alternation of named groups, one per law id: `(?P<LID_15>...)|...`.
    pub law_named: String,
    /// Same alternation with every group made non-capturing, for use inside
    /// look-aheads.
    pub law_noncap: String,
    /// `"LID_15" -> 15`, used by the matcher to resolve a match's law id.
    pub group_to_law: HashMap<String, i64>,
}

/// Characters that must not border a matched alias (word-boundary guard).
const BOUNDARY_CLASS: &str = "0-9A-Za-zА-Яа-яЁё";

/// Look-alike pairs: Cyrillic letter (lowercase) -> visually identical Latin
/// letter (lowercase). The compiled pattern is case-insensitive, so a single
/// lowercase pairing covers both cases.
const LOOKALIKES: &[(char, char)] = &[
    ('а', 'a'),
    ('в', 'b'),
    ('е', 'e'),
    ('к', 'k'),
    ('м', 'm'),
    ('н', 'h'),
    ('о', 'o'),
    ('р', 'p'),
    ('с', 'c'),
    ('т', 't'),
    ('х', 'x'),
    ('у', 'y'),
];

const ADJECTIVAL_SUFFIXES: &[&str] = &["ый", "ий", "ой"];

fn is_cyrillic_letter(c: char) -> bool {
    matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

fn lookalike_for(c: char) -> Option<char> {
    let lower = c.to_lowercase().next()?;
    LOOKALIKES
        .iter()
        .find(|(cyr, _)| *cyr == lower)
        .map(|(_, lat)| *lat)
}

/// Encode a single character as a look-alike character class, or as its
/// escaped literal self if it has no Latin look-alike.
fn encode_char(c: char) -> String {
    match lookalike_for(c) {
        Some(latin) => format!("[{c}{latin}]"),
        None => regex_escape_char(c),
    }
}

fn regex_escape_char(c: char) -> String {
    if "\\.+*?()|[]{}^$".contains(c) {
        format!("\\{c}")
    } else {
        c.to_string()
    }
}

/// Encode one whitespace-delimited, all-Cyrillic token: "РФ" is treated
/// literally, a short all-uppercase run is treated as a fixed abbreviation,
/// a recognized adjectival suffix is stripped and replaced with a loose
/// Cyrillic-run match, and everything else falls through to per-char
/// look-alike encoding.
fn encode_token(token: &str) -> String {
    let char_count = token.chars().count();

    if token.to_uppercase() == "РФ" {
        return token.chars().map(encode_char).collect();
    }

    if (2..=5).contains(&char_count) && token.chars().all(|c| c.is_uppercase()) {
        return token.chars().map(encode_char).collect();
    }

    let lower = token.to_lowercase();
    for suffix in ADJECTIVAL_SUFFIXES {
        if lower.ends_with(suffix) && char_count > suffix.chars().count() {
            let stem_len = char_count - suffix.chars().count();
            let stem: String = token.chars().take(stem_len).collect();
            let encoded_stem: String = stem.chars().map(encode_char).collect();
            return format!("{encoded_stem}[а-яё]+");
        }
    }

    let encoded: String = token.chars().map(encode_char).collect();
    format!("{encoded}[а-яё]*")
}

/// Encode a full alias string: whitespace runs become `\s+`, all-Cyrillic
/// tokens go through [`encode_token`], everything else is escaped literally.
fn encode_alias(alias: &str) -> String {
    let chars: Vec<char> = alias.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            out.push_str(r"\s+");
            i = j;
        } else if is_cyrillic_letter(c) {
            let mut j = i + 1;
            while j < chars.len() && is_cyrillic_letter(chars[j]) {
                j += 1;
            }
            let token: String = chars[i..j].iter().collect();
            out.push_str(&encode_token(&token));
            i = j;
        } else {
            out.push_str(&regex_escape_char(c));
            i += 1;
        }
    }
    out
}

/// Compile the alias dictionary into `LAW_NAMED`/`LAW_NONCAP`/group map.
pub fn compile(dict: &AliasDict) -> Result<CompiledAlias> {
    if dict.is_empty() {
        return Err(CitationError::RecognizerBuildFailure {
            details: "alias dictionary is empty".to_string(),
        });
    }

    let mut law_ids: Vec<&i64> = dict.keys().collect();
    law_ids.sort();

    let mut pairs: Vec<(i64, String)> = Vec::new();
    for law_id in law_ids {
        for alias in &dict[law_id] {
            if alias.trim().is_empty() {
                return Err(CitationError::RecognizerBuildFailure {
                    details: format!("law id {law_id} has an empty alias"),
                });
            }
            pairs.push((*law_id, alias.clone()));
        }
    }

    // Stable sort: longer aliases first, ties keep the law-id-ascending,
    // array order from above. This is what makes the "reordering an alias
    // array doesn't change the matched set" invariant hold regardless of
    // input order.
    pairs.sort_by(|a, b| b.1.chars().count().cmp(&a.1.chars().count()));

    let mut order: Vec<i64> = Vec::new();
    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for (law_id, alias) in &pairs {
        if !grouped.contains_key(law_id) {
            order.push(*law_id);
        }
        let encoded = encode_alias(alias);
        let wrapped = format!("(?<![{BOUNDARY_CLASS}]){encoded}(?![{BOUNDARY_CLASS}])");
        grouped.entry(*law_id).or_default().push(wrapped);
    }

    let mut named_parts = Vec::with_capacity(order.len());
    let mut noncap_parts = Vec::with_capacity(order.len());
    let mut group_to_law = HashMap::with_capacity(order.len());

    for law_id in &order {
        let body = grouped[law_id].join("|");
        let group_name = format!("LID_{law_id}");
        named_parts.push(format!("(?P<{group_name}>{body})"));
        noncap_parts.push(format!("(?:{body})"));
        group_to_law.insert(group_name, *law_id);
    }

    Ok(CompiledAlias {
        law_named: named_parts.join("|"),
        law_noncap: noncap_parts.join("|"),
        group_to_law,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> AliasDict {
        let mut d = AliasDict::new();
        d.insert(15, vec!["НК РФ".to_string(), "Налоговый кодекс РФ".to_string()]);
        d.insert(17, vec!["УК РФ".to_string()]);
        d
    }

    #[test]
    fn rejects_empty_dictionary() {
        assert!(compile(&AliasDict::new()).is_err());
    }

    #[test]
    fn rejects_empty_alias_string() {
        let mut d = AliasDict::new();
        d.insert(1, vec!["".to_string()]);
        assert!(compile(&d).is_err());
    }

    #[test]
    fn produces_one_named_group_per_law_id() {
        let compiled = compile(&dict()).unwrap();
        assert!(compiled.law_named.contains("LID_15"));
        assert!(compiled.law_named.contains("LID_17"));
        assert_eq!(compiled.group_to_law.get("LID_15"), Some(&15));
        assert_eq!(compiled.group_to_law.get("LID_17"), Some(&17));
    }

    #[test]
    fn noncap_twin_has_no_named_groups() {
        let compiled = compile(&dict()).unwrap();
        assert!(!compiled.law_noncap.contains("(?P<"));
    }

    #[test]
    fn longer_alias_sorted_before_shorter_within_a_law_id() {
        let compiled = compile(&dict()).unwrap();
        let lid15_start = compiled.law_named.find("LID_15").unwrap();
        let long_body_pos = compiled.law_named[lid15_start..].find("Налог");
        let short_body_pos = compiled.law_named[lid15_start..].find("НК");
        assert!(long_body_pos.unwrap() < short_body_pos.unwrap());
    }

    #[test]
    fn reordering_alias_array_does_not_change_group_membership() {
        let mut reordered = AliasDict::new();
        reordered.insert(15, vec!["Налоговый кодекс РФ".to_string(), "НК РФ".to_string()]);
        reordered.insert(17, vec!["УК РФ".to_string()]);

        let a = compile(&dict()).unwrap();
        let b = compile(&reordered).unwrap();
        assert_eq!(a.group_to_law, b.group_to_law);
    }

    #[test]
    fn rf_token_gets_no_morphological_tail() {
        let encoded = encode_token("РФ");
        assert!(!encoded.ends_with("*") && !encoded.ends_with("+"));
    }

    #[test]
    fn adjectival_token_gets_mandatory_tail() {
        let encoded = encode_token("Налоговый");
        assert!(encoded.ends_with("[а-яё]+"));
    }

    #[test]
    fn general_token_gets_optional_tail() {
        let encoded = encode_token("кодекс");
        assert!(encoded.ends_with("[а-яё]*"));
    }

    #[test]
    fn short_uppercase_abbreviation_gets_no_tail() {
        let encoded = encode_token("КОАП");
        assert!(!encoded.ends_with("*") && !encoded.ends_with("+"));
    }
}

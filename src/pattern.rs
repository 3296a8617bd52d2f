//! # PatternCompiler
//!
//! ## Purpose
//! Builds the three top-level citation patterns: `P_AFTER` (law at the
//! end), `P_BEFORE` (law at the start), and `P_MID` (point/article before
//! the law, no subpoint), from the keyword vocabulary and the compiled
//! alias fragments.
//!
//! The value-list grammar is a self-terminating token/separator sequence
//! rather than a literal lazy-capture-plus-lookahead translation of the
//! keyword table: a `VALUE_LIST` can only keep extending when an explicit
//! comma, semicolon or connector word follows, so there's no
//! backtracking-to-end-of-input failure mode to guard against.

use crate::alias::CompiledAlias;
use crate::errors::{CitationError, Result};
use fancy_regex::Regex;

const KW_ART: &str = r"(?:стать[а-яё]+|ст\.)";
const KW_PNT_OR_PART: &str = r"(?:пункт[а-яё]*|част[а-яё]+|(?<![а-яёА-ЯЁ])[пч]\.)";
const KW_SUBP: &str = r"(?:подпункт[а-яё]*|подпп\.|подп\.|пп\.)";

/// Closed preposition set, longest alternatives first so a non-matching
/// prefix doesn't need to backtrack through a shorter one.
const PREP: &str =
    r"(?:(?:обо|об|во|ко|от|со|для|на|по|в|к|о|с)\s+)?";

/// Loose separator between clauses ("ст. 145, п. 2, подп. б"): any run of
/// commas and whitespace.
const CLAUSESEP: &str = r"[\s,]*";

fn value_list() -> String {
    let token = r"(?:\d+(?:\.\d+)*(?:-\d+(?:\.\d+)*)?|[A-Za-zА-Яа-яЁё](?:-[A-Za-zА-Яа-яЁё])?)";
    let sep = r"(?:\s*[,;]\s*|\s+(?:и|или|либо)\s+)";
    format!("{token}(?:{sep}{token})*")
}

/// The three compiled top-level patterns plus the group-to-law map needed
/// to resolve a match.
pub struct CompiledPatterns {
    pub p_after: Regex,
    pub p_before: Regex,
    pub p_mid: Regex,
}

pub fn compile(alias: &CompiledAlias) -> Result<CompiledPatterns> {
    let vl = value_list();
    let law_named = &alias.law_named;
    let law_noncap = &alias.law_noncap;

    let subp_clause = format!(
        "(?:{PREP}{KW_SUBP}\\s*(?P<subp_vals>{vl})\\s*{CLAUSESEP})?"
    );
    let point_clause = format!(
        "(?:{PREP}{KW_PNT_OR_PART}\\s*(?P<point_vals>{vl})\\s*{CLAUSESEP})?"
    );
    let article_clause = format!("{PREP}{KW_ART}\\s*(?P<article_vals>{vl})");
    let law_after = format!(
        "\\s*(?=(?:{law_noncap}))\\s*(?P<law>{law_named})"
    );

    let p_after_src = format!(
        "(?i){subp_clause}{point_clause}{article_clause}{CLAUSESEP}{law_after}"
    );

    let point_clause_after = format!(
        "(?:{CLAUSESEP}{PREP}{KW_PNT_OR_PART}\\s*(?P<point_vals>{vl}))?"
    );
    let subp_clause_after = format!(
        "(?:{CLAUSESEP}{PREP}{KW_SUBP}\\s*(?P<subp_vals>{vl}))?"
    );
    let p_before_src = format!(
        "(?i)(?P<law>{law_named}){CLAUSESEP}{PREP}{KW_ART}\\s*(?P<article_vals>{vl}){point_clause_after}{subp_clause_after}"
    );

    let p_mid_src = format!(
        "(?i){PREP}{KW_PNT_OR_PART}\\s*(?P<point_vals>{vl}){CLAUSESEP}{PREP}{KW_ART}\\s*(?P<article_vals>{vl}){CLAUSESEP}{law_after}"
    );

    let p_after = Regex::new(&p_after_src).map_err(|e| CitationError::RecognizerBuildFailure {
        details: format!("P_AFTER: {e}"),
    })?;
    let p_before = Regex::new(&p_before_src).map_err(|e| CitationError::RecognizerBuildFailure {
        details: format!("P_BEFORE: {e}"),
    })?;
    let p_mid = Regex::new(&p_mid_src).map_err(|e| CitationError::RecognizerBuildFailure {
        details: format!("P_MID: {e}"),
    })?;

    Ok(CompiledPatterns {
        p_after,
        p_before,
        p_mid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias_dict::AliasDict;

    fn patterns() -> CompiledPatterns {
        let mut dict = AliasDict::new();
        dict.insert(15, vec!["НК РФ".to_string(), "Налоговый кодекс РФ".to_string()]);
        dict.insert(17, vec!["УК РФ".to_string()]);
        dict.insert(22, vec!["КоАП РФ".to_string()]);
        let alias = crate::alias::compile(&dict).unwrap();
        compile(&alias).unwrap()
    }

    #[test]
    fn p_after_matches_subpoint_point_article_law() {
        let p = patterns();
        let text = "пп. 1, 2 и 3 п. 2 ст. 3 НК РФ";
        let caps = p.p_after.captures(text).unwrap().unwrap();
        assert_eq!(caps.name("subp_vals").unwrap().as_str(), "1, 2 и 3");
        assert_eq!(caps.name("point_vals").unwrap().as_str(), "2");
        assert_eq!(caps.name("article_vals").unwrap().as_str(), "3");
    }

    #[test]
    fn p_before_matches_law_then_components() {
        let p = patterns();
        let text = "УК РФ, ст. 145, п. 2, подп. б";
        let caps = p.p_before.captures(text).unwrap().unwrap();
        assert_eq!(caps.name("article_vals").unwrap().as_str(), "145");
        assert_eq!(caps.name("point_vals").unwrap().as_str(), "2");
        assert_eq!(caps.name("subp_vals").unwrap().as_str(), "б");
    }

    #[test]
    fn p_mid_matches_point_article_law_with_no_subpoint_group() {
        let p = patterns();
        let text = "ч. 3, ст. 30.1 КоАП РФ";
        let caps = p.p_mid.captures(text).unwrap().unwrap();
        assert_eq!(caps.name("point_vals").unwrap().as_str(), "3");
        assert_eq!(caps.name("article_vals").unwrap().as_str(), "30.1");
        assert!(caps.name("subp_vals").is_none());
    }

    #[test]
    fn article_values_keep_hyphenated_ranges_intact() {
        let p = patterns();
        let text = "ст. 43.2-6 НК РФ";
        let caps = p.p_after.captures(text).unwrap().unwrap();
        assert_eq!(caps.name("article_vals").unwrap().as_str(), "43.2-6");
    }

    #[test]
    fn morphological_tail_matches_declined_law_name() {
        let p = patterns();
        let text = "в соответствии со ст. 5 Налогового кодекса РФ";
        let caps = p.p_after.captures(text).unwrap().unwrap();
        assert_eq!(caps.name("article_vals").unwrap().as_str(), "5");
    }

    #[test]
    fn alias_inside_larger_word_does_not_match() {
        let p = patterns();
        assert!(!p.p_after.is_match("ст. 5 ТНК").unwrap());
    }

    #[test]
    fn latin_lookalikes_match_native_law_name() {
        let p = patterns();
        let text = "ст. 5 HK РФ";
        assert!(p.p_after.is_match(text).unwrap());
    }

    #[test]
    fn single_letter_point_value_is_captured() {
        let p = patterns();
        let text = "п. и ст. 3 НК РФ";
        let caps = p.p_after.captures(text).unwrap().unwrap();
        assert_eq!(caps.name("point_vals").unwrap().as_str(), "и");
    }
}

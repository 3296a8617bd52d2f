//! # Text Normalization Module
//!
//! ## Purpose
//! Folds typographic variants (quotes, dashes, whitespace runs) to canonical
//! forms before any pattern matching happens. Normalization is purely
//! typographic: it never maps Latin look-alikes to Cyrillic, and it never
//! touches newlines.

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("static whitespace regex"))
}

/// Fold quote, dash and whitespace variants to their canonical ASCII forms.
///
/// The result is never longer than the input.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{00AB}' | '\u{00BB}' | '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}'
            | '\u{201A}' => out.push('"'),
            '\u{2032}' => out.push('\''),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            _ => out.push(ch),
        }
    }

    whitespace_run_re().replace_all(&out, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_quotes() {
        assert_eq!(normalize("«Налоговый кодекс»"), "\"Налоговый кодекс\"");
        assert_eq!(normalize("\u{201C}НК РФ\u{201D}"), "\"НК РФ\"");
        assert_eq!(normalize("l\u{2032}arte"), "l'arte");
    }

    #[test]
    fn folds_dashes() {
        assert_eq!(normalize("ст. 43.2\u{2013}6"), "ст. 43.2-6");
        assert_eq!(normalize("ст. 43.2\u{2014}6"), "ст. 43.2-6");
    }

    #[test]
    fn squeezes_horizontal_whitespace_only() {
        assert_eq!(normalize("ст.   3   НК РФ"), "ст. 3 НК РФ");
        assert_eq!(normalize("ст. 3\n\nНК РФ"), "ст. 3\n\nНК РФ");
    }

    #[test]
    fn is_idempotent() {
        let inputs = ["«ст.   3»  НК РФ\n\nп. 2", "plain text", ""];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "normalize not idempotent for {input:?}");
        }
    }

    #[test]
    fn never_grows() {
        let input = "«Налоговый   кодекс»  РФ";
        assert!(normalize(input).len() <= input.len());
    }
}

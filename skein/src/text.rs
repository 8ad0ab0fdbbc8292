//! Text extraction and comparison rules.
//!
//! Answers and confidence values arrive as free text from the Generator, so
//! extraction degrades gracefully: marker scan first, documented fallbacks
//! when markers are absent. Normalization and word-overlap similarity feed
//! the consensus clustering.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ANSWER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)final\s+answer\s*:[ \t]*(\S.*)",
        r"(?i)answer\s*:[ \t]*(\S.*)",
        r"(?i)result\s*:[ \t]*(\S.*)",
        r"(?i)conclusion\s*:[ \t]*(\S.*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("answer pattern compiles"))
    .collect()
});

static CONFIDENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)confidence[:\s]+(\d+(?:\.\d+)?)\s*/\s*10",
        r"(?i)confidence[:\s]+(\d+(?:\.\d+)?)\s+out\s+of\s+10",
        r"(?i)confidence[:\s]+(\d+(?:\.\d+)?)",
        r"(?i)(\d+(?:\.\d+)?)\s*/\s*10\s+confidence",
        r"(?i)score[:\s]+(\d+(?:\.\d+)?)\s*/\s*10",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("confidence pattern compiles"))
    .collect()
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));
static CURRENCY_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\s*(\d+(?:\.\d+)?)").expect("currency pattern compiles"));
static PERCENT_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("percent pattern compiles"));
static TRAILING_FRACTION_ZEROS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.\d*[1-9])0+\b").expect("fraction pattern compiles"));
static ALL_ZERO_FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\.0+\b").expect("zero-fraction pattern compiles"));

/// Extracts the final answer from free text.
///
/// Case-insensitive scan for the first of `final answer:`, `answer:`,
/// `result:`, `conclusion:` followed by same-line text; falls back to the
/// last non-empty line. Payload case is preserved.
pub fn extract_final_answer(text: &str) -> String {
    for pattern in ANSWER_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return m.as_str().trim().to_string();
            }
        }
    }
    text.lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Extracts a confidence value in [0,1] from free text.
///
/// Recognizes `confidence: N/10`, `confidence: N out of 10`,
/// `confidence: N`, `N/10 confidence`, and `score: N/10`. Values above 1
/// are treated as a 0–10 scale and divided by 10, then capped at 1.0.
/// Default 0.5 when no marker is present.
pub fn extract_confidence(text: &str) -> f64 {
    for pattern in CONFIDENCE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
                let normalized = if value > 1.0 { value / 10.0 } else { value };
                return normalized.min(1.0);
            }
        }
    }
    0.5
}

/// Normalizes an answer string for comparison. Idempotent.
///
/// Collapses whitespace runs, closes the gap in currency (`$ 26` → `$26`)
/// and percent (`30 %` → `30%`) forms, and drops trailing fractional zeros
/// (`$26.00` → `$26`, `3.50` → `3.5`) so numerically identical money
/// strings compare equal. Case is preserved.
pub fn normalize_answer(answer: &str) -> String {
    let s = WHITESPACE_RUN.replace_all(answer.trim(), " ");
    let s = CURRENCY_GAP.replace_all(&s, "$$$1");
    let s = PERCENT_GAP.replace_all(&s, "${1}%");
    let s = TRAILING_FRACTION_ZEROS.replace_all(&s, "$1");
    let s = ALL_ZERO_FRACTION.replace_all(&s, "$1");
    s.into_owned()
}

/// Word-overlap similarity: |intersection| / |union| of lowercased word
/// sets. Returns 0.0 when either side has no words.
pub fn word_overlap(a: &str, b: &str) -> f64 {
    let lower_a = a.to_lowercase();
    let lower_b = b.to_lowercase();
    let words_a: HashSet<&str> = lower_a.split_whitespace().collect();
    let words_b: HashSet<&str> = lower_b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_final_answer_prefers_earliest_marker() {
        let text = "Some reasoning.\nConclusion: maybe\nFinal answer: 42\ntrailing";
        assert_eq!(extract_final_answer(text), "42");
    }

    #[test]
    fn extract_final_answer_is_case_insensitive_and_preserves_payload_case() {
        let text = "ANSWER: Paris Is The Capital";
        assert_eq!(extract_final_answer(text), "Paris Is The Capital");
    }

    #[test]
    fn extract_final_answer_falls_back_to_last_nonempty_line() {
        let text = "step one\nstep two\n\n  the likely total is 12  \n\n";
        assert_eq!(extract_final_answer(text), "the likely total is 12");
        assert_eq!(extract_final_answer(""), "");
    }

    #[test]
    fn extract_confidence_parses_known_patterns() {
        assert_eq!(extract_confidence("Confidence: 8/10"), 0.8);
        assert_eq!(extract_confidence("confidence: 7 out of 10"), 0.7);
        assert_eq!(extract_confidence("confidence: 0.65"), 0.65);
        assert_eq!(extract_confidence("9/10 confidence in this"), 0.9);
        assert_eq!(extract_confidence("score: 6/10"), 0.6);
    }

    #[test]
    fn extract_confidence_divides_when_above_one_and_caps() {
        assert_eq!(extract_confidence("confidence: 8"), 0.8);
        assert_eq!(extract_confidence("confidence: 15"), 1.0);
    }

    #[test]
    fn extract_confidence_defaults_to_half() {
        assert_eq!(extract_confidence("no markers here"), 0.5);
    }

    #[test]
    fn normalize_answer_standardizes_currency_and_percent() {
        assert_eq!(normalize_answer("$ 26.00"), "$26");
        assert_eq!(normalize_answer("$26.50"), "$26.5");
        assert_eq!(normalize_answer("about  30 %"), "about 30%");
    }

    #[test]
    fn normalize_answer_is_idempotent() {
        for raw in ["$ 26.00", "  The Total is   $3.50 ", "30 %", "plain words"] {
            let once = normalize_answer(raw);
            assert_eq!(normalize_answer(&once), once, "raw: {:?}", raw);
        }
    }

    #[test]
    fn normalize_answer_preserves_case_and_collapses_whitespace() {
        assert_eq!(normalize_answer("The   Answer\n is  X"), "The Answer is X");
    }

    #[test]
    fn word_overlap_matches_jaccard_definition() {
        assert_eq!(word_overlap("a b c", "a b c"), 1.0);
        assert_eq!(word_overlap("a b", "b c"), 1.0 / 3.0);
        assert_eq!(word_overlap("", "a"), 0.0);
        assert_eq!(word_overlap("A B", "a b"), 1.0);
    }
}

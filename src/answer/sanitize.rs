//! Reduce free-form model output to a single clean answer line

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DONT_KNOW;

static LABEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(q(uestion)?|a(nswer)?|risposta)\s*[:\-]").unwrap());
// A bare "a" only counts as a label with a colon; "A-list" is an answer
static ANSWER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^((answer|risposta)\s*[:\-]|a\s*:)\s*").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\-\*\x{2022}]\s+").unwrap());
static NUMBERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[\)\.]\s+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const QUOTES: &[char] = &['"', '\'', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

/// Turn raw model text into one line, or [`DONT_KNOW`] when nothing is left.
///
/// Applying it to its own output returns the output unchanged.
pub fn sanitize_answer(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return DONT_KNOW.to_string();
    }

    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut candidates: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !LABEL_LINE.is_match(line))
        .collect();
    if candidates.is_empty() {
        candidates = lines;
    }

    // Heuristic: a trailing rhetorical question in a real answer loses to the
    // last plain line. Kept as is.
    let chosen = candidates
        .iter()
        .rev()
        .find(|line| !line.contains('?'))
        .or_else(|| candidates.last())
        .copied()
        .unwrap_or_default();

    let chosen = match chosen.rfind('?') {
        Some(pos) => chosen[pos + 1..].trim(),
        None => chosen,
    };

    let cleaned = strip_decorations(chosen);
    if cleaned.is_empty() {
        DONT_KNOW.to_string()
    } else {
        cleaned
    }
}

/// Peel markers, quotes and labels until none are left
fn strip_decorations(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_once(line: &str) -> String {
    let t = BULLET.replace(line, "");
    let t = NUMBERING.replace(t.trim(), "");
    let t = t.trim().trim_matches(QUOTES);
    let t = ANSWER_LABEL.replace(t, "");
    WHITESPACE.replace_all(t.trim(), " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_is_dont_know() {
        assert_eq!(sanitize_answer(""), DONT_KNOW);
        assert_eq!(sanitize_answer("   "), DONT_KNOW);
        assert_eq!(sanitize_answer("\n\t \n"), DONT_KNOW);
    }

    #[test]
    fn test_question_and_answer_labels() {
        assert_eq!(sanitize_answer("Q: What is 2+2?\nA: 4"), "4");
        assert_eq!(sanitize_answer("Question: capital?\r\nAnswer - Rome"), "Rome");
        assert_eq!(sanitize_answer("Domanda\nRisposta: Milano"), "Domanda");
    }

    #[test]
    fn test_markers_and_quotes() {
        assert_eq!(sanitize_answer("- Paris"), "Paris");
        assert_eq!(sanitize_answer("\"Rome\""), "Rome");
        assert_eq!(sanitize_answer("\u{2022} Berlin"), "Berlin");
        assert_eq!(sanitize_answer("3) Madrid"), "Madrid");
        assert_eq!(sanitize_answer("2. Lisbon"), "Lisbon");
        assert_eq!(sanitize_answer("\u{201c}Vienna\u{201d}"), "Vienna");
        assert_eq!(sanitize_answer("'Oslo'"), "Oslo");
    }

    #[test]
    fn test_prefers_last_plain_line() {
        let raw = "Which city is the capital?\nLet me think.\nParis\nIs that right?";
        assert_eq!(sanitize_answer(raw), "Paris");
    }

    #[test]
    fn test_only_questions_keeps_text_after_last_mark() {
        assert_eq!(sanitize_answer("Is it? Yes it is"), "Yes it is");
        assert_eq!(sanitize_answer("What?"), DONT_KNOW);
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(sanitize_answer("  The   Eiffel\tTower  "), "The Eiffel Tower");
    }

    #[test]
    fn test_sentinels_pass_through() {
        assert_eq!(sanitize_answer(DONT_KNOW), DONT_KNOW);
        assert_eq!(sanitize_answer("HTTP 401"), "HTTP 401");
        assert_eq!(sanitize_answer("HTTP 0"), "HTTP 0");
    }

    #[test]
    fn test_nested_decorations() {
        assert_eq!(sanitize_answer("answer: - x"), "x");
        assert_eq!(sanitize_answer("Answer: \"x\""), "x");
        assert_eq!(sanitize_answer("1. - x"), "x");
        assert_eq!(sanitize_answer("A-list"), "A-list");
        assert_eq!(sanitize_answer("a-priori"), "a-priori");
        assert_eq!(sanitize_answer("A-B testing"), "A-B testing");
        assert_eq!(sanitize_answer("Answer: A-list"), "A-list");
        assert_eq!(sanitize_answer("a : 4"), "4");
    }

    #[test]
    fn test_idempotent_examples() {
        for raw in [
            "Q: What is 2+2?\nA: 4",
            "- Paris",
            "answer: 'a: b'",
            "\"- 1) x\"",
            "a:",
            "? ?",
        ] {
            let once = sanitize_answer(raw);
            assert_eq!(sanitize_answer(&once), once, "input {raw:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_idempotent_any_text(raw in ".*") {
            let once = sanitize_answer(&raw);
            prop_assert_eq!(sanitize_answer(&once), once);
        }

        #[test]
        fn prop_idempotent_decorated_text(
            raw in "[-*\u{2022}0-9.)\"'\u{201c}\u{201d}\u{2018}\u{2019} :aAqQ?\n\t]{0,24}(answer|risposta|question)?[-: xyz?\n]{0,12}",
        ) {
            let once = sanitize_answer(&raw);
            prop_assert_eq!(sanitize_answer(&once), once);
        }

        #[test]
        fn prop_single_line_output(raw in ".*") {
            let out = sanitize_answer(&raw);
            prop_assert!(!out.is_empty());
            prop_assert!(!out.contains('\n'));
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}

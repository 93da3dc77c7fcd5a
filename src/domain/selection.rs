//! Selection state and the values produced by a finished selection

use serde::{Deserialize, Serialize};

/// Sentinel shown whenever no usable answer exists
pub const DONT_KNOW: &str = "I DON'T KNOW";

/// Message type tag of a finished selection
pub const SEL_END: &str = "sel_end";

/// Gesture state, one per page context
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Pointer is down and the long-press timer is pending
    Pressing,
    /// Long press confirmed; the pointer now drags the rectangle
    Active,
}

/// Payload crossing the bridge from the page to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMessage {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub text: String,
}

impl SelectionMessage {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: SEL_END.to_string(),
            url: url.into(),
            text: text.into(),
        }
    }
}

/// Unique visible text fragments in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    fragments: Vec<String>,
}

impl ExtractedText {
    pub(crate) fn from_fragments(fragments: Vec<String>) -> Self {
        Self { fragments }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Newline-joined, trimmed text as sent to the host
    pub fn joined(&self) -> String {
        self.fragments.join("\n").trim().to_string()
    }
}

/// What the answer display ends up showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerResult {
    /// A sanitized single line
    Answer(String),
    /// No answer could be determined
    DontKnow,
    /// Backend replied with a non-success status; 0 means the transport failed
    Http(u16),
    /// No credential is configured
    MissingCredential(&'static str),
}

impl AnswerResult {
    /// Classify a sanitized line
    pub fn from_line(line: String) -> Self {
        if line == DONT_KNOW {
            AnswerResult::DontKnow
        } else {
            AnswerResult::Answer(line)
        }
    }

    /// Text for the display channel
    pub fn display_text(&self) -> String {
        match self {
            AnswerResult::Answer(line) => line.clone(),
            AnswerResult::DontKnow => DONT_KNOW.to_string(),
            AnswerResult::Http(code) => format!("HTTP {code}"),
            AnswerResult::MissingCredential(name) => format!("Missing {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_message_wire_format() {
        let msg = SelectionMessage::new("https://example.com/form", "Capital of France?");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "sel_end",
                "url": "https://example.com/form",
                "text": "Capital of France?",
            })
        );
    }

    #[test]
    fn test_extracted_text_joined() {
        let text = ExtractedText::from_fragments(vec!["one".into(), "two".into()]);
        assert_eq!(text.joined(), "one\ntwo");
        assert!(ExtractedText::default().joined().is_empty());
    }

    #[test]
    fn test_answer_result_display() {
        assert_eq!(AnswerResult::Http(0).display_text(), "HTTP 0");
        assert_eq!(AnswerResult::Http(429).display_text(), "HTTP 429");
        assert_eq!(
            AnswerResult::MissingCredential("OpenAI key").display_text(),
            "Missing OpenAI key"
        );
        assert_eq!(
            AnswerResult::from_line(DONT_KNOW.to_string()),
            AnswerResult::DontKnow
        );
        assert_eq!(
            AnswerResult::from_line("Paris".into()).display_text(),
            "Paris"
        );
    }
}

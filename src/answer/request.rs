//! Request and response shapes of the question-answering backend

use serde::Serialize;
use serde_json::Value;

/// Fixed instruction sent ahead of every selection
pub const SYSTEM_PROMPT: &str = "Do NOT translate. Answer in the original language used by the user/question or the selected content. \
First, reason silently and verify against the SELECTED TEXT and/or PROVIDED IMAGE(S). \
If the question is multiple-choice and options are present, output EXACTLY the correct option text verbatim. \
Output: ONLY the final answer text, EXACTLY ONE LINE. \
Do NOT repeat or quote the question, and do NOT add labels like Q:, A:, Answer:. \
No explanations, no preambles, no lists, no markdown, no quotes. \
If the answer cannot be determined from the selected text/images, output exactly: I DON'T KNOW";

/// Longest selection forwarded to the backend, in characters
pub const MAX_SELECTED_CHARS: usize = 12_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendRequest {
    pub model: String,
    pub max_output_tokens: u32,
    pub input: Vec<InputMessage>,
}

impl BackendRequest {
    pub fn new(model: &str, max_output_tokens: u32, user_prompt: String) -> Self {
        Self {
            model: model.to_string(),
            max_output_tokens,
            input: vec![
                InputMessage {
                    role: Role::System,
                    content: SYSTEM_PROMPT.to_string(),
                },
                InputMessage {
                    role: Role::User,
                    content: user_prompt,
                },
            ],
        }
    }
}

/// User message: page URL plus the selection between delimiter lines
pub fn build_user_prompt(selected_text: &str, page_url: &str, max_chars: usize) -> String {
    let text: String = selected_text.chars().take(max_chars).collect();
    [
        format!("URL: {page_url}"),
        String::new(),
        "SELECTED TEXT (may be empty):".to_string(),
        "----".to_string(),
        text,
        "----".to_string(),
        String::new(),
        "INSTRUCTION: one line only. Do NOT translate.".to_string(),
    ]
    .join("\n")
}

/// Pull the answer text out of a response body.
///
/// A non-empty top-level `output_text` wins; otherwise every `output_text`
/// fragment under `output[].content[]` is concatenated. Unexpected shapes
/// are skipped rather than rejected.
pub fn extract_output_text(body: &str) -> serde_json::Result<String> {
    let response: Value = serde_json::from_str(body)?;

    let direct = response
        .get("output_text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim();
    if !direct.is_empty() {
        return Ok(direct.to_string());
    }

    let mut out = String::new();
    let items = response.get("output").and_then(Value::as_array);
    for item in items.into_iter().flatten() {
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in content {
            if part.get("type").and_then(Value::as_str) == Some("output_text") {
                out.push_str(part.get("text").and_then(Value::as_str).unwrap_or_default());
            }
        }
    }
    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_output_text() {
        assert_eq!(extract_output_text(r#"{"output_text": "Paris"}"#).unwrap(), "Paris");
    }

    #[test]
    fn test_output_items() {
        let body = r#"{"output":[{"content":[{"type":"output_text","text":"Paris"}]}]}"#;
        assert_eq!(extract_output_text(body).unwrap(), "Paris");
    }

    #[test]
    fn test_blank_flat_field_falls_back_to_items() {
        let body = r#"{
            "output_text": "   ",
            "output": [
                {"type": "reasoning", "content": null},
                {"content": [
                    {"type": "output_text", "text": "Par"},
                    {"type": "refusal", "text": "no"},
                    {"type": "output_text", "text": "is "}
                ]},
                "garbage",
                {"content": [{"type": "output_text"}]}
            ]
        }"#;
        assert_eq!(extract_output_text(body).unwrap(), "Paris");
    }

    #[test]
    fn test_empty_and_invalid_bodies() {
        assert_eq!(extract_output_text("{}").unwrap(), "");
        assert!(extract_output_text("<html>").is_err());
    }

    #[test]
    fn test_user_prompt_layout() {
        let prompt = build_user_prompt("Capital of France?", "https://example.com", 100);
        assert_eq!(
            prompt,
            "URL: https://example.com\n\nSELECTED TEXT (may be empty):\n----\nCapital of France?\n----\n\nINSTRUCTION: one line only. Do NOT translate."
        );
    }

    #[test]
    fn test_user_prompt_truncates_by_chars() {
        let long = "é".repeat(MAX_SELECTED_CHARS + 50);
        let prompt = build_user_prompt(&long, "u", MAX_SELECTED_CHARS);
        let body = prompt.split("----\n").nth(1).unwrap();
        assert_eq!(body.trim_end_matches("\n").chars().count(), MAX_SELECTED_CHARS);
    }

    #[test]
    fn test_request_body_shape() {
        let request = BackendRequest::new("gpt-5.2", 160, "hello".into());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-5.2");
        assert_eq!(json["max_output_tokens"], 160);
        assert_eq!(json["input"][0]["role"], "system");
        assert_eq!(json["input"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(json["input"][1]["role"], "user");
        assert_eq!(json["input"][1]["content"], "hello");
    }
}

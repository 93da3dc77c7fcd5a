//! Host side of the bridge
//!
//! Receives finished selections, runs the backend call off the page's event
//! loop and pushes the sanitized result to the answer display. Every failure
//! ends up as a display string; nothing propagates back to the page.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url::form_urlencoded;

use crate::answer::{AnswerDisplay, Transport, client, sanitize_answer};
use crate::config::Config;
use crate::domain::{AnswerResult, SelectionMessage};

/// Shown while the backend is thinking
pub const PENDING: &str = "\u{2026}";
/// Name of the credential in the "Missing ..." sentinel
pub const CREDENTIAL_NAME: &str = "OpenAI key";

pub struct Host<T> {
    config: Arc<Config>,
    transport: Arc<T>,
    display: AnswerDisplay,
    /// Resolved once at startup
    api_key: Option<String>,
}

impl<T> Clone for Host<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            display: self.display.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

impl<T: Transport> Host<T> {
    pub fn new(config: Config, transport: T) -> Self {
        let display = AnswerDisplay::new(config.answer_hide());
        let api_key = config.api_key();
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
            display,
            api_key,
        }
    }

    pub fn display(&self) -> &AnswerDisplay {
        &self.display
    }

    /// Bridge entry point: returns immediately, the answer arrives on the display
    pub fn on_selection(&self, json: String) -> JoinHandle<AnswerResult> {
        let host = self.clone();
        tokio::spawn(async move { host.answer(&json).await })
    }

    /// Start an answer task for every message until the bridge closes, then
    /// collect the results in arrival order
    pub async fn serve(&self, mut messages: mpsc::UnboundedReceiver<String>) -> Vec<AnswerResult> {
        let mut tasks = Vec::new();
        while let Some(json) = messages.recv().await {
            tasks.push(self.on_selection(json));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(result) => results.push(result),
                Err(err) => log::error!("Answer task failed: {err}"),
            }
        }
        results
    }

    /// Full pipeline for one serialized selection message
    pub async fn answer(&self, json: &str) -> AnswerResult {
        let message: SelectionMessage = match serde_json::from_str(json) {
            Ok(message) => message,
            Err(err) => {
                log::warn!("Unreadable selection message: {err}");
                return self.finish(AnswerResult::DontKnow);
            }
        };

        let text = message.text.trim();
        if text.is_empty() {
            return self.finish(AnswerResult::DontKnow);
        }

        self.display.show(PENDING);

        let Some(api_key) = self.api_key.as_deref() else {
            return self.finish(AnswerResult::MissingCredential(CREDENTIAL_NAME));
        };

        let result =
            match client::ask(self.transport.as_ref(), &self.config, api_key, text, &message.url)
                .await
            {
                Ok(raw) => AnswerResult::from_line(sanitize_answer(&raw)),
                Err(err) => {
                    log::warn!("Backend request failed: {err}");
                    AnswerResult::Http(err.status_code())
                }
            };
        self.finish(result)
    }

    fn finish(&self, result: AnswerResult) -> AnswerResult {
        self.display.show(result.display_text());
        result
    }
}

/// Turn address-bar input into a URL to load
pub fn normalize_url(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return "about:blank".to_string();
    }
    if s.starts_with("http://") || s.starts_with("https://") {
        return s.to_string();
    }
    if s.contains('.') {
        return format!("https://{s}");
    }
    let query: String = form_urlencoded::byte_serialize(s.as_bytes()).collect();
    format!("https://www.google.com/search?q={query}")
}

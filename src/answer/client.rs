//! Backend call over an injectable transport
//!
//! The default transport is a `reqwest` client configured with the connect and
//! total timeouts from [`Config`]. Tests swap in a canned transport.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use super::request::{BackendRequest, build_user_prompt, extract_output_text};
use crate::config::Config;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport failed: {0}")]
    Transport(String),
    #[error("backend answered HTTP {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

impl BackendError {
    /// Status code reported on the display channel, 0 for anything but an HTTP status
    pub fn status_code(&self) -> u16 {
        match self {
            BackendError::Status(code) => *code,
            _ => 0,
        }
    }
}

/// Raw HTTP exchange result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Everything needed to POST one JSON body
#[derive(Debug, Clone)]
pub struct PostJson<'a> {
    pub url: &'a str,
    pub bearer: &'a str,
    pub body: String,
}

pub trait Transport: Send + Sync + 'static {
    fn post_json(
        &self,
        request: PostJson<'_>,
    ) -> impl Future<Output = Result<HttpReply, BackendError>> + Send;
}

/// Transport backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let client = client_builder(config).build()?;
        Ok(Self { client })
    }
}

fn client_builder(config: &Config) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.read_timeout_secs))
}

impl Transport for HttpTransport {
    async fn post_json(&self, request: PostJson<'_>) -> Result<HttpReply, BackendError> {
        let response = self
            .client
            .post(request.url)
            .bearer_auth(request.bearer)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("{} answered {}", request.url, status);
        }
        let body = response.text().await?;
        Ok(HttpReply {
            status: status.as_u16(),
            body,
        })
    }
}

/// Ask the backend about a selection; returns the raw (unsanitized) answer text
pub async fn ask<T: Transport>(
    transport: &T,
    config: &Config,
    api_key: &str,
    selected_text: &str,
    page_url: &str,
) -> Result<String, BackendError> {
    let prompt = build_user_prompt(selected_text, page_url, config.max_selected_chars);
    let request = BackendRequest::new(&config.model, config.max_output_tokens, prompt);
    let body = serde_json::to_string(&request)?;

    log::debug!("Asking {} about {} chars from {}", config.model, selected_text.len(), page_url);
    let reply = transport
        .post_json(PostJson {
            url: &config.endpoint,
            bearer: api_key,
            body,
        })
        .await?;

    if !(200..=299).contains(&reply.status) {
        return Err(BackendError::Status(reply.status));
    }
    Ok(extract_output_text(&reply.body)?)
}

//! One-way channel from the page to the host application
//!
//! Sending is best effort. A missing or broken host never surfaces as an
//! error on the page; it shows up as [`Delivery::Failed`] and a log line.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::{Rect, SelectionMessage};
use crate::extract::{TextExtractor, TextSurface};

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("host is no longer listening")]
    Disconnected,
    #[error("failed to encode selection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Host-side receiver of serialized selection messages
pub trait HostSink {
    fn post(&self, json: &str) -> Result<(), BridgeError>;
}

impl HostSink for mpsc::UnboundedSender<String> {
    fn post(&self, json: &str) -> Result<(), BridgeError> {
        self.send(json.to_owned())
            .map_err(|_| BridgeError::Disconnected)
    }
}

/// Whether a selection reached the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Dropped after logging; the page behaves as if nothing was selected
    Failed,
}

pub struct Bridge<H> {
    host: Option<H>,
    extractor: TextExtractor,
}

impl<H: HostSink> Bridge<H> {
    pub fn new(host: Option<H>, extractor: TextExtractor) -> Self {
        Self { host, extractor }
    }

    /// Extract the text under `rect` and hand it to the host
    pub fn send_selection<S: TextSurface + ?Sized>(&self, surface: &S, rect: Rect) -> Delivery {
        let text = self.extractor.extract(surface, rect);
        let message = SelectionMessage::new(surface.url(), text.joined());
        match self.send(&message) {
            Ok(()) => {
                log::debug!("Delivered selection of {} chars", message.text.len());
                Delivery::Delivered
            }
            Err(err) => {
                log::warn!("Selection not delivered to host: {err}");
                Delivery::Failed
            }
        }
    }

    fn send(&self, message: &SelectionMessage) -> Result<(), BridgeError> {
        let Some(host) = &self.host else {
            return Err(BridgeError::Disconnected);
        };
        let json = serde_json::to_string(message)?;
        host.post(&json)
    }
}

//! Answer line shown to the user, hidden again after a fixed delay

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long an answer stays visible
pub const AUTO_HIDE: Duration = Duration::from_millis(2200);

#[derive(Default)]
struct Shown {
    text: Option<String>,
    generation: u64,
    hide_task: Option<JoinHandle<()>>,
}

/// Last-write-wins display: each new answer replaces the visible one and
/// cancels the pending auto-hide of the previous answer.
#[derive(Clone)]
pub struct AnswerDisplay {
    shown: Arc<Mutex<Shown>>,
    hide_after: Duration,
}

impl AnswerDisplay {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            shown: Arc::new(Mutex::new(Shown::default())),
            hide_after,
        }
    }

    /// Show `text` now. Must be called from within a tokio runtime.
    pub fn show(&self, text: impl Into<String>) {
        let text = text.into();
        log::info!("Answer: {text}");

        let mut shown = self.shown.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = shown.hide_task.take() {
            task.abort();
        }
        shown.generation += 1;
        shown.text = Some(text);

        let generation = shown.generation;
        let state = Arc::clone(&self.shown);
        let delay = self.hide_after;
        shown.hide_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut shown = state.lock().unwrap_or_else(|e| e.into_inner());
            if shown.generation == generation {
                shown.text = None;
                shown.hide_task = None;
            }
        }));
    }

    /// Currently visible answer, if any
    pub fn current(&self) -> Option<String> {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .text
            .clone()
    }
}

impl Default for AnswerDisplay {
    fn default() -> Self {
        Self::new(AUTO_HIDE)
    }
}

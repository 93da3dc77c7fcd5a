//! Replay of a recorded page session
//!
//! A session file bundles a document snapshot with a timed input script:
//!
//! ```json
//! {
//!   "address": "example.com/quiz",
//!   "viewport": {"width": 1080, "height": 1920},
//!   "document": {"url": "", "root": {"tag": "body", "children": []}},
//!   "events": [
//!     {"at_ms": 0, "type": "pointer_down", "x": 100, "y": 100},
//!     {"at_ms": 300, "type": "pointer_move", "x": 240, "y": 180},
//!     {"at_ms": 320, "type": "pointer_up"}
//!   ]
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::bridge::{Bridge, Delivery, HostSink};
use crate::config::Config;
use crate::domain::Point;
use crate::extract::TextExtractor;
use crate::extract::snapshot::DocumentSnapshot;
use crate::gesture::{PointerEvent, TargetKind, TouchEvent};
use crate::host::normalize_url;
use crate::page::Page;
use crate::render::pixmap::PixmapOverlay;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Raw input as a browser would deliver it
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f32,
        y: f32,
        #[serde(default)]
        target: TargetKind,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,
    PointerCancel,
    TouchStart {
        #[serde(default)]
        touches: Vec<Point>,
        #[serde(default)]
        target: TargetKind,
    },
    TouchMove {
        #[serde(default)]
        touches: Vec<Point>,
    },
    TouchEnd,
    TouchCancel,
}

impl InputEvent {
    fn into_pointer(self) -> Option<PointerEvent> {
        match self {
            InputEvent::PointerDown { x, y, target } => Some(PointerEvent::Down {
                point: Point::new(x, y),
                target,
            }),
            InputEvent::PointerMove { x, y } => Some(PointerEvent::Move {
                point: Point::new(x, y),
            }),
            InputEvent::PointerUp => Some(PointerEvent::Up),
            InputEvent::PointerCancel => Some(PointerEvent::Cancel),
            InputEvent::TouchStart { touches, target } => {
                TouchEvent::Start { touches, target }.into_pointer()
            }
            InputEvent::TouchMove { touches } => TouchEvent::Move { touches }.into_pointer(),
            InputEvent::TouchEnd => TouchEvent::End.into_pointer(),
            InputEvent::TouchCancel => TouchEvent::Cancel.into_pointer(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub input: InputEvent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionScript {
    /// What the user typed in the address bar; overrides the document URL
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub viewport: Viewport,
    pub document: DocumentSnapshot,
    pub events: Vec<TimedEvent>,
}

impl SessionScript {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut script: SessionScript =
            serde_json::from_str(json).context("Invalid session script")?;
        if let Some(address) = &script.address {
            script.document.url = normalize_url(address);
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Play the script against a freshly loaded page, posting selections to `host`
pub fn replay<H: HostSink>(
    script: SessionScript,
    config: &Config,
    host: Option<H>,
) -> anyhow::Result<Vec<Delivery>> {
    let overlay = PixmapOverlay::new(script.viewport.width, script.viewport.height)
        .context("Viewport must not be empty")?;
    let bridge = Bridge::new(
        host,
        TextExtractor::new(config.gesture.min_selection_px),
    );
    let mut page = Page::new(script.document, overlay, bridge);

    // Load-finished can be reported more than once for the same page
    page.install(config.gesture.gesture_config());
    page.install(config.gesture.gesture_config());

    let mut deliveries = Vec::new();
    let mut last = Duration::ZERO;
    for event in script.events {
        let at = Duration::from_millis(event.at_ms).max(last);
        last = at;
        let Some(pointer) = event.input.into_pointer() else {
            log::debug!("Ignoring input without a pointer position at {}ms", event.at_ms);
            continue;
        };
        let dispatch = page.dispatch(at, pointer);
        log::trace!(
            "{}ms {:?} -> {:?}, intercepted: {}",
            event.at_ms,
            pointer,
            page.state(),
            dispatch.intercepted
        );
        deliveries.extend(dispatch.deliveries);
    }
    deliveries.extend(page.advance(last).deliveries);

    if page.overlay().is_visible() {
        log::debug!("Session ended with the selection still active");
    }
    Ok(deliveries)
}

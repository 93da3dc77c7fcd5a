//! Maps a selection rectangle to the visible text it covers
//!
//! The extractor only talks to a [`TextSurface`]; the live page, a recorded
//! [`snapshot::DocumentSnapshot`] or a test double all work the same way.

pub mod snapshot;
pub mod surface;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{ExtractedText, Rect};
pub use surface::{ElementInfo, LayoutError, TextSurface, VisibleText};

/// Selections narrower or shorter than this are treated as accidental
pub const MIN_SELECTION_PX: f32 = 8.0;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs to one space and trim
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct TextExtractor {
    min_size: f32,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(MIN_SELECTION_PX)
    }
}

impl TextExtractor {
    pub fn new(min_size: f32) -> Self {
        Self { min_size }
    }

    /// Collect unique visible text fragments whose layout intersects `rect`
    pub fn extract<S: TextSurface + ?Sized>(&self, surface: &S, rect: Rect) -> ExtractedText {
        if rect.width() < self.min_size || rect.height() < self.min_size {
            log::debug!(
                "Selection {}x{} below minimum size, nothing extracted",
                rect.width(),
                rect.height()
            );
            return ExtractedText::default();
        }

        let mut seen = HashSet::new();
        let mut fragments = Vec::new();
        let mut skipped = 0usize;

        for node in surface.text_nodes() {
            let node = match node {
                Ok(node) => node,
                Err(err) => {
                    log::debug!("Skipping text node: {err}");
                    skipped += 1;
                    continue;
                }
            };

            let normalized = normalize_whitespace(node.text());
            if normalized.is_empty() {
                continue;
            }
            if !node.parent().is_some_and(|parent| parent.is_content()) {
                continue;
            }

            let boxes = match node.layout_boxes() {
                Ok(boxes) => boxes,
                Err(err) => {
                    log::debug!("Skipping text node without layout: {err}");
                    skipped += 1;
                    continue;
                }
            };

            if boxes.iter().any(|b| rect.intersects(b)) && seen.insert(normalized.clone()) {
                fragments.push(normalized);
            }
        }

        log::debug!(
            "Extracted {} fragments from {:?} ({} nodes skipped)",
            fragments.len(),
            rect,
            skipped
        );
        ExtractedText::from_fragments(fragments)
    }
}

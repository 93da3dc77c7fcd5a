//! Pointer and touch input as seen by the gesture controller

use serde::Deserialize;

use crate::domain::Point;

/// What kind of element received a pointer-down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Content,
    Input,
    TextArea,
    ContentEditable,
}

impl TargetKind {
    /// Presses on these belong to native text editing
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            TargetKind::Input | TargetKind::TextArea | TargetKind::ContentEditable
        )
    }
}

/// A single-pointer event in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { point: Point, target: TargetKind },
    Move { point: Point },
    Up,
    Cancel,
}

/// Touch events, used where pointer events are unavailable.
///
/// Only the first touch point is tracked.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    Start {
        touches: Vec<Point>,
        target: TargetKind,
    },
    Move {
        touches: Vec<Point>,
    },
    End,
    Cancel,
}

impl TouchEvent {
    /// Map onto the pointer model; start/move events without touches are dropped
    pub fn into_pointer(self) -> Option<PointerEvent> {
        match self {
            TouchEvent::Start { touches, target } => touches
                .first()
                .map(|&point| PointerEvent::Down { point, target }),
            TouchEvent::Move { touches } => {
                touches.first().map(|&point| PointerEvent::Move { point })
            }
            TouchEvent::End => Some(PointerEvent::Up),
            TouchEvent::Cancel => Some(PointerEvent::Cancel),
        }
    }
}

//! Corner markers that track the selection rectangle
//!
//! Layout is a pure function of the gesture state and rectangle. The surface
//! that shows it is the only mutable part, and it never receives input:
//! pointer events always go to the gesture controller.

use crate::domain::{Point, Rect, SelectionState};

/// Marker diameter in CSS pixels
pub const DOT_SIZE: f32 = 3.0;
/// rgba(120, 120, 120, 0.75)
pub const DOT_COLOR: [u8; 4] = [120, 120, 120, 191];

/// One round marker, positioned by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub left: f32,
    pub top: f32,
    pub size: f32,
}

impl Marker {
    fn centered_on(corner: Point) -> Self {
        let r = DOT_SIZE / 2.0;
        Self {
            left: corner.x - r,
            top: corner.y - r,
            size: DOT_SIZE,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.size / 2.0, self.top + self.size / 2.0)
    }
}

/// Top-left, top-right, bottom-left, bottom-right markers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLayout {
    pub markers: [Marker; 4],
}

/// Markers for the current rectangle, or `None` when nothing should be shown
pub fn marker_layout(state: SelectionState, rect: Rect) -> Option<MarkerLayout> {
    if state != SelectionState::Active {
        return None;
    }
    Some(MarkerLayout {
        markers: rect.corners().map(Marker::centered_on),
    })
}

/// Where marker layouts end up
pub trait OverlaySurface {
    fn show(&mut self, layout: &MarkerLayout);
    fn hide(&mut self);

    /// Show or hide depending on the layout
    fn present(&mut self, layout: Option<&MarkerLayout>) {
        match layout {
            Some(layout) => self.show(layout),
            None => self.hide(),
        }
    }
}

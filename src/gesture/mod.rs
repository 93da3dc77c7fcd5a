//! Long-press-then-drag rectangle selection
//!
//! The controller is a plain state machine. It never touches timers or the
//! page directly; every side effect comes back as an [`Effect`] for the
//! caller (see [`crate::page::Page`]) to carry out.

pub mod input;

use std::time::Duration;

use crate::domain::{Point, Rect, SelectionState};
pub use input::{PointerEvent, TargetKind, TouchEvent};

/// Hold time before a press turns into a selection
pub const LONG_PRESS: Duration = Duration::from_millis(220);
/// Travel that turns a pending press back into a scroll or tap
pub const MOVE_CANCEL_PX: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub long_press: Duration,
    pub move_cancel_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press: LONG_PRESS,
            move_cancel_px: MOVE_CANCEL_PX,
        }
    }
}

/// Identifies one scheduled long-press timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Work the caller must perform after feeding an event
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartTimer { id: TimerId, after: Duration },
    CancelTimer(TimerId),
    /// `false` disables native text selection and touch scrolling on the page,
    /// `true` restores them
    NativeInteraction(bool),
    /// A selection finished with this rectangle
    Selected(Rect),
}

/// Result of handling one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// The event must be prevented and stopped from reaching the page
    pub intercept: bool,
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn passthrough() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct GestureController {
    config: GestureConfig,
    state: SelectionState,
    anchor: Point,
    current: Point,
    timer: Option<TimerId>,
    next_timer: u64,
}

impl GestureController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: SelectionState::Idle,
            anchor: Point::default(),
            current: Point::default(),
            timer: None,
            next_timer: 0,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Rectangle between the press point and the latest pointer position
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.current)
    }

    pub fn handle(&mut self, event: PointerEvent) -> Outcome {
        match event {
            PointerEvent::Down { point, target } => self.press(point, target),
            PointerEvent::Move { point } => self.drag(point),
            PointerEvent::Up => self.release(),
            PointerEvent::Cancel => self.cancel(),
        }
    }

    /// Long-press timer fired. Stale or cancelled timers are ignored.
    pub fn on_timer(&mut self, id: TimerId) -> Outcome {
        if self.timer != Some(id) {
            log::trace!("Ignoring stale long-press timer {:?}", id);
            return Outcome::passthrough();
        }
        self.timer = None;
        if self.state != SelectionState::Pressing {
            return Outcome::passthrough();
        }

        self.state = SelectionState::Active;
        log::debug!("Long press confirmed at {:?}", self.anchor);
        Outcome {
            intercept: false,
            effects: vec![Effect::NativeInteraction(false)],
        }
    }

    fn press(&mut self, point: Point, target: TargetKind) -> Outcome {
        if target.is_editable() {
            log::trace!("Pointer down on {:?}, leaving it to native editing", target);
            return Outcome::passthrough();
        }

        let mut effects = Vec::new();
        if self.state == SelectionState::Active {
            effects.push(Effect::NativeInteraction(true));
        }
        if let Some(old) = self.timer.take() {
            effects.push(Effect::CancelTimer(old));
        }

        self.state = SelectionState::Pressing;
        self.anchor = point;
        self.current = point;

        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timer = Some(id);
        effects.push(Effect::StartTimer {
            id,
            after: self.config.long_press,
        });

        Outcome {
            intercept: false,
            effects,
        }
    }

    fn drag(&mut self, point: Point) -> Outcome {
        match self.state {
            SelectionState::Idle => Outcome::passthrough(),
            SelectionState::Pressing => {
                self.current = point;
                if let Some(id) = self.timer
                    && self.anchor.distance(point) > self.config.move_cancel_px
                {
                    log::debug!("Press moved past threshold, treating as scroll");
                    self.timer = None;
                    self.state = SelectionState::Idle;
                    return Outcome {
                        intercept: false,
                        effects: vec![Effect::CancelTimer(id)],
                    };
                }
                Outcome::passthrough()
            }
            SelectionState::Active => {
                self.current = point;
                Outcome {
                    intercept: true,
                    effects: Vec::new(),
                }
            }
        }
    }

    fn release(&mut self) -> Outcome {
        let mut effects: Vec<Effect> = self
            .timer
            .take()
            .map(Effect::CancelTimer)
            .into_iter()
            .collect();
        let previous = std::mem::replace(&mut self.state, SelectionState::Idle);
        if previous != SelectionState::Active {
            return Outcome {
                intercept: false,
                effects,
            };
        }

        let rect = self.rect();
        log::debug!("Selection finished: {:?}", rect);
        effects.push(Effect::Selected(rect));
        effects.push(Effect::NativeInteraction(true));
        Outcome {
            intercept: true,
            effects,
        }
    }

    fn cancel(&mut self) -> Outcome {
        let mut effects: Vec<Effect> = self
            .timer
            .take()
            .map(Effect::CancelTimer)
            .into_iter()
            .collect();
        let previous = std::mem::replace(&mut self.state, SelectionState::Idle);
        if previous == SelectionState::Active {
            log::debug!("Selection cancelled");
            effects.push(Effect::NativeInteraction(true));
        }
        Outcome {
            intercept: false,
            effects,
        }
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

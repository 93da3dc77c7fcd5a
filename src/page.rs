//! One page context: document, overlay, bridge and the installed gesture layer
//!
//! Everything here runs on the page's single event loop. Time is passed in
//! by the caller, so the long-press timer is just a due time that fires the
//! next time the clock is advanced past it.

use std::time::Duration;

use crate::bridge::{Bridge, Delivery, HostSink};
use crate::domain::SelectionState;
use crate::extract::TextSurface;
use crate::gesture::{Effect, GestureConfig, GestureController, Outcome, PointerEvent, TimerId};
use crate::render::overlay::{OverlaySurface, marker_layout};

/// What happened to one dispatched event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The page must not see this event
    pub intercepted: bool,
    /// Selections handed to the bridge while processing it
    pub deliveries: Vec<Delivery>,
}

pub struct Page<S, O, H> {
    document: S,
    overlay: O,
    bridge: Bridge<H>,
    interceptor: Option<GestureController>,
    timers: Vec<(TimerId, Duration)>,
    native_interaction: bool,
    now: Duration,
}

impl<S, O, H> Page<S, O, H>
where
    S: TextSurface,
    O: OverlaySurface,
    H: HostSink,
{
    pub fn new(document: S, overlay: O, bridge: Bridge<H>) -> Self {
        Self {
            document,
            overlay,
            bridge,
            interceptor: None,
            timers: Vec::new(),
            native_interaction: true,
            now: Duration::ZERO,
        }
    }

    /// Install the gesture layer. Returns `false` if this page already has one,
    /// in which case the existing layer keeps its state.
    pub fn install(&mut self, config: GestureConfig) -> bool {
        if self.interceptor.is_some() {
            log::debug!("Gesture layer already installed on {}", self.document.url());
            return false;
        }
        log::info!("Installing gesture layer on {}", self.document.url());
        self.interceptor = Some(GestureController::new(config));
        true
    }

    pub fn is_installed(&self) -> bool {
        self.interceptor.is_some()
    }

    pub fn state(&self) -> SelectionState {
        self.interceptor
            .as_ref()
            .map_or(SelectionState::Idle, GestureController::state)
    }

    /// False while a selection has native text selection and scrolling disabled
    pub fn native_interaction(&self) -> bool {
        self.native_interaction
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Move the clock forward, firing any long-press timer that came due
    pub fn advance(&mut self, now: Duration) -> Dispatch {
        let mut dispatch = Dispatch::default();
        while let Some(pos) = self.next_due(now) {
            let (id, due) = self.timers.remove(pos);
            self.now = due;
            let Some(controller) = self.interceptor.as_mut() else {
                break;
            };
            let outcome = controller.on_timer(id);
            self.apply(outcome, &mut dispatch);
        }
        self.now = self.now.max(now);
        dispatch
    }

    /// Feed one pointer event arriving at `now`
    pub fn dispatch(&mut self, now: Duration, event: PointerEvent) -> Dispatch {
        let mut dispatch = self.advance(now);
        let Some(controller) = self.interceptor.as_mut() else {
            return dispatch;
        };
        let outcome = controller.handle(event);
        self.apply(outcome, &mut dispatch);
        dispatch
    }

    fn next_due(&self, now: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, (_, due))| *due <= now)
            .min_by_key(|(_, (_, due))| *due)
            .map(|(pos, _)| pos)
    }

    fn apply(&mut self, outcome: Outcome, dispatch: &mut Dispatch) {
        dispatch.intercepted |= outcome.intercept;

        for effect in outcome.effects {
            match effect {
                Effect::StartTimer { id, after } => self.timers.push((id, self.now + after)),
                Effect::CancelTimer(id) => self.timers.retain(|(timer, _)| *timer != id),
                Effect::NativeInteraction(enabled) => self.native_interaction = enabled,
                Effect::Selected(rect) => {
                    let delivery = self.bridge.send_selection(&self.document, rect);
                    dispatch.deliveries.push(delivery);
                }
            }
        }

        if let Some(controller) = &self.interceptor {
            let layout = marker_layout(controller.state(), controller.rect());
            self.overlay.present(layout.as_ref());
        }
    }
}

// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture disambiguation state machine.

use kurbo::Point;
use smallvec::{SmallVec, smallvec};

use crate::input::{InputEvent, MouseButton, MouseButtons, ZoomDirection};
use crate::trail::{PointerTrail, Points};

/// Two releases closer together than this many milliseconds form a double-click.
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 320;

/// Coarse classification of the interaction in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// Nothing is pressed.
    #[default]
    Idle,
    /// A button or a single finger is down and has not moved yet.
    ClickArmed,
    /// The pressed pointer has moved.
    Dragging,
    /// Two or more fingers are down.
    PinchActive,
    /// Idle, but a recent wheel step still blocks the next one.
    Cooldown,
}

/// What the viewer should do in response to an input event.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureAction {
    /// Move the image by `to - from` screen pixels.
    Drag {
        /// Previous pointer position.
        from: Point,
        /// Current pointer position.
        to: Point,
    },
    /// Toggle between fit and zoomed-in around `at`.
    DoubleClick {
        /// Position of the first press.
        at: Point,
    },
    /// Scale and move the image as the fingers spread, close or travel.
    Pinch {
        /// Touch positions when the pinch started.
        anchor: Points,
        /// Current touch positions.
        next: Points,
    },
    /// Step the scale around `center`.
    Wheel {
        /// Pointer position.
        center: Point,
        /// Whether to grow or shrink.
        direction: ZoomDirection,
    },
    /// A touch gesture lost its last finger or stopped being a pinch.
    GestureEnd,
}

/// Result of feeding one event to [`GestureState::handle`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureOutput {
    /// Actions to perform, in order.
    pub actions: SmallVec<[GestureAction; 2]>,
    /// The event belongs to the viewer: the host should prevent its default
    /// behavior (scrolling, selection, navigation) and stop its propagation.
    pub consumed: bool,
}

impl GestureOutput {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed() -> Self {
        Self {
            actions: SmallVec::new(),
            consumed: true,
        }
    }

    fn action(action: GestureAction) -> Self {
        Self {
            actions: smallvec![action],
            consumed: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Mouse,
    Touch,
}

/// Classifies a stream of mouse, touch and wheel events into gestures.
///
/// The machine is per open image: create (or [`reset`](Self::reset)) it when
/// an image opens, feed it every event the overlay receives together with a
/// millisecond timestamp, and perform the returned [`GestureAction`]s.
///
/// ```
/// use kurbo::Point;
/// use loupe_gesture::{GestureAction, GestureState, InputEvent, MouseButton};
///
/// let mut gestures = GestureState::new();
/// let at = Point::new(100.0, 100.0);
/// let click = |gestures: &mut GestureState, now| {
///     gestures.handle(&InputEvent::MouseDown { button: MouseButton::Primary, position: at }, now);
///     gestures.handle(&InputEvent::MouseUp { button: MouseButton::Primary, position: at }, now)
/// };
///
/// assert!(click(&mut gestures, 1_000).actions.is_empty());
/// let second = click(&mut gestures, 1_200);
/// assert_eq!(second.actions[0], GestureAction::DoubleClick { at });
/// ```
#[derive(Clone, Debug)]
pub struct GestureState {
    phase: GesturePhase,
    source: Option<Source>,
    trail: PointerTrail,
    last_click: Option<u64>,
    multi_touch: bool,
    double_click_window: u64,
    wheel_blocked_until: Option<u64>,
    now: u64,
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureState {
    /// Creates an idle machine with the default double-click window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_double_click_window(DOUBLE_CLICK_WINDOW_MS)
    }

    /// Creates an idle machine with a custom double-click window in milliseconds.
    #[must_use]
    pub fn with_double_click_window(window: u64) -> Self {
        Self {
            phase: GesturePhase::Idle,
            source: None,
            trail: PointerTrail::default(),
            last_click: None,
            multi_touch: false,
            double_click_window: window,
            wheel_blocked_until: None,
            now: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match (self.phase, self.wheel_blocked_until) {
            (GesturePhase::Idle, Some(until)) if self.now < until => GesturePhase::Cooldown,
            (phase, _) => phase,
        }
    }

    /// Returns `true` when no press, drag or pinch is being tracked.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == GesturePhase::Idle
    }

    /// Blocks wheel steps until `until` (milliseconds).
    ///
    /// Called by the viewer once it has accepted a wheel step.
    pub fn arm_wheel_cooldown(&mut self, until: u64) {
        self.wheel_blocked_until = Some(until);
    }

    /// Drops every tracked pointer and timing reference.
    pub fn reset(&mut self) {
        *self = Self::with_double_click_window(self.double_click_window);
    }

    /// Feeds one event observed at `now` milliseconds.
    pub fn handle(&mut self, event: &InputEvent, now: u64) -> GestureOutput {
        self.now = now;
        match event {
            InputEvent::MouseDown { button, position } => self.mouse_down(*button, *position),
            InputEvent::MouseMove { buttons, position } => self.mouse_move(*buttons, *position),
            InputEvent::MouseUp { button, .. } => self.mouse_up(*button, now),
            InputEvent::TouchStart { touches } => self.touch_start(touches),
            InputEvent::TouchMove { touches } => self.touch_move(touches),
            InputEvent::TouchEnd { touches } => self.touch_end(touches, now),
            InputEvent::Wheel { position, delta_y } => self.wheel(*position, *delta_y, now),
        }
    }

    fn mouse_down(&mut self, button: MouseButton, position: Point) -> GestureOutput {
        if button != MouseButton::Primary || self.source == Some(Source::Touch) {
            return GestureOutput::ignored();
        }
        self.source = Some(Source::Mouse);
        self.phase = GesturePhase::ClickArmed;
        self.trail.start(smallvec![position]);
        GestureOutput::consumed()
    }

    fn mouse_move(&mut self, buttons: MouseButtons, position: Point) -> GestureOutput {
        if self.source != Some(Source::Mouse) {
            return GestureOutput::ignored();
        }
        let others_held = !buttons.difference(MouseButtons::PRIMARY).is_empty();
        if self.phase == GesturePhase::ClickArmed && others_held {
            self.last_click = None;
            self.release();
            return GestureOutput::consumed();
        }
        if !buttons.contains(MouseButtons::PRIMARY) {
            // The release happened outside the overlay.
            self.release();
            return GestureOutput::ignored();
        }
        let Some(previous) = self.trail.advance(smallvec![position]) else {
            return GestureOutput::ignored();
        };
        self.phase = GesturePhase::Dragging;
        GestureOutput::action(GestureAction::Drag {
            from: previous[0],
            to: position,
        })
    }

    fn mouse_up(&mut self, button: MouseButton, now: u64) -> GestureOutput {
        if button != MouseButton::Primary || self.source != Some(Source::Mouse) {
            return GestureOutput::ignored();
        }
        let mut out = GestureOutput::consumed();
        match self.phase {
            GesturePhase::ClickArmed => {
                let at = self.trail.anchor()[0];
                if let Some(action) = self.resolve_click(at, now) {
                    out.actions.push(action);
                }
            }
            // A release after dragging still counts as the last click.
            _ => self.last_click = Some(now),
        }
        self.release();
        out
    }

    fn touch_start(&mut self, touches: &Points) -> GestureOutput {
        if touches.is_empty() || self.source == Some(Source::Mouse) {
            return GestureOutput::ignored();
        }
        self.source = Some(Source::Touch);
        let mut out = GestureOutput::consumed();
        if self.phase == GesturePhase::PinchActive {
            out.actions.push(GestureAction::GestureEnd);
        }
        if touches.len() >= 2 {
            self.multi_touch = true;
            self.phase = GesturePhase::PinchActive;
        } else {
            self.multi_touch = false;
            self.phase = GesturePhase::ClickArmed;
        }
        self.trail.start(touches.clone());
        out
    }

    fn touch_move(&mut self, touches: &Points) -> GestureOutput {
        if self.source != Some(Source::Touch) || self.trail.is_empty() || touches.is_empty() {
            return GestureOutput::ignored();
        }
        if touches.len() == 1 {
            if self.trail.len() != 1 {
                self.trail.rebase(touches.clone());
                self.phase = GesturePhase::Dragging;
                return GestureOutput::consumed();
            }
            let Some(previous) = self.trail.advance(touches.clone()) else {
                return GestureOutput::ignored();
            };
            self.phase = GesturePhase::Dragging;
            return GestureOutput::action(GestureAction::Drag {
                from: previous[0],
                to: touches[0],
            });
        }

        self.multi_touch = true;
        self.phase = GesturePhase::PinchActive;
        if self.trail.len() < 2 {
            self.trail.rebase(touches.clone());
            return GestureOutput::consumed();
        }
        // Pinch steps are measured against the anchor, so it is kept.
        self.trail.count_move();
        GestureOutput::action(GestureAction::Pinch {
            anchor: self.trail.anchor().iter().copied().collect(),
            next: touches.clone(),
        })
    }

    fn touch_end(&mut self, remaining: &Points, now: u64) -> GestureOutput {
        if self.source != Some(Source::Touch) {
            return GestureOutput::ignored();
        }
        let mut out = GestureOutput::consumed();
        if remaining.is_empty() {
            match self.phase {
                GesturePhase::ClickArmed if !self.multi_touch => {
                    let at = self.trail.anchor()[0];
                    if let Some(action) = self.resolve_click(at, now) {
                        out.actions.push(action);
                    }
                }
                _ => self.last_click = None,
            }
            out.actions.push(GestureAction::GestureEnd);
            self.release();
            return out;
        }

        // Any change in the finger count ends the current pinch step sequence.
        if self.phase == GesturePhase::PinchActive {
            out.actions.push(GestureAction::GestureEnd);
        }
        if remaining.len() >= 2 {
            self.trail.start(remaining.clone());
            self.phase = GesturePhase::PinchActive;
        } else {
            self.trail.rebase(remaining.clone());
            self.phase = GesturePhase::Dragging;
        }
        out
    }

    fn wheel(&mut self, position: Point, delta_y: f64, now: u64) -> GestureOutput {
        if self.phase != GesturePhase::Idle {
            return GestureOutput::consumed();
        }
        if self.wheel_blocked_until.is_some_and(|until| now < until) {
            return GestureOutput::consumed();
        }
        match ZoomDirection::from_wheel_delta(delta_y) {
            Some(direction) => GestureOutput::action(GestureAction::Wheel {
                center: position,
                direction,
            }),
            None => GestureOutput::consumed(),
        }
    }

    fn resolve_click(&mut self, at: Point, now: u64) -> Option<GestureAction> {
        match self.last_click {
            Some(previous) if now.saturating_sub(previous) < self.double_click_window => {
                self.last_click = None;
                Some(GestureAction::DoubleClick { at })
            }
            _ => {
                self.last_click = Some(now);
                None
            }
        }
    }

    fn release(&mut self) {
        self.phase = GesturePhase::Idle;
        self.source = None;
        self.multi_touch = false;
        self.trail.clear();
    }
}

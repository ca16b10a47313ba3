// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lifecycle controller.

use kurbo::{Point, Vec2};
use loupe_geometry::{
    CenterOptions, Viewport, ViewportTarget, compute_centered, compute_fit, resolve_viewport,
};
use loupe_gesture::{GestureAction, GestureOutput, GestureState, InputEvent};
use tracing::{debug, trace, warn};

use crate::hooks::{HookError, HookKind, Hooks, ListenerId, ViewerEvent};
use crate::image::{ImageDescriptor, ImageId, LoadOutcome};
use crate::options::ViewerOptions;
use crate::surface::{CssTransform, Surface};
use crate::timer::{TimerId, TimerQueue};
use crate::transform::{ImageState, TransformState};

/// Where the viewer is in its open/close cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Nothing is shown.
    Closed,
    /// `BeforeOpen` listeners are running or the image is being mounted.
    Opening,
    /// An image is shown and accepts input.
    Open,
    /// `BeforeClose` listeners are running or the overlay is being torn down.
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    ClearMoved,
    PinchCommit,
    HideIndicator,
    ResizeRetry { attempt: u32 },
}

#[derive(Debug)]
struct OpenImage {
    image: ImageDescriptor,
    transform: Option<TransformState>,
    moved_timer: Option<TimerId>,
    indicator_timer: Option<TimerId>,
    resize_timer: Option<TimerId>,
}

impl OpenImage {
    fn new(image: ImageDescriptor) -> Self {
        Self {
            image,
            transform: None,
            moved_timer: None,
            indicator_timer: None,
            resize_timer: None,
        }
    }
}

/// A single-image lightbox driven by a host [`Surface`].
///
/// All work happens inside calls made by the host: lifecycle calls,
/// [`handle_input`](Self::handle_input) for every overlay event and
/// [`tick`](Self::tick) from its animation-frame or timer callback.
#[derive(Debug)]
pub struct Viewer<S> {
    surface: S,
    options: ViewerOptions,
    hooks: Hooks,
    state: LifecycleState,
    current: Option<OpenImage>,
    viewport: Viewport,
    gestures: GestureState,
    timers: TimerQueue<Deferred>,
    frame: Option<CssTransform>,
    overlay_mounted: bool,
    listening: bool,
    indicator_visible: bool,
    moved: bool,
    stopped: bool,
    now: u64,
}

impl<S: Surface> Viewer<S> {
    /// Creates a closed viewer.
    pub fn new(surface: S, options: ViewerOptions) -> Self {
        let viewport = resolve_viewport(surface.viewport_target());
        Self {
            surface,
            options,
            hooks: Hooks::new(),
            state: LifecycleState::Closed,
            current: None,
            viewport,
            gestures: GestureState::with_double_click_window(options.timings.double_click_window),
            timers: TimerQueue::new(),
            frame: None,
            overlay_mounted: false,
            listening: false,
            indicator_visible: false,
            moved: false,
            stopped: false,
            now: 0,
        }
    }

    /// The host surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The host surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Construction options.
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Lifecycle position.
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.state
    }

    /// Whether an image is shown.
    pub fn is_open(&self) -> bool {
        self.state == LifecycleState::Open
    }

    /// The image currently shown.
    pub fn current_image(&self) -> Option<&ImageDescriptor> {
        self.current.as_ref().map(|open| &open.image)
    }

    /// The rectangle the overlay paints into, while it is mounted.
    pub fn preview_container(&self) -> Option<Viewport> {
        self.overlay_mounted.then_some(self.viewport)
    }

    /// Transform of the shown image, once it has loaded.
    pub fn transform(&self) -> Option<&TransformState> {
        self.current.as_ref()?.transform.as_ref()
    }

    /// Snapshot of the shown image's transform.
    pub fn image_state(&self) -> Option<ImageState> {
        self.transform().map(TransformState::snapshot)
    }

    /// Whether the image moved recently enough that a backdrop click is not a dismissal.
    pub fn just_moved(&self) -> bool {
        self.moved
    }

    /// Whether gestures are currently ignored.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Earliest time [`tick`](Self::tick) has work, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        if self.frame.is_some() {
            return Some(self.now);
        }
        self.timers.next_deadline()
    }

    /// Registers a lifecycle listener.
    pub fn on(
        &mut self,
        kind: HookKind,
        listener: impl FnMut(&mut ViewerEvent) -> Result<(), HookError> + 'static,
    ) -> ListenerId {
        self.hooks.on(kind, listener)
    }

    /// Removes a lifecycle listener.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.hooks.off(id)
    }

    fn dispatch(&mut self, kind: HookKind, target: Option<ImageId>) -> bool {
        let mut event = ViewerEvent::new(kind, target, self.image_state());
        self.hooks.run(&mut event)
    }

    /// Shows `image`. Returns `false` if already open or a listener cancelled.
    pub fn open(&mut self, image: ImageDescriptor) -> bool {
        if self.state != LifecycleState::Closed {
            debug!(state = ?self.state, "open ignored: viewer is not closed");
            return false;
        }
        let id = image.id();
        self.state = LifecycleState::Opening;
        if self.dispatch(HookKind::BeforeOpen, Some(id)) {
            debug!(image = id.0, "open prevented by listener");
            self.state = LifecycleState::Closed;
            return false;
        }

        self.viewport = resolve_viewport(self.surface.viewport_target());
        if !self.overlay_mounted {
            self.surface.mount_overlay();
            self.overlay_mounted = true;
        }
        self.gestures.reset();
        self.moved = false;
        self.mount(image);
        self.state = LifecycleState::Open;
        debug!(image = id.0, viewport = ?self.viewport.rect(), "opened");
        self.dispatch(HookKind::AfterOpen, Some(id));
        true
    }

    /// Replaces the shown image without running open/close listeners.
    ///
    /// Returns `false` when the viewer is not open.
    pub fn show(&mut self, image: ImageDescriptor) -> bool {
        if self.state != LifecycleState::Open {
            return false;
        }
        if let Some(previous) = self.current.take() {
            self.surface.detach_image(&previous.image);
        }
        self.clear_pending();
        self.gestures.reset();
        self.mount(image);
        true
    }

    fn mount(&mut self, image: ImageDescriptor) {
        self.surface.attach_image(&image);
        let displayable = image.is_displayable();
        let pending = !image.is_loaded();
        self.current = Some(OpenImage::new(image));
        if displayable {
            self.init_transform();
        } else if pending {
            self.surface.set_loading(true);
        }
        let wired = displayable || pending;
        if wired && !self.listening {
            self.surface.listen();
            self.listening = true;
        } else if !wired && self.listening {
            self.surface.unlisten();
            self.listening = false;
        }
    }

    fn init_transform(&mut self) {
        let Some(open) = self.current.as_mut() else {
            return;
        };
        let natural = open.image.natural_size();
        let origin = compute_fit(natural, &self.viewport, self.options.limits);
        trace!(?origin, "fitted image");
        open.transform = Some(TransformState::new(natural, origin, &self.viewport));
        self.submit(false);
    }

    /// Records the load result of the shown image.
    ///
    /// Returns `false` if `id` is not shown or its load already completed.
    pub fn image_loaded(&mut self, id: ImageId, outcome: LoadOutcome) -> bool {
        let Some(open) = self.current.as_mut() else {
            return false;
        };
        if open.image.id() != id || !open.image.complete(outcome) {
            return false;
        }
        self.surface.set_loading(false);
        match outcome {
            LoadOutcome::Loaded(natural) => {
                debug!(image = id.0, ?natural, "image loaded");
                self.init_transform();
            }
            LoadOutcome::Failed => {
                warn!(image = id.0, "image failed to load");
                if self.listening {
                    self.surface.unlisten();
                    self.listening = false;
                }
            }
        }
        true
    }

    /// Hides the viewer. Returns `false` if not open or a listener cancelled.
    pub fn close(&mut self) -> bool {
        if self.state != LifecycleState::Open {
            return false;
        }
        let id = self.current.as_ref().map(|open| open.image.id());
        self.state = LifecycleState::Closing;
        if self.dispatch(HookKind::BeforeClose, id) {
            debug!("close prevented by listener");
            self.state = LifecycleState::Open;
            return false;
        }

        if self.listening {
            self.surface.unlisten();
            self.listening = false;
        }
        if let Some(open) = self.current.take() {
            self.surface.detach_image(&open.image);
        }
        if matches!(self.surface.viewport_target(), ViewportTarget::Window(_))
            && self.overlay_mounted
        {
            self.surface.unmount_overlay();
            self.overlay_mounted = false;
        }
        self.clear_pending();
        self.gestures.reset();
        self.state = LifecycleState::Closed;
        debug!("closed");
        self.dispatch(HookKind::AfterClose, id);
        true
    }

    fn clear_pending(&mut self) {
        self.timers.clear();
        self.frame = None;
        self.moved = false;
        if self.indicator_visible {
            self.surface.hide_indicator();
            self.indicator_visible = false;
        }
    }

    /// Closes unless the image just moved.
    pub fn backdrop_click(&mut self) -> bool {
        if self.moved {
            trace!("backdrop click ignored after movement");
            return false;
        }
        self.close()
    }

    /// Ignores every gesture until [`resume_interactions`](Self::resume_interactions).
    pub fn stop_interactions(&mut self) {
        self.stopped = true;
    }

    /// Accepts gestures again.
    pub fn resume_interactions(&mut self) {
        self.stopped = false;
    }

    /// Re-resolves the viewport after the window or container changed size.
    ///
    /// The image returns to its new fit once no transform is in flight.
    pub fn resize(&mut self, now: u64) {
        self.now = now;
        if self.state != LifecycleState::Open {
            return;
        }
        self.viewport = resolve_viewport(self.surface.viewport_target());
        let Some(open) = self.current.as_mut() else {
            return;
        };
        let Some(transform) = open.transform.as_mut() else {
            return;
        };
        transform.set_origin(compute_fit(
            transform.natural_size(),
            &self.viewport,
            self.options.limits,
        ));
        if let Some(id) = open.resize_timer.take() {
            self.timers.cancel(id);
        }
        self.restore_after_resize(0);
    }

    fn restore_after_resize(&mut self, attempt: u32) {
        let timings = self.options.timings;
        let Some(open) = self.current.as_mut() else {
            return;
        };
        let Some(transform) = open.transform.as_mut() else {
            return;
        };
        if transform.animating {
            if attempt >= timings.resize_retry_budget {
                warn!(attempt, "giving up on resize restore: transform still in flight");
                return;
            }
            let due = self.now + timings.resize_retry_interval;
            open.resize_timer = Some(self.timers.schedule(
                due,
                Deferred::ResizeRetry {
                    attempt: attempt + 1,
                },
            ));
            return;
        }
        transform.restore(self.viewport.center());
        self.submit(true);
    }

    /// Feeds one overlay event observed at `now`.
    ///
    /// The returned output says whether the host should suppress the event's
    /// default behavior.
    pub fn handle_input(&mut self, event: &InputEvent, now: u64) -> GestureOutput {
        self.now = now;
        if self.state != LifecycleState::Open || !self.listening {
            return GestureOutput::default();
        }
        let output = self.gestures.handle(event, now);
        for action in &output.actions {
            self.perform(action);
        }
        output
    }

    fn perform(&mut self, action: &GestureAction) {
        let Some(transform) = self
            .current
            .as_mut()
            .and_then(|open| open.transform.as_mut())
        else {
            return;
        };
        if let GestureAction::GestureEnd = action {
            transform.end_pinch();
            return;
        }
        if self.stopped {
            trace!(?action, "gesture ignored while interactions are stopped");
            return;
        }
        if transform.pending_commit || transform.animating {
            trace!(?action, "gesture dropped: update in flight");
            return;
        }

        let viewport = self.viewport;
        match action {
            GestureAction::Drag { from, to } => {
                transform.drag(*from, *to);
                self.submit(false);
            }
            GestureAction::DoubleClick { at } => {
                transform.double_click_zoom(*at, &viewport);
                self.submit(true);
            }
            GestureAction::Wheel { center, direction } => {
                transform.wheel_zoom(*center, *direction, &viewport);
                self.gestures
                    .arm_wheel_cooldown(self.now + self.options.timings.wheel_cooldown);
                self.submit(true);
            }
            GestureAction::Pinch { anchor, next } => {
                transform.touch_zoom(anchor, next, &viewport);
                transform.pending_commit = true;
                let due = self.now + self.options.timings.pinch_commit_delay;
                self.timers.schedule(due, Deferred::PinchCommit);
            }
            GestureAction::GestureEnd => {}
        }
    }

    /// Writes scale and pre-scale translation directly.
    ///
    /// A complete no-op returning `false` while another transform is in flight.
    pub fn apply_transform(&mut self, scale: f64, translate: Vec2, animate: bool) -> bool {
        let Some(transform) = self
            .current
            .as_mut()
            .and_then(|open| open.transform.as_mut())
        else {
            return false;
        };
        if transform.animating {
            trace!("transform dropped: update in flight");
            return false;
        }
        let scale = transform.clamp(scale);
        transform.set(scale, (translate * scale).to_point());
        self.submit(animate)
    }

    /// Moves the image to `scale` with its top-left corner at `(x, y)`.
    pub fn set_image_transform(&mut self, scale: f64, x: f64, y: f64, animate: bool) -> bool {
        let Some(transform) = self
            .current
            .as_mut()
            .and_then(|open| open.transform.as_mut())
        else {
            return false;
        };
        if transform.animating {
            return false;
        }
        transform.set(scale, Point::new(x, y));
        self.submit(animate)
    }

    /// Re-fits the image into the viewport minus `options`' reserved space.
    ///
    /// The result becomes the placement restore returns to.
    pub fn center_image(&mut self, options: CenterOptions) -> bool {
        let Some(transform) = self
            .current
            .as_mut()
            .and_then(|open| open.transform.as_mut())
        else {
            return false;
        };
        if transform.animating {
            return false;
        }
        let origin = transform.origin();
        transform.set_origin(compute_centered(
            transform.natural_size(),
            &self.viewport,
            origin.min,
            origin.max,
            options,
        ));
        transform.restore(self.viewport.center());
        self.submit(true)
    }

    /// Returns the image to its fitted placement.
    pub fn reset_image(&mut self) -> bool {
        let Some(transform) = self
            .current
            .as_mut()
            .and_then(|open| open.transform.as_mut())
        else {
            return false;
        };
        if transform.animating {
            return false;
        }
        transform.restore(self.viewport.center());
        self.submit(true)
    }

    /// Queues the current state for the next animation frame.
    fn submit(&mut self, animate: bool) -> bool {
        let show_indicator = self.options.show_indicator;
        let hide_at = self.now + self.options.timings.indicator_hide_delay;
        let Some(open) = self.current.as_mut() else {
            return false;
        };
        let Some(transform) = open.transform.as_mut() else {
            return false;
        };
        if transform.animating {
            trace!("transform dropped: update in flight");
            return false;
        }
        let request = transform.request(animate);
        transform.animating = true;
        let scale_changed = transform
            .applied
            .is_some_and(|applied| applied.scale != request.scale);
        if scale_changed && show_indicator {
            #[expect(clippy::cast_possible_truncation, reason = "zoom percentages fit in u32")]
            let percent = (request.scale * 100.0).round() as u32;
            self.surface.show_indicator(percent);
            self.indicator_visible = true;
            if let Some(id) = open.indicator_timer.take() {
                self.timers.cancel(id);
            }
            open.indicator_timer = Some(self.timers.schedule(hide_at, Deferred::HideIndicator));
        }
        trace!(transform = %request, "transform requested");
        self.frame = Some(request);
        true
    }

    /// Runs the pending animation frame, then every task due at `now`.
    pub fn tick(&mut self, now: u64) {
        self.now = now;
        if let Some(frame) = self.frame.take() {
            self.animation_frame(frame);
        }
        while let Some(task) = self.timers.pop_due(now) {
            self.run(task);
        }
    }

    fn animation_frame(&mut self, frame: CssTransform) {
        let timings = self.options.timings;
        let Some(open) = self.current.as_mut() else {
            return;
        };
        let Some(transform) = open.transform.as_mut() else {
            return;
        };
        self.surface.write_transform(&open.image, &frame);
        transform.applied = Some(frame);
        transform.animating = false;
        let snapshot = transform.snapshot();

        self.moved = true;
        if let Some(id) = open.moved_timer.take() {
            self.timers.cancel(id);
        }
        let hold = if frame.animate {
            timings.moved_flag_animated
        } else {
            timings.moved_flag_instant
        };
        open.moved_timer = Some(self.timers.schedule(self.now + hold, Deferred::ClearMoved));

        let mut event =
            ViewerEvent::new(HookKind::TransformChange, Some(open.image.id()), Some(snapshot));
        self.hooks.run(&mut event);
    }

    fn run(&mut self, task: Deferred) {
        match task {
            Deferred::ClearMoved => {
                self.moved = false;
                if let Some(open) = self.current.as_mut() {
                    open.moved_timer = None;
                }
            }
            Deferred::HideIndicator => {
                self.surface.hide_indicator();
                self.indicator_visible = false;
                if let Some(open) = self.current.as_mut() {
                    open.indicator_timer = None;
                }
            }
            Deferred::PinchCommit => {
                if let Some(transform) = self
                    .current
                    .as_mut()
                    .and_then(|open| open.transform.as_mut())
                {
                    transform.pending_commit = false;
                }
                self.submit(false);
            }
            Deferred::ResizeRetry { attempt } => {
                if let Some(open) = self.current.as_mut() {
                    open.resize_timer = None;
                }
                self.restore_after_resize(attempt);
            }
        }
    }
}

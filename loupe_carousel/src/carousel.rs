// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use loupe_gesture::{GestureOutput, InputEvent, MouseButton};
use loupe_viewer::{ImageDescriptor, LoadOutcome, Surface, TransformState, Viewer, ViewerOptions};
use tracing::{debug, trace};

use crate::sequence::{NavigationError, Sequence};

/// Construction options for a [`Carousel`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselOptions {
    /// Options for the underlying viewer.
    pub viewer: ViewerOptions,
    /// Wrap from the last image to the first and back.
    pub loop_around: bool,
    /// Delay between autoplay advances, in milliseconds.
    pub autoplay_interval: u64,
    /// Horizontal travel, in pixels, that turns a release into a swipe.
    pub swipe_threshold: f64,
    /// How many images on each side of the current one to preload.
    pub preload_radius: usize,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            viewer: ViewerOptions::default(),
            loop_around: false,
            autoplay_interval: 3000,
            swipe_threshold: 50.0,
            preload_radius: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Swipe {
    start: Point,
    last: Point,
}

/// A gallery: one [`Viewer`] stepping through a [`Sequence`].
#[derive(Debug)]
pub struct Carousel<S> {
    viewer: Viewer<S>,
    sequence: Sequence,
    options: CarouselOptions,
    autoplay_due: Option<u64>,
    swipe: Option<Swipe>,
    now: u64,
}

impl<S: Surface> Carousel<S> {
    /// Creates a closed carousel over `images`.
    pub fn new(surface: S, images: Vec<ImageDescriptor>, options: CarouselOptions) -> Self {
        Self {
            viewer: Viewer::new(surface, options.viewer),
            sequence: Sequence::new(images, options.loop_around),
            options,
            autoplay_due: None,
            swipe: None,
            now: 0,
        }
    }

    /// The viewer showing the current image.
    pub fn viewer(&self) -> &Viewer<S> {
        &self.viewer
    }

    /// The viewer, mutably (hooks, transforms, resize).
    pub fn viewer_mut(&mut self) -> &mut Viewer<S> {
        &mut self.viewer
    }

    /// The image list.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Position of the current image.
    pub fn current_index(&self) -> usize {
        self.sequence.index()
    }

    /// Opens the viewer on the image at `index`.
    ///
    /// Returns `Ok(false)` if the viewer was already open or a listener
    /// cancelled the open.
    pub fn open(&mut self, index: usize) -> Result<bool, NavigationError> {
        if self.viewer.is_open() {
            return Ok(false);
        }
        self.sequence.select(index)?;
        let Some(image) = self.sequence.current().cloned() else {
            return Ok(false);
        };
        Ok(self.viewer.open(image))
    }

    /// Closes the viewer and stops autoplay.
    pub fn close(&mut self) -> bool {
        let closed = self.viewer.close();
        if closed {
            self.autoplay_due = None;
            self.swipe = None;
        }
        closed
    }

    /// Shows the image at `index`.
    pub fn go_to(&mut self, index: usize) -> Result<(), NavigationError> {
        self.sequence.select(index)?;
        if let Some(image) = self.sequence.current().cloned() {
            let was_stopped = self.viewer.is_stopped();
            self.viewer.stop_interactions();
            self.viewer.show(image);
            if !was_stopped {
                self.viewer.resume_interactions();
            }
        }
        self.swipe = None;
        if self.autoplay_due.is_some() {
            self.autoplay_due = Some(self.now + self.options.autoplay_interval);
        }
        debug!(index, "navigated");
        Ok(())
    }

    /// Shows the next image. Returns `false` at the last image unless looping.
    pub fn next(&mut self) -> bool {
        self.sequence
            .next_index()
            .is_some_and(|index| self.go_to(index).is_ok())
    }

    /// Shows the previous image. Returns `false` at the first image unless looping.
    pub fn prev(&mut self) -> bool {
        self.sequence
            .prev_index()
            .is_some_and(|index| self.go_to(index).is_ok())
    }

    /// Advances every `autoplay_interval` from `now` on.
    pub fn start_autoplay(&mut self, now: u64) {
        self.now = now;
        self.autoplay_due = Some(now + self.options.autoplay_interval);
    }

    /// Stops advancing.
    pub fn stop_autoplay(&mut self) {
        self.autoplay_due = None;
    }

    /// Whether autoplay is running.
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay_due.is_some()
    }

    /// Image indices worth loading now: the current image, then its
    /// neighbours within `preload_radius`, skipping completed loads.
    pub fn preload_targets(&self) -> Vec<usize> {
        let current = self.sequence.index();
        core::iter::once(current)
            .chain(self.sequence.neighbours(self.options.preload_radius))
            .filter(|&index| {
                self.sequence
                    .get(index)
                    .is_some_and(|image| !image.is_loaded())
            })
            .collect()
    }

    /// Records a finished load and forwards it to the viewer when shown.
    ///
    /// Returns `Ok(false)` if that load had already completed.
    pub fn image_loaded(
        &mut self,
        index: usize,
        outcome: LoadOutcome,
    ) -> Result<bool, NavigationError> {
        let recorded = self.sequence.record(index, outcome)?;
        if recorded && index == self.sequence.index() {
            if let Some(id) = self.sequence.current().map(ImageDescriptor::id) {
                self.viewer.image_loaded(id, outcome);
            }
        }
        Ok(recorded)
    }

    fn at_rest(&self) -> bool {
        self.viewer
            .transform()
            .is_some_and(|transform| !transform.is_zoomed())
    }

    /// Feeds one overlay event, tracking swipes while the image is at rest.
    pub fn handle_input(&mut self, event: &InputEvent, now: u64) -> GestureOutput {
        self.now = now;
        match event {
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                position,
            } => self.begin_swipe(*position),
            InputEvent::TouchStart { touches } => match touches.as_slice() {
                [only] => self.begin_swipe(*only),
                _ => self.swipe = None,
            },
            InputEvent::MouseMove { position, .. } => self.track_swipe(*position),
            InputEvent::TouchMove { touches } => match touches.as_slice() {
                [only] => self.track_swipe(*only),
                _ => self.swipe = None,
            },
            _ => {}
        }

        let output = self.viewer.handle_input(event, now);

        let released = match event {
            InputEvent::MouseUp {
                button: MouseButton::Primary,
                position,
            } => {
                self.track_swipe(*position);
                true
            }
            InputEvent::TouchEnd { touches } => touches.is_empty(),
            _ => false,
        };
        if released {
            if let Some(swipe) = self.swipe.take() {
                self.finish_swipe(swipe);
            }
        }
        output
    }

    fn begin_swipe(&mut self, at: Point) {
        self.swipe = self.at_rest().then_some(Swipe {
            start: at,
            last: at,
        });
    }

    fn track_swipe(&mut self, at: Point) {
        if let Some(swipe) = self.swipe.as_mut() {
            swipe.last = at;
        }
    }

    fn finish_swipe(&mut self, swipe: Swipe) {
        let travel = swipe.last - swipe.start;
        if travel.x.abs() <= self.options.swipe_threshold || travel.x.abs() <= travel.y.abs() {
            trace!(?travel, "release below swipe threshold");
            return;
        }
        if travel.x < 0.0 {
            self.next();
        } else {
            self.prev();
        }
    }

    /// Drives the viewer and autoplay.
    pub fn tick(&mut self, now: u64) {
        self.now = now;
        self.viewer.tick(now);
        let Some(due) = self.autoplay_due else {
            return;
        };
        if now < due || !self.viewer.is_open() {
            return;
        }
        if self.viewer.transform().is_some_and(TransformState::is_zoomed) {
            trace!("autoplay paused while zoomed");
            self.autoplay_due = Some(now + self.options.autoplay_interval);
            return;
        }
        if self.next() {
            self.autoplay_due = Some(now + self.options.autoplay_interval);
        } else {
            debug!("autoplay reached the last image");
            self.autoplay_due = None;
        }
    }
}

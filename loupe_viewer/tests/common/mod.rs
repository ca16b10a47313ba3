// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for viewer integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    unreachable_pub,
    reason = "Each test binary uses a different subset of the helpers."
)]

use kurbo::{Point, Rect, Size};
use loupe_geometry::ViewportTarget;
use loupe_gesture::{InputEvent, MouseButton, Points};
use loupe_viewer::{CssTransform, ImageDescriptor, ImageId, Surface, Viewer, ViewerOptions};

/// One side effect requested from the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    MountOverlay,
    UnmountOverlay,
    Attach(ImageId),
    Detach(ImageId),
    Loading(bool),
    Write(CssTransform),
    ShowIndicator(u32),
    HideIndicator,
    Listen,
    Unlisten,
}

/// Surface double that records every call in order.
#[derive(Debug)]
pub struct RecordingSurface {
    pub target: ViewportTarget,
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn window(width: f64, height: f64) -> Self {
        Self {
            target: ViewportTarget::Window(Size::new(width, height)),
            calls: Vec::new(),
        }
    }

    pub fn container(rect: Rect) -> Self {
        Self {
            target: ViewportTarget::Container(rect),
            calls: Vec::new(),
        }
    }

    pub fn writes(&self) -> Vec<CssTransform> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Write(transform) => Some(*transform),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }
}

impl Surface for RecordingSurface {
    fn viewport_target(&self) -> ViewportTarget {
        self.target
    }

    fn mount_overlay(&mut self) {
        self.calls.push(Call::MountOverlay);
    }

    fn unmount_overlay(&mut self) {
        self.calls.push(Call::UnmountOverlay);
    }

    fn attach_image(&mut self, image: &ImageDescriptor) {
        self.calls.push(Call::Attach(image.id()));
    }

    fn detach_image(&mut self, image: &ImageDescriptor) {
        self.calls.push(Call::Detach(image.id()));
    }

    fn set_loading(&mut self, loading: bool) {
        self.calls.push(Call::Loading(loading));
    }

    fn write_transform(&mut self, _image: &ImageDescriptor, transform: &CssTransform) {
        self.calls.push(Call::Write(*transform));
    }

    fn show_indicator(&mut self, percent: u32) {
        self.calls.push(Call::ShowIndicator(percent));
    }

    fn hide_indicator(&mut self) {
        self.calls.push(Call::HideIndicator);
    }

    fn listen(&mut self) {
        self.calls.push(Call::Listen);
    }

    fn unlisten(&mut self) {
        self.calls.push(Call::Unlisten);
    }
}

pub const EPS: f64 = 1e-9;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn photo() -> ImageDescriptor {
    ImageDescriptor::loaded(ImageId(1), "photo.jpg", Size::new(1600.0, 1200.0))
}

/// A viewer on a 1024x768 window with `photo()` open and its first frame committed.
pub fn open_photo() -> Viewer<RecordingSurface> {
    init_tracing();
    let mut viewer = Viewer::new(RecordingSurface::window(1024.0, 768.0), ViewerOptions::default());
    assert!(viewer.open(photo()), "open should succeed");
    viewer.tick(0);
    viewer
}

pub fn click(viewer: &mut Viewer<RecordingSurface>, at: Point, now: u64) {
    let button = MouseButton::Primary;
    viewer.handle_input(
        &InputEvent::MouseDown {
            button,
            position: at,
        },
        now,
    );
    viewer.handle_input(
        &InputEvent::MouseUp {
            button,
            position: at,
        },
        now,
    );
}

pub fn touches(points: &[(f64, f64)]) -> Points {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_viewer --heading-base-level=0

//! Loupe Viewer: a headless, single-image zoom lightbox.
//!
//! ## Overview
//!
//! [`Viewer`] owns everything that happens while one image is open: the
//! lifecycle (`Closed → Opening → Open → Closing → Closed`), the
//! per-image [`TransformState`], gesture handling via `loupe_gesture`, and
//! the lifecycle hooks plugins observe.
//!
//! The viewer does not touch a document. Everything visible goes through a
//! host-implemented [`Surface`]: mounting the overlay, attaching the image,
//! writing the [`CssTransform`], and showing the loading and zoom
//! indicators.
//!
//! ## Time
//!
//! Nothing runs on its own. Input events carry a millisecond timestamp and
//! the host calls [`Viewer::tick`] from its animation-frame or timer
//! callback. A tick first commits the pending transform (at most one is in
//! flight; further requests are dropped until it lands), then runs every
//! deferred task that is due: clearing the "just moved" flag, hiding the
//! zoom indicator, committing pinch steps, and retrying a resize restore.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use loupe_geometry::ViewportTarget;
//! use loupe_gesture::{InputEvent, MouseButton};
//! use loupe_viewer::{CssTransform, ImageDescriptor, ImageId, Surface, Viewer, ViewerOptions};
//!
//! #[derive(Default)]
//! struct Window {
//!     written: Vec<String>,
//! }
//!
//! impl Surface for Window {
//!     fn viewport_target(&self) -> ViewportTarget {
//!         ViewportTarget::Window(Size::new(1024.0, 768.0))
//!     }
//!     fn mount_overlay(&mut self) {}
//!     fn unmount_overlay(&mut self) {}
//!     fn attach_image(&mut self, _: &ImageDescriptor) {}
//!     fn detach_image(&mut self, _: &ImageDescriptor) {}
//!     fn set_loading(&mut self, _: bool) {}
//!     fn write_transform(&mut self, _: &ImageDescriptor, transform: &CssTransform) {
//!         self.written.push(transform.to_string());
//!     }
//!     fn show_indicator(&mut self, _: u32) {}
//!     fn hide_indicator(&mut self) {}
//!     fn listen(&mut self) {}
//!     fn unlisten(&mut self) {}
//! }
//!
//! let mut viewer = Viewer::new(Window::default(), ViewerOptions::default());
//! let photo = ImageDescriptor::loaded(ImageId(1), "photo.jpg", Size::new(1600.0, 1200.0));
//! assert!(viewer.open(photo));
//! viewer.tick(0);
//! assert_eq!(viewer.surface().written.len(), 1);
//! assert!(viewer.surface().written[0].starts_with("scale3d("));
//!
//! // Double-click zooms in by two.
//! let at = Point::new(512.0, 384.0);
//! for now in [100, 200] {
//!     viewer.handle_input(&InputEvent::MouseDown { button: MouseButton::Primary, position: at }, now);
//!     viewer.handle_input(&InputEvent::MouseUp { button: MouseButton::Primary, position: at }, now);
//! }
//! viewer.tick(216);
//! let state = viewer.image_state().unwrap();
//! assert!((state.scale - 2.512).abs() < 1e-9);
//! ```
//!
//! ## Hooks
//!
//! Register listeners with [`Viewer::on`]. `BeforeOpen` and `BeforeClose`
//! can cancel the step they announce; see the [`hooks`] module for the
//! propagation rules.

mod image;
mod options;
mod surface;
mod transform;
mod viewer;

pub mod hooks;
pub mod timer;

pub use hooks::{HookError, HookKind, ListenerId, ViewerEvent};
pub use image::{ImageDescriptor, ImageId, LoadOutcome};
pub use options::{Timings, ViewerOptions};
pub use surface::{CssTransform, Surface};
pub use transform::{DOUBLE_CLICK_STEP, ImageState, TransformState, WHEEL_STEP};
pub use viewer::{LifecycleState, Viewer};

pub use loupe_geometry::{CenterOptions, ScaleLimits, Viewport, ViewportTarget};

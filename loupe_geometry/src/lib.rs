// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_geometry --heading-base-level=0

//! Loupe Geometry: placement math for a zoomable image lightbox.
//!
//! This crate holds the pure, headless half of the Loupe viewer:
//! - Resolving the rectangle the overlay paints into ([`Viewport`]), either
//!   from a fixed container's bounding box or from the window size.
//! - Computing the centered "fit" placement of an image inside that
//!   viewport, together with the effective scale limits ([`compute_fit`]).
//! - Focal point helpers for multi-pointer gestures ([`focal_center`],
//!   [`pairwise_distance`]).
//! - The anchor-preserving translation formulas used when a zoom step
//!   changes the scale around a screen point ([`anchored_offset`],
//!   [`pinch_offset`]).
//!
//! It does **not** own any image element, event source, or timer. The
//! `loupe_viewer` crate wires these functions to input and a host surface.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use loupe_geometry::{ScaleLimits, ViewportTarget, compute_fit, resolve_viewport};
//!
//! // A 1024x768 window with no container configured.
//! let viewport = resolve_viewport(ViewportTarget::Window(Size::new(1024.0, 768.0)));
//! assert_eq!(viewport.center().x, 512.0);
//!
//! // A 1600x1200 landscape photo is width-led: 80% of the viewport width.
//! let fit = compute_fit(Size::new(1600.0, 1200.0), &viewport, ScaleLimits::default());
//! assert!((fit.width - 819.2).abs() < 1e-9);
//! assert!((fit.scale - 0.512).abs() < 1e-9);
//! assert_eq!(fit.min, 0.3);
//! assert_eq!(fit.max, 5.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod anchor;
mod fit;
mod viewport;

pub use anchor::{anchored_offset, focal_center, pairwise_distance, pinch_offset};
pub use fit::{
    CenterOptions, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, FALLBACK_DISPLAY_SCALE, FitResult,
    ScaleLimits, compute_centered, compute_fit, is_landscape,
};
pub use viewport::{Viewport, ViewportTarget, resolve_viewport};

// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_carousel --heading-base-level=0

//! Loupe Carousel: step through a gallery with one zoomable viewer.
//!
//! A [`Carousel`] owns a `loupe_viewer` [`Viewer`](loupe_viewer::Viewer)
//! and a [`Sequence`] of discovered images. It adds what a single-image
//! lightbox lacks:
//!
//! - Navigation: [`Carousel::next`], [`Carousel::prev`] and
//!   [`Carousel::go_to`]. Out-of-range indices return
//!   [`NavigationError::OutOfBounds`]. The ends wrap only when
//!   [`CarouselOptions::loop_around`] is set.
//! - Autoplay, advanced from [`Carousel::tick`] and paused while the image
//!   is zoomed above its fit.
//! - Swipe: a horizontal single-pointer release travelling further than
//!   [`CarouselOptions::swipe_threshold`] while the image is at rest.
//! - Preload bookkeeping: [`Carousel::preload_targets`] names the images
//!   the host should fetch next and [`Carousel::image_loaded`] records the
//!   result.
//!
//! The viewer's hooks and transform API stay reachable through
//! [`Carousel::viewer_mut`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use loupe_carousel::{Carousel, CarouselOptions};
//! use loupe_viewer::{CssTransform, ImageDescriptor, ImageId, LoadOutcome, Surface, ViewportTarget};
//!
//! struct Headless;
//!
//! impl Surface for Headless {
//!     fn viewport_target(&self) -> ViewportTarget {
//!         ViewportTarget::Window(Size::new(1280.0, 720.0))
//!     }
//!     fn mount_overlay(&mut self) {}
//!     fn unmount_overlay(&mut self) {}
//!     fn attach_image(&mut self, _: &ImageDescriptor) {}
//!     fn detach_image(&mut self, _: &ImageDescriptor) {}
//!     fn set_loading(&mut self, _: bool) {}
//!     fn write_transform(&mut self, _: &ImageDescriptor, _: &CssTransform) {}
//!     fn show_indicator(&mut self, _: u32) {}
//!     fn hide_indicator(&mut self) {}
//!     fn listen(&mut self) {}
//!     fn unlisten(&mut self) {}
//! }
//!
//! let images = (0..4)
//!     .map(|i| ImageDescriptor::new(ImageId(i), format!("https://example.com/{i}.jpg")))
//!     .collect();
//! let mut carousel = Carousel::new(Headless, images, CarouselOptions::default());
//! assert_eq!(carousel.open(0), Ok(true));
//! assert_eq!(carousel.preload_targets(), vec![0, 1]);
//!
//! carousel.image_loaded(0, LoadOutcome::Loaded(Size::new(800.0, 600.0))).unwrap();
//! assert_eq!(carousel.preload_targets(), vec![1]);
//!
//! assert!(carousel.next());
//! assert_eq!(carousel.current_index(), 1);
//! assert!(carousel.go_to(9).is_err());
//! ```

mod carousel;
mod sequence;

pub use carousel::{Carousel, CarouselOptions};
pub use sequence::{NavigationError, Sequence};

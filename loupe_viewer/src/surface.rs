// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Vec2;
use loupe_geometry::ViewportTarget;

use crate::image::ImageDescriptor;

/// Transform written to the displayed image.
///
/// The scale is applied first, so `translate` is in pre-scale units: the
/// image's top-left corner lands at `translate * scale` from the viewport
/// origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssTransform {
    /// Uniform scale.
    pub scale: f64,
    /// Translation in pre-scale pixels.
    pub translate: Vec2,
    /// Whether the host should transition to the new transform.
    pub animate: bool,
}

impl CssTransform {
    /// Screen-space offset of the image's top-left corner.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.translate * self.scale
    }

    /// The 2D fallback for hosts without 3D transforms.
    #[must_use]
    pub fn to_css_2d(&self) -> String {
        format!(
            "scale({s}) translate({x}px, {y}px)",
            s = self.scale,
            x = self.translate.x,
            y = self.translate.y
        )
    }
}

impl fmt::Display for CssTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale3d({s}, {s}, 1) translate3d({x}px, {y}px, 0)",
            s = self.scale,
            x = self.translate.x,
            y = self.translate.y
        )
    }
}

/// The host side of the viewer: overlay, image element and input wiring.
///
/// In a browser this is backed by the DOM; the viewer only decides *what* to
/// show and calls these methods in lifecycle order.
pub trait Surface {
    /// Where the overlay paints: the window, or a configured container.
    fn viewport_target(&self) -> ViewportTarget;

    /// Create (or reveal) the overlay.
    fn mount_overlay(&mut self);

    /// Remove the overlay from the document.
    fn unmount_overlay(&mut self);

    /// Insert the image element into the overlay.
    fn attach_image(&mut self, image: &ImageDescriptor);

    /// Remove the image element from the overlay.
    fn detach_image(&mut self, image: &ImageDescriptor);

    /// Show or hide the loading indicator.
    fn set_loading(&mut self, loading: bool);

    /// Write a transform to the image element.
    fn write_transform(&mut self, image: &ImageDescriptor, transform: &CssTransform);

    /// Show the zoom percentage.
    fn show_indicator(&mut self, percent: u32);

    /// Hide the zoom percentage.
    fn hide_indicator(&mut self);

    /// Start delivering input events to the viewer.
    fn listen(&mut self);

    /// Stop delivering input events to the viewer.
    fn unlisten(&mut self);
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::CssTransform;

    #[test]
    fn renders_scale_then_translate() {
        let t = CssTransform {
            scale: 2.0,
            translate: Vec2::new(10.0, -5.5),
            animate: false,
        };
        assert_eq!(t.to_string(), "scale3d(2, 2, 1) translate3d(10px, -5.5px, 0)");
        assert_eq!(t.to_css_2d(), "scale(2) translate(10px, -5.5px)");
        assert_eq!(t.offset(), Vec2::new(20.0, -11.0));
    }
}

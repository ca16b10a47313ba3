// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Point, Rect, Size};

/// Where the overlay is allowed to paint.
///
/// Hosts report one of these each time the viewer opens and whenever the
/// window is resized; [`resolve_viewport`] turns it into a [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportTarget {
    /// No container is configured: the overlay is fixed and fills the window.
    ///
    /// Carries the window's inner size.
    Window(Size),
    /// The overlay is confined to a container element.
    ///
    /// Carries the container's bounding box in document coordinates.
    Container(Rect),
}

/// Rectangle the overlay paints into, in document pixels.
///
/// Fit placement is computed in viewport-local coordinates (the top-left
/// corner is the local origin); [`Viewport::left`] and [`Viewport::top`] are
/// only needed to translate pointer positions into that local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    rect: Rect,
}

impl Viewport {
    /// Creates a viewport covering `rect` (document coordinates).
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Offset of the top edge from the document origin.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.rect.y0
    }

    /// Offset of the left edge from the document origin.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.rect.x0
    }

    /// Size of the viewport.
    #[must_use]
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Bounding rectangle in document coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// `(left + width / 2, top + height / 2)`.
    #[must_use]
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Returns this viewport with `insets` removed from each edge.
    ///
    /// Negative results collapse to an empty rectangle at the inset origin.
    #[must_use]
    pub fn inset(&self, insets: Insets) -> Self {
        let x0 = self.rect.x0 + insets.x0;
        let y0 = self.rect.y0 + insets.y0;
        let x1 = (self.rect.x1 - insets.x1).max(x0);
        let y1 = (self.rect.y1 - insets.y1).max(y0);
        Self::new(Rect::new(x0, y0, x1, y1))
    }
}

/// Resolves the current viewport rectangle.
///
/// - Container mode uses the container's bounding box as-is.
/// - Window mode spans the window's inner size anchored at `(0, 0)`.
#[must_use]
pub fn resolve_viewport(target: ViewportTarget) -> Viewport {
    match target {
        ViewportTarget::Container(bounds) => Viewport::new(bounds),
        ViewportTarget::Window(size) => Viewport::new(Rect::from_origin_size(Point::ZERO, size)),
    }
}

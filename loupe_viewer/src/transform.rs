// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-image transform record and the zoom/pan updates gestures perform on it.
//!
//! Offsets are the image's top-left corner in viewport-local screen pixels.
//! The surface applies scale before translation, so [`TransformState::request`]
//! divides the offset by the current factor before handing it out.

use kurbo::{Point, Size};
use loupe_geometry::{
    FitResult, Viewport, anchored_offset, focal_center, pairwise_distance, pinch_offset,
};
use loupe_gesture::ZoomDirection;

use crate::surface::CssTransform;

/// Scale change of one accepted wheel step.
pub const WHEEL_STEP: f64 = 0.05;

/// Scale added by a double-click zoom.
pub const DOUBLE_CLICK_STEP: f64 = 2.0;

/// Public snapshot of the open image's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageState {
    /// Current scale.
    pub scale: f64,
    /// Horizontal offset of the image's top-left corner.
    pub x: f64,
    /// Vertical offset of the image's top-left corner.
    pub y: f64,
    /// Effective lower bound.
    pub min_scale: f64,
    /// Effective upper bound.
    pub max_scale: f64,
}

/// The single mutable record gestures write to while one image is open.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformState {
    scale: f64,
    factor: f64,
    offset: Point,
    min: f64,
    max: f64,
    distance_factor: f64,
    center: Point,
    origin: FitResult,
    natural: Size,
    pinch_moves: u32,
    pinch_contracting: bool,
    pub(crate) animating: bool,
    pub(crate) pending_commit: bool,
    pub(crate) applied: Option<CssTransform>,
}

impl TransformState {
    /// Starts at the fitted placement `origin`.
    #[must_use]
    pub fn new(natural: Size, origin: FitResult, viewport: &Viewport) -> Self {
        Self {
            scale: origin.scale,
            factor: origin.scale,
            offset: Point::new(origin.x, origin.y),
            min: origin.min,
            max: origin.max,
            distance_factor: 1.0,
            center: viewport.center(),
            origin,
            natural,
            pinch_moves: 0,
            pinch_contracting: false,
            animating: false,
            pending_commit: false,
            applied: None,
        }
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scale of the last transform handed to the surface.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Top-left offset in viewport-local pixels.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Last focal point.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// The placement restore returns to.
    #[must_use]
    pub fn origin(&self) -> FitResult {
        self.origin
    }

    /// Natural size of the image.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        self.natural
    }

    /// Relative finger distance at the last pinch sample.
    #[must_use]
    pub fn distance_factor(&self) -> f64 {
        self.distance_factor
    }

    /// Whether the last pinch step brought the fingers closer together.
    #[must_use]
    pub fn is_pinch_contracting(&self) -> bool {
        self.pinch_contracting
    }

    /// Whether a transform is waiting for the next animation frame.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether a pinch commit is scheduled.
    #[must_use]
    pub fn is_commit_pending(&self) -> bool {
        self.pending_commit
    }

    /// The transform last written to the surface.
    #[must_use]
    pub fn applied(&self) -> Option<CssTransform> {
        self.applied
    }

    /// Whether the image sits above its fitted scale.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > self.origin.scale
    }

    /// Snapshot for hooks and collaborators.
    #[must_use]
    pub fn snapshot(&self) -> ImageState {
        ImageState {
            scale: self.scale,
            x: self.offset.x,
            y: self.offset.y,
            min_scale: self.min,
            max_scale: self.max,
        }
    }

    /// The transform to hand to the surface for the current state.
    #[must_use]
    pub fn request(&self, animate: bool) -> CssTransform {
        CssTransform {
            scale: self.factor,
            translate: self.offset.to_vec2() / self.factor,
            animate,
        }
    }

    /// Top-left of the image's bounding rect in document pixels.
    #[must_use]
    pub fn image_origin(&self, viewport: &Viewport) -> Point {
        let offset = match self.applied {
            Some(applied) => applied.offset(),
            None => self.offset.to_vec2(),
        };
        viewport.rect().origin() + offset
    }

    pub(crate) fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }

    fn zoom_around(&mut self, scale: f64, anchor: Point, viewport: &Viewport) {
        let ratio = scale / self.factor;
        self.offset = anchored_offset(
            self.offset,
            ratio,
            anchor,
            self.image_origin(viewport),
            viewport.rect().origin(),
        );
        self.scale = scale;
        self.factor = scale;
        self.center = anchor;
    }

    /// One wheel step around `center`.
    pub fn wheel_zoom(&mut self, center: Point, direction: ZoomDirection, viewport: &Viewport) {
        let step = match direction {
            ZoomDirection::In => WHEEL_STEP,
            ZoomDirection::Out => -WHEEL_STEP,
        };
        let scale = self.clamp(self.scale + step);
        self.zoom_around(scale, center, viewport);
    }

    /// Zooms in around `at` when at or below the fit, otherwise restores.
    pub fn double_click_zoom(&mut self, at: Point, viewport: &Viewport) {
        if self.scale <= self.origin.scale {
            let scale = self.clamp(self.scale + DOUBLE_CLICK_STEP);
            self.zoom_around(scale, at, viewport);
        } else {
            self.restore(viewport.center());
        }
    }

    /// Returns to the stored origin and re-centers the focal point.
    pub fn restore(&mut self, viewport_center: Point) {
        self.scale = self.origin.scale;
        self.factor = self.origin.scale;
        self.offset = Point::new(self.origin.x, self.origin.y);
        self.min = self.origin.min;
        self.max = self.origin.max;
        self.center = viewport_center;
    }

    /// Replaces the placement restore returns to.
    pub fn set_origin(&mut self, origin: FitResult) {
        self.origin = origin;
    }

    /// Moves by the raw screen delta, whatever the scale.
    pub fn drag(&mut self, from: Point, to: Point) {
        self.offset += to - from;
    }

    /// Writes scale and offset directly, keeping the scale in bounds.
    pub fn set(&mut self, scale: f64, offset: Point) {
        let scale = self.clamp(scale);
        self.scale = scale;
        self.factor = scale;
        self.offset = offset;
    }

    /// One pinch sample: `anchor` holds the touches when the pinch began.
    ///
    /// The offset is left alone for the first two samples so the image does
    /// not jump when the fingers land.
    pub fn touch_zoom(&mut self, anchor: &[Point], next: &[Point], viewport: &Viewport) {
        let (Some(&a0), Some(&a1), Some(&n0), Some(&n1)) =
            (anchor.first(), anchor.get(1), next.first(), next.get(1))
        else {
            return;
        };
        let distance = pairwise_distance(n0, n1) / pairwise_distance(a0, a1);
        let step = distance / self.distance_factor;
        self.pinch_contracting = step < 1.0;

        let previous = self.factor;
        let scale = self.clamp(self.scale * step);
        self.scale = scale;
        self.factor = scale;

        let centroid = focal_center(next);
        if self.pinch_moves > 1 {
            self.offset = pinch_offset(
                self.offset,
                scale / previous,
                centroid,
                self.center,
                self.image_origin(viewport),
                viewport.rect().origin(),
            );
        }
        self.center = centroid;
        self.distance_factor = distance;
        self.pinch_moves += 1;
    }

    /// Forgets the pinch baseline once the fingers change.
    pub fn end_pinch(&mut self) {
        self.distance_factor = 1.0;
        self.pinch_moves = 0;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use loupe_geometry::{ScaleLimits, ViewportTarget, compute_fit, resolve_viewport};
    use loupe_gesture::ZoomDirection;

    use super::TransformState;

    const EPS: f64 = 1e-9;

    fn photo() -> (TransformState, loupe_geometry::Viewport) {
        let viewport = resolve_viewport(ViewportTarget::Window(Size::new(1024.0, 768.0)));
        let natural = Size::new(1600.0, 1200.0);
        let origin = compute_fit(natural, &viewport, ScaleLimits::default());
        (TransformState::new(natural, origin, &viewport), viewport)
    }

    #[test]
    fn starts_at_fit() {
        let (state, _) = photo();
        assert!((state.scale() - 0.512).abs() < EPS);
        assert!((state.offset().x - 102.4).abs() < EPS);
        assert!((state.offset().y - 76.8).abs() < EPS);
        let request = state.request(false);
        assert!((request.translate.x - 200.0).abs() < EPS);
        assert!((request.translate.y - 150.0).abs() < EPS);
    }

    #[test]
    fn double_click_toggles_between_fit_and_zoom() {
        let (mut state, viewport) = photo();
        let fit = state.scale();
        state.double_click_zoom(Point::new(512.0, 384.0), &viewport);
        assert!((state.scale() - (fit + 2.0)).abs() < EPS);
        assert!(state.is_zoomed());

        state.double_click_zoom(Point::new(512.0, 384.0), &viewport);
        assert_eq!(state.scale(), fit);
        assert_eq!(state.offset(), Point::new(state.origin().x, state.origin().y));
        assert_eq!(state.center(), viewport.center());
    }

    #[test]
    fn double_click_respects_max() {
        let viewport = resolve_viewport(ViewportTarget::Window(Size::new(1024.0, 768.0)));
        let natural = Size::new(1600.0, 1200.0);
        let origin = compute_fit(natural, &viewport, ScaleLimits::new(0.1, 1.5));
        let mut state = TransformState::new(natural, origin, &viewport);
        state.double_click_zoom(Point::new(10.0, 10.0), &viewport);
        assert_eq!(state.scale(), 1.5);
    }

    #[test]
    fn double_click_zoom_keeps_the_point_under_the_cursor() {
        let (mut state, viewport) = photo();
        let at = Point::new(300.0, 200.0);
        let before = (at - state.offset()) / state.scale();
        state.double_click_zoom(at, &viewport);
        let after = (at - state.offset()) / state.scale();
        assert!((before - after).hypot() < 1e-6);
    }

    #[test]
    fn wheel_steps_follow_direction() {
        let (mut state, viewport) = photo();
        let fit = state.scale();
        state.wheel_zoom(Point::new(512.0, 384.0), ZoomDirection::Out, &viewport);
        assert!((state.scale() - (fit - 0.05)).abs() < EPS);
        state.wheel_zoom(Point::new(512.0, 384.0), ZoomDirection::In, &viewport);
        state.wheel_zoom(Point::new(512.0, 384.0), ZoomDirection::In, &viewport);
        assert!((state.scale() - (fit + 0.05)).abs() < EPS);
        assert_eq!(state.factor(), state.scale());
    }

    #[test]
    fn wheel_clamps_at_min() {
        let (mut state, viewport) = photo();
        for _ in 0..20 {
            state.wheel_zoom(Point::ZERO, ZoomDirection::Out, &viewport);
        }
        assert_eq!(state.scale(), 0.3);
    }

    #[test]
    fn drag_moves_by_raw_delta_at_any_scale() {
        let (mut state, viewport) = photo();
        state.double_click_zoom(Point::new(100.0, 100.0), &viewport);
        let before = state.offset();
        state.drag(Point::new(10.0, 10.0), Point::new(35.0, -5.0));
        assert_eq!(state.offset(), before + kurbo::Vec2::new(25.0, -15.0));
    }

    #[test]
    fn pinch_scales_by_distance_ratio() {
        let (mut state, viewport) = photo();
        let fit = state.scale();
        let anchor = [Point::new(400.0, 400.0), Point::new(600.0, 400.0)];
        state.touch_zoom(&anchor, &[Point::new(350.0, 400.0), Point::new(650.0, 400.0)], &viewport);
        assert!((state.scale() - fit * 1.5).abs() < EPS);
        assert!(!state.is_pinch_contracting());
        // The first samples never move the image.
        assert!((state.offset().x - 102.4).abs() < EPS);

        state.touch_zoom(&anchor, &[Point::new(400.0, 400.0), Point::new(600.0, 400.0)], &viewport);
        assert!((state.scale() - fit).abs() < EPS);
        assert!(state.is_pinch_contracting());
        assert!((state.distance_factor() - 1.0).abs() < EPS);
    }

    #[test]
    fn pinch_moves_offset_after_two_samples() {
        let (mut state, viewport) = photo();
        let anchor = [Point::new(400.0, 400.0), Point::new(600.0, 400.0)];
        state.touch_zoom(&anchor, &[Point::new(390.0, 400.0), Point::new(610.0, 400.0)], &viewport);
        state.touch_zoom(&anchor, &[Point::new(380.0, 400.0), Point::new(620.0, 400.0)], &viewport);
        let settled = state.offset();
        state.touch_zoom(&anchor, &[Point::new(370.0, 420.0), Point::new(630.0, 420.0)], &viewport);
        assert_ne!(state.offset(), settled);
        assert_eq!(state.center(), Point::new(500.0, 420.0));

        state.end_pinch();
        assert_eq!(state.distance_factor(), 1.0);
    }

    #[test]
    fn set_clamps_scale() {
        let (mut state, _) = photo();
        state.set(50.0, Point::new(1.0, 2.0));
        assert_eq!(state.scale(), 5.0);
        let snapshot = state.snapshot();
        assert_eq!((snapshot.x, snapshot.y), (1.0, 2.0));
        assert_eq!((snapshot.min_scale, snapshot.max_scale), (0.3, 5.0));
    }
}

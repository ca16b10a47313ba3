// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focal points and anchor-preserving translation.

use kurbo::{Point, Vec2};

/// Returns the focal center of a set of pointers.
///
/// A single pointer is its own center; several pointers yield their
/// arithmetic mean (the pinch centroid). An empty slice has no meaningful
/// center and yields `NaN` coordinates.
#[must_use]
pub fn focal_center(points: &[Point]) -> Point {
    if let [only] = points {
        return *only;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, point| acc + point.to_vec2());
    (sum / points.len() as f64).to_point()
}

/// Euclidean distance between two pointers.
#[must_use]
pub fn pairwise_distance(a: Point, b: Point) -> f64 {
    (a - b).hypot()
}

/// Translation after zooming by `ratio` (new scale over old scale) around `anchor`.
///
/// `image_origin` is the top-left of the image's current bounding rect and
/// `viewport_origin` the top-left of the viewport, both in document pixels.
/// Each axis moves by `(ratio - 1) * (anchor - image_origin + viewport_origin)`.
#[must_use]
pub fn anchored_offset(
    offset: Point,
    ratio: f64,
    anchor: Point,
    image_origin: Point,
    viewport_origin: Point,
) -> Point {
    offset - anchor_term(ratio, anchor, image_origin, viewport_origin)
}

/// Translation after a pinch step.
///
/// Combines the zoom anchor term of [`anchored_offset`] around `centroid`
/// with the shift of the centroid since `last_center`, so the image follows
/// the fingers while it scales.
#[must_use]
pub fn pinch_offset(
    offset: Point,
    ratio: f64,
    centroid: Point,
    last_center: Point,
    image_origin: Point,
    viewport_origin: Point,
) -> Point {
    let shift = centroid - last_center;
    offset - (anchor_term(ratio, centroid, image_origin, viewport_origin) - shift)
}

fn anchor_term(ratio: f64, anchor: Point, image_origin: Point, viewport_origin: Point) -> Vec2 {
    (anchor - image_origin + viewport_origin.to_vec2()) * (ratio - 1.0)
}

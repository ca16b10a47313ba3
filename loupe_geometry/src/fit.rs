// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Size};

use crate::viewport::Viewport;

/// Minimum scale used when no valid minimum is requested.
pub const DEFAULT_MIN_SCALE: f64 = 0.3;

/// Maximum scale used when no valid maximum is requested.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Scale displayed when the fit would exceed [`DEFAULT_MAX_SCALE`] and no
/// valid maximum was requested.
pub const FALLBACK_DISPLAY_SCALE: f64 = 3.0;

/// Share of the viewport width a landscape image is sized to.
const WIDTH_SHARE: f64 = 0.8;

/// Share of the viewport height an image may occupy.
const HEIGHT_SHARE: f64 = 0.9;

/// Requested scale bounds, as configured by the embedder.
///
/// `None`, non-positive minima and `NaN` values fall back to
/// [`DEFAULT_MIN_SCALE`] / [`DEFAULT_MAX_SCALE`]; see [`compute_fit`] for the
/// exact resolution rules.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleLimits {
    /// Requested lower bound.
    pub min: Option<f64>,
    /// Requested upper bound.
    pub max: Option<f64>,
}

impl ScaleLimits {
    /// Limits with both bounds requested.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Centered, scaled placement of one image inside a viewport.
///
/// Positions are viewport-local pixels. `width`/`height` describe the fitted
/// box; `scale` may differ from the box ratio when the requested limits
/// overrode it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    /// Display width of the fitted box.
    pub width: f64,
    /// Display height of the fitted box.
    pub height: f64,
    /// Left offset that centers the box horizontally.
    pub x: f64,
    /// Top offset that centers the box vertically.
    pub y: f64,
    /// Scale to display the image at.
    pub scale: f64,
    /// Effective lower scale bound for this image.
    pub min: f64,
    /// Effective upper scale bound for this image.
    pub max: f64,
}

/// Options for [`compute_centered`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenterOptions {
    /// Space taken by UI chrome (thumbnail bars, counters) on each edge.
    pub reserved: Insets,
    /// Percentage of the remaining area to leave empty, split between both sides.
    pub margin_percent: f64,
    /// Whether the image may be displayed above its native resolution.
    pub allow_upscale: bool,
}

impl Default for CenterOptions {
    fn default() -> Self {
        Self {
            reserved: Insets::ZERO,
            margin_percent: 0.0,
            allow_upscale: true,
        }
    }
}

/// Returns `true` when the image is at least as wide as it is tall.
#[must_use]
pub fn is_landscape(natural: Size) -> bool {
    natural.width >= natural.height
}

fn target_box(natural: Size, viewport: Size) -> Size {
    let aspect = natural.width / natural.height;
    if is_landscape(natural) {
        let width = viewport.width * WIDTH_SHARE;
        let height = width / aspect;
        if height > viewport.height * HEIGHT_SHARE {
            let height = viewport.height * HEIGHT_SHARE;
            return Size::new(height * aspect, height);
        }
        return Size::new(width, height);
    }

    let container_aspect = viewport.width / viewport.height;
    let height = if container_aspect >= aspect {
        viewport.height * HEIGHT_SHARE
    } else {
        // Shrinks smoothly as the image gets narrower than the viewport.
        viewport.height * HEIGHT_SHARE
            - viewport.height * WIDTH_SHARE * (aspect - container_aspect)
    };
    Size::new(height * aspect, height)
}

/// Computes the centered fit of an image of size `natural` in `viewport`.
///
/// Landscape images take 80% of the viewport width unless that overflows 90%
/// of its height; portrait images take 90% of the height, reduced further when
/// the viewport is narrower than the image.
///
/// Scale limits resolve as follows:
/// - Without a positive requested minimum the minimum is
///   [`DEFAULT_MIN_SCALE`], lowered to the fitted scale if that is smaller.
///   A valid minimum above the fitted scale raises the scale to it.
/// - Without a requested maximum at or above the effective minimum the
///   maximum is [`DEFAULT_MAX_SCALE`]. A fitted scale above it becomes the
///   maximum and the displayed scale drops to [`FALLBACK_DISPLAY_SCALE`].
///   A valid maximum below the fitted scale lowers the scale to it.
#[must_use]
pub fn compute_fit(natural: Size, viewport: &Viewport, limits: ScaleLimits) -> FitResult {
    let viewport_size = viewport.size();
    let target = target_box(natural, viewport_size);
    let mut scale = (target.width / natural.width).min(target.height / natural.height);

    let min = match limits.min {
        Some(requested) if requested > 0.0 => {
            if scale < requested {
                scale = requested;
            }
            requested
        }
        _ => DEFAULT_MIN_SCALE.min(scale),
    };

    let max = match limits.max {
        Some(requested) if requested >= min => {
            if scale > requested {
                scale = requested;
            }
            requested
        }
        _ => {
            if scale > DEFAULT_MAX_SCALE {
                let max = scale;
                scale = FALLBACK_DISPLAY_SCALE;
                max
            } else {
                DEFAULT_MAX_SCALE
            }
        }
    };

    FitResult {
        width: target.width,
        height: target.height,
        x: (viewport_size.width - target.width) / 2.0,
        y: (viewport_size.height - target.height) / 2.0,
        scale,
        min,
        max,
    }
}

/// Centers an image inside the part of `viewport` left over by `options`.
///
/// Unlike [`compute_fit`] the box fills the available area; `min` and `max`
/// are the image's already-resolved limits and bound the resulting scale.
#[must_use]
pub fn compute_centered(
    natural: Size,
    viewport: &Viewport,
    min: f64,
    max: f64,
    options: CenterOptions,
) -> FitResult {
    let area = viewport.inset(options.reserved);
    let keep = (1.0 - options.margin_percent / 100.0).max(0.0);
    let available = Size::new(area.width() * keep, area.height() * keep);

    let mut scale = (available.width / natural.width).min(available.height / natural.height);
    if !options.allow_upscale {
        scale = scale.min(1.0);
    }
    let scale = scale.max(min).min(max);

    let width = natural.width * scale;
    let height = natural.height * scale;
    FitResult {
        width,
        height,
        x: options.reserved.x0 + (area.width() - width) / 2.0,
        y: options.reserved.y0 + (area.height() - height) / 2.0,
        scale,
        min,
        max,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Size};

    use super::{
        CenterOptions, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, FALLBACK_DISPLAY_SCALE, ScaleLimits,
        compute_centered, compute_fit,
    };
    use crate::viewport::{Viewport, ViewportTarget, resolve_viewport};

    fn window(width: f64, height: f64) -> Viewport {
        resolve_viewport(ViewportTarget::Window(Size::new(width, height)))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn landscape_photo_on_window() {
        let fit = compute_fit(
            Size::new(1600.0, 1200.0),
            &window(1024.0, 768.0),
            ScaleLimits::default(),
        );
        assert!(close(fit.width, 819.2), "width was {}", fit.width);
        assert!(close(fit.height, 614.4), "height was {}", fit.height);
        assert!(close(fit.scale, 0.512), "scale was {}", fit.scale);
        assert_eq!(fit.min, DEFAULT_MIN_SCALE);
        assert_eq!(fit.max, DEFAULT_MAX_SCALE);
        assert!(close(fit.x, (1024.0 - 819.2) / 2.0), "x was {}", fit.x);
        assert!(close(fit.y, (768.0 - 614.4) / 2.0), "y was {}", fit.y);
    }

    #[test]
    fn landscape_overflowing_height_is_height_led() {
        // 80% of 1000 = 800 wide gives 400 tall, above 90% of 400 = 360.
        let fit = compute_fit(
            Size::new(2000.0, 1000.0),
            &window(1000.0, 400.0),
            ScaleLimits::default(),
        );
        assert!(close(fit.height, 360.0), "height was {}", fit.height);
        assert!(close(fit.width, 720.0), "width was {}", fit.width);
        assert!(close(fit.scale, 0.36), "scale was {}", fit.scale);
        assert!(close(fit.x, 140.0), "x was {}", fit.x);
        assert!(close(fit.y, 20.0), "y was {}", fit.y);
    }

    #[test]
    fn portrait_in_wide_viewport_takes_ninety_percent_height() {
        let fit = compute_fit(
            Size::new(600.0, 900.0),
            &window(1000.0, 800.0),
            ScaleLimits::default(),
        );
        assert!(close(fit.height, 720.0), "height was {}", fit.height);
        assert!(close(fit.width, 480.0), "width was {}", fit.width);
        assert!(close(fit.scale, 0.8), "scale was {}", fit.scale);
        assert!(close(fit.x, 260.0), "x was {}", fit.x);
        assert!(close(fit.y, 40.0), "y was {}", fit.y);
    }

    #[test]
    fn portrait_in_narrow_viewport_interpolates_height() {
        let natural = Size::new(600.0, 900.0);
        let fit = compute_fit(natural, &window(400.0, 800.0), ScaleLimits::default());

        let aspect = 600.0 / 900.0;
        let expected_height = 0.9 * 800.0 - 0.8 * 800.0 * (aspect - 0.5);
        assert!(close(fit.height, expected_height), "height was {}", fit.height);
        assert!(close(fit.width, expected_height * aspect), "width was {}", fit.width);
        assert!(
            close(fit.scale, fit.width / natural.width),
            "scale was {}",
            fit.scale
        );
    }

    #[test]
    fn fit_scale_matches_box_and_is_centered() {
        let viewports = [(1024.0, 768.0), (375.0, 812.0), (1920.0, 1080.0)];
        let images = [(4000.0, 3000.0), (300.0, 1200.0), (1280.0, 1280.0)];
        for (vw, vh) in viewports {
            let vp = window(vw, vh);
            for (iw, ih) in images {
                let fit = compute_fit(Size::new(iw, ih), &vp, ScaleLimits::new(0.0001, 1000.0));
                let expected = (fit.width / iw).min(fit.height / ih);
                assert!(close(fit.scale, expected), "scale {} != {}", fit.scale, expected);
                assert!(close(fit.x, (vw - fit.width) / 2.0), "x not centered");
                assert!(close(fit.y, (vh - fit.height) / 2.0), "y not centered");
            }
        }
    }

    #[test]
    fn requested_min_raises_tiny_fit() {
        // 80% of 1024 over 16384 gives a fitted scale of 0.05.
        let fit = compute_fit(
            Size::new(16384.0, 12288.0),
            &window(1024.0, 768.0),
            ScaleLimits::new(0.1, 10.0),
        );
        assert_eq!(fit.scale, 0.1);
        assert_eq!(fit.min, 0.1);
        assert_eq!(fit.max, 10.0);
    }

    #[test]
    fn missing_min_is_lowered_to_fit() {
        let fit = compute_fit(
            Size::new(16384.0, 12288.0),
            &window(1024.0, 768.0),
            ScaleLimits::default(),
        );
        assert!(close(fit.scale, 0.05), "scale was {}", fit.scale);
        assert_eq!(fit.min, fit.scale);
    }

    #[test]
    fn non_positive_min_falls_back_to_default() {
        let fit = compute_fit(
            Size::new(1600.0, 1200.0),
            &window(1024.0, 768.0),
            ScaleLimits {
                min: Some(-1.0),
                max: None,
            },
        );
        assert_eq!(fit.min, DEFAULT_MIN_SCALE);
    }

    #[test]
    fn missing_max_with_large_fit_displays_fallback_scale() {
        // 80% of 960 over 128 gives a fitted scale of 6.
        let fit = compute_fit(
            Size::new(128.0, 96.0),
            &window(960.0, 720.0),
            ScaleLimits::default(),
        );
        assert!(close(fit.max, 6.0), "max was {}", fit.max);
        assert_eq!(fit.scale, FALLBACK_DISPLAY_SCALE);
    }

    #[test]
    fn max_below_effective_min_falls_back_to_default() {
        let fit = compute_fit(
            Size::new(1600.0, 1200.0),
            &window(1024.0, 768.0),
            ScaleLimits::new(2.0, 1.0),
        );
        assert_eq!(fit.min, 2.0);
        assert_eq!(fit.max, DEFAULT_MAX_SCALE);
        assert_eq!(fit.scale, 2.0);
    }

    #[test]
    fn nan_max_falls_back_to_default() {
        let fit = compute_fit(
            Size::new(1600.0, 1200.0),
            &window(1024.0, 768.0),
            ScaleLimits {
                min: None,
                max: Some(f64::NAN),
            },
        );
        assert_eq!(fit.max, DEFAULT_MAX_SCALE);
    }

    #[test]
    fn requested_max_lowers_large_fit() {
        let fit = compute_fit(
            Size::new(128.0, 96.0),
            &window(960.0, 720.0),
            ScaleLimits::new(0.5, 2.0),
        );
        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.max, 2.0);
    }

    #[test]
    fn centered_respects_reserved_space() {
        let vp = window(1000.0, 800.0);
        let options = CenterOptions {
            reserved: Insets::new(0.0, 0.0, 0.0, 100.0),
            ..CenterOptions::default()
        };
        let fit = compute_centered(Size::new(1400.0, 1400.0), &vp, 0.1, 5.0, options);
        assert!(close(fit.scale, 0.5), "scale was {}", fit.scale);
        assert!(close(fit.x, 150.0), "x was {}", fit.x);
        assert!(close(fit.y, 0.0), "y was {}", fit.y);
    }

    #[test]
    fn centered_applies_margin() {
        let vp = window(1000.0, 1000.0);
        let options = CenterOptions {
            margin_percent: 20.0,
            ..CenterOptions::default()
        };
        let fit = compute_centered(Size::new(2000.0, 2000.0), &vp, 0.1, 5.0, options);
        assert!(close(fit.scale, 0.4), "scale was {}", fit.scale);
        assert!(close(fit.x, 100.0), "x was {}", fit.x);
    }

    #[test]
    fn centered_without_upscale_keeps_native_size() {
        let vp = window(1000.0, 1000.0);
        let options = CenterOptions {
            allow_upscale: false,
            ..CenterOptions::default()
        };
        let fit = compute_centered(Size::new(200.0, 100.0), &vp, 0.1, 5.0, options);
        assert_eq!(fit.scale, 1.0);
        assert!(close(fit.x, 400.0), "x was {}", fit.x);
        assert!(close(fit.y, 450.0), "y was {}", fit.y);
    }
}

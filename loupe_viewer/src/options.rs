// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use loupe_geometry::ScaleLimits;
use loupe_gesture::DOUBLE_CLICK_WINDOW_MS;

/// Named delays used by the viewer, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timings {
    /// Maximum gap between two releases that form a double-click.
    pub double_click_window: u64,
    /// Time after an accepted wheel step during which further steps are ignored.
    pub wheel_cooldown: u64,
    /// Delay before a pinch step is committed to the surface.
    pub pinch_commit_delay: u64,
    /// Poll interval while a resize waits for an in-flight transform.
    pub resize_retry_interval: u64,
    /// Number of polls before a pending resize restore is abandoned.
    pub resize_retry_budget: u32,
    /// How long the image counts as "just moved" after an animated commit.
    pub moved_flag_animated: u64,
    /// How long the image counts as "just moved" after an instant commit.
    pub moved_flag_instant: u64,
    /// How long the zoom percentage stays visible.
    pub indicator_hide_delay: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            double_click_window: DOUBLE_CLICK_WINDOW_MS,
            wheel_cooldown: 600,
            pinch_commit_delay: 0,
            resize_retry_interval: 70,
            resize_retry_budget: 40,
            moved_flag_animated: 500,
            moved_flag_instant: 100,
            indicator_hide_delay: 800,
        }
    }
}

/// Construction options for a [`Viewer`](crate::Viewer).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerOptions {
    /// Requested scale bounds.
    pub limits: ScaleLimits,
    /// Delays.
    pub timings: Timings,
    /// Show the transient zoom percentage when the scale changes.
    pub show_indicator: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            limits: ScaleLimits::default(),
            timings: Timings::default(),
            show_indicator: true,
        }
    }
}

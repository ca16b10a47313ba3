// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer trail: the anchor set a gesture measures its movement against.
//!
//! ## Usage
//!
//! 1) Start tracking with [`PointerTrail::start`] and the pointer positions at press time.
//! 2) On each drag move, call [`PointerTrail::advance`]; it returns the previous sample so the
//!    caller can compute a delta, and stores the new one. Pinch moves keep the anchor and
//!    only call [`PointerTrail::count_move`].
//! 3) [`PointerTrail::clear`] forgets everything once the last pointer is released.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use loupe_gesture::trail::{PointerTrail, Points};
//!
//! let mut trail = PointerTrail::default();
//! trail.start(Points::from_slice(&[Point::new(10.0, 20.0)]));
//! assert!(trail.is_active());
//!
//! let previous = trail.advance(Points::from_slice(&[Point::new(15.0, 25.0)])).unwrap();
//! assert_eq!(previous[0], Point::new(10.0, 20.0));
//! assert_eq!(trail.moves(), 1);
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Pointer positions of one sample; two fit inline, which covers a pinch.
pub type Points = SmallVec<[Point; 2]>;

/// Tracks the last pointer sample of an active gesture.
#[derive(Debug, Clone, Default)]
pub struct PointerTrail {
    anchor: Points,
    moves: u32,
}

impl PointerTrail {
    /// Starts (or restarts) tracking from `points`.
    ///
    /// Resets the move counter.
    pub fn start(&mut self, points: Points) {
        self.anchor = points;
        self.moves = 0;
    }

    /// Replaces the stored sample without counting a move.
    ///
    /// Used when the number of pointers changes mid-gesture.
    pub fn rebase(&mut self, points: Points) {
        self.anchor = points;
    }

    /// Records a new sample and returns the previous one.
    ///
    /// Returns `None` when no gesture is being tracked; in that case nothing
    /// is stored.
    pub fn advance(&mut self, points: Points) -> Option<Points> {
        if self.anchor.is_empty() {
            return None;
        }
        self.moves += 1;
        Some(core::mem::replace(&mut self.anchor, points))
    }

    /// Counts a move without replacing the stored sample.
    ///
    /// Used by gestures that measure every sample against a fixed anchor.
    pub fn count_move(&mut self) {
        if !self.anchor.is_empty() {
            self.moves += 1;
        }
    }

    /// The last recorded sample.
    pub fn anchor(&self) -> &[Point] {
        &self.anchor
    }

    /// Number of pointers in the last recorded sample.
    pub fn len(&self) -> usize {
        self.anchor.len()
    }

    /// Returns `true` when no sample is stored.
    pub fn is_empty(&self) -> bool {
        self.anchor.is_empty()
    }

    /// Number of moves recorded since the last start.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Returns `true` while a gesture is tracked.
    pub fn is_active(&self) -> bool {
        !self.anchor.is_empty()
    }

    /// Forgets the stored sample and the move counter.
    pub fn clear(&mut self) {
        self.anchor.clear();
        self.moves = 0;
    }
}

// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered image list with a current position.

use core::fmt;

use loupe_viewer::{ImageDescriptor, LoadOutcome};

/// A navigation request the sequence cannot satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationError {
    /// The index is past the end of the sequence.
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of images.
        len: usize,
    },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { index, len } => {
                write!(f, "image index {index} is out of bounds for {len} images")
            }
        }
    }
}

impl core::error::Error for NavigationError {}

/// Discovered images in display order, plus the current position.
///
/// ```
/// use loupe_carousel::Sequence;
/// use loupe_viewer::{ImageDescriptor, ImageId};
///
/// let images = (0..3).map(|i| ImageDescriptor::new(ImageId(i), format!("{i}.jpg")));
/// let mut sequence = Sequence::new(images.collect(), true);
/// assert_eq!(sequence.prev_index(), Some(2));
/// sequence.select(2).unwrap();
/// assert_eq!(sequence.next_index(), Some(0));
/// assert!(sequence.select(3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    images: Vec<ImageDescriptor>,
    index: usize,
    loop_around: bool,
}

impl Sequence {
    /// Starts at the first image.
    #[must_use]
    pub fn new(images: Vec<ImageDescriptor>, loop_around: bool) -> Self {
        Self {
            images,
            index: 0,
            loop_around,
        }
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if there are no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Current position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether navigation wraps at the ends.
    #[must_use]
    pub fn loops(&self) -> bool {
        self.loop_around
    }

    /// Image at the current position.
    #[must_use]
    pub fn current(&self) -> Option<&ImageDescriptor> {
        self.images.get(self.index)
    }

    /// Image at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        self.images.get(index)
    }

    /// All images in order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageDescriptor> + '_ {
        self.images.iter()
    }

    fn check(&self, index: usize) -> Result<(), NavigationError> {
        if index < self.images.len() {
            Ok(())
        } else {
            Err(NavigationError::OutOfBounds {
                index,
                len: self.images.len(),
            })
        }
    }

    /// Moves to `index`.
    pub fn select(&mut self, index: usize) -> Result<(), NavigationError> {
        self.check(index)?;
        self.index = index;
        Ok(())
    }

    /// Position after the current one; wraps when looping.
    #[must_use]
    pub fn next_index(&self) -> Option<usize> {
        let len = self.images.len();
        if self.index + 1 < len {
            Some(self.index + 1)
        } else if self.loop_around && len > 0 {
            Some(0)
        } else {
            None
        }
    }

    /// Position before the current one; wraps when looping.
    #[must_use]
    pub fn prev_index(&self) -> Option<usize> {
        let len = self.images.len();
        if self.index > 0 {
            Some(self.index - 1)
        } else if self.loop_around && len > 0 {
            Some(len - 1)
        } else {
            None
        }
    }

    /// Positions within `radius` of the current one, nearest first, without
    /// duplicates and without the current position.
    #[must_use]
    pub fn neighbours(&self, radius: usize) -> Vec<usize> {
        let len = self.images.len();
        let mut out = Vec::new();
        for distance in 1..=radius {
            let after = self.index + distance;
            let forward = if after < len {
                Some(after)
            } else if self.loop_around && len > 0 {
                Some(after % len)
            } else {
                None
            };
            let backward = match self.index.checked_sub(distance) {
                Some(before) => Some(before),
                None if self.loop_around && len > 0 => {
                    Some((self.index + len - distance % len) % len)
                }
                None => None,
            };
            for candidate in [forward, backward].into_iter().flatten() {
                if candidate != self.index && !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
        out
    }

    /// Records the load result of the image at `index`.
    ///
    /// Returns `Ok(false)` if that load had already completed.
    pub fn record(&mut self, index: usize, outcome: LoadOutcome) -> Result<bool, NavigationError> {
        self.check(index)?;
        Ok(self.images[index].complete(outcome))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use loupe_viewer::{ImageDescriptor, ImageId, LoadOutcome};

    use super::{NavigationError, Sequence};

    fn sequence(len: u32, loop_around: bool) -> Sequence {
        let images = (0..len).map(|i| ImageDescriptor::new(ImageId(i), format!("{i}.jpg")));
        Sequence::new(images.collect(), loop_around)
    }

    #[test]
    fn ends_stop_without_looping() {
        let mut seq = sequence(3, false);
        assert_eq!(seq.prev_index(), None);
        seq.select(2).unwrap();
        assert_eq!(seq.next_index(), None);
        assert_eq!(seq.prev_index(), Some(1));
    }

    #[test]
    fn ends_wrap_when_looping() {
        let mut seq = sequence(3, true);
        assert_eq!(seq.prev_index(), Some(2));
        seq.select(2).unwrap();
        assert_eq!(seq.next_index(), Some(0));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut seq = sequence(2, false);
        let err = seq.select(5).unwrap_err();
        assert_eq!(err, NavigationError::OutOfBounds { index: 5, len: 2 });
        assert_eq!(err.to_string(), "image index 5 is out of bounds for 2 images");
        assert_eq!(seq.index(), 0);
    }

    #[test]
    fn empty_sequence_never_navigates() {
        let seq = sequence(0, true);
        assert!(seq.current().is_none());
        assert_eq!(seq.next_index(), None);
        assert_eq!(seq.prev_index(), None);
        assert!(seq.neighbours(2).is_empty());
    }

    #[test]
    fn neighbours_respect_ends_and_wrap() {
        let seq = sequence(5, false);
        assert_eq!(seq.neighbours(2), vec![1, 2]);

        let looped = sequence(5, true);
        assert_eq!(looped.neighbours(1), vec![1, 4]);
        assert_eq!(looped.neighbours(2), vec![1, 4, 2, 3]);

        let tiny = sequence(2, true);
        assert_eq!(tiny.neighbours(3), vec![1]);
    }

    #[test]
    fn record_completes_once() {
        let mut seq = sequence(2, false);
        assert_eq!(seq.record(1, LoadOutcome::Loaded(Size::new(4.0, 3.0))), Ok(true));
        assert_eq!(seq.record(1, LoadOutcome::Failed), Ok(false));
        assert!(seq.get(1).is_some_and(ImageDescriptor::is_displayable));
        assert!(seq.record(2, LoadOutcome::Failed).is_err());
    }
}

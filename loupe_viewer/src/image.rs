// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Host handle to the source node an image was discovered on.
///
/// The viewer never owns or destroys the node; it only hands the id back to
/// the [`Surface`](crate::Surface).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

/// How an image load finished.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadOutcome {
    /// The image decoded with this natural size.
    Loaded(Size),
    /// The image could not be loaded.
    Failed,
}

/// One discovered image.
///
/// Created at discovery time and mutated exactly once when its load
/// completes. `loaded` only ever goes from `false` to `true`; a failed load
/// still counts as loaded so that navigation is never blocked on it.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageDescriptor {
    id: ImageId,
    src: String,
    natural: Size,
    loaded: bool,
    failed: bool,
}

impl ImageDescriptor {
    /// An image that has not finished loading.
    pub fn new(id: ImageId, src: impl Into<String>) -> Self {
        Self {
            id,
            src: src.into(),
            natural: Size::ZERO,
            loaded: false,
            failed: false,
        }
    }

    /// An image whose natural size is already known.
    pub fn loaded(id: ImageId, src: impl Into<String>, natural: Size) -> Self {
        let mut image = Self::new(id, src);
        image.mark_loaded(natural);
        image
    }

    /// Source node handle.
    #[must_use]
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Source URL.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Natural pixel size; zero until loaded.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        self.natural
    }

    /// `natural width / natural height`.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.natural.width / self.natural.height
    }

    /// Whether the image is at least as wide as it is tall.
    #[must_use]
    pub fn is_landscape(&self) -> bool {
        loupe_geometry::is_landscape(self.natural)
    }

    /// Whether the load has completed, successfully or not.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the load failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Whether the image can be displayed and transformed.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        self.loaded && !self.failed
    }

    /// Records a successful load. Returns `false` if the load already completed.
    pub fn mark_loaded(&mut self, natural: Size) -> bool {
        self.complete(LoadOutcome::Loaded(natural))
    }

    /// Records a failed load. Returns `false` if the load already completed.
    pub fn mark_failed(&mut self) -> bool {
        self.complete(LoadOutcome::Failed)
    }

    /// Records a load outcome. Returns `false` if the load already completed.
    pub fn complete(&mut self, outcome: LoadOutcome) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;
        match outcome {
            LoadOutcome::Loaded(natural) => self.natural = natural,
            LoadOutcome::Failed => self.failed = true,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{ImageDescriptor, ImageId};

    #[test]
    fn load_is_recorded_once() {
        let mut image = ImageDescriptor::new(ImageId(1), "a.jpg");
        assert!(!image.is_loaded());
        assert!(image.mark_loaded(Size::new(1600.0, 1200.0)));
        assert!(!image.mark_loaded(Size::new(10.0, 10.0)));
        assert_eq!(image.natural_size(), Size::new(1600.0, 1200.0));
        assert!(image.is_landscape());
        assert!((image.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn failure_still_counts_as_loaded() {
        let mut image = ImageDescriptor::new(ImageId(2), "broken.jpg");
        assert!(image.mark_failed());
        assert!(image.is_loaded());
        assert!(image.is_failed());
        assert!(!image.is_displayable());
        assert!(!image.mark_loaded(Size::new(10.0, 10.0)));
    }

    #[test]
    fn square_is_landscape() {
        let image = ImageDescriptor::loaded(ImageId(3), "sq.png", Size::new(500.0, 500.0));
        assert!(image.is_landscape());
        assert!(image.is_displayable());
    }
}

// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input consumed by the [`GestureState`](crate::GestureState) machine.

use bitflags::bitflags;
use kurbo::Point;

use crate::trail::Points;

/// A single mouse button, as reported on press and release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    /// Usually the wheel button.
    Auxiliary,
    /// The "back" side button.
    Back,
    /// The "forward" side button.
    Forward,
}

bitflags! {
    /// Set of mouse buttons held during a move.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Primary button.
        const PRIMARY = 1;
        /// Secondary button.
        const SECONDARY = 1 << 1;
        /// Auxiliary (wheel) button.
        const AUXILIARY = 1 << 2;
        /// Back button.
        const BACK = 1 << 3;
        /// Forward button.
        const FORWARD = 1 << 4;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Primary => Self::PRIMARY,
            MouseButton::Secondary => Self::SECONDARY,
            MouseButton::Auxiliary => Self::AUXILIARY,
            MouseButton::Back => Self::BACK,
            MouseButton::Forward => Self::FORWARD,
        }
    }
}

/// One raw input event delivered to the open image.
///
/// Positions are document (client) pixels. Touch events carry every touch
/// still on the surface after the change, in the host's order.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A mouse button was pressed.
    MouseDown {
        /// The button that changed.
        button: MouseButton,
        /// Pointer position.
        position: Point,
    },
    /// The mouse moved.
    MouseMove {
        /// Buttons held during the move.
        buttons: MouseButtons,
        /// Pointer position.
        position: Point,
    },
    /// A mouse button was released.
    MouseUp {
        /// The button that changed.
        button: MouseButton,
        /// Pointer position.
        position: Point,
    },
    /// One or more fingers touched down.
    TouchStart {
        /// All touches now on the surface.
        touches: Points,
    },
    /// One or more fingers moved.
    TouchMove {
        /// All touches now on the surface.
        touches: Points,
    },
    /// One or more fingers lifted (or the touch was cancelled).
    TouchEnd {
        /// Touches that remain on the surface.
        touches: Points,
    },
    /// The wheel turned.
    Wheel {
        /// Pointer position.
        position: Point,
        /// Vertical delta; negative when scrolling up.
        delta_y: f64,
    },
}

/// Which way a wheel step changes the scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomDirection {
    /// Scale grows.
    In,
    /// Scale shrinks.
    Out,
}

impl ZoomDirection {
    /// Maps a wheel delta to a zoom direction.
    ///
    /// Scrolling up (`delta_y < 0`) shrinks the image and scrolling down grows
    /// it. A zero delta carries no direction.
    #[must_use]
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::Out)
        } else if delta_y > 0.0 {
            Some(Self::In)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MouseButton, MouseButtons, ZoomDirection};

    #[test]
    fn scroll_up_shrinks() {
        assert_eq!(ZoomDirection::from_wheel_delta(-1.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_wheel_delta(1.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_wheel_delta(0.0), None);
        assert_eq!(ZoomDirection::from_wheel_delta(f64::NAN), None);
    }

    #[test]
    fn button_maps_to_flag() {
        assert_eq!(MouseButtons::from(MouseButton::Primary), MouseButtons::PRIMARY);
        assert_eq!(
            MouseButtons::from(MouseButton::Secondary),
            MouseButtons::SECONDARY
        );
        assert!(!MouseButtons::from(MouseButton::Back).contains(MouseButtons::PRIMARY));
    }
}

// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=loupe_gesture --heading-base-level=0

//! Loupe Gesture: classify raw pointer input into zoom and pan gestures.
//!
//! A lightbox image receives one interleaved stream of mouse, touch and wheel
//! events. This crate turns that stream into a small set of intents the
//! viewer can act on:
//!
//! - [`GestureAction::Drag`]: a pressed mouse or a single finger moved.
//! - [`GestureAction::DoubleClick`]: two clicks (or taps) within
//!   [`DOUBLE_CLICK_WINDOW_MS`] that did not move in between.
//! - [`GestureAction::Pinch`]: two or more fingers moved.
//! - [`GestureAction::Wheel`]: the wheel turned while nothing was pressed.
//! - [`GestureAction::GestureEnd`]: a touch gesture finished.
//!
//! The machine is modeled as the phases of [`GesturePhase`]:
//!
//! ```text
//!            down / 1 finger          move
//!   Idle ───────────────────▶ ClickArmed ──────▶ Dragging
//!    ▲  ▲                         │                 │
//!    │  └──── up (maybe dbl) ─────┘                 │
//!    │                                              │
//!    └──────────────── up / last finger ────────────┘
//!
//!   Idle ── 2+ fingers ──▶ PinchActive      Idle ── wheel ──▶ Cooldown
//! ```
//!
//! It does not know about scales or images. The viewer decides whether an
//! action is applied (for example, drags are dropped while a transform is
//! in flight) and reports accepted wheel steps back through
//! [`GestureState::arm_wheel_cooldown`].
//!
//! Every [`GestureOutput`] also says whether the event was consumed, in which
//! case the host must prevent the browser default and stop propagation so
//! nested viewers do not handle it twice.
//!
//! This crate is `no_std` compatible.

#![no_std]

mod input;
mod state;
pub mod trail;

pub use input::{InputEvent, MouseButton, MouseButtons, ZoomDirection};
pub use state::{
    DOUBLE_CLICK_WINDOW_MS, GestureAction, GestureOutput, GesturePhase, GestureState,
};
pub use trail::Points;

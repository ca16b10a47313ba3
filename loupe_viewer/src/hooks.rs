// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle hooks: observer lists keyed by [`HookKind`].
//!
//! Listeners run in registration order. Each dispatch builds one
//! [`ViewerEvent`] and passes it by reference to every listener for that
//! kind, with these propagation rules:
//!
//! - [`ViewerEvent::prevent_default`] on a cancelable kind (`BeforeOpen`,
//!   `BeforeClose`) cancels the pending open/close and ends the dispatch.
//!   On other kinds it has no effect.
//! - [`ViewerEvent::stop_propagation`] ends the dispatch; later listeners do
//!   not run.
//! - A listener returning `Err` is logged and skipped; the remaining
//!   listeners and the lifecycle step still run.
//!
//! ## Minimal example
//!
//! ```
//! use loupe_viewer::hooks::{HookError, HookKind, Hooks, ViewerEvent};
//!
//! let mut hooks = Hooks::new();
//! hooks.on(HookKind::BeforeClose, |_: &mut ViewerEvent| Err(HookError::new("plugin crashed")));
//! hooks.on(HookKind::BeforeClose, |event: &mut ViewerEvent| {
//!     event.prevent_default();
//!     Ok(())
//! });
//!
//! let mut event = ViewerEvent::new(HookKind::BeforeClose, None, None);
//! let prevented = hooks.run(&mut event);
//! // The failing listener did not stop the second one from cancelling.
//! assert!(prevented);
//! ```

use core::fmt;

use tracing::warn;

use crate::image::ImageId;
use crate::transform::ImageState;

/// Lifecycle points a listener can observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// An image is about to open. Cancelable.
    BeforeOpen,
    /// An image has opened.
    AfterOpen,
    /// The viewer is about to close. Cancelable.
    BeforeClose,
    /// The viewer has closed.
    AfterClose,
    /// A transform was committed to the surface.
    TransformChange,
}

impl HookKind {
    /// Whether [`ViewerEvent::prevent_default`] has an effect for this kind.
    #[must_use]
    pub fn is_cancelable(self) -> bool {
        matches!(self, Self::BeforeOpen | Self::BeforeClose)
    }
}

/// The value passed to every listener of one dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerEvent {
    kind: HookKind,
    target: Option<ImageId>,
    state: Option<ImageState>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ViewerEvent {
    /// Creates an event about `target` with an optional transform snapshot.
    #[must_use]
    pub fn new(kind: HookKind, target: Option<ImageId>, state: Option<ImageState>) -> Self {
        Self {
            kind,
            target,
            state,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// What is happening.
    #[must_use]
    pub fn kind(&self) -> HookKind {
        self.kind
    }

    /// The image concerned, if any.
    #[must_use]
    pub fn target(&self) -> Option<ImageId> {
        self.target
    }

    /// Transform snapshot of the open image at dispatch time.
    #[must_use]
    pub fn state(&self) -> Option<ImageState> {
        self.state
    }

    /// Cancels the pending lifecycle step, if this kind is cancelable.
    pub fn prevent_default(&mut self) {
        if self.kind.is_cancelable() {
            self.default_prevented = true;
        }
    }

    /// Keeps later listeners from seeing this event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a listener cancelled the lifecycle step.
    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a listener stopped propagation.
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Error reported by a failing listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Creates an error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hook listener failed: {}", self.message)
    }
}

impl core::error::Error for HookError {}

/// Handle returned by [`Hooks::on`], used to remove the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A registered callback.
pub type Listener = Box<dyn FnMut(&mut ViewerEvent) -> Result<(), HookError>>;

struct Registered {
    id: ListenerId,
    kind: HookKind,
    listener: Listener,
}

/// Listener registry.
#[derive(Default)]
pub struct Hooks {
    listeners: Vec<Registered>,
    next_id: u64,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl Hooks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for `kind`, after every listener already registered.
    pub fn on(
        &mut self,
        kind: HookKind,
        listener: impl FnMut(&mut ViewerEvent) -> Result<(), HookError> + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Registered {
            id,
            kind,
            listener: Box::new(listener),
        });
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|registered| registered.id != id);
        self.listeners.len() != before
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn count(&self, kind: HookKind) -> usize {
        self.listeners
            .iter()
            .filter(|registered| registered.kind == kind)
            .count()
    }

    /// Runs every listener for the event's kind and reports whether the
    /// default action was prevented.
    pub fn run(&mut self, event: &mut ViewerEvent) -> bool {
        let kind = event.kind;
        for registered in self
            .listeners
            .iter_mut()
            .filter(|registered| registered.kind == kind)
        {
            if let Err(err) = (registered.listener)(event) {
                warn!(hook = ?kind, listener = registered.id.0, %err, "ignoring failed hook listener");
            }
            if event.default_prevented || event.propagation_stopped {
                break;
            }
        }
        event.default_prevented
    }
}

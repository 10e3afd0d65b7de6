// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw interaction events as delivered by the host's event source.
//!
//! The same [`InteractionEvent`] value that reaches a
//! [`Pressability`](crate::Pressability) handler is passed by reference to the
//! caller's callbacks. Fields are never renamed or rewritten on the way through.

use alloc::borrow::Cow;
use core::fmt;

use kurbo::{Point, Rect};

/// A keyboard key, identified by its name (for example `"Enter"` or `"ArrowLeft"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Cow<'static, str>);

impl Key {
    /// The `Enter` key.
    pub const ENTER: Self = Self::from_static("Enter");
    /// The space bar.
    pub const SPACE: Self = Self::from_static(" ");
    /// The left arrow key.
    pub const ARROW_LEFT: Self = Self::from_static("ArrowLeft");
    /// The right arrow key.
    pub const ARROW_RIGHT: Self = Self::from_static("ArrowRight");
    /// The up arrow key.
    pub const ARROW_UP: Self = Self::from_static("ArrowUp");
    /// The down arrow key.
    pub const ARROW_DOWN: Self = Self::from_static("ArrowDown");

    /// Creates a key from a static name without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a key from any name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Key {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Which raw signal an [`InteractionEvent`] carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The element became the responder for a touch or pointer gesture.
    ResponderGrant,
    /// The pointer moved while the element is the responder.
    ResponderMove,
    /// The pointer was lifted.
    ResponderRelease,
    /// Another element took over the gesture, or the platform cancelled it.
    ResponderTerminate,
    /// A key was pressed while the element has focus.
    KeyDown,
    /// A key was released while the element has focus.
    KeyUp,
    /// The element gained focus.
    Focus,
    /// The element lost focus.
    Blur,
}

impl EventKind {
    /// The conventional handler name for this signal.
    pub const fn handler_name(self) -> &'static str {
        match self {
            Self::ResponderGrant => "onResponderGrant",
            Self::ResponderMove => "onResponderMove",
            Self::ResponderRelease => "onResponderRelease",
            Self::ResponderTerminate => "onResponderTerminate",
            Self::KeyDown => "onKeyDown",
            Self::KeyUp => "onKeyUp",
            Self::Focus => "onFocus",
            Self::Blur => "onBlur",
        }
    }
}

/// One raw interaction signal.
///
/// Geometry is expressed in a single host coordinate space: `bounds` is the
/// element's layout rectangle and `position` the pointer location, both in
/// the same space. Only the grant needs `bounds`; the responder region is
/// captured from it and reused for the rest of the press cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionEvent {
    /// The raw signal.
    pub kind: EventKind,
    /// Pointer position, for pointer signals.
    pub position: Option<Point>,
    /// Element bounds, for a grant.
    pub bounds: Option<Rect>,
    /// Key, for keyboard signals.
    pub key: Option<Key>,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl InteractionEvent {
    /// Creates an event with no geometry and no key.
    pub const fn new(kind: EventKind, timestamp: u64) -> Self {
        Self {
            kind,
            position: None,
            bounds: None,
            key: None,
            timestamp,
        }
    }

    /// A responder grant at `position` on an element laid out at `bounds`.
    pub fn grant(position: Point, bounds: Rect, timestamp: u64) -> Self {
        Self {
            position: Some(position),
            bounds: Some(bounds),
            ..Self::new(EventKind::ResponderGrant, timestamp)
        }
    }

    /// A responder move to `position`.
    pub fn moved(position: Point, timestamp: u64) -> Self {
        Self {
            position: Some(position),
            ..Self::new(EventKind::ResponderMove, timestamp)
        }
    }

    /// A pointer release at `position`.
    pub fn release(position: Point, timestamp: u64) -> Self {
        Self {
            position: Some(position),
            ..Self::new(EventKind::ResponderRelease, timestamp)
        }
    }

    /// A responder termination.
    pub fn terminate(timestamp: u64) -> Self {
        Self::new(EventKind::ResponderTerminate, timestamp)
    }

    /// A key press.
    pub fn key_down(key: impl Into<Key>, timestamp: u64) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::new(EventKind::KeyDown, timestamp)
        }
    }

    /// A key release.
    pub fn key_up(key: impl Into<Key>, timestamp: u64) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::new(EventKind::KeyUp, timestamp)
        }
    }

    /// Focus gained.
    pub fn focus(timestamp: u64) -> Self {
        Self::new(EventKind::Focus, timestamp)
    }

    /// Focus lost.
    pub fn blur(timestamp: u64) -> Self {
        Self::new(EventKind::Blur, timestamp)
    }
}

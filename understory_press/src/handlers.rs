// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named handler table for wiring a [`Pressability`] to a host event source.
//!
//! Hosts that dispatch by handler name (for example a view that exposes
//! `onResponderGrant`, `onKeyDown`, ... slots) can iterate the table and bind
//! each entry. Hosts that already have an [`InteractionEvent`] value can call
//! [`Pressability::handle`] instead.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_press::{InteractionEvent, Pressability, TouchState};
//!
//! let mut press = Pressability::default();
//! let handlers = press.event_handlers();
//!
//! let grant = handlers.get("onResponderGrant").unwrap();
//! grant(&mut press, &InteractionEvent::grant(Point::ZERO, Rect::new(0.0, 0.0, 10.0, 10.0), 0));
//! assert_eq!(press.touch_state(), TouchState::ResponderActivePressIn);
//!
//! assert_eq!(handlers.iter().count(), 8);
//! ```

use crate::event::{EventKind, InteractionEvent};
use crate::machine::Pressability;

/// A raw event handler.
pub type Handler = fn(&mut Pressability, &InteractionEvent);

/// The fixed set of raw event handlers of a [`Pressability`].
#[derive(Copy, Clone, Debug)]
pub struct EventHandlers {
    /// Responder grant.
    pub on_responder_grant: Handler,
    /// Pointer move while responder.
    pub on_responder_move: Handler,
    /// Pointer release.
    pub on_responder_release: Handler,
    /// Responder termination.
    pub on_responder_terminate: Handler,
    /// Key down.
    pub on_key_down: Handler,
    /// Key up.
    pub on_key_up: Handler,
    /// Focus.
    pub on_focus: Handler,
    /// Blur.
    pub on_blur: Handler,
}

impl Default for EventHandlers {
    fn default() -> Self {
        Self {
            on_responder_grant: Pressability::on_responder_grant,
            on_responder_move: Pressability::on_responder_move,
            on_responder_release: Pressability::on_responder_release,
            on_responder_terminate: Pressability::on_responder_terminate,
            on_key_down: Pressability::on_key_down,
            on_key_up: Pressability::on_key_up,
            on_focus: Pressability::on_focus,
            on_blur: Pressability::on_blur,
        }
    }
}

impl EventHandlers {
    /// The handler for one raw signal.
    pub fn for_kind(&self, kind: EventKind) -> Handler {
        match kind {
            EventKind::ResponderGrant => self.on_responder_grant,
            EventKind::ResponderMove => self.on_responder_move,
            EventKind::ResponderRelease => self.on_responder_release,
            EventKind::ResponderTerminate => self.on_responder_terminate,
            EventKind::KeyDown => self.on_key_down,
            EventKind::KeyUp => self.on_key_up,
            EventKind::Focus => self.on_focus,
            EventKind::Blur => self.on_blur,
        }
    }

    /// Looks a handler up by its conventional name (see [`EventKind::handler_name`]).
    pub fn get(&self, name: &str) -> Option<Handler> {
        self.iter()
            .find_map(|(n, handler)| (n == name).then_some(handler))
    }

    /// All handlers with their names, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Handler)> + '_ {
        [
            EventKind::ResponderGrant,
            EventKind::ResponderMove,
            EventKind::ResponderRelease,
            EventKind::ResponderTerminate,
            EventKind::KeyDown,
            EventKind::KeyUp,
            EventKind::Focus,
            EventKind::Blur,
        ]
        .into_iter()
        .map(|kind| (kind.handler_name(), self.for_kind(kind)))
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_press --heading-base-level=0

//! Understory Press: a pressability state machine for UI elements.
//!
//! ## Overview
//!
//! This crate turns a raw stream of responder, pointer, keyboard, and focus
//! signals into a small set of unambiguous callbacks:
//!
//! - `on_press_in` / `on_press_out`: the element starts / stops looking pressed.
//! - `on_press`: a press completed with the pointer still inside the element.
//! - `on_long_press`: the press was held past the long-press threshold.
//! - `on_key_down` / `on_key_up`: filtered by the configured key sets.
//! - `on_focus` / `on_blur`: forwarded as-is.
//!
//! It does not render anything and does not perform hit testing beyond the
//! tolerance-region check of the element that owns the gesture. The host's
//! responder routing decides which element receives the grant, consulting
//! [`Pressability::should_set_responder`] and
//! [`Pressability::on_responder_termination_request`].
//!
//! ## Inputs
//!
//! Feed [`InteractionEvent`] values to [`Pressability::handle`] or to the
//! entries of [`Pressability::event_handlers`]. The grant carries the element
//! bounds; the responder region is those bounds grown by
//! [`PressConfig::hit_slop`] and [`PressConfig::press_rect_offset`]
//! (see [`responder_region`]).
//!
//! ## Time
//!
//! The machine never reads a clock. Timestamps arrive with events, and pending
//! waits (press-in delay, long press, delayed press-out) live in an
//! `understory_timing` queue. Poll [`Pressability::next_deadline`] and call
//! [`Pressability::advance`] when it passes.
//!
//! ## State machine
//!
//! [`TouchState`] lists the states and [`transition`] is the complete
//! transition table. Invalid signal ordering, such as a release without a
//! grant, is logged through `tracing` and recovered locally; it is never
//! reported to the caller.
//!
//! ## Example
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_press::{InteractionEvent, PressConfig, Pressability};
//!
//! let long_presses = Rc::new(Cell::new(0));
//! let counter = long_presses.clone();
//! let mut press = Pressability::new(
//!     PressConfig::default().on_long_press(move |_| counter.set(counter.get() + 1)),
//! );
//!
//! let bounds = Rect::new(0.0, 0.0, 80.0, 30.0);
//! press.handle(&InteractionEvent::grant(Point::new(5.0, 5.0), bounds, 1_000));
//!
//! // The host's timer fires at the reported deadline.
//! assert_eq!(press.next_deadline(), Some(1_500));
//! press.advance(1_500);
//! assert_eq!(long_presses.get(), 1);
//!
//! press.handle(&InteractionEvent::release(Point::new(5.0, 5.0), 1_600));
//! assert_eq!(long_presses.get(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod event;
mod geometry;
mod handlers;
mod machine;
mod state;

pub use config::{
    Callback, DEFAULT_DELAY_LONG_PRESS, DEFAULT_MIN_PRESS_DURATION, KeySet, PressConfig,
};
pub use event::{EventKind, InteractionEvent, Key};
pub use geometry::{DEFAULT_PRESS_RECT_OFFSET, EdgeInsets, region_contains, responder_region};
pub use handlers::{EventHandlers, Handler};
pub use machine::Pressability;
pub use state::{Signal, SignalError, TouchState, transition};

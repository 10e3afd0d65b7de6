// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! ## Overview
//!
//! UI state machines often need to wait: a press that activates after a short
//! delay, a long-press threshold, a deferred press-out. This crate models those
//! waits as entries in a [`TimerQueue`] instead of platform callbacks.
//!
//! The queue does not own a clock and never sleeps. The host tells it what time
//! it is, and it answers two questions:
//!
//! - When is the next deadline? ([`TimerQueue::next_deadline`]), so the host can
//!   arm a single wakeup with its own event loop.
//! - Which timers are due now? ([`TimerQueue::pop_due`]), in deadline order.
//!
//! Timestamps and delays are plain `u64` values in whatever unit the host uses
//! consistently (milliseconds throughout Understory).
//!
//! ## Cancellation
//!
//! [`TimerQueue::schedule`] returns a [`TimerId`]. Passing it to
//! [`TimerQueue::cancel`] removes the entry and hands the payload back.
//! A cancelled timer is gone; it can never be returned by `pop_due`.
//! Ids are never reused within a queue, so a stale id cannot cancel an
//! unrelated timer.
//!
//! ## Minimal example
//!
//! ```
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let long_press = timers.schedule(1_000, 500, "long-press");
//! let _press_out = timers.schedule(1_000, 130, "press-out");
//!
//! assert_eq!(timers.next_deadline(), Some(1_130));
//!
//! // Nothing is due yet.
//! assert!(timers.pop_due(1_100).is_none());
//!
//! // The press-out fires first.
//! let expired = timers.pop_due(1_200).unwrap();
//! assert_eq!(expired.payload, "press-out");
//!
//! // The pointer was released: cancel the long press.
//! assert_eq!(timers.cancel(long_press), Some("long-press"));
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod queue;

pub use queue::{Expired, TimerId, TimerQueue};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A shared animated scalar for opacity.
//!
//! [`AnimatedOpacity`] is a cheap, cloneable handle. Press callbacks hold one
//! clone and request timings; the host's frame loop holds another and samples
//! it with [`AnimatedOpacity::tick`]. The value is only ever changed through a
//! timing.
//!
//! A timing requested with a non-zero duration starts on the next `tick`, so
//! callbacks never need to know the current time. Zero-duration timings jump
//! to the target immediately.
//!
//! ```
//! use understory_touchable::AnimatedOpacity;
//!
//! let opacity = AnimatedOpacity::new(1.0);
//! opacity.animate_to(0.0, 0);
//! assert_eq!(opacity.value(), 0.0);
//!
//! opacity.animate_to(1.0, 250);
//! opacity.tick(1_000); // starts here
//! assert_eq!(opacity.tick(1_125), 0.5);
//! assert_eq!(opacity.tick(1_250), 1.0);
//! assert!(!opacity.is_animating());
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;

/// Quadratic ease-in-out on `t` in `[0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 2.0 - 2.0 * t;
        1.0 - u * u / 2.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Timing {
    from: f64,
    to: f64,
    duration: u64,
    started_at: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
struct Inner {
    value: f64,
    timing: Option<Timing>,
}

/// Handle to a single animated opacity value.
#[derive(Clone, Debug)]
pub struct AnimatedOpacity(Rc<RefCell<Inner>>);

impl AnimatedOpacity {
    /// Creates a value at rest.
    pub fn new(value: f64) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            timing: None,
        })))
    }

    /// Starts moving toward `to` over `duration` milliseconds.
    ///
    /// Replaces any timing in flight; the new one starts from the last sampled value.
    pub fn animate_to(&self, to: f64, duration: u64) {
        let mut inner = self.0.borrow_mut();
        if duration == 0 {
            inner.value = to;
            inner.timing = None;
        } else {
            inner.timing = Some(Timing {
                from: inner.value,
                to,
                duration,
                started_at: None,
            });
        }
    }

    /// Samples the value at `now`, starting a pending timing if needed.
    pub fn tick(&self, now: u64) -> f64 {
        let mut inner = self.0.borrow_mut();
        let Some(mut timing) = inner.timing else {
            return inner.value;
        };
        let started_at = *timing.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);
        if elapsed >= timing.duration {
            inner.value = timing.to;
            inner.timing = None;
        } else {
            let progress = elapsed as f64 / timing.duration as f64;
            inner.value = timing.from + (timing.to - timing.from) * ease_in_out_quad(progress);
            inner.timing = Some(timing);
        }
        inner.value
    }

    /// The last sampled value.
    pub fn value(&self) -> f64 {
        self.0.borrow().value
    }

    /// Where the value is heading.
    pub fn target(&self) -> f64 {
        let inner = self.0.borrow();
        inner.timing.map_or(inner.value, |t| t.to)
    }

    /// `true` while a timing is pending or running.
    pub fn is_animating(&self) -> bool {
        self.0.borrow().timing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert_eq!(ease_in_out_quad(0.25), 0.125);
        assert_eq!(ease_in_out_quad(2.0), 1.0);
    }

    #[test]
    fn timing_starts_on_first_tick() {
        let a = AnimatedOpacity::new(0.0);
        a.animate_to(1.0, 100);
        assert!(a.is_animating());
        assert_eq!(a.target(), 1.0);
        assert_eq!(a.value(), 0.0);

        assert_eq!(a.tick(500), 0.0);
        assert_eq!(a.tick(550), 0.5);
        assert_eq!(a.tick(700), 1.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let a = AnimatedOpacity::new(1.0);
        a.animate_to(0.0, 100);
        a.tick(0);
        a.tick(50);
        assert_eq!(a.value(), 0.5);

        a.animate_to(1.0, 100);
        a.tick(50);
        assert_eq!(a.tick(100), 0.75);
    }

    #[test]
    fn clones_share_the_value() {
        let a = AnimatedOpacity::new(1.0);
        let b = a.clone();
        b.animate_to(0.2, 0);
        assert_eq!(a.value(), 0.2);
    }
}

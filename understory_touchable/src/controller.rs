// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The opacity press-feedback controller.
//!
//! [`TouchableOpacity`] owns a [`Pressability`] and the [`AnimatedOpacity`] it
//! drives. It holds no other state and never schedules work on its own: the
//! host forwards raw events to [`TouchableOpacity::handle`], calls
//! [`TouchableOpacity::advance`] on its frame or timer tick, and calls the
//! lifecycle hooks when options change or the element goes away.

use understory_press::{InteractionEvent, Pressability};

use crate::animated::AnimatedOpacity;
use crate::options::{INACTIVE_DURATION, OpacityFeedback, TouchableOptions, build_press_config};

/// A pressable element that dims while pressed.
#[derive(Debug)]
pub struct TouchableOpacity {
    anim: AnimatedOpacity,
    pressability: Pressability,
    options: TouchableOptions,
}

impl TouchableOpacity {
    /// Creates the controller; opacity starts at the resting value of `options.style`.
    pub fn new(mut options: TouchableOptions) -> Self {
        let anim = AnimatedOpacity::new(options.resting_opacity());
        let feedback = OpacityFeedback::new(anim.clone(), &options);
        let pressability = Pressability::new(build_press_config(&mut options, &feedback));
        Self {
            anim,
            pressability,
            options: options.without_callbacks(),
        }
    }

    /// Rebinds the press machine to new options.
    ///
    /// A change of `disabled` restores the resting opacity even when no press ends.
    pub fn on_config_changed(&mut self, mut options: TouchableOptions) {
        let feedback = OpacityFeedback::new(self.anim.clone(), &options);
        self.pressability
            .configure(build_press_config(&mut options, &feedback));
        if options.disabled != self.options.disabled {
            tracing::debug!(disabled = options.disabled, "touchable disabled changed");
            feedback.deactivate(INACTIVE_DURATION);
        }
        self.options = options.without_callbacks();
    }

    /// Tears down the press machine; no callback fires afterwards.
    ///
    /// An animation in flight is left as is.
    pub fn on_dispose(&mut self) {
        self.pressability.reset();
    }

    /// Forwards a raw event to the press machine.
    ///
    /// Feedback animations caused by the event start at its timestamp.
    pub fn handle(&mut self, event: &InteractionEvent) {
        self.fire_due(event.timestamp);
        self.pressability.handle(event);
        self.anim.tick(event.timestamp);
    }

    /// Fires due press timers, then samples the opacity at `now`.
    ///
    /// Feedback animations caused by a timer start at the timer's deadline,
    /// not at `now`.
    pub fn advance(&mut self, now: u64) -> f64 {
        self.fire_due(now);
        self.pressability.advance(now);
        self.anim.tick(now)
    }

    fn fire_due(&mut self, now: u64) {
        while let Some(deadline) = self.pressability.next_deadline().filter(|&d| d <= now) {
            self.pressability.advance(deadline);
            self.anim.tick(deadline);
        }
    }

    /// Earliest press timer deadline.
    ///
    /// Animation frames are not included; poll [`is_animating`](Self::is_animating).
    pub fn next_deadline(&self) -> Option<u64> {
        self.pressability.next_deadline()
    }

    /// `true` while the opacity is moving.
    pub fn is_animating(&self) -> bool {
        self.anim.is_animating()
    }

    /// The last sampled opacity.
    pub fn opacity(&self) -> f64 {
        self.anim.value()
    }

    /// The animated opacity handle.
    pub fn animated_opacity(&self) -> &AnimatedOpacity {
        &self.anim
    }

    /// The press machine.
    pub fn pressability(&self) -> &Pressability {
        &self.pressability
    }

    /// The current options, without callbacks.
    pub fn options(&self) -> &TouchableOptions {
        &self.options
    }
}

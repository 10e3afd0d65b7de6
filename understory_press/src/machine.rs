// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The press state machine.
//!
//! ## Usage
//!
//! 1) Create a [`Pressability`] with a [`PressConfig`].
//! 2) Wire [`Pressability::event_handlers`] (or [`Pressability::handle`]) to the
//!    host's raw event source.
//! 3) Whenever [`Pressability::next_deadline`] returns a time, arrange for
//!    [`Pressability::advance`] to be called at or after it.
//! 4) Call [`Pressability::configure`] when options change and
//!    [`Pressability::reset`] when the element goes away.
//!
//! Every handler first advances the internal clock to the event's timestamp,
//! so timers that were due before the event always fire before it is applied.
//!
//! ## Callback order
//!
//! For one press cycle the caller observes `on_press_in`, then optionally
//! `on_long_press`, then `on_press_out`, then `on_press`. `on_press` requires
//! the release to happen in a press-in state. Press-in and press-out are
//! balanced: leaving the region delivers press-out early, and coming back does
//! not deliver a second press-in.
//!
//! ## Minimal example
//!
//! ```
//! use core::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_press::{InteractionEvent, PressConfig, Pressability};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (a, b, c) = (log.clone(), log.clone(), log.clone());
//! let mut press = Pressability::new(
//!     PressConfig::default()
//!         .with_min_press_duration(0)
//!         .on_press_in(move |_| a.borrow_mut().push("in"))
//!         .on_press_out(move |_| b.borrow_mut().push("out"))
//!         .on_press(move |_| c.borrow_mut().push("press")),
//! );
//!
//! let bounds = Rect::new(0.0, 0.0, 100.0, 40.0);
//! press.handle(&InteractionEvent::grant(Point::new(10.0, 10.0), bounds, 0));
//! assert_eq!(*log.borrow(), ["in"]);
//!
//! press.handle(&InteractionEvent::release(Point::new(12.0, 10.0), 100));
//! assert_eq!(*log.borrow(), ["in", "out", "press"]);
//! ```

use kurbo::{Point, Rect};
use understory_timing::{TimerId, TimerQueue};

use crate::config::{Callback, PressConfig};
use crate::event::{EventKind, InteractionEvent, Key};
use crate::geometry::{region_contains, responder_region};
use crate::handlers::EventHandlers;
use crate::state::{Signal, TouchState, transition};

#[derive(Clone, Debug)]
enum PressTimer {
    Activate(InteractionEvent),
    LongPress(InteractionEvent),
    PressOut {
        event: InteractionEvent,
        then_press: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PressSource {
    Pointer,
    Keyboard(Key),
}

/// Bookkeeping for the press cycle in progress.
#[derive(Clone, Debug, Default)]
struct Cycle {
    source: Option<PressSource>,
    region: Option<Rect>,
    origin: Option<Point>,
    activated_at: Option<u64>,
    press_in_fired: bool,
    // Press-in delivered and not yet balanced by a press-out.
    pressed_in: bool,
}

/// Press state machine for one element.
///
/// See the crate documentation for the event flow.
pub struct Pressability {
    config: PressConfig,
    state: TouchState,
    timers: TimerQueue<PressTimer>,
    activate_timer: Option<TimerId>,
    long_press_timer: Option<TimerId>,
    press_out_timer: Option<TimerId>,
    cycle: Cycle,
    now: u64,
}

impl core::fmt::Debug for Pressability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pressability")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("pending_timers", &self.timers.len())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl Default for Pressability {
    fn default() -> Self {
        Self::new(PressConfig::default())
    }
}

fn fire(slot: &mut Option<Callback>, event: &InteractionEvent) {
    if let Some(callback) = slot.as_mut() {
        callback(event);
    }
}

impl Pressability {
    /// Creates an idle machine.
    pub fn new(config: PressConfig) -> Self {
        Self {
            config,
            state: TouchState::NotResponder,
            timers: TimerQueue::new(),
            activate_timer: None,
            long_press_timer: None,
            press_out_timer: None,
            cycle: Cycle::default(),
            now: 0,
        }
    }

    /// Replaces the configuration.
    ///
    /// Takes effect from the next signal; timers already pending keep their deadlines.
    pub fn configure(&mut self, config: PressConfig) {
        tracing::trace!(disabled = config.disabled, "press config replaced");
        self.config = config;
    }

    /// The active configuration.
    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    /// Cancels all timers, returns to idle, and drops the configuration.
    ///
    /// No press-out is delivered. Until [`configure`](Self::configure) is
    /// called again no callback can fire.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.activate_timer = None;
        self.long_press_timer = None;
        self.press_out_timer = None;
        self.cycle = Cycle::default();
        self.state = TouchState::NotResponder;
        self.config = PressConfig::default();
    }

    /// Current touch state.
    pub fn touch_state(&self) -> TouchState {
        self.state
    }

    /// `true` between a delivered press-in and its press-out.
    pub fn is_pressed_in(&self) -> bool {
        self.cycle.pressed_in
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Whether the element should accept a responder grant.
    pub fn should_set_responder(&self) -> bool {
        !self.config.disabled
    }

    /// Whether the element lets another responder take over its gesture.
    pub fn on_responder_termination_request(&self) -> bool {
        self.config.cancelable
    }

    /// The named handler table for the host's event source.
    pub fn event_handlers(&self) -> EventHandlers {
        EventHandlers::default()
    }

    /// Dispatches a raw event to the matching handler.
    pub fn handle(&mut self, event: &InteractionEvent) {
        match event.kind {
            EventKind::ResponderGrant => self.on_responder_grant(event),
            EventKind::ResponderMove => self.on_responder_move(event),
            EventKind::ResponderRelease => self.on_responder_release(event),
            EventKind::ResponderTerminate => self.on_responder_terminate(event),
            EventKind::KeyDown => self.on_key_down(event),
            EventKind::KeyUp => self.on_key_up(event),
            EventKind::Focus => self.on_focus(event),
            EventKind::Blur => self.on_blur(event),
        }
    }

    /// Fires every timer due at or before `now`, in deadline order.
    pub fn advance(&mut self, now: u64) {
        while let Some(expired) = self.timers.pop_due(now) {
            self.now = self.now.max(expired.deadline);
            match expired.payload {
                PressTimer::Activate(event) => {
                    self.activate_timer = None;
                    tracing::trace!(at = expired.deadline, "press-in delay elapsed");
                    self.receive_signal(Signal::Delay, &event);
                }
                PressTimer::LongPress(event) => {
                    self.long_press_timer = None;
                    tracing::trace!(at = expired.deadline, "long press detected");
                    self.receive_signal(Signal::LongPressDetected, &event);
                }
                PressTimer::PressOut { event, then_press } => {
                    self.press_out_timer = None;
                    self.finish_press_out(&event, then_press);
                }
            }
        }
        self.now = self.now.max(now);
    }

    /// The element became the responder.
    pub fn on_responder_grant(&mut self, event: &InteractionEvent) {
        self.advance(event.timestamp);
        self.flush_press_out();
        self.receive_signal(Signal::ResponderGrant, event);
    }

    /// The pointer moved.
    pub fn on_responder_move(&mut self, event: &InteractionEvent) {
        self.advance(event.timestamp);
        if matches!(self.cycle.source, Some(PressSource::Keyboard(_))) {
            return;
        }
        let Some(position) = event.position else {
            return;
        };
        self.check_long_press_slop(position);
        let signal = if region_contains(self.cycle.region, position) {
            Signal::EnterPressRect
        } else {
            Signal::LeavePressRect
        };
        self.receive_signal(signal, event);
    }

    /// The pointer was released.
    ///
    /// A release position outside the region is applied as a leave first,
    /// so the release is evaluated from the out-of-region state.
    pub fn on_responder_release(&mut self, event: &InteractionEvent) {
        self.advance(event.timestamp);
        if matches!(self.cycle.source, Some(PressSource::Keyboard(_))) {
            return;
        }
        if let Some(position) = event.position {
            if self.state.is_responder() && !region_contains(self.cycle.region, position) {
                self.receive_signal(Signal::LeavePressRect, event);
            }
        }
        self.receive_signal(Signal::ResponderRelease, event);
    }

    /// The gesture was taken away.
    pub fn on_responder_terminate(&mut self, event: &InteractionEvent) {
        self.advance(event.timestamp);
        self.receive_signal(Signal::ResponderTerminated, event);
    }

    /// A key went down.
    pub fn on_key_down(&mut self, event: &InteractionEvent) {
        self.advance(event.timestamp);
        if self.config.disabled {
            self.clear_press();
            return;
        }
        let Some(key) = event.key.as_ref() else {
            return;
        };
        if self.config.valid_keys_down.contains(key) {
            fire(&mut self.config.on_key_down, event);
        }
        if self.config.press_keys.contains(key) && self.state == TouchState::NotResponder {
            self.flush_press_out();
            self.receive_signal(Signal::ResponderGrant, event);
        }
    }

    /// A key went up.
    pub fn on_key_up(&mut self, event: &InteractionEvent) {
        self.advance(event.timestamp);
        if self.config.disabled {
            self.clear_press();
            return;
        }
        let Some(key) = event.key.as_ref() else {
            return;
        };
        if self.config.valid_keys_up.contains(key) {
            fire(&mut self.config.on_key_up, event);
        }
        if matches!(&self.cycle.source, Some(PressSource::Keyboard(k)) if k == key) {
            self.receive_signal(Signal::ResponderRelease, event);
        }
    }

    /// The element gained focus.
    pub fn on_focus(&mut self, event: &InteractionEvent) {
        self.advance(event.timestamp);
        if self.config.disabled {
            self.clear_press();
            return;
        }
        fire(&mut self.config.on_focus, event);
    }

    /// The element lost focus; a keyboard press in progress is terminated.
    pub fn on_blur(&mut self, event: &InteractionEvent) {
        self.advance(event.timestamp);
        if self.config.disabled {
            self.clear_press();
            return;
        }
        fire(&mut self.config.on_blur, event);
        if matches!(self.cycle.source, Some(PressSource::Keyboard(_))) {
            self.receive_signal(Signal::ResponderTerminated, event);
        }
    }

    fn receive_signal(&mut self, signal: Signal, event: &InteractionEvent) {
        if self.config.disabled {
            self.clear_press();
            return;
        }
        let prev = self.state;
        match transition(prev, signal) {
            Ok(next) => {
                if next != prev {
                    self.state = next;
                    self.perform_transition(prev, next, signal, event);
                }
            }
            Err(err) => {
                tracing::warn!(state = ?err.state, signal = ?err.signal, "{err}; resetting");
                self.state = TouchState::Error;
                self.recover(event);
                if signal == Signal::ResponderGrant {
                    self.receive_signal(signal, event);
                }
            }
        }
    }

    fn perform_transition(
        &mut self,
        prev: TouchState,
        next: TouchState,
        signal: Signal,
        event: &InteractionEvent,
    ) {
        match signal {
            Signal::ResponderGrant => self.start_cycle(event),
            Signal::Delay => {
                self.cycle.activated_at = Some(self.now);
                self.cycle.origin = event.position;
                if next.is_active() {
                    self.press_in(event);
                    self.arm_long_press(event);
                }
            }
            Signal::EnterPressRect => {
                if prev == TouchState::ResponderActivePressOut {
                    if !self.cycle.press_in_fired {
                        self.press_in(event);
                    }
                    self.arm_long_press(event);
                }
            }
            Signal::LeavePressRect => {
                if prev.is_active() {
                    self.cancel_long_press();
                    self.press_out_now(event);
                }
            }
            Signal::LongPressDetected => fire(&mut self.config.on_long_press, event),
            Signal::ResponderRelease | Signal::ResponderTerminated => {
                self.end_cycle(prev, signal, event);
            }
        }
    }

    fn start_cycle(&mut self, event: &InteractionEvent) {
        let source = match (event.kind, &event.key) {
            (EventKind::KeyDown, Some(key)) => PressSource::Keyboard(key.clone()),
            _ => PressSource::Pointer,
        };
        let region = match source {
            PressSource::Pointer => event.bounds.map(|bounds| {
                responder_region(bounds, self.config.hit_slop, self.config.press_rect_offset)
            }),
            PressSource::Keyboard(_) => None,
        };
        self.cycle = Cycle {
            source: Some(source),
            region,
            ..Cycle::default()
        };
        if self.config.delay_press_in == 0 {
            self.receive_signal(Signal::Delay, event);
        } else {
            self.cancel_activation();
            let id = self.timers.schedule(
                self.now,
                self.config.delay_press_in,
                PressTimer::Activate(event.clone()),
            );
            self.activate_timer = Some(id);
        }
    }

    fn end_cycle(&mut self, prev: TouchState, signal: Signal, event: &InteractionEvent) {
        self.cancel_activation();
        self.cancel_long_press();

        // A press released (or non-cancelably terminated) before its press-in
        // delay elapsed is activated on the spot so it still reads as a press.
        let activate_now = prev == TouchState::ResponderInactivePressIn
            && (signal == Signal::ResponderRelease || !self.config.cancelable);
        if activate_now {
            self.cycle.activated_at = Some(self.now);
            self.press_in(event);
        }

        let then_press = signal == Signal::ResponderRelease
            && prev.is_press_in()
            && !(prev == TouchState::ResponderActiveLongPressIn
                && self.config.long_press_cancels_press
                && self.config.on_long_press.is_some());
        self.deactivate(event, then_press);
        self.cycle = Cycle::default();
    }

    fn press_in(&mut self, event: &InteractionEvent) {
        self.cycle.press_in_fired = true;
        self.cycle.pressed_in = true;
        fire(&mut self.config.on_press_in, event);
    }

    fn press_out_now(&mut self, event: &InteractionEvent) {
        if self.cycle.pressed_in {
            self.cycle.pressed_in = false;
            fire(&mut self.config.on_press_out, event);
        }
    }

    /// Delivers press-out at the end of a cycle, honoring the minimum press
    /// duration and the press-out delay, then `on_press` if requested.
    fn deactivate(&mut self, event: &InteractionEvent, then_press: bool) {
        if self.cycle.pressed_in {
            self.cycle.pressed_in = false;
            let activated_at = self.cycle.activated_at.unwrap_or(self.now);
            let held = self.now.saturating_sub(activated_at);
            let delay = self
                .config
                .min_press_duration
                .saturating_sub(held)
                .max(self.config.delay_press_out);
            if delay > 0 {
                self.flush_press_out();
                let id = self.timers.schedule(
                    self.now,
                    delay,
                    PressTimer::PressOut {
                        event: event.clone(),
                        then_press,
                    },
                );
                self.press_out_timer = Some(id);
                return;
            }
            fire(&mut self.config.on_press_out, event);
        }
        if then_press {
            fire(&mut self.config.on_press, event);
        }
    }

    fn finish_press_out(&mut self, event: &InteractionEvent, then_press: bool) {
        if self.config.disabled {
            return;
        }
        fire(&mut self.config.on_press_out, event);
        if then_press {
            fire(&mut self.config.on_press, event);
        }
    }

    /// Delivers a pending delayed press-out immediately.
    fn flush_press_out(&mut self) {
        if let Some(id) = self.press_out_timer.take() {
            if let Some(PressTimer::PressOut { event, then_press }) = self.timers.cancel(id) {
                self.finish_press_out(&event, then_press);
            }
        }
    }

    fn arm_long_press(&mut self, event: &InteractionEvent) {
        self.cancel_long_press();
        let id = self.timers.schedule(
            self.now,
            self.config.delay_long_press,
            PressTimer::LongPress(event.clone()),
        );
        self.long_press_timer = Some(id);
    }

    fn check_long_press_slop(&mut self, position: Point) {
        if self.state != TouchState::ResponderActivePressIn {
            return;
        }
        if let (Some(slop), Some(origin)) = (self.config.long_press_slop, self.cycle.origin) {
            if origin.distance(position) > slop {
                self.cancel_long_press();
            }
        }
    }

    fn cancel_activation(&mut self) {
        if let Some(id) = self.activate_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn cancel_long_press(&mut self) {
        if let Some(id) = self.long_press_timer.take() {
            self.timers.cancel(id);
        }
    }

    /// Returns to idle after an invalid signal, keeping press-in/press-out balanced.
    fn recover(&mut self, event: &InteractionEvent) {
        self.cancel_activation();
        self.cancel_long_press();
        self.flush_press_out();
        self.press_out_now(event);
        self.cycle = Cycle::default();
        self.state = TouchState::NotResponder;
    }

    /// Drops the press in progress without delivering anything.
    fn clear_press(&mut self) {
        self.timers.clear();
        self.activate_timer = None;
        self.long_press_timer = None;
        self.press_out_timer = None;
        self.cycle = Cycle::default();
        self.state = TouchState::NotResponder;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 50.0)
    }

    fn grant(t: u64) -> InteractionEvent {
        InteractionEvent::grant(Point::new(50.0, 25.0), bounds(), t)
    }

    #[test]
    fn zero_delay_grant_activates_synchronously() {
        let mut p = Pressability::default();
        p.handle(&grant(0));
        assert_eq!(p.touch_state(), TouchState::ResponderActivePressIn);
        assert!(p.is_pressed_in());
        assert!(p.next_deadline().is_some(), "long press armed");
    }

    #[test]
    fn delayed_grant_waits_in_inactive_state() {
        let mut p = Pressability::new(PressConfig::default().with_delay_press_in(100));
        p.handle(&grant(0));
        assert_eq!(p.touch_state(), TouchState::ResponderInactivePressIn);
        assert_eq!(p.next_deadline(), Some(100));

        p.advance(100);
        assert_eq!(p.touch_state(), TouchState::ResponderActivePressIn);
        assert_eq!(p.next_deadline(), Some(600), "long press counts from activation");
    }

    #[test]
    fn stray_release_recovers_to_idle() {
        let mut p = Pressability::default();
        p.handle(&InteractionEvent::release(Point::new(0.0, 0.0), 0));
        assert_eq!(p.touch_state(), TouchState::NotResponder);
    }

    #[test]
    fn double_grant_recovers_and_starts_new_cycle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());
        let mut p = Pressability::new(
            PressConfig::default()
                .on_press_in(move |_| a.borrow_mut().push("in"))
                .on_press_out(move |_| b.borrow_mut().push("out")),
        );
        p.handle(&grant(0));
        p.handle(&grant(10));
        assert_eq!(p.touch_state(), TouchState::ResponderActivePressIn);
        assert_eq!(*log.borrow(), ["in", "out", "in"]);
    }

    #[test]
    fn termination_request_follows_cancelable() {
        let p = Pressability::new(PressConfig::default().with_cancelable(false));
        assert!(!p.on_responder_termination_request());
        assert!(p.should_set_responder());

        let p = Pressability::new(PressConfig::default().with_disabled(true));
        assert!(p.on_responder_termination_request());
        assert!(!p.should_set_responder());
    }

    #[test]
    fn long_press_slop_cancels_pending_long_press() {
        let mut p = Pressability::new(PressConfig::default().with_long_press_slop(10.0));
        p.handle(&grant(0));
        p.handle(&InteractionEvent::moved(Point::new(70.0, 25.0), 50));
        assert_eq!(p.next_deadline(), None);
        p.advance(1_000);
        assert_eq!(p.touch_state(), TouchState::ResponderActivePressIn);
    }

    #[test]
    fn reset_clears_everything() {
        let mut p = Pressability::new(PressConfig::default().with_delay_press_in(50));
        p.handle(&grant(0));
        p.reset();
        assert_eq!(p.touch_state(), TouchState::NotResponder);
        assert_eq!(p.next_deadline(), None);
        assert!(p.config().on_press.is_none());
    }
}

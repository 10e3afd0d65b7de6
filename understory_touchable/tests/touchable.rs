// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opacity feedback scenarios for `understory_touchable`.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_press::{InteractionEvent, Key, TouchState};
use understory_touchable::{
    StyleFragment, TouchableOpacity, TouchableOptions, TouchableView, render,
};

type Log = Rc<RefCell<Vec<&'static str>>>;

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 120.0, 44.0)
}

fn inside() -> Point {
    Point::new(60.0, 22.0)
}

fn outside() -> Point {
    Point::new(600.0, 600.0)
}

fn grant(t: u64) -> InteractionEvent {
    InteractionEvent::grant(inside(), bounds(), t)
}

fn recorded(options: TouchableOptions, log: &Log) -> TouchableOptions {
    let rec = |name: &'static str| {
        let log = log.clone();
        move |_: &InteractionEvent| log.borrow_mut().push(name)
    };
    options
        .on_press_in(rec("in"))
        .on_press_out(rec("out"))
        .on_press(rec("press"))
        .on_long_press(rec("long"))
        .on_focus(rec("focus"))
        .on_blur(rec("blur"))
}

fn touchable(options: TouchableOptions) -> (TouchableOpacity, Log) {
    let log: Log = Rc::default();
    (TouchableOpacity::new(recorded(options, &log)), log)
}

fn taken(log: &Log) -> Vec<&'static str> {
    core::mem::take(&mut *log.borrow_mut())
}

fn assert_near(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected opacity {expected}, got {actual}"
    );
}

#[test]
fn grant_dims_immediately() {
    let (mut t, log) = touchable(TouchableOptions::default());
    t.handle(&grant(0));
    assert_eq!(taken(&log), ["in"]);
    assert_eq!(t.opacity(), 0.2);
    assert!(!t.is_animating());
}

#[test]
fn release_restores_over_quarter_second_then_presses() {
    let (mut t, log) = touchable(TouchableOptions::default());
    t.handle(&grant(0));
    t.handle(&InteractionEvent::release(inside(), 100));
    assert_eq!(taken(&log), ["in", "out", "press"]);

    assert_eq!(t.opacity(), 0.2, "the fade starts at the release");
    t.advance(100);
    assert_near(t.advance(225), 0.6);
    assert_eq!(t.advance(350), 1.0);
    assert!(!t.is_animating());
}

#[test]
fn long_press_does_not_suppress_press() {
    let (mut t, log) = touchable(TouchableOptions::default());
    t.handle(&grant(0));
    assert_eq!(t.next_deadline(), Some(500));
    t.advance(500);
    assert_eq!(taken(&log), ["in", "long"]);
    assert_eq!(t.opacity(), 0.2);

    t.handle(&InteractionEvent::release(inside(), 600));
    assert_eq!(taken(&log), ["out", "press"]);
}

#[test]
fn release_before_long_press_threshold_skips_long_press() {
    let (mut t, log) = touchable(TouchableOptions::default().with_delay_long_press(300));
    t.handle(&grant(0));
    t.handle(&InteractionEvent::release(inside(), 299));
    t.advance(1_000);
    assert_eq!(taken(&log), ["in", "out", "press"]);
}

#[test]
fn disabling_mid_press_silences_callbacks_and_restores_opacity() {
    let (mut t, log) = touchable(TouchableOptions::default());
    t.handle(&grant(0));
    assert_eq!(taken(&log), ["in"]);

    t.on_config_changed(recorded(TouchableOptions::default().with_disabled(true), &log));
    assert!(t.is_animating());

    t.handle(&InteractionEvent::release(inside(), 100));
    assert!(taken(&log).is_empty());
    assert_eq!(t.pressability().touch_state(), TouchState::NotResponder);

    t.advance(100);
    assert_eq!(t.advance(350), 1.0);

    t.handle(&grant(400));
    t.handle(&InteractionEvent::release(inside(), 450));
    assert!(taken(&log).is_empty());
    assert_eq!(t.opacity(), 1.0);
}

#[test]
fn re_enabling_also_restores_opacity() {
    let (mut t, _log) = touchable(TouchableOptions::default().with_disabled(true));
    t.on_config_changed(TouchableOptions::default());
    assert!(t.is_animating());
    assert!(t.pressability().should_set_responder());
}

#[test]
fn style_opacity_is_the_resting_value() {
    let style = StyleFragment::new().with("opacity", 0.6);
    let (mut t, _log) = touchable(TouchableOptions::default().with_style(style));
    assert_eq!(t.opacity(), 0.6);

    t.handle(&grant(0));
    assert_eq!(t.opacity(), 0.2);

    t.handle(&InteractionEvent::release(inside(), 50));
    t.advance(50);
    assert_eq!(t.advance(300), 0.6);
}

#[test]
fn active_opacity_is_configurable() {
    let (mut t, _log) = touchable(TouchableOptions::default().with_active_opacity(0.5));
    t.handle(&grant(0));
    assert_eq!(t.opacity(), 0.5);
}

#[test]
fn leaving_the_region_restores_opacity_early() {
    let (mut t, log) = touchable(TouchableOptions::default());
    t.handle(&grant(0));
    t.handle(&InteractionEvent::moved(outside(), 20));
    assert_eq!(taken(&log), ["in", "out"]);
    assert_eq!(t.animated_opacity().target(), 1.0);

    t.handle(&InteractionEvent::moved(inside(), 40));
    assert!(taken(&log).is_empty(), "no second press-in");
    t.handle(&InteractionEvent::release(inside(), 60));
    assert_eq!(taken(&log), ["press"]);
}

#[test]
fn release_outside_skips_press() {
    let (mut t, log) = touchable(TouchableOptions::default());
    t.handle(&grant(0));
    t.handle(&InteractionEvent::release(outside(), 60));
    assert_eq!(taken(&log), ["in", "out"]);
}

#[test]
fn keyboard_press_dims_over_150ms() {
    let (mut t, log) = touchable(TouchableOptions::default().with_press_keys([Key::ENTER]));
    t.handle(&InteractionEvent::key_down(Key::ENTER, 0));
    assert_eq!(taken(&log), ["in"]);
    assert!(t.is_animating());
    assert_eq!(t.opacity(), 1.0);

    t.advance(0);
    assert_eq!(t.advance(150), 0.2);

    t.handle(&InteractionEvent::key_up(Key::ENTER, 200));
    assert_eq!(taken(&log), ["out", "press"]);
}

#[test]
fn focus_drives_opacity_when_enabled() {
    let (mut t, log) = touchable(TouchableOptions::default().with_focus_drives_opacity(true));
    t.handle(&InteractionEvent::focus(0));
    assert_eq!(taken(&log), ["focus"]);
    t.advance(0);
    assert_eq!(t.advance(150), 0.2);

    t.handle(&InteractionEvent::blur(200));
    assert_eq!(taken(&log), ["blur"]);
    t.advance(200);
    assert_eq!(t.advance(450), 1.0);
}

#[test]
fn focus_is_forwarded_without_feedback_by_default() {
    let (mut t, log) = touchable(TouchableOptions::default());
    t.handle(&InteractionEvent::focus(0));
    assert_eq!(taken(&log), ["focus"]);
    assert!(!t.is_animating());
    assert_eq!(t.opacity(), 1.0);
}

#[test]
fn rejecting_termination_keeps_the_gesture() {
    let (t, _log) = touchable(TouchableOptions::default().with_reject_responder_termination(true));
    assert!(!t.pressability().on_responder_termination_request());
}

#[test]
fn configured_press_delays_pass_through() {
    let (mut t, log) = touchable(
        TouchableOptions::default()
            .with_delay_press_in(50)
            .with_delay_press_out(80),
    );
    t.handle(&grant(0));
    assert!(taken(&log).is_empty());
    t.advance(50);
    assert_eq!(taken(&log), ["in"]);
    assert_eq!(t.opacity(), 0.2, "press-in from the grant event is instant");

    t.handle(&InteractionEvent::release(inside(), 60));
    assert!(taken(&log).is_empty());
    t.advance(140);
    assert_eq!(taken(&log), ["out", "press"]);
}

#[test]
fn dispose_silences_everything() {
    let (mut t, log) = touchable(TouchableOptions::default());
    t.handle(&grant(0));
    taken(&log);
    t.on_dispose();
    assert_eq!(t.next_deadline(), None);

    t.handle(&InteractionEvent::release(inside(), 50));
    t.handle(&grant(100));
    t.advance(2_000);
    t.handle(&InteractionEvent::release(inside(), 2_100));
    assert!(taken(&log).is_empty());
}

#[test]
fn render_reflects_current_opacity() {
    let (mut t, _log) = touchable(TouchableOptions::default().with_test_id("ok"));
    t.handle(&grant(0));
    let view: TouchableView = render(&t, 0);
    assert_eq!(view.opacity, 0.2);
    assert_eq!(view.test_id.as_deref(), Some("ok"));
    assert!(view.handlers.get("onResponderRelease").is_some());
}

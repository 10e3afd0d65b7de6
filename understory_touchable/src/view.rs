// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a host needs to draw and wire one touchable element.

use alloc::borrow::Cow;

use understory_press::{EdgeInsets, EventHandlers};

use crate::controller::TouchableOpacity;
use crate::style::Style;

/// A description of a touchable element for the host's view layer.
#[derive(Clone, Debug)]
pub struct TouchableView {
    /// Opacity to compose over the element's own style.
    pub opacity: f64,
    /// The element's declared style.
    pub style: Option<Style>,
    /// Touch region extension for the host's hit testing.
    pub hit_slop: Option<EdgeInsets>,
    /// Whether the element is an accessibility element.
    pub accessible: bool,
    /// Accessibility label.
    pub accessibility_label: Option<Cow<'static, str>>,
    /// Accessibility hint.
    pub accessibility_hint: Option<Cow<'static, str>>,
    /// Accessibility role.
    pub accessibility_role: Option<Cow<'static, str>>,
    /// Whether the element takes keyboard focus.
    pub focusable: bool,
    /// Whether the host should draw a focus ring.
    pub enable_focus_ring: bool,
    /// Whether a click on an inactive window also reaches the element.
    pub accepts_first_mouse: bool,
    /// Tooltip text.
    pub tooltip: Option<Cow<'static, str>>,
    /// Native view identifier.
    pub native_id: Option<Cow<'static, str>>,
    /// Identifier for test harnesses.
    pub test_id: Option<Cow<'static, str>>,
    /// Raw event entry points into the press machine.
    pub handlers: EventHandlers,
}

/// Describes `touchable` as of `now`.
///
/// Apart from sampling the opacity at `now` this reads the controller only.
/// Sampling starts a fade that was requested since the last tick, so the first
/// call after a press-out fixes that fade's start time.
pub fn render(touchable: &TouchableOpacity, now: u64) -> TouchableView {
    let options = touchable.options();
    // Interactive affordances are off while disabled, whatever was requested.
    let enabled_unless_off = |flag: Option<bool>| flag != Some(false) && !options.disabled;
    TouchableView {
        opacity: touchable.animated_opacity().tick(now),
        style: options.style.clone(),
        hit_slop: options.hit_slop,
        accessible: options.accessible != Some(false),
        accessibility_label: options.accessibility_label.clone(),
        accessibility_hint: options.accessibility_hint.clone(),
        accessibility_role: options.accessibility_role.clone(),
        focusable: enabled_unless_off(options.focusable),
        enable_focus_ring: enabled_unless_off(options.enable_focus_ring),
        accepts_first_mouse: enabled_unless_off(options.accepts_first_mouse),
        tooltip: options.tooltip.clone(),
        native_id: options.native_id.clone(),
        test_id: options.test_id.clone(),
        handlers: touchable.pressability().event_handlers(),
    }
}

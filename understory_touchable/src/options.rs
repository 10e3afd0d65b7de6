// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller options and their binding to a [`PressConfig`].

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use understory_press::{
    Callback, DEFAULT_DELAY_LONG_PRESS, EdgeInsets, EventKind, InteractionEvent, Key, KeySet,
    PressConfig,
};

use crate::animated::AnimatedOpacity;
use crate::style::{Style, resting_opacity};

/// Opacity while pressed, unless overridden.
pub const DEFAULT_ACTIVE_OPACITY: f64 = 0.2;

/// Duration of the dimming animation for press-ins not caused by a bare grant.
pub const ACTIVE_DURATION: u64 = 150;

/// Duration of the animation back to resting opacity.
pub const INACTIVE_DURATION: u64 = 250;

/// Options for a [`TouchableOpacity`](crate::TouchableOpacity).
///
/// `None` durations fall back to the press machine's defaults.
#[derive(Default)]
pub struct TouchableOptions {
    /// Ignore presses and render as not focusable.
    pub disabled: bool,
    /// Extends the touchable region beyond the element's bounds.
    pub hit_slop: Option<EdgeInsets>,
    /// How far the pointer may drift after press-in before the press is out.
    pub press_retention_offset: Option<EdgeInsets>,
    /// Milliseconds from press-in until long press.
    pub delay_long_press: Option<u64>,
    /// Milliseconds between grant and press-in.
    pub delay_press_in: Option<u64>,
    /// Milliseconds between release and press-out.
    pub delay_press_out: Option<u64>,
    /// Opacity while pressed; defaults to [`DEFAULT_ACTIVE_OPACITY`].
    pub active_opacity: Option<f64>,
    /// Keys forwarded to `on_key_down`.
    pub valid_keys_down: KeySet,
    /// Keys forwarded to `on_key_up`.
    pub valid_keys_up: KeySet,
    /// Keys that press the element while it has focus.
    pub press_keys: KeySet,
    /// Keep the gesture even when another responder asks for it.
    pub reject_responder_termination: bool,
    /// Dim on focus and restore on blur, for hosts with a persistent focus ring.
    pub focus_drives_opacity: bool,
    /// Declared style; its `opacity` is the resting opacity.
    pub style: Option<Style>,
    /// Whether the element is an accessibility element; `None` means yes.
    pub accessible: Option<bool>,
    /// Accessibility label.
    pub accessibility_label: Option<Cow<'static, str>>,
    /// Accessibility hint.
    pub accessibility_hint: Option<Cow<'static, str>>,
    /// Accessibility role.
    pub accessibility_role: Option<Cow<'static, str>>,
    /// Whether the element takes keyboard focus; `None` means yes.
    pub focusable: Option<bool>,
    /// Whether the host draws a focus ring; `None` means yes.
    pub enable_focus_ring: Option<bool>,
    /// Whether a click on an inactive window also presses; `None` means yes.
    pub accepts_first_mouse: Option<bool>,
    /// Tooltip text.
    pub tooltip: Option<Cow<'static, str>>,
    /// Native view identifier.
    pub native_id: Option<Cow<'static, str>>,
    /// Identifier for test harnesses.
    pub test_id: Option<Cow<'static, str>>,
    /// Called when a press completes inside the element.
    pub on_press: Option<Callback>,
    /// Called when the element starts looking pressed.
    pub on_press_in: Option<Callback>,
    /// Called when the element stops looking pressed.
    pub on_press_out: Option<Callback>,
    /// Called when the press is held past the long-press threshold.
    pub on_long_press: Option<Callback>,
    /// Called on focus.
    pub on_focus: Option<Callback>,
    /// Called on blur.
    pub on_blur: Option<Callback>,
    /// Called for keys in `valid_keys_down`.
    pub on_key_down: Option<Callback>,
    /// Called for keys in `valid_keys_up`.
    pub on_key_up: Option<Callback>,
}

impl fmt::Debug for TouchableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callbacks = [
            &self.on_press,
            &self.on_press_in,
            &self.on_press_out,
            &self.on_long_press,
            &self.on_focus,
            &self.on_blur,
            &self.on_key_down,
            &self.on_key_up,
        ]
        .into_iter()
        .filter(|cb| cb.is_some())
        .count();
        f.debug_struct("TouchableOptions")
            .field("disabled", &self.disabled)
            .field("hit_slop", &self.hit_slop)
            .field("press_retention_offset", &self.press_retention_offset)
            .field("delay_long_press", &self.delay_long_press)
            .field("delay_press_in", &self.delay_press_in)
            .field("delay_press_out", &self.delay_press_out)
            .field("active_opacity", &self.active_opacity)
            .field("valid_keys_down", &self.valid_keys_down)
            .field("valid_keys_up", &self.valid_keys_up)
            .field("press_keys", &self.press_keys)
            .field("reject_responder_termination", &self.reject_responder_termination)
            .field("focus_drives_opacity", &self.focus_drives_opacity)
            .field("style", &self.style)
            .field("accessible", &self.accessible)
            .field("accessibility_label", &self.accessibility_label)
            .field("accessibility_hint", &self.accessibility_hint)
            .field("accessibility_role", &self.accessibility_role)
            .field("focusable", &self.focusable)
            .field("enable_focus_ring", &self.enable_focus_ring)
            .field("accepts_first_mouse", &self.accepts_first_mouse)
            .field("tooltip", &self.tooltip)
            .field("native_id", &self.native_id)
            .field("test_id", &self.test_id)
            .field("callbacks", &callbacks)
            .finish()
    }
}

macro_rules! callback_setters {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Sets `", stringify!($name), "`.")]
            #[must_use]
            pub fn $name(mut self, f: impl FnMut(&InteractionEvent) + 'static) -> Self {
                self.$name = Some(Box::new(f));
                self
            }
        )*
    };
}

impl TouchableOptions {
    /// Sets `disabled`.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets `hit_slop`.
    #[must_use]
    pub fn with_hit_slop(mut self, hit_slop: EdgeInsets) -> Self {
        self.hit_slop = Some(hit_slop);
        self
    }

    /// Sets `press_retention_offset`.
    #[must_use]
    pub fn with_press_retention_offset(mut self, offset: EdgeInsets) -> Self {
        self.press_retention_offset = Some(offset);
        self
    }

    /// Sets `delay_long_press`.
    #[must_use]
    pub fn with_delay_long_press(mut self, ms: u64) -> Self {
        self.delay_long_press = Some(ms);
        self
    }

    /// Sets `delay_press_in`.
    #[must_use]
    pub fn with_delay_press_in(mut self, ms: u64) -> Self {
        self.delay_press_in = Some(ms);
        self
    }

    /// Sets `delay_press_out`.
    #[must_use]
    pub fn with_delay_press_out(mut self, ms: u64) -> Self {
        self.delay_press_out = Some(ms);
        self
    }

    /// Sets `active_opacity`.
    #[must_use]
    pub fn with_active_opacity(mut self, opacity: f64) -> Self {
        self.active_opacity = Some(opacity);
        self
    }

    /// Sets `valid_keys_down`.
    #[must_use]
    pub fn with_valid_keys_down(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.valid_keys_down = keys.into_iter().collect();
        self
    }

    /// Sets `valid_keys_up`.
    #[must_use]
    pub fn with_valid_keys_up(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.valid_keys_up = keys.into_iter().collect();
        self
    }

    /// Sets `press_keys`.
    #[must_use]
    pub fn with_press_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.press_keys = keys.into_iter().collect();
        self
    }

    /// Sets `reject_responder_termination`.
    #[must_use]
    pub fn with_reject_responder_termination(mut self, reject: bool) -> Self {
        self.reject_responder_termination = reject;
        self
    }

    /// Sets `focus_drives_opacity`.
    #[must_use]
    pub fn with_focus_drives_opacity(mut self, enabled: bool) -> Self {
        self.focus_drives_opacity = enabled;
        self
    }

    /// Sets `style`.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets `accessible`.
    #[must_use]
    pub fn with_accessible(mut self, accessible: bool) -> Self {
        self.accessible = Some(accessible);
        self
    }

    /// Sets `accessibility_label`.
    #[must_use]
    pub fn with_accessibility_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.accessibility_label = Some(label.into());
        self
    }

    /// Sets `focusable`.
    #[must_use]
    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.focusable = Some(focusable);
        self
    }

    /// Sets `accessibility_hint`.
    #[must_use]
    pub fn with_accessibility_hint(mut self, hint: impl Into<Cow<'static, str>>) -> Self {
        self.accessibility_hint = Some(hint.into());
        self
    }

    /// Sets `accessibility_role`.
    #[must_use]
    pub fn with_accessibility_role(mut self, role: impl Into<Cow<'static, str>>) -> Self {
        self.accessibility_role = Some(role.into());
        self
    }

    /// Sets `enable_focus_ring`.
    #[must_use]
    pub fn with_enable_focus_ring(mut self, enabled: bool) -> Self {
        self.enable_focus_ring = Some(enabled);
        self
    }

    /// Sets `accepts_first_mouse`.
    #[must_use]
    pub fn with_accepts_first_mouse(mut self, accepts: bool) -> Self {
        self.accepts_first_mouse = Some(accepts);
        self
    }

    /// Sets `tooltip`.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<Cow<'static, str>>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Sets `native_id`.
    #[must_use]
    pub fn with_native_id(mut self, id: impl Into<Cow<'static, str>>) -> Self {
        self.native_id = Some(id.into());
        self
    }

    /// Sets `test_id`.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<Cow<'static, str>>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    callback_setters!(
        on_press,
        on_press_in,
        on_press_out,
        on_long_press,
        on_focus,
        on_blur,
        on_key_down,
        on_key_up,
    );

    /// The opacity the element rests at, from its declared style.
    pub fn resting_opacity(&self) -> f64 {
        resting_opacity(self.style.as_ref())
    }

    /// A copy of every non-callback option.
    pub(crate) fn without_callbacks(&self) -> Self {
        Self {
            disabled: self.disabled,
            hit_slop: self.hit_slop,
            press_retention_offset: self.press_retention_offset,
            delay_long_press: self.delay_long_press,
            delay_press_in: self.delay_press_in,
            delay_press_out: self.delay_press_out,
            active_opacity: self.active_opacity,
            valid_keys_down: self.valid_keys_down.clone(),
            valid_keys_up: self.valid_keys_up.clone(),
            press_keys: self.press_keys.clone(),
            reject_responder_termination: self.reject_responder_termination,
            focus_drives_opacity: self.focus_drives_opacity,
            style: self.style.clone(),
            accessible: self.accessible,
            accessibility_label: self.accessibility_label.clone(),
            accessibility_hint: self.accessibility_hint.clone(),
            accessibility_role: self.accessibility_role.clone(),
            focusable: self.focusable,
            enable_focus_ring: self.enable_focus_ring,
            accepts_first_mouse: self.accepts_first_mouse,
            tooltip: self.tooltip.clone(),
            native_id: self.native_id.clone(),
            test_id: self.test_id.clone(),
            ..Self::default()
        }
    }
}

/// Drives an [`AnimatedOpacity`] between active and resting values.
#[derive(Clone, Debug)]
pub struct OpacityFeedback {
    anim: AnimatedOpacity,
    active_opacity: f64,
    resting_opacity: f64,
}

impl OpacityFeedback {
    /// Feedback for `anim` derived from `options`.
    pub fn new(anim: AnimatedOpacity, options: &TouchableOptions) -> Self {
        Self {
            anim,
            active_opacity: options.active_opacity.unwrap_or(DEFAULT_ACTIVE_OPACITY),
            resting_opacity: options.resting_opacity(),
        }
    }

    /// Opacity while pressed.
    pub fn active_opacity(&self) -> f64 {
        self.active_opacity
    }

    /// Opacity at rest.
    pub fn resting_opacity(&self) -> f64 {
        self.resting_opacity
    }

    /// Animates toward the active opacity.
    pub fn activate(&self, duration: u64) {
        self.anim.animate_to(self.active_opacity, duration);
    }

    /// Animates back to the resting opacity.
    pub fn deactivate(&self, duration: u64) {
        self.anim.animate_to(self.resting_opacity, duration);
    }
}

fn chain(
    mut user: Option<Callback>,
    mut feedback: impl FnMut(&InteractionEvent) + 'static,
) -> Callback {
    Box::new(move |event: &InteractionEvent| {
        feedback(event);
        if let Some(callback) = user.as_mut() {
            callback(event);
        }
    })
}

/// Builds the press machine configuration for `options`.
///
/// Callbacks are moved out of `options`. Press-in and press-out are wrapped so
/// they drive `feedback` before reaching the caller:
///
/// - press-in dims immediately when caused by a responder grant, and over
///   [`ACTIVE_DURATION`] otherwise;
/// - press-out restores over [`INACTIVE_DURATION`];
/// - with `focus_drives_opacity`, focus and blur do the same.
///
/// The minimum press duration is always zero.
pub fn build_press_config(
    options: &mut TouchableOptions,
    feedback: &OpacityFeedback,
) -> PressConfig {
    let on_press_in = {
        let feedback = feedback.clone();
        chain(options.on_press_in.take(), move |event| {
            let duration = if event.kind == EventKind::ResponderGrant {
                0
            } else {
                ACTIVE_DURATION
            };
            feedback.activate(duration);
        })
    };
    let on_press_out = {
        let feedback = feedback.clone();
        chain(options.on_press_out.take(), move |_| {
            feedback.deactivate(INACTIVE_DURATION);
        })
    };
    let (on_focus, on_blur) = if options.focus_drives_opacity {
        let (focus, blur) = (feedback.clone(), feedback.clone());
        (
            Some(chain(options.on_focus.take(), move |_| {
                focus.activate(ACTIVE_DURATION);
            })),
            Some(chain(options.on_blur.take(), move |_| {
                blur.deactivate(INACTIVE_DURATION);
            })),
        )
    } else {
        (options.on_focus.take(), options.on_blur.take())
    };

    PressConfig {
        disabled: options.disabled,
        cancelable: !options.reject_responder_termination,
        hit_slop: options.hit_slop,
        press_rect_offset: options.press_retention_offset,
        delay_press_in: options.delay_press_in.unwrap_or(0),
        delay_press_out: options.delay_press_out.unwrap_or(0),
        delay_long_press: options.delay_long_press.unwrap_or(DEFAULT_DELAY_LONG_PRESS),
        min_press_duration: 0,
        valid_keys_down: options.valid_keys_down.clone(),
        valid_keys_up: options.valid_keys_up.clone(),
        press_keys: options.press_keys.clone(),
        on_press_in: Some(on_press_in),
        on_press_out: Some(on_press_out),
        on_press: options.on_press.take(),
        on_long_press: options.on_long_press.take(),
        on_focus,
        on_blur,
        on_key_down: options.on_key_down.take(),
        on_key_up: options.on_key_up.take(),
        ..PressConfig::default()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative configuration for a [`Pressability`](crate::Pressability) instance.
//!
//! A [`PressConfig`] is replaced wholesale by
//! [`Pressability::configure`](crate::Pressability::configure); there is no
//! partial update. Build one with struct-update syntax or the chaining
//! `with_*` / `on_*` methods:
//!
//! ```
//! use understory_press::{EdgeInsets, Key, PressConfig};
//!
//! let config = PressConfig::default()
//!     .with_hit_slop(EdgeInsets::uniform(8.0))
//!     .with_delay_long_press(800)
//!     .with_valid_keys_down([Key::ENTER])
//!     .on_press(|_event| { /* submit */ });
//!
//! assert_eq!(config.delay_long_press, 800);
//! assert!(config.on_press.is_some());
//! ```

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::event::{InteractionEvent, Key};
use crate::geometry::EdgeInsets;

/// A caller-supplied callback, invoked with the raw event that caused it.
pub type Callback = Box<dyn FnMut(&InteractionEvent)>;

/// A small set of keyboard keys.
pub type KeySet = SmallVec<[Key; 4]>;

/// Default long-press threshold in milliseconds.
pub const DEFAULT_DELAY_LONG_PRESS: u64 = 500;

/// Default minimum press duration in milliseconds.
pub const DEFAULT_MIN_PRESS_DURATION: u64 = 130;

/// Configuration for one press state machine.
pub struct PressConfig {
    /// Suppress all callbacks and keep the machine idle.
    pub disabled: bool,
    /// Whether the press may be cancelled by responder termination.
    pub cancelable: bool,
    /// Extends the touchable region beyond the element's bounds.
    pub hit_slop: Option<EdgeInsets>,
    /// Additional tolerance after press-in; defaults to
    /// [`DEFAULT_PRESS_RECT_OFFSET`](crate::DEFAULT_PRESS_RECT_OFFSET).
    pub press_rect_offset: Option<EdgeInsets>,
    /// Milliseconds between grant and press-in.
    pub delay_press_in: u64,
    /// Milliseconds between release and press-out.
    pub delay_press_out: u64,
    /// Milliseconds from press-in until long press.
    pub delay_long_press: u64,
    /// Press-out is held back until the press has lasted this long.
    pub min_press_duration: u64,
    /// Keys that reach [`on_key_down`](Self::on_key_down).
    pub valid_keys_down: KeySet,
    /// Keys that reach [`on_key_up`](Self::on_key_up).
    pub valid_keys_up: KeySet,
    /// Keys that act as a press while the element has focus.
    pub press_keys: KeySet,
    /// When set and [`on_long_press`](Self::on_long_press) is present, a
    /// release after the long press does not invoke [`on_press`](Self::on_press).
    pub long_press_cancels_press: bool,
    /// Moving farther than this from the activation point cancels the pending long press.
    pub long_press_slop: Option<f64>,
    /// Called when the press becomes active.
    pub on_press_in: Option<Callback>,
    /// Called when the press stops being active.
    pub on_press_out: Option<Callback>,
    /// Called when a press completes inside the region.
    pub on_press: Option<Callback>,
    /// Called once per press cycle when the long-press threshold is reached.
    pub on_long_press: Option<Callback>,
    /// Called on focus.
    pub on_focus: Option<Callback>,
    /// Called on blur.
    pub on_blur: Option<Callback>,
    /// Called for key presses in [`valid_keys_down`](Self::valid_keys_down).
    pub on_key_down: Option<Callback>,
    /// Called for key releases in [`valid_keys_up`](Self::valid_keys_up).
    pub on_key_up: Option<Callback>,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            cancelable: true,
            hit_slop: None,
            press_rect_offset: None,
            delay_press_in: 0,
            delay_press_out: 0,
            delay_long_press: DEFAULT_DELAY_LONG_PRESS,
            min_press_duration: DEFAULT_MIN_PRESS_DURATION,
            valid_keys_down: KeySet::new(),
            valid_keys_up: KeySet::new(),
            press_keys: KeySet::new(),
            long_press_cancels_press: false,
            long_press_slop: None,
            on_press_in: None,
            on_press_out: None,
            on_press: None,
            on_long_press: None,
            on_focus: None,
            on_blur: None,
            on_key_down: None,
            on_key_up: None,
        }
    }
}

impl fmt::Debug for PressConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn slot(cb: &Option<Callback>) -> &'static str {
            if cb.is_some() { "Some(..)" } else { "None" }
        }
        f.debug_struct("PressConfig")
            .field("disabled", &self.disabled)
            .field("cancelable", &self.cancelable)
            .field("hit_slop", &self.hit_slop)
            .field("press_rect_offset", &self.press_rect_offset)
            .field("delay_press_in", &self.delay_press_in)
            .field("delay_press_out", &self.delay_press_out)
            .field("delay_long_press", &self.delay_long_press)
            .field("min_press_duration", &self.min_press_duration)
            .field("valid_keys_down", &self.valid_keys_down)
            .field("valid_keys_up", &self.valid_keys_up)
            .field("press_keys", &self.press_keys)
            .field("long_press_cancels_press", &self.long_press_cancels_press)
            .field("long_press_slop", &self.long_press_slop)
            .field("on_press_in", &slot(&self.on_press_in))
            .field("on_press_out", &slot(&self.on_press_out))
            .field("on_press", &slot(&self.on_press))
            .field("on_long_press", &slot(&self.on_long_press))
            .field("on_focus", &slot(&self.on_focus))
            .field("on_blur", &slot(&self.on_blur))
            .field("on_key_down", &slot(&self.on_key_down))
            .field("on_key_up", &slot(&self.on_key_up))
            .finish()
    }
}

macro_rules! callback_setters {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(mut self, f: impl FnMut(&InteractionEvent) + 'static) -> Self {
                self.$name = Some(Box::new(f));
                self
            }
        )*
    };
}

impl PressConfig {
    /// Sets [`disabled`](Self::disabled).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets [`cancelable`](Self::cancelable).
    #[must_use]
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Sets [`hit_slop`](Self::hit_slop).
    #[must_use]
    pub fn with_hit_slop(mut self, hit_slop: EdgeInsets) -> Self {
        self.hit_slop = Some(hit_slop);
        self
    }

    /// Sets [`press_rect_offset`](Self::press_rect_offset).
    #[must_use]
    pub fn with_press_rect_offset(mut self, offset: EdgeInsets) -> Self {
        self.press_rect_offset = Some(offset);
        self
    }

    /// Sets [`delay_press_in`](Self::delay_press_in).
    #[must_use]
    pub fn with_delay_press_in(mut self, ms: u64) -> Self {
        self.delay_press_in = ms;
        self
    }

    /// Sets [`delay_press_out`](Self::delay_press_out).
    #[must_use]
    pub fn with_delay_press_out(mut self, ms: u64) -> Self {
        self.delay_press_out = ms;
        self
    }

    /// Sets [`delay_long_press`](Self::delay_long_press).
    #[must_use]
    pub fn with_delay_long_press(mut self, ms: u64) -> Self {
        self.delay_long_press = ms;
        self
    }

    /// Sets [`min_press_duration`](Self::min_press_duration).
    #[must_use]
    pub fn with_min_press_duration(mut self, ms: u64) -> Self {
        self.min_press_duration = ms;
        self
    }

    /// Sets [`valid_keys_down`](Self::valid_keys_down).
    #[must_use]
    pub fn with_valid_keys_down(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.valid_keys_down = keys.into_iter().collect();
        self
    }

    /// Sets [`valid_keys_up`](Self::valid_keys_up).
    #[must_use]
    pub fn with_valid_keys_up(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.valid_keys_up = keys.into_iter().collect();
        self
    }

    /// Sets [`press_keys`](Self::press_keys).
    #[must_use]
    pub fn with_press_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.press_keys = keys.into_iter().collect();
        self
    }

    /// Sets [`long_press_cancels_press`](Self::long_press_cancels_press).
    #[must_use]
    pub fn with_long_press_cancels_press(mut self, cancels: bool) -> Self {
        self.long_press_cancels_press = cancels;
        self
    }

    /// Sets [`long_press_slop`](Self::long_press_slop).
    #[must_use]
    pub fn with_long_press_slop(mut self, slop: f64) -> Self {
        self.long_press_slop = Some(slop);
        self
    }

    callback_setters! {
        /// Sets [`on_press_in`](Self::on_press_in).
        on_press_in;
        /// Sets [`on_press_out`](Self::on_press_out).
        on_press_out;
        /// Sets [`on_press`](Self::on_press).
        on_press;
        /// Sets [`on_long_press`](Self::on_long_press).
        on_long_press;
        /// Sets [`on_focus`](Self::on_focus).
        on_focus;
        /// Sets [`on_blur`](Self::on_blur).
        on_blur;
        /// Sets [`on_key_down`](Self::on_key_down).
        on_key_down;
        /// Sets [`on_key_up`](Self::on_key_up).
        on_key_up;
    }
}

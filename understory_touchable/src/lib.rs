// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touchable --heading-base-level=0

//! Understory Touchable: opacity press feedback on top of `understory_press`.
//!
//! ## Overview
//!
//! [`TouchableOpacity`] binds caller-facing [`TouchableOptions`] to a
//! [`Pressability`](understory_press::Pressability) and dims an
//! [`AnimatedOpacity`] while the element is pressed:
//!
//! - press-in animates to the active opacity (default `0.2`), instantly when
//!   caused by a responder grant and over 150ms otherwise;
//! - press-out animates back to the resting opacity over 250ms;
//! - toggling `disabled` restores the resting opacity.
//!
//! The resting opacity is the numeric `opacity` of the element's declared
//! [`Style`], or `1.0`.
//!
//! Rendering is a plain function: [`render`] reads a controller and returns a
//! [`TouchableView`] for the host's view layer.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_press::InteractionEvent;
//! use understory_touchable::{TouchableOpacity, TouchableOptions, render};
//!
//! let mut button = TouchableOpacity::new(TouchableOptions::default().on_press(|_| {}));
//! assert_eq!(render(&button, 0).opacity, 1.0);
//!
//! let bounds = Rect::new(0.0, 0.0, 120.0, 44.0);
//! button.handle(&InteractionEvent::grant(Point::new(10.0, 10.0), bounds, 0));
//! assert_eq!(render(&button, 0).opacity, 0.2);
//!
//! button.handle(&InteractionEvent::release(Point::new(10.0, 10.0), 100));
//! button.advance(100);
//! assert_eq!(button.advance(350), 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animated;
mod controller;
mod options;
mod style;
mod view;

pub use animated::{AnimatedOpacity, ease_in_out_quad};
pub use controller::TouchableOpacity;
pub use options::{
    ACTIVE_DURATION, DEFAULT_ACTIVE_OPACITY, INACTIVE_DURATION, OpacityFeedback,
    TouchableOptions, build_press_config,
};
pub use style::{
    DEFAULT_RESTING_OPACITY, Style, StyleFragment, StyleValue, flatten_style, resting_opacity,
};
pub use view::{TouchableView, render};

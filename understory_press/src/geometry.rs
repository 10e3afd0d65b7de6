// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerance-region geometry: hit slop and press retention offsets.
//!
//! The responder region for a press cycle is the element's bounds, captured at
//! grant time, grown outward by the hit slop and then by the press-rect offset.
//! A held pointer inside that region counts as pressed in.

use kurbo::{Point, Rect};

/// Distances that extend a rectangle outward on each edge.
///
/// Negative values shrink the rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    /// Extension above the top edge.
    pub top: f64,
    /// Extension left of the left edge.
    pub left: f64,
    /// Extension below the bottom edge.
    pub bottom: f64,
    /// Extension right of the right edge.
    pub right: f64,
}

impl EdgeInsets {
    /// No extension on any edge.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Creates insets from explicit edge values.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same extension on every edge.
    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    /// Returns `rect` grown by these insets.
    ///
    /// Coordinates follow the usual UI convention where `y` grows downward,
    /// so `top` moves `y0` up and `bottom` moves `y1` down.
    pub fn expand(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0 - self.left,
            rect.y0 - self.top,
            rect.x1 + self.right,
            rect.y1 + self.bottom,
        )
    }
}

/// Press retention offsets used when the caller does not supply any.
pub const DEFAULT_PRESS_RECT_OFFSET: EdgeInsets = EdgeInsets::new(20.0, 20.0, 30.0, 20.0);

/// Computes the tolerance region for a press cycle.
pub fn responder_region(
    bounds: Rect,
    hit_slop: Option<EdgeInsets>,
    press_rect_offset: Option<EdgeInsets>,
) -> Rect {
    let slopped = hit_slop.unwrap_or(EdgeInsets::ZERO).expand(bounds);
    press_rect_offset
        .unwrap_or(DEFAULT_PRESS_RECT_OFFSET)
        .expand(slopped)
}

/// Returns `true` if `point` lies inside `region`, edges included.
///
/// A missing region (for example, a keyboard-initiated press) contains every point.
pub fn region_contains(region: Option<Rect>, point: Point) -> bool {
    match region {
        None => true,
        Some(r) => point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1,
    }
}

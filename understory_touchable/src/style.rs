// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared element style, as far as press feedback needs to read it.
//!
//! An element's style is either a single [`StyleFragment`] or a composition of
//! fragments (possibly nested, possibly containing [`Style::Empty`] holes).
//! [`flatten_style`] merges a composition in order, with later fragments
//! overriding earlier ones.
//!
//! ```
//! use understory_touchable::{Style, StyleFragment, resting_opacity};
//!
//! let style = Style::Composed(vec![
//!     StyleFragment::new().with("opacity", 0.8).into(),
//!     Style::Empty,
//!     StyleFragment::new().with("opacity", 0.3).into(),
//! ]);
//! assert_eq!(resting_opacity(Some(&style)), 0.3);
//! assert_eq!(resting_opacity(None), 1.0);
//! ```

use alloc::borrow::Cow;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// Opacity used when the declared style does not specify a usable one.
pub const DEFAULT_RESTING_OPACITY: f64 = 1.0;

/// A single style property value.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// A number.
    Number(f64),
    /// A string.
    Text(Cow<'static, str>),
    /// A flag.
    Bool(bool),
    /// An explicitly unset value.
    Null,
}

impl StyleValue {
    /// The value as a number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&'static str> for StyleValue {
    fn from(s: &'static str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

/// A flat set of named style properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleFragment {
    props: HashMap<Cow<'static, str>, StyleValue>,
}

impl StyleFragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fragment with `name` set to `value`.
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<StyleValue>,
    ) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name` to `value`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<StyleValue>) {
        self.props.insert(name.into(), value.into());
    }

    /// Looks up a property.
    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.props.get(name)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Returns `true` if no properties are set.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Copies every property of `other` over this fragment.
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in &other.props {
            self.props.insert(k.clone(), v.clone());
        }
    }
}

/// A declared style: one fragment, a composition, or nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum Style {
    /// A hole in a composition; contributes nothing.
    Empty,
    /// A single fragment.
    Fragment(StyleFragment),
    /// Fragments applied in order.
    Composed(Vec<Style>),
}

impl From<StyleFragment> for Style {
    fn from(fragment: StyleFragment) -> Self {
        Self::Fragment(fragment)
    }
}

/// Merges a style into a single fragment; later fragments win.
pub fn flatten_style(style: Option<&Style>) -> StyleFragment {
    fn walk(style: &Style, out: &mut StyleFragment) {
        match style {
            Style::Empty => {}
            Style::Fragment(fragment) => out.merge(fragment),
            Style::Composed(parts) => {
                for part in parts {
                    walk(part, out);
                }
            }
        }
    }

    let mut out = StyleFragment::new();
    if let Some(style) = style {
        walk(style, &mut out);
    }
    out
}

/// The opacity an element rests at, read from its declared style.
///
/// Missing styles, missing `opacity`, and non-numeric or non-finite values all
/// yield [`DEFAULT_RESTING_OPACITY`].
pub fn resting_opacity(style: Option<&Style>) -> f64 {
    flatten_style(style)
        .get("opacity")
        .and_then(StyleValue::as_number)
        .filter(|n| n.is_finite())
        .unwrap_or(DEFAULT_RESTING_OPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn single_fragment_opacity() {
        let style = Style::from(StyleFragment::new().with("opacity", 0.6));
        assert_eq!(resting_opacity(Some(&style)), 0.6);
    }

    #[test]
    fn absent_or_empty_style_rests_opaque() {
        assert_eq!(resting_opacity(None), 1.0);
        assert_eq!(resting_opacity(Some(&Style::Empty)), 1.0);
        assert_eq!(resting_opacity(Some(&StyleFragment::new().into())), 1.0);
    }

    #[test]
    fn composed_style_flattens_last_wins() {
        let style = Style::Composed(vec![
            StyleFragment::new().into(),
            StyleFragment::new().with("opacity", 0.3).into(),
        ]);
        assert_eq!(resting_opacity(Some(&style)), 0.3);
    }

    #[test]
    fn nested_composition_flattens_in_order() {
        let style = Style::Composed(vec![
            Style::Composed(vec![
                StyleFragment::new().with("opacity", 0.1).into(),
                StyleFragment::new().with("color", "red").into(),
            ]),
            StyleFragment::new().with("opacity", 0.4).into(),
        ]);
        let flat = flatten_style(Some(&style));
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("opacity"), Some(&StyleValue::Number(0.4)));
    }

    #[test]
    fn non_numeric_opacity_rests_opaque() {
        for value in [
            StyleValue::from("0.5"),
            StyleValue::Bool(true),
            StyleValue::Null,
            StyleValue::Number(f64::NAN),
        ] {
            let style = Style::from(StyleFragment::new().with("opacity", value));
            assert_eq!(resting_opacity(Some(&style)), 1.0);
        }
    }

    #[test]
    fn later_non_numeric_override_hides_earlier_number() {
        let style = Style::Composed(vec![
            StyleFragment::new().with("opacity", 0.5).into(),
            StyleFragment::new().with("opacity", StyleValue::Null).into(),
        ]);
        assert_eq!(resting_opacity(Some(&style)), 1.0);
    }
}

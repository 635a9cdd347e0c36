//! Style value types and float conventions
//!
//! Inside the layout pass an "undefined" number is represented as NaN so
//! that arithmetic naturally propagates missing values. The [`Value`] enum
//! is the typed form used in styles; it resolves to a plain `f32` (possibly
//! NaN) against a reference size at layout time.
//!
//! Float comparisons throughout the engine go through [`floats_equal`],
//! which treats two NaNs as equal and everything closer than `0.0001` as
//! the same value. Layout does not need more precision than that and the
//! tolerance absorbs accumulated rounding error.

use std::fmt;

/// The sentinel for "no value" in raw float form.
pub const UNDEFINED: f32 = f32::NAN;

/// Returns true when the float carries no value.
#[inline]
pub fn is_undefined(value: f32) -> bool {
  value.is_nan()
}

/// Returns true when the float carries a value.
#[inline]
pub fn is_defined(value: f32) -> bool {
  !value.is_nan()
}

/// Fuzzy float equality used for all layout comparisons.
///
/// Two undefined values compare equal. Defined values compare equal when
/// they differ by less than 0.0001.
///
/// # Examples
///
/// ```
/// use fastflex::style::value::{floats_equal, UNDEFINED};
///
/// assert!(floats_equal(1.0, 1.00005));
/// assert!(!floats_equal(1.0, 1.001));
/// assert!(floats_equal(UNDEFINED, UNDEFINED));
/// assert!(!floats_equal(UNDEFINED, 1.0));
/// ```
pub fn floats_equal(a: f32, b: f32) -> bool {
  if a.is_nan() || b.is_nan() {
    return a.is_nan() && b.is_nan();
  }
  (a - b).abs() < 0.0001
}

/// A dimension-like style value.
///
/// This is the unit-tagged type behind widths, heights, flex basis, margins,
/// paddings, borders and offsets. Constructors normalize NaN input to
/// [`Value::Undefined`], so a `Point` or `Percent` payload is always a real
/// number.
///
/// # Examples
///
/// ```
/// use fastflex::style::value::Value;
///
/// let width = Value::points(100.0);
/// assert_eq!(width.resolve(500.0), 100.0);
///
/// let half = Value::percent(50.0);
/// assert_eq!(half.resolve(200.0), 100.0);
///
/// assert!(Value::Auto.resolve(200.0).is_nan());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
  /// No value set
  #[default]
  Undefined,
  /// Value computed by the layout algorithm
  Auto,
  /// Absolute value in points
  Point(f32),
  /// Percentage of a reference size
  Percent(f32),
}

impl Value {
  /// Creates a point value, treating NaN as undefined
  pub fn points(value: f32) -> Self {
    if value.is_nan() {
      Self::Undefined
    } else {
      Self::Point(value)
    }
  }

  /// Creates a percent value, treating NaN as undefined
  pub fn percent(value: f32) -> Self {
    if value.is_nan() {
      Self::Undefined
    } else {
      Self::Percent(value)
    }
  }

  /// Returns true for [`Value::Undefined`]
  pub fn is_undefined(self) -> bool {
    matches!(self, Self::Undefined)
  }

  /// Returns true for [`Value::Auto`]
  pub fn is_auto(self) -> bool {
    matches!(self, Self::Auto)
  }

  /// Returns true for point and percent values
  pub fn is_defined(self) -> bool {
    matches!(self, Self::Point(_) | Self::Percent(_))
  }

  /// Resolves the value against a reference size.
  ///
  /// Points resolve to themselves, percentages to the given fraction of
  /// `reference`, and `Undefined`/`Auto` to NaN. A NaN reference makes a
  /// percentage resolve to NaN as well.
  pub fn resolve(self, reference: f32) -> f32 {
    match self {
      Self::Point(value) => value,
      Self::Percent(value) => value * reference * 0.01,
      Self::Undefined | Self::Auto => UNDEFINED,
    }
  }

  /// Resolves a margin value, where `Auto` means zero.
  pub fn resolve_margin(self, reference: f32) -> f32 {
    match self {
      Self::Auto => 0.0,
      other => other.resolve(reference),
    }
  }

  /// Fuzzy equality: same unit and payloads within the layout tolerance.
  pub fn approx_eq(self, other: Self) -> bool {
    match (self, other) {
      (Self::Undefined, Self::Undefined) | (Self::Auto, Self::Auto) => true,
      (Self::Point(a), Self::Point(b)) | (Self::Percent(a), Self::Percent(b)) => floats_equal(a, b),
      _ => false,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Undefined => write!(f, "undefined"),
      Self::Auto => write!(f, "auto"),
      Self::Point(value) => write!(f, "{}", value),
      Self::Percent(value) => write!(f, "{}%", value),
    }
  }
}

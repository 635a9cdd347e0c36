//! Edge-indexed style properties
//!
//! Margin, padding, border and position offsets are stored per edge. On top
//! of the four physical edges there are writing-direction aware `Start` and
//! `End` edges and the `Horizontal`, `Vertical` and `All` shorthands. A
//! physical edge that was not set explicitly falls back through the
//! shorthands in a fixed order:
//!
//! 1. the edge itself
//! 2. `Vertical` (for top/bottom) or `Horizontal` (for left/right/start/end)
//! 3. `All`
//! 4. the caller-provided default (`Start`/`End` fall back to undefined)

use crate::style::value::Value;

/// An edge a spacing property can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
  Left,
  Top,
  Right,
  Bottom,
  /// Leading edge in the inline direction, depends on layout direction
  Start,
  /// Trailing edge in the inline direction, depends on layout direction
  End,
  /// Shorthand for left and right
  Horizontal,
  /// Shorthand for top and bottom
  Vertical,
  /// Shorthand for all four edges
  All,
}

/// Number of addressable edges
pub const EDGE_COUNT: usize = 9;

impl Edge {
  /// All edges in storage order
  pub const VALUES: [Edge; EDGE_COUNT] = [
    Edge::Left,
    Edge::Top,
    Edge::Right,
    Edge::Bottom,
    Edge::Start,
    Edge::End,
    Edge::Horizontal,
    Edge::Vertical,
    Edge::All,
  ];

  /// Index into per-edge storage; physical edges occupy 0 to 3, then
  /// start/end, then the shorthands
  #[inline]
  pub(crate) fn index(self) -> usize {
    match self {
      Edge::Left => 0,
      Edge::Top => 1,
      Edge::Right => 2,
      Edge::Bottom => 3,
      Edge::Start => 4,
      Edge::End => 5,
      Edge::Horizontal => 6,
      Edge::Vertical => 7,
      Edge::All => 8,
    }
  }
}

/// One spacing property (margin, padding, border or position) across all
/// edges, with shorthand fallback on read.
///
/// # Examples
///
/// ```
/// use fastflex::style::edges::{Edge, EdgeValues};
/// use fastflex::style::value::Value;
///
/// let mut margin = EdgeValues::default();
/// margin.set(Edge::All, Value::points(10.0));
/// margin.set(Edge::Left, Value::points(4.0));
///
/// assert_eq!(margin.computed(Edge::Left, Value::Undefined), Value::points(4.0));
/// assert_eq!(margin.computed(Edge::Top, Value::Undefined), Value::points(10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeValues {
  values: [Value; EDGE_COUNT],
}

impl EdgeValues {
  /// All edges undefined
  pub const fn undefined() -> Self {
    Self {
      values: [Value::Undefined; EDGE_COUNT],
    }
  }

  /// Raw value stored for an edge, without shorthand fallback
  pub fn get(&self, edge: Edge) -> Value {
    self.values[edge.index()]
  }

  /// Stores a value for an edge
  pub fn set(&mut self, edge: Edge, value: Value) {
    self.values[edge.index()] = value;
  }

  /// Value for an edge after applying the shorthand fallback chain.
  ///
  /// `Auto` counts as set. `Start` and `End` never take the caller default;
  /// when nothing applies they read as undefined so the caller can fall
  /// back to the physical edge instead.
  pub fn computed(&self, edge: Edge, default: Value) -> Value {
    let direct = self.get(edge);
    if !direct.is_undefined() {
      return direct;
    }
    match edge {
      Edge::Top | Edge::Bottom => {
        let vertical = self.get(Edge::Vertical);
        if !vertical.is_undefined() {
          return vertical;
        }
      }
      Edge::Left | Edge::Right | Edge::Start | Edge::End => {
        let horizontal = self.get(Edge::Horizontal);
        if !horizontal.is_undefined() {
          return horizontal;
        }
      }
      _ => {}
    }
    let all = self.get(Edge::All);
    if !all.is_undefined() {
      return all;
    }
    if matches!(edge, Edge::Start | Edge::End) {
      return Value::Undefined;
    }
    default
  }
}

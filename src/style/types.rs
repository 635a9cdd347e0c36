//! Style property enums
//!
//! These mirror the CSS flexbox vocabulary. Axis-dependent lookups
//! (leading edge, trailing edge, axis dimension) live on [`FlexDirection`]
//! so the layout code can stay table-free.

use crate::style::edges::Edge;

/// Writing direction of a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
  /// Take the direction from the parent, LTR at the root
  #[default]
  Inherit,
  /// Left to right
  Ltr,
  /// Right to left
  Rtl,
}

/// A physical dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
  Width,
  Height,
}

impl Dimension {
  /// Index into `[width, height]` arrays
  #[inline]
  pub fn index(self) -> usize {
    match self {
      Dimension::Width => 0,
      Dimension::Height => 1,
    }
  }
}

/// Main axis of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
  /// Top to bottom
  #[default]
  Column,
  /// Bottom to top
  ColumnReverse,
  /// Writing-direction start to end
  Row,
  /// Writing-direction end to start
  RowReverse,
}

impl FlexDirection {
  /// Returns true for `Row` and `RowReverse`
  #[inline]
  pub fn is_row(self) -> bool {
    matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
  }

  /// Returns true for `Column` and `ColumnReverse`
  #[inline]
  pub fn is_column(self) -> bool {
    matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
  }

  /// Applies the writing direction: row axes flip under RTL.
  pub fn resolve(self, direction: Direction) -> FlexDirection {
    if direction == Direction::Rtl {
      match self {
        FlexDirection::Row => return FlexDirection::RowReverse,
        FlexDirection::RowReverse => return FlexDirection::Row,
        _ => {}
      }
    }
    self
  }

  /// The axis perpendicular to this one, resolved against the writing
  /// direction.
  pub fn cross(self, direction: Direction) -> FlexDirection {
    if self.is_column() {
      FlexDirection::Row.resolve(direction)
    } else {
      FlexDirection::Column
    }
  }

  /// Edge where content starts along this axis
  #[inline]
  pub fn leading_edge(self) -> Edge {
    match self {
      FlexDirection::Column => Edge::Top,
      FlexDirection::ColumnReverse => Edge::Bottom,
      FlexDirection::Row => Edge::Left,
      FlexDirection::RowReverse => Edge::Right,
    }
  }

  /// Edge where content ends along this axis
  #[inline]
  pub fn trailing_edge(self) -> Edge {
    match self {
      FlexDirection::Column => Edge::Bottom,
      FlexDirection::ColumnReverse => Edge::Top,
      FlexDirection::Row => Edge::Right,
      FlexDirection::RowReverse => Edge::Left,
    }
  }

  /// Dimension measured along this axis
  #[inline]
  pub fn dimension(self) -> Dimension {
    if self.is_row() {
      Dimension::Width
    } else {
      Dimension::Height
    }
  }
}

/// Distribution of free space along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
  #[default]
  FlexStart,
  Center,
  FlexEnd,
  /// Equal gaps between items, none at the line edges
  SpaceBetween,
  /// Half-size gaps at the line edges, equal gaps between items
  SpaceAround,
  /// Equal gaps everywhere including the line edges
  SpaceEvenly,
}

/// Alignment of items or lines on the cross axis.
///
/// Used for `align_items`, `align_self` and `align_content`; not every
/// variant is meaningful for each property. `Auto` defers to the parent's
/// `align_items` and only makes sense for `align_self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
  Auto,
  FlexStart,
  Center,
  FlexEnd,
  Stretch,
  Baseline,
  /// Lines only
  SpaceBetween,
  /// Lines only
  SpaceAround,
}

/// Positioning scheme of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionType {
  /// Laid out in flow, offsets nudge the final position
  #[default]
  Relative,
  /// Taken out of flow, positioned against the parent's padding box
  Absolute,
}

/// Line wrapping behavior of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
  #[default]
  NoWrap,
  Wrap,
  /// Wrap with cross-axis line order reversed
  WrapReverse,
}

/// Content overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
  #[default]
  Visible,
  Hidden,
  /// Content may scroll; main-axis sizing prefers the available space
  Scroll,
}

/// Participation of a node in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
  #[default]
  Flex,
  /// Excluded from layout entirely, subtree gets zeroed results
  None,
}

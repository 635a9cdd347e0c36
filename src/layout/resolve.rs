//! Per-axis resolution of style values.
//!
//! Layout works in main and cross axes rather than physical edges. The
//! helpers here answer "what is this node's leading margin on that axis"
//! style questions, folding in the edge precedence rules and the special
//! treatment of `start`/`end` on row axes.
//!
//! Percentages resolve against the owner's size on the same axis, except
//! margins and paddings which always resolve against the owner's width.

use crate::layout::MeasureMode;
use crate::style::edges::Edge;
use crate::style::types::FlexDirection;
use crate::style::value::is_defined;
use crate::style::value::Value;
use crate::style::value::UNDEFINED;
use crate::style::Style;
use crate::tree::Node;

/// Raw numeric payload of a value, NaN when it has none.
fn value_of(value: Value) -> f32 {
  match value {
    Value::Point(v) | Value::Percent(v) => v,
    _ => UNDEFINED,
  }
}

/// True when a position offset is set for the leading edge of the axis.
/// On row axes an explicit `start` offset counts as leading.
pub(crate) fn is_leading_position_defined(style: &Style, axis: FlexDirection) -> bool {
  (axis.is_row()
    && !style
      .position
      .computed(Edge::Start, Value::Undefined)
      .is_undefined())
    || !style
      .position
      .computed(axis.leading_edge(), Value::Undefined)
      .is_undefined()
}

pub(crate) fn is_trailing_position_defined(style: &Style, axis: FlexDirection) -> bool {
  (axis.is_row()
    && !style
      .position
      .computed(Edge::End, Value::Undefined)
      .is_undefined())
    || !style
      .position
      .computed(axis.trailing_edge(), Value::Undefined)
      .is_undefined()
}

/// Resolved leading offset on the axis. An unset offset reads as zero.
pub(crate) fn leading_position(style: &Style, axis: FlexDirection, axis_size: f32) -> f32 {
  if axis.is_row() {
    let start = style.position.computed(Edge::Start, Value::Undefined);
    if !start.is_undefined() {
      return start.resolve(axis_size);
    }
  }
  let leading = style.position.computed(axis.leading_edge(), Value::Undefined);
  if leading.is_undefined() {
    0.0
  } else {
    leading.resolve(axis_size)
  }
}

pub(crate) fn trailing_position(style: &Style, axis: FlexDirection, axis_size: f32) -> f32 {
  if axis.is_row() {
    let end = style.position.computed(Edge::End, Value::Undefined);
    if !end.is_undefined() {
      return end.resolve(axis_size);
    }
  }
  let trailing = style.position.computed(axis.trailing_edge(), Value::Undefined);
  if trailing.is_undefined() {
    0.0
  } else {
    trailing.resolve(axis_size)
  }
}

/// Offset of a relatively positioned node from its normal position. The
/// leading offset wins when both edges are set.
pub(crate) fn relative_position(style: &Style, axis: FlexDirection, axis_size: f32) -> f32 {
  if is_leading_position_defined(style, axis) {
    leading_position(style, axis, axis_size)
  } else {
    -trailing_position(style, axis, axis_size)
  }
}

/// Resolved leading margin. A raw `start` value takes precedence on row
/// axes before the usual edge fallback, and auto resolves to zero.
pub(crate) fn leading_margin(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  if axis.is_row() && !style.margin.get(Edge::Start).is_undefined() {
    return style.margin.get(Edge::Start).resolve_margin(width_size);
  }
  style
    .margin
    .computed(axis.leading_edge(), Value::points(0.0))
    .resolve_margin(width_size)
}

pub(crate) fn trailing_margin(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  if axis.is_row() && !style.margin.get(Edge::End).is_undefined() {
    return style.margin.get(Edge::End).resolve_margin(width_size);
  }
  style
    .margin
    .computed(axis.trailing_edge(), Value::points(0.0))
    .resolve_margin(width_size)
}

pub(crate) fn margin_for_axis(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  leading_margin(style, axis, width_size) + trailing_margin(style, axis, width_size)
}

/// Raw margin value on the leading edge, without shorthand fallback.
/// Auto margin detection looks at this, so `margin: auto` on all edges via
/// the shorthand does not absorb free space.
pub(crate) fn margin_leading_value(style: &Style, axis: FlexDirection) -> Value {
  if axis.is_row() && !style.margin.get(Edge::Start).is_undefined() {
    style.margin.get(Edge::Start)
  } else {
    style.margin.get(axis.leading_edge())
  }
}

pub(crate) fn margin_trailing_value(style: &Style, axis: FlexDirection) -> Value {
  if axis.is_row() && !style.margin.get(Edge::End).is_undefined() {
    style.margin.get(Edge::End)
  } else {
    style.margin.get(axis.trailing_edge())
  }
}

/// Border width on the leading edge, never negative.
pub(crate) fn leading_border(style: &Style, axis: FlexDirection) -> f32 {
  if axis.is_row() {
    let start = style.border.get(Edge::Start);
    if !start.is_undefined() && value_of(start) >= 0.0 {
      return value_of(start);
    }
  }
  value_of(style.border.computed(axis.leading_edge(), Value::points(0.0))).max(0.0)
}

pub(crate) fn trailing_border(style: &Style, axis: FlexDirection) -> f32 {
  if axis.is_row() {
    let end = style.border.get(Edge::End);
    if !end.is_undefined() && value_of(end) >= 0.0 {
      return value_of(end);
    }
  }
  value_of(style.border.computed(axis.trailing_edge(), Value::points(0.0))).max(0.0)
}

/// Resolved leading padding, never negative.
pub(crate) fn leading_padding(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  if axis.is_row() {
    let start = style.padding.get(Edge::Start);
    if !start.is_undefined() && start.resolve(width_size) >= 0.0 {
      return start.resolve(width_size);
    }
  }
  style
    .padding
    .computed(axis.leading_edge(), Value::points(0.0))
    .resolve(width_size)
    .max(0.0)
}

pub(crate) fn trailing_padding(style: &Style, axis: FlexDirection, width_size: f32) -> f32 {
  if axis.is_row() {
    let end = style.padding.get(Edge::End);
    if !end.is_undefined() && end.resolve(width_size) >= 0.0 {
      return end.resolve(width_size);
    }
  }
  style
    .padding
    .computed(axis.trailing_edge(), Value::points(0.0))
    .resolve(width_size)
    .max(0.0)
}

pub(crate) fn leading_padding_and_border(
  style: &Style,
  axis: FlexDirection,
  width_size: f32,
) -> f32 {
  leading_padding(style, axis, width_size) + leading_border(style, axis)
}

pub(crate) fn trailing_padding_and_border(
  style: &Style,
  axis: FlexDirection,
  width_size: f32,
) -> f32 {
  trailing_padding(style, axis, width_size) + trailing_border(style, axis)
}

pub(crate) fn padding_and_border_for_axis(
  style: &Style,
  axis: FlexDirection,
  width_size: f32,
) -> f32 {
  leading_padding_and_border(style, axis, width_size)
    + trailing_padding_and_border(style, axis, width_size)
}

/// True when the node's used dimension on the axis resolves to a real size.
/// Negative sizes and percentages of an undefined owner size do not count.
pub(crate) fn is_style_dim_defined(node: &Node, axis: FlexDirection, owner_size: f32) -> bool {
  match node.resolved_dimension(axis.dimension()) {
    Value::Point(v) => v >= 0.0,
    Value::Percent(v) => v >= 0.0 && is_defined(owner_size),
    _ => false,
  }
}

/// True when the node has a usable measured size on the axis.
pub(crate) fn is_layout_dim_defined(node: &Node, axis: FlexDirection) -> bool {
  let value = node.layout_ref().measured_dimensions[axis.dimension().index()];
  is_defined(value) && value >= 0.0
}

/// Clamps a candidate size between the resolved min and max constraints
/// for the axis. Unset or negative constraints are ignored.
pub(crate) fn bound_axis_within_min_and_max(
  style: &Style,
  axis: FlexDirection,
  value: f32,
  axis_size: f32,
) -> f32 {
  let dim = axis.dimension().index();
  let min = style.min_dimensions[dim].resolve(axis_size);
  let max = style.max_dimensions[dim].resolve(axis_size);

  let mut bound = value;
  if is_defined(max) && max >= 0.0 && bound > max {
    bound = max;
  }
  if is_defined(min) && min >= 0.0 && bound < min {
    bound = min;
  }
  bound
}

/// Like [`bound_axis_within_min_and_max`], and additionally keeps the size
/// large enough to hold the node's own padding and border.
pub(crate) fn bound_axis(
  style: &Style,
  axis: FlexDirection,
  value: f32,
  axis_size: f32,
  width_size: f32,
) -> f32 {
  bound_axis_within_min_and_max(style, axis, value, axis_size)
    .max(padding_and_border_for_axis(style, axis, width_size))
}

/// Measured size on the axis including both margins.
pub(crate) fn dim_with_margin(node: &Node, axis: FlexDirection, width_size: f32) -> f32 {
  let measured = node.layout_ref().measured_dimensions[axis.dimension().index()];
  measured + margin_for_axis(&node.style_ref(), axis, width_size)
}

/// Applies the axis max constraint to a constraint about to be passed down.
/// An exact or capped size shrinks to the max; an unconstrained size turns
/// into an at-most constraint.
pub(crate) fn constrain_max_size_for_mode(
  node: &Node,
  axis: FlexDirection,
  owner_axis_size: f32,
  owner_width: f32,
  mode: MeasureMode,
  size: f32,
) -> (MeasureMode, f32) {
  let style = node.style_ref();
  let max_size = style.max_dimensions[axis.dimension().index()].resolve(owner_axis_size)
    + margin_for_axis(&style, axis, owner_width);
  match mode {
    MeasureMode::Exactly | MeasureMode::AtMost => {
      let size = if max_size.is_nan() || size < max_size {
        size
      } else {
        max_size
      };
      (mode, size)
    }
    MeasureMode::Undefined => {
      if is_defined(max_size) {
        (MeasureMode::AtMost, max_size)
      } else {
        (mode, size)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn style_with_margin(edge: Edge, value: Value) -> Style {
    let mut style = Style::default();
    style.margin.set(edge, value);
    style
  }

  #[test]
  fn test_start_overrides_left_on_row_axis() {
    let mut style = style_with_margin(Edge::Left, Value::points(5.0));
    style.margin.set(Edge::Start, Value::points(11.0));
    assert_eq!(leading_margin(&style, FlexDirection::Row, 100.0), 11.0);
    assert_eq!(leading_margin(&style, FlexDirection::Column, 100.0), 0.0);
  }

  #[test]
  fn test_margin_shorthand_fallback() {
    let style = style_with_margin(Edge::All, Value::points(7.0));
    assert_eq!(leading_margin(&style, FlexDirection::Row, 100.0), 7.0);
    assert_eq!(trailing_margin(&style, FlexDirection::Column, 100.0), 7.0);
    assert_eq!(margin_for_axis(&style, FlexDirection::Row, 100.0), 14.0);
  }

  #[test]
  fn test_margin_value_ignores_shorthand() {
    let style = style_with_margin(Edge::All, Value::Auto);
    assert_eq!(
      margin_leading_value(&style, FlexDirection::Row),
      Value::Undefined
    );
    let style = style_with_margin(Edge::Left, Value::Auto);
    assert_eq!(margin_leading_value(&style, FlexDirection::Row), Value::Auto);
  }

  #[test]
  fn test_percent_margin_resolves_against_width() {
    let style = style_with_margin(Edge::Top, Value::percent(10.0));
    assert_eq!(leading_margin(&style, FlexDirection::Column, 250.0), 25.0);
  }

  #[test]
  fn test_position_defaults_to_zero() {
    let style = Style::default();
    assert_eq!(leading_position(&style, FlexDirection::Row, 100.0), 0.0);
    assert!(!is_leading_position_defined(&style, FlexDirection::Row));
  }

  #[test]
  fn test_relative_position_prefers_leading() {
    let mut style = Style::default();
    style.position.set(Edge::Left, Value::points(10.0));
    style.position.set(Edge::Right, Value::points(4.0));
    assert_eq!(relative_position(&style, FlexDirection::Row, 100.0), 10.0);

    let mut style = Style::default();
    style.position.set(Edge::Right, Value::points(4.0));
    assert_eq!(relative_position(&style, FlexDirection::Row, 100.0), -4.0);
  }

  #[test]
  fn test_negative_border_reads_as_zero() {
    let mut style = Style::default();
    style.border.set(Edge::Left, Value::points(-3.0));
    assert_eq!(leading_border(&style, FlexDirection::Row), 0.0);
    style.border.set(Edge::Left, Value::points(3.0));
    assert_eq!(leading_border(&style, FlexDirection::Row), 3.0);
  }

  #[test]
  fn test_padding_clamps_negative() {
    let mut style = Style::default();
    style.padding.set(Edge::Top, Value::points(-5.0));
    assert_eq!(leading_padding(&style, FlexDirection::Column, 100.0), 0.0);
    style.padding.set(Edge::Bottom, Value::percent(10.0));
    assert_eq!(
      padding_and_border_for_axis(&style, FlexDirection::Column, 200.0),
      20.0
    );
  }

  #[test]
  fn test_bound_axis_within_min_and_max() {
    let mut style = Style::default();
    style.min_dimensions[0] = Value::points(20.0);
    style.max_dimensions[0] = Value::points(80.0);
    assert_eq!(
      bound_axis_within_min_and_max(&style, FlexDirection::Row, 100.0, 200.0),
      80.0
    );
    assert_eq!(
      bound_axis_within_min_and_max(&style, FlexDirection::Row, 5.0, 200.0),
      20.0
    );
    assert_eq!(
      bound_axis_within_min_and_max(&style, FlexDirection::Row, 50.0, 200.0),
      50.0
    );
  }

  #[test]
  fn test_bound_axis_floors_at_padding_and_border() {
    let mut style = Style::default();
    style.padding.set(Edge::All, Value::points(10.0));
    style.border.set(Edge::All, Value::points(2.0));
    assert_eq!(bound_axis(&style, FlexDirection::Row, 4.0, 100.0, 100.0), 24.0);
  }

  #[test]
  fn test_constrain_max_size_for_mode() {
    let node = Node::new();
    node.set_max_width(Value::points(50.0));
    let (mode, size) = constrain_max_size_for_mode(
      &node,
      FlexDirection::Row,
      100.0,
      100.0,
      MeasureMode::Undefined,
      UNDEFINED,
    );
    assert_eq!(mode, MeasureMode::AtMost);
    assert_eq!(size, 50.0);

    let (mode, size) = constrain_max_size_for_mode(
      &node,
      FlexDirection::Row,
      100.0,
      100.0,
      MeasureMode::Exactly,
      80.0,
    );
    assert_eq!(mode, MeasureMode::Exactly);
    assert_eq!(size, 50.0);
  }
}

//! Style model for flex layout

pub mod edges;
pub mod types;
pub mod value;

pub use edges::{Edge, EdgeValues};
pub use types::{
  Align, Dimension, Direction, Display, FlexDirection, JustifyContent, Overflow, PositionType,
  Wrap,
};
pub use value::Value;

/// The full set of style properties a node can carry.
///
/// All fields are plain data; nothing here is resolved against a parent or
/// a writing direction. Mutation normally happens through the node setters,
/// which compare against the current value and mark the node dirty on
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
  pub direction: Direction,
  pub flex_direction: FlexDirection,
  pub justify_content: JustifyContent,
  pub align_content: Align,
  pub align_items: Align,
  pub align_self: Align,
  pub position_type: PositionType,
  pub flex_wrap: Wrap,
  pub overflow: Overflow,
  pub display: Display,
  /// Shorthand feeding both grow and shrink when those are unset
  pub flex: Option<f32>,
  pub flex_grow: Option<f32>,
  pub flex_shrink: Option<f32>,
  pub flex_basis: Value,
  pub margin: EdgeValues,
  pub position: EdgeValues,
  pub padding: EdgeValues,
  pub border: EdgeValues,
  /// Preferred width and height, indexed by [`Dimension`]
  pub dimensions: [Value; 2],
  pub min_dimensions: [Value; 2],
  pub max_dimensions: [Value; 2],
  /// Width divided by height; couples the two axes when one is known
  pub aspect_ratio: Option<f32>,
}

impl Default for Style {
  fn default() -> Self {
    Self {
      direction: Direction::Inherit,
      flex_direction: FlexDirection::Column,
      justify_content: JustifyContent::FlexStart,
      align_content: Align::FlexStart,
      align_items: Align::Stretch,
      align_self: Align::Auto,
      position_type: PositionType::Relative,
      flex_wrap: Wrap::NoWrap,
      overflow: Overflow::Visible,
      display: Display::Flex,
      flex: None,
      flex_grow: None,
      flex_shrink: None,
      flex_basis: Value::Auto,
      margin: EdgeValues::undefined(),
      position: EdgeValues::undefined(),
      padding: EdgeValues::undefined(),
      border: EdgeValues::undefined(),
      dimensions: [Value::Auto; 2],
      min_dimensions: [Value::Undefined; 2],
      max_dimensions: [Value::Undefined; 2],
      aspect_ratio: None,
    }
  }
}

impl Style {
  /// Defaults matching browsers instead of the engine's classic defaults:
  /// row main axis, stretched align-content, implicit shrink of one.
  pub fn web_default() -> Self {
    Self {
      flex_direction: FlexDirection::Row,
      align_content: Align::Stretch,
      ..Self::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let style = Style::default();
    assert_eq!(style.flex_direction, FlexDirection::Column);
    assert_eq!(style.align_items, Align::Stretch);
    assert_eq!(style.align_content, Align::FlexStart);
    assert_eq!(style.flex_basis, Value::Auto);
    assert_eq!(style.dimensions, [Value::Auto, Value::Auto]);
    assert_eq!(style.min_dimensions, [Value::Undefined, Value::Undefined]);
    assert!(style.flex_grow.is_none());
  }

  #[test]
  fn test_web_defaults() {
    let style = Style::web_default();
    assert_eq!(style.flex_direction, FlexDirection::Row);
    assert_eq!(style.align_content, Align::Stretch);
    assert_eq!(style.align_items, Align::Stretch);
  }
}

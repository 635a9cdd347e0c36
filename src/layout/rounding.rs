//! Snapping computed layout onto the device pixel grid.
//!
//! Rounding happens once at the end of a layout pass, over absolute
//! coordinates. Rounding each node's relative offsets in isolation would
//! let sub-pixel errors accumulate down the tree; rounding edges in
//! absolute space keeps adjacent boxes flush.

use crate::style::edges::Edge;
use crate::style::types::Dimension;
use crate::style::value::floats_equal;
use crate::tree::Node;
use crate::tree::NodeType;

/// Rounds a single value to the pixel grid for the given scale factor.
///
/// The value is rounded half-up in scaled (pixel) space. `force_ceil` and
/// `force_floor` override that for values that are not already on the
/// grid.
pub(crate) fn round_value_to_pixel_grid(
  value: f32,
  point_scale_factor: f32,
  force_ceil: bool,
  force_floor: bool,
) -> f32 {
  let mut scaled = value * point_scale_factor;
  let fractial = scaled % 1.0;
  if floats_equal(fractial, 0.0) {
    // The value is already on the grid, modulo float noise.
    scaled -= fractial;
  } else if floats_equal(fractial, 1.0) {
    scaled = scaled - fractial + 1.0;
  } else if force_ceil {
    scaled = scaled - fractial + 1.0;
  } else if force_floor {
    scaled -= fractial;
  } else {
    scaled = scaled
      - fractial
      + if fractial > 0.5 || floats_equal(fractial, 0.5) {
        1.0
      } else {
        0.0
      };
  }
  scaled / point_scale_factor
}

/// Rounds the subtree's positions and dimensions in place.
///
/// `absolute_left` and `absolute_top` are the owner's absolute origin.
/// Sizes round via the absolute leading and trailing edges, so two
/// adjacent children always end up sharing a pixel boundary. Text nodes
/// never round their content size down unless the unrounded size was
/// already integral, which protects against clipped glyphs.
pub(crate) fn round_layout_to_pixel_grid(
  node: &Node,
  point_scale_factor: f32,
  absolute_left: f32,
  absolute_top: f32,
) {
  if point_scale_factor == 0.0 {
    return;
  }

  let (node_left, node_top, node_width, node_height) = {
    let layout = node.layout_ref();
    (
      layout.position[Edge::Left.index()],
      layout.position[Edge::Top.index()],
      layout.dimensions[Dimension::Width.index()],
      layout.dimensions[Dimension::Height.index()],
    )
  };

  let absolute_node_left = absolute_left + node_left;
  let absolute_node_top = absolute_top + node_top;
  let absolute_node_right = absolute_node_left + node_width;
  let absolute_node_bottom = absolute_node_top + node_height;

  let text_rounding = node.node_type() == NodeType::Text;

  let width_fractial = (node_width * point_scale_factor) % 1.0;
  let height_fractial = (node_height * point_scale_factor) % 1.0;
  let has_fractional_width =
    !floats_equal(width_fractial, 0.0) && !floats_equal(width_fractial, 1.0);
  let has_fractional_height =
    !floats_equal(height_fractial, 0.0) && !floats_equal(height_fractial, 1.0);

  {
    let mut layout = node.layout_mut();
    layout.position[Edge::Left.index()] =
      round_value_to_pixel_grid(node_left, point_scale_factor, false, text_rounding);
    layout.position[Edge::Top.index()] =
      round_value_to_pixel_grid(node_top, point_scale_factor, false, text_rounding);

    layout.dimensions[Dimension::Width.index()] = round_value_to_pixel_grid(
      absolute_node_right,
      point_scale_factor,
      text_rounding && has_fractional_width,
      text_rounding && !has_fractional_width,
    ) - round_value_to_pixel_grid(
      absolute_node_left,
      point_scale_factor,
      false,
      text_rounding,
    );
    layout.dimensions[Dimension::Height.index()] = round_value_to_pixel_grid(
      absolute_node_bottom,
      point_scale_factor,
      text_rounding && has_fractional_height,
      text_rounding && !has_fractional_height,
    ) - round_value_to_pixel_grid(
      absolute_node_top,
      point_scale_factor,
      false,
      text_rounding,
    );
  }

  for i in 0..node.child_count() {
    if let Some(child) = node.child(i) {
      round_layout_to_pixel_grid(
        &child,
        point_scale_factor,
        absolute_node_left,
        absolute_node_top,
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_round_half_up() {
    assert_eq!(round_value_to_pixel_grid(1.4, 1.0, false, false), 1.0);
    assert_eq!(round_value_to_pixel_grid(1.5, 1.0, false, false), 2.0);
    assert_eq!(round_value_to_pixel_grid(1.6, 1.0, false, false), 2.0);
    assert_eq!(round_value_to_pixel_grid(2.0, 1.0, false, false), 2.0);
  }

  #[test]
  fn test_round_respects_scale_factor() {
    // Half-pixel grid at 2x scale.
    assert_eq!(round_value_to_pixel_grid(1.6, 2.0, false, false), 1.5);
    assert_eq!(round_value_to_pixel_grid(1.8, 2.0, false, false), 2.0);
  }

  #[test]
  fn test_forced_rounding() {
    assert_eq!(round_value_to_pixel_grid(1.1, 1.0, true, false), 2.0);
    assert_eq!(round_value_to_pixel_grid(1.9, 1.0, false, true), 1.0);
    // Values already on the grid stay put either way.
    assert_eq!(round_value_to_pixel_grid(3.0, 1.0, true, false), 3.0);
    assert_eq!(round_value_to_pixel_grid(3.0, 1.0, false, true), 3.0);
  }

  #[test]
  fn test_undefined_passes_through() {
    assert!(round_value_to_pixel_grid(f32::NAN, 1.0, false, false).is_nan());
  }

  #[test]
  fn test_tree_rounding_uses_absolute_edges() {
    let root = Node::new();
    let child = Node::new();
    root.add_child(&child);
    {
      let mut layout = root.layout_mut();
      layout.position[Edge::Left.index()] = 0.0;
      layout.position[Edge::Top.index()] = 0.0;
      layout.dimensions = [100.3, 20.0];
    }
    {
      let mut layout = child.layout_mut();
      layout.position[Edge::Left.index()] = 0.4;
      layout.position[Edge::Top.index()] = 0.0;
      layout.dimensions = [10.3, 20.0];
    }

    round_layout_to_pixel_grid(&root, 1.0, 0.0, 0.0);

    assert_eq!(root.layout_width(), 100.0);
    // The child spans 0.4 to 10.7 in absolute space, so it rounds to
    // 0 to 11.
    assert_eq!(child.layout_left(), 0.0);
    assert_eq!(child.layout_width(), 11.0);
  }

  #[test]
  fn test_zero_scale_disables_rounding() {
    let node = Node::new();
    {
      let mut layout = node.layout_mut();
      layout.position[Edge::Left.index()] = 0.4;
      layout.dimensions = [10.3, 20.0];
    }
    round_layout_to_pixel_grid(&node, 0.0, 0.0, 0.0);
    assert_eq!(node.layout_left(), 0.4);
    assert_eq!(node.layout_width(), 10.3);
  }

  #[test]
  fn test_text_nodes_keep_integral_sizes() {
    let text = Node::new();
    text.set_node_type(NodeType::Text);
    {
      let mut layout = text.layout_mut();
      layout.position[Edge::Left.index()] = 0.6;
      layout.position[Edge::Top.index()] = 0.0;
      layout.dimensions = [10.0, 10.0];
    }
    round_layout_to_pixel_grid(&text, 1.0, 0.0, 0.0);
    // An integral text width must stay integral even though the node
    // sits at a fractional offset.
    assert_eq!(text.layout_left(), 0.0);
    assert_eq!(text.layout_width(), 10.0);
  }
}

//! The flexbox layout algorithm.
//!
//! [`Node::calculate_layout`] is the entry point. Layout runs in two kinds
//! of passes over the tree: measure passes, which only need the size a
//! subtree wants under some constraint, and the final layout pass, which
//! also assigns positions. Both funnel through [`layout_node`], which
//! consults the per-node measurement cache before falling back to
//! [`compute_layout`], the full algorithm.
//!
//! `compute_layout` works line by line. Children are given a flex basis,
//! collected into lines (one line unless wrapping), flexible children are
//! grown or shrunk to fill each line in two passes (the first finds items
//! whose min/max constraints fire, the second distributes the corrected
//! free space), and then lines are justified and aligned. Absolutely
//! positioned children are laid out at the end against the padding box.
//!
//! All sizes flowing through here are f32 with NaN standing for "no
//! constraint"; see [`crate::style::value`].

use crate::config::ExperimentalFeature;
use crate::config::LogLevel;
use crate::layout::cache;
use crate::layout::cache::CachedMeasurement;
use crate::layout::resolve;
use crate::layout::rounding;
use crate::layout::session::LayoutSession;
use crate::layout::MeasureMode;
use crate::style::edges::Edge;
use crate::style::types::Align;
use crate::style::types::Dimension;
use crate::style::types::Direction;
use crate::style::types::Display;
use crate::style::types::FlexDirection;
use crate::style::types::JustifyContent;
use crate::style::types::Overflow;
use crate::style::types::PositionType;
use crate::style::types::Wrap;
use crate::style::value::floats_equal;
use crate::style::value::is_defined;
use crate::style::value::is_undefined;
use crate::style::value::Value;
use crate::style::value::UNDEFINED;
use crate::tree::node::LayoutResults;
use crate::tree::node::Node;

/// Resolves `Inherit` against the owner's direction. The fallback when
/// nothing is set anywhere in the chain is left-to-right.
fn resolve_direction(node: &Node, owner_direction: Direction) -> Direction {
  let direction = node.style_ref().direction;
  if direction == Direction::Inherit {
    if owner_direction != Direction::Inherit {
      owner_direction
    } else {
      Direction::Ltr
    }
  } else {
    direction
  }
}

/// Cross-axis alignment for a child: `align-self` when set, otherwise the
/// container's `align-items`. Baseline alignment only applies in row
/// containers and degrades to flex-start in columns.
fn child_alignment(node: &Node, child: &Node) -> Align {
  let align = {
    let child_style = child.style_ref();
    if child_style.align_self == Align::Auto {
      node.style_ref().align_items
    } else {
      child_style.align_self
    }
  };
  if align == Align::Baseline && node.style_ref().flex_direction.is_column() {
    return Align::FlexStart;
  }
  align
}

/// Distance from the top of the node to its baseline.
///
/// A baseline callback wins. Otherwise the reference child is the first
/// in-flow child on the first line, preferring one that is itself
/// baseline-aligned, and the result is that child's baseline offset by its
/// position. A node with no reference child sits on its bottom edge.
fn baseline(node: &Node) -> f32 {
  if node.has_baseline_func() {
    let (width, height) = {
      let layout = node.layout_ref();
      (
        layout.measured_dimensions[Dimension::Width.index()],
        layout.measured_dimensions[Dimension::Height.index()],
      )
    };
    return node.invoke_baseline(width, height);
  }

  let mut baseline_child: Option<Node> = None;
  for child in node.children_vec() {
    if child.line_index() > 0 {
      break;
    }
    if child.style_ref().position_type == PositionType::Absolute {
      continue;
    }
    if child_alignment(node, &child) == Align::Baseline {
      baseline_child = Some(child);
      break;
    }
    if baseline_child.is_none() {
      baseline_child = Some(child);
    }
  }

  match baseline_child {
    None => node.layout_ref().measured_dimensions[Dimension::Height.index()],
    Some(child) => {
      let top = child.layout_ref().position[Edge::Top.index()];
      baseline(&child) + top
    }
  }
}

/// True when any line of the node has to be sized by baselines, which
/// forces the cross-axis line pass even for a single line.
fn uses_baseline_alignment(node: &Node) -> bool {
  if node.style_ref().flex_direction.is_column() {
    return false;
  }
  if node.style_ref().align_items == Align::Baseline {
    return true;
  }
  for child in node.children_vec() {
    let style = child.style_ref();
    if style.position_type == PositionType::Relative && style.align_self == Align::Baseline {
      return true;
    }
  }
  false
}

/// Clears the layout of a hidden subtree so stale results never show
/// through `display: none`.
fn zero_layout_recursively(node: &Node) {
  *node.layout_mut() = LayoutResults::zeroed();
  node.set_has_new_layout(true);
  node.clone_children_if_needed();
  for child in node.children_vec() {
    zero_layout_recursively(&child);
  }
}

/// Derives the trailing position from the leading one. Used on reversed
/// axes, where layout accumulates positions from the visually trailing
/// side.
fn set_trailing_position(node: &Node, child: &Node, axis: FlexDirection) {
  let dim = axis.dimension().index();
  let node_size = node.layout_ref().measured_dimensions[dim];
  let (child_size, leading) = {
    let child_layout = child.layout_ref();
    (
      child_layout.measured_dimensions[dim],
      child_layout.position[axis.leading_edge().index()],
    )
  };
  child.layout_mut().position[axis.trailing_edge().index()] = node_size - child_size - leading;
}

fn measure_mode_name(mode: MeasureMode, performed_layout: bool) -> &'static str {
  match (mode, performed_layout) {
    (MeasureMode::Undefined, false) => "UNDEFINED",
    (MeasureMode::Exactly, false) => "EXACTLY",
    (MeasureMode::AtMost, false) => "AT_MOST",
    (MeasureMode::Undefined, true) => "LAY_UNDEFINED",
    (MeasureMode::Exactly, true) => "LAY_EXACTLY",
    (MeasureMode::AtMost, true) => "LAY_AT_MOST",
  }
}

/// Sizes a leaf through its measure callback. Exact constraints on both
/// axes skip the callback entirely, the node just takes the given size.
#[allow(clippy::too_many_arguments)]
fn measure_with_callback(
  node: &Node,
  available_width: f32,
  available_height: f32,
  width_mode: MeasureMode,
  height_mode: MeasureMode,
  owner_width: f32,
  owner_height: f32,
) {
  let (pb_row, pb_column, margin_row, margin_column) = {
    let style = node.style_ref();
    (
      resolve::padding_and_border_for_axis(&style, FlexDirection::Row, available_width),
      resolve::padding_and_border_for_axis(&style, FlexDirection::Column, available_width),
      resolve::margin_for_axis(&style, FlexDirection::Row, available_width),
      resolve::margin_for_axis(&style, FlexDirection::Column, available_width),
    )
  };

  // Size the measurable area, not the whole node.
  let inner_width = if is_undefined(available_width) {
    available_width
  } else {
    (available_width - margin_row - pb_row).max(0.0)
  };
  let inner_height = if is_undefined(available_height) {
    available_height
  } else {
    (available_height - margin_column - pb_column).max(0.0)
  };

  if width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly {
    let style = node.style_ref();
    let width = resolve::bound_axis(
      &style,
      FlexDirection::Row,
      available_width - margin_row,
      owner_width,
      owner_width,
    );
    let height = resolve::bound_axis(
      &style,
      FlexDirection::Column,
      available_height - margin_column,
      owner_height,
      owner_width,
    );
    drop(style);
    node.layout_mut().measured_dimensions = [width, height];
  } else {
    let measured = node.invoke_measure(inner_width, width_mode, inner_height, height_mode);
    let style = node.style_ref();
    let width = resolve::bound_axis(
      &style,
      FlexDirection::Row,
      if width_mode == MeasureMode::Undefined || width_mode == MeasureMode::AtMost {
        measured.width + pb_row
      } else {
        available_width - margin_row
      },
      owner_width,
      owner_width,
    );
    let height = resolve::bound_axis(
      &style,
      FlexDirection::Column,
      if height_mode == MeasureMode::Undefined || height_mode == MeasureMode::AtMost {
        measured.height + pb_column
      } else {
        available_height - margin_column
      },
      owner_height,
      owner_width,
    );
    drop(style);
    node.layout_mut().measured_dimensions = [width, height];
  }
}

/// A childless node without a measure callback collapses to its padding
/// and border under loose constraints.
fn measure_empty_container(
  node: &Node,
  available_width: f32,
  available_height: f32,
  width_mode: MeasureMode,
  height_mode: MeasureMode,
  owner_width: f32,
  owner_height: f32,
) {
  let style = node.style_ref();
  let pb_row = resolve::padding_and_border_for_axis(&style, FlexDirection::Row, owner_width);
  let pb_column = resolve::padding_and_border_for_axis(&style, FlexDirection::Column, owner_width);
  let margin_row = resolve::margin_for_axis(&style, FlexDirection::Row, owner_width);
  let margin_column = resolve::margin_for_axis(&style, FlexDirection::Column, owner_width);

  let width = resolve::bound_axis(
    &style,
    FlexDirection::Row,
    if width_mode == MeasureMode::Undefined || width_mode == MeasureMode::AtMost {
      pb_row
    } else {
      available_width - margin_row
    },
    owner_width,
    owner_width,
  );
  let height = resolve::bound_axis(
    &style,
    FlexDirection::Column,
    if height_mode == MeasureMode::Undefined || height_mode == MeasureMode::AtMost {
      pb_column
    } else {
      available_height - margin_column
    },
    owner_height,
    owner_width,
  );
  drop(style);
  node.layout_mut().measured_dimensions = [width, height];
}

/// Answers measure-only requests whose result is forced by the constraints
/// alone. Returns false when the children actually have to be visited.
fn measure_fixed_size(
  node: &Node,
  available_width: f32,
  available_height: f32,
  width_mode: MeasureMode,
  height_mode: MeasureMode,
  owner_width: f32,
  owner_height: f32,
) -> bool {
  if (width_mode == MeasureMode::AtMost && available_width <= 0.0)
    || (height_mode == MeasureMode::AtMost && available_height <= 0.0)
    || (width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly)
  {
    let style = node.style_ref();
    let margin_row = resolve::margin_for_axis(&style, FlexDirection::Row, owner_width);
    let margin_column = resolve::margin_for_axis(&style, FlexDirection::Column, owner_width);

    let width = resolve::bound_axis(
      &style,
      FlexDirection::Row,
      if is_undefined(available_width)
        || (width_mode == MeasureMode::AtMost && available_width < 0.0)
      {
        0.0
      } else {
        available_width - margin_row
      },
      owner_width,
      owner_width,
    );
    let height = resolve::bound_axis(
      &style,
      FlexDirection::Column,
      if is_undefined(available_height)
        || (height_mode == MeasureMode::AtMost && available_height < 0.0)
      {
        0.0
      } else {
        available_height - margin_column
      },
      owner_height,
      owner_width,
    );
    drop(style);
    node.layout_mut().measured_dimensions = [width, height];
    return true;
  }
  false
}

/// Computes the flex basis of one child, measuring the child when neither
/// the basis nor the main-axis dimension pins it down.
///
/// The basis is floored at the child's own padding and border so shrinking
/// never collapses the box below its chrome.
#[allow(clippy::too_many_arguments)]
fn compute_child_flex_basis(
  node: &Node,
  child: &Node,
  width: f32,
  width_mode: MeasureMode,
  height: f32,
  owner_width: f32,
  owner_height: f32,
  height_mode: MeasureMode,
  direction: Direction,
  session: &mut LayoutSession,
) {
  let main_axis = node.style_ref().flex_direction.resolve(direction);
  let is_main_axis_row = main_axis.is_row();
  let main_axis_size = if is_main_axis_row { width } else { height };
  let main_axis_owner_size = if is_main_axis_row { owner_width } else { owner_height };

  let resolved_flex_basis = child.resolved_flex_basis().resolve(main_axis_owner_size);
  let is_row_style_dim_defined =
    resolve::is_style_dim_defined(child, FlexDirection::Row, owner_width);
  let is_column_style_dim_defined =
    resolve::is_style_dim_defined(child, FlexDirection::Column, owner_height);

  if is_defined(resolved_flex_basis) && is_defined(main_axis_size) {
    let needs_refresh = {
      let child_layout = child.layout_ref();
      is_undefined(child_layout.computed_flex_basis)
        || (child
          .config()
          .is_experimental_feature_enabled(ExperimentalFeature::WebFlexBasis)
          && child_layout.computed_flex_basis_generation != session.generation())
    };
    if needs_refresh {
      let floor =
        resolve::padding_and_border_for_axis(&child.style_ref(), main_axis, owner_width);
      child.layout_mut().computed_flex_basis = resolved_flex_basis.max(floor);
    }
  } else if is_main_axis_row && is_row_style_dim_defined {
    // The width is definite, so use that as the flex basis.
    let resolved = child.resolved_dimension(Dimension::Width).resolve(owner_width);
    let floor =
      resolve::padding_and_border_for_axis(&child.style_ref(), FlexDirection::Row, owner_width);
    child.layout_mut().computed_flex_basis = resolved.max(floor);
  } else if !is_main_axis_row && is_column_style_dim_defined {
    let resolved = child.resolved_dimension(Dimension::Height).resolve(owner_height);
    let floor =
      resolve::padding_and_border_for_axis(&child.style_ref(), FlexDirection::Column, owner_width);
    child.layout_mut().computed_flex_basis = resolved.max(floor);
  } else {
    // No definite basis. Measure the child to get its content main size.
    let mut child_width = UNDEFINED;
    let mut child_height = UNDEFINED;
    let mut child_width_mode = MeasureMode::Undefined;
    let mut child_height_mode = MeasureMode::Undefined;

    let (margin_row, margin_column, child_aspect_ratio) = {
      let child_style = child.style_ref();
      (
        resolve::margin_for_axis(&child_style, FlexDirection::Row, owner_width),
        resolve::margin_for_axis(&child_style, FlexDirection::Column, owner_width),
        child_style.aspect_ratio,
      )
    };

    if is_row_style_dim_defined {
      child_width =
        child.resolved_dimension(Dimension::Width).resolve(owner_width) + margin_row;
      child_width_mode = MeasureMode::Exactly;
    }
    if is_column_style_dim_defined {
      child_height =
        child.resolved_dimension(Dimension::Height).resolve(owner_height) + margin_column;
      child_height_mode = MeasureMode::Exactly;
    }

    // Scroll containers keep their main axis unconstrained so the content
    // can overflow; every other overflow mode caps children at the
    // available size.
    let overflow = node.style_ref().overflow;
    if (!is_main_axis_row && overflow == Overflow::Scroll) || overflow != Overflow::Scroll {
      if is_undefined(child_width) && is_defined(width) {
        child_width = width;
        child_width_mode = MeasureMode::AtMost;
      }
    }
    if (is_main_axis_row && overflow == Overflow::Scroll) || overflow != Overflow::Scroll {
      if is_undefined(child_height) && is_defined(height) {
        child_height = height;
        child_height_mode = MeasureMode::AtMost;
      }
    }

    if let Some(ratio) = child_aspect_ratio {
      if !is_main_axis_row && child_width_mode == MeasureMode::Exactly {
        child_height = (child_width - margin_row) / ratio;
        child_height_mode = MeasureMode::Exactly;
      } else if is_main_axis_row && child_height_mode == MeasureMode::Exactly {
        child_width = (child_height - margin_column) * ratio;
        child_width_mode = MeasureMode::Exactly;
      }
    }

    // A stretching child with no cross size of its own fills the container
    // exactly, so measure it at that size straight away.
    let has_exact_width = is_defined(width) && width_mode == MeasureMode::Exactly;
    let child_width_stretch = child_alignment(node, child) == Align::Stretch
      && child_width_mode != MeasureMode::Exactly;
    if !is_main_axis_row && !is_row_style_dim_defined && has_exact_width && child_width_stretch {
      child_width = width;
      child_width_mode = MeasureMode::Exactly;
      if let Some(ratio) = child_aspect_ratio {
        child_height = (child_width - margin_row) / ratio;
        child_height_mode = MeasureMode::Exactly;
      }
    }

    let has_exact_height = is_defined(height) && height_mode == MeasureMode::Exactly;
    let child_height_stretch = child_alignment(node, child) == Align::Stretch
      && child_height_mode != MeasureMode::Exactly;
    if is_main_axis_row && !is_column_style_dim_defined && has_exact_height && child_height_stretch
    {
      child_height = height;
      child_height_mode = MeasureMode::Exactly;
      if let Some(ratio) = child_aspect_ratio {
        child_width = (child_height - margin_column) * ratio;
        child_width_mode = MeasureMode::Exactly;
      }
    }

    let (child_width_mode, child_width) = resolve::constrain_max_size_for_mode(
      child,
      FlexDirection::Row,
      owner_width,
      owner_width,
      child_width_mode,
      child_width,
    );
    let (child_height_mode, child_height) = resolve::constrain_max_size_for_mode(
      child,
      FlexDirection::Column,
      owner_height,
      owner_width,
      child_height_mode,
      child_height,
    );

    layout_node(
      child,
      child_width,
      child_height,
      direction,
      child_width_mode,
      child_height_mode,
      owner_width,
      owner_height,
      false,
      "measure",
      session,
    );

    let measured_main = child.layout_ref().measured_dimensions[main_axis.dimension().index()];
    let floor = resolve::padding_and_border_for_axis(&child.style_ref(), main_axis, owner_width);
    child.layout_mut().computed_flex_basis = measured_main.max(floor);
  }
  child.layout_mut().computed_flex_basis_generation = session.generation();
}

/// Lays out one absolutely positioned child against the node's padding
/// box. Sizes come from the child's dimensions, from opposing offsets, or
/// from measuring the content; positions come from the offsets, with the
/// container's justify/align rules filling in unset axes.
fn layout_absolute_child(
  node: &Node,
  child: &Node,
  width: f32,
  width_mode: MeasureMode,
  height: f32,
  direction: Direction,
  session: &mut LayoutSession,
) {
  let main_axis = node.style_ref().flex_direction.resolve(direction);
  let cross_axis = main_axis.cross(direction);
  let is_main_axis_row = main_axis.is_row();

  let mut child_width = UNDEFINED;
  let mut child_height = UNDEFINED;

  let (margin_row, margin_column) = {
    let child_style = child.style_ref();
    (
      resolve::margin_for_axis(&child_style, FlexDirection::Row, width),
      resolve::margin_for_axis(&child_style, FlexDirection::Column, width),
    )
  };

  if resolve::is_style_dim_defined(child, FlexDirection::Row, width) {
    child_width = child.resolved_dimension(Dimension::Width).resolve(width) + margin_row;
  } else {
    // Both left and right offsets pin the width.
    let child_style = child.style_ref();
    if resolve::is_leading_position_defined(&child_style, FlexDirection::Row)
      && resolve::is_trailing_position_defined(&child_style, FlexDirection::Row)
    {
      let node_width = node.layout_ref().measured_dimensions[Dimension::Width.index()];
      let node_style = node.style_ref();
      child_width = node_width
        - (resolve::leading_border(&node_style, FlexDirection::Row)
          + resolve::trailing_border(&node_style, FlexDirection::Row))
        - (resolve::leading_position(&child_style, FlexDirection::Row, width)
          + resolve::trailing_position(&child_style, FlexDirection::Row, width));
      child_width = resolve::bound_axis(&child_style, FlexDirection::Row, child_width, width, width);
    }
  }

  if resolve::is_style_dim_defined(child, FlexDirection::Column, height) {
    child_height = child.resolved_dimension(Dimension::Height).resolve(height) + margin_column;
  } else {
    let child_style = child.style_ref();
    if resolve::is_leading_position_defined(&child_style, FlexDirection::Column)
      && resolve::is_trailing_position_defined(&child_style, FlexDirection::Column)
    {
      let node_height = node.layout_ref().measured_dimensions[Dimension::Height.index()];
      let node_style = node.style_ref();
      child_height = node_height
        - (resolve::leading_border(&node_style, FlexDirection::Column)
          + resolve::trailing_border(&node_style, FlexDirection::Column))
        - (resolve::leading_position(&child_style, FlexDirection::Column, height)
          + resolve::trailing_position(&child_style, FlexDirection::Column, height));
      child_height =
        resolve::bound_axis(&child_style, FlexDirection::Column, child_height, height, width);
    }
  }

  // One known axis plus an aspect ratio determines the other.
  if is_undefined(child_width) != is_undefined(child_height) {
    if let Some(ratio) = child.style_ref().aspect_ratio {
      if is_undefined(child_width) {
        child_width = margin_row + (child_height - margin_column) * ratio;
      } else if is_undefined(child_height) {
        child_height = margin_column + (child_width - margin_row) / ratio;
      }
    }
  }

  if is_undefined(child_width) || is_undefined(child_height) {
    let mut child_width_mode = if is_undefined(child_width) {
      MeasureMode::Undefined
    } else {
      MeasureMode::Exactly
    };
    let child_height_mode = if is_undefined(child_height) {
      MeasureMode::Undefined
    } else {
      MeasureMode::Exactly
    };

    // In a column container a known width still bounds the child, letting
    // text inside wrap instead of running wide. Matches browser behavior.
    if !is_main_axis_row
      && is_undefined(child_width)
      && width_mode != MeasureMode::Undefined
      && width > 0.0
    {
      child_width = width;
      child_width_mode = MeasureMode::AtMost;
    }

    layout_node(
      child,
      child_width,
      child_height,
      direction,
      child_width_mode,
      child_height_mode,
      child_width,
      child_height,
      false,
      "abs-measure",
      session,
    );
    child_width = child.layout_ref().measured_dimensions[Dimension::Width.index()]
      + resolve::margin_for_axis(&child.style_ref(), FlexDirection::Row, width);
    child_height = child.layout_ref().measured_dimensions[Dimension::Height.index()]
      + resolve::margin_for_axis(&child.style_ref(), FlexDirection::Column, width);
  }

  layout_node(
    child,
    child_width,
    child_height,
    direction,
    MeasureMode::Exactly,
    MeasureMode::Exactly,
    child_width,
    child_height,
    true,
    "abs-layout",
    session,
  );

  let child_style = child.style_ref();
  let node_style = node.style_ref();

  let node_main = node.layout_ref().measured_dimensions[main_axis.dimension().index()];
  let child_main = child.layout_ref().measured_dimensions[main_axis.dimension().index()];
  if resolve::is_trailing_position_defined(&child_style, main_axis)
    && !resolve::is_leading_position_defined(&child_style, main_axis)
  {
    let position = node_main
      - child_main
      - resolve::trailing_border(&node_style, main_axis)
      - resolve::trailing_margin(&child_style, main_axis, width)
      - resolve::trailing_position(
        &child_style,
        main_axis,
        if is_main_axis_row { width } else { height },
      );
    child.layout_mut().position[main_axis.leading_edge().index()] = position;
  } else if !resolve::is_leading_position_defined(&child_style, main_axis)
    && node_style.justify_content == JustifyContent::Center
  {
    child.layout_mut().position[main_axis.leading_edge().index()] =
      (node_main - child_main) / 2.0;
  } else if !resolve::is_leading_position_defined(&child_style, main_axis)
    && node_style.justify_content == JustifyContent::FlexEnd
  {
    child.layout_mut().position[main_axis.leading_edge().index()] = node_main - child_main;
  }

  let node_cross = node.layout_ref().measured_dimensions[cross_axis.dimension().index()];
  let child_cross = child.layout_ref().measured_dimensions[cross_axis.dimension().index()];
  if resolve::is_trailing_position_defined(&child_style, cross_axis)
    && !resolve::is_leading_position_defined(&child_style, cross_axis)
  {
    let position = node_cross
      - child_cross
      - resolve::trailing_border(&node_style, cross_axis)
      - resolve::trailing_margin(&child_style, cross_axis, width)
      - resolve::trailing_position(
        &child_style,
        cross_axis,
        if is_main_axis_row { height } else { width },
      );
    child.layout_mut().position[cross_axis.leading_edge().index()] = position;
  } else if !resolve::is_leading_position_defined(&child_style, cross_axis)
    && child_alignment(node, child) == Align::Center
  {
    child.layout_mut().position[cross_axis.leading_edge().index()] =
      (node_cross - child_cross) / 2.0;
  } else if !resolve::is_leading_position_defined(&child_style, cross_axis)
    && ((child_alignment(node, child) == Align::FlexEnd)
      != (node_style.flex_wrap == Wrap::WrapReverse))
  {
    child.layout_mut().position[cross_axis.leading_edge().index()] = node_cross - child_cross;
  }
}

/// One full run of the algorithm over a node. `perform_layout` false means
/// only the measured dimensions are needed; positions and final child
/// layouts are skipped where possible.
#[allow(clippy::too_many_arguments)]
fn compute_layout(
  node: &Node,
  available_width: f32,
  available_height: f32,
  owner_direction: Direction,
  width_measure_mode: MeasureMode,
  height_measure_mode: MeasureMode,
  owner_width: f32,
  owner_height: f32,
  perform_layout: bool,
  session: &mut LayoutSession,
) {
  if is_undefined(available_width) && width_measure_mode != MeasureMode::Undefined {
    node.config().log(
      LogLevel::Fatal,
      "available width is indefinite so the width measure mode must be undefined",
    );
  }
  if is_undefined(available_height) && height_measure_mode != MeasureMode::Undefined {
    node.config().log(
      LogLevel::Fatal,
      "available height is indefinite so the height measure mode must be undefined",
    );
  }

  let direction = resolve_direction(node, owner_direction);

  // Physical margins, borders and padding become readable from the layout
  // once resolved against the writing direction.
  let flex_row_direction = FlexDirection::Row.resolve(direction);
  let flex_column_direction = FlexDirection::Column.resolve(direction);
  {
    let style = node.style_ref();
    let mut layout = node.layout_mut();
    layout.direction = direction;
    layout.margin[Edge::Start.index()] =
      resolve::leading_margin(&style, flex_row_direction, owner_width);
    layout.margin[Edge::End.index()] =
      resolve::trailing_margin(&style, flex_row_direction, owner_width);
    layout.margin[Edge::Top.index()] =
      resolve::leading_margin(&style, flex_column_direction, owner_width);
    layout.margin[Edge::Bottom.index()] =
      resolve::trailing_margin(&style, flex_column_direction, owner_width);

    layout.border[Edge::Start.index()] = resolve::leading_border(&style, flex_row_direction);
    layout.border[Edge::End.index()] = resolve::trailing_border(&style, flex_row_direction);
    layout.border[Edge::Top.index()] = resolve::leading_border(&style, flex_column_direction);
    layout.border[Edge::Bottom.index()] = resolve::trailing_border(&style, flex_column_direction);

    layout.padding[Edge::Start.index()] =
      resolve::leading_padding(&style, flex_row_direction, owner_width);
    layout.padding[Edge::End.index()] =
      resolve::trailing_padding(&style, flex_row_direction, owner_width);
    layout.padding[Edge::Top.index()] =
      resolve::leading_padding(&style, flex_column_direction, owner_width);
    layout.padding[Edge::Bottom.index()] =
      resolve::trailing_padding(&style, flex_column_direction, owner_width);
  }

  if node.has_measure_func() {
    measure_with_callback(
      node,
      available_width,
      available_height,
      width_measure_mode,
      height_measure_mode,
      owner_width,
      owner_height,
    );
    return;
  }

  let child_count = node.child_count();
  if child_count == 0 {
    measure_empty_container(
      node,
      available_width,
      available_height,
      width_measure_mode,
      height_measure_mode,
      owner_width,
      owner_height,
    );
    return;
  }

  // Measure-only requests can sometimes be answered from the constraints
  // without visiting any children.
  if !perform_layout
    && measure_fixed_size(
      node,
      available_width,
      available_height,
      width_measure_mode,
      height_measure_mode,
      owner_width,
      owner_height,
    )
  {
    return;
  }

  // From here on children will be written to, so stop sharing them.
  node.clone_children_if_needed();
  node.layout_mut().had_overflow = false;

  // Axis bookkeeping for the rest of the pass.
  let node_style = node.style_ref();
  let main_axis = node_style.flex_direction.resolve(direction);
  let cross_axis = main_axis.cross(direction);
  let is_main_axis_row = main_axis.is_row();
  let justify_content = node_style.justify_content;
  let align_content = node_style.align_content;
  let flex_wrap = node_style.flex_wrap;
  let overflow = node_style.overflow;
  let is_node_flex_wrap = flex_wrap != Wrap::NoWrap;
  let min_main_dimension = node_style.min_dimensions[main_axis.dimension().index()];

  let main_axis_owner_size = if is_main_axis_row { owner_width } else { owner_height };
  let cross_axis_owner_size = if is_main_axis_row { owner_height } else { owner_width };

  let leading_padding_and_border_main =
    resolve::leading_padding_and_border(&node_style, main_axis, owner_width);
  let trailing_padding_and_border_main =
    resolve::trailing_padding_and_border(&node_style, main_axis, owner_width);
  let leading_padding_and_border_cross =
    resolve::leading_padding_and_border(&node_style, cross_axis, owner_width);
  let padding_and_border_axis_main =
    resolve::padding_and_border_for_axis(&node_style, main_axis, owner_width);
  let padding_and_border_axis_cross =
    resolve::padding_and_border_for_axis(&node_style, cross_axis, owner_width);

  let mut measure_mode_main_dim = if is_main_axis_row {
    width_measure_mode
  } else {
    height_measure_mode
  };
  let measure_mode_cross_dim = if is_main_axis_row {
    height_measure_mode
  } else {
    width_measure_mode
  };

  let padding_and_border_axis_row = if is_main_axis_row {
    padding_and_border_axis_main
  } else {
    padding_and_border_axis_cross
  };
  let padding_and_border_axis_column = if is_main_axis_row {
    padding_and_border_axis_cross
  } else {
    padding_and_border_axis_main
  };

  let margin_axis_row = resolve::margin_for_axis(&node_style, FlexDirection::Row, owner_width);
  let margin_axis_column =
    resolve::margin_for_axis(&node_style, FlexDirection::Column, owner_width);

  // Available inner size, clamped by min/max when it is definite.
  let min_inner_width =
    node_style.min_dimensions[Dimension::Width.index()].resolve(owner_width)
      - padding_and_border_axis_row;
  let max_inner_width =
    node_style.max_dimensions[Dimension::Width.index()].resolve(owner_width)
      - padding_and_border_axis_row;
  let min_inner_height =
    node_style.min_dimensions[Dimension::Height.index()].resolve(owner_height)
      - padding_and_border_axis_column;
  let max_inner_height =
    node_style.max_dimensions[Dimension::Height.index()].resolve(owner_height)
      - padding_and_border_axis_column;
  drop(node_style);

  let min_inner_main_dim = if is_main_axis_row { min_inner_width } else { min_inner_height };
  let max_inner_main_dim = if is_main_axis_row { max_inner_width } else { max_inner_height };

  let mut available_inner_width = available_width - margin_axis_row - padding_and_border_axis_row;
  if is_defined(available_inner_width) {
    available_inner_width = available_inner_width.min(max_inner_width).max(min_inner_width);
  }
  let mut available_inner_height =
    available_height - margin_axis_column - padding_and_border_axis_column;
  if is_defined(available_inner_height) {
    available_inner_height =
      available_inner_height.min(max_inner_height).max(min_inner_height);
  }

  let mut available_inner_main_dim = if is_main_axis_row {
    available_inner_width
  } else {
    available_inner_height
  };
  let available_inner_cross_dim = if is_main_axis_row {
    available_inner_height
  } else {
    available_inner_width
  };

  // A lone grow-and-shrink child under an exact main size will end up at
  // exactly the free space, so its basis can start at zero unmeasured.
  let mut single_flex_child: Option<Node> = None;
  if measure_mode_main_dim == MeasureMode::Exactly {
    for child in node.children_vec() {
      if single_flex_child.is_some() {
        if child.is_flexible() {
          single_flex_child = None;
          break;
        }
      } else if child.resolve_flex_grow() > 0.0 && child.resolve_flex_shrink() > 0.0 {
        single_flex_child = Some(child);
      }
    }
  }

  // Give every in-flow child a flex basis; collect the absolute ones.
  let children = node.children_vec();
  let mut absolute_children: Vec<Node> = Vec::new();
  let mut total_outer_flex_basis = 0.0_f32;

  for child in &children {
    if child.style_ref().display == Display::None {
      zero_layout_recursively(child);
      child.set_has_new_layout(true);
      child.set_dirty_flag(false);
      continue;
    }
    child.resolve_dimensions();

    if perform_layout {
      // Initial position from offsets and margins; justification moves it later.
      let child_direction = resolve_direction(child, direction);
      child.update_position(
        child_direction,
        available_inner_main_dim,
        available_inner_cross_dim,
        available_inner_width,
      );
    }

    if child.style_ref().position_type == PositionType::Absolute {
      absolute_children.push(child.clone());
    } else if single_flex_child.as_ref().is_some_and(|single| child.ptr_eq(single)) {
      let mut child_layout = child.layout_mut();
      child_layout.computed_flex_basis_generation = session.generation();
      child_layout.computed_flex_basis = 0.0;
    } else {
      compute_child_flex_basis(
        node,
        child,
        available_inner_width,
        width_measure_mode,
        available_inner_height,
        available_inner_width,
        available_inner_height,
        height_measure_mode,
        direction,
        session,
      );
    }

    total_outer_flex_basis += child.layout_ref().computed_flex_basis
      + resolve::margin_for_axis(&child.style_ref(), main_axis, available_inner_width);
  }

  let flex_basis_overflows = if measure_mode_main_dim == MeasureMode::Undefined {
    false
  } else {
    total_outer_flex_basis > available_inner_main_dim
  };
  if is_node_flex_wrap && flex_basis_overflows && measure_mode_main_dim == MeasureMode::AtMost {
    measure_mode_main_dim = MeasureMode::Exactly;
  }

  // Walk the children line by line.
  let mut start_of_line_index = 0usize;
  let mut end_of_line_index = 0usize;
  let mut line_count = 0usize;
  let mut total_line_cross_dim = 0.0_f32;
  let mut max_line_main_dim = 0.0_f32;

  while end_of_line_index < child_count {
    let mut items_on_line = 0usize;
    let mut size_consumed_on_current_line = 0.0_f32;
    let mut size_consumed_including_min_constraint = 0.0_f32;
    let mut total_flex_grow_factors = 0.0_f32;
    let mut total_flex_shrink_scaled_factors = 0.0_f32;
    let mut relative_children: Vec<Node> = Vec::new();

    // Fill the line until an item no longer fits (or always, when not
    // wrapping). An item's contribution is its clamped basis plus margins.
    for i in start_of_line_index..child_count {
      let child = &children[i];
      if child.style_ref().display == Display::None {
        end_of_line_index += 1;
        continue;
      }
      child.set_line_index(line_count);

      if child.style_ref().position_type != PositionType::Absolute {
        let (child_margin_main_axis, flex_basis_with_min_and_max) = {
          let child_style = child.style_ref();
          let margin =
            resolve::margin_for_axis(&child_style, main_axis, available_inner_width);
          let computed = child.layout_ref().computed_flex_basis;
          let with_max = child_style.max_dimensions[main_axis.dimension().index()]
            .resolve(main_axis_owner_size)
            .min(computed);
          let with_min_and_max = child_style.min_dimensions[main_axis.dimension().index()]
            .resolve(main_axis_owner_size)
            .max(with_max);
          (margin, with_min_and_max)
        };

        if size_consumed_including_min_constraint
          + flex_basis_with_min_and_max
          + child_margin_main_axis
          > available_inner_main_dim
          && is_node_flex_wrap
          && items_on_line > 0
        {
          break;
        }

        size_consumed_including_min_constraint +=
          flex_basis_with_min_and_max + child_margin_main_axis;
        size_consumed_on_current_line += flex_basis_with_min_and_max + child_margin_main_axis;
        items_on_line += 1;

        if child.is_flexible() {
          total_flex_grow_factors += child.resolve_flex_grow();
          // Shrink factors scale with the child's basis, grow factors do not.
          total_flex_shrink_scaled_factors +=
            -child.resolve_flex_shrink() * child.layout_ref().computed_flex_basis;
        }

        relative_children.push(child.clone());
      }
      end_of_line_index += 1;
    }

    // Fractional factor totals distribute as if they summed to one.
    if total_flex_grow_factors > 0.0 && total_flex_grow_factors < 1.0 {
      total_flex_grow_factors = 1.0;
    }
    if total_flex_shrink_scaled_factors > 0.0 && total_flex_shrink_scaled_factors < 1.0 {
      total_flex_shrink_scaled_factors = 1.0;
    }

    let can_skip_flex = !perform_layout && measure_mode_cross_dim == MeasureMode::Exactly;

    // Free space on the line. Without an exact main size the container
    // tightens to its content first, still honoring min/max.
    let mut size_based_on_content = false;
    if measure_mode_main_dim != MeasureMode::Exactly {
      if is_defined(min_inner_main_dim) && size_consumed_on_current_line < min_inner_main_dim {
        available_inner_main_dim = min_inner_main_dim;
      } else if is_defined(max_inner_main_dim)
        && size_consumed_on_current_line > max_inner_main_dim
      {
        available_inner_main_dim = max_inner_main_dim;
      } else {
        if !node.config().use_legacy_stretch()
          && (total_flex_grow_factors == 0.0 || node.resolve_flex_grow() == 0.0)
        {
          // Nothing can grow, so the consumed size is the needed size.
          available_inner_main_dim = size_consumed_on_current_line;
        }
        size_based_on_content = !node.config().use_legacy_stretch();
      }
    }

    let mut remaining_free_space = 0.0_f32;
    if !size_based_on_content && is_defined(available_inner_main_dim) {
      remaining_free_space = available_inner_main_dim - size_consumed_on_current_line;
    } else if size_consumed_on_current_line < 0.0 {
      // Indefinite container sized by content: free space is what brings
      // the negative content size back to zero.
      remaining_free_space = -size_consumed_on_current_line;
    }

    let original_remaining_free_space = remaining_free_space;
    let mut delta_free_space = 0.0_f32;

    if !can_skip_flex {
      // First pass: find items whose min/max constraints will distort the
      // share they would get, and take them out of the distribution so the
      // second pass divides the corrected free space among the rest.
      let mut delta_flex_shrink_scaled_factors = 0.0_f32;
      let mut delta_flex_grow_factors = 0.0_f32;

      for child in &relative_children {
        let child_flex_basis = {
          let child_style = child.style_ref();
          let dim = main_axis.dimension().index();
          child_style.max_dimensions[dim]
            .resolve(main_axis_owner_size)
            .min(
              child_style.min_dimensions[dim]
                .resolve(main_axis_owner_size)
                .max(child.layout_ref().computed_flex_basis),
            )
        };

        if remaining_free_space < 0.0 {
          let flex_shrink_scaled_factor = -child.resolve_flex_shrink() * child_flex_basis;
          if flex_shrink_scaled_factor != 0.0 {
            let base_main_size = child_flex_basis
              + remaining_free_space / total_flex_shrink_scaled_factors
                * flex_shrink_scaled_factor;
            let bound_main_size = resolve::bound_axis(
              &child.style_ref(),
              main_axis,
              base_main_size,
              available_inner_main_dim,
              available_inner_width,
            );
            if base_main_size != bound_main_size {
              delta_free_space -= bound_main_size - child_flex_basis;
              delta_flex_shrink_scaled_factors -= flex_shrink_scaled_factor;
            }
          }
        } else if remaining_free_space > 0.0 {
          let flex_grow_factor = child.resolve_flex_grow();
          if flex_grow_factor != 0.0 {
            let base_main_size = child_flex_basis
              + remaining_free_space / total_flex_grow_factors * flex_grow_factor;
            let bound_main_size = resolve::bound_axis(
              &child.style_ref(),
              main_axis,
              base_main_size,
              available_inner_main_dim,
              available_inner_width,
            );
            if base_main_size != bound_main_size {
              delta_free_space -= bound_main_size - child_flex_basis;
              delta_flex_grow_factors -= flex_grow_factor;
            }
          }
        }
      }

      total_flex_shrink_scaled_factors += delta_flex_shrink_scaled_factors;
      total_flex_grow_factors += delta_flex_grow_factors;
      remaining_free_space += delta_free_space;

      // Second pass: fix each item's main size and lay it out with the
      // matching cross constraint.
      delta_free_space = 0.0;
      for child in &relative_children {
        let child_flex_basis = {
          let child_style = child.style_ref();
          let dim = main_axis.dimension().index();
          child_style.max_dimensions[dim]
            .resolve(main_axis_owner_size)
            .min(
              child_style.min_dimensions[dim]
                .resolve(main_axis_owner_size)
                .max(child.layout_ref().computed_flex_basis),
            )
        };
        let mut updated_main_size = child_flex_basis;

        if remaining_free_space < 0.0 {
          let flex_shrink_scaled_factor = -child.resolve_flex_shrink() * child_flex_basis;
          if flex_shrink_scaled_factor != 0.0 {
            let child_size = if total_flex_shrink_scaled_factors == 0.0 {
              child_flex_basis + flex_shrink_scaled_factor
            } else {
              child_flex_basis
                + (remaining_free_space / total_flex_shrink_scaled_factors)
                  * flex_shrink_scaled_factor
            };
            updated_main_size = resolve::bound_axis(
              &child.style_ref(),
              main_axis,
              child_size,
              available_inner_main_dim,
              available_inner_width,
            );
          }
        } else if remaining_free_space > 0.0 {
          let flex_grow_factor = child.resolve_flex_grow();
          if flex_grow_factor != 0.0 {
            updated_main_size = resolve::bound_axis(
              &child.style_ref(),
              main_axis,
              child_flex_basis
                + remaining_free_space / total_flex_grow_factors * flex_grow_factor,
              available_inner_main_dim,
              available_inner_width,
            );
          }
        }

        delta_free_space -= updated_main_size - child_flex_basis;

        let (margin_main, margin_cross, child_aspect_ratio) = {
          let child_style = child.style_ref();
          (
            resolve::margin_for_axis(&child_style, main_axis, available_inner_width),
            resolve::margin_for_axis(&child_style, cross_axis, available_inner_width),
            child_style.aspect_ratio,
          )
        };

        let mut child_main_size = updated_main_size + margin_main;
        let child_main_mode = MeasureMode::Exactly;
        let mut child_cross_size;
        let mut child_cross_mode;

        if let Some(ratio) = child_aspect_ratio {
          child_cross_size = if is_main_axis_row {
            (child_main_size - margin_main) / ratio
          } else {
            (child_main_size - margin_main) * ratio
          };
          child_cross_mode = MeasureMode::Exactly;
          child_cross_size += margin_cross;
        } else if is_defined(available_inner_cross_dim)
          && !resolve::is_style_dim_defined(child, cross_axis, available_inner_cross_dim)
          && measure_mode_cross_dim == MeasureMode::Exactly
          && !(is_node_flex_wrap && flex_basis_overflows)
          && child_alignment(node, child) == Align::Stretch
          && !resolve::margin_leading_value(&child.style_ref(), cross_axis).is_auto()
          && !resolve::margin_trailing_value(&child.style_ref(), cross_axis).is_auto()
        {
          child_cross_size = available_inner_cross_dim;
          child_cross_mode = MeasureMode::Exactly;
        } else if !resolve::is_style_dim_defined(child, cross_axis, available_inner_cross_dim) {
          child_cross_size = available_inner_cross_dim;
          child_cross_mode = if is_undefined(child_cross_size) {
            MeasureMode::Undefined
          } else {
            MeasureMode::AtMost
          };
        } else {
          let resolved_cross = child.resolved_dimension(cross_axis.dimension());
          child_cross_size = resolved_cross.resolve(available_inner_cross_dim) + margin_cross;
          let is_loose_percent_measurement = matches!(resolved_cross, Value::Percent(_))
            && measure_mode_cross_dim != MeasureMode::Exactly;
          child_cross_mode = if is_undefined(child_cross_size) || is_loose_percent_measurement {
            MeasureMode::Undefined
          } else {
            MeasureMode::Exactly
          };
        }

        let (child_main_mode, new_main) = resolve::constrain_max_size_for_mode(
          child,
          main_axis,
          available_inner_main_dim,
          available_inner_width,
          child_main_mode,
          child_main_size,
        );
        child_main_size = new_main;
        let (new_cross_mode, new_cross) = resolve::constrain_max_size_for_mode(
          child,
          cross_axis,
          available_inner_cross_dim,
          available_inner_width,
          child_cross_mode,
          child_cross_size,
        );
        child_cross_mode = new_cross_mode;
        child_cross_size = new_cross;

        let requires_stretch_layout =
          !resolve::is_style_dim_defined(child, cross_axis, available_inner_cross_dim)
            && child_alignment(node, child) == Align::Stretch
            && !resolve::margin_leading_value(&child.style_ref(), cross_axis).is_auto()
            && !resolve::margin_trailing_value(&child.style_ref(), cross_axis).is_auto();

        let child_width = if is_main_axis_row { child_main_size } else { child_cross_size };
        let child_height = if is_main_axis_row { child_cross_size } else { child_main_size };
        let child_width_mode = if is_main_axis_row { child_main_mode } else { child_cross_mode };
        let child_height_mode = if is_main_axis_row { child_cross_mode } else { child_main_mode };

        layout_node(
          child,
          child_width,
          child_height,
          direction,
          child_width_mode,
          child_height_mode,
          available_inner_width,
          available_inner_height,
          perform_layout && !requires_stretch_layout,
          "flex",
          session,
        );

        let child_had_overflow = child.layout_ref().had_overflow;
        let mut node_layout = node.layout_mut();
        node_layout.had_overflow |= child_had_overflow;
      }

      remaining_free_space = original_remaining_free_space + delta_free_space;
      let mut node_layout = node.layout_mut();
      node_layout.had_overflow |= remaining_free_space < 0.0;
    }

    // Main-axis justification. Under an at-most constraint leftover space
    // only counts up to the min size; past that the container shrinks.
    if measure_mode_main_dim == MeasureMode::AtMost && remaining_free_space > 0.0 {
      if !min_main_dimension.is_undefined()
        && min_main_dimension.resolve(main_axis_owner_size) >= 0.0
      {
        remaining_free_space = (min_main_dimension.resolve(main_axis_owner_size)
          - (available_inner_main_dim - remaining_free_space))
          .max(0.0);
      } else {
        remaining_free_space = 0.0;
      }
    }

    let mut number_of_auto_margins_on_line = 0usize;
    for child in children.iter().take(end_of_line_index).skip(start_of_line_index) {
      let child_style = child.style_ref();
      if child_style.position_type == PositionType::Relative {
        if resolve::margin_leading_value(&child_style, main_axis).is_auto() {
          number_of_auto_margins_on_line += 1;
        }
        if resolve::margin_trailing_value(&child_style, main_axis).is_auto() {
          number_of_auto_margins_on_line += 1;
        }
      }
    }

    let mut leading_main_dim = 0.0_f32;
    let mut between_main_dim = 0.0_f32;
    if number_of_auto_margins_on_line == 0 {
      match justify_content {
        JustifyContent::Center => {
          leading_main_dim = remaining_free_space / 2.0;
        }
        JustifyContent::FlexEnd => {
          leading_main_dim = remaining_free_space;
        }
        JustifyContent::SpaceBetween => {
          if items_on_line > 1 {
            between_main_dim =
              remaining_free_space.max(0.0) / (items_on_line - 1) as f32;
          } else {
            between_main_dim = 0.0;
          }
        }
        JustifyContent::SpaceEvenly => {
          between_main_dim = remaining_free_space / (items_on_line + 1) as f32;
          leading_main_dim = between_main_dim;
        }
        JustifyContent::SpaceAround => {
          between_main_dim = remaining_free_space / items_on_line as f32;
          leading_main_dim = between_main_dim / 2.0;
        }
        JustifyContent::FlexStart => {}
      }
    }

    let mut main_dim = leading_padding_and_border_main + leading_main_dim;
    let mut cross_dim = 0.0_f32;

    for child in children.iter().take(end_of_line_index).skip(start_of_line_index) {
      let (child_display, child_position_type) = {
        let child_style = child.style_ref();
        (child_style.display, child_style.position_type)
      };
      if child_display == Display::None {
        continue;
      }
      if child_position_type == PositionType::Absolute
        && resolve::is_leading_position_defined(&child.style_ref(), main_axis)
      {
        if perform_layout {
          // An absolute child with an explicit offset is pinned to it.
          let child_style = child.style_ref();
          let position = resolve::leading_position(
            &child_style,
            main_axis,
            available_inner_main_dim,
          ) + resolve::leading_border(&node.style_ref(), main_axis)
            + resolve::leading_margin(&child_style, main_axis, available_inner_width);
          drop(child_style);
          child.layout_mut().position[main_axis.leading_edge().index()] = position;
        }
      } else if child_position_type == PositionType::Relative {
        if resolve::margin_leading_value(&child.style_ref(), main_axis).is_auto() {
          main_dim += remaining_free_space / number_of_auto_margins_on_line as f32;
        }

        if perform_layout {
          child.layout_mut().position[main_axis.leading_edge().index()] += main_dim;
        }

        if resolve::margin_trailing_value(&child.style_ref(), main_axis).is_auto() {
          main_dim += remaining_free_space / number_of_auto_margins_on_line as f32;
        }

        if can_skip_flex {
          // The flex step was skipped, so measured dimensions are stale;
          // advance by the basis instead.
          main_dim += between_main_dim
            + resolve::margin_for_axis(&child.style_ref(), main_axis, available_inner_width)
            + child.layout_ref().computed_flex_basis;
          cross_dim = available_inner_cross_dim;
        } else {
          main_dim +=
            between_main_dim + resolve::dim_with_margin(child, main_axis, available_inner_width);

          // One child per cross slot, so the line is as tall as its
          // tallest child.
          cross_dim =
            cross_dim.max(resolve::dim_with_margin(child, cross_axis, available_inner_width));
        }
      } else if perform_layout {
        let position = child.layout_ref().position[main_axis.leading_edge().index()]
          + resolve::leading_border(&node.style_ref(), main_axis)
          + leading_main_dim;
        child.layout_mut().position[main_axis.leading_edge().index()] = position;
      }
    }

    main_dim += trailing_padding_and_border_main;

    let mut container_cross_axis = available_inner_cross_dim;
    if measure_mode_cross_dim == MeasureMode::Undefined
      || measure_mode_cross_dim == MeasureMode::AtMost
    {
      container_cross_axis = resolve::bound_axis(
        &node.style_ref(),
        cross_axis,
        cross_dim + padding_and_border_axis_cross,
        cross_axis_owner_size,
        owner_width,
      ) - padding_and_border_axis_cross;
    }

    // Without wrapping the line simply takes the container's cross size.
    if !is_node_flex_wrap && measure_mode_cross_dim == MeasureMode::Exactly {
      cross_dim = available_inner_cross_dim;
    }

    cross_dim = resolve::bound_axis(
      &node.style_ref(),
      cross_axis,
      cross_dim + padding_and_border_axis_cross,
      cross_axis_owner_size,
      owner_width,
    ) - padding_and_border_axis_cross;

    // Cross-axis alignment within the line.
    if perform_layout {
      for child in children.iter().take(end_of_line_index).skip(start_of_line_index) {
        let (child_display, child_position_type) = {
          let child_style = child.style_ref();
          (child_style.display, child_style.position_type)
        };
        if child_display == Display::None {
          continue;
        }
        if child_position_type == PositionType::Absolute {
          // Explicit cross offsets win; otherwise border plus margin.
          let is_child_leading_pos_defined =
            resolve::is_leading_position_defined(&child.style_ref(), cross_axis);
          if is_child_leading_pos_defined {
            let child_style = child.style_ref();
            let position = resolve::leading_position(
              &child_style,
              cross_axis,
              available_inner_cross_dim,
            ) + resolve::leading_border(&node.style_ref(), cross_axis)
              + resolve::leading_margin(&child_style, cross_axis, available_inner_width);
            drop(child_style);
            child.layout_mut().position[cross_axis.leading_edge().index()] = position;
          }
          if !is_child_leading_pos_defined
            || is_undefined(
              child.layout_ref().position[cross_axis.leading_edge().index()],
            )
          {
            let position = resolve::leading_border(&node.style_ref(), cross_axis)
              + resolve::leading_margin(&child.style_ref(), cross_axis, available_inner_width);
            child.layout_mut().position[cross_axis.leading_edge().index()] = position;
          }
        } else {
          let mut leading_cross_dim = leading_padding_and_border_cross;
          let alignment = child_alignment(node, child);

          let (leading_margin_auto, trailing_margin_auto) = {
            let child_style = child.style_ref();
            (
              resolve::margin_leading_value(&child_style, cross_axis).is_auto(),
              resolve::margin_trailing_value(&child_style, cross_axis).is_auto(),
            )
          };

          if alignment == Align::Stretch && !leading_margin_auto && !trailing_margin_auto {
            // A stretching child without its own cross size is laid out
            // again at the line's cross size.
            if !resolve::is_style_dim_defined(child, cross_axis, available_inner_cross_dim) {
              let mut child_main_size =
                child.layout_ref().measured_dimensions[main_axis.dimension().index()];
              let child_aspect_ratio = child.style_ref().aspect_ratio;
              let child_cross_size = if let Some(ratio) = child_aspect_ratio {
                resolve::margin_for_axis(&child.style_ref(), cross_axis, available_inner_width)
                  + if is_main_axis_row {
                    child_main_size / ratio
                  } else {
                    child_main_size * ratio
                  }
              } else {
                cross_dim
              };

              child_main_size +=
                resolve::margin_for_axis(&child.style_ref(), main_axis, available_inner_width);

              let (_, child_main_size) = resolve::constrain_max_size_for_mode(
                child,
                main_axis,
                available_inner_main_dim,
                available_inner_width,
                MeasureMode::Exactly,
                child_main_size,
              );
              let (_, child_cross_size) = resolve::constrain_max_size_for_mode(
                child,
                cross_axis,
                available_inner_cross_dim,
                available_inner_width,
                MeasureMode::Exactly,
                child_cross_size,
              );

              let child_width =
                if is_main_axis_row { child_main_size } else { child_cross_size };
              let child_height =
                if is_main_axis_row { child_cross_size } else { child_main_size };

              let child_width_mode = if is_undefined(child_width) {
                MeasureMode::Undefined
              } else {
                MeasureMode::Exactly
              };
              let child_height_mode = if is_undefined(child_height) {
                MeasureMode::Undefined
              } else {
                MeasureMode::Exactly
              };

              layout_node(
                child,
                child_width,
                child_height,
                direction,
                child_width_mode,
                child_height_mode,
                available_inner_width,
                available_inner_height,
                true,
                "stretch",
                session,
              );
            }
          } else {
            let remaining_cross_dim = container_cross_axis
              - resolve::dim_with_margin(child, cross_axis, available_inner_width);

            if leading_margin_auto && trailing_margin_auto {
              leading_cross_dim += (remaining_cross_dim / 2.0).max(0.0);
            } else if trailing_margin_auto {
              // Trailing auto margin eats the space; nothing to move.
            } else if leading_margin_auto {
              leading_cross_dim += remaining_cross_dim.max(0.0);
            } else if alignment == Align::FlexStart {
            } else if alignment == Align::Center {
              leading_cross_dim += remaining_cross_dim / 2.0;
            } else {
              leading_cross_dim += remaining_cross_dim;
            }
          }

          child.layout_mut().position[cross_axis.leading_edge().index()] +=
            total_line_cross_dim + leading_cross_dim;
        }
      }
    }

    total_line_cross_dim += cross_dim;
    max_line_main_dim = max_line_main_dim.max(main_dim);
    line_count += 1;
    start_of_line_index = end_of_line_index;
  }

  // Multi-line content alignment, and the baseline pass that can apply
  // even to a single line.
  if perform_layout
    && (line_count > 1 || uses_baseline_alignment(node))
    && is_defined(available_inner_cross_dim)
  {
    let remaining_align_content_dim = available_inner_cross_dim - total_line_cross_dim;

    let mut cross_dim_lead = 0.0_f32;
    let mut current_lead = leading_padding_and_border_cross;

    match align_content {
      Align::FlexEnd => {
        current_lead += remaining_align_content_dim;
      }
      Align::Center => {
        current_lead += remaining_align_content_dim / 2.0;
      }
      Align::Stretch => {
        if available_inner_cross_dim > total_line_cross_dim {
          cross_dim_lead = remaining_align_content_dim / line_count as f32;
        }
      }
      Align::SpaceAround => {
        if available_inner_cross_dim > total_line_cross_dim {
          current_lead += remaining_align_content_dim / (2 * line_count) as f32;
          if line_count > 1 {
            cross_dim_lead = remaining_align_content_dim / line_count as f32;
          }
        } else {
          current_lead += remaining_align_content_dim / 2.0;
        }
      }
      Align::SpaceBetween => {
        if available_inner_cross_dim > total_line_cross_dim && line_count > 1 {
          cross_dim_lead = remaining_align_content_dim / (line_count - 1) as f32;
        }
      }
      Align::Auto | Align::FlexStart | Align::Baseline => {}
    }

    let mut end_index = 0usize;
    for i in 0..line_count {
      let start_index = end_index;

      // Find the line's extent and height; baselines can push the height
      // past the tallest child.
      let mut line_height = 0.0_f32;
      let mut max_ascent_for_current_line = 0.0_f32;
      let mut max_descent_for_current_line = 0.0_f32;
      let mut ii = start_index;
      while ii < child_count {
        let child = &children[ii];
        let (child_display, child_position_type) = {
          let child_style = child.style_ref();
          (child_style.display, child_style.position_type)
        };
        if child_display == Display::None {
          ii += 1;
          continue;
        }
        if child_position_type == PositionType::Relative {
          if child.line_index() != i {
            break;
          }
          if resolve::is_layout_dim_defined(child, cross_axis) {
            line_height = line_height.max(
              child.layout_ref().measured_dimensions[cross_axis.dimension().index()]
                + resolve::margin_for_axis(
                  &child.style_ref(),
                  cross_axis,
                  available_inner_width,
                ),
            );
          }
          if child_alignment(node, child) == Align::Baseline {
            let ascent = baseline(child)
              + resolve::leading_margin(
                &child.style_ref(),
                FlexDirection::Column,
                available_inner_width,
              );
            let descent = child.layout_ref().measured_dimensions[Dimension::Height.index()]
              + resolve::margin_for_axis(
                &child.style_ref(),
                FlexDirection::Column,
                available_inner_width,
              )
              - ascent;
            max_ascent_for_current_line = max_ascent_for_current_line.max(ascent);
            max_descent_for_current_line = max_descent_for_current_line.max(descent);
            line_height =
              line_height.max(max_ascent_for_current_line + max_descent_for_current_line);
          }
        }
        ii += 1;
      }
      end_index = ii;
      line_height += cross_dim_lead;

      for child in children.iter().take(end_index).skip(start_index) {
        let (child_display, child_position_type) = {
          let child_style = child.style_ref();
          (child_style.display, child_style.position_type)
        };
        if child_display == Display::None {
          continue;
        }
        if child_position_type != PositionType::Relative {
          continue;
        }
        match child_alignment(node, child) {
          Align::FlexStart => {
            let position = current_lead
              + resolve::leading_margin(&child.style_ref(), cross_axis, available_inner_width);
            child.layout_mut().position[cross_axis.leading_edge().index()] = position;
          }
          Align::FlexEnd => {
            let position = current_lead + line_height
              - resolve::trailing_margin(&child.style_ref(), cross_axis, available_inner_width)
              - child.layout_ref().measured_dimensions[cross_axis.dimension().index()];
            child.layout_mut().position[cross_axis.leading_edge().index()] = position;
          }
          Align::Center => {
            let child_height =
              child.layout_ref().measured_dimensions[cross_axis.dimension().index()];
            child.layout_mut().position[cross_axis.leading_edge().index()] =
              current_lead + (line_height - child_height) / 2.0;
          }
          Align::Stretch => {
            let position = current_lead
              + resolve::leading_margin(&child.style_ref(), cross_axis, available_inner_width);
            child.layout_mut().position[cross_axis.leading_edge().index()] = position;

            // Stretch to the line height, unless the child already
            // measured to it.
            if !resolve::is_style_dim_defined(child, cross_axis, available_inner_cross_dim) {
              let (measured_width, measured_height) = {
                let child_layout = child.layout_ref();
                (
                  child_layout.measured_dimensions[Dimension::Width.index()],
                  child_layout.measured_dimensions[Dimension::Height.index()],
                )
              };
              let child_width = if is_main_axis_row {
                measured_width
                  + resolve::margin_for_axis(
                    &child.style_ref(),
                    main_axis,
                    available_inner_width,
                  )
              } else {
                line_height
              };
              let child_height = if !is_main_axis_row {
                measured_height
                  + resolve::margin_for_axis(
                    &child.style_ref(),
                    cross_axis,
                    available_inner_width,
                  )
              } else {
                line_height
              };

              if !(floats_equal(child_width, measured_width)
                && floats_equal(child_height, measured_height))
              {
                layout_node(
                  child,
                  child_width,
                  child_height,
                  direction,
                  MeasureMode::Exactly,
                  MeasureMode::Exactly,
                  available_inner_width,
                  available_inner_height,
                  true,
                  "multiline-stretch",
                  session,
                );
              }
            }
          }
          Align::Baseline => {
            let position = current_lead + max_ascent_for_current_line - baseline(child)
              + resolve::leading_position(
                &child.style_ref(),
                FlexDirection::Column,
                available_inner_cross_dim,
              );
            child.layout_mut().position[Edge::Top.index()] = position;
          }
          Align::Auto | Align::SpaceBetween | Align::SpaceAround => {}
        }
      }

      current_lead += line_height;
    }
  }

  // Final dimensions. The outer constraint sizes the node; content sizes
  // it when the constraint is loose, except scroll containers which keep
  // the available size and report overflow instead.
  {
    let style = node.style_ref();
    let width = resolve::bound_axis(
      &style,
      FlexDirection::Row,
      available_width - margin_axis_row,
      owner_width,
      owner_width,
    );
    let height = resolve::bound_axis(
      &style,
      FlexDirection::Column,
      available_height - margin_axis_column,
      owner_height,
      owner_width,
    );
    drop(style);
    node.layout_mut().measured_dimensions = [width, height];
  }

  if measure_mode_main_dim == MeasureMode::Undefined
    || (overflow != Overflow::Scroll && measure_mode_main_dim == MeasureMode::AtMost)
  {
    let bounded = resolve::bound_axis(
      &node.style_ref(),
      main_axis,
      max_line_main_dim,
      main_axis_owner_size,
      owner_width,
    );
    node.layout_mut().measured_dimensions[main_axis.dimension().index()] = bounded;
  } else if measure_mode_main_dim == MeasureMode::AtMost && overflow == Overflow::Scroll {
    let bounded = (available_inner_main_dim + padding_and_border_axis_main)
      .min(resolve::bound_axis_within_min_and_max(
        &node.style_ref(),
        main_axis,
        max_line_main_dim,
        main_axis_owner_size,
      ))
      .max(padding_and_border_axis_main);
    node.layout_mut().measured_dimensions[main_axis.dimension().index()] = bounded;
  }

  if measure_mode_cross_dim == MeasureMode::Undefined
    || (overflow != Overflow::Scroll && measure_mode_cross_dim == MeasureMode::AtMost)
  {
    let bounded = resolve::bound_axis(
      &node.style_ref(),
      cross_axis,
      total_line_cross_dim + padding_and_border_axis_cross,
      cross_axis_owner_size,
      owner_width,
    );
    node.layout_mut().measured_dimensions[cross_axis.dimension().index()] = bounded;
  } else if measure_mode_cross_dim == MeasureMode::AtMost && overflow == Overflow::Scroll {
    let bounded = (available_inner_cross_dim + padding_and_border_axis_cross)
      .min(resolve::bound_axis_within_min_and_max(
        &node.style_ref(),
        cross_axis,
        total_line_cross_dim + padding_and_border_axis_cross,
        cross_axis_owner_size,
      ))
      .max(padding_and_border_axis_cross);
    node.layout_mut().measured_dimensions[cross_axis.dimension().index()] = bounded;
  }

  // Lines were stacked from the cross start; wrap-reverse flips them.
  if perform_layout && flex_wrap == Wrap::WrapReverse {
    for child in &children {
      if child.style_ref().position_type == PositionType::Relative {
        let node_cross = node.layout_ref().measured_dimensions[cross_axis.dimension().index()];
        let (child_position, child_cross) = {
          let child_layout = child.layout_ref();
          (
            child_layout.position[cross_axis.leading_edge().index()],
            child_layout.measured_dimensions[cross_axis.dimension().index()],
          )
        };
        child.layout_mut().position[cross_axis.leading_edge().index()] =
          node_cross - child_position - child_cross;
      }
    }
  }

  if perform_layout {
    for child in &absolute_children {
      layout_absolute_child(
        node,
        child,
        available_inner_width,
        if is_main_axis_row { measure_mode_main_dim } else { measure_mode_cross_dim },
        available_inner_height,
        direction,
        session,
      );
    }

    // Reversed axes accumulated positions from the wrong edge; convert
    // them to trailing offsets.
    let needs_main_trailing_pos =
      main_axis == FlexDirection::RowReverse || main_axis == FlexDirection::ColumnReverse;
    let needs_cross_trailing_pos =
      cross_axis == FlexDirection::RowReverse || cross_axis == FlexDirection::ColumnReverse;

    if needs_main_trailing_pos || needs_cross_trailing_pos {
      for child in &children {
        if child.style_ref().display == Display::None {
          continue;
        }
        if needs_main_trailing_pos {
          set_trailing_position(node, child, main_axis);
        }
        if needs_cross_trailing_pos {
          set_trailing_position(node, child, cross_axis);
        }
      }
    }
  }
}

/// Cache-aware wrapper around [`compute_layout`].
///
/// Layout and measurement results are cached separately: a node is laid
/// out at most once per pass, but may be measured several times while its
/// container resolves flexible sizes. Returns whether the node's layout
/// was (re)computed rather than served from cache.
#[allow(clippy::too_many_arguments)]
pub(crate) fn layout_node(
  node: &Node,
  available_width: f32,
  available_height: f32,
  owner_direction: Direction,
  width_measure_mode: MeasureMode,
  height_measure_mode: MeasureMode,
  owner_width: f32,
  owner_height: f32,
  perform_layout: bool,
  reason: &str,
  session: &mut LayoutSession,
) -> bool {
  session.enter();

  let need_to_visit_node = {
    let layout = node.layout_ref();
    (node.is_dirty() && layout.generation != session.generation())
      || layout.last_owner_direction != Some(owner_direction)
  };

  if need_to_visit_node {
    // Constraints may produce different results now, drop stale entries.
    let mut layout = node.layout_mut();
    layout.cached_measurements.clear();
    layout.cached_layout = CachedMeasurement::invalid();
  }

  let mut cached_results: Option<CachedMeasurement> = None;
  if !session.cache_disabled() {
    let layout = node.layout_ref();
    if node.has_measure_func() {
      // Measure callbacks are the expensive case, so compatible (not just
      // identical) constraints may reuse an entry.
      let (margin_axis_row, margin_axis_column) = {
        let style = node.style_ref();
        (
          resolve::margin_for_axis(&style, FlexDirection::Row, owner_width),
          resolve::margin_for_axis(&style, FlexDirection::Column, owner_width),
        )
      };
      let point_scale_factor = node.config().point_scale_factor();
      if cache::can_use_cached_measurement(
        width_measure_mode,
        available_width,
        height_measure_mode,
        available_height,
        &layout.cached_layout,
        margin_axis_row,
        margin_axis_column,
        point_scale_factor,
      ) {
        cached_results = Some(layout.cached_layout);
      } else {
        cached_results = layout
          .cached_measurements
          .iter()
          .find(|entry| {
            cache::can_use_cached_measurement(
              width_measure_mode,
              available_width,
              height_measure_mode,
              available_height,
              entry,
              margin_axis_row,
              margin_axis_column,
              point_scale_factor,
            )
          })
          .copied();
      }
    } else if perform_layout {
      if layout.cached_layout.matches_constraints(
        available_width,
        available_height,
        width_measure_mode,
        height_measure_mode,
      ) {
        cached_results = Some(layout.cached_layout);
      }
    } else {
      cached_results = layout
        .cached_measurements
        .iter()
        .find(|entry| {
          entry.matches_constraints(
            available_width,
            available_height,
            width_measure_mode,
            height_measure_mode,
          )
        })
        .copied();
    }
  }

  match cached_results {
    Some(cached) if !need_to_visit_node => {
      node.layout_mut().measured_dimensions = [cached.computed_width, cached.computed_height];
      session.record_cache_hit();

      if session.print_changes() && session.print_skips() {
        node.config().log(
          LogLevel::Verbose,
          &format!("{}{}.{{[skipped] ", session.indent(), session.depth()),
        );
        node.invoke_print();
        node.config().log(
          LogLevel::Verbose,
          &format!(
            "wm: {}, hm: {}, aw: {} ah: {} => d: ({}, {}) {}",
            measure_mode_name(width_measure_mode, perform_layout),
            measure_mode_name(height_measure_mode, perform_layout),
            available_width,
            available_height,
            cached.computed_width,
            cached.computed_height,
            reason
          ),
        );
      }
    }
    _ => {
      if session.print_changes() {
        node.config().log(
          LogLevel::Verbose,
          &format!(
            "{}{}.{{{}",
            session.indent(),
            session.depth(),
            if need_to_visit_node { "*" } else { "" }
          ),
        );
        node.invoke_print();
        node.config().log(
          LogLevel::Verbose,
          &format!(
            "wm: {}, hm: {}, aw: {} ah: {} {}",
            measure_mode_name(width_measure_mode, perform_layout),
            measure_mode_name(height_measure_mode, perform_layout),
            available_width,
            available_height,
            reason
          ),
        );
      }

      compute_layout(
        node,
        available_width,
        available_height,
        owner_direction,
        width_measure_mode,
        height_measure_mode,
        owner_width,
        owner_height,
        perform_layout,
        session,
      );
      if perform_layout {
        session.record_layout();
      } else {
        session.record_measure();
      }

      if session.print_changes() {
        let measured = node.layout_ref().measured_dimensions;
        node.config().log(
          LogLevel::Verbose,
          &format!(
            "{}{}.}}{}",
            session.indent(),
            session.depth(),
            if need_to_visit_node { "*" } else { "" }
          ),
        );
        node.invoke_print();
        node.config().log(
          LogLevel::Verbose,
          &format!(
            "wm: {}, hm: {}, d: ({}, {}) {}",
            measure_mode_name(width_measure_mode, perform_layout),
            measure_mode_name(height_measure_mode, perform_layout),
            measured[Dimension::Width.index()],
            measured[Dimension::Height.index()],
            reason
          ),
        );
      }

      let mut layout = node.layout_mut();
      layout.last_owner_direction = Some(owner_direction);

      if cached_results.is_none() {
        if layout.cached_measurements.len() == cache::MAX_CACHED_RESULTS {
          if session.print_changes() {
            node.config().log(LogLevel::Verbose, "Out of cache entries!");
          }
          session.record_cache_eviction();
          layout.cached_measurements.clear();
        }

        let entry = CachedMeasurement {
          available_width,
          available_height,
          width_mode: Some(width_measure_mode),
          height_mode: Some(height_measure_mode),
          computed_width: layout.measured_dimensions[Dimension::Width.index()],
          computed_height: layout.measured_dimensions[Dimension::Height.index()],
        };
        if perform_layout {
          layout.cached_layout = entry;
        } else {
          layout.cached_measurements.push(entry);
        }
      }
    }
  }

  if perform_layout {
    {
      let mut layout = node.layout_mut();
      layout.dimensions = layout.measured_dimensions;
    }
    node.set_has_new_layout(true);
    node.set_dirty_flag(false);
  }

  session.exit();
  let computed = need_to_visit_node || cached_results.is_none();
  node.layout_mut().generation = session.generation();
  computed
}

impl Node {
  /// Computes the layout of this node's tree against the given available
  /// size.
  ///
  /// Pass [`f32::NAN`] for an unconstrained dimension. `owner_direction`
  /// seeds writing-direction resolution; `None` means left-to-right.
  ///
  /// Results are read back through [`Node::layout_left`],
  /// [`Node::layout_width`] and friends. Only dirty subtrees are
  /// recomputed, so calling this after a small style change is cheap.
  pub fn calculate_layout(
    &self,
    owner_width: f32,
    owner_height: f32,
    owner_direction: Option<Direction>,
  ) {
    let generation = self.config().next_generation();
    let mut session = LayoutSession::new(generation);

    self.resolve_dimensions();

    let width;
    let width_measure_mode;
    if resolve::is_style_dim_defined(self, FlexDirection::Row, owner_width) {
      width = self.resolved_dimension(Dimension::Width).resolve(owner_width)
        + resolve::margin_for_axis(&self.style_ref(), FlexDirection::Row, owner_width);
      width_measure_mode = MeasureMode::Exactly;
    } else if self.style_ref().max_dimensions[Dimension::Width.index()].resolve(owner_width)
      >= 0.0
    {
      width = self.style_ref().max_dimensions[Dimension::Width.index()].resolve(owner_width);
      width_measure_mode = MeasureMode::AtMost;
    } else {
      width = owner_width;
      width_measure_mode = if is_undefined(width) {
        MeasureMode::Undefined
      } else {
        MeasureMode::Exactly
      };
    }

    let height;
    let height_measure_mode;
    if resolve::is_style_dim_defined(self, FlexDirection::Column, owner_height) {
      height = self.resolved_dimension(Dimension::Height).resolve(owner_height)
        + resolve::margin_for_axis(&self.style_ref(), FlexDirection::Column, owner_width);
      height_measure_mode = MeasureMode::Exactly;
    } else if self.style_ref().max_dimensions[Dimension::Height.index()].resolve(owner_height)
      >= 0.0
    {
      height = self.style_ref().max_dimensions[Dimension::Height.index()].resolve(owner_height);
      height_measure_mode = MeasureMode::AtMost;
    } else {
      height = owner_height;
      height_measure_mode = if is_undefined(height) {
        MeasureMode::Undefined
      } else {
        MeasureMode::Exactly
      };
    }

    let direction = owner_direction.unwrap_or(Direction::Ltr);

    if layout_node(
      self,
      width,
      height,
      direction,
      width_measure_mode,
      height_measure_mode,
      owner_width,
      owner_height,
      true,
      "initial",
      &mut session,
    ) {
      self.update_position(self.layout_direction(), owner_width, owner_height, owner_width);
      rounding::round_layout_to_pixel_grid(
        self,
        self.config().point_scale_factor(),
        0.0,
        0.0,
      );

      if session.print_tree() {
        crate::debug::inspect::print_tree(
          self,
          &crate::debug::inspect::PrintOptions::default(),
        );
      }
    }

    session.log_summary();
  }
}

//! Read-only snapshots of a node tree for debugging and tooling.
//!
//! The snapshot structs mirror the public node state without leaking the
//! engine's internal types, and serialize to JSON for dumps and golden
//! tests.

use crate::config::LogLevel;
use crate::style::edges::Edge;
use crate::style::value::Value;
use crate::style::Style;
use crate::tree::Node;
use crate::tree::NodeType;
use serde::Serialize;

/// Selects which parts of a node go into a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
  pub layout: bool,
  pub style: bool,
  pub children: bool,
}

impl Default for PrintOptions {
  fn default() -> Self {
    Self {
      layout: true,
      style: true,
      children: true,
    }
  }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EdgeSnapshot<T> {
  pub top: T,
  pub right: T,
  pub bottom: T,
  pub left: T,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RectSnapshot {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StyleSnapshot {
  pub direction: String,
  pub flex_direction: String,
  pub justify_content: String,
  pub align_items: String,
  pub align_self: String,
  pub align_content: String,
  pub position_type: String,
  pub flex_wrap: String,
  pub overflow: String,
  pub display: String,
  pub flex_grow: f32,
  pub flex_shrink: f32,
  pub flex_basis: String,
  pub width: String,
  pub height: String,
  pub min_width: String,
  pub min_height: String,
  pub max_width: String,
  pub max_height: String,
  pub margin: EdgeSnapshot<String>,
  pub padding: EdgeSnapshot<String>,
  pub border: EdgeSnapshot<String>,
  pub position: EdgeSnapshot<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LayoutSnapshot {
  pub bounds: RectSnapshot,
  pub direction: String,
  pub margin: EdgeSnapshot<f32>,
  pub border: EdgeSnapshot<f32>,
  pub padding: EdgeSnapshot<f32>,
  pub had_overflow: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeSnapshot {
  pub node_type: String,
  pub dirty: bool,
  pub has_measure: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<StyleSnapshot>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub layout: Option<LayoutSnapshot>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<NodeSnapshot>,
}

/// Builds a snapshot of the node, recursing into children when the options
/// ask for them.
pub fn node_snapshot(node: &Node, options: &PrintOptions) -> NodeSnapshot {
  let children = if options.children {
    (0..node.child_count())
      .filter_map(|i| node.child(i))
      .map(|child| node_snapshot(&child, options))
      .collect()
  } else {
    Vec::new()
  };

  NodeSnapshot {
    node_type: node_type_name(node.node_type()),
    dirty: node.is_dirty(),
    has_measure: node.has_measure_func(),
    style: options.style.then(|| style_snapshot(&node.style())),
    layout: options.layout.then(|| layout_snapshot(node)),
    children,
  }
}

/// Renders a snapshot as pretty-printed JSON.
pub fn snapshot_json(node: &Node, options: &PrintOptions) -> String {
  let snapshot = node_snapshot(node, options);
  serde_json::to_string_pretty(&snapshot).unwrap_or_else(|e| format!("<serialize error: {e}>"))
}

/// Dumps the tree through the node's configured logger at debug level.
pub fn print_tree(node: &Node, options: &PrintOptions) {
  let json = snapshot_json(node, options);
  node.config().log(LogLevel::Debug, &json);
}

fn style_snapshot(style: &Style) -> StyleSnapshot {
  StyleSnapshot {
    direction: enum_name(&style.direction),
    flex_direction: enum_name(&style.flex_direction),
    justify_content: enum_name(&style.justify_content),
    align_items: enum_name(&style.align_items),
    align_self: enum_name(&style.align_self),
    align_content: enum_name(&style.align_content),
    position_type: enum_name(&style.position_type),
    flex_wrap: enum_name(&style.flex_wrap),
    overflow: enum_name(&style.overflow),
    display: enum_name(&style.display),
    flex_grow: style.flex_grow.unwrap_or(0.0),
    flex_shrink: style.flex_shrink.unwrap_or(0.0),
    flex_basis: style.flex_basis.to_string(),
    width: style.dimensions[0].to_string(),
    height: style.dimensions[1].to_string(),
    min_width: style.min_dimensions[0].to_string(),
    min_height: style.min_dimensions[1].to_string(),
    max_width: style.max_dimensions[0].to_string(),
    max_height: style.max_dimensions[1].to_string(),
    margin: value_edges(style, |s, edge| s.margin.computed(edge, Value::points(0.0))),
    padding: value_edges(style, |s, edge| s.padding.computed(edge, Value::points(0.0))),
    border: value_edges(style, |s, edge| s.border.computed(edge, Value::points(0.0))),
    position: value_edges(style, |s, edge| s.position.computed(edge, Value::Undefined)),
  }
}

fn layout_snapshot(node: &Node) -> LayoutSnapshot {
  LayoutSnapshot {
    bounds: RectSnapshot {
      x: node.layout_left(),
      y: node.layout_top(),
      width: node.layout_width(),
      height: node.layout_height(),
    },
    direction: enum_name(&node.layout_direction()),
    margin: layout_edges(|edge| node.layout_margin(edge)),
    border: layout_edges(|edge| node.layout_border(edge)),
    padding: layout_edges(|edge| node.layout_padding(edge)),
    had_overflow: node.had_overflow(),
  }
}

fn value_edges<F>(style: &Style, get: F) -> EdgeSnapshot<String>
where
  F: Fn(&Style, Edge) -> Value,
{
  EdgeSnapshot {
    top: get(style, Edge::Top).to_string(),
    right: get(style, Edge::Right).to_string(),
    bottom: get(style, Edge::Bottom).to_string(),
    left: get(style, Edge::Left).to_string(),
  }
}

fn layout_edges<F>(get: F) -> EdgeSnapshot<f32>
where
  F: Fn(Edge) -> f32,
{
  EdgeSnapshot {
    top: get(Edge::Top),
    right: get(Edge::Right),
    bottom: get(Edge::Bottom),
    left: get(Edge::Left),
  }
}

fn node_type_name(node_type: NodeType) -> String {
  format!("{node_type:?}").to_ascii_lowercase()
}

fn enum_name<T: std::fmt::Debug>(value: &T) -> String {
  format!("{value:?}").to_ascii_lowercase()
}

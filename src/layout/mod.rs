//! The flexbox layout algorithm
//!
//! This module turns a styled node tree into computed positions and sizes.
//! Layout runs when [`Node::calculate_layout`](crate::Node::calculate_layout)
//! is called on a root and recurses through the tree from there.
//!
//! # Passes
//!
//! A single container layout runs up to four phases over its children:
//!
//! 1. **Flex basis**: resolve every child's starting main size, measuring
//!    leaves where needed
//! 2. **Line collection**: break children into flex lines when wrapping
//! 3. **Flexible lengths**: distribute free space by grow and shrink
//!    factors, in a freeze pass and an apply pass per line
//! 4. **Alignment**: justify along the main axis, align along the cross
//!    axis and place lines
//!
//! Absolutely positioned children are laid out after the flow pass, against
//! the container's final size.
//!
//! # Incremental layout
//!
//! Results are cached per node. A node is only revisited when it is dirty,
//! when its constraints changed, or when the resolved direction flipped.
//! Leaves with measure callbacks additionally keep a small ring of recent
//! measurements so a moving constraint does not force a remeasure every
//! pass.
//!
//! # Module Organization
//!
//! - `resolve.rs` - Per-axis style resolution (margins, paddings, borders,
//!   offsets, min/max bounds)
//! - `cache.rs` - Cached measurements and constraint compatibility
//! - `session.rs` - State for one layout pass (generation, depth, stats)
//! - `rounding.rs` - Snapping the final layout to the pixel grid
//! - `algorithm.rs` - The flex algorithm itself
//!
//! # Example
//!
//! ```
//! use fastflex::style::FlexDirection;
//! use fastflex::style::Value;
//! use fastflex::Node;
//!
//! let root = Node::new();
//! root.set_flex_direction(FlexDirection::Row);
//! root.set_width(Value::points(100.0));
//! root.set_height(Value::points(20.0));
//!
//! let child = Node::new();
//! child.set_flex_grow(1.0);
//! root.add_child(&child);
//!
//! root.calculate_layout(f32::NAN, f32::NAN, None);
//! assert_eq!(child.layout_width(), 100.0);
//! ```

pub mod algorithm;
pub mod cache;
pub mod resolve;
pub mod rounding;
pub mod session;

pub use cache::CachedMeasurement;
pub use session::LayoutStats;

use std::fmt;

/// Constraint kind for one axis of a measurement.
///
/// Mirrors the CSS sizing modes: `Undefined` asks for the content's natural
/// size, `Exactly` forces a size and `AtMost` caps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
  Undefined,
  Exactly,
  AtMost,
}

impl fmt::Display for MeasureMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      MeasureMode::Undefined => "UNDEFINED",
      MeasureMode::Exactly => "EXACTLY",
      MeasureMode::AtMost => "AT_MOST",
    };
    f.write_str(name)
  }
}

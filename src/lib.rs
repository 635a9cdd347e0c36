pub mod config;
pub mod debug;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod style;
pub mod tree;

pub use config::{CloneNodeFn, Config, ExperimentalFeature, LogFn, LogLevel};
pub use error::{Error, Result};
pub use geometry::{EdgeOffsets, Point, Rect, Size};
pub use layout::{LayoutStats, MeasureMode};
pub use tree::{BaselineFn, DirtiedFn, LayoutResults, MeasureFn, Node, NodeType, PrintFn};

// Re-export the style vocabulary so building a tree only needs the crate root
pub use style::value::{is_defined, is_undefined, UNDEFINED};
pub use style::{
  Align, Dimension, Direction, Display, Edge, EdgeValues, FlexDirection, JustifyContent,
  Overflow, PositionType, Style, Value, Wrap,
};

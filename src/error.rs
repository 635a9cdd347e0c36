//! Error types for FastFlex
//!
//! This module provides error types for all subsystems:
//! - Tree errors (child list editing, ownership)
//! - Layout errors (measurement and baseline callbacks)
//! - Config errors (invalid engine configuration)
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.
//!
//! Mutating tree operations come in pairs: a panicking form matching the
//! usual embedder contract, and a `try_` form returning one of these
//! errors for hosts that prefer to recover.

use thiserror::Error;

/// Result type alias for FastFlex operations
///
/// This is a convenience type that uses our Error type as the error variant.
///
/// # Examples
///
/// ```
/// use fastflex::Result;
///
/// fn build_tree() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for FastFlex
///
/// This enum covers all possible errors that can occur while building a
/// node tree or computing a layout. Each variant wraps a more specific
/// error type for that subsystem.
///
/// # Examples
///
/// ```
/// use fastflex::Error;
/// use fastflex::error::TreeError;
///
/// fn attach() -> Result<(), Error> {
///     Err(Error::Tree(TreeError::ChildHasOwner))
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
  /// Node tree structure error
  #[error("Tree error: {0}")]
  Tree(#[from] TreeError),

  /// Layout computation error
  #[error("Layout error: {0}")]
  Layout(#[from] LayoutError),

  /// Engine configuration error
  #[error("Config error: {0}")]
  Config(#[from] ConfigError),

  /// Generic error for miscellaneous issues
  #[error("{0}")]
  Other(String),
}

/// Errors that occur while editing the node tree
///
/// These errors indicate that a child list operation would violate the
/// ownership rules of the tree: a node has at most one owner, and nodes
/// with a measure callback act as leaves.
///
/// # Examples
///
/// ```
/// use fastflex::error::TreeError;
///
/// let error = TreeError::IndexOutOfBounds { index: 3, len: 1 };
/// assert!(format!("{}", error).contains("index 3"));
/// ```
#[derive(Error, Debug, Clone)]
pub enum TreeError {
  /// Tried to insert a child that already has an owner
  #[error("Child already has an owner, it must be removed first")]
  ChildHasOwner,

  /// Tried to insert a child under a node with a measure callback
  #[error("Cannot add child: nodes with measure functions cannot have children")]
  ChildrenNotAllowed,

  /// Tried to set a measure callback on a node that has children
  #[error("Cannot set measure function: nodes with measure functions cannot have children")]
  MeasureWithChildren,

  /// Tried to reset a node that still has children
  #[error("Cannot reset a node which still has children attached")]
  ResetWithChildren,

  /// Tried to reset a node that is still attached to an owner
  #[error("Cannot reset a node still attached to an owner")]
  ResetWithOwner,

  /// Tried to mark a node dirty that has no measure callback
  #[error("Only leaf nodes with custom measure functions should manually mark themselves as dirty")]
  DirtyWithoutMeasure,

  /// Child index out of bounds for the current child list
  #[error("Child index {index} out of bounds for child list of length {len}")]
  IndexOutOfBounds { index: usize, len: usize },
}

/// Errors raised by layout callbacks
///
/// The layout pass itself never fails on numeric input; bad values are
/// clamped or treated as undefined. Callbacks supplied by the embedder
/// can still misbehave, and these errors describe how.
#[derive(Error, Debug, Clone)]
pub enum LayoutError {
  /// A baseline callback returned NaN
  #[error("Expect custom baseline function to not return NaN")]
  InvalidBaseline,

  /// A measure callback returned NaN for a dimension
  #[error("Measure function returned NaN for {dimension}")]
  InvalidMeasurement { dimension: String },
}

/// Errors that occur while configuring the engine
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
  /// Point scale factor must be non-negative
  #[error("Scale factor should not be less than zero, got {factor}")]
  NegativePointScale { factor: f32 },
}

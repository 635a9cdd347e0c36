//! Node tree with copy-on-write child lists
//!
//! A [`Node`] is a cheap cloneable handle onto shared node state. Trees are
//! built by inserting children; a child knows its owner, and a node owns a
//! child exactly when that child's owner pointer refers back to it. Child
//! lists can be shared between a node and a clone of it, and are deep-copied
//! lazily the first time either side needs to mutate through them.

pub mod node;

pub use node::{
  BaselineFn, DirtiedFn, LayoutResults, MeasureFn, Node, NodeType, PrintFn,
};

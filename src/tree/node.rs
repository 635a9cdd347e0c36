//! Node handles, tree editing and dirty tracking.
//!
//! `Node` wraps reference-counted shared state. Cloning a handle is cheap
//! and never copies the node; [`Node::clone_node`] makes a new node that
//! copies style and layout while initially sharing the child list with the
//! original. Ownership follows one rule: a node owns a child when the
//! child's owner pointer refers back to it. Shared (not yet owned) child
//! lists are deep-copied on first mutation, and every copy made that way is
//! reported through the config's clone callback.
//!
//! Style setters compare against the current value and mark the node dirty
//! only on a real change. Dirt propagates to the root so a later layout
//! pass knows which subtrees to revisit.

use crate::config::Config;
use crate::config::LogLevel;
use crate::error::Result;
use crate::error::TreeError;
use crate::geometry::Rect;
use crate::geometry::Size;
use crate::layout::cache::CachedMeasurement;
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
use crate::style::value::Value;
use crate::style::value::UNDEFINED;
use crate::style::Style;
use std::cell::Cell;
use std::cell::Ref;
use std::cell::RefCell;
use std::cell::RefMut;
use std::fmt;
use std::rc::Rc;
use std::rc::Weak;

/// Measures a leaf's content under the given constraints.
pub type MeasureFn = Rc<dyn Fn(&Node, f32, MeasureMode, f32, MeasureMode) -> Size>;

/// Reports the baseline of a node given its measured width and height.
pub type BaselineFn = Rc<dyn Fn(&Node, f32, f32) -> f32>;

/// Renders a node for the verbose layout logs.
pub type PrintFn = Rc<dyn Fn(&Node)>;

/// Fired when a clean node becomes dirty.
pub type DirtiedFn = Rc<dyn Fn(&Node)>;

/// Kind of content a node represents. Text nodes round to the pixel grid
/// slightly differently so glyph edges stay crisp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeType {
  #[default]
  Default,
  Text,
}

/// Per-node layout state: results of the last pass plus the bookkeeping
/// that makes incremental layout work.
#[derive(Debug, Clone)]
pub struct LayoutResults {
  /// Offsets per physical edge (left, top, right, bottom)
  pub(crate) position: [f32; 4],
  /// Final width and height, set from the measured dimensions and then
  /// adjusted by pixel rounding
  pub(crate) dimensions: [f32; 2],
  /// Resolved margins per edge (left, top, right, bottom, start, end)
  pub(crate) margin: [f32; 6],
  pub(crate) border: [f32; 6],
  pub(crate) padding: [f32; 6],
  pub(crate) direction: Direction,
  pub(crate) computed_flex_basis: f32,
  pub(crate) computed_flex_basis_generation: u32,
  pub(crate) had_overflow: bool,
  /// Generation of the last pass that visited this node
  pub(crate) generation: u32,
  pub(crate) last_owner_direction: Option<Direction>,
  pub(crate) cached_measurements: Vec<CachedMeasurement>,
  pub(crate) measured_dimensions: [f32; 2],
  /// Dedicated slot for full layout results, separate from the measure ring
  pub(crate) cached_layout: CachedMeasurement,
}

impl Default for LayoutResults {
  fn default() -> Self {
    Self {
      position: [0.0; 4],
      dimensions: [UNDEFINED; 2],
      margin: [0.0; 6],
      border: [0.0; 6],
      padding: [0.0; 6],
      direction: Direction::Inherit,
      computed_flex_basis: UNDEFINED,
      computed_flex_basis_generation: 0,
      had_overflow: false,
      generation: 0,
      last_owner_direction: None,
      cached_measurements: Vec::new(),
      measured_dimensions: [UNDEFINED; 2],
      cached_layout: CachedMeasurement::invalid(),
    }
  }
}

impl LayoutResults {
  /// Everything visible zeroed out, caches invalidated. Used for subtrees
  /// with `display: none`.
  pub(crate) fn zeroed() -> Self {
    Self {
      dimensions: [0.0; 2],
      measured_dimensions: [0.0; 2],
      ..Self::default()
    }
  }

  fn visible_eq(&self, other: &Self) -> bool {
    self
      .position
      .iter()
      .zip(other.position.iter())
      .all(|(a, b)| floats_equal(*a, *b))
      && self
        .dimensions
        .iter()
        .zip(other.dimensions.iter())
        .all(|(a, b)| floats_equal(*a, *b))
      && self
        .margin
        .iter()
        .zip(other.margin.iter())
        .all(|(a, b)| floats_equal(*a, *b))
      && self
        .border
        .iter()
        .zip(other.border.iter())
        .all(|(a, b)| floats_equal(*a, *b))
      && self
        .padding
        .iter()
        .zip(other.padding.iter())
        .all(|(a, b)| floats_equal(*a, *b))
      && self.direction == other.direction
      && self.had_overflow == other.had_overflow
  }
}

struct NodeInner {
  config: Config,
  style: RefCell<Style>,
  layout: RefCell<LayoutResults>,
  owner: RefCell<Weak<NodeInner>>,
  children: RefCell<Vec<Node>>,
  measure: RefCell<Option<MeasureFn>>,
  baseline: RefCell<Option<BaselineFn>>,
  print: RefCell<Option<PrintFn>>,
  dirtied: RefCell<Option<DirtiedFn>>,
  node_type: Cell<NodeType>,
  is_dirty: Cell<bool>,
  has_new_layout: Cell<bool>,
  line_index: Cell<usize>,
  resolved_dimensions: Cell<[Value; 2]>,
}

impl Drop for NodeInner {
  fn drop(&mut self) {
    self.config.release_node_instance();
  }
}

thread_local! {
  static DEFAULT_CONFIG: Config = Config::new();
}

/// Handle to a node in a layout tree.
///
/// # Examples
///
/// ```
/// use fastflex::style::FlexDirection;
/// use fastflex::style::Value;
/// use fastflex::Node;
///
/// let root = Node::new();
/// root.set_flex_direction(FlexDirection::Row);
/// root.set_width(Value::points(100.0));
///
/// let child = Node::new();
/// child.set_flex_grow(1.0);
/// root.add_child(&child);
///
/// assert_eq!(root.child_count(), 1);
/// assert!(child.owner().unwrap().ptr_eq(&root));
/// ```
#[derive(Clone)]
pub struct Node {
  inner: Rc<NodeInner>,
}

impl Node {
  /// Creates a node using the shared per-thread default config.
  pub fn new() -> Self {
    DEFAULT_CONFIG.with(Self::with_config)
  }

  /// Creates a node tied to a config.
  pub fn with_config(config: &Config) -> Self {
    config.retain_node_instance();
    let style = if config.use_web_defaults() {
      Style::web_default()
    } else {
      Style::default()
    };
    Self {
      inner: Rc::new(NodeInner {
        config: config.clone(),
        style: RefCell::new(style),
        layout: RefCell::new(LayoutResults::default()),
        owner: RefCell::new(Weak::new()),
        children: RefCell::new(Vec::new()),
        measure: RefCell::new(None),
        baseline: RefCell::new(None),
        print: RefCell::new(None),
        dirtied: RefCell::new(None),
        node_type: Cell::new(NodeType::Default),
        is_dirty: Cell::new(false),
        has_new_layout: Cell::new(true),
        line_index: Cell::new(0),
        resolved_dimensions: Cell::new([Value::Undefined; 2]),
      }),
    }
  }

  /// Copies this node: style, layout and callbacks are duplicated, the
  /// child list is shared with the original until one side mutates it.
  /// The copy has no owner.
  pub fn clone_node(&self) -> Node {
    self.inner.config.retain_node_instance();
    Node {
      inner: Rc::new(NodeInner {
        config: self.inner.config.clone(),
        style: RefCell::new(self.inner.style.borrow().clone()),
        layout: RefCell::new(self.inner.layout.borrow().clone()),
        owner: RefCell::new(Weak::new()),
        children: RefCell::new(self.inner.children.borrow().clone()),
        measure: RefCell::new(self.inner.measure.borrow().clone()),
        baseline: RefCell::new(self.inner.baseline.borrow().clone()),
        print: RefCell::new(self.inner.print.borrow().clone()),
        dirtied: RefCell::new(self.inner.dirtied.borrow().clone()),
        node_type: Cell::new(self.inner.node_type.get()),
        is_dirty: Cell::new(self.inner.is_dirty.get()),
        has_new_layout: Cell::new(self.inner.has_new_layout.get()),
        line_index: Cell::new(self.inner.line_index.get()),
        resolved_dimensions: Cell::new(self.inner.resolved_dimensions.get()),
      }),
    }
  }

  /// Returns true when both handles refer to the same node
  pub fn ptr_eq(&self, other: &Node) -> bool {
    Rc::ptr_eq(&self.inner, &other.inner)
  }

  pub fn config(&self) -> &Config {
    &self.inner.config
  }

  fn fatal(&self, error: crate::error::Error) -> ! {
    self
      .inner
      .config
      .log(LogLevel::Fatal, &error.to_string());
    unreachable!()
  }

  // ----- tree editing -----

  /// Number of children
  pub fn child_count(&self) -> usize {
    self.inner.children.borrow().len()
  }

  /// Child at `index`, if any
  pub fn child(&self, index: usize) -> Option<Node> {
    self.inner.children.borrow().get(index).cloned()
  }

  /// The node that owns this one, if it is attached to a tree
  pub fn owner(&self) -> Option<Node> {
    self
      .inner
      .owner
      .borrow()
      .upgrade()
      .map(|inner| Node { inner })
  }

  /// Older name for [`Node::owner`].
  pub fn parent(&self) -> Option<Node> {
    self.owner()
  }

  /// Appends a child. See [`Node::insert_child`].
  pub fn add_child(&self, child: &Node) {
    self.insert_child(child, self.child_count());
  }

  /// Inserts `child` at `index`.
  ///
  /// If the current child list is shared with a clone it is deep-copied
  /// first so the mutation stays local to this node.
  ///
  /// # Panics
  ///
  /// Panics when the child already has an owner, when this node has a
  /// measure callback, or when the index is out of bounds.
  pub fn insert_child(&self, child: &Node, index: usize) {
    if let Err(error) = self.try_insert_child(child, index) {
      self.fatal(error);
    }
  }

  /// Fallible twin of [`Node::insert_child`].
  pub fn try_insert_child(&self, child: &Node, index: usize) -> Result<()> {
    if child.owner().is_some() {
      return Err(TreeError::ChildHasOwner.into());
    }
    if self.has_measure_func() {
      return Err(TreeError::ChildrenNotAllowed.into());
    }
    let len = self.child_count();
    if index > len {
      return Err(TreeError::IndexOutOfBounds { index, len }.into());
    }
    self.clone_children_if_needed();
    self.inner.children.borrow_mut().insert(index, child.clone());
    child.set_owner(Some(self));
    self.mark_dirty_and_propagate();
    Ok(())
  }

  /// Detaches `child` from this node. Does nothing when the child is not in
  /// the list.
  ///
  /// When the child list is still shared with a clone, the remaining
  /// children are deep-copied into a freshly owned list instead.
  pub fn remove_child(&self, child: &Node) {
    let child_count = self.child_count();
    if child_count == 0 {
      return;
    }

    let owns_children = self
      .child(0)
      .and_then(|first| first.owner())
      .is_some_and(|owner| owner.ptr_eq(self));
    if owns_children {
      let index = {
        let children = self.inner.children.borrow();
        children.iter().position(|c| c.ptr_eq(child))
      };
      if let Some(index) = index {
        self.inner.children.borrow_mut().remove(index);
        *child.inner.layout.borrow_mut() = LayoutResults::default();
        child.set_owner(None);
        self.mark_dirty_and_propagate();
      }
      return;
    }

    // Shared list: rebuild it from clones of everything except the child.
    let old_children = self.children_vec();
    if !old_children.iter().any(|c| c.ptr_eq(child)) {
      return;
    }
    let clone_callback = self.inner.config.clone_node_callback();
    let mut new_children = Vec::with_capacity(child_count - 1);
    for old_child in &old_children {
      if old_child.ptr_eq(child) {
        continue;
      }
      let new_child = old_child.clone_node();
      new_child.set_owner(Some(self));
      let index = new_children.len();
      new_children.push(new_child.clone());
      if let Some(callback) = &clone_callback {
        callback(old_child, &new_child, self, index);
      }
    }
    *self.inner.children.borrow_mut() = new_children;
    self.mark_dirty_and_propagate();
  }

  /// Detaches every child.
  pub fn remove_all_children(&self) {
    let child_count = self.child_count();
    if child_count == 0 {
      return;
    }

    let owns_children = self
      .child(0)
      .and_then(|first| first.owner())
      .is_some_and(|owner| owner.ptr_eq(self));
    if owns_children {
      for child in self.children_vec() {
        *child.inner.layout.borrow_mut() = LayoutResults::default();
        child.set_owner(None);
      }
    }
    // A shared list belongs to the original owner; just forget it.
    self.inner.children.borrow_mut().clear();
    self.mark_dirty_and_propagate();
  }

  /// Detaches this node from its owner and orphans the children it owns.
  ///
  /// The former owner keeps its cached layout; nothing is marked dirty.
  /// The backing allocation lives until the last handle drops.
  pub fn free(self) {
    if let Some(owner) = self.owner() {
      let index = {
        let children = owner.inner.children.borrow();
        children.iter().position(|c| c.ptr_eq(&self))
      };
      if let Some(index) = index {
        owner.inner.children.borrow_mut().remove(index);
      }
      self.set_owner(None);
    }
    for child in self.children_vec() {
      if child.owner().is_some_and(|owner| owner.ptr_eq(&self)) {
        child.set_owner(None);
      }
    }
    self.inner.children.borrow_mut().clear();
  }

  /// Frees every owned child recursively, then this node.
  ///
  /// Children still owned by another node (a shared, not-yet-copied child
  /// list) are left alone; owned children go through
  /// [`Node::remove_child`] first, so their layouts reset.
  pub fn free_recursive(self) {
    let mut skipped = 0;
    while let Some(child) = self.child(skipped) {
      if child.owner().is_some_and(|owner| owner.ptr_eq(&self)) {
        self.remove_child(&child);
        child.free_recursive();
      } else {
        skipped += 1;
      }
    }
    self.free();
  }

  /// Deep-copies a shared child list so this node owns every entry.
  ///
  /// No-op when the list is empty or already owned. Each copied child is
  /// reported through the config's clone callback.
  pub(crate) fn clone_children_if_needed(&self) {
    let child_count = self.child_count();
    if child_count == 0 {
      return;
    }
    let first_owned = self
      .child(0)
      .and_then(|first| first.owner())
      .is_some_and(|owner| owner.ptr_eq(self));
    if first_owned {
      // Children belong all to us or all to someone else, never mixed.
      return;
    }

    let clone_callback = self.inner.config.clone_node_callback();
    for index in 0..child_count {
      let old_child = self.child(index).expect("child list changed during clone");
      let new_child = old_child.clone_node();
      new_child.set_owner(Some(self));
      self.inner.children.borrow_mut()[index] = new_child.clone();
      if let Some(callback) = &clone_callback {
        callback(&old_child, &new_child, self, index);
      }
    }
  }

  fn set_owner(&self, owner: Option<&Node>) {
    *self.inner.owner.borrow_mut() = match owner {
      Some(node) => Rc::downgrade(&node.inner),
      None => Weak::new(),
    };
  }

  pub(crate) fn children_vec(&self) -> Vec<Node> {
    self.inner.children.borrow().clone()
  }

  // ----- dirty tracking -----

  /// Returns true when the node needs layout
  pub fn is_dirty(&self) -> bool {
    self.inner.is_dirty.get()
  }

  /// Marks a measured leaf as needing fresh measurement.
  ///
  /// # Panics
  ///
  /// Panics when the node has no measure callback; container nodes get
  /// dirty automatically through their style and children.
  pub fn mark_dirty(&self) {
    if let Err(error) = self.try_mark_dirty() {
      self.fatal(error);
    }
  }

  /// Fallible twin of [`Node::mark_dirty`].
  pub fn try_mark_dirty(&self) -> Result<()> {
    if !self.has_measure_func() {
      return Err(TreeError::DirtyWithoutMeasure.into());
    }
    self.mark_dirty_and_propagate();
    Ok(())
  }

  /// Sets the dirty bit, resets the cached flex basis and walks up to the
  /// root. Stops early at already-dirty ancestors.
  pub(crate) fn mark_dirty_and_propagate(&self) {
    if self.inner.is_dirty.get() {
      return;
    }
    self.set_dirty_flag(true);
    self.inner.layout.borrow_mut().computed_flex_basis = UNDEFINED;
    if let Some(owner) = self.owner() {
      owner.mark_dirty_and_propagate();
    }
  }

  /// Flips the dirty bit, firing the dirtied callback on the transition to
  /// dirty.
  pub(crate) fn set_dirty_flag(&self, dirty: bool) {
    if dirty == self.inner.is_dirty.get() {
      return;
    }
    self.inner.is_dirty.set(dirty);
    if dirty {
      let callback = self.inner.dirtied.borrow().clone();
      if let Some(callback) = callback {
        callback(self);
      }
    }
  }

  /// Returns true when the last layout pass produced results not yet
  /// acknowledged via [`Node::set_has_new_layout`]
  pub fn has_new_layout(&self) -> bool {
    self.inner.has_new_layout.get()
  }

  pub fn set_has_new_layout(&self, has_new_layout: bool) {
    self.inner.has_new_layout.set(has_new_layout);
  }

  // ----- callbacks -----

  /// Installs a measure callback and turns the node into a text-type leaf.
  /// Passing `None` removes the callback and restores the default type.
  ///
  /// # Panics
  ///
  /// Panics when installing a callback on a node with children.
  pub fn set_measure_func(&self, measure: Option<MeasureFn>) {
    if let Err(error) = self.try_set_measure_func(measure) {
      self.fatal(error);
    }
  }

  /// Fallible twin of [`Node::set_measure_func`].
  pub fn try_set_measure_func(&self, measure: Option<MeasureFn>) -> Result<()> {
    match measure {
      None => {
        *self.inner.measure.borrow_mut() = None;
        self.inner.node_type.set(NodeType::Default);
      }
      Some(measure) => {
        if self.child_count() != 0 {
          return Err(TreeError::MeasureWithChildren.into());
        }
        *self.inner.measure.borrow_mut() = Some(measure);
        self.inner.node_type.set(NodeType::Text);
      }
    }
    Ok(())
  }

  pub fn has_measure_func(&self) -> bool {
    self.inner.measure.borrow().is_some()
  }

  pub fn set_baseline_func(&self, baseline: Option<BaselineFn>) {
    *self.inner.baseline.borrow_mut() = baseline;
  }

  pub fn has_baseline_func(&self) -> bool {
    self.inner.baseline.borrow().is_some()
  }

  pub fn set_print_func(&self, print: Option<PrintFn>) {
    *self.inner.print.borrow_mut() = print;
  }

  pub fn set_dirtied_func(&self, dirtied: Option<DirtiedFn>) {
    *self.inner.dirtied.borrow_mut() = dirtied;
  }

  /// Runs the measure callback. The callback is pulled out first so it may
  /// freely inspect the node.
  pub(crate) fn invoke_measure(
    &self,
    width: f32,
    width_mode: MeasureMode,
    height: f32,
    height_mode: MeasureMode,
  ) -> Size {
    let measure = self
      .inner
      .measure
      .borrow()
      .clone()
      .expect("measure callback required");
    let size = measure(self, width, width_mode, height, height_mode);
    if size.width.is_nan() {
      self.inner.config.log(
        LogLevel::Fatal,
        &format!(
          "{}",
          crate::error::LayoutError::InvalidMeasurement {
            dimension: "width".to_string(),
          }
        ),
      );
    }
    if size.height.is_nan() {
      self.inner.config.log(
        LogLevel::Fatal,
        &format!(
          "{}",
          crate::error::LayoutError::InvalidMeasurement {
            dimension: "height".to_string(),
          }
        ),
      );
    }
    size
  }

  /// Runs the baseline callback against the measured dimensions.
  pub(crate) fn invoke_baseline(&self, width: f32, height: f32) -> f32 {
    let baseline = self
      .inner
      .baseline
      .borrow()
      .clone()
      .expect("baseline callback required");
    let result = baseline(self, width, height);
    if result.is_nan() {
      self.inner.config.log(
        LogLevel::Fatal,
        &format!("{}", crate::error::LayoutError::InvalidBaseline),
      );
    }
    result
  }

  pub(crate) fn invoke_print(&self) {
    let print = self.inner.print.borrow().clone();
    if let Some(print) = print {
      print(self);
    }
  }

  // ----- node lifecycle -----

  /// Restores the node to its just-created state, keeping the config.
  ///
  /// # Panics
  ///
  /// Panics when the node still has children or an owner.
  pub fn reset(&self) {
    if let Err(error) = self.try_reset() {
      self.fatal(error);
    }
  }

  /// Fallible twin of [`Node::reset`].
  pub fn try_reset(&self) -> Result<()> {
    if self.child_count() != 0 {
      return Err(TreeError::ResetWithChildren.into());
    }
    if self.owner().is_some() {
      return Err(TreeError::ResetWithOwner.into());
    }
    *self.inner.style.borrow_mut() = if self.inner.config.use_web_defaults() {
      Style::web_default()
    } else {
      Style::default()
    };
    *self.inner.layout.borrow_mut() = LayoutResults::default();
    *self.inner.measure.borrow_mut() = None;
    *self.inner.baseline.borrow_mut() = None;
    *self.inner.print.borrow_mut() = None;
    *self.inner.dirtied.borrow_mut() = None;
    self.inner.node_type.set(NodeType::Default);
    self.inner.is_dirty.set(false);
    self.inner.has_new_layout.set(true);
    self.inner.line_index.set(0);
    self.inner.resolved_dimensions.set([Value::Undefined; 2]);
    Ok(())
  }

  /// Copies the other node's style onto this one, marking dirty if
  /// anything changed.
  pub fn copy_style(&self, from: &Node) {
    let source = from.inner.style.borrow().clone();
    let changed = *self.inner.style.borrow() != source;
    if changed {
      *self.inner.style.borrow_mut() = source;
      self.mark_dirty_and_propagate();
    }
  }

  pub fn node_type(&self) -> NodeType {
    self.inner.node_type.get()
  }

  pub fn set_node_type(&self, node_type: NodeType) {
    self.inner.node_type.set(node_type);
  }

  // ----- style accessors -----

  /// Snapshot of the node's style
  pub fn style(&self) -> Style {
    self.inner.style.borrow().clone()
  }

  pub(crate) fn style_ref(&self) -> Ref<'_, Style> {
    self.inner.style.borrow()
  }

  fn update_style<T, G, S>(&self, value: T, get: G, set: S)
  where
    T: PartialEq + Copy,
    G: Fn(&Style) -> T,
    S: Fn(&mut Style, T),
  {
    let changed = {
      let mut style = self.inner.style.borrow_mut();
      if get(&style) == value {
        false
      } else {
        set(&mut style, value);
        true
      }
    };
    if changed {
      self.mark_dirty_and_propagate();
    }
  }

  pub fn direction(&self) -> Direction {
    self.inner.style.borrow().direction
  }

  pub fn set_direction(&self, direction: Direction) {
    self.update_style(direction, |s| s.direction, |s, v| s.direction = v);
  }

  pub fn flex_direction(&self) -> FlexDirection {
    self.inner.style.borrow().flex_direction
  }

  pub fn set_flex_direction(&self, flex_direction: FlexDirection) {
    self.update_style(
      flex_direction,
      |s| s.flex_direction,
      |s, v| s.flex_direction = v,
    );
  }

  pub fn justify_content(&self) -> JustifyContent {
    self.inner.style.borrow().justify_content
  }

  pub fn set_justify_content(&self, justify_content: JustifyContent) {
    self.update_style(
      justify_content,
      |s| s.justify_content,
      |s, v| s.justify_content = v,
    );
  }

  pub fn align_content(&self) -> Align {
    self.inner.style.borrow().align_content
  }

  pub fn set_align_content(&self, align_content: Align) {
    self.update_style(
      align_content,
      |s| s.align_content,
      |s, v| s.align_content = v,
    );
  }

  pub fn align_items(&self) -> Align {
    self.inner.style.borrow().align_items
  }

  pub fn set_align_items(&self, align_items: Align) {
    self.update_style(align_items, |s| s.align_items, |s, v| s.align_items = v);
  }

  pub fn align_self(&self) -> Align {
    self.inner.style.borrow().align_self
  }

  pub fn set_align_self(&self, align_self: Align) {
    self.update_style(align_self, |s| s.align_self, |s, v| s.align_self = v);
  }

  pub fn position_type(&self) -> PositionType {
    self.inner.style.borrow().position_type
  }

  pub fn set_position_type(&self, position_type: PositionType) {
    self.update_style(
      position_type,
      |s| s.position_type,
      |s, v| s.position_type = v,
    );
  }

  pub fn flex_wrap(&self) -> Wrap {
    self.inner.style.borrow().flex_wrap
  }

  pub fn set_flex_wrap(&self, flex_wrap: Wrap) {
    self.update_style(flex_wrap, |s| s.flex_wrap, |s, v| s.flex_wrap = v);
  }

  pub fn overflow(&self) -> Overflow {
    self.inner.style.borrow().overflow
  }

  pub fn set_overflow(&self, overflow: Overflow) {
    self.update_style(overflow, |s| s.overflow, |s, v| s.overflow = v);
  }

  pub fn display(&self) -> Display {
    self.inner.style.borrow().display
  }

  pub fn set_display(&self, display: Display) {
    self.update_style(display, |s| s.display, |s, v| s.display = v);
  }

  /// Raw `flex` shorthand; NaN when unset
  pub fn flex(&self) -> f32 {
    self.inner.style.borrow().flex.unwrap_or(UNDEFINED)
  }

  /// Sets the `flex` shorthand. NaN unsets it.
  pub fn set_flex(&self, flex: f32) {
    let normalized = if flex.is_nan() { None } else { Some(flex) };
    self.update_style(normalized, |s| s.flex, |s, v| s.flex = v);
  }

  /// Effective grow factor, zero when unset
  pub fn flex_grow(&self) -> f32 {
    self.inner.style.borrow().flex_grow.unwrap_or(0.0)
  }

  pub fn set_flex_grow(&self, flex_grow: f32) {
    let normalized = if flex_grow.is_nan() {
      None
    } else {
      Some(flex_grow)
    };
    self.update_style(normalized, |s| s.flex_grow, |s, v| s.flex_grow = v);
  }

  /// Effective shrink factor; when unset this is one under web defaults
  /// and zero otherwise
  pub fn flex_shrink(&self) -> f32 {
    let default = if self.inner.config.use_web_defaults() {
      1.0
    } else {
      0.0
    };
    self.inner.style.borrow().flex_shrink.unwrap_or(default)
  }

  pub fn set_flex_shrink(&self, flex_shrink: f32) {
    let normalized = if flex_shrink.is_nan() {
      None
    } else {
      Some(flex_shrink)
    };
    self.update_style(normalized, |s| s.flex_shrink, |s, v| s.flex_shrink = v);
  }

  pub fn flex_basis(&self) -> Value {
    self.inner.style.borrow().flex_basis
  }

  pub fn set_flex_basis(&self, flex_basis: Value) {
    self.update_style(flex_basis, |s| s.flex_basis, |s, v| s.flex_basis = v);
  }

  pub fn width(&self) -> Value {
    self.inner.style.borrow().dimensions[Dimension::Width.index()]
  }

  pub fn set_width(&self, width: Value) {
    self.update_style(
      width,
      |s| s.dimensions[Dimension::Width.index()],
      |s, v| s.dimensions[Dimension::Width.index()] = v,
    );
  }

  pub fn height(&self) -> Value {
    self.inner.style.borrow().dimensions[Dimension::Height.index()]
  }

  pub fn set_height(&self, height: Value) {
    self.update_style(
      height,
      |s| s.dimensions[Dimension::Height.index()],
      |s, v| s.dimensions[Dimension::Height.index()] = v,
    );
  }

  pub fn min_width(&self) -> Value {
    self.inner.style.borrow().min_dimensions[Dimension::Width.index()]
  }

  pub fn set_min_width(&self, min_width: Value) {
    self.update_style(
      min_width,
      |s| s.min_dimensions[Dimension::Width.index()],
      |s, v| s.min_dimensions[Dimension::Width.index()] = v,
    );
  }

  pub fn min_height(&self) -> Value {
    self.inner.style.borrow().min_dimensions[Dimension::Height.index()]
  }

  pub fn set_min_height(&self, min_height: Value) {
    self.update_style(
      min_height,
      |s| s.min_dimensions[Dimension::Height.index()],
      |s, v| s.min_dimensions[Dimension::Height.index()] = v,
    );
  }

  pub fn max_width(&self) -> Value {
    self.inner.style.borrow().max_dimensions[Dimension::Width.index()]
  }

  pub fn set_max_width(&self, max_width: Value) {
    self.update_style(
      max_width,
      |s| s.max_dimensions[Dimension::Width.index()],
      |s, v| s.max_dimensions[Dimension::Width.index()] = v,
    );
  }

  pub fn max_height(&self) -> Value {
    self.inner.style.borrow().max_dimensions[Dimension::Height.index()]
  }

  pub fn set_max_height(&self, max_height: Value) {
    self.update_style(
      max_height,
      |s| s.max_dimensions[Dimension::Height.index()],
      |s, v| s.max_dimensions[Dimension::Height.index()] = v,
    );
  }

  /// Aspect ratio as width over height; NaN when unset
  pub fn aspect_ratio(&self) -> f32 {
    self.inner.style.borrow().aspect_ratio.unwrap_or(UNDEFINED)
  }

  pub fn set_aspect_ratio(&self, aspect_ratio: f32) {
    let normalized = if aspect_ratio.is_nan() {
      None
    } else {
      Some(aspect_ratio)
    };
    self.update_style(normalized, |s| s.aspect_ratio, |s, v| s.aspect_ratio = v);
  }

  /// Raw margin for an edge, without shorthand fallback
  pub fn margin(&self, edge: Edge) -> Value {
    self.inner.style.borrow().margin.get(edge)
  }

  pub fn set_margin(&self, edge: Edge, margin: Value) {
    self.update_style(margin, |s| s.margin.get(edge), |s, v| s.margin.set(edge, v));
  }

  /// Raw position offset for an edge
  pub fn position(&self, edge: Edge) -> Value {
    self.inner.style.borrow().position.get(edge)
  }

  pub fn set_position(&self, edge: Edge, position: Value) {
    self.update_style(
      position,
      |s| s.position.get(edge),
      |s, v| s.position.set(edge, v),
    );
  }

  /// Raw padding for an edge
  pub fn padding(&self, edge: Edge) -> Value {
    self.inner.style.borrow().padding.get(edge)
  }

  pub fn set_padding(&self, edge: Edge, padding: Value) {
    self.update_style(
      padding,
      |s| s.padding.get(edge),
      |s, v| s.padding.set(edge, v),
    );
  }

  /// Border width for an edge; NaN when unset
  pub fn border(&self, edge: Edge) -> f32 {
    match self.inner.style.borrow().border.get(edge) {
      Value::Point(v) => v,
      _ => UNDEFINED,
    }
  }

  /// Borders only take point values.
  pub fn set_border(&self, edge: Edge, border: f32) {
    self.update_style(
      Value::points(border),
      |s| s.border.get(edge),
      |s, v| s.border.set(edge, v),
    );
  }

  // ----- flex resolution -----

  /// Grow factor used by layout: style value, or the `flex` shorthand when
  /// positive. The root never grows.
  pub(crate) fn resolve_flex_grow(&self) -> f32 {
    if self.owner().is_none() {
      return 0.0;
    }
    let style = self.inner.style.borrow();
    if let Some(grow) = style.flex_grow {
      return grow;
    }
    if let Some(flex) = style.flex {
      if flex > 0.0 {
        return flex;
      }
    }
    0.0
  }

  /// Shrink factor used by layout. A negative `flex` shorthand shrinks
  /// unless web defaults are active, where shrink defaults to one.
  pub(crate) fn resolve_flex_shrink(&self) -> f32 {
    if self.owner().is_none() {
      return 0.0;
    }
    let style = self.inner.style.borrow();
    if let Some(shrink) = style.flex_shrink {
      return shrink;
    }
    if !self.inner.config.use_web_defaults() {
      if let Some(flex) = style.flex {
        if flex < 0.0 {
          return -flex;
        }
      }
    }
    if self.inner.config.use_web_defaults() {
      1.0
    } else {
      0.0
    }
  }

  /// Flex basis with the `flex` shorthand folded in: an explicit basis
  /// wins, a positive `flex` implies a zero basis (auto under web
  /// defaults), everything else is auto.
  pub(crate) fn resolved_flex_basis(&self) -> Value {
    let style = self.inner.style.borrow();
    if style.flex_basis.is_defined() {
      return style.flex_basis;
    }
    if let Some(flex) = style.flex {
      if flex > 0.0 {
        return if self.inner.config.use_web_defaults() {
          Value::Auto
        } else {
          Value::points(0.0)
        };
      }
    }
    Value::Auto
  }

  /// True for in-flow nodes that can grow or shrink
  pub(crate) fn is_flexible(&self) -> bool {
    self.position_type() == PositionType::Relative
      && (self.resolve_flex_grow() != 0.0 || self.resolve_flex_shrink() != 0.0)
  }

  /// Folds `min == max` constraints into the used dimension values.
  pub(crate) fn resolve_dimensions(&self) {
    let style = self.inner.style.borrow();
    let mut resolved = [Value::Undefined; 2];
    for dim in [Dimension::Width, Dimension::Height] {
      let i = dim.index();
      let max = style.max_dimensions[i];
      if !max.is_undefined() && max.approx_eq(style.min_dimensions[i]) {
        resolved[i] = max;
      } else {
        resolved[i] = style.dimensions[i];
      }
    }
    self.inner.resolved_dimensions.set(resolved);
  }

  pub(crate) fn resolved_dimension(&self, dimension: Dimension) -> Value {
    self.inner.resolved_dimensions.get()[dimension.index()]
  }

  pub(crate) fn line_index(&self) -> usize {
    self.inner.line_index.get()
  }

  pub(crate) fn set_line_index(&self, line_index: usize) {
    self.inner.line_index.set(line_index);
  }

  // ----- layout state -----

  pub(crate) fn layout_ref(&self) -> Ref<'_, LayoutResults> {
    self.inner.layout.borrow()
  }

  pub(crate) fn layout_mut(&self) -> RefMut<'_, LayoutResults> {
    self.inner.layout.borrow_mut()
  }

  /// Left offset relative to the owner
  pub fn layout_left(&self) -> f32 {
    self.inner.layout.borrow().position[Edge::Left.index()]
  }

  /// Top offset relative to the owner
  pub fn layout_top(&self) -> f32 {
    self.inner.layout.borrow().position[Edge::Top.index()]
  }

  /// Offset of the right edge from the owner's right edge
  pub fn layout_right(&self) -> f32 {
    self.inner.layout.borrow().position[Edge::Right.index()]
  }

  /// Offset of the bottom edge from the owner's bottom edge
  pub fn layout_bottom(&self) -> f32 {
    self.inner.layout.borrow().position[Edge::Bottom.index()]
  }

  pub fn layout_width(&self) -> f32 {
    self.inner.layout.borrow().dimensions[Dimension::Width.index()]
  }

  pub fn layout_height(&self) -> f32 {
    self.inner.layout.borrow().dimensions[Dimension::Height.index()]
  }

  /// Position and size in one rect, in the owner's coordinate space
  pub fn layout_rect(&self) -> Rect {
    let layout = self.inner.layout.borrow();
    Rect::new(
      layout.position[Edge::Left.index()],
      layout.position[Edge::Top.index()],
      layout.dimensions[Dimension::Width.index()],
      layout.dimensions[Dimension::Height.index()],
    )
  }

  /// Direction the last layout pass resolved for this node
  pub fn layout_direction(&self) -> Direction {
    self.inner.layout.borrow().direction
  }

  /// True when content overflowed the available space during the last pass
  pub fn had_overflow(&self) -> bool {
    self.inner.layout.borrow().had_overflow
  }

  pub fn layout_margin(&self, edge: Edge) -> f32 {
    self.resolved_layout_edge(edge, |layout| &layout.margin)
  }

  pub fn layout_border(&self, edge: Edge) -> f32 {
    self.resolved_layout_edge(edge, |layout| &layout.border)
  }

  pub fn layout_padding(&self, edge: Edge) -> f32 {
    self.resolved_layout_edge(edge, |layout| &layout.padding)
  }

  /// Resolved layout edges are stored under start/end for the horizontal
  /// sides; left and right map onto them by direction.
  fn resolved_layout_edge<F>(&self, edge: Edge, field: F) -> f32
  where
    F: Fn(&LayoutResults) -> &[f32; 6],
  {
    if edge.index() > Edge::End.index() {
      self.fatal_layout_edge();
    }
    let layout = self.inner.layout.borrow();
    let values = field(&layout);
    match edge {
      Edge::Left if layout.direction == Direction::Rtl => values[Edge::End.index()],
      Edge::Left => values[Edge::Start.index()],
      Edge::Right if layout.direction == Direction::Rtl => values[Edge::Start.index()],
      Edge::Right => values[Edge::End.index()],
      other => values[other.index()],
    }
  }

  fn fatal_layout_edge(&self) -> ! {
    self.inner.config.log(
      LogLevel::Fatal,
      "Cannot get layout properties of multi-edge shorthands",
    );
    unreachable!()
  }

  /// Writes leading and trailing positions for both axes from the style
  /// offsets and margins. The root ignores the writing direction.
  pub(crate) fn update_position(
    &self,
    direction: Direction,
    main_size: f32,
    cross_size: f32,
    owner_width: f32,
  ) {
    use crate::layout::resolve;

    let direction_respecting_root = if self.owner().is_some() {
      direction
    } else {
      Direction::Ltr
    };
    let style = self.inner.style.borrow();
    let main_axis = style.flex_direction.resolve(direction_respecting_root);
    let cross_axis = main_axis.cross(direction_respecting_root);

    let relative_main = resolve::relative_position(&style, main_axis, main_size);
    let relative_cross = resolve::relative_position(&style, cross_axis, cross_size);
    let leading_main =
      resolve::leading_margin(&style, main_axis, owner_width) + relative_main;
    let trailing_main =
      resolve::trailing_margin(&style, main_axis, owner_width) + relative_main;
    let leading_cross =
      resolve::leading_margin(&style, cross_axis, owner_width) + relative_cross;
    let trailing_cross =
      resolve::trailing_margin(&style, cross_axis, owner_width) + relative_cross;
    drop(style);

    let mut layout = self.inner.layout.borrow_mut();
    layout.position[main_axis.leading_edge().index()] = leading_main;
    layout.position[main_axis.trailing_edge().index()] = trailing_main;
    layout.position[cross_axis.leading_edge().index()] = leading_cross;
    layout.position[cross_axis.trailing_edge().index()] = trailing_cross;
  }

  /// Compares the computed layout of two trees node by node.
  pub fn layout_tree_eq(&self, other: &Node) -> bool {
    if self.child_count() != other.child_count() {
      return false;
    }
    if !self
      .inner
      .layout
      .borrow()
      .visible_eq(&other.inner.layout.borrow())
    {
      return false;
    }
    for index in 0..self.child_count() {
      let (a, b) = (self.child(index), other.child(index));
      match (a, b) {
        (Some(a), Some(b)) => {
          if !a.layout_tree_eq(&b) {
            return false;
          }
        }
        _ => return false,
      }
    }
    true
  }
}

impl Default for Node {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Node")
      .field("children", &self.child_count())
      .field("dirty", &self.is_dirty())
      .field("node_type", &self.node_type())
      .field("layout", &self.layout_rect())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_insert_and_owner() {
    let parent = Node::new();
    let child = Node::new();
    parent.insert_child(&child, 0);
    assert_eq!(parent.child_count(), 1);
    assert!(child.owner().unwrap().ptr_eq(&parent));
    assert!(parent.child(0).unwrap().ptr_eq(&child));
    assert!(parent.child(1).is_none());
  }

  #[test]
  fn test_insert_child_with_owner_fails() {
    let a = Node::new();
    let b = Node::new();
    let child = Node::new();
    a.insert_child(&child, 0);
    assert!(b.try_insert_child(&child, 0).is_err());
  }

  #[test]
  fn test_remove_child_detaches_and_resets_layout() {
    let parent = Node::new();
    let child = Node::new();
    parent.insert_child(&child, 0);
    child.inner.layout.borrow_mut().dimensions = [10.0, 10.0];
    parent.remove_child(&child);
    assert_eq!(parent.child_count(), 0);
    assert!(child.owner().is_none());
    assert!(child.layout_width().is_nan());
  }

  #[test]
  fn test_clone_node_shares_children_until_mutation() {
    let original = Node::new();
    let child = Node::new();
    original.insert_child(&child, 0);

    let copy = original.clone_node();
    assert_eq!(copy.child_count(), 1);
    // The shared entry still belongs to the original.
    assert!(copy.child(0).unwrap().owner().unwrap().ptr_eq(&original));

    let second = Node::new();
    copy.insert_child(&second, 1);
    // Mutation forced a private copy of the first child.
    let first_of_copy = copy.child(0).unwrap();
    assert!(!first_of_copy.ptr_eq(&child));
    assert!(first_of_copy.owner().unwrap().ptr_eq(&copy));
    // The original list is untouched.
    assert_eq!(original.child_count(), 1);
    assert!(original.child(0).unwrap().ptr_eq(&child));
  }

  #[test]
  fn test_clone_callback_fires_per_copied_child() {
    use std::cell::RefCell;

    let config = Config::new();
    let copies: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = copies.clone();
    config.set_clone_node_callback(Some(Rc::new(move |_, _, _, index| {
      sink.borrow_mut().push(index);
    })));

    let original = Node::with_config(&config);
    for _ in 0..3 {
      original.add_child(&Node::with_config(&config));
    }
    let copy = original.clone_node();
    copy.clone_children_if_needed();
    assert_eq!(*copies.borrow(), vec![0, 1, 2]);
  }

  #[test]
  fn test_dirty_propagates_to_root() {
    let root = Node::new();
    let mid = Node::new();
    let leaf = Node::new();
    root.insert_child(&mid, 0);
    mid.insert_child(&leaf, 0);
    root.set_dirty_flag(false);
    mid.set_dirty_flag(false);

    leaf.set_width(Value::points(10.0));
    assert!(leaf.is_dirty());
    assert!(mid.is_dirty());
    assert!(root.is_dirty());
  }

  #[test]
  fn test_setter_without_change_does_not_dirty() {
    let node = Node::new();
    node.set_width(Value::points(10.0));
    node.set_dirty_flag(false);
    node.set_width(Value::points(10.0));
    assert!(!node.is_dirty());
  }

  #[test]
  fn test_mark_dirty_requires_measure_func() {
    let node = Node::new();
    assert!(node.try_mark_dirty().is_err());
    node.set_measure_func(Some(Rc::new(|_, _, _, _, _| Size::new(10.0, 10.0))));
    assert!(node.try_mark_dirty().is_ok());
    assert!(node.is_dirty());
  }

  #[test]
  fn test_measure_func_conflicts_with_children() {
    let parent = Node::new();
    parent.add_child(&Node::new());
    assert!(parent
      .try_set_measure_func(Some(Rc::new(|_, _, _, _, _| Size::ZERO)))
      .is_err());

    let leaf = Node::new();
    leaf.set_measure_func(Some(Rc::new(|_, _, _, _, _| Size::ZERO)));
    assert_eq!(leaf.node_type(), NodeType::Text);
    assert!(leaf.try_insert_child(&Node::new(), 0).is_err());
    leaf.set_measure_func(None);
    assert_eq!(leaf.node_type(), NodeType::Default);
  }

  #[test]
  fn test_dirtied_fires_once_per_transition() {
    use std::cell::Cell;

    let node = Node::new();
    let count = Rc::new(Cell::new(0));
    let sink = count.clone();
    node.set_dirtied_func(Some(Rc::new(move |_| sink.set(sink.get() + 1))));

    node.set_width(Value::points(10.0));
    node.set_height(Value::points(10.0));
    assert_eq!(count.get(), 1);

    node.set_dirty_flag(false);
    node.set_width(Value::points(20.0));
    assert_eq!(count.get(), 2);
  }

  #[test]
  fn test_reset_requires_detached_leaf() {
    let parent = Node::new();
    let child = Node::new();
    parent.insert_child(&child, 0);
    assert!(parent.try_reset().is_err());
    assert!(child.try_reset().is_err());
    parent.remove_child(&child);
    assert!(child.try_reset().is_ok());

    child.set_width(Value::points(5.0));
    child.reset();
    assert_eq!(child.width(), Value::Auto);
  }

  #[test]
  fn test_copy_style_marks_dirty_only_on_change() {
    let source = Node::new();
    source.set_width(Value::points(100.0));
    let target = Node::new();
    target.copy_style(&source);
    assert!(target.is_dirty());
    assert_eq!(target.width(), Value::points(100.0));

    target.set_dirty_flag(false);
    target.copy_style(&source);
    assert!(!target.is_dirty());
  }

  #[test]
  fn test_flex_shorthand_resolution() {
    let parent = Node::new();
    let node = Node::new();
    parent.insert_child(&node, 0);

    node.set_flex(2.0);
    assert_eq!(node.resolve_flex_grow(), 2.0);
    assert_eq!(node.resolve_flex_shrink(), 0.0);
    assert_eq!(node.resolved_flex_basis(), Value::points(0.0));

    node.set_flex(-3.0);
    assert_eq!(node.resolve_flex_grow(), 0.0);
    assert_eq!(node.resolve_flex_shrink(), 3.0);
    assert_eq!(node.resolved_flex_basis(), Value::Auto);

    node.set_flex_grow(5.0);
    assert_eq!(node.resolve_flex_grow(), 5.0);
  }

  #[test]
  fn test_root_never_flexes() {
    let root = Node::new();
    root.set_flex_grow(1.0);
    root.set_flex_shrink(1.0);
    assert_eq!(root.resolve_flex_grow(), 0.0);
    assert_eq!(root.resolve_flex_shrink(), 0.0);
  }

  #[test]
  fn test_resolve_dimensions_folds_equal_min_max() {
    let node = Node::new();
    node.set_width(Value::points(50.0));
    node.set_min_width(Value::points(80.0));
    node.set_max_width(Value::points(80.0));
    node.resolve_dimensions();
    assert_eq!(node.resolved_dimension(Dimension::Width), Value::points(80.0));
    assert_eq!(node.resolved_dimension(Dimension::Height), Value::Auto);
  }

  #[test]
  fn test_instance_count_tracks_nodes() {
    let config = Config::new();
    let a = Node::with_config(&config);
    let b = Node::with_config(&config);
    assert_eq!(config.node_instance_count(), 2);
    drop(a);
    drop(b);
    assert_eq!(config.node_instance_count(), 0);
  }
}

//! Tree manipulation and copy-on-write child lists.

use std::cell::Cell;
use std::rc::Rc;

use fastflex::{Config, FlexDirection, MeasureFn, Node, Size, Value, UNDEFINED};

fn sized_leaf(width: f32, height: f32) -> Node {
    let node = Node::new();
    node.set_width(Value::points(width));
    node.set_height(Value::points(height));
    node
}

fn fixed_measure(width: f32, height: f32) -> MeasureFn {
    Rc::new(move |_, _, _, _, _| Size::new(width, height))
}

#[test]
fn removing_a_child_from_a_clone_preserves_the_original() {
    let parent = Node::new();
    parent.set_flex_direction(FlexDirection::Row);
    parent.set_width(Value::points(100.0));
    parent.set_height(Value::points(20.0));
    let first = sized_leaf(10.0, 10.0);
    let second = sized_leaf(10.0, 10.0);
    parent.add_child(&first);
    parent.add_child(&second);

    let fork = parent.clone_node();
    fork.remove_child(&first);

    // The original tree is untouched.
    assert_eq!(parent.child_count(), 2);
    assert!(parent.child(0).unwrap().ptr_eq(&first));
    assert!(first.owner().unwrap().ptr_eq(&parent));

    // The fork got its own deep copy of the surviving child.
    assert_eq!(fork.child_count(), 1);
    let survivor = fork.child(0).unwrap();
    assert!(!survivor.ptr_eq(&second));
    assert!(survivor.owner().unwrap().ptr_eq(&fork));
}

#[test]
fn layout_deep_copies_shared_children() {
    let parent = Node::new();
    parent.set_width(Value::points(50.0));
    parent.set_height(Value::points(50.0));
    let child = sized_leaf(10.0, 10.0);
    parent.add_child(&child);

    let fork = parent.clone_node();
    // Until something mutates, the fork still references the very same
    // child handle.
    assert!(fork.child(0).unwrap().ptr_eq(&child));

    fork.calculate_layout(UNDEFINED, UNDEFINED, None);

    let copied = fork.child(0).unwrap();
    assert!(!copied.ptr_eq(&child));
    assert!(copied.owner().unwrap().ptr_eq(&fork));
    assert!(child.owner().unwrap().ptr_eq(&parent));
}

#[test]
fn clone_callback_fires_for_each_copied_child() {
    let config = Config::new();
    let clones = Rc::new(Cell::new(0u32));
    let seen = clones.clone();
    config.set_clone_node_callback(Some(Rc::new(move |_old, _new, _owner, _index| {
        seen.set(seen.get() + 1);
    })));

    let parent = Node::with_config(&config);
    let first = Node::with_config(&config);
    let second = Node::with_config(&config);
    parent.add_child(&first);
    parent.add_child(&second);

    let fork = parent.clone_node();
    fork.remove_child(&second);

    // Only the surviving child was copied into the fork's list.
    assert_eq!(clones.get(), 1);
}

#[test]
fn insert_child_controls_ordering() {
    let root = Node::new();
    let first = Node::new();
    let second = Node::new();
    let third = Node::new();

    root.add_child(&first);
    root.insert_child(&second, 0);
    root.insert_child(&third, 1);

    assert!(root.child(0).unwrap().ptr_eq(&second));
    assert!(root.child(1).unwrap().ptr_eq(&third));
    assert!(root.child(2).unwrap().ptr_eq(&first));
    assert!(second.owner().unwrap().ptr_eq(&root));
}

#[test]
fn attached_or_measured_nodes_reject_new_children() {
    let measured = Node::new();
    measured.set_measure_func(Some(fixed_measure(10.0, 10.0)));
    assert!(measured.try_insert_child(&Node::new(), 0).is_err());

    let owner = Node::new();
    let child = Node::new();
    owner.add_child(&child);
    let other = Node::new();
    assert!(other.try_insert_child(&child, 0).is_err());
}

#[test]
fn remove_all_children_resets_ownership_and_layout() {
    let root = Node::new();
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(100.0));
    let child = sized_leaf(10.0, 10.0);
    root.add_child(&child);
    root.calculate_layout(UNDEFINED, UNDEFINED, None);
    assert_eq!(child.layout_width(), 10.0);

    root.remove_all_children();

    assert_eq!(root.child_count(), 0);
    assert!(child.owner().is_none());
    assert!(child.layout_width().is_nan());
}

#[test]
fn free_detaches_but_keeps_the_owner_clean() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(20.0));
    let first = sized_leaf(10.0, 10.0);
    let second = sized_leaf(10.0, 10.0);
    root.add_child(&first);
    root.add_child(&second);
    let grandchild = sized_leaf(5.0, 5.0);
    first.add_child(&grandchild);
    root.calculate_layout(UNDEFINED, UNDEFINED, None);
    assert!(!root.is_dirty());

    let handle = first.clone();
    first.free();

    // Gone from the tree, and the former owner keeps its cached layout.
    assert_eq!(root.child_count(), 1);
    assert!(root.child(0).unwrap().ptr_eq(&second));
    assert!(!root.is_dirty());

    // Surviving handles see a detached, childless node.
    assert!(handle.owner().is_none());
    assert_eq!(handle.child_count(), 0);
    assert!(grandchild.owner().is_none());
}

#[test]
fn free_recursive_spares_children_it_does_not_own() {
    let original = Node::new();
    let first = sized_leaf(10.0, 10.0);
    let second = sized_leaf(10.0, 10.0);
    original.add_child(&first);
    original.add_child(&second);

    // The fork still shares the original's child handles.
    let fork = original.clone_node();
    let fork_handle = fork.clone();
    fork.free_recursive();

    assert_eq!(fork_handle.child_count(), 0);
    assert_eq!(original.child_count(), 2);
    assert!(first.owner().unwrap().ptr_eq(&original));
    assert!(second.owner().unwrap().ptr_eq(&original));

    // Owned subtrees are torn down link by link.
    let original_handle = original.clone();
    original.free_recursive();
    assert_eq!(original_handle.child_count(), 0);
    assert!(first.owner().is_none());
    assert!(second.owner().is_none());
}

#[test]
fn copy_style_only_dirties_on_change() {
    let target = Node::new();
    target.set_width(Value::points(50.0));
    target.calculate_layout(UNDEFINED, UNDEFINED, None);
    assert!(!target.is_dirty());

    let same = Node::new();
    same.set_width(Value::points(50.0));
    target.copy_style(&same);
    assert!(!target.is_dirty());

    let different = Node::new();
    different.set_width(Value::points(50.0));
    different.set_height(Value::points(10.0));
    target.copy_style(&different);
    assert!(target.is_dirty());
    assert_eq!(target.height(), Value::points(10.0));
}

#[test]
fn reset_requires_a_detached_leaf() {
    let root = Node::new();
    root.set_width(Value::points(50.0));
    let child = Node::new();
    root.add_child(&child);

    assert!(root.try_reset().is_err());
    assert!(child.try_reset().is_err());

    root.remove_all_children();
    assert!(root.try_reset().is_ok());
    assert_eq!(root.width(), Value::Auto);
}

#[test]
fn nodes_are_counted_per_config() {
    let config = Config::new();
    let node = Node::with_config(&config);
    assert_eq!(config.node_instance_count(), 1);

    let fork = node.clone_node();
    assert_eq!(config.node_instance_count(), 2);

    drop(fork);
    assert_eq!(config.node_instance_count(), 1);
}

#[test]
fn layout_tree_eq_compares_results_recursively() {
    let build = || {
        let root = Node::new();
        root.set_flex_direction(FlexDirection::Row);
        root.set_width(Value::points(100.0));
        root.set_height(Value::points(20.0));
        let child = sized_leaf(30.0, 10.0);
        root.add_child(&child);
        (root, child)
    };

    let (left, left_child) = build();
    let (right, _) = build();
    left.calculate_layout(UNDEFINED, UNDEFINED, None);
    right.calculate_layout(UNDEFINED, UNDEFINED, None);
    assert!(left.layout_tree_eq(&right));

    left_child.set_width(Value::points(40.0));
    left.calculate_layout(UNDEFINED, UNDEFINED, None);
    assert!(!left.layout_tree_eq(&right));
}

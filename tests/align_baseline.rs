//! Cross-axis alignment, including baseline alignment of text runs.

use std::rc::Rc;

use fastflex::{Align, FlexDirection, Node, Value, UNDEFINED};

fn leaf(width: f32, height: f32) -> Node {
    let node = Node::new();
    node.set_width(Value::points(width));
    node.set_height(Value::points(height));
    node
}

#[test]
fn baseline_alignment_lines_up_leaf_bottoms() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_align_items(Align::Baseline);
    root.set_width(Value::points(200.0));
    root.set_height(Value::points(60.0));

    let tall = leaf(30.0, 40.0);
    let short = leaf(30.0, 20.0);
    root.add_child(&tall);
    root.add_child(&short);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    // A leaf's baseline is its bottom edge, so the bottoms align.
    assert_eq!(tall.layout_top(), 0.0);
    assert_eq!(short.layout_top(), 20.0);
}

#[test]
fn custom_baseline_funcs_override_the_default() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_align_items(Align::Baseline);
    root.set_width(Value::points(200.0));
    root.set_height(Value::points(60.0));

    let tall = leaf(30.0, 40.0);
    tall.set_baseline_func(Some(Rc::new(|_, _, _| 30.0)));
    let short = leaf(30.0, 20.0);
    short.set_baseline_func(Some(Rc::new(|_, _, _| 10.0)));
    root.add_child(&tall);
    root.add_child(&short);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    // Both reported baselines meet 30 points below the line's top.
    assert_eq!(tall.layout_top(), 0.0);
    assert_eq!(short.layout_top(), 20.0);
}

#[test]
fn containers_inherit_their_first_child_baseline() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_align_items(Align::Baseline);
    root.set_width(Value::points(300.0));
    root.set_height(Value::points(100.0));

    let paragraph = Node::new();
    let line = leaf(20.0, 30.0);
    paragraph.add_child(&line);
    let sidebar = leaf(20.0, 50.0);
    root.add_child(&paragraph);
    root.add_child(&sidebar);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(paragraph.layout_height(), 30.0);
    assert_eq!(paragraph.layout_top(), 20.0);
    assert_eq!(sidebar.layout_top(), 0.0);
}

#[test]
fn align_self_overrides_align_items() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_align_items(Align::FlexStart);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(60.0));

    let start = leaf(20.0, 20.0);
    let end = leaf(20.0, 20.0);
    end.set_align_self(Align::FlexEnd);
    let centered = leaf(20.0, 20.0);
    centered.set_align_self(Align::Center);
    root.add_child(&start);
    root.add_child(&end);
    root.add_child(&centered);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(start.layout_top(), 0.0);
    assert_eq!(end.layout_top(), 40.0);
    assert_eq!(centered.layout_top(), 20.0);
}

#[test]
fn stretch_fills_the_cross_axis_unless_sized() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(60.0));

    let auto_height = Node::new();
    auto_height.set_width(Value::points(20.0));
    let fixed_height = leaf(20.0, 25.0);
    root.add_child(&auto_height);
    root.add_child(&fixed_height);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(auto_height.layout_height(), 60.0);
    assert_eq!(fixed_height.layout_height(), 25.0);
}

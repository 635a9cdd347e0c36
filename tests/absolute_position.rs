//! Absolutely positioned children: offsets, stretching and fallbacks.

use std::rc::Rc;

use fastflex::{
    Align, Edge, FlexDirection, JustifyContent, Node, PositionType, Size, Value, Wrap, UNDEFINED,
};

#[test]
fn absolute_children_are_out_of_flow() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(20.0));

    let first = Node::new();
    first.set_width(Value::points(30.0));
    let pinned = Node::new();
    pinned.set_position_type(PositionType::Absolute);
    pinned.set_position(Edge::Left, Value::points(0.0));
    pinned.set_width(Value::points(10.0));
    pinned.set_height(Value::points(10.0));
    let second = Node::new();
    second.set_width(Value::points(30.0));
    root.add_child(&first);
    root.add_child(&pinned);
    root.add_child(&second);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    // The in-flow children pack as if the pinned child did not exist.
    assert_eq!(first.layout_left(), 0.0);
    assert_eq!(second.layout_left(), 30.0);
    assert_eq!(pinned.layout_left(), 0.0);
}

#[test]
fn percent_offsets_resolve_against_the_inner_box() {
    let root = Node::new();
    root.set_width(Value::points(200.0));
    root.set_height(Value::points(100.0));

    let child = Node::new();
    child.set_position_type(PositionType::Absolute);
    child.set_position(Edge::Left, Value::percent(10.0));
    child.set_position(Edge::Top, Value::percent(20.0));
    child.set_width(Value::points(50.0));
    child.set_height(Value::points(20.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_left(), 20.0);
    assert_eq!(child.layout_top(), 20.0);
}

#[test]
fn opposing_offsets_stretch_the_child() {
    let root = Node::new();
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(100.0));
    root.set_border(Edge::All, 5.0);

    let child = Node::new();
    child.set_position_type(PositionType::Absolute);
    child.set_position(Edge::Left, Value::points(10.0));
    child.set_position(Edge::Right, Value::points(10.0));
    child.set_height(Value::points(20.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    // Width is what remains between the offsets inside the border box.
    assert_eq!(child.layout_width(), 70.0);
    assert_eq!(child.layout_left(), 15.0);
    assert_eq!(child.layout_top(), 5.0);
    assert_eq!(child.layout_height(), 20.0);
}

#[test]
fn unset_axes_fall_back_to_justify_and_align() {
    let root = Node::new();
    root.set_justify_content(JustifyContent::Center);
    root.set_align_items(Align::Center);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(100.0));

    let child = Node::new();
    child.set_position_type(PositionType::Absolute);
    child.set_width(Value::points(20.0));
    child.set_height(Value::points(10.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_left(), 40.0);
    assert_eq!(child.layout_top(), 45.0);
}

#[test]
fn wrap_reverse_pins_unset_cross_to_the_far_edge() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_flex_wrap(Wrap::WrapReverse);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(50.0));

    let child = Node::new();
    child.set_position_type(PositionType::Absolute);
    child.set_width(Value::points(20.0));
    child.set_height(Value::points(10.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_left(), 0.0);
    assert_eq!(child.layout_top(), 40.0);
}

#[test]
fn trailing_offsets_anchor_to_the_far_corner() {
    let root = Node::new();
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(100.0));
    root.set_padding(Edge::All, Value::points(8.0));

    let child = Node::new();
    child.set_position_type(PositionType::Absolute);
    child.set_position(Edge::Right, Value::points(10.0));
    child.set_position(Edge::Bottom, Value::points(10.0));
    child.set_width(Value::points(20.0));
    child.set_height(Value::points(20.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    // Trailing offsets measure from the border box, not the padding box.
    assert_eq!(child.layout_left(), 70.0);
    assert_eq!(child.layout_top(), 70.0);
}

#[test]
fn unsized_absolute_children_are_measured() {
    let root = Node::new();
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(100.0));

    let child = Node::new();
    child.set_position_type(PositionType::Absolute);
    child.set_measure_func(Some(Rc::new(|_, _, _, _, _| Size::new(33.0, 11.0))));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_width(), 33.0);
    assert_eq!(child.layout_height(), 11.0);
    assert_eq!(child.layout_left(), 0.0);
    assert_eq!(child.layout_top(), 0.0);
}

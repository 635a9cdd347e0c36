//! Core flex mechanics: fixed sizing, growing, shrinking and flex basis.

use fastflex::{FlexDirection, Node, Value, UNDEFINED};

#[test]
fn fixed_size_leaf_takes_its_style_size() {
    let root = Node::new();
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(100.0));

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(root.layout_left(), 0.0);
    assert_eq!(root.layout_top(), 0.0);
    assert_eq!(root.layout_width(), 100.0);
    assert_eq!(root.layout_height(), 100.0);
}

#[test]
fn two_grow_children_split_a_row_evenly() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(50.0));

    let first = Node::new();
    first.set_flex_grow(1.0);
    let second = Node::new();
    second.set_flex_grow(1.0);
    root.add_child(&first);
    root.add_child(&second);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(first.layout_left(), 0.0);
    assert_eq!(first.layout_width(), 50.0);
    assert_eq!(first.layout_height(), 50.0);
    assert_eq!(second.layout_left(), 50.0);
    assert_eq!(second.layout_width(), 50.0);
    assert_eq!(second.layout_height(), 50.0);
}

#[test]
fn growth_is_proportional_to_flex_grow() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(20.0));

    let light = Node::new();
    light.set_flex_grow(1.0);
    let heavy = Node::new();
    heavy.set_flex_grow(3.0);
    root.add_child(&light);
    root.add_child(&heavy);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(light.layout_width(), 25.0);
    assert_eq!(heavy.layout_width(), 75.0);
    assert_eq!(heavy.layout_left(), 25.0);
}

#[test]
fn lone_child_shrinks_down_to_the_container() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(60.0));
    root.set_height(Value::points(40.0));

    let child = Node::new();
    child.set_flex_basis(Value::points(100.0));
    child.set_flex_shrink(1.0);
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_left(), 0.0);
    assert_eq!(child.layout_width(), 60.0);
}

#[test]
fn shrinkage_is_weighted_by_flex_basis() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(20.0));

    let wide = Node::new();
    wide.set_flex_basis(Value::points(120.0));
    wide.set_flex_shrink(1.0);
    let narrow = Node::new();
    narrow.set_flex_basis(Value::points(40.0));
    narrow.set_flex_shrink(1.0);
    root.add_child(&wide);
    root.add_child(&narrow);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    // 60 points of overflow, removed in proportion to basis: 45 from the
    // wide child and 15 from the narrow one.
    assert_eq!(wide.layout_width(), 75.0);
    assert_eq!(narrow.layout_width(), 25.0);
    assert_eq!(narrow.layout_left(), 75.0);
}

#[test]
fn flex_basis_overrides_the_main_dimension() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(200.0));
    root.set_height(Value::points(20.0));

    let child = Node::new();
    child.set_width(Value::points(50.0));
    child.set_flex_basis(Value::points(120.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_width(), 120.0);
}

#[test]
fn percent_basis_resolves_against_the_container() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(200.0));
    root.set_height(Value::points(20.0));

    let child = Node::new();
    child.set_flex_basis(Value::percent(25.0));
    child.set_height(Value::points(10.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_width(), 50.0);
    assert_eq!(child.layout_height(), 10.0);
}

#[test]
fn flex_shorthand_implies_zero_basis() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(20.0));

    let light = Node::new();
    light.set_flex(1.0);
    let heavy = Node::new();
    heavy.set_flex(3.0);
    root.add_child(&light);
    root.add_child(&heavy);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(light.layout_width(), 25.0);
    assert_eq!(heavy.layout_width(), 75.0);
}

#[test]
fn row_reverse_lays_out_from_the_right() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::RowReverse);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(20.0));

    let first = Node::new();
    first.set_width(Value::points(30.0));
    let second = Node::new();
    second.set_width(Value::points(20.0));
    root.add_child(&first);
    root.add_child(&second);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(first.layout_left(), 70.0);
    assert_eq!(second.layout_left(), 50.0);
}

#[test]
fn column_is_the_default_main_axis() {
    let root = Node::new();
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(90.0));

    let first = Node::new();
    first.set_height(Value::points(30.0));
    let second = Node::new();
    second.set_height(Value::points(40.0));
    root.add_child(&first);
    root.add_child(&second);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(first.layout_top(), 0.0);
    assert_eq!(second.layout_top(), 30.0);
    // Cross-axis stretch fills the container width.
    assert_eq!(first.layout_width(), 100.0);
    assert_eq!(second.layout_width(), 100.0);
}

#[test]
fn overflowing_row_reports_had_overflow() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(50.0));
    root.set_height(Value::points(20.0));

    for _ in 0..2 {
        let child = Node::new();
        child.set_width(Value::points(40.0));
        root.add_child(&child);
    }

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert!(root.had_overflow());
}

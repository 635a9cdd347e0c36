//! Main-axis distribution: justify-content modes and auto margins.

use fastflex::{Display, Edge, FlexDirection, JustifyContent, Node, Value, UNDEFINED};

fn row_with_children(container_width: f32, child_widths: &[f32]) -> (Node, Vec<Node>) {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(container_width));
    root.set_height(Value::points(20.0));
    let children: Vec<Node> = child_widths
        .iter()
        .map(|&width| {
            let child = Node::new();
            child.set_width(Value::points(width));
            child.set_height(Value::points(10.0));
            root.add_child(&child);
            child
        })
        .collect();
    (root, children)
}

#[test]
fn justify_center_centers_a_column_child() {
    let root = Node::new();
    root.set_justify_content(JustifyContent::Center);
    root.set_width(Value::points(60.0));
    root.set_height(Value::points(100.0));

    let child = Node::new();
    child.set_height(Value::points(20.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_top(), 40.0);
    assert_eq!(child.layout_width(), 60.0);
}

#[test]
fn justify_flex_end_packs_to_the_far_edge() {
    let root = Node::new();
    root.set_justify_content(JustifyContent::FlexEnd);
    root.set_width(Value::points(60.0));
    root.set_height(Value::points(100.0));

    let child = Node::new();
    child.set_height(Value::points(20.0));
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_top(), 80.0);
}

#[test]
fn space_between_pins_the_ends() {
    let (root, children) = row_with_children(100.0, &[20.0, 20.0, 20.0]);
    root.set_justify_content(JustifyContent::SpaceBetween);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(children[0].layout_left(), 0.0);
    assert_eq!(children[1].layout_left(), 40.0);
    assert_eq!(children[2].layout_left(), 80.0);
}

#[test]
fn space_between_with_one_child_packs_to_the_start() {
    let (root, children) = row_with_children(100.0, &[10.0]);
    root.set_justify_content(JustifyContent::SpaceBetween);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(children[0].layout_left(), 0.0);
}

#[test]
fn space_around_halves_the_edge_gaps() {
    let (root, children) = row_with_children(90.0, &[10.0, 10.0, 10.0]);
    root.set_justify_content(JustifyContent::SpaceAround);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(children[0].layout_left(), 10.0);
    assert_eq!(children[1].layout_left(), 40.0);
    assert_eq!(children[2].layout_left(), 70.0);
}

#[test]
fn space_evenly_equalizes_every_gap() {
    let (root, children) = row_with_children(100.0, &[10.0, 10.0, 10.0]);
    root.set_justify_content(JustifyContent::SpaceEvenly);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(children[0].layout_left(), 17.5);
    assert_eq!(children[1].layout_left(), 45.0);
    assert_eq!(children[2].layout_left(), 72.5);
}

#[test]
fn auto_main_margins_absorb_the_free_space() {
    let (root, children) = row_with_children(100.0, &[30.0, 30.0]);
    children[0].set_margin(Edge::Right, Value::Auto);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(children[0].layout_left(), 0.0);
    assert_eq!(children[1].layout_left(), 70.0);
}

#[test]
fn auto_cross_margins_center_the_child() {
    let root = Node::new();
    root.set_flex_direction(FlexDirection::Row);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(60.0));

    let child = Node::new();
    child.set_width(Value::points(20.0));
    child.set_height(Value::points(20.0));
    child.set_margin(Edge::Top, Value::Auto);
    child.set_margin(Edge::Bottom, Value::Auto);
    root.add_child(&child);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(child.layout_top(), 20.0);
}

#[test]
fn hidden_children_are_skipped_by_justification() {
    let (root, children) = row_with_children(100.0, &[30.0, 30.0, 30.0]);
    root.set_justify_content(JustifyContent::SpaceBetween);
    children[1].set_display(Display::None);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    assert_eq!(children[0].layout_left(), 0.0);
    assert_eq!(children[2].layout_left(), 70.0);
    assert_eq!(children[1].layout_width(), 0.0);
    assert_eq!(children[1].layout_height(), 0.0);
}

//! Web-flavored default styles opted into through the config.

use fastflex::{Config, FlexDirection, Node, Value, UNDEFINED};

fn web_config() -> Config {
    Config::new().with_web_defaults(true)
}

#[test]
fn web_nodes_default_to_row_and_shrink() {
    let config = web_config();
    let root = Node::with_config(&config);
    root.set_width(Value::points(100.0));
    root.set_height(Value::points(20.0));

    let first = Node::with_config(&config);
    first.set_width(Value::points(80.0));
    let second = Node::with_config(&config);
    second.set_width(Value::points(80.0));
    root.add_child(&first);
    root.add_child(&second);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    // Without any explicit direction the children flow horizontally, and
    // the default shrink factor of one resolves the overflow.
    assert_eq!(first.layout_width(), 50.0);
    assert_eq!(second.layout_width(), 50.0);
    assert_eq!(second.layout_left(), 50.0);
}

#[test]
fn web_flex_shorthand_grows_from_the_content_size() {
    let config = web_config();
    let root = Node::with_config(&config);
    root.set_flex_direction(FlexDirection::Column);
    root.set_width(Value::points(50.0));
    root.set_height(Value::points(100.0));

    let first = Node::with_config(&config);
    first.set_flex(1.0);
    first.set_height(Value::points(30.0));
    let second = Node::with_config(&config);
    second.set_flex(1.0);
    second.set_height(Value::points(10.0));
    root.add_child(&first);
    root.add_child(&second);

    root.calculate_layout(UNDEFINED, UNDEFINED, None);

    // The web flex shorthand keeps an auto basis, so growth starts from
    // the children's own heights instead of zero.
    assert_eq!(first.layout_height(), 60.0);
    assert_eq!(second.layout_height(), 40.0);
    assert_eq!(second.layout_top(), 60.0);
}

#[test]
fn reset_reapplies_web_defaults() {
    let config = web_config();
    let node = Node::with_config(&config);
    node.set_flex_direction(FlexDirection::Column);
    node.set_width(Value::points(50.0));

    node.reset();

    assert_eq!(node.flex_direction(), FlexDirection::Row);
    assert_eq!(node.width(), Value::Auto);
}

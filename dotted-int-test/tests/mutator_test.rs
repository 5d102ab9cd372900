use dotted::common::{Key, Value};
use dotted::{collect, value, Collection};
use dotted_int_test::test_util::{create_test_context, key_strings, run_test};

#[ctor::ctor]
fn init() {
    colog::init();
}

#[test]
fn test_pop_returns_last_item_and_removes_it() {
    let mut c = collect!["foo", "bar"];
    assert_eq!(c.pop(), Some(Value::from("bar")));
    assert_eq!(c.first(), Some(&Value::from("foo")));
    assert_eq!(c.pop(), Some(Value::from("foo")));
    assert_eq!(c.pop(), None);
}

#[test]
fn test_shift_returns_first_item_and_removes_it() {
    let mut c = collect!["foo", "bar"];
    assert_eq!(c.shift(), Some(Value::from("foo")));
    assert_eq!(c.first(), Some(&Value::from("bar")));
    assert_eq!(c[0], Value::from("bar"));

    let mut keyed = collect!{"a" => 1, 5 => 2, 9 => 3};
    assert_eq!(keyed.shift(), Some(Value::Int(1)));
    assert_eq!(keyed, collect!{0 => 2, 1 => 3});
    assert_eq!(Collection::new().shift(), None);
}

#[test]
fn test_pull_retrieves_item_from_collection() {
    let mut c = collect!["foo", "bar"];
    assert_eq!(c.pull(0), Some(Value::from("foo")));
    assert_eq!(c, collect!{1 => "bar"});
}

#[test]
fn test_pull_removes_item_from_nested_collection() {
    let mut nested = collect![
        {"a" => {"b" => "c"}, "d" => "e"},
        {"f" => "g"}
    ];
    let pulled = nested.pull("0.a.b");
    assert_eq!(pulled, Some(Value::from("c")));
    assert_eq!(nested.get("0"), Some(value!({"a" => {}, "d" => "e"})));
    assert!(nested.has("0.a"));
}

#[test]
fn test_pull_returns_default() {
    let mut c = Collection::new();
    assert_eq!(c.pull_or(0, "foo"), Value::from("foo"));
    assert_eq!(c.pull(0), None);
}

#[test]
fn test_splice() {
    let mut data = collect!["foo", "baz"];
    data.splice(1, None, Value::Null);
    assert_eq!(data, collect!["foo"]);

    let mut data = collect!["foo", "baz"];
    data.splice(1, Some(0), "bar");
    assert_eq!(data, collect!["foo", "bar", "baz"]);

    let mut data = collect!["foo", "baz"];
    data.splice(1, Some(1), Value::Null);
    assert_eq!(data, collect!["foo"]);

    let mut data = collect!["foo", "baz"];
    let cut = data.splice(1, Some(1), "bar");
    assert_eq!(data, collect!["foo", "bar"]);
    assert_eq!(cut, collect!["baz"]);

    let mut data = collect!["foo", "baz"];
    data.splice(1, Some(0), collect!["bar"]);
    assert_eq!(data, collect!["foo", "bar", "baz"]);

    let mut data = collect!["foo", "baz"];
    data.splice(1, Some(1), collect!["bar"]);
    assert_eq!(data, collect!["foo", "bar"]);
}

#[test]
fn test_splice_with_negative_bounds_and_string_keys() {
    let mut data = Collection::from_values(1..=6i64);
    let cut = data.splice(-4, Some(-1), vec![10, 20]);
    assert_eq!(cut, collect![3, 4, 5]);
    assert_eq!(data, collect![1, 2, 10, 20, 6]);

    let mut mixed = collect!{"x" => "keep", 4 => "a", 7 => "b"};
    let cut = mixed.splice(1, Some(1), collect!{"ignored" => "z"});
    assert_eq!(cut, collect!["a"]);
    assert_eq!(key_strings(&mixed), vec!["x", "0", "1"]);
    assert_eq!(mixed.values(), collect!["keep", "z", "b"]);
}

#[test]
fn test_transform() {
    let mut data = collect!{"first" => "taylor", "last" => "otwell"};
    data.transform(|item, key| Value::from(format!("{}-{}", key, item.as_str().unwrap_or_default().chars().rev().collect::<String>())));
    assert_eq!(data, collect!{"first" => "first-rolyat", "last" => "last-llewto"});
}

#[test]
fn test_transform_on_fixtures() {
    run_test(create_test_context, |ctx| {
        let mut orders = ctx.orders();
        orders.transform(|order, _| order.as_map().and_then(|m| m.get(&Key::from("status")).cloned()).unwrap_or_default());
        assert_eq!(orders.values(), collect!["paid", "open", "paid", "cancelled"]);
        assert_eq!(ctx.orders().len(), 4);
        Ok(())
    })
}

#[test]
fn test_prepend() {
    let mut c = collect!["one", "two"];
    c.prepend("zero");
    assert_eq!(c, collect!["zero", "one", "two"]);

    let mut c = collect!{"one" => 1, "two" => 2};
    c.prepend_keyed("zero", 0);
    assert_eq!(c, collect!{"zero" => 0, "one" => 1, "two" => 2});

    let mut c = collect!{"one" => 1, "two" => 2};
    c.prepend_keyed("two", 22);
    assert_eq!(c, collect!{"two" => 22, "one" => 1});

    let mut c = collect!{"x" => "y", 3 => "a"};
    c.prepend("first");
    assert_eq!(key_strings(&c), vec!["0", "x", "1"]);
}

#[test]
fn test_push_and_put_chain() {
    let mut c = collect![4, 5, 6];
    c.push(7).push(8);
    assert_eq!(c, collect![4, 5, 6, 7, 8]);

    let mut c = collect!{"name" => "taylor"};
    c.put("framework", "rocket").unwrap().put("version.major", 11).unwrap();
    assert_eq!(c.get("version.major"), Some(Value::Int(11)));
}

#[test]
fn test_push_after_removals_uses_the_largest_remaining_key() {
    let mut c = collect!["a", "b", "c"];
    c.forget(2);
    c.push("d");
    assert_eq!(key_strings(&c), vec!["0", "1", "2"]);

    c.shift();
    c.push("e");
    assert_eq!(c, collect!["b", "d", "e"]);

    c.put(9, "f").unwrap();
    c.push("g");
    assert_eq!(c.get(10), Some(Value::from("g")));

    c.pop();
    c.splice(0, Some(1), Value::Null);
    c.push("h");
    assert_eq!(key_strings(&c), vec!["0", "1", "2", "3"]);
    assert_eq!(c.values(), collect!["d", "e", "f", "h"]);
}

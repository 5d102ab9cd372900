use dotted::common::{Key, Value};
use dotted::{collect, value, Collection};
use dotted_int_test::test_util::{create_test_context, run_test, Employee, Point};
use serde::{Deserialize, Serialize};

#[ctor::ctor]
fn init() {
    colog::init();
}

#[derive(Debug, Serialize, Deserialize)]
struct Report {
    title: String,
    rows: Collection,
}

#[test]
fn test_to_array_calls_to_array_on_each_item_in_collection() {
    let mut c = Collection::new();
    c.push(collect!["foo.array"]);
    c.push(Value::object(Point { x: 1, y: 2 }));
    c.push("plain");

    let results = c.to_array();
    assert_eq!(results[&Key::Int(0)], value!(["foo.array"]));
    assert_eq!(results[&Key::Int(1)], value!({"x" => 1, "y" => 2}));
    assert_eq!(results[&Key::Int(2)], Value::from("plain"));
    assert!(results.values().all(|value| !value.is_collection() && !value.is_object()));
}

#[test]
fn test_json_serialize_calls_nested_projections() {
    let mut c = Collection::new();
    c.push(Value::object(Point { x: 1, y: 2 }));
    c.push(collect!{"foo" => "bar"});
    let mut outer = Collection::new();
    outer.push(collect!["nested"]);
    c.push(outer);

    let serialized = c.json_serialize();
    assert_eq!(
        serialized,
        value!([{"x" => 1, "y" => 2}, {"foo" => "bar"}, [["nested"]]])
    );
}

#[test]
fn test_to_json_encodes_the_json_serialize_result() {
    let c = collect!{"foo" => "bar", "list" => [1, 2.5, true, null]};
    assert_eq!(c.to_json().unwrap(), r#"{"foo":"bar","list":[1,2.5,true,null]}"#);
    assert_eq!(c.to_json().unwrap(), serde_json::to_string(&c.json_serialize()).unwrap());
}

#[test]
fn test_to_json_pretty() {
    let c = collect!{"foo" => "bar"};
    assert_eq!(c.to_json_pretty().unwrap(), "{\n  \"foo\": \"bar\"\n}");
}

#[test]
fn test_casting_to_string_json_encodes_the_to_array_result() {
    let c = collect!["foo"];
    assert_eq!(c.to_string(), r#"["foo"]"#);
    assert_eq!(format!("{}", collect!{"a" => {"b" => 1}}), r#"{"a":{"b":1}}"#);
    assert_eq!(Collection::new().to_string(), "[]");
}

#[test]
fn test_sparse_keys_encode_as_objects() {
    let mut c = collect!["a", "b", "c"];
    c.forget(1);
    assert_eq!(c.to_json().unwrap(), r#"{"0":"a","2":"c"}"#);
    assert_eq!(c.values().to_json().unwrap(), r#"["a","c"]"#);

    let reordered = collect!{1 => "b", 0 => "a"};
    assert_eq!(reordered.to_json().unwrap(), r#"{"1":"b","0":"a"}"#);
}

#[test]
fn test_deserialize_from_json() {
    let c: Collection = serde_json::from_str(r#"[{"id":1,"tags":["x"]},{"id":2,"tags":[]}]"#).unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(c.get("0.tags.0"), Some(Value::from("x")));
    assert_eq!(c.pluck("id"), collect![1, 2]);

    let keyed: Collection = serde_json::from_str(r#"{"b":1,"a":2,"7":3}"#).unwrap();
    assert_eq!(keyed.items().keys().cloned().collect::<Vec<_>>(), vec![Key::from("b"), Key::from("a"), Key::Int(7)]);

    assert!(serde_json::from_str::<Collection>(r#""text""#).is_err());
    assert!(serde_json::from_str::<Collection>("null").map(|c| c.is_empty()).unwrap_or(false));
}

#[test]
fn test_collection_inside_serde_structs() {
    let report = Report {
        title: "staff".to_string(),
        rows: Collection::from_serialize(&vec![
            Employee::new("ada", "engineering", 120),
            Employee::new("grace", "research", 130),
        ])
        .unwrap(),
    };

    let json = serde_json::to_string(&report).unwrap();
    assert_eq!(
        json,
        r#"{"title":"staff","rows":[{"name":"ada","department":"engineering","salary":120},{"name":"grace","department":"research","salary":130}]}"#
    );

    let decoded: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.title, "staff");
    assert_eq!(decoded.rows, report.rows);
    assert_eq!(decoded.rows.sum_by("salary"), Value::Int(250));
}

#[test]
fn test_fixture_projection_round_trip() {
    run_test(create_test_context, |ctx| {
        let orders = ctx.orders();
        let json = orders.to_json()?;
        let decoded: Collection = serde_json::from_str(&json).map_err(dotted::errors::CollectionError::from)?;
        assert_eq!(decoded, orders);
        assert_eq!(decoded.get("3.total"), Some(Value::from("8")));
        assert_eq!(decoded.get("1.total"), Some(Value::Float(12.5)));
        Ok(())
    })
}

#[test]
fn test_display_of_values() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::from(true).to_string(), "1");
    assert_eq!(Value::from(3.0).to_string(), "3");
    assert_eq!(Value::from(1.25).to_string(), "1.25");
    assert_eq!(value!({"a" => [1, 2]}).to_string(), r#"{"a":[1,2]}"#);
    assert_eq!(Value::Collection(collect!["x"]).to_string(), r#"["x"]"#);
}

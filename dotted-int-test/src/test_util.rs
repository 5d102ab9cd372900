use dotted::common::{sort_cmp, Arrayable, Items, Key, Value};
use dotted::errors::CollectionResult;
use dotted::{collect, Collection};
use serde::Serialize;
use std::cmp::Ordering;

/// Runs a test against a freshly built context and reports failures with the
/// error that caused them.
pub fn run_test<T, B>(before: B, test: T)
where
    T: Fn(TestContext) -> CollectionResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> CollectionResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let result = std::panic::catch_unwind(|| match before() {
        Ok(ctx) => test(ctx).map_err(|e| format!("Test failed: {:?}", e)),
        Err(e) => Err(format!("Before run failed: {:?}", e)),
    });

    let failure = match result {
        Ok(Ok(_)) => return,
        Ok(Err(e)) => e,
        Err(panic_err) => {
            if let Some(s) = panic_err.downcast_ref::<&str>() {
                format!("Panic: {}", s)
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                format!("Panic: {}", s)
            } else {
                "Panic: unknown payload".to_string()
            }
        }
    };

    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("{}", failure);
    eprintln!("=====================================================\n");
    panic!("{}", failure);
}

/// Fixture collections shared by the integration tests.
#[derive(Clone)]
pub struct TestContext {
    people: Collection,
    orders: Collection,
}

impl TestContext {
    pub fn new(people: Collection, orders: Collection) -> Self {
        Self { people, orders }
    }

    pub fn people(&self) -> Collection {
        self.people.clone()
    }

    pub fn orders(&self) -> Collection {
        self.orders.clone()
    }
}

pub fn create_test_context() -> CollectionResult<TestContext> {
    Ok(TestContext::new(create_people(), create_orders()))
}

/// Same fixtures, built with `/` as the path separator.
pub fn create_slash_separated_context() -> CollectionResult<TestContext> {
    let people = Collection::builder()
        .separator("/")
        .build_from(create_people())?;
    let orders = Collection::builder()
        .separator("/")
        .build_from(create_orders())?;
    Ok(TestContext::new(people, orders))
}

pub fn create_people() -> Collection {
    collect![
        {"name" => "lee", "email" => "lee@example.com", "age" => 34,
         "address" => {"city" => "Leeds", "zip" => "LS1"}, "roles" => ["admin", "editor"]},
        {"name" => "dayle", "email" => "dayle@example.com", "age" => 27,
         "address" => {"city" => "York", "zip" => "YO1"}, "roles" => ["editor"]},
        {"name" => "shawn", "email" => "shawn@example.com", "age" => 41,
         "address" => {"city" => "Leeds", "zip" => "LS2"}, "roles" => ["user"]},
    ]
}

pub fn create_orders() -> Collection {
    collect![
        {"id" => 1, "customer" => "lee", "status" => "paid", "total" => 30, "lines" => [{"sku" => "A1", "qty" => 2}, {"sku" => "B7", "qty" => 1}]},
        {"id" => 2, "customer" => "dayle", "status" => "open", "total" => 12.5, "lines" => [{"sku" => "A1", "qty" => 1}]},
        {"id" => 3, "customer" => "lee", "status" => "paid", "total" => 25, "lines" => []},
        {"id" => 4, "customer" => "shawn", "status" => "cancelled", "total" => "8", "lines" => [{"sku" => "C3", "qty" => 5}]},
    ]
}

/// A serde-serializable domain type used as a collection source.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub name: String,
    pub department: String,
    pub salary: i64,
}

impl Employee {
    pub fn new(name: &str, department: &str, salary: i64) -> Self {
        Self {
            name: name.to_string(),
            department: department.to_string(),
            salary,
        }
    }
}

/// A foreign object presenting itself as items.
#[derive(Debug, Clone)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Arrayable for Point {
    fn to_items(&self) -> Items {
        let mut items = Items::new();
        items.insert(Key::from("x"), Value::from(self.x));
        items.insert(Key::from("y"), Value::from(self.y));
        items
    }
}

/// Checks if the values are in ascending (or descending) sort order.
pub fn is_sorted<'a>(values: impl IntoIterator<Item = &'a Value>, ascending: bool) -> bool {
    let wrong = if ascending {
        Ordering::Greater
    } else {
        Ordering::Less
    };
    let values: Vec<&Value> = values.into_iter().collect();
    values
        .windows(2)
        .all(|pair| sort_cmp(pair[0], pair[1]) != wrong)
}

/// String keys of a collection, in order.
pub fn key_strings(collection: &Collection) -> Vec<String> {
    collection.iter().map(|(key, _)| key.to_string()).collect()
}

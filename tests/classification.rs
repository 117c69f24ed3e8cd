use fluent_assert::{inspect_error, inspect_struct, Assert, Inspect, Nil, Recorder};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::io;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Default, PartialEq)]
struct Account {
    id: u64,
    owner: String,
}

inspect_struct!(Account);

#[derive(Debug, thiserror::Error)]
#[error("account {0} not found")]
struct NotFound(u64);

inspect_error!(NotFound);

// Runs `pass` and its negation through one context and checks they disagree.
fn paired<T: Inspect>(
    value: &T,
    expected: bool,
    pass: fn(&Assert, &T) -> bool,
    fail: fn(&Assert, &T) -> bool,
) {
    let rec = Recorder::new();
    let a = Assert::new(&rec);
    let got = pass(&a, value);
    assert_eq!(got, expected, "{value:?}");
    assert_ne!(fail(&a, value), got, "{value:?}");
}

fn nil_case<T: Inspect>(value: T, expected: bool) {
    paired(&value, expected, |a, v| a.nil(v), |a, v| a.not_nil(v));
}

fn zero_case<T: Inspect>(value: T, expected: bool) {
    paired(&value, expected, |a, v| a.zero(v), |a, v| a.not_zero(v));
}

#[test]
fn nil() {
    nil_case(Nil, true);
    nil_case(None::<Account>, true);
    nil_case(None::<Vec<String>>, true);
    nil_case(json!(null), true);

    nil_case(0, false);
    nil_case("", false);
    nil_case(Vec::<String>::new(), false);
    nil_case(Some(Account::default()), false);
}

#[test]
fn zero() {
    zero_case(Nil, true);
    zero_case(0, true);
    zero_case("", true);
    zero_case(Vec::<String>::new(), true);
    zero_case(None::<Vec<String>>, true);
    zero_case(Some(Vec::<String>::new()), true);
    zero_case(crossbeam_channel::unbounded::<i32>().1, true);
    zero_case(None::<Account>, true);
    zero_case(UNIX_EPOCH, true);
    zero_case(Account::default(), true);

    zero_case(1, false);
    zero_case("x", false);
    zero_case(vec!["s"], false);
    zero_case(Account { id: 7, owner: String::new() }, false);
}

#[test]
fn len() {
    let (tx, rx) = crossbeam_channel::bounded(2);
    tx.send(1).unwrap();
    tx.send(2).unwrap();

    let rec = Recorder::new();
    let a = Assert::new(&rec);

    assert!(a.len(&"go", 2));
    assert!(a.len(&Vec::<i32>::new(), 0));
    assert!(a.len(&HashMap::from([("x", "y")]), 1));
    assert!(a.len(&Some([String::new()]), 1));
    assert!(a.len(&crossbeam_channel::unbounded::<i32>().1, 0));
    assert!(a.len(&rx, 2));
    assert!(a.len(&None::<Vec<String>>, 0));
    assert!(a.len(&None::<HashMap<String, u8>>, 0));
    assert!(a.len(&Some(vec!["a", "b"]), 2));
    assert!(rec.is_clean());

    assert!(!a.len(&5, 0));
    assert!(!a.len(&Nil, 0));
    assert!(!a.len(&vec!["single"], 2));
    assert_eq!(rec.reports().len(), 3);
}

#[test]
fn nil_containers_are_empty() {
    let rec = Recorder::new();
    let a = Assert::new(&rec);
    let users: Option<Vec<String>> = None;

    assert!(a.nil(&users));
    assert!(a.zero(&users));
    assert!(a.len(&users, 0));
    assert!(!a.len(&users, 1));
    assert_eq!(rec.last_message().unwrap(), "want length = 1, got 0");
}

#[test]
fn errors() {
    nil_case(None::<Box<dyn Error>>, true);
    nil_case(None::<Box<dyn Error + Send + Sync>>, true);
    nil_case(None::<io::Error>, true);
    nil_case(None::<NotFound>, true);

    nil_case(Some(Box::<dyn Error>::from("boom")), false);
    nil_case(Some(io::Error::new(io::ErrorKind::Other, "disk")), false);
    nil_case(Some(NotFound(7)), false);
    nil_case(Box::<dyn Error + Send + Sync>::from("bare"), false);
}

#[test]
fn failure_messages() {
    let rec = Recorder::new();
    let a = Assert::new(&rec);

    a.nil(&Vec::<String>::new());
    a.with_field("users").not_nil(&None::<Vec<String>>);
    a.with_field("timeout").not_zero(&Duration::ZERO);
    a.zero(&UNIX_EPOCH.checked_add(Duration::from_secs(1)).unwrap_or(SystemTime::now()));
    a.len(&"hello world", 5);
    a.len(&2, 1);

    let messages = rec.messages();
    assert_eq!(messages[0], "want <nil>, got []");
    assert_eq!(messages[1], "users: want <non-nil>, got <nil>");
    assert_eq!(messages[2], "timeout: want non-zero value, got 0ns");
    assert!(messages[3].starts_with("want zero value, got SystemTime"), "{}", messages[3]);
    assert_eq!(messages[4], "want length = 5, got 11");
    assert_eq!(messages[5], "could not apply length to number `i32`");
}

use super::*;

#[test]
fn test_bind_and_get() {
    let mut env = Bindings::new();
    assert!(env.is_empty());

    assert_eq!(env.bind("x", Value::int(42)), None);
    assert_eq!(env.get("x"), Some(&Value::int(42)));
    assert_eq!(env.int("x"), Some(42));
    assert!(env.contains("x"));
    assert!(!env.contains("y"));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_last_write_wins() {
    let mut env = Bindings::new();
    env.bind("x", Value::int(1));
    let previous = env.bind("x", Value::int(2));

    assert_eq!(previous, Some(Value::int(1)));
    assert_eq!(env.int("x"), Some(2));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_unbound_value_is_nil() {
    let env = Bindings::new();
    assert_eq!(env.value("missing"), Value::Nil);
    assert_eq!(env.get("missing"), None);
}

#[test]
fn test_get_mut_and_take() {
    let mut env = Bindings::new();
    env.bind("total", Value::int(1));
    if let Some(slot) = env.get_mut("total") {
        *slot = Value::int(10);
    }
    assert_eq!(env.int("total"), Some(10));
    assert_eq!(env.take("total"), Some(Value::int(10)));
    assert!(env.is_empty());
}

#[test]
fn test_typed_getters() {
    let mut env = Bindings::new();
    env.bind("s", Value::string("abc"));
    env.bind("n", Value::int(3));
    assert_eq!(env.str("s"), Some("abc"));
    assert_eq!(env.str("n"), None);
    assert_eq!(env.int("s"), None);
}

#[test]
fn test_match_data() {
    let mut env = Bindings::new();
    assert_eq!(env.match_data(), None);
    env.bind(MATCH_DATA, Value::list(vec![Value::string("ab"), Value::Nil]));
    assert_eq!(
        env.match_data(),
        Some(&[Value::string("ab"), Value::Nil][..])
    );
}

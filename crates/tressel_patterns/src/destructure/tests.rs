use super::*;
use crate::types::UserType;
use pretty_assertions::assert_eq;

fn ints(ns: &[i64]) -> Vec<Value> {
    ns.iter().copied().map(Value::int).collect()
}

#[test]
fn list_head_and_tail() {
    let list = Value::list(ints(&[1, 2, 3, 4]));
    assert_eq!(
        list.decompose(2),
        Some(vec![Value::int(1), Value::list(ints(&[2, 3, 4]))])
    );
}

#[test]
fn singleton_list_has_empty_tail() {
    let list = Value::list(ints(&[42]));
    assert_eq!(list.decompose(2), Some(vec![Value::int(42), Value::list(vec![])]));
}

#[test]
fn three_parts_keep_remainder_together() {
    let list = Value::list(ints(&[1, 2, 3, 4]));
    assert_eq!(
        list.decompose(3),
        Some(vec![Value::int(1), Value::int(2), Value::list(ints(&[3, 4]))])
    );
}

#[test]
fn arity_one_wraps_whole_sequence() {
    let list = Value::list(ints(&[1, 2]));
    assert_eq!(list.decompose(1), Some(vec![list.clone()]));
}

#[test]
fn too_short_for_heads() {
    let list = Value::list(ints(&[42]));
    assert_eq!(list.decompose(3), None);
}

#[test]
fn zero_arity_only_for_empty() {
    assert_eq!(Value::list(vec![]).decompose(0), Some(vec![]));
    assert_eq!(Value::list(ints(&[1])).decompose(0), None);
}

#[test]
fn tuple_remainder_is_a_tuple() {
    let tuple = Value::tuple(ints(&[1, 2, 3]));
    assert_eq!(
        tuple.decompose(2),
        Some(vec![Value::int(1), Value::tuple(ints(&[2, 3]))])
    );
}

#[test]
fn scalars_decompose_to_themselves() {
    assert_eq!(Value::int(7).decompose(1), Some(vec![Value::int(7)]));
    assert_eq!(Value::int(7).decompose(3), Some(vec![Value::int(7)]));
    assert_eq!(
        Value::string("s").decompose(1),
        Some(vec![Value::string("s")])
    );
    assert_eq!(Value::Nil.decompose(1), None);
}

#[test]
fn objects_use_their_type() {
    let bar = UserType::builder("Bar").build();
    let value = bar.instance(ints(&[1, 2]));
    assert_eq!(value.decompose(2), Some(ints(&[1, 2])));

    let opaque = UserType::builder("Sealed").opaque().build();
    assert_eq!(opaque.instance(ints(&[1])).decompose(1), None);
}

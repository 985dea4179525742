//! Behavioral properties of the engine and dispatcher, including
//! property-based checks of first-match selection.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tressel_eval::{
    build_rule_set, init_tracing, match_values, pat, walk, BuiltinType, DispatchPolicy, Dispatcher,
    DispatcherBuilder, MatchError, Order, UserType, Value, Visitor,
};

fn sym(name: &str) -> Value {
    Value::symbol(name)
}

#[test]
fn literal_rules() {
    init_tracing();
    let mut builder = build_rule_set();
    builder.with([1], |_| sym("one")).with([2], |_| sym("two"));
    let rules = builder.finalize().unwrap();
    assert_eq!(rules.evaluate(&[Value::int(1)]), Ok(sym("one")));
    assert!(matches!(
        rules.evaluate(&[Value::int(3)]),
        Err(MatchError::NoMatchFound { arity: 1, .. })
    ));
}

#[test]
fn guarded_rules() {
    let classify = |n: i64| {
        match_values(&[Value::int(n)], |m| {
            m.with_guard([pat::bind("n")], |c| c.int("n").is_some_and(|n| n > 0), |_| sym("POS"))
                .with([0], |_| sym("ZERO"))
                .with_guard([pat::bind("n")], |c| c.int("n").is_some_and(|n| n < 0), |_| sym("NEG"));
        })
    };
    assert_eq!(classify(5), Ok(sym("POS")));
    assert_eq!(classify(0), Ok(sym("ZERO")));
    assert_eq!(classify(-3), Ok(sym("NEG")));
}

#[test]
fn sequence_head_and_tail() {
    let subject = Value::list((1..=4).map(Value::int).collect());
    let result = match_values(&[subject], |m| {
        m.with(
            [pat::destructure(BuiltinType::Sequence, [pat::bind("head"), pat::bind("tail")])],
            |m| Value::list(vec![m.value("head"), m.value("tail")]),
        );
    });
    assert_eq!(
        result,
        Ok(Value::list(vec![
            Value::int(1),
            Value::list((2..=4).map(Value::int).collect()),
        ]))
    );
}

#[test]
fn tree_orders() {
    let node = UserType::builder("Node").children_with(|fields| fields[1..].to_vec()).build();
    let make = |name: &str, children: Vec<Value>| {
        let mut fields = vec![sym(name)];
        fields.extend(children);
        node.instance(fields)
    };
    let tree = make(
        "F",
        vec![
            make("B", vec![make("A", vec![]), make("D", vec![])]),
            make("G", vec![]),
        ],
    );
    let label = |v: &Value| v.as_object().and_then(|o| o.field(0)).cloned();

    let pre: Vec<_> = walk(&tree, Order::Preorder).iter().filter_map(label).collect();
    assert_eq!(pre[..4], [sym("F"), sym("B"), sym("A"), sym("D")]);

    let post: Vec<_> = walk(&tree, Order::Postorder).iter().filter_map(label).collect();
    assert_eq!(post.last(), Some(&sym("F")));
    let b = post.iter().position(|v| *v == sym("B")).unwrap();
    assert!(post[..b].contains(&sym("A")) && post[..b].contains(&sym("D")));
}

#[test]
fn subtype_rule_beats_inherited_rule() {
    let positive = UserType::builder("PositiveInteger")
        .parent(BuiltinType::Int)
        .build();
    let integers = DispatcherBuilder::<(), &str>::new()
        .on([pat::instance(BuiltinType::Int)], |_| "int")
        .build()
        .unwrap();
    let positives = DispatcherBuilder::inherit_from(&integers)
        .on([pat::instance(&positive)], |_| "pos")
        .build()
        .unwrap();

    let five = positive.instance(vec![Value::int(5)]);
    assert_eq!(positives.dispatch(&mut (), &[five.clone()]), Ok(Some("pos")));
    assert_eq!(positives.dispatch(&mut (), &[Value::int(5)]), Ok(Some("int")));
    assert_eq!(integers.dispatch(&mut (), &[five]), Ok(Some("int")));
}

#[test]
fn lenient_versus_strict() {
    init_tracing();
    let build = |policy: DispatchPolicy| {
        DispatcherBuilder::<(), &str>::new()
            .policy(policy)
            .on([pat::instance(BuiltinType::Str)], |_| "text")
            .build()
            .unwrap()
    };
    let subject = [Value::int(1)];
    assert_eq!(build(DispatchPolicy::Lenient).dispatch(&mut (), &subject), Ok(None));
    assert!(build(DispatchPolicy::Strict)
        .dispatch(&mut (), &subject)
        .is_err_and(|e| e.is_no_match()));
}

#[test]
fn strict_policy_is_inherited() {
    let parent = DispatcherBuilder::<(), ()>::new().strict().build().unwrap();
    let child = Dispatcher::inherit_from(&parent);
    assert_eq!(child.policy(), DispatchPolicy::Strict);
    let lenient = DispatcherBuilder::inherit_from(&parent)
        .policy(DispatchPolicy::Lenient)
        .build()
        .unwrap();
    assert_eq!(lenient.dispatch(&mut (), &[Value::Nil]), Ok(None));
}

#[test]
fn rules_installed_after_build() {
    let mut dispatcher = DispatcherBuilder::<(), &str>::new()
        .on([pat::wildcard()], |_| "fallback")
        .build()
        .unwrap();
    let mut extra = DispatcherBuilder::<(), &str>::new()
        .on([pat::lit(7)], |_| "seven")
        .build()
        .unwrap()
        .rules()
        .cloned()
        .collect::<Vec<_>>();
    dispatcher.install_rule(extra.remove(0));

    let visitor_rules = Rc::new(dispatcher);
    let mut visitor = Visitor::new(Rc::clone(&visitor_rules), ());
    assert_eq!(visitor.visit(&[Value::int(7)]), Ok(Some("seven")));
    assert_eq!(visitor.visit(&[Value::int(8)]), Ok(Some("fallback")));
}

fn small_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-3i64..3).prop_map(Value::int),
        prop::sample::select(vec!["a", "b"]).prop_map(Value::symbol),
        Just(Value::Nil),
    ]
}

proptest! {
    #[test]
    fn first_matching_rule_fires(subject in small_value(), literals in prop::collection::vec(small_value(), 0..6)) {
        let mut builder = build_rule_set();
        for (index, literal) in literals.iter().enumerate() {
            builder.with([literal.clone()], move |_| index);
        }
        let rules = builder.finalize().unwrap();
        let expected = literals.iter().position(|literal| *literal == subject);
        let actual = rules.evaluate(std::slice::from_ref(&subject));
        match expected {
            Some(index) => prop_assert_eq!(actual, Ok(index)),
            None => prop_assert!(actual.is_err()),
        }
    }

    #[test]
    fn inherited_dispatcher_agrees_with_parent(subject in small_value()) {
        let parent = DispatcherBuilder::<(), &str>::new()
            .on([pat::instance(BuiltinType::Int)], |_| "int")
            .on([pat::lit(Value::Nil)], |_| "nil")
            .build()
            .unwrap();
        let child = DispatcherBuilder::inherit_from(&parent).build().unwrap();
        let subjects = [subject];
        prop_assert_eq!(
            child.dispatch(&mut (), &subjects),
            parent.dispatch(&mut (), &subjects)
        );
    }

    #[test]
    fn wildcard_rule_accepts_any_arity(subjects in prop::collection::vec(small_value(), 0..5)) {
        let result = match_values(&subjects, |m| {
            m.with([pat::wildcard()], |m| m.subjects().len());
        });
        prop_assert_eq!(result, Ok(subjects.len()));
    }
}

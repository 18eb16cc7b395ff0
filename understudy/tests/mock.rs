// vim: tw=80
//! Resolution and verification rules of the mock engine, driven directly
//! without an adapter.
#![deny(warnings)]

use understudy::*;

#[derive(Clone, Debug, PartialEq)]
struct Position {
    x: f64,
    y: f64,
    z: f64
}

fn velocity(v: i32) -> MethodMatcher {
    MethodMatcher::new("increase_velocity", matchers![v])
}

fn returning(matcher: MethodMatcher, value: &'static str) -> Expectation {
    Expectation::new(matcher, Action::Returns(Returns::new().value(value)))
}

fn returned(e: Option<std::sync::Arc<Expectation>>) -> Option<&'static str> {
    match e?.action() {
        Action::Returns(r) => r.get::<&'static str>(0),
        a => panic!("unexpected action {:?}", a)
    }
}

#[test]
fn records_every_call() {
    let mock = Mock::new();
    let here = Position{x: 1.0, y: 2.0, z: 3.0};
    let there = Position{x: 3.0, y: 2.0, z: 1.0};

    mock.call("launch", args![]);
    mock.call("increase_velocity", args![20]);
    mock.call("set_target", args![here]);
    mock.call("set_waypoints", args![here, there]);

    let calls = mock.calls();
    assert_eq!(4, calls.len());
    assert_eq!("launch", calls[0].method());
    assert!(calls[0].args().is_empty());
    assert_eq!(Some(&20), calls[1].arg::<i32>(0));
    assert_eq!(Some(&here), calls[2].arg::<Position>(0));
    assert_eq!(Some(&there), calls[3].arg::<Position>(1));
    assert_eq!("set_waypoints(Position { x: 1.0, y: 2.0, z: 3.0 }, \
               Position { x: 3.0, y: 2.0, z: 1.0 })",
               format!("{:?}", calls[3]));
}

#[test]
fn unmatched_calls_are_recorded_too() {
    let mock = Mock::new();
    mock.setup(returning(velocity(1), "one"));
    for v in 0..5 {
        mock.call("increase_velocity", args![v]);
    }
    mock.call("launch", args![]);
    assert_eq!(6, mock.call_count());
}

#[test]
fn returns_matching_expectation() {
    let mock = Mock::new();
    mock.setup(returning(velocity(-20), "nope"));
    assert_eq!(Some("nope"),
               returned(mock.call("increase_velocity", args![-20])));
}

#[test]
fn no_match() {
    let mock = Mock::new();
    mock.setup(returning(velocity(-20), "nope"));
    assert!(mock.call("increase_velocity", args![20]).is_none());
    assert!(mock.call("reduce_velocity", args![-20]).is_none());
}

#[test]
fn most_recent_setup_wins() {
    let mock = Mock::new();
    mock.setup(returning(velocity(20), "first"));
    mock.setup(Expectation::new(velocity(20),
        Action::Returns(Returns::new().zero())));

    let e = mock.call("increase_velocity", args![20]).unwrap();
    match e.action() {
        Action::Returns(r) => {
            assert_eq!(1, r.len());
            assert_eq!(None, r.get::<&'static str>(0));
        },
        a => panic!("unexpected action {:?}", a)
    }
}

#[test]
fn first_match_in_setup_order() {
    let mock = Mock::new();
    mock.setup(returning(velocity(-20), "a"));
    mock.setup(returning(velocity(12345), "b"));
    mock.setup(returning(
        MethodMatcher::new("reduce_velocity", matchers![12345]), "c"));
    mock.setup(returning(velocity(-40), "d"));
    assert_eq!(Some("b"),
               returned(mock.call("increase_velocity", args![12345])));
}

#[test]
#[should_panic(expected =
    "argument count mismatch in call to `increase_velocity`: expected 2, \
    actual 1")]
fn call_arity_mismatch() {
    let mock = Mock::new();
    mock.setup(returning(
        MethodMatcher::new("increase_velocity", matchers![123, 321]), "nope"));
    mock.call("increase_velocity", args![12345]);
}

#[test]
#[should_panic(expected =
    "argument count mismatch in call to `increase_velocity`: expected 2, \
    actual 1")]
fn called_arity_mismatch() {
    let mock = Mock::new();
    mock.call("increase_velocity", args![12345]);
    mock.called(MethodMatcher::new("increase_velocity", matchers![123, 321]));
}

/// The arity check only applies to calls of the same method
#[test]
fn other_methods_may_have_other_arities() {
    let mock = Mock::new();
    mock.setup(returning(MethodMatcher::new("launch", vec![]), "go"));
    assert!(mock.call("increase_velocity", args![1, 2, 3]).is_none());
    assert_eq!(Some("go"), returned(mock.call("launch", args![])));
}

#[test]
fn unbounded_by_default() {
    let mock = Mock::new();
    mock.setup(returning(velocity(1), "ok"));
    for _ in 0..100 {
        assert_eq!(Some("ok"),
                   returned(mock.call("increase_velocity", args![1])));
    }
}

#[test]
fn times_is_an_upper_bound() {
    let mock = Mock::new();
    mock.setup(returning(velocity(1).times(2), "ok"));
    assert!(mock.call("increase_velocity", args![1]).is_some());
    assert!(mock.call("increase_velocity", args![1]).is_some());
    assert!(mock.call("increase_velocity", args![1]).is_none());
}

/// Calls that don't fit the pattern don't use up a bounded expectation
#[test]
fn times_counts_only_matching_calls() {
    let mock = Mock::new();
    mock.setup(returning(velocity(1).once(), "ok"));
    assert!(mock.call("increase_velocity", args![2]).is_none());
    assert!(mock.call("increase_velocity", args![3]).is_none());
    assert!(mock.call("increase_velocity", args![1]).is_some());
    assert!(mock.call("increase_velocity", args![1]).is_none());
}

/// A bounded expectation never governs a call that doesn't fit its pattern,
/// even while it has calls to spare.
#[test]
fn times_requires_the_current_call_to_match() {
    let mock = Mock::new();
    mock.setup(returning(velocity(1).times(5), "one"));
    assert!(mock.call("increase_velocity", args![2]).is_none());
}

#[test]
fn never_fires() {
    let mock = Mock::new();
    mock.setup(returning(velocity(1), "fallback"));
    mock.setup(returning(velocity(1).never(), "never"));
    assert_eq!(Some("fallback"),
               returned(mock.call("increase_velocity", args![1])));
}

#[test]
fn once_is_times_one() {
    let once = Mock::new();
    let times = Mock::new();
    once.setup(returning(velocity(1).once(), "ok"));
    times.setup(returning(velocity(1).times(1), "ok"));
    for _ in 0..3 {
        assert_eq!(returned(times.call("increase_velocity", args![1])),
                   returned(once.call("increase_velocity", args![1])));
    }
}

#[test]
fn called() {
    let mock = Mock::new();
    mock.call("increase_velocity", args![1]);
    mock.call("increase_velocity", args![1]);
    mock.call("increase_velocity", args![2]);

    assert!(mock.called(velocity(1)));
    assert!(mock.called(velocity(1).times(2)));
    assert!(!mock.called(velocity(1).times(1)));
    assert!(!mock.called(velocity(1).times(3)));
    assert!(mock.called(velocity(2).once()));
    assert!(mock.called(velocity(3).never()));
    assert!(!mock.called(velocity(3)));
}

#[test]
fn called_with_expectation() {
    let mock = Mock::new();
    let e = returning(velocity(1), "ok");
    assert!(!mock.called(&e));
    mock.setup(e);
    mock.call("increase_velocity", args![1]);
    assert!(mock.called(velocity(1)));
}

#[test]
fn reset() {
    let mock = Mock::new();
    mock.setup(returning(velocity(1), "ok"));
    mock.call("increase_velocity", args![1]);
    mock.reset();

    assert!(!mock.called(velocity(1)));
    assert_eq!(0, mock.call_count());
    assert!(mock.call("increase_velocity", args![1]).is_none());
}

#[test]
fn reusable_after_reset() {
    let mock = Mock::new();
    mock.setup(returning(velocity(1).once(), "ok"));
    mock.call("increase_velocity", args![1]);
    mock.reset();
    mock.setup(returning(velocity(1).once(), "again"));
    assert_eq!(Some("again"),
               returned(mock.call("increase_velocity", args![1])));
}

#[test]
fn assert_called_passes() {
    let mock = Mock::new();
    mock.call("increase_velocity", args![1]);
    mock.assert_called(velocity(1));
    mock.assert_called(velocity(1).once());
}

#[test]
#[should_panic(expected = "`increase_velocity(var == 1)` was called 1 time(s), \
                          expected 2")]
fn assert_called_wrong_count() {
    let mock = Mock::new();
    mock.call("increase_velocity", args![1]);
    mock.assert_called(velocity(1).times(2));
}

#[test]
fn assert_called_lists_calls() {
    let mock = Mock::new();
    mock.call("increase_velocity", args![5]);
    mock.call("launch", args![]);
    let msg = std::panic::catch_unwind(|| mock.assert_called(velocity(1)))
        .unwrap_err()
        .downcast::<String>()
        .unwrap();
    let head = "No matching call for `increase_velocity(var == 1)`";
    assert!(msg.starts_with(head), "{}", msg);
    assert!(msg.contains("increase_velocity(5)"), "{}", msg);
    assert!(!msg.contains("launch"), "{}", msg);
}

fn fact<N: IntoMatcher<u64>>(n: N) -> MethodSetup<(u64,), u64> {
    MethodSetup::new("fact", matchers![n])
}

/// A callback may call its own method again, as long as the nested call lands
/// on another expectation.
#[test]
fn recursive_callback() {
    let mock = std::sync::Arc::new(Mock::new());
    let inner = mock.clone();
    mock.setup(fact(matching(|n: &u64| *n > 1)).when(move |(n,)| {
        n * inner.invoke::<_, u64>("fact", args![n - 1], (n - 1,))
    }));
    mock.setup(fact(1).returns(1));
    assert_eq!(6, mock.invoke::<_, u64>("fact", args![3u64], (3u64,)));
    assert!(mock.called(fact(any()).times(3)));
}

#[test]
#[should_panic(expected = "`fact` called again from inside its own callback")]
fn callback_reenters_its_own_expectation() {
    let mock = std::sync::Arc::new(Mock::new());
    let inner = mock.clone();
    mock.setup(fact(any()).when(move |(n,)| {
        if n <= 1 {
            1
        } else {
            n * inner.invoke::<_, u64>("fact", args![n - 1], (n - 1,))
        }
    }));
    mock.invoke::<_, u64>("fact", args![3u64], (3u64,));
}

//! End-to-end checks of the truth capability and the tail iterator.

use std::cell::Cell;
use std::thread;

use ifless::{Error, IterationState, Number, Step, TailIterator, Truth, run};

/// Small enough that a loop recursing once per iteration would overflow it
/// long before the larger runs below finish.
const SMALL_STACK: usize = 64 * 1024;

fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    thread::Builder::new()
        .stack_size(SMALL_STACK)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn test_adapter_branches_match_native_truth() {
    for v in [true, false] {
        let picked = Truth::from_native(v).branch(|| "T", || "F");
        assert_eq!(picked == "T", v);
    }
}

#[test]
fn test_unselected_continuation_is_never_forced() {
    let forced = Cell::new(false);

    let value = Truth::from_native(1 < 2).branch(
        || "taken",
        || {
            forced.set(true);
            "skipped"
        },
    );

    assert_eq!(value, "taken");
    assert!(!forced.get());
}

#[test]
fn test_sum_values() {
    assert_eq!(run(0, 0, 0).unwrap(), Number::Int(0));
    assert_eq!(run(0, 0, 1).unwrap(), Number::Int(0));
    assert_eq!(run(0, 0, 5).unwrap(), Number::Int(10));
    assert_eq!(run(0, 0, 10_000).unwrap(), Number::Int(49_995_000));
}

#[test]
fn test_sum_matches_closed_form() {
    for n in [2i64, 3, 17, 256, 1_000] {
        assert_eq!(run(0, 0, n).unwrap(), Number::Int(n * (n - 1) / 2));
    }
}

#[test]
fn test_ten_thousand_on_small_stack() {
    let sum = on_small_stack(|| run(0, 0, 10_000));
    assert_eq!(sum, Ok(Number::Int(49_995_000)));
}

#[test]
fn test_million_steps_on_small_stack() {
    let outcome = on_small_stack(|| {
        TailIterator::new(1_000_000)
            .and_then(|iterator| iterator.drive(IterationState::new(0, 0)))
    })
    .unwrap();

    assert_eq!(outcome.value, Number::Int(499_999_500_000));
    assert_eq!(outcome.steps, 1_000_000);
}

#[test]
fn test_start_at_limit_is_identity() {
    for s in [0i64, 1, -12, 1 << 40] {
        assert_eq!(run(25, s, 25).unwrap(), Number::Int(s));
    }
    assert_eq!(run(25, 2.25, 25).unwrap(), Number::Float(2.25));
}

#[test]
fn test_state_machine_stops_once() {
    let iterator = TailIterator::new(3).unwrap();
    let mut state = IterationState::new(0, 0);
    let mut transitions = Vec::new();

    let value = loop {
        match iterator.step(state).unwrap() {
            Step::Continue(next) => {
                transitions.push(next.index);
                state = next;
            }
            Step::Done(value) => break value,
        }
    };

    assert_eq!(transitions, vec![1, 2, 3]);
    assert_eq!(value, Number::Int(3));
}

#[test]
fn test_invalid_limit_surfaces_at_boundary() {
    assert!(matches!(run(0, 0, -5), Err(Error::ValueError(_))));
    assert!(TailIterator::new(-1).is_err());
}

#[test]
fn test_loop_via_truth_in_user_code() {
    // The same shape as `run`, written by a caller against the public API.
    let outcome = ifless::step::trampoline((1u64, 1u64), |(n, acc)| {
        Truth::from_native(n <= 20).branch(
            || Ok::<_, Error>(Step::Continue((n + 1, acc * n))),
            || Ok(Step::Done(acc)),
        )
    })
    .unwrap();

    assert_eq!(outcome.value, 2_432_902_008_176_640_000);
    assert_eq!(outcome.steps, 20);
}

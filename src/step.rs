//! Bounce-or-land stepping for self-referential computations.
//!
//! A step function never calls itself. It returns `Step::Continue` with the
//! state of its next invocation and [`trampoline`] performs that invocation
//! from inside a single loop, so stack depth stays constant no matter how
//! many steps run.

use tracing::{debug, trace};

/// Result of executing a single trampoline step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<S, T> {
    /// Re-enter the step function with this state.
    Continue(S),
    /// Computation finished with this value.
    Done(T),
}

/// Final value of a driven computation and how many times it bounced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub steps: u64,
}

/// Drives `step` from `state` until it lands.
///
/// An `Err` from the step function stops the loop and is returned as is.
pub fn trampoline<S, T, E>(
    state: S,
    mut step: impl FnMut(S) -> Result<Step<S, T>, E>,
) -> Result<Outcome<T>, E> {
    let mut current = state;
    let mut steps: u64 = 0;

    loop {
        match step(current)? {
            Step::Continue(next) => {
                steps += 1;
                trace!(steps, "bounce");
                current = next;
            }
            Step::Done(value) => {
                debug!(steps, "landed");
                return Ok(Outcome { value, steps });
            }
        }
    }
}

//! Summation loop written as tail self-invocation.
//!
//! Each step asks a [`Truth`] built from `index < limit` to branch. The
//! continue branch produces the state of the next step, the stop branch
//! yields the accumulator. The next step is run by [`trampoline`], not by a
//! nested call, so a run of any length uses one stack frame.

use tracing::warn;

use crate::error::{Error, Result};
use crate::step::{Outcome, Step, trampoline};
use crate::truth::Truth;
use crate::value::Number;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationState {
    pub index: i64,
    pub accumulator: Number,
}

impl IterationState {
    pub fn new(index: i64, accumulator: impl Into<Number>) -> Self {
        Self { index, accumulator: accumulator.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailIterator {
    limit: i64,
}

impl TailIterator {
    pub fn new(limit: i64) -> Result<Self> {
        if limit < 0 {
            warn!(limit, "rejected negative limit");
            return Err(Error::ValueError(format!(
                "limit must be non-negative, got {}",
                limit
            )));
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// One transition of the loop.
    pub fn step(&self, state: IterationState) -> Result<Step<IterationState, Number>> {
        let IterationState { index, accumulator } = state;

        Truth::from_native(index < self.limit).branch(
            || -> Result<Step<IterationState, Number>> {
                // index < limit <= i64::MAX, so index + 1 cannot overflow
                let accumulator = accumulator.add(Number::Int(index))?;
                Ok(Step::Continue(IterationState { index: index + 1, accumulator }))
            },
            || Ok(Step::Done(accumulator)),
        )
    }

    /// Runs the loop to completion and reports how many steps it took.
    pub fn drive(&self, state: IterationState) -> Result<Outcome<Number>> {
        if !state.accumulator.is_finite() {
            warn!(accumulator = %state.accumulator, "rejected non-finite accumulator");
            return Err(Error::ValueError(format!(
                "accumulator must be finite, got {}",
                state.accumulator
            )));
        }

        trampoline(state, |state| self.step(state))
    }

    /// Number of steps a run starting at `index` takes.
    pub fn remaining(&self, index: i64) -> u64 {
        // i128 keeps `limit - index` exact for any pair of i64 values
        (self.limit as i128 - index as i128).max(0) as u64
    }
}

/// Sums `index, index + 1, ..., limit - 1` onto `accumulator`.
///
/// Returns `accumulator` untouched when `index >= limit`.
pub fn run(index: i64, accumulator: impl Into<Number>, limit: i64) -> Result<Number> {
    let iterator = TailIterator::new(limit)?;
    let outcome = iterator.drive(IterationState::new(index, accumulator))?;
    Ok(outcome.value)
}

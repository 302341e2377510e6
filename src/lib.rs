//! Conditionals and iteration as ordinary values.
//!
//! [`Truth`] is a two-variant value that picks one of two deferred
//! continuations by itself. [`tail::run`] expresses a loop as repeated tail
//! self-invocation, driven by the [`step::trampoline`] so it runs in constant
//! stack space.

pub mod error;
pub mod reader;
pub mod repl;
pub mod step;
pub mod tail;
pub mod truth;
pub mod value;

pub use error::{Error, Result};
pub use step::{Outcome, Step};
pub use tail::{IterationState, TailIterator, run};
pub use truth::Truth;
pub use value::{Number, Value};

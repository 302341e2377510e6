//! Truth values that choose their own branch.
//!
//! A `Truth` is asked to pick between two deferred computations instead of
//! being inspected by the caller. Only the selected continuation ever runs.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truth {
    True,
    False,
}

impl Truth {
    /// Adapts a native boolean into the matching variant.
    pub fn from_native(value: bool) -> Self {
        match value {
            true => Truth::True,
            false => Truth::False,
        }
    }

    /// Runs `on_true` for `True` and `on_false` for `False`.
    ///
    /// The continuation that is not selected is dropped without being
    /// called. Whatever the selected one returns, `Err` values and panics
    /// included, reaches the caller untouched.
    pub fn branch<R>(self, on_true: impl FnOnce() -> R, on_false: impl FnOnce() -> R) -> R {
        match self {
            Truth::True => on_true(),
            Truth::False => on_false(),
        }
    }

    pub fn not(self) -> Self {
        self.branch(|| Truth::False, || Truth::True)
    }

    /// Short-circuit conjunction. `rhs` runs only when `self` is `True`.
    pub fn and(self, rhs: impl FnOnce() -> Truth) -> Self {
        self.branch(rhs, || Truth::False)
    }

    /// Short-circuit disjunction. `rhs` runs only when `self` is `False`.
    pub fn or(self, rhs: impl FnOnce() -> Truth) -> Self {
        self.branch(|| Truth::True, rhs)
    }

    pub fn is_true(self) -> bool {
        self.branch(|| true, || false)
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        Truth::from_native(value)
    }
}

impl From<Truth> for bool {
    fn from(value: Truth) -> Self {
        value.is_true()
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.branch(|| "true", || "false"))
    }
}

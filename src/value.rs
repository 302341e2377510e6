use std::fmt;

use crate::error::{Error, Result};
use crate::truth::Truth;

//===----------------------------------------------------------------------===//
// Number
//===----------------------------------------------------------------------===//

/// Numeric accumulator. Integer addition is checked; any float operand
/// turns the sum into a float.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn add(self, other: Number) -> Result<Number> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.checked_add(b).map(Number::Int).ok_or_else(|| {
                Error::OverflowError(format!("{} + {} does not fit in a 64-bit integer", a, b))
            }),
            (Number::Int(a), Number::Float(b)) => Ok(Number::Float(a as f64 + b)),
            (Number::Float(a), Number::Int(b)) => Ok(Number::Float(a + b as f64)),
            (Number::Float(a), Number::Float(b)) => Ok(Number::Float(a + b)),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(val) => write!(f, "{}", val),
            Number::Float(val) => write!(f, "{}", val),
        }
    }
}

//===----------------------------------------------------------------------===//
// Value
//===----------------------------------------------------------------------===//

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(Number),
    Str(String),
}

impl Value {
    /// `nil` and `false` are falsy, everything else is truthy. Zero and the
    /// empty string count as truthy.
    pub fn truth(&self) -> Truth {
        match self {
            Value::Nil => Truth::False,
            Value::Bool(b) => Truth::from_native(*b),
            Value::Number(_) | Value::Str(_) => Truth::True,
        }
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_addition() {
        assert_eq!(Number::Int(2).add(Number::Int(3)), Ok(Number::Int(5)));
    }

    #[test]
    fn test_int_overflow_is_reported() {
        match Number::Int(i64::MAX).add(Number::Int(1)) {
            Err(Error::OverflowError(msg)) => assert!(msg.contains("64-bit")),
            other => panic!("Expected overflow error, got {:?}", other),
        }
    }

    #[test]
    fn test_float_promotion() {
        assert_eq!(Number::Int(1).add(Number::Float(0.5)), Ok(Number::Float(1.5)));
        assert_eq!(Number::Float(0.5).add(Number::Int(2)), Ok(Number::Float(2.5)));
    }

    #[test]
    fn test_int_and_float_are_distinct() {
        assert_ne!(Number::Int(1), Number::Float(1.0));
    }

    #[test]
    fn test_truthiness() {
        assert_eq!(Value::Nil.truth(), Truth::False);
        assert_eq!(Value::Bool(false).truth(), Truth::False);
        assert_eq!(Value::Bool(true).truth(), Truth::True);
        assert_eq!(Value::Number(Number::Int(0)).truth(), Truth::True);
        assert_eq!(Value::Str(String::new()).truth(), Truth::True);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Number(Number::Float(2.5)).to_string(), "2.5");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "hi");
    }
}

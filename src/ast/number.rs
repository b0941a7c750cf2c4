use crate::ast::Operator;
use crate::error::EvaluationError;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A numeric value: integer literals stay integers until they meet a float.
///
/// Equality is structural, so `Integer(1) != Float(1.0)`. Use
/// [`Number::numeric_eq`] to compare values across kinds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Parses a literal as captured by the lexer. All-digit text becomes an
    /// `Integer`; anything else must be a finite float.
    pub fn from_literal(text: &str) -> Option<Number> {
        if text.bytes().all(|b| b.is_ascii_digit()) {
            return text.parse::<i64>().ok().map(Number::Integer);
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(Number::Float(value)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(value) => *value as f64,
            Number::Float(value) => *value,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Compares by value, ignoring whether either side is a float.
    pub fn numeric_eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }

    fn integer_op(
        operator: Operator,
        left: i64,
        right: i64,
    ) -> Result<Number, EvaluationError> {
        let result = match operator {
            Operator::Add => left.checked_add(right),
            Operator::Subtract => left.checked_sub(right),
            Operator::Multiply => left.checked_mul(right),
            Operator::Divide => {
                if right == 0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                left.checked_div(right)
            }
        };
        result
            .map(Number::Integer)
            .ok_or(EvaluationError::Overflow(operator))
    }

    fn float_op(operator: Operator, left: f64, right: f64) -> Number {
        Number::Float(match operator {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
        })
    }

    /// Applies `operator`, promoting to float when either side is a float.
    pub fn apply(self, operator: Operator, rhs: Number) -> Result<Number, EvaluationError> {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => Self::integer_op(operator, a, b),
            (a, b) => Ok(Self::float_op(operator, a.as_f64(), b.as_f64())),
        }
    }
}

impl Add for Number {
    type Output = Result<Number, EvaluationError>;

    fn add(self, rhs: Self) -> Self::Output {
        self.apply(Operator::Add, rhs)
    }
}

impl Sub for Number {
    type Output = Result<Number, EvaluationError>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.apply(Operator::Subtract, rhs)
    }
}

impl Mul for Number {
    type Output = Result<Number, EvaluationError>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.apply(Operator::Multiply, rhs)
    }
}

impl Div for Number {
    type Output = Result<Number, EvaluationError>;

    fn div(self, rhs: Self) -> Self::Output {
        self.apply(Operator::Divide, rhs)
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        match self {
            // i64::MIN has no positive counterpart
            Number::Integer(value) => value
                .checked_neg()
                .map_or(Number::Float(-(value as f64)), Number::Integer),
            Number::Float(value) => Number::Float(-value),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{value}"),
            Number::Float(value) if value.is_finite() => {
                let text = value.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{text}.0")
                }
            }
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

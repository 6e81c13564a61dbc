//! Textual filter, map and reduce expressions over `f64` sequences.
//!
//! Expressions are written `name` or `name:operand`, e.g. `gt:0`, `even`,
//! `add:1.5`. Terminals prefix a map or reduce expression with its kind:
//! `map:neg`, `reduce:sum`, or the bare `each`.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur while parsing an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("Empty expression")]
    Empty,

    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("Unknown map operation '{0}'")]
    UnknownMap(String),

    #[error("Unknown reduce operation '{0}'")]
    UnknownReduce(String),

    #[error("Unknown terminal '{0}' (expected map:<op>, reduce:<op> or each)")]
    UnknownTerminal(String),

    #[error("'{op}' requires an operand, e.g. {op}:0")]
    MissingOperand { op: String },

    #[error("'{op}' does not take an operand")]
    UnexpectedOperand { op: String },

    #[error("Invalid number '{input}': {source}")]
    InvalidNumber {
        input: String,
        source: ParseFloatError,
    },
}

/// Split `op:operand` into its parts, trimming whitespace.
fn split(input: &str) -> Result<(&str, Option<&str>), ExprError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ExprError::Empty);
    }
    Ok(match input.split_once(':') {
        Some((op, operand)) => (op.trim(), Some(operand.trim())),
        None => (input, None),
    })
}

fn number(op: &str, operand: Option<&str>) -> Result<f64, ExprError> {
    let operand = operand.ok_or_else(|| ExprError::MissingOperand { op: op.to_string() })?;
    operand.parse().map_err(|source| ExprError::InvalidNumber {
        input: operand.to_string(),
        source,
    })
}

fn no_operand(op: &str, operand: Option<&str>) -> Result<(), ExprError> {
    match operand {
        Some(_) => Err(ExprError::UnexpectedOperand { op: op.to_string() }),
        None => Ok(()),
    }
}

/// A numeric filter.
///
/// Comparisons follow IEEE semantics, so `NaN` never passes a comparison
/// filter (`ne` included) and never counts as `finite` or `integer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterExpr {
    Gt(f64),
    Ge(f64),
    Lt(f64),
    Le(f64),
    Eq(f64),
    Ne(f64),
    Even,
    Odd,
    Finite,
    Integer,
}

impl FilterExpr {
    /// Returns `true` if `value` passes this filter.
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Self::Gt(n) => value > n,
            Self::Ge(n) => value >= n,
            Self::Lt(n) => value < n,
            Self::Le(n) => value <= n,
            Self::Eq(n) => value == n,
            Self::Ne(n) => !value.is_nan() && value != n,
            Self::Even => value % 2.0 == 0.0,
            Self::Odd => (value % 2.0).abs() == 1.0,
            Self::Finite => value.is_finite(),
            Self::Integer => value.is_finite() && value.fract() == 0.0,
        }
    }
}

impl FromStr for FilterExpr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, operand) = split(s)?;
        let expr = match op {
            "gt" => Self::Gt(number(op, operand)?),
            "ge" => Self::Ge(number(op, operand)?),
            "lt" => Self::Lt(number(op, operand)?),
            "le" => Self::Le(number(op, operand)?),
            "eq" => Self::Eq(number(op, operand)?),
            "ne" => Self::Ne(number(op, operand)?),
            "even" | "odd" | "finite" | "integer" => {
                no_operand(op, operand)?;
                match op {
                    "even" => Self::Even,
                    "odd" => Self::Odd,
                    "finite" => Self::Finite,
                    _ => Self::Integer,
                }
            }
            other => return Err(ExprError::UnknownFilter(other.to_string())),
        };
        Ok(expr)
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gt(n) => write!(f, "gt:{n}"),
            Self::Ge(n) => write!(f, "ge:{n}"),
            Self::Lt(n) => write!(f, "lt:{n}"),
            Self::Le(n) => write!(f, "le:{n}"),
            Self::Eq(n) => write!(f, "eq:{n}"),
            Self::Ne(n) => write!(f, "ne:{n}"),
            Self::Even => f.write_str("even"),
            Self::Odd => f.write_str("odd"),
            Self::Finite => f.write_str("finite"),
            Self::Integer => f.write_str("integer"),
        }
    }
}

/// A per-element numeric transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapExpr {
    Identity,
    Neg,
    Abs,
    Square,
    Sqrt,
    Add(f64),
    Mul(f64),
}

impl MapExpr {
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Self::Identity => value,
            Self::Neg => -value,
            Self::Abs => value.abs(),
            Self::Square => value * value,
            Self::Sqrt => value.sqrt(),
            Self::Add(n) => value + n,
            Self::Mul(n) => value * n,
        }
    }
}

impl FromStr for MapExpr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, operand) = split(s)?;
        match op {
            "add" => return Ok(Self::Add(number(op, operand)?)),
            "mul" => return Ok(Self::Mul(number(op, operand)?)),
            _ => {}
        }
        let expr = match op {
            "identity" => Self::Identity,
            "neg" => Self::Neg,
            "abs" => Self::Abs,
            "square" => Self::Square,
            "sqrt" => Self::Sqrt,
            other => return Err(ExprError::UnknownMap(other.to_string())),
        };
        no_operand(op, operand)?;
        Ok(expr)
    }
}

impl fmt::Display for MapExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("identity"),
            Self::Neg => f.write_str("neg"),
            Self::Abs => f.write_str("abs"),
            Self::Square => f.write_str("square"),
            Self::Sqrt => f.write_str("sqrt"),
            Self::Add(n) => write!(f, "add:{n}"),
            Self::Mul(n) => write!(f, "mul:{n}"),
        }
    }
}

/// A fold over the accepted elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceExpr {
    /// Sum, starting from `0`.
    Sum,
    /// Product, starting from `1`.
    Product,
    /// Smallest element; nothing for an empty selection.
    Min,
    /// Largest element; nothing for an empty selection.
    Max,
    /// Number of accepted elements.
    Count,
    /// Decimal renderings joined without a separator, starting from `""`.
    Concat,
}

impl FromStr for ReduceExpr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, operand) = split(s)?;
        let expr = match op {
            "sum" => Self::Sum,
            "product" => Self::Product,
            "min" => Self::Min,
            "max" => Self::Max,
            "count" => Self::Count,
            "concat" => Self::Concat,
            other => return Err(ExprError::UnknownReduce(other.to_string())),
        };
        no_operand(op, operand)?;
        Ok(expr)
    }
}

impl fmt::Display for ReduceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Min => "min",
            Self::Max => "max",
            Self::Count => "count",
            Self::Concat => "concat",
        })
    }
}

/// The terminal operation a pipeline ends with.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Terminal {
    Map(MapExpr),
    Reduce(ReduceExpr),
    #[default]
    Each,
}

impl FromStr for Terminal {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = split(s)?;
        match (kind, rest) {
            ("map", Some(rest)) => Ok(Self::Map(rest.parse()?)),
            ("reduce", Some(rest)) => Ok(Self::Reduce(rest.parse()?)),
            ("map" | "reduce", None) => Err(ExprError::MissingOperand {
                op: kind.to_string(),
            }),
            ("each", None) => Ok(Self::Each),
            ("each", Some(_)) => Err(ExprError::UnexpectedOperand {
                op: kind.to_string(),
            }),
            (other, _) => Err(ExprError::UnknownTerminal(other.to_string())),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(expr) => write!(f, "map:{expr}"),
            Self::Reduce(expr) => write!(f, "reduce:{expr}"),
            Self::Each => f.write_str("each"),
        }
    }
}

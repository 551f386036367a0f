//! Flag kinds, default values and string-to-value coercion.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Why a raw value could not be coerced into a flag's type.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("{0}")]
    Int(#[from] ParseIntError),

    #[error("{0}")]
    Float(#[from] ParseFloatError),

    #[error("Bool argument is invalid: {0}")]
    Bool(String),
}

/// The type of a registered flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    String,
    Int,
    Bool,
    Float,
    /// Zero-argument action, invoked when matched.
    Handler,
}

impl FlagKind {
    /// The type tag shown in the flag listing.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKind::String => "string",
            FlagKind::Int => "int",
            FlagKind::Bool => "bool",
            FlagKind::Float => "float",
            FlagKind::Handler => "handler",
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value a destination held when its flag was registered.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    String(String),
    Int(i64),
    Bool(bool),
    Float(f64),
    Handler,
}

impl DefaultValue {
    pub fn kind(&self) -> FlagKind {
        match self {
            DefaultValue::String(_) => FlagKind::String,
            DefaultValue::Int(_) => FlagKind::Int,
            DefaultValue::Bool(_) => FlagKind::Bool,
            DefaultValue::Float(_) => FlagKind::Float,
            DefaultValue::Handler => FlagKind::Handler,
        }
    }
}

/// Formats the default for display: strings and bools verbatim, integers in
/// decimal, floats fixed to two decimal places. Handlers render nothing.
impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::String(s) => f.write_str(s),
            DefaultValue::Int(i) => write!(f, "{}", i),
            DefaultValue::Bool(b) => write!(f, "{}", b),
            DefaultValue::Float(x) => write!(f, "{:.2}", x),
            DefaultValue::Handler => Ok(()),
        }
    }
}

/// Parse a base-10 integer.
pub fn parse_int(value: &str) -> Result<i64, ValueError> {
    Ok(value.parse::<i64>()?)
}

/// Parse a floating-point literal.
pub fn parse_float(value: &str) -> Result<f64, ValueError> {
    Ok(value.parse::<f64>()?)
}

/// Parse a boolean literal. Accepts `true`/`1` and `false`/`0` in any case.
pub fn parse_bool(value: &str) -> Result<bool, ValueError> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ValueError::Bool(value.to_string())),
    }
}

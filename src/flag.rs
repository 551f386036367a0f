//! A single registered flag and the destination it writes into.

use crate::error::FlagError;
use crate::value::{self, DefaultValue, FlagKind};
use std::fmt;

/// What a handler asks the parser to do after it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep scanning the remaining arguments.
    Continue,
    /// Stop scanning; the caller should exit with this status code.
    Exit(i32),
}

/// The action attached to a handler flag.
pub enum Handler<'a> {
    /// A caller-supplied closure. Captured state is the handler's context.
    Custom(Box<dyn FnMut() -> Control + 'a>),
    /// Built-in `--help`: stops the scan with [`crate::ParseOutcome::Help`].
    Help,
    /// Built-in `--version`: stops the scan with [`crate::ParseOutcome::Version`].
    Version,
}

impl fmt::Debug for Handler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Custom(_) => f.write_str("Custom(..)"),
            Handler::Help => f.write_str("Help"),
            Handler::Version => f.write_str("Version"),
        }
    }
}

/// Caller-owned storage a matched flag writes into.
///
/// The registry only borrows the storage; it is released when the owning
/// [`crate::FlagSet`] is dropped.
#[derive(Debug)]
pub enum Binding<'a> {
    String(&'a mut String),
    Int(&'a mut i64),
    Bool(&'a mut bool),
    Float(&'a mut f64),
    Handler(Handler<'a>),
}

impl Binding<'_> {
    pub fn kind(&self) -> FlagKind {
        match self {
            Binding::String(_) => FlagKind::String,
            Binding::Int(_) => FlagKind::Int,
            Binding::Bool(_) => FlagKind::Bool,
            Binding::Float(_) => FlagKind::Float,
            Binding::Handler(_) => FlagKind::Handler,
        }
    }

    /// Snapshot the current contents of the destination.
    pub(crate) fn current(&self) -> DefaultValue {
        match self {
            Binding::String(s) => DefaultValue::String((**s).clone()),
            Binding::Int(i) => DefaultValue::Int(**i),
            Binding::Bool(b) => DefaultValue::Bool(**b),
            Binding::Float(x) => DefaultValue::Float(**x),
            Binding::Handler(_) => DefaultValue::Handler,
        }
    }

    /// Coerce `value` and store it. `token` names the argument in errors.
    ///
    /// Handlers are not value-carrying; storing into one is a no-op.
    pub(crate) fn store(&mut self, token: &str, value: &str) -> Result<(), FlagError> {
        match self {
            Binding::String(s) => {
                **s = value.to_string();
            }
            Binding::Int(i) => {
                **i = value::parse_int(value).map_err(|e| FlagError::invalid_value(token, e))?;
            }
            Binding::Bool(b) => {
                **b = value::parse_bool(value).map_err(|e| FlagError::invalid_value(token, e))?;
            }
            Binding::Float(x) => {
                **x = value::parse_float(value).map_err(|e| FlagError::invalid_value(token, e))?;
            }
            Binding::Handler(_) => {}
        }
        Ok(())
    }
}

/// One registered flag.
#[derive(Debug)]
pub struct FlagDefinition<'a> {
    name: String,
    help: String,
    default: DefaultValue,
    pub(crate) binding: Binding<'a>,
}

impl<'a> FlagDefinition<'a> {
    /// Build a definition, capturing the destination's current value as the
    /// default.
    pub(crate) fn new(name: &str, help: &str, binding: Binding<'a>) -> Result<Self, FlagError> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            default: binding.current(),
            binding,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> FlagKind {
        self.binding.kind()
    }

    pub fn default_value(&self) -> &DefaultValue {
        &self.default
    }
}

/// Check the rules every flag name and alias must satisfy.
pub(crate) fn validate_name(name: &str) -> Result<(), FlagError> {
    if name.is_empty() {
        return Err(FlagError::invalid("for register parameter name empty"));
    }
    if name.contains('=') {
        return Err(FlagError::ContainsEquals(name.to_string()));
    }
    Ok(())
}

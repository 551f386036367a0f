//! The flag registry.

use crate::error::FlagError;
use crate::flag::{validate_name, Binding, Control, FlagDefinition, Handler};
use std::collections::BTreeMap;

/// A set of flags bound to caller-owned variables.
///
/// Flags are registered before parsing and keyed by name; registering a name
/// twice replaces the earlier definition. Iteration follows name order.
#[derive(Debug, Default)]
pub struct FlagSet<'a> {
    pub(crate) flags: BTreeMap<String, FlagDefinition<'a>>,
    pub(crate) aliases: BTreeMap<String, String>,
    pub(crate) args: Vec<String>,
    pub(crate) preserve_case: bool,
    pub(crate) banner: Option<String>,
    pub(crate) version: Option<String>,
}

impl<'a> FlagSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_string(
        &mut self,
        name: &str,
        value: &'a mut String,
        help: &str,
    ) -> Result<&mut Self, FlagError> {
        self.insert(FlagDefinition::new(name, help, Binding::String(value))?)
    }

    pub fn register_int(
        &mut self,
        name: &str,
        value: &'a mut i64,
        help: &str,
    ) -> Result<&mut Self, FlagError> {
        self.insert(FlagDefinition::new(name, help, Binding::Int(value))?)
    }

    pub fn register_bool(
        &mut self,
        name: &str,
        value: &'a mut bool,
        help: &str,
    ) -> Result<&mut Self, FlagError> {
        self.insert(FlagDefinition::new(name, help, Binding::Bool(value))?)
    }

    pub fn register_float(
        &mut self,
        name: &str,
        value: &'a mut f64,
        help: &str,
    ) -> Result<&mut Self, FlagError> {
        self.insert(FlagDefinition::new(name, help, Binding::Float(value))?)
    }

    /// Register a zero-argument action. The closure runs every time the flag
    /// is matched and never consumes a value.
    pub fn register_handler<F>(
        &mut self,
        name: &str,
        help: &str,
        handler: F,
    ) -> Result<&mut Self, FlagError>
    where
        F: FnMut() -> Control + 'a,
    {
        let binding = Binding::Handler(Handler::Custom(Box::new(handler)));
        self.insert(FlagDefinition::new(name, help, binding)?)
    }

    pub(crate) fn register_builtin(
        &mut self,
        name: &str,
        help: &str,
        handler: Handler<'a>,
    ) -> Result<&mut Self, FlagError> {
        self.insert(FlagDefinition::new(name, help, Binding::Handler(handler))?)
    }

    /// Add an alternative spelling for an already registered flag, e.g. a
    /// one-letter short name.
    pub fn alias(&mut self, alias: &str, name: &str) -> Result<&mut Self, FlagError> {
        validate_name(alias)?;
        if !self.flags.contains_key(name) {
            return Err(FlagError::invalid(format!(
                "alias {} refers to unknown flag {}",
                alias, name
            )));
        }
        if self.flags.contains_key(alias) {
            return Err(FlagError::invalid(format!(
                "alias {} shadows a registered flag",
                alias
            )));
        }
        self.aliases.insert(alias.to_string(), name.to_string());
        Ok(self)
    }

    /// Store values exactly as given instead of lowercasing them first.
    pub fn preserve_case(&mut self, preserve: bool) -> &mut Self {
        self.preserve_case = preserve;
        self
    }

    fn insert(&mut self, definition: FlagDefinition<'a>) -> Result<&mut Self, FlagError> {
        // A registered name takes its spelling back from any alias.
        if let Some(target) = self.aliases.remove(definition.name()) {
            tracing::debug!(
                alias = definition.name(),
                flag = %target,
                "alias replaced by registered flag"
            );
        }
        self.flags.insert(definition.name().to_string(), definition);
        Ok(self)
    }

    /// Find the definition registered under `name` or one of its aliases.
    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut FlagDefinition<'a>> {
        let key = if self.flags.contains_key(name) {
            name
        } else {
            self.aliases.get(name)?.as_str()
        };
        self.flags.get_mut(key)
    }

    pub fn get(&self, name: &str) -> Option<&FlagDefinition<'a>> {
        self.flags
            .get(name)
            .or_else(|| self.aliases.get(name).and_then(|n| self.flags.get(n)))
    }

    /// Registered flags in name order.
    pub fn flags(&self) -> impl Iterator<Item = &FlagDefinition<'a>> {
        self.flags.values()
    }

    pub(crate) fn aliases_of<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.aliases
            .iter()
            .filter(move |(_, target)| target.as_str() == name)
            .map(|(alias, _)| alias.as_str())
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Positional arguments collected by the last parse, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The positional argument at `index`.
    pub fn arg(&self, index: usize) -> Result<&str, FlagError> {
        self.args.get(index).map(String::as_str).ok_or_else(|| {
            FlagError::invalid(format!(
                "argument index {} out of range ({} collected)",
                index,
                self.args.len()
            ))
        })
    }
}

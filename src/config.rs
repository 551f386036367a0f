//! JSON flag schema used by the `flagbind` binary.

use crate::error::FlagError;
use crate::flag::validate_name;
use crate::flag_set::FlagSet;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Prefix for exported variables when the config sets none.
pub const DEFAULT_PREFIX: &str = "FLAGBIND_";

/// Errors that can occur during config parsing and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("duplicate flag name: {0}")]
    DuplicateName(String),

    #[error("default for flag '{name}' is not a valid {expected}")]
    DefaultTypeMismatch { name: String, expected: FlagType },

    #[error("invalid flag '{name}': {source}")]
    InvalidFlag {
        name: String,
        #[source]
        source: FlagError,
    },
}

/// The value type of a configured flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    String,
    Int,
    Bool,
    Float,
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlagType::String => "string",
            FlagType::Int => "int",
            FlagType::Bool => "bool",
            FlagType::Float => "float",
        })
    }
}

/// Configuration for a single flag.
#[derive(Debug, Clone, Deserialize)]
pub struct FlagConfig {
    /// Flag name, matched as `-name` or `--name`
    pub name: String,
    #[serde(rename = "type")]
    pub flag_type: FlagType,
    /// Initial value; must match `type`
    pub default: Option<Value>,
    pub help: Option<String>,
    /// Alternative spelling, usually one letter
    pub alias: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Top-level configuration for a script.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub name: Option<String>,
    /// Line printed above the flag listing in help output
    pub banner: Option<String>,
    /// Version line; enables `-version`/`-v` when set
    pub version: Option<String>,
    /// Whether to register `-help`/`-h` (default: true)
    #[serde(default = "default_true")]
    pub help: bool,
    /// Keep flag values exactly as typed instead of lowercasing them
    #[serde(default)]
    pub preserve_case: bool,
    /// Environment variable prefix (default: "FLAGBIND_")
    pub prefix: Option<String>,
    #[serde(default)]
    pub flags: Vec<FlagConfig>,
}

/// Storage for one configured flag's value.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    String(String),
    Int(i64),
    Bool(bool),
    Float(f64),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::String(s) => f.write_str(s),
            Slot::Int(i) => write!(f, "{}", i),
            Slot::Bool(b) => write!(f, "{}", b),
            Slot::Float(x) => write!(f, "{}", x),
        }
    }
}

impl FlagConfig {
    /// The slot this flag starts with, taken from `default` or the type's zero.
    pub fn initial_slot(&self) -> Result<Slot, ConfigError> {
        let mismatch = || ConfigError::DefaultTypeMismatch {
            name: self.name.clone(),
            expected: self.flag_type,
        };
        let Some(ref default) = self.default else {
            return Ok(match self.flag_type {
                FlagType::String => Slot::String(String::new()),
                FlagType::Int => Slot::Int(0),
                FlagType::Bool => Slot::Bool(false),
                FlagType::Float => Slot::Float(0.0),
            });
        };
        let slot = match self.flag_type {
            FlagType::String => default.as_str().map(|s| Slot::String(s.to_string())),
            FlagType::Int => default.as_i64().map(Slot::Int),
            FlagType::Bool => default.as_bool().map(Slot::Bool),
            FlagType::Float => default.as_f64().map(Slot::Float),
        };
        slot.ok_or_else(mismatch)
    }
}

impl Config {
    /// Parse a JSON string into a Config.
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();

        for flag in &self.flags {
            for name in std::iter::once(&flag.name).chain(flag.alias.as_ref()) {
                validate_name(name).map_err(|source| ConfigError::InvalidFlag {
                    name: flag.name.clone(),
                    source,
                })?;
                if !names.insert(name.as_str()) {
                    return Err(ConfigError::DuplicateName(name.clone()));
                }
            }
            flag.initial_slot()?;
        }

        Ok(())
    }

    /// Initial storage for every configured flag, in config order.
    pub fn slots(&self) -> Result<Vec<Slot>, ConfigError> {
        self.flags.iter().map(FlagConfig::initial_slot).collect()
    }

    /// Build a [`FlagSet`] writing into `slots`, which must come from
    /// [`Config::slots`].
    pub fn bind<'a>(&self, slots: &'a mut [Slot]) -> Result<FlagSet<'a>, ConfigError> {
        let mut flags = FlagSet::new();
        for (flag, slot) in self.flags.iter().zip(slots.iter_mut()) {
            let help = flag.help.as_deref().unwrap_or("");
            let invalid = |source| ConfigError::InvalidFlag {
                name: flag.name.clone(),
                source,
            };
            match slot {
                Slot::String(s) => flags.register_string(&flag.name, s, help),
                Slot::Int(i) => flags.register_int(&flag.name, i, help),
                Slot::Bool(b) => flags.register_bool(&flag.name, b, help),
                Slot::Float(x) => flags.register_float(&flag.name, x, help),
            }
            .map_err(invalid)?;
            if let Some(ref alias) = flag.alias {
                flags.alias(alias, &flag.name).map_err(invalid)?;
            }
        }

        if let Some(ref banner) = self.banner {
            flags.banner(banner);
        }
        flags.preserve_case(self.preserve_case);
        let builtin = |source| ConfigError::InvalidFlag {
            name: "help/version".to_string(),
            source,
        };
        if self.help {
            flags.helper().map_err(builtin)?;
        }
        if let Some(ref version) = self.version {
            flags.version(version).map_err(builtin)?;
        }
        Ok(flags)
    }

    /// Get the effective prefix, using the default if none is set.
    pub fn effective_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    /// The program name shown in messages.
    pub fn effective_name(&self) -> &str {
        self.name.as_deref().unwrap_or("flagbind")
    }
}

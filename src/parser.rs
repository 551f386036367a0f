//! Matching the argument vector against registered flags.
//!
//! Accepted forms for a flag registered as `name`:
//!
//! ```text
//! -name=value    -name value
//! --name==value  --name value
//! -name          (bool flags only, meaning true)
//! ```
//!
//! Either prefix matches any registered name. Tokens that do not match a
//! flag are collected as positional arguments.

use crate::error::FlagError;
use crate::flag::{Binding, Control, Handler};
use crate::flag_set::FlagSet;
use crate::value::FlagKind;
use std::ffi::OsString;

/// Outcome of parsing arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every argument was consumed.
    Complete,
    /// The built-in help flag was matched.
    Help,
    /// The built-in version flag was matched.
    Version,
    /// A handler asked to stop with this exit status.
    Exit(i32),
}

/// Split a token into its flag text with the prefix removed, or `None` when
/// the token is not flag-shaped.
fn strip_prefix(token: &str) -> Option<&str> {
    if let Some(rest) = token.strip_prefix("--") {
        return Some(rest);
    }
    let rest = token.strip_prefix('-')?;
    // A bare "-" is not a short-style token.
    if rest.is_empty() {
        return None;
    }
    Some(rest)
}

/// The flag name a stripped token refers to: the text up to the first `=`.
///
/// Names never contain `=`, so this is exactly the registered name that the
/// token starts with and that ends at `=` or at the end of the token.
fn flag_name(stripped: &str) -> &str {
    match stripped.find('=') {
        Some(pos) => &stripped[..pos],
        None => stripped,
    }
}

/// The value attached to a token, if any. `==` takes precedence over `=`.
fn inline_value(token: &str) -> Option<&str> {
    if let Some(pos) = token.find("==") {
        return Some(&token[pos + 2..]);
    }
    token.find('=').map(|pos| &token[pos + 1..])
}

impl<'a> FlagSet<'a> {
    /// Parse `argv`, whose first element is the program name.
    ///
    /// Positional arguments from any previous parse are discarded. Destinations
    /// keep whatever earlier parses wrote unless matched again. On error, flags
    /// matched before the failing token stay written.
    pub fn parse<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<ParseOutcome, FlagError> {
        self.args.clear();

        let mut i = 1;
        while i < argv.len() {
            let token = argv[i].as_ref();
            i += 1;

            let Some(stripped) = strip_prefix(token) else {
                tracing::trace!(token, "positional argument");
                self.args.push(token.to_string());
                continue;
            };

            let preserve_case = self.preserve_case;
            let Some(flag) = self.lookup_mut(flag_name(stripped)) else {
                tracing::trace!(token, "unknown flag kept as positional argument");
                self.args.push(token.to_string());
                continue;
            };
            let kind = flag.kind();
            tracing::debug!(token, flag = flag.name(), %kind, "matched flag");

            if let Binding::Handler(handler) = &mut flag.binding {
                match handler {
                    Handler::Help => return Ok(ParseOutcome::Help),
                    Handler::Version => return Ok(ParseOutcome::Version),
                    Handler::Custom(f) => match f() {
                        Control::Continue => continue,
                        Control::Exit(code) => {
                            tracing::debug!(token, code, "handler requested exit");
                            return Ok(ParseOutcome::Exit(code));
                        }
                    },
                }
            }

            let raw = match inline_value(token) {
                Some(value) => value,
                None if kind == FlagKind::Bool => "true",
                None => {
                    let value = argv.get(i).ok_or_else(|| {
                        FlagError::invalid(format!("{} argument not found", token))
                    })?;
                    i += 1;
                    value.as_ref()
                }
            };

            let value = if preserve_case {
                raw.to_string()
            } else {
                raw.to_lowercase()
            };
            flag.binding.store(token, &value)?;
        }

        Ok(ParseOutcome::Complete)
    }

    /// Parse the process arguments. Arguments that are not valid UTF-8 are
    /// rejected before any flag is touched.
    pub fn parse_env(&mut self) -> Result<ParseOutcome, FlagError> {
        let argv = utf8_args(std::env::args_os())?;
        self.parse(&argv)
    }
}

fn utf8_args<I>(args: I) -> Result<Vec<String>, FlagError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                FlagError::invalid(format!("argument is not valid UTF-8: {:?}", raw))
            })
        })
        .collect()
}

//! flagbind - bind command-line flags to typed variables.
//!
//! Flags are registered against caller-owned `String`, `i64`, `bool` and
//! `f64` variables (or zero-argument handlers), then matched against the
//! argument vector in any of the forms `-name=value`, `-name value`,
//! `--name==value` and `--name value`. Tokens that match no flag are kept as
//! positional arguments.
//!
//! ```
//! use flagbind::{FlagSet, ParseOutcome};
//!
//! let mut name = String::from("default_name");
//! let mut age = 0;
//! let mut verbose = false;
//!
//! let mut flags = FlagSet::new();
//! flags.register_string("name", &mut name, "who to greet")?;
//! flags.register_int("age", &mut age, "age in years")?;
//! flags.register_bool("verbose", &mut verbose, "talk more")?;
//!
//! let outcome = flags.parse(&["cmd", "--name", "value", "-age=20", "-verbose", "file.txt"])?;
//! assert_eq!(outcome, ParseOutcome::Complete);
//! assert_eq!(flags.arg(0)?, "file.txt");
//! drop(flags);
//!
//! assert_eq!(name, "value");
//! assert_eq!(age, 20);
//! assert!(verbose);
//! # Ok::<(), flagbind::FlagError>(())
//! ```

pub mod config;
pub mod error;
pub mod flag;
pub mod flag_set;
pub mod help;
pub mod output;
pub mod parser;
pub mod value;

pub use config::{Config, ConfigError, FlagConfig, FlagType, Slot};
pub use error::FlagError;
pub use flag::{Binding, Control, FlagDefinition, Handler};
pub use flag_set::FlagSet;
pub use output::{generate_output, generate_output_string};
pub use parser::ParseOutcome;
pub use value::{DefaultValue, FlagKind, ValueError};

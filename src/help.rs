//! Flag listing, banner, and the built-in help and version flags.

use crate::error::FlagError;
use crate::flag::{Binding, FlagDefinition, Handler};
use crate::flag_set::FlagSet;
use crate::value::FlagKind;
use std::io;

impl<'a> FlagSet<'a> {
    /// Render one entry per flag, in name order:
    ///
    /// ```text
    ///   -name string
    ///     help text (default: value)
    /// ```
    pub fn render_defaults(&self) -> String {
        let mut out = String::new();
        for flag in self.flags() {
            self.render_flag(&mut out, flag);
        }
        out
    }

    fn render_flag(&self, out: &mut String, flag: &FlagDefinition<'a>) {
        out.push_str("  ");
        for alias in self.aliases_of(flag.name()) {
            out.push_str(&format!("-{}, ", alias));
        }
        out.push_str(&format!("-{}", flag.name()));
        match flag.kind() {
            FlagKind::Handler => {
                out.push_str(&format!("\n    {}\n", flag.help()));
            }
            kind => {
                out.push_str(&format!(
                    " {}\n    {} (default: {})\n",
                    kind,
                    flag.help(),
                    flag.default_value()
                ));
            }
        }
    }

    pub fn write_defaults<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.render_defaults().as_bytes())
    }

    /// Print the flag listing to stderr.
    pub fn print_defaults(&self) {
        // Nothing useful can be done if stderr is gone.
        let _ = self.write_defaults(&mut io::stderr().lock());
    }

    /// Set the text printed above the flag listing in help output.
    pub fn banner(&mut self, text: &str) -> &mut Self {
        self.banner = Some(text.to_string());
        self
    }

    /// Register `-help` (alias `-h`). Matching it ends the parse with
    /// [`crate::ParseOutcome::Help`]. Calling this again has no effect.
    pub fn helper(&mut self) -> Result<&mut Self, FlagError> {
        if self.has_builtin("help") {
            return Ok(self);
        }
        self.register_builtin("help", "show help.", Handler::Help)?;
        if self.get("h").is_none() {
            self.alias("h", "help")?;
        }
        Ok(self)
    }

    /// Register `-version` (alias `-v`) reporting `text`. Matching it ends
    /// the parse with [`crate::ParseOutcome::Version`]. Later calls only
    /// replace the text.
    pub fn version(&mut self, text: &str) -> Result<&mut Self, FlagError> {
        self.version = Some(text.to_string());
        if self.has_builtin("version") {
            return Ok(self);
        }
        self.register_builtin("version", "show version.", Handler::Version)?;
        if self.get("v").is_none() {
            self.alias("v", "version")?;
        }
        Ok(self)
    }

    fn has_builtin(&self, name: &str) -> bool {
        matches!(
            self.flags.get(name).map(|f| &f.binding),
            Some(Binding::Handler(Handler::Help | Handler::Version))
        )
    }

    /// Banner (if any) followed by the flag listing.
    pub fn help_text(&self) -> String {
        let mut out = String::new();
        if let Some(ref banner) = self.banner {
            out.push_str(banner);
            out.push('\n');
        }
        out.push_str(&self.render_defaults());
        out
    }

    /// The version line, or an empty string if no version was set.
    pub fn version_text(&self) -> String {
        match self.version {
            Some(ref v) => format!("{}\n", v),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::Control;
    use crate::parser::ParseOutcome;

    #[test]
    fn test_render_defaults_all_types() {
        let mut name = "def".to_string();
        let mut int_ = 10;
        let mut bool_ = true;
        let mut float_ = 1.0;
        let mut flags = FlagSet::new();
        flags.register_string("Str", &mut name, "string help").unwrap();
        flags.register_int("Int", &mut int_, "Int help").unwrap();
        flags.register_bool("Bool", &mut bool_, "Bool help").unwrap();
        flags.register_float("Float", &mut float_, "Float help").unwrap();

        let expected = "  -Bool bool\n    Bool help (default: true)\n\
                        \x20 -Float float\n    Float help (default: 1.00)\n\
                        \x20 -Int int\n    Int help (default: 10)\n\
                        \x20 -Str string\n    string help (default: def)\n";
        assert_eq!(flags.render_defaults(), expected);
    }

    #[test]
    fn test_defaults_show_registration_value_not_parsed_value() {
        let mut level = 3;
        let mut flags = FlagSet::new();
        flags.register_int("level", &mut level, "verbosity").unwrap();
        flags.parse(&["cmd", "-level=9"]).unwrap();
        assert!(flags.render_defaults().contains("verbosity (default: 3)"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut on = false;
        let mut flags = FlagSet::new();
        flags.register_bool("on", &mut on, "").unwrap();
        let first = flags.render_defaults();
        let mut buf = Vec::new();
        flags.write_defaults(&mut buf).unwrap();
        flags.print_defaults();
        assert_eq!(String::from_utf8(buf).unwrap(), first);
        assert_eq!(flags.render_defaults(), first);
    }

    #[test]
    fn test_render_handler_and_alias() {
        let mut out = String::new();
        let mut flags = FlagSet::new();
        flags.register_string("output", &mut out, "output file").unwrap();
        flags.alias("o", "output").unwrap();
        flags
            .register_handler("ping", "send a ping", || Control::Continue)
            .unwrap();

        let text = flags.render_defaults();
        assert!(text.contains("  -o, -output string\n    output file (default: )\n"));
        assert!(text.contains("  -ping\n    send a ping\n"));
    }

    #[test]
    fn test_helper_outcome_and_text() {
        let mut verbose = false;
        let mut flags = FlagSet::new();
        flags.banner("Banner: example");
        flags.register_bool("verbose", &mut verbose, "talk more").unwrap();
        flags.helper().unwrap();
        flags.helper().unwrap();

        assert_eq!(flags.parse(&["cmd", "--help"]).unwrap(), ParseOutcome::Help);
        assert_eq!(flags.parse(&["cmd", "-h"]).unwrap(), ParseOutcome::Help);

        let help = flags.help_text();
        assert!(help.starts_with("Banner: example\n"));
        assert!(help.contains("  -h, -help\n    show help.\n"));
        assert!(help.contains("  -verbose bool\n"));
    }

    #[test]
    fn test_helper_keeps_user_h_flag() {
        let mut host = String::new();
        let mut flags = FlagSet::new();
        flags.register_string("h", &mut host, "host").unwrap();
        flags.helper().unwrap();
        flags.parse(&["cmd", "-h", "example.org"]).unwrap();
        assert_eq!(flags.parse(&["cmd", "--help"]).unwrap(), ParseOutcome::Help);
        drop(flags);
        assert_eq!(host, "example.org");
    }

    #[test]
    fn test_h_flag_registered_after_helper() {
        let mut host = String::new();
        let mut flags = FlagSet::new();
        flags.helper().unwrap();
        flags.register_string("h", &mut host, "host").unwrap();

        let help = flags.help_text();
        assert!(help.contains("  -h string\n"));
        assert!(help.contains("  -help\n    show help.\n"));
        assert!(!help.contains("-h, -help"));

        assert_eq!(
            flags.parse(&["cmd", "-h", "example.org"]).unwrap(),
            ParseOutcome::Complete
        );
        assert_eq!(flags.parse(&["cmd", "-help"]).unwrap(), ParseOutcome::Help);
        drop(flags);
        assert_eq!(host, "example.org");
    }

    #[test]
    fn test_version() {
        let mut flags = FlagSet::new();
        assert_eq!(flags.version_text(), "");
        flags.version("tool 0.0.1").unwrap();
        flags.version("app 1.0").unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.version_text(), "app 1.0\n");
        assert_eq!(flags.parse(&["cmd", "-v"]).unwrap(), ParseOutcome::Version);
        assert_eq!(
            flags.parse(&["cmd", "--version"]).unwrap(),
            ParseOutcome::Version
        );
    }

    #[test]
    fn test_help_stops_before_later_flags() {
        let mut name = "default".to_string();
        let mut flags = FlagSet::new();
        flags.register_string("name", &mut name, "").unwrap();
        flags.helper().unwrap();
        let outcome = flags.parse(&["cmd", "-help", "-name=late"]).unwrap();
        assert_eq!(outcome, ParseOutcome::Help);
        drop(flags);
        assert_eq!(name, "default");
    }
}

//! Temporary file generation with shell export statements and special outputs.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Heredoc delimiter for help output.
const HELP_DELIMITER: &str = "FLAGBIND_HELP";
/// Heredoc delimiter for version output.
const VERSION_DELIMITER: &str = "FLAGBIND_VERSION";

/// Escape a string for safe use in a shell double-quoted context.
///
/// Escapes: $, `, \, ", and !
fn escape_shell_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '$' => escaped.push_str("\\$"),
            '`' => escaped.push_str("\\`"),
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '!' => escaped.push_str("\\!"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Convert a flag name to a valid shell variable name.
///
/// Converts to uppercase and replaces hyphens with underscores.
fn to_shell_var_name(name: &str) -> String {
    name.to_uppercase().replace('-', "_")
}

fn export_line(output: &mut String, var_name: &str, value: &str) {
    output.push_str(&format!(
        "export {}=\"{}\"\n",
        var_name,
        escape_shell_value(value)
    ));
}

/// Generate the export statements for parsed flag values and positional
/// arguments.
///
/// Flags are exported as `PREFIX_NAME`, in the order given. Positional
/// arguments are exported as `PREFIX_ARGC` and `PREFIX_ARG_<index>`.
pub fn generate_output_string(
    values: &[(String, String)],
    args: &[String],
    prefix: &str,
) -> String {
    let mut output = String::new();

    for (name, value) in values {
        let var_name = format!("{}{}", prefix, to_shell_var_name(name));
        export_line(&mut output, &var_name, value);
    }

    let argc = args.len().to_string();
    export_line(&mut output, &format!("{}ARGC", prefix), &argc);
    for (i, arg) in args.iter().enumerate() {
        export_line(&mut output, &format!("{}ARG_{}", prefix, i), arg);
    }

    output
}

/// Generate a temporary file with shell export statements.
///
/// Returns the path to the temporary file. The file will persist
/// until the process exits or it's manually deleted.
pub fn generate_output(
    values: &[(String, String)],
    args: &[String],
    prefix: &str,
) -> Result<PathBuf> {
    write_temp_file(&generate_output_string(values, args, prefix))
}

/// Generate an error output file.
///
/// When sourced, the file will print the error message to stderr and exit 1.
pub fn generate_error_output(message: &str) -> Result<PathBuf> {
    let content = generate_error_string(message);
    write_temp_file(&content)
}

/// Generate an error output as a string (for testing).
pub fn generate_error_string(message: &str) -> String {
    let escaped = escape_shell_value(message);
    format!("echo \"flagbind: {}\" >&2\nexit 1\n", escaped)
}

/// Generate a help output file.
///
/// When sourced, the file will print the help text and exit 0.
pub fn generate_help_output(help_text: &str) -> Result<PathBuf> {
    let content = generate_help_output_string(help_text);
    write_temp_file(&content)
}

/// Generate a help output as a string (for testing).
pub fn generate_help_output_string(help_text: &str) -> String {
    heredoc(HELP_DELIMITER, help_text)
}

/// Generate a version output file.
///
/// When sourced, the file will print the version and exit 0.
pub fn generate_version_output(version_text: &str) -> Result<PathBuf> {
    let content = generate_version_output_string(version_text);
    write_temp_file(&content)
}

/// Generate a version output as a string (for testing).
pub fn generate_version_output_string(version_text: &str) -> String {
    heredoc(VERSION_DELIMITER, version_text)
}

/// Print `text` through a quoted heredoc, then exit 0.
///
/// The delimiter is extended with underscores until no line of `text`
/// equals it, so the text cannot close the heredoc early.
fn heredoc(base: &str, text: &str) -> String {
    let mut delimiter = base.to_string();
    while text.lines().any(|line| line == delimiter) {
        delimiter.push('_');
    }
    let newline = if text.is_empty() || text.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    format!(
        "cat <<'{delimiter}'\n{text}{newline}{delimiter}\nexit 0\n",
        delimiter = delimiter,
        text = text,
        newline = newline
    )
}

/// Generate an output file that exits with `code` without printing.
pub fn generate_exit_output(code: i32) -> Result<PathBuf> {
    write_temp_file(&format!("exit {}\n", code))
}

/// Write content to a temporary file and return its path.
fn write_temp_file(content: &str) -> Result<PathBuf> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    let path = file.into_temp_path().keep()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_values(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_output() {
        let values = make_values(&[("verbose", "true"), ("output", "file.txt")]);
        let output = generate_output_string(&values, &[], "FLAGBIND_");

        assert_eq!(
            output,
            "export FLAGBIND_VERBOSE=\"true\"\n\
             export FLAGBIND_OUTPUT=\"file.txt\"\n\
             export FLAGBIND_ARGC=\"0\"\n"
        );
    }

    #[test]
    fn test_positional_args() {
        let args = vec!["in.txt".to_string(), "-xx".to_string()];
        let output = generate_output_string(&[], &args, "APP_");

        assert!(output.contains("export APP_ARGC=\"2\""));
        assert!(output.contains("export APP_ARG_0=\"in.txt\""));
        assert!(output.contains("export APP_ARG_1=\"-xx\""));
    }

    #[test]
    fn test_escape_dollar() {
        let values = make_values(&[("value", "$HOME/path")]);
        let output = generate_output_string(&values, &[], "FLAGBIND_");

        assert!(output.contains("export FLAGBIND_VALUE=\"\\$HOME/path\""));
    }

    #[test]
    fn test_escape_backtick() {
        let values = make_values(&[("cmd", "`whoami`")]);
        let output = generate_output_string(&values, &[], "FLAGBIND_");

        assert!(output.contains("export FLAGBIND_CMD=\"\\`whoami\\`\""));
    }

    #[test]
    fn test_escape_newline() {
        let values = make_values(&[("text", "line1\nline2")]);
        let output = generate_output_string(&values, &[], "FLAGBIND_");

        assert!(output.contains("export FLAGBIND_TEXT=\"line1\\nline2\""));
    }

    #[test]
    fn test_complex_escaping() {
        let values = make_values(&[("complex", "$var \"quoted\" `cmd` \\path!")]);
        let output = generate_output_string(&values, &[], "TEST_");

        assert!(
            output.contains("export TEST_COMPLEX=\"\\$var \\\"quoted\\\" \\`cmd\\` \\\\path\\!\"")
        );
    }

    #[test]
    fn test_hyphenated_name() {
        let values = make_values(&[("dry-run", "true")]);
        let output = generate_output_string(&values, &[], "FLAGBIND_");

        assert!(output.contains("export FLAGBIND_DRY_RUN=\"true\""));
    }

    #[test]
    fn test_generate_output_creates_file() {
        let values = make_values(&[("test", "value")]);
        let path = generate_output(&values, &[], "FLAGBIND_").unwrap();

        assert!(path.exists());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("export FLAGBIND_TEST=\"value\""));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_generate_error_string() {
        let output = generate_error_string("flag invalid argument: -age abc");
        assert!(output.contains("echo \"flagbind: flag invalid argument: -age abc\" >&2"));
        assert!(output.ends_with("exit 1\n"));
    }

    #[test]
    fn test_generate_help_output_string() {
        let help = "Banner\n  -verbose bool\n    talk more (default: false)\n";
        let output = generate_help_output_string(help);

        assert!(output.starts_with("cat <<'FLAGBIND_HELP'\n"));
        assert!(output.contains("  -verbose bool"));
        assert!(output.ends_with("FLAGBIND_HELP\nexit 0\n"));
    }

    #[test]
    fn test_generate_version_output_string() {
        let output = generate_version_output_string("myapp 1.0.0\n");

        assert!(output.starts_with("cat <<'FLAGBIND_VERSION'\n"));
        assert!(output.contains("myapp 1.0.0"));
        assert!(output.ends_with("FLAGBIND_VERSION\nexit 0\n"));
    }

    #[test]
    fn test_help_text_cannot_close_heredoc() {
        let help = "Banner\nFLAGBIND_HELP\nrm -rf /tmp/x\nFLAGBIND_HELP_\n";
        let output = generate_help_output_string(help);

        assert!(output.starts_with("cat <<'FLAGBIND_HELP__'\n"));
        assert!(output.ends_with("\nFLAGBIND_HELP__\nexit 0\n"));
        assert_eq!(output.lines().filter(|l| *l == "FLAGBIND_HELP__").count(), 1);
    }

    #[test]
    fn test_version_without_trailing_newline() {
        let output = generate_version_output_string("app 2.0");
        assert_eq!(output, "cat <<'FLAGBIND_VERSION'\napp 2.0\nFLAGBIND_VERSION\nexit 0\n");
    }

    #[test]
    fn test_generate_exit_output_creates_file() {
        let path = generate_exit_output(3).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "exit 3\n");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_generate_error_output_creates_file() {
        let path = generate_error_output("test error").unwrap();
        assert!(path.exists());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("flagbind: test error"));
        assert!(contents.contains("exit 1"));

        std::fs::remove_file(path).unwrap();
    }
}

//! flagbind - parse shell script arguments with a JSON flag schema.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flagbind::output::{
    generate_error_output, generate_exit_output, generate_help_output, generate_output,
    generate_version_output,
};
use flagbind::{Config, ParseOutcome};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Parse shell script arguments into exported variables.
#[derive(Parser, Debug)]
#[command(name = "flagbind", version, about, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse script arguments and output environment variables
    Parse {
        /// JSON flag schema for the target script
        #[arg(long)]
        config: String,

        /// Environment variable prefix (overrides config)
        #[arg(long)]
        prefix: Option<String>,

        /// Arguments to parse for the target script
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Print the flag listing for the target script
    Help {
        /// JSON flag schema for the target script
        #[arg(long)]
        config: String,
    },

    /// Print the version of the target script
    Version {
        /// JSON flag schema for the target script
        #[arg(long)]
        config: String,
    },
}

fn load_config(json: &str) -> Result<Config> {
    let cfg = Config::from_json(json).context("failed to parse config JSON")?;
    cfg.validate().context("invalid config")?;
    Ok(cfg)
}

/// Parse `args` against `cfg` and write the matching output file.
fn run_parse(cfg: &Config, args: &[String], prefix: &str) -> Result<PathBuf> {
    let mut slots = cfg.slots()?;
    let mut flags = cfg.bind(&mut slots).context("failed to register flags")?;

    let argv: Vec<&str> = std::iter::once(cfg.effective_name())
        .chain(args.iter().map(String::as_str))
        .collect();

    let outcome = match flags.parse(&argv) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::debug!(%err, "argument parsing failed");
            return generate_error_output(&err.to_string())
                .context("failed to generate error output file");
        }
    };

    match outcome {
        ParseOutcome::Complete => {}
        ParseOutcome::Help => {
            return generate_help_output(&flags.help_text())
                .context("failed to generate help output file")
        }
        ParseOutcome::Version => {
            return generate_version_output(&flags.version_text())
                .context("failed to generate version output file")
        }
        ParseOutcome::Exit(code) => {
            return generate_exit_output(code).context("failed to generate exit output file")
        }
    }

    let positional = flags.args().to_vec();
    drop(flags);

    let values: Vec<(String, String)> = cfg
        .flags
        .iter()
        .zip(&slots)
        .map(|(flag, slot)| (flag.name.clone(), slot.to_string()))
        .collect();
    generate_output(&values, &positional, prefix).context("failed to generate output file")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            config,
            prefix,
            args,
        } => {
            let cfg = load_config(&config)?;
            let effective_prefix = prefix.as_deref().unwrap_or_else(|| cfg.effective_prefix());
            tracing::debug!(prefix = effective_prefix, count = args.len(), "parsing arguments");

            let path = run_parse(&cfg, &args, effective_prefix)?;
            println!("{}", path.display());
        }
        Commands::Help { config } => {
            let cfg = load_config(&config)?;
            let mut slots = cfg.slots()?;
            let flags = cfg.bind(&mut slots).context("failed to register flags")?;
            print!("{}", flags.help_text());
        }
        Commands::Version { config } => {
            let cfg = load_config(&config)?;
            let mut slots = cfg.slots()?;
            let flags = cfg.bind(&mut slots).context("failed to register flags")?;
            print!("{}", flags.version_text());
        }
    }

    Ok(())
}

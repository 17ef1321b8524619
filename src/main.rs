use anyhow::Result;
use brickledger::cli::{log_level, parse_options, Cli, Commands};
use brickledger::commands::{
    init_config, run_combine, run_report, CombineCommand, ReportCommand,
};
use brickledger::config::Overrides;
use brickledger::formatting::FormattingConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let formatting = create_formatting_config(cli.plain);

    match cli.command {
        Commands::Report {
            input,
            colors,
            exclude,
            format,
            output,
            top,
            jobs,
            no_parallel,
        } => {
            let command = ReportCommand {
                config: cli.config,
                overrides: Overrides {
                    folder: input,
                    excluded: exclude,
                    color_mapping: colors,
                    format,
                    top,
                    ..Overrides::default()
                },
                output,
                parse: parse_options(jobs, no_parallel),
                formatting,
            };
            run_report(command)?;
        }
        Commands::Combine {
            input,
            exclude,
            wanted_list,
            filtered_folder,
            no_filtered,
            jobs,
            no_parallel,
        } => {
            let command = CombineCommand {
                config: cli.config,
                overrides: Overrides {
                    folder: input,
                    excluded: exclude,
                    wanted_list,
                    filtered_folder,
                    ..Overrides::default()
                },
                write_filtered: !no_filtered,
                parse: parse_options(jobs, no_parallel),
                formatting,
            };
            run_combine(command)?;
        }
        Commands::Init { force } => init_config(force)?,
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the `-v` count.
fn init_logging(verbosity: u8) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("brickledger={}", log_level(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use lockin::cli::args::{Cli, Commands};
use lockin::cli::commands::{self, Workspace};
use lockin::config::{Config, Paths};
use lockin::error::LockinError;
use lockin::output::TimerAction;

/// Environment variable holding the log filter, e.g. `LOCKIN_LOG=debug`.
const LOG_ENV: &str = "LOCKIN_LOG";

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), LockinError> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell)?);
        return Ok(());
    }

    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let ws = Workspace::open(&paths, config)?;

    let output = match cli.command {
        Commands::Start => commands::timer_action(&ws, TimerAction::Start, format)?,
        Commands::Pause => commands::timer_action(&ws, TimerAction::Pause, format)?,
        Commands::Stop => commands::timer_action(&ws, TimerAction::Stop, format)?,
        Commands::Reset => commands::timer_action(&ws, TimerAction::Reset, format)?,
        Commands::Toggle => commands::timer_action(&ws, TimerAction::Toggle, format)?,
        Commands::Status => commands::status(&ws, format)?,
        Commands::Log(args) => commands::log(&ws, args, format)?,
        Commands::Music(args) => commands::music(&ws, args.command, format)?,
        Commands::Watch => {
            lockin::tui::run(&ws)?;
            String::new()
        },
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

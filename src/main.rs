use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use pomodoro_timer::cli::args::{Cli, Commands};
use pomodoro_timer::cli::commands;
use pomodoro_timer::logging::{self, LogTarget};
use pomodoro_timer::tui::{self, App};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(&cli).context("loading configuration")?;

    match cli.command.clone().unwrap_or(Commands::Tui) {
        Commands::Tui => {
            logging::init(&config.log, LogTarget::FileOnly)?;
            let timer = commands::build_timer(&config)?;
            let mut app = App::new(timer, config.timer.period(), config.ui.notifications);
            tui::run(&mut app)?;
        }
        Commands::Watch { ticks, period_ms } => {
            logging::init(&config.log, LogTarget::FileOrStderr)?;
            commands::watch(&config, ticks, period_ms, cli.output)?;
        }
    }

    Ok(())
}

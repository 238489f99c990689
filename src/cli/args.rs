use chrono::Duration;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::timer::parse_duration;

#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(about = "A Pomodoro timer for the terminal")]
#[command(long_about = "pomodoro - work/break cycles in your terminal

Counts down work sessions and breaks. Every fourth completed work session
earns a long break. A notification fires when the alarm offset is reached.

QUICK START:
  pomodoro                          Open the timer
  pomodoro --work 50m --alarm 5m    Longer sessions, earlier warning
  pomodoro watch --ticks 10         Print the first ten ticks

DURATIONS:
  25m, 1m30s, 90s, 05:00, or a bare number of minutes")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for headless commands
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Configuration file (default: ~/.pomodoro/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Work session length
    #[arg(long, value_parser = parse_duration_arg, global = true)]
    pub work: Option<Duration>,

    /// Short break length
    #[arg(long, value_parser = parse_duration_arg, global = true)]
    pub short_break: Option<Duration>,

    /// Long break length
    #[arg(long, value_parser = parse_duration_arg, global = true)]
    pub long_break: Option<Duration>,

    /// Remaining work time at which the alarm fires
    #[arg(long, value_parser = parse_duration_arg, global = true)]
    pub alarm: Option<Duration>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// Space starts and pauses, `s` opens settings, `r` resets the
    /// current session, `q` quits while working. During a break the
    /// screen is locked until the break ends; `q` ends it early.
    Tui,

    /// Run the timer headless and print every event
    ///
    /// # Examples
    ///
    ///   pomodoro watch
    ///   pomodoro --work 2s --short-break 1s watch --ticks 5 --period-ms 10
    ///   pomodoro -o json watch --ticks 3
    Watch {
        /// Stop after this many ticks (runs forever when omitted)
        #[arg(long)]
        ticks: Option<u64>,

        /// Milliseconds between ticks (default: from config)
        #[arg(long)]
        period_ms: Option<u64>,
    },
}

fn parse_duration_arg(s: &str) -> Result<Duration, String> {
    parse_duration(s).ok_or_else(|| format!("invalid duration '{s}' (try 25m, 1m30s, 90s)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["pomodoro"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output, OutputFormat::Pretty);
        assert!(cli.work.is_none());
    }

    #[test]
    fn test_duration_flags() {
        let cli = Cli::try_parse_from([
            "pomodoro",
            "--work",
            "50m",
            "--short-break",
            "90s",
            "--alarm",
            "05:00",
        ])
        .unwrap();

        assert_eq!(cli.work, Some(Duration::minutes(50)));
        assert_eq!(cli.short_break, Some(Duration::seconds(90)));
        assert_eq!(cli.alarm, Some(Duration::minutes(5)));
        assert!(cli.long_break.is_none());
    }

    #[test]
    fn test_invalid_duration_rejected() {
        assert!(Cli::try_parse_from(["pomodoro", "--work", "soon"]).is_err());
        assert!(Cli::try_parse_from(["pomodoro", "--work", "99999999999999999"]).is_err());
        assert!(Cli::try_parse_from(["pomodoro", "--alarm", "9999999999999999h"]).is_err());
    }

    #[test]
    fn test_watch_subcommand() {
        let cli = Cli::try_parse_from([
            "pomodoro", "-o", "json", "watch", "--ticks", "3", "--period-ms", "5",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(
            cli.command,
            Some(Commands::Watch {
                ticks: Some(3),
                period_ms: Some(5)
            })
        );
    }
}

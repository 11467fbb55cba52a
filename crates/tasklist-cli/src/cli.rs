use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tasklist_core::{Filter, Theme};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklist",
    version,
    about = "Tasklist: a small persistent to-do list",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Directory holding store.json.
    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    /// TOML config file; defaults to <config dir>/tasklist/tasklist.toml.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Append a task.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Flip a task between open and done.
    Toggle { id: u64 },
    /// Replace a task's text.
    Edit {
        id: u64,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Remove a task.
    Delete { id: u64 },
    /// Remove every completed task.
    ClearCompleted,
    /// Show tasks.
    List {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Show or set the theme preference.
    Theme {
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for Filter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => Filter::All,
            FilterArg::Active => Filter::Active,
            FilterArg::Completed => Filter::Completed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

/// Joins trailing words into one task text.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

pub mod history;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use history::{process_history_command, HistoryCommand};
use tracing::level_filters::LevelFilter;

use crate::{
    app::start_app,
    cycle::state::PhaseDurations,
    utils::{dir::application_data_path, logging::enable_logging},
};

#[derive(Parser, Debug)]
#[command(name = "Tomatick", version, long_about = None)]
#[command(about = "Terminal pomodoro timer with a start/info/timer screen flow", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Echo log lines to the console")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Run the interactive timer")]
    Run {
        #[command(flatten)]
        durations: DurationArgs,
        #[arg(
            long,
            help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
        )]
        dir: Option<PathBuf>,
    },
    #[command(about = "Show the phases completed on a day")]
    History {
        #[command(flatten)]
        command: HistoryCommand,
    },
}

#[derive(Debug, Clone, Copy, clap::Args)]
pub struct DurationArgs {
    #[arg(
        long = "work",
        default_value_t = 1500,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Work phase length in seconds"
    )]
    work_seconds: u32,
    #[arg(
        long = "short-break",
        default_value_t = 300,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Short break length in seconds"
    )]
    short_break_seconds: u32,
    #[arg(
        long = "long-break",
        default_value_t = 900,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Long break length in seconds"
    )]
    long_break_seconds: u32,
}

impl From<DurationArgs> for PhaseDurations {
    fn from(value: DurationArgs) -> Self {
        PhaseDurations {
            work: value.work_seconds,
            short_break: value.short_break_seconds,
            long_break: value.long_break_seconds,
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };

    match args.commands {
        Commands::Run { durations, dir } => {
            let data_dir = application_data_path(dir)?;
            enable_logging(&data_dir, logging_level, args.log)?;
            start_app(durations.into(), data_dir).await
        }
        Commands::History { command } => process_history_command(command).await,
    }
}

use std::path::PathBuf;

use ansi_term::Colour;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};
use clap::{CommandFactory, Parser};

use crate::{
    cycle::state::Phase,
    session::{
        entities::PhaseRecordEntity,
        store::{SessionStore, SessionStoreImpl},
    },
    utils::{
        dir::application_data_path,
        format::{date_to_session_name, format_clock},
    },
};

use super::Args;

#[derive(Debug, Parser)]
pub struct HistoryCommand {
    #[arg(
        long,
        help = "Day to show. Examples are \"today\", \"yesterday\", \"15/03/2025\""
    )]
    date: Option<String>,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

/// Command to process `history`. Prints the phases completed on one day,
/// newest data coming straight from the session files a running timer
/// appends to.
pub async fn process_history_command(
    HistoryCommand { date, dir }: HistoryCommand,
) -> Result<()> {
    let day = parse_day(date)?;

    let store = SessionStoreImpl::new(application_data_path(dir)?.join("sessions"))?;
    let records = store.read_day(day).await?;

    if records.is_empty() {
        println!("No completed phases on {}", date_to_session_name(day));
        return Ok(());
    }

    for record in &records {
        println!(
            "{}\t{}\t{}",
            record.completed_at.with_timezone(&Local).format("%H:%M:%S"),
            format_clock(record.duration_seconds),
            paint_phase(record.phase),
        );
    }

    let (work, short, long) = tally(&records);
    println!();
    println!("Completed: {work} work, {short} short break, {long} long break");
    Ok(())
}

fn parse_day(date: Option<String>) -> Result<NaiveDate> {
    let Some(date) = date else {
        return Ok(Local::now().date_naive());
    };
    match parse_date_string(&date, Local::now(), Dialect::Uk) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {e}"),
            )
            .into()),
    }
}

fn paint_phase(phase: Phase) -> String {
    let colour = match phase {
        Phase::Work => Colour::Green,
        Phase::ShortBreak => Colour::Cyan,
        Phase::LongBreak => Colour::Blue,
    };
    colour.paint(phase.label()).to_string()
}

fn tally(records: &[PhaseRecordEntity]) -> (u32, u32, u32) {
    let mut work = 0;
    let mut short = 0;
    let mut long = 0;
    for record in records {
        match record.phase {
            Phase::Work => work += 1,
            Phase::ShortBreak => short += 1,
            Phase::LongBreak => long += 1,
        }
    }
    (work, short, long)
}

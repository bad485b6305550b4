use std::io::Write;

use ansi_term::Colour;
use anyhow::Result;

/// The three screens of the application. A view is a variant with one
/// `show` contract, switching is owned by the controller's navigation
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Start,
    Info,
    Timer,
}

/// Where a menu command leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    To(View),
    Quit,
}

impl View {
    pub fn show(&self, out: &mut impl Write) -> Result<()> {
        match self {
            View::Start => {
                writeln!(out, "\n{}", Colour::Green.bold().paint("tomatick"))?;
                writeln!(out, "  [s] start pomodoro")?;
                writeln!(out, "  [i] info")?;
                writeln!(out, "  [q] quit")?;
            }
            View::Info => {
                writeln!(out, "\n{}", Colour::Green.bold().paint("info"))?;
                writeln!(
                    out,
                    "  Work in focused stretches with breaks in between: after two\n  \
                     short breaks the next break is a long one. The countdown can\n  \
                     be paused and resumed without losing its place."
                )?;
                writeln!(out, "  [b] back")?;
            }
            View::Timer => {
                writeln!(
                    out,
                    "\n{}   [s]tart  [p]ause  [b]ack  [q]uit",
                    Colour::Green.bold().paint("pomodoro")
                )?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Navigation dispatch for the menu screens. The timer screen parses
    /// its own commands inside the countdown module.
    pub fn navigate(&self, command: &str) -> Option<Nav> {
        match self {
            View::Start => match command {
                "s" | "start" => Some(Nav::To(View::Timer)),
                "i" | "info" => Some(Nav::To(View::Info)),
                "q" | "quit" => Some(Nav::Quit),
                _ => None,
            },
            View::Info => match command {
                "b" | "back" => Some(Nav::To(View::Start)),
                "q" | "quit" => Some(Nav::Quit),
                _ => None,
            },
            View::Timer => None,
        }
    }
}

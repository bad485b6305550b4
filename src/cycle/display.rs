use std::io::Write;

use ansi_term::Colour;
use anyhow::Result;
#[cfg(test)]
use mockall::automock;
use notify_rust::Notification;
use tracing::warn;

/// Contract between the countdown loop and whatever renders it. The loop
/// publishes a formatted `MM:SS` string once per second, shows the phase
/// message when a screen comes up, and announces every phase change.
#[cfg_attr(test, automock)]
pub trait TimerDisplay {
    fn show_remaining(&mut self, formatted: &str) -> Result<()>;

    fn show_message(&mut self, message: &str) -> Result<()>;

    /// A phase change: the message plus whatever out-of-band alerting the
    /// display supports.
    fn announce(&mut self, message: &str) -> Result<()>;
}

/// Renders the countdown on a terminal. The clock line is redrawn in
/// place with a carriage return; announcements break the line and also
/// raise a desktop notification.
pub struct TerminalDisplay<W> {
    out: W,
    notifications: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, notifications: bool) -> Self {
        Self { out, notifications }
    }

    fn notify(&self, message: &str) {
        if !self.notifications {
            return;
        }
        if let Err(e) = Notification::new()
            .summary("Tomatick")
            .body(message)
            .show()
        {
            // Not every desktop has a notification daemon running.
            warn!("Failed to send notification: {e}");
        }
    }
}

impl<W: Write> TimerDisplay for TerminalDisplay<W> {
    fn show_remaining(&mut self, formatted: &str) -> Result<()> {
        write!(self.out, "\r   {}   ", Colour::Cyan.bold().paint(formatted))?;
        self.out.flush()?;
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "\n{}", Colour::Yellow.bold().paint(message))?;
        self.out.flush()?;
        Ok(())
    }

    fn announce(&mut self, message: &str) -> Result<()> {
        self.show_message(message)?;
        self.notify(message);
        Ok(())
    }
}

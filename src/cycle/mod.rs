//! The countdown phase cycle: a work/short-break/long-break state machine
//! advanced once per second by [CountdownModule]. The pure transition
//! rules live in [state], rendering goes through the [display::TimerDisplay]
//! collaborator.

pub mod display;
pub mod state;

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use display::TimerDisplay;
use state::{CycleState, Phase, PhaseDurations, Transition};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::utils::{clock::Clock, format::format_clock};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Emitted towards the session recorder every time a phase completes.
#[derive(Debug, Clone)]
pub struct PhaseEvent {
    pub completed: Phase,
    pub completed_at: DateTime<Utc>,
    pub duration_seconds: u32,
}

/// Commands the timer screen understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerCommand {
    Start,
    Pause,
    Back,
    Quit,
}

impl TimerCommand {
    fn parse(line: &str) -> Option<TimerCommand> {
        match line {
            "s" | "start" => Some(TimerCommand::Start),
            "p" | "pause" => Some(TimerCommand::Pause),
            "b" | "back" => Some(TimerCommand::Back),
            "q" | "quit" => Some(TimerCommand::Quit),
            _ => None,
        }
    }
}

/// How a timer screen ended, so the controller knows where to navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerExit {
    Back,
    Quit,
}

/// Drives one countdown phase cycle. The module is the only mutator of
/// the cycle state; pause and resume arrive as commands on the shared
/// command channel and are observed between ticks. Navigating away
/// discards the module together with its state.
pub struct CountdownModule<'a, D> {
    state: CycleState,
    durations: PhaseDurations,
    display: &'a mut D,
    events: mpsc::Sender<PhaseEvent>,
    commands: &'a mut mpsc::Receiver<String>,
    shutdown: CancellationToken,
    clock: &'a dyn Clock,
    paused: bool,
}

impl<'a, D: TimerDisplay> CountdownModule<'a, D> {
    pub fn new(
        durations: PhaseDurations,
        display: &'a mut D,
        events: mpsc::Sender<PhaseEvent>,
        commands: &'a mut mpsc::Receiver<String>,
        shutdown: CancellationToken,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            state: CycleState::new(&durations),
            durations,
            display,
            events,
            commands,
            shutdown,
            clock,
            // The screen comes up idle, counting starts on the first
            // `start` command.
            paused: true,
        }
    }

    /// Executes the countdown event loop until the user navigates away or
    /// the application shuts down.
    pub async fn run(mut self) -> Result<TimerExit> {
        self.display.show_message(self.state.phase().message())?;
        self.publish_remaining()?;

        let mut next_tick = self.clock.instant();
        loop {
            if self.paused {
                tokio::select! {
                    _ = self.shutdown.cancelled() => return Ok(TimerExit::Quit),
                    line = self.commands.recv() => {
                        let Some(line) = line else { return Ok(TimerExit::Quit) };
                        match TimerCommand::parse(&line) {
                            Some(TimerCommand::Start) => {
                                self.paused = false;
                                next_tick = self.clock.instant() + TICK_INTERVAL;
                            }
                            // Pausing an already paused countdown changes
                            // nothing, the resume point is kept as is.
                            Some(TimerCommand::Pause) => {}
                            Some(TimerCommand::Back) => return Ok(TimerExit::Back),
                            Some(TimerCommand::Quit) => return Ok(TimerExit::Quit),
                            None => debug!("Ignoring unrecognized command {line:?}"),
                        }
                    }
                }
            } else {
                tokio::select! {
                    _ = self.shutdown.cancelled() => return Ok(TimerExit::Quit),
                    line = self.commands.recv() => {
                        let Some(line) = line else { return Ok(TimerExit::Quit) };
                        match TimerCommand::parse(&line) {
                            Some(TimerCommand::Pause) => self.paused = true,
                            Some(TimerCommand::Start) => {
                                debug!("Countdown is already running")
                            }
                            Some(TimerCommand::Back) => return Ok(TimerExit::Back),
                            Some(TimerCommand::Quit) => return Ok(TimerExit::Quit),
                            None => debug!("Ignoring unrecognized command {line:?}"),
                        }
                    }
                    _ = self.clock.sleep_until(next_tick) => {
                        next_tick += TICK_INTERVAL;
                        self.tick().await?;
                    }
                }
            }
        }
    }

    async fn tick(&mut self) -> Result<()> {
        match self.state.tick(&self.durations) {
            None => self.publish_remaining()?,
            Some(transition) => {
                self.display.show_remaining(&format_clock(0))?;
                self.display.announce(transition.next.message())?;
                self.send_event(transition).await?;
                self.publish_remaining()?;
            }
        }
        Ok(())
    }

    async fn send_event(&mut self, transition: Transition) -> Result<()> {
        let event = PhaseEvent {
            completed: transition.completed,
            completed_at: self.clock.now(),
            duration_seconds: self.durations.of(transition.completed),
        };
        debug!("Sending phase event {:?}", event);
        self.events.send(event).await?;
        Ok(())
    }

    fn publish_remaining(&mut self) -> Result<()> {
        self.display
            .show_remaining(&format_clock(self.state.remaining_seconds()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::Result;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use crate::{
        cycle::{
            display::MockTimerDisplay,
            state::{Phase, PhaseDurations},
            CountdownModule, TimerCommand, TimerExit,
        },
        utils::{clock::SystemClock, logging::TEST_LOGGING},
    };

    const DURATIONS: PhaseDurations = PhaseDurations {
        work: 5,
        short_break: 2,
        long_break: 3,
    };

    struct TestHarness {
        commands: mpsc::Sender<String>,
        events: mpsc::Receiver<super::PhaseEvent>,
        shown: mpsc::UnboundedReceiver<String>,
        display: MockTimerDisplay,
        command_rx: mpsc::Receiver<String>,
        event_tx: mpsc::Sender<super::PhaseEvent>,
        shutdown: CancellationToken,
    }

    fn harness() -> TestHarness {
        *TEST_LOGGING;
        let (commands, command_rx) = mpsc::channel(8);
        let (event_tx, events) = mpsc::channel(8);
        let (shown_tx, shown) = mpsc::unbounded_channel();

        let mut display = MockTimerDisplay::new();
        display.expect_show_remaining().returning(move |s| {
            shown_tx.send(s.to_string()).unwrap();
            Ok(())
        });
        display.expect_show_message().returning(|_| Ok(()));
        display.expect_announce().returning(|_| Ok(()));

        TestHarness {
            commands,
            events,
            shown,
            display,
            command_rx,
            event_tx,
            shutdown: CancellationToken::new(),
        }
    }

    fn drain(shown: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut values = vec![];
        while let Ok(v) = shown.try_recv() {
            values.push(v);
        }
        values
    }

    #[test]
    fn commands_have_short_and_long_spellings() {
        assert_eq!(TimerCommand::parse("s"), Some(TimerCommand::Start));
        assert_eq!(TimerCommand::parse("pause"), Some(TimerCommand::Pause));
        assert_eq!(TimerCommand::parse("b"), Some(TimerCommand::Back));
        assert_eq!(TimerCommand::parse("quit"), Some(TimerCommand::Quit));
        assert_eq!(TimerCommand::parse("bogus"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn pausing_preserves_the_resume_point() -> Result<()> {
        let mut h = harness();
        let clock = SystemClock;
        let module = CountdownModule::new(
            DURATIONS,
            &mut h.display,
            h.event_tx.clone(),
            &mut h.command_rx,
            h.shutdown.clone(),
            &clock,
        );

        let commands = h.commands.clone();
        let driver = async move {
            commands.send("s".into()).await.unwrap();
            // Two ticks land before the pause.
            tokio::time::sleep(Duration::from_millis(2500)).await;
            commands.send("p".into()).await.unwrap();
            // A paused countdown must not advance no matter how long it
            // sits.
            tokio::time::sleep(Duration::from_secs(60)).await;
            commands.send("s".into()).await.unwrap();
            // Three more ticks finish the work phase.
            tokio::time::sleep(Duration::from_millis(3600)).await;
            commands.send("q".into()).await.unwrap();
        };

        let (exit, _) = tokio::join!(module.run(), driver);
        assert_eq!(exit?, TimerExit::Quit);

        assert_eq!(
            drain(&mut h.shown),
            vec!["00:05", "00:04", "00:03", "00:02", "00:01", "00:00", "00:02"]
        );

        let event = h.events.try_recv()?;
        assert_eq!(event.completed, Phase::Work);
        assert_eq!(event.duration_seconds, 5);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_start_and_pause_are_idempotent() -> Result<()> {
        let mut h = harness();
        let clock = SystemClock;
        let module = CountdownModule::new(
            DURATIONS,
            &mut h.display,
            h.event_tx.clone(),
            &mut h.command_rx,
            h.shutdown.clone(),
            &clock,
        );

        let commands = h.commands.clone();
        let driver = async move {
            commands.send("s".into()).await.unwrap();
            commands.send("s".into()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(1200)).await;
            commands.send("p".into()).await.unwrap();
            commands.send("p".into()).await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            commands.send("b".into()).await.unwrap();
        };

        let (exit, _) = tokio::join!(module.run(), driver);
        assert_eq!(exit?, TimerExit::Back);

        // One tick ran, the double pause kept the resume point at 4.
        assert_eq!(drain(&mut h.shown), vec!["00:05", "00:04"]);
        assert!(h.events.try_recv().is_err());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_countdown() -> Result<()> {
        let mut h = harness();
        let clock = SystemClock;
        let module = CountdownModule::new(
            DURATIONS,
            &mut h.display,
            h.event_tx.clone(),
            &mut h.command_rx,
            h.shutdown.clone(),
            &clock,
        );

        let shutdown = h.shutdown.clone();
        let commands = h.commands.clone();
        let driver = async move {
            commands.send("s".into()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(1500)).await;
            shutdown.cancel();
        };

        let (exit, _) = tokio::join!(module.run(), driver);
        assert_eq!(exit?, TimerExit::Quit);
        Ok(())
    }
}

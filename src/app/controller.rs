use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::{
    cycle::{display::TimerDisplay, state::PhaseDurations, CountdownModule, PhaseEvent, TimerExit},
    utils::clock::Clock,
};

use super::view::{Nav, View};

/// Owns the current view and the navigation loop. Entering the timer
/// screen constructs a fresh countdown module; leaving it discards the
/// module together with its cycle state.
pub struct AppController<D> {
    view: View,
    display: D,
    durations: PhaseDurations,
    commands: mpsc::Receiver<String>,
    events: mpsc::Sender<PhaseEvent>,
    shutdown: CancellationToken,
    clock: Box<dyn Clock>,
}

impl<D: TimerDisplay> AppController<D> {
    pub fn new(
        durations: PhaseDurations,
        display: D,
        commands: mpsc::Receiver<String>,
        events: mpsc::Sender<PhaseEvent>,
        shutdown: CancellationToken,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            view: View::Start,
            display,
            durations,
            commands,
            events,
            shutdown,
            clock,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            self.view.show(&mut std::io::stdout())?;
            match self.view {
                View::Timer => {
                    let module = CountdownModule::new(
                        self.durations,
                        &mut self.display,
                        self.events.clone(),
                        &mut self.commands,
                        self.shutdown.clone(),
                        self.clock.as_ref(),
                    );
                    match module.run().await {
                        Ok(TimerExit::Back) => self.view = View::Start,
                        Ok(TimerExit::Quit) => break,
                        Err(e) => {
                            // A countdown fault ends that cycle, the
                            // application itself stays up.
                            error!("Countdown loop stopped: {e:?}");
                            println!("timer stopped: {e}");
                            self.view = View::Start;
                        }
                    }
                }
                View::Start | View::Info => {
                    tokio::select! {
                        _ = self.shutdown.cancelled() => break,
                        line = self.commands.recv() => {
                            let Some(line) = line else { break };
                            match self.view.navigate(&line) {
                                Some(Nav::To(view)) => self.view = view,
                                Some(Nav::Quit) => break,
                                None => debug!("Ignoring unrecognized command {line:?}"),
                            }
                        }
                    }
                }
            }
        }

        // Quitting from a screen has to unblock the ctrl-c watcher.
        self.shutdown.cancel();
        Ok(())
    }
}

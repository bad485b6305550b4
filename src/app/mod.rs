//! Application wiring: the stdin control surface, the view controller,
//! and the session recorder, joined under one shutdown token.

use std::path::PathBuf;

use anyhow::Result;
use controller::AppController;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    cycle::{
        display::{TerminalDisplay, TimerDisplay},
        state::PhaseDurations,
        PhaseEvent,
    },
    session::{recorder::RecorderModule, store::SessionStoreImpl},
    utils::clock::{Clock, SystemClock},
};

pub mod controller;
pub mod input;
pub mod shutdown;
pub mod view;

/// Represents the starting point for the interactive timer.
pub async fn start_app(durations: PhaseDurations, data_dir: PathBuf) -> Result<()> {
    let (sender, receiver) = mpsc::channel::<PhaseEvent>(10);

    let shutdown_token = CancellationToken::new();
    let commands = input::spawn_command_reader();
    let display = TerminalDisplay::new(std::io::stdout(), true);

    let controller = create_controller(
        durations,
        display,
        commands,
        sender,
        &shutdown_token,
        SystemClock,
    );
    let recorder = create_recorder(data_dir.join("sessions"), receiver)?;

    let (_, controller_result, recorder_result) = tokio::join!(
        shutdown::watch_shutdown(shutdown_token),
        controller.run(),
        recorder.run(),
    );

    if let Err(controller_result) = controller_result {
        error!("Controller module got an error {:?}", controller_result);
    }

    if let Err(recorder_result) = recorder_result {
        error!("Recorder module got an error {:?}", recorder_result);
    }

    Ok(())
}

fn create_controller<D: TimerDisplay>(
    durations: PhaseDurations,
    display: D,
    commands: mpsc::Receiver<String>,
    events: mpsc::Sender<PhaseEvent>,
    shutdown_token: &CancellationToken,
    clock: impl Clock + 'static,
) -> AppController<D> {
    AppController::new(
        durations,
        display,
        commands,
        events,
        shutdown_token.clone(),
        Box::new(clock),
    )
}

fn create_recorder(
    session_dir: PathBuf,
    receiver: mpsc::Receiver<PhaseEvent>,
) -> Result<RecorderModule<SessionStoreImpl>> {
    let store = SessionStoreImpl::new(session_dir)?;
    Ok(RecorderModule::new(receiver, store))
}

use anyhow::Result;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, info};

use crate::cycle::PhaseEvent;

use super::{entities::PhaseRecordEntity, store::SessionStore};

/// Receives phase completions from the countdown loop and persists them.
/// A record that fails to write is logged and dropped, the timer keeps
/// running either way.
pub struct RecorderModule<S> {
    receiver: Receiver<PhaseEvent>,
    store: S,
}

impl<S: SessionStore> RecorderModule<S> {
    pub fn new(receiver: Receiver<PhaseEvent>, store: S) -> Self {
        Self { receiver, store }
    }

    pub async fn run(mut self) -> Result<()> {
        while let Some(event) = self.receiver.recv().await {
            debug!("Recording event {:?}", event);
            let record = PhaseRecordEntity {
                phase: event.completed,
                completed_at: event.completed_at,
                duration_seconds: event.duration_seconds,
            };
            match self.store.append(record.clone()).await {
                Ok(_) => {
                    info!("Recorded completed {} phase", record.phase.label())
                }
                Err(e) => {
                    error!("Error recording phase {:?}: {e:?}", record)
                }
            }
        }

        self.receiver.close();
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::state::Phase;

/// One completed phase as it is written to a session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecordEntity {
    pub phase: Phase,
    pub completed_at: DateTime<Utc>,
    pub duration_seconds: u32,
}

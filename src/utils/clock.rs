use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Represents an entity responsible for providing time to the countdown
/// loop. Keeping it behind a trait lets tests drive the loop under
/// tokio's paused time.
#[async_trait]
pub trait Clock: Sync + Send {
    /// Wall clock moment, used for timestamping session records.
    fn now(&self) -> DateTime<Utc>;

    /// Monotonic moment, used for anchoring tick deadlines.
    fn instant(&self) -> Instant;

    async fn sleep_until(&self, deadline: Instant);
}

pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}

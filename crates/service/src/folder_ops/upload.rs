use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_DONE: u8 = 100;

/// Shortest tick an upload will run with. Anything below is raised to it.
pub const MIN_UPLOAD_TICK: Duration = Duration::from_millis(1);

/// Drives a fake upload: progress climbs by a fixed step on every tick
///  and the upload completes on the first tick after it reads 100.
///  No bytes move anywhere.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedUpload {
    tick: Duration,
}

impl SimulatedUpload {
    pub fn new(tick: Duration) -> Self {
        if tick < MIN_UPLOAD_TICK {
            tracing::warn!(?tick, "upload tick below minimum, using {:?}", MIN_UPLOAD_TICK);
        }
        Self {
            tick: tick.max(MIN_UPLOAD_TICK),
        }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Ticks until the upload is done, publishing each step on `progress`.
    pub async fn run(&self, progress: &watch::Sender<u8>) {
        let mut interval = interval_at(Instant::now() + self.tick, self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut current = 0u8;
        progress.send_replace(current);

        loop {
            interval.tick().await;
            if current >= PROGRESS_DONE {
                break;
            }
            current = current.saturating_add(PROGRESS_STEP).min(PROGRESS_DONE);
            progress.send_replace(current);
            tracing::trace!(progress = current, "upload progress");
        }
    }
}

use std::time::Duration;

use csr_core::game::Tick;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior};

/// Reflex quiz countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Interval task emitting one tick per period.
///
/// The task lives exactly as long as this value: dropping it (the prompt
/// was answered, the view unmounted) aborts the task.
pub struct Countdown {
    ticks: mpsc::Receiver<()>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Starts ticking; the first tick arrives one `period` from now.
    #[must_use]
    pub fn start(period: Duration) -> Self {
        let (tx, ticks) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { ticks, task }
    }

    /// Waits for the next tick. `None` once the task is gone.
    pub async fn next_tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }

    /// Calls `on_tick` every period until it reports `Expired` or `Idle`,
    /// then stops the task.
    pub async fn drive(mut self, mut on_tick: impl FnMut() -> Tick) -> Tick {
        while self.next_tick().await.is_some() {
            match on_tick() {
                Tick::Running(_) => {}
                done => return done,
            }
        }
        Tick::Idle
    }

    #[must_use]
    pub fn abort_handle(&self) -> AbortHandle {
        self.task.abort_handle()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

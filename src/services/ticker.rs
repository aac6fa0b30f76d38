use log::debug;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::services::dispatch::Dispatcher;

/// Background driver that steps a dispatcher on a fixed cadence.
pub struct Ticker {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<u64>,
}

impl Ticker {
    /// Starts stepping right away; the first step happens immediately.
    pub fn spawn<D>(dispatcher: D, period: Duration) -> Ticker
    where
        D: Dispatcher,
    {
        let (shutdown, mut rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut ticks = 0u64;
            loop {
                tokio::select! {
                    _ = &mut rx => break,
                    _ = interval.tick() => {
                        dispatcher.step().await;
                        ticks += 1;
                    }
                }
            }
            debug!("ticker stopped after {ticks} ticks");
            ticks
        });
        Ticker { shutdown, handle }
    }

    /// Stops the driver and returns how many steps it ran.
    pub async fn stop(self) -> anyhow::Result<u64> {
        // The task may already be gone; joining reports why.
        let _ = self.shutdown.send(());
        Ok(self.handle.await?)
    }
}

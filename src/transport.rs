use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Settings;

/// Events a transport emits while moving one record. `Progress`
/// percentages are always below 100; reaching 100 arrives as `Complete`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Progress { percent: u8 },
    Complete,
    Error { reason: String },
}

/// Seam between the session manager and whatever moves the bytes. The
/// only implementation today fakes the transfer with timers; a real
/// network uploader slots in behind the same surface.
pub trait UploadTransport: Send + Sync + 'static {
    /// Begin a transfer. Events arrive on the returned channel until it
    /// closes; cancelling the token stops the transfer outright.
    fn start(&self, cancel: CancellationToken) -> mpsc::Receiver<TransportEvent>;
}

/// Timer-driven stand-in for an upload. Every tick adds a random slice
/// of progress until 100 is reached or the ceiling cuts the transfer
/// off. A cut-off transfer goes silent unless `stall_to_error` is set,
/// in which case it reports a terminal error instead.
pub struct SimulatedTransport {
    tick: Duration,
    max_increment: u8,
    ceiling: Duration,
    stall_to_error: bool,
    seed: Option<u64>,
}

impl SimulatedTransport {
    pub fn new(tick: Duration, max_increment: u8, ceiling: Duration, stall_to_error: bool) -> Self {
        Self {
            tick,
            max_increment: max_increment.clamp(1, 100),
            ceiling,
            stall_to_error,
            seed: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Duration::from_millis(settings.tick_ms),
            settings.max_increment,
            Duration::from_millis(settings.ceiling_ms),
            settings.stall_to_error,
        )
    }

    /// Fix the increment sequence. Every transfer started from a seeded
    /// transport replays the same progress curve.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl UploadTransport for SimulatedTransport {
    fn start(&self, cancel: CancellationToken) -> mpsc::Receiver<TransportEvent> {
        let (tx, rx) = mpsc::channel(16);
        let tick = self.tick;
        let max_increment = self.max_increment;
        let ceiling = self.ceiling;
        let stall_to_error = self.stall_to_error;
        let mut rng = self.rng();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick);
            // The first interval tick completes immediately; swallow it so
            // progress starts one full period after intake.
            ticker.tick().await;

            let deadline = tokio::time::sleep(ceiling);
            tokio::pin!(deadline);

            let mut percent: u8 = 0;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = &mut deadline => {
                        if stall_to_error {
                            let _ = tx
                                .send(TransportEvent::Error {
                                    reason: "transfer stalled before completion".to_string(),
                                })
                                .await;
                        }
                        break;
                    }
                    _ = ticker.tick() => {
                        let step = rng.gen_range(1..=max_increment);
                        percent = percent.saturating_add(step).min(100);
                        let event = if percent == 100 {
                            TransportEvent::Complete
                        } else {
                            TransportEvent::Progress { percent }
                        };
                        let done = event == TransportEvent::Complete;
                        if tx.send(event).await.is_err() || done {
                            break;
                        }
                    }
                }
            }
        });

        rx
    }
}

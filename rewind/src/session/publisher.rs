use std::sync::Arc;
use std::time::Duration;

use rewind_core::{ReplayEvent, StreamHandle};
use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tokio::time::Instant;

use super::control::ControlSignal;
use super::state::{SessionState, Tick};

/// Outcome of waiting between ticks.
enum Wake {
    /// Sleep elapsed or a control change asked for an early tick.
    Next,
    /// The stream must end.
    Exit,
}

/// Drives `SessionState::tick` and forwards the resulting events.
pub struct Publisher {
    state: Arc<Mutex<SessionState>>,
    control: watch::Receiver<ControlSignal>,
    generation: u64,
    interrupt: u64,
    tx: mpsc::Sender<ReplayEvent>,
    heartbeat_interval: Duration,
}

impl Publisher {
    /// Create a publisher owning stream generation `generation`.
    pub fn new(
        state: Arc<Mutex<SessionState>>,
        control: watch::Receiver<ControlSignal>,
        generation: u64,
        tx: mpsc::Sender<ReplayEvent>,
        heartbeat_interval: Duration,
    ) -> Self {
        let interrupt = control.borrow().interrupt;
        Self {
            state,
            control,
            generation,
            interrupt,
            tx,
            heartbeat_interval,
        }
    }

    /// Spawn the publishing loop on the current Tokio runtime.
    #[must_use]
    pub fn spawn(self) -> StreamHandle {
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let join = tokio::spawn(self.run(stop_rx));
        StreamHandle::new(join, stop_tx)
    }

    fn superseded(&self) -> bool {
        self.control.borrow().generation != self.generation
    }

    async fn run(mut self, mut stop_rx: oneshot::Receiver<()>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(generation = self.generation, "stream started");

        loop {
            if self.superseded() || self.tx.is_closed() {
                break;
            }

            let ticked = {
                let mut guard = self.state.lock().await;
                guard.tick().map(|t| (t, guard.speed()))
            };

            let (tick, speed) = match ticked {
                Ok(v) => v,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(error = %e, "stream fault");
                    self.state.lock().await.halt();
                    let _ = self
                        .emit(
                            ReplayEvent::Error {
                                message: e.to_string(),
                            },
                            &mut stop_rx,
                        )
                        .await;
                    break;
                }
            };

            let wait = match &tick {
                Tick::Heartbeat(_) => Some((self.heartbeat_interval, true)),
                Tick::Candle { .. } => Some((Duration::from_secs_f64(speed.max(0.0)), false)),
                Tick::Finished => None,
            };

            let mut open = true;
            for ev in tick.into_events() {
                if !self.emit(ev, &mut stop_rx).await {
                    open = false;
                    break;
                }
            }
            let Some((delay, any_change_wakes)) = wait.filter(|_| open) else {
                break;
            };

            if let Wake::Exit = self.wait(delay, any_change_wakes, &mut stop_rx).await {
                break;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(generation = self.generation, "stream ended");
    }

    /// Send one event, giving up if the stream is stopped or the consumer left.
    async fn emit(&self, ev: ReplayEvent, stop_rx: &mut oneshot::Receiver<()>) -> bool {
        tokio::select! {
            biased;
            _ = stop_rx => false,
            res = self.tx.send(ev) => res.is_ok(),
        }
    }

    /// Sleep up to `delay`, waking early on control changes.
    ///
    /// While heartbeating any change wakes the loop. While playing only a change of
    /// the interrupt counter does, so speed changes and redundant plays keep the
    /// current deadline without masking an earlier pause or seek.
    async fn wait(
        &mut self,
        delay: Duration,
        any_change_wakes: bool,
        stop_rx: &mut oneshot::Receiver<()>,
    ) -> Wake {
        let deadline = Instant::now() + delay;
        loop {
            tokio::select! {
                biased;
                _ = &mut *stop_rx => return Wake::Exit,
                () = self.tx.closed() => return Wake::Exit,
                changed = self.control.changed() => {
                    if changed.is_err() {
                        return Wake::Exit;
                    }
                    let signal = *self.control.borrow_and_update();
                    if signal.generation != self.generation {
                        return Wake::Exit;
                    }
                    let interrupted = signal.interrupt != self.interrupt;
                    self.interrupt = signal.interrupt;
                    if any_change_wakes || interrupted {
                        return Wake::Next;
                    }
                }
                () = tokio::time::sleep_until(deadline) => return Wake::Next,
            }
        }
    }
}

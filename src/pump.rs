use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use stopwatch_core::{TickSource, DEFAULT_TICK_PERIOD};

enum PumpOp {
    Start { period: Duration, generation: u64 },
    Stop,
    Quit,
}

/// Repeating tick thread, started and stopped over a control channel.
pub struct Pump {
    ctl: Sender<PumpOp>,
    handle: Option<JoinHandle<()>>,
}

impl Pump {
    /// Spawns the pump thread. `on_tick` receives the generation of the
    /// activation that fired; returning `false` shuts the thread down.
    pub fn spawn<F>(on_tick: F) -> anyhow::Result<Self>
    where
        F: FnMut(u64) -> bool + Send + 'static,
    {
        let (ctl, ctl_rx) = mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("pump".to_owned())
            .spawn(move || pump_thread(ctl_rx, on_tick))
            .context("can't spawn pump thread")?;
        Ok(Self {
            ctl,
            handle: Some(handle),
        })
    }

    fn send(&self, op: PumpOp) {
        if self.ctl.send(op).is_err() {
            log::error!("pump thread is gone");
        }
    }
}

impl TickSource for Pump {
    fn begin(&mut self, period: Duration, generation: u64) {
        self.send(PumpOp::Start { period, generation });
    }

    fn cancel(&mut self) {
        self.send(PumpOp::Stop);
    }
}

impl Drop for Pump {
    fn drop(&mut self) {
        self.ctl.send(PumpOp::Quit).ok();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("pump thread panicked");
            }
        }
    }
}

struct Activation {
    period: Duration,
    generation: u64,
    next: Instant,
}

fn pump_thread<F>(ctl: Receiver<PumpOp>, mut on_tick: F)
where
    F: FnMut(u64) -> bool,
{
    let mut active: Option<Activation> = None;

    loop {
        // Block-wait when stopped, wait until the next deadline when running
        let op = match active.as_mut() {
            Some(run) => {
                let wait = run.next.saturating_duration_since(Instant::now());
                match ctl.recv_timeout(wait) {
                    Ok(op) => op,
                    Err(RecvTimeoutError::Timeout) => {
                        if !on_tick(run.generation) {
                            log::debug!("tick receiver closed, pump exiting");
                            break;
                        }
                        let now = Instant::now();
                        run.next += run.period;
                        if run.next < now {
                            // Fell behind; skip the missed ticks instead of bursting.
                            run.next = now + run.period;
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match ctl.recv() {
                Ok(op) => op,
                Err(_) => break,
            },
        };

        match op {
            PumpOp::Start { period, generation } => {
                let period = if period.is_zero() {
                    DEFAULT_TICK_PERIOD
                } else {
                    period
                };
                log::trace!("pump start: every {:?}, generation {}", period, generation);
                active = Some(Activation {
                    period,
                    generation,
                    next: Instant::now() + period,
                });
            }
            PumpOp::Stop => {
                log::trace!("pump stop");
                active = None;
            }
            PumpOp::Quit => break,
        }
    }
}

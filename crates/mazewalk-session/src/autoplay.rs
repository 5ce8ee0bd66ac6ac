//! Background auto-play.
//!
//! [`AutoPlay`] shares a [`Session`] with a worker thread that walks the
//! computed path one step per tick. Every control operation stops and joins
//! the worker before touching the session, so a step never overlaps a map
//! swap or a path recomputation.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use mazewalk_core::{Context, Position};

use crate::session::{Session, SessionError, StepOutcome};

/// Sent by the worker after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub position: Position,
    pub outcome: StepOutcome,
    pub health: i32,
    /// Path cells still to walk.
    pub remaining: usize,
}

impl StepReport {
    /// Whether the worker stops after this step: the game ended, the step
    /// was refused, or the path ran out.
    pub fn is_last(&self) -> bool {
        self.outcome.is_final() || self.outcome == StepOutcome::Blocked || self.remaining == 0
    }
}

struct Worker {
    ctx: Context,
    // Dropping this wakes the worker out of its tick wait.
    wake: Sender<()>,
    handle: JoinHandle<()>,
}

/// Drives a shared [`Session`] along its path on a background thread.
pub struct AutoPlay {
    session: Arc<Mutex<Session>>,
    reports: Option<Sender<StepReport>>,
    worker: Option<Worker>,
}

impl AutoPlay {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            reports: None,
            worker: None,
        }
    }

    /// Publish a [`StepReport`] on `tx` after every automatic step.
    pub fn with_reports(mut self, tx: Sender<StepReport>) -> Self {
        self.reports = Some(tx);
        self
    }

    /// Lock the session, e.g. to render it between steps.
    pub fn lock(&self) -> Result<MutexGuard<'_, Session>, SessionError> {
        self.session.lock().map_err(|_| SessionError::Poisoned)
    }

    /// Whether a worker is currently walking.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    /// Compute a path from the player's position and start walking it.
    /// Returns `false` if there is no path to the exit.
    pub fn start(&mut self) -> Result<bool, SessionError> {
        self.stop();
        let delay = {
            let mut session = self.lock()?;
            if !session.calculate_path() {
                return Ok(false);
            }
            session.config().auto_move_delay
        };

        let ctx = Context::new();
        let (wake, wait) = mpsc::channel();
        let session = Arc::clone(&self.session);
        let reports = self.reports.clone();
        let worker_ctx = ctx.clone();
        let handle = thread::spawn(move || run(session, worker_ctx, wait, delay, reports));
        self.worker = Some(Worker { ctx, wake, handle });
        log::info!("auto-play started, {delay:?} per step");
        Ok(true)
    }

    /// Cancel the worker and wait for it to exit. Does nothing if idle.
    pub fn stop(&mut self) {
        let Some(Worker { ctx, wake, handle }) = self.worker.take() else {
            return;
        };
        ctx.cancel();
        drop(wake);
        if handle.join().is_err() {
            log::error!("auto-play worker panicked");
        }
    }

    /// Block until the worker finishes on its own (path walked or game
    /// over).
    pub fn wait(&mut self) {
        if let Some(Worker { wake, handle, .. }) = self.worker.take() {
            if handle.join().is_err() {
                log::error!("auto-play worker panicked");
            }
            drop(wake);
        }
    }

    pub fn select_map(&mut self, index: usize) -> Result<(), SessionError> {
        self.stop();
        self.lock()?.select_map(index)
    }

    pub fn toggle_fog(&mut self) -> Result<bool, SessionError> {
        self.stop();
        self.lock()?.toggle_fog()
    }

    /// Stop walking and restart the current map.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.stop();
        self.lock()?.start()
    }
}

impl Drop for AutoPlay {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    session: Arc<Mutex<Session>>,
    ctx: Context,
    wait: Receiver<()>,
    delay: Duration,
    reports: Option<Sender<StepReport>>,
) {
    while !ctx.is_done() {
        let report = {
            let Ok(mut session) = session.lock() else {
                log::error!("session lock poisoned, auto-play exiting");
                return;
            };
            let Some(outcome) = session.auto_step() else {
                break;
            };
            StepReport {
                position: session.player().position(),
                outcome,
                health: session.player().health(),
                remaining: session.remaining_path().len(),
            }
        };
        log::trace!("auto-step {:?} at {}", report.outcome, report.position);
        if let Some(tx) = &reports {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(report);
        }
        if report.is_last() {
            break;
        }
        match wait.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    log::info!("auto-play finished");
}

//! Debounced, single-flight scheduling of changelist refreshes.
//!
//! [`RefreshCoordinator`] wraps one parameterless async refresh operation. Any
//! number of callers may ask for a refresh from any thread; the coordinator
//! guarantees the operation never runs concurrently with itself and that a burst
//! of requests collapses into as few runs as possible:
//!
//! - [`RefreshCoordinator::trigger`] restarts a quiet-window timer; one run fires
//!   when the window elapses without another trigger.
//! - [`RefreshCoordinator::request_now`] skips the window and resolves once a run
//!   that started after the call has finished.
//! - Requests arriving while a run is executing fold into exactly one follow-up run.
//!
//! Runs execute on spawned tasks, so dropping a `request_now` future or disposing
//! the coordinator never interrupts a refresh that has already started.

use crate::core::error::{ChangelistError, Result};
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

type RefreshFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;
type RefreshFn = Box<dyn Fn() -> RefreshFuture + Send + Sync>;

/// Outcome of one run as reported to waiters; errors travel as their message
type RunOutcome = std::result::Result<(), String>;

#[derive(Default)]
struct FlushState {
    pending: bool,
    running: bool,
    disposed: bool,
    /// Number of the most recently started run; runs are numbered from 1
    started: u64,
    /// Number of the most recently finished run
    completed: u64,
    /// `request_now` callers with the run number they wait for
    waiters: Vec<(u64, oneshot::Sender<RunOutcome>)>,
    timer: Option<JoinHandle<()>>,
    /// Bumped whenever the debounce timer is replaced or cancelled
    timer_seq: u64,
}

struct Inner {
    refresh: RefreshFn,
    debounce: Duration,
    handle: Handle,
    state: Mutex<FlushState>,
}

impl Inner {
    /// Mark a refresh as owed; returns true if the caller must start the run loop
    fn mark_pending(state: &mut FlushState) -> bool {
        state.pending = true;
        if state.running {
            return false;
        }
        state.running = true;
        true
    }

    fn start_loop(self: &Arc<Self>) {
        self.handle.spawn(Inner::run_loop(self.clone()));
    }

    fn flush(self: &Arc<Self>) {
        let start = {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            Inner::mark_pending(&mut state)
        };
        if start {
            self.start_loop();
        }
    }

    async fn run_loop(inner: Arc<Inner>) {
        loop {
            let run = {
                let mut state = inner.state.lock();
                if !state.pending || state.disposed {
                    state.running = false;
                    // Anyone still waiting was cut off by dispose; dropping the
                    // sender tells them so.
                    state.waiters.clear();
                    break;
                }
                state.pending = false;
                state.started += 1;
                state.started
            };

            let outcome = inner.run_once().await;

            let finished = {
                let mut state = inner.state.lock();
                state.completed = run;
                let (finished, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut state.waiters)
                    .into_iter()
                    .partition(|(target, _)| *target <= run);
                state.waiters = waiting;
                finished
            };
            for (_, waiter) in finished {
                let _ = waiter.send(outcome.clone());
            }
        }
    }

    /// Execute the refresh on its own task so a panic ends only this run
    async fn run_once(self: &Arc<Self>) -> RunOutcome {
        let inner = self.clone();
        match self.handle.spawn(async move { (inner.refresh)().await }).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                log::warn!("Changelist refresh failed: {e}");
                Err(e.to_string())
            }
            Err(e) => {
                log::error!("Changelist refresh panicked: {e}");
                Err(format!("refresh panicked: {e}"))
            }
        }
    }
}

#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<Inner>,
}

impl RefreshCoordinator {
    /// Build a coordinator on the current Tokio runtime.
    pub fn new<F, Fut>(debounce: Duration, refresh: F) -> Result<Self>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| ChangelistError::RuntimeUnavailable)?;
        Ok(Self::with_handle(handle, debounce, refresh))
    }

    /// Build a coordinator that schedules onto an explicit runtime handle.
    pub fn with_handle<F, Fut>(handle: Handle, debounce: Duration, refresh: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let refresh: RefreshFn = Box::new(move || -> RefreshFuture { Box::pin(refresh()) });
        Self {
            inner: Arc::new(Inner {
                refresh,
                debounce,
                handle,
                state: Mutex::new(FlushState::default()),
            }),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.inner.debounce
    }

    /// Schedule a refresh once the quiet window passes without another trigger.
    ///
    /// Never blocks and may be called from any thread.
    pub fn trigger(&self) {
        let mut state = self.inner.state.lock();
        if state.disposed {
            return;
        }
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.timer_seq += 1;
        let seq = state.timer_seq;

        let inner = self.inner.clone();
        state.timer = Some(self.inner.handle.spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            {
                let mut state = inner.state.lock();
                if state.timer_seq != seq {
                    return;
                }
                state.timer = None;
            }
            inner.flush();
        }));
    }

    /// Refresh without waiting for the quiet window.
    ///
    /// Resolves after the first refresh that started after this call has
    /// finished, with that run's outcome. A debounce timer still pending is
    /// absorbed into it. Fails if that run failed or panicked, or if the
    /// coordinator is disposed before the run starts.
    pub async fn request_now(&self) -> Result<()> {
        let (receiver, start) = {
            let mut state = self.inner.state.lock();
            if state.disposed {
                return Err(ChangelistError::CoordinatorDisposed);
            }
            if let Some(timer) = state.timer.take() {
                timer.abort();
                state.timer_seq += 1;
            }
            let (sender, receiver) = oneshot::channel();
            let target = state.started + 1;
            state.waiters.push((target, sender));
            (receiver, Inner::mark_pending(&mut state))
        };
        if start {
            self.inner.start_loop();
        }

        match receiver.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => Err(ChangelistError::refresh_failed(message)),
            Err(_) => Err(ChangelistError::CoordinatorDisposed),
        }
    }

    /// Cancel any pending timer and refuse new work; an in-flight run completes.
    pub fn dispose(&self) {
        let mut state = self.inner.state.lock();
        state.disposed = true;
        state.pending = false;
        state.timer_seq += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        if !state.running {
            state.waiters.clear();
        }
        drop(state);
        log::debug!("Refresh coordinator disposed");
    }

    pub fn is_running(&self) -> bool {
        self.inner.state.lock().running
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.lock().disposed
    }

    /// Number of refresh runs that have finished, successfully or not
    pub fn completed_runs(&self) -> u64 {
        self.inner.state.lock().completed
    }
}

// playback.rs - Periodic stepping

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub type TimerCallback = Box<dyn FnMut() + Send + 'static>;

/// Recurring timer. Only [`Playback`] schedules on it, and it never holds
/// more than one live handle.
pub trait Timer {
    type Handle;

    /// Call `callback` every `interval`, the first time one full interval
    /// from now.
    fn schedule(&mut self, callback: TimerCallback, interval: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

/// [`Timer`] backed by tasks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Timer for TokioTimer {
    type Handle = JoinHandle<()>;

    fn schedule(&mut self, mut callback: TimerCallback, interval: Duration) -> Self::Handle {
        self.runtime.spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        })
    }

    fn cancel(&mut self, handle: Self::Handle) {
        handle.abort();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Running,
}

/// Identifies one RUNNING period. Ticks carrying an older token belong to a
/// cancelled run and must be dropped.
pub type RunToken = u64;

struct LiveRun<H> {
    token: RunToken,
    handle: H,
}

/// STOPPED/RUNNING state machine driving a [`Timer`].
pub struct Playback<T: Timer> {
    timer: T,
    interval: Duration,
    next_token: RunToken,
    live: Option<LiveRun<T::Handle>>,
}

impl<T: Timer> Playback<T> {
    pub fn new(timer: T, interval: Duration) -> Self {
        Self {
            timer,
            interval,
            next_token: 0,
            live: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        if self.live.is_some() {
            PlaybackState::Running
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == PlaybackState::Running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a tick from run `token` should still be applied.
    pub fn is_current(&self, token: RunToken) -> bool {
        self.live.as_ref().is_some_and(|run| run.token == token)
    }

    /// Start ticking. `on_tick` receives the token of this run. No-op when
    /// already running.
    pub fn start(&mut self, mut on_tick: impl FnMut(RunToken) + Send + 'static) {
        if self.live.is_some() {
            return;
        }
        self.next_token += 1;
        let token = self.next_token;
        let handle = self
            .timer
            .schedule(Box::new(move || on_tick(token)), self.interval);
        self.live = Some(LiveRun { token, handle });
        tracing::info!(token, interval_ms = self.interval.as_millis() as u64, "playback started");
    }

    /// Cancel the pending timer, if any.
    pub fn stop(&mut self) {
        if let Some(run) = self.live.take() {
            self.timer.cancel(run.handle);
            tracing::info!(token = run.token, "playback stopped");
        }
    }

    pub fn toggle(&mut self, on_tick: impl FnMut(RunToken) + Send + 'static) -> PlaybackState {
        match self.state() {
            PlaybackState::Running => self.stop(),
            PlaybackState::Stopped => self.start(on_tick),
        }
        self.state()
    }
}

impl<T: Timer> Drop for Playback<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

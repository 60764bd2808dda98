// session.rs - One editing session: the board and everything that may change it
//
// The session is owned by a single thread. Work that completes elsewhere
// (timer ticks, snapshot store calls) is sent back as a `SessionEvent` on
// one channel and applied by `Session::pump` or `Session::next_event`,
// so every board transition runs to completion before the next one starts.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::config::Config;
use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;
use crate::interaction::{InteractionController, Modifiers, ScreenPos};
use crate::patterns::{self, Pattern};
use crate::playback::{Playback, PlaybackState, RunToken, Timer};
use crate::render::{Reconciler, Surface};
use crate::rules;
use crate::snapshot::{SaveEntry, SaveList, SnapshotGateway, SnapshotStore};

/// Completion delivered back to the session thread
#[derive(Debug)]
pub enum SessionEvent {
    Tick(RunToken),
    SavesListed(LifeResult<Vec<String>>),
    Saved(LifeResult<String>),
    Loaded { id: String, result: LifeResult<Grid> },
}

pub type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
struct EventSender {
    tx: UnboundedSender<SessionEvent>,
    waker: Option<Waker>,
}

impl EventSender {
    fn send(&self, event: SessionEvent) {
        // the receiver only goes away with the session itself
        if self.tx.send(event).is_ok() {
            if let Some(wake) = &self.waker {
                wake();
            }
        }
    }
}

pub struct Session<S: SnapshotStore, T: Timer> {
    grid: Grid,
    generation: u64,
    interaction: InteractionController,
    reconciler: Reconciler,
    playback: Playback<T>,
    gateway: Arc<SnapshotGateway<S>>,
    runtime: Handle,
    saves: SaveList,
    selected: Option<usize>,
    notice: Option<String>,
    events: EventSender,
    rx: UnboundedReceiver<SessionEvent>,
}

impl<S: SnapshotStore, T: Timer> Session<S, T> {
    /// Start a session with an all-dead board and begin fetching the save
    /// list in the background.
    pub fn open(config: &Config, store: S, timer: T, runtime: Handle) -> LifeResult<Self> {
        Self::open_with_waker(config, store, timer, runtime, None)
    }

    /// Like [`Session::open`]; `waker` is called whenever an event is queued.
    pub fn open_with_waker(
        config: &Config,
        store: S,
        timer: T,
        runtime: Handle,
        waker: Option<Waker>,
    ) -> LifeResult<Self> {
        config.validate()?;
        let (tx, rx) = unbounded_channel();
        let mut session = Self {
            grid: Grid::new(config.width, config.height),
            generation: 0,
            interaction: InteractionController::new(config.cell_size),
            reconciler: Reconciler::new(config.cell_size),
            playback: Playback::new(timer, config.tick_interval()),
            gateway: Arc::new(SnapshotGateway::open(store)),
            runtime,
            saves: SaveList::default(),
            selected: None,
            notice: None,
            events: EventSender { tx, waker },
            rx,
        };
        tracing::info!(
            width = config.width,
            height = config.height,
            interval_ms = config.tick_interval().as_millis() as u64,
            "session opened"
        );
        session.refresh_saves();
        Ok(session)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn saves(&self) -> &[SaveEntry] {
        self.saves.entries()
    }

    pub fn selected_save(&self) -> Option<&SaveEntry> {
        self.selected.and_then(|i| self.saves.get(i))
    }

    /// Last message meant for the user, e.g. a failed load.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn replace_grid(&mut self, grid: Grid) {
        debug_assert_eq!(grid.dimensions(), self.grid.dimensions());
        self.grid = grid;
    }

    fn report(&mut self, action: &str, err: &LifeError) {
        tracing::warn!(action, error = %err, "operation failed");
        self.notice = Some(format!("{action} failed: {err}"));
    }

    // --- playback ---

    pub fn toggle_playback(&mut self) -> PlaybackState {
        let events = self.events.clone();
        self.playback
            .toggle(move |token| events.send(SessionEvent::Tick(token)))
    }

    pub fn stop_playback(&mut self) {
        self.playback.stop();
    }

    /// Advance one generation by hand.
    pub fn step_once(&mut self) {
        let next = rules::step(&self.grid);
        self.replace_grid(next);
        self.generation += 1;
        tracing::debug!(generation = self.generation, alive = self.grid.alive_count(), "step");
    }

    // --- board edits ---

    /// Kill every cell. Playback keeps running if it was.
    pub fn clear(&mut self) {
        self.replace_grid(self.grid.clear());
        self.generation = 0;
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        self.playback.stop();
        self.replace_grid(pattern.place(&self.grid));
        self.generation = 0;
        tracing::info!(pattern = pattern.name, "applied pattern");
    }

    pub fn randomize(&mut self, seed: u64) {
        self.playback.stop();
        self.replace_grid(patterns::random_fill(&self.grid, seed));
        self.generation = 0;
    }

    /// Returns whether the board changed.
    pub fn click(&mut self, screen: ScreenPos, modifiers: Modifiers) -> bool {
        match self.interaction.handle_primary_click(&self.grid, screen, modifiers) {
            Some(next) => {
                self.replace_grid(next);
                true
            }
            None => false,
        }
    }

    pub fn pointer_down(&mut self) {
        self.interaction.pointer_down();
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    /// Returns whether the board changed.
    pub fn pointer_move(&mut self, screen: ScreenPos, modifiers: Modifiers) -> bool {
        match self.interaction.handle_pointer_move(&self.grid, screen, modifiers) {
            Some(next) => {
                self.replace_grid(next);
                true
            }
            None => false,
        }
    }

    pub fn repaint(&self, surface: &mut impl Surface) {
        self.reconciler.repaint(&self.grid, surface);
    }

    // --- snapshots ---

    /// Re-fetch the list of saves. The current list stays until the answer
    /// arrives.
    pub fn refresh_saves(&mut self) {
        let gateway = self.gateway.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            events.send(SessionEvent::SavesListed(gateway.list_saves().await));
        });
    }

    /// Store the current board.
    pub fn save(&mut self) {
        let gateway = self.gateway.clone();
        let events = self.events.clone();
        let grid = self.grid.clone();
        self.runtime.spawn(async move {
            events.send(SessionEvent::Saved(gateway.save(&grid).await));
        });
    }

    pub fn select_save(&mut self, index: usize) {
        if index < self.saves.len() {
            self.selected = Some(index);
        }
    }

    pub fn load_selected(&mut self) {
        match self.selected_save() {
            Some(entry) => {
                let id = entry.id.clone();
                self.load(id);
            }
            None => self.notice = Some("no save selected".to_string()),
        }
    }

    pub fn load(&mut self, id: String) {
        let gateway = self.gateway.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let result = gateway.load(&id).await;
            events.send(SessionEvent::Loaded { id, result });
        });
    }

    // --- event application ---

    /// Apply every queued event without blocking. Returns how many were
    /// applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next event and apply it.
    pub async fn next_event(&mut self) {
        if let Some(event) = self.rx.recv().await {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Tick(token) => {
                if self.playback.is_current(token) {
                    self.step_once();
                } else {
                    tracing::debug!(token, "dropping tick from cancelled run");
                }
            }
            SessionEvent::SavesListed(Ok(ids)) => {
                let selected_id = self.selected_save().map(|e| e.id.clone());
                self.saves.merge_listing(ids);
                self.selected = selected_id.and_then(|id| self.saves.position(&id));
                tracing::info!(count = self.saves.len(), "save list loaded");
            }
            SessionEvent::SavesListed(Err(err)) => {
                tracing::warn!(error = %err, "could not fetch save list");
            }
            SessionEvent::Saved(Ok(id)) => {
                let label = self.saves.push(id).label.clone();
                self.notice = Some(format!("saved as {label}"));
            }
            SessionEvent::Saved(Err(err)) => self.report("save", &err),
            SessionEvent::Loaded { id, result } => {
                let result = result.and_then(|grid| {
                    if grid.dimensions() == self.grid.dimensions() {
                        Ok(grid)
                    } else {
                        Err(LifeError::DimensionMismatch {
                            expected: self.grid.dimensions(),
                            found: grid.dimensions(),
                        })
                    }
                });
                match result {
                    Ok(grid) => {
                        self.replace_grid(grid);
                        self.generation = 0;
                        self.notice = None;
                    }
                    Err(err) => self.report(&format!("load of {id}"), &err),
                }
            }
        }
    }

    /// Stop playback and close the gateway. Store calls still in flight
    /// finish on their own; their results are discarded.
    pub fn close(&mut self) {
        if self.gateway.is_closed() {
            return;
        }
        self.playback.stop();
        self.gateway.close();
        self.rx.close();
        tracing::info!(generation = self.generation, "session closed");
    }
}

impl<S: SnapshotStore, T: Timer> Drop for Session<S, T> {
    fn drop(&mut self) {
        self.close();
    }
}

// lib.rs - Conway's Game of Life on a bounded, hand-editable board
//
// The board does not wrap at its edges. Drawing, timing and snapshot storage
// are reached through the `Surface`, `Timer` and `SnapshotStore` traits so
// the front end decides how they are provided.

pub mod config;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod patterns;
pub mod playback;
pub mod render;
pub mod rules;
pub mod session;
pub mod snapshot;

pub use config::Config;
pub use error::{LifeError, LifeResult};
pub use grid::{CellState, Grid, Position};
pub use interaction::{InteractionController, Modifiers, ScreenPos};
pub use playback::{Playback, PlaybackState, Timer, TimerCallback, TokioTimer};
pub use render::{Reconciler, Surface};
pub use rules::{alive_neighbor_count, step};
pub use session::{Session, SessionEvent};
pub use snapshot::{FileStore, MemoryStore, SaveEntry, SaveList, SnapshotGateway, SnapshotStore};

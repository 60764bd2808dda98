// interaction.rs - Pointer and keyboard input turned into cell edits

use crate::grid::{CellState, Grid, Position};

/// Surface-local pointer coordinates in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Modifier keys that matter to the board.
///
/// `paint` (Ctrl) turns pointer drags into paint strokes and suppresses the
/// click toggle; `erase` (Shift) makes the stroke write dead cells instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub paint: bool,
    pub erase: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { paint: false, erase: false };
    pub const PAINT: Modifiers = Modifiers { paint: true, erase: false };
    pub const ERASE: Modifiers = Modifiers { paint: true, erase: true };
}

/// Maps input events on the drawing surface to single-cell edits.
///
/// Methods return `Some(grid)` when an edit happened and `None` when the
/// event was ignored; the caller owns the current grid.
#[derive(Debug, Clone)]
pub struct InteractionController {
    cell_size: f32,
    pointer_down: bool,
}

impl InteractionController {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            pointer_down: false,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell under `screen`, or `None` when it lies outside the board.
    pub fn screen_to_grid(&self, grid: &Grid, screen: ScreenPos) -> Option<Position> {
        let gx = (screen.x / self.cell_size).floor();
        let gy = (screen.y / self.cell_size).floor();
        if !(gx.is_finite() && gy.is_finite()) || gx < 0.0 || gy < 0.0 {
            return None;
        }
        let pos = Position::new(gx as usize, gy as usize);
        grid.contains(pos).then_some(pos)
    }

    /// Toggle the clicked cell unless the paint modifier is held.
    pub fn handle_primary_click(&self, grid: &Grid, screen: ScreenPos, modifiers: Modifiers) -> Option<Grid> {
        if modifiers.paint {
            return None;
        }
        let pos = self.screen_to_grid(grid, screen)?;
        let current = grid.get(pos).ok()?;
        tracing::debug!(x = pos.x, y = pos.y, to = ?current.toggled(), "toggle cell");
        grid.with_cell(pos, current.toggled()).ok()
    }

    /// Paint or erase the cell under the pointer during a stroke.
    pub fn handle_pointer_move(&self, grid: &Grid, screen: ScreenPos, modifiers: Modifiers) -> Option<Grid> {
        if !self.pointer_down || !modifiers.paint {
            return None;
        }
        let pos = self.screen_to_grid(grid, screen)?;
        let target = if modifiers.erase { CellState::Dead } else { CellState::Alive };
        if grid.get(pos).ok()? == target {
            return None;
        }
        tracing::debug!(x = pos.x, y = pos.y, to = ?target, "paint cell");
        grid.with_cell(pos, target).ok()
    }

    pub fn pointer_down(&mut self) {
        self.pointer_down = true;
    }

    pub fn pointer_up(&mut self) {
        self.pointer_down = false;
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }
}

// grid.rs - Grid types for Conway's Game of Life

use crate::error::{LifeError, LifeResult};

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

/// A cell address, `x` along a row and `y` down the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

pub type TRow = Vec<CellState>;

/// Fixed-size board. Every edit returns a new grid; the receiver is never
/// modified, so a generation handed out earlier stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<TRow>,
}

impl Grid {
    /// All-dead grid of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![CellState::Dead; width]; height],
        }
    }

    /// Build a grid from rows, checking that they form a non-empty rectangle.
    pub fn from_rows(rows: Vec<TRow>) -> LifeResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LifeError::DimensionMismatch {
                expected: (1, 1),
                found: (width, height),
            });
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            return Err(LifeError::DimensionMismatch {
                expected: (width, height),
                found: (bad.len(), height),
            });
        }
        Ok(Self { width, height, rows })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn check(&self, pos: Position) -> LifeResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            tracing::error!(x = pos.x, y = pos.y, "grid access out of bounds");
            Err(LifeError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, pos: Position) -> LifeResult<CellState> {
        self.check(pos)?;
        Ok(self.rows[pos.y][pos.x])
    }

    /// Copy of this grid with one cell replaced.
    pub fn with_cell(&self, pos: Position, state: CellState) -> LifeResult<Grid> {
        self.check(pos)?;
        let mut next = self.clone();
        next.rows[pos.y][pos.x] = state;
        Ok(next)
    }

    /// All-dead grid with the same dimensions.
    pub fn clear(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub fn rows(&self) -> &[TRow] {
        &self.rows
    }

    /// Cell states alongside their positions, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &state)| (Position::new(x, y), state))
        })
    }

    /// New grid of the same size where each cell is `f(position, old state)`.
    pub fn map(&self, mut f: impl FnMut(Position, CellState) -> CellState) -> Grid {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, &state)| f(Position::new(x, y), state))
                    .collect()
            })
            .collect();
        Grid {
            width: self.width,
            height: self.height,
            rows,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|c| c.is_alive()).count())
            .sum()
    }

    /// Build a grid of the given size with `alive` set to `Alive`; positions
    /// outside the board are dropped.
    pub fn with_alive(width: usize, height: usize, alive: impl IntoIterator<Item = Position>) -> Grid {
        let mut grid = Grid::new(width, height);
        for pos in alive {
            if grid.contains(pos) {
                grid.rows[pos.y][pos.x] = CellState::Alive;
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(40, 18);
        assert_eq!(grid.dimensions(), (40, 18));
        assert_eq!(grid.rows().len(), 18);
        assert!(grid.rows().iter().all(|row| row.len() == 40));
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn with_cell_leaves_receiver_untouched() {
        let before = Grid::new(3, 3);
        let after = before.with_cell(Position::new(1, 2), CellState::Alive).unwrap();
        assert_eq!(before.get(Position::new(1, 2)).unwrap(), CellState::Dead);
        assert_eq!(after.get(Position::new(1, 2)).unwrap(), CellState::Alive);
        assert_eq!(after.alive_count(), 1);
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let grid = Grid::new(4, 2);
        assert_eq!(
            grid.get(Position::new(4, 0)),
            Err(LifeError::OutOfBounds { x: 4, y: 0, width: 4, height: 2 })
        );
        assert!(grid.with_cell(Position::new(0, 2), CellState::Alive).is_err());
    }

    #[test]
    fn clear_keeps_dimensions() {
        let grid = Grid::with_alive(5, 4, [Position::new(0, 0), Position::new(4, 3)]);
        let cleared = grid.clear();
        assert_eq!(cleared.dimensions(), (5, 4));
        assert_eq!(cleared.alive_count(), 0);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![CellState::Dead; 3], vec![CellState::Dead; 2]];
        assert!(matches!(
            Grid::from_rows(rows),
            Err(LifeError::DimensionMismatch { .. })
        ));
        assert!(Grid::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn cells_are_row_major() {
        let grid = Grid::with_alive(2, 2, [Position::new(1, 0)]);
        let all: Vec<_> = grid.cells().collect();
        assert_eq!(
            all,
            vec![
                (Position::new(0, 0), CellState::Dead),
                (Position::new(1, 0), CellState::Alive),
                (Position::new(0, 1), CellState::Dead),
                (Position::new(1, 1), CellState::Dead)
            ]
        );
    }

    #[test]
    fn toggled_flips_state() {
        assert_eq!(CellState::Dead.toggled(), CellState::Alive);
        assert_eq!(CellState::Alive.toggled(), CellState::Dead);
        assert_eq!(CellState::from(true), CellState::Alive);
    }
}

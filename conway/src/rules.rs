// rules.rs - Neighbor counting and the B3/S23 transition
//
// The board does not wrap: neighbor slots that fall off an edge are simply
// missing, so a corner cell has 3 neighbors and an edge cell has 5.

use crate::error::LifeResult;
use crate::grid::{CellState, Grid, Position};

/// Positions in the 3x3 block around `pos`, clamped to the board, without
/// `pos` itself.
pub fn neighborhood(grid: &Grid, pos: Position) -> impl Iterator<Item = Position> + use<> {
    let start_x = pos.x.saturating_sub(1);
    let stop_x = (pos.x + 1).min(grid.width().saturating_sub(1));
    let start_y = pos.y.saturating_sub(1);
    let stop_y = (pos.y + 1).min(grid.height().saturating_sub(1));

    (start_y..=stop_y)
        .flat_map(move |y| (start_x..=stop_x).map(move |x| Position::new(x, y)))
        .filter(move |&p| p != pos)
}

/// Number of live cells in the clamped neighborhood of `pos`, in `0..=8`.
pub fn alive_neighbor_count(grid: &Grid, pos: Position) -> LifeResult<u8> {
    grid.get(pos)?;
    Ok(count_unchecked(grid, pos))
}

fn count_unchecked(grid: &Grid, pos: Position) -> u8 {
    let rows = grid.rows();
    neighborhood(grid, pos)
        .filter(|p| rows[p.y][p.x].is_alive())
        .count() as u8
}

/// Conway's rule for one cell given its live neighbor count.
pub fn next_state(current: CellState, neighbors: u8) -> CellState {
    match (current, neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
        (CellState::Dead, 3) => CellState::Alive,                          // Birth
        _ => CellState::Dead,                                              // Death or stays dead
    }
}

/// Next generation. Every count is taken from `grid`, never from the
/// partially built result.
pub fn step(grid: &Grid) -> Grid {
    grid.map(|pos, cell| next_state(cell, count_unchecked(grid, pos)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(cells: &[(usize, usize)]) -> Vec<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn neighborhood_is_clamped_at_edges() {
        let grid = Grid::new(5, 4);
        assert_eq!(neighborhood(&grid, Position::new(0, 0)).count(), 3);
        assert_eq!(neighborhood(&grid, Position::new(4, 3)).count(), 3);
        assert_eq!(neighborhood(&grid, Position::new(2, 0)).count(), 5);
        assert_eq!(neighborhood(&grid, Position::new(0, 2)).count(), 5);
        assert_eq!(neighborhood(&grid, Position::new(2, 2)).count(), 8);
    }

    #[test]
    fn count_does_not_wrap() {
        // Live cells on the far edges would be neighbors of (0, 0) on a torus.
        let grid = Grid::with_alive(4, 4, positions(&[(3, 0), (0, 3), (3, 3)]));
        assert_eq!(alive_neighbor_count(&grid, Position::new(0, 0)).unwrap(), 0);
    }

    #[test]
    fn count_excludes_the_cell_itself() {
        let grid = Grid::with_alive(3, 3, positions(&[(1, 1), (0, 0), (2, 2)]));
        assert_eq!(alive_neighbor_count(&grid, Position::new(1, 1)).unwrap(), 2);
    }

    #[test]
    fn count_rejects_out_of_range_position() {
        let grid = Grid::new(3, 3);
        assert!(alive_neighbor_count(&grid, Position::new(3, 1)).is_err());
    }

    #[test]
    fn transition_table() {
        for n in 0..=8u8 {
            let survive = if n == 2 || n == 3 { CellState::Alive } else { CellState::Dead };
            let birth = if n == 3 { CellState::Alive } else { CellState::Dead };
            assert_eq!(next_state(CellState::Alive, n), survive, "alive with {n}");
            assert_eq!(next_state(CellState::Dead, n), birth, "dead with {n}");
        }
    }

    #[test]
    fn vertical_blinker_becomes_horizontal() {
        let grid = Grid::with_alive(3, 3, positions(&[(1, 0), (1, 1), (1, 2)]));
        let next = step(&grid);
        assert_eq!(next, Grid::with_alive(3, 3, positions(&[(0, 1), (1, 1), (2, 1)])));
        assert_eq!(step(&next), grid);
    }

    #[test]
    fn block_is_still_in_a_corner() {
        let block = Grid::with_alive(6, 6, positions(&[(0, 0), (1, 0), (0, 1), (1, 1)]));
        assert_eq!(step(&block), block);
    }

    #[test]
    fn step_does_not_modify_input() {
        let grid = Grid::with_alive(3, 3, positions(&[(1, 0), (1, 1), (1, 2)]));
        let copy = grid.clone();
        let _ = step(&grid);
        assert_eq!(grid, copy);
    }
}

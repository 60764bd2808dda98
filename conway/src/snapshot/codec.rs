// codec.rs - Row-string encoding of a grid
//
// One string per row, one `'0'`/`'1'` character per cell.

use crate::error::{LifeError, LifeResult};
use crate::grid::{CellState, Grid, TRow};

const DEAD: char = '0';
const ALIVE: char = '1';

pub fn encode(grid: &Grid) -> Vec<String> {
    grid.rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| if cell.is_alive() { ALIVE } else { DEAD })
                .collect()
        })
        .collect()
}

pub fn decode(rows: &[String]) -> LifeResult<Grid> {
    let rows = rows
        .iter()
        .enumerate()
        .map(|(y, row)| decode_row(y, row))
        .collect::<LifeResult<Vec<TRow>>>()?;
    Grid::from_rows(rows)
        .map_err(|err| LifeError::transport(format!("record is not a rectangular board: {err}")))
}

fn decode_row(y: usize, row: &str) -> LifeResult<TRow> {
    row.chars()
        .enumerate()
        .map(|(x, c)| match c {
            DEAD => Ok(CellState::Dead),
            ALIVE => Ok(CellState::Alive),
            other => Err(LifeError::transport(format!(
                "unexpected character {other:?} at ({x}, {y})"
            ))),
        })
        .collect()
}

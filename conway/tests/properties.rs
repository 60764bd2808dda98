// properties.rs - Invariants of the grid, the step function and the codec
//
// 1. Stepping never changes the board's dimensions.
// 2. Survival and birth follow B3/S23 for every cell.
// 3. Corner cells have 3 neighbor slots, edge cells 5.
// 4. decode(encode(g)) == g.
// 5. Clicking the same cell twice restores the board.

use conway::grid::{CellState, Grid, Position};
use conway::interaction::{InteractionController, Modifiers, ScreenPos};
use conway::rules::{alive_neighbor_count, neighborhood, step};
use conway::snapshot::{decode, encode};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..=14, 1usize..=14).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), w), h).prop_map(|rows| {
            let rows = rows
                .into_iter()
                .map(|row| row.into_iter().map(CellState::from).collect())
                .collect();
            Grid::from_rows(rows).unwrap()
        })
    })
}

fn grid_and_position() -> impl Strategy<Value = (Grid, Position)> {
    grid_strategy().prop_flat_map(|grid| {
        let (w, h) = grid.dimensions();
        (Just(grid), 0..w, 0..h).prop_map(|(g, x, y)| (g, Position::new(x, y)))
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Dimension invariance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stepping_keeps_dimensions(grid in grid_strategy(), steps in 0usize..12) {
        let mut current = grid.clone();
        for _ in 0..steps {
            current = step(&current);
        }
        prop_assert_eq!(current.dimensions(), grid.dimensions());
        prop_assert_eq!(current.rows().len(), grid.height());
        prop_assert!(current.rows().iter().all(|row| row.len() == grid.width()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Transition rule
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn step_follows_b3_s23((grid, pos) in grid_and_position()) {
        let n = alive_neighbor_count(&grid, pos).unwrap();
        let before = grid.get(pos).unwrap();
        let after = step(&grid).get(pos).unwrap();
        let expected = match before {
            CellState::Alive if n == 2 || n == 3 => CellState::Alive,
            CellState::Dead if n == 3 => CellState::Alive,
            _ => CellState::Dead,
        };
        prop_assert_eq!(after, expected, "cell {:?} had {} neighbors", pos, n);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Clamped neighborhood
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn neighbor_slots_respect_edges((grid, pos) in grid_and_position()) {
        let (w, h) = grid.dimensions();
        let slots = neighborhood(&grid, pos).count();
        let on_x_edge = pos.x == 0 || pos.x == w - 1;
        let on_y_edge = pos.y == 0 || pos.y == h - 1;
        if on_x_edge && on_y_edge {
            prop_assert!(slots <= 3);
        } else if on_x_edge || on_y_edge {
            prop_assert!(slots <= 5);
        } else {
            prop_assert_eq!(slots, 8);
        }
        prop_assert!(neighborhood(&grid, pos).all(|p| grid.contains(p) && p != pos));
        prop_assert!(alive_neighbor_count(&grid, pos).unwrap() as usize <= slots);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Codec round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn encode_decode_round_trip(grid in grid_strategy()) {
        let rows = encode(&grid);
        prop_assert!(rows.iter().all(|r| r.chars().all(|c| c == '0' || c == '1')));
        prop_assert_eq!(decode(&rows).unwrap(), grid);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Double click is the identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn double_click_restores_cell(
        (grid, pos) in grid_and_position(),
        dx in 0.0f32..15.5,
        dy in 0.0f32..15.5,
    ) {
        let ctl = InteractionController::new(16.0);
        let at = ScreenPos::new(pos.x as f32 * 16.0 + dx, pos.y as f32 * 16.0 + dy);
        let once = ctl.handle_primary_click(&grid, at, Modifiers::NONE).unwrap();
        prop_assert_ne!(once.get(pos).unwrap(), grid.get(pos).unwrap());
        let twice = ctl.handle_primary_click(&once, at, Modifiers::NONE).unwrap();
        prop_assert_eq!(twice, grid);
    }
}

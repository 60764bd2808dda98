// render.rs - Grid state to draw calls

use crate::grid::{Grid, Position};

/// Something that can fill and clear axis-aligned rectangles, in pixels.
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
}

/// Paints a grid onto a [`Surface`]. Every call repaints every cell; at
/// board sizes this small there is nothing to gain from diffing frames.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler {
    cell_size: f32,
}

impl Reconciler {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// `(x, y, w, h)` of the cell at `pos`.
    pub fn cell_rect(&self, pos: Position) -> (f32, f32, f32, f32) {
        (
            pos.x as f32 * self.cell_size,
            pos.y as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Pixel size of the whole board.
    pub fn extent(&self, grid: &Grid) -> (f32, f32) {
        (
            grid.width() as f32 * self.cell_size,
            grid.height() as f32 * self.cell_size,
        )
    }

    /// Fill live cells and clear dead ones, row by row.
    pub fn repaint(&self, grid: &Grid, surface: &mut impl Surface) {
        for (pos, state) in grid.cells() {
            let (x, y, w, h) = self.cell_rect(pos);
            if state.is_alive() {
                surface.fill_rect(x, y, w, h);
            } else {
                surface.clear_rect(x, y, w, h);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Fill(f32, f32, f32, f32),
        Clear(f32, f32, f32, f32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Surface for Recorder {
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
            self.0.push(Call::Fill(x, y, w, h));
        }
        fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
            self.0.push(Call::Clear(x, y, w, h));
        }
    }

    #[test]
    fn repaint_touches_every_cell_once() {
        let grid = Grid::with_alive(3, 2, [Position::new(1, 0), Position::new(2, 1)]);
        let mut surface = Recorder::default();
        Reconciler::new(16.0).repaint(&grid, &mut surface);
        assert_eq!(
            surface.0,
            vec![
                Call::Clear(0.0, 0.0, 16.0, 16.0),
                Call::Fill(16.0, 0.0, 16.0, 16.0),
                Call::Clear(32.0, 0.0, 16.0, 16.0),
                Call::Clear(0.0, 16.0, 16.0, 16.0),
                Call::Clear(16.0, 16.0, 16.0, 16.0),
                Call::Fill(32.0, 16.0, 16.0, 16.0),
            ]
        );
    }

    #[test]
    fn unchanged_grid_is_still_fully_repainted() {
        let grid = Grid::new(4, 4);
        let reconciler = Reconciler::new(8.0);
        let mut surface = Recorder::default();
        reconciler.repaint(&grid, &mut surface);
        reconciler.repaint(&grid, &mut surface);
        assert_eq!(surface.0.len(), 32);
    }

    #[test]
    fn extent_covers_board() {
        assert_eq!(Reconciler::new(16.0).extent(&Grid::new(40, 18)), (640.0, 288.0));
    }
}

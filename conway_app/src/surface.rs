// surface.rs - conway::Surface on top of an egui painter

use egui::{Color32, Painter, Pos2, Rect, Vec2};

/// Paints board-local rectangles relative to `origin`, the top-left corner
/// of the area allocated for the board.
pub struct PainterSurface<'a> {
    pub painter: &'a Painter,
    pub origin: Pos2,
    pub live: Color32,
    pub dead: Color32,
}

impl PainterSurface<'_> {
    fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(self.origin + Vec2::new(x, y), Vec2::new(w, h))
    }
}

impl conway::Surface for PainterSurface<'_> {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.painter.rect_filled(self.rect(x, y, w, h), 0.0, self.live);
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.painter.rect_filled(self.rect(x, y, w, h), 0.0, self.dead);
    }
}

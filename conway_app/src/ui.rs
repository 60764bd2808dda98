// ui.rs - eframe app: controls, board and status line

use eframe::egui;
use egui::{Color32, Sense, Vec2};
use std::time::{SystemTime, UNIX_EPOCH};

use conway::patterns::PATTERNS;
use conway::{FileStore, Modifiers, PlaybackState, ScreenPos, Session, TokioTimer};

use crate::surface::PainterSurface;

pub struct LifeApp {
    // dropped before the runtime its tasks live on
    session: Session<FileStore, TokioTimer>,
    _runtime: tokio::runtime::Runtime,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
}

impl LifeApp {
    pub fn new(session: Session<FileStore, TokioTimer>, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            session,
            _runtime: runtime,
            live_color: Color32::from_rgb(20, 20, 20),
            dead_color: Color32::WHITE,
            selected_pattern: 0,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let running = self.session.playback_state() == PlaybackState::Running;
            if ui.button(if running { "Stop" } else { "Play" }).clicked() {
                self.session.toggle_playback();
            }
            if ui.add_enabled(!running, egui::Button::new("Step")).clicked() {
                self.session.step_once();
            }
            if ui.button("Clear").clicked() {
                self.session.clear();
            }
            if ui.button("Save").clicked() {
                self.session.save();
            }

            ui.separator();

            let selected_text = self
                .session
                .selected_save()
                .map_or_else(|| "Saved states".to_string(), |entry| entry.label.clone());
            let mut choice = None;
            egui::ComboBox::from_id_source("save_selector")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    let current = self.session.selected_save().map(|e| e.id.clone());
                    for (i, entry) in self.session.saves().iter().enumerate() {
                        let is_current = current.as_deref() == Some(entry.id.as_str());
                        if ui.selectable_label(is_current, &entry.label).clicked() {
                            choice = Some(i);
                        }
                    }
                });
            if let Some(i) = choice {
                self.session.select_save(i);
            }
            if ui.button("Load").clicked() {
                self.session.load_selected();
            }
        });

        ui.horizontal(|ui| {
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.button("Apply Pattern").clicked() {
                self.session.apply_pattern(&PATTERNS[self.selected_pattern]);
            }
            if ui.button("Random").clicked() {
                let seed = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default();
                self.session.randomize(seed);
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let (w, h) = self.session.reconciler().extent(self.session.grid());
        let (response, painter) = ui.allocate_painter(Vec2::new(w, h), Sense::click_and_drag());
        let origin = response.rect.min;

        let (mods, pressed, released, hover) = ui.input(|i| {
            (
                i.modifiers,
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.hover_pos(),
            )
        });
        let modifiers = Modifiers {
            paint: mods.command,
            erase: mods.shift,
        };
        let local = |pos: egui::Pos2| ScreenPos::new(pos.x - origin.x, pos.y - origin.y);

        if pressed && response.hovered() {
            self.session.pointer_down();
        }
        if let Some(pos) = hover {
            self.session.pointer_move(local(pos), modifiers);
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.session.click(local(pos), modifiers);
            }
        }
        if released {
            self.session.pointer_up();
        }

        let mut surface = PainterSurface {
            painter: &painter,
            origin,
            live: self.live_color,
            dead: self.dead_color,
        };
        self.session.repaint(&mut surface);
    }

    fn status(&mut self, ui: &mut egui::Ui) {
        let grid = self.session.grid();
        let live_cells = grid.alive_count();
        let total = grid.width() * grid.height();

        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", self.session.generation()));
            ui.label(format!("Live cells: {live_cells}"));
            ui.label(format!("Population: {:.1}%", live_cells as f32 / total as f32 * 100.0));
        });

        let mut dismiss = false;
        if let Some(notice) = self.session.notice() {
            ui.horizontal(|ui| {
                ui.label(notice);
                dismiss = ui.small_button("x").clicked();
            });
        }
        if dismiss {
            self.session.dismiss_notice();
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Timer ticks and store replies queued since the last frame
        self.session.pump();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
            ui.separator();
            ui.label("Click to toggle a cell. Hold Ctrl and drag to paint, Ctrl+Shift to erase.");
            self.board(ui);
            ui.separator();
            self.status(ui);
        });
    }
}

// ui.rs - egui front end: controls, message log and the lattice painter

use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use std::time::Duration;

use lattice::{Level, MessageLog, PATTERNS};

use crate::{lock, LatticeApp, Mode};

const SPACING: f32 = 0.5;
const CANVAS_WIDTH: f32 = 860.0;

/// Cell edge length that fits `cells` across the canvas.
fn box_size(cells: usize) -> f32 {
    (CANVAS_WIDTH / cells.max(1) as f32 - SPACING).clamp(1.0, 15.0)
}

/// Maps a click inside the painted area to (row, col).
fn cell_at(pos: Pos2, start: Pos2, box_size: f32) -> (usize, usize) {
    let pitch = box_size + SPACING;
    let col = ((pos.x - start.x) / pitch).max(0.0) as usize;
    let row = ((pos.y - start.y) / pitch).max(0.0) as usize;
    (row, col)
}

fn show_messages(ui: &mut egui::Ui, messages: &MessageLog) {
    for message in messages.iter() {
        let color = match message.level {
            Level::Info => Color32::GRAY,
            Level::Error => Color32::RED,
        };
        ui.colored_label(color, &message.text);
    }
}

/// Paints `rows` as a block of cells and returns the clicked cell, if any.
fn paint_rows(
    ui: &mut egui::Ui,
    rows: &[Vec<bool>],
    live_color: Color32,
    dead_color: Color32,
) -> Option<(usize, usize)> {
    let width = rows.first().map_or(0, Vec::len);
    let box_size = box_size(width);
    let pitch = box_size + SPACING;

    let start_pos = ui.cursor().min;
    let total_size = Vec2::new(
        pitch * width as f32 - SPACING,
        pitch * rows.len() as f32 - SPACING,
    )
    .max(Vec2::ZERO);

    let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

    painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

    for (row, cells) in rows.iter().enumerate() {
        for (col, &alive) in cells.iter().enumerate() {
            let rect = Rect::from_min_size(
                egui::pos2(start_pos.x + col as f32 * pitch, start_pos.y + row as f32 * pitch),
                Vec2::splat(box_size),
            );
            let cell_color = if alive { live_color } else { dead_color };
            painter.rect_filled(rect, 0.0, cell_color);
            if box_size >= 6.0 {
                painter.rect_stroke(rect, 0.0, Stroke::new(0.2, Color32::from_gray(160)));
            }
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (row, col) = cell_at(pos, start_pos, box_size);
            if row < rows.len() && col < width {
                return Some((row, col));
            }
        }
    }
    None
}

impl LatticeApp {
    fn run_controls(&mut self, ui: &mut egui::Ui) {
        let button_text = if self.is_running() { "⏸ Pause" } else { "▶ Start" };
        if ui.button(button_text).clicked() {
            if self.is_running() {
                self.stop();
            } else {
                self.start();
            }
        }

        if ui.button("⏭ Iterate").clicked() && !self.is_running() {
            self.iterate_once();
        }

        if ui.button("⏹ Clear").clicked() {
            self.clear();
        }

        ui.separator();

        ui.label("Delay:");
        let mut delay_ms = self.control.delay().as_millis() as u64;
        if ui
            .add(egui::Slider::new(&mut delay_ms, 10..=2000).suffix(" ms"))
            .changed()
        {
            self.control.set_delay(Duration::from_millis(delay_ms));
        }

        ui.separator();

        ui.label("Live:");
        ui.color_edit_button_srgba(&mut self.live_color);
        ui.label("Dead:");
        ui.color_edit_button_srgba(&mut self.dead_color);
    }

    fn elementary_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Rule:");
            let rule = ui.add(egui::TextEdit::singleline(&mut self.rule_input).desired_width(50.0));
            if rule.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.submit_rule();
            }
            if ui.button("Set Rule").clicked() {
                self.submit_rule();
            }

            ui.separator();

            ui.label("Lattice size:");
            ui.add(egui::TextEdit::singleline(&mut self.width_input).desired_width(50.0));
            if ui.button("Set Size").clicked() {
                self.submit_lattice_size();
            }

            ui.separator();

            ui.label("Iterations:");
            ui.add(egui::TextEdit::singleline(&mut self.iterations_input).desired_width(50.0));
            if ui.button("Set Iterations").clicked() {
                self.submit_iterations();
            }

            ui.separator();

            ui.label("Buffer:");
            ui.add(egui::TextEdit::singleline(&mut self.buffer_input).desired_width(50.0));
            if ui.button("Set Buffer").clicked() {
                self.submit_buffer();
            }
        });

        let elementary = self.elementary.clone();
        ui.horizontal(|ui| {
            let (boundary, sequential, rows, target) = {
                let state = lock(&elementary);
                (
                    state.boundary(),
                    state.is_sequential(),
                    state.grid().row_count(),
                    state.target_rows(),
                )
            };
            if ui.button(format!("Boundary: {boundary:?}")).clicked() {
                self.toggle_boundary();
            }
            let mut ordered = sequential;
            if ui.checkbox(&mut ordered, "Sequential update").changed() {
                lock(&elementary).set_sequential(ordered.then_some(self.random_seed));
            }
            ui.separator();
            if ui.button("Fill Seed").clicked() {
                self.fill_seed();
            }
            if ui.button("🎲 Random Seed").clicked() {
                self.randomize_seed();
            }
            ui.separator();
            ui.label(format!("Rows: {rows} / {target}"));
        });

        show_messages(ui, lock(&elementary).messages());
        ui.separator();

        let rows = lock(&elementary).grid().visible_rows();
        let (live, dead) = (self.live_color, self.dead_color);
        let clicked = egui::ScrollArea::both()
            .show(ui, |ui| paint_rows(ui, &rows, live, dead))
            .inner;

        // Only the seed row takes clicks
        if let Some((0, col)) = clicked {
            if !self.is_running() {
                let _ = lock(&elementary).flip_seed(col);
            }
        }
    }

    fn life_panel(&mut self, ui: &mut egui::Ui) {
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
                self.apply_selected_pattern();
            }

            if ui.button("🎲 Random").clicked() {
                self.apply_random_pattern();
            }

            if ui.button("↺ Reset").clicked() {
                self.stop();
                lock(&self.life).reset();
            }
        });

        let life = self.life.clone();
        let (rows, iteration, population, size, cycling) = {
            let state = lock(&life);
            let grid = state.grid();
            (
                grid.visible_rows(),
                state.iteration(),
                grid.population(),
                (grid.width(), grid.height()),
                state.is_cycling(),
            )
        };

        ui.horizontal(|ui| {
            ui.label(format!("Iteration: {iteration}"));
            ui.label(format!("Live cells: {population}"));
            ui.label(format!("Backing grid: {}x{}", size.0, size.1));
            if cycling {
                ui.colored_label(Color32::DARK_GREEN, "Pattern repeats");
            }
        });

        show_messages(ui, lock(&life).messages());
        ui.separator();

        if let Some((row, col)) = paint_rows(ui, &rows, self.live_color, self.dead_color) {
            if !self.is_running() {
                let _ = lock(&life).flip_in_view(row, col);
            }
        }
    }
}

impl eframe::App for LatticeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Lattice");

            ui.horizontal(|ui| {
                let mut mode = self.mode;
                ui.radio_value(&mut mode, Mode::Elementary, "Elementary (1-D)");
                ui.radio_value(&mut mode, Mode::Life, "Game of Life (2-D)");
                self.switch_mode(mode);
            });

            ui.separator();

            ui.horizontal(|ui| self.run_controls(ui));

            ui.separator();

            match self.mode {
                Mode::Elementary => self.elementary_panel(ui),
                Mode::Life => self.life_panel(ui),
            }
        });

        // Keep repainting while the runner is stepping in the background
        if self.is_running() {
            ctx.request_repaint();
        }
    }
}

use crate::JigsawApp;
use crate::grid::{CANONICAL_GRIDS, parse_piece_count};
use crate::event::PuzzleEvent;

pub fn controls_panel(app: &mut JigsawApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Jigsaw");

            let current = app.config().piece_count;
            ui.label("Pieces");
            for (count, grid) in CANONICAL_GRIDS {
                let label = format!("{} ({}x{})", count, grid.rows, grid.cols);
                if ui.selectable_label(current == count, label).clicked() && current != count {
                    log::info!("Piece count selected from UI: {}", count);
                    app.set_piece_count(count);
                }
            }

            ui.horizontal(|ui| {
                let response = ui.text_edit_singleline(app.piece_count_text_mut());
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if submitted || ui.button("Apply").clicked() {
                    let count = parse_piece_count(app.piece_count_text_mut());
                    app.set_piece_count(count);
                }
            });

            ui.separator();

            let blocked = app.is_modal_open();
            if ui.add_enabled(!blocked, egui::Button::new("Shuffle")).clicked() {
                app.dispatch(ctx, PuzzleEvent::Reshuffle);
            }

            if let Some(session) = app.controller().session() {
                let grid = session.grid();
                ui.label(format!(
                    "{} pieces ({}x{}), snap within {:.0}px",
                    grid.piece_count(),
                    grid.rows,
                    grid.cols,
                    session.snap_tolerance()
                ));
            }
            if let Some(name) = app.image_name() {
                ui.label(format!("Image: {}", name));
            }
            ui.small("Drop an image file to start a new puzzle.");

            if !app.status().is_empty() {
                ui.separator();
                ui.label(app.status());
            }
        });
}

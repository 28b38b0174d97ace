use crate::JigsawApp;

pub fn puzzle_panel(app: &mut JigsawApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        app.load_if_needed(ctx, ui.available_size());

        let (response, painter) = ui.allocate_painter(app.surface_size(), egui::Sense::drag());
        let surface_rect = response.rect;

        app.handle_input(ctx, surface_rect);
        app.paint(ctx, &painter, surface_rect);
    });
}

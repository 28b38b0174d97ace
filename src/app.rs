use egui::{Color32, Painter, Rect, TextureHandle, Vec2};

use crate::config::{CONFIG_ENV_VAR, PuzzleConfig};
use crate::controller::PuzzleController;
use crate::event::{Completion, Effect, PuzzleEvent};
use crate::file_handler::FileHandler;
use crate::image::PuzzleImage;
use crate::input::InputHandler;
use crate::painter_surface::PainterSurface;
use crate::panels::{controls_panel, puzzle_panel};
use crate::render::Renderer;
use crate::util::time::current_time_secs;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct JigsawApp {
    config: PuzzleConfig,
    // Runtime state is rebuilt from the config on start
    #[serde(skip)]
    controller: PuzzleController,
    #[serde(skip)]
    piece_count_text: String,
    #[serde(skip)]
    image: Option<PuzzleImage>,
    #[serde(skip)]
    texture: Option<TextureHandle>,
    #[serde(skip)]
    input: Option<InputHandler>,
    #[serde(skip)]
    file_handler: FileHandler,
    #[serde(skip)]
    needs_load: bool,
    #[serde(skip)]
    status: String,
    #[serde(skip)]
    completion: Option<Completion>,
}

impl Default for JigsawApp {
    fn default() -> Self {
        Self::with_config(PuzzleConfig::default())
    }
}

impl JigsawApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut config = PuzzleConfig::from_env();
        if let Some(storage) = cc.storage {
            if let Some(persisted) = eframe::get_value::<Self>(storage, eframe::APP_KEY) {
                log::info!("Restored settings (overrides {})", CONFIG_ENV_VAR);
                config = persisted.config;
            }
        }
        Self::with_config(config)
    }

    pub fn with_config(config: PuzzleConfig) -> Self {
        Self {
            piece_count_text: config.piece_count.to_string(),
            controller: PuzzleController::new(config.clone()),
            config,
            image: None,
            texture: None,
            input: None,
            file_handler: FileHandler::new(),
            needs_load: true,
            status: String::new(),
            completion: None,
        }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn controller(&self) -> &PuzzleController {
        &self.controller
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn image_name(&self) -> Option<&str> {
        self.image.as_ref().map(PuzzleImage::name)
    }

    pub fn piece_count_text_mut(&mut self) -> &mut String {
        &mut self.piece_count_text
    }

    /// True while the completion window blocks the puzzle.
    pub fn is_modal_open(&self) -> bool {
        self.completion.is_some()
    }

    /// Choose a new piece count and cut a new puzzle with it.
    pub fn set_piece_count(&mut self, count: u32) {
        self.config.piece_count = count;
        self.piece_count_text = count.to_string();
        self.controller.set_piece_count(count);
        self.needs_load = true;
    }

    pub fn set_image(&mut self, image: PuzzleImage) {
        self.image = Some(image);
        self.texture = None;
        self.needs_load = true;
    }

    /// Cut the current image once the available space is known.
    pub(crate) fn load_if_needed(&mut self, ctx: &egui::Context, viewport: Vec2) {
        let input = self
            .input
            .get_or_insert_with(|| InputHandler::new(Rect::from_min_size(egui::Pos2::ZERO, viewport)));
        let resize = input.viewport_changed(viewport);

        if self.needs_load {
            let Some(image) = &self.image else {
                return;
            };
            let image_size = image.size();
            self.needs_load = false;
            self.completion = None;
            self.status.clear();
            self.dispatch(
                ctx,
                PuzzleEvent::ImageLoaded {
                    image_size,
                    viewport,
                },
            );
        } else if let Some(resize) = resize {
            self.dispatch(ctx, resize);
        }
    }

    /// Feed this frame's pointer input to the puzzle.
    pub(crate) fn handle_input(&mut self, ctx: &egui::Context, surface_rect: Rect) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        input.set_surface_rect(surface_rect);
        if self.completion.is_some() {
            input.reset_pointer();
            return;
        }
        for event in input.process_input(ctx) {
            self.dispatch(ctx, event);
        }
    }

    pub(crate) fn dispatch(&mut self, ctx: &egui::Context, event: PuzzleEvent) {
        for effect in self.controller.handle(event, current_time_secs()) {
            match effect {
                Effect::Redraw => ctx.request_repaint(),
                Effect::Completed(completion) => {
                    self.status = completion.message();
                    self.completion = Some(completion);
                }
            }
        }
    }

    pub(crate) fn surface_size(&self) -> Vec2 {
        self.controller
            .session()
            .map(|session| session.layout().surface_size)
            .unwrap_or(Vec2::ZERO)
    }

    pub(crate) fn paint(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect) {
        let (Some(image), Some(session)) = (&self.image, self.controller.session()) else {
            return;
        };
        let texture = self
            .texture
            .get_or_insert_with(|| image.load_texture(ctx));
        let mut surface = PainterSurface::new(painter, texture.id(), image.size(), rect)
            .with_background(Color32::from_gray(230))
            .with_tolerance(self.config.flatten_tolerance);
        Renderer::new(self.config.outline_style()).render(&mut surface, session.pieces());
    }

    fn show_completion(&mut self, ctx: &egui::Context) {
        let Some(completion) = self.completion else {
            return;
        };
        egui::Window::new("Puzzle complete")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(completion.message());
                if ui.button("OK").clicked() {
                    self.completion = None;
                }
            });
    }
}

impl eframe::App for JigsawApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            if let Some(image) = self.file_handler.take_image() {
                self.set_image(image);
            }
        }
        if self.image.is_none() {
            log::info!("No image dropped yet, using the default gradient");
            self.set_image(PuzzleImage::gradient_default());
        }

        controls_panel(self, ctx);
        puzzle_panel(self, ctx);
        self.show_completion(ctx);
    }
}

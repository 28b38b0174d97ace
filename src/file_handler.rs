use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

use crate::error::PuzzleResult;
use crate::image::PuzzleImage;

/// Picks up image files dropped onto the window.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue newly dropped files. Returns true if any arrived this frame.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files = i.raw.dropped_files.clone();
                true
            }
        })
    }

    /// Decode the queued files and return the last one that is a usable image.
    pub fn take_image(&mut self) -> Option<PuzzleImage> {
        let mut loaded = None;
        for file in self.dropped_files.drain(..) {
            let name = file_name(&file);
            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", name);
                continue;
            }
            match load_image(&file, &name) {
                Ok(Some(image)) => {
                    log::info!("Loaded puzzle image {} ({:?})", name, image.size());
                    loaded = Some(image);
                }
                Ok(None) => log::warn!("Dropped file has no accessible data: {}", name),
                Err(err) => log::error!("{}: {}", name, err),
            }
        }
        loaded
    }

    /// Dim the window while files hover over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        let hovered = ctx.input(|i| i.raw.hovered_files.len());
        if hovered == 0 {
            return;
        }
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image to start a new puzzle",
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

fn file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check the MIME type, or the extension when there is none.
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .or_else(|| {
            file.name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
        });
    matches!(
        name.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    )
}

fn load_image(file: &egui::DroppedFile, name: &str) -> PuzzleResult<Option<PuzzleImage>> {
    if let Some(bytes) = &file.bytes {
        return PuzzleImage::from_bytes(name, bytes).map(Some);
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        let bytes = std::fs::read(path)?;
        return PuzzleImage::from_bytes(name, &bytes).map(Some);
    }

    Ok(None)
}

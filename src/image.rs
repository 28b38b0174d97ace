use egui::{Color32, ColorImage, TextureHandle, TextureOptions, Vec2};

use crate::error::{PuzzleError, PuzzleResult};

const DEFAULT_IMAGE_SIZE: [usize; 2] = [640, 480];

/// Decoded source image the puzzle is cut from.
#[derive(Clone)]
pub struct PuzzleImage {
    name: String,
    pixels: ColorImage,
}

impl PuzzleImage {
    pub fn from_color_image(name: impl Into<String>, pixels: ColorImage) -> PuzzleResult<Self> {
        let [width, height] = pixels.size;
        if width == 0 || height == 0 {
            return Err(PuzzleError::EmptyImage {
                width: width as u32,
                height: height as u32,
            });
        }
        Ok(Self {
            name: name.into(),
            pixels,
        })
    }

    /// Decode any format the `image` crate understands.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> PuzzleResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        log::debug!("Decoded image: {}x{}", rgba.width(), rgba.height());
        let size = [rgba.width() as usize, rgba.height() as usize];
        let pixels = ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
        Self::from_color_image(name, pixels)
    }

    /// Diagonal gradient used until the user drops an image.
    pub fn gradient_default() -> Self {
        let [width, height] = DEFAULT_IMAGE_SIZE;
        let mut pixels = ColorImage::new(DEFAULT_IMAGE_SIZE, Color32::BLACK);
        for y in 0..height {
            for x in 0..width {
                let u = x as f32 / (width - 1) as f32;
                let v = y as f32 / (height - 1) as f32;
                // Checker stripes make piece placement visible.
                let stripe = if ((x / 40) + (y / 40)) % 2 == 0 { 1.0 } else { 0.85 };
                pixels[(x, y)] = Color32::from_rgb(
                    (255.0 * u * stripe) as u8,
                    (255.0 * v * stripe) as u8,
                    (255.0 * (1.0 - 0.5 * (u + v)) * stripe) as u8,
                );
            }
        }
        Self {
            name: "gradient".to_owned(),
            pixels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.pixels.size[0] as f32, self.pixels.size[1] as f32)
    }

    pub fn pixels(&self) -> &ColorImage {
        &self.pixels
    }

    pub fn load_texture(&self, ctx: &egui::Context) -> TextureHandle {
        ctx.load_texture(
            format!("puzzle_image_{}", self.name),
            self.pixels.clone(),
            TextureOptions::LINEAR,
        )
    }
}

impl std::fmt::Debug for PuzzleImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleImage")
            .field("name", &self.name)
            .field("size", &self.pixels.size)
            .finish()
    }
}

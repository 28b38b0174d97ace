use egui::{Rect, Vec2};

use crate::outline::piece_outline;
use crate::piece::Piece;
use crate::surface::{StrokeStyle, Surface};

/// How far the copied image region reaches past the piece rectangle, as a
/// share of the piece's shorter side. Covers the tab bulges.
pub const IMAGE_BLEED_RATIO: f32 = 0.25;

/// Draws the piece collection onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    outline: StrokeStyle,
}

impl Renderer {
    pub fn new(outline: StrokeStyle) -> Self {
        Self { outline }
    }

    /// Clear the surface and draw every piece in z-order, last on top.
    ///
    /// Each piece is filled and stroked before the next one starts, so a
    /// later piece paints over an earlier piece's outline where they touch.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, pieces: &[Piece]) {
        surface.clear();
        for piece in pieces {
            self.render_piece(surface, piece);
        }
    }

    pub fn render_piece<S: Surface + ?Sized>(&self, surface: &mut S, piece: &Piece) {
        let outline = piece_outline(piece.rect(), piece.edges());
        let (source, dest) = image_rects(piece);

        surface.save();
        surface.clip(&outline);
        surface.draw_image(source, dest);
        surface.restore();

        surface.stroke(&outline, &self.outline);
    }
}

/// Source and destination rectangles for a piece's image copy, both grown by
/// the bleed margin.
///
/// The margin is measured from the rendered size and applied unscaled to the
/// source rectangle as well.
pub fn image_rects(piece: &Piece) -> (Rect, Rect) {
    let size = piece.size();
    let bleed = size.x.min(size.y) * IMAGE_BLEED_RATIO;
    let grow = Vec2::splat(bleed);
    (piece.source().expand2(grow), piece.rect().expand2(grow))
}

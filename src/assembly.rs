use egui::{Pos2, Rect, Vec2};
use rand::Rng;

use crate::grid::SurfaceLayout;
use crate::piece::{Piece, PieceId};
use crate::seam::SeamMap;

/// Build every piece of the layout's grid, row-major, each at its home position.
pub fn assemble(layout: &SurfaceLayout, seams: &SeamMap) -> Vec<Piece> {
    let grid = layout.grid;
    let mut pieces = Vec::with_capacity(grid.piece_count());

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let cell = Vec2::new(col as f32, row as f32);
            let source = Rect::from_min_size(
                (cell * layout.source_piece_size).to_pos2(),
                layout.source_piece_size,
            );
            let home = (cell * layout.piece_size).to_pos2();
            pieces.push(Piece::new(
                PieceId::new(row, col),
                source,
                home,
                layout.piece_size,
                seams.piece_edges(row, col),
            ));
        }
    }

    log::debug!("Assembled {} pieces for a {}x{} grid", pieces.len(), grid.rows, grid.cols);
    pieces
}

/// Scatter pieces uniformly over the surface, independently of each other.
///
/// Each piece lands in `[0, surface - piece]` on both axes. Overlaps are allowed.
pub fn shuffle<R: Rng + ?Sized>(pieces: &mut [Piece], surface_size: Vec2, rng: &mut R) {
    for piece in pieces.iter_mut() {
        let span = surface_size - piece.size();
        let x = span.x.max(0.0) * rng.random::<f32>();
        let y = span.y.max(0.0) * rng.random::<f32>();
        piece.set_position(Pos2::new(x, y));
    }
}

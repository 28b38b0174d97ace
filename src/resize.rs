use crate::grid::SurfaceLayout;
use crate::piece::Piece;

/// Floor for both scale factors when forming the resize ratio, so the ratio
/// stays finite when the viewport collapses to nothing.
pub const MIN_RATIO_SCALE: f32 = 1.0e-3;

/// Carry pieces from `old` to `new` surface geometry.
///
/// Positions are multiplied by the scale ratio, which keeps each piece at the
/// same fraction of the surface but does not clamp it into bounds. Sizes and
/// home positions are recomputed from the new piece size, and pieces that sat
/// home are put exactly on their new home so repeated resizes cannot drift
/// them off. Returns the ratio.
pub fn rescale(pieces: &mut [Piece], old: &SurfaceLayout, new: &SurfaceLayout) -> f32 {
    let ratio = new.scale_factor.max(MIN_RATIO_SCALE) / old.scale_factor.max(MIN_RATIO_SCALE);
    for piece in pieces.iter_mut() {
        let was_home = piece.is_home();
        piece.set_size(new.piece_size);
        if was_home {
            piece.set_position(piece.home());
        } else {
            let position = piece.position();
            piece.set_position((position.to_vec2() * ratio).to_pos2());
        }
    }
    log::debug!(
        "Rescaled {} pieces by {:.4} ({:.3} -> {:.3})",
        pieces.len(),
        ratio,
        old.scale_factor,
        new.scale_factor
    );
    ratio
}

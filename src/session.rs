//! State of one puzzle from image load to completion.

use egui::{Pos2, Vec2};
use rand::Rng;

use crate::assembly::{assemble, shuffle};
use crate::event::Completion;
use crate::grid::{GridSize, SurfaceLayout};
use crate::piece::{Piece, PieceId};
use crate::resize::rescale;
use crate::seam::SeamMap;
use crate::util::time::elapsed_since;

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        piece: PieceId,
        /// Pointer position relative to the piece origin at pick-up.
        grab_offset: Vec2,
    },
}

/// Outcome of dropping a dragged piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub piece: PieceId,
    pub snapped: bool,
}

/// Everything one puzzle owns: geometry, seams, pieces in z-order and the
/// current drag.
///
/// The piece list doubles as paint and hit-test order; the last piece is on
/// top.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    layout: SurfaceLayout,
    viewport_fraction: f32,
    seams: SeamMap,
    pieces: Vec<Piece>,
    drag: DragState,
    snap_tolerance: f32,
    ready_at: f64,
    was_complete: bool,
}

impl PuzzleSession {
    /// Lay out, cut and shuffle a new puzzle. `now` starts the timer.
    pub fn generate<R: Rng + ?Sized>(
        grid: GridSize,
        image_size: Vec2,
        viewport: Vec2,
        viewport_fraction: f32,
        snap_tolerance: f32,
        rng: &mut R,
        now: f64,
    ) -> Self {
        let layout = SurfaceLayout::compute(grid, image_size, viewport, viewport_fraction);
        let seams = SeamMap::generate(grid, rng);
        let mut pieces = assemble(&layout, &seams);
        shuffle(&mut pieces, layout.surface_size, rng);

        log::info!(
            "New {}x{} puzzle: surface {:.0}x{:.0}, scale {:.3}",
            grid.rows,
            grid.cols,
            layout.surface_size.x,
            layout.surface_size.y,
            layout.scale_factor
        );
        Self::from_parts(layout, viewport_fraction, seams, pieces, snap_tolerance, now)
    }

    /// Build a session from prepared pieces, keeping their positions.
    pub fn from_parts(
        layout: SurfaceLayout,
        viewport_fraction: f32,
        seams: SeamMap,
        pieces: Vec<Piece>,
        snap_tolerance: f32,
        now: f64,
    ) -> Self {
        Self {
            layout,
            viewport_fraction,
            seams,
            pieces,
            drag: DragState::Idle,
            snap_tolerance,
            ready_at: now,
            was_complete: false,
        }
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    pub fn grid(&self) -> GridSize {
        self.layout.grid
    }

    pub fn seams(&self) -> &SeamMap {
        &self.seams
    }

    /// Pieces in z-order, topmost last.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn dragging(&self) -> Option<PieceId> {
        match self.drag {
            DragState::Dragging { piece, .. } => Some(piece),
            DragState::Idle => None,
        }
    }

    pub fn ready_at(&self) -> f64 {
        self.ready_at
    }

    pub fn snap_tolerance(&self) -> f32 {
        self.snap_tolerance
    }

    /// Move one piece directly, outside of any drag.
    pub fn place_piece(&mut self, id: PieceId, pos: Pos2) -> bool {
        match self.pieces.iter_mut().find(|p| p.id() == id) {
            Some(piece) => {
                piece.set_position(pos);
                true
            }
            None => false,
        }
    }

    /// Pick up the topmost piece under `pos` and move it to the top.
    pub fn pointer_down(&mut self, pos: Pos2) -> Option<PieceId> {
        let index = self.pieces.iter().rposition(|p| p.hit_test(pos))?;
        let mut piece = self.pieces.remove(index);
        piece.set_dragging(true);
        let id = piece.id();
        let grab_offset = pos - piece.position();
        self.pieces.push(piece);
        self.drag = DragState::Dragging {
            piece: id,
            grab_offset,
        };
        log::debug!("Picked up piece {} at {:?}", id, pos);
        Some(id)
    }

    /// Follow the pointer with the dragged piece. Returns false when idle.
    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        let DragState::Dragging { piece, grab_offset } = self.drag else {
            return false;
        };
        match self.pieces.iter_mut().rfind(|p| p.id() == piece) {
            Some(dragged) => {
                dragged.set_position(pos - grab_offset);
                true
            }
            None => false,
        }
    }

    /// Drop the dragged piece, snapping it home if it is close enough.
    pub fn release(&mut self) -> Option<Release> {
        let DragState::Dragging { piece, .. } = std::mem::take(&mut self.drag) else {
            return None;
        };
        let tolerance = self.snap_tolerance;
        let dragged = self.pieces.iter_mut().rfind(|p| p.id() == piece)?;
        dragged.set_dragging(false);
        let snapped = dragged.snap_home(tolerance);
        if snapped {
            log::debug!("Piece {} snapped home", piece);
        }
        Some(Release { piece, snapped })
    }

    /// True when every piece sits at its home position.
    pub fn is_complete(&self) -> bool {
        self.pieces.iter().all(Piece::is_home)
    }

    /// Report completion once per transition from unsolved to solved.
    pub fn check_completion(&mut self, now: f64) -> Option<Completion> {
        let complete = self.is_complete();
        let newly = complete && !self.was_complete;
        self.was_complete = complete;
        if newly {
            let completion = Completion {
                elapsed_secs: elapsed_since(self.ready_at, now),
            };
            log::info!("{}", completion);
            Some(completion)
        } else {
            None
        }
    }

    /// Recompute the layout for a new viewport and carry the pieces over.
    pub fn resize(&mut self, viewport: Vec2) -> f32 {
        let new_layout = SurfaceLayout::compute(
            self.layout.grid,
            self.layout.image_size,
            viewport,
            self.viewport_fraction,
        );
        let ratio = rescale(&mut self.pieces, &self.layout, &new_layout);
        self.layout = new_layout;
        ratio
    }

    /// Scatter the pieces again and restart the timer.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f64) {
        if let Some(piece) = self.dragging().and_then(|id| {
            self.pieces.iter_mut().find(|p| p.id() == id)
        }) {
            piece.set_dragging(false);
        }
        self.drag = DragState::Idle;
        shuffle(&mut self.pieces, self.layout.surface_size, rng);
        self.ready_at = now;
        self.was_complete = false;
        log::info!("Reshuffled {} pieces", self.pieces.len());
    }
}

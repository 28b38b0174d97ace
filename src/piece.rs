use egui::{Pos2, Rect, Vec2};

use crate::edge::Edge;

/// Tolerance for the home-position comparison after repeated rescaling.
pub const HOME_EPSILON: f32 = 1.0e-3;

/// Grid cell of a piece, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId {
    pub row: u32,
    pub col: u32,
}

impl PieceId {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four sides of a piece, clockwise from the top.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PieceEdges {
    pub top: Edge,
    pub right: Edge,
    pub bottom: Edge,
    pub left: Edge,
}

/// A single puzzle piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    /// Region of the source image this piece shows.
    source: Rect,
    /// Where the piece belongs on the surface.
    home: Pos2,
    /// Where the piece currently sits on the surface.
    position: Pos2,
    /// Rendered size on the surface.
    size: Vec2,
    edges: PieceEdges,
    is_dragging: bool,
}

impl Piece {
    /// Create a piece sitting at its home position.
    pub fn new(id: PieceId, source: Rect, home: Pos2, size: Vec2, edges: PieceEdges) -> Self {
        Self {
            id,
            source,
            home,
            position: home,
            size,
            edges,
            is_dragging: false,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn source(&self) -> Rect {
        self.source
    }

    pub fn home(&self) -> Pos2 {
        self.home
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn edges(&self) -> &PieceEdges {
        &self.edges
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Current bounding rectangle on the surface, tabs excluded.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Strict axis-aligned containment; points on the border miss.
    pub fn hit_test(&self, pos: Pos2) -> bool {
        let rect = self.rect();
        pos.x > rect.min.x && pos.x < rect.max.x && pos.y > rect.min.y && pos.y < rect.max.y
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
    }

    /// Apply a new rendered size and recompute home from the grid cell.
    pub(crate) fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.home = Pos2::new(self.id.col as f32 * size.x, self.id.row as f32 * size.y);
    }

    /// Exact home check, as produced by a snap.
    pub fn is_home_exact(&self) -> bool {
        self.position == self.home
    }

    /// Home check tolerant of float drift from rescaling.
    pub fn is_home(&self) -> bool {
        self.is_home_exact()
            || ((self.position.x - self.home.x).abs() <= HOME_EPSILON
                && (self.position.y - self.home.y).abs() <= HOME_EPSILON)
    }

    /// Move to home if within `tolerance` on both axes. Returns true on snap.
    pub fn snap_home(&mut self, tolerance: f32) -> bool {
        let delta = self.position - self.home;
        if delta.x.abs() < tolerance && delta.y.abs() < tolerance {
            self.position = self.home;
            true
        } else {
            false
        }
    }
}

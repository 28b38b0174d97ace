//! Internal seams between neighbouring cells.
//!
//! Every seam is generated once and stored as the edge of its owning side,
//! the piece above or to the left. The receiving piece only ever sees the
//! inverted copy, so the two faces of a seam cannot disagree.

use rand::Rng;

use crate::edge::Edge;
use crate::grid::GridSize;
use crate::piece::PieceEdges;

/// Identity of a seam between two grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeamId {
    /// Between `(row, col)` and `(row + 1, col)`.
    Horizontal { row: u32, col: u32 },
    /// Between `(row, col)` and `(row, col + 1)`.
    Vertical { row: u32, col: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeamMap {
    grid: GridSize,
    /// `(rows - 1) * cols` entries, row-major.
    horizontal: Vec<Edge>,
    /// `rows * (cols - 1)` entries, row-major.
    vertical: Vec<Edge>,
}

impl SeamMap {
    /// Generate every internal seam of `grid`.
    ///
    /// Cells are visited row-major; each draws its right seam and then its
    /// bottom seam from `rng`.
    pub fn generate<R: Rng + ?Sized>(grid: GridSize, rng: &mut R) -> Self {
        let rows = grid.rows as usize;
        let cols = grid.cols as usize;
        let mut horizontal = vec![Edge::flat(); rows.saturating_sub(1) * cols];
        let mut vertical = vec![Edge::flat(); rows * cols.saturating_sub(1)];

        for row in 0..rows {
            for col in 0..cols {
                if col + 1 < cols {
                    vertical[row * (cols - 1) + col] = Edge::random(rng);
                }
                if row + 1 < rows {
                    horizontal[row * cols + col] = Edge::random(rng);
                }
            }
        }

        Self {
            grid,
            horizontal,
            vertical,
        }
    }

    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The owning side's edge of a seam, or `None` if the seam lies outside the grid.
    pub fn seam(&self, id: SeamId) -> Option<&Edge> {
        let cols = self.grid.cols;
        match id {
            SeamId::Horizontal { row, col } => {
                if row + 1 >= self.grid.rows || col >= cols {
                    return None;
                }
                self.horizontal.get((row * cols + col) as usize)
            }
            SeamId::Vertical { row, col } => {
                if row >= self.grid.rows || col + 1 >= cols {
                    return None;
                }
                self.vertical.get((row * (cols - 1) + col) as usize)
            }
        }
    }

    /// Derive the four edges of the piece at `(row, col)`.
    ///
    /// Border sides are flat, bottom and right are the stored seams, top and
    /// left are inversions of the neighbours' seams.
    pub fn piece_edges(&self, row: u32, col: u32) -> PieceEdges {
        let top = match row {
            0 => Edge::flat(),
            _ => self.owned(SeamId::Horizontal { row: row - 1, col }).inverted(),
        };
        let left = match col {
            0 => Edge::flat(),
            _ => self.owned(SeamId::Vertical { row, col: col - 1 }).inverted(),
        };
        let right = self.owned(SeamId::Vertical { row, col });
        let bottom = self.owned(SeamId::Horizontal { row, col });
        PieceEdges {
            top,
            right,
            bottom,
            left,
        }
    }

    fn owned(&self, id: SeamId) -> Edge {
        self.seam(id).copied().unwrap_or_else(Edge::flat)
    }
}

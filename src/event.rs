use egui::{Pos2, Vec2};

/// Input the puzzle reacts to, in arrival order.
///
/// Pointer positions are in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PuzzleEvent {
    /// The source image finished loading; starts a new puzzle.
    ImageLoaded {
        image_size: Vec2,
        /// Space available for the drawable surface.
        viewport: Vec2,
    },
    PointerDown {
        pos: Pos2,
    },
    PointerMove {
        pos: Pos2,
    },
    PointerUp,
    /// The pointer left the drawable surface.
    PointerLeave,
    /// The space available for the surface changed.
    Resize {
        viewport: Vec2,
    },
    /// Scatter the pieces again and restart the timer.
    Reshuffle,
}

/// Puzzle completion report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    pub elapsed_secs: f64,
}

impl Completion {
    pub fn message(&self) -> String {
        format!(
            "Congratulations! Puzzle completed in {:.1} seconds.",
            self.elapsed_secs
        )
    }
}

impl std::fmt::Display for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// What the environment has to do after an event was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Piece state changed; draw a new frame.
    Redraw,
    /// The puzzle just became solved.
    Completed(Completion),
}

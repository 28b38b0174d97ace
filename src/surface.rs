use egui::{Color32, Rect, Vec2};
use kurbo::BezPath;

/// Solid stroke used for piece outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Color32::BLACK,
        }
    }
}

/// Immediate-mode 2D drawing target the puzzle renders onto.
///
/// Coordinates are surface pixels with the origin at the top-left corner.
/// `draw_image` copies `source` (in image pixels) into `dest` (in surface
/// pixels), limited to the active clip.
pub trait Surface {
    /// Current drawable size.
    fn size(&self) -> Vec2;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Push the current clip state.
    fn save(&mut self);

    /// Pop back to the last saved clip state.
    fn restore(&mut self);

    /// Restrict later image draws to the inside of `path`.
    fn clip(&mut self, path: &BezPath);

    fn draw_image(&mut self, source: Rect, dest: Rect);

    /// Stroke `path` without filling it.
    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle);
}

/// A single recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { size: Vec2 },
    Save,
    Restore,
    Clip(BezPath),
    DrawImage { source: Rect, dest: Rect },
    Stroke { path: BezPath, style: StrokeStyle },
}

/// Surface that records calls instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Vec2,
    ops: Vec<DrawOp>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ops: Vec::new(),
            depth: 0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.depth
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear { size: self.size });
    }

    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.ops.push(DrawOp::Restore);
    }

    fn clip(&mut self, path: &BezPath) {
        self.ops.push(DrawOp::Clip(path.clone()));
    }

    fn draw_image(&mut self, source: Rect, dest: Rect) {
        self.ops.push(DrawOp::DrawImage { source, dest });
    }

    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            style: *style,
        });
    }
}

use egui::epaint::Vertex;
use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, TextureId, Vec2};
use kurbo::{BezPath, PathEl};

use crate::error::{PuzzleError, PuzzleResult};
use crate::surface::{StrokeStyle, Surface};

/// Default curve flattening tolerance in surface pixels.
pub const DEFAULT_FLATTEN_TOLERANCE: f64 = 0.25;

/// Triangulated clip region in surface coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipMesh {
    pub points: Vec<Pos2>,
    pub indices: Vec<u32>,
}

impl ClipMesh {
    /// Flatten and triangulate a closed path. Only the first subpath is used.
    pub fn from_path(path: &BezPath, tolerance: f64) -> PuzzleResult<Self> {
        let points = flatten_polygon(path, tolerance);
        if points.len() < 3 {
            return Ok(Self::default());
        }
        let coords: Vec<f64> = points
            .iter()
            .flat_map(|p| [p.x as f64, p.y as f64])
            .collect();
        let indices = earcutr::earcut(&coords, &[], 2)
            .map_err(|_| PuzzleError::Triangulation(points.len()))?
            .into_iter()
            .map(|i| i as u32)
            .collect();
        Ok(Self { points, indices })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Summed triangle area, for checking coverage.
    pub fn area(&self) -> f32 {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let a = self.points[tri[0] as usize];
                let b = self.points[tri[1] as usize];
                let c = self.points[tri[2] as usize];
                ((b - a).x * (c - a).y - (b - a).y * (c - a).x).abs() * 0.5
            })
            .sum()
    }
}

/// Flatten the first subpath of `path` into a polygon without a repeated
/// closing vertex.
pub fn flatten_polygon(path: &BezPath, tolerance: f64) -> Vec<Pos2> {
    let mut points = Vec::new();
    let mut started = false;
    let mut done = false;
    kurbo::flatten(path.iter(), tolerance, |el| {
        if done {
            return;
        }
        match el {
            PathEl::MoveTo(p) => {
                if started {
                    done = true;
                } else {
                    started = true;
                    points.push(Pos2::new(p.x as f32, p.y as f32));
                }
            }
            PathEl::LineTo(p) => points.push(Pos2::new(p.x as f32, p.y as f32)),
            PathEl::ClosePath => done = true,
            // flatten only emits lines
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        }
    });
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// [`Surface`] backed by an egui painter and a texture holding the puzzle image.
///
/// Clipping is done by triangulating the clip path and drawing the image as a
/// textured mesh over it. Only the most recent clip applies; nested clips are
/// not intersected.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    texture: TextureId,
    image_size: Vec2,
    /// Screen position of the surface's top-left corner.
    origin: Pos2,
    size: Vec2,
    background: Color32,
    tolerance: f64,
    clip: Option<ClipMesh>,
    saved: Vec<Option<ClipMesh>>,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, texture: TextureId, image_size: Vec2, rect: Rect) -> Self {
        Self {
            painter,
            texture,
            image_size,
            origin: rect.min,
            size: rect.size(),
            background: Color32::TRANSPARENT,
            tolerance: DEFAULT_FLATTEN_TOLERANCE,
            clip: None,
            saved: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color32) -> Self {
        self.background = background;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        self.origin + p.to_vec2()
    }

    fn uv(&self, source: Rect, dest: Rect, p: Pos2) -> Pos2 {
        let scale = source.size() / dest.size();
        let texel = source.min + (p - dest.min) * scale;
        Pos2::new(texel.x / self.image_size.x, texel.y / self.image_size.y)
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        if self.background != Color32::TRANSPARENT {
            self.painter.rect_filled(
                Rect::from_min_size(self.origin, self.size),
                0.0,
                self.background,
            );
        }
    }

    fn save(&mut self) {
        self.saved.push(self.clip.clone());
    }

    fn restore(&mut self) {
        self.clip = self.saved.pop().flatten();
    }

    fn clip(&mut self, path: &BezPath) {
        let mesh = ClipMesh::from_path(path, self.tolerance).unwrap_or_else(|err| {
            log::warn!("{}", err);
            ClipMesh::default()
        });
        self.clip = Some(mesh);
    }

    fn draw_image(&mut self, source: Rect, dest: Rect) {
        let Some(clip) = &self.clip else {
            let uv = Rect::from_min_max(
                Pos2::new(source.min.x / self.image_size.x, source.min.y / self.image_size.y),
                Pos2::new(source.max.x / self.image_size.x, source.max.y / self.image_size.y),
            );
            let screen = dest.translate(self.origin.to_vec2());
            self.painter.image(self.texture, screen, uv, Color32::WHITE);
            return;
        };
        if clip.indices.is_empty() {
            return;
        }

        let mut mesh = Mesh::with_texture(self.texture);
        mesh.vertices.extend(clip.points.iter().map(|&p| Vertex {
            pos: self.to_screen(p),
            uv: self.uv(source, dest, p),
            color: Color32::WHITE,
        }));
        mesh.indices.extend_from_slice(&clip.indices);
        self.painter.add(Shape::mesh(mesh));
    }

    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle) {
        let points: Vec<Pos2> = flatten_polygon(path, self.tolerance)
            .into_iter()
            .map(|p| self.to_screen(p))
            .collect();
        if points.len() < 2 {
            return;
        }
        self.painter.add(Shape::closed_line(
            points,
            egui::Stroke::new(style.width, style.color),
        ));
    }
}

use egui::Vec2;

/// Piece count used when the requested count is missing or unusable.
pub const DEFAULT_PIECE_COUNT: u32 = 25;
/// Share of the available viewport the puzzle surface may occupy.
pub const DEFAULT_VIEWPORT_FRACTION: f32 = 0.9;
/// Largest piece count a puzzle may be cut into.
pub const MAX_PIECE_COUNT: u32 = 1000;

/// Piece counts with a hand-picked grid.
pub const CANONICAL_GRIDS: [(u32, GridSize); 6] = [
    (10, GridSize { rows: 2, cols: 5 }),
    (25, GridSize { rows: 5, cols: 5 }),
    (50, GridSize { rows: 5, cols: 10 }),
    (100, GridSize { rows: 10, cols: 10 }),
    (250, GridSize { rows: 10, cols: 25 }),
    (500, GridSize { rows: 10, cols: 50 }),
];

/// Rows and columns of the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Grid for a requested piece count.
    ///
    /// Canonical counts come from [`CANONICAL_GRIDS`]. Anything else gets a
    /// square-ish grid of `round(sqrt(n))` rows and `ceil(n / rows)` columns,
    /// which can land above or below `n` (for 3 pieces it builds 2x2). A count
    /// of zero falls back to [`DEFAULT_PIECE_COUNT`], and counts above
    /// [`MAX_PIECE_COUNT`] are clamped to it.
    pub fn for_piece_count(count: u32) -> Self {
        let count = if count == 0 {
            log::warn!("Piece count 0 requested, using {}", DEFAULT_PIECE_COUNT);
            DEFAULT_PIECE_COUNT
        } else if count > MAX_PIECE_COUNT {
            log::warn!("Piece count {} requested, using {}", count, MAX_PIECE_COUNT);
            MAX_PIECE_COUNT
        } else {
            count
        };

        if let Some((_, grid)) = CANONICAL_GRIDS.iter().find(|(n, _)| *n == count) {
            return *grid;
        }

        let rows = ((count as f64).sqrt().round() as u32).max(1);
        let cols = count.div_ceil(rows);
        log::debug!("No canonical grid for {} pieces, using {}x{}", count, rows, cols);
        Self { rows, cols }
    }

    pub fn piece_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Row-major index of a cell.
    pub fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.cols as usize + col as usize
    }
}

/// Parse free-form piece-count input.
///
/// Blank, non-numeric, zero, negative or oversized (above
/// [`MAX_PIECE_COUNT`]) input yields [`DEFAULT_PIECE_COUNT`].
pub fn parse_piece_count(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(n) if n > 0 && n <= i64::from(MAX_PIECE_COUNT) => n as u32,
        _ => {
            log::warn!("Invalid piece count {:?}, using {}", input, DEFAULT_PIECE_COUNT);
            DEFAULT_PIECE_COUNT
        }
    }
}

/// Scale from image pixels to surface pixels.
///
/// Fits the image inside `viewport * fraction` and never upscales. A
/// collapsed viewport gives 0.
pub fn scale_factor(image_size: Vec2, viewport: Vec2, fraction: f32) -> f32 {
    let budget = viewport * fraction;
    (budget.x / image_size.x).min(budget.y / image_size.y).min(1.0)
}

/// Pixel geometry of the drawable surface and its pieces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub grid: GridSize,
    pub image_size: Vec2,
    pub scale_factor: f32,
    /// Size of the drawable surface.
    pub surface_size: Vec2,
    /// Rendered size of one piece.
    pub piece_size: Vec2,
    /// Size of one piece's region in the source image.
    pub source_piece_size: Vec2,
}

impl SurfaceLayout {
    pub fn compute(grid: GridSize, image_size: Vec2, viewport: Vec2, fraction: f32) -> Self {
        let scale_factor = scale_factor(image_size, viewport, fraction);
        Self::with_scale(grid, image_size, scale_factor)
    }

    pub fn with_scale(grid: GridSize, image_size: Vec2, scale_factor: f32) -> Self {
        let cells = Vec2::new(grid.cols as f32, grid.rows as f32);
        let surface_size = image_size * scale_factor;
        Self {
            grid,
            image_size,
            scale_factor,
            surface_size,
            piece_size: surface_size / cells,
            source_piece_size: image_size / cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_grids() {
        assert_eq!(GridSize::for_piece_count(10), GridSize::new(2, 5));
        assert_eq!(GridSize::for_piece_count(25), GridSize::new(5, 5));
        assert_eq!(GridSize::for_piece_count(50), GridSize::new(5, 10));
        assert_eq!(GridSize::for_piece_count(100), GridSize::new(10, 10));
        assert_eq!(GridSize::for_piece_count(250), GridSize::new(10, 25));
        assert_eq!(GridSize::for_piece_count(500), GridSize::new(10, 50));
    }

    #[test]
    fn test_fallback_grid_is_approximate() {
        // 12 -> round(3.46) = 3 rows, 4 cols: exact
        assert_eq!(GridSize::for_piece_count(12), GridSize::new(3, 4));
        // 3 -> round(1.73) = 2 rows, 2 cols: overshoots
        assert_eq!(GridSize::for_piece_count(3), GridSize::new(2, 2));
        // 1 -> a single piece
        assert_eq!(GridSize::for_piece_count(1), GridSize::new(1, 1));
        // 7 -> 3 rows, 3 cols
        assert_eq!(GridSize::for_piece_count(7).piece_count(), 9);
    }

    #[test]
    fn test_zero_count_uses_default() {
        assert_eq!(GridSize::for_piece_count(0), GridSize::new(5, 5));
    }

    #[test]
    fn test_parse_piece_count() {
        assert_eq!(parse_piece_count("100"), 100);
        assert_eq!(parse_piece_count(" 50 "), 50);
        assert_eq!(parse_piece_count(""), DEFAULT_PIECE_COUNT);
        assert_eq!(parse_piece_count("lots"), DEFAULT_PIECE_COUNT);
        assert_eq!(parse_piece_count("0"), DEFAULT_PIECE_COUNT);
        assert_eq!(parse_piece_count("-4"), DEFAULT_PIECE_COUNT);
        assert_eq!(parse_piece_count("1000"), MAX_PIECE_COUNT);
        assert_eq!(parse_piece_count("1001"), DEFAULT_PIECE_COUNT);
        assert_eq!(parse_piece_count("99999999999"), DEFAULT_PIECE_COUNT);
    }

    #[test]
    fn test_oversized_count_is_clamped() {
        let grid = GridSize::for_piece_count(u32::MAX);
        assert_eq!(grid, GridSize::for_piece_count(MAX_PIECE_COUNT));
        assert!(grid.piece_count() <= 1024);
    }

    #[test]
    fn test_scale_never_upscales() {
        let image = Vec2::new(200.0, 100.0);
        for viewport in [
            Vec2::new(10.0, 10.0),
            Vec2::new(300.0, 120.0),
            Vec2::new(5000.0, 5000.0),
            Vec2::new(100_000.0, 1.0),
        ] {
            let scale = scale_factor(image, viewport, DEFAULT_VIEWPORT_FRACTION);
            assert!(scale <= 1.0, "scale {} for {:?}", scale, viewport);
            assert!(scale > 0.0);
        }
        assert_eq!(scale_factor(image, Vec2::new(5000.0, 5000.0), 0.9), 1.0);
        assert_eq!(scale_factor(image, Vec2::ZERO, 0.9), 0.0);
    }

    #[test]
    fn test_scale_fits_tighter_axis() {
        // Budget 180x90 -> min(0.9, 0.9)
        let scale = scale_factor(Vec2::new(400.0, 200.0), Vec2::new(200.0, 100.0), 0.9);
        assert!((scale - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_large_image_stays_inside_budget() {
        let image = Vec2::new(100_000.0, 80_000.0);
        let viewport = Vec2::new(50.0, 40.0);
        let layout = SurfaceLayout::compute(GridSize::new(5, 5), image, viewport, 0.9);
        assert!(layout.surface_size.x <= 45.0 + 1e-3);
        assert!(layout.surface_size.y <= 36.0 + 1e-3);
    }

    #[test]
    fn test_layout_piece_sizes() {
        let layout = SurfaceLayout::with_scale(GridSize::new(2, 5), Vec2::new(200.0, 100.0), 0.5);
        assert_eq!(layout.surface_size, Vec2::new(100.0, 50.0));
        assert_eq!(layout.piece_size, Vec2::new(20.0, 25.0));
        assert_eq!(layout.source_piece_size, Vec2::new(40.0, 50.0));
    }
}

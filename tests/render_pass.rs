use eframe_jigsaw::assembly::assemble;
use eframe_jigsaw::outline::{TAB_SIZE_RATIO, piece_outline};
use eframe_jigsaw::render::image_rects;
use eframe_jigsaw::{
    DrawOp, GridSize, Orientation, PieceId, PuzzleSession, RecordingSurface, Renderer, SeamMap,
    StrokeStyle, SurfaceLayout,
};
use egui::{Color32, Pos2, Vec2};
use kurbo::Shape;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn session(seed: u64) -> PuzzleSession {
    let grid = GridSize::new(2, 3);
    let layout = SurfaceLayout::with_scale(grid, Vec2::new(300.0, 200.0), 0.5);
    let mut rng = StdRng::seed_from_u64(seed);
    let seams = SeamMap::generate(grid, &mut rng);
    let pieces = assemble(&layout, &seams);
    PuzzleSession::from_parts(layout, 0.9, seams, pieces, 20.0, 0.0)
}

fn drawn_order(ops: &[DrawOp]) -> Vec<Pos2> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::DrawImage { dest, .. } => Some(dest.center()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_render_pass_sequence() {
    let session = session(1);
    let mut surface = RecordingSurface::new(session.layout().surface_size);
    let style = StrokeStyle {
        width: 3.0,
        color: Color32::RED,
    };
    Renderer::new(style).render(&mut surface, session.pieces());

    let ops = surface.ops();
    assert_eq!(ops.len(), 1 + 5 * session.pieces().len());
    assert_eq!(
        ops[0],
        DrawOp::Clear {
            size: Vec2::new(150.0, 100.0)
        }
    );
    for (chunk, piece) in ops[1..].chunks(5).zip(session.pieces()) {
        let outline = piece_outline(piece.rect(), piece.edges());
        let (source, dest) = image_rects(piece);
        assert_eq!(
            chunk,
            &[
                DrawOp::Save,
                DrawOp::Clip(outline.clone()),
                DrawOp::DrawImage { source, dest },
                DrawOp::Restore,
                DrawOp::Stroke {
                    path: outline,
                    style
                },
            ]
        );
    }
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn test_picked_piece_is_drawn_last() {
    let mut session = session(2);
    let renderer = Renderer::default();
    // Centre of piece (0,0): 50x50 cells at scale 0.5.
    let picked = session.pointer_down(Pos2::new(25.0, 25.0)).unwrap();
    assert_eq!(picked, PieceId::new(0, 0));

    let mut surface = RecordingSurface::new(session.layout().surface_size);
    renderer.render(&mut surface, session.pieces());
    let order = drawn_order(surface.ops());
    let rect = session.piece(picked).unwrap().rect();
    assert_eq!(order.last().copied(), Some(rect.center()));
}

#[test]
fn test_source_rect_uses_rendered_bleed() {
    let session = session(3);
    let piece = session.piece(PieceId::new(1, 2)).unwrap();
    let (source, dest) = image_rects(piece);
    // Rendered 50x50, source 100x100, bleed 50/4 on both.
    assert_eq!(source.min, Pos2::new(187.5, 87.5));
    assert_eq!(source.size(), Vec2::new(125.0, 125.0));
    assert_eq!(dest.min, Pos2::new(87.5, 37.5));
    assert_eq!(dest.size(), Vec2::new(75.0, 75.0));
}

#[test]
fn test_outline_tabs_follow_orientation() {
    let session = session(4);
    let piece = session.piece(PieceId::new(0, 1)).unwrap();
    let rect = piece.rect();
    let bounds = piece_outline(rect, piece.edges()).bounding_box();
    let base = rect.width().min(rect.height()) as f64 * TAB_SIZE_RATIO;

    let right = piece.edges().right;
    let expected_right = match right.orientation {
        Orientation::Out => rect.max.x as f64 + base * right.depth as f64,
        _ => rect.max.x as f64,
    };
    assert!((bounds.x1 - expected_right).abs() < 1e-3, "{:?}", bounds);

    // Top row: flat top, so nothing pokes above the rectangle.
    assert!((bounds.y0 - rect.min.y as f64).abs() < 1e-9);
}

#[test]
fn test_neighbour_outlines_meet() {
    let session = session(5);
    let left = session.piece(PieceId::new(0, 0)).unwrap();
    let right = session.piece(PieceId::new(0, 1)).unwrap();
    let a = piece_outline(left.rect(), left.edges());
    let b = piece_outline(right.rect(), right.edges());

    // Exactly one side of the shared seam reaches past its rectangle.
    let a_reach = a.bounding_box().x1 - left.rect().max.x as f64;
    let b_reach = right.rect().min.x as f64 - b.bounding_box().x0;
    match left.edges().right.orientation {
        Orientation::Out => {
            assert!(a_reach > 0.0);
            assert!(b_reach.abs() < 1e-9);
        }
        _ => {
            assert!(a_reach.abs() < 1e-9);
            assert!(b_reach > 0.0);
        }
    }
}

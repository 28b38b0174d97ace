//! Curved piece outlines.
//!
//! A piece outline walks the four corners clockwise from the top-left. Flat
//! sides are a single line. Tabbed sides run straight to the tab span, cross
//! it with one cubic shaped like a circular arc, then run straight to the
//! next corner.

use egui::Rect;
use kurbo::{BezPath, Point, Vec2};

use crate::edge::Edge;
use crate::piece::PieceEdges;

/// Base bulge depth as a share of the piece's shorter side.
pub const TAB_SIZE_RATIO: f64 = 0.2;
/// Half-width of the tab span as a share of the side length.
pub const TAB_SPAN_RATIO: f64 = 0.25;

/// Control point offset for a cubic approximating a circular arc.
///
/// `half_chord` is `c` and `bulge` is `r`. The arc radius is
/// `R = (r² + c²) / 2r`, its half-angle `α = asin(c / R)`, and the offset is
/// `(4/3)·tan(α/2)·c`. For `r <= c` the cubic's apex sits exactly `r` from
/// the chord.
pub fn tab_control_offset(half_chord: f64, bulge: f64) -> f64 {
    let radius = (bulge * bulge + half_chord * half_chord) / (2.0 * bulge);
    let alpha = (half_chord / radius).clamp(-1.0, 1.0).asin();
    (4.0 / 3.0) * (alpha / 2.0).tan() * half_chord
}

struct Side {
    start: Point,
    end: Point,
    /// Unit normal pointing away from the piece.
    outward: Vec2,
}

/// Closed outline of a piece occupying `rect`.
pub fn piece_outline(rect: Rect, edges: &PieceEdges) -> BezPath {
    let x0 = rect.min.x as f64;
    let y0 = rect.min.y as f64;
    let x1 = rect.max.x as f64;
    let y1 = rect.max.y as f64;
    let base_tab = (rect.width().min(rect.height()) as f64) * TAB_SIZE_RATIO;

    let sides = [
        (
            Side {
                start: Point::new(x0, y0),
                end: Point::new(x1, y0),
                outward: Vec2::new(0.0, -1.0),
            },
            &edges.top,
        ),
        (
            Side {
                start: Point::new(x1, y0),
                end: Point::new(x1, y1),
                outward: Vec2::new(1.0, 0.0),
            },
            &edges.right,
        ),
        (
            Side {
                start: Point::new(x1, y1),
                end: Point::new(x0, y1),
                outward: Vec2::new(0.0, 1.0),
            },
            &edges.bottom,
        ),
        (
            Side {
                start: Point::new(x0, y1),
                end: Point::new(x0, y0),
                outward: Vec2::new(-1.0, 0.0),
            },
            &edges.left,
        ),
    ];

    let mut path = BezPath::new();
    path.move_to((x0, y0));
    for (side, edge) in &sides {
        append_side(&mut path, side, edge, base_tab);
    }
    path.close_path();
    path
}

fn append_side(path: &mut BezPath, side: &Side, edge: &Edge, base_tab: f64) {
    let sign = edge.orientation.sign() as f64;
    let bulge = base_tab * edge.depth as f64;
    if sign == 0.0 || !bulge.is_finite() || bulge <= 0.0 {
        path.line_to(side.end);
        return;
    }

    let chord = side.end - side.start;
    let length = chord.hypot();
    if length <= 0.0 {
        path.line_to(side.end);
        return;
    }
    let along = chord / length;
    let half_chord = length * TAB_SPAN_RATIO;
    let mid = side.start.midpoint(side.end);
    let a = mid - along * half_chord;
    let b = mid + along * half_chord;
    let lift = side.outward * (sign * tab_control_offset(half_chord, bulge));

    path.line_to(a);
    path.curve_to(a + lift, b + lift, b);
    path.line_to(side.end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Orientation;
    use egui::{Pos2, Vec2 as EVec2};
    use kurbo::{CubicBez, ParamCurve, PathEl, Shape};

    fn tab(orientation: Orientation, depth: f32) -> Edge {
        Edge {
            orientation,
            depth,
            curve_factor: 1.0,
            width_variation: 1.0,
        }
    }

    fn square() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 20.0), EVec2::new(100.0, 100.0))
    }

    #[test]
    fn test_control_offset_puts_apex_at_bulge() {
        let c = 25.0;
        let r = 20.0;
        let d = tab_control_offset(c, r);
        let curve = CubicBez::new((0.0, 0.0), (0.0, d), (2.0 * c, d), (2.0 * c, 0.0));
        let apex = curve.eval(0.5);
        assert!((apex.y - r).abs() < 1e-9, "apex {}", apex.y);
        assert!((d - 4.0 / 3.0 * r).abs() < 1e-9);
    }

    #[test]
    fn test_flat_piece_is_rectangle() {
        let path = piece_outline(square(), &PieceEdges::default());
        let elements = path.elements();
        assert_eq!(elements.len(), 6);
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(10.0, 20.0)));
        assert_eq!(elements[1], PathEl::LineTo(Point::new(110.0, 20.0)));
        assert_eq!(elements[2], PathEl::LineTo(Point::new(110.0, 120.0)));
        assert_eq!(elements[3], PathEl::LineTo(Point::new(10.0, 120.0)));
        assert_eq!(elements[4], PathEl::LineTo(Point::new(10.0, 20.0)));
        assert_eq!(elements[5], PathEl::ClosePath);
    }

    #[test]
    fn test_out_tab_bulges_beyond_rect() {
        let edges = PieceEdges {
            top: tab(Orientation::Out, 1.0),
            ..PieceEdges::default()
        };
        let path = piece_outline(square(), &edges);
        let bbox = path.bounding_box();
        // base tab = 20, apex 20 above the top side
        assert!((bbox.y0 - 0.0).abs() < 1e-6, "top {}", bbox.y0);
        assert_eq!(bbox.y1, 120.0);
        assert_eq!(bbox.x0, 10.0);
        assert_eq!(bbox.x1, 110.0);

        let curve = path.elements().iter().find_map(|el| match *el {
            PathEl::CurveTo(p1, p2, p3) => Some((p1, p2, p3)),
            _ => None,
        });
        let (p1, p2, p3) = curve.expect("tab curve");
        assert_eq!(p1.x, 35.0);
        assert_eq!(p2.x, 85.0);
        assert_eq!(p3, Point::new(85.0, 20.0));
        assert!(p1.y < 20.0);
    }

    #[test]
    fn test_in_tab_dents_inside_rect() {
        let edges = PieceEdges {
            right: tab(Orientation::In, 1.2),
            ..PieceEdges::default()
        };
        let path = piece_outline(square(), &edges);
        let bbox = path.bounding_box();
        assert_eq!(bbox.x1, 110.0);
        // The dent reaches 24 units into the piece.
        let dented = CubicBez::new(
            (110.0, 45.0),
            (110.0 - tab_control_offset(25.0, 24.0), 45.0),
            (110.0 - tab_control_offset(25.0, 24.0), 95.0),
            (110.0, 95.0),
        );
        assert!((dented.eval(0.5).x - 86.0).abs() < 1e-6);
        assert!(path.contains(Point::new(80.0, 70.0)));
        assert!(!path.contains(Point::new(100.0, 70.0)));
    }

    #[test]
    fn test_zero_depth_is_flat() {
        let edges = PieceEdges {
            bottom: tab(Orientation::Out, 0.0),
            ..PieceEdges::default()
        };
        let path = piece_outline(square(), &edges);
        assert!(!path.elements().iter().any(|el| matches!(el, PathEl::CurveTo(..))));
    }

    #[test]
    fn test_mated_edges_share_a_curve() {
        // Piece A's right side and piece B's left side describe the same seam.
        let seam = tab(Orientation::Out, 1.1);
        let left_rect = Rect::from_min_size(Pos2::new(0.0, 0.0), EVec2::new(40.0, 50.0));
        let right_rect = Rect::from_min_size(Pos2::new(40.0, 0.0), EVec2::new(40.0, 50.0));
        let a = piece_outline(
            left_rect,
            &PieceEdges {
                right: seam,
                ..PieceEdges::default()
            },
        );
        let b = piece_outline(
            right_rect,
            &PieceEdges {
                left: seam.inverted(),
                ..PieceEdges::default()
            },
        );

        let curves = |path: &BezPath| -> Vec<(Point, Point, Point)> {
            path.elements()
                .iter()
                .filter_map(|el| match *el {
                    PathEl::CurveTo(p1, p2, p3) => Some((p1, p2, p3)),
                    _ => None,
                })
                .collect()
        };
        let (a1, a2, a3) = curves(&a)[0];
        let (b1, b2, b3) = curves(&b)[0];
        // B walks the seam in the opposite direction.
        assert!((a1 - b2).hypot() < 1e-9);
        assert!((a2 - b1).hypot() < 1e-9);
        assert!((a3.y - 37.5).abs() < 1e-9);
        assert!((b3.y - 12.5).abs() < 1e-9);
    }
}

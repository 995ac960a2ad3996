use super::*;

const ALL: [ShapeKind; 4] = [
    ShapeKind::Circle,
    ShapeKind::Square,
    ShapeKind::Triangle,
    ShapeKind::Hexagon,
];

#[test]
fn circle_points_lie_on_radius() {
    let p = ShapeKind::Circle.outline(40.0, Tessellation::default());
    assert_eq!(p.len(), 48);
    for pt in p.points() {
        assert!((pt.to_vec2().hypot() - 40.0).abs() < 1e-9);
    }
}

#[test]
fn square_corners_sit_at_half_side() {
    let tess = Tessellation {
        circle_segments: 48,
        edge_segments: 1,
    };
    let p = ShapeKind::Square.outline(10.0, tess);
    assert_eq!(p.len(), 4);
    for pt in p.points() {
        assert!((pt.x.abs() - 10.0).abs() < 1e-9);
        assert!((pt.y.abs() - 10.0).abs() < 1e-9);
    }
}

#[test]
fn edges_are_subdivided() {
    let tess = Tessellation::default();
    assert_eq!(ShapeKind::Square.outline(5.0, tess).len(), 48);
    assert_eq!(ShapeKind::Triangle.outline(5.0, tess).len(), 36);
    assert_eq!(ShapeKind::Hexagon.outline(5.0, tess).len(), 72);
}

#[test]
fn triangle_points_up() {
    let tess = Tessellation {
        circle_segments: 48,
        edge_segments: 1,
    };
    let p = ShapeKind::Triangle.outline(10.0, tess);
    let top = p.points()[0];
    assert!(top.x.abs() < 1e-9);
    assert!((top.y + 10.0).abs() < 1e-9);
}

#[test]
fn every_kind_is_centered_and_grows_with_size() {
    for kind in ALL {
        let small = kind.outline(10.0, Tessellation::default());
        let big = kind.outline(20.0, Tessellation::default());
        let c = small.centroid().unwrap();
        assert!(c.to_vec2().hypot() < 1e-6, "{kind:?} centroid {c:?}");
        assert!(big.signed_area().abs() > small.signed_area().abs() * 3.9);
        assert!(small.points().iter().all(|&p| big.contains(p)));
    }
}

#[test]
fn tessellation_is_clamped() {
    let t = Tessellation {
        circle_segments: 2,
        edge_segments: 0,
    }
    .clamped();
    assert_eq!(t.circle_segments, Tessellation::MIN_CIRCLE_SEGMENTS);
    assert_eq!(t.edge_segments, 1);
}

use super::*;
use crate::{
    color::interp::ColorPair,
    scene::params::{ColorStops, GradientParams, ShadowParams, TextureParams},
};

fn params(n: u32) -> Params {
    Params {
        layer_count: n,
        ..Params::default()
    }
}

#[test]
fn produces_n_minus_one_layers_outer_to_inner() {
    for n in [2u32, 3, 5, 10, 20] {
        let p = params(n);
        let layers = LayerBuilder::new(&p).unwrap().build();
        assert_eq!(layers.len(), (n - 1) as usize);
        let indices: Vec<u32> = layers.iter().map(|l| l.index).collect();
        let expected: Vec<u32> = (2..=n).rev().collect();
        assert_eq!(indices, expected);
        for w in layers.windows(2) {
            assert!(w[0].geometry.size > w[1].geometry.size);
        }
    }
}

#[test]
fn fewer_than_two_layers_builds_nothing() {
    let p = params(1);
    assert!(LayerBuilder::new(&p).unwrap().build().is_empty());
}

#[test]
fn rotation_increases_inwards_and_stops_short_at_layer_two() {
    let n = 10;
    let rot: Vec<f64> = (2..=n).rev().map(|i| rotation_deg(i, n, 35.0)).collect();
    assert_eq!(rot[0], 0.0);
    for w in rot.windows(2) {
        assert!(w[0] < w[1]);
    }
    let at_two = rotation_deg(2, n, 35.0);
    assert!((at_two - 35.0 * 8.0 / 9.0).abs() < 1e-12);
    assert!(at_two < 35.0);
    assert_eq!(rotation_deg(1, n, 35.0), 35.0);
}

#[test]
fn t_runs_zero_to_one_and_single_layer_is_zero() {
    assert_eq!(layer_t(10, 10), 0.0);
    assert_eq!(layer_t(2, 10), 1.0);
    assert!((layer_t(6, 10) - 0.5).abs() < 1e-12);
    assert_eq!(layer_t(2, 2), 0.0);
}

#[test]
fn three_layer_square_colors_are_exact_greys() {
    let p = Params {
        shape: ShapeKind::Square,
        layer_count: 3,
        colors: ColorStops::Single(ColorPair::new(Rgb8::BLACK, Rgb8::WHITE)),
        ..Params::default()
    };
    let layers = LayerBuilder::new(&p).unwrap().build();
    let fills: Vec<FillRequest> = layers.iter().map(|l| l.fill).collect();
    assert_eq!(
        fills,
        vec![FillRequest::Solid(Rgb8::BLACK), FillRequest::Solid(Rgb8::WHITE)]
    );

    let p = Params {
        layer_count: 4,
        ..p
    };
    let layers = LayerBuilder::new(&p).unwrap().build();
    assert_eq!(layers[1].fill, FillRequest::Solid(Rgb8::new(128, 128, 128)));
}

#[test]
fn nominal_size_is_index_times_scale() {
    let p = Params {
        layer_count: 5,
        layer_scale: 20.0,
        ..Params::default()
    };
    let sizes: Vec<f64> = LayerBuilder::new(&p)
        .unwrap()
        .build()
        .iter()
        .map(|l| l.geometry.size)
        .collect();
    assert_eq!(sizes, vec![100.0, 80.0, 60.0, 40.0]);
}

#[test]
fn conflicting_fill_modes_are_rejected() {
    let p = Params {
        texture: TextureParams {
            enabled: true,
            ..TextureParams::default()
        },
        gradient: GradientParams {
            enabled: true,
            ..GradientParams::default()
        },
        ..Params::default()
    };
    assert!(LayerBuilder::new(&p).is_err());
}

#[test]
fn differently_coloured_layers_get_distinct_seeds() {
    let p = Params {
        layer_count: 6,
        colors: ColorStops::Single(ColorPair::new(Rgb8::BLACK, Rgb8::WHITE)),
        texture: TextureParams {
            enabled: true,
            seed: 3,
            ..TextureParams::default()
        },
        ..Params::default()
    };
    let layers = LayerBuilder::new(&p).unwrap().build();
    let mut seeds = std::collections::HashSet::new();
    for l in &layers {
        match l.fill {
            FillRequest::Textured(r) => {
                assert!(seeds.insert(r.seed));
            }
            other => panic!("expected textured fill, got {other:?}"),
        }
    }
}

#[test]
fn same_coloured_layers_share_a_seed() {
    let p = Params {
        layer_count: 5,
        colors: ColorStops::Single(ColorPair::new(Rgb8::BLACK, Rgb8::new(3, 3, 3))),
        texture: TextureParams {
            enabled: true,
            seed: 3,
            ..TextureParams::default()
        },
        ..Params::default()
    };
    let layers = LayerBuilder::new(&p).unwrap().build();
    let seeds: std::collections::HashSet<u64> = layers
        .iter()
        .filter_map(|l| match l.fill {
            FillRequest::Textured(r) => Some(r.seed),
            _ => None,
        })
        .collect();
    assert_eq!(seeds.len(), 1);

    let other = Params {
        texture: TextureParams {
            seed: 4,
            ..p.texture
        },
        ..p
    };
    let FillRequest::Textured(r) = LayerBuilder::new(&other).unwrap().build()[0].fill else {
        panic!("expected textured fill");
    };
    assert!(!seeds.contains(&r.seed));
}

#[test]
fn gradient_fill_blends_primary_to_secondary() {
    let p = Params {
        layer_count: 3,
        colors: ColorStops::Dual {
            primary: ColorPair::new(Rgb8::BLACK, Rgb8::WHITE),
            secondary: ColorPair::new(Rgb8::new(255, 0, 0), Rgb8::new(0, 0, 255)),
        },
        gradient: GradientParams {
            enabled: true,
            ..GradientParams::default()
        },
        ..Params::default()
    };
    let layers = LayerBuilder::new(&p).unwrap().build();
    let FillRequest::Gradient(outer) = layers[0].fill else {
        panic!("expected gradient fill");
    };
    assert_eq!(outer.from, Rgb8::BLACK);
    assert_eq!(outer.to, Rgb8::new(255, 0, 0));
    assert!(layers[0].fill.tile_request().is_some());
}

#[test]
fn shadow_progression_scales_with_t() {
    let p = Params {
        layer_count: 3,
        shadow: ShadowParams {
            enabled: true,
            offset_x: 2.0,
            offset_y: -4.0,
            blur_final: 10.0,
            size_multiplier_final: 2.5,
            ..ShadowParams::default()
        },
        ..Params::default()
    };
    let layers = LayerBuilder::new(&p).unwrap().build();
    let outer = layers[0].shadow.unwrap();
    let inner = layers[1].shadow.unwrap();
    assert_eq!(outer.multiplier, MIN_SHADOW_MULTIPLIER);
    assert_eq!(inner.multiplier, 2.5);
    assert_eq!((outer.dx, outer.dy, outer.blur), (1.0, -2.0, 5.0));
    assert_eq!((inner.dx, inner.dy, inner.blur), (5.0, -10.0, 25.0));
    assert_eq!(outer.opacity, SHADOW_OPACITY);
    assert_eq!(inner.opacity, SHADOW_OPACITY);
}

#[test]
fn boundary_is_rotated_about_canvas_center() {
    let req = GeometryRequest {
        kind: ShapeKind::Square,
        size: 10.0,
        rotation_deg: 45.0,
        center: Point::new(100.0, 100.0),
    };
    let tess = Tessellation {
        circle_segments: 48,
        edge_segments: 1,
    };
    let b = req.boundary(tess);
    // A square rotated by 45 degrees puts its corners on the axes.
    let first = b.points()[0];
    assert!((first.x - 100.0).abs() < 1e-9);
    assert!((first.y - (100.0 + 10.0 * std::f64::consts::SQRT_2)).abs() < 1e-9);
}

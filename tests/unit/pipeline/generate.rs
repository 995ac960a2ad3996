use super::*;
use crate::{
    color::interp::ColorPair,
    scene::params::{ColorStops, GradientParams, ShadowParams, TextureParams},
};

#[test]
fn default_params_nest_every_inner_layer_under_its_own_clip() {
    let scene = generate(&Params::default()).unwrap();
    assert_eq!(scene.layer_count(), 9);
    assert_eq!(scene.root.clip.as_deref(), Some(GLOBAL_CLIP_ID));
    assert_eq!(scene.defs.clips.len(), 9);

    let layers = scene.layers();
    assert_eq!(layers[0].0.index, 10);
    assert!(layers[0].1.is_none());
    for (layer, clip) in &layers[1..] {
        let expected = format!("pc-clip-{}", layer.index);
        assert_eq!(*clip, Some(expected.as_str()));
        assert!(scene.defs.clip(&expected).is_some());
    }
}

#[test]
fn distinctly_coloured_layers_each_synthesize_a_tile() {
    let params = Params {
        layer_count: 14,
        texture: TextureParams {
            enabled: true,
            tile_size: 16,
            ..TextureParams::default()
        },
        ..Params::default()
    };
    let mut g = Generator::default();
    let scene = g.generate(&params).unwrap();

    let stats = g.cache_stats();
    assert_eq!(stats.tiles.misses, 13);
    assert_eq!(stats.tiles.hits, 0);
    assert_eq!(stats.tiles.evictions, 3);
    assert_eq!(stats.tiles.retained, 10);
    assert_eq!(scene.defs.patterns.len(), 13);
    assert!(
        scene
            .defs
            .patterns
            .iter()
            .all(|p| p.mapping == PatternMapping::Tiled)
    );
    for (layer, _) in scene.layers() {
        let Paint::Pattern(id) = &layer.fill else {
            panic!("expected pattern fill");
        };
        assert!(scene.defs.pattern(id).is_some());
    }
}

#[test]
fn same_coloured_layers_share_one_tile() {
    let params = Params {
        layer_count: 12,
        colors: ColorStops::Single(ColorPair::new(Rgb8::BLACK, Rgb8::BLACK)),
        texture: TextureParams {
            enabled: true,
            tile_size: 16,
            ..TextureParams::default()
        },
        ..Params::default()
    };
    let mut g = Generator::default();
    let scene = g.generate(&params).unwrap();

    let stats = g.cache_stats();
    assert_eq!(stats.tiles.misses, 1);
    assert_eq!(stats.tiles.hits, 10);
    assert_eq!(stats.tiles.evictions, 0);
    assert_eq!(scene.defs.patterns.len(), 1);
    let id = &scene.defs.patterns[0].id;
    for (layer, _) in scene.layers() {
        assert_eq!(layer.fill, Paint::Pattern(id.clone()));
    }
}

#[test]
fn tile_cache_capacity_follows_opts() {
    let opts = GeneratorOpts {
        tile_cache_capacity: 2,
        ..GeneratorOpts::default()
    };
    let mut g = Generator::new(opts);
    assert_eq!(g.opts(), opts);

    let params = Params {
        layer_count: 6,
        texture: TextureParams {
            enabled: true,
            tile_size: 8,
            ..TextureParams::default()
        },
        ..Params::default()
    };
    g.generate(&params).unwrap();
    let stats = g.cache_stats();
    assert_eq!(stats.tiles.misses, 5);
    assert_eq!(stats.tiles.evictions, 3);
    assert_eq!(stats.tiles.retained, 2);
}

#[test]
fn caches_reset_between_generations() {
    let params = Params {
        layer_count: 4,
        gradient: GradientParams {
            enabled: true,
            ..GradientParams::default()
        },
        texture: TextureParams {
            tile_size: 16,
            ..TextureParams::default()
        },
        ..Params::default()
    };
    let mut g = Generator::default();
    g.generate(&params).unwrap();
    let first = g.cache_stats();
    g.generate(&params).unwrap();
    assert_eq!(g.cache_stats(), first);
    assert_eq!(first.tiles.misses, 3);
}

#[test]
fn identical_shadows_share_one_filter() {
    let params = Params {
        layer_count: 6,
        shadow: ShadowParams {
            enabled: true,
            offset_x: 0.0,
            offset_y: 0.0,
            blur_final: 0.0,
            ..ShadowParams::default()
        },
        ..Params::default()
    };
    let mut g = Generator::default();
    let scene = g.generate(&params).unwrap();
    assert_eq!(scene.defs.filters.len(), 1);
    assert_eq!(g.cache_stats().filters.hits, 4);
    let id = &scene.defs.filters[0].id;
    for (layer, _) in scene.layers() {
        assert_eq!(layer.filter.as_ref(), Some(id));
    }
}

#[test]
fn conflicting_fill_modes_fail_generation() {
    let params = Params {
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
    assert!(generate(&params).is_err());
}

#[test]
fn too_few_layers_yields_an_empty_scene() {
    let params = Params {
        layer_count: 1,
        ..Params::default()
    };
    let scene = generate(&params).unwrap();
    assert_eq!(scene.layer_count(), 0);
    assert!(scene.root.clip.is_none());
    assert!(scene.defs.clips.is_empty());
}

#[test]
fn warp_radii_follow_the_seed() {
    let a = generate(&Params {
        seed: 11,
        ..Params::default()
    })
    .unwrap();
    let b = generate(&Params {
        seed: 11,
        ..Params::default()
    })
    .unwrap();
    assert_eq!(a.warp, b.warp);
    assert_eq!(a.layers()[0].0.boundary, b.layers()[0].0.boundary);
}

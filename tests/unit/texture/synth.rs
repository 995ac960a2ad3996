use super::*;

fn flat(intensity: f64, seed: u64) -> FlatTextureRequest {
    FlatTextureRequest {
        base: Rgb8::new(120, 64, 200),
        intensity,
        scale: 24.0,
        octaves: 4,
        seed,
        size: 32,
    }
}

fn gradient(intensity: f64, seed: u64) -> NoiseGradientRequest {
    NoiseGradientRequest {
        from: Rgb8::BLACK,
        to: Rgb8::WHITE,
        intensity,
        scale: 16.0,
        octaves: 3,
        seed,
        size: 64,
    }
}

#[test]
fn zero_intensity_texture_equals_base_color() {
    let req = flat(0.0, 11);
    let tile = synthesize_flat(&req).unwrap();
    assert!(tile.pixels().all(|p| p == req.base));
}

#[test]
fn textured_tile_varies_within_intensity_band() {
    let req = flat(30.0, 11);
    let tile = synthesize_flat(&req).unwrap();
    let mut distinct = std::collections::HashSet::new();
    for p in tile.pixels() {
        distinct.insert(p);
        for (c, base) in p.channels().into_iter().zip(req.base.channels()) {
            assert!((i32::from(c) - i32::from(base)).abs() <= 30);
        }
    }
    assert!(distinct.len() > 4);
}

#[test]
fn channels_clamp_at_extremes() {
    let req = FlatTextureRequest {
        base: Rgb8::new(250, 5, 128),
        intensity: 255.0,
        ..flat(0.0, 3)
    };
    // Would overflow u8 without clamping.
    let tile = synthesize_flat(&req).unwrap();
    assert!(tile.pixels().any(|p| p.r == 255 || p.g == 0));
}

#[test]
fn nonpositive_scale_is_rejected() {
    let req = FlatTextureRequest {
        scale: 0.0,
        ..flat(10.0, 1)
    };
    assert!(synthesize_flat(&req).is_err());
    let req = NoiseGradientRequest {
        scale: -3.0,
        ..gradient(0.2, 1)
    };
    assert!(synthesize_gradient(&req).is_err());
}

#[test]
fn seed_changes_texture() {
    let a = synthesize_flat(&flat(40.0, 1)).unwrap();
    let b = synthesize_flat(&flat(40.0, 2)).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, synthesize_flat(&flat(40.0, 1)).unwrap());
}

#[test]
fn undistorted_gradient_is_radial() {
    let tile = synthesize_gradient(&gradient(0.0, 5)).unwrap();
    let center = tile.pixel(32, 32).unwrap();
    let corner = tile.pixel(0, 0).unwrap();
    assert!(center.r < 10);
    assert!(corner.r > 240);
    // Symmetric about the center.
    assert_eq!(tile.pixel(10, 20), tile.pixel(53, 43));
}

#[test]
fn noise_distorts_gradient_position() {
    let plain = synthesize_gradient(&gradient(0.0, 5)).unwrap();
    let warped = synthesize_gradient(&gradient(0.4, 5)).unwrap();
    let differing = plain
        .pixels()
        .zip(warped.pixels())
        .filter(|(a, b)| a != b)
        .count();
    assert!(differing > 64 * 64 / 4);
}

#[test]
fn cache_keys_bucket_near_identical_requests() {
    let a = TileRequest::Flat(flat(10.0, 1));
    let b = TileRequest::Flat(FlatTextureRequest {
        intensity: 10.1,
        base: Rgb8::new(121, 65, 201),
        ..flat(10.0, 1)
    });
    let c = TileRequest::Flat(flat(10.0, 2));
    assert_eq!(a.cache_key(), b.cache_key());
    assert_ne!(a.cache_key(), c.cache_key());
    assert_ne!(
        a.cache_key(),
        TileRequest::Gradient(gradient(10.0, 1)).cache_key()
    );
}

#[test]
fn appearance_key_ignores_seed_but_not_colour() {
    assert_eq!(flat(10.0, 1).appearance_key(), flat(10.0, 2).appearance_key());
    let recoloured = FlatTextureRequest {
        base: Rgb8::new(60, 64, 200),
        ..flat(10.0, 1)
    };
    assert_ne!(flat(10.0, 1).appearance_key(), recoloured.appearance_key());
    assert_ne!(
        gradient(0.2, 1).appearance_key(),
        NoiseGradientRequest {
            to: Rgb8::new(200, 0, 0),
            ..gradient(0.2, 1)
        }
        .appearance_key()
    );
}

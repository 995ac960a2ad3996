//! Per-pixel raster synthesis of texture and noise-gradient tiles.

use crate::{
    color::interp::interpolate,
    foundation::{
        core::Rgb8,
        error::{PapercutError, PapercutResult},
        math::{Fnv1a64, bucket, clamp01},
    },
    noise::simplex::NoiseField,
    texture::tile::TextureTile,
};

const COLOR_BUCKET: u8 = 4;
const SCALE_BUCKET: f64 = 0.5;

/// Flat colour perturbed by fractal noise, repeated as a fill pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatTextureRequest {
    /// Base colour every pixel is perturbed from.
    pub base: Rgb8,
    /// Maximum channel offset, in 0..=255 channel units.
    pub intensity: f64,
    /// Noise feature size in pixels; must be `> 0`.
    pub scale: f64,
    /// Fractal octave count.
    pub octaves: u32,
    /// Noise seed; layers that look different should get different seeds.
    pub seed: u64,
    /// Tile edge length in pixels.
    pub size: u32,
}

/// Radial gradient whose interpolation position is warped by fractal noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseGradientRequest {
    /// Colour at the tile center.
    pub from: Rgb8,
    /// Colour at the tile corners.
    pub to: Rgb8,
    /// Maximum offset applied to the normalized radial position.
    pub intensity: f64,
    /// Noise feature size in pixels; must be `> 0`.
    pub scale: f64,
    /// Fractal octave count.
    pub octaves: u32,
    /// Noise seed; layers that look different should get different seeds.
    pub seed: u64,
    /// Tile edge length in pixels.
    pub size: u32,
}

/// One raster request for the synthesizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileRequest {
    /// See [`FlatTextureRequest`].
    Flat(FlatTextureRequest),
    /// See [`NoiseGradientRequest`].
    Gradient(NoiseGradientRequest),
}

impl TileRequest {
    /// Rasterize this request.
    pub fn synthesize(&self) -> PapercutResult<TextureTile> {
        match self {
            Self::Flat(r) => synthesize_flat(r),
            Self::Gradient(r) => synthesize_gradient(r),
        }
    }

    /// Bucketed cache key: requests that differ only below bucket resolution share a tile.
    pub(crate) fn cache_key(&self) -> u64 {
        let (tag, appearance, seed) = match self {
            Self::Flat(r) => (b'F', r.appearance_key(), r.seed),
            Self::Gradient(r) => (b'G', r.appearance_key(), r.seed),
        };
        let mut h = Fnv1a64::new_default();
        h.write_u8(tag);
        h.write_u64(appearance);
        h.write_u64(seed);
        h.finish()
    }
}

fn write_color(h: &mut Fnv1a64, c: Rgb8) {
    for ch in c.channels() {
        h.write_u8(ch / COLOR_BUCKET);
    }
}

impl FlatTextureRequest {
    /// Bucketed visual tuple (colour, intensity, scale, octaves, size), seed excluded.
    pub(crate) fn appearance_key(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        write_color(&mut h, self.base);
        h.write_i64(bucket(self.intensity, 0.5));
        h.write_i64(bucket(self.scale, SCALE_BUCKET));
        h.write_u32(self.octaves);
        h.write_u32(self.size);
        h.finish()
    }
}

impl NoiseGradientRequest {
    /// Bucketed visual tuple (both colours, intensity, scale, octaves, size), seed excluded.
    pub(crate) fn appearance_key(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        write_color(&mut h, self.from);
        write_color(&mut h, self.to);
        h.write_i64(bucket(self.intensity, 0.01));
        h.write_i64(bucket(self.scale, SCALE_BUCKET));
        h.write_u32(self.octaves);
        h.write_u32(self.size);
        h.finish()
    }
}

fn check_scale(scale: f64) -> PapercutResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(PapercutError::validation(format!(
            "noise scale must be finite and > 0, got {scale}"
        )));
    }
    Ok(())
}

/// Perturb `req.base` per pixel by signed fractal noise scaled by `req.intensity`.
///
/// With `intensity == 0` every pixel equals the base colour.
pub fn synthesize_flat(req: &FlatTextureRequest) -> PapercutResult<TextureTile> {
    check_scale(req.scale)?;
    let mut tile = TextureTile::filled(req.size, req.base)?;
    let field = NoiseField::new(req.seed);
    let [r, g, b] = req.base.channels().map(f64::from);

    for y in 0..req.size {
        for x in 0..req.size {
            let n = field.fractal(f64::from(x) / req.scale, f64::from(y) / req.scale, req.octaves);
            let delta = (n * 2.0 - 1.0) * req.intensity;
            tile.put(x, y, Rgb8::from_f64_clamped(r + delta, g + delta, b + delta));
        }
    }
    Ok(tile)
}

/// Radial gradient from `req.from` (center) to `req.to` (corners) with a noise-warped position.
pub fn synthesize_gradient(req: &NoiseGradientRequest) -> PapercutResult<TextureTile> {
    check_scale(req.scale)?;
    let mut tile = TextureTile::filled(req.size, req.from)?;
    let field = NoiseField::new(req.seed);

    let half = f64::from(req.size) / 2.0;
    let max_dist = half * std::f64::consts::SQRT_2;

    for y in 0..req.size {
        for x in 0..req.size {
            let dx = f64::from(x) + 0.5 - half;
            let dy = f64::from(y) + 0.5 - half;
            let d = clamp01((dx * dx + dy * dy).sqrt() / max_dist);

            let n = field.fractal(f64::from(x) / req.scale, f64::from(y) / req.scale, req.octaves);
            let t = clamp01(d + (n * 2.0 - 1.0) * req.intensity);
            tile.put(x, y, interpolate(req.from, req.to, t));
        }
    }
    Ok(tile)
}

#[cfg(test)]
#[path = "../../tests/unit/texture/synth.rs"]
mod tests;

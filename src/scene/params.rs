use std::path::Path;

use anyhow::Context;

use crate::{
    color::interp::ColorPair,
    foundation::{
        core::{Canvas, Rgb8},
        error::{PapercutError, PapercutResult},
    },
    geometry::shape::{ShapeKind, Tessellation},
    noise::simplex::MAX_OCTAVES,
    texture::tile::{MAX_TILE_SIZE, MIN_TILE_SIZE},
};

/// Largest supported layer count.
pub const MAX_LAYER_COUNT: u32 = 128;
/// Ceiling for `max_rotation_deg` magnitude.
pub const MAX_ROTATION_DEG: f64 = 360.0;
/// Ceiling for either warp intensity.
pub const MAX_CHAOS: f64 = 400.0;
/// Ceiling for flat-texture intensity, in channel units.
pub const MAX_TEXTURE_INTENSITY: f64 = 128.0;
/// Ceiling for gradient-distortion intensity.
pub const MAX_GRADIENT_INTENSITY: f64 = 1.0;
/// Smallest accepted noise scale.
pub const MIN_NOISE_SCALE: f64 = 0.5;

/// Colour stops sampled along each layer's normalized position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorStops {
    /// One start/end pair.
    Single(ColorPair),
    /// Two pairs; gradient fills blend from `primary(t)` to `secondary(t)`.
    Dual {
        /// Pair used for solid and textured fills and as the gradient's first colour.
        primary: ColorPair,
        /// Pair used as the gradient's second colour.
        secondary: ColorPair,
    },
}

impl Default for ColorStops {
    fn default() -> Self {
        Self::Single(ColorPair::new(
            Rgb8::new(0x1b, 0x1f, 0x3b),
            Rgb8::new(0xf2, 0xc5, 0x7c),
        ))
    }
}

impl ColorStops {
    /// Pair driving solid and textured fills.
    pub fn primary(self) -> ColorPair {
        match self {
            Self::Single(p) => p,
            Self::Dual { primary, .. } => primary,
        }
    }

    /// Pair driving the second gradient colour; a single pair runs reversed.
    pub fn secondary(self) -> ColorPair {
        match self {
            Self::Single(p) => p.reversed(),
            Self::Dual { secondary, .. } => secondary,
        }
    }
}

/// Flat noise texture applied to each layer's fill.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextureParams {
    /// Enable textured fills.
    pub enabled: bool,
    /// Maximum channel perturbation (0..=255 units).
    pub intensity: f64,
    /// Noise feature size in pixels.
    pub scale: f64,
    /// Fractal octave count.
    pub octave_count: u32,
    /// Seed family shared by texture and gradient noise.
    pub seed: u64,
    /// Tile edge length in pixels.
    pub tile_size: u32,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 20.0,
            scale: 40.0,
            octave_count: 4,
            seed: 0,
            tile_size: 128,
        }
    }
}

/// Per-layer shadow whose size grows towards the innermost layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    /// Enable shadows.
    pub enabled: bool,
    /// Horizontal offset at multiplier 1.
    pub offset_x: f64,
    /// Vertical offset at multiplier 1.
    pub offset_y: f64,
    /// Blur standard deviation at multiplier 1.
    pub blur_final: f64,
    /// Multiplier reached by the innermost layer (the outermost starts at 0.5).
    pub size_multiplier_final: f64,
    /// Shadow colour.
    pub color: Rgb8,
    /// Cast the shadow inside the shape instead of below it.
    pub inset: bool,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            enabled: false,
            offset_x: 4.0,
            offset_y: 4.0,
            blur_final: 8.0,
            size_multiplier_final: 1.5,
            color: Rgb8::BLACK,
            inset: true,
        }
    }
}

/// Noise-distorted radial gradient fill.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GradientParams {
    /// Enable gradient fills. Mutually exclusive with [`TextureParams::enabled`].
    pub enabled: bool,
    /// Maximum offset of the normalized radial position.
    pub intensity: f64,
    /// Noise feature size in pixels.
    pub scale: f64,
    /// Fractal octave count.
    pub octave_count: u32,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.25,
            scale: 48.0,
            octave_count: 3,
        }
    }
}

/// Caller-supplied parameter set for one generation call.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Params {
    /// Output canvas; shapes are centered on it.
    pub canvas: Canvas,
    /// Seed for the per-generation warp radii.
    pub seed: u64,
    /// Shape family for all layers.
    pub shape: ShapeKind,
    /// Number of the outermost layer; layers run from here down to 2.
    pub layer_count: u32,
    /// Layer `i` has nominal size `i * layer_scale`.
    pub layer_scale: f64,
    /// Rotation reached by the innermost layers, in degrees.
    pub max_rotation_deg: f64,
    /// Horizontal warp intensity.
    pub chaos_x: f64,
    /// Vertical warp intensity.
    pub chaos_y: f64,
    /// Fill colour stops.
    pub colors: ColorStops,
    /// Optional full-canvas backdrop.
    pub background: Option<Rgb8>,
    /// Flat texture settings.
    pub texture: TextureParams,
    /// Shadow settings.
    pub shadow: ShadowParams,
    /// Gradient distortion settings.
    pub gradient: GradientParams,
    /// Shrink factor applied to derived clip boundaries, in `(0, 1]`.
    pub clip_safety: f64,
    /// Polygon approximation density.
    pub tessellation: Tessellation,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            seed: 0,
            shape: ShapeKind::Circle,
            layer_count: 10,
            layer_scale: 30.0,
            max_rotation_deg: 35.0,
            chaos_x: 10.0,
            chaos_y: 10.0,
            colors: ColorStops::default(),
            background: None,
            texture: TextureParams::default(),
            shadow: ShadowParams::default(),
            gradient: GradientParams::default(),
            clip_safety: 0.9,
            tessellation: Tessellation::default(),
        }
    }
}

impl Params {
    /// Parse a JSON parameter document.
    pub fn from_json_str(s: &str) -> PapercutResult<Self> {
        serde_json::from_str(s).map_err(|e| PapercutError::serde(e.to_string()))
    }

    /// Read and parse a JSON parameter document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> PapercutResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read params '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON form.
    pub fn to_json_pretty(&self) -> PapercutResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PapercutError::serde(e.to_string()))
    }

    /// Check every documented range. Fails on the first violation.
    pub fn validate(&self) -> PapercutResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(PapercutError::validation("canvas width/height must be > 0"));
        }
        if !(2..=MAX_LAYER_COUNT).contains(&self.layer_count) {
            return Err(PapercutError::validation(format!(
                "layer_count must be in 2..={MAX_LAYER_COUNT}"
            )));
        }
        finite_positive(self.layer_scale, "layer_scale")?;
        in_range(
            self.max_rotation_deg,
            -MAX_ROTATION_DEG,
            MAX_ROTATION_DEG,
            "max_rotation_deg",
        )?;
        in_range(self.chaos_x, 0.0, MAX_CHAOS, "chaos_x")?;
        in_range(self.chaos_y, 0.0, MAX_CHAOS, "chaos_y")?;
        if !self.clip_safety.is_finite() || self.clip_safety <= 0.0 || self.clip_safety > 1.0 {
            return Err(PapercutError::validation("clip_safety must be in (0, 1]"));
        }

        let tex = &self.texture;
        in_range(tex.intensity, 0.0, MAX_TEXTURE_INTENSITY, "texture.intensity")?;
        noise_scale(tex.scale, "texture.scale")?;
        octaves(tex.octave_count, "texture.octave_count")?;
        if !(MIN_TILE_SIZE..=MAX_TILE_SIZE).contains(&tex.tile_size) {
            return Err(PapercutError::validation(format!(
                "texture.tile_size must be in {MIN_TILE_SIZE}..={MAX_TILE_SIZE}"
            )));
        }

        let grad = &self.gradient;
        in_range(
            grad.intensity,
            0.0,
            MAX_GRADIENT_INTENSITY,
            "gradient.intensity",
        )?;
        noise_scale(grad.scale, "gradient.scale")?;
        octaves(grad.octave_count, "gradient.octave_count")?;

        if tex.enabled && grad.enabled {
            return Err(PapercutError::validation(
                "texture and gradient fills are mutually exclusive",
            ));
        }

        let sh = &self.shadow;
        in_range(sh.offset_x, -MAX_CHAOS, MAX_CHAOS, "shadow.offset_x")?;
        in_range(sh.offset_y, -MAX_CHAOS, MAX_CHAOS, "shadow.offset_y")?;
        in_range(sh.blur_final, 0.0, MAX_CHAOS, "shadow.blur_final")?;
        finite_positive(sh.size_multiplier_final, "shadow.size_multiplier_final")?;

        Ok(())
    }

    /// Copy coerced into documented ranges; every adjustment is logged at `warn`.
    ///
    /// When both texture and gradient fills are enabled the gradient wins.
    pub fn clamped(&self) -> Self {
        let mut p = self.clone();
        let d = Self::default();

        if p.canvas.width == 0 || p.canvas.height == 0 {
            tracing::warn!(
                width = p.canvas.width,
                height = p.canvas.height,
                "canvas has a zero dimension; using default"
            );
            p.canvas = d.canvas;
        }
        p.layer_count = clamp_u32("layer_count", p.layer_count, 2, MAX_LAYER_COUNT);
        p.layer_scale = clamp_f64("layer_scale", p.layer_scale, 0.01, f64::MAX, d.layer_scale);
        p.max_rotation_deg = clamp_f64(
            "max_rotation_deg",
            p.max_rotation_deg,
            -MAX_ROTATION_DEG,
            MAX_ROTATION_DEG,
            0.0,
        );
        p.chaos_x = clamp_f64("chaos_x", p.chaos_x, 0.0, MAX_CHAOS, 0.0);
        p.chaos_y = clamp_f64("chaos_y", p.chaos_y, 0.0, MAX_CHAOS, 0.0);
        p.clip_safety = clamp_f64("clip_safety", p.clip_safety, 0.05, 1.0, d.clip_safety);

        let tex = &mut p.texture;
        tex.intensity = clamp_f64(
            "texture.intensity",
            tex.intensity,
            0.0,
            MAX_TEXTURE_INTENSITY,
            0.0,
        );
        tex.scale = clamp_f64(
            "texture.scale",
            tex.scale,
            MIN_NOISE_SCALE,
            f64::MAX,
            d.texture.scale,
        );
        tex.octave_count = clamp_u32("texture.octave_count", tex.octave_count, 1, MAX_OCTAVES);
        tex.tile_size = clamp_u32("texture.tile_size", tex.tile_size, MIN_TILE_SIZE, MAX_TILE_SIZE);

        let grad = &mut p.gradient;
        grad.intensity = clamp_f64(
            "gradient.intensity",
            grad.intensity,
            0.0,
            MAX_GRADIENT_INTENSITY,
            0.0,
        );
        grad.scale = clamp_f64(
            "gradient.scale",
            grad.scale,
            MIN_NOISE_SCALE,
            f64::MAX,
            d.gradient.scale,
        );
        grad.octave_count = clamp_u32("gradient.octave_count", grad.octave_count, 1, MAX_OCTAVES);

        if p.texture.enabled && p.gradient.enabled {
            tracing::warn!("texture and gradient both enabled; disabling texture");
            p.texture.enabled = false;
        }

        let sh = &mut p.shadow;
        sh.offset_x = clamp_f64("shadow.offset_x", sh.offset_x, -MAX_CHAOS, MAX_CHAOS, 0.0);
        sh.offset_y = clamp_f64("shadow.offset_y", sh.offset_y, -MAX_CHAOS, MAX_CHAOS, 0.0);
        sh.blur_final = clamp_f64("shadow.blur_final", sh.blur_final, 0.0, MAX_CHAOS, 0.0);
        sh.size_multiplier_final = clamp_f64(
            "shadow.size_multiplier_final",
            sh.size_multiplier_final,
            0.01,
            f64::MAX,
            d.shadow.size_multiplier_final,
        );

        p.tessellation = p.tessellation.clamped();
        p
    }
}

fn finite_positive(v: f64, field: &str) -> PapercutResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(PapercutError::validation(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}

fn in_range(v: f64, lo: f64, hi: f64, field: &str) -> PapercutResult<()> {
    if !v.is_finite() || v < lo || v > hi {
        return Err(PapercutError::validation(format!(
            "{field} must be finite and in [{lo}, {hi}]"
        )));
    }
    Ok(())
}

fn noise_scale(v: f64, field: &str) -> PapercutResult<()> {
    if !v.is_finite() || v < MIN_NOISE_SCALE {
        return Err(PapercutError::validation(format!(
            "{field} must be finite and >= {MIN_NOISE_SCALE}"
        )));
    }
    Ok(())
}

fn octaves(v: u32, field: &str) -> PapercutResult<()> {
    if !(1..=MAX_OCTAVES).contains(&v) {
        return Err(PapercutError::validation(format!(
            "{field} must be in 1..={MAX_OCTAVES}"
        )));
    }
    Ok(())
}

fn clamp_f64(field: &str, v: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if !v.is_finite() {
        tracing::warn!(field, value = v, fallback, "non-finite parameter replaced");
        return fallback;
    }
    let c = v.clamp(lo, hi);
    if c != v {
        tracing::warn!(field, value = v, clamped = c, "parameter clamped");
    }
    c
}

fn clamp_u32(field: &str, v: u32, lo: u32, hi: u32) -> u32 {
    let c = v.clamp(lo, hi);
    if c != v {
        tracing::warn!(field, value = v, clamped = c, "parameter clamped");
    }
    c
}

#[cfg(test)]
#[path = "../../tests/unit/scene/params.rs"]
mod tests;

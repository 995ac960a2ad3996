//! Per-layer transform, colour, fill and shadow resolution.

use crate::{
    foundation::{
        core::{Affine, Point, Rgb8},
        error::{PapercutError, PapercutResult},
        math::{lerp, map_range},
    },
    geometry::{
        polygon::Polygon,
        shape::{ShapeKind, Tessellation},
    },
    noise::rng::derive_seed,
    scene::params::Params,
    texture::synth::{FlatTextureRequest, NoiseGradientRequest, TileRequest},
};

/// Shadow multiplier of the outermost layer.
pub const MIN_SHADOW_MULTIPLIER: f64 = 0.5;
/// Shadow opacity, identical for every layer.
pub const SHADOW_OPACITY: f64 = 0.7;

/// Rotation of layer `i` out of `n`, in degrees.
///
/// Maps `i` from `[n, 1]` onto `[0, max_deg]`. The lower domain bound is 1 although the
/// innermost generated layer is 2, so layer 2 stops one step short of `max_deg`.
pub fn rotation_deg(i: u32, n: u32, max_deg: f64) -> f64 {
    map_range(f64::from(i), f64::from(n), 1.0, 0.0, max_deg)
}

/// Normalized position of layer `i` out of `n`: 0 for the outermost, 1 for layer 2.
///
/// A single-layer generation (`n == 2`) sits at 0.
pub fn layer_t(i: u32, n: u32) -> f64 {
    map_range(f64::from(i), f64::from(n), 2.0, 0.0, 1.0)
}

/// What a layer's outline looks like before any warp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryRequest {
    /// Shape family.
    pub kind: ShapeKind,
    /// Nominal size (`i * layer_scale`).
    pub size: f64,
    /// Rotation in degrees about `center`.
    pub rotation_deg: f64,
    /// Placement in canvas space.
    pub center: Point,
}

impl GeometryRequest {
    /// Polygon approximation placed and rotated in canvas space.
    pub fn boundary(&self, tess: Tessellation) -> Polygon {
        let xf = Affine::translate(self.center.to_vec2())
            * Affine::rotate(self.rotation_deg.to_radians());
        self.kind.outline(self.size, tess).transformed(xf)
    }
}

/// Exactly one fill per layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillRequest {
    /// Flat colour.
    Solid(Rgb8),
    /// Noise-perturbed colour tile.
    Textured(FlatTextureRequest),
    /// Noise-distorted radial gradient tile.
    Gradient(NoiseGradientRequest),
}

impl FillRequest {
    /// Raster tile needed by this fill, if any.
    pub fn tile_request(&self) -> Option<TileRequest> {
        match *self {
            Self::Solid(_) => None,
            Self::Textured(r) => Some(TileRequest::Flat(r)),
            Self::Gradient(r) => Some(TileRequest::Gradient(r)),
        }
    }
}

/// Shadow resolved for one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowRequest {
    /// Progression multiplier in `[0.5, size_multiplier_final]`.
    pub multiplier: f64,
    /// Horizontal offset.
    pub dx: f64,
    /// Vertical offset.
    pub dy: f64,
    /// Blur standard deviation.
    pub blur: f64,
    /// Shadow colour.
    pub color: Rgb8,
    /// Opacity; always [`SHADOW_OPACITY`].
    pub opacity: f64,
    /// Inner instead of drop shadow.
    pub inset: bool,
}

/// Everything needed to realize one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSpec {
    /// Layer number `i`, from `layer_count` down to 2.
    pub index: u32,
    /// Normalized position used for colour and shadow progression.
    pub t: f64,
    /// Outline request.
    pub geometry: GeometryRequest,
    /// Fill request.
    pub fill: FillRequest,
    /// Shadow request, when shadows are enabled.
    pub shadow: Option<ShadowRequest>,
}

/// Turns a parameter set into an ordered outer-to-inner list of layer specs.
#[derive(Debug)]
pub struct LayerBuilder<'a> {
    params: &'a Params,
}

impl<'a> LayerBuilder<'a> {
    /// Bind a parameter set. Fails when both texture and gradient fills are enabled.
    pub fn new(params: &'a Params) -> PapercutResult<Self> {
        if params.texture.enabled && params.gradient.enabled {
            return Err(PapercutError::validation(
                "texture and gradient fills are mutually exclusive",
            ));
        }
        Ok(Self { params })
    }

    /// Layers `layer_count` down to 2; empty when `layer_count < 2`.
    pub fn build(&self) -> Vec<LayerSpec> {
        let n = self.params.layer_count;
        (2..=n).rev().map(|i| self.layer(i, n)).collect()
    }

    fn layer(&self, i: u32, n: u32) -> LayerSpec {
        let p = self.params;
        let t = layer_t(i, n);
        LayerSpec {
            index: i,
            t,
            geometry: GeometryRequest {
                kind: p.shape,
                size: f64::from(i) * p.layer_scale,
                rotation_deg: rotation_deg(i, n, p.max_rotation_deg),
                center: p.canvas.center(),
            },
            fill: self.fill(t),
            shadow: self.shadow(t),
        }
    }

    /// Noise seeds come from the base seed and the bucketed appearance, so layers with
    /// near-identical fills share one tile and differently coloured layers get distinct noise.
    fn fill(&self, t: f64) -> FillRequest {
        let p = self.params;
        let base = p.colors.primary().at(t);

        if p.gradient.enabled {
            let mut req = NoiseGradientRequest {
                from: base,
                to: p.colors.secondary().at(t),
                intensity: p.gradient.intensity,
                scale: p.gradient.scale,
                octaves: p.gradient.octave_count,
                seed: p.texture.seed,
                size: p.texture.tile_size,
            };
            req.seed = derive_seed(p.texture.seed, req.appearance_key());
            FillRequest::Gradient(req)
        } else if p.texture.enabled {
            let mut req = FlatTextureRequest {
                base,
                intensity: p.texture.intensity,
                scale: p.texture.scale,
                octaves: p.texture.octave_count,
                seed: p.texture.seed,
                size: p.texture.tile_size,
            };
            req.seed = derive_seed(p.texture.seed, req.appearance_key());
            FillRequest::Textured(req)
        } else {
            FillRequest::Solid(base)
        }
    }

    fn shadow(&self, t: f64) -> Option<ShadowRequest> {
        let sh = &self.params.shadow;
        if !sh.enabled {
            return None;
        }
        let multiplier = lerp(MIN_SHADOW_MULTIPLIER, sh.size_multiplier_final, t);
        Some(ShadowRequest {
            multiplier,
            dx: sh.offset_x * multiplier,
            dy: sh.offset_y * multiplier,
            blur: sh.blur_final * multiplier,
            color: sh.color,
            opacity: SHADOW_OPACITY,
            inset: sh.inset,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/builder.rs"]
mod tests;

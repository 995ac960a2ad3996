//! Papercut generates layered "paper-cut" artwork.
//!
//! One generation call turns a [`Params`] set into a self-contained [`Scene`]:
//!
//! - concentric shape layers with interpolated colours, optional noise textures or noise-warped
//!   radial gradients, and optional shadows
//! - one coherent sinusoidal warp applied to every layer outline
//! - clip outlines derived from the already-warped outer neighbours, so layers stay nested
//!
//! Scenes serialize to standalone SVG ([`to_svg_string`]) and rasterize to RGBA previews
//! ([`rasterize`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod clip;
pub(crate) mod color;
pub(crate) mod export;
pub(crate) mod geometry;
pub(crate) mod layers;
pub(crate) mod noise;
pub(crate) mod pipeline;
pub(crate) mod scene;
pub(crate) mod texture;
pub(crate) mod warp;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgb8, Vec2};
pub use crate::foundation::error::{PapercutError, PapercutResult};
pub use crate::foundation::math::{clamp01, lerp, map_range};

pub use crate::clip::resolver::{ClipPlan, resolve as resolve_clips};
pub use crate::color::interp::{ColorPair, interpolate};
pub use crate::export::raster::{encode_png, rasterize, rasterize_svg, write_png};
pub use crate::export::svg::to_svg_string;
pub use crate::geometry::polygon::Polygon;
pub use crate::geometry::shape::{ShapeKind, Tessellation};
pub use crate::layers::builder::{
    FillRequest, GeometryRequest, LayerBuilder, LayerSpec, MIN_SHADOW_MULTIPLIER, SHADOW_OPACITY,
    ShadowRequest, layer_t, rotation_deg,
};
pub use crate::noise::rng::{Rng64, derive_seed};
pub use crate::noise::simplex::{MAX_OCTAVES, NoiseField};
pub use crate::pipeline::generate::{Generator, GeneratorOpts, GeneratorStats, generate};
pub use crate::scene::model::{
    ClipDef, ClipGroup, Paint, PatternDef, PatternMapping, Scene, SceneDefs, SceneLayer,
    SceneNode, ShadowFilter,
};
pub use crate::scene::params::{
    ColorStops, GradientParams, MAX_CHAOS, MAX_GRADIENT_INTENSITY, MAX_LAYER_COUNT,
    MAX_ROTATION_DEG, MAX_TEXTURE_INTENSITY, MIN_NOISE_SCALE, Params, ShadowParams,
    TextureParams,
};
pub use crate::texture::cache::CacheStats;
pub use crate::texture::synth::{
    FlatTextureRequest, NoiseGradientRequest, TileRequest, synthesize_flat, synthesize_gradient,
};
pub use crate::texture::tile::{MAX_TILE_SIZE, MIN_TILE_SIZE, TextureTile};
pub use crate::warp::field::{MAX_RADIUS, MIN_RADIUS, WARP_DOMAIN, WarpField, WarpedBoundaries};

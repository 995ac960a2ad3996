//! Renderable scene graph produced by one generation call.
//!
//! The graph is self-contained: every pattern tile, filter and clip outline a layer refers to
//! lives in [`SceneDefs`], so serialization never needs to resolve anything external.

use std::sync::Arc;

use crate::{
    foundation::core::{Canvas, Rgb8},
    geometry::polygon::Polygon,
    texture::tile::TextureTile,
    warp::field::WarpField,
};

/// How a pattern tile is laid over a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternMapping {
    /// Repeated in canvas space at the tile's native size (flat textures).
    Tiled,
    /// Stretched once over the shape's bounding box (radial gradients).
    Stretched,
}

/// Raster pattern definition.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternDef {
    /// Document-unique id.
    pub id: String,
    /// Placement mode.
    pub mapping: PatternMapping,
    /// Pixels; shared with the generator's tile cache.
    pub tile: Arc<TextureTile>,
}

/// Shadow filter definition (inner or drop shadow).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShadowFilter {
    /// Document-unique id.
    pub id: String,
    /// Horizontal offset.
    pub dx: f64,
    /// Vertical offset.
    pub dy: f64,
    /// Gaussian blur standard deviation.
    pub blur: f64,
    /// Shadow colour.
    pub color: Rgb8,
    /// Shadow opacity.
    pub opacity: f64,
    /// Cast inside the shape instead of below it.
    pub inset: bool,
}

/// Named clip outline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipDef {
    /// Document-unique id.
    pub id: String,
    /// Region that stays visible.
    pub boundary: Polygon,
}

/// Every definition referenced from the scene tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDefs {
    /// Texture and gradient tiles.
    pub patterns: Vec<PatternDef>,
    /// Shadow filters.
    pub filters: Vec<ShadowFilter>,
    /// Clip outlines.
    pub clips: Vec<ClipDef>,
}

impl SceneDefs {
    /// Pattern by id.
    pub fn pattern(&self, id: &str) -> Option<&PatternDef> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Filter by id.
    pub fn filter(&self, id: &str) -> Option<&ShadowFilter> {
        self.filters.iter().find(|f| f.id == id)
    }

    /// Clip by id.
    pub fn clip(&self, id: &str) -> Option<&ClipDef> {
        self.clips.iter().find(|c| c.id == id)
    }
}

/// Fill of one layer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    /// Flat colour.
    Solid(Rgb8),
    /// Reference to a [`PatternDef`] id.
    Pattern(String),
}

/// One realized layer: warped outline plus paint.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneLayer {
    /// Layer number, from `layer_count` down to 2.
    pub index: u32,
    /// Normalized position (0 outermost, 1 innermost).
    pub t: f64,
    /// Warped outline in canvas space.
    pub boundary: Polygon,
    /// Fill.
    pub fill: Paint,
    /// Reference to a [`ShadowFilter`] id.
    pub filter: Option<String>,
}

/// Group whose children render through an optional clip.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ClipGroup {
    /// Reference to a [`ClipDef`] id.
    pub clip: Option<String>,
    /// Children in paint order.
    pub children: Vec<SceneNode>,
}

/// Scene tree node.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneNode {
    /// A painted layer.
    Layer(SceneLayer),
    /// A nested clip group.
    Group(ClipGroup),
}

/// Output of one generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Output canvas.
    pub canvas: Canvas,
    /// Optional full-canvas backdrop, drawn below everything else.
    pub background: Option<Rgb8>,
    /// Shared definitions.
    pub defs: SceneDefs,
    /// Root group, clipped by the global clip when one was resolved.
    pub root: ClipGroup,
    /// Displacement field every layer was warped with.
    pub warp: WarpField,
}

impl Scene {
    /// Layers in paint order (outermost first), with the clip id each one renders through.
    pub fn layers(&self) -> Vec<(&SceneLayer, Option<&str>)> {
        fn walk<'a>(
            g: &'a ClipGroup,
            clip: Option<&'a str>,
            out: &mut Vec<(&'a SceneLayer, Option<&'a str>)>,
        ) {
            for child in &g.children {
                match child {
                    SceneNode::Layer(l) => out.push((l, clip)),
                    SceneNode::Group(inner) => walk(inner, inner.clip.as_deref(), out),
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.root, None, &mut out);
        out
    }

    /// Number of painted layers.
    pub fn layer_count(&self) -> usize {
        self.layers().len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

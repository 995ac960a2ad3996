//! Clip boundaries derived from already-warped layer geometry.
//!
//! The warp is not area preserving, so a layer's nominal outline no longer bounds the next inner
//! layer once distorted. Each clip is therefore built from the warped outer neighbour, shrunk
//! slightly about that neighbour's centroid.

use crate::{geometry::polygon::Polygon, warp::field::WarpedBoundaries};

/// Clip boundaries for one generation, aligned with the warped layer list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipPlan {
    /// Clip around the whole stack, derived from the outermost layer.
    pub global: Option<Polygon>,
    /// `per_layer[k]` clips layer `k`; the outermost entry is always `None`.
    pub per_layer: Vec<Option<Polygon>>,
}

impl ClipPlan {
    /// Clip for the layer at position `k` (outer to inner), if one was resolved.
    pub fn layer_clip(&self, k: usize) -> Option<&Polygon> {
        self.per_layer.get(k).and_then(Option::as_ref)
    }

    /// Inner layers left unclipped because their neighbour was unusable.
    pub fn skipped(&self) -> usize {
        self.per_layer
            .iter()
            .skip(1)
            .filter(|c| c.is_none())
            .count()
    }
}

/// `poly` scaled by `safety` about its own centroid.
///
/// `None` when the polygon cannot bound anything (fewer than three vertices).
pub fn shrink(poly: &Polygon, safety: f64) -> Option<Polygon> {
    if poly.len() < 3 {
        return None;
    }
    let c = poly.centroid()?;
    Some(poly.scaled_about(c, safety))
}

/// Build the global clip and one clip per inner layer from its immediate outer neighbour.
///
/// Layers whose neighbour is missing or degenerate are left unclipped; generation continues.
#[tracing::instrument(skip(boundaries), fields(layers = boundaries.as_slice().len()))]
pub fn resolve(boundaries: &WarpedBoundaries, safety: f64) -> ClipPlan {
    let layers = boundaries.as_slice();

    let Some(outermost) = layers.first() else {
        tracing::warn!("no layers to clip");
        return ClipPlan::default();
    };

    let global = shrink(outermost, safety);
    if global.is_none() {
        tracing::warn!("outermost layer is degenerate; global clip skipped");
    }

    let mut per_layer = Vec::with_capacity(layers.len());
    per_layer.push(None);
    for (k, pair) in layers.windows(2).enumerate() {
        let clip = shrink(&pair[0], safety);
        if clip.is_none() {
            tracing::warn!(layer = k + 1, "outer neighbour is degenerate; layer left unclipped");
        }
        per_layer.push(clip);
    }

    let plan = ClipPlan { global, per_layer };
    tracing::debug!(skipped = plan.skipped(), "clips resolved");
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/clip/resolver.rs"]
mod tests;

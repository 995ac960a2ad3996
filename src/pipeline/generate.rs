//! End-to-end generation: parameters in, self-contained scene out.

use std::{collections::HashSet, sync::Arc};

use crate::{
    clip::resolver::{self, ClipPlan},
    foundation::{
        core::Rgb8,
        error::PapercutResult,
        math::{Fnv1a64, bucket},
    },
    layers::builder::{FillRequest, LayerBuilder, LayerSpec, ShadowRequest},
    noise::rng::Rng64,
    scene::{
        model::{
            ClipDef, ClipGroup, Paint, PatternDef, PatternMapping, Scene, SceneDefs, SceneLayer,
            SceneNode, ShadowFilter,
        },
        params::Params,
    },
    texture::{
        cache::{CacheStats, FifoCache},
        synth::TileRequest,
        tile::TextureTile,
    },
    warp::field::{WarpField, WarpedBoundaries},
};

const SHADOW_BUCKET: f64 = 0.25;
const GLOBAL_CLIP_ID: &str = "pc-clip-global";

/// Cache policy of a [`Generator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorOpts {
    /// Texture/gradient tiles retained per generation.
    pub tile_cache_capacity: usize,
    /// Shadow filters retained per generation.
    pub filter_cache_capacity: usize,
}

impl Default for GeneratorOpts {
    fn default() -> Self {
        Self {
            tile_cache_capacity: 10,
            filter_cache_capacity: 10,
        }
    }
}

/// Cache counters for the most recent generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct GeneratorStats {
    /// Tile cache.
    pub tiles: CacheStats,
    /// Shadow filter cache.
    pub filters: CacheStats,
}

/// Owns the per-scene caches; each [`Generator::generate`] call starts them empty.
#[derive(Debug)]
pub struct Generator {
    opts: GeneratorOpts,
    tiles: FifoCache<Arc<TextureTile>>,
    filters: FifoCache<Arc<ShadowFilter>>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorOpts::default())
    }
}

impl Generator {
    /// Generator with the given cache policy.
    pub fn new(opts: GeneratorOpts) -> Self {
        Self {
            opts,
            tiles: FifoCache::new(opts.tile_cache_capacity),
            filters: FifoCache::new(opts.filter_cache_capacity),
        }
    }

    /// Cache policy.
    pub fn opts(&self) -> GeneratorOpts {
        self.opts
    }

    /// Cache counters since the start of the last generation.
    pub fn cache_stats(&self) -> GeneratorStats {
        GeneratorStats {
            tiles: self.tiles.stats(),
            filters: self.filters.stats(),
        }
    }

    /// Build a scene from `params`.
    ///
    /// Order is fixed: layer specs, fills and shadows, boundaries, warp over every boundary,
    /// then clips derived from the warped set. Fails only when the fill modes conflict or a
    /// tile cannot be synthesized.
    #[tracing::instrument(
        skip(self, params),
        fields(layer_count = params.layer_count, shape = ?params.shape, seed = params.seed)
    )]
    pub fn generate(&mut self, params: &Params) -> PapercutResult<Scene> {
        self.tiles.reset();
        self.filters.reset();

        let specs = LayerBuilder::new(params)?.build();
        if specs.is_empty() {
            tracing::warn!("layer_count below 2; scene has no layers");
        }

        let mut defs = SceneDefs::default();
        let mut emitted = HashSet::new();
        let mut paints = Vec::with_capacity(specs.len());
        for spec in &specs {
            let fill = self.paint(spec.fill, &mut defs, &mut emitted)?;
            let filter = spec
                .shadow
                .map(|s| self.shadow_filter(s, &mut defs, &mut emitted));
            paints.push((fill, filter));
        }

        let boundaries = specs
            .iter()
            .map(|s| s.geometry.boundary(params.tessellation))
            .collect();
        let mut rng = Rng64::new(params.seed);
        let warp = WarpField::draw(&mut rng, params.chaos_x, params.chaos_y, params.canvas);
        let warped = warp.apply_all(boundaries);
        let plan = resolver::resolve(&warped, params.clip_safety);

        let root = assemble(&specs, paints, warped, &plan, &mut defs);

        let stats = self.cache_stats();
        tracing::debug!(
            layers = specs.len(),
            patterns = defs.patterns.len(),
            filters = defs.filters.len(),
            clips = defs.clips.len(),
            tile_hits = stats.tiles.hits,
            tile_misses = stats.tiles.misses,
            tile_evictions = stats.tiles.evictions,
            filter_hits = stats.filters.hits,
            "scene generated"
        );

        Ok(Scene {
            canvas: params.canvas,
            background: params.background,
            defs,
            root,
            warp,
        })
    }

    fn paint(
        &mut self,
        fill: FillRequest,
        defs: &mut SceneDefs,
        emitted: &mut HashSet<String>,
    ) -> PapercutResult<Paint> {
        let req = match fill {
            FillRequest::Solid(c) => return Ok(Paint::Solid(c)),
            FillRequest::Textured(r) => TileRequest::Flat(r),
            FillRequest::Gradient(r) => TileRequest::Gradient(r),
        };

        let key = req.cache_key();
        let tile = self
            .tiles
            .get_or_try_insert_with(key, || req.synthesize().map(Arc::new))?;

        let id = format!("pc-tile-{key:016x}");
        if emitted.insert(id.clone()) {
            let mapping = match req {
                TileRequest::Flat(_) => PatternMapping::Tiled,
                TileRequest::Gradient(_) => PatternMapping::Stretched,
            };
            defs.patterns.push(PatternDef {
                id: id.clone(),
                mapping,
                tile,
            });
        }
        Ok(Paint::Pattern(id))
    }

    fn shadow_filter(
        &mut self,
        s: ShadowRequest,
        defs: &mut SceneDefs,
        emitted: &mut HashSet<String>,
    ) -> String {
        let key = shadow_key(&s);
        let id = format!("pc-shadow-{key:016x}");
        let Ok(filter) = self
            .filters
            .get_or_try_insert_with::<std::convert::Infallible>(key, || {
                Ok(Arc::new(ShadowFilter {
                    id: id.clone(),
                    dx: s.dx,
                    dy: s.dy,
                    blur: s.blur,
                    color: s.color,
                    opacity: s.opacity,
                    inset: s.inset,
                }))
            });
        if emitted.insert(id.clone()) {
            defs.filters.push((*filter).clone());
        }
        id
    }
}

/// Generate with a fresh [`Generator`] and default cache policy.
pub fn generate(params: &Params) -> PapercutResult<Scene> {
    Generator::default().generate(params)
}

fn shadow_key(s: &ShadowRequest) -> u64 {
    fn color(h: &mut Fnv1a64, c: Rgb8) {
        for ch in c.channels() {
            h.write_u8(ch);
        }
    }

    let mut h = Fnv1a64::new_default();
    h.write_i64(bucket(s.dx, SHADOW_BUCKET));
    h.write_i64(bucket(s.dy, SHADOW_BUCKET));
    h.write_i64(bucket(s.blur, SHADOW_BUCKET));
    h.write_i64(bucket(s.opacity, 0.01));
    color(&mut h, s.color);
    h.write_u8(u8::from(s.inset));
    h.finish()
}

/// Nest layers under the global clip; every inner layer gets its own clipped sub-group.
fn assemble(
    specs: &[LayerSpec],
    paints: Vec<(Paint, Option<String>)>,
    warped: WarpedBoundaries,
    plan: &ClipPlan,
    defs: &mut SceneDefs,
) -> ClipGroup {
    let mut root = ClipGroup::default();
    if let Some(global) = &plan.global {
        defs.clips.push(ClipDef {
            id: GLOBAL_CLIP_ID.to_owned(),
            boundary: global.clone(),
        });
        root.clip = Some(GLOBAL_CLIP_ID.to_owned());
    }

    let layers = specs.iter().zip(paints).zip(warped.into_inner());
    for (k, ((spec, (fill, filter)), boundary)) in layers.enumerate() {
        let layer = SceneNode::Layer(SceneLayer {
            index: spec.index,
            t: spec.t,
            boundary,
            fill,
            filter,
        });

        match plan.layer_clip(k) {
            Some(clip) => {
                let id = format!("pc-clip-{}", spec.index);
                defs.clips.push(ClipDef {
                    id: id.clone(),
                    boundary: clip.clone(),
                });
                root.children.push(SceneNode::Group(ClipGroup {
                    clip: Some(id),
                    children: vec![layer],
                }));
            }
            None => root.children.push(layer),
        }
    }
    root
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/generate.rs"]
mod tests;

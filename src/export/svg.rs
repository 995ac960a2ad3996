//! Standalone SVG serialization of a [`Scene`].
//!
//! Pattern tiles are inlined as base64 PNG data URIs, so the document references nothing outside
//! itself.

use std::fmt::Write as _;

use crate::{
    foundation::error::{PapercutError, PapercutResult},
    scene::model::{
        ClipDef, ClipGroup, Paint, PatternDef, PatternMapping, Scene, SceneLayer, SceneNode,
        ShadowFilter,
    },
};

/// Serialize `scene` into an SVG document.
#[tracing::instrument(skip(scene), fields(layers = scene.layer_count()))]
pub fn to_svg_string(scene: &Scene) -> PapercutResult<String> {
    let mut uris = Vec::with_capacity(scene.defs.patterns.len());
    for p in &scene.defs.patterns {
        uris.push(p.tile.to_data_uri()?);
    }

    let mut out = String::new();
    write_document(&mut out, scene, &uris)
        .map_err(|e| PapercutError::export(format!("format svg: {e}")))?;
    tracing::debug!(bytes = out.len(), "svg serialized");
    Ok(out)
}

fn write_document(out: &mut String, scene: &Scene, uris: &[String]) -> std::fmt::Result {
    let (w, h) = (scene.canvas.width, scene.canvas.height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;

    writeln!(out, "<defs>")?;
    for (p, uri) in scene.defs.patterns.iter().zip(uris) {
        write_pattern(out, p, uri)?;
    }
    for f in &scene.defs.filters {
        write_filter(out, f)?;
    }
    for c in &scene.defs.clips {
        write_clip(out, c)?;
    }
    writeln!(out, "</defs>")?;

    if let Some(bg) = scene.background {
        writeln!(
            out,
            r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
            bg.to_hex()
        )?;
    }

    write_group(out, &scene.root)?;
    writeln!(out, "</svg>")
}

fn write_pattern(out: &mut String, p: &PatternDef, uri: &str) -> std::fmt::Result {
    match p.mapping {
        PatternMapping::Tiled => {
            let s = p.tile.size();
            writeln!(
                out,
                r#"<pattern id="{}" patternUnits="userSpaceOnUse" width="{s}" height="{s}"><image xlink:href="{uri}" x="0" y="0" width="{s}" height="{s}"/></pattern>"#,
                p.id
            )
        }
        PatternMapping::Stretched => writeln!(
            out,
            r#"<pattern id="{}" patternUnits="objectBoundingBox" patternContentUnits="objectBoundingBox" width="1" height="1"><image xlink:href="{uri}" x="0" y="0" width="1" height="1" preserveAspectRatio="none"/></pattern>"#,
            p.id
        ),
    }
}

fn write_filter(out: &mut String, f: &ShadowFilter) -> std::fmt::Result {
    writeln!(
        out,
        r#"<filter id="{}" x="-50%" y="-50%" width="200%" height="200%" color-interpolation-filters="sRGB">"#,
        f.id
    )?;
    let color = f.color.to_hex();
    let (dx, dy, blur, opacity) = (num(f.dx), num(f.dy), num(f.blur), num(f.opacity));
    if f.inset {
        writeln!(
            out,
            r#"<feFlood flood-color="{color}" flood-opacity="{opacity}" result="flood"/>"#
        )?;
        writeln!(
            out,
            r#"<feComposite in="flood" in2="SourceAlpha" operator="out" result="outside"/>"#
        )?;
        writeln!(
            out,
            r#"<feOffset in="outside" dx="{dx}" dy="{dy}" result="offset"/>"#
        )?;
        writeln!(
            out,
            r#"<feGaussianBlur in="offset" stdDeviation="{blur}" result="blur"/>"#
        )?;
        writeln!(
            out,
            r#"<feComposite in="blur" in2="SourceAlpha" operator="in" result="shadow"/>"#
        )?;
        writeln!(
            out,
            r#"<feMerge><feMergeNode in="SourceGraphic"/><feMergeNode in="shadow"/></feMerge>"#
        )?;
    } else {
        writeln!(
            out,
            r#"<feGaussianBlur in="SourceAlpha" stdDeviation="{blur}" result="blur"/>"#
        )?;
        writeln!(out, r#"<feOffset in="blur" dx="{dx}" dy="{dy}" result="offset"/>"#)?;
        writeln!(
            out,
            r#"<feFlood flood-color="{color}" flood-opacity="{opacity}" result="flood"/>"#
        )?;
        writeln!(
            out,
            r#"<feComposite in="flood" in2="offset" operator="in" result="shadow"/>"#
        )?;
        writeln!(
            out,
            r#"<feMerge><feMergeNode in="shadow"/><feMergeNode in="SourceGraphic"/></feMerge>"#
        )?;
    }
    writeln!(out, "</filter>")
}

fn write_clip(out: &mut String, c: &ClipDef) -> std::fmt::Result {
    writeln!(
        out,
        r#"<clipPath id="{}"><path d="{}"/></clipPath>"#,
        c.id,
        c.boundary.to_bez_path().to_svg()
    )
}

fn write_group(out: &mut String, g: &ClipGroup) -> std::fmt::Result {
    match &g.clip {
        Some(id) => writeln!(out, r#"<g clip-path="url(#{id})">"#)?,
        None => writeln!(out, "<g>")?,
    }
    for child in &g.children {
        match child {
            SceneNode::Layer(l) => write_layer(out, l)?,
            SceneNode::Group(inner) => write_group(out, inner)?,
        }
    }
    writeln!(out, "</g>")
}

fn write_layer(out: &mut String, l: &SceneLayer) -> std::fmt::Result {
    let fill = match &l.fill {
        Paint::Solid(c) => c.to_hex(),
        Paint::Pattern(id) => format!("url(#{id})"),
    };
    write!(
        out,
        r#"<path data-layer="{}" d="{}" fill="{fill}""#,
        l.index,
        l.boundary.to_bez_path().to_svg()
    )?;
    if let Some(id) = &l.filter {
        write!(out, r#" filter="url(#{id})""#)?;
    }
    writeln!(out, "/>")
}

/// Compact decimal form for filter attributes.
fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;

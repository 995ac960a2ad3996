//! Preview rasterization: scene → SVG → `usvg` tree → `resvg` pixmap → straight-alpha RGBA.

use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::{
    export::svg::to_svg_string,
    foundation::error::{PapercutError, PapercutResult},
    scene::model::Scene,
};

/// Rasterize `scene` at its canvas size.
#[tracing::instrument(skip(scene), fields(width = scene.canvas.width, height = scene.canvas.height))]
pub fn rasterize(scene: &Scene) -> PapercutResult<image::RgbaImage> {
    let svg = to_svg_string(scene)?;
    rasterize_svg(&svg, scene.canvas.width, scene.canvas.height)
}

/// Rasterize an SVG document into a `width`×`height` image, scaling it to fit.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> PapercutResult<image::RgbaImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse scene svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PapercutError::export("failed to allocate preview pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut img = image::RgbaImage::new(width, height);
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(img)
}

/// Encode as PNG bytes.
pub fn encode_png(img: &image::RgbaImage) -> PapercutResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode preview as png")?;
    Ok(buf)
}

/// Write as a PNG file, creating parent directories as needed.
pub fn write_png(img: &image::RgbaImage, path: impl AsRef<Path>) -> PapercutResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, encode_png(img)?)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;

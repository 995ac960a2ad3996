use std::io::Cursor;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::{
    core::Rgb8,
    error::{PapercutError, PapercutResult},
};

/// Smallest tile edge accepted by the synthesizer.
pub const MIN_TILE_SIZE: u32 = 16;
/// Largest tile edge accepted by the synthesizer.
pub const MAX_TILE_SIZE: u32 = 1024;

/// Square raster tile produced by the texture synthesizer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureTile {
    image: image::RgbImage,
}

impl TextureTile {
    /// Allocate a `size`×`size` tile filled with `fill`.
    pub fn filled(size: u32, fill: Rgb8) -> PapercutResult<Self> {
        if !(MIN_TILE_SIZE..=MAX_TILE_SIZE).contains(&size) {
            return Err(PapercutError::synthesis(format!(
                "tile size {size} outside {MIN_TILE_SIZE}..={MAX_TILE_SIZE}"
            )));
        }
        let image = image::RgbImage::from_pixel(size, size, image::Rgb(fill.channels()));
        Ok(Self { image })
    }

    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// Pixel at `(x, y)`, or `None` outside the tile.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Rgb8::new(p.0[0], p.0[1], p.0[2]))
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, c: Rgb8) {
        self.image.put_pixel(x, y, image::Rgb(c.channels()));
    }

    /// Iterate all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.image
            .pixels()
            .map(|p| Rgb8::new(p.0[0], p.0[1], p.0[2]))
    }

    /// Encode as PNG bytes.
    pub fn to_png_bytes(&self) -> PapercutResult<Vec<u8>> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(self.image.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode texture tile as png")?;
        Ok(buf)
    }

    /// `data:image/png;base64,...` URI for embedding in a vector document.
    pub fn to_data_uri(&self) -> PapercutResult<String> {
        let png = self.to_png_bytes()?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/tile.rs"]
mod tests;

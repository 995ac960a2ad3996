use super::*;
use crate::{
    foundation::core::{Canvas, Rgb8},
    pipeline::generate::generate,
    scene::params::Params,
};

fn params() -> Params {
    Params {
        canvas: Canvas {
            width: 200,
            height: 200,
        },
        layer_count: 4,
        layer_scale: 20.0,
        chaos_x: 0.0,
        chaos_y: 0.0,
        ..Params::default()
    }
}

#[test]
fn center_shows_the_innermost_colour_and_corners_stay_clear() {
    let scene = generate(&params()).unwrap();
    let img = rasterize(&scene).unwrap();
    assert_eq!(img.dimensions(), (200, 200));

    let inner = Params::default().colors.primary().end;
    let c = img.get_pixel(100, 100).0;
    assert_eq!([c[0], c[1], c[2], c[3]], [inner.r, inner.g, inner.b, 255]);
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
}

#[test]
fn background_fills_the_canvas() {
    let scene = generate(&Params {
        background: Some(Rgb8::new(10, 200, 30)),
        ..params()
    })
    .unwrap();
    let img = rasterize(&scene).unwrap();
    assert_eq!(img.get_pixel(1, 1).0, [10, 200, 30, 255]);
}

#[test]
fn png_encoding_has_signature() {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
    let bytes = encode_png(&img).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn malformed_svg_is_an_error() {
    assert!(rasterize_svg("<svg", 10, 10).is_err());
}

use super::*;

#[test]
fn filled_tile_rejects_out_of_range_sizes() {
    assert!(TextureTile::filled(MIN_TILE_SIZE - 1, Rgb8::BLACK).is_err());
    assert!(TextureTile::filled(MAX_TILE_SIZE + 1, Rgb8::BLACK).is_err());
    let t = TextureTile::filled(32, Rgb8::new(1, 2, 3)).unwrap();
    assert_eq!(t.size(), 32);
    assert!(t.pixels().all(|p| p == Rgb8::new(1, 2, 3)));
    assert_eq!(t.pixel(32, 0), None);
}

#[test]
fn png_bytes_decode_back_to_same_pixels() {
    let mut t = TextureTile::filled(16, Rgb8::WHITE).unwrap();
    t.put(3, 4, Rgb8::new(10, 20, 30));
    let png = t.to_png_bytes().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (16, 16));
    assert_eq!(decoded.get_pixel(3, 4).0, [10, 20, 30]);
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255]);
}

#[test]
fn data_uri_has_png_prefix() {
    let t = TextureTile::filled(16, Rgb8::BLACK).unwrap();
    let uri = t.to_data_uri().unwrap();
    assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
}

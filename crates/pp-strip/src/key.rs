use image::RgbaImage;

/// Rend transparents les pixels dont R, G et B valent exactement 255.
///
/// Les autres pixels sont conservés tels quels, alpha d'origine compris.
/// Retourne le nombre de pixels modifiés.
pub fn key_out_white(img: &mut RgbaImage) -> usize {
    let mut keyed = 0;
    for px in img.pixels_mut() {
        let [r, g, b, _] = px.0;
        if r == u8::MAX && g == u8::MAX && b == u8::MAX {
            px.0[3] = 0;
            keyed += 1;
        }
    }
    keyed
}

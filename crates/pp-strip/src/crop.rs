use image::RgbaImage;

use crate::error::StripError;

/// Rectangle englobant, en pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// Colonne du coin haut-gauche.
    pub x: u32,
    /// Ligne du coin haut-gauche.
    pub y: u32,
    /// Largeur, au moins 1.
    pub width: u32,
    /// Hauteur, au moins 1.
    pub height: u32,
}

/// Smallest rectangle containing every pixel with non-zero alpha.
///
/// `None` when the image is fully transparent (or has no pixel at all).
#[must_use]
pub fn content_bounds(img: &RgbaImage) -> Option<BoundingBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] != 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Recadre l'image sur son contenu visible.
///
/// # Errors
/// [`StripError::NoContent`] si aucun pixel n'est visible.
pub fn crop_to_content(img: &RgbaImage) -> Result<RgbaImage, StripError> {
    let bbox = content_bounds(img).ok_or(StripError::NoContent {
        width: img.width(),
        height: img.height(),
    })?;
    Ok(image::imageops::crop_imm(img, bbox.x, bbox.y, bbox.width, bbox.height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);

    #[test]
    fn bounds_of_single_square() {
        let mut img = RgbaImage::from_pixel(100, 100, CLEAR);
        for (x, y) in [(40, 60), (41, 60), (40, 61), (41, 61)] {
            img.put_pixel(x, y, Rgba([0, 128, 0, 255]));
        }
        assert_eq!(
            content_bounds(&img),
            Some(BoundingBox {
                x: 40,
                y: 60,
                width: 2,
                height: 2
            })
        );
    }

    #[test]
    fn bounds_span_scattered_pixels() {
        let mut img = RgbaImage::from_pixel(10, 8, CLEAR);
        img.put_pixel(2, 7, Rgba([1, 1, 1, 1]));
        img.put_pixel(9, 0, Rgba([1, 1, 1, 255]));
        assert_eq!(
            content_bounds(&img),
            Some(BoundingBox {
                x: 2,
                y: 0,
                width: 8,
                height: 8
            })
        );
    }

    #[test]
    fn fully_transparent_has_no_bounds() {
        let img = RgbaImage::from_pixel(10, 10, CLEAR);
        assert_eq!(content_bounds(&img), None);
        assert!(matches!(
            crop_to_content(&img),
            Err(StripError::NoContent {
                width: 10,
                height: 10
            })
        ));
    }

    #[test]
    fn crop_keeps_pixels() {
        let mut img = RgbaImage::from_pixel(5, 5, CLEAR);
        img.put_pixel(3, 1, Rgba([200, 10, 10, 255]));
        let cropped = crop_to_content(&img).unwrap();
        assert_eq!(cropped.dimensions(), (1, 1));
        assert_eq!(cropped.get_pixel(0, 0).0, [200, 10, 10, 255]);
    }

    #[test]
    fn opaque_image_is_unchanged() {
        let img = RgbaImage::from_pixel(4, 3, Rgba([9, 9, 9, 255]));
        assert_eq!(crop_to_content(&img).unwrap(), img);
    }
}

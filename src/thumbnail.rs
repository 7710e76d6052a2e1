//! Custom furniture thumbnail normalization
//!
//! User-supplied images arrive in arbitrary sizes and orientations. Before a
//! custom template is stored, its image is re-rendered onto a fixed-size
//! transparent square: scaled to fit with a margin, rotated by the form's
//! rotation setting, and re-encoded as PNG.

use image::imageops::FilterType;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Edge length of the normalized square thumbnail
pub const THUMBNAIL_SIZE: u32 = 200;

/// Fraction of the square the scaled image may occupy
const FIT_MARGIN: f32 = 0.9;

/// Decode image bytes and re-render them as a normalized thumbnail.
///
/// Returns encoded PNG bytes of a `THUMBNAIL_SIZE` square with the source
/// image scaled to fit, rotated about the center by `rotation_deg`, on a
/// transparent background.
pub fn normalized_thumbnail(bytes: &[u8], rotation_deg: f32) -> Result<Vec<u8>, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
    let rgba = img.to_rgba8();
    let (src_w, src_h) = rgba.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err("Image has no pixels".to_string());
    }

    let size = THUMBNAIL_SIZE;
    let size_f = size as f32;
    let scale = (size_f / src_w as f32).min(size_f / src_h as f32) * FIT_MARGIN;
    let new_w = ((src_w as f32 * scale).round() as u32).max(1);
    let new_h = ((src_h as f32 * scale).round() as u32).max(1);
    let scaled = image::imageops::resize(&rgba, new_w, new_h, FilterType::Lanczos3);

    // Inverse-map each output pixel into the scaled image's frame so the
    // result is rotated about the thumbnail center
    let mut out = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let angle = rotation_deg.to_radians();
    let (sin, cos) = angle.sin_cos();
    let center = size_f / 2.0;
    let half_w = new_w as f32 / 2.0;
    let half_h = new_h as f32 / 2.0;

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let sx = dx * cos + dy * sin + half_w;
            let sy = -dx * sin + dy * cos + half_h;
            if sx >= 0.0 && sy >= 0.0 && sx < new_w as f32 && sy < new_h as f32 {
                out.put_pixel(x, y, *scaled.get_pixel(sx as u32, sy as u32));
            }
        }
    }

    let mut buf = Vec::new();
    out.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| format!("Failed to encode thumbnail: {}", e))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_png(w: u32, h: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba(color));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        buf
    }

    #[test]
    fn test_output_is_normalized_square() {
        let png = solid_png(37, 91, [255, 0, 0, 255]);
        let out = normalized_thumbnail(&png, 0.0).unwrap();

        let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (THUMBNAIL_SIZE, THUMBNAIL_SIZE));
    }

    #[test]
    fn test_center_pixel_survives_rotation() {
        let png = solid_png(40, 40, [255, 0, 0, 255]);
        for rotation in [0.0, 45.0, 90.0, 135.0] {
            let out = normalized_thumbnail(&png, rotation).unwrap();
            let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
            let center = decoded.get_pixel(THUMBNAIL_SIZE / 2, THUMBNAIL_SIZE / 2);
            assert_eq!(center.0, [255, 0, 0, 255], "rotation {}", rotation);
            // Corners stay outside the fitted image
            assert_eq!(decoded.get_pixel(0, 0).0[3], 0, "rotation {}", rotation);
        }
    }

    #[test]
    fn test_wide_image_keeps_margin() {
        let png = solid_png(400, 100, [0, 128, 255, 255]);
        let out = normalized_thumbnail(&png, 0.0).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_rgba8();

        // 400x100 scaled to fit 200*0.9 wide -> 180x45 centered: rows near
        // the top edge are transparent, the center row is filled
        assert_eq!(decoded.get_pixel(100, 5).0[3], 0);
        assert_eq!(decoded.get_pixel(100, 100).0, [0, 128, 255, 255]);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(normalized_thumbnail(b"not an image", 0.0).is_err());
    }
}

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{GrayImage, ImageFormat, Luma};

use crate::error::Result;
use crate::qrcode::{Symbol, SymbolOptions};

/*---- Rendering ----*/

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Renders a symbol into a grayscale image buffer.
///
/// Every module becomes a `module_size`-pixel square and a light quiet zone of `quiet_zone`
/// modules surrounds the symbol, so the image is
/// `(size + 2 * quiet_zone) * module_size` pixels on each side.
///
/// # Example
///
/// ```
/// use vcardqr::helper::to_image_buffer;
/// use vcardqr::qrcode::{encode, SymbolOptions};
///
/// let options = SymbolOptions::default();
/// let symbol = encode("Hello, World!", &options).unwrap();
/// let img = to_image_buffer(&symbol, &options);
/// assert_eq!(img.dimensions(), (290, 290));
/// ```
pub fn to_image_buffer(symbol: &Symbol, options: &SymbolOptions) -> GrayImage {
    let scale: u32 = options.module_size.max(1);
    let border = options.quiet_zone as i32;
    let side: u32 = (symbol.size() as u32 + 2 * options.quiet_zone) * scale;

    GrayImage::from_fn(side, side, |x, y| {
        let qr_x = (x / scale) as i32 - border;
        let qr_y = (y / scale) as i32 - border;
        if symbol.module(qr_x, qr_y) { DARK } else { LIGHT }
    })
}

/// Renders a symbol and encodes the image as PNG.
///
/// # Errors
///
/// Returns an `image::ImageError` (wrapped in [`crate::Error`]) if PNG encoding fails.
pub fn to_png_bytes(symbol: &Symbol, options: &SymbolOptions) -> Result<Vec<u8>> {
    let img = to_image_buffer(symbol, options);
    let mut bytes: Vec<u8> = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Renders a symbol as a PNG and returns it as standard, padded base64 text.
pub fn to_base64_png(symbol: &Symbol, options: &SymbolOptions) -> Result<String> {
    let png = to_png_bytes(symbol, options)?;
    Ok(STANDARD.encode(png))
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::qrcode::encode;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_image_dimensions() {
        let options = SymbolOptions::default();
        let symbol = encode("Hello, world!", &options).unwrap();
        let img = to_image_buffer(&symbol, &options);

        // 21 modules plus a 4-module border on each side, 10 pixels per module
        assert_eq!(img.dimensions(), (290, 290));
    }

    #[test]
    fn test_quiet_zone_is_light() {
        let options = SymbolOptions::default();
        let symbol = encode("quiet", &options).unwrap();
        let img = to_image_buffer(&symbol, &options);
        let edge = options.quiet_zone * options.module_size;
        for i in 0..img.width() {
            assert_eq!(*img.get_pixel(i, 0), LIGHT);
            assert_eq!(*img.get_pixel(0, i), LIGHT);
            assert_eq!(*img.get_pixel(i, edge - 1), LIGHT);
        }
        // Top-left finder pattern starts right after the quiet zone
        assert_eq!(*img.get_pixel(edge, edge), DARK);
        assert_eq!(*img.get_pixel(edge + 9, edge + 9), DARK);
    }

    #[test]
    fn test_modules_scale_to_squares() {
        let options = SymbolOptions { module_size: 3, quiet_zone: 1, ..SymbolOptions::default() };
        let symbol = encode("scale", &options).unwrap();
        let img = to_image_buffer(&symbol, &options);
        assert_eq!(img.width(), (21 + 2) * 3);
        for y in 0..symbol.size() {
            for x in 0..symbol.size() {
                let expected = if symbol.module(x, y) { DARK } else { LIGHT };
                let (px, py) = (((x + 1) * 3) as u32, ((y + 1) * 3) as u32);
                for (dx, dy) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
                    assert_eq!(*img.get_pixel(px + dx, py + dy), expected);
                }
            }
        }
    }

    #[test]
    fn test_png_signature() {
        let options = SymbolOptions::default();
        let symbol = encode("png", &options).unwrap();
        let png = to_png_bytes(&symbol, &options).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_base64_decodes_to_png() {
        let options = SymbolOptions::default();
        let symbol = encode("base64", &options).unwrap();
        let text = to_base64_png(&symbol, &options).unwrap();
        let png = STANDARD.decode(text.as_bytes()).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);

        let img = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!(img.width(), 290);
    }
}

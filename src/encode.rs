use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, GrayImage, ImageEncoder, Luma};
use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::options::RenderOptions;
use crate::qr::{QrBackend, QrcodeBackend, DATA_URL_PREFIX};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Encode and rasterize `text`, then scale it to `options.size` square.
pub fn render_bitmap_with<B: QrBackend>(
    backend: &B,
    text: &str,
    options: &RenderOptions,
) -> Result<GrayImage, GenerationError> {
    options.validate()?;

    let grid = backend.encode(text, options.error_correction)?;
    debug!(
        version = grid.version(),
        modules = grid.width(),
        "encoded symbol"
    );

    let raw = backend.rasterize(&grid, options.module_pixels, options.border, DARK, LIGHT)?;
    debug!(width = raw.width(), size = options.size, "resizing bitmap");

    Ok(imageops::resize(
        &raw,
        options.size,
        options.size,
        FilterType::Lanczos3,
    ))
}

pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, GenerationError> {
    let mut png_bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        &mut png_bytes,
        CompressionType::Best,
        PngFilterType::Adaptive,
    );
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::L8,
    )?;
    Ok(png_bytes)
}

pub fn to_data_url(png_bytes: &[u8]) -> String {
    format!("{}{}", DATA_URL_PREFIX, BASE64.encode(png_bytes))
}

pub fn render_png_with<B: QrBackend>(
    backend: &B,
    text: &str,
    options: &RenderOptions,
) -> Result<Vec<u8>, GenerationError> {
    let bitmap = render_bitmap_with(backend, text, options)?;
    let png_bytes = encode_png(&bitmap)?;
    debug!(bytes = png_bytes.len(), "serialized png");
    Ok(png_bytes)
}

/// Full pipeline: text in, `data:image/png;base64,...` out.
pub fn generate_qr_data_url_with<B: QrBackend>(
    backend: &B,
    text: &str,
    options: &RenderOptions,
) -> Result<String> {
    let png_bytes = render_png_with(backend, text, options)?;
    Ok(to_data_url(&png_bytes))
}

pub fn render_bitmap(text: &str, options: &RenderOptions) -> Result<GrayImage, GenerationError> {
    render_bitmap_with(&QrcodeBackend, text, options)
}

pub fn render_png(text: &str, options: &RenderOptions) -> Result<Vec<u8>, GenerationError> {
    render_png_with(&QrcodeBackend, text, options)
}

pub fn generate_qr_data_url(text: &str, options: &RenderOptions) -> Result<String> {
    generate_qr_data_url_with(&QrcodeBackend, text, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::options::ErrorCorrection;
    use crate::qr::ModuleGrid;

    /// Always hands back a fixed 3x3 grid.
    struct FixedBackend;

    impl QrBackend for FixedBackend {
        fn encode(
            &self,
            _text: &str,
            _level: ErrorCorrection,
        ) -> Result<ModuleGrid, GenerationError> {
            ModuleGrid::new(
                1,
                3,
                vec![true, false, true, false, true, false, true, false, true],
            )
        }

        fn rasterize(
            &self,
            grid: &ModuleGrid,
            pixels_per_module: u32,
            border_modules: u32,
            fg: Luma<u8>,
            bg: Luma<u8>,
        ) -> Result<GrayImage, GenerationError> {
            crate::qr::rasterize_grid(grid, pixels_per_module, border_modules, fg, bg)
        }
    }

    #[test]
    fn test_data_url_prefix() {
        let url = generate_qr_data_url("hello", &RenderOptions::default()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(BASE64.decode(&url[DATA_URL_PREFIX.len()..]).is_ok());
    }

    #[test]
    fn test_png_is_exactly_size() {
        let png = render_png("hello", &RenderOptions::default()).unwrap();
        let img = image::load_from_memory_with_format(&png, image::ImageFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (400, 400));
    }

    #[test]
    fn test_custom_size_and_backend() {
        let options = RenderOptions {
            size: 64,
            border: 1,
            ..RenderOptions::default()
        };
        let bitmap = render_bitmap_with(&FixedBackend, "ignored", &options).unwrap();
        assert_eq!(bitmap.dimensions(), (64, 64));
        // corners sit in the quiet zone
        assert_eq!(bitmap.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn test_resize_is_smooth() {
        // 21 + 8 modules at 10 px = 290 px, scaled to 400: a nearest-neighbour
        // resize would keep every pixel pure black or white.
        let bitmap = render_bitmap("hello", &RenderOptions::default()).unwrap();
        let has_grey = bitmap.pixels().any(|p| p.0[0] != 0 && p.0[0] != 255);
        assert!(has_grey, "Lanczos resampling should produce intermediate tones");
    }

    #[test]
    fn test_deterministic_output() {
        let options = RenderOptions::default();
        let first = generate_qr_data_url("same text", &options).unwrap();
        let second = generate_qr_data_url("same text", &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_capacity_error_is_wrapped() {
        let text = "a".repeat(3000);
        let err = generate_qr_data_url(&text, &RenderOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Generation(GenerationError::Encode(_))
        ));
        assert!(err.to_string().starts_with("QR code generation failed: "));
    }

    #[test]
    fn test_invalid_options_are_wrapped() {
        let options = RenderOptions {
            size: 0,
            ..RenderOptions::default()
        };
        let err = generate_qr_data_url("hello", &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "QR code generation failed: invalid render options: size must be non-zero"
        );
    }

    #[cfg(feature = "decode")]
    #[test]
    fn test_rendered_png_scans_back() {
        let text = "Hello, World!";
        let png = render_png(text, &RenderOptions::default()).unwrap();
        assert_eq!(crate::qr::decode_png(&png).unwrap(), text);
    }
}

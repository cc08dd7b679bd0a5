#[cfg(feature = "decode")]
use anyhow::anyhow;

use image::{GrayImage, ImageBuffer, Luma};

#[cfg(feature = "encode")]
use qrcode::{types::QrError, Color, QrCode, Version};

#[cfg(feature = "decode")]
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
#[cfg(feature = "decode")]
use rqrr::PreparedImage;

use crate::error::GenerationError;
use crate::options::ErrorCorrection;

pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 40;

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Square matrix of QR modules, `true` meaning dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    version: u8,
    width: usize,
    modules: Vec<bool>,
}

impl ModuleGrid {
    pub fn new(version: u8, width: usize, modules: Vec<bool>) -> Result<Self, GenerationError> {
        if width == 0 || modules.len() != width * width {
            return Err(GenerationError::InvalidOptions(
                "module grid must be a non-empty square",
            ));
        }
        Ok(Self {
            version,
            width,
            modules,
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Coordinates outside the symbol (the quiet zone) read as light.
    pub fn is_dark(&self, x: i64, y: i64) -> bool {
        let w = self.width as i64;
        if x < 0 || y < 0 || x >= w || y >= w {
            return false;
        }
        self.modules[(y * w + x) as usize]
    }
}

/// The two things the pipeline needs from a QR library.
pub trait QrBackend {
    /// Build the smallest symbol that holds `text` at `level`.
    fn encode(&self, text: &str, level: ErrorCorrection) -> Result<ModuleGrid, GenerationError>;

    fn rasterize(
        &self,
        grid: &ModuleGrid,
        pixels_per_module: u32,
        border_modules: u32,
        fg: Luma<u8>,
        bg: Luma<u8>,
    ) -> Result<GrayImage, GenerationError>;
}

/// Backend built on the `qrcode` crate.
#[cfg(feature = "encode")]
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeBackend;

#[cfg(feature = "encode")]
impl QrBackend for QrcodeBackend {
    fn encode(&self, text: &str, level: ErrorCorrection) -> Result<ModuleGrid, GenerationError> {
        let ec_level = level.into();

        // Walk up from version 1 so the first fit is the smallest one.
        for v in MIN_VERSION..=MAX_VERSION {
            match QrCode::with_version(text.as_bytes(), Version::Normal(v as i16), ec_level) {
                Ok(code) => {
                    let width = code.width();
                    let modules = code
                        .to_colors()
                        .into_iter()
                        .map(|c| c == Color::Dark)
                        .collect();
                    return ModuleGrid::new(v, width, modules);
                }
                Err(QrError::DataTooLong) => continue,
                Err(e) => return Err(GenerationError::Encode(e)),
            }
        }

        Err(GenerationError::Encode(QrError::DataTooLong))
    }

    fn rasterize(
        &self,
        grid: &ModuleGrid,
        pixels_per_module: u32,
        border_modules: u32,
        fg: Luma<u8>,
        bg: Luma<u8>,
    ) -> Result<GrayImage, GenerationError> {
        rasterize_grid(grid, pixels_per_module, border_modules, fg, bg)
    }
}

/// Paint each module as a `pixels_per_module` square, padded by
/// `border_modules` light modules on every side.
pub fn rasterize_grid(
    grid: &ModuleGrid,
    pixels_per_module: u32,
    border_modules: u32,
    fg: Luma<u8>,
    bg: Luma<u8>,
) -> Result<GrayImage, GenerationError> {
    if pixels_per_module == 0 {
        return Err(GenerationError::InvalidOptions(
            "module_pixels must be non-zero",
        ));
    }

    let side = u32::try_from(grid.width())
        .ok()
        .and_then(|w| border_modules.checked_mul(2).and_then(|b| w.checked_add(b)))
        .and_then(|modules| modules.checked_mul(pixels_per_module))
        .ok_or(GenerationError::InvalidOptions("bitmap dimensions overflow"))?;

    let border = border_modules as i64;
    let image = ImageBuffer::from_fn(side, side, |x, y| {
        let mx = (x / pixels_per_module) as i64 - border;
        let my = (y / pixels_per_module) as i64 - border;
        if grid.is_dark(mx, my) {
            fg
        } else {
            bg
        }
    });

    Ok(image)
}

#[cfg(feature = "decode")]
pub fn decode_qr_from_gray(gray: &GrayImage) -> anyhow::Result<String> {
    let mut prepared = PreparedImage::prepare(gray.clone());
    let grids = prepared.detect_grids();

    if grids.is_empty() {
        return Err(anyhow!("No QR code found in image"));
    }

    let (_, content) = grids[0]
        .decode()
        .map_err(|e| anyhow!("Failed to decode QR code: {:?}", e))?;

    Ok(content)
}

#[cfg(feature = "decode")]
pub fn decode_png(bytes: &[u8]) -> anyhow::Result<String> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
    decode_qr_from_gray(&img.to_luma8())
}

/// Scan the PNG embedded in a `data:image/png;base64,` URL.
#[cfg(feature = "decode")]
pub fn decode_data_url(url: &str) -> anyhow::Result<String> {
    let payload = url
        .trim()
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| anyhow!("Not a PNG data URL"))?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| anyhow!("Invalid base64 payload: {}", e))?;
    decode_png(&bytes)
}

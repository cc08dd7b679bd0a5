use crate::error::GenerationError;

/// Side length of the final PNG, in pixels.
pub const DEFAULT_SIZE: u32 = 400;
/// Quiet zone width, in modules.
pub const DEFAULT_BORDER: u32 = 4;
/// Pixels per module before the final resize.
pub const DEFAULT_MODULE_PIXELS: u32 = 10;

/// Redundancy grade of the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    /// ~7% recoverable
    Low,
    /// ~15% recoverable
    #[default]
    Medium,
    /// ~25% recoverable
    Quartile,
    /// ~30% recoverable
    High,
}

#[cfg(feature = "encode")]
impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub size: u32,
    pub border: u32,
    pub module_pixels: u32,
    pub error_correction: ErrorCorrection,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            border: DEFAULT_BORDER,
            module_pixels: DEFAULT_MODULE_PIXELS,
            error_correction: ErrorCorrection::Medium,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.size == 0 {
            return Err(GenerationError::InvalidOptions("size must be non-zero"));
        }
        if self.module_pixels == 0 {
            return Err(GenerationError::InvalidOptions(
                "module_pixels must be non-zero",
            ));
        }
        Ok(())
    }
}

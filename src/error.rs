use thiserror::Error;

/// Everything that can stop a request from producing a QR code.
///
/// The `Display` text of each variant is exactly what ends up in the
/// `error` field of the JSON envelope.
#[derive(Debug, Error)]
pub enum Error {
    /// No positional argument was given.
    #[error("No text provided")]
    Usage,

    /// The argument was present but blank after trimming.
    #[error("Empty text provided")]
    Validation,

    /// The encoder or the image codec failed.
    #[error("QR code generation failed: {0}")]
    Generation(#[source] GenerationError),
}

/// Failure inside the rendering pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The symbol encoder rejected the text (usually capacity).
    #[cfg(feature = "encode")]
    #[error("{0}")]
    Encode(qrcode::types::QrError),

    #[error("{0}")]
    Codec(#[from] image::ImageError),

    #[error("invalid render options: {0}")]
    InvalidOptions(&'static str),
}

impl From<GenerationError> for Error {
    fn from(err: GenerationError) -> Self {
        Error::Generation(err)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages_match_envelope_text() {
        assert_eq!(Error::Usage.to_string(), "No text provided");
        assert_eq!(Error::Validation.to_string(), "Empty text provided");

        let err = Error::from(GenerationError::InvalidOptions("size must be non-zero"));
        assert_eq!(
            err.to_string(),
            "QR code generation failed: invalid render options: size must be non-zero"
        );
    }

    #[test]
    fn test_generation_error_keeps_cause() {
        let err = Error::from(GenerationError::InvalidOptions("size must be non-zero"));
        let source = err.source().expect("generation error should carry a source");
        assert_eq!(
            source.to_string(),
            "invalid render options: size must be non-zero"
        );
    }

    #[cfg(feature = "encode")]
    #[test]
    fn test_encoder_capacity_message() {
        let err = Error::from(GenerationError::Encode(
            qrcode::types::QrError::DataTooLong,
        ));
        assert!(err.to_string().starts_with("QR code generation failed: "));
        assert!(err.to_string().contains("data too long"));
    }
}

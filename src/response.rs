use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Error;

/// Literal value of the `timestamp` key. Not a clock reading.
pub const TIMESTAMP_MARKER: &str = "generated";

pub const USAGE: &str = concat!(env!("CARGO_PKG_NAME"), " 'text to encode'");

/// The single JSON object printed per invocation.
///
/// A success always carries `qr` and never `error`; every other shape carries
/// `error` and never `qr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success { qr: String, text: String },
    Failure { error: String, text: String },
    Rejected { error: String, usage: Option<String> },
}

impl Response {
    pub fn success(qr: String, text: String) -> Self {
        Response::Success { qr, text }
    }

    /// Build the envelope for `err`; `raw_text` is the argument as given,
    /// before trimming.
    pub fn from_error(err: &Error, raw_text: &str) -> Self {
        match err {
            Error::Usage => Response::Rejected {
                error: err.to_string(),
                usage: Some(USAGE.to_string()),
            },
            Error::Validation => Response::Rejected {
                error: err.to_string(),
                usage: None,
            },
            Error::Generation(_) => Response::Failure {
                error: err.to_string(),
                text: raw_text.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Response::Success { qr, text } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("qr", qr)?;
                map.serialize_entry("text", text)?;
                map.serialize_entry("timestamp", TIMESTAMP_MARKER)?;
                map.end()
            }
            Response::Failure { error, text } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("text", text)?;
                map.end()
            }
            Response::Rejected { error, usage } => {
                let len = if usage.is_some() { 2 } else { 1 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("error", error)?;
                if let Some(usage) = usage {
                    map.serialize_entry("usage", usage)?;
                }
                map.end()
            }
        }
    }
}

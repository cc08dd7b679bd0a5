use std::error::Error as _;
use std::ffi::OsString;

use tracing::{debug, warn};

use crate::encode::generate_qr_data_url;
use crate::error::{Error, Result};
use crate::options::RenderOptions;
use crate::response::Response;

/// Turn raw argv values into text; invalid UTF-8 becomes U+FFFD.
pub fn lossy_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.into_string() {
            Ok(text) => text,
            Err(raw) => {
                debug!("argument is not valid UTF-8, replacing invalid bytes");
                raw.to_string_lossy().into_owned()
            }
        })
        .collect()
}

/// Trim and reject blank input.
pub fn validate_text(raw: &str) -> Result<&str> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(Error::Validation);
    }
    Ok(text)
}

/// Handle one invocation. `args` are the positional arguments, program name
/// excluded; only the first one is used.
pub fn run<S: AsRef<str>>(args: &[S]) -> Response {
    let raw = args.first().map(|s| s.as_ref());
    if args.len() > 1 {
        debug!(ignored = args.len() - 1, "extra arguments ignored");
    }

    let result = raw
        .ok_or(Error::Usage)
        .and_then(validate_text)
        .and_then(|text| {
            let qr = generate_qr_data_url(text, &RenderOptions::default())?;
            Ok(Response::success(qr, text.to_string()))
        });

    match result {
        Ok(response) => response,
        Err(err) => {
            match err.source() {
                Some(cause) => warn!(error = %err, cause = ?cause, "request failed"),
                None => warn!(error = %err, "request failed"),
            }
            Response::from_error(&err, raw.unwrap_or(""))
        }
    }
}

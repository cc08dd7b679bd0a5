use anyhow::Result;
use clap::Parser;
use serde_json::json;
use std::io::{self, Write};
use std::process::ExitCode;

use qrgen::decode_data_url;
use qrgen::logging::init_tracing;

#[derive(Parser)]
#[command(name = "qrgen-decode")]
#[command(author, version, about = "Scan a QR code PNG data URL back to its text", long_about = None)]
struct Cli {
    /// data:image/png;base64,... URL as printed by qrgen
    data_url: Option<String>,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Cli::parse();

    let (value, code) = match args.data_url.as_deref().map(decode_data_url) {
        None => (json!({ "success": false, "error": "No data URL provided" }), 1),
        Some(Ok(text)) => (json!({ "success": true, "text": text }), 0),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "decode failed");
            (json!({ "success": false, "error": e.to_string() }), 1)
        }
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &value)?;
    writeln!(stdout)?;

    Ok(ExitCode::from(code))
}

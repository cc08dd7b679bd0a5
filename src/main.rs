use anyhow::Result;
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use std::iter;
use std::process::ExitCode;

use qrgen::cli::lossy_args;
use qrgen::logging::init_tracing;
use qrgen::run;

#[derive(Parser)]
#[command(name = "qrgen")]
#[command(about = "Encode text as a QR code PNG data URL, printed as JSON", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Text to encode (quote it if it contains spaces). Only the first value is used.
    #[arg(
        num_args = 0..,
        allow_hyphen_values = true,
        trailing_var_arg = true,
        value_parser = clap::value_parser!(OsString)
    )]
    text: Vec<OsString>,
}

fn main() -> Result<ExitCode> {
    init_tracing();

    // Everything after the program name is text, so clap sees it behind `--`.
    let argv = std::env::args_os()
        .take(1)
        .chain(iter::once(OsString::from("--")))
        .chain(std::env::args_os().skip(1));

    let response = match Cli::try_parse_from(argv) {
        Ok(args) => run(lossy_args(args.text).as_slice()),
        Err(e) => {
            tracing::warn!(error = %e, "argument parsing failed");
            run::<String>(&[])
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response.to_json()?)?;
    stdout.flush()?;

    Ok(ExitCode::from(response.exit_code()))
}

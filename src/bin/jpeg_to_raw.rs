//! jpeg_to_raw - one-shot compressed image to raw RGB converter
//!
//! Decodes a compressed image (JPEG, PNG), stretches it to an exact target
//! resolution, and writes the bare pixel buffer with no header. Exits 0 on
//! success, 1 on failure, always printing the report detail.

use std::process::ExitCode;

use clap::Parser;

use camprobe::{convert_to_raw, ConvertRequest};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert a compressed image to headerless raw RGB")]
struct Args {
    /// Input image file (JPEG or PNG).
    input: String,

    /// Output raw RGB file.
    output: String,

    /// Target width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Target height in pixels.
    #[arg(long, default_value_t = 640)]
    height: u32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let request =
        ConvertRequest::new(&args.input, &args.output).with_size(args.width, args.height);
    let report = convert_to_raw(&request);

    if report.success {
        println!("{}", report.detail);
        ExitCode::SUCCESS
    } else {
        eprintln!("conversion failed: {}", report.detail);
        ExitCode::FAILURE
    }
}

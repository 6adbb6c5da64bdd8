//! video_detect - object detection viewer
//!
//! Opens a camera index or video file, runs an ONNX detector on every frame,
//! and shows the annotated stream in a window. ESC or closing the window
//! stops it; file sources also stop at end of stream.
//!
//! A source that fails to open is reported and the process exits cleanly; a
//! model that fails to load is a hard error.

use anyhow::{Context, Result};
use clap::Parser;

use camprobe::{
    viewer, CaptureSource, DisplayWindow, SourceSpec, TractDetector,
};
use camprobe::ingest::CaptureConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run an ONNX object detector over a video source")]
struct Args {
    /// Camera index (e.g. 0) or video file path. `stub://` gives a synthetic
    /// test stream.
    source: String,

    /// Path to the ONNX detection model.
    #[arg(long, env = "CAMPROBE_MODEL", default_value = "model/model.onnx")]
    model: String,

    /// Minimum score a detection must exceed to be drawn.
    #[arg(long, default_value_t = 0.4)]
    score_thresh: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let spec = SourceSpec::parse(&args.source);
    let mut source = match CaptureSource::open(&spec, &CaptureConfig::default()) {
        Ok(source) => source,
        Err(e) => {
            log::error!("failed to open {}: {:#}", spec, e);
            return Ok(());
        }
    };

    let mut detector = TractDetector::load(&args.model)
        .with_context(|| format!("failed to load detection model '{}'", args.model))?;
    let mut window = DisplayWindow::new("video_detect");

    let summary = viewer::run(&mut source, &mut detector, &mut window, args.score_thresh)?;
    log::info!(
        "done: {} frames, {} detections drawn",
        summary.frames,
        summary.detections
    );
    Ok(())
}

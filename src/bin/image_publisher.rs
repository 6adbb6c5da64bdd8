//! image_publisher - synthetic test frame publisher
//!
//! Renders the animated plaid test pattern at a fixed cadence and publishes
//! each frame on a pub/sub topic for downstream consumers to test against.
//! Ctrl-C stops the loop cleanly and releases the client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use camprobe::publish::StampClock;
use camprobe::{FramePublisher, ImageMessage, PublisherSettings, TestPattern};

#[derive(Parser, Debug)]
#[command(author, version, about = "Publish a synthetic test image stream")]
struct Args {
    /// MQTT broker address.
    #[arg(long, env = "CAMPROBE_BROKER", default_value = "127.0.0.1:1883")]
    broker: String,

    /// Topic to publish image messages on.
    #[arg(long, env = "CAMPROBE_TOPIC", default_value = "/camera/image_raw")]
    topic: String,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Publish cadence in frames per second.
    #[arg(long, default_value_t = 10)]
    fps: u32,

    /// Frame identifier carried in every message.
    #[arg(long, default_value = "camera_frame")]
    frame_id: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.fps == 0 {
        return Err(anyhow!("--fps must be at least 1"));
    }

    let settings = PublisherSettings {
        broker: args.broker.clone(),
        topic: args.topic.clone(),
        ..PublisherSettings::default()
    };
    let publisher = FramePublisher::connect(&settings)?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })
        .expect("error setting Ctrl-C handler");
    }

    let pattern = TestPattern::new(args.width, args.height);
    let mut clock = StampClock::new();
    let interval = Duration::from_secs_f64(1.0 / args.fps as f64);
    let mut published = 0u64;

    log::info!(
        "publishing {}x{} rgb8 frames at {} fps on {}",
        args.width,
        args.height,
        args.fps,
        args.topic
    );

    while running.load(Ordering::SeqCst) {
        let t = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_secs_f64();
        let frame = pattern.render(t);
        let message = ImageMessage::from_frame(&frame, &args.frame_id, clock.next()?);
        publisher.publish(&message)?;

        published += 1;
        log::debug!("published image: {}x{}", args.width, args.height);
        if published % 100 == 0 {
            log::info!("published {} frames", published);
        }

        std::thread::sleep(interval);
    }

    log::info!("interrupt received, shutting down after {} frames", published);
    publisher.shutdown()?;
    Ok(())
}

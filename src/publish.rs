//! Pub/sub image publisher.
//!
//! Frames are published on an MQTT topic as a JSON envelope mirroring a raw
//! image message: dimensions, fixed `"rgb8"` encoding tag, byte-order flag,
//! row stride, and the flat pixel payload (hex-encoded). Readers must know
//! nothing out-of-band: the envelope is self-describing.
//!
//! The client lifecycle is an explicit context object (`FramePublisher`)
//! rather than process-wide implicit state: `connect` acquires the client and
//! spawns the connection-poll thread, `shutdown` disconnects and joins it.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use rumqttc::v5::{mqttbytes::QoS, Client, Connection, Event, MqttOptions};
use serde::{Deserialize, Serialize};

use crate::frame::RgbFrame;

pub const IMAGE_ENCODING_RGB8: &str = "rgb8";
pub const DEFAULT_IMAGE_TOPIC: &str = "/camera/image_raw";

/// Wire envelope for one published frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageMessage {
    /// Fixed identifier for the emitting frame, e.g. "camera_frame".
    pub frame_id: String,
    /// Monotonically increasing timestamp in nanoseconds.
    pub stamp_ns: u64,
    pub height: u32,
    pub width: u32,
    /// Pixel encoding tag. Always `"rgb8"` for this publisher.
    pub encoding: String,
    pub is_bigendian: bool,
    /// Row stride in bytes (width * 3).
    pub step: u32,
    /// Hex-encoded row-major RGB payload.
    pub data: String,
}

impl ImageMessage {
    pub fn from_frame(frame: &RgbFrame, frame_id: &str, stamp_ns: u64) -> Self {
        Self {
            frame_id: frame_id.to_string(),
            stamp_ns,
            height: frame.height(),
            width: frame.width(),
            encoding: IMAGE_ENCODING_RGB8.to_string(),
            is_bigendian: false,
            step: frame.step(),
            data: hex::encode(frame.as_bytes()),
        }
    }
}

/// Monotonic wall-clock stamp source.
///
/// Wall clocks can step backwards; published stamps must not.
#[derive(Debug, Default)]
pub struct StampClock {
    last_ns: u64,
}

impl StampClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Result<u64> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_nanos() as u64;
        self.last_ns = now.max(self.last_ns + 1);
        Ok(self.last_ns)
    }
}

/// Connection settings for the publisher.
#[derive(Clone, Debug)]
pub struct PublisherSettings {
    /// Broker address, host:port.
    pub broker: String,
    pub topic: String,
    pub client_id: String,
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            broker: "127.0.0.1:1883".to_string(),
            topic: DEFAULT_IMAGE_TOPIC.to_string(),
            client_id: "camprobe_image_publisher".to_string(),
        }
    }
}

/// MQTT publisher context with an owned connection-poll thread.
pub struct FramePublisher {
    client: Client,
    topic: String,
    poll_handle: Option<std::thread::JoinHandle<()>>,
}

impl FramePublisher {
    /// Connect to the broker and start polling the connection event loop.
    pub fn connect(settings: &PublisherSettings) -> Result<Self> {
        let (host, port) = parse_broker_addr(&settings.broker)?;
        let mut options = MqttOptions::new(settings.client_id.clone(), host, port);
        options.set_keep_alive(Duration::from_secs(5));

        let (client, connection) = Client::new(options, 10);
        let poll_handle = spawn_connection_poll(connection);
        log::info!(
            "publisher connected to {} topic={}",
            settings.broker,
            settings.topic
        );

        Ok(Self {
            client,
            topic: settings.topic.clone(),
            poll_handle: Some(poll_handle),
        })
    }

    /// Publish one image envelope at QoS 0.
    pub fn publish(&self, message: &ImageMessage) -> Result<()> {
        let payload = serde_json::to_vec(message).context("serialize image message")?;
        self.client
            .publish(self.topic.clone(), QoS::AtMostOnce, false, payload)
            .context("publish image message")?;
        Ok(())
    }

    /// Disconnect and join the poll thread. Called exactly once at shutdown.
    pub fn shutdown(mut self) -> Result<()> {
        self.client.disconnect().context("mqtt disconnect")?;
        if let Some(handle) = self.poll_handle.take() {
            let _ = handle.join();
        }
        log::info!("publisher shut down");
        Ok(())
    }
}

fn spawn_connection_poll(mut connection: Connection) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for event in connection.iter() {
            match event {
                Ok(Event::Incoming(_)) | Ok(Event::Outgoing(_)) => {}
                Err(e) => {
                    log::warn!("MQTT connection error: {}", e);
                    break;
                }
            }
        }
    })
}

fn parse_broker_addr(addr: &str) -> Result<(String, u16)> {
    let (host, port) = addr
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("broker address must be host:port, got '{}'", addr))?;
    if host.is_empty() {
        return Err(anyhow!("broker address has an empty host: '{}'", addr));
    }
    let port: u16 = port
        .parse()
        .map_err(|_| anyhow!("broker port is not a number: '{}'", addr))?;
    Ok((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::TestPattern;

    #[test]
    fn image_message_carries_frame_metadata() {
        let frame = TestPattern::new(8, 4).render(0.0);
        let msg = ImageMessage::from_frame(&frame, "camera_frame", 42);

        assert_eq!(msg.frame_id, "camera_frame");
        assert_eq!(msg.stamp_ns, 42);
        assert_eq!(msg.width, 8);
        assert_eq!(msg.height, 4);
        assert_eq!(msg.encoding, "rgb8");
        assert!(!msg.is_bigendian);
        assert_eq!(msg.step, 8 * 3);
        // Hex doubles the payload length.
        assert_eq!(msg.data.len(), 8 * 4 * 3 * 2);
    }

    #[test]
    fn image_message_payload_round_trips() {
        let frame = TestPattern::new(4, 4).render(1.0);
        let msg = ImageMessage::from_frame(&frame, "camera_frame", 1);
        let json = serde_json::to_string(&msg).unwrap();
        let back: ImageMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(hex::decode(back.data).unwrap(), frame.as_bytes());
    }

    #[test]
    fn stamps_are_strictly_increasing() {
        let mut clock = StampClock::new();
        let a = clock.next().unwrap();
        let b = clock.next().unwrap();
        let c = clock.next().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn broker_addr_parsing() {
        assert_eq!(
            parse_broker_addr("127.0.0.1:1883").unwrap(),
            ("127.0.0.1".to_string(), 1883)
        );
        assert!(parse_broker_addr("nonsense").is_err());
        assert!(parse_broker_addr("host:notaport").is_err());
        assert!(parse_broker_addr(":1883").is_err());
    }
}

//! Overlay primitives.
//!
//! Boxes and labels are drawn directly on the RGB buffer with clipped pixel
//! writes; no font assets are bundled. Labels only need digits (class ids),
//! rendered from a small 5x7 bitmap table.
//!
//! Detection coordinates are used in the frame's own coordinate space,
//! exactly as the model emitted them; nothing is rescaled from the model's
//! input resolution.

use crate::detect::DetectionRecord;
use crate::frame::RgbFrame;

pub const OVERLAY_COLOR: [u8; 3] = [0, 255, 0];

const BOX_THICKNESS: i64 = 2;
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Label baseline offset above the box's top edge.
const LABEL_GAP: i64 = 5;

/// Draw every record whose score strictly exceeds the threshold onto the
/// frame. Returns the number of records drawn.
pub fn draw_detections(frame: &mut RgbFrame, records: &[DetectionRecord], threshold: f32) -> usize {
    let mut drawn = 0;
    for record in records {
        if !record.passes(threshold) {
            continue;
        }
        draw_rect(
            frame,
            record.x1 as i64,
            record.y1 as i64,
            record.x2 as i64,
            record.y2 as i64,
            OVERLAY_COLOR,
        );
        let label = record.class_id.to_string();
        let label_y = record.y1 as i64 - LABEL_GAP - GLYPH_HEIGHT as i64;
        draw_label(frame, record.x1 as i64, label_y, &label, OVERLAY_COLOR);
        drawn += 1;
    }
    drawn
}

/// Hollow rectangle with a 2-pixel border. Coordinates are clamped to the
/// frame; degenerate boxes are dropped.
pub fn draw_rect(frame: &mut RgbFrame, x1: i64, y1: i64, x2: i64, y2: i64, color: [u8; 3]) {
    let w = frame.width() as i64;
    let h = frame.height() as i64;
    let x1 = x1.clamp(0, w - 1);
    let y1 = y1.clamp(0, h - 1);
    let x2 = x2.clamp(0, w - 1);
    let y2 = y2.clamp(0, h - 1);
    if x1 >= x2 || y1 >= y2 {
        return;
    }

    for t in 0..BOX_THICKNESS {
        let left = (x1 + t).min(x2);
        let right = (x2 - t).max(x1);
        let top = (y1 + t).min(y2);
        let bottom = (y2 - t).max(y1);
        for x in left..=right {
            frame.put_pixel(x as u32, top as u32, color);
            frame.put_pixel(x as u32, bottom as u32, color);
        }
        for y in top..=bottom {
            frame.put_pixel(left as u32, y as u32, color);
            frame.put_pixel(right as u32, y as u32, color);
        }
    }
}

/// Render a short label at (x, y) using the builtin 5x7 glyphs. Characters
/// without a glyph advance the cursor but draw nothing.
pub fn draw_label(frame: &mut RgbFrame, x: i64, y: i64, text: &str, color: [u8; 3]) {
    let mut cursor = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (dy, row) in rows.iter().enumerate() {
                for dx in 0..GLYPH_WIDTH {
                    if row & (1 << (GLYPH_WIDTH - 1 - dx)) != 0 {
                        let px = cursor + dx as i64;
                        let py = y + dy as i64;
                        if px >= 0 && py >= 0 {
                            frame.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
        cursor += GLYPH_WIDTH as i64 + 1;
    }
}

fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: f32) -> DetectionRecord {
        DetectionRecord::from_row(&[20.0, 20.0, 40.0, 40.0, score, 1.0]).unwrap()
    }

    #[test]
    fn records_at_or_below_threshold_are_not_drawn() {
        let mut frame = RgbFrame::black(64, 64);
        let drawn = draw_detections(&mut frame, &[record(0.39), record(0.40)], 0.4);
        assert_eq!(drawn, 0);
        assert!(frame.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn records_above_threshold_are_drawn() {
        let mut frame = RgbFrame::black(64, 64);
        let drawn = draw_detections(&mut frame, &[record(0.41)], 0.4);
        assert_eq!(drawn, 1);
        // Top-left corner of the box.
        assert_eq!(frame.pixel(20, 20), Some(OVERLAY_COLOR));
        // Border is two pixels thick.
        assert_eq!(frame.pixel(21, 21), Some(OVERLAY_COLOR));
        assert_eq!(frame.pixel(30, 30), Some([0, 0, 0]));
    }

    #[test]
    fn boxes_are_clipped_to_the_frame() {
        let mut frame = RgbFrame::black(32, 32);
        draw_rect(&mut frame, -10, -10, 100, 100, OVERLAY_COLOR);
        assert_eq!(frame.pixel(0, 0), Some(OVERLAY_COLOR));
        assert_eq!(frame.pixel(31, 31), Some(OVERLAY_COLOR));
    }

    #[test]
    fn degenerate_boxes_draw_nothing() {
        let mut frame = RgbFrame::black(32, 32);
        draw_rect(&mut frame, 10, 10, 10, 20, OVERLAY_COLOR);
        draw_rect(&mut frame, 20, 20, 5, 5, OVERLAY_COLOR);
        assert!(frame.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn labels_render_only_known_glyphs() {
        let mut frame = RgbFrame::black(64, 16);
        draw_label(&mut frame, 2, 2, "1", [255, 255, 255]);
        assert!(frame.as_bytes().iter().any(|&b| b != 0));

        let mut other = RgbFrame::black(64, 16);
        draw_label(&mut other, 2, 2, "??", [255, 255, 255]);
        assert!(other.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn offscreen_labels_are_clipped_not_panicking() {
        let mut frame = RgbFrame::black(16, 16);
        draw_label(&mut frame, -3, -20, "123", [255, 255, 255]);
    }
}

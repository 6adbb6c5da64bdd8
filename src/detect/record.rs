//! Per-object detection record.

/// One detection: corner-form bounding box, confidence score, class id.
///
/// Records are produced per frame and consumed immediately for rendering;
/// they have no lifecycle beyond the frame they were detected in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionRecord {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub score: f32,
    pub class_id: i32,
}

impl DetectionRecord {
    /// Parse one model output row of at least 6 fields:
    /// x1, y1, x2, y2, score, class. Shorter rows are malformed and yield
    /// `None`, which callers treat as a skip-record signal.
    pub fn from_row(row: &[f32]) -> Option<Self> {
        if row.len() < 6 {
            return None;
        }
        Some(Self {
            x1: row[0],
            y1: row[1],
            x2: row[2],
            y2: row[3],
            score: row[4],
            class_id: row[5] as i32,
        })
    }

    /// Strict threshold: a record is drawn only when its score exceeds the
    /// threshold. A score equal to the threshold is skipped.
    pub fn passes(&self, threshold: f32) -> bool {
        self.score > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_row_parses_six_fields() {
        let rec = DetectionRecord::from_row(&[10.0, 20.0, 110.0, 220.0, 0.9, 3.0]).unwrap();
        assert_eq!(rec.x1, 10.0);
        assert_eq!(rec.y2, 220.0);
        assert_eq!(rec.score, 0.9);
        assert_eq!(rec.class_id, 3);
    }

    #[test]
    fn short_rows_are_skipped() {
        assert!(DetectionRecord::from_row(&[]).is_none());
        assert!(DetectionRecord::from_row(&[1.0, 2.0, 3.0, 4.0, 0.5]).is_none());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let rec =
            DetectionRecord::from_row(&[1.0, 2.0, 3.0, 4.0, 0.5, 7.0, 0.1, 0.2]).unwrap();
        assert_eq!(rec.class_id, 7);
    }

    #[test]
    fn threshold_is_strict() {
        let mut rec = DetectionRecord::from_row(&[0.0, 0.0, 1.0, 1.0, 0.39, 0.0]).unwrap();
        assert!(!rec.passes(0.4));
        rec.score = 0.40;
        assert!(!rec.passes(0.4));
        rec.score = 0.41;
        assert!(rec.passes(0.4));
    }
}

//! Conversion tests through the public API with real files on disk.

use camprobe::{convert_to_raw, ConvertRequest};
use image::{Rgb, RgbImage};

#[test]
fn jpeg_input_converts_to_exact_raw_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.jpg");
    let output = dir.path().join("photo.rgb");

    let img = RgbImage::from_fn(320, 240, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));
    img.save(&input).unwrap();

    let report = convert_to_raw(&ConvertRequest::new(&input, &output));
    assert!(report.success, "{}", report.detail);
    assert!(report.detail.contains("640x640"));
    assert_eq!(std::fs::metadata(&output).unwrap().len(), 640 * 640 * 3);
}

#[test]
fn unwritable_output_path_is_a_failure_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ok.png");
    RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])).save(&input).unwrap();

    let report = convert_to_raw(&ConvertRequest::new(
        &input,
        dir.path().join("missing_dir").join("out.rgb"),
    ));
    assert!(!report.success);
    assert!(report.detail.contains("failed to write"));
}

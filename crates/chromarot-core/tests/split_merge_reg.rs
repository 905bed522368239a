//! Channel split/merge regression test
//!
//! Splitting a buffer and merging the planes back must reproduce it
//! exactly. Indexed buffers are expanded before splitting.

use chromarot_core::{Channel, ChannelLayout, Error, Plane, merge, merge_planes, split};
use chromarot_test::{RegParams, gradient_rgb, gradient_rgba, indexed_stripes};

#[test]
fn split_merge_reg() {
    let mut rp = RegParams::new("split_merge");

    // --- RGB round trip ---
    let rgb = gradient_rgb(17, 9).expect("gradient_rgb");
    let planes = split(rgb.clone()).expect("split rgb");
    rp.compare_values(3.0, planes.len() as f64, 0.0);
    let merged = merge_planes(planes, rgb.dimensions()).expect("merge rgb");
    rp.compare_buffers(&rgb, &merged);

    // --- RGBA round trip, alpha carried untouched ---
    let rgba = gradient_rgba(12, 20).expect("gradient_rgba");
    let planes = split(rgba.clone()).expect("split rgba");
    rp.compare_values(4.0, planes.len() as f64, 0.0);
    rp.compare_planes(
        rgba.plane(Channel::Alpha).expect("source alpha"),
        planes.get(Channel::Alpha).expect("split alpha"),
    );
    let merged = merge_planes(planes, rgba.dimensions()).expect("merge rgba");
    rp.compare_buffers(&rgba, &merged);

    // --- Indexed buffers split into color planes ---
    let indexed = indexed_stripes(6, 2).expect("indexed_stripes");
    let planes = split(indexed).expect("split indexed");
    rp.compare_values(3.0, planes.len() as f64, 0.0);
    let red = planes.get(Channel::Red).expect("red plane");
    rp.compare_values(255.0, red.get(0, 1).unwrap_or(0) as f64, 0.0);
    rp.compare_values(0.0, red.get(1, 1).unwrap_or(255) as f64, 0.0);
    rp.compare_values(255.0, red.get(3, 0).unwrap_or(0) as f64, 0.0);
    let blue = planes.get(Channel::Blue).expect("blue plane");
    rp.compare_values(255.0, blue.get(5, 0).unwrap_or(0) as f64, 0.0);
    eprintln!("  indexed split: layout {:?}", planes.layout());

    assert!(rp.cleanup(), "split_merge regression test failed");
}

#[test]
fn merge_rejects_mismatched_planes() {
    let planes = vec![
        Plane::new(4, 4).unwrap(),
        Plane::new(4, 4).unwrap(),
        Plane::new(5, 4).unwrap(),
    ];
    assert_eq!(
        merge(ChannelLayout::Rgb, planes, (4, 4)).unwrap_err(),
        Error::ShapeMismatch {
            expected: (4, 4),
            actual: (5, 4)
        }
    );

    let planes = vec![Plane::new(4, 4).unwrap(), Plane::new(4, 4).unwrap()];
    assert_eq!(
        merge(ChannelLayout::Rgb, planes, (4, 4)).unwrap_err(),
        Error::UnsupportedChannelCount(2)
    );
}

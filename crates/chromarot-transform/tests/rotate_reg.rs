//! Rotation regression test
//!
//! Identity at 0 degrees, expand-to-fit bounds, exact quarter turns, and
//! round trips through an arbitrary angle.

use chromarot_core::{Channel, Plane};
use chromarot_test::{RegParams, checker_plane, gradient_rgb, indexed_stripes};
use chromarot_transform::{
    Interpolation, RotateOptions, rotate, rotate_buffer, rotate_with_options, rotated_bounds,
};

const ANGLES: &[f64] = &[0.0, 7.5, 30.0, 45.0, 90.0, 135.0, 180.0, 222.0, 270.0, -60.0, 400.0];

#[test]
fn rotate_reg() {
    let mut rp = RegParams::new("rotate");

    let checker = checker_plane(37, 23, 4).expect("checker_plane");

    // --- angle 0 and full turns are the identity ---
    for angle in [0.0, 360.0, -360.0, 1080.0] {
        let r = rotate(checker.clone(), angle).expect("rotate identity");
        rp.compare_planes(&checker, r.plane());
    }

    // --- output size matches the analytic bounding box ---
    for &angle in ANGLES {
        let r = rotate(checker.clone(), angle).expect("rotate");
        let rad = angle.to_radians();
        let (w, h) = (37.0, 23.0);
        let ew = (w * rad.cos().abs() + h * rad.sin().abs()).ceil();
        let eh = (w * rad.sin().abs() + h * rad.cos().abs()).ceil();
        rp.compare_values(ew, r.width() as f64, 1.0);
        rp.compare_values(eh, r.height() as f64, 1.0);
        rp.compare_values(
            1.0,
            if r.dimensions() == rotated_bounds(37, 23, angle) { 1.0 } else { 0.0 },
            0.0,
        );
        eprintln!("  angle {:>6}: {}x{}", angle, r.width(), r.height());
    }

    // --- four quarter turns restore the plane exactly ---
    let mut p = checker.clone();
    for _ in 0..4 {
        p = rotate(p, 90.0).expect("rotate 90").into_plane();
    }
    rp.compare_planes(&checker, &p);

    // --- 90 and -270 agree ---
    let a = rotate(checker.clone(), 90.0).expect("rotate 90");
    let b = rotate(checker.clone(), -270.0).expect("rotate -270");
    rp.compare_planes(a.plane(), b.plane());

    // --- 45 then -45 approximately restores a smooth plane ---
    let gradient = gradient_rgb(20, 20).expect("gradient_rgb");
    let red = gradient.plane(Channel::Red).expect("red plane").clone();
    let there = rotate(red.clone(), 45.0).expect("rotate 45");
    let back = rotate(there.into_plane(), -45.0).expect("rotate -45");
    let (bw, bh) = back.dimensions();
    let dx = (bw as i64 - 20) / 2;
    let dy = (bh as i64 - 20) / 2;
    for (x, y) in [(10u32, 10u32), (8, 12), (12, 7), (6, 9)] {
        let expected = red.get_unchecked(x, y) as f64;
        let actual = back
            .plane()
            .get((x as i64 + dx) as u32, (y as i64 + dy) as u32)
            .unwrap_or(0) as f64;
        rp.compare_values(expected, actual, 3.0);
    }

    assert!(rp.cleanup(), "rotate regression test failed");
}

#[test]
fn rotate_interpolation_methods_agree_on_flat_regions() {
    let plane = Plane::new_filled(30, 30, 180).unwrap();
    for interp in [Interpolation::Bicubic, Interpolation::Bilinear, Interpolation::Sampling] {
        let r = rotate_with_options(plane.clone(), 33.0, &RotateOptions::with_interpolation(interp))
            .unwrap();
        let (w, h) = r.dimensions();
        assert_eq!(r.plane().get(w / 2, h / 2), Some(180), "{:?}", interp);
    }
}

#[test]
fn rotate_buffer_keeps_palette_indices() {
    let buf = indexed_stripes(12, 8).unwrap();
    let palette = buf.palette().cloned();
    let out = rotate_buffer(buf, 30.0, &RotateOptions::default()).unwrap();
    assert!(out.is_indexed());
    assert_eq!(out.palette().cloned(), palette);
    assert!(out.planes()[0].data().iter().all(|&i| i < 3));
    assert_eq!(out.dimensions(), rotated_bounds(12, 8, 30.0));
}

/// Catmull-Rom in polynomial form
fn catmull_rom(p: [f64; 4], t: f64) -> f64 {
    0.5 * (2.0 * p[1]
        + (-p[0] + p[2]) * t
        + (2.0 * p[0] - 5.0 * p[1] + 4.0 * p[2] - p[3]) * t * t
        + (-p[0] + 3.0 * p[1] - 3.0 * p[2] + p[3]) * t * t * t)
}

/// Expected value of destination pixel (dx, dy) after a counter-clockwise
/// rotation of `src` onto a `dw x dh` canvas
fn expected_bicubic(src: &Plane, degrees: f64, (dw, dh): (u32, u32), dx: u32, dy: u32) -> f64 {
    let (sin_a, cos_a) = degrees.to_radians().sin_cos();
    let xr = dx as f64 + 0.5 - dw as f64 / 2.0;
    let yr = dy as f64 + 0.5 - dh as f64 / 2.0;
    let px = xr * cos_a - yr * sin_a + src.width() as f64 / 2.0 - 0.5;
    let py = xr * sin_a + yr * cos_a + src.height() as f64 / 2.0 - 0.5;
    let (x0, y0) = (px.floor() as i64, py.floor() as i64);
    let at = |x: i64, y: i64| {
        let x = x.clamp(0, src.width() as i64 - 1) as u32;
        let y = y.clamp(0, src.height() as i64 - 1) as u32;
        src.get_unchecked(x, y) as f64
    };
    let rows: Vec<f64> = (-1..=2)
        .map(|j| {
            let taps = [-1, 0, 1, 2].map(|i| at(x0 + i, y0 + j));
            catmull_rom(taps, px - x0 as f64)
        })
        .collect();
    catmull_rom([rows[0], rows[1], rows[2], rows[3]], py - y0 as f64).clamp(0.0, 255.0)
}

#[test]
fn rotate_bicubic_reg() {
    let mut rp = RegParams::new("rotate_bicubic");

    let checker = checker_plane(16, 16, 3).expect("checker_plane");
    let angle = 30.0;
    let r = rotate(checker.clone(), angle).expect("rotate bicubic");
    rp.compare_values(22.0, r.width() as f64, 0.0);

    // Interior pixels match Catmull-Rom up to rounding
    for (dx, dy) in [(9, 9), (11, 8), (12, 13), (10, 12), (8, 11), (13, 10)] {
        let expected = expected_bicubic(&checker, angle, r.dimensions(), dx, dy);
        let actual = r.plane().get(dx, dy).unwrap_or(0) as f64;
        rp.compare_values(expected, actual, 0.5 + 1e-9);
        eprintln!("  ({}, {}): expected {:.3}, got {}", dx, dy, expected, actual);
    }

    // Bilinear gives a different result on the same edges
    let bilinear = rotate_with_options(
        checker,
        angle,
        &RotateOptions::with_interpolation(Interpolation::Bilinear),
    )
    .expect("rotate bilinear");
    rp.compare_values(1.0, if bilinear.plane() != r.plane() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "rotate_bicubic regression test failed");
}

#[test]
fn rotate_buffer_fill_must_be_palette_index() {
    let buf = indexed_stripes(12, 8).unwrap();
    assert!(rotate_buffer(buf.clone(), 30.0, &RotateOptions::default().fill(77)).is_err());
    assert!(rotate_buffer(buf.clone(), 30.0, &RotateOptions::default().fill(3)).is_err());

    let out = rotate_buffer(buf, 30.0, &RotateOptions::default().fill(2)).unwrap();
    assert!(out.planes()[0].data().iter().all(|&i| i < 3));
    assert_eq!(out.planes()[0].get(0, 0), Some(2));
}

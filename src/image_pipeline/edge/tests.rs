use proptest::prelude::*;

use crate::image_pipeline::edge::canny::{hysteresis, non_max_suppression};
use crate::image_pipeline::edge::{
    CannyDetector, EdgeDetector, EdgeParams, EdgeThresholds, GradientNorm, detect_edges,
    sobel_gradients,
};
use crate::image_pipeline::frame::GrayscaleFrame;

fn frame(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> GrayscaleFrame {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(f(x, y));
        }
    }
    GrayscaleFrame::from_vec(width, height, data).unwrap()
}

#[test]
fn test_uniform_frame_has_no_edges() {
    let mask = detect_edges(&frame(32, 24, |_, _| 90), EdgeThresholds::default()).unwrap();
    assert_eq!(mask.edge_count(), 0);
    assert!(mask.data.iter().all(|&v| v == 0));
}

#[test]
fn test_vertical_step_gives_single_column() {
    let (w, h) = (32, 24);
    let step = w / 2;
    let gray = frame(w, h, |x, _| if x < step { 0 } else { 255 });
    let mask = detect_edges(&gray, EdgeThresholds::default()).unwrap();

    for y in 0..h {
        let cols: Vec<usize> = (0..w).filter(|&x| mask.is_edge(x, y)).collect();
        if y == 0 || y == h - 1 {
            assert!(cols.is_empty(), "border row {} has edges {:?}", y, cols);
        } else {
            assert_eq!(cols.len(), 1, "row {} edges {:?}", y, cols);
            assert!(cols[0].abs_diff(step) <= 2, "row {} edge at {}", y, cols[0]);
        }
    }
    assert!(mask.data.iter().all(|&v| v == 0 || v == 255));
}

#[test]
fn test_horizontal_step_gives_single_row() {
    let (w, h) = (20, 16);
    let gray = frame(w, h, |_, y| if y < 8 { 200 } else { 10 });
    let mask = detect_edges(&gray, EdgeThresholds::default()).unwrap();

    let rows: Vec<usize> = (0..h).filter(|&y| mask.is_edge(5, y)).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].abs_diff(8) <= 2);
    // Left and right border columns stay clear
    assert!((0..h).all(|y| !mask.is_edge(0, y) && !mask.is_edge(w - 1, y)));
}

#[test]
fn test_bright_square_outline_stays_on_boundary() {
    let gray = frame(24, 24, |x, y| {
        if (8..16).contains(&x) && (8..16).contains(&y) { 255 } else { 0 }
    });
    let mask = detect_edges(&gray, EdgeThresholds::default()).unwrap();

    assert!(mask.edge_count() > 0);
    for y in 0..24 {
        for x in 0..24 {
            if mask.is_edge(x, y) {
                let near_x = (6..=17).contains(&x);
                let near_y = (6..=17).contains(&y);
                let interior = (10..14).contains(&x) && (10..14).contains(&y);
                assert!(near_x && near_y && !interior, "stray edge at ({}, {})", x, y);
            }
        }
    }
}

#[test]
fn test_low_contrast_step_is_below_threshold() {
    // 4 * 10 = 40 < 50
    let gray = frame(16, 16, |x, _| if x < 8 { 100 } else { 110 });
    let mask = detect_edges(&gray, EdgeThresholds::default()).unwrap();
    assert_eq!(mask.edge_count(), 0);
}

#[test]
fn test_hysteresis_keeps_only_connected_weak_pixels() {
    let (w, h) = (7, 5);
    let mut suppressed = vec![0f32; w * h];
    let row = 2 * w;
    suppressed[row + 1] = 200.0; // strong
    suppressed[row + 2] = 100.0; // weak, touches strong
    suppressed[row + 3] = 100.0; // weak, touches previous weak
    suppressed[row + 5] = 100.0; // weak, isolated
    suppressed[3 * w + 4] = 40.0; // below low, touches a kept pixel

    let out = hysteresis(&suppressed, w, h, &EdgeThresholds::default());
    assert_eq!(out[row + 1], 255);
    assert_eq!(out[row + 2], 255);
    assert_eq!(out[row + 3], 255);
    assert_eq!(out[row + 5], 0);
    assert_eq!(out[3 * w + 4], 0);
}

#[test]
fn test_hysteresis_follows_diagonal_neighbours() {
    let (w, h) = (6, 6);
    let mut suppressed = vec![0f32; w * h];
    suppressed[w + 1] = 160.0;
    suppressed[2 * w + 2] = 60.0;
    suppressed[3 * w + 3] = 60.0;

    let out = hysteresis(&suppressed, w, h, &EdgeThresholds::default());
    assert_eq!(out[2 * w + 2], 255);
    assert_eq!(out[3 * w + 3], 255);
}

#[test]
fn test_threshold_boundaries_are_inclusive() {
    let (w, h) = (5, 3);
    let mut suppressed = vec![0f32; w * h];
    suppressed[w + 1] = 150.0;
    suppressed[w + 2] = 50.0;
    suppressed[w + 3] = 49.9;

    let out = hysteresis(&suppressed, w, h, &EdgeThresholds::default());
    assert_eq!(&out[w..2 * w], &[0, 255, 255, 0, 0]);
}

#[test]
fn test_suppression_thins_ramp_ridge() {
    let gray = frame(12, 8, |x, _| if x < 6 { 0 } else { 255 });
    let gradients = sobel_gradients(&gray, GradientNorm::L1, false);
    let suppressed = non_max_suppression(&gradients, false);

    // Both x=5 and x=6 carry magnitude 1020 before suppression
    assert_eq!(gradients.magnitude[3 * 12 + 5], 1020.0);
    assert_eq!(gradients.magnitude[3 * 12 + 6], 1020.0);
    assert_eq!(suppressed[3 * 12 + 5], 1020.0);
    assert_eq!(suppressed[3 * 12 + 6], 0.0);
}

#[test]
fn test_minimal_frames_are_all_zero() {
    for (w, h) in [(1, 1), (2, 2), (3, 2), (2, 3)] {
        let mask = detect_edges(&frame(w, h, |x, y| ((x + y) * 200 % 256) as u8), EdgeThresholds::default())
            .unwrap();
        assert_eq!(mask.data.len(), w * h);
        assert_eq!(mask.edge_count(), 0);
    }
}

#[test]
fn test_invalid_thresholds_are_rejected() {
    let params = EdgeParams {
        thresholds: EdgeThresholds { low: 200.0, high: 100.0 },
        ..EdgeParams::default()
    };
    assert!(CannyDetector.detect(&frame(8, 8, |_, _| 0), &params).is_err());
}

#[test]
fn test_parallel_and_l2_paths_are_deterministic() {
    let gray = frame(64, 48, |x, y| ((x * 13 + y * y * 7) % 256) as u8);
    for norm in [GradientNorm::L1, GradientNorm::L2] {
        let seq = EdgeParams { norm, parallel: false, ..EdgeParams::default() };
        let par = EdgeParams { norm, parallel: true, ..EdgeParams::default() };
        let a = CannyDetector.detect(&gray, &seq).unwrap();
        let b = CannyDetector.detect(&gray, &par).unwrap();
        let c = CannyDetector.detect(&gray, &par).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }
}

proptest! {
    #[test]
    fn test_raising_thresholds_never_adds_edges(
        pixels in prop::collection::vec(any::<u8>(), 16 * 16),
        low in 0u16..400,
        span in 0u16..400,
        raise_low in 0u16..300,
        raise_high in 0u16..300,
    ) {
        let gray = GrayscaleFrame::from_vec(16, 16, pixels).unwrap();
        let base = EdgeThresholds::new(low as f32, (low + span) as f32).unwrap();
        let raised_low = base.low + raise_low as f32;
        let raised = EdgeThresholds::new(
            raised_low,
            (base.high + raise_high as f32).max(raised_low),
        ).unwrap();

        let before = detect_edges(&gray, base).unwrap().edge_count();
        let after = detect_edges(&gray, raised).unwrap().edge_count();
        prop_assert!(after <= before, "{:?} -> {:?}: {} -> {}", base, raised, before, after);
    }
}

//! Canny-style edge detector: Sobel gradients, non-maximum suppression along the
//! quantised gradient direction, then double-threshold hysteresis over the
//! 8-neighbourhood.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::edge::detector::EdgeDetector;
use crate::image_pipeline::edge::sobel::{Gradients, sobel_gradients};
use crate::image_pipeline::edge::types::{EDGE, EdgeMask, EdgeParams, EdgeThresholds, NO_EDGE};
use crate::image_pipeline::frame::GrayscaleFrame;

/// tan(22.5°) in Q15
const TG22: i32 = 13573;

pub struct CannyDetector;

impl EdgeDetector for CannyDetector {
    #[instrument(level = "debug", skip_all, fields(width = gray.width, height = gray.height))]
    fn detect(&self, gray: &GrayscaleFrame, params: &EdgeParams) -> Result<EdgeMask> {
        params.thresholds.validate()?;

        let gradients = {
            let _span = tracing::debug_span!("sobel").entered();
            sobel_gradients(gray, params.norm, params.parallel)
        };

        let suppressed = {
            let _span = tracing::debug_span!("non_max_suppression").entered();
            non_max_suppression(&gradients, params.parallel)
        };

        let data = {
            let _span = tracing::debug_span!("hysteresis").entered();
            hysteresis(&suppressed, gray.width, gray.height, &params.thresholds)
        };

        let mask = EdgeMask {
            width: gray.width,
            height: gray.height,
            data,
        };
        debug!(
            "Detected {} edge pixels (low={}, high={}, norm={:?})",
            mask.edge_count(),
            params.thresholds.low,
            params.thresholds.high,
            params.norm
        );
        Ok(mask)
    }
}

/// Runs the Canny detector with default norm and sequential execution.
pub fn detect_edges(gray: &GrayscaleFrame, thresholds: EdgeThresholds) -> Result<EdgeMask> {
    let params = EdgeParams {
        thresholds,
        ..EdgeParams::default()
    };
    CannyDetector.detect(gray, &params)
}

/// Zeroes every magnitude that is not a local maximum across its edge.
///
/// Horizontal and vertical comparisons are strict against the lower-index
/// neighbour only, so a plateau two pixels wide keeps exactly one of them.
pub(crate) fn non_max_suppression(gradients: &Gradients, parallel: bool) -> Vec<f32> {
    let (w, h) = (gradients.width, gradients.height);
    let mut out = vec![0f32; w * h];

    let suppress_row = |y: usize, row: &mut [f32]| {
        if y == 0 || y + 1 >= h {
            return;
        }
        let mag = &gradients.magnitude;
        for x in 1..w.saturating_sub(1) {
            let i = y * w + x;
            let m = mag[i];
            if m == 0.0 {
                continue;
            }

            let dx = gradients.gx[i] as i32;
            let dy = gradients.gy[i] as i32;
            let (ax, ay) = (dx.abs(), dy.abs());
            let tg22x = ax * TG22;
            let ys = ay << 15;

            let keep = if ys < tg22x {
                m > mag[i - 1] && m >= mag[i + 1]
            } else if ys > tg22x + (ax << 16) {
                m > mag[i - w] && m >= mag[i + w]
            } else {
                // Diagonal: compare (x - s, y - 1) and (x + s, y + 1)
                let (before, after) = if (dx ^ dy) < 0 {
                    (i - w + 1, i + w - 1)
                } else {
                    (i - w - 1, i + w + 1)
                };
                m > mag[before] && m > mag[after]
            };

            if keep {
                row[x] = m;
            }
        }
    };

    if w > 0 {
        if parallel {
            out.par_chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| suppress_row(y, row));
        } else {
            out.chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| suppress_row(y, row));
        }
    }
    out
}

/// Keeps strong pixels and every weak pixel 8-connected to one.
pub(crate) fn hysteresis(
    suppressed: &[f32],
    width: usize,
    height: usize,
    thresholds: &EdgeThresholds,
) -> Vec<u8> {
    let mut out = vec![NO_EDGE; suppressed.len()];
    let mut weak = vec![false; suppressed.len()];
    let mut stack = Vec::new();

    for (i, &m) in suppressed.iter().enumerate() {
        // Suppressed pixels are exactly 0 and never candidates, even with low == 0
        if m <= 0.0 || m < thresholds.low {
            continue;
        }
        if m >= thresholds.high {
            out[i] = EDGE;
            stack.push(i);
        } else {
            weak[i] = true;
        }
    }

    while let Some(i) = stack.pop() {
        let (x, y) = (i % width, i / width);
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let j = ny * width + nx;
                if weak[j] && out[j] == NO_EDGE {
                    out[j] = EDGE;
                    stack.push(j);
                }
            }
        }
    }

    out
}

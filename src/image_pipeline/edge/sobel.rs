use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::edge::types::GradientNorm;
use crate::image_pipeline::frame::GrayscaleFrame;

/// Per-pixel 3x3 Sobel responses and their combined magnitude.
///
/// Border pixels have no full neighbourhood and are left at zero.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub width: usize,
    pub height: usize,
    pub gx: Vec<i16>,
    pub gy: Vec<i16>,
    pub magnitude: Vec<f32>,
}

pub fn sobel_gradients(gray: &GrayscaleFrame, norm: GradientNorm, parallel: bool) -> Gradients {
    let (w, h) = (gray.width, gray.height);
    let mut gx = vec![0i16; w * h];
    let mut gy = vec![0i16; w * h];
    let mut magnitude = vec![0f32; w * h];

    if w < 3 || h < 3 {
        debug!("Frame {}x{} has no interior pixels, gradients are zero", w, h);
        return Gradients { width: w, height: h, gx, gy, magnitude };
    }

    let src = &gray.data;
    let fill = |y: usize, (gx_row, gy_row, mag_row): (&mut [i16], &mut [i16], &mut [f32])| {
        if y == 0 || y == h - 1 {
            return;
        }
        let above = &src[(y - 1) * w..y * w];
        let row = &src[y * w..(y + 1) * w];
        let below = &src[(y + 1) * w..(y + 2) * w];

        for x in 1..w - 1 {
            let p = |r: &[u8], i: usize| r[i] as i32;
            let dx = (p(above, x + 1) + 2 * p(row, x + 1) + p(below, x + 1))
                - (p(above, x - 1) + 2 * p(row, x - 1) + p(below, x - 1));
            let dy = (p(below, x - 1) + 2 * p(below, x) + p(below, x + 1))
                - (p(above, x - 1) + 2 * p(above, x) + p(above, x + 1));

            // |dx|, |dy| <= 4 * 255
            gx_row[x] = dx as i16;
            gy_row[x] = dy as i16;
            mag_row[x] = norm.magnitude(dx, dy);
        }
    };

    if parallel {
        gx.par_chunks_mut(w)
            .zip(gy.par_chunks_mut(w))
            .zip(magnitude.par_chunks_mut(w))
            .enumerate()
            .for_each(|(y, ((a, b), m))| fill(y, (a, b, m)));
    } else {
        gx.chunks_mut(w)
            .zip(gy.chunks_mut(w))
            .zip(magnitude.chunks_mut(w))
            .enumerate()
            .for_each(|(y, ((a, b), m))| fill(y, (a, b, m)));
    }

    Gradients { width: w, height: h, gx, gy, magnitude }
}

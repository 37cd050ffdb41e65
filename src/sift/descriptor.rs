use crate::sift::config::SiftConfig;
use crate::sift::image::GradientImage;
use crate::sift::interpolate::Keypoint;
use crate::sift::orientation::nearest_gaussian_index;
use crate::sift::pyramid::Octave;
use std::f32::consts::{PI, SQRT_2};

/// 128-dimensional oriented local histogram around a keypoint for one of
/// its dominant orientations. Unnormalized, non-negative
/// integer accumulators; renormalization is left to the caller.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub keypoint: Keypoint,
    pub theta: f32,
    pub features: Vec<i32>,
}

/// Distributes `weight` across the (up to 2)x(up to 2)x(up to 2) spatial
/// and orientation bins adjacent to the fractional index
/// `(xb, yb, ob)`. Spatial bins outside `[0, nh)`
/// contribute nothing; orientation bins wrap circularly mod `nb`.
fn trilinear_add(hist: &mut [f32], nh: usize, nb: usize, xb: f32, yb: f32, ob: f32, weight: f32) {
    let x0 = xb.floor();
    let y0 = yb.floor();
    let o0 = ob.floor();

    let dx = xb - x0;
    let dy = yb - y0;
    let dot = ob - o0;

    for (ix, wx) in [(x0 as i64, 1.0 - dx), (x0 as i64 + 1, dx)] {
        if ix < 0 || ix >= nh as i64 {
            continue;
        }
        for (iy, wy) in [(y0 as i64, 1.0 - dy), (y0 as i64 + 1, dy)] {
            if iy < 0 || iy >= nh as i64 {
                continue;
            }
            for (io, wo) in [(o0 as i64, 1.0 - dot), (o0 as i64 + 1, dot)] {
                let io = ((io % nb as i64) + nb as i64) % nb as i64;
                let idx = (iy as usize * nh + ix as usize) * nb + io as usize;
                hist[idx] += weight * wx * wy * wo;
            }
        }
    }
}

/// Builds one 128-dim descriptor for `(keypoint, theta)`. Returns `None`
/// when the oriented sampling patch doesn't fit inside the octave's
/// interior.
pub fn build_descriptor(
    octave: &Octave,
    gradients: &[GradientImage],
    keypoint: &Keypoint,
    theta: f32,
    config: &SiftConfig,
) -> Option<Descriptor> {
    let nh = config.descriptor_histograms_per_axis;
    let nb = config.descriptor_orientation_bins;
    let sigma_prime = keypoint.sigma / octave.delta;
    let lambda_sigma = config.lambda_descriptor * sigma_prime;
    let half_width = lambda_sigma * (nh as f32 + 1.0) / nh as f32;

    let xg = keypoint.scaled_coord.0.round() as i64;
    let yg = keypoint.scaled_coord.1.round() as i64;
    let radius = (half_width * SQRT_2).ceil() as i64;

    let (w, h) = (octave.width as i64, octave.height as i64);
    if xg - radius < 1 || xg + radius > w - 2 || yg - radius < 1 || yg + radius > h - 2 {
        return None;
    }

    let g_index = nearest_gaussian_index(octave, keypoint.sigma);
    let field = &gradients[g_index];

    let mut hist = vec![0.0f32; nh * nh * nb];
    let cos_t = theta.cos();
    let sin_t = theta.sin();
    let bound = 1.0 + 1.0 / nh as f32;
    let weight_denom = 2.0 * (nh as f32 / 2.0).powi(2);

    for j in (yg - radius)..=(yg + radius) {
        for i in (xg - radius)..=(xg + radius) {
            let dxp = (i - xg) as f32;
            let dyp = (j - yg) as f32;

            // rotate by -theta into the keypoint's local frame, normalize
            // by lambda_desc * sigma'
            let xhat = (cos_t * dxp + sin_t * dyp) / lambda_sigma;
            let yhat = (-sin_t * dxp + cos_t * dyp) / lambda_sigma;

            if xhat.abs() >= bound || yhat.abs() >= bound {
                continue;
            }

            let (mag, ang) = field.at(i as usize, j as usize);
            let theta_hat = (ang - theta).rem_euclid(2.0 * PI);

            let weight = mag * (-(xhat * xhat + yhat * yhat) / weight_denom).exp();

            let xb = xhat * (nh as f32) / 2.0 + (nh as f32 - 1.0) / 2.0;
            let yb = yhat * (nh as f32) / 2.0 + (nh as f32 - 1.0) / 2.0;
            let ob = theta_hat * nb as f32 / (2.0 * PI);

            trilinear_add(&mut hist, nh, nb, xb, yb, ob, weight);
        }
    }

    let features: Vec<i32> = hist.iter().map(|v| v.max(0.0).round() as i32).collect();

    Some(Descriptor {
        keypoint: *keypoint,
        theta,
        features,
    })
}

use crate::sift::config::SiftConfig;
use crate::sift::image::GradientImage;
use crate::sift::interpolate::Keypoint;
use crate::sift::pyramid::Octave;
use std::f32::consts::PI;

/// Index of the octave Gaussian level whose sigma is closest to
/// `target_sigma`.
pub(crate) fn nearest_gaussian_index(octave: &Octave, target_sigma: f32) -> usize {
    octave
        .sigmas
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (**a - target_sigma)
                .abs()
                .partial_cmp(&(**b - target_sigma).abs())
                .unwrap()
        })
        .map(|(i, _)| i)
        .unwrap()
}

/// Dominant orientation(s) for a keypoint via a smoothed circular
/// histogram of its local gradient field. Returns an empty vector
/// when the sampling patch doesn't fit inside the octave's interior
/// (the caller then drops the keypoint).
pub fn assign_orientations(
    octave: &Octave,
    gradients: &[GradientImage],
    keypoint: &Keypoint,
    config: &SiftConfig,
) -> Vec<f32> {
    let bins = config.orientation_bins;
    let sigma_prime = keypoint.sigma / octave.delta;
    let radius = (3.0 * config.lambda_orientation * sigma_prime).ceil() as i64;

    let xg = keypoint.scaled_coord.0.round() as i64;
    let yg = keypoint.scaled_coord.1.round() as i64;

    let (w, h) = (octave.width as i64, octave.height as i64);
    if xg - radius < 1 || xg + radius > w - 2 || yg - radius < 1 || yg + radius > h - 2 {
        return Vec::new();
    }

    let g_index = nearest_gaussian_index(octave, keypoint.sigma);
    let field = &gradients[g_index];

    let mut hist = vec![0.0f32; bins];
    let gauss_denom = 2.0 * (config.lambda_orientation * sigma_prime).powi(2);
    let radius2 = (radius * radius) as f32;

    for j in (yg - radius)..=(yg + radius) {
        for i in (xg - radius)..=(xg + radius) {
            let dist2 = ((i - xg) * (i - xg) + (j - yg) * (j - yg)) as f32;
            if dist2 > radius2 {
                continue;
            }
            let (mag, ang) = field.at(i as usize, j as usize);
            let ang_pos = if ang < 0.0 { ang + 2.0 * PI } else { ang };
            let bin = ((ang_pos * bins as f32 / (2.0 * PI)) as usize) % bins;
            let weight = mag * (-dist2 / gauss_denom).exp();
            hist[bin] += weight;
        }
    }

    for _ in 0..config.orientation_smoothing_iterations {
        let mut smoothed = vec![0.0f32; bins];
        for (k, slot) in smoothed.iter_mut().enumerate() {
            let prev = hist[(k + bins - 1) % bins];
            let next = hist[(k + 1) % bins];
            *slot = (prev + hist[k] + next) / 3.0;
        }
        hist = smoothed;
    }

    let max = hist.iter().cloned().fold(0.0f32, f32::max);
    if max <= 0.0 {
        return Vec::new();
    }

    let mut orientations = Vec::new();
    for k in 0..bins {
        let prev = hist[(k + bins - 1) % bins];
        let curr = hist[k];
        let next = hist[(k + 1) % bins];
        if curr > prev && curr > next && curr >= config.orientation_threshold * max {
            let denom = prev - 2.0 * curr + next;
            let offset = if denom.abs() > 1e-12 {
                0.5 * (prev - next) / denom
            } else {
                0.0
            };
            let theta = ((k as f32 + offset) * 2.0 * PI / bins as f32).rem_euclid(2.0 * PI);
            orientations.push(theta);
        }
    }

    orientations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sift::backend::{ComputeBackend, CpuBackend};
    use crate::sift::gradient::build_gradient_fields;
    use crate::sift::image::GrayImage;
    use crate::sift::pyramid::build_pyramid;

    fn blob_octave(size: usize, cx: f32, cy: f32, sigma: f32) -> (Octave, SiftConfig) {
        let backend = CpuBackend::new();
        let config = SiftConfig::new((size, size));
        let mut image = GrayImage::new(size, size).unwrap();
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let v = (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp();
                image.set(x, y, v);
            }
        }
        let mut octaves = build_pyramid(&image, &config, &backend).unwrap();
        (octaves.remove(0), config)
    }

    #[test]
    fn orientation_near_zero_wraps_without_panic() {
        let (octave, config) = blob_octave(64, 32.0, 32.0, 8.0);
        let backend = CpuBackend::new();
        let gradients = build_gradient_fields(&octave, &backend).unwrap();
        let keypoint = Keypoint {
            octave: 0,
            scale: 1,
            sub_scale: 0.0,
            scaled_coord: (32.0, 32.0),
            absolute_coord: (16.0, 16.0),
            sigma: octave.sigmas[1],
            value: 0.05,
        };
        let orientations = assign_orientations(&octave, &gradients, &keypoint, &config);
        for theta in orientations {
            assert!((0.0..2.0 * PI).contains(&theta));
        }
    }

    #[test]
    fn patch_outside_interior_is_dropped() {
        let (octave, config) = blob_octave(32, 2.0, 2.0, 4.0);
        let backend = CpuBackend::new();
        let gradients = build_gradient_fields(&octave, &backend).unwrap();
        let keypoint = Keypoint {
            octave: 0,
            scale: 1,
            sub_scale: 0.0,
            scaled_coord: (2.0, 2.0),
            absolute_coord: (1.0, 1.0),
            sigma: octave.sigmas[1],
            value: 0.05,
        };
        let orientations = assign_orientations(&octave, &gradients, &keypoint, &config);
        assert!(orientations.is_empty());
    }
}

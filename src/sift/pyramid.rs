use crate::error::Result;
use crate::sift::backend::ComputeBackend;
use crate::sift::config::SiftConfig;
use crate::sift::image::GrayImage;

/// One level of the scale-space pyramid. Owns its Gaussian
/// stack outright; the DoG stack is filled in afterward by
/// [`crate::sift::dog::build_dog_stack`]. Immutable once both stacks are
/// populated, no octave is ever resized or aliased by another.
#[derive(Debug, Clone)]
pub struct Octave {
    pub index: usize,
    /// Pixel spacing of this octave's grid in input-image units.
    pub delta: f32,
    pub width: usize,
    pub height: usize,
    pub num_scales: usize,
    /// `sigma_{o,s}` for `s = 0..num_scales+2`, length `num_scales+3`.
    pub sigmas: Vec<f32>,
    /// `G[s]`, length `num_scales+3`.
    pub gaussians: Vec<GrayImage>,
    /// `D[s] = G[s+1] - G[s]`, length `num_scales+2`. Empty until
    /// `build_dog_stack` runs.
    pub dog: Vec<GrayImage>,
}

/// Builds octaves `0..O` where `O` is the largest count with
/// `min(w_o, h_o) >= 12`. Octave 0 seeds from a 2x nearest-neighbor
/// upsample of `image`; each later octave seeds from a 1/2x downsample
/// of the previous octave's `num_scales`-th Gaussian, which already
/// carries the right blur for that octave's `s=0` level.
pub fn build_pyramid(
    image: &GrayImage,
    config: &SiftConfig,
    backend: &dyn ComputeBackend,
) -> Result<Vec<Octave>> {
    let ns = config.num_scales_per_octave;
    let mut octaves = Vec::new();
    let mut delta = 0.5f32;
    let mut carry: Option<GrayImage> = None;
    let mut index = 0usize;

    loop {
        let base = match &carry {
            None => backend.upsample2x(image)?,
            Some(prev_top) => backend.downsample_half(prev_top)?,
        };
        let (width, height) = (base.width(), base.height());
        if width.min(height) < 12 {
            break;
        }

        let sigmas: Vec<f32> = (0..ns + 3)
            .map(|s| delta * config.sigma_min * 2f32.powf(s as f32 / ns as f32))
            .collect();

        let mut gaussians = Vec::with_capacity(ns + 3);
        let seeded = if index == 0 {
            backend.blur(&base, sigmas[0])?
        } else {
            base
        };
        gaussians.push(seeded);
        for s in 1..ns + 3 {
            let incremental = (sigmas[s] * sigmas[s] - sigmas[s - 1] * sigmas[s - 1])
                .max(0.0)
                .sqrt();
            let blurred = backend.blur(&gaussians[s - 1], incremental)?;
            gaussians.push(blurred);
        }

        carry = Some(gaussians[ns].clone());
        octaves.push(Octave {
            index,
            delta,
            width,
            height,
            num_scales: ns,
            sigmas,
            gaussians,
            dog: Vec::new(),
        });

        delta *= 2.0;
        index += 1;
    }

    Ok(octaves)
}

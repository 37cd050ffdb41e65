use crate::error::Result;
use crate::sift::backend::ComputeBackend;
use crate::sift::pyramid::Octave;

/// Computes `D[s] = G[s+1] - G[s]` for `s = 0..num_scales+1`. No
/// normalization; DoG values stay signed.
pub fn build_dog_stack(octave: &mut Octave, backend: &dyn ComputeBackend) -> Result<()> {
    let ns = octave.num_scales;
    let mut dog = Vec::with_capacity(ns + 2);
    for s in 0..ns + 2 {
        dog.push(backend.difference(&octave.gaussians[s], &octave.gaussians[s + 1])?);
    }
    octave.dog = dog;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sift::backend::CpuBackend;
    use crate::sift::config::SiftConfig;
    use crate::sift::image::GrayImage;
    use crate::sift::pyramid::build_pyramid;

    #[test]
    fn dog_matches_gaussian_difference() {
        let backend = CpuBackend::new();
        let config = SiftConfig::new((32, 32));
        let mut image = GrayImage::new(32, 32).unwrap();
        for (i, v) in image.as_mut_slice().iter_mut().enumerate() {
            *v = (i % 17) as f32 / 17.0;
        }
        let mut octaves = build_pyramid(&image, &config, &backend).unwrap();
        let octave = &mut octaves[0];
        build_dog_stack(octave, &backend).unwrap();
        for s in 0..octave.num_scales + 2 {
            for y in 0..octave.height {
                for x in 0..octave.width {
                    let expected = octave.gaussians[s + 1].at(x, y) - octave.gaussians[s].at(x, y);
                    assert!((octave.dog[s].at(x, y) - expected).abs() < 1e-5);
                }
            }
        }
    }

    #[test]
    fn dog_stack_has_expected_length() {
        let backend = CpuBackend::new();
        let config = SiftConfig::new((32, 32));
        let image = GrayImage::new(32, 32).unwrap();
        let mut octaves = build_pyramid(&image, &config, &backend).unwrap();
        build_dog_stack(&mut octaves[0], &backend).unwrap();
        assert_eq!(octaves[0].dog.len(), config.num_scales_per_octave + 2);
    }
}

use crate::error::Result;
use crate::sift::backend::ComputeBackend;
use crate::sift::image::GradientImage;
use crate::sift::pyramid::Octave;

/// Precomputes `(magnitude, orientation)` for every Gaussian level in an
/// octave. Built once per octave, lazily on first need by the
/// orchestrator's `describe` pass; orientation assignment and
/// descriptor construction both read the nearest level's field.
pub fn build_gradient_fields(
    octave: &Octave,
    backend: &dyn ComputeBackend,
) -> Result<Vec<GradientImage>> {
    octave
        .gaussians
        .iter()
        .map(|level| backend.gradient_field(level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sift::backend::CpuBackend;
    use crate::sift::config::SiftConfig;
    use crate::sift::image::GrayImage;
    use crate::sift::pyramid::build_pyramid;

    #[test]
    fn one_gradient_field_per_gaussian_level() {
        let backend = CpuBackend::new();
        let config = SiftConfig::new((32, 32));
        let image = GrayImage::new(32, 32).unwrap();
        let octaves = build_pyramid(&image, &config, &backend).unwrap();
        let fields = build_gradient_fields(&octaves[0], &backend).unwrap();
        assert_eq!(fields.len(), octaves[0].gaussians.len());
    }
}

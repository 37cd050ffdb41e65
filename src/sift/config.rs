use crate::error::{Error, Result};

/// Immutable per-run configuration. Plain public-field struct with a
/// `Default` rather than a builder.
#[derive(Debug, Clone, Copy)]
pub struct SiftConfig {
    pub input_size: (usize, usize),
    pub dog_threshold: f32,
    pub edge_threshold: f32,
    pub max_interp_iterations: u32,
    pub image_border: usize,
    pub num_scales_per_octave: usize,
    pub lambda_orientation: f32,
    pub orientation_bins: usize,
    pub orientation_threshold: f32,
    pub orientation_smoothing_iterations: u32,
    pub descriptor_histograms_per_axis: usize,
    pub descriptor_orientation_bins: usize,
    pub lambda_descriptor: f32,
    /// Seed blur applied at octave 0 after the x2 upsample.
    pub sigma_min: f32,
}

impl SiftConfig {
    #[must_use]
    pub fn new(input_size: (usize, usize)) -> Self {
        Self {
            input_size,
            dog_threshold: 0.0133,
            edge_threshold: 10.0,
            max_interp_iterations: 5,
            image_border: 5,
            num_scales_per_octave: 3,
            lambda_orientation: 1.5,
            orientation_bins: 36,
            orientation_threshold: 0.8,
            orientation_smoothing_iterations: 6,
            descriptor_histograms_per_axis: 4,
            descriptor_orientation_bins: 8,
            lambda_descriptor: 6.0,
            sigma_min: 0.8,
        }
    }

    /// Rejects dimensions below 16x16, a non-positive threshold, a zero
    /// scale count, or a non-positive seed blur. Called once from
    /// `Sift::new`.
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.input_size;
        if w < 16 || h < 16 {
            return Err(Error::InvalidDimensions(format!(
                "input_size {w}x{h} must be at least 16x16"
            )));
        }
        if self.dog_threshold <= 0.0 {
            return Err(Error::InvalidParameter(
                "dog_threshold must be positive".to_string(),
            ));
        }
        if self.edge_threshold <= 0.0 {
            return Err(Error::InvalidParameter(
                "edge_threshold must be positive".to_string(),
            ));
        }
        if self.num_scales_per_octave == 0 {
            return Err(Error::InvalidParameter(
                "num_scales_per_octave must be greater than 0".to_string(),
            ));
        }
        if self.sigma_min <= 0.0 {
            return Err(Error::InvalidParameter(
                "sigma_min must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self::new((256, 256))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SiftConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_small_images() {
        let cfg = SiftConfig::new((15, 256));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_nonpositive_thresholds() {
        let mut cfg = SiftConfig::default();
        cfg.dog_threshold = 0.0;
        assert!(cfg.validate().is_err());
    }
}

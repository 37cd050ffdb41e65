//! Scale-Invariant Feature Transform: Gaussian pyramid, difference-of-
//! Gaussians extrema, sub-pixel interpolation, orientation assignment,
//! and 128-dimensional descriptor construction, following the IPOL
//! reference (Otero & Delbracio, 2014).

pub mod backend;
pub mod config;
pub mod descriptor;
pub mod dog;
pub mod extrema;
pub mod gradient;
pub mod image;
pub mod interpolate;
pub mod orientation;
pub mod pyramid;

pub use backend::{ComputeBackend, CpuBackend};
pub use config::SiftConfig;
pub use descriptor::Descriptor;
pub use extrema::Candidate;
pub use image::{GradientImage, GrayImage};
pub use interpolate::Keypoint;
pub use pyramid::Octave;

use crate::error::{Error, Result};

/// Wires the pyramid, DoG, extrema, interpolation, orientation, and
/// descriptor stages per octave and aggregates results. Owns the
/// octaves built by the most recent `detect` call; `describe`
/// reads them back to build gradient fields lazily on first need.
pub struct Sift {
    config: SiftConfig,
    backend: Box<dyn ComputeBackend>,
    octaves: Vec<Octave>,
}

impl Sift {
    /// Validates `config` (ConfigError on bad dimensions/thresholds) and
    /// allocates a deterministic CPU backend.
    pub fn new(config: SiftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            backend: Box::new(CpuBackend::new()),
            octaves: Vec::new(),
        })
    }

    /// Same as `new`, but with an explicit compute backend, e.g. a
    /// GPU-accelerated one behind the `gpu` feature.
    pub fn with_backend(config: SiftConfig, backend: Box<dyn ComputeBackend>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            backend,
            octaves: Vec::new(),
        })
    }

    /// Builds the pyramid, DoG stack, and extrema for `image` in one
    /// pass, then interpolates each candidate into a refined keypoint.
    /// The outer vector is indexed by octave.
    pub fn detect(&mut self, image: &GrayImage) -> Result<Vec<Vec<Keypoint>>> {
        let mut octaves = pyramid::build_pyramid(image, &self.config, self.backend.as_ref())?;
        let mut keypoints_per_octave = Vec::with_capacity(octaves.len());

        for octave in &mut octaves {
            dog::build_dog_stack(octave, self.backend.as_ref())?;
            let candidates =
                extrema::detect_candidates(octave, &self.config, self.backend.as_ref())?;
            let keypoints: Vec<Keypoint> = candidates
                .iter()
                .filter_map(|c| interpolate::interpolate_candidate(octave, c, &self.config))
                .collect();
            keypoints_per_octave.push(keypoints);
        }

        self.octaves = octaves;
        Ok(keypoints_per_octave)
    }

    /// Builds each octave's gradient field lazily, then assigns
    /// orientations and descriptors for the keypoints `detect` returned.
    /// `keypoints_per_octave` must have one entry per octave `detect`
    /// built (same length, any order within each octave).
    pub fn describe(&self, keypoints_per_octave: &[Vec<Keypoint>]) -> Result<Vec<Vec<Descriptor>>> {
        if keypoints_per_octave.len() != self.octaves.len() {
            return Err(Error::InvalidParameter(format!(
                "expected {} octaves of keypoints, got {}",
                self.octaves.len(),
                keypoints_per_octave.len()
            )));
        }

        let mut descriptors_per_octave = Vec::with_capacity(self.octaves.len());
        for (octave, keypoints) in self.octaves.iter().zip(keypoints_per_octave) {
            let gradients = gradient::build_gradient_fields(octave, self.backend.as_ref())?;
            let mut descriptors = Vec::new();
            for keypoint in keypoints {
                let orientations =
                    orientation::assign_orientations(octave, &gradients, keypoint, &self.config);
                for theta in orientations {
                    if let Some(descriptor) = descriptor::build_descriptor(
                        octave, &gradients, keypoint, theta, &self.config,
                    ) {
                        descriptors.push(descriptor);
                    }
                }
            }
            descriptors_per_octave.push(descriptors);
        }

        Ok(descriptors_per_octave)
    }
}

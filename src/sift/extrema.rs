use crate::error::Result;
use crate::sift::backend::ComputeBackend;
use crate::sift::config::SiftConfig;
use crate::sift::pyramid::Octave;

/// An unrefined 3D local extremum in the DoG stack, pre-interpolation.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub scale: usize,
    pub x: usize,
    pub y: usize,
}

/// Scans every interior DoG scale `s = 1..=num_scales` for pixels
/// strictly greater than, or strictly less than, all 26 neighbors across
/// the three adjacent slices, after the soft `0.8 * dog_threshold`
/// pre-threshold.
pub fn detect_candidates(
    octave: &Octave,
    config: &SiftConfig,
    backend: &dyn ComputeBackend,
) -> Result<Vec<Candidate>> {
    let ns = octave.num_scales;
    let mut candidates = Vec::new();
    for s in 1..=ns {
        let pixels = backend.find_extrema(
            &octave.dog[s - 1],
            &octave.dog[s],
            &octave.dog[s + 1],
            config.dog_threshold,
        )?;
        candidates.extend(
            pixels
                .into_iter()
                .map(|(x, y)| Candidate { scale: s, x, y }),
        );
    }
    Ok(candidates)
}

use crate::core::mat::{Mat, MatDepth};
use crate::error::{Error, Result};

/// Single-channel `f32` image with host/device mirror semantics (C1).
///
/// Row-major, like `Mat`, but holding unpacked `f32` samples directly
/// rather than depth-tagged bytes.
#[derive(Debug, Clone)]
pub struct GrayImage {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl GrayImage {
    /// Allocate a zero-filled image. Fails only if a dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(
                "GrayImage width and height must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            data: vec![0.0; width * height],
            width,
            height,
        })
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::InvalidDimensions(format!(
                "Data length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Refresh host contents after a device-side dispatch wrote into
    /// this image. The CPU backend writes in place, so this is a no-op;
    /// a GPU dispatch calls it after mapping its staging buffer back.
    pub fn sync_from_device(&mut self) {}

    /// Convert from a single-channel `F32` `Mat`. Rejects any other
    /// depth or channel count rather than silently reinterpreting bytes.
    pub fn from_mat(mat: &Mat) -> Result<Self> {
        if mat.depth() != MatDepth::F32 || mat.channels() != 1 {
            return Err(Error::InvalidParameter(format!(
                "GrayImage::from_mat requires single-channel F32, got {} channel(s) of {:?}",
                mat.channels(),
                mat.depth()
            )));
        }
        let (width, height) = (mat.cols(), mat.rows());
        let mut image = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                image.set(x, y, mat.at_f32(y, x, 0)?);
            }
        }
        Ok(image)
    }

    /// Convert to a single-channel `F32` `Mat`.
    pub fn to_mat(&self) -> Result<Mat> {
        let mut mat = Mat::new(self.height, self.width, 1, MatDepth::F32)?;
        for y in 0..self.height {
            for x in 0..self.width {
                mat.set_f32(y, x, 0, self.at(x, y))?;
            }
        }
        Ok(mat)
    }
}

/// Per-pixel `(magnitude, orientation)` image produced by the gradient
/// field stage (C7). Orientation is radians in `[-pi, pi)`; border
/// pixels (first/last row/column) are always `(0.0, 0.0)`.
#[derive(Debug, Clone)]
pub struct GradientImage {
    magnitude: Vec<f32>,
    orientation: Vec<f32>,
    width: usize,
    height: usize,
}

impl GradientImage {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(
                "GradientImage width and height must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            magnitude: vec![0.0; width * height],
            orientation: vec![0.0; width * height],
            width,
            height,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> (f32, f32) {
        let idx = y * self.width + x;
        (self.magnitude[idx], self.orientation[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, magnitude: f32, orientation: f32) {
        let idx = y * self.width + x;
        self.magnitude[idx] = magnitude;
        self.orientation[idx] = orientation;
    }

    pub fn sync_from_device(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(GrayImage::new(0, 4).is_err());
        assert!(GrayImage::new(4, 0).is_err());
    }

    #[test]
    fn set_then_at_round_trips() {
        let mut img = GrayImage::new(3, 3).unwrap();
        img.set(1, 2, 42.5);
        assert_eq!(img.at(1, 2), 42.5);
        assert_eq!(img.at(0, 0), 0.0);
    }

    #[test]
    fn in_bounds_rejects_negative_and_edge() {
        let img = GrayImage::new(4, 4).unwrap();
        assert!(img.in_bounds(0, 0));
        assert!(img.in_bounds(3, 3));
        assert!(!img.in_bounds(-1, 0));
        assert!(!img.in_bounds(4, 0));
    }

    #[test]
    fn gradient_image_stores_pairs_independently() {
        let mut g = GradientImage::new(2, 2).unwrap();
        g.set(1, 1, 3.0, 1.5);
        assert_eq!(g.at(1, 1), (3.0, 1.5));
        assert_eq!(g.at(0, 0), (0.0, 0.0));
    }

    #[test]
    fn mat_round_trip_preserves_values() {
        let mut image = GrayImage::new(3, 2).unwrap();
        image.set(0, 0, 1.0);
        image.set(2, 1, -0.5);
        let mat = image.to_mat().unwrap();
        let back = GrayImage::from_mat(&mat).unwrap();
        assert_eq!(back.at(0, 0), 1.0);
        assert_eq!(back.at(2, 1), -0.5);
    }

    #[test]
    fn from_mat_rejects_wrong_depth() {
        let mat = crate::core::mat::Mat::new(4, 4, 1, crate::core::mat::MatDepth::U8).unwrap();
        assert!(GrayImage::from_mat(&mat).is_err());
    }

    #[test]
    fn from_mat_rejects_multichannel() {
        let mat = crate::core::mat::Mat::new(4, 4, 3, crate::core::mat::MatDepth::F32).unwrap();
        assert!(GrayImage::from_mat(&mat).is_err());
    }
}

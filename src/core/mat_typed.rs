use crate::core::mat::Mat;
use crate::error::{Error, Result};

/// Type-safe F32 accessor for `Mat`, the depth SIFT's grayscale boundary
/// conversion (`sift::image::GrayImage`) reads from and writes to.
impl Mat {
    /// Get f32 value at (row, col, channel).
    pub fn at_f32(&self, row: usize, col: usize, channel: usize) -> Result<f32> {
        if self.depth() != crate::core::MatDepth::F32 {
            return Err(Error::InvalidParameter(format!(
                "Mat depth is {:?}, expected F32",
                self.depth()
            )));
        }

        if row >= self.rows() || col >= self.cols() || channel >= self.channels() {
            return Err(Error::OutOfRange(format!(
                "Index ({row}, {col}, {channel}) out of range"
            )));
        }

        let idx = (row * self.cols() + col) * self.channels() + channel;
        let byte_idx = idx * 4;

        let bytes = &self.data()[byte_idx..byte_idx + 4];
        let value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        Ok(value)
    }

    /// Set f32 value at (row, col, channel).
    pub fn set_f32(&mut self, row: usize, col: usize, channel: usize, value: f32) -> Result<()> {
        if self.depth() != crate::core::MatDepth::F32 {
            return Err(Error::InvalidParameter(format!(
                "Mat depth is {:?}, expected F32",
                self.depth()
            )));
        }

        if row >= self.rows() || col >= self.cols() || channel >= self.channels() {
            return Err(Error::OutOfRange(format!(
                "Index ({row}, {col}, {channel}) out of range"
            )));
        }

        let idx = (row * self.cols() + col) * self.channels() + channel;
        let byte_idx = idx * 4;

        let bytes = value.to_le_bytes();
        let data = self.data_mut();
        data[byte_idx..byte_idx + 4].copy_from_slice(&bytes);
        Ok(())
    }
}

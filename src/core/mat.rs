use crate::error::{Error, Result};
use crate::core::types::Scalar;

/// General 2D typed array with host/device mirror semantics (C1).
/// Public-boundary image type; see `GrayImage::from_mat`/`to_mat` for
/// the conversion to and from the SIFT pipeline's working format.
#[derive(Debug, Clone)]
pub struct Mat {
    data: Vec<u8>,
    rows: usize,
    cols: usize,
    channels: usize,
    depth: MatDepth,
}

/// Matrix depth (element type)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatDepth {
    U8,
    U16,
    F32,
    F64,
}

impl MatDepth {
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            MatDepth::U8 => 1,
            MatDepth::U16 => 2,
            MatDepth::F32 => 4,
            MatDepth::F64 => 8,
        }
    }
}

impl Mat {
    /// Create a new zero-filled Mat. Fails only on zero dimensions.
    pub fn new_rows_cols(rows: usize, cols: usize, channels: usize, depth: MatDepth) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions(
                "Rows and columns must be greater than 0".to_string(),
            ));
        }

        let total_size = rows * cols * channels * depth.size();
        let data = vec![0u8; total_size];

        Ok(Self {
            data,
            rows,
            cols,
            channels,
            depth,
        })
    }

    /// Convenience alias for `new_rows_cols`.
    pub fn new(rows: usize, cols: usize, channels: usize, depth: MatDepth) -> Result<Self> {
        Self::new_rows_cols(rows, cols, channels, depth)
    }

    /// Create a Mat from raw data, validating the byte count matches
    /// `rows * cols * channels * depth.size()`.
    pub fn from_raw(
        data: Vec<u8>,
        rows: usize,
        cols: usize,
        channels: usize,
        depth: MatDepth,
    ) -> Result<Self> {
        let expected_size = rows * cols * channels * depth.size();
        if data.len() != expected_size {
            return Err(Error::InvalidDimensions(format!(
                "Data size {} doesn't match expected size {}",
                data.len(),
                expected_size
            )));
        }

        Ok(Self {
            data,
            rows,
            cols,
            channels,
            depth,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Same as `cols`.
    #[must_use]
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Same as `rows`.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[must_use]
    pub fn depth(&self) -> MatDepth {
        self.depth
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Refresh host-visible contents after a device-side dispatch wrote
    /// into this `Mat`. The CPU backend always computes in place on the
    /// host buffer, so this is a no-op here; a GPU-backed `Mat` would
    /// copy back from its mirrored device allocation.
    pub fn sync_from_device(&mut self) {}

    /// Pixel value at (row, col). Panics if out of bounds.
    pub fn at(&self, row: usize, col: usize) -> Result<&[u8]> {
        assert!(
            row < self.rows && col < self.cols,
            "Index ({}, {}) out of range for {}x{} matrix",
            row, col, self.rows, self.cols
        );

        let idx = (row * self.cols + col) * self.channels * self.depth.size();
        let end = idx + self.channels * self.depth.size();
        Ok(&self.data[idx..end])
    }

    /// Mutable pixel value at (row, col). Panics if out of bounds.
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut [u8]> {
        assert!(
            row < self.rows && col < self.cols,
            "Index ({}, {}) out of range for {}x{} matrix",
            row, col, self.rows, self.cols
        );

        let idx = (row * self.cols + col) * self.channels * self.depth.size();
        let end = idx + self.channels * self.depth.size();
        Ok(&mut self.data[idx..end])
    }

    /// Set all pixels to a scalar value (U8 depth only).
    pub fn set_to(&mut self, value: Scalar) -> Result<()> {
        if self.depth != MatDepth::U8 {
            return Err(Error::UnsupportedOperation(
                "set_to only supports U8 depth".to_string(),
            ));
        }

        let num_channels = self.channels.min(4);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pixel = self.at_mut(row, col)?;
                for (ch, &val) in value.val.iter().take(num_channels).enumerate() {
                    pixel[ch] = val as u8;
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn clone_mat(&self) -> Mat {
        Self {
            data: self.data.clone(),
            rows: self.rows,
            cols: self.cols,
            channels: self.channels,
            depth: self.depth,
        }
    }
}

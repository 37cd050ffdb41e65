use crate::error::{Error, Result};

/// Linear, host-visible, device-accessible array of POD records.
#[derive(Debug, Clone)]
pub struct Buffer<T: Copy> {
    data: Vec<T>,
}

impl<T: Copy + Default> Buffer<T> {
    /// Allocate a zero-initialized buffer of `count` records.
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidDimensions(
                "Buffer count must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            data: vec![T::default(); count],
        })
    }
}

impl<T: Copy> Buffer<T> {
    /// Wrap an existing, already-populated record array.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Host readback after a device-side dispatch wrote into this buffer.
    ///
    /// The CPU backend never detaches host and device storage, so this
    /// is a no-op; a GPU backend overwrites `data` from its staging
    /// buffer before returning.
    pub fn sync_from_device(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_rejected() {
        assert!(Buffer::<f32>::new(0).is_err());
    }

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = Buffer::<f32>::new(4).unwrap();
        assert_eq!(buf.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
    }
}

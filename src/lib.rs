//! # sift-rs
//!
//! A pure Rust implementation of the Scale-Invariant Feature Transform
//! (SIFT) keypoint detector and descriptor builder, following the IPOL
//! reference (Otero & Delbracio, 2014).
//!
//! ## Features
//!
//! - **Core**: Basic data structures (`Mat`, `Buffer`, `Point2f`, `Size`, `Scalar`)
//! - **SIFT**: Gaussian pyramid, DoG extrema detection, sub-pixel
//!   interpolation, orientation assignment, 128-dim descriptors
//!
//! ## Example
//!
//! ```rust,no_run
//! use sift_rs::sift::{Sift, SiftConfig, GrayImage};
//!
//! # fn main() -> sift_rs::error::Result<()> {
//! let config = SiftConfig::new((256, 256));
//! let mut sift = Sift::new(config)?;
//!
//! let image = GrayImage::new(256, 256)?;
//! let keypoints = sift.detect(&image)?;
//! let descriptors = sift.describe(&keypoints)?;
//! # let _ = descriptors;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod gpu;
pub mod sift;

pub mod prelude {
    //! Convenience module that re-exports commonly used items
    pub use crate::core::{Buffer, Mat, MatDepth, Point, Point2f, Size, Rect, Scalar};
    pub use crate::error::{Error, Result};
    pub use crate::sift::{ComputeBackend, CpuBackend, Descriptor, GrayImage, Keypoint, Sift, SiftConfig};
}

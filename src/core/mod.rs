pub mod buffer;
pub mod mat;
pub mod mat_typed;
pub mod types;

pub use buffer::Buffer;
pub use mat::{Mat, MatDepth};
pub use types::*;

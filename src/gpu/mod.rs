//! GPU acceleration scaffolding using WebGPU.
//!
//! Only the device/adapter bootstrap survives here. A `GpuBackend` implementing
//! [`crate::sift::ComputeBackend`] on top of it is future work: see
//! `DESIGN.md` for why no kernel ships behind the `gpu` feature yet.

pub mod device;

#[cfg(feature = "gpu")]
pub use device::GpuContext;

/// Initialize GPU context (native only - blocks)
#[cfg(all(feature = "gpu", not(target_arch = "wasm32")))]
pub fn init_gpu() -> bool {
    GpuContext::init().is_some()
}

/// Check if GPU is available
pub fn gpu_available() -> bool {
    #[cfg(feature = "gpu")]
    {
        GpuContext::is_available()
    }
    #[cfg(not(feature = "gpu"))]
    {
        false
    }
}

//! GPU device + surface management.
//!
//! This module is responsible for:
//! - probing GPU capability and creating the wgpu Instance/Adapter/Device/Queue
//! - binding and configuring the Surface at the display's pixel density
//! - acquiring a frame and submitting recorded commands

mod error;
mod gpu;
mod surface;

pub use error::{GpuError, SurfaceErrorAction};
pub use gpu::{Gpu, GpuFrame, GpuInit};
pub use surface::SurfaceArea;

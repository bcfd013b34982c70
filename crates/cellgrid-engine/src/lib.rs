//! Cellgrid engine crate.
//!
//! This crate owns the GPU setup and draw pieces used by the demo shell:
//! device/surface acquisition, the instanced grid renderer, and logging.

pub mod device;
pub mod logging;
pub mod render;

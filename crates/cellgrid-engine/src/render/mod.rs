//! GPU rendering.
//!
//! The grid renderer sits on top of the `device` layer and owns its own GPU
//! resources (pipeline, buffers, bind group). One construction, one
//! instanced draw; there is no repaint loop in this layer.

mod grid;

pub use grid::{GRID_SIZE, GridParams, GridRenderer};

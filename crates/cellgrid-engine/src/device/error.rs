use thiserror::Error;

/// Fatal GPU setup failures.
///
/// Any of these aborts the whole initialize-and-draw sequence. There is no
/// retry and no partial rendering; the caller decides how to surface them.
#[derive(Debug, Error)]
pub enum GpuError {
    /// The host exposes no GPU capability at all: no backend on this system
    /// produced a single adapter.
    #[error("no GPU backend is available in this environment")]
    UnsupportedEnvironment,

    /// Capability negotiation found no usable hardware adapter.
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    /// The window surface cannot yield a drawable context.
    #[error("surface cannot provide a drawable GPU context")]
    NoContext,

    /// Logical device creation failed after a usable adapter was found.
    #[error("failed to create GPU device")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
}

/// What the caller should do after a surface error during frame acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was reconfigured; request a redraw and carry on.
    Reconfigured,
    /// Transient error; drop the current frame.
    SkipFrame,
    /// Unrecoverable (commonly OOM); shut down gracefully.
    Fatal,
}

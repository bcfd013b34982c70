use winit::dpi::LogicalSize;
use winit::window::Window;

/// Client drawing area: logical size plus the display's device-pixel-ratio.
///
/// The surface is configured with the *physical* extent derived from this,
/// so the raster resolution matches the display density instead of blurring
/// on high-density displays.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceArea {
    /// Client-area width in logical pixels.
    pub width: f64,
    /// Client-area height in logical pixels.
    pub height: f64,
    /// Device-pixel-ratio reported by the host; 1.0 when unknown.
    pub scale_factor: f64,
}

impl SurfaceArea {
    pub fn new(width: f64, height: f64, scale_factor: f64) -> Self {
        // A host that cannot report a usable ratio gets the identity mapping.
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Reads the client area and device-pixel-ratio from a window.
    pub fn of_window(window: &Window) -> Self {
        let scale = window.scale_factor();
        let logical: LogicalSize<f64> = window.inner_size().to_logical(scale);
        Self::new(logical.width, logical.height, scale)
    }

    /// Physical backing extent: `floor(width * ratio)` by `floor(height * ratio)`.
    ///
    /// Clamped to at least 1x1 per axis; wgpu cannot configure a zero-sized
    /// surface.
    pub fn physical_extent(self) -> (u32, u32) {
        let w = (self.width * self.scale_factor).floor().max(1.0) as u32;
        let h = (self.height * self.scale_factor).floor().max(1.0) as u32;
        (w, h)
    }
}

/// Picks the surface format from the capability list, preferring sRGB when
/// requested. The list's first entry is the fallback (wgpu orders it by
/// preference).
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(f) = formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }
    formats.first().copied()
}

/// Picks the composite alpha mode: the requested one if supported, otherwise
/// the first supported mode, otherwise `Auto`.
pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── physical extent ───────────────────────────────────────────────────

    #[test]
    fn extent_scales_by_the_pixel_ratio() {
        assert_eq!(SurfaceArea::new(800.0, 600.0, 2.0).physical_extent(), (1600, 1200));
    }

    #[test]
    fn extent_floors_fractional_products() {
        // 333 * 1.5 = 499.5 -> 499
        assert_eq!(SurfaceArea::new(333.0, 100.0, 1.5).physical_extent(), (499, 150));
    }

    #[test]
    fn extent_identity_at_ratio_one() {
        assert_eq!(SurfaceArea::new(640.0, 480.0, 1.0).physical_extent(), (640, 480));
    }

    #[test]
    fn unknown_ratio_defaults_to_one() {
        assert_eq!(SurfaceArea::new(640.0, 480.0, 0.0).scale_factor, 1.0);
        assert_eq!(SurfaceArea::new(640.0, 480.0, -2.0).scale_factor, 1.0);
        assert_eq!(SurfaceArea::new(640.0, 480.0, f64::NAN).scale_factor, 1.0);
        assert_eq!(SurfaceArea::new(640.0, 480.0, f64::INFINITY).scale_factor, 1.0);
    }

    #[test]
    fn zero_area_clamps_to_one_pixel() {
        assert_eq!(SurfaceArea::new(0.0, 0.0, 2.0).physical_extent(), (1, 1));
    }

    // ── format selection ──────────────────────────────────────────────────

    #[test]
    fn format_prefers_srgb_when_asked() {
        let formats = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn format_falls_back_to_first_entry() {
        let formats = [wgpu::TextureFormat::Rgba16Float, wgpu::TextureFormat::Bgra8Unorm];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(wgpu::TextureFormat::Rgba16Float)
        );
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(wgpu::TextureFormat::Rgba16Float)
        );
    }

    #[test]
    fn format_empty_capability_list_is_none() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── alpha mode selection ──────────────────────────────────────────────

    #[test]
    fn alpha_honors_a_supported_request() {
        let supported = [
            wgpu::CompositeAlphaMode::Opaque,
            wgpu::CompositeAlphaMode::PreMultiplied,
        ];
        assert_eq!(
            choose_alpha_mode(&supported, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn alpha_ignores_an_unsupported_request() {
        let supported = [wgpu::CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(wgpu::CompositeAlphaMode::PostMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }

    #[test]
    fn alpha_defaults_to_auto_when_nothing_is_listed() {
        assert_eq!(choose_alpha_mode(&[], None), wgpu::CompositeAlphaMode::Auto);
    }
}

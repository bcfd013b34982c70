use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use cellgrid_engine::device::{Gpu, GpuInit, SurfaceErrorAction};
use cellgrid_engine::logging::{LoggingConfig, init_logging};
use cellgrid_engine::render::GridRenderer;

const WINDOW_TITLE: &str = "cellgrid";
const INITIAL_WIDTH: f64 = 800.0;
const INITIAL_HEIGHT: f64 = 600.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = DemoApp::default();

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    Ok(())
}

/// Window + GPU context for the one demo surface.
///
/// The surface borrows the window, so the two live in a self-referencing
/// entry. The renderer owns only device-side resources and lives outside.
#[self_referencing]
struct SurfaceEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

#[derive(Default)]
struct DemoApp {
    entry: Option<SurfaceEntry>,
    renderer: Option<GridRenderer>,
}

impl DemoApp {
    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let entry = SurfaceEntryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, GpuInit::default()))
                    .expect("GPU initialization failed")
            },
        }
        .build();

        // Auto pipeline layout couples creation order: the renderer (and its
        // bind group) is built after the GPU context, never before.
        let renderer = entry.with_gpu(|gpu| GridRenderer::new(gpu));

        self.entry = Some(entry);
        self.renderer = Some(renderer);
        Ok(())
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            event_loop.exit();
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // The grid is drawn once per expose; there is no frame loop.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.renderer = None;
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.renderer.as_ref() else {
                    return;
                };

                let result = entry.with_mut(|fields| {
                    fields.window.pre_present_notify();
                    renderer.render(fields.gpu)
                });

                if let Err(err) = result {
                    match entry.with_gpu_mut(|gpu| gpu.handle_surface_error(err)) {
                        SurfaceErrorAction::Reconfigured => {
                            entry.with_window(|w| w.request_redraw());
                        }
                        SurfaceErrorAction::SkipFrame => {}
                        SurfaceErrorAction::Fatal => {
                            log::error!("fatal surface error; exiting");
                            event_loop.exit();
                        }
                    }
                }
            }

            _ => {}
        }
    }
}

//! Native host: a winit window showing the field.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::environment::{Environment, InputMode, Viewport};
use crate::error::HostError;
use crate::field::ParticleField;
use crate::gpu::Presenter;
use crate::input::Input;
use crate::raster::Canvas;
use crate::scheduler::RedrawScheduler;
use crate::surface::SurfaceSize;
use crate::time::Clock;

/// Host-side switches that are not part of the field's tuning.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunOptions {
    /// Behave as if the system asked for reduced motion.
    pub reduced_motion: bool,
    pub input_mode: InputMode,
    /// Fixed RNG seed for a reproducible layout.
    pub seed: Option<u64>,
}

/// Open a window and animate the field until it is closed.
pub fn run(config: FieldConfig, options: RunOptions) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, options);
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Render `frames` frames headlessly at a fixed 60 Hz timestep and save
/// the last one as a PNG.
pub fn snapshot(
    config: FieldConfig,
    environment: Environment,
    frames: u32,
    seed: u64,
    path: impl AsRef<Path>,
) -> Result<(), HostError> {
    let mut field = ParticleField::with_seed(config, environment, seed);
    let mut canvas = Canvas::new(SurfaceSize::for_viewport(
        environment.viewport,
        environment.device_pixel_ratio,
    ));
    let mut scheduler = RedrawScheduler::new();

    field.activate(&mut canvas, &mut scheduler, Duration::ZERO);
    let mut rendered = 1;
    while rendered < frames && scheduler.take_pending().is_some() {
        let now = Duration::from_micros(16_667 * rendered as u64);
        field.frame(&mut canvas, &mut scheduler, now);
        rendered += 1;
    }
    field.deactivate(&mut scheduler);

    canvas.save_png(path.as_ref())?;
    log::info!(
        "Wrote {}x{} snapshot after {} frame(s) to {}",
        canvas.width(),
        canvas.height(),
        rendered,
        path.as_ref().display()
    );
    Ok(())
}

fn viewport_of(size: PhysicalSize<u32>, scale_factor: f64) -> Viewport {
    let logical = size.to_logical::<f32>(scale_factor);
    Viewport::new(logical.width, logical.height)
}

struct App {
    config: FieldConfig,
    options: RunOptions,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    // Present only when the presenter came up.
    canvas: Option<Canvas>,
    field: Option<ParticleField>,
    input: Input,
    scheduler: RedrawScheduler,
    clock: Clock,
}

impl App {
    fn new(config: FieldConfig, options: RunOptions) -> Self {
        Self {
            config,
            options,
            window: None,
            presenter: None,
            canvas: None,
            field: None,
            input: Input::new(options.input_mode, 1.0),
            scheduler: RedrawScheduler::new(),
            clock: Clock::new(),
        }
    }

    fn mount(&mut self, window: &Window) {
        let scale_factor = window.scale_factor();
        let viewport = viewport_of(window.inner_size(), scale_factor);
        let environment = Environment::new(viewport)
            .with_device_pixel_ratio(scale_factor as f32)
            .with_reduced_motion(self.options.reduced_motion)
            .with_input_mode(self.options.input_mode);

        let mut field = match self.options.seed {
            Some(seed) => ParticleField::with_seed(self.config.clone(), environment, seed),
            None => ParticleField::new(self.config.clone(), environment),
        };
        let mut canvas = Canvas::new(SurfaceSize::for_viewport(viewport, scale_factor as f32));

        field.activate(&mut canvas, &mut self.scheduler, self.clock.now());
        log::info!(
            "Particle field running with {} particles ({:?}, reduced motion: {})",
            field.particles().len(),
            environment.device_class,
            environment.reduced_motion,
        );

        self.input.set_scale_factor(scale_factor);
        self.field = Some(field);
        self.canvas = Some(canvas);
        window.request_redraw();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(field), Some(canvas), Some(presenter)) =
            (&mut self.field, &mut self.canvas, &mut self.presenter)
        else {
            return;
        };

        if self.scheduler.take_pending().is_some() {
            field.frame(canvas, &mut self.scheduler, self.clock.now());
        }

        match presenter.present(canvas) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => presenter.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Present failed: {:?}", e),
        }

        if self.clock.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!("nodefield - {:.0} fps", self.clock.fps()));
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(field) = &mut self.field {
            field.deactivate(&mut self.scheduler);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("nodefield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("{}", HostError::from(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        // Without a presenter the window stays blank and the field is never mounted.
        match pollster::block_on(Presenter::new(window.clone())) {
            Ok(presenter) => {
                self.presenter = Some(presenter);
                self.mount(&window);
            }
            Err(e) => log::warn!("Drawing surface unavailable, background disabled: {}", e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
                let Some(window) = &self.window else {
                    return;
                };
                let scale_factor = window.scale_factor();
                if let (Some(field), Some(canvas)) = (&mut self.field, &mut self.canvas) {
                    field.resize(viewport_of(size, scale_factor), scale_factor as f32, canvas);
                }
                window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.input.set_scale_factor(scale_factor);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let (Some(event), Some(field)) = (self.input.handle_event(&other), &mut self.field) {
                    field.handle_pointer(event, self.clock.now());
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.scheduler.pending().is_some() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_of_uses_logical_pixels() {
        let viewport = viewport_of(PhysicalSize::new(2560, 1440), 2.0);
        assert_eq!(viewport, Viewport::new(1280.0, 720.0));
    }

    #[test]
    fn test_snapshot_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.png");
        let environment = Environment::new(Viewport::new(320.0, 200.0));

        snapshot(FieldConfig::default(), environment, 5, 42, &path).unwrap();

        let image = image::open(&path).unwrap();
        assert_eq!((image.width(), image.height()), (320, 200));
    }
}

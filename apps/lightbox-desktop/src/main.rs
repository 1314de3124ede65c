use anyhow::{Context as _, Result};
use clap::Parser;
use egui::Context as EguiContext;
use lightbox_camera::{Camera, Movement};
use lightbox_config::AppConfig;
use lightbox_input::{FrameClock, InputState};
use lightbox_render::{RenderView, Scene};
use lightbox_render_wgpu::{RendererOptions, WgpuRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Pixel scroll (touchpads) is converted to wheel lines at this rate.
const PIXELS_PER_SCROLL_LINE: f32 = 40.0;

#[derive(Parser)]
#[command(name = "lightbox-desktop", about = "Lit cube scene with a free-fly camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the camera movement speed (units per second)
    #[arg(long)]
    speed: Option<f32>,

    /// Start with the cursor released
    #[arg(long)]
    no_capture: bool,
}

fn movement_for(key: KeyCode) -> Option<Movement> {
    match key {
        KeyCode::KeyW => Some(Movement::Forward),
        KeyCode::KeyS => Some(Movement::Backward),
        KeyCode::KeyA => Some(Movement::Left),
        KeyCode::KeyD => Some(Movement::Right),
        KeyCode::ArrowUp | KeyCode::Space => Some(Movement::Up),
        KeyCode::ArrowDown | KeyCode::ControlLeft => Some(Movement::Down),
        _ => None,
    }
}

/// Application state owned by the event loop.
struct AppState {
    config: AppConfig,
    camera: Camera,
    input: InputState,
    clock: FrameClock,
    show_overlay: bool,
    fps: f32,
}

impl AppState {
    fn new(config: AppConfig) -> Self {
        Self {
            camera: config.build_camera(),
            input: InputState::new(config.input.capture_cursor),
            clock: FrameClock::new(config.input.max_frame_delta),
            show_overlay: true,
            fps: 0.0,
            config,
        }
    }

    /// Apply this frame's input. Returns `false` once quit was requested.
    fn update(&mut self, dt: f32) -> bool {
        if dt > 0.0 {
            self.fps = if self.fps == 0.0 {
                1.0 / dt
            } else {
                self.fps * 0.9 + 0.1 / dt
            };
        }

        for action in self.input.drain_actions() {
            if !action.apply(&mut self.camera, dt) {
                return false;
            }
        }
        true
    }

    /// Record a key transition. Returns `true` when cursor capture changed.
    fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if let Some(movement) = movement_for(key) {
            self.input.set_held(movement, pressed);
            return false;
        }
        if !pressed {
            return false;
        }

        match key {
            KeyCode::Escape => {
                self.input.request_quit();
                false
            }
            KeyCode::Tab => {
                let captured = self.input.toggle_capture();
                tracing::debug!(captured, "cursor capture toggled");
                true
            }
            KeyCode::F1 => {
                self.show_overlay = !self.show_overlay;
                false
            }
            _ => false,
        }
    }

    fn render_view(&self) -> RenderView {
        RenderView::from_camera(&self.camera, self.config.render.near, self.config.render.far)
    }

    fn draw_ui(&self, ctx: &EguiContext, scene: &Scene) {
        if !self.show_overlay {
            return;
        }

        let cam = &self.camera;
        egui::Window::new("Lightbox")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.0}", self.fps));
                ui.separator();
                let p = cam.position();
                ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                let f = cam.front();
                ui.label(format!("Front: ({:.2}, {:.2}, {:.2})", f.x, f.y, f.z));
                ui.label(format!("Yaw: {:.1}  Pitch: {:.1}", cam.yaw(), cam.pitch()));
                ui.label(format!(
                    "FoV: {:.1} (max {:.0})",
                    cam.field_of_view(),
                    cam.max_field_of_view()
                ));
                ui.separator();
                ui.label(format!(
                    "Cubes: {}  Lamps: {}",
                    scene.cube_positions.len(),
                    scene.point_lights.len()
                ));
                ui.label(if self.input.is_captured() {
                    "Cursor: captured (Tab to release)"
                } else {
                    "Cursor: free (Tab or click to capture)"
                });
                ui.separator();
                ui.small("WASD: Move | Up/Down: Rise/Sink | Wheel: Zoom | F1: Overlay | Esc: Quit");
            });
    }
}

/// Window and GPU resources, created on resume.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, app: &AppConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(app.window.title.clone())
            .with_inner_size(PhysicalSize::new(app.window.width, app.window.height));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("lightbox_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if app.render.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let options = RendererOptions {
            clear_color: app.render.clear_color,
            diffuse_texture: app.render.diffuse_texture.clone(),
            specular_texture: app.render.specular_texture.clone(),
        };
        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            Scene::default(),
            &options,
        );

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn set_cursor_captured(&self, captured: bool) {
        let grab = if captured {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grab {
            tracing::warn!("cursor grab failed: {e}");
        }
        self.window.set_cursor_visible(!captured);
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    init_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            gpu: None,
            egui_ctx: EguiContext::default(),
            init_error: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.state.clock.tick();
        if !self.state.update(dt) {
            tracing::info!("quit requested");
            event_loop.exit();
            return;
        }

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &self.state.render_view(),
            gpu.aspect(),
        );

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let scene = gpu.renderer.scene();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx, scene);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        let egui_commands = gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(
            egui_commands
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.egui_ctx, &self.state.config) {
            Ok(gpu) => {
                gpu.set_cursor_captured(self.state.input.is_captured());
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            // egui only gets first refusal while the cursor is free
            if !self.state.input.is_captured() {
                let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.input.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let capture_changed = self
                    .state
                    .handle_key(key, key_state == ElementState::Pressed);
                if capture_changed {
                    if let Some(gpu) = &self.gpu {
                        gpu.set_cursor_captured(self.state.input.is_captured());
                    }
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } if !self.state.input.is_captured() => {
                self.state.input.set_captured(true);
                if let Some(gpu) = &self.gpu {
                    gpu.set_cursor_captured(true);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_SCROLL_LINE,
                };
                self.state.input.scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state
                .input
                .mouse_motion(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = AppConfig::load_or_default(cli.config.as_deref()).context("loading config")?;
    if let Some(speed) = cli.speed {
        config.camera.settings.movement_speed = speed;
    }
    if cli.no_capture {
        config.input.capture_cursor = false;
    }
    config.validate().context("invalid configuration")?;

    tracing::info!("lightbox-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.init_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

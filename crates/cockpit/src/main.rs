//! VinaSpace-1 command deck: a wgpu cockpit scene with a warp starfield
//! and a chat console wired to the ship computer relay.

mod config;
mod hud;
mod state;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use engine_core::time::Time;
use input::InputState;
use relay::gemini::GeminiComputer;
use relay::worker::RelayWorker;
use relay::ConversationRelay;
use renderer::{Camera, Mesh, MeshData, PassKind, Renderer};
use scene::warp_stars::{WarpStars, STAR_OPACITY, STAR_POINT_SIZE};
use scene::{DrawItem, MeshId};

use crate::config::AppConfig;
use crate::hud::Console;
use crate::state::{SystemState, SystemStatus, Transcript};

struct GameState {
    renderer: Renderer,
    camera: Camera,
    input: InputState,
    time: Time,
    rng: StdRng,

    meshes: HashMap<MeshId, Mesh>,
    stars: WarpStars,

    system: SystemState,
    transcript: Transcript,
    console: Console,
    relay: RelayWorker,

    sensitivity: f32,
    running: bool,
}

impl GameState {
    async fn new(window: Arc<Window>, config: AppConfig) -> Result<Self> {
        let renderer = Renderer::new(window, config.vsync).await?;

        let mut camera = Camera::new();
        let (w, h) = renderer.dimensions();
        camera.set_aspect(w, h);

        let device = renderer.device();
        let meshes = build_meshes(device);

        let mut rng = StdRng::from_entropy();
        let stars = WarpStars::new(&mut rng);

        let relay_config = config.relay.clone();
        let relay = RelayWorker::spawn(ConversationRelay::new(move || {
            GeminiComputer::new(relay_config.clone())
        }));

        let mut system = SystemState::new();
        if std::env::var(relay::gemini::API_KEY_ENV).is_err() {
            log::warn!(
                "{} is not set, ship computer is offline",
                relay::gemini::API_KEY_ENV
            );
            system.communications = SystemStatus::Offline;
        }

        Ok(Self {
            renderer,
            camera,
            input: InputState::new(),
            time: Time::new(),
            rng,
            meshes,
            stars,
            system,
            transcript: Transcript::new(),
            console: Console::new(),
            relay,
            sensitivity: config.sensitivity,
            running: true,
        })
    }

    /// Returns true when the app should exit.
    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.process_keyboard(&event);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.input.process_mouse_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("render error: {e}");
                }
                self.renderer.window.request_redraw();
            }
            _ => {}
        }
        false
    }

    fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta);
        }
    }

    fn update(&mut self) {
        self.time.update();
        let dt = self.time.delta_seconds();
        let now = self.time.elapsed_seconds_f64();

        if self.input.is_quit_pressed() {
            self.running = false;
        }

        if self.input.is_warp_toggle_pressed() {
            self.system.toggle_warp();
            log::info!("warp toggled, readout {}", self.system.velocity_readout());
        }

        // Console editing
        for &ch in self.input.typed_chars() {
            self.console.type_char(ch);
        }
        if self.input.is_backspace_pressed() {
            self.console.backspace();
        }
        if self.input.is_submit_pressed() {
            if let Some(text) = self.console.take_submission() {
                self.transcript.push_user(text.clone(), now);
                self.relay.submit(text);
            }
        }
        if let Some(reply) = self.relay.poll() {
            self.system.note_comms_reply(&reply);
            self.transcript.push_model(reply, now);
            self.console.on_reply();
        }

        // Seat look, only while dragging
        if self.input.is_look_active() {
            let delta = self.input.mouse_delta();
            self.camera
                .process_mouse(delta.x * self.sensitivity, delta.y * self.sensitivity);
        }

        self.stars
            .update(self.system.warp_speed(), dt, &mut self.rng);

        self.input.begin_frame();
    }

    fn render(&mut self) -> Result<()> {
        self.renderer.update_camera(&self.camera);

        let (output, mut encoder) = match self.renderer.begin_frame() {
            Ok(frame) => frame,
            Err(e) => {
                // Surface loss recovers on reconfigure; anything else is fatal upstream.
                log::warn!("surface error, reconfiguring: {e}");
                let size = self.renderer.size;
                self.renderer.resize(size);
                return Ok(());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.clear(&mut encoder, &view);

        // World: stars first, then the scene in pass order
        self.renderer.render_stars(
            &mut encoder,
            &view,
            self.stars.positions(),
            self.stars.model_matrix(),
            STAR_POINT_SIZE,
            STAR_OPACITY,
        );

        let t = self.time.elapsed_seconds();
        let mut items = scene::planets::draw_items(t);
        items.extend(scene::cockpit::draw_items(t));

        for pass in [PassKind::Opaque, PassKind::Transparent, PassKind::Hologram] {
            for (mesh_id, instances) in batch(&items, pass) {
                if let Some(mesh) = self.meshes.get(&mesh_id) {
                    self.renderer
                        .render_instanced(&mut encoder, &view, mesh, &instances, pass);
                }
            }
        }

        // HUD
        let (w, h) = self.renderer.dimensions();
        let overlay = hud::build_overlay(
            w as f32,
            h as f32,
            &self.system,
            &self.transcript,
            &self.console,
        );
        self.renderer
            .render_overlay(&mut encoder, &view, &overlay.vertices, &overlay.indices);

        self.renderer.end_frame(output, encoder);
        Ok(())
    }
}

/// Group draw items of one pass by mesh for instanced draws.
fn batch(items: &[DrawItem], pass: PassKind) -> Vec<(MeshId, Vec<renderer::InstanceData>)> {
    let mut groups: HashMap<MeshId, Vec<renderer::InstanceData>> = HashMap::new();
    for item in items.iter().filter(|i| i.pass == pass) {
        groups.entry(item.mesh).or_default().push(item.instance);
    }
    groups.into_iter().collect()
}

/// All meshes the scene references, built once at startup.
fn build_meshes(device: &wgpu::Device) -> HashMap<MeshId, Mesh> {
    let data: [(MeshId, MeshData); 9] = [
        (MeshId::Cube, MeshData::cuboid(1.0, 1.0, 1.0)),
        (MeshId::Sphere, MeshData::uv_sphere(1.0, 32, 16)),
        (MeshId::Dodecahedron, MeshData::dodecahedron(1.0)),
        (MeshId::Cylinder, MeshData::cylinder(1.0, 1.0, 1.0, 32)),
        (MeshId::ShipCone, MeshData::cone(0.2, 0.8, 4)),
        (MeshId::HoloBeam, MeshData::cylinder(0.7, 0.2, 0.1, 32)),
        (MeshId::TorusMedium, MeshData::torus(0.25, 0.02, 24, 8)),
        (MeshId::TorusThin, MeshData::torus(0.35, 0.01, 24, 8)),
        (MeshId::PlanetRing, MeshData::annulus(18.0, 28.0, 64)),
    ];
    data.into_iter()
        .map(|(id, mesh_data)| (id, Mesh::new(device, &mesh_data)))
        .collect()
}

/// Application handler for winit.
struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = AppConfig::load();
            let mut window_attrs = Window::default_attributes()
                .with_title("VinaSpace-1 Command Deck")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));
            if config.fullscreen {
                window_attrs = window_attrs
                    .with_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let state = pollster::block_on(GameState::new(window.clone(), config));
            match state {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize cockpit: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                   VinaSpace-1 Command Deck                       ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                                       ║");
    println!("║    Type       - Compose message │  Enter  - Send to ship AI      ║");
    println!("║    Tab        - Engage warp     │  Drag   - Look around          ║");
    println!("║    Backspace  - Edit input      │  Escape - Quit                 ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  Set GEMINI_API_KEY to bring the ship computer online.           ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    log::info!("Starting VinaSpace-1 command deck");

    let event_loop = EventLoop::new()?;
    // Poll continuously so redraws are never gated on new events.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}

mod gpu;

use glam::Vec2;
use gpu::GpuState;
use nebula_core::{
    key_action, pixel_to_ndc, preset_for, AppConfig, InteractionInput, KeyAction, OrbitControls,
    ParameterStore, ParticleCloud, ParticleUniforms, Smoother,
};
use std::time::Instant;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

const MAX_FRAME_DT_SEC: f32 = 0.25;
const PIXELS_PER_NOTCH: f32 = 100.0;

/// Simulation state for the desktop window. Pointer input only.
struct Scene {
    config: AppConfig,
    store: ParameterStore,
    smoother: Smoother,
    orbit: OrbitControls,
    cloud: ParticleCloud,
    pointer_ndc: Vec2,
    cursor: Vec2,
    dragging: bool,
    started: Instant,
    last_instant: Instant,
    seen_revision: u64,
}

impl Scene {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = ParameterStore::new(config.initial.clone())
            .map_err(|e| anyhow::anyhow!("initial parameters: {}", e))?;
        let seed = config.particle_seed();
        let smoother = Smoother::new(store.current(), config.smoother);
        let cloud = ParticleCloud::generate(store.current().count, seed);
        log::info!("[engine] {} particles, seed {}", cloud.len(), seed);
        let now = Instant::now();
        Ok(Self {
            seen_revision: store.revision(),
            config,
            store,
            smoother,
            orbit: OrbitControls::default(),
            cloud,
            pointer_ndc: Vec2::ZERO,
            cursor: Vec2::ZERO,
            dragging: false,
            started: now,
            last_instant: now,
        })
    }

    fn cursor_moved(&mut self, pos: Vec2, size: Vec2) {
        self.pointer_ndc = pixel_to_ndc(pos, size);
        if self.dragging {
            self.orbit.drag(pos - self.cursor);
        }
        self.cursor = pos;
    }

    fn key(&mut self, key: &str) {
        let Some(action) = key_action(key) else {
            return;
        };
        match action {
            KeyAction::Preset(_) => {
                if let Some(preset) = preset_for(action) {
                    log::info!("[key] preset {}", preset.name);
                    if let Err(e) = self.store.apply_preset(&preset) {
                        log::error!("[key] preset rejected: {}", e);
                    }
                }
            }
            KeyAction::TogglePanel | KeyAction::ToggleInputMode => {
                log::info!("[key] {:?} is only available in the browser build", action);
            }
        }
    }

    /// Advance one frame. The flag is set when the particle cloud was regenerated.
    fn step(&mut self, viewport: (u32, u32), srgb_target: bool) -> (ParticleUniforms, bool) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        if !self.dragging {
            self.orbit.advance(dt_sec);
        }

        let params = self.store.current().clone();
        let mut regenerated = false;
        if self.store.revision() != self.seen_revision {
            self.seen_revision = self.store.revision();
            if params.count as usize != self.cloud.len() {
                self.cloud = ParticleCloud::generate(params.count, self.cloud.seed());
                regenerated = true;
            }
        }

        let input = InteractionInput::Pointer(self.config.mapping.pointer_to_world(self.pointer_ndc));
        let smoothed = *self.smoother.tick(&input, &params, dt_sec);
        let aspect = viewport.0.max(1) as f32 / viewport.1.max(1) as f32;
        let uniforms = ParticleUniforms::new(
            &smoothed,
            &self.orbit.camera(aspect),
            (now - self.started).as_secs_f32(),
            viewport,
            srgb_target,
        );
        (uniforms, regenerated)
    }
}

fn load_config() -> anyhow::Result<AppConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(AppConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;
    let config = AppConfig::from_json(&text)?;
    log::info!("[config] loaded {}", path);
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut scene = Scene::new(load_config()?)?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Nebula Flow (native)")
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window, &scene.cloud))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => gpu.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let (w, h) = gpu.size();
                scene.cursor_moved(
                    Vec2::new(position.x as f32, position.y as f32),
                    Vec2::new(w as f32, h as f32),
                );
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => scene.dragging = state == ElementState::Pressed,
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_NOTCH,
                };
                if notches.is_finite() && notches != 0.0 {
                    scene.orbit.zoom(notches);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Character(c) => scene.key(c.as_str()),
                _ => {}
            },
            _ => {}
        },
        Event::AboutToWait => {
            let (uniforms, regenerated) = scene.step(gpu.size(), gpu.srgb_target());
            if regenerated {
                gpu.set_cloud(&scene.cloud);
            }
            match gpu.render(&uniforms) {
                Ok(()) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu.resize(gpu.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::error!("[gpu] render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}

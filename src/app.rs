//! The windowed driver: owns the event loop, the GPU stack, and the
//! vivarium, and ties them together once per frame.
//!
//! Frame order is fixed: input → animation update → draw-list collection
//! → render. Keyboard controls:
//!
//! | Key        | Action                                        |
//! |------------|-----------------------------------------------|
//! | Space      | Pause/resume the simulation                   |
//! | N          | Add another prey                              |
//! | X          | Remove the most recently added creature       |
//! | Tab        | Cycle the highlighted joint                   |
//! | Up / Down  | Rotate the highlighted joint about its u axis |
//! | Escape     | Clear the highlight                           |
//! | R          | Reset the camera                              |
//!
//! Dragging with the left mouse button orbits the camera; the scroll
//! wheel zooms.

use std::sync::Arc;
use std::time::Instant;

use glam::{Vec3, vec3};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::camera::OrbitCamera;
use crate::color::Color;
use crate::creatures::Prey;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::mesh::MeshBank;
use crate::node::{Axis, ResetTarget};
use crate::render::ScenePass;
use crate::shape::DrawCommand;
use crate::vivarium::Vivarium;

/// Degrees per keypress when nudging a selected joint.
const EDIT_STEP: f32 = 5.0;

/// Window and tank configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Full edge lengths of the tank volume.
    pub tank_dimensions: Vec3,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Vivarium".to_string(),
            width: 1280,
            height: 720,
            tank_dimensions: Vec3::splat(4.0),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn tank_dimensions(mut self, dimensions: Vec3) -> Self {
        self.tank_dimensions = dimensions;
        self
    }
}

/// Run the vivarium until the window closes.
pub fn run(config: AppConfig) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::Pending { config };
    event_loop.run_app(&mut app)
}

enum App {
    Pending {
        config: AppConfig,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        pass: ScenePass,
        meshes: MeshBank,
        orbit: OrbitCamera,
        input: Input,
        vivarium: Vivarium,
        draw_list: Vec<DrawCommand>,
        paused: bool,
        selected: Option<String>,
        prey_counter: usize,
        start_time: Instant,
    },
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let App::Pending { config } = self {
            let attrs = WindowAttributes::default()
                .with_title(&config.title)
                .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));
            let window = Arc::new(
                event_loop
                    .create_window(attrs)
                    .expect("failed to create window"),
            );

            let gpu = GpuContext::new(window.clone());
            let pass = ScenePass::new(&gpu);
            let meshes = MeshBank::new(&gpu);
            let vivarium = Vivarium::populated(config.tank_dimensions)
                .expect("failed to build the initial population");
            let orbit = OrbitCamera::new()
                .distance(1.6 * config.tank_dimensions.max_element());

            *self = App::Running {
                window,
                gpu,
                pass,
                meshes,
                orbit,
                input: Input::new(),
                vivarium,
                draw_list: Vec::new(),
                paused: false,
                selected: None,
                prey_counter: 2,
                start_time: Instant::now(),
            };
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let App::Running {
            window,
            gpu,
            pass,
            meshes,
            orbit,
            input,
            vivarium,
            draw_list,
            paused,
            selected,
            prey_counter,
            start_time,
        } = self
        else {
            return;
        };

        input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let time = start_time.elapsed().as_secs_f32();

                if input.key_pressed(KeyCode::Space) {
                    *paused = !*paused;
                }
                if input.key_pressed(KeyCode::KeyR) {
                    *orbit = OrbitCamera::new()
                        .distance(1.6 * vivarium.tank_dimensions().max_element());
                }
                if input.key_pressed(KeyCode::KeyN) {
                    spawn_prey(vivarium, prey_counter);
                }
                if input.key_pressed(KeyCode::KeyX) {
                    remove_newest(vivarium, selected);
                }
                if input.key_pressed(KeyCode::Tab) {
                    cycle_selection(vivarium, selected);
                }
                if input.key_pressed(KeyCode::Escape) {
                    clear_selection(vivarium, selected);
                    *selected = None;
                }
                for (key, delta) in [(KeyCode::ArrowUp, EDIT_STEP), (KeyCode::ArrowDown, -EDIT_STEP)]
                {
                    if input.key_pressed(key)
                        && let Some(name) = selected.as_deref()
                    {
                        nudge_joint(vivarium, name, delta);
                    }
                }

                orbit.update(input);

                if !*paused
                    && let Err(error) = vivarium.animation_update()
                {
                    log::error!("animation update failed: {error}");
                }

                draw_list.clear();
                if let Err(error) = vivarium.collect_draws(draw_list) {
                    log::error!("draw collection failed: {error}");
                }

                pass.ensure_depth_size(gpu);
                pass.prepare(gpu, &orbit.camera(), time, draw_list);
                let output = match gpu.surface.get_current_texture() {
                    Ok(output) => output,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.resize(gpu.width(), gpu.height());
                        input.begin_frame();
                        window.request_redraw();
                        return;
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        input.begin_frame();
                        window.request_redraw();
                        return;
                    }
                    Err(error) => {
                        log::error!("surface unavailable: {error}");
                        event_loop.exit();
                        return;
                    }
                };
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let mut encoder = gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Frame Encoder"),
                    });
                {
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Scene Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: 0.015,
                                    g: 0.04,
                                    b: 0.07,
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                            view: pass.depth_view(),
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        }),
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    pass.render(&mut render_pass, meshes, draw_list);
                }

                gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                input.begin_frame();
                window.request_redraw();
            }
            _ => {}
        }
    }
}

fn spawn_prey(vivarium: &mut Vivarium, counter: &mut usize) {
    let spots = [
        vec3(0.0, -1.0, 1.0),
        vec3(1.2, -0.8, -1.0),
        vec3(-1.2, 0.2, -1.2),
        vec3(0.8, 1.2, 0.6),
    ];
    let position = spots[*counter % spots.len()];
    let name = format!("prey{}", *counter);
    *counter += 1;
    match Prey::build(vivarium.graph_mut(), position, 1.0) {
        Ok(prey) => {
            if let Err(error) = vivarium.add_creature(Box::new(prey), Some(&name)) {
                log::error!("could not add '{name}': {error}");
            }
        }
        Err(error) => log::error!("could not build '{name}': {error}"),
    }
}

fn remove_newest(vivarium: &mut Vivarium, selected: &mut Option<String>) {
    let Some(name) = vivarium.creature_names().last().map(|name| name.to_string()) else {
        return;
    };
    if let Err(error) = vivarium.remove_creature(&name) {
        log::error!("could not remove '{name}': {error}");
        return;
    }
    // The highlight may have gone down with the creature.
    if let Some(joint) = selected.as_deref()
        && vivarium.joint(joint).is_err()
    {
        *selected = None;
    }
}

fn cycle_selection(vivarium: &mut Vivarium, selected: &mut Option<String>) {
    let names = vivarium.joint_names();
    if names.is_empty() {
        *selected = None;
        return;
    }
    clear_selection(vivarium, selected);
    let next = match selected.as_deref() {
        Some(old) => match names.iter().position(|name| name == old) {
            Some(i) => names[(i + 1) % names.len()].clone(),
            None => names[0].clone(),
        },
        None => names[0].clone(),
    };
    if let Ok(key) = vivarium.joint(&next) {
        let _ = vivarium.graph_mut().set_color(key, Color::YELLOW);
    }
    log::debug!("selected joint '{next}'");
    *selected = Some(next);
}

fn clear_selection(vivarium: &mut Vivarium, selected: &Option<String>) {
    if let Some(name) = selected.as_deref()
        && let Ok(key) = vivarium.joint(name)
    {
        let _ = vivarium.graph_mut().reset(key, ResetTarget::Color);
    }
}

fn nudge_joint(vivarium: &mut Vivarium, name: &str, delta: f32) {
    match vivarium.joint(name) {
        Ok(key) => {
            if let Err(error) = vivarium.graph_mut().rotate(key, Axis::U, delta) {
                log::error!("could not rotate '{name}': {error}");
            }
        }
        Err(error) => log::error!("lost selected joint: {error}"),
    }
}

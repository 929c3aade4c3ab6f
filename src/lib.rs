//! # Vivarium
//!
//! **An animated vivarium of articulated 3D creatures in a bounded tank.**
//!
//! The heart of the crate is a scene graph of rigid transform nodes with
//! bounded per-axis rotation. Creature builders wire those nodes into
//! named, addressable skeletons; oscillators swing the joints between
//! their limits every frame; the [`Vivarium`] drives the whole population
//! and one world-matrix pass per frame; a small wgpu renderer draws the
//! result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vivarium::{AppConfig, run};
//!
//! fn main() {
//!     env_logger::init();
//!     run(AppConfig::new().title("Vivarium").size(1280, 720)).unwrap();
//! }
//! ```
//!
//! ## Headless use
//!
//! The simulation is independent of the renderer — build a tank, drive
//! it, and read world transforms back without a GPU in sight:
//!
//! ```
//! use vivarium::{Vivarium, Vec3};
//!
//! let mut vivarium = Vivarium::populated(Vec3::splat(4.0)).unwrap();
//! vivarium.animation_update().unwrap();
//!
//! let head = vivarium.joint("head_prey0").unwrap();
//! let position = vivarium.graph().world_position(head).unwrap();
//! assert!(position.length() > 0.0);
//! ```
//!
//! ## Frame protocol
//!
//! The driver calls, in order, once per rendered frame:
//!
//! 1. [`Vivarium::animation_update`] — every creature advances its
//!    joints, then the whole tree gets one world-matrix pass.
//! 2. [`Vivarium::collect_draws`] — one traversal emits the draw list.
//! 3. [`ScenePass::prepare`] / [`ScenePass::render`] — the backend turns
//!    the list into GPU work.

mod animate;
mod app;
mod camera;
mod color;
pub mod creatures;
mod environment;
mod gpu;
mod input;
mod mesh;
mod node;
mod render;
mod shape;
mod vivarium;

pub use animate::JointOscillator;
pub use app::{AppConfig, run};
pub use camera::{Camera, OrbitCamera};
pub use color::Color;
pub use creatures::{Predator, Prey, Rig, RigBuilder};
pub use environment::{EnvironmentObject, SiblingState, Species, StepContext};
pub use gpu::GpuContext;
pub use input::Input;
pub use mesh::{Geometry, Mesh, MeshBank, Vertex};
pub use node::{Axis, Node, NodeKey, ResetTarget, SceneError, SceneGraph};
pub use render::ScenePass;
pub use shape::{Detail, DrawCommand, Primitive, ShapeDesc};
pub use vivarium::Vivarium;

// Re-export the math types used throughout the public API.
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

// Re-export commonly used winit types for convenience.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

//! Geometry descriptors attached to scene nodes, and the draw commands
//! a traversal emits from them.
//!
//! A [`ShapeDesc`] is purely declarative: it names a unit primitive, a
//! tessellation level, and a color. Nodes carry the descriptor; the render
//! backend owns the actual GPU meshes and resolves the descriptor against
//! them when it consumes the frame's [`DrawCommand`] list.

use glam::{Mat4, Vec3};

use crate::color::Color;

/// The unit primitives a node can display.
///
/// All primitives are centered at the origin with half-extent 1, so a
/// descriptor's extents directly give per-axis radii. [`Primitive::Cylinder`]
/// and [`Primitive::Cone`] extend along the local Z axis (the cone's apex
/// at +Z).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Sphere,
    Cube,
    Cylinder,
    Cone,
}

/// Tessellation level for curved primitives.
///
/// `Low` gives visible faceting and fewer vertices; `High` is the default.
/// Cubes ignore the flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Detail {
    Low,
    High,
}

/// What a geometry-bearing node displays: primitive kind, per-axis
/// extents, tessellation, and color.
///
/// Extents scale the unit primitive at draw time only — they size the
/// geometry itself and are *not* inherited by child nodes, unlike the
/// node's pose scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDesc {
    pub primitive: Primitive,
    pub extents: Vec3,
    pub detail: Detail,
    pub color: Color,
}

impl ShapeDesc {
    pub const fn new(primitive: Primitive, extents: Vec3, color: Color) -> Self {
        Self {
            primitive,
            extents,
            detail: Detail::High,
            color,
        }
    }

    pub const fn sphere(extents: Vec3, color: Color) -> Self {
        Self::new(Primitive::Sphere, extents, color)
    }

    pub const fn cube(extents: Vec3, color: Color) -> Self {
        Self::new(Primitive::Cube, extents, color)
    }

    pub const fn cylinder(extents: Vec3, color: Color) -> Self {
        Self::new(Primitive::Cylinder, extents, color)
    }

    pub const fn cone(extents: Vec3, color: Color) -> Self {
        Self::new(Primitive::Cone, extents, color)
    }

    /// Switch to the coarse tessellation level.
    pub const fn low_poly(mut self) -> Self {
        self.detail = Detail::Low;
        self
    }
}

/// One geometry submission: everything the render backend needs to draw a
/// single node with its resolved world transform.
#[derive(Clone, Copy, Debug)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub detail: Detail,
    pub world: Mat4,
    pub color: Color,
}

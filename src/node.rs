//! The scene graph: rigid transform nodes with bounded per-axis rotation,
//! composed into a tree and resolved into world matrices once per frame.
//!
//! # Structure
//!
//! [`SceneGraph`] is an arena that owns every [`Node`]. All outside
//! references — joint registries, animation tables, selection state — hold
//! [`NodeKey`]s, never pointers, so a node has exactly one owner while any
//! number of lookup tables can still address it. Keys are generational:
//! once a subtree is removed its keys stop resolving instead of aliasing a
//! recycled slot.
//!
//! Parent/child links form a tree by construction: [`SceneGraph::add_child`]
//! rejects a second parent and refuses attachments that would close a loop.
//!
//! # Pose
//!
//! Each node rotates about three local axes `u`, `v`, `w` (unit vectors
//! fixed at construction, X/Y/Z by default). Angles are in degrees. The
//! local transform composes in a fixed, documented order:
//!
//! ```text
//! local = T(position) * R(w) * R(v) * R(u) * S(scaling)
//! ```
//!
//! i.e. the `u` rotation is applied first. Every angle mutation hard-clamps
//! into that axis' installed `[lo, hi]` extent — clamping is a designed
//! behavior, never an error, and never wraps.
//!
//! # Frame protocol
//!
//! Call [`SceneGraph::update`] from the root with the identity matrix once
//! per frame, after all pose mutation; it recomputes world matrices
//! top-down. [`SceneGraph::collect_draws`] then walks the same tree and
//! emits a [`DrawCommand`] for every geometry-bearing node. World matrices
//! are only meaningful after the most recent `update` pass.

use std::fmt;

use glam::{Mat4, Vec3};
use slotmap::{SlotMap, new_key_type};

use crate::color::Color;
use crate::shape::{DrawCommand, ShapeDesc};

new_key_type! {
    /// Generational handle to a node in a [`SceneGraph`].
    pub struct NodeKey;
}

/// Selects one of a node's three local rotation axes.
///
/// Axis selection is typed rather than matched against axis vectors, so a
/// setter can never be handed an axis the node does not have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    U,
    V,
    W,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::U, Axis::V, Axis::W];

    pub(crate) const fn index(self) -> usize {
        match self {
            Axis::U => 0,
            Axis::V => 1,
            Axis::W => 2,
        }
    }
}

/// Which construction-time state [`SceneGraph::reset`] reverts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetTarget {
    /// Restore the shape's construction-time color (used to undo
    /// selection highlighting).
    Color,
    /// Restore every angle to its rest value.
    Pose,
}

/// Errors from scene graph operations.
///
/// None of these are fatal to a frame loop; they are local to one node or
/// one lookup and are surfaced so the caller can log or recover.
#[derive(Debug)]
pub enum SceneError {
    /// A key did not resolve — the node was removed or never existed.
    UnknownNode(NodeKey),
    /// A name lookup missed.
    NameNotFound(String),
    /// A registry insert collided with an existing name.
    NameTaken(String),
    /// The child passed to `add_child` already has a parent.
    AlreadyParented(NodeKey),
    /// Attaching would make the child its own ancestor.
    WouldCycle { parent: NodeKey, child: NodeKey },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownNode(key) => write!(f, "unknown node {key:?}"),
            SceneError::NameNotFound(name) => write!(f, "no component named '{name}'"),
            SceneError::NameTaken(name) => write!(f, "name '{name}' is already registered"),
            SceneError::AlreadyParented(key) => {
                write!(f, "node {key:?} already has a parent")
            }
            SceneError::WouldCycle { parent, child } => {
                write!(f, "attaching {child:?} under {parent:?} would create a cycle")
            }
        }
    }
}

impl std::error::Error for SceneError {}

const UNBOUNDED: [f32; 2] = [f32::NEG_INFINITY, f32::INFINITY];

/// A transform-bearing element of the scene graph, optionally carrying
/// geometry.
///
/// Constructed with the builder methods ([`Node::pivot`], [`Node::shape`],
/// [`Node::named`], [`Node::scaled`], [`Node::axes`]) and then inserted
/// into a [`SceneGraph`], which owns it from that point on. Pose mutation
/// goes through the graph so clamping is always applied.
#[derive(Clone, Debug)]
pub struct Node {
    name: Option<String>,
    shape: Option<ShapeDesc>,
    base_color: Option<Color>,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    position: Vec3,
    scaling: Vec3,
    axes: [Vec3; 3],
    angles: [f32; 3],
    rest_angles: [f32; 3],
    extents: [[f32; 2]; 3],
    world: Mat4,
}

impl Node {
    /// A pure pivot/group node: transform only, nothing to draw.
    pub fn pivot(position: Vec3) -> Self {
        Self {
            name: None,
            shape: None,
            base_color: None,
            parent: None,
            children: Vec::new(),
            position,
            scaling: Vec3::ONE,
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
            angles: [0.0; 3],
            rest_angles: [0.0; 3],
            extents: [UNBOUNDED; 3],
            world: Mat4::IDENTITY,
        }
    }

    /// A geometry-bearing node.
    pub fn shape(position: Vec3, shape: ShapeDesc) -> Self {
        let mut node = Self::pivot(position);
        node.base_color = Some(shape.color);
        node.shape = Some(shape);
        node
    }

    /// Attach a display name (used by joint registries).
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set per-axis scale factors (for unit primitives these are the
    /// shape's half-extents).
    pub fn scaled(mut self, scaling: Vec3) -> Self {
        self.scaling = scaling;
        self
    }

    /// Replace the default X/Y/Z rotation axes. Axes are normalized and
    /// fixed for the node's lifetime; they need not be orthogonal.
    pub fn axes(mut self, u: Vec3, v: Vec3, w: Vec3) -> Self {
        self.axes = [u.normalize(), v.normalize(), w.normalize()];
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scaling(&self) -> Vec3 {
        self.scaling
    }

    pub fn axis(&self, axis: Axis) -> Vec3 {
        self.axes[axis.index()]
    }

    /// The live, animated angle for `axis`, in degrees.
    pub fn current_angle(&self, axis: Axis) -> f32 {
        self.angles[axis.index()]
    }

    /// The rest-pose angle for `axis`, in degrees.
    pub fn rest_angle(&self, axis: Axis) -> f32 {
        self.rest_angles[axis.index()]
    }

    /// The installed `[lo, hi]` rotation extent for `axis`. Unbounded
    /// axes report `[-inf, inf]`.
    pub fn rotate_extent(&self, axis: Axis) -> [f32; 2] {
        self.extents[axis.index()]
    }

    pub fn shape_desc(&self) -> Option<&ShapeDesc> {
        self.shape.as_ref()
    }

    /// The cached world matrix from the most recent update pass. Reading
    /// it before the first traversal yields the identity placeholder.
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// The local transform: `T(position) * R(w) * R(v) * R(u) * S(scaling)`.
    pub fn local_matrix(&self) -> Mat4 {
        let [u, v, w] = self.axes;
        Mat4::from_translation(self.position)
            * Mat4::from_axis_angle(w, self.angles[2].to_radians())
            * Mat4::from_axis_angle(v, self.angles[1].to_radians())
            * Mat4::from_axis_angle(u, self.angles[0].to_radians())
            * Mat4::from_scale(self.scaling)
    }

    fn clamped(&self, axis: Axis, angle: f32) -> f32 {
        let [lo, hi] = self.extents[axis.index()];
        angle.clamp(lo, hi)
    }
}

/// Arena owning a whole scene's nodes. See the module docs for the
/// structure and frame protocol.
#[derive(Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a node. The node starts detached; attach it with
    /// [`SceneGraph::add_child`].
    pub fn insert(&mut self, node: Node) -> NodeKey {
        self.nodes.insert(node)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, key: NodeKey) -> Result<&Node, SceneError> {
        self.nodes.get(key).ok_or(SceneError::UnknownNode(key))
    }

    fn node_mut(&mut self, key: NodeKey) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(key).ok_or(SceneError::UnknownNode(key))
    }

    /// Make `child` a child of `parent`.
    ///
    /// The child must be parentless: a node is owned by at most one parent
    /// and re-parenting must go through [`SceneGraph::remove_subtree`].
    /// Attachments that would make a node its own ancestor are rejected,
    /// keeping the graph a tree.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), SceneError> {
        self.node(child)?;
        self.node(parent)?;
        if self.nodes[child].parent.is_some() {
            return Err(SceneError::AlreadyParented(child));
        }
        let mut cursor = Some(parent);
        while let Some(key) = cursor {
            if key == child {
                return Err(SceneError::WouldCycle { parent, child });
            }
            cursor = self.nodes[key].parent;
        }
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Set the rest-pose angle for one axis, and move the current angle to
    /// match (clamped). Used while building a skeleton to pose a joint's
    /// natural orientation.
    pub fn set_default_angle(
        &mut self,
        key: NodeKey,
        axis: Axis,
        degrees: f32,
    ) -> Result<(), SceneError> {
        let node = self.node_mut(key)?;
        node.rest_angles[axis.index()] = degrees;
        node.angles[axis.index()] = node.clamped(axis, degrees);
        Ok(())
    }

    /// Set only the live angle (clamped); the rest pose is untouched.
    pub fn set_current_angle(
        &mut self,
        key: NodeKey,
        axis: Axis,
        degrees: f32,
    ) -> Result<(), SceneError> {
        let node = self.node_mut(key)?;
        node.angles[axis.index()] = node.clamped(axis, degrees);
        Ok(())
    }

    /// Add `delta` degrees to the live angle, clamped into the installed
    /// extent. This is the per-frame animation primitive.
    pub fn rotate(&mut self, key: NodeKey, axis: Axis, delta: f32) -> Result<(), SceneError> {
        let node = self.node_mut(key)?;
        node.angles[axis.index()] = node.clamped(axis, node.angles[axis.index()] + delta);
        Ok(())
    }

    /// Install the `[lo, hi]` rotation extent for one axis.
    ///
    /// A reversed pair is normalized (with a warning). The current angle is
    /// deliberately not re-clamped: a rest pose outside the new extent
    /// stays put until the next mutation of that axis.
    pub fn set_rotate_extent(
        &mut self,
        key: NodeKey,
        axis: Axis,
        lo: f32,
        hi: f32,
    ) -> Result<(), SceneError> {
        let node = self.node_mut(key)?;
        let extent = if lo <= hi {
            [lo, hi]
        } else {
            log::warn!("reversed rotate extent [{lo}, {hi}] on {axis:?} axis, swapping");
            [hi, lo]
        };
        node.extents[axis.index()] = extent;
        Ok(())
    }

    /// Overwrite the local translation used in the next transform
    /// recomputation.
    pub fn set_position(&mut self, key: NodeKey, position: Vec3) -> Result<(), SceneError> {
        self.node_mut(key)?.position = position;
        Ok(())
    }

    /// Overwrite the local scale used in the next transform recomputation.
    pub fn set_scaling(&mut self, key: NodeKey, scaling: Vec3) -> Result<(), SceneError> {
        self.node_mut(key)?.scaling = scaling;
        Ok(())
    }

    /// Recolor a geometry-bearing node (e.g. selection highlight).
    /// A no-op on pure pivots.
    pub fn set_color(&mut self, key: NodeKey, color: Color) -> Result<(), SceneError> {
        if let Some(shape) = self.node_mut(key)?.shape.as_mut() {
            shape.color = color;
        }
        Ok(())
    }

    /// Revert one attribute of a node to its construction-time state.
    pub fn reset(&mut self, key: NodeKey, target: ResetTarget) -> Result<(), SceneError> {
        let node = self.node_mut(key)?;
        match target {
            ResetTarget::Color => {
                if let (Some(shape), Some(base)) = (node.shape.as_mut(), node.base_color) {
                    shape.color = base;
                }
            }
            ResetTarget::Pose => {
                for axis in Axis::ALL {
                    node.angles[axis.index()] = node.clamped(axis, node.rest_angles[axis.index()]);
                }
            }
        }
        Ok(())
    }

    /// Recompute world matrices for `key` and its whole subtree, top-down.
    ///
    /// `parent_world` is the matrix the subtree hangs from — the identity
    /// when called from the root. Must run once per frame, after pose
    /// mutation and before any draw collection.
    pub fn update(&mut self, key: NodeKey, parent_world: Mat4) -> Result<(), SceneError> {
        let (world, children) = {
            let node = self.node(key)?;
            (parent_world * node.local_matrix(), node.children.clone())
        };
        self.nodes[key].world = world;
        for child in children {
            self.update(child, world)?;
        }
        Ok(())
    }

    /// World matrix cached by the most recent [`SceneGraph::update`] pass.
    pub fn world_matrix(&self, key: NodeKey) -> Result<Mat4, SceneError> {
        Ok(self.node(key)?.world_matrix())
    }

    /// World-space position of a node, from the cached world matrix.
    pub fn world_position(&self, key: NodeKey) -> Result<Vec3, SceneError> {
        Ok(self.node(key)?.world_matrix().w_axis.truncate())
    }

    /// Walk the subtree and emit a [`DrawCommand`] for every
    /// geometry-bearing node. Pure pivots emit nothing but are always
    /// recursed through. Shape extents are folded in here, innermost, so
    /// they size the geometry without leaking into child transforms.
    pub fn collect_draws(
        &self,
        key: NodeKey,
        out: &mut Vec<DrawCommand>,
    ) -> Result<(), SceneError> {
        let node = self.node(key)?;
        if let Some(shape) = &node.shape {
            out.push(DrawCommand {
                primitive: shape.primitive,
                detail: shape.detail,
                world: node.world * Mat4::from_scale(shape.extents),
                color: shape.color,
            });
        }
        for &child in &node.children {
            self.collect_draws(child, out)?;
        }
        Ok(())
    }

    /// Detach `key` from its parent and free it together with every
    /// descendant. Returns how many nodes were freed; their keys stop
    /// resolving.
    pub fn remove_subtree(&mut self, key: NodeKey) -> Result<usize, SceneError> {
        let parent = self.node(key)?.parent;
        if let Some(parent) = parent {
            self.nodes[parent].children.retain(|&c| c != key);
        }
        let mut stack = vec![key];
        let mut freed = 0;
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
                freed += 1;
            }
        }
        Ok(freed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::vec3;

    #[test]
    fn rotate_clamps_instead_of_wrapping() {
        let mut graph = SceneGraph::new();
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_rotate_extent(joint, Axis::U, -20.0, 20.0).unwrap();
        graph.set_current_angle(joint, Axis::U, 15.0).unwrap();

        graph.rotate(joint, Axis::U, 10.0).unwrap();
        assert_eq!(graph.node(joint).unwrap().current_angle(Axis::U), 20.0);

        graph.rotate(joint, Axis::U, -100.0).unwrap();
        assert_eq!(graph.node(joint).unwrap().current_angle(Axis::U), -20.0);
    }

    #[test]
    fn unbounded_axes_accept_any_angle() {
        let mut graph = SceneGraph::new();
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_current_angle(joint, Axis::W, -200.0).unwrap();
        assert_eq!(graph.node(joint).unwrap().current_angle(Axis::W), -200.0);
    }

    #[test]
    fn default_angle_moves_current_too() {
        let mut graph = SceneGraph::new();
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_default_angle(joint, Axis::V, 180.0).unwrap();
        let node = graph.node(joint).unwrap();
        assert_eq!(node.rest_angle(Axis::V), 180.0);
        assert_eq!(node.current_angle(Axis::V), 180.0);
    }

    #[test]
    fn current_angle_does_not_touch_rest() {
        let mut graph = SceneGraph::new();
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_default_angle(joint, Axis::U, -90.0).unwrap();
        graph.set_current_angle(joint, Axis::U, -60.0).unwrap();
        let node = graph.node(joint).unwrap();
        assert_eq!(node.rest_angle(Axis::U), -90.0);
        assert_eq!(node.current_angle(Axis::U), -60.0);
    }

    #[test]
    fn reversed_extent_is_normalized() {
        let mut graph = SceneGraph::new();
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_rotate_extent(joint, Axis::U, 40.0, -40.0).unwrap();
        assert_eq!(graph.node(joint).unwrap().rotate_extent(Axis::U), [-40.0, 40.0]);
    }

    #[test]
    fn installing_extent_leaves_out_of_range_pose_alone() {
        // A rest pose of -90 must survive a later [0, 35] extent; only the
        // next mutation clamps.
        let mut graph = SceneGraph::new();
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_default_angle(joint, Axis::U, -90.0).unwrap();
        graph.set_rotate_extent(joint, Axis::U, 0.0, 35.0).unwrap();
        assert_eq!(graph.node(joint).unwrap().current_angle(Axis::U), -90.0);
    }

    #[test]
    fn update_propagates_translations() {
        let mut graph = SceneGraph::new();
        let parent = graph.insert(Node::pivot(vec3(1.0, 0.0, 0.0)));
        let child = graph.insert(Node::pivot(vec3(0.0, 1.0, 0.0)));
        graph.add_child(parent, child).unwrap();

        graph.update(parent, Mat4::IDENTITY).unwrap();

        let p = graph.world_position(child).unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 1.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn rotation_composes_before_parent_translation() {
        // Parent yaws 90 about v; a child at +Z lands on +X.
        let mut graph = SceneGraph::new();
        let parent = graph.insert(Node::pivot(Vec3::ZERO));
        let child = graph.insert(Node::pivot(vec3(0.0, 0.0, 1.0)));
        graph.add_child(parent, child).unwrap();
        graph.set_current_angle(parent, Axis::V, 90.0).unwrap();

        graph.update(parent, Mat4::IDENTITY).unwrap();

        let p = graph.world_position(child).unwrap();
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn update_is_idempotent() {
        let mut graph = SceneGraph::new();
        let parent = graph.insert(Node::pivot(vec3(0.3, -0.1, 2.0)));
        let child = graph.insert(Node::pivot(vec3(0.0, 1.0, 0.0)).scaled(vec3(2.0, 1.0, 0.5)));
        graph.add_child(parent, child).unwrap();
        graph.set_current_angle(parent, Axis::U, 33.0).unwrap();
        graph.set_current_angle(child, Axis::W, -12.0).unwrap();

        graph.update(parent, Mat4::IDENTITY).unwrap();
        let first = graph.world_matrix(child).unwrap();
        graph.update(parent, Mat4::IDENTITY).unwrap();
        let second = graph.world_matrix(child).unwrap();

        assert_eq!(first.to_cols_array(), second.to_cols_array());
    }

    #[test]
    fn pose_overwrites_feed_the_next_update() {
        let mut graph = SceneGraph::new();
        let node = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_position(node, vec3(0.0, 3.0, 0.0)).unwrap();
        graph.set_scaling(node, vec3(2.0, 2.0, 2.0)).unwrap();
        graph.update(node, Mat4::IDENTITY).unwrap();

        let world = graph.world_matrix(node).unwrap();
        assert_relative_eq!(world.w_axis.y, 3.0);
        assert_relative_eq!(world.x_axis.x, 2.0);
    }

    #[test]
    fn second_parent_is_rejected() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(Node::pivot(Vec3::ZERO));
        let b = graph.insert(Node::pivot(Vec3::ZERO));
        let child = graph.insert(Node::pivot(Vec3::ZERO));
        graph.add_child(a, child).unwrap();
        assert!(matches!(
            graph.add_child(b, child),
            Err(SceneError::AlreadyParented(_))
        ));
    }

    #[test]
    fn cycles_are_rejected() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Node::pivot(Vec3::ZERO));
        let mid = graph.insert(Node::pivot(Vec3::ZERO));
        graph.add_child(root, mid).unwrap();
        assert!(matches!(
            graph.add_child(mid, root),
            Err(SceneError::WouldCycle { .. })
        ));
        assert!(matches!(
            graph.add_child(root, root),
            Err(SceneError::WouldCycle { .. })
        ));
    }

    #[test]
    fn draw_collection_passes_through_pivots() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Node::pivot(Vec3::ZERO));
        let shape = graph.insert(Node::shape(
            vec3(0.0, 2.0, 0.0),
            ShapeDesc::sphere(Vec3::ONE, Color::WHITE),
        ));
        graph.add_child(root, shape).unwrap();
        graph.update(root, Mat4::IDENTITY).unwrap();

        let mut draws = Vec::new();
        graph.collect_draws(root, &mut draws).unwrap();
        assert_eq!(draws.len(), 1);
        assert_relative_eq!(draws[0].world.w_axis.y, 2.0);
    }

    #[test]
    fn reset_color_restores_construction_default() {
        let mut graph = SceneGraph::new();
        let shape = graph.insert(Node::shape(
            Vec3::ZERO,
            ShapeDesc::cube(Vec3::ONE, Color::SEA_GREEN),
        ));
        graph.set_color(shape, Color::YELLOW).unwrap();
        assert_eq!(graph.node(shape).unwrap().shape_desc().unwrap().color, Color::YELLOW);

        graph.reset(shape, ResetTarget::Color).unwrap();
        assert_eq!(
            graph.node(shape).unwrap().shape_desc().unwrap().color,
            Color::SEA_GREEN
        );
    }

    #[test]
    fn reset_pose_returns_to_rest_angles() {
        let mut graph = SceneGraph::new();
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_default_angle(joint, Axis::U, 45.0).unwrap();
        graph.rotate(joint, Axis::U, 30.0).unwrap();
        graph.reset(joint, ResetTarget::Pose).unwrap();
        assert_eq!(graph.node(joint).unwrap().current_angle(Axis::U), 45.0);
    }

    #[test]
    fn remove_subtree_frees_every_descendant() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Node::pivot(Vec3::ZERO));
        let limb = graph.insert(Node::pivot(Vec3::ZERO));
        let tip = graph.insert(Node::pivot(Vec3::ZERO));
        graph.add_child(root, limb).unwrap();
        graph.add_child(limb, tip).unwrap();

        let freed = graph.remove_subtree(limb).unwrap();
        assert_eq!(freed, 2);
        assert!(graph.contains(root));
        assert!(!graph.contains(limb));
        assert!(!graph.contains(tip));
        assert!(graph.node(root).unwrap().children().is_empty());
        assert!(matches!(
            graph.rotate(tip, Axis::U, 1.0),
            Err(SceneError::UnknownNode(_))
        ));
    }
}

//! Creature skeletons: rig plumbing shared by every species, plus the
//! [`Predator`] and [`Prey`] assemblies.
//!
//! A creature is a fixed topology of scene nodes wired up at build time.
//! Builders register every joint they create under a stable name
//! (`left_`/`right_` prefixes for mirrored limbs, body-part suffixes), and
//! fetch their animated joints back through that registry before the build
//! returns — so a missing mirror or a misnamed joint fails construction,
//! not the first frame of animation.

mod predator;
mod prey;

pub use predator::Predator;
pub use prey::Prey;

use std::collections::HashMap;

use glam::{Vec3, vec3};

use crate::node::{Axis, Node, NodeKey, SceneError, SceneGraph};
use crate::shape::ShapeDesc;

/// A built skeleton: the root key, the flat list of registered parts, and
/// the name→key joint registry used for external addressing.
#[derive(Clone, Debug)]
pub struct Rig {
    root: NodeKey,
    components: Vec<NodeKey>,
    joints: HashMap<String, NodeKey>,
}

impl Rig {
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Every registered part, in creation order (pure pivots excluded).
    pub fn components(&self) -> &[NodeKey] {
        &self.components
    }

    /// Look up a joint by its local name.
    pub fn joint(&self, name: &str) -> Result<NodeKey, SceneError> {
        self.joints
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::NameNotFound(name.to_string()))
    }

    /// All `(local name, key)` pairs, for registry building.
    pub fn joint_entries(&self) -> impl Iterator<Item = (&str, NodeKey)> {
        self.joints.iter().map(|(name, &key)| (name.as_str(), key))
    }
}

/// Incrementally wires a skeleton into a [`SceneGraph`], keeping the
/// part list and joint registry in sync with the tree.
pub struct RigBuilder<'g> {
    graph: &'g mut SceneGraph,
    root: NodeKey,
    components: Vec<NodeKey>,
    joints: HashMap<String, NodeKey>,
}

impl<'g> RigBuilder<'g> {
    /// Start a rig whose root is a pure pivot at `position`.
    pub fn new(graph: &'g mut SceneGraph, position: Vec3) -> Self {
        let root = graph.insert(Node::pivot(position));
        Self {
            graph,
            root,
            components: Vec::new(),
            joints: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn graph(&mut self) -> &mut SceneGraph {
        self.graph
    }

    /// Registered parts so far.
    pub fn components(&self) -> &[NodeKey] {
        &self.components
    }

    /// Look up a part registered earlier in this build.
    pub fn key(&self, name: &str) -> Result<NodeKey, SceneError> {
        self.joints
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::NameNotFound(name.to_string()))
    }

    /// Attach an unregistered grouping pivot under `parent`.
    pub fn pivot(&mut self, parent: NodeKey, position: Vec3) -> Result<NodeKey, SceneError> {
        let key = self.graph.insert(Node::pivot(position));
        self.graph.add_child(parent, key)?;
        Ok(key)
    }

    /// Attach `node` under `parent` and register it as `name`.
    pub fn attach(
        &mut self,
        parent: NodeKey,
        name: &str,
        node: Node,
    ) -> Result<NodeKey, SceneError> {
        let key = self.graph.insert(node.named(name));
        self.graph.add_child(parent, key)?;
        self.components.push(key);
        self.joints.insert(name.to_string(), key);
        Ok(key)
    }

    /// Build a left/right pair from one canonical definition.
    ///
    /// The left instance uses `position` and `angles = (au, av, aw)`
    /// verbatim; the right instance reflects laterally: position
    /// `(-x, y, z)` and angles `(au, -av, -aw)` — `v` and `w` flip parity
    /// under the mirror, `u` does not. The pair is registered as
    /// `left_<name>` / `right_<name>` under `parents[0]` / `parents[1]`.
    pub fn mirror(
        &mut self,
        parents: [NodeKey; 2],
        name: &str,
        shape: ShapeDesc,
        position: Vec3,
        angles: [f32; 3],
    ) -> Result<[NodeKey; 2], SceneError> {
        let [au, av, aw] = angles;
        let left = self.attach(
            parents[0],
            &format!("left_{name}"),
            Node::shape(position, shape),
        )?;
        let right = self.attach(
            parents[1],
            &format!("right_{name}"),
            Node::shape(vec3(-position.x, position.y, position.z), shape),
        )?;
        for (key, pose) in [(left, [au, av, aw]), (right, [au, -av, -aw])] {
            for (axis, angle) in Axis::ALL.into_iter().zip(pose) {
                if angle != 0.0 {
                    self.graph.set_default_angle(key, axis, angle)?;
                }
            }
        }
        Ok([left, right])
    }

    /// Finish the build and hand the rig over.
    pub fn finish(self) -> Rig {
        Rig {
            root: self.root,
            components: self.components,
            joints: self.joints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use approx::assert_relative_eq;

    #[test]
    fn mirror_reflects_position_and_angle_parity() {
        let mut graph = SceneGraph::new();
        let mut rig = RigBuilder::new(&mut graph, Vec3::ZERO);
        let root = rig.root();

        let [left, right] = rig
            .mirror(
                [root, root],
                "eyeball",
                ShapeDesc::sphere(Vec3::splat(0.04), Color::WHITE),
                vec3(0.04, 0.0, 0.12),
                [0.0, 30.0, -10.0],
            )
            .unwrap();

        let l = graph.node(left).unwrap();
        assert_relative_eq!(l.position().x, 0.04);
        assert_relative_eq!(l.position().z, 0.12);
        assert_eq!(l.rest_angle(Axis::U), 0.0);
        assert_eq!(l.rest_angle(Axis::V), 30.0);
        assert_eq!(l.rest_angle(Axis::W), -10.0);

        let r = graph.node(right).unwrap();
        assert_relative_eq!(r.position().x, -0.04);
        assert_relative_eq!(r.position().y, 0.0);
        assert_relative_eq!(r.position().z, 0.12);
        assert_eq!(r.rest_angle(Axis::U), 0.0);
        assert_eq!(r.rest_angle(Axis::V), -30.0);
        assert_eq!(r.rest_angle(Axis::W), 10.0);
    }

    #[test]
    fn mirror_registers_both_sides() {
        let mut graph = SceneGraph::new();
        let mut rig = RigBuilder::new(&mut graph, Vec3::ZERO);
        let root = rig.root();
        rig.mirror(
            [root, root],
            "ear",
            ShapeDesc::sphere(Vec3::splat(0.02), Color::PINK),
            vec3(0.1, 0.0, 0.0),
            [0.0, 0.0, 0.0],
        )
        .unwrap();
        let rig = rig.finish();

        assert!(rig.joint("left_ear").is_ok());
        assert!(rig.joint("right_ear").is_ok());
        assert!(matches!(
            rig.joint("middle_ear"),
            Err(SceneError::NameNotFound(_))
        ));
        assert_eq!(rig.components().len(), 2);
    }

    #[test]
    fn attach_builds_the_tree_and_the_registry_together() {
        let mut graph = SceneGraph::new();
        let mut rig = RigBuilder::new(&mut graph, vec3(1.0, 0.0, 0.0));
        let root = rig.root();
        let joint = rig
            .attach(
                root,
                "joint0",
                Node::shape(Vec3::ZERO, ShapeDesc::sphere(Vec3::ONE, Color::WHITE)),
            )
            .unwrap();
        assert_eq!(rig.key("joint0").unwrap(), joint);
        assert_eq!(graph.node(joint).unwrap().parent(), Some(root));
        assert_eq!(graph.node(joint).unwrap().name(), Some("joint0"));
    }
}

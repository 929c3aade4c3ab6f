//! The vivarium: the tank volume, the creature population, and the
//! per-frame driver that ties animation to the scene graph update.

use std::collections::HashMap;

use glam::{Mat4, Vec3, vec3};

use crate::creatures::{Predator, Prey};
use crate::environment::{EnvironmentObject, SiblingState, StepContext};
use crate::node::{Node, NodeKey, SceneError, SceneGraph};
use crate::shape::{DrawCommand, ShapeDesc};
use crate::color::Color;

struct CreatureEntry {
    name: Option<String>,
    object: Box<dyn EnvironmentObject>,
}

/// Top-level container for the whole scene.
///
/// The vivarium owns the [`SceneGraph`], the tank frame, an ordered list
/// of top-level components (the tank first, then creature roots in
/// registration order), and two lookup tables: instance name → creature
/// root, and `"<joint>_<instance>"` → joint key, for external tools that
/// address a specific joint by a human-readable name.
pub struct Vivarium {
    graph: SceneGraph,
    root: NodeKey,
    tank: NodeKey,
    tank_dimensions: Vec3,
    components: Vec<NodeKey>,
    creatures: Vec<CreatureEntry>,
    instances: HashMap<String, NodeKey>,
    joints: HashMap<String, NodeKey>,
}

impl Vivarium {
    /// An empty tank with the given full edge lengths.
    pub fn new(tank_dimensions: Vec3) -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Node::pivot(Vec3::ZERO));
        let tank = build_tank(&mut graph, tank_dimensions);
        graph
            .add_child(root, tank)
            .expect("fresh tank node cannot already be parented");
        graph
            .update(root, Mat4::IDENTITY)
            .expect("fresh graph update cannot fail");
        Self {
            graph,
            root,
            tank,
            tank_dimensions,
            components: vec![tank],
            creatures: Vec::new(),
            instances: HashMap::new(),
            joints: HashMap::new(),
        }
    }

    /// The default population: two prey and one predator.
    pub fn populated(tank_dimensions: Vec3) -> Result<Self, SceneError> {
        let mut vivarium = Self::new(tank_dimensions);
        let prey0 = Prey::build(&mut vivarium.graph, vec3(1.0, 1.0, 1.0), 1.0)?;
        vivarium.add_creature(Box::new(prey0), Some("prey0"))?;
        let prey1 = Prey::build(&mut vivarium.graph, vec3(-1.0, 1.0, 1.0), 1.0)?;
        vivarium.add_creature(Box::new(prey1), Some("prey1"))?;
        let predator0 = Predator::build(&mut vivarium.graph, Vec3::ZERO, 1.0)?;
        vivarium.add_creature(Box::new(predator0), Some("predator0"))?;
        Ok(vivarium)
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Full edge lengths of the tank volume.
    pub fn tank_dimensions(&self) -> Vec3 {
        self.tank_dimensions
    }

    /// Top-level components: the tank, then creature roots in
    /// registration order.
    pub fn components(&self) -> &[NodeKey] {
        &self.components
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    /// Registered instance names, in registration order.
    pub fn creature_names(&self) -> Vec<&str> {
        self.creatures
            .iter()
            .filter_map(|entry| entry.name.as_deref())
            .collect()
    }

    /// Look up a creature by instance name.
    pub fn creature(&self, name: &str) -> Result<&dyn EnvironmentObject, SceneError> {
        let root = *self
            .instances
            .get(name)
            .ok_or_else(|| SceneError::NameNotFound(name.to_string()))?;
        self.creatures
            .iter()
            .find(|entry| entry.object.rig().root() == root)
            .map(|entry| entry.object.as_ref())
            .ok_or_else(|| SceneError::NameNotFound(name.to_string()))
    }

    /// Look up a joint by its qualified `"<joint>_<instance>"` name.
    pub fn joint(&self, qualified: &str) -> Result<NodeKey, SceneError> {
        self.joints
            .get(qualified)
            .copied()
            .ok_or_else(|| SceneError::NameNotFound(qualified.to_string()))
    }

    /// Every qualified joint name, sorted, for interactive tools.
    pub fn joint_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.joints.keys().cloned().collect();
        names.sort();
        names
    }

    /// Put a creature in the tank.
    ///
    /// The creature's root becomes a child of the tank node and joins the
    /// component list. A named creature additionally registers itself and
    /// every rig joint (qualified as `"<joint>_<name>"`) in the lookup
    /// tables; names must be unique.
    pub fn add_creature(
        &mut self,
        object: Box<dyn EnvironmentObject>,
        name: Option<&str>,
    ) -> Result<(), SceneError> {
        if let Some(name) = name
            && self.instances.contains_key(name)
        {
            return Err(SceneError::NameTaken(name.to_string()));
        }
        let root = object.rig().root();
        self.graph.add_child(self.tank, root)?;
        self.components.push(root);
        if let Some(name) = name {
            self.instances.insert(name.to_string(), root);
            for (joint, key) in object.rig().joint_entries() {
                self.joints.insert(format!("{joint}_{name}"), key);
            }
            log::info!("added creature '{name}' to the tank");
        }
        self.creatures.push(CreatureEntry {
            name: name.map(str::to_string),
            object,
        });
        // Give the newcomer a valid world transform before the next draw.
        self.graph.update(self.root, Mat4::IDENTITY)
    }

    /// Remove a creature by instance name, freeing its subtree and
    /// purging exactly its lookup entries.
    pub fn remove_creature(&mut self, name: &str) -> Result<(), SceneError> {
        let root = self
            .instances
            .remove(name)
            .ok_or_else(|| SceneError::NameNotFound(name.to_string()))?;
        let index = self
            .creatures
            .iter()
            .position(|entry| entry.object.rig().root() == root)
            .ok_or_else(|| SceneError::NameNotFound(name.to_string()))?;
        let entry = self.creatures.remove(index);
        for (joint, _) in entry.object.rig().joint_entries() {
            self.joints.remove(&format!("{joint}_{name}"));
        }
        self.components.retain(|&key| key != root);
        let freed = self.graph.remove_subtree(root)?;
        log::info!("removed creature '{name}' ({freed} nodes)");
        Ok(())
    }

    /// Drive one frame of simulation.
    ///
    /// Creatures run in reverse registration order — safe against
    /// creature removal once `step_forward` learns to eat things — with
    /// `animation_update` then `step_forward` on each, handed a read-only
    /// snapshot of the population. One update pass over the whole tree
    /// then resolves every world matrix.
    pub fn animation_update(&mut self) -> Result<(), SceneError> {
        let mut siblings = Vec::with_capacity(self.creatures.len());
        for entry in &self.creatures {
            let root = entry.object.rig().root();
            siblings.push(SiblingState {
                root,
                species: entry.object.species(),
                position: self.graph.world_position(root)?,
                bound_radius: entry.object.bound_radius(),
            });
        }
        let ctx = StepContext {
            tank_dimensions: self.tank_dimensions,
            siblings: &siblings,
        };
        for entry in self.creatures.iter_mut().rev() {
            entry.object.animation_update(&mut self.graph)?;
            entry.object.step_forward(&mut self.graph, &ctx)?;
        }
        self.graph.update(self.root, Mat4::IDENTITY)
    }

    /// Collect this frame's draw list from the whole tree.
    pub fn collect_draws(&self, out: &mut Vec<DrawCommand>) -> Result<(), SceneError> {
        self.graph.collect_draws(self.root, out)
    }
}

/// The tank: a wireframe box assembled from twelve thin beams, so it
/// renders with the same primitive pipeline as everything else.
fn build_tank(graph: &mut SceneGraph, dimensions: Vec3) -> NodeKey {
    let tank = graph.insert(Node::pivot(Vec3::ZERO));
    let half = dimensions * 0.5;
    let girth = 0.02;
    let mut beam = |position: Vec3, extents: Vec3| {
        let edge = graph.insert(Node::shape(
            position,
            ShapeDesc::cube(extents, Color::GLASS),
        ));
        graph
            .add_child(tank, edge)
            .expect("fresh beam cannot already be parented");
    };
    for sy in [-1.0, 1.0] {
        for sz in [-1.0, 1.0] {
            beam(
                vec3(0.0, sy * half.y, sz * half.z),
                vec3(half.x + girth, girth, girth),
            );
        }
    }
    for sx in [-1.0, 1.0] {
        for sz in [-1.0, 1.0] {
            beam(
                vec3(sx * half.x, 0.0, sz * half.z),
                vec3(girth, half.y + girth, girth),
            );
        }
    }
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            beam(
                vec3(sx * half.x, sy * half.y, 0.0),
                vec3(girth, girth, half.z + girth),
            );
        }
    }
    tank
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatures::{Rig, RigBuilder};
    use crate::environment::Species;
    use crate::node::Axis;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TANK: Vec3 = Vec3::splat(4.0);

    #[test]
    fn tank_is_twelve_beams() {
        let vivarium = Vivarium::new(TANK);
        let mut draws = Vec::new();
        vivarium.collect_draws(&mut draws).unwrap();
        assert_eq!(draws.len(), 12);
    }

    #[test]
    fn add_then_remove_restores_every_registry() {
        let mut vivarium = Vivarium::new(TANK);
        let baseline_nodes = vivarium.graph().len();
        let baseline_components = vivarium.components().len();

        let prey = Prey::build(vivarium.graph_mut(), vec3(1.0, 1.0, 1.0), 1.0).unwrap();
        vivarium.add_creature(Box::new(prey), Some("george")).unwrap();

        assert_eq!(vivarium.creature_count(), 1);
        assert_eq!(vivarium.components().len(), baseline_components + 1);
        assert!(vivarium.joint("head_george").is_ok());
        assert!(vivarium.creature("george").is_ok());

        vivarium.remove_creature("george").unwrap();

        assert_eq!(vivarium.creature_count(), 0);
        assert_eq!(vivarium.components().len(), baseline_components);
        assert_eq!(vivarium.graph().len(), baseline_nodes);
        assert!(vivarium.joint_names().is_empty());
        assert!(matches!(
            vivarium.joint("head_george"),
            Err(SceneError::NameNotFound(_))
        ));
        assert!(matches!(
            vivarium.creature("george"),
            Err(SceneError::NameNotFound(_))
        ));
    }

    #[test]
    fn removing_one_creature_leaves_the_other_addressable() {
        let mut vivarium = Vivarium::populated(TANK).unwrap();
        vivarium.remove_creature("prey0").unwrap();
        assert!(vivarium.joint("head_prey1").is_ok());
        assert!(vivarium.joint("left_fore_leg_limb0_predator0").is_ok());
        assert!(matches!(
            vivarium.joint("head_prey0"),
            Err(SceneError::NameNotFound(_))
        ));
    }

    #[test]
    fn duplicate_instance_names_are_rejected() {
        let mut vivarium = Vivarium::new(TANK);
        let first = Prey::build(vivarium.graph_mut(), Vec3::ZERO, 1.0).unwrap();
        vivarium.add_creature(Box::new(first), Some("twin")).unwrap();
        let second = Prey::build(vivarium.graph_mut(), Vec3::ONE, 1.0).unwrap();
        assert!(matches!(
            vivarium.add_creature(Box::new(second), Some("twin")),
            Err(SceneError::NameTaken(_))
        ));
    }

    struct Probe {
        rig: Rig,
        tag: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        siblings_seen: Rc<RefCell<usize>>,
    }

    impl Probe {
        fn new(
            vivarium: &mut Vivarium,
            tag: &'static str,
            log: Rc<RefCell<Vec<&'static str>>>,
        ) -> Self {
            let rig = RigBuilder::new(vivarium.graph_mut(), Vec3::ZERO).finish();
            Self {
                rig,
                tag,
                log,
                siblings_seen: Rc::new(RefCell::new(0)),
            }
        }
    }

    impl EnvironmentObject for Probe {
        fn rig(&self) -> &Rig {
            &self.rig
        }

        fn species(&self) -> Species {
            Species::Prey
        }

        fn bound_radius(&self) -> f32 {
            0.1
        }

        fn animation_update(&mut self, _graph: &mut SceneGraph) -> Result<(), SceneError> {
            self.log.borrow_mut().push(self.tag);
            Ok(())
        }

        fn step_forward(
            &mut self,
            _graph: &mut SceneGraph,
            ctx: &StepContext<'_>,
        ) -> Result<(), SceneError> {
            *self.siblings_seen.borrow_mut() = ctx.siblings.len();
            Ok(())
        }
    }

    #[test]
    fn creatures_update_in_reverse_registration_order() {
        let mut vivarium = Vivarium::new(TANK);
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = Probe::new(&mut vivarium, "first", Rc::clone(&log));
        let second = Probe::new(&mut vivarium, "second", Rc::clone(&log));
        let seen = Rc::clone(&second.siblings_seen);
        vivarium.add_creature(Box::new(first), Some("a")).unwrap();
        vivarium.add_creature(Box::new(second), Some("b")).unwrap();

        vivarium.animation_update().unwrap();

        assert_eq!(*log.borrow(), vec!["second", "first"]);
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn animation_update_resolves_world_positions() {
        let mut vivarium = Vivarium::populated(TANK).unwrap();
        vivarium.animation_update().unwrap();
        let head = vivarium.joint("head_prey0").unwrap();
        let position = vivarium.graph().world_position(head).unwrap();
        // prey0 was planted at (1, 1, 1); its head stays near the root.
        assert_relative_eq!(position.x, 1.0, epsilon = 0.6);
        assert_relative_eq!(position.y, 1.0, epsilon = 0.6);
    }

    #[test]
    fn populated_tank_holds_three_creatures() {
        let vivarium = Vivarium::populated(TANK).unwrap();
        assert_eq!(vivarium.creature_count(), 3);
        assert_eq!(vivarium.creature_names(), vec!["prey0", "prey1", "predator0"]);
        assert_eq!(vivarium.components().len(), 4);
        // The whole predator skeleton is addressable.
        assert!(vivarium.joint("tail1_predator0").is_ok());
        let predator = vivarium.creature("predator0").unwrap();
        assert_eq!(predator.species(), Species::Predator);
    }

    #[test]
    fn oscillating_joint_respects_its_extent_through_the_driver() {
        let mut vivarium = Vivarium::populated(TANK).unwrap();
        let lower = vivarium.joint("left_fore_leg_limb1_predator0").unwrap();
        for _ in 0..60 {
            vivarium.animation_update().unwrap();
            let angle = vivarium
                .graph()
                .node(lower)
                .unwrap()
                .current_angle(Axis::U);
            assert!((-20.0..=0.0).contains(&angle), "angle {angle} escaped");
        }
    }
}

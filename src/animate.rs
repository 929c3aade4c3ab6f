//! Per-joint periodic animation: constant angular velocity reflected at
//! the joint's rotation extents.

use crate::node::{Axis, NodeKey, SceneError, SceneGraph};

/// Drives one joint back and forth inside its rotation extents.
///
/// Each frame the oscillator adds its per-axis velocity to the joint's
/// angles via [`SceneGraph::rotate`], then reverses the sign of any
/// component whose *next* step would reach or leave the installed extent.
/// The rule is uniform across all three axes. Against extents the
/// clamped rotation can never overshoot, so the reflection fires exactly
/// once per end of travel and the joint walks a triangle wave between its
/// limits.
#[derive(Clone, Debug)]
pub struct JointOscillator {
    joint: NodeKey,
    velocity: [f32; 3],
}

impl JointOscillator {
    /// Velocity components are in degrees per frame, one per `u`/`v`/`w`
    /// axis; zero components leave their axis untouched.
    pub fn new(joint: NodeKey, velocity: [f32; 3]) -> Self {
        Self { joint, velocity }
    }

    pub fn joint(&self) -> NodeKey {
        self.joint
    }

    pub fn velocity(&self) -> [f32; 3] {
        self.velocity
    }

    /// Advance the joint by one frame.
    pub fn advance(&mut self, graph: &mut SceneGraph) -> Result<(), SceneError> {
        for axis in Axis::ALL {
            let i = axis.index();
            let velocity = self.velocity[i];
            if velocity == 0.0 {
                continue;
            }
            graph.rotate(self.joint, axis, velocity)?;
            let node = graph.node(self.joint)?;
            let angle = node.current_angle(axis);
            let [lo, hi] = node.rotate_extent(axis);
            let next = angle + velocity;
            if next >= hi || next <= lo {
                self.velocity[i] = -velocity;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use glam::Vec3;

    fn bounded_joint(graph: &mut SceneGraph, lo: f32, hi: f32) -> NodeKey {
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_rotate_extent(joint, Axis::U, lo, hi).unwrap();
        joint
    }

    #[test]
    fn reverses_exactly_once_at_the_limit() {
        let mut graph = SceneGraph::new();
        let joint = bounded_joint(&mut graph, -10.0, 10.0);
        graph.set_current_angle(joint, Axis::U, 8.0).unwrap();
        let mut osc = JointOscillator::new(joint, [2.0, 0.0, 0.0]);

        osc.advance(&mut graph).unwrap();
        assert_eq!(graph.node(joint).unwrap().current_angle(Axis::U), 10.0);
        assert_eq!(osc.velocity()[0], -2.0);

        osc.advance(&mut graph).unwrap();
        assert_eq!(graph.node(joint).unwrap().current_angle(Axis::U), 8.0);
        assert_eq!(osc.velocity()[0], -2.0);
    }

    #[test]
    fn sweeps_the_full_extent_and_back() {
        let mut graph = SceneGraph::new();
        let joint = bounded_joint(&mut graph, -4.0, 4.0);
        let mut osc = JointOscillator::new(joint, [2.0, 0.0, 0.0]);

        let mut trace = Vec::new();
        for _ in 0..8 {
            osc.advance(&mut graph).unwrap();
            trace.push(graph.node(joint).unwrap().current_angle(Axis::U));
        }
        assert_eq!(trace, vec![2.0, 4.0, 2.0, 0.0, -2.0, -4.0, -2.0, 0.0]);
    }

    #[test]
    fn angles_never_leave_the_extent() {
        let mut graph = SceneGraph::new();
        let joint = bounded_joint(&mut graph, -7.0, 13.0);
        // Deliberately not a divisor of the span.
        let mut osc = JointOscillator::new(joint, [3.0, 0.0, 0.0]);
        for _ in 0..100 {
            osc.advance(&mut graph).unwrap();
            let angle = graph.node(joint).unwrap().current_angle(Axis::U);
            assert!((-7.0..=13.0).contains(&angle), "angle {angle} escaped");
        }
    }

    #[test]
    fn axes_oscillate_independently() {
        let mut graph = SceneGraph::new();
        let joint = graph.insert(Node::pivot(Vec3::ZERO));
        graph.set_rotate_extent(joint, Axis::U, -5.0, 5.0).unwrap();
        graph.set_rotate_extent(joint, Axis::W, -90.0, 90.0).unwrap();
        let mut osc = JointOscillator::new(joint, [5.0, 0.0, 1.0]);

        osc.advance(&mut graph).unwrap();
        // u hit its limit and reversed; w is far from its own.
        assert_eq!(osc.velocity()[0], -5.0);
        assert_eq!(osc.velocity()[2], 1.0);
        assert_eq!(graph.node(joint).unwrap().current_angle(Axis::V), 0.0);
    }
}

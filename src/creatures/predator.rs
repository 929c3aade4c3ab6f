//! The predator: a long-tailed, four-legged hunter with a crest of dorsal
//! stubs. Walks on two-segment legs driven by oscillators while the whole
//! body drifts in a slow spin.

use glam::{Vec3, vec3};

use crate::animate::JointOscillator;
use crate::color::Color;
use crate::creatures::{Rig, RigBuilder};
use crate::environment::{EnvironmentObject, Species};
use crate::node::{Axis, Node, NodeKey, SceneError, SceneGraph};
use crate::shape::ShapeDesc;

/// Degrees per frame the whole creature yaws about its root.
const ROOT_SPIN: f32 = 3.0;

/// Leg segment swing speeds, degrees per frame.
const SWING_UPPER: f32 = 2.0;
const SWING_LOWER: f32 = 1.0;

pub struct Predator {
    rig: Rig,
    oscillators: Vec<JointOscillator>,
    size: f32,
}

impl Predator {
    /// Assemble a predator skeleton at `position`, uniformly scaled by
    /// `size`, and wire up its gait oscillators.
    pub fn build(graph: &mut SceneGraph, position: Vec3, size: f32) -> Result<Self, SceneError> {
        let mut rig = RigBuilder::new(graph, position);
        let root = rig.root();

        let torso = rig.pivot(root, vec3(0.0, -0.04, 0.0) * size)?;
        build_body(&mut rig, torso, size)?;
        let body = rig.key("body")?;
        build_tail(&mut rig, body, size)?;
        build_neck(&mut rig, body, size)?;
        let neck1 = rig.key("neck1")?;
        build_head(&mut rig, neck1, size)?;

        build_leg(&mut rig, body, "fore", vec3(0.04, 0.0, 0.12) * size, false, size)?;
        build_leg(&mut rig, body, "fore", vec3(-0.04, 0.0, 0.12) * size, true, size)?;
        build_leg(&mut rig, body, "hind", vec3(0.04, 0.0, -0.06) * size, false, size)?;
        build_leg(&mut rig, body, "hind", vec3(-0.04, 0.0, -0.06) * size, true, size)?;

        // Gait limits, uniform across the four legs.
        for stage in ["fore", "hind"] {
            for side in ["left", "right"] {
                let upper = rig.key(&format!("{side}_{stage}_leg_limb0"))?;
                rig.graph().set_rotate_extent(upper, Axis::U, -40.0, 40.0)?;
                rig.graph().set_rotate_extent(upper, Axis::V, -90.0, 90.0)?;
                rig.graph().set_rotate_extent(upper, Axis::W, -60.0, 60.0)?;

                let lower = rig.key(&format!("{side}_{stage}_leg_limb1"))?;
                rig.graph().set_rotate_extent(lower, Axis::U, -20.0, 0.0)?;
                rig.graph().set_rotate_extent(lower, Axis::V, -90.0, 90.0)?;
                rig.graph().set_rotate_extent(lower, Axis::W, -60.0, 60.0)?;
            }
        }

        let rig = rig.finish();

        // Diagonal gait: fore-left and hind-right swing together.
        let mut oscillators = Vec::new();
        for (joint, speed) in [
            ("left_fore_leg_limb0", SWING_UPPER),
            ("left_fore_leg_limb1", -SWING_LOWER),
            ("right_fore_leg_limb0", -SWING_UPPER),
            ("right_fore_leg_limb1", -SWING_LOWER),
            ("left_hind_leg_limb0", -SWING_UPPER),
            ("left_hind_leg_limb1", -SWING_LOWER),
            ("right_hind_leg_limb0", SWING_UPPER),
            ("right_hind_leg_limb1", -SWING_LOWER),
        ] {
            oscillators.push(JointOscillator::new(rig.joint(joint)?, [speed, 0.0, 0.0]));
        }

        Ok(Self {
            rig,
            oscillators,
            size,
        })
    }
}

impl EnvironmentObject for Predator {
    fn rig(&self) -> &Rig {
        &self.rig
    }

    fn species(&self) -> Species {
        Species::Predator
    }

    fn bound_radius(&self) -> f32 {
        0.9 * self.size
    }

    fn animation_update(&mut self, graph: &mut SceneGraph) -> Result<(), SceneError> {
        for osc in &mut self.oscillators {
            osc.advance(graph)?;
        }
        let root = self.rig.root();
        let spin = graph.node(root)?.current_angle(Axis::V);
        graph.set_current_angle(root, Axis::V, (spin + ROOT_SPIN) % 360.0)
    }
}

fn build_body(rig: &mut RigBuilder, parent: NodeKey, size: f32) -> Result<(), SceneError> {
    let body = rig.attach(
        parent,
        "body",
        Node::shape(
            Vec3::ZERO,
            ShapeDesc::sphere(vec3(0.16, 0.16, 0.25) * size, Color::SEA_GREEN),
        ),
    )?;
    rig.attach(
        body,
        "white_body",
        Node::shape(
            vec3(0.0, -0.04, 0.02) * size,
            ShapeDesc::sphere(vec3(0.14, 0.14, 0.23) * size, Color::WHITE),
        ),
    )?;

    // Dorsal crest running down the spine.
    let stub_size = [0.033, 0.034, 0.033, 0.032];
    let stub_y = [0.14, 0.138, 0.105, 0.04];
    let stub_z = [0.05, -0.03, -0.12, -0.18];
    let stub_pitch = [-90.0, -100.0, -120.0, -150.0];
    for i in 0..4 {
        let stub = rig.attach(
            body,
            &format!("body_stub{i}"),
            Node::shape(
                vec3(0.0, stub_y[i], stub_z[i]) * size,
                ShapeDesc::cone(
                    vec3(0.01, stub_size[i], stub_size[i]) * size,
                    Color::GREEN_YELLOW,
                ),
            ),
        )?;
        rig.graph().set_current_angle(stub, Axis::U, stub_pitch[i])?;
    }
    Ok(())
}

fn build_tail(rig: &mut RigBuilder, parent: NodeKey, size: f32) -> Result<(), SceneError> {
    let pivot = rig.pivot(parent, vec3(0.0, -0.02, -0.02) * size)?;
    let tail0 = rig.attach(
        pivot,
        "tail0",
        Node::shape(
            Vec3::ZERO,
            ShapeDesc::cone(vec3(0.08, 0.08, 0.10) * size, Color::SEA_GREEN),
        ),
    )?;
    rig.graph().set_current_angle(tail0, Axis::U, -200.0)?;
    rig.attach(
        tail0,
        "white_tail0",
        Node::shape(
            vec3(0.0, 0.02, 0.0) * size,
            ShapeDesc::cone(vec3(0.06, 0.06, 0.08) * size, Color::WHITE),
        ),
    )?;
    let tail1 = rig.attach(
        tail0,
        "tail1",
        Node::shape(
            vec3(0.0, 0.0, 0.18) * size,
            ShapeDesc::cone(vec3(0.05, 0.05, 0.22) * size, Color::SEA_GREEN),
        ),
    )?;
    rig.graph().set_current_angle(tail1, Axis::U, 10.0)?;

    let stub_size = [0.030, 0.028, 0.025, 0.020];
    let stub_y = [-0.04, -0.03, -0.02, -0.01];
    let stub_z = [-0.1, -0.02, 0.06, 0.14];
    for i in 0..4 {
        let stub = rig.attach(
            tail1,
            &format!("tail_stub{i}"),
            Node::shape(
                vec3(0.0, stub_y[i], stub_z[i]) * size,
                ShapeDesc::cone(
                    vec3(0.01, stub_size[i], stub_size[i]) * size,
                    Color::GREEN_YELLOW,
                ),
            ),
        )?;
        rig.graph().set_current_angle(stub, Axis::U, 90.0)?;
    }
    Ok(())
}

fn build_neck(rig: &mut RigBuilder, parent: NodeKey, size: f32) -> Result<(), SceneError> {
    let pivot = rig.pivot(parent, vec3(0.0, 0.04, 0.12) * size)?;
    let neck0 = rig.attach(
        pivot,
        "neck0",
        Node::shape(
            Vec3::ZERO,
            ShapeDesc::cone(vec3(0.09, 0.10, 0.10) * size, Color::SEA_GREEN),
        ),
    )?;
    rig.graph().set_current_angle(neck0, Axis::U, -60.0)?;
    let neck1 = rig.attach(
        neck0,
        "neck1",
        Node::shape(
            vec3(0.0, 0.0, 0.1) * size,
            ShapeDesc::cylinder(vec3(0.04, 0.04, 0.18) * size, Color::SEA_GREEN),
        ),
    )?;
    let throat_stub = rig.attach(
        neck0,
        "neck_stub3",
        Node::shape(
            vec3(0.0, 0.07, 0.0) * size,
            ShapeDesc::cone(vec3(0.01, 0.032, 0.032) * size, Color::GREEN_YELLOW),
        ),
    )?;
    rig.graph().set_current_angle(throat_stub, Axis::U, -70.0)?;

    for i in 0..3 {
        let girth = 0.026 + 0.002 * i as f32;
        let stub = rig.attach(
            neck1,
            &format!("neck_stub{i}"),
            Node::shape(
                vec3(0.0, 0.035, 0.16 - 0.08 * i as f32) * size,
                ShapeDesc::cone(vec3(0.01, girth, girth) * size, Color::GREEN_YELLOW),
            ),
        )?;
        rig.graph().set_current_angle(stub, Axis::U, -90.0)?;
    }
    Ok(())
}

fn build_head(rig: &mut RigBuilder, parent: NodeKey, size: f32) -> Result<(), SceneError> {
    let pivot = rig.pivot(parent, vec3(0.0, 0.04, 0.14) * size)?;
    let head = rig.attach(
        pivot,
        "head",
        Node::shape(
            Vec3::ZERO,
            ShapeDesc::sphere(vec3(0.08, 0.072, 0.10) * size, Color::SEA_GREEN),
        ),
    )?;
    rig.graph().set_default_angle(head, Axis::U, 60.0)?;
    rig.attach(
        head,
        "mouth",
        Node::shape(
            vec3(0.0, -0.02, 0.018) * size,
            ShapeDesc::sphere(vec3(0.081, 0.001, 0.08) * size, Color::DARK_GREEN),
        ),
    )?;

    for (i, (y, z, girth, pitch)) in [
        (0.06, 0.0, 0.020, -110.0),
        (0.02, -0.05, 0.025, -160.0),
    ]
    .into_iter()
    .enumerate()
    {
        let stub = rig.attach(
            head,
            &format!("head_stub{i}"),
            Node::shape(
                vec3(0.0, y, z) * size,
                ShapeDesc::cone(vec3(0.01, girth, girth) * size, Color::GREEN_YELLOW),
            ),
        )?;
        rig.graph().set_current_angle(stub, Axis::U, pitch)?;
    }

    let [left_eye, right_eye] = rig.mirror(
        [head, head],
        "eyeball",
        ShapeDesc::sphere(Vec3::splat(0.04 * size), Color::WHITE),
        vec3(0.06, -0.02, 0.02) * size,
        [-80.0, -30.0, 90.0],
    )?;
    rig.mirror(
        [left_eye, right_eye],
        "pupil",
        ShapeDesc::sphere(Vec3::splat(0.02 * size), Color::BLACK),
        vec3(0.0, -0.02, 0.0) * size,
        [0.0, 0.0, 0.0],
    )?;
    Ok(())
}

/// One two-segment leg with three claw nails. `stage` is `fore` or `hind`;
/// mirrored legs flip the hip's rest yaw.
fn build_leg(
    rig: &mut RigBuilder,
    parent: NodeKey,
    stage: &str,
    offset: Vec3,
    mirrored: bool,
    size: f32,
) -> Result<(), SceneError> {
    let side = if mirrored { "right" } else { "left" };
    let part = |suffix: &str| format!("{side}_{stage}_leg_{suffix}");
    let limb_len = 0.06 * size;
    let limb_width = 0.06 * size;

    let pivot = rig.pivot(parent, offset)?;
    let joint0 = rig.attach(
        pivot,
        &part("joint0"),
        Node::shape(
            Vec3::ZERO,
            ShapeDesc::sphere(Vec3::splat(limb_width), Color::SEA_GREEN),
        ),
    )?;
    rig.graph()
        .set_default_angle(joint0, Axis::V, if mirrored { -180.0 } else { 180.0 })?;
    rig.graph().set_default_angle(joint0, Axis::U, -90.0)?;

    let limb0 = rig.attach(
        joint0,
        &part("limb0"),
        Node::shape(
            vec3(0.0, 0.0, limb_len),
            ShapeDesc::cylinder(vec3(limb_width, limb_width, limb_len), Color::SEA_GREEN),
        ),
    )?;
    let joint1 = rig.attach(
        limb0,
        &part("joint1"),
        Node::shape(
            vec3(0.0, 0.0, limb_len),
            ShapeDesc::sphere(Vec3::splat(limb_width), Color::SEA_GREEN),
        ),
    )?;
    let limb1 = rig.attach(
        joint1,
        &part("limb1"),
        Node::shape(
            vec3(0.0, 0.0, limb_len),
            ShapeDesc::cylinder(vec3(limb_width, limb_width, limb_len), Color::SEA_GREEN),
        ),
    )?;

    for (i, x) in [(0, 0.04), (1, 0.0), (2, -0.04)] {
        let y = if i == 1 { -0.06 } else { -0.05 };
        let nail = rig.attach(
            limb1,
            &part(&format!("nail{i}")),
            Node::shape(
                vec3(x, y, 0.08) * size,
                ShapeDesc::cone(vec3(0.015, 0.020, 0.020) * size, Color::WHITE),
            ),
        )?;
        rig.graph().set_default_angle(nail, Axis::U, -170.0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn every_animated_joint_is_registered() {
        let mut graph = SceneGraph::new();
        let predator = Predator::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        for side in ["left", "right"] {
            for stage in ["fore", "hind"] {
                for segment in ["joint0", "limb0", "joint1", "limb1"] {
                    let name = format!("{side}_{stage}_leg_{segment}");
                    assert!(predator.rig().joint(&name).is_ok(), "missing {name}");
                }
            }
        }
        assert!(predator.rig().joint("head").is_ok());
        assert!(predator.rig().joint("left_pupil").is_ok());
        assert_eq!(predator.oscillators.len(), 8);
    }

    #[test]
    fn limb_extents_are_installed() {
        let mut graph = SceneGraph::new();
        let predator = Predator::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        let lower = predator.rig().joint("right_hind_leg_limb1").unwrap();
        assert_eq!(graph.node(lower).unwrap().rotate_extent(Axis::U), [-20.0, 0.0]);
        let upper = predator.rig().joint("left_fore_leg_limb0").unwrap();
        assert_eq!(graph.node(upper).unwrap().rotate_extent(Axis::U), [-40.0, 40.0]);
    }

    #[test]
    fn hips_mirror_their_rest_yaw() {
        let mut graph = SceneGraph::new();
        let predator = Predator::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        let left = predator.rig().joint("left_fore_leg_joint0").unwrap();
        let right = predator.rig().joint("right_fore_leg_joint0").unwrap();
        assert_eq!(graph.node(left).unwrap().rest_angle(Axis::V), 180.0);
        assert_eq!(graph.node(right).unwrap().rest_angle(Axis::V), -180.0);
        assert_eq!(graph.node(left).unwrap().rest_angle(Axis::U), -90.0);
    }

    #[test]
    fn animation_update_moves_limbs_and_spins_the_root() {
        let mut graph = SceneGraph::new();
        let mut predator = Predator::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        let upper = predator.rig().joint("left_fore_leg_limb0").unwrap();
        let before = graph.node(upper).unwrap().current_angle(Axis::U);

        predator.animation_update(&mut graph).unwrap();
        graph.update(predator.rig().root(), Mat4::IDENTITY).unwrap();

        let after = graph.node(upper).unwrap().current_angle(Axis::U);
        assert_eq!(after - before, SWING_UPPER);
        let root_spin = graph
            .node(predator.rig().root())
            .unwrap()
            .current_angle(Axis::V);
        assert_eq!(root_spin, ROOT_SPIN);
    }

    #[test]
    fn root_spin_wraps_instead_of_growing() {
        let mut graph = SceneGraph::new();
        let mut predator = Predator::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        let root = predator.rig().root();
        graph.set_current_angle(root, Axis::V, 359.0).unwrap();
        predator.animation_update(&mut graph).unwrap();
        let spin = graph.node(root).unwrap().current_angle(Axis::V);
        assert!(spin < 360.0, "spin {spin} did not wrap");
    }
}

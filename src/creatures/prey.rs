//! The prey: a round-bodied biped with jointed arms and legs, a pig-like
//! snout, and a short tail. Shoulders and hips oscillate in a swimming
//! stroke while the whole body drifts in a slow spin.

use glam::{Vec3, vec3};

use crate::animate::JointOscillator;
use crate::color::Color;
use crate::creatures::{Rig, RigBuilder};
use crate::environment::{EnvironmentObject, Species};
use crate::node::{Axis, Node, NodeKey, SceneError, SceneGraph};
use crate::shape::ShapeDesc;

/// Degrees per frame the whole creature yaws about its root.
const ROOT_SPIN: f32 = 3.0;

/// Shoulder/hip stroke speed, degrees per frame.
const STROKE: f32 = 2.5;

pub struct Prey {
    rig: Rig,
    oscillators: Vec<JointOscillator>,
    size: f32,
}

impl Prey {
    /// Assemble a prey skeleton at `position`, uniformly scaled by `size`,
    /// and wire up its limb oscillators.
    pub fn build(graph: &mut SceneGraph, position: Vec3, size: f32) -> Result<Self, SceneError> {
        let mut rig = RigBuilder::new(graph, position);
        let root = rig.root();

        let torso = rig.pivot(root, vec3(0.0, 0.22, -0.2) * size)?;
        let body = rig.attach(
            torso,
            "body",
            Node::shape(
                vec3(0.0, -0.34, 0.2) * size,
                ShapeDesc::sphere(vec3(0.20, 0.20, 0.18) * size, Color::BLUE).low_poly(),
            ),
        )?;

        build_arm(&mut rig, body, vec3(0.06, 0.08, 0.0) * size, false, size)?;
        build_arm(&mut rig, body, vec3(-0.06, 0.08, 0.0) * size, true, size)?;
        build_leg(&mut rig, body, vec3(0.06, -0.05, 0.0) * size, false, size)?;
        build_leg(&mut rig, body, vec3(-0.06, -0.05, 0.0) * size, true, size)?;

        let tail = rig.attach(
            body,
            "tail",
            Node::shape(
                vec3(0.0, -0.14, -0.1) * size,
                ShapeDesc::cone(vec3(0.015, 0.015, 0.04) * size, Color::PINK),
            ),
        )?;
        rig.graph().set_default_angle(tail, Axis::U, -210.0)?;

        build_head(&mut rig, body, size)?;

        // A single lax limit across the whole body first...
        let parts: Vec<NodeKey> = rig.components().to_vec();
        for key in parts {
            rig.graph().set_rotate_extent(key, Axis::U, 0.0, 35.0)?;
            rig.graph().set_rotate_extent(key, Axis::V, -45.0, 45.0)?;
            rig.graph().set_rotate_extent(key, Axis::W, -45.0, 45.0)?;
        }
        // ...then the stroked joints get limits centered on their rest pose.
        for name in [
            "left_leg_joint0",
            "right_leg_joint0",
            "left_arm_joint0",
            "right_arm_joint0",
        ] {
            let joint = rig.key(name)?;
            for (axis, span) in [(Axis::U, 35.0), (Axis::V, 45.0), (Axis::W, 45.0)] {
                let rest = rig.graph().node(joint)?.rest_angle(axis);
                rig.graph()
                    .set_rotate_extent(joint, axis, rest - span, rest + span)?;
            }
        }

        let rig = rig.finish();

        // Opposite arms and legs stroke in antiphase.
        let mut oscillators = Vec::new();
        for (joint, speed) in [
            ("left_leg_joint0", STROKE),
            ("right_leg_joint0", -STROKE),
            ("left_arm_joint0", -STROKE),
            ("right_arm_joint0", STROKE),
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

impl EnvironmentObject for Prey {
    fn rig(&self) -> &Rig {
        &self.rig
    }

    fn species(&self) -> Species {
        Species::Prey
    }

    fn bound_radius(&self) -> f32 {
        0.45 * self.size
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

fn build_arm(
    rig: &mut RigBuilder,
    parent: NodeKey,
    offset: Vec3,
    mirrored: bool,
    size: f32,
) -> Result<(), SceneError> {
    let side = if mirrored { "right" } else { "left" };
    let part = |suffix: &str| format!("{side}_arm_{suffix}");
    let limb_len = 0.08 * size;
    let limb_width = 0.01 * size;

    let pivot = rig.pivot(parent, offset)?;
    let joint0 = rig.attach(
        pivot,
        &part("joint0"),
        Node::shape(
            Vec3::ZERO,
            ShapeDesc::sphere(Vec3::splat(limb_width), Color::PINK),
        ),
    )?;
    rig.graph()
        .set_default_angle(joint0, Axis::V, if mirrored { -45.0 } else { 45.0 })?;
    rig.graph().set_default_angle(joint0, Axis::U, 90.0)?;

    let limb0 = rig.attach(
        joint0,
        &part("limb0"),
        Node::shape(
            vec3(0.0, 0.0, limb_len),
            ShapeDesc::cylinder(vec3(limb_width, limb_width, limb_len), Color::PINK),
        ),
    )?;
    let joint1 = rig.attach(
        limb0,
        &part("joint1"),
        Node::shape(
            vec3(0.0, 0.0, limb_len),
            ShapeDesc::sphere(Vec3::splat(limb_width), Color::PINK),
        ),
    )?;

    let finger_len = 0.025 * size;
    let finger_width = 0.008 * size;
    let finger_spread = 55.0;
    for (i, pitch) in [(0, finger_spread), (1, 0.0), (2, -finger_spread)] {
        let finger = rig.attach(
            joint1,
            &part(&format!("finger{i}")),
            Node::shape(
                vec3(0.0, 0.0, finger_len),
                ShapeDesc::cylinder(vec3(finger_width, finger_width, finger_len), Color::PINK),
            ),
        )?;
        if pitch != 0.0 {
            rig.graph().set_default_angle(finger, Axis::U, pitch)?;
        }
    }
    Ok(())
}

fn build_leg(
    rig: &mut RigBuilder,
    parent: NodeKey,
    offset: Vec3,
    mirrored: bool,
    size: f32,
) -> Result<(), SceneError> {
    let side = if mirrored { "right" } else { "left" };
    let part = |suffix: &str| format!("{side}_leg_{suffix}");
    let limb_len = 0.09 * size;
    let limb_width = 0.01 * size;

    let pivot = rig.pivot(parent, offset)?;
    let joint0 = rig.attach(
        pivot,
        &part("joint0"),
        Node::shape(
            Vec3::ZERO,
            ShapeDesc::sphere(Vec3::splat(limb_width), Color::PINK),
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
            ShapeDesc::cylinder(vec3(limb_width, limb_width, limb_len), Color::PINK),
        ),
    )?;
    let joint1 = rig.attach(
        limb0,
        &part("joint1"),
        Node::shape(
            vec3(0.0, 0.0, limb_len),
            ShapeDesc::sphere(Vec3::splat(limb_width), Color::PINK),
        ),
    )?;

    let shoe_board = rig.attach(
        joint1,
        &part("shoe_board"),
        Node::shape(
            vec3(0.0, -0.02, 0.0) * size,
            ShapeDesc::cylinder(vec3(0.025, 0.05, 0.015) * size, Color::BLACK),
        ),
    )?;
    rig.attach(
        shoe_board,
        &part("shoe_head"),
        Node::shape(
            vec3(0.0, -0.025, -0.01) * size,
            ShapeDesc::sphere(vec3(0.032, 0.032, 0.025) * size, Color::BLACK),
        ),
    )?;
    Ok(())
}

fn build_head(rig: &mut RigBuilder, parent: NodeKey, size: f32) -> Result<(), SceneError> {
    let pivot = rig.pivot(parent, Vec3::ZERO)?;
    let head = rig.attach(
        pivot,
        "head",
        Node::shape(
            vec3(0.0, 0.14, 0.2) * size,
            ShapeDesc::sphere(Vec3::splat(0.2 * size), Color::PINK),
        ),
    )?;
    rig.graph().set_default_angle(head, Axis::U, -90.0)?;

    let mouth = rig.attach(
        head,
        "mouth",
        Node::shape(
            vec3(0.0, -0.2, 0.04) * size,
            ShapeDesc::sphere(vec3(0.081, 0.001, 0.07) * size, Color::SOFT_RED),
        ),
    )?;
    rig.graph().set_default_angle(mouth, Axis::U, -50.0)?;

    let nose = rig.attach(
        head,
        "nose",
        Node::shape(
            vec3(0.0, -0.08, 0.16) * size,
            ShapeDesc::cylinder(vec3(0.06, 0.05, 0.075) * size, Color::PINK),
        ),
    )?;
    rig.graph().set_default_angle(nose, Axis::U, 90.0)?;

    rig.mirror(
        [nose, nose],
        "nostril",
        ShapeDesc::cylinder(vec3(0.02, 0.02, 0.076) * size, Color::SOFT_RED),
        vec3(0.03, 0.0, 0.0) * size,
        [0.0, 0.0, 0.0],
    )?;
    let [left_eye, right_eye] = rig.mirror(
        [head, head],
        "eyeball",
        ShapeDesc::sphere(Vec3::splat(0.045 * size), Color::WHITE),
        vec3(0.12, -0.1, 0.1) * size,
        [-20.0, 0.0, 20.0],
    )?;
    rig.mirror(
        [left_eye, right_eye],
        "pupil",
        ShapeDesc::sphere(Vec3::splat(0.03 * size), Color::BLACK),
        vec3(0.0, -0.02, 0.0) * size,
        [0.0, 0.0, 0.0],
    )?;
    rig.mirror(
        [head, head],
        "ear",
        ShapeDesc::sphere(vec3(0.04, 0.008, 0.08) * size, Color::PINK),
        vec3(0.10, -0.02, 0.18) * size,
        [0.0, 0.0, 0.0],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limbs_and_face_are_registered() {
        let mut graph = SceneGraph::new();
        let prey = Prey::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        for name in [
            "body",
            "head",
            "nose",
            "mouth",
            "tail",
            "left_nostril",
            "right_nostril",
            "left_eyeball",
            "right_pupil",
            "left_ear",
            "left_arm_finger2",
            "right_arm_joint1",
            "left_leg_shoe_board",
            "right_leg_shoe_head",
        ] {
            assert!(prey.rig().joint(name).is_ok(), "missing {name}");
        }
        assert_eq!(prey.oscillators.len(), 4);
    }

    #[test]
    fn stroked_joints_are_bounded_around_their_rest_pose() {
        let mut graph = SceneGraph::new();
        let prey = Prey::build(&mut graph, Vec3::ZERO, 1.0).unwrap();

        let hip = prey.rig().joint("left_leg_joint0").unwrap();
        let node = graph.node(hip).unwrap();
        assert_eq!(node.rest_angle(Axis::U), -90.0);
        assert_eq!(node.rotate_extent(Axis::U), [-125.0, -55.0]);
        assert_eq!(node.rotate_extent(Axis::V), [135.0, 225.0]);

        let shoulder = prey.rig().joint("right_arm_joint0").unwrap();
        let node = graph.node(shoulder).unwrap();
        assert_eq!(node.rest_angle(Axis::U), 90.0);
        assert_eq!(node.rotate_extent(Axis::U), [55.0, 125.0]);
    }

    #[test]
    fn rest_pose_outside_the_blanket_extent_survives() {
        // The head's rest pitch is -90 while the blanket u extent is
        // [0, 35]; installing the extent must not snap the pose.
        let mut graph = SceneGraph::new();
        let prey = Prey::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        let head = prey.rig().joint("head").unwrap();
        let node = graph.node(head).unwrap();
        assert_eq!(node.current_angle(Axis::U), -90.0);
        assert_eq!(node.rotate_extent(Axis::U), [0.0, 35.0]);
    }

    #[test]
    fn stroke_oscillation_stays_inside_the_hip_extent() {
        let mut graph = SceneGraph::new();
        let mut prey = Prey::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        let hip = prey.rig().joint("left_leg_joint0").unwrap();
        for _ in 0..120 {
            prey.animation_update(&mut graph).unwrap();
            let angle = graph.node(hip).unwrap().current_angle(Axis::U);
            assert!(
                (-125.0..=-55.0).contains(&angle),
                "hip angle {angle} left its extent"
            );
        }
    }

    #[test]
    fn antiphase_stroke_moves_opposite_limbs_apart() {
        let mut graph = SceneGraph::new();
        let mut prey = Prey::build(&mut graph, Vec3::ZERO, 1.0).unwrap();
        let left = prey.rig().joint("left_leg_joint0").unwrap();
        let right = prey.rig().joint("right_leg_joint0").unwrap();

        prey.animation_update(&mut graph).unwrap();
        let l = graph.node(left).unwrap().current_angle(Axis::U);
        let r = graph.node(right).unwrap().current_angle(Axis::U);
        assert_eq!(l, -90.0 + STROKE);
        assert_eq!(r, -90.0 - STROKE);
    }
}

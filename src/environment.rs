//! The capability that marks a creature as a live participant in the
//! per-frame simulation.

use glam::Vec3;

use crate::creatures::Rig;
use crate::node::{NodeKey, SceneError, SceneGraph};

/// Which side of the food chain a creature is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Species {
    Predator,
    Prey,
}

/// Read-only view of one sibling creature, captured by the vivarium at
/// the start of a frame. [`StepContext`] hands creatures a slice of these
/// instead of a live reference to the registry.
#[derive(Clone, Copy, Debug)]
pub struct SiblingState {
    pub root: NodeKey,
    pub species: Species,
    /// World-space root position from the most recent update pass.
    pub position: Vec3,
    pub bound_radius: f32,
}

/// Per-frame environment handed to [`EnvironmentObject::step_forward`].
pub struct StepContext<'a> {
    /// Full edge lengths of the tank volume.
    pub tank_dimensions: Vec3,
    /// Every creature currently in the tank, including the receiver.
    pub siblings: &'a [SiblingState],
}

/// A creature that takes part in the simulation: it animates its own
/// joints each frame and may react to the tank and its siblings.
pub trait EnvironmentObject {
    /// The skeleton this creature animates.
    fn rig(&self) -> &Rig;

    fn species(&self) -> Species;

    /// Radius of the creature's bounding sphere around its root, for
    /// collision queries.
    fn bound_radius(&self) -> f32;

    /// Advance this creature's joints by one frame.
    fn animation_update(&mut self, graph: &mut SceneGraph) -> Result<(), SceneError>;

    /// Reaction hook: tank-wall response and predator/prey interaction
    /// plug in here. The default does nothing.
    fn step_forward(
        &mut self,
        graph: &mut SceneGraph,
        ctx: &StepContext<'_>,
    ) -> Result<(), SceneError> {
        let _ = (graph, ctx);
        Ok(())
    }
}

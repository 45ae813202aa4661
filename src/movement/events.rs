//! Movement domain: typed contact messages from the collision router.

use bevy::ecs::message::Message;

use crate::movement::components::Surface;

/// A raw geometric contact, already resolved to a surface kind and the
/// upward component of the contact normal. Produced by the router and
/// consumed by the state machine in the same tick, never stored.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceContact {
    pub kind: Surface,
    pub normal_up: f32,
}

impl Message for SurfaceContact {}

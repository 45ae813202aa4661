//! Movement domain: the locomotion state machine and its collision
//! routing. The heart of the game; everything else reacts to it.

mod bootstrap;
mod components;
mod events;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    ContactOutcome, GameLayer, HitTick, Locomotion, LocomotionPhase, Player, PlayerCapsule,
    SlideEvent, Surface, WallRunEvent, YawBlend,
};
pub use events::SurfaceContact;
pub use resources::{LocomotionInput, LocomotionTuning, PlayerSpawn};

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    apply_jump_and_gravity, apply_movement, apply_surface_contacts, apply_yaw_blend, halt_player,
    handle_slide, handle_wall_run, read_input, reset_player_on_restart, route_surface_contacts,
    sync_capsule, tick_hit_phase, update_grounded,
};

/// All locomotion tick systems run inside this set, in a fixed chain.
/// Footsteps and other listeners order themselves after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocomotionSet;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionTuning>()
            .init_resource::<LocomotionInput>()
            .init_resource::<PlayerSpawn>()
            .add_message::<SurfaceContact>()
            .add_systems(Startup, spawn_player)
            .add_systems(OnEnter(GameState::Victory), halt_player)
            .add_systems(
                Update,
                (
                    read_input,
                    update_grounded,
                    apply_jump_and_gravity,
                    route_surface_contacts,
                    apply_surface_contacts,
                    handle_slide,
                    handle_wall_run,
                    tick_hit_phase,
                    apply_movement,
                    apply_yaw_blend,
                    sync_capsule,
                )
                    .chain()
                    .in_set(LocomotionSet)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(Update, reset_player_on_restart);
    }

    fn finish(&self, app: &mut App) {
        // The ground probe cannot exist without the physics spatial query
        // pipeline; a build without it is a configuration error, not a
        // silently disabled feature.
        assert!(
            app.world().contains_resource::<SpatialQueryPipeline>(),
            "MovementPlugin requires PhysicsPlugins (spatial query pipeline missing)"
        );
    }
}

//! Level domain: course geometry, coin pickups and the finish line.

mod spawn;
mod systems;

use bevy::prelude::*;

use crate::core::GameState;

/// Marker for collectible coin sensors.
#[derive(Component, Debug)]
pub struct Coin;

/// Marker for the finish-line sensor.
#[derive(Component, Debug)]
pub struct FinishLine;

/// Coin positions for respawning on restart, plus the shared handles.
#[derive(Resource, Debug, Default)]
pub struct CoinLayout {
    pub positions: Vec<Vec3>,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CoinLayout>()
            .add_systems(Startup, spawn::spawn_level)
            .add_systems(
                Update,
                (
                    (systems::collect_coins, systems::cross_finish_line)
                        .run_if(in_state(GameState::Run)),
                    systems::respawn_coins_on_restart,
                ),
            );
    }
}

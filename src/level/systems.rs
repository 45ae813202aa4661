//! Level domain: pickup and finish-line systems.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::{PlaySoundEvent, SoundKind};
use crate::core::{LevelCompleted, LevelConfig, RestartRequested, RunStats};
use crate::level::spawn::spawn_coin;
use crate::level::{Coin, CoinLayout, FinishLine};
use crate::movement::{Player, PlayerCapsule};

pub(crate) fn collect_coins(
    mut commands: Commands,
    mut collision_start_events: MessageReader<CollisionStart>,
    coins: Query<Entity, With<Coin>>,
    player_parts: Query<Entity, Or<(With<Player>, With<PlayerCapsule>)>>,
    mut stats: ResMut<RunStats>,
    mut sounds: MessageWriter<PlaySoundEvent>,
) {
    for event in collision_start_events.read() {
        let (coin_entity, other) = if coins.contains(event.collider1) {
            (event.collider1, event.collider2)
        } else if coins.contains(event.collider2) {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if !player_parts.contains(other) {
            continue;
        }

        commands.entity(coin_entity).despawn();
        stats.coins_collected += 1;
        sounds.write(PlaySoundEvent::new(SoundKind::Coin));
        debug!("Coin collected ({})", stats.coins_collected);
    }
}

pub(crate) fn cross_finish_line(
    mut collision_start_events: MessageReader<CollisionStart>,
    finish_lines: Query<Entity, With<FinishLine>>,
    player_parts: Query<Entity, Or<(With<Player>, With<PlayerCapsule>)>>,
    level: Res<LevelConfig>,
    mut stats: ResMut<RunStats>,
    mut completed_events: MessageWriter<LevelCompleted>,
    mut sounds: MessageWriter<PlaySoundEvent>,
) {
    if stats.completed {
        for _ in collision_start_events.read() {}
        return;
    }

    for event in collision_start_events.read() {
        let touched_finish = (finish_lines.contains(event.collider1)
            && player_parts.contains(event.collider2))
            || (finish_lines.contains(event.collider2) && player_parts.contains(event.collider1));

        if touched_finish {
            // Latched here so a second contact in flight cannot re-complete
            stats.completed = true;
            completed_events.write(LevelCompleted {
                level_index: level.level_index,
                coins_collected: stats.coins_collected,
            });
            sounds.write(PlaySoundEvent::new(SoundKind::Victory));
            break;
        }
    }
}

/// Put every coin back for the fresh attempt.
pub(crate) fn respawn_coins_on_restart(
    mut commands: Commands,
    mut restart_events: MessageReader<RestartRequested>,
    layout: Res<CoinLayout>,
    coins: Query<Entity, With<Coin>>,
) {
    if restart_events.read().count() == 0 {
        return;
    }

    for coin in &coins {
        commands.entity(coin).despawn();
    }
    for position in layout.positions.clone() {
        spawn_coin(&mut commands, &layout, position);
    }
}

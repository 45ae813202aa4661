//! Movement domain: the locomotion state machine, ticked once per frame.
//!
//! Tick order is load-bearing: ground probe, gravity/jump, contact
//! routing, slide, wall run, hit countdowns, then movement application.
//! The plugin chains these systems; reordering changes jump feel.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::animation::{AnimatorParams, param};
use crate::audio::{PlaySoundEvent, SoundKind};
use crate::core::{GameState, RestartRequested};
use crate::movement::components::{
    ContactOutcome, Locomotion, LocomotionPhase, Player, PlayerCapsule, SlideEvent, WallRunEvent,
    YawBlend,
};
use crate::movement::events::SurfaceContact;
use crate::movement::resources::{LocomotionInput, LocomotionTuning, PlayerSpawn};

/// Gravity integration and the jump impulse. Skipped while wall-running.
pub(crate) fn apply_jump_and_gravity(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    mut input: ResMut<LocomotionInput>,
    mut query: Query<(&mut Locomotion, Option<&mut AnimatorParams>), With<Player>>,
    mut sounds: MessageWriter<PlaySoundEvent>,
) {
    let dt = time.delta_secs();

    for (mut loco, animator) in &mut query {
        if loco.phase == LocomotionPhase::WallRunning {
            continue;
        }

        let jumped = loco.integrate_jump_and_gravity(&mut input.jump, &tuning, dt);

        if let Some(mut params) = animator {
            params.set_bool(param::GROUNDED, loco.grounded);
            if loco.grounded {
                params.set_bool(param::JUMP, jumped);
                params.set_bool(param::FREE_FALL, false);
            } else if loco.fall_timeout_remaining < 0.0 {
                params.set_bool(param::FREE_FALL, true);
            }
        }

        if jumped {
            debug!("Jump, impulse {:.2}", tuning.jump_impulse());
            sounds.write(PlaySoundEvent::new(SoundKind::Jump));
        }
    }
}

/// Feed routed surface contacts into the transition table.
pub(crate) fn apply_surface_contacts(
    mut contacts: MessageReader<SurfaceContact>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&mut Locomotion, Option<&mut AnimatorParams>), With<Player>>,
    mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
    mut sounds: MessageWriter<PlaySoundEvent>,
) {
    let Ok((mut loco, mut animator)) = query.single_mut() else {
        for _ in contacts.read() {}
        return;
    };

    for contact in contacts.read() {
        match loco.on_surface_contact(contact.kind, &tuning) {
            ContactOutcome::WallRunScheduled => {
                debug!("Wall run scheduled in {:.2}s", tuning.wall_run_delay);
            }
            ContactOutcome::EnteredHitLegs => {
                info!("Hit at leg height (normal up {:.3})", contact.normal_up);
                if let Some(params) = animator.as_mut() {
                    params.set_bool(param::HIT_LEGS, true);
                }
                sounds.write(PlaySoundEvent::new(SoundKind::Hit));
                release_cursor_for_death(&mut cursor);
            }
            ContactOutcome::EnteredHitShelf => {
                info!("Hit a shelf");
                if let Some(params) = animator.as_mut() {
                    params.set_bool(param::HIT_SHELF, true);
                }
                sounds.write(PlaySoundEvent::new(SoundKind::Hit));
                release_cursor_for_death(&mut cursor);
            }
            ContactOutcome::Ignored => {}
        }
    }
}

// The death pose hands the camera back to the mouse
fn release_cursor_for_death(cursor: &mut Query<&mut CursorOptions, With<PrimaryWindow>>) {
    for mut options in cursor {
        options.grab_mode = CursorGrabMode::None;
        options.visible = true;
    }
}

pub(crate) fn handle_slide(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    input: Res<LocomotionInput>,
    mut query: Query<(&mut Locomotion, Option<&mut AnimatorParams>), With<Player>>,
    mut sounds: MessageWriter<PlaySoundEvent>,
) {
    let dt = time.delta_secs();

    for (mut loco, animator) in &mut query {
        match loco.tick_slide(input.slide_just_pressed, &tuning, dt) {
            SlideEvent::Started => {
                debug!("Slide started ({:.2}s)", tuning.slide_duration);
                if let Some(mut params) = animator {
                    params.set_bool(param::SLIDE, true);
                }
                sounds.write(PlaySoundEvent::new(SoundKind::Slide));
            }
            SlideEvent::RestoreFinished => {
                debug!("Slide finished, capsule restored");
                if let Some(mut params) = animator {
                    params.set_bool(param::SLIDE, false);
                }
            }
            SlideEvent::None => {}
        }
    }
}

pub(crate) fn handle_wall_run(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&Transform, &mut Locomotion, Option<&mut AnimatorParams>), With<Player>>,
) {
    let dt = time.delta_secs();

    for (transform, mut loco, animator) in &mut query {
        match loco.tick_wall_run(&tuning, dt) {
            WallRunEvent::Started => {
                debug!("Wall run started ({:.2}s)", tuning.wall_run_duration);
                if let Some(mut params) = animator {
                    params.set_bool(param::WALL_RUN, true);
                }
            }
            WallRunEvent::Ended => {
                let (current_yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
                loco.yaw_blend = Some(YawBlend {
                    start: current_yaw,
                    end: loco.target_yaw,
                    elapsed: 0.0,
                    duration: tuning.wall_run_smooth_time,
                });
                debug!(
                    "Wall run ended, rotating to {:.1} deg",
                    loco.target_yaw.to_degrees()
                );
                if let Some(mut params) = animator {
                    params.set_bool(param::WALL_RUN, false);
                }
            }
            WallRunEvent::None => {}
        }
    }
}

/// Hit-stop and death-pause countdowns. Once the pause delay elapses the
/// pause menu is raised; Continue from there routes to a restart.
pub(crate) fn tick_hit_phase(
    time: Res<Time>,
    mut query: Query<&mut Locomotion, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let dt = time.delta_secs();

    for mut loco in &mut query {
        let tick = loco.tick_hit(dt);
        if tick.froze {
            debug!("Hit stop elapsed, movement frozen");
        }
        if tick.auto_pause {
            info!("Death pose settled, raising pause menu");
            next_state.set(GameState::Paused);
        }
    }
}

/// Compute and apply the tick's movement to the physical body.
pub(crate) fn apply_movement(
    time: Res<Time>,
    tuning: Res<LocomotionTuning>,
    input: Res<LocomotionInput>,
    mut query: Query<
        (
            &Transform,
            &mut LinearVelocity,
            &mut Locomotion,
            Option<&mut AnimatorParams>,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (transform, mut velocity, mut loco, animator) in &mut query {
        if loco.phase == LocomotionPhase::WallRunning {
            // Heading velocity held from entry, vertical pinned to the wall
            velocity.y = 0.0;
            continue;
        }

        if loco.frozen {
            velocity.0 = Vec3::ZERO;
            if let Some(mut params) = animator {
                params.set_float(param::SPEED, 0.0);
                params.set_float(param::HORIZONTAL, 0.0);
            }
            continue;
        }

        // Always-forward: input.y is forced to 1, only x steers
        let speed = tuning.move_speed;
        let lateral_target = input.axis.x * tuning.lateral_speed_multiplier;
        let blend = if tuning.horizontal_smooth_time > 0.0 {
            (dt / tuning.horizontal_smooth_time).min(1.0)
        } else {
            1.0
        };
        loco.lateral_smoothed += (lateral_target - loco.lateral_smoothed) * blend;

        let forward = transform.forward();
        let right = transform.right();
        let horizontal = forward * speed + right * loco.lateral_smoothed;
        velocity.0 = Vec3::new(horizontal.x, loco.vertical_velocity, horizontal.z);

        if let Some(mut params) = animator {
            params.set_float(param::SPEED, speed);
            params.set_float(param::MOTION_SPEED, 1.0);
            params.set_float(param::HORIZONTAL, loco.lateral_smoothed);
        }
    }
}

/// Advance the post-wall-run body rotation toward the yaw target.
pub(crate) fn apply_yaw_blend(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &mut Locomotion), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut loco) in &mut query {
        let Some(mut blend) = loco.yaw_blend else {
            continue;
        };

        blend.elapsed += dt;
        let t = if blend.duration > 0.0 {
            (blend.elapsed / blend.duration).min(1.0)
        } else {
            1.0
        };

        let yaw = blend.start + (blend.end - blend.start) * t;
        transform.rotation = Quat::from_rotation_y(yaw);

        loco.yaw_blend = if t >= 1.0 { None } else { Some(blend) };
    }
}

/// Push the interpolated capsule profile down to the collider child.
pub(crate) fn sync_capsule(
    tuning: Res<LocomotionTuning>,
    players: Query<(&Locomotion, &Children), With<Player>>,
    mut capsules: Query<(&mut PlayerCapsule, &mut Transform, &mut Collider)>,
) {
    for (loco, children) in &players {
        for child in children {
            let Ok((mut capsule, mut transform, mut collider)) = capsules.get_mut(*child) else {
                continue;
            };

            if capsule.height == loco.capsule_height && capsule.center_y == loco.capsule_center_y {
                continue;
            }

            capsule.height = loco.capsule_height;
            capsule.center_y = loco.capsule_center_y;
            transform.translation.y = loco.capsule_center_y;

            let cylinder = (loco.capsule_height - 2.0 * tuning.capsule_radius).max(0.0);
            *collider = Collider::capsule(tuning.capsule_radius, cylinder);
        }
    }
}

/// The run is over; stop the body so the victory screen sits still.
pub(crate) fn halt_player(mut query: Query<&mut LinearVelocity, With<Player>>) {
    for mut velocity in &mut query {
        velocity.0 = Vec3::ZERO;
    }
}

/// Explicit external reset: the only path out of a hit phase. Puts the
/// body back at spawn with a fresh locomotion record.
pub(crate) fn reset_player_on_restart(
    mut restart_events: MessageReader<RestartRequested>,
    tuning: Res<LocomotionTuning>,
    spawn: Res<PlayerSpawn>,
    mut query: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut Locomotion,
            Option<&mut AnimatorParams>,
        ),
        With<Player>,
    >,
) {
    if restart_events.read().count() == 0 {
        return;
    }

    for (mut transform, mut velocity, mut loco, animator) in &mut query {
        loco.reset_for_attempt(&tuning);
        *transform = Transform::from_translation(spawn.0);
        velocity.0 = Vec3::ZERO;
        if let Some(mut params) = animator {
            params.clear();
        }
        info!("Player reset to spawn");
    }
}

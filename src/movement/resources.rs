//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocomotionTuning {
    /// Forward speed. The runner is always-forward: backward input never
    /// reduces forward thrust.
    pub move_speed: f32,
    pub lateral_speed_multiplier: f32,
    /// Time constant of the exponential lateral smoothing.
    pub horizontal_smooth_time: f32,
    pub jump_height: f32,
    /// Negative, units per second squared.
    pub gravity: f32,
    /// Downward speed cap, stored positive.
    pub terminal_velocity: f32,
    /// Seconds on the ground before another jump can fire.
    pub jump_timeout: f32,
    /// Seconds airborne before the free-fall animation engages.
    pub fall_timeout: f32,
    pub grounded_offset: f32,
    pub grounded_radius: f32,
    pub capsule_radius: f32,
    pub standing_height: f32,
    pub standing_center_y: f32,
    pub slide_duration: f32,
    pub slide_height: f32,
    pub slide_center_y: f32,
    pub slide_restore_time: f32,
    pub wall_run_duration: f32,
    /// Delay between touching a wall-run surface and the run starting.
    pub wall_run_delay: f32,
    /// Heading change applied when a wall run ends, degrees.
    pub wall_run_rotation_angle: f32,
    pub wall_run_smooth_time: f32,
    /// Movement keeps applying for this long after a hit lands.
    pub hit_stop_delay: f32,
    /// Seconds after a hit before the pause menu is raised automatically.
    pub hit_pause_delay: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            lateral_speed_multiplier: 2.0,
            horizontal_smooth_time: 0.1,
            jump_height: 1.2,
            gravity: -15.0,
            terminal_velocity: 53.0,
            jump_timeout: 0.50,
            fall_timeout: 0.15,
            grounded_offset: -0.14,
            grounded_radius: 0.28,
            capsule_radius: 0.28,
            standing_height: 1.8,
            standing_center_y: 0.9,
            slide_duration: 0.75,
            slide_height: 0.5,
            slide_center_y: 0.25,
            slide_restore_time: 0.1,
            wall_run_duration: 1.5,
            wall_run_delay: 0.7,
            wall_run_rotation_angle: 90.0,
            wall_run_smooth_time: 0.2,
            hit_stop_delay: 0.5,
            hit_pause_delay: 2.8,
        }
    }
}

impl LocomotionTuning {
    /// Upward speed that reaches `jump_height` under `gravity`.
    /// Physics formula: v = sqrt(h * -2g)
    pub fn jump_impulse(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }
}

#[derive(Resource, Debug, Default)]
pub struct LocomotionInput {
    /// Raw movement axis. The movement step forces y to 1 (always-forward)
    /// and only x steers.
    pub axis: Vec2,
    pub look: Vec2,
    /// Held jump input; the airborne branch clears it.
    pub jump: bool,
    pub slide_just_pressed: bool,
}

/// Where the player (re)spawns.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSpawn(pub Vec3);

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self(Vec3::ZERO)
    }
}

//! Animation parameter sink.
//!
//! The locomotion systems publish named booleans and floats here, exactly
//! the parameters the character rig consumes. The sink is best-effort: a
//! player without the component simply drops the writes, and a tick never
//! fails because the rig is absent.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::movement::{Player, PlayerCapsule};

/// Animator parameter names.
pub mod param {
    pub const SPEED: &str = "Speed";
    pub const MOTION_SPEED: &str = "MotionSpeed";
    pub const HORIZONTAL: &str = "Horizontal";
    pub const GROUNDED: &str = "Grounded";
    pub const JUMP: &str = "Jump";
    pub const FREE_FALL: &str = "FreeFall";
    pub const SLIDE: &str = "Slide";
    pub const WALL_RUN: &str = "Wall Run";
    pub const HIT_LEGS: &str = "HitLegs";
    pub const HIT_SHELF: &str = "HitShelf";
}

#[derive(Component, Debug, Default)]
pub struct AnimatorParams {
    bools: HashMap<&'static str, bool>,
    floats: HashMap<&'static str, f32>,
}

impl AnimatorParams {
    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    pub fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.insert(name, value);
    }

    pub fn bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    pub fn clear(&mut self) {
        self.bools.clear();
        self.floats.clear();
    }
}

/// Placeholder rig feedback: tint the capsule by the posted parameters so
/// phase changes are visible without a character model.
fn apply_pose_feedback(
    players: Query<(&AnimatorParams, &Children), (With<Player>, Changed<AnimatorParams>)>,
    capsules: Query<&MeshMaterial3d<StandardMaterial>, With<PlayerCapsule>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (params, children) in &players {
        let color = if params.bool(param::HIT_LEGS) || params.bool(param::HIT_SHELF) {
            Color::srgb(0.8, 0.15, 0.15)
        } else if params.bool(param::WALL_RUN) {
            Color::srgb(0.95, 0.85, 0.4)
        } else if params.bool(param::SLIDE) {
            Color::srgb(0.4, 0.7, 0.95)
        } else {
            Color::srgb(0.9, 0.9, 0.9)
        };

        for child in children {
            let Ok(material_handle) = capsules.get(*child) else {
                continue;
            };
            if let Some(material) = materials.get_mut(&material_handle.0) {
                material.base_color = color;
            }
        }
    }
}

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_pose_feedback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_params_read_as_defaults() {
        let params = AnimatorParams::default();
        assert!(!params.bool(param::GROUNDED));
        assert_eq!(params.float(param::SPEED), 0.0);
    }

    #[test]
    fn test_params_round_trip_and_clear() {
        let mut params = AnimatorParams::default();
        params.set_bool(param::SLIDE, true);
        params.set_float(param::HORIZONTAL, -1.5);

        assert!(params.bool(param::SLIDE));
        assert_eq!(params.float(param::HORIZONTAL), -1.5);

        params.clear();
        assert!(!params.bool(param::SLIDE));
        assert_eq!(params.float(param::HORIZONTAL), 0.0);
    }
}

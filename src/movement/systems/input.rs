//! Movement domain: input sampling for locomotion.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::movement::LocomotionInput;

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut input: ResMut<LocomotionInput>,
) {
    // Lateral steering axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Kept for completeness; the movement step forces y to 1
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.look = mouse_motion.delta;

    // Latched rather than polled: the state machine clears the flag while
    // airborne, and a key still held must not re-arm it until re-pressed
    if keyboard.just_pressed(KeyCode::Space) {
        input.jump = true;
    }
    if keyboard.just_released(KeyCode::Space) {
        input.jump = false;
    }

    input.slide_just_pressed =
        keyboard.just_pressed(KeyCode::KeyS) || keyboard.just_pressed(KeyCode::ControlLeft);
}

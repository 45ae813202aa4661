//! Movement domain: system modules for the locomotion tick.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod locomotion;

pub(crate) use collisions::{route_surface_contacts, update_grounded};
pub(crate) use input::read_input;
pub(crate) use locomotion::{
    apply_jump_and_gravity, apply_movement, apply_surface_contacts, apply_yaw_blend, halt_player,
    handle_slide, handle_wall_run, reset_player_on_restart, sync_capsule, tick_hit_phase,
};

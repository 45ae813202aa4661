//! Movement domain: unit tests for the locomotion state machine.

use super::components::{ContactOutcome, Locomotion, LocomotionPhase, SlideEvent, WallRunEvent};
use super::resources::LocomotionTuning;
use super::systems::collisions::hit_legs_normal_triggers;
use super::{Surface, SurfaceContact};
use crate::audio::FootstepClock;

fn tuning() -> LocomotionTuning {
    LocomotionTuning::default()
}

/// Tick a record through `seconds` of simulated time in fixed steps,
/// running the per-tick methods in the same order as the system chain.
fn run_ticks(loco: &mut Locomotion, tuning: &LocomotionTuning, seconds: f32, dt: f32) {
    let mut jump = false;
    let mut elapsed = 0.0;
    while elapsed < seconds {
        if loco.phase != LocomotionPhase::WallRunning {
            loco.integrate_jump_and_gravity(&mut jump, tuning, dt);
        }
        loco.tick_slide(false, tuning, dt);
        loco.tick_wall_run(tuning, dt);
        loco.tick_hit(dt);
        elapsed += dt;
    }
}

// -----------------------------------------------------------------------------
// Jump and gravity
// -----------------------------------------------------------------------------

#[test]
fn test_jump_impulse_magnitude() {
    // MoveSpeed=5, Gravity=-15, JumpHeight=1.2 -> sqrt(1.2 * 30) = 6.0
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;
    loco.jump_timeout_remaining = 0.0;
    let mut jump = true;

    let jumped = loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.0);

    assert!(jumped);
    assert!((loco.vertical_velocity - 6.0).abs() < 1e-6);
    assert!((tuning.jump_impulse() - (1.2f32 * 30.0).sqrt()).abs() < 1e-6);
}

#[test]
fn test_no_jump_while_sliding() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;
    loco.jump_timeout_remaining = 0.0;
    loco.tick_slide(true, &tuning, 0.0);
    assert_eq!(loco.phase, LocomotionPhase::Sliding);

    let mut jump = true;
    let jumped = loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.0);

    assert!(!jumped);
    assert_eq!(loco.vertical_velocity, 0.0);
}

#[test]
fn test_no_jump_while_wall_run_pending() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;
    loco.jump_timeout_remaining = 0.0;
    assert_eq!(
        loco.on_surface_contact(Surface::WallRun, &tuning),
        ContactOutcome::WallRunScheduled
    );

    let mut jump = true;
    assert!(!loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.0));
}

#[test]
fn test_no_jump_before_timeout_elapses() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;
    assert!(loco.jump_timeout_remaining > 0.0);

    let mut jump = true;
    assert!(!loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.016));

    // After the timeout has counted down on the ground, the jump fires
    run_ticks(&mut loco, &tuning, 0.6, 0.016);
    let mut jump = true;
    assert!(loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.016));
}

#[test]
fn test_gravity_integrates_and_clamps_at_terminal_velocity() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = false;
    loco.vertical_velocity = 0.0;
    let mut jump = false;

    loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.1);
    assert!((loco.vertical_velocity - tuning.gravity * 0.1).abs() < 1e-6);

    // A long fall pins at the terminal velocity, never past it
    run_ticks(&mut loco, &tuning, 10.0, 0.1);
    assert_eq!(loco.vertical_velocity, -tuning.terminal_velocity);
}

#[test]
fn test_landing_resets_vertical_velocity() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;
    loco.vertical_velocity = -20.0;
    let mut jump = false;

    loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.0);

    assert_eq!(loco.vertical_velocity, -2.0);
}

#[test]
fn test_airborne_branch_clears_held_jump() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = false;
    let mut jump = true;

    loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.016);

    assert!(!jump);
    assert_eq!(loco.jump_timeout_remaining, tuning.jump_timeout);
}

// -----------------------------------------------------------------------------
// Slide
// -----------------------------------------------------------------------------

#[test]
fn test_slide_requires_ground_and_no_pending_wall_run() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);

    loco.grounded = false;
    assert_eq!(loco.tick_slide(true, &tuning, 0.016), SlideEvent::None);

    loco.grounded = true;
    loco.on_surface_contact(Surface::WallRun, &tuning);
    assert_eq!(loco.tick_slide(true, &tuning, 0.016), SlideEvent::None);
    assert_eq!(loco.phase, LocomotionPhase::Normal);
}

#[test]
fn test_slide_sets_capsule_profile_and_restores_exactly() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;

    assert_eq!(loco.tick_slide(true, &tuning, 0.016), SlideEvent::Started);
    assert_eq!(loco.phase, LocomotionPhase::Sliding);
    assert_eq!(loco.capsule_height, tuning.slide_height);
    assert_eq!(loco.capsule_center_y, tuning.slide_center_y);

    // SlideDuration of ticks passes, the restore stage arms once
    let dt = 0.05;
    let mut restored = false;
    for _ in 0..40 {
        if loco.tick_slide(false, &tuning, dt) == SlideEvent::RestoreFinished {
            restored = true;
            break;
        }
    }

    assert!(restored);
    assert_eq!(loco.phase, LocomotionPhase::Normal);
    assert_eq!(loco.capsule_height, tuning.standing_height);
    assert_eq!(loco.capsule_center_y, tuning.standing_center_y);
}

#[test]
fn test_slide_restore_interpolates_between_profiles() {
    let mut tuning = tuning();
    tuning.slide_duration = 0.1;
    tuning.slide_restore_time = 0.2;
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;
    loco.tick_slide(true, &tuning, 0.0);

    // Burn the slide window, then half of the restore window
    loco.tick_slide(false, &tuning, 0.1);
    assert!(loco.slide_restore_timer > 0.0);
    loco.tick_slide(false, &tuning, 0.1);

    assert_eq!(loco.phase, LocomotionPhase::Sliding);
    assert!(loco.capsule_height > tuning.slide_height);
    assert!(loco.capsule_height < tuning.standing_height);

    loco.tick_slide(false, &tuning, 0.1);
    assert_eq!(loco.phase, LocomotionPhase::Normal);
    assert_eq!(loco.capsule_height, tuning.standing_height);
}

// -----------------------------------------------------------------------------
// Wall run
// -----------------------------------------------------------------------------

#[test]
fn test_wall_contact_schedules_exactly_one_pending_activation() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);

    assert_eq!(
        loco.on_surface_contact(Surface::WallRun, &tuning),
        ContactOutcome::WallRunScheduled
    );
    // Collider and trigger callbacks in the same tick fold into one
    assert_eq!(
        loco.on_surface_contact(Surface::WallRun, &tuning),
        ContactOutcome::Ignored
    );
    assert!(loco.wall_run_pending);
}

#[test]
fn test_wall_run_starts_after_delay_and_zeroes_vertical_velocity() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.vertical_velocity = -7.5;
    loco.on_surface_contact(Surface::WallRun, &tuning);

    // Not yet: the delay window is still open
    assert_eq!(loco.tick_wall_run(&tuning, 0.3), WallRunEvent::None);
    assert_eq!(loco.phase, LocomotionPhase::Normal);

    assert_eq!(loco.tick_wall_run(&tuning, 0.5), WallRunEvent::Started);
    assert_eq!(loco.phase, LocomotionPhase::WallRunning);
    assert_eq!(loco.vertical_velocity, 0.0);
    // The pending flag and the running phase are mutually exclusive
    assert!(!loco.wall_run_pending);
}

#[test]
fn test_wall_run_ends_with_rotation_added_to_yaw_target() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.on_surface_contact(Surface::WallRun, &tuning);
    loco.tick_wall_run(&tuning, tuning.wall_run_delay + 0.01);
    assert_eq!(loco.phase, LocomotionPhase::WallRunning);

    assert_eq!(
        loco.tick_wall_run(&tuning, tuning.wall_run_duration + 0.01),
        WallRunEvent::Ended
    );
    assert_eq!(loco.phase, LocomotionPhase::Normal);
    assert!(
        (loco.target_yaw - tuning.wall_run_rotation_angle.to_radians()).abs() < 1e-6
    );
}

#[test]
fn test_contact_while_wall_running_is_ignored() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.on_surface_contact(Surface::WallRun, &tuning);
    loco.tick_wall_run(&tuning, tuning.wall_run_delay + 0.01);

    assert_eq!(
        loco.on_surface_contact(Surface::WallRun, &tuning),
        ContactOutcome::Ignored
    );
    assert!(!loco.wall_run_pending);
}

#[test]
fn test_pending_activation_cancelled_by_competing_transition() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;
    loco.on_surface_contact(Surface::WallRun, &tuning);

    // A hit lands before the delay elapses; the activation must not fire
    // out of the death pose
    loco.on_surface_contact(Surface::HitLegs, &tuning);
    assert!(!loco.wall_run_pending);

    run_ticks(&mut loco, &tuning, 1.0, 0.05);
    assert_eq!(loco.phase, LocomotionPhase::HitLegs);
}

#[test]
fn test_sliding_and_wall_running_never_co_occur() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;

    // Wall run scheduled mid-slide: the slide survives, the activation dies
    loco.tick_slide(true, &tuning, 0.0);
    loco.on_surface_contact(Surface::WallRun, &tuning);
    assert!(loco.wall_run_pending);

    assert_eq!(
        loco.tick_wall_run(&tuning, tuning.wall_run_delay + 0.01),
        WallRunEvent::None
    );
    assert_eq!(loco.phase, LocomotionPhase::Sliding);
    assert!(!loco.wall_run_pending);

    // And while wall-running, the slide key does nothing
    let mut loco = Locomotion::new(&tuning);
    loco.on_surface_contact(Surface::WallRun, &tuning);
    loco.tick_wall_run(&tuning, tuning.wall_run_delay + 0.01);
    assert_eq!(loco.tick_slide(true, &tuning, 0.016), SlideEvent::None);
    assert_eq!(loco.phase, LocomotionPhase::WallRunning);
}

// -----------------------------------------------------------------------------
// Hit phases
// -----------------------------------------------------------------------------

#[test]
fn test_hit_legs_normal_threshold() {
    // Ceiling-style and floor-style contacts are ordinary terrain
    assert!(!hit_legs_normal_triggers(1.0));
    assert!(!hit_legs_normal_triggers(0.051));
    // Near-horizontal contacts are leg hits
    assert!(hit_legs_normal_triggers(0.05));
    assert!(hit_legs_normal_triggers(0.0));
    assert!(hit_legs_normal_triggers(-1.0));
}

#[test]
fn test_hit_phases_are_terminal_until_external_reset() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.grounded = true;
    loco.on_surface_contact(Surface::HitLegs, &tuning);
    assert_eq!(loco.phase, LocomotionPhase::HitLegs);

    // No amount of ticking, sliding or wall contact leaves the hit phase
    loco.tick_slide(true, &tuning, 0.016);
    assert_eq!(loco.phase, LocomotionPhase::HitLegs);
    assert_eq!(
        loco.on_surface_contact(Surface::WallRun, &tuning),
        ContactOutcome::Ignored
    );
    let mut jump = true;
    assert!(!loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.016));
    run_ticks(&mut loco, &tuning, 5.0, 0.05);
    assert_eq!(loco.phase, LocomotionPhase::HitLegs);
    assert!(loco.frozen);

    loco.reset_for_attempt(&tuning);
    assert_eq!(loco.phase, LocomotionPhase::Normal);
    assert!(!loco.frozen);
}

#[test]
fn test_second_leg_hit_is_ignored_but_shelf_overrides() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.on_surface_contact(Surface::HitLegs, &tuning);

    assert_eq!(
        loco.on_surface_contact(Surface::HitLegs, &tuning),
        ContactOutcome::Ignored
    );
    assert_eq!(
        loco.on_surface_contact(Surface::HitShelf, &tuning),
        ContactOutcome::EnteredHitShelf
    );
    assert_eq!(
        loco.on_surface_contact(Surface::HitShelf, &tuning),
        ContactOutcome::Ignored
    );
}

#[test]
fn test_hit_stop_window_then_freeze_then_auto_pause() {
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    loco.on_surface_contact(Surface::HitLegs, &tuning);
    assert!(!loco.frozen);

    // Movement still applies inside the hit-stop window
    let tick = loco.tick_hit(0.25);
    assert!(!tick.froze && !loco.frozen);

    // The window elapses: frozen fires exactly once
    let tick = loco.tick_hit(0.3);
    assert!(tick.froze && loco.frozen);
    assert!(!loco.tick_hit(0.1).froze);

    // Later, the death pause raises the menu exactly once
    let mut paused = 0;
    for _ in 0..60 {
        if loco.tick_hit(0.1).auto_pause {
            paused += 1;
        }
    }
    assert_eq!(paused, 1);
}

// -----------------------------------------------------------------------------
// Pause idempotence
// -----------------------------------------------------------------------------

#[test]
fn test_zero_elapsed_tick_leaves_the_record_unchanged() {
    // While paused the Run-gated systems never fire and the virtual clock
    // reports no elapsed time; a zero-dt tick must be a no-op.
    let tuning = tuning();
    let mut loco = Locomotion::new(&tuning);
    run_ticks(&mut loco, &tuning, 0.5, 0.05);

    // Settle the landing bias so the record is at a tick-stable point
    let mut jump = false;
    loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.0);
    let snapshot = loco.clone();

    loco.integrate_jump_and_gravity(&mut jump, &tuning, 0.0);
    loco.tick_slide(false, &tuning, 0.0);
    loco.tick_wall_run(&tuning, 0.0);
    loco.tick_hit(0.0);

    assert_eq!(loco, snapshot);
}

// -----------------------------------------------------------------------------
// Footstep scheduling
// -----------------------------------------------------------------------------

#[test]
fn test_footsteps_fire_on_the_absolute_clock() {
    let mut clock = FootstepClock { next_at: 0.245 };
    let interval = 0.245;

    assert!(!clock.try_emit(0.2, interval));
    assert!(clock.try_emit(0.245, interval));
    // Rescheduled relative to the clock reading, not the old deadline
    assert!((clock.next_at - 0.49).abs() < 1e-9);
}

#[test]
fn test_frame_hitch_emits_a_single_footstep() {
    let mut clock = FootstepClock { next_at: 0.245 };
    let interval = 0.245;

    // A frame gap five intervals long: one step, not five
    let now = 0.245 * 5.0;
    assert!(clock.try_emit(now, interval));
    assert!(!clock.try_emit(now, interval));
    assert!((clock.next_at - (now + interval)).abs() < 1e-9);
}

// -----------------------------------------------------------------------------
// Contact routing
// -----------------------------------------------------------------------------

#[test]
fn test_surface_contact_carries_kind_and_normal() {
    let contact = SurfaceContact {
        kind: Surface::HitLegs,
        normal_up: 0.02,
    };
    assert_eq!(contact.kind, Surface::HitLegs);
    assert!(hit_legs_normal_triggers(contact.normal_up));
}

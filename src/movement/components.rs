//! Movement domain: locomotion record, phases and physics layers.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::resources::LocomotionTuning;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Walkable ground (floors, ramps)
    Ground,
    /// Wall-run surfaces
    Wall,
    /// Leg- and shelf-height obstacles
    Obstacle,
    /// Player character
    Player,
    /// Sensors (wall-run zones, coins, finish line) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for the player's capsule collider child. The capsule lives on a
/// child entity so slide can reshape and re-center it without moving the
/// body origin.
#[derive(Component, Debug)]
pub struct PlayerCapsule {
    pub height: f32,
    pub center_y: f32,
}

/// Mutually exclusive high-level locomotion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocomotionPhase {
    #[default]
    Normal,
    Sliding,
    WallRunning,
    HitLegs,
    HitShelf,
}

/// Surface kind carried by level geometry the collision router cares
/// about. An explicit component in place of engine string tags.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    WallRun,
    HitLegs,
    HitShelf,
}

/// In-flight smooth body rotation after a wall run ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YawBlend {
    pub start: f32,
    pub end: f32,
    pub elapsed: f32,
    pub duration: f32,
}

/// What a slide tick did, for the caller's animation/sound side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideEvent {
    None,
    Started,
    RestoreFinished,
}

/// What a wall-run tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallRunEvent {
    None,
    Started,
    Ended,
}

/// Outcome of routing one surface contact into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Ignored,
    WallRunScheduled,
    EnteredHitLegs,
    EnteredHitShelf,
}

/// Hit-phase countdown results for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitTick {
    /// The hit-stop window just elapsed; movement freezes from here on.
    pub froze: bool,
    /// The death pause delay just elapsed; raise the pause menu.
    pub auto_pause: bool,
}

/// The single authoritative locomotion record. Mutated exclusively by the
/// movement systems, once per tick, in a fixed order.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Locomotion {
    /// Signed vertical speed, integrated by gravity each tick.
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub phase: LocomotionPhase,
    /// Gates re-jump while grounded.
    pub jump_timeout_remaining: f32,
    /// Gates the free-fall animation while airborne.
    pub fall_timeout_remaining: f32,
    pub slide_timer: f32,
    /// Nonzero only while the capsule is interpolating back to standing.
    pub slide_restore_timer: f32,
    pub wall_run_timer: f32,
    /// Delay window between wall contact and the wall run starting.
    /// Never true simultaneously with `phase == WallRunning`.
    pub wall_run_pending: bool,
    pub wall_run_delay_timer: f32,
    /// Movement keeps applying for this long after a hit lands.
    pub hit_stop_timer: f32,
    /// Arms the automatic death pause once a hit phase is entered.
    pub hit_pause_timer: f32,
    /// Accumulated yaw target across wall-run rotations, radians.
    /// Monotonically adjusted, never reset during a run.
    pub target_yaw: f32,
    pub yaw_blend: Option<YawBlend>,
    /// Exponentially smoothed lateral speed.
    pub lateral_smoothed: f32,
    /// Set once the hit-stop window elapses; terminal until reset.
    pub frozen: bool,
    pub capsule_height: f32,
    pub capsule_center_y: f32,
}

impl Locomotion {
    pub fn new(tuning: &LocomotionTuning) -> Self {
        Self {
            vertical_velocity: 0.0,
            grounded: true,
            phase: LocomotionPhase::Normal,
            jump_timeout_remaining: tuning.jump_timeout,
            fall_timeout_remaining: tuning.fall_timeout,
            slide_timer: 0.0,
            slide_restore_timer: 0.0,
            wall_run_timer: 0.0,
            wall_run_pending: false,
            wall_run_delay_timer: 0.0,
            hit_stop_timer: 0.0,
            hit_pause_timer: 0.0,
            target_yaw: 0.0,
            yaw_blend: None,
            lateral_smoothed: 0.0,
            frozen: false,
            capsule_height: tuning.standing_height,
            capsule_center_y: tuning.standing_center_y,
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(
            self.phase,
            LocomotionPhase::HitLegs | LocomotionPhase::HitShelf
        )
    }

    /// Gravity integration and the jump impulse. Skipped entirely by the
    /// caller while wall-running. Returns true when a jump fired this tick.
    ///
    /// `jump` is the held jump input; the airborne branch clears it so a
    /// held key cannot buffer a jump across a fall.
    pub fn integrate_jump_and_gravity(
        &mut self,
        jump: &mut bool,
        tuning: &LocomotionTuning,
        dt: f32,
    ) -> bool {
        let mut jumped = false;

        if self.grounded {
            self.fall_timeout_remaining = tuning.fall_timeout;

            // Landing: hold a small downward bias so the probe stays planted
            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = -2.0;
            }

            if self.phase == LocomotionPhase::Normal
                && !self.wall_run_pending
                && *jump
                && self.jump_timeout_remaining <= 0.0
            {
                self.vertical_velocity = tuning.jump_impulse();
                jumped = true;
            }

            if self.jump_timeout_remaining >= 0.0 {
                self.jump_timeout_remaining -= dt;
            }
        } else {
            self.jump_timeout_remaining = tuning.jump_timeout;

            if self.fall_timeout_remaining >= 0.0 {
                self.fall_timeout_remaining -= dt;
            }

            *jump = false;
        }

        self.vertical_velocity =
            (self.vertical_velocity + tuning.gravity * dt).max(-tuning.terminal_velocity);

        jumped
    }

    /// Slide entry, countdown and the staged capsule restore.
    pub fn tick_slide(
        &mut self,
        slide_key_down: bool,
        tuning: &LocomotionTuning,
        dt: f32,
    ) -> SlideEvent {
        match self.phase {
            LocomotionPhase::Sliding => {
                if self.slide_restore_timer > 0.0 {
                    self.slide_restore_timer -= dt;
                    if self.slide_restore_timer <= 0.0 || tuning.slide_restore_time <= 0.0 {
                        self.finish_slide_restore(tuning);
                        return SlideEvent::RestoreFinished;
                    }
                    let t = 1.0 - self.slide_restore_timer / tuning.slide_restore_time;
                    self.capsule_height =
                        tuning.slide_height + (tuning.standing_height - tuning.slide_height) * t;
                    self.capsule_center_y = tuning.slide_center_y
                        + (tuning.standing_center_y - tuning.slide_center_y) * t;
                } else {
                    self.slide_timer -= dt;
                    if self.slide_timer <= 0.0 {
                        // Zero-crossing arms the restore exactly once
                        if tuning.slide_restore_time <= 0.0 {
                            self.finish_slide_restore(tuning);
                            return SlideEvent::RestoreFinished;
                        }
                        self.slide_restore_timer = tuning.slide_restore_time;
                    }
                }
                SlideEvent::None
            }
            LocomotionPhase::Normal => {
                if slide_key_down && self.grounded && !self.wall_run_pending {
                    self.phase = LocomotionPhase::Sliding;
                    self.slide_timer = tuning.slide_duration;
                    self.slide_restore_timer = 0.0;
                    self.capsule_height = tuning.slide_height;
                    self.capsule_center_y = tuning.slide_center_y;
                    SlideEvent::Started
                } else {
                    SlideEvent::None
                }
            }
            _ => SlideEvent::None,
        }
    }

    fn finish_slide_restore(&mut self, tuning: &LocomotionTuning) {
        self.capsule_height = tuning.standing_height;
        self.capsule_center_y = tuning.standing_center_y;
        self.slide_restore_timer = 0.0;
        self.phase = LocomotionPhase::Normal;
    }

    /// Pending-activation delay and the wall-run countdown.
    pub fn tick_wall_run(&mut self, tuning: &LocomotionTuning, dt: f32) -> WallRunEvent {
        if self.wall_run_pending {
            self.wall_run_delay_timer -= dt;
            if self.wall_run_delay_timer <= 0.0 {
                self.wall_run_pending = false;
                // A competing transition (slide, hit) cancels the pending
                // activation by leaving Normal before the delay elapses.
                if self.phase == LocomotionPhase::Normal {
                    self.phase = LocomotionPhase::WallRunning;
                    self.wall_run_timer = tuning.wall_run_duration;
                    self.vertical_velocity = 0.0;
                    return WallRunEvent::Started;
                }
            }
            return WallRunEvent::None;
        }

        if self.phase == LocomotionPhase::WallRunning {
            self.wall_run_timer -= dt;
            if self.wall_run_timer <= 0.0 {
                self.phase = LocomotionPhase::Normal;
                self.wall_run_timer = 0.0;
                self.target_yaw += tuning.wall_run_rotation_angle.to_radians();
                return WallRunEvent::Ended;
            }
        }

        WallRunEvent::None
    }

    /// Route one already-filtered surface contact into the transition
    /// table. The router has applied the HitLegs normal threshold before
    /// this is called.
    pub fn on_surface_contact(
        &mut self,
        kind: Surface,
        tuning: &LocomotionTuning,
    ) -> ContactOutcome {
        match kind {
            Surface::WallRun => {
                // De-duplicated by the pending flag: at most one pending
                // activation regardless of how many contacts fire
                if self.phase != LocomotionPhase::WallRunning
                    && !self.wall_run_pending
                    && !self.is_dead()
                {
                    self.wall_run_pending = true;
                    self.wall_run_delay_timer = tuning.wall_run_delay;
                    ContactOutcome::WallRunScheduled
                } else {
                    ContactOutcome::Ignored
                }
            }
            Surface::HitLegs => {
                if self.is_dead() {
                    ContactOutcome::Ignored
                } else {
                    self.enter_hit(LocomotionPhase::HitLegs, tuning);
                    ContactOutcome::EnteredHitLegs
                }
            }
            Surface::HitShelf => {
                if self.phase == LocomotionPhase::HitShelf {
                    ContactOutcome::Ignored
                } else {
                    self.enter_hit(LocomotionPhase::HitShelf, tuning);
                    ContactOutcome::EnteredHitShelf
                }
            }
        }
    }

    fn enter_hit(&mut self, phase: LocomotionPhase, tuning: &LocomotionTuning) {
        self.phase = phase;
        self.hit_stop_timer = tuning.hit_stop_delay;
        self.hit_pause_timer = tuning.hit_pause_delay;
        // A scheduled wall run must not fire out of a death pose
        self.wall_run_pending = false;
        self.wall_run_delay_timer = 0.0;
    }

    /// Hit-phase countdowns. No transition table entry leaves a hit phase;
    /// only an explicit external reset does.
    pub fn tick_hit(&mut self, dt: f32) -> HitTick {
        let mut tick = HitTick::default();
        if !self.is_dead() {
            return tick;
        }

        if self.hit_stop_timer > 0.0 {
            self.hit_stop_timer -= dt;
            if self.hit_stop_timer <= 0.0 {
                self.frozen = true;
                tick.froze = true;
            }
        }

        if self.hit_pause_timer > 0.0 {
            self.hit_pause_timer -= dt;
            if self.hit_pause_timer <= 0.0 {
                tick.auto_pause = true;
            }
        }

        tick
    }

    /// Explicit external reset: back to the spawn-state record. The only
    /// way out of a hit phase.
    pub fn reset_for_attempt(&mut self, tuning: &LocomotionTuning) {
        *self = Self::new(tuning);
    }
}

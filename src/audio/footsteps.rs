//! Audio domain: footstep scheduling on the absolute clock.
//!
//! Footsteps are scheduled against `Time<Virtual>` elapsed time rather
//! than accumulated per-tick deltas, so a long frame cannot drift the
//! cadence and a frame hitch can never burst several steps at once.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::{AudioSettings, PlaySoundEvent, SoundKind};
use crate::core::RestartRequested;
use crate::movement::{Locomotion, LocomotionPhase, Player};

/// The single scheduled footstep instant.
#[derive(Resource, Debug, Default)]
pub struct FootstepClock {
    pub next_at: f64,
}

impl FootstepClock {
    /// At most one emission per call, however far `now` has moved past the
    /// scheduled instant. Reschedules relative to the clock, not to the
    /// emission, so missed intervals are dropped rather than backfilled.
    pub fn try_emit(&mut self, now: f64, interval: f64) -> bool {
        if now >= self.next_at {
            self.next_at = now + interval;
            true
        } else {
            false
        }
    }
}

/// Temporary footstep volume reduction, armed on jump and slide.
#[derive(Resource, Debug)]
pub struct FootstepMute {
    pub volume_scale: f32,
    pub timer: f32,
}

impl Default for FootstepMute {
    fn default() -> Self {
        Self {
            volume_scale: 1.0,
            timer: 0.0,
        }
    }
}

impl FootstepMute {
    pub fn arm(&mut self, muted_volume: f32, duration: f32) {
        self.volume_scale = muted_volume;
        self.timer = duration;
    }

    /// Count the window down. Full volume comes back only when the player
    /// is not in a hit phase; a death pose keeps its footsteps quiet.
    pub fn tick(&mut self, dt: f32, dead: bool) {
        if self.timer <= 0.0 {
            return;
        }
        self.timer -= dt;
        if self.timer <= 0.0 && !dead {
            self.volume_scale = 1.0;
        }
    }
}

pub(crate) fn init_footstep_clock(
    settings: Res<AudioSettings>,
    mut clock: ResMut<FootstepClock>,
    time: Res<Time<Virtual>>,
) {
    clock.next_at = time.elapsed_secs_f64() + f64::from(settings.footstep_interval);
}

pub(crate) fn reset_footstep_clock_on_restart(
    mut restart_events: MessageReader<RestartRequested>,
    settings: Res<AudioSettings>,
    mut clock: ResMut<FootstepClock>,
    time: Res<Time<Virtual>>,
) {
    if restart_events.read().count() == 0 {
        return;
    }
    clock.next_at = time.elapsed_secs_f64() + f64::from(settings.footstep_interval);
}

/// Emit a footstep when grounded in the plain running phase and the
/// scheduled instant has passed.
pub(crate) fn emit_footsteps(
    time: Res<Time<Virtual>>,
    settings: Res<AudioSettings>,
    mute: Res<FootstepMute>,
    mut clock: ResMut<FootstepClock>,
    players: Query<&Locomotion, With<Player>>,
    mut sounds: MessageWriter<PlaySoundEvent>,
) {
    let Ok(loco) = players.single() else {
        return;
    };

    if !loco.grounded || loco.phase != LocomotionPhase::Normal {
        return;
    }

    let now = time.elapsed_secs_f64();
    if clock.try_emit(now, f64::from(settings.footstep_interval)) {
        sounds.write(PlaySoundEvent::with_volume(
            SoundKind::Footstep,
            settings.footstep_volume * mute.volume_scale,
        ));
    }
}

/// Jump and slide noises cover the next few footsteps; drop their volume
/// for a short window.
pub(crate) fn arm_footstep_mute(
    mut events: MessageReader<PlaySoundEvent>,
    settings: Res<AudioSettings>,
    mut mute: ResMut<FootstepMute>,
) {
    for event in events.read() {
        if matches!(event.kind, SoundKind::Jump | SoundKind::Slide) {
            mute.arm(settings.muted_volume, settings.mute_duration);
        }
    }
}

pub(crate) fn tick_footstep_mute(
    time: Res<Time>,
    mut mute: ResMut<FootstepMute>,
    players: Query<&Locomotion, With<Player>>,
) {
    let dead = players.single().map(Locomotion::is_dead).unwrap_or(false);
    mute.tick(time.delta_secs(), dead);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_window_restores_after_duration() {
        let mut mute = FootstepMute::default();
        mute.arm(0.05, 0.5);
        assert_eq!(mute.volume_scale, 0.05);

        mute.tick(0.3, false);
        assert_eq!(mute.volume_scale, 0.05);

        mute.tick(0.3, false);
        assert_eq!(mute.volume_scale, 1.0);
    }

    #[test]
    fn test_mute_window_stays_muted_while_dead() {
        let mut mute = FootstepMute::default();
        mute.arm(0.05, 0.5);

        mute.tick(0.6, true);
        assert_eq!(mute.volume_scale, 0.05);
    }
}

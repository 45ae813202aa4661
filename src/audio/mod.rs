//! Audio domain: semantic sound events and the clip bank that plays them.
//!
//! Gameplay never touches clips directly; it emits [`PlaySoundEvent`]
//! messages and this module resolves them to a random clip of the right
//! kind. Mute and volume policy live here, outside the locomotion core.

mod footsteps;

pub use footsteps::{FootstepClock, FootstepMute};

use bevy::audio::{AudioSink, Volume};
use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;

use crate::core::{GamePaused, GameResumed, GameState};
use crate::movement::LocomotionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Footstep,
    Jump,
    Slide,
    Hit,
    Coin,
    Victory,
}

/// Semantic sound trigger. `volume` is a multiplier on top of the bank's
/// per-kind volume.
#[derive(Debug, Clone, Copy)]
pub struct PlaySoundEvent {
    pub kind: SoundKind,
    pub volume: f32,
}

impl PlaySoundEvent {
    pub fn new(kind: SoundKind) -> Self {
        Self { kind, volume: 1.0 }
    }

    pub fn with_volume(kind: SoundKind, volume: f32) -> Self {
        Self { kind, volume }
    }
}

impl Message for PlaySoundEvent {}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Seconds between footsteps on the absolute clock.
    pub footstep_interval: f32,
    pub footstep_volume: f32,
    /// Footstep volume multiplier while the mute window is active.
    pub muted_volume: f32,
    /// Length of the footstep mute window armed by jump and slide.
    pub mute_duration: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            footstep_interval: 0.245,
            footstep_volume: 1.0,
            muted_volume: 0.05,
            mute_duration: 0.5,
        }
    }
}

/// Clips for one sound kind, played at a base volume.
#[derive(Debug, Default)]
pub struct SoundList {
    pub volume: f32,
    pub clips: Vec<Handle<AudioSource>>,
}

#[derive(Resource, Debug, Default)]
pub struct SoundBank {
    sounds: HashMap<SoundKind, SoundList>,
}

impl SoundBank {
    pub fn insert(&mut self, kind: SoundKind, volume: f32, clips: Vec<Handle<AudioSource>>) {
        self.sounds.insert(kind, SoundList { volume, clips });
    }

    pub fn get(&self, kind: SoundKind) -> Option<&SoundList> {
        self.sounds.get(&kind)
    }
}

fn load_sound_bank(mut bank: ResMut<SoundBank>, asset_server: Res<AssetServer>) {
    bank.insert(
        SoundKind::Footstep,
        1.0,
        vec![
            asset_server.load("audio/footstep_01.ogg"),
            asset_server.load("audio/footstep_02.ogg"),
            asset_server.load("audio/footstep_03.ogg"),
        ],
    );
    bank.insert(SoundKind::Jump, 0.8, vec![asset_server.load("audio/jump.ogg")]);
    bank.insert(SoundKind::Slide, 0.8, vec![asset_server.load("audio/slide.ogg")]);
    bank.insert(SoundKind::Hit, 1.0, vec![asset_server.load("audio/hit.ogg")]);
    bank.insert(SoundKind::Coin, 0.9, vec![asset_server.load("audio/coin.ogg")]);
    bank.insert(
        SoundKind::Victory,
        1.0,
        vec![asset_server.load("audio/victory.ogg")],
    );
}

/// Resolve sound events to clips. A kind with no bank entry is skipped;
/// a missing clip must never abort the tick.
fn play_sounds(
    mut commands: Commands,
    mut events: MessageReader<PlaySoundEvent>,
    bank: Res<SoundBank>,
) {
    let mut rng = rand::rng();

    for event in events.read() {
        let Some(list) = bank.get(event.kind) else {
            debug!("No clips registered for {:?}", event.kind);
            continue;
        };
        if list.clips.is_empty() {
            continue;
        }

        let clip = list.clips[rng.random_range(0..list.clips.len())].clone();
        commands.spawn((
            AudioPlayer::new(clip),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(event.volume * list.volume)),
        ));
    }
}

/// Marker for the looping gameplay track.
#[derive(Component)]
struct GameplayMusic;

/// The track starts with the first run and survives pause/resume; victory
/// tears it down so the jingle stands alone.
fn start_music(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    existing: Query<Entity, With<GameplayMusic>>,
) {
    if !existing.is_empty() {
        return;
    }
    commands.spawn((
        GameplayMusic,
        AudioPlayer::new(asset_server.load("audio/risk.ogg")),
        PlaybackSettings::LOOP,
    ));
}

fn stop_music(mut commands: Commands, music: Query<Entity, With<GameplayMusic>>) {
    for entity in &music {
        commands.entity(entity).despawn();
    }
}

/// Master mute toggle, M key. Future spawns go through the global volume;
/// sinks already playing are adjusted in place.
fn toggle_global_mute(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut global_volume: ResMut<GlobalVolume>,
    mut sinks: Query<&mut AudioSink>,
    mut muted: Local<bool>,
) {
    if !keyboard.just_pressed(KeyCode::KeyM) {
        return;
    }

    *muted = !*muted;
    let volume = Volume::Linear(if *muted { 0.0 } else { 1.0 });
    global_volume.volume = volume;
    for mut sink in &mut sinks {
        sink.set_volume(volume);
    }
    info!("Audio {}", if *muted { "muted" } else { "unmuted" });
}

/// The pause menu freezes every playing sink; resume releases them.
fn pause_sinks_with_game(
    mut paused: MessageReader<GamePaused>,
    mut resumed: MessageReader<GameResumed>,
    sinks: Query<&AudioSink>,
) {
    if paused.read().count() > 0 {
        for sink in &sinks {
            sink.pause();
        }
    }
    if resumed.read().count() > 0 {
        for sink in &sinks {
            sink.play();
        }
    }
}

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioSettings>()
            .init_resource::<SoundBank>()
            .init_resource::<FootstepClock>()
            .init_resource::<FootstepMute>()
            .add_message::<PlaySoundEvent>()
            .add_systems(Startup, (load_sound_bank, footsteps::init_footstep_clock))
            .add_systems(OnEnter(GameState::Run), start_music)
            .add_systems(OnEnter(GameState::Victory), stop_music)
            .add_systems(
                Update,
                (
                    footsteps::emit_footsteps
                        .after(LocomotionSet)
                        .run_if(in_state(GameState::Run)),
                    footsteps::arm_footstep_mute.after(LocomotionSet),
                    footsteps::tick_footstep_mute,
                    footsteps::reset_footstep_clock_on_restart,
                    play_sounds.after(footsteps::emit_footsteps),
                    toggle_global_mute,
                    pause_sinks_with_game,
                ),
            );
    }
}

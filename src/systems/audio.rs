//! Audio cue dispatch.
//!
//! Gameplay systems write [`AudioEvent`]s; [`audio_system`] forwards them to
//! whichever [`AudioBackend`] the host installed. Mixing and decoding happen
//! outside this crate.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::ResMut,
};
use tracing::{debug, trace};

/// Sound effects and music the game can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::EnumIter, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum SoundCue {
    Coin,
    #[strum(serialize = "powerup")]
    PowerUp,
    Blip,
    Hit,
    Portal,
    BgSound,
}

impl SoundCue {
    /// Asset name the host should load for this cue.
    pub fn asset_name(self) -> &'static str {
        self.into()
    }
}

/// Playback parameters for a cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayParams {
    /// Pitch offset in cents.
    pub detune: f32,
    pub volume: f32,
    pub looping: bool,
}

impl Default for PlayParams {
    fn default() -> Self {
        Self {
            detune: 0.0,
            volume: 1.0,
            looping: false,
        }
    }
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AudioEvent {
    Play(SoundCue, PlayParams),
    /// Stop the looping background track.
    StopMusic,
}

impl AudioEvent {
    pub fn play(cue: SoundCue) -> Self {
        AudioEvent::Play(cue, PlayParams::default())
    }
}

/// Whatever actually makes noise.
pub trait AudioBackend: Send + Sync {
    fn play(&mut self, cue: SoundCue, params: PlayParams);
    fn stop_music(&mut self);
}

/// Backend that only logs; used headless and in tests.
#[derive(Debug, Default)]
pub struct TracingAudio;

impl AudioBackend for TracingAudio {
    fn play(&mut self, cue: SoundCue, params: PlayParams) {
        trace!(cue = cue.asset_name(), ?params, "Play");
    }

    fn stop_music(&mut self) {
        trace!("Stop music");
    }
}

#[derive(Resource)]
pub struct AudioResource(pub Box<dyn AudioBackend>);

impl Default for AudioResource {
    fn default() -> Self {
        Self(Box::new(TracingAudio))
    }
}

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    pub muted: bool,
    /// Cues forwarded to the backend since startup.
    pub played: u64,
}

/// System that forwards audio events to the backend
pub fn audio_system(mut audio: ResMut<AudioResource>, mut state: ResMut<AudioState>, mut events: EventReader<AudioEvent>) {
    for event in events.read() {
        match *event {
            AudioEvent::Play(cue, params) => {
                if state.muted {
                    debug!(?cue, "Skipping sound due to audio state");
                    continue;
                }
                audio.0.play(cue, params);
                state.played += 1;
            }
            AudioEvent::StopMusic => audio.0.stop_music(),
        }
    }
}

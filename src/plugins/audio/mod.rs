//! Keyed audio cues.
//!
//! The game addresses sounds by key ("BGM", "Death", ...). `AudioCues`
//! tracks the play state of every registered cue; unknown keys are an
//! `AudioError`. Gameplay code uses `play_or_warn`, so a missing cue never
//! interrupts a defeat or a hit.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use thiserror::Error;

use crate::common::config::GameConfig;
use crate::common::state::GameState;
use crate::common::tags::cues;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("no audio cue registered under \"{0}\"")]
    NotFound(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CueState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Clone, Debug, Default)]
struct Cue {
    state: CueState,
    plays: u32,
}

#[derive(Resource, Debug, Default)]
pub struct AudioCues {
    cues: HashMap<String, Cue>,
}

impl AudioCues {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cues: keys
                .into_iter()
                .map(|k| (k.into(), Cue::default()))
                .collect(),
        }
    }

    fn cue_mut(&mut self, key: &str) -> Result<&mut Cue, AudioError> {
        self.cues
            .get_mut(key)
            .ok_or_else(|| AudioError::NotFound(key.to_string()))
    }

    fn cue(&self, key: &str) -> Result<&Cue, AudioError> {
        self.cues
            .get(key)
            .ok_or_else(|| AudioError::NotFound(key.to_string()))
    }

    /// Start (or restart) a cue.
    pub fn play(&mut self, key: &str) -> Result<(), AudioError> {
        let cue = self.cue_mut(key)?;
        cue.state = CueState::Playing;
        cue.plays += 1;
        debug!("audio cue {key}");
        Ok(())
    }

    pub fn stop(&mut self, key: &str) -> Result<(), AudioError> {
        self.cue_mut(key)?.state = CueState::Stopped;
        Ok(())
    }

    /// Pausing a stopped cue leaves it stopped.
    pub fn pause(&mut self, key: &str) -> Result<(), AudioError> {
        let cue = self.cue_mut(key)?;
        if cue.state == CueState::Playing {
            cue.state = CueState::Paused;
        }
        Ok(())
    }

    pub fn unpause(&mut self, key: &str) -> Result<(), AudioError> {
        let cue = self.cue_mut(key)?;
        if cue.state == CueState::Paused {
            cue.state = CueState::Playing;
        }
        Ok(())
    }

    pub fn is_playing(&self, key: &str) -> Result<bool, AudioError> {
        Ok(self.cue(key)?.state == CueState::Playing)
    }

    pub fn state(&self, key: &str) -> Result<CueState, AudioError> {
        Ok(self.cue(key)?.state)
    }

    /// How many times `key` was started. Zero for unknown keys.
    pub fn plays(&self, key: &str) -> u32 {
        self.cues.get(key).map_or(0, |c| c.plays)
    }

    pub fn play_or_warn(&mut self, key: &str) {
        if let Err(err) = self.play(key) {
            warn!("{err}");
        }
    }
}

pub fn plugin(app: &mut App) {
    let keys = app.world().resource::<GameConfig>().audio_cues.clone();
    app.insert_resource(AudioCues::from_keys(keys))
        .add_systems(OnEnter(GameState::InGame), start_music)
        .add_systems(OnEnter(GameState::GameOver), stop_music);
}

fn start_music(mut audio: ResMut<AudioCues>) {
    audio.play_or_warn(cues::BGM);
}

fn stop_music(mut audio: ResMut<AudioCues>) {
    if let Err(err) = audio.stop(cues::BGM) {
        warn!("{err}");
    }
}

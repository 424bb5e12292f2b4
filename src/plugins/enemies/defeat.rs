//! What happens when an enemy goes down.

use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::tags::{self, cues};
use crate::plugins::audio::AudioCues;
use crate::plugins::director::wave::WaveDirector;
use crate::plugins::player::messages::WaveLevelUp;
use crate::plugins::pooling::SpawnRequest;

/// Shared defeat side effects: death cue, tinted death effect and, for
/// earned defeats, wave experience.
#[derive(SystemParam)]
pub struct DefeatHooks<'w> {
    pub director: ResMut<'w, WaveDirector>,
    pub audio: ResMut<'w, AudioCues>,
    pub spawns: MessageWriter<'w, SpawnRequest>,
    pub level_ups: MessageWriter<'w, WaveLevelUp>,
}

impl DefeatHooks<'_> {
    /// `experience` is `None` for defeats the player did not earn
    /// (lifetime expiry, chasers ramming the player).
    pub fn defeated(&mut self, position: Vec2, tint: Color, experience: Option<u32>) {
        if let Some(experience) = experience {
            self.award(experience);
        }
        self.audio.play_or_warn(cues::DEATH);
        self.spawns
            .write(SpawnRequest::at(tags::DEATH_EFFECT, position, 0.0).with_tint(tint));
    }

    pub fn award(&mut self, experience: u32) {
        if let Some(level) = self.director.on_enemy_defeated(experience) {
            info!("wave level {level}");
            self.level_ups.write(WaveLevelUp { level });
        }
    }
}

//! Run lifecycle: pause, game over and retry.
//!
//! Pausing stops virtual time, which freezes every fixed-step system while
//! presentation keeps running. The background track pauses with it.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tags::cues;
use crate::plugins::audio::AudioCues;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), reset_clock)
        .add_systems(OnEnter(GameState::GameOver), announce_game_over)
        .add_systems(Update, toggle_pause.run_if(in_state(GameState::InGame)))
        .add_systems(Update, retry.run_if(in_state(GameState::GameOver)));
}

/// A new run starts at normal speed, unpaused.
pub fn reset_clock(mut time: ResMut<Time<Virtual>>) {
    time.set_relative_speed(1.0);
    time.unpause();
}

pub fn set_paused(time: &mut Time<Virtual>, audio: &mut AudioCues, paused: bool) {
    if paused == time.is_paused() {
        return;
    }
    if paused {
        time.pause();
        audio.pause(cues::BGM).unwrap_or_else(|err| warn!("{err}"));
    } else {
        time.unpause();
        audio.unpause(cues::BGM).unwrap_or_else(|err| warn!("{err}"));
    }
    info!("{}", if paused { "paused" } else { "resumed" });
}

fn toggle_pause(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut time: ResMut<Time<Virtual>>,
    mut audio: ResMut<AudioCues>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::Escape) {
        let paused = !time.is_paused();
        set_paused(&mut time, &mut audio, paused);
    }
}

fn announce_game_over(mut time: ResMut<Time<Virtual>>) {
    // An ability window may have been open when the player went down.
    time.set_relative_speed(1.0);
    info!("game over, press R to retry");
}

fn retry(keys: Option<Res<ButtonInput<KeyCode>>>, mut next: ResMut<NextState<GameState>>) {
    if keys.is_some_and(|keys| keys.just_pressed(KeyCode::KeyR)) {
        next.set(GameState::InGame);
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::common::test_utils::run_system_once;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(Time::<Virtual>::default());
        world.insert_resource(AudioCues::from_keys([cues::BGM]));
        world
    }

    fn pause(world: &mut World, paused: bool) {
        world
            .run_system_once(
                move |mut time: ResMut<Time<Virtual>>, mut audio: ResMut<AudioCues>| {
                    set_paused(&mut time, &mut audio, paused)
                },
            )
            .expect("system run failed");
    }

    #[test]
    fn pausing_stops_time_and_music() {
        let mut world = world();
        world.resource_mut::<AudioCues>().play(cues::BGM).unwrap();

        pause(&mut world, true);
        assert!(world.resource::<Time<Virtual>>().is_paused());
        assert_eq!(
            world.resource::<AudioCues>().state(cues::BGM),
            Ok(crate::plugins::audio::CueState::Paused)
        );

        pause(&mut world, false);
        assert!(!world.resource::<Time<Virtual>>().is_paused());
        assert_eq!(world.resource::<AudioCues>().is_playing(cues::BGM), Ok(true));
    }

    #[test]
    fn pausing_twice_is_a_no_op() {
        let mut world = world();
        world.resource_mut::<AudioCues>().play(cues::BGM).unwrap();
        pause(&mut world, true);
        pause(&mut world, true);
        pause(&mut world, false);
        assert!(!world.resource::<Time<Virtual>>().is_paused());
    }

    #[test]
    fn new_run_resets_the_clock() {
        let mut world = world();
        {
            let mut time = world.resource_mut::<Time<Virtual>>();
            time.set_relative_speed(0.5);
            time.pause();
        }
        run_system_once(&mut world, reset_clock);

        let time = world.resource::<Time<Virtual>>();
        assert!(!time.is_paused());
        assert_eq!(time.relative_speed(), 1.0);
    }
}

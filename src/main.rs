use bevy::prelude::*;

use spaccanavi::common::config::GameConfig;

fn main() -> AppExit {
    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("spaccanavi: {err}");
            return AppExit::error();
        }
    };
    spaccanavi::game::run(config)
}

//! macroquad front end: keyboard in, frames out.

mod audio;
mod input;
mod render;

use macroquad::prelude::*;
use snake_vibes::config::CONFIG_FILE;
use snake_vibes::{Flow, Game, GameConfig, JsonLeaderboard};
use tracing::info;

use audio::Cues;

pub fn window_conf() -> Conf {
    let defaults = GameConfig::default();
    Conf {
        window_title: "Snake Vibes".to_owned(),
        window_width: defaults.grid_width * render::CELL_PX,
        window_height: defaults.grid_height * render::CELL_PX + render::HUD_PX,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

pub async fn run() {
    let config = GameConfig::load(CONFIG_FILE);
    info!(
        grid = %format!("{}x{}", config.grid_width, config.grid_height),
        scores = %config.scores_path.display(),
        "config ready"
    );
    let store = JsonLeaderboard::new(config.scores_path.clone());
    let mut game = Game::new(config, store);
    let cues = Cues::load().await;

    'frames: loop {
        let dt = get_frame_time().min(game.config().max_frame_dt);

        for event in input::poll(game.scene()) {
            if game.handle_input(event) == Flow::Quit {
                break 'frames;
            }
        }

        let outcome = game.update(dt);
        cues.play(&outcome);

        render::draw(&game, get_time());
        next_frame().await;
    }
}

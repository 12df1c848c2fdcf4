use macroquad::prelude::*;
use snake_vibes::{Direction, GameInput, Scene};

// Letters bound to commands never reach the name buffer.
const COMMAND_LETTERS: [char; 2] = ['r', 'h'];

const MOVE_KEYS: [(KeyCode, KeyCode, Direction); 4] = [
    (KeyCode::Up, KeyCode::W, Direction::Up),
    (KeyCode::Down, KeyCode::S, Direction::Down),
    (KeyCode::Left, KeyCode::A, Direction::Left),
    (KeyCode::Right, KeyCode::D, Direction::Right),
];

fn confirm_pressed(allow_space: bool) -> bool {
    is_key_pressed(KeyCode::Enter)
        || is_key_pressed(KeyCode::KpEnter)
        || (allow_space && is_key_pressed(KeyCode::Space))
}

/// Translates this frame's key presses into game inputs, using the bindings
/// of the active scene.
pub fn poll(scene: Scene) -> Vec<GameInput> {
    let mut inputs = Vec::new();

    if is_key_pressed(KeyCode::Escape) {
        inputs.push(GameInput::Quit);
    }
    if is_key_pressed(KeyCode::R) {
        inputs.push(GameInput::Restart);
    }
    if is_key_pressed(KeyCode::H) {
        inputs.push(GameInput::ShowScores);
    }

    match scene {
        Scene::Start | Scene::HighScores => {
            if confirm_pressed(true) {
                inputs.push(GameInput::Confirm);
            }
        }
        Scene::Play => {
            for (arrow, letter, dir) in MOVE_KEYS {
                if is_key_pressed(arrow) || is_key_pressed(letter) {
                    inputs.push(GameInput::Move(dir));
                }
            }
            if is_key_pressed(KeyCode::P) {
                inputs.push(GameInput::TogglePause);
            }
        }
        Scene::GameOver => {
            if confirm_pressed(false) {
                inputs.push(GameInput::Confirm);
            }
            if is_key_pressed(KeyCode::Backspace) {
                inputs.push(GameInput::Backspace);
            }
        }
    }

    // Drain typed characters every frame so none leak into a later scene.
    while let Some(ch) = get_char_pressed() {
        if scene == Scene::GameOver && !COMMAND_LETTERS.contains(&ch.to_ascii_lowercase()) {
            inputs.push(GameInput::Char(ch));
        }
    }

    inputs
}

//! Scene state machine and the fixed-step simulation clock.
//!
//! Input events and frame time arrive from the outside; the game advances the
//! snake in whole ticks, carrying fractional progress across frames so that
//! the renderer can blend between the last two bodies.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::food;
use crate::grid::{Cell, Direction, Grid};
use crate::interp::Interpolation;
use crate::leaderboard::{self, HighScoreEntry, NAME_MAX_LEN, ScoreStore};
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    Start,
    Play,
    GameOver,
    HighScores,
}

/// Binding-independent player intents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameInput {
    Move(Direction),
    Confirm,
    Restart,
    TogglePause,
    ShowScores,
    Quit,
    Backspace,
    Char(char),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    SelfCollision,
    /// Nowhere left to put food.
    BoardFull,
}

/// What happened during one `update` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub ticks: u32,
    pub food_eaten: u32,
    pub game_over: Option<DeathCause>,
}

enum TickResult {
    Moved,
    Ate,
    Died(DeathCause),
}

pub struct Game<S: ScoreStore> {
    config: GameConfig,
    grid: Grid,
    scene: Scene,
    snake: Snake,
    food: Cell,
    score: u32,
    paused: bool,
    move_hz: f32,
    move_accum: f32,
    last_body: Vec<Cell>,
    name: String,
    saved: bool,
    high_scores: Vec<HighScoreEntry>,
    store: S,
    rng: StdRng,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Deterministic food placement for a given seed.
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Self {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, store: S, rng: StdRng) -> Self {
        let config = config.normalized();
        let grid = config.grid();
        let snake = Snake::new(grid.center(), config.start_length, Direction::Right);
        let mut game = Self {
            grid,
            scene: Scene::Start,
            last_body: snake.body().iter().copied().collect(),
            food: grid.center(),
            snake,
            score: 0,
            paused: false,
            move_hz: config.move_hz_start,
            move_accum: 0.0,
            name: String::new(),
            saved: false,
            high_scores: Vec::new(),
            store,
            rng,
            config,
        };
        game.reset();
        game
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_hz(&self) -> f32 {
        self.move_hz
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Name typed on the game over screen so far.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Table shown on the high score screen, best first.
    pub fn high_scores(&self) -> &[HighScoreEntry] {
        &self.high_scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn interpolation(&self) -> Interpolation<'_> {
        let current: Vec<Cell> = self.snake.body().iter().copied().collect();
        let previous: &[Cell] = &self.last_body;
        Interpolation {
            previous,
            alpha: self.move_accum.clamp(0.0, 1.0),
            current,
        }
    }

    /// Fresh round: centered snake heading right, zero score, base speed and
    /// new food. The scene is left alone.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.grid.center(), self.config.start_length, Direction::Right);
        self.score = 0;
        self.paused = false;
        self.move_hz = self.config.move_hz_start;
        self.move_accum = 0.0;
        self.last_body = self.snake.body().iter().copied().collect();
        self.name.clear();
        self.saved = false;
        if let Some(food) = self.spawn_food() {
            self.food = food;
        }
    }

    fn spawn_food(&mut self) -> Option<Cell> {
        let food = food::spawn(&self.grid, &self.snake.occupied(), self.config.spawn_attempts, &mut self.rng);
        if let Some(cell) = food {
            debug!(x = cell.x, y = cell.y, "food spawned");
        }
        food
    }

    fn enter(&mut self, scene: Scene) {
        if scene != self.scene {
            info!(from = ?self.scene, to = ?scene, "scene change");
        }
        self.scene = scene;
        self.paused = false;
        match scene {
            Scene::GameOver => {
                self.name.clear();
                self.saved = false;
            }
            Scene::HighScores => self.high_scores = self.store.load(),
            Scene::Start | Scene::Play => {}
        }
    }

    fn restart_into(&mut self, scene: Scene) {
        self.reset();
        self.enter(scene);
    }

    pub fn handle_input(&mut self, input: GameInput) -> Flow {
        if input == GameInput::Quit {
            info!(scene = ?self.scene, "quit requested");
            return Flow::Quit;
        }
        match self.scene {
            Scene::Start => match input {
                GameInput::Confirm => self.restart_into(Scene::Play),
                GameInput::ShowScores => self.enter(Scene::HighScores),
                GameInput::Restart => self.restart_into(Scene::Start),
                _ => {}
            },
            Scene::Play => match input {
                GameInput::Move(dir) => self.snake.set_direction(dir),
                GameInput::TogglePause => {
                    self.paused = !self.paused;
                    debug!(paused = self.paused, "pause toggled");
                }
                GameInput::Restart => self.restart_into(Scene::Play),
                GameInput::ShowScores => self.enter(Scene::HighScores),
                _ => {}
            },
            Scene::GameOver => match input {
                GameInput::Restart => self.restart_into(Scene::Play),
                GameInput::ShowScores => self.enter(Scene::HighScores),
                GameInput::Confirm => self.save_score(),
                GameInput::Backspace => {
                    if !self.saved {
                        self.name.pop();
                    }
                }
                GameInput::Char(ch) => self.type_char(ch),
                _ => {}
            },
            Scene::HighScores => match input {
                GameInput::Confirm | GameInput::Restart => self.restart_into(Scene::Play),
                _ => {}
            },
        }
        Flow::Continue
    }

    fn type_char(&mut self, ch: char) {
        if self.saved || !leaderboard::is_printable(ch) || self.name.chars().count() >= NAME_MAX_LEN {
            return;
        }
        self.name.push(ch);
    }

    fn save_score(&mut self) {
        if self.saved {
            return;
        }
        self.high_scores = self.store.save(&self.name, i64::from(self.score), self.config.keep_max);
        self.saved = true;
        info!(name = %self.name, score = self.score, "score recorded");
    }

    /// Feeds one frame of real time into the simulation. Runs as many whole
    /// ticks as have accumulated; does nothing outside an unpaused round.
    pub fn update(&mut self, frame_dt: f32) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if self.scene != Scene::Play || self.paused {
            return outcome;
        }
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.move_accum += frame_dt * self.move_hz;
        }
        while self.move_accum >= 1.0 {
            self.move_accum -= 1.0;
            outcome.ticks += 1;
            match self.tick() {
                TickResult::Moved => {}
                TickResult::Ate => outcome.food_eaten += 1,
                TickResult::Died(cause) => {
                    outcome.game_over = Some(cause);
                    break;
                }
            }
        }
        outcome
    }

    fn tick(&mut self) -> TickResult {
        self.last_body.clear();
        self.last_body.extend(self.snake.body().iter().copied());

        let ahead = self.snake.head().step(self.snake.effective_direction());
        let will_eat = ahead == self.food;
        let head = self.snake.step(will_eat);
        trace!(x = head.x, y = head.y, will_eat, "tick");

        if !self.grid.contains(head) {
            return self.die(DeathCause::Wall);
        }
        if self.snake.head_hits_body() {
            return self.die(DeathCause::SelfCollision);
        }
        if !will_eat {
            return TickResult::Moved;
        }

        self.score = self.score.saturating_add(self.config.score_per_food);
        self.move_hz = (self.move_hz + self.config.move_hz_step)
            .clamp(self.config.move_hz_start, self.config.move_hz_max);
        debug!(score = self.score, move_hz = self.move_hz, length = self.snake.len(), "food eaten");
        match self.spawn_food() {
            Some(food) => {
                self.food = food;
                TickResult::Ate
            }
            None => self.die(DeathCause::BoardFull),
        }
    }

    fn die(&mut self, cause: DeathCause) -> TickResult {
        info!(?cause, score = self.score, length = self.snake.len(), "game over");
        self.enter(Scene::GameOver);
        TickResult::Died(cause)
    }
}

use macroquad::prelude::*;
use snake_vibes::interp::{Position, lerp};
use snake_vibes::{Cell, Game, Scene, ScoreStore};

pub const CELL_PX: i32 = 24;
pub const HUD_PX: i32 = 96;

const BG_TOP: Color = Color::new(0.05, 0.07, 0.15, 1.0);
const GRID_LINE: Color = Color::new(1.0, 1.0, 1.0, 0.08);
const PANEL: Color = Color::new(0.05, 0.06, 0.13, 0.9);
const PANEL_EDGE: Color = Color::new(1.0, 1.0, 1.0, 0.16);
const TEXT: Color = Color::new(0.93, 0.94, 1.0, 1.0);
const HINT: Color = Color::new(0.67, 0.71, 0.82, 1.0);
const GOLD: Color = Color::new(1.0, 0.86, 0.47, 1.0);
const CYAN: Color = Color::new(0.0, 0.94, 1.0, 1.0);
const PINK: Color = Color::new(1.0, 0.27, 0.86, 1.0);
const FOOD: Color = Color::new(1.0, 0.72, 0.0, 1.0);

fn mix(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(lerp(a.r, b.r, t), lerp(a.g, b.g, t), lerp(a.b, b.b, t), lerp(a.a, b.a, t))
}

fn pulse(time: f64, speed: f64) -> f32 {
    (0.5 + 0.5 * (time * speed).sin()) as f32
}

/// Maps grid coordinates to screen pixels, keeping cells square and the
/// field centered below the HUD.
struct Layout {
    cell: f32,
    off_x: f32,
    off_y: f32,
    field_w: f32,
    field_h: f32,
}

impl Layout {
    fn new(grid_w: i32, grid_h: i32) -> Self {
        let sw = screen_width();
        let sh = screen_height();
        let hud = HUD_PX as f32;
        let cell = (sw / grid_w as f32).min((sh - hud).max(1.0) / grid_h as f32);
        let field_w = cell * grid_w as f32;
        let field_h = cell * grid_h as f32;
        Self {
            cell,
            off_x: (sw - field_w) * 0.5,
            off_y: hud + (sh - hud - field_h).max(0.0) * 0.5,
            field_w,
            field_h,
        }
    }

    fn rect_at(&self, x: f32, y: f32, inset: f32) -> Rect {
        Rect::new(
            self.off_x + x * self.cell + inset,
            self.off_y + y * self.cell + inset,
            self.cell - inset * 2.0,
            self.cell - inset * 2.0,
        )
    }
}

fn draw_centered(text: &str, cx: f32, y: f32, size: u16, color: Color) {
    let m = measure_text(text, None, size, 1.0);
    draw_text(text, cx - m.width * 0.5, y, size as f32, color);
}

fn draw_panel(rect: Rect) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, PANEL_EDGE);
}

fn draw_grid(layout: &Layout, grid_w: i32, grid_h: i32) {
    for x in 0..=grid_w {
        let px = layout.off_x + x as f32 * layout.cell;
        draw_line(px, layout.off_y, px, layout.off_y + layout.field_h, 1.0, GRID_LINE);
    }
    for y in 0..=grid_h {
        let py = layout.off_y + y as f32 * layout.cell;
        draw_line(layout.off_x, py, layout.off_x + layout.field_w, py, 1.0, GRID_LINE);
    }
}

fn draw_hud<S: ScoreStore>(game: &Game<S>, score: u32, move_hz: f32, time: f64) {
    let sw = screen_width();
    draw_panel(Rect::new(16.0, 16.0, sw - 32.0, HUD_PX as f32 - 24.0));
    draw_text("SNAKE VIBES", 32.0, 50.0, 40.0, mix(PINK, CYAN, pulse(time, 0.9)));
    if game.scene() == Scene::Play && game.is_paused() {
        let m = measure_text("PAUSED", None, 40, 1.0);
        draw_text("PAUSED", sw - 32.0 - m.width, 50.0, 40.0, GOLD);
    }
    draw_text(&format!("Score: {score}    Speed: {move_hz:.1} Hz"), 32.0, 78.0, 24.0, TEXT);

    let hints = "Move: Arrows/WASD  Pause: P  Restart: R  Scores: H  Quit: Esc";
    let m = measure_text(hints, None, 18, 1.0);
    draw_text(hints, sw - 32.0 - m.width, 78.0, 18.0, HINT);
}

fn draw_food(layout: &Layout, food: Cell, time: f64) {
    let p = pulse(time, 6.0);
    let glow = layout.rect_at(food.x as f32, food.y as f32, -layout.cell * 0.15 * p);
    draw_rectangle(glow.x, glow.y, glow.w, glow.h, Color::new(FOOD.r, FOOD.g, FOOD.b, 0.15 + 0.15 * p));
    let core = layout.rect_at(food.x as f32, food.y as f32, 3.0);
    draw_rectangle(core.x, core.y, core.w, core.h, mix(FOOD, PINK, p));
}

fn draw_snake(layout: &Layout, segments: &[Position], faded: bool) {
    let n = segments.len().max(2) - 1;
    for (i, seg) in segments.iter().enumerate().rev() {
        let mut color = mix(CYAN, PINK, i as f32 / n as f32);
        if faded {
            color.a = 0.45;
        }
        let r = layout.rect_at(seg.x, seg.y, 3.0);
        draw_rectangle(r.x, r.y, r.w, r.h, color);
    }
    if let Some(head) = segments.first() {
        let r = layout.rect_at(head.x, head.y, 2.0);
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, WHITE);
    }
}

fn draw_start(time: f64) {
    let cx = screen_width() * 0.5;
    let cy = screen_height() * 0.5 + 30.0;
    draw_centered("Press Enter to Start", cx, cy, 44, mix(PINK, CYAN, pulse(time, 1.4)));
    draw_centered("Eat the glowing food (+10). Don't bite yourself.", cx, cy + 40.0, 24, TEXT);
    draw_centered("H: High Scores   Esc: Quit", cx, cy + 70.0, 24, HINT);
}

fn draw_game_over<S: ScoreStore>(game: &Game<S>, time: f64) {
    let (sw, sh) = (screen_width(), screen_height());
    draw_rectangle(0.0, 0.0, sw, sh, Color::new(0.03, 0.03, 0.05, 0.6));

    let panel = Rect::new(sw * 0.5 - 280.0, sh * 0.5 - 140.0, 560.0, 280.0);
    draw_panel(panel);
    let cx = panel.x + panel.w * 0.5;
    draw_centered("GAME OVER", cx, panel.y + 48.0, 44, mix(PINK, CYAN, pulse(time, 1.2)));
    draw_centered(&format!("Score: {}", game.score()), cx, panel.y + 88.0, 26, TEXT);

    if game.is_saved() {
        draw_centered("Saved!", cx, panel.y + 128.0, 26, Color::new(0.55, 1.0, 0.63, 1.0));
        draw_centered("Press H for High Scores or R to Restart", cx, panel.y + 168.0, 24, HINT);
        return;
    }

    draw_centered("Enter your name (max 16) and press Enter to save:", cx, panel.y + 128.0, 22, HINT);
    let name_box = Rect::new(panel.x + 90.0, panel.y + 150.0, panel.w - 180.0, 44.0);
    draw_rectangle(name_box.x, name_box.y, name_box.w, name_box.h, Color::new(0.02, 0.03, 0.06, 0.9));
    draw_rectangle_lines(name_box.x, name_box.y, name_box.w, name_box.h, 2.0, PANEL_EDGE);
    let caret = if (time * 2.0) as i64 % 2 == 0 { "_" } else { " " };
    let shown = if game.name().is_empty() { "PLAYER" } else { game.name() };
    draw_centered(&format!("{shown}{caret}"), cx, name_box.y + 30.0, 28, TEXT);
    draw_centered("R: Restart   H: High Scores   Esc: Quit", cx, panel.y + panel.h - 24.0, 22, HINT);
}

fn draw_high_scores<S: ScoreStore>(game: &Game<S>, time: f64) {
    let (sw, sh) = (screen_width(), screen_height());
    let shown = game.config().high_scores_shown;
    let panel = Rect::new(sw * 0.5 - 320.0, sh * 0.5 - 220.0, 640.0, 420.0);
    draw_panel(panel);
    let cx = panel.x + panel.w * 0.5;
    draw_centered(&format!("HIGH SCORES (Top {shown})"), cx, panel.y + 48.0, 40, mix(CYAN, PINK, pulse(time, 1.1)));

    let scores = game.high_scores();
    if scores.is_empty() {
        draw_centered("No scores yet. Be the first!", cx, panel.y + 130.0, 26, TEXT);
    }
    let mut y = panel.y + 90.0;
    for (idx, entry) in scores.iter().take(shown).enumerate() {
        let row = Rect::new(panel.x + 70.0, y, panel.w - 140.0, 46.0);
        let fill = if idx % 2 == 0 { 0.45 } else { 0.65 };
        draw_rectangle(row.x, row.y, row.w, row.h, Color::new(0.04, 0.05, 0.1, fill));
        draw_text(&format!("{}.", idx + 1), row.x + 18.0, row.y + 30.0, 26.0, HINT);
        draw_text(&entry.name, row.x + 58.0, row.y + 30.0, 26.0, TEXT);
        let score = entry.score.to_string();
        let m = measure_text(&score, None, 26, 1.0);
        draw_text(&score, row.x + row.w - 18.0 - m.width, row.y + 30.0, 26.0, GOLD);
        y += 56.0;
    }
    draw_centered("Enter/Space: Play   R: Play   Esc: Quit", cx, panel.y + panel.h - 28.0, 22, HINT);
}

pub fn draw<S: ScoreStore>(game: &Game<S>, time: f64) {
    clear_background(BG_TOP);
    let grid = game.grid();
    let layout = Layout::new(grid.width(), grid.height());
    draw_grid(&layout, grid.width(), grid.height());

    match game.scene() {
        Scene::Start => {
            draw_hud(game, 0, game.config().move_hz_start, time);
            draw_start(time);
        }
        Scene::Play => {
            draw_hud(game, game.score(), game.move_hz(), time);
            draw_food(&layout, game.food(), time);
            draw_snake(&layout, &game.interpolation().positions(), false);
        }
        Scene::GameOver => {
            draw_hud(game, game.score(), game.move_hz(), time);
            let body: Vec<Position> = game.snake().body().iter().copied().map(Position::from).collect();
            draw_snake(&layout, &body, true);
            draw_game_over(game, time);
        }
        Scene::HighScores => {
            draw_hud(game, game.score(), game.move_hz(), time);
            draw_high_scores(game, time);
        }
    }
}

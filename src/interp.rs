//! Sub-tick blending between the body before and after the last tick.

use crate::grid::Cell;

/// Fractional grid position of a rendered segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl From<Cell> for Position {
    fn from(cell: Cell) -> Self {
        Position { x: cell.x as f32, y: cell.y as f32 }
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// What the presentation layer needs to draw a frame between two ticks.
#[derive(Clone, Debug)]
pub struct Interpolation<'a> {
    /// Body as it was before the most recent tick.
    pub previous: &'a [Cell],
    /// Body after the most recent tick, head first.
    pub current: Vec<Cell>,
    /// Progress towards the next tick, in `[0, 1]`.
    pub alpha: f32,
}

impl Interpolation<'_> {
    pub fn positions(&self) -> Vec<Position> {
        interpolate_body(self.previous, &self.current, self.alpha)
    }
}

/// Blends segments index by index. When the lengths differ (the snake just
/// grew) the shorter side repeats its last cell.
pub fn interpolate_body(previous: &[Cell], current: &[Cell], alpha: f32) -> Vec<Position> {
    let (Some(prev_last), Some(cur_last)) = (previous.last(), current.last()) else {
        return current.iter().copied().map(Position::from).collect();
    };
    let alpha = alpha.clamp(0.0, 1.0);
    let n = previous.len().max(current.len());
    (0..n)
        .map(|i| {
            let p = previous.get(i).unwrap_or(prev_last);
            let c = current.get(i).unwrap_or(cur_last);
            Position {
                x: lerp(p.x as f32, c.x as f32, alpha),
                y: lerp(p.y as f32, c.y as f32, alpha),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_between_ticks() {
        let prev = [Cell::new(16, 12), Cell::new(15, 12)];
        let cur = [Cell::new(17, 12), Cell::new(16, 12)];
        let out = interpolate_body(&prev, &cur, 0.5);
        assert_eq!(out, vec![Position { x: 16.5, y: 12.0 }, Position { x: 15.5, y: 12.0 }]);
    }

    #[test]
    fn grown_tail_repeats_previous_last_cell() {
        let prev = [Cell::new(16, 12), Cell::new(15, 12)];
        let cur = [Cell::new(17, 12), Cell::new(16, 12), Cell::new(15, 12)];
        let out = interpolate_body(&prev, &cur, 0.0);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], Position { x: 15.0, y: 12.0 });
    }

    #[test]
    fn alpha_is_clamped() {
        let prev = [Cell::new(0, 0)];
        let cur = [Cell::new(1, 0)];
        assert_eq!(interpolate_body(&prev, &cur, 3.0)[0], Position { x: 1.0, y: 0.0 });
        assert_eq!(interpolate_body(&prev, &cur, -1.0)[0], Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn empty_previous_draws_current() {
        let cur = [Cell::new(2, 3)];
        assert_eq!(interpolate_body(&[], &cur, 0.7), vec![Position { x: 2.0, y: 3.0 }]);
    }
}

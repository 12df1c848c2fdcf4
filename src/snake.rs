use std::collections::{HashSet, VecDeque};

use crate::grid::{Cell, Direction};

/// Ordered body cells, head first, plus the heading and at most one buffered
/// turn.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
}

impl Snake {
    /// Lays out `length` cells starting at `head` and trailing away from
    /// `direction`. The body always holds at least the head.
    pub fn new(head: Cell, length: usize, direction: Direction) -> Self {
        let trail = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        for _ in 0..length.max(1) {
            body.push_back(cell);
            cell = cell.step(trail);
        }
        Self { body, direction, pending: None }
    }

    /// Rebuilds a snake from explicit cells, head first. `None` when there
    /// are no cells.
    #[cfg(test)]
    pub(crate) fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction, pending: None })
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    /// Direction the next `step` will move in.
    pub fn effective_direction(&self) -> Direction {
        self.pending.unwrap_or(self.direction)
    }

    /// Buffers a turn for the next step. A request to reverse onto the neck is
    /// dropped; any earlier unconsumed turn is overwritten.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.pending = Some(direction);
    }

    /// Advances one cell, consuming the buffered turn. Returns the new head.
    pub fn step(&mut self, grow: bool) -> Cell {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
        new_head
    }

    /// True when the head shares a cell with any other segment.
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|c| *c == head)
    }
}

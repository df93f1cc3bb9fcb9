use super::direction::Direction;
use super::grid::{Cell, Grid};
use std::collections::{HashSet, VecDeque};

/// The player's snake: an ordered run of cells with the head at the front of
/// the deque, plus the committed heading and the turn buffered from input.
///
/// The committed `direction` only ever changes at a tick boundary, when the
/// engine calls [`Snake::commit_pending`].  Input between ticks lands in
/// `pending` and the last legal turn wins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    segments: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
}

impl Snake {
    /// Create a snake of `length` cells with its head at `head`, facing
    /// `direction`, with the body trailing in the opposite direction
    /// (wrapped onto the torus if the trail runs off an edge).
    pub(super) fn new(grid: Grid, head: Cell, direction: Direction, length: usize) -> Snake {
        let trail = direction.reverse().delta();
        let segments = std::iter::successors(Some(head), |&cell| Some(grid.wrap(cell.offset(trail))))
            .take(length)
            .collect();
        Snake {
            segments,
            direction,
            pending: None,
        }
    }

    pub(crate) fn head(&self) -> Cell {
        *self
            .segments
            .front()
            .expect("a snake always has at least a head")
    }

    pub(crate) fn tail(&self) -> Cell {
        *self
            .segments
            .back()
            .expect("a snake always has at least a head")
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn segments(&self) -> &VecDeque<Cell> {
        &self.segments
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// The set of cells the body currently occupies, rebuilt from scratch so
    /// it can never drift out of sync with the segment list.
    pub(super) fn occupied(&self) -> HashSet<Cell> {
        self.segments.iter().copied().collect()
    }

    /// The cell one step ahead of the head along the committed heading,
    /// *not* wrapped; the grid decides what that cell really is.
    pub(super) fn propose_next_head(&self) -> Cell {
        self.head().offset(self.direction.delta())
    }

    /// Buffer a turn for the next tick.  A turn straight back into the neck
    /// is dropped; anything else overwrites whatever was buffered before.
    pub(super) fn set_pending(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.pending = Some(direction);
        }
    }

    /// Apply the buffered turn, if any.  Called once per acting tick, before
    /// the next head cell is computed.
    pub(super) fn commit_pending(&mut self) {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }
    }

    #[cfg(test)]
    pub(super) fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Move the head to `new_head`, shifting every segment into the place of
    /// the one ahead of it.  When `ate` is set the tail cell is kept, so the
    /// snake grows by exactly one.
    pub(super) fn advance(&mut self, new_head: Cell, ate: bool) {
        self.segments.push_front(new_head);
        if !ate {
            let _ = self.segments.pop_back();
        }
    }
}

//! Round-robin turn scheduling and the per-turn critical-action gate.

use std::collections::VecDeque;

use crate::game::UnitId;

/// Anything units can be enqueued into and removed from.
///
/// The board keeps the scheduler queue in step with the grid through this
/// trait, so spawns and despawns touch grid, roster and queue together.
pub trait UnitQueue {
    /// Append a freshly spawned unit.
    fn add_to_queue(&mut self, unit: UnitId);
    /// Forget a unit that left the board.
    fn remove_from_queue(&mut self, unit: UnitId);
}

/// FIFO scheduler: one unit acts per turn, then goes to the back of the line.
#[derive(Debug, Clone, Default)]
pub struct TurnHandler {
    /// Units waiting for their turn.
    queue: VecDeque<UnitId>,
    /// The unit acting this turn.
    current: Option<UnitId>,
    /// Number of turns started so far.
    turn_number: u32,
    /// Set once a critical action fires; cleared by `start_turn`.
    pub performed_critical_action: bool,
}

impl TurnHandler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns started so far (the first turn is 1).
    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// The unit acting this turn.
    #[must_use]
    pub const fn current_unit(&self) -> Option<UnitId> {
        self.current
    }

    /// Number of units waiting, excluding the acting one.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Check whether `unit` is scheduled (waiting or acting).
    #[must_use]
    pub fn contains(&self, unit: UnitId) -> bool {
        self.current == Some(unit) || self.queue.contains(&unit)
    }

    /// Begin a turn: advance the counter, reset the critical gate and pick
    /// the next unit.
    pub fn start_turn(&mut self) -> Option<UnitId> {
        self.turn_number += 1;
        self.performed_critical_action = false;
        self.current = self.queue.pop_front();
        self.current
    }

    /// End the turn, sending the acting unit to the back of the queue if it
    /// is still alive.
    pub fn end_turn(&mut self) {
        if let Some(unit) = self.current.take() {
            self.queue.push_back(unit);
        }
    }
}

impl UnitQueue for TurnHandler {
    fn add_to_queue(&mut self, unit: UnitId) {
        self.queue.push_back(unit);
    }

    fn remove_from_queue(&mut self, unit: UnitId) {
        if self.current == Some(unit) {
            self.current = None;
        }
        self.queue.retain(|&u| u != unit);
    }
}

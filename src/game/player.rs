//! Player rosters.

use std::collections::BTreeSet;

use crate::game::UnitId;

/// Unique identifier for a player.
pub type PlayerId = u8;

/// A player and the units it currently owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Units owned by this player, in spawn order.
    units: BTreeSet<UnitId>,
}

impl Player {
    /// Create a player with an empty roster.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            units: BTreeSet::new(),
        }
    }

    /// Number of units currently owned.
    #[must_use]
    pub fn num_units(&self) -> usize {
        self.units.len()
    }

    /// Check whether the player owns `unit`.
    #[must_use]
    pub fn owns(&self, unit: UnitId) -> bool {
        self.units.contains(&unit)
    }

    /// Iterate over owned unit ids.
    pub fn units(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.iter().copied()
    }

    /// Check whether the player has been wiped out.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.units.is_empty()
    }

    pub(crate) fn add_unit(&mut self, unit: UnitId) {
        self.units.insert(unit);
    }

    pub(crate) fn remove_unit(&mut self, unit: UnitId) -> bool {
        self.units.remove(&unit)
    }
}

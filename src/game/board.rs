//! The board: grid, unit arena, player rosters and the unit cap.
//!
//! Every unit exists in exactly three places at once: a grid cell, its
//! player's roster and the scheduler queue. The mutating operations here
//! update all three together or not at all.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{BoardError, BoardResult};
use crate::game::{
    BoardSnapshot, Coord, Grid, Player, PlayerId, SnapshotLabel, Unit, UnitId, UnitQueue,
};

/// Smallest board side that still gives every cell eight distinct neighbours.
pub const MIN_SIDE: u16 = 3;

/// Hit points given to units spawned through [`Board::new`].
pub const DEFAULT_UNIT_HEALTH: u32 = 2;

/// The game board.
#[derive(Debug, Clone)]
pub struct Board {
    /// Cell occupants.
    grid: Grid,
    /// Every live unit, keyed by id.
    units: BTreeMap<UnitId, Unit>,
    /// Rosters, keyed by player id.
    players: BTreeMap<PlayerId, Player>,
    /// Maximum simultaneous units per player.
    unit_limit: usize,
    /// Units spawned over the board's lifetime; source of fresh ids.
    num_spawned: UnitId,
    /// Hit points for newly spawned units.
    unit_health: u32,
    /// Source of every random choice made on this board.
    rng: ChaCha8Rng,
}

impl Board {
    /// Create an empty board.
    ///
    /// The unit cap is `ceil(width * height * unit_limit_pct)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TooSmall`] if either side is below 3 and
    /// [`BoardError::InvalidUnitLimit`] if `unit_limit_pct` is not in `(0, 1]`.
    pub fn new(width: u16, height: u16, unit_limit_pct: f64, seed: u64) -> BoardResult<Self> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(BoardError::TooSmall { width, height });
        }
        if !(unit_limit_pct > 0.0 && unit_limit_pct <= 1.0) {
            return Err(BoardError::InvalidUnitLimit(unit_limit_pct));
        }
        let grid = Grid::new(width, height).ok_or(BoardError::TooSmall { width, height })?;

        let area = f64::from(width) * f64::from(height);
        // Bounded by the area, which fits comfortably in usize.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let unit_limit = (area * unit_limit_pct).ceil() as usize;

        Ok(Self {
            grid,
            units: BTreeMap::new(),
            players: BTreeMap::new(),
            unit_limit,
            num_spawned: 0,
            unit_health: DEFAULT_UNIT_HEALTH,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Set the hit points of units spawned from now on.
    #[must_use]
    pub fn with_unit_health(mut self, health: u32) -> Self {
        self.unit_health = health.max(1);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Board width.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.grid.width()
    }

    /// Board height.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.grid.height()
    }

    /// Underlying grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Maximum simultaneous units per player.
    #[must_use]
    pub const fn unit_limit(&self) -> usize {
        self.unit_limit
    }

    /// Total units spawned so far, including dead ones.
    #[must_use]
    pub const fn num_spawned(&self) -> UnitId {
        self.num_spawned
    }

    /// Register a player with an empty roster. Re-registering is a no-op.
    pub fn add_player(&mut self, id: PlayerId) {
        self.players.entry(id).or_insert_with(|| Player::new(id));
    }

    /// Drop a player that has no units left. Returns whether it was removed.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        if self.players.get(&id).is_some_and(Player::is_eliminated) {
            self.players.remove(&id);
            return true;
        }
        false
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Iterate over players in id order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Look up a unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Look up a unit mutably.
    #[must_use]
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Iterate over all units in id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// The unit standing on `loc`, if any.
    #[must_use]
    pub fn unit_at(&self, loc: Coord) -> Option<&Unit> {
        self.grid.get(loc).and_then(|id| self.units.get(&id))
    }

    /// Check whether `loc` is unoccupied.
    #[must_use]
    pub fn is_free(&self, loc: Coord) -> bool {
        self.grid.is_free(loc)
    }

    /// Check whether `loc` holds a unit owned by `player`.
    #[must_use]
    pub fn is_ally(&self, loc: Coord, player: PlayerId) -> bool {
        self.unit_at(loc).is_some_and(|u| u.player_id == player)
    }

    /// Check whether `loc` holds a unit not owned by `player`.
    #[must_use]
    pub fn is_enemy(&self, loc: Coord, player: PlayerId) -> bool {
        self.unit_at(loc).is_some_and(|u| u.player_id != player)
    }

    // ------------------------------------------------------------------
    // Board manipulation
    // ------------------------------------------------------------------

    /// Place a new unit for `player_id` on `loc`.
    ///
    /// Returns `Ok(None)` without touching anything when the player is at
    /// the unit cap; callers may attempt spawns speculatively.
    ///
    /// # Errors
    ///
    /// [`BoardError::Conflict`] if `loc` is occupied and
    /// [`BoardError::UnknownPlayer`] if the player was never registered.
    /// Board state is unchanged in both cases.
    pub fn spawn(
        &mut self,
        player_id: PlayerId,
        loc: Coord,
        queue: &mut impl UnitQueue,
    ) -> BoardResult<Option<UnitId>> {
        let loc = self.grid.normalize(loc);
        if let Some(occupant) = self.grid.get(loc) {
            return Err(BoardError::Conflict {
                coord: loc,
                occupant,
            });
        }
        let Some(player) = self.players.get_mut(&player_id) else {
            return Err(BoardError::UnknownPlayer(player_id));
        };
        if player.num_units() >= self.unit_limit {
            debug!(
                player = player_id,
                limit = self.unit_limit,
                "player attempted to spawn a new unit but has reached the spawn limit"
            );
            return Ok(None);
        }

        self.num_spawned += 1;
        let id = self.num_spawned;
        player.add_unit(id);
        self.grid.set(loc, Some(id));
        self.units
            .insert(id, Unit::new(id, player_id, loc, self.unit_health));
        queue.add_to_queue(id);
        debug!(unit = id, player = player_id, %loc, "new unit spawned");
        Ok(Some(id))
    }

    /// Remove a unit from the grid, its roster and the scheduler queue.
    ///
    /// Returns the removed unit, or `None` if it was not on the board.
    pub fn despawn(&mut self, unit_id: UnitId, queue: &mut impl UnitQueue) -> Option<Unit> {
        let unit = self.units.remove(&unit_id)?;
        self.grid.set(unit.location, None);
        if let Some(player) = self.players.get_mut(&unit.player_id) {
            player.remove_unit(unit_id);
        }
        queue.remove_from_queue(unit_id);
        debug!(unit = unit_id, player = unit.player_id, "unit despawned");
        Some(unit)
    }

    /// Spawn a unit for `player_id` on a random free cell next to `loc`.
    ///
    /// No-op when every neighbour is taken or the player is at the cap.
    ///
    /// # Errors
    ///
    /// Propagates [`Board::spawn`] faults.
    pub fn spawn_in_adjacent_location(
        &mut self,
        player_id: PlayerId,
        loc: Coord,
        queue: &mut impl UnitQueue,
    ) -> BoardResult<Option<UnitId>> {
        let Some(spawn_loc) = self.free_adjacent(loc) else {
            debug!(player = player_id, %loc, "no free adjacent cell to spawn into");
            return Ok(None);
        };
        self.spawn(player_id, spawn_loc, queue)
    }

    /// Relocate a unit.
    ///
    /// # Errors
    ///
    /// [`BoardError::Conflict`] if `new_loc` is occupied and
    /// [`BoardError::UnknownUnit`] if the unit is not on the board.
    pub fn move_unit(&mut self, unit_id: UnitId, new_loc: Coord) -> BoardResult<()> {
        let new_loc = self.grid.normalize(new_loc);
        if let Some(occupant) = self.grid.get(new_loc) {
            return Err(BoardError::Conflict {
                coord: new_loc,
                occupant,
            });
        }
        let unit = self
            .units
            .get_mut(&unit_id)
            .ok_or(BoardError::UnknownUnit(unit_id))?;
        let old_loc = std::mem::replace(&mut unit.location, new_loc);
        self.grid.set(old_loc, None);
        self.grid.set(new_loc, Some(unit_id));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Adjacency and distance
    // ------------------------------------------------------------------

    /// The eight wrapped neighbours of `loc`.
    #[must_use]
    pub fn all_adjacent(&self, loc: Coord) -> [Coord; 8] {
        self.grid.neighbours(loc)
    }

    /// Neighbours of `loc` that satisfy `pred`.
    pub fn adjacent_where(&self, loc: Coord, pred: impl Fn(Coord) -> bool) -> Vec<Coord> {
        self.all_adjacent(loc)
            .into_iter()
            .filter(|&c| pred(c))
            .collect()
    }

    /// Number of neighbours of `loc` that satisfy `pred`.
    pub fn count_adjacent(&self, loc: Coord, pred: impl Fn(Coord) -> bool) -> usize {
        self.all_adjacent(loc)
            .into_iter()
            .filter(|&c| pred(c))
            .count()
    }

    /// A uniformly chosen free neighbour of `loc`.
    pub fn free_adjacent(&mut self, loc: Coord) -> Option<Coord> {
        let free = self.adjacent_where(loc, |c| self.is_free(c));
        free.choose(&mut self.rng).copied()
    }

    /// Free cells around `unit`.
    #[must_use]
    pub fn num_free_tiles_around(&self, unit: &Unit) -> usize {
        self.count_adjacent(unit.location, |c| self.is_free(c))
    }

    /// Same-player units around `unit`.
    #[must_use]
    pub fn num_allies_around(&self, unit: &Unit) -> usize {
        self.count_adjacent(unit.location, |c| self.is_ally(c, unit.player_id))
    }

    /// Other-player units around `unit`; every neighbour that is neither
    /// free nor allied.
    #[must_use]
    pub fn num_enemies_around(&self, unit: &Unit) -> usize {
        8 - self.num_free_tiles_around(unit) - self.num_allies_around(unit)
    }

    /// Units `player` owns, not counting the one asking.
    #[must_use]
    pub fn num_total_allies(&self, player: PlayerId) -> usize {
        self.players
            .get(&player)
            .map_or(0, |p| p.num_units().saturating_sub(1))
    }

    /// Units owned by every other player.
    #[must_use]
    pub fn num_total_enemies(&self, player: PlayerId) -> usize {
        self.players
            .values()
            .filter(|p| p.id != player)
            .map(Player::num_units)
            .sum()
    }

    /// Minimal number of king moves between two units, with wrap-around.
    #[must_use]
    pub fn distance(&self, a: &Unit, b: &Unit) -> u16 {
        self.grid.distance(a.location, b.location)
    }

    /// Distance reported when there is nothing to measure against.
    #[must_use]
    pub fn unreachable_distance(&self) -> u32 {
        u32::from(self.width()) + u32::from(self.height())
    }

    /// Other units owned by the same player.
    pub fn allies_of<'a>(&'a self, unit: &'a Unit) -> impl Iterator<Item = &'a Unit> + 'a {
        self.players
            .get(&unit.player_id)
            .into_iter()
            .flat_map(|p| p.units())
            .filter(move |&id| id != unit.id)
            .filter_map(|id| self.units.get(&id))
    }

    /// Units owned by any other player.
    pub fn enemies_of<'a>(&'a self, unit: &'a Unit) -> impl Iterator<Item = &'a Unit> + 'a {
        self.units
            .values()
            .filter(move |other| other.player_id != unit.player_id)
    }

    /// Distance to the nearest ally, or [`Board::unreachable_distance`].
    #[must_use]
    pub fn distance_from_closest_ally(&self, unit: &Unit) -> u32 {
        self.allies_of(unit)
            .map(|ally| u32::from(self.distance(unit, ally)))
            .min()
            .unwrap_or_else(|| self.unreachable_distance())
    }

    /// Distance to the nearest enemy, or [`Board::unreachable_distance`].
    #[must_use]
    pub fn distance_from_closest_enemy(&self, unit: &Unit) -> u32 {
        self.enemies_of(unit)
            .map(|enemy| u32::from(self.distance(unit, enemy)))
            .min()
            .unwrap_or_else(|| self.unreachable_distance())
    }

    /// Hit a uniformly chosen adjacent enemy for `dmg`, despawning it if it
    /// dies. Returns the unit that was hit.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownUnit`] if `attacker` is not on the board.
    pub fn attack_adjacent_enemy(
        &mut self,
        attacker: UnitId,
        dmg: u32,
        queue: &mut impl UnitQueue,
    ) -> BoardResult<Option<UnitId>> {
        let unit = self
            .units
            .get(&attacker)
            .ok_or(BoardError::UnknownUnit(attacker))?;
        let (loc, player) = (unit.location, unit.player_id);

        let enemy_locs = self.adjacent_where(loc, |c| self.is_enemy(c, player));
        let Some(target) = enemy_locs
            .choose(&mut self.rng)
            .and_then(|&c| self.grid.get(c))
        else {
            debug!(unit = attacker, "tried to attack, but no enemy units in range");
            return Ok(None);
        };

        debug!(unit = attacker, victim = target, "attacked unit");
        let killed = self
            .units
            .get_mut(&target)
            .is_some_and(|enemy| enemy.damage(dmg));
        if killed {
            self.despawn(target, queue);
        }
        Ok(Some(target))
    }

    // ------------------------------------------------------------------
    // Helpers for the game driver
    // ------------------------------------------------------------------

    /// A uniformly random cell.
    pub fn random_location(&mut self) -> Coord {
        let (width, height) = (self.width(), self.height());
        let x = self.rng.random_range(0..width);
        let y = self.rng.random_range(0..height);
        Coord::new(x, y)
    }

    /// A uniformly random unoccupied cell, or `None` if the board is full.
    pub fn random_free_location(&mut self) -> Option<Coord> {
        let free: Vec<Coord> = self
            .grid
            .iter()
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(c, _)| c)
            .collect();
        free.choose(&mut self.rng).copied()
    }

    /// Text snapshot of the board labelled by unit or player id.
    #[must_use]
    pub fn snapshot(&self, label: SnapshotLabel) -> BoardSnapshot {
        BoardSnapshot::capture(self, label)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.snapshot(SnapshotLabel::Unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TurnHandler;

    fn setup(width: u16, height: u16, pct: f64) -> (Board, TurnHandler) {
        let mut board = Board::new(width, height, pct, 7).unwrap();
        board.add_player(1);
        board.add_player(2);
        (board, TurnHandler::new())
    }

    fn spawn(board: &mut Board, turns: &mut TurnHandler, player: PlayerId, x: u16, y: u16) -> UnitId {
        board.spawn(player, Coord::new(x, y), turns).unwrap().unwrap()
    }

    #[test]
    fn test_unit_limit_derivation() {
        let (board, _) = setup(20, 20, 0.05);
        assert_eq!(board.unit_limit(), 20);
        let (board, _) = setup(10, 10, 0.011);
        assert_eq!(board.unit_limit(), 2);
    }

    #[test]
    fn test_invalid_unit_limit() {
        assert_eq!(
            Board::new(10, 10, 0.0, 0).unwrap_err(),
            BoardError::InvalidUnitLimit(0.0)
        );
        assert!(Board::new(10, 10, 1.5, 0).is_err());
        assert!(Board::new(10, 10, f64::NAN, 0).is_err());
        assert!(Board::new(10, 10, 1.0, 0).is_ok());
    }

    #[test]
    fn test_too_small() {
        assert!(matches!(
            Board::new(2, 10, 0.5, 0),
            Err(BoardError::TooSmall { width: 2, height: 10 })
        ));
    }

    #[test]
    fn test_spawn_registers_everywhere() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let id = spawn(&mut board, &mut turns, 1, 3, 4);
        assert_eq!(id, 1);
        assert_eq!(board.grid().get(Coord::new(3, 4)), Some(id));
        assert!(board.player(1).unwrap().owns(id));
        assert!(turns.contains(id));
        assert_eq!(board.unit(id).unwrap().location(), Coord::new(3, 4));
    }

    #[test]
    fn test_spawn_on_occupied_conflicts() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let id = spawn(&mut board, &mut turns, 1, 3, 4);
        let err = board.spawn(2, Coord::new(3, 4), &mut turns).unwrap_err();
        assert_eq!(
            err,
            BoardError::Conflict {
                coord: Coord::new(3, 4),
                occupant: id
            }
        );
        assert_eq!(board.player(2).unwrap().num_units(), 0);
        assert_eq!(board.num_spawned(), 1);
        assert_eq!(turns.queued(), 1);
    }

    #[test]
    fn test_spawn_unknown_player() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        assert_eq!(
            board.spawn(9, Coord::new(0, 0), &mut turns),
            Err(BoardError::UnknownPlayer(9))
        );
    }

    #[test]
    fn test_spawn_over_cap_is_noop() {
        let (mut board, mut turns) = setup(10, 10, 0.02);
        assert_eq!(board.unit_limit(), 2);
        spawn(&mut board, &mut turns, 1, 0, 0);
        spawn(&mut board, &mut turns, 1, 5, 5);
        assert_eq!(board.spawn(1, Coord::new(7, 7), &mut turns), Ok(None));
        assert_eq!(board.player(1).unwrap().num_units(), 2);
        assert!(board.is_free(Coord::new(7, 7)));
        assert_eq!(turns.queued(), 2);
    }

    #[test]
    fn test_despawn_clears_everything() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let id = spawn(&mut board, &mut turns, 1, 3, 4);
        let unit = board.despawn(id, &mut turns).unwrap();
        assert_eq!(unit.id, id);
        assert!(board.is_free(Coord::new(3, 4)));
        assert!(!board.player(1).unwrap().owns(id));
        assert!(!turns.contains(id));
        assert!(board.unit(id).is_none());
        assert!(board.despawn(id, &mut turns).is_none());
    }

    #[test]
    fn test_move_unit() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let a = spawn(&mut board, &mut turns, 1, 0, 0);
        let b = spawn(&mut board, &mut turns, 2, 1, 1);

        board.move_unit(a, Coord::new(9, 9)).unwrap();
        assert!(board.is_free(Coord::new(0, 0)));
        assert_eq!(board.grid().get(Coord::new(9, 9)), Some(a));
        assert_eq!(board.unit(a).unwrap().location(), Coord::new(9, 9));

        let err = board.move_unit(a, Coord::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            BoardError::Conflict {
                coord: Coord::new(1, 1),
                occupant: b
            }
        );
        assert_eq!(board.unit(a).unwrap().location(), Coord::new(9, 9));
    }

    #[test]
    fn test_adjacent_counts_partition() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let me = spawn(&mut board, &mut turns, 1, 0, 0);
        spawn(&mut board, &mut turns, 1, 9, 9);
        spawn(&mut board, &mut turns, 1, 1, 0);
        spawn(&mut board, &mut turns, 2, 0, 9);
        spawn(&mut board, &mut turns, 2, 5, 5);

        let unit = board.unit(me).unwrap();
        assert_eq!(board.num_allies_around(unit), 2);
        assert_eq!(board.num_enemies_around(unit), 1);
        assert_eq!(board.num_free_tiles_around(unit), 5);
    }

    #[test]
    fn test_totals() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        spawn(&mut board, &mut turns, 1, 0, 0);
        spawn(&mut board, &mut turns, 1, 2, 2);
        spawn(&mut board, &mut turns, 2, 4, 4);
        assert_eq!(board.num_total_allies(1), 1);
        assert_eq!(board.num_total_enemies(1), 1);
        assert_eq!(board.num_total_allies(2), 0);
        assert_eq!(board.num_total_enemies(2), 2);
    }

    #[test]
    fn test_closest_distances() {
        let (mut board, mut turns) = setup(20, 20, 0.5);
        let me = spawn(&mut board, &mut turns, 1, 0, 0);
        let unit = board.unit(me).unwrap().clone();
        assert_eq!(board.distance_from_closest_ally(&unit), 40);
        assert_eq!(board.distance_from_closest_enemy(&unit), 40);

        spawn(&mut board, &mut turns, 1, 5, 0);
        spawn(&mut board, &mut turns, 2, 19, 19);
        spawn(&mut board, &mut turns, 2, 10, 10);
        assert_eq!(board.distance_from_closest_ally(&unit), 5);
        assert_eq!(board.distance_from_closest_enemy(&unit), 1);
    }

    #[test]
    fn test_free_adjacent_none_when_surrounded() {
        let (mut board, mut turns) = setup(3, 3, 1.0);
        spawn(&mut board, &mut turns, 1, 1, 1);
        assert!(board.free_adjacent(Coord::new(1, 1)).is_some());
        for (x, y) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            spawn(&mut board, &mut turns, 2, x, y);
        }
        assert_eq!(board.free_adjacent(Coord::new(1, 1)), None);
        assert_eq!(
            board.spawn_in_adjacent_location(1, Coord::new(1, 1), &mut turns),
            Ok(None)
        );
    }

    #[test]
    fn test_free_adjacent_is_uniform() {
        let (mut board, _) = setup(10, 10, 0.5);
        let centre = Coord::new(0, 0);
        let mut hits: BTreeMap<Coord, u32> = BTreeMap::new();
        for _ in 0..8_000 {
            let c = board.free_adjacent(centre).unwrap();
            *hits.entry(c).or_default() += 1;
        }
        assert_eq!(hits.len(), 8);
        for (c, n) in hits {
            assert!(board.all_adjacent(centre).contains(&c));
            assert!((850..=1_150).contains(&n), "{c} drawn {n} times");
        }
    }

    #[test]
    fn test_attack_target_is_uniform() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let attacker = spawn(&mut board, &mut turns, 1, 5, 5);
        spawn(&mut board, &mut turns, 1, 4, 4);
        let enemies = [
            spawn(&mut board, &mut turns, 2, 6, 6),
            spawn(&mut board, &mut turns, 2, 5, 4),
            spawn(&mut board, &mut turns, 2, 4, 6),
        ];
        spawn(&mut board, &mut turns, 2, 8, 8);

        let mut hits: BTreeMap<UnitId, u32> = BTreeMap::new();
        for _ in 0..3_000 {
            // Zero damage keeps every target alive.
            let target = board
                .attack_adjacent_enemy(attacker, 0, &mut turns)
                .unwrap()
                .unwrap();
            *hits.entry(target).or_default() += 1;
        }
        assert_eq!(hits.keys().copied().collect::<Vec<_>>(), enemies.to_vec());
        for (id, n) in hits {
            assert!((850..=1_150).contains(&n), "unit {id} hit {n} times");
        }
    }

    #[test]
    fn test_spawn_in_adjacent_location() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let parent = spawn(&mut board, &mut turns, 1, 0, 0);
        let child = board
            .spawn_in_adjacent_location(1, Coord::new(0, 0), &mut turns)
            .unwrap()
            .unwrap();
        let parent = board.unit(parent).unwrap();
        let child = board.unit(child).unwrap();
        assert_eq!(board.distance(parent, child), 1);
        assert_eq!(child.player_id, 1);
    }

    #[test]
    fn test_attack_kills_and_despawns() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let attacker = spawn(&mut board, &mut turns, 1, 0, 0);
        let victim = spawn(&mut board, &mut turns, 2, 9, 0);

        assert_eq!(
            board.attack_adjacent_enemy(attacker, 1, &mut turns),
            Ok(Some(victim))
        );
        assert_eq!(board.unit(victim).unwrap().health(), DEFAULT_UNIT_HEALTH - 1);
        board.attack_adjacent_enemy(attacker, 1, &mut turns).unwrap();
        assert!(board.unit(victim).is_none());
        assert!(board.is_free(Coord::new(9, 0)));
        assert!(!turns.contains(victim));
        assert!(board.player(2).unwrap().is_eliminated());
    }

    #[test]
    fn test_attack_without_enemy_is_noop() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let attacker = spawn(&mut board, &mut turns, 1, 0, 0);
        spawn(&mut board, &mut turns, 1, 1, 1);
        spawn(&mut board, &mut turns, 2, 5, 5);
        assert_eq!(board.attack_adjacent_enemy(attacker, 1, &mut turns), Ok(None));
        assert_eq!(board.units().count(), 3);
    }

    #[test]
    fn test_remove_player_only_when_eliminated() {
        let (mut board, mut turns) = setup(10, 10, 0.5);
        let id = spawn(&mut board, &mut turns, 1, 0, 0);
        assert!(!board.remove_player(1));
        board.despawn(id, &mut turns);
        assert!(board.remove_player(1));
        assert!(board.player(1).is_none());
    }

    #[test]
    fn test_random_locations_in_bounds() {
        let (mut board, _) = setup(7, 5, 0.5);
        for _ in 0..200 {
            let loc = board.random_location();
            assert!(board.grid().in_bounds(loc));
        }
    }

    #[test]
    fn test_random_free_location_full_board() {
        let (mut board, mut turns) = setup(3, 3, 1.0);
        for y in 0..3 {
            for x in 0..3 {
                spawn(&mut board, &mut turns, 1, x, y);
            }
        }
        assert_eq!(board.random_free_location(), None);
    }
}

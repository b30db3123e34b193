#![no_main]

//! Board operation fuzzer.
//!
//! Applies a random sequence of spawns, moves, attacks, despawns and turns
//! and checks grid, roster and scheduler consistency after every step.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skirmish::game::{check_invariants, Board, Coord, GameState, Rules};

/// A fuzzer-generated board operation.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzOp {
    /// Spawn a unit for a player.
    Spawn { x: u8, y: u8, player: u8 },
    /// Remove the n-th live unit.
    Despawn { pick: u8 },
    /// Move the n-th live unit to a free neighbour.
    Move { pick: u8 },
    /// Let the n-th live unit attack.
    Attack { pick: u8, damage: u8 },
    /// Start the n-th live unit's spawn timer.
    SetSpawn { pick: u8, delay: u8 },
    /// Play an empty turn.
    Turn,
}

/// Structured input for board fuzzing.
#[derive(Arbitrary, Debug)]
struct BoardInput {
    width: u8,
    height: u8,
    pct: u8,
    seed: u64,
    ops: Vec<FuzzOp>,
}

fuzz_target!(|input: BoardInput| {
    let width = u16::from(input.width % 16).max(3);
    let height = u16::from(input.height % 16).max(3);
    let pct = f64::from(input.pct.max(1)) / 255.0;
    let Ok(mut board) = Board::new(width, height, pct, input.seed) else {
        return;
    };
    for player in 1..=3 {
        board.add_player(player);
    }
    let mut state = GameState::new(board, Rules::default());

    for op in input.ops.into_iter().take(500) {
        let ids: Vec<_> = state.board.units().map(|u| u.id).collect();
        let pick = |n: u8| ids.get(usize::from(n) % ids.len().max(1)).copied();
        match op {
            FuzzOp::Spawn { x, y, player } => {
                let loc = Coord::new(u16::from(x) % width, u16::from(y) % height);
                let _ = state.spawn(player % 4, loc);
            }
            FuzzOp::Despawn { pick: n } => {
                if let Some(id) = pick(n) {
                    state.despawn(id);
                }
            }
            FuzzOp::Move { pick: n } => {
                if let Some(id) = pick(n) {
                    let from = state.board.unit(id).expect("live unit").location();
                    if let Some(to) = state.board.free_adjacent(from) {
                        state.board.move_unit(id, to).expect("free cell");
                    }
                }
            }
            FuzzOp::Attack { pick: n, damage } => {
                if let Some(id) = pick(n) {
                    state
                        .board
                        .attack_adjacent_enemy(id, u32::from(damage), &mut state.turns)
                        .expect("live attacker");
                }
            }
            FuzzOp::SetSpawn { pick: n, delay } => {
                if let Some(id) = pick(n) {
                    if let Some(unit) = state.board.unit_mut(id) {
                        unit.set_spawn(u32::from(delay % 8));
                    }
                }
            }
            FuzzOp::Turn => {
                state.start_turn().expect("turn starts");
                state.end_turn();
            }
        }

        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");
    }
});

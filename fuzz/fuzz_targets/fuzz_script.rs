#![no_main]

//! Script pipeline fuzzer.
//!
//! Feeds arbitrary text through the parser and validator. Anything that
//! loads is played as a short game against a fixed opponent, with the board
//! invariants checked by the driver after every turn.

use libfuzzer_sys::fuzz_target;
use skirmish::tournament::{run_game, GameConfig};
use skirmish::Script;

fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(script) = Script::parse(src) else {
        return;
    };

    // Printing and re-reading must give back the same script.
    let printed: Vec<String> = script.exprs().iter().map(ToString::to_string).collect();
    let reparsed = Script::parse(&printed.join("\n")).expect("printed script reparses");
    assert_eq!(reparsed, script);

    let opponent = Script::parse("(if_else (gt (num_adjacent_enemies) 0) (attack) (spawn))")
        .expect("opponent parses");
    let config = GameConfig {
        board_width: 8,
        board_height: 8,
        unit_limit_pct: 0.25,
        max_turns: 200,
        ..GameConfig::default()
    };
    let result = run_game(0, &[script, opponent], &config).expect("game runs");
    assert!(result.turns_played <= config.max_turns);
});

//! Shared helpers for the integration tests
#![allow(dead_code)]

use random_chess::*;

/// Every legal move available to `color`, in square order.
pub fn all_legal_moves(position: &Position, color: Color) -> Vec<(Square, Square)> {
    position
        .pieces(color)
        .iter()
        .flat_map(|from| {
            let mut scratch = position.clone();
            if scratch.turn() != color {
                scratch.switch_turn();
            }
            scratch.legal_moves(from).iter().map(move |to| (from, to)).collect::<Vec<_>>()
        })
        .collect()
}

/// Parses a position, panicking on malformed notation.
pub fn position(notation: &str) -> Position {
    notation
        .parse()
        .unwrap_or_else(|err| panic!("bad notation {notation:?}: {err}"))
}

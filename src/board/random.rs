// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Random starting positions. Each side receives the standard sixteen
//! pieces scattered over its own half of the board: white on ranks 1-4
//! and black on ranks 5-8. Castling is disabled. A candidate is rejected
//! if either side starts in check, either side has no legal move, or
//! (optionally) white can mate on its first move.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Color, Material, Piece};
use super::position::Position;
use super::square::Square;

use Color::*;
use Piece::*;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    #[error("No acceptable random position found in {tries} tries")]
    Exhausted { tries: usize },
}

/// Options for `Position::setup_random`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomSetup {
    pub seed: Option<u64>,
    pub forbid_mate_in_one: bool,
    pub max_tries: usize,
}

impl Default for RandomSetup {
    fn default() -> Self {
        Self {
            seed: None,
            forbid_mate_in_one: true,
            max_tries: 5000,
        }
    }
}

impl RandomSetup {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn forbid_mate_in_one(mut self, forbid: bool) -> Self {
        self.forbid_mate_in_one = forbid;
        self
    }
    pub fn max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }
}

const ARMY: [Piece; 16] = [
    King, Queen, Rook, Rook, Bishop, Bishop, Knight, Knight, Pawn, Pawn, Pawn, Pawn, Pawn, Pawn, Pawn, Pawn,
];

impl Position {
    /// Replaces this position with a random one satisfying `options`. If
    /// no candidate passes within `max_tries` attempts, returns
    /// `SetupError::Exhausted` and leaves the position unchanged.
    pub fn setup_random(&mut self, options: &RandomSetup) -> Result<()> {
        let seed = options.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..options.max_tries {
            let candidate = Self::scatter(&mut rng);
            if candidate.is_acceptable(options) {
                *self = candidate;
                return Ok(());
            }
        }
        Err(SetupError::Exhausted {
            tries: options.max_tries,
        }
        .into())
    }

    fn scatter(rng: &mut StdRng) -> Self {
        let mut position = Self::empty();
        for color in Color::iter() {
            let mut half: Vec<Square> = Square::iter()
                .filter(|square| match color {
                    White => square.row() >= 4,
                    Black => square.row() < 4,
                })
                .collect();
            half.shuffle(rng);
            let mut army = ARMY;
            army.shuffle(rng);
            for (&square, piece) in half.iter().zip(army) {
                position.place(square, Material::new(color, piece));
            }
        }
        position
    }

    fn is_acceptable(&self, options: &RandomSetup) -> bool {
        if self.in_check(White) || self.in_check(Black) {
            return false;
        }
        if !self.has_any_legal_move(White) || !self.has_any_legal_move(Black) {
            return false;
        }
        !(options.forbid_mate_in_one && self.has_mate_in_one(White))
    }

    /// Whether `color` has a legal move after which the opponent is
    /// checkmated.
    pub fn has_mate_in_one(&self, color: Color) -> bool {
        let defender = !color;
        self.pieces(color).iter().any(|from| {
            self.legal_moves_for(from).iter().any(|to| {
                let mut scratch = self.clone();
                scratch.apply_move(from, to);
                scratch.set_turn(defender);
                scratch.is_checkmate(defender)
            })
        })
    }
}

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

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::material::Color;
use super::position::Position;

/// The state of one side's game: whether it is in check and whether it
/// has a legal move.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Ongoing,
    Check,
    CheckMate,
    StaleMate,
}

impl Position {
    /// Whether the king of `color` is attacked. A position without that
    /// king is corrupt and is reported as check rather than as safe.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Ok(king) => self.is_attacked(king, !color),
            Err(_) => true,
        }
    }

    pub fn has_any_legal_move(&self, color: Color) -> bool {
        self.pieces(color)
            .iter()
            .any(|from| !self.legal_moves_for(from).is_empty())
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && !self.has_any_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.in_check(color) && !self.has_any_legal_move(color)
    }

    pub fn status(&self, color: Color) -> Status {
        match (self.in_check(color), self.has_any_legal_move(color)) {
            (true, false) => Status::CheckMate,
            (false, false) => Status::StaleMate,
            (true, true) => Status::Check,
            (false, true) => Status::Ongoing,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use Color::*;
    use Square::*;

    #[test]
    fn test_queen_mate_in_the_corner() {
        let position: Position = "7k/6Q1/7K/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(position.in_check(Black));
        assert!(!position.has_any_legal_move(Black));
        assert!(position.is_checkmate(Black));
        assert!(!position.is_stalemate(Black));
        assert_eq!(position.status(Black), Status::CheckMate);
        assert!(!position.is_checkmate(White));
    }
    #[test]
    fn test_stalemate() {
        let position: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(!position.in_check(Black));
        assert!(position.is_stalemate(Black));
        assert!(!position.is_checkmate(Black));
        assert_eq!(position.status(Black), Status::StaleMate);
    }
    #[test]
    fn test_check_with_escape() {
        let position: Position = "4k3/8/8/8/8/8/8/4RK2 b - - 0 1".parse().unwrap();
        assert_eq!(position.status(Black), Status::Check);
        assert!(!position.is_checkmate(Black));
        assert_eq!(position.status(White), Status::Ongoing);
        assert_eq!(Status::CheckMate.to_string(), "CheckMate");
    }
    #[test]
    fn test_back_rank_mate() {
        let mut position: Position = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".parse().unwrap();
        position.play_move(A1, A8).unwrap();
        position.switch_turn();
        assert!(position.is_checkmate(Black));
    }
    #[test]
    fn test_moves_are_counted_regardless_of_turn() {
        let position = Position::standard();
        assert!(position.has_any_legal_move(White));
        assert!(position.has_any_legal_move(Black));
        assert_eq!(position.status(Black), Status::Ongoing);
    }
    #[test]
    fn test_missing_king_counts_as_check() {
        let position = Position::standard().set_contents(E1, None);
        assert!(position.in_check(White));
        assert!(!position.in_check(Black));
    }
    #[test]
    fn test_fools_mate() {
        let mut position = Position::standard();
        for (from, to) in [(F2, F3), (E7, E5), (G2, G4), (D8, H4)] {
            position.play_move(from, to).unwrap();
            position.switch_turn();
        }
        assert_eq!(position.turn(), White);
        assert!(position.is_checkmate(White));
        assert!(!position.is_stalemate(White));
    }
}

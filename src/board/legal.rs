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

use anyhow::Result;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::castling::Wing;
use super::material::{Color, Material, Piece};
use super::moves::pseudo_legal_moves;
use super::position::Position;
use super::square::{Mask, Square};
use super::Turn;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("No piece on {0}")]
    EmptySquare(Square),
    #[error("The piece on {0} does not belong to the side to move")]
    NotYourTurn(Square),
    #[error("Not a legal move")]
    IllegalMove,
}
use MoveError::*;

impl Position {
    /// Destinations the piece on `from` may legally move to. Empty if the
    /// square is vacant or holds a piece of the side not to move.
    pub fn legal_moves(&self, from: Square) -> Mask {
        match self.contents(from) {
            Some(material) if material.color() == self.turn() => self.safe_moves(from, material),
            _ => Mask::empty(),
        }
    }

    /// Legal destinations for the piece on `from` regardless of whose turn
    /// it is.
    pub(super) fn legal_moves_for(&self, from: Square) -> Mask {
        match self.contents(from) {
            Some(material) => self.safe_moves(from, material),
            None => Mask::empty(),
        }
    }

    // Each candidate is played out on a scratch copy and kept only if the
    // mover's king is not attacked afterwards. The copy's turn is left
    // alone: the question is always about the side that just moved.
    fn safe_moves(&self, from: Square, material: Material) -> Mask {
        let color = material.color();
        let mut candidates = pseudo_legal_moves(self, from);
        if material.piece() == Piece::King {
            candidates |= self.castle_moves(color);
        }
        candidates
            .iter()
            .filter(|&to| {
                let mut scratch = self.clone();
                scratch.apply_move(from, to);
                !scratch.in_check(color)
            })
            .collect()
    }

    /// King destinations for the castling moves `color` may make now.
    pub fn castle_moves(&self, color: Color) -> Mask {
        let king_src = Wing::king_src(color);
        let mut result = Mask::empty();
        let king_home = matches!(self.contents(king_src), Some(m) if m.is(color, Piece::King));
        if !king_home || self.in_check(color) {
            return result;
        }
        for wing in Wing::iter() {
            if self.castling()[color].get(wing)
                && matches!(self.contents(wing.rook_src(color)), Some(m) if m.is(color, Piece::Rook))
                && self.is_lane_vacant(wing.blocking_lane(color))
                && !self.is_lane_attacked(wing.attacking_lane(color), !color)
            {
                result |= wing.king_dest(color);
            }
        }
        result
    }

    fn is_lane_vacant(&self, lane: Mask) -> bool {
        lane.iter().all(|square| self.contents(square).is_none())
    }

    fn is_lane_attacked(&self, lane: Mask, by: Color) -> bool {
        lane.iter().any(|square| self.is_attacked(square, by))
    }

    /// Validates a move for the side to move and applies it. The turn is
    /// not switched.
    pub fn play_move(&mut self, from: Square, to: Square) -> Result<()> {
        let material = self.contents(from).ok_or(EmptySquare(from))?;
        if material.color() != self.turn() {
            return Err(NotYourTurn(from).into());
        }
        if !self.legal_moves(from).contains(to) {
            return Err(IllegalMove.into());
        }
        self.apply_move(from, to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use Square::*;

    fn castling_position() -> Position {
        "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_white_can_move_first() {
        let position = Position::standard();
        assert_eq!(position.legal_moves(E2), Mask::from_squares([E3, E4]));
    }
    #[test]
    fn test_black_cannot_move_first() {
        let position = Position::standard();
        assert!(position.legal_moves(E7).is_empty());
        assert!(position.legal_moves(E4).is_empty());
    }
    #[test]
    fn test_knight_destinations() {
        let position = Position::standard();
        assert_eq!(position.legal_moves(G1), Mask::from_squares([F3, H3]));
    }
    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        let position: Position = "4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1".parse().unwrap();
        assert!(position.legal_moves(E2).is_empty());
    }
    #[test]
    fn test_pinned_rook_slides_along_the_pin() {
        let position: Position = "4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(
            position.legal_moves(E2),
            Mask::from_squares([E3, E4, E5, E6, E7, E8])
        );
    }
    #[test]
    fn test_king_cannot_step_into_attack() {
        let position: Position = "k7/8/8/8/8/8/3r4/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(position.legal_moves(E1), Mask::from_squares([D2, F1]));
    }
    #[test]
    fn test_king_cannot_approach_the_other_king() {
        let position: Position = "8/8/8/3k4/8/3K4/8/8 w - - 0 1".parse().unwrap();
        let moves = position.legal_moves(D3);
        assert!(!moves.contains(C4));
        assert!(!moves.contains(D4));
        assert!(!moves.contains(E4));
        assert_eq!(moves.len(), 5);
    }
    #[test]
    fn test_must_answer_check() {
        let position: Position = "4k3/8/8/8/7b/8/3P4/R3K3 w - - 0 1".parse().unwrap();
        assert!(position.in_check(Color::White));
        assert!(position.legal_moves(A1).is_empty());
        assert!(position.legal_moves(D2).is_empty());
        assert_eq!(position.legal_moves(E1), Mask::from_squares([D1, E2, F1]));
    }
    #[test]
    fn test_en_passant_exposing_own_king_is_rejected() {
        let position: Position = "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1".parse().unwrap();
        let moves = position.legal_moves(E5);
        assert!(!moves.contains(D6));
        assert!(moves.contains(E6));
    }
    #[test]
    fn test_en_passant_window_closes() {
        let mut position: Position = "4k3/3p4/8/4P3/8/8/8/4K2N b - - 0 1".parse().unwrap();
        position.play_move(D7, D5).unwrap();
        position.switch_turn();
        assert!(position.legal_moves(E5).contains(D6));
        position.play_move(H1, G3).unwrap();
        position.switch_turn();
        position.play_move(E8, F7).unwrap();
        position.switch_turn();
        assert!(!position.legal_moves(E5).contains(D6));
    }
    #[test]
    fn test_own_en_passant_target_is_not_capturable() {
        let position: Position = "4k3/8/8/8/3pP3/8/5P2/4K3 w - - 0 1".parse().unwrap();
        let position = position.set_en_passant(Some(E3));
        assert_eq!(position.legal_moves(F2), Mask::from_squares([F3, F4]));
        let position = position.with_turn(Color::Black);
        assert_eq!(position.legal_moves(D4), Mask::from_squares([D3, E3]));
    }
    #[test]
    fn test_short_and_long_castle() {
        let position = castling_position();
        let moves = position.legal_moves(E1);
        assert!(moves.contains(G1));
        assert!(moves.contains(C1));
        assert_eq!(moves.len(), 4);
    }
    #[test]
    fn test_castle_unavailable_without_right() {
        let position = castling_position().clear_castling(Color::White, Wing::KingSide);
        let moves = position.legal_moves(E1);
        assert!(!moves.contains(G1));
        assert!(moves.contains(C1));
    }
    #[test]
    fn test_castle_unavailable_without_rook() {
        let position = castling_position().set_contents(A1, None);
        let moves = position.legal_moves(E1);
        assert!(!moves.contains(C1));
        assert!(moves.contains(G1));
    }
    #[test]
    fn test_castle_needs_own_rook_at_home() {
        let position = castling_position().set_contents(H1, Some(Material::WB));
        let moves = position.legal_moves(E1);
        assert!(!moves.contains(G1));
        assert!(moves.contains(C1));
    }
    #[test]
    fn test_castle_lane_blocked() {
        let position = castling_position().set_contents(B1, Some(Material::WN));
        assert!(!position.legal_moves(E1).contains(C1));
        let position = castling_position().set_contents(G1, Some(Material::BN));
        assert!(!position.legal_moves(E1).contains(G1));
    }
    #[test]
    fn test_castle_out_of_check() {
        let position = castling_position()
            .set_contents(E2, None)
            .set_contents(E7, Some(Material::BR));
        let moves = position.legal_moves(E1);
        assert!(!moves.contains(G1));
        assert!(!moves.contains(C1));
    }
    #[test]
    fn test_castle_through_attacked_square() {
        let position = castling_position()
            .set_contents(F2, None)
            .set_contents(F7, Some(Material::BR));
        let moves = position.legal_moves(E1);
        assert!(!moves.contains(G1));
        assert!(moves.contains(C1));
    }
    #[test]
    fn test_castle_through_pawn_attacked_square() {
        let position = castling_position().set_contents(E2, Some(Material::BP));
        let moves = position.legal_moves(E1);
        assert!(!moves.contains(G1));
        assert!(!moves.contains(C1));
    }
    #[test]
    fn test_long_castle_allowed_when_b1_attacked() {
        let position = castling_position()
            .set_contents(B2, None)
            .set_contents(B7, Some(Material::BR));
        assert!(position.legal_moves(E1).contains(C1));
    }
    #[test]
    fn test_black_castles() {
        let mut position = castling_position().with_turn(Color::Black);
        assert!(position.legal_moves(E8).contains(C8));
        position.play_move(E8, G8).unwrap();
        assert_eq!(position.contents(G8), Some(Material::BK));
        assert_eq!(position.contents(F8), Some(Material::BR));
        assert_eq!(position.castling()[Color::Black], CastlingRights::NONE);
        assert_eq!(position.castling()[Color::White], CastlingRights::ALL);
    }
    #[test]
    fn test_play_move_errors() {
        let mut position = Position::standard();
        let err = position.play_move(E4, E5).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::EmptySquare(E4)));
        let err = position.play_move(E7, E5).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::NotYourTurn(E7)));
        let err = position.play_move(E2, E5).unwrap_err();
        assert_eq!(err.downcast_ref::<MoveError>(), Some(&MoveError::IllegalMove));
        assert_eq!(position, Position::standard());
        position.play_move(E2, E4).unwrap();
        assert_eq!(position.contents(E4), Some(Material::WP));
        assert_eq!(position.turn(), Color::White);
    }
}

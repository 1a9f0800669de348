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
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;
use thiserror::Error;

use super::castling::{CastlingRights, Wing};
use super::material::{Color, Material, Pair, Piece};
use super::moves::{attacked_squares, Cells};
use super::square::{File, Mask, Rank, Square};
use super::Turn;

use Color::*;
use Piece::*;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionError {
    #[error("No {0} king on the board")]
    MissingKing(Color),
}

/// The most recently applied move. Informational only.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Squares([Option<Material>; 64]);

impl Squares {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Squares {
    type Output = Option<Material>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Squares {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

/// The state of a board: the contents of each square, whose turn it is,
/// castling rights, the en passant target and the last move.
///
/// A position is only mutated through `apply_move` and `switch_turn` (or
/// wholesale by one of the setup methods). `apply_move` never toggles the
/// turn; callers sequence turns themselves. Cloning produces a fully
/// independent copy, which is what the legality filter simulates moves on.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    squares: Squares,
    turn: Color,
    castling: Pair<CastlingRights>,
    en_passant: Option<Square>,
    last_move: Option<LastMove>,
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

impl Position {
    /// An empty board with white to move and no castling rights.
    pub fn empty() -> Self {
        Self {
            squares: Squares::empty(),
            turn: White,
            castling: Pair::new(CastlingRights::NONE, CastlingRights::NONE),
            en_passant: None,
            last_move: None,
        }
    }

    pub fn standard() -> Self {
        let mut position = Self::empty();
        position.setup_standard();
        position
    }

    /// Resets to the standard starting position.
    pub fn setup_standard(&mut self) {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        *self = Self::empty();
        for color in Color::iter() {
            for file in File::iter() {
                let piece = BACK_RANK[file.to_index()];
                self.place(Square::new(file, Rank::back_rank(color)), Material::new(color, piece));
                self.place(Square::new(file, Rank::pawn_rank(color)), Material::new(color, Pawn));
            }
        }
        self.castling = Pair::default();
    }

    #[inline]
    pub fn contents(&self, square: Square) -> Option<Material> {
        self.squares[square]
    }

    #[inline]
    pub fn castling(&self) -> &Pair<CastlingRights> {
        &self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Squares holding pieces of `color`.
    pub fn pieces(&self, color: Color) -> Mask {
        Square::iter()
            .filter(|&square| matches!(self.contents(square), Some(m) if m.color() == color))
            .collect()
    }

    pub fn king_square(&self, color: Color) -> Result<Square> {
        Square::iter()
            .find(|&square| matches!(self.contents(square), Some(m) if m.is(color, King)))
            .ok_or_else(|| PositionError::MissingKing(color).into())
    }

    /// Whether any piece of color `by` attacks `target`.
    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        self.pieces(by)
            .iter()
            .any(|from| attacked_squares(self, from).contains(target))
    }

    pub fn switch_turn(&mut self) {
        self.turn = !self.turn;
    }

    /// Moves the piece on `from` to `to`, carrying out any capture, en
    /// passant capture, castling rook transfer and promotion the move
    /// implies. The move is not validated (see `play_move`) and the turn
    /// is not switched. Moving from an empty square does nothing.
    pub fn apply_move(&mut self, from: Square, to: Square) {
        let Some(material) = self.contents(from) else {
            return;
        };
        let color = material.color();
        let piece = material.piece();

        let en_passant = self.en_passant.take();
        let captured = self.contents(to);

        if piece.is_pawn() && captured.is_none() && from.col() != to.col() && en_passant == Some(to) {
            // the double advanced pawn sits one rank behind the target
            let victim = Square::new(to.file(), from.rank());
            if self.contents(victim) == Some(Material::new(!color, Pawn)) {
                self.remove(victim);
            }
        }

        if piece == King {
            if let Some(wing) = Wing::of_king_move(from, to) {
                if let Some(rook) = self.remove(wing.rook_src(color)) {
                    self.place(wing.rook_dest(color), rook);
                }
            }
        }

        self.remove(from);
        self.place(to, material);

        if piece.is_pawn() && from.row().abs_diff(to.row()) == 2 {
            self.en_passant = Some(Square::from_coords((from.row() + to.row()) / 2, from.col()));
        }

        match piece {
            King => self.castling[color].clear(),
            Rook => self.castling.forfeit_rook_square(color, from),
            _ => {}
        }
        if let Some(captured) = captured {
            if captured.piece().is_rook() {
                self.castling.forfeit_rook_square(captured.color(), to);
            }
        }

        if piece.is_pawn() && to.rank() == Rank::promotion_rank(color) {
            self.place(to, Material::new(color, Queen));
        }

        self.last_move = Some(LastMove { from, to, piece });
    }

    pub(super) fn place(&mut self, square: Square, material: Material) -> Option<Material> {
        self.squares[square].replace(material)
    }

    fn remove(&mut self, square: Square) -> Option<Material> {
        self.squares[square].take()
    }

    pub(super) fn from_parts(
        squares: [Option<Material>; 64],
        turn: Color,
        castling: Pair<CastlingRights>,
        en_passant: Option<Square>,
    ) -> Self {
        Self {
            squares: Squares(squares),
            turn,
            castling,
            en_passant,
            last_move: None,
        }
    }

    pub(super) fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Cells for Position {
    #[inline]
    fn cell(&self, square: Square) -> Option<Material> {
        self.contents(square)
    }
    #[inline]
    fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in Square::iter() {
            match self.contents(square) {
                Some(material) => write!(f, "{}", material)?,
                None => write!(f, ".")?,
            }
            if square.col() == 7 {
                writeln!(f)?;
            }
        }
        writeln!(f, "{}", self)
    }
}

#[cfg(test)]
impl Position {
    pub fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        self.squares[square] = value;
        self
    }
    pub fn set_en_passant(mut self, value: Option<Square>) -> Self {
        self.en_passant = value;
        self
    }
    pub fn with_turn(mut self, value: Color) -> Self {
        self.turn = value;
        self
    }
    pub fn clear_castling(mut self, color: Color, wing: Wing) -> Self {
        self.castling[color].clear_wing(wing);
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use Square::*;

    #[test]
    fn test_standard_setup() {
        let position = Position::standard();
        assert_eq!(position.turn(), Color::White);
        assert_eq!(position.contents(E1), Some(Material::WK));
        assert_eq!(position.contents(D8), Some(Material::BQ));
        assert_eq!(position.contents(A7), Some(Material::BP));
        assert_eq!(position.contents(E4), None);
        assert_eq!(position.pieces(Color::White).len(), 16);
        assert_eq!(position.pieces(Color::Black).len(), 16);
        assert_eq!(position.castling()[Color::Black], CastlingRights::ALL);
        assert_eq!(position.en_passant(), None);
        assert_eq!(position.last_move(), None);
    }
    #[test]
    fn test_apply_move_does_not_switch_turn() {
        let mut position = Position::standard();
        position.apply_move(G1, F3);
        assert_eq!(position.turn(), Color::White);
        assert_eq!(position.contents(F3), Some(Material::WN));
        assert_eq!(position.contents(G1), None);
        assert_eq!(
            position.last_move(),
            Some(LastMove { from: G1, to: F3, piece: Piece::Knight })
        );
        position.switch_turn();
        assert_eq!(position.turn(), Color::Black);
    }
    #[test]
    fn test_move_from_empty_square_is_ignored() {
        let mut position = Position::standard();
        position.apply_move(E4, E5);
        assert_eq!(position, Position::standard());
    }
    #[test]
    fn test_double_advance_sets_en_passant() {
        let mut position = Position::standard();
        position.apply_move(E2, E4);
        assert_eq!(position.en_passant(), Some(E3));
        position.apply_move(G8, F6);
        assert_eq!(position.en_passant(), None);
        position.apply_move(D7, D5);
        assert_eq!(position.en_passant(), Some(D6));
    }
    #[test]
    fn test_en_passant_removes_pawn() {
        let mut position = Position::standard()
            .set_contents(E5, Some(Material::WP))
            .set_contents(E2, None);
        position.apply_move(D7, D5);
        position.apply_move(E5, D6);
        assert_eq!(position.contents(D6), Some(Material::WP));
        assert_eq!(position.contents(D5), None);
        assert_eq!(position.contents(E5), None);
        assert_eq!(position.en_passant(), None);
    }
    #[test]
    fn test_black_en_passant_removes_pawn() {
        let mut position = Position::standard()
            .set_contents(B4, Some(Material::BP))
            .set_contents(B7, None);
        position.apply_move(A2, A4);
        position.apply_move(B4, A3);
        assert_eq!(position.contents(A3), Some(Material::BP));
        assert_eq!(position.contents(A4), None);
    }
    #[test]
    fn test_diagonal_move_without_target_captures_nothing_extra() {
        let mut position = Position::standard()
            .set_contents(E5, Some(Material::WP))
            .set_contents(D6, Some(Material::BN));
        position.apply_move(E5, D6);
        assert_eq!(position.contents(D6), Some(Material::WP));
        assert_eq!(position.contents(D7), Some(Material::BP));
    }
    #[test]
    fn test_short_castle_moves_rook() {
        let mut position = Position::standard()
            .set_contents(F1, None)
            .set_contents(G1, None);
        position.apply_move(E1, G1);
        assert_eq!(position.contents(G1), Some(Material::WK));
        assert_eq!(position.contents(F1), Some(Material::WR));
        assert_eq!(position.contents(H1), None);
        assert_eq!(position.contents(E1), None);
        assert_eq!(position.castling()[Color::White], CastlingRights::NONE);
        assert_eq!(position.castling()[Color::Black], CastlingRights::ALL);
    }
    #[test]
    fn test_long_castle_moves_rook() {
        let mut position = Position::standard()
            .set_contents(B8, None)
            .set_contents(C8, None)
            .set_contents(D8, None);
        position.apply_move(E8, C8);
        assert_eq!(position.contents(C8), Some(Material::BK));
        assert_eq!(position.contents(D8), Some(Material::BR));
        assert_eq!(position.contents(A8), None);
        assert_eq!(position.castling()[Color::Black], CastlingRights::NONE);
    }
    #[test]
    fn test_king_step_forfeits_both_wings() {
        let mut position = Position::standard().set_contents(E2, None);
        position.apply_move(E1, E2);
        position.apply_move(E2, E1);
        assert_eq!(position.castling()[Color::White], CastlingRights::NONE);
    }
    #[test]
    fn test_rook_move_forfeits_its_wing() {
        let mut position = Position::standard().set_contents(H2, None);
        position.apply_move(H1, H3);
        assert!(!position.castling()[Color::White].oo());
        assert!(position.castling()[Color::White].ooo());
        position.apply_move(H3, H1);
        assert!(!position.castling()[Color::White].oo());
    }
    #[test]
    fn test_capturing_rook_on_home_square_forfeits_its_wing() {
        let mut position = Position::standard().set_contents(B7, Some(Material::WB));
        position.apply_move(B7, A8);
        assert_eq!(position.contents(A8), Some(Material::WB));
        assert!(!position.castling()[Color::Black].ooo());
        assert!(position.castling()[Color::Black].oo());
    }
    #[test]
    fn test_white_promotes_to_queen() {
        let mut position = Position::standard()
            .set_contents(B7, Some(Material::WP))
            .set_contents(A8, None);
        position.apply_move(B7, A8);
        assert_eq!(position.contents(A8), Some(Material::WQ));
        assert_eq!(position.last_move().map(|mv| mv.piece), Some(Piece::Pawn));
    }
    #[test]
    fn test_black_promotes_to_queen() {
        let mut position = Position::empty()
            .set_contents(C2, Some(Material::BP))
            .with_turn(Color::Black);
        position.apply_move(C2, C1);
        assert_eq!(position.contents(C1), Some(Material::BQ));
    }
    #[test]
    fn test_clone_is_independent() {
        let original = Position::standard();
        let mut copy = original.clone();
        copy.apply_move(E2, E4);
        copy.switch_turn();
        assert_eq!(original.contents(E2), Some(Material::WP));
        assert_eq!(original.en_passant(), None);
        assert_eq!(original.turn(), Color::White);
        assert_ne!(original, copy);
    }
    #[test]
    fn test_king_square() {
        let position = Position::standard();
        assert_eq!(position.king_square(Color::White).unwrap(), E1);
        let position = position.set_contents(E8, None);
        let err = position.king_square(Color::Black).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PositionError>(),
            Some(&PositionError::MissingKing(Color::Black))
        );
    }
    #[test]
    fn test_is_attacked() {
        let position = Position::standard();
        assert!(position.is_attacked(F3, Color::White));
        assert!(position.is_attacked(D6, Color::Black));
        assert!(!position.is_attacked(E4, Color::White));
        assert!(!position.is_attacked(E5, Color::Black));
    }
}

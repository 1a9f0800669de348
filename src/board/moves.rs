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

//! Pseudo-legal move generation.
//!
//! Two operations share the movement shapes of each piece but differ in
//! which occupied squares they reach:
//!
//! * `pseudo_legal_moves` never lands on a friendly piece or on either
//!   king, and a pawn only moves diagonally onto a capture (or onto the
//!   en passant target).
//! * `attacked_squares` reaches the enemy king, and a pawn threatens both
//!   forward diagonals whether or not anything stands there.
//!
//! Neither looks at the safety of the moving side's own king; that is the
//! job of the legality filter in `legal`.

use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::square::{Direction, Mask, Offset, Rank, Square};

use Piece::*;

/// The read-only view of a board that move generation needs.
pub trait Cells {
    #[inline]
    fn in_bounds(&self, row: isize, col: isize) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    fn cell(&self, square: Square) -> Option<Material>;

    #[inline]
    fn en_passant_target(&self) -> Option<Square> {
        None
    }
}

const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(-1, -2),
    Offset::new(1, -2),
    Offset::new(-2, -1),
    Offset::new(2, -1),
    Offset::new(-2, 1),
    Offset::new(2, 1),
    Offset::new(-1, 2),
    Offset::new(1, 2),
];

const KING_OFFSETS: [Offset; 8] = [
    Offset::new(-1, -1),
    Offset::new(0, -1),
    Offset::new(1, -1),
    Offset::new(-1, 0),
    Offset::new(1, 0),
    Offset::new(-1, 1),
    Offset::new(0, 1),
    Offset::new(1, 1),
];

/// Destinations for the piece on `from`, ignoring the safety of its own
/// king. Castling is not included.
pub fn pseudo_legal_moves<B: Cells + ?Sized>(board: &B, from: Square) -> Mask {
    let Some(material) = board.cell(from) else {
        return Mask::empty();
    };
    let color = material.color();
    match material.piece() {
        Knight => leaps(board, from, color, &KNIGHT_OFFSETS, can_capture),
        King => leaps(board, from, color, &KING_OFFSETS, can_capture),
        Bishop => rays(board, from, color, Direction::diagonals(), can_capture),
        Rook => rays(board, from, color, Direction::horizontals(), can_capture),
        Queen => rays(board, from, color, Direction::iter(), can_capture),
        Pawn => pawn_moves(board, from, color),
    }
}

/// Squares the piece on `from` threatens, including a square holding the
/// enemy king and empty squares on a pawn's forward diagonals.
pub fn attacked_squares<B: Cells + ?Sized>(board: &B, from: Square) -> Mask {
    let Some(material) = board.cell(from) else {
        return Mask::empty();
    };
    let color = material.color();
    match material.piece() {
        Knight => leaps(board, from, color, &KNIGHT_OFFSETS, can_attack),
        King => leaps(board, from, color, &KING_OFFSETS, can_attack),
        Bishop => rays(board, from, color, Direction::diagonals(), can_attack),
        Rook => rays(board, from, color, Direction::horizontals(), can_attack),
        Queen => rays(board, from, color, Direction::iter(), can_attack),
        Pawn => pawn_attacks(board, from, color),
    }
}

// A move may take any enemy piece except the king.
fn can_capture(target: Material, mover: Color) -> bool {
    target.color() != mover && !target.piece().is_king()
}

fn can_attack(target: Material, mover: Color) -> bool {
    target.color() != mover
}

#[inline]
fn step<B: Cells + ?Sized>(board: &B, from: Square, offset: Offset) -> Option<Square> {
    let row = from.row() as isize + offset.y;
    let col = from.col() as isize + offset.x;
    if board.in_bounds(row, col) {
        Square::try_from_coords(row, col)
    } else {
        None
    }
}

fn leaps<B: Cells + ?Sized>(
    board: &B,
    from: Square,
    color: Color,
    offsets: &[Offset],
    reaches: fn(Material, Color) -> bool,
) -> Mask {
    offsets
        .iter()
        .filter_map(|&offset| step(board, from, offset))
        .filter(|&dest| board.cell(dest).map_or(true, |target| reaches(target, color)))
        .collect()
}

fn rays<B, I>(
    board: &B,
    from: Square,
    color: Color,
    directions: I,
    reaches: fn(Material, Color) -> bool,
) -> Mask
where
    B: Cells + ?Sized,
    I: Iterator<Item = Direction>,
{
    let mut mask = Mask::empty();
    for direction in directions {
        let offset = Offset::from(direction);
        let mut next = step(board, from, offset);
        while let Some(dest) = next {
            match board.cell(dest) {
                None => mask |= dest,
                Some(target) => {
                    if reaches(target, color) {
                        mask |= dest;
                    }
                    break;
                }
            }
            next = step(board, dest, offset);
        }
    }
    mask
}

fn pawn_moves<B: Cells + ?Sized>(board: &B, from: Square, color: Color) -> Mask {
    let mut mask = Mask::empty();
    let advance = Offset::new(0, color.forward());
    if let Some(one) = step(board, from, advance) {
        if board.cell(one).is_none() {
            mask |= one;
            if from.rank() == Rank::pawn_rank(color) {
                if let Some(two) = step(board, one, advance) {
                    if board.cell(two).is_none() {
                        mask |= two;
                    }
                }
            }
        }
    }
    for dest in pawn_attacks(board, from, color) {
        let reachable = match board.cell(dest) {
            Some(target) => can_capture(target, color),
            // the en passant target belongs to whichever side did not just
            // double advance, which fixes its rank
            None => {
                board.en_passant_target() == Some(dest)
                    && dest.rank() == Rank::en_passant_rank(color)
            }
        };
        if reachable {
            mask |= dest;
        }
    }
    mask
}

fn pawn_attacks<B: Cells + ?Sized>(board: &B, from: Square, color: Color) -> Mask {
    let forward = color.forward();
    [Offset::new(-1, forward), Offset::new(1, forward)]
        .into_iter()
        .filter_map(|offset| step(board, from, offset))
        .collect()
}

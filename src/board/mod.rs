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

//! Chess board supporting standard chess and random starting positions
//!
//! A _position_ represents the state of a chess board and provides the
//! core mechanisms to play a game between two sides taking turns. The
//! following features are supported:
//!
//! [x] Standard chess rules (castling, en passant, promotion to queen)
//! [x] Random starting positions with each side confined to its own half
//! [x] Check, checkmate and stalemate detection
//! [x] Loading and saving positions in FEN-style notation
//! [ ] Under-promotion
//! [ ] Three-fold repetition and fifty-move rule
//! [ ] Move history and take backs
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square on an
//!   8-by-8 board. Rows are represented by `Rank` (`Rank8` .. `Rank1`)
//!   and columns by `File` (`FileA` .. `FileH`). Squares are named
//!   using the letter of the file followed by the number of the rank
//!   (e.g. `A8` .. `H1`) and are laid out starting from black's back
//!   rank, so `A8` is row 0.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. Masks are used for sets of squares such as
//!   the legal move destinations for a piece, and can be combined or
//!   modified using bitwise `|`, `|=`, `&`, `&=` and `!` operators.
//!
//! * `Material` represents a piece of a specific color. A `Piece` has
//!   six variants: `King`, `Queen`, `Rook`, `Bishop`, `Knight` and `Pawn`.
//!   `Color` is either `White` or `Black`.
//!
//! * A `Position` holds the state of the board: the contents of each
//!   square, whose turn it is, the castling rights, the en passant
//!   target and the last move. It is modified only by `apply_move`
//!   (or its validated form `play_move`), `switch_turn` and the setup
//!   methods. Moving never toggles the turn; the caller applies a move,
//!   switches the turn and then asks for the status of the side to move.
//!
//! * Move generation works on anything implementing `Cells`. There are
//!   two generators: `pseudo_legal_moves` (which never captures a king)
//!   and `attacked_squares` (which does, and counts empty pawn
//!   diagonals). `Position::legal_moves` filters the former by playing
//!   each candidate out on a copy of the position.
//!

mod castling;
mod legal;
mod material;
mod moves;
mod notation;
mod position;
#[cfg(feature = "random")]
mod random;
mod square;
mod terminal;

pub use castling::*;
pub use legal::*;
pub use material::*;
pub use moves::*;
pub use notation::*;
pub use position::*;
#[cfg(feature = "random")]
pub use random::*;
pub use square::*;
pub use terminal::*;

pub trait Turn {
    fn turn(&self) -> Color;
}

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
use strum_macros::EnumIter;

use super::material::{Color, Pair};
use super::square::{between, File, Mask, Rank, Square};

use File::*;

/// The side of the board a castling move heads towards.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Wing {
    KingSide,
    QueenSide,
}

use Wing::*;

impl Wing {
    /// Wing of a king move that travels two files along its rank, if any.
    pub fn of_king_move(from: Square, to: Square) -> Option<Self> {
        if from.row() != to.row() {
            return None;
        }
        match to.col() as isize - from.col() as isize {
            2 => Some(KingSide),
            -2 => Some(QueenSide),
            _ => None,
        }
    }
    #[inline]
    pub fn king_src(color: Color) -> Square {
        Square::new(FileE, Rank::back_rank(color))
    }
    #[inline]
    pub fn rook_src(&self, color: Color) -> Square {
        let file = match self {
            KingSide => FileH,
            QueenSide => FileA,
        };
        Square::new(file, Rank::back_rank(color))
    }
    #[inline]
    pub fn king_dest(&self, color: Color) -> Square {
        let file = match self {
            KingSide => FileG,
            QueenSide => FileC,
        };
        Square::new(file, Rank::back_rank(color))
    }
    #[inline]
    pub fn rook_dest(&self, color: Color) -> Square {
        let file = match self {
            KingSide => FileF,
            QueenSide => FileD,
        };
        Square::new(file, Rank::back_rank(color))
    }
    /// Squares that must be vacant: everything between king and rook.
    pub fn blocking_lane(&self, color: Color) -> Mask {
        between(Self::king_src(color), self.rook_src(color))
    }
    /// Squares the king crosses or lands on; none may be attacked.
    pub fn attacking_lane(&self, color: Color) -> Mask {
        let king_dest = self.king_dest(color);
        between(Self::king_src(color), king_dest) | king_dest
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    oo: bool,
    ooo: bool,
}

impl CastlingRights {
    pub const ALL: Self = Self::new(true, true);
    pub const NONE: Self = Self::new(false, false);

    pub const fn new(oo: bool, ooo: bool) -> Self {
        Self { oo, ooo }
    }
    #[inline]
    pub fn oo(&self) -> bool {
        self.oo
    }
    #[inline]
    pub fn ooo(&self) -> bool {
        self.ooo
    }
    #[inline]
    pub fn get(&self, wing: Wing) -> bool {
        match wing {
            KingSide => self.oo,
            QueenSide => self.ooo,
        }
    }
    pub fn clear(&mut self) {
        self.oo = false;
        self.ooo = false;
    }
    pub fn clear_wing(&mut self, wing: Wing) {
        match wing {
            KingSide => self.oo = false,
            QueenSide => self.ooo = false,
        }
    }
}

impl Pair<CastlingRights> {
    /// Clears the wing of `color` whose rook starts on `square`. Rights are
    /// keyed to the home square, so this covers both a rook leaving it and
    /// a rook being captured on it.
    pub fn forfeit_rook_square(&mut self, color: Color, square: Square) {
        for wing in [KingSide, QueenSide] {
            if wing.rook_src(color) == square {
                self[color].clear_wing(wing);
            }
        }
    }
}

impl Default for Pair<CastlingRights> {
    fn default() -> Self {
        Pair::new(CastlingRights::ALL, CastlingRights::ALL)
    }
}

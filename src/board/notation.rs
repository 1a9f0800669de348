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

//! Position notation: the placement, side to move, castling rights and
//! en passant fields of a FEN string. The move counters are accepted on
//! input but ignored; output always ends in `0 1`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::castling::CastlingRights;
use super::material::{Color, Material, Pair};
use super::position::Position;
use super::square::{File, Rank, Square};
use super::Turn;

use Color::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Expected 4 to 6 space separated fields, found {0}")]
    FieldCount(usize),
    #[error("Expected 8 ranks in the placement field, found {0}")]
    RankCount(usize),
    #[error("Unknown symbol '{symbol}' on rank {rank}")]
    UnknownSymbol { symbol: char, rank: Rank },
    #[error("Rank {rank} covers {files} files instead of 8")]
    RankWidth { rank: Rank, files: usize },
    #[error("Invalid side to move '{0}'")]
    InvalidSide(String),
    #[error("Invalid castling rights '{0}'")]
    InvalidCastling(String),
    #[error("Invalid en passant square '{0}'")]
    InvalidEnPassant(String),
    #[error("Invalid square '{0}'")]
    InvalidSquare(String),
}
use NotationError::*;

impl Position {
    pub fn from_notation(notation: &str) -> Result<Self> {
        let fields: Vec<&str> = notation.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FieldCount(fields.len()).into());
        }
        let squares = parse_placement(fields[0])?;
        let turn = parse_side(fields[1])?;
        let castling = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;
        Ok(Self::from_parts(squares, turn, castling, en_passant))
    }

    /// Replaces this position with the one described by `notation`. On
    /// error the position is left as it was.
    pub fn load_notation(&mut self, notation: &str) -> Result<()> {
        *self = Self::from_notation(notation)?;
        Ok(())
    }

    pub fn to_notation(&self) -> String {
        self.to_string()
    }
}

fn parse_placement(field: &str) -> Result<[Option<Material>; 64], NotationError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(RankCount(ranks.len()));
    }
    let mut squares = [None; 64];
    for (rank, text) in Rank::iter().zip(ranks) {
        let mut files = 0;
        for symbol in text.chars() {
            match symbol {
                '1'..='8' => files += symbol as usize - '0' as usize,
                _ => {
                    let material = Material::try_from_char(symbol).ok_or(UnknownSymbol { symbol, rank })?;
                    if files < 8 {
                        let square = Square::new(File::from_index(files), rank);
                        squares[square.to_index()] = Some(material);
                    }
                    files += 1;
                }
            }
        }
        if files != 8 {
            return Err(RankWidth { rank, files });
        }
    }
    Ok(squares)
}

fn parse_side(field: &str) -> Result<Color, NotationError> {
    match field {
        "w" => Ok(White),
        "b" => Ok(Black),
        _ => Err(InvalidSide(field.to_string())),
    }
}

fn parse_castling(field: &str) -> Result<Pair<CastlingRights>, NotationError> {
    let mut flags = [false; 4];
    if field != "-" {
        if field.is_empty() {
            return Err(InvalidCastling(field.to_string()));
        }
        for c in field.chars() {
            let index = "KQkq".find(c).ok_or_else(|| InvalidCastling(field.to_string()))?;
            if flags[index] {
                return Err(InvalidCastling(field.to_string()));
            }
            flags[index] = true;
        }
    }
    let [white_oo, white_ooo, black_oo, black_ooo] = flags;
    Ok(Pair::new(
        CastlingRights::new(white_oo, white_ooo),
        CastlingRights::new(black_oo, black_ooo),
    ))
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, NotationError> {
    if field == "-" {
        return Ok(None);
    }
    Square::try_from_string(field)
        .map(Some)
        .ok_or_else(|| InvalidEnPassant(field.to_string()))
}

impl FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_notation(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            if rank != Rank::Rank8 {
                write!(f, "/")?;
            }
            let mut gap = 0;
            for file in File::iter() {
                match self.contents(Square::new(file, rank)) {
                    Some(material) => {
                        if gap > 0 {
                            write!(f, "{}", gap)?;
                            gap = 0;
                        }
                        write!(f, "{}", material)?;
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                write!(f, "{}", gap)?;
            }
        }

        let side = match self.turn() {
            White => 'w',
            Black => 'b',
        };
        write!(f, " {} ", side)?;

        let rights = self.castling();
        let mut castling = String::new();
        for (held, c) in [
            (rights.white().oo(), 'K'),
            (rights.white().ooo(), 'Q'),
            (rights.black().oo(), 'k'),
            (rights.black().ooo(), 'q'),
        ] {
            if held {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        write!(f, "{} ", castling)?;

        match self.en_passant() {
            Some(square) => write!(f, "{}", square)?,
            None => write!(f, "-")?,
        }
        write!(f, " 0 1")
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PositionVisitor;
        impl<'de> serde::de::Visitor<'de> for PositionVisitor {
            type Value = Position;
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a position notation string")
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Position::from_notation(v).map_err(E::custom)
            }
        }
        deserializer.deserialize_str(PositionVisitor)
    }
}

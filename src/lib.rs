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

//! A chess rules engine with randomized starting positions.
//!
//! ```
//! use random_chess::*;
//!
//! let mut position = Position::standard();
//! position.play_move(Square::E2, Square::E4).unwrap();
//! position.switch_turn();
//! assert_eq!(position.status(Color::Black), Status::Ongoing);
//! assert_eq!(
//!     position.to_notation(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! ```

mod board;

pub use board::*;

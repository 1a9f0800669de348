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

use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{arg, command, value_parser, ArgMatches, Command};

use random_chess::{Position, RandomSetup, Square, Turn};

fn main() -> ExitCode {
    let matches = command!()
        .propagate_version(true)
        .subcommand_required(true)
        .subcommand(Command::new("standard").about("Prints the standard starting position"))
        .subcommand(
            Command::new("random")
                .about("Prints a random starting position")
                .arg(arg!(-s --seed <SEED> "Seed for a reproducible position").value_parser(value_parser!(u64)))
                .arg(arg!(--"allow-mate-in-one" "Accept positions where white mates on its first move"))
                .arg(
                    arg!(-t --"max-tries" <TRIES> "Candidates to try before giving up")
                        .default_value("5000")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("moves")
                .about("Lists the legal destinations for a piece")
                .arg(arg!(<NOTATION> "Board position"))
                .arg(arg!(<SQUARE> "Square of the piece to move").value_parser(value_parser!(Square))),
        )
        .subcommand(
            Command::new("status")
                .about("Reports check, checkmate or stalemate for the side to move")
                .arg(arg!(<NOTATION> "Board position")),
        )
        .subcommand(
            Command::new("play")
                .about("Plays a move and prints the resulting position")
                .arg(arg!(<NOTATION> "Board position"))
                .arg(arg!(<FROM> "Square to move from").value_parser(value_parser!(Square)))
                .arg(arg!(<TO> "Square to move to").value_parser(value_parser!(Square))),
        )
        .get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("standard", _)) => {
            println!("{}", Position::standard());
        }
        Some(("random", args)) => {
            let mut options = RandomSetup::default()
                .forbid_mate_in_one(!args.get_flag("allow-mate-in-one"))
                .max_tries(*required::<usize>(args, "max-tries")?);
            if let Some(&seed) = args.get_one::<u64>("seed") {
                options = options.with_seed(seed);
            }
            let mut position = Position::empty();
            position.setup_random(&options)?;
            println!("{}", position);
        }
        Some(("moves", args)) => {
            let position = notation(args)?;
            let from = *required::<Square>(args, "SQUARE")?;
            let moves: Vec<String> = position.legal_moves(from).iter().map(|to| to.to_string()).collect();
            println!("{}", moves.join(" "));
        }
        Some(("status", args)) => {
            let position = notation(args)?;
            println!("{}", position.status(position.turn()));
        }
        Some(("play", args)) => {
            let mut position = notation(args)?;
            let from = *required::<Square>(args, "FROM")?;
            let to = *required::<Square>(args, "TO")?;
            position.play_move(from, to)?;
            position.switch_turn();
            println!("{}", position);
            println!("{}", position.status(position.turn()));
        }
        _ => return Err(anyhow!("Unknown subcommand")),
    }
    Ok(())
}

fn notation(args: &ArgMatches) -> Result<Position> {
    required::<String>(args, "NOTATION")?.parse()
}

fn required<'a, T: Clone + Send + Sync + 'static>(args: &'a ArgMatches, id: &str) -> Result<&'a T> {
    args.get_one::<T>(id).ok_or_else(|| anyhow!("Missing argument {id}"))
}

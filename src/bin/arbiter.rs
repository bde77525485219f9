// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate serde_derive;

use std::process;
use std::time::Instant;

use arbiter::{divide, perft, Game, GameStatus, MoveOutcome, Position, Square, START_FEN};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .default_value(START_FEN)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .default_value("3")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("divide")
                        .help("Print the node count below each root move")
                        .long("--divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal destinations of a piece")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("SQUARE")
                        .help("Square of the piece to move, such as e2")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a sequence of moves and report the result")
                .arg(
                    Arg::with_name("fen")
                        .help("FEN string of the position to start from")
                        .value_name("FEN")
                        .long("--fen")
                        .default_value(START_FEN)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("json")
                        .help("Print the result as JSON")
                        .long("--json"),
                )
                .arg(
                    Arg::with_name("MOVE")
                        .help("Moves in algebraic (Nf3, O-O) or coordinate (g1f3) notation")
                        .multiple(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("moves", Some(matches)) => run_moves(matches),
        ("play", Some(matches)) => run_play(matches),
        _ => process::exit(1),
    }
}

fn load_position(fen: &str) -> Position {
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap_or(START_FEN);
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = load_position(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    if matches.is_present("divide") {
        let mut split = divide(&pos, depth);
        split.sort_by_key(|&((start, end, _), _)| (start, end));
        for ((start, end, promotion), count) in &split {
            match promotion {
                Some(kind) => println!("{}{}{}: {}", start, end, kind, count),
                None => println!("{}{}: {}", start, end, count),
            }
        }

        println!();
        println!("total: {}", split.iter().map(|&(_, n)| n).sum::<u64>());
        process::exit(0);
    }

    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&pos, i);
        let duration = start.elapsed();
        let ms = duration.as_secs() * 1000 + u64::from(duration.subsec_millis());
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap_or(START_FEN);
    let square = value_t_or_exit!(matches, "SQUARE", Square);
    let pos = load_position(fen);

    let moves = pos.legal_moves(square);
    match pos.piece_at(square) {
        Some(piece) => println!("{} on {}: {} legal moves", piece, square, moves.count()),
        None => println!("no piece on {}", square),
    }

    let names: Vec<_> = moves.iter().map(|sq| sq.to_string()).collect();
    println!("{}", names.join(" "));
    println!();
    println!("{}", moves);
    process::exit(0);
}

#[derive(Serialize)]
struct PlayReport<'a> {
    fen: String,
    status: GameStatus,
    moves: &'a [MoveOutcome],
    history: Vec<&'a str>,
}

fn run_play(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("fen").unwrap_or(START_FEN);
    let mut game = match Game::from_fen(fen) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let mut outcomes = vec![];
    for text in matches.values_of("MOVE").into_iter().flatten() {
        match game.move_by_notation(text) {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                eprintln!("{}: {}", text, err);
                process::exit(1);
            }
        }
    }

    if matches.is_present("json") {
        let report = PlayReport {
            fen: game.fen(),
            status: game.status(),
            moves: &outcomes,
            history: game.history().collect(),
        };

        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("failed to serialize report: {}", err);
                process::exit(1);
            }
        }
    } else {
        print!("{}", game);
    }

    process::exit(0);
}

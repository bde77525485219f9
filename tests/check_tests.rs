// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arbiter::{Color, Position, Square, SquareSet};

#[test]
fn smoke_test_starting_position() {
    let pos = Position::from_start_position();

    // neither side is in check.
    assert!(!pos.in_check(Color::White));
    assert!(!pos.in_check(Color::Black));
}

#[test]
fn fools_mate_check() {
    let pos =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1")
            .unwrap();

    // white is checked by the queen on h4
    assert!(pos.in_check(Color::White));
    assert!(!pos.in_check(Color::Black));
}

#[test]
fn sliding_piece_pin() {
    let pos = Position::from_fen("8/8/4q3/8/8/8/4P3/4K3 w - - 0 1").unwrap();

    // white is not checked, the white pawn is blocking the queen
    assert!(!pos.in_check(Color::White));

    // and the pawn may still advance along the pin.
    let moves: SquareSet = vec![Square::E3, Square::E4].into_iter().collect();
    assert_eq!(moves, pos.legal_moves(Square::E2));
}

#[test]
fn position_5_bug_1_absolute_pin() {
    let pos =
        Position::from_fen("rnR2k1r/pp1qbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1").unwrap();

    // black is checked by the white rook
    assert!(pos.in_check(Color::Black));
}

#[test]
fn pawn_checks_diagonally_only() {
    let pos = Position::from_fen("8/8/8/3k4/4P3/8/8/4K3 b - - 0 1").unwrap();
    assert!(pos.in_check(Color::Black));

    // a pawn directly in front of a king gives no check.
    let pos = Position::from_fen("8/8/8/4k3/4P3/8/8/4K3 b - - 0 1").unwrap();
    assert!(!pos.in_check(Color::Black));
}

#[test]
fn knight_check_jumps_over_pieces() {
    let pos = Position::from_fen("4k3/3ppp2/5N2/8/8/8/8/4K3 b - - 0 1").unwrap();
    assert!(pos.in_check(Color::Black));
}

#[test]
fn attackers_of_square() {
    let pos = Position::from_fen("4k3/8/8/8/1b6/8/3P4/R3K3 w - - 0 1").unwrap();
    let attackers = pos.squares_attacking(Color::White, Square::D3);
    // the pawn on d2 only pushes to d3, which is not an attack.
    assert!(attackers.is_empty());

    let attackers = pos.squares_attacking(Color::Black, Square::E1);
    assert!(attackers.is_empty());

    let attackers = pos.squares_attacking(Color::White, Square::A8);
    let expected: SquareSet = vec![Square::A1].into_iter().collect();
    assert_eq!(expected, attackers);
}

#[test]
fn king_may_not_step_into_check() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/r7/4K3 w - - 0 1").unwrap();
    let moves = pos.legal_moves(Square::E1);
    let expected: SquareSet = vec![Square::D1, Square::F1].into_iter().collect();
    assert_eq!(expected, moves);
}

#[test]
fn check_must_be_answered() {
    // White is in check from the rook on e8: only moves that block, capture or step
    // away are legal.
    let pos = Position::from_fen("4r2k/8/8/8/8/8/3B4/R3K3 w - - 0 1").unwrap();
    assert!(pos.in_check(Color::White));

    let blocks: SquareSet = vec![Square::E3].into_iter().collect();
    assert_eq!(blocks, pos.legal_moves(Square::D2));
    assert!(pos.legal_moves(Square::A1).is_empty());

    let king: SquareSet = vec![Square::D1, Square::F1, Square::F2]
        .into_iter()
        .collect();
    assert_eq!(king, pos.legal_moves(Square::E1));
}

#[test]
fn legal_moves_never_leave_king_attacked() {
    for &fen in &[
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        let side = pos.side_to_move();
        for start in pos.pieces(side) {
            for end in pos.legal_moves(start) {
                let mut next = pos.clone();
                next.apply_move(start, end, None);
                assert!(
                    !next.in_check(side),
                    "{}{} leaves the king attacked in {}",
                    start,
                    end,
                    fen
                );
            }
        }
    }
}

#[test]
fn legal_moves_keep_every_safe_move() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let side = pos.side_to_move();
    for start in pos.pieces(side) {
        let legal = pos.legal_moves(start);
        for end in pos.pseudo_legal_moves(start) {
            let mut next = pos.clone();
            next.apply_move(start, end, None);
            assert_eq!(!next.in_check(side), legal.contains(end));
        }
    }
}

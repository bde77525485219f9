// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arbiter::{legal_moves, FenParseError, Game, GameError, GameStatus, START_FEN};
use arbiter::{Color, Piece, PieceKind, Square, SquareParseError};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test]
fn opening_pawn_moves() {
    let mut game = Game::new();
    game.make_move(Square::E2, Square::E4, None).unwrap();

    let moves = game.legal_moves(Square::E7);
    assert!(moves.contains(Square::E5));
    assert!(moves.contains(Square::E6));
    assert!(!moves.contains(Square::E4));
}

#[test]
fn en_passant_window() {
    let mut game = Game::new();
    for &(start, end) in &[
        (Square::E2, Square::E4),
        (Square::A7, Square::A6),
        (Square::E4, Square::E5),
        (Square::D7, Square::D5),
    ] {
        game.make_move(start, end, None).unwrap();
    }

    assert!(game.legal_moves(Square::E5).contains(Square::D6));

    // take it, and the d5 pawn disappears.
    let mut taken = game.clone();
    taken.make_move(Square::E5, Square::D6, None).unwrap();
    assert_eq!(None, taken.piece_at(Square::D5));
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::White)),
        taken.piece_at(Square::D6)
    );

    // or let it pass, and it's gone for good.
    game.make_move(Square::G1, Square::F3, None).unwrap();
    game.make_move(Square::A6, Square::A5, None).unwrap();
    assert!(!game.legal_moves(Square::E5).contains(Square::D6));
}

#[test]
fn turn_enforcement() {
    let mut game = Game::new();
    let before = game.fen();
    assert_eq!(
        Err(GameError::NotYourTurn(Square::E7)),
        game.make_move(Square::E7, Square::E5, None)
    );
    assert_eq!(before, game.fen());
    assert_eq!(0, game.ply());

    game.make_move(Square::E2, Square::E4, None).unwrap();
    let before = game.fen();
    assert_eq!(
        Err(GameError::NotYourTurn(Square::D2)),
        game.make_move(Square::D2, Square::D4, None)
    );
    assert_eq!(before, game.fen());
}

#[test]
fn rejected_moves_leave_state_alone() {
    let mut game = Game::new();
    let before = game.fen();

    assert_eq!(
        Err(GameError::NoPiecePresent(Square::E4)),
        game.make_move(Square::E4, Square::E5, None)
    );
    assert_eq!(
        Err(GameError::IllegalMove("e2e5".to_owned())),
        game.make_move(Square::E2, Square::E5, None)
    );
    assert_eq!(
        Err(GameError::IllegalMove("f1c4".to_owned())),
        game.make_move(Square::F1, Square::C4, None)
    );
    assert_eq!(
        Err(GameError::InvalidPromotion(PieceKind::Pawn)),
        game.make_move(Square::E2, Square::E4, Some(PieceKind::Pawn))
    );

    assert_eq!(before, game.fen());
    assert_eq!(0, game.ply());
}

#[test]
fn promotion_kind_ignored_elsewhere() {
    let mut game = Game::new();
    game.make_move(Square::E2, Square::E4, Some(PieceKind::Knight))
        .unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::White)),
        game.piece_at(Square::E4)
    );
}

#[test]
fn promotion_choice() {
    let mut game = Game::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    let mut rook = game.clone();

    game.make_move(Square::E7, Square::E8, None).unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::Queen, Color::White)),
        game.piece_at(Square::E8)
    );

    rook.make_move(Square::E7, Square::E8, Some(PieceKind::Rook))
        .unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::White)),
        rook.piece_at(Square::E8)
    );
}

#[test]
fn move_then_undo_is_identity() {
    let mut game = Game::from_fen(KIWIPETE).unwrap();
    let before = game.fen();
    for (start, end, promotion) in legal_moves(game.position()) {
        game.make_move(start, end, promotion).unwrap();
        assert!(game.undo());
        assert_eq!(before, game.fen(), "after undoing {}{}", start, end);
        assert_eq!(0, game.ply());
    }
}

#[test]
fn undo_walks_back_through_history() {
    let mut game = Game::new();
    let mut records = vec![game.fen()];
    for text in &["d4", "d5", "c4", "dxc4", "e3"] {
        game.move_by_notation(text).unwrap();
        records.push(game.fen());
    }

    assert_eq!(records, game.history().map(String::from).collect::<Vec<_>>());
    assert_eq!(5, game.ply());

    while let Some(expected) = records.pop() {
        assert_eq!(expected, game.fen());
        if records.is_empty() {
            break;
        }

        assert!(game.undo());
    }

    assert_eq!(0, game.ply());
}

#[test]
fn undo_without_history_falls_back_to_start() {
    let mut game = Game::new();
    assert!(!game.undo());
    assert_eq!(START_FEN, game.fen());

    let mut game = Game::from_fen(KIWIPETE).unwrap();
    assert!(!game.undo());
    assert_eq!(KIWIPETE, game.fen());
}

#[test]
fn load_start_and_set_fen() {
    let mut game = Game::new();
    game.move_by_notation("e4").unwrap();

    game.set_fen(KIWIPETE).unwrap();
    assert_eq!(KIWIPETE, game.fen());
    assert_eq!(0, game.ply());

    assert_eq!(
        Err(GameError::InvalidFen(FenParseError::WrongFieldCount(1))),
        game.set_fen("garbage")
    );
    assert_eq!(KIWIPETE, game.fen());

    game.load_start();
    assert_eq!(START_FEN, game.fen());
    assert_eq!(GameStatus::InProgress { check: false }, game.status());
}

#[test]
fn get_piece_by_name() {
    let game = Game::new();
    assert_eq!(
        Ok(Some(Piece::new(PieceKind::Knight, Color::Black))),
        game.get_piece("g8")
    );
    assert_eq!(
        Ok(Some(Piece::new(PieceKind::King, Color::White))),
        game.get_piece("E1")
    );
    assert_eq!(Ok(None), game.get_piece("e4"));
    assert_eq!(
        Err(GameError::InvalidSquare(SquareParseError::Malformed(
            "i1".to_owned()
        ))),
        game.get_piece("i1")
    );
    assert_eq!(
        Err(GameError::InvalidSquare(SquareParseError::Malformed(
            "e10".to_owned()
        ))),
        game.get_piece("e10")
    );
}

#[test]
fn legal_moves_for_either_side() {
    let game = Game::new();
    assert_eq!(2, game.legal_moves(Square::B8).count());
    assert!(game.legal_moves(Square::E4).is_empty());
    assert!(game.legal_moves(Square::A1).is_empty());
}

#[test]
fn separate_games_do_not_share_state() {
    let mut first = Game::new();
    let second = Game::new();
    first.move_by_notation("e4").unwrap();

    assert_eq!(1, first.ply());
    assert_eq!(0, second.ply());
    assert_eq!(START_FEN, second.fen());
}

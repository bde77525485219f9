// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use arbiter::{perft, Color, Game, Position, Square};
use criterion::black_box;
use criterion::Criterion;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("position snapshot", |b| {
        let pos = Position::from_start_position();
        b.iter(|| black_box(&pos).snapshot())
    });

    c.bench_function("legal moves e2 start", |b| {
        let pos = Position::from_start_position();
        b.iter(|| black_box(&pos).legal_moves(black_box(Square::E2)))
    });

    c.bench_function("legal moves king kiwipete", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| black_box(&pos).legal_moves(black_box(Square::E1)))
    });

    c.bench_function("in check kiwipete", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| black_box(&pos).in_check(Color::White))
    });

    c.bench_function("fen round trip kiwipete", |b| {
        b.iter(|| Position::from_fen(black_box(KIWIPETE)).unwrap().as_fen())
    });

    c.bench_function("notation move and undo", |b| {
        let mut game = Game::new();
        b.iter(|| {
            game.move_by_notation(black_box("Nf3")).unwrap();
            game.undo()
        })
    });

    c.bench_function("perft 2 start", |b| {
        let pos = Position::from_start_position();
        b.iter(|| perft(black_box(&pos), 2))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

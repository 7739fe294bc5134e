use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tictactoe_engine::tictactoe::{BotInput, GameEngine, Mark, calculate_move, empty_board};

fn bench_bot_move_empty_board(c: &mut Criterion) {
    c.bench_function("bot_move_empty", |b| {
        let input = BotInput::new(empty_board(), Mark::O);
        b.iter(|| calculate_move(black_box(&input)));
    });
}

fn bench_bot_move_mid_game(c: &mut Criterion) {
    c.bench_function("bot_move_midgame", |b| {
        let mut board = empty_board();
        for (index, mark) in [(0, Mark::X), (4, Mark::O), (8, Mark::X), (2, Mark::O), (6, Mark::X)] {
            board[index] = mark;
        }
        let input = BotInput::new(board, Mark::O);

        b.iter(|| calculate_move(black_box(&input)));
    });
}

fn bench_bot_vs_bot_playout(c: &mut Criterion) {
    c.bench_function("bot_vs_bot_playout", |b| {
        b.iter(|| {
            let mut engine = GameEngine::with_bot_mark(Mark::X);
            while !engine.status().is_over() {
                if engine.current_mark() == Mark::X {
                    engine.ai_move();
                } else if let Some(reply) = calculate_move(&BotInput::new(*engine.board(), Mark::O)) {
                    engine.make_move(reply.index);
                } else {
                    break;
                }
            }
            black_box(engine.status())
        });
    });
}

criterion_group!(benches, bench_bot_move_empty_board, bench_bot_move_mid_game, bench_bot_vs_bot_playout);
criterion_main!(benches);

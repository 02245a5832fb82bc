// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use tessera_board::{
    Board, BoardConfig, InputEvent, NoTextEntry, PointerButton, Shape, SvgRenderer, Tool,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn populated_board(count: usize, cell_size: f64) -> Board {
    let config = BoardConfig {
        cell_size,
        ..BoardConfig::default()
    };
    let mut board = Board::new(config).expect("valid config");
    board.set_canvas_size(Size::new(1920.0, 1080.0));
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let shapes = (0..count).map(|i| {
        let origin = Point::new(rng.next_f64() * 20_000.0, rng.next_f64() * 20_000.0);
        let size = Vec2::new(20.0 + rng.next_f64() * 200.0, 20.0 + rng.next_f64() * 200.0);
        let shape = match i % 3 {
            0 => Shape::Rectangle,
            1 => Shape::Ellipse,
            _ => Shape::Stroke {
                points: vec![origin, origin + size * 0.5, origin + size],
            },
        };
        (shape, origin, size)
    });
    board.extend_shapes(shapes).expect("generated shapes are valid");
    board
}

fn bench_cull(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_cull");
    for &cell in &[250.0, 500.0, 1000.0] {
        let mut board = populated_board(10_000, cell);
        board.set_view(Vec2::new(-5_000.0, -5_000.0), 1.0);
        group.bench_function(format!("draw_list_n10000_cell{cell}"), |b| {
            b.iter(|| black_box(board.draw_list().len()));
        });
        board.set_view(Vec2::ZERO, 0.1);
        group.bench_function(format!("draw_list_zoomed_out_cell{cell}"), |b| {
            b.iter(|| black_box(board.draw_list().len()));
        });
    }
    group.finish();
}

fn bench_interaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_interaction");
    let board = populated_board(10_000, 500.0);
    group.bench_function("hit_test_n10000", |b| {
        b.iter(|| black_box(board.hit_test(black_box(Point::new(7_000.0, 7_000.0)))));
    });
    group.bench_function("drag_release_n1000", |b| {
        let mut board = populated_board(1_000, 500.0);
        board
            .add_shape(Shape::Rectangle, Point::new(-100.0, -100.0), Vec2::new(50.0, 50.0))
            .expect("valid shape");
        board.set_tool(Tool::Selection);
        // Releasing a drag re-indexes the whole board.
        b.iter(|| {
            let from = Point::new(-75.0, -75.0);
            for event in [
                InputEvent::PointerDown {
                    pos: from,
                    button: PointerButton::Primary,
                },
                InputEvent::PointerMove { pos: from },
                InputEvent::PointerUp {
                    pos: from,
                    button: PointerButton::Primary,
                },
            ] {
                black_box(board.handle(event, &mut NoTextEntry));
            }
        });
    });
    group.bench_function("render_svg_frame_n10000", |b| {
        let mut board = populated_board(10_000, 500.0);
        board.set_view(Vec2::new(-5_000.0, -5_000.0), 1.0);
        b.iter(|| {
            let mut r = SvgRenderer::new();
            board.render(&mut r);
            black_box(r.finish().len())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_cull, bench_interaction);
criterion_main!(benches);

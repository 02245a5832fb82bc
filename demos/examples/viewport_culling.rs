// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport culling while panning and zooming over a large board.
//!
//! Run:
//! - `cargo run -p tessera_demos --example viewport_culling`

use kurbo::{Point, Size, Vec2};
use tessera_board::{Board, BoardConfig, InputEvent, NoTextEntry, Shape};

fn main() {
    env_logger::init();

    let mut board = Board::new(BoardConfig::default()).unwrap();
    board.set_canvas_size(Size::new(1920.0, 1080.0));

    // A 50x50 lattice of rectangles, 200 units apart.
    let shapes = (0..50).flat_map(|row| {
        (0..50).map(move |col| {
            let origin = Point::new(col as f64 * 200.0, row as f64 * 200.0);
            (Shape::Rectangle, origin, Vec2::new(120.0, 80.0))
        })
    });
    board.extend_shapes(shapes).unwrap();
    println!(
        "{} elements in {} cells",
        board.elements().len(),
        board.index().cell_count()
    );

    let report = |board: &Board, label: &str| {
        let list = board.draw_list();
        println!(
            "{label:<14} scale={:.1} visible={:?} -> {} of {} drawn",
            board.viewport().scale(),
            list.visible,
            list.len(),
            board.elements().len()
        );
    };

    report(&board, "home");
    board.set_view(Vec2::new(-4000.0, -4000.0), 1.0);
    report(&board, "panned");

    let center = Point::new(960.0, 540.0);
    for _ in 0..5 {
        board.handle(
            InputEvent::Wheel {
                pos: center,
                delta_y: 120.0,
            },
            &mut NoTextEntry,
        );
    }
    report(&board, "zoomed out");

    for _ in 0..20 {
        board.handle(
            InputEvent::Wheel {
                pos: center,
                delta_y: -120.0,
            },
            &mut NoTextEntry,
        );
    }
    report(&board, "zoomed in");
}

// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted editing session: draw, place text, drag, undo, save, reload, export.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p tessera_demos --example board_session`

use kurbo::{Point, Size};
use tessera_board::{
    Board, BoardConfig, Effects, EventQueue, InputEvent, LocalStore, PointerButton, Tool,
    export_svg,
};

fn gesture(from: Point, to: Point) -> [InputEvent; 3] {
    [
        InputEvent::PointerDown {
            pos: from,
            button: PointerButton::Primary,
        },
        InputEvent::PointerMove { pos: to },
        InputEvent::PointerUp {
            pos: to,
            button: PointerButton::Primary,
        },
    ]
}

fn main() {
    env_logger::init();

    let mut board = Board::new(BoardConfig::default()).unwrap();
    board.set_canvas_size(Size::new(800.0, 600.0));
    let store = LocalStore::in_dir(std::env::temp_dir().join("tessera_demo"));
    let mut labels = ["hello, board"].into_iter();
    let mut text_entry = |at: Point| {
        let label = labels.next().map(str::to_owned);
        log::info!("text requested at {at:?}: {label:?}");
        label
    };

    let mut queue = EventQueue::new();
    queue.push(InputEvent::SelectTool(Tool::Rectangle));
    queue.extend(gesture(Point::new(40.0, 40.0), Point::new(240.0, 140.0)));
    queue.push(InputEvent::SelectTool(Tool::Arrow));
    queue.extend(gesture(Point::new(260.0, 90.0), Point::new(420.0, 90.0)));
    queue.push(InputEvent::SelectTool(Tool::Pen));
    queue.push(InputEvent::PointerDown {
        pos: Point::new(450.0, 300.0),
        button: PointerButton::Primary,
    });
    for i in 1..=10 {
        let t = f64::from(i) * 0.6;
        queue.push(InputEvent::PointerMove {
            pos: Point::new(450.0 + 20.0 * t, 300.0 + 30.0 * t.sin()),
        });
    }
    queue.push(InputEvent::PointerUp {
        pos: Point::new(570.0, 300.0),
        button: PointerButton::Primary,
    });
    queue.push(InputEvent::SelectTool(Tool::Text));
    queue.push(InputEvent::PointerDown {
        pos: Point::new(60.0, 200.0),
        button: PointerButton::Primary,
    });
    // The entry closure has nothing left to give: this placement is skipped.
    queue.push(InputEvent::PointerDown {
        pos: Point::new(60.0, 300.0),
        button: PointerButton::Primary,
    });
    queue.push(InputEvent::SelectTool(Tool::Selection));
    queue.extend(gesture(Point::new(100.0, 100.0), Point::new(130.0, 160.0)));

    let effects = queue.dispatch(&mut board, &mut text_entry);
    println!("after session: {} elements, effects {effects:?}", board.elements().len());
    for e in board.elements() {
        println!("  {} {:?} at {:?}", e.id(), e.kind(), e.origin);
    }

    if board.undo().contains(Effects::PERSIST) {
        println!("undo removed the newest element; {} left", board.elements().len());
    }

    if let Err(err) = store.save(&board) {
        log::error!("save failed: {err}");
        return;
    }
    println!("saved to {}", store.path().display());

    let mut reloaded = Board::new(BoardConfig::default()).unwrap();
    reloaded.set_canvas_size(Size::new(800.0, 600.0));
    match store.load(&mut reloaded) {
        Ok(outcome) => println!("reloaded: {outcome:?}"),
        Err(err) => log::error!("load failed: {err}"),
    }

    println!("{}", export_svg(&reloaded));
}

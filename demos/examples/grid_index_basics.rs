// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid index basics: cell mapping, rebuild, and deduplicated queries.
//!
//! Run:
//! - `cargo run -p tessera_demos --example grid_index_basics`

use tessera_index::{Aabb2D, ExtentPolicy, GridIndex};

fn main() {
    let items = [
        ("small", Aabb2D::from_xywh(10.0, 10.0, 80.0, 40.0)),
        ("far", Aabb2D::from_xywh(1000.0, 1000.0, 50.0, 50.0)),
        // Spans nine cells; a query covering all of them still reports it once.
        ("wide", Aabb2D::from_xywh(400.0, 400.0, 700.0, 700.0)),
        // Drawn up and to the left: negative width and height.
        ("reversed", Aabb2D::from_xywh(600.0, 600.0, -200.0, -200.0)),
    ];
    let keyed: Vec<(usize, Aabb2D<f64>)> = items.iter().map(|(_, r)| *r).enumerate().collect();

    for policy in [ExtentPolicy::Normalized, ExtentPolicy::Raw] {
        let mut grid = GridIndex::<usize>::new(500.0, policy);
        grid.rebuild(keyed.iter());
        println!("{policy:?}: {} occupied cells", grid.cell_count());

        for (key, (name, _)) in items.iter().enumerate() {
            println!("  {name:>8} -> cells {:?}", grid.cells_of(key));
        }

        for probe in [
            Aabb2D::from_xywh(0.0, 0.0, 200.0, 200.0),
            Aabb2D::from_xywh(410.0, 410.0, 10.0, 10.0),
            Aabb2D::from_xywh(0.0, 0.0, 1200.0, 1200.0),
        ] {
            let hits: Vec<&str> = grid.query(probe).into_iter().map(|k| items[k].0).collect();
            println!("  query {probe:?} -> {hits:?}");
        }
    }
}

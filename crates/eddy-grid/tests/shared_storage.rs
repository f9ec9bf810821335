//! Field storage shared between a writer and concurrent readers.

use std::sync::Arc;
use std::thread;

use eddy_core::{Axis, Field, Grid, Idx3, Loc3, Location};
use eddy_grid::{GridError, GridField, RectilinearGrid};

#[test]
fn writes_are_visible_through_shared_handles() {
    let grid = RectilinearGrid::uniform([4, 4, 4], [1.0; 3]).unwrap();
    let field = Arc::new(GridField::zeros("t", &grid, Loc3::CCC));
    let reader: Arc<dyn Field> = field.clone();

    let idx = Idx3::new(2, 3, 1);
    field.set(idx, 7.5).unwrap();
    assert_eq!(reader.value(idx), 7.5);

    thread::scope(|s| {
        for _ in 0..4 {
            let reader = reader.clone();
            s.spawn(move || {
                assert_eq!(reader.value(idx), 7.5);
            });
        }
    });
}

#[test]
fn disjoint_writers_fill_every_slab() {
    let grid = RectilinearGrid::uniform([3, 3, 4], [1.0; 3]).unwrap();
    let field = GridField::zeros("t", &grid, Loc3::CCC);
    let extent = grid.extent();

    thread::scope(|s| {
        for k in 0..4 {
            let field = &field;
            s.spawn(move || {
                for idx in extent.slab(k) {
                    field.set(idx, idx.k as f64).unwrap();
                }
            });
        }
    });

    for idx in extent.iter() {
        assert_eq!(field.value(idx), idx.k as f64);
    }
}

#[test]
fn set_outside_storage_is_rejected() {
    let grid = RectilinearGrid::uniform([2, 2, 2], [1.0; 3]).unwrap();
    let field = GridField::zeros("t", &grid, Loc3::CCC);
    let far = Idx3::new(5, 0, 0);
    assert_eq!(
        field.set(far, 1.0),
        Err(GridError::IndexOutOfRange { idx: far })
    );
    assert!(field.value(far).is_nan());
}

#[test]
fn stretched_axis_spacing_matches_nodes() {
    let grid = RectilinearGrid::builder()
        .size([3, 2, 2])
        .stretched(Axis::X, vec![0.0, 1.0, 3.0, 7.0])
        .uniform(Axis::Z, 0.5)
        .build()
        .unwrap();

    for i in 0..3 {
        let idx = Idx3::new(i, 0, 0);
        let left = grid.node(Axis::X, Location::Face, i);
        let right = grid.node(Axis::X, Location::Face, i + 1);
        assert_eq!(grid.spacing(Axis::X, Location::Center, idx), right - left);
    }
    for i in 1..3 {
        let idx = Idx3::new(i, 0, 0);
        let west = grid.node(Axis::X, Location::Center, i - 1);
        let east = grid.node(Axis::X, Location::Center, i);
        assert_eq!(grid.spacing(Axis::X, Location::Face, idx), east - west);
    }
    assert_eq!(grid.spacing(Axis::Z, Location::Face, Idx3::new(0, 0, 1)), 0.5);
}

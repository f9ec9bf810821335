//! Test utilities and analytic fields for Eddy development.
//!
//! Provides small grid fixtures, index-ramp and noise fields backed by
//! [`GridField`], and [`FnField`], a closure-backed [`Field`] for
//! analytic profiles.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use eddy_core::{Field, Grid, Idx3, Loc3};
use eddy_grid::{ConstantField, GridField, RectilinearGrid};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Cubic grid with `n` points per axis, unit spacing and the default halo.
pub fn uniform_grid(n: usize) -> RectilinearGrid {
    match RectilinearGrid::uniform([n, n, n], [1.0; 3]) {
        Ok(grid) => grid,
        Err(e) => panic!("uniform_grid({n}): {e}"),
    }
}

/// Field `a·i + b·j + c·k + offset` over indices, halo included.
pub fn index_ramp(grid: &dyn Grid, location: Loc3, coeffs: [f64; 3], offset: f64) -> GridField {
    GridField::from_fn("ramp", grid, location, |p| {
        coeffs[0] * p.i as f64 + coeffs[1] * p.j as f64 + coeffs[2] * p.k as f64 + offset
    })
}

/// Same value everywhere.
pub fn constant(location: Loc3, value: f64) -> ConstantField {
    ConstantField::new("constant", location, value)
}

/// Deterministic uniform noise in `[-1, 1)`, halo included.
///
/// Seeded with ChaCha8 so property tests and benchmarks are reproducible.
pub fn noise_field(grid: &dyn Grid, location: Loc3, seed: u64) -> GridField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    GridField::from_fn("noise", grid, location, |_| {
        let unit = (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        2.0 * unit - 1.0
    })
}

/// Move any field behind an `Arc<dyn Field>`.
pub fn shared<F: Field + 'static>(field: F) -> Arc<dyn Field> {
    Arc::new(field)
}

/// A field defined by a closure over indices.
pub struct FnField<F> {
    location: Loc3,
    f: F,
}

impl<F> FnField<F>
where
    F: Fn(Idx3) -> f64 + Send + Sync,
{
    pub fn new(location: Loc3, f: F) -> Self {
        Self { location, f }
    }
}

impl<F> Field for FnField<F>
where
    F: Fn(Idx3) -> f64 + Send + Sync,
{
    fn location(&self) -> Loc3 {
        self.location
    }

    fn value(&self, idx: Idx3) -> f64 {
        (self.f)(idx)
    }

    fn name(&self) -> &str {
        "analytic"
    }
}

/// Maximum absolute difference between two fields over the grid interior.
pub fn max_abs_diff(grid: &dyn Grid, a: &dyn Field, b: &dyn Field) -> f64 {
    grid.extent()
        .iter()
        .map(|idx| (a.value(idx) - b.value(idx)).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_values() {
        let grid = uniform_grid(3);
        let f = index_ramp(&grid, Loc3::CCC, [1.0, 2.0, 3.0], 0.5);
        assert_eq!(f.value(Idx3::new(1, 1, 1)), 6.5);
        assert_eq!(f.value(Idx3::new(-1, 0, 0)), -0.5);
    }

    #[test]
    fn noise_is_deterministic_and_bounded() {
        let grid = uniform_grid(3);
        let a = noise_field(&grid, Loc3::CCC, 7);
        let b = noise_field(&grid, Loc3::CCC, 7);
        let c = noise_field(&grid, Loc3::CCC, 8);
        assert_eq!(max_abs_diff(&grid, &a, &b), 0.0);
        assert!(max_abs_diff(&grid, &a, &c) > 0.0);
        for idx in grid.extent().iter() {
            let v = a.value(idx);
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn fn_field_evaluates_closure() {
        let f = FnField::new(Loc3::FCC, |p: Idx3| (p.i * p.j) as f64);
        assert_eq!(f.value(Idx3::new(3, 4, 0)), 12.0);
        assert_eq!(f.location(), Loc3::FCC);
    }
}

//! Single-axis finite-difference and interpolation primitives.
//!
//! Both operate on any point function `f: Idx3 -> f64` and take the
//! location they *produce* along the axis. The partner point is fixed by
//! [`Location::neighbour_offset`]:
//!
//! ```text
//! to = Face:    ∂f[i] = (f[i]   - f[i-1]) / Δ(Face, i)     ℑf[i] = (f[i-1] + f[i]) / 2
//! to = Center:  ∂f[i] = (f[i+1] - f[i])   / Δ(Center, i)   ℑf[i] = (f[i] + f[i+1]) / 2
//! ```

use eddy_core::{Axis, Grid, Idx3, Location};

/// Two-point derivative along `axis`, producing a value at `to`.
#[inline]
pub fn derivative(
    grid: &dyn Grid,
    axis: Axis,
    to: Location,
    idx: Idx3,
    f: impl Fn(Idx3) -> f64,
) -> f64 {
    let spacing = grid.spacing(axis, to, idx);
    match to {
        Location::Face => (f(idx) - f(idx.shift(axis, -1))) / spacing,
        Location::Center => (f(idx.shift(axis, 1)) - f(idx)) / spacing,
    }
}

/// Two-point arithmetic mean along `axis`, producing a value at `to`.
#[inline]
pub fn interpolate(axis: Axis, to: Location, idx: Idx3, f: impl Fn(Idx3) -> f64) -> f64 {
    let partner = idx.shift(axis, to.neighbour_offset());
    0.5 * (f(idx) + f(partner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_grid::RectilinearGrid;

    #[test]
    fn derivative_to_face_looks_back() {
        let grid = RectilinearGrid::uniform([4, 4, 4], [0.5, 1.0, 1.0]).unwrap();
        let f = |p: Idx3| (p.i * p.i) as f64;
        // (4 - 1) / 0.5
        let d = derivative(&grid, Axis::X, Location::Face, Idx3::new(2, 0, 0), f);
        assert_eq!(d, 6.0);
    }

    #[test]
    fn derivative_to_center_looks_forward() {
        let grid = RectilinearGrid::uniform([4, 4, 4], [1.0, 1.0, 2.0]).unwrap();
        let f = |p: Idx3| (p.k * p.k) as f64;
        // (9 - 4) / 2
        let d = derivative(&grid, Axis::Z, Location::Center, Idx3::new(0, 0, 2), f);
        assert_eq!(d, 2.5);
    }

    #[test]
    fn interpolation_direction_follows_target() {
        let f = |p: Idx3| p.j as f64;
        let idx = Idx3::new(0, 3, 0);
        assert_eq!(interpolate(Axis::Y, Location::Face, idx, f), 2.5);
        assert_eq!(interpolate(Axis::Y, Location::Center, idx, f), 3.5);
    }

    #[test]
    fn interpolation_of_constant_is_identity() {
        let f = |_: Idx3| 7.25;
        for axis in Axis::ALL {
            for to in [Location::Center, Location::Face] {
                assert_eq!(interpolate(axis, to, Idx3::new(1, 1, 1), f), 7.25);
            }
        }
    }
}

//! Staggered-grid stencil operators.
//!
//! Two layers:
//!
//! - [`primitive`]: the two-point derivative and interpolation along one
//!   axis, over any `Idx3 -> f64` closure.
//! - [`expr`] and [`composite`]: typed expressions ([`Diff`], [`Interp`],
//!   [`Squared`] over a [`Sample`]) that carry their location, so kernels
//!   can validate where each term lands before evaluating anything.
//!
//! ```
//! use eddy_core::{Idx3, Loc3};
//! use eddy_grid::{GridField, RectilinearGrid};
//! use eddy_ops::{diff_z, interp_xy, sample, PointFn};
//!
//! let grid = RectilinearGrid::uniform([4, 4, 4], [1.0, 1.0, 0.5]).unwrap();
//! let b = GridField::from_fn("b", &grid, Loc3::CCC, |p| p.k as f64);
//!
//! let dbdz = interp_xy(diff_z(sample(&b)));
//! assert_eq!(dbdz.location(), Loc3::FFF);
//! assert_eq!(dbdz.at(&grid, Idx3::new(1, 1, 1)), 2.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod composite;
pub mod expr;
pub mod primitive;

pub use composite::{
    diff_x, diff_y, diff_z, interp_squared_diff, interp_x, interp_xy, interp_xyz, interp_xz,
    interp_y, interp_yz, interp_z, sample,
};
pub use expr::{Diff, Interp, PointFn, Sample, Squared};
pub use primitive::{derivative, interpolate};

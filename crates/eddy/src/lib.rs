//! Eddy: lazy diagnostics for rotating, stratified flows on staggered grids.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Eddy sub-crates. For most users, adding `eddy` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use eddy::prelude::*;
//!
//! // A 16³ grid with 10 m horizontal and 2 m vertical spacing.
//! let grid: Arc<dyn Grid> = Arc::new(RectilinearGrid::uniform([16, 16, 16], [10.0, 10.0, 2.0]).unwrap());
//!
//! // Resting fluid with N² = 1e-4 s⁻².
//! let b = GridField::from_fn("b", &*grid, Loc3::CCC, |p| 1e-4 * 2.0 * p.k as f64);
//! let flow = FlowFields {
//!     u: Arc::new(GridField::zeros("u", &*grid, Loc3::FCC)),
//!     v: Arc::new(GridField::zeros("v", &*grid, Loc3::CFC)),
//!     w: Arc::new(GridField::zeros("w", &*grid, Loc3::CCF)),
//!     b: Arc::new(b),
//! };
//!
//! let pv = ertel_potential_vorticity(grid.clone(), flow, ErtelParams::new(Coriolis::FPlane { f: 1e-4 })).unwrap();
//! let value = pv.at(Idx3::new(8, 8, 8));
//! assert!((value - 1e-8).abs() < 1e-20);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `eddy-core` | Locations, indices, `Grid` / `Field` traits, `DiagnosticError` |
//! | [`grid`] | `eddy-grid` | Reference rectilinear grid and atomic field storage |
//! | [`ops`] | `eddy-ops` | Stencil operators and typed lazy compositions |
//! | [`diagnostics`] | `eddy-diagnostics` | Diagnostic constructors, kernel fields, materialization |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`eddy-core`).
///
/// Contains the location system, grid indices, the [`types::Grid`] and
/// [`types::Field`] traits, and [`types::DiagnosticError`].
pub use eddy_core as types;

/// Reference grid and storage (`eddy-grid`).
///
/// [`grid::RectilinearGrid`] with uniform or stretched axes,
/// [`grid::GridField`] for mutable state, [`grid::ConstantField`].
pub use eddy_grid as grid;

/// Staggered-grid stencil operators (`eddy-ops`).
///
/// Build terms such as `interp_xy(diff_z(sample(&b)))` and evaluate them
/// with [`ops::PointFn::at`].
pub use eddy_ops as ops;

/// Diagnostic constructors and lazy kernel fields (`eddy-diagnostics`).
pub use eddy_diagnostics as diagnostics;

/// Common imports for typical Eddy usage.
///
/// ```rust
/// use eddy::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use eddy_core::{Axis, DiagnosticError, Field, Grid, Idx3, Loc3, Location};

    // Grid and storage
    pub use eddy_grid::{ConstantField, GridError, GridField, RectilinearGrid};

    // Diagnostics
    pub use eddy_diagnostics::{
        anisotropic_tracer_variance_dissipation_rate, compute_interior,
        compute_interior_parallel, directional_ertel_potential_vorticity,
        ertel_potential_vorticity, isotropic_tracer_variance_dissipation_rate,
        richardson_number, rossby_number, thermal_wind_potential_vorticity, Backgrounds,
        ComputeConfig, Coriolis, DiagnosticSet, FlowFields, KernelField, ShearInputs,
        TracerInputs, VorticityInputs,
    };

    // Parameters
    pub use eddy_diagnostics::{
        AnisotropicParams, DirectionalErtelParams, ErtelParams, IsotropicParams,
        RichardsonParams, RossbyParams, ThermalWindParams, ZeroShear,
    };
}

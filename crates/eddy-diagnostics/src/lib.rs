//! Lazy flow and tracer diagnostics for staggered-grid fluid simulations.
//!
//! Each diagnostic is built by one constructor that checks its
//! preconditions (target location, rotation model, parameter ranges and
//! the location of every stencil term) and returns a [`KernelField`]. A
//! kernel field evaluates its formula on demand at any index, always from
//! the current values of its inputs.
//!
//! | Constructor | Location |
//! |-------------|----------|
//! | [`richardson_number`] | `(C, C, F)` |
//! | [`rossby_number`] | `(F, F, C)` |
//! | [`thermal_wind_potential_vorticity`] | `(F, F, F)` |
//! | [`ertel_potential_vorticity`] | `(F, F, F)` |
//! | [`directional_ertel_potential_vorticity`] | `(F, F, F)` |
//! | [`isotropic_tracer_variance_dissipation_rate`] | `(C, C, C)` |
//! | [`anisotropic_tracer_variance_dissipation_rate`] | `(C, C, C)` |
//!
//! Interior values can be materialized serially with [`compute_interior`]
//! or on a worker pool with [`compute_interior_parallel`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod background;
pub mod compute;
pub mod config;
pub mod coriolis;
pub mod flow;
pub mod kernel_field;
pub mod set;
pub mod tracer;

pub use background::{with_background, Backgrounds, SumField};
pub use compute::{compute_interior, compute_interior_parallel};
pub use config::{
    AnisotropicParams, ComputeConfig, DirectionalErtelParams, ErtelParams, IsotropicParams,
    RichardsonParams, RossbyParams, ThermalWindParams, ZeroShear,
};
pub use coriolis::{Coriolis, RotationRate};
pub use flow::{
    directional_ertel_potential_vorticity, ertel_potential_vorticity, richardson_number,
    rossby_number, thermal_wind_potential_vorticity, DirectionalConstants,
    DirectionalErtelPotentialVorticity, ErtelPotentialVorticity, FlowFields, RichardsonNumber,
    RossbyConstants, RossbyNumber, ShearInputs, ThermalWindPotentialVorticity, VorticityInputs,
};
pub use kernel_field::{KernelField, KernelFn};
pub use set::DiagnosticSet;
pub use tracer::{
    anisotropic_tracer_variance_dissipation_rate, isotropic_tracer_variance_dissipation_rate,
    AnisotropicDissipationRate, IsotropicDissipationRate, TracerInputs,
};

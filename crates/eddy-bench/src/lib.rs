//! Benchmark profiles for Eddy diagnostics.
//!
//! - [`reference_state`]: a 64³ grid of deterministic noise state fields
//! - [`reference_diagnostics`]: every diagnostic over that state, as a
//!   [`DiagnosticSet`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use eddy_core::{DiagnosticError, Field, Grid, Loc3};
use eddy_diagnostics::{
    anisotropic_tracer_variance_dissipation_rate, directional_ertel_potential_vorticity,
    ertel_potential_vorticity, isotropic_tracer_variance_dissipation_rate, richardson_number,
    rossby_number, thermal_wind_potential_vorticity, AnisotropicParams, Coriolis,
    DiagnosticSet, DirectionalErtelParams, ErtelParams, FlowFields, IsotropicParams,
    RichardsonParams, RossbyParams, ShearInputs, ThermalWindParams, TracerInputs,
    VorticityInputs,
};
use eddy_test_utils::{constant, noise_field, shared, uniform_grid};

/// Points per axis of the reference grid.
pub const REFERENCE_SIZE: usize = 64;

/// Grid and state fields shared by the benchmarks.
pub struct ReferenceState {
    /// Uniform grid, unit spacing.
    pub grid: Arc<dyn Grid>,
    /// Noise velocity and buoyancy at their C-grid locations.
    pub flow: FlowFields,
    /// Constant diffusivity at cell centers.
    pub kappa: Arc<dyn Field>,
}

/// Build the reference state: `n³` points, noise fields seeded from `seed`.
pub fn reference_state(n: usize, seed: u64) -> ReferenceState {
    let grid: Arc<dyn Grid> = Arc::new(uniform_grid(n));
    let noise = |loc, offset| shared(noise_field(&*grid, loc, seed.wrapping_add(offset)));
    let flow = FlowFields {
        u: noise(Loc3::FCC, 0),
        v: noise(Loc3::CFC, 1),
        w: noise(Loc3::CCF, 2),
        b: noise(Loc3::CCC, 3),
    };
    ReferenceState {
        grid,
        flow,
        kappa: shared(constant(Loc3::CCC, 1e-5)),
    }
}

/// Every diagnostic over `state`, f-plane rotation `f = 1e-4`.
pub fn reference_diagnostics(state: &ReferenceState) -> Result<DiagnosticSet, DiagnosticError> {
    let grid = &state.grid;
    let flow = &state.flow;
    let coriolis = Coriolis::FPlane { f: 1e-4 };
    let shear = ShearInputs {
        u: flow.u.clone(),
        v: flow.v.clone(),
        b: flow.b.clone(),
    };
    let vorticity = VorticityInputs {
        u: flow.u.clone(),
        v: flow.v.clone(),
    };
    let tracer = TracerInputs {
        b: flow.b.clone(),
        kappa: state.kappa.clone(),
    };

    let mut set = DiagnosticSet::new();
    set.insert(
        "richardson",
        Arc::new(richardson_number(grid.clone(), shear.clone(), RichardsonParams::default())?),
    )?;
    set.insert(
        "rossby",
        Arc::new(rossby_number(
            grid.clone(),
            vorticity,
            RossbyParams {
                coriolis: Some(coriolis),
                ..Default::default()
            },
        )?),
    )?;
    set.insert(
        "thermal_wind_pv",
        Arc::new(thermal_wind_potential_vorticity(
            grid.clone(),
            shear,
            ThermalWindParams {
                coriolis: Some(coriolis),
                ..Default::default()
            },
        )?),
    )?;
    set.insert(
        "ertel_pv",
        Arc::new(ertel_potential_vorticity(
            grid.clone(),
            flow.clone(),
            ErtelParams::new(coriolis),
        )?),
    )?;
    set.insert(
        "ertel_pv_z",
        Arc::new(directional_ertel_potential_vorticity(
            grid.clone(),
            flow.clone(),
            DirectionalErtelParams::new(ErtelParams::new(coriolis), [0.0, 0.0, 1.0]),
        )?),
    )?;
    set.insert(
        "chi_isotropic",
        Arc::new(isotropic_tracer_variance_dissipation_rate(
            grid.clone(),
            tracer,
            IsotropicParams::default(),
        )?),
    )?;
    set.insert(
        "chi_anisotropic",
        Arc::new(anisotropic_tracer_variance_dissipation_rate(
            grid.clone(),
            flow.b.clone(),
            AnisotropicParams {
                kappa: [1e-2, 1e-2, 1e-5],
                ..Default::default()
            },
        )?),
    )?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_core::Idx3;

    #[test]
    fn reference_diagnostics_builds_all_seven() {
        let state = reference_state(4, 0);
        let set = reference_diagnostics(&state).unwrap();
        assert_eq!(set.len(), 7);
        let values = set.evaluate(Idx3::new(1, 1, 1));
        assert!(values.iter().all(|v| v.is_finite()));
    }
}

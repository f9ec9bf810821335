//! Tracer variance dissipation rates.
//!
//! Both forms sum the three squared tracer gradients, each brought back to
//! cell centers by [`interp_squared_diff`], and scale them by a diffusivity.

use std::sync::Arc;

use eddy_core::{Axis, DiagnosticError, Field, Grid, Idx3, Loc3, TermLocations};
use eddy_ops::{interp_squared_diff, sample, Diff, Interp, PointFn, Sample, Squared};
use smallvec::smallvec;

use crate::config::{AnisotropicParams, IsotropicParams};
use crate::kernel_field::{require_field_at, require_location, KernelField};

type SquaredGradient<'a> = Interp<Squared<Diff<Sample<'a>>>>;

/// `ℑa (∂a b)²` along each axis.
struct SquaredGradients<'a> {
    x: SquaredGradient<'a>,
    y: SquaredGradient<'a>,
    z: SquaredGradient<'a>,
}

impl<'a> SquaredGradients<'a> {
    fn new(b: &'a dyn Field) -> Self {
        let b = sample(b);
        Self {
            x: interp_squared_diff(Axis::X, b),
            y: interp_squared_diff(Axis::Y, b),
            z: interp_squared_diff(Axis::Z, b),
        }
    }

    fn locations(&self) -> TermLocations {
        smallvec![
            ("dbdx_sq", self.x.location()),
            ("dbdy_sq", self.y.location()),
            ("dbdz_sq", self.z.location()),
        ]
    }

    fn at(&self, grid: &dyn Grid, idx: Idx3) -> [f64; 3] {
        [
            self.x.at(grid, idx),
            self.y.at(grid, idx),
            self.z.at(grid, idx),
        ]
    }
}

/// Tracer and its diffusivity field.
#[derive(Clone)]
pub struct TracerInputs {
    /// Tracer at `(C, C, C)`.
    pub b: Arc<dyn Field>,
    /// Diffusivity at `(C, C, C)`, sampled at the evaluation index.
    pub kappa: Arc<dyn Field>,
}

/// Lazy isotropic dissipation rate field.
pub type IsotropicDissipationRate = KernelField<TracerInputs, ()>;

/// Isotropic tracer variance dissipation rate at `(C, C, C)`:
/// `2 κ (ℑx (∂x b)² + ℑy (∂y b)² + ℑz (∂z b)²)`.
///
/// # Errors
///
/// - [`DiagnosticError::UnsupportedLocation`] unless `params.location` is
///   `(C, C, C)`.
/// - [`DiagnosticError::StencilMismatch`] if `b` is not at `(C, C, C)`.
/// - [`DiagnosticError::LocationMismatch`] if `kappa` is not at `(C, C, C)`.
pub fn isotropic_tracer_variance_dissipation_rate(
    grid: Arc<dyn Grid>,
    inputs: TracerInputs,
    params: IsotropicParams,
) -> Result<IsotropicDissipationRate, DiagnosticError> {
    const NAME: &str = "isotropic_tracer_variance_dissipation_rate";
    require_location(NAME, params.location, Loc3::CCC)?;
    require_field_at(&*inputs.kappa, Loc3::CCC)?;
    let terms = SquaredGradients::new(&*inputs.b).locations();
    KernelField::new(NAME, Loc3::CCC, &terms, isotropic_kernel, inputs, (), grid)
}

fn isotropic_kernel(grid: &dyn Grid, idx: Idx3, inputs: &TracerInputs, _: &()) -> f64 {
    let [x, y, z] = SquaredGradients::new(&*inputs.b).at(grid, idx);
    2.0 * inputs.kappa.value(idx) * (x + y + z)
}

/// Lazy anisotropic dissipation rate field.
pub type AnisotropicDissipationRate = KernelField<Arc<dyn Field>, AnisotropicParams>;

/// Anisotropic tracer variance dissipation rate at `(C, C, C)`:
/// `2 (κx ℑx (∂x b)² + κy ℑy (∂y b)² + κz ℑz (∂z b)²)`.
///
/// # Errors
///
/// - [`DiagnosticError::InvalidParameter`] for negative or non-finite
///   diffusivities.
/// - [`DiagnosticError::UnsupportedLocation`] unless `params.location` is
///   `(C, C, C)`.
/// - [`DiagnosticError::StencilMismatch`] if `b` is not at `(C, C, C)`.
pub fn anisotropic_tracer_variance_dissipation_rate(
    grid: Arc<dyn Grid>,
    b: Arc<dyn Field>,
    params: AnisotropicParams,
) -> Result<AnisotropicDissipationRate, DiagnosticError> {
    const NAME: &str = "anisotropic_tracer_variance_dissipation_rate";
    params.validate()?;
    require_location(NAME, params.location, Loc3::CCC)?;
    let terms = SquaredGradients::new(&*b).locations();
    KernelField::new(NAME, Loc3::CCC, &terms, anisotropic_kernel, b, params, grid)
}

fn anisotropic_kernel(grid: &dyn Grid, idx: Idx3, b: &Arc<dyn Field>, p: &AnisotropicParams) -> f64 {
    let [x, y, z] = SquaredGradients::new(&**b).at(grid, idx);
    let [kx, ky, kz] = p.kappa;
    2.0 * (kx * x + ky * y + kz * z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_grid::RectilinearGrid;
    use eddy_test_utils::{constant, index_ramp, shared, uniform_grid};

    #[test]
    fn isotropic_scales_by_local_kappa() {
        let grid: Arc<dyn Grid> = Arc::new(uniform_grid(4));
        let b = shared(index_ramp(&*grid, Loc3::CCC, [1.0, 0.0, 0.0], 0.0));
        let kappa = shared(index_ramp(&*grid, Loc3::CCC, [0.0, 0.0, 1.0], 1.0));
        let chi = isotropic_tracer_variance_dissipation_rate(
            grid,
            TracerInputs { b, kappa },
            IsotropicParams::default(),
        )
        .unwrap();
        for k in 0..4 {
            assert_eq!(chi.at(Idx3::new(1, 1, k)), 2.0 * (k as f64 + 1.0));
        }
    }

    #[test]
    fn isotropic_rejects_face_kappa() {
        let grid: Arc<dyn Grid> = Arc::new(uniform_grid(3));
        let inputs = TracerInputs {
            b: shared(constant(Loc3::CCC, 1.0)),
            kappa: shared(constant(Loc3::FCC, 1.0)),
        };
        let err =
            isotropic_tracer_variance_dissipation_rate(grid, inputs, IsotropicParams::default())
                .unwrap_err();
        assert_eq!(
            err,
            DiagnosticError::LocationMismatch {
                field: "constant".to_string(),
                expected: Loc3::CCC,
                found: Loc3::FCC,
            }
        );
    }

    #[test]
    fn anisotropic_uses_grid_spacing() {
        // b = x + y + z in physical units on a grid with unequal spacing.
        let spacing = [0.5, 2.0, 0.25];
        let grid: Arc<dyn Grid> = Arc::new(RectilinearGrid::uniform([4, 4, 4], spacing).unwrap());
        let b = shared(index_ramp(&*grid, Loc3::CCC, spacing, 0.0));
        let params = AnisotropicParams {
            kappa: [1.0, 0.0, 0.5],
            ..Default::default()
        };
        let chi = anisotropic_tracer_variance_dissipation_rate(grid.clone(), b, params).unwrap();
        for idx in grid.extent().iter() {
            assert!((chi.at(idx) - 3.0).abs() < 1e-12, "at {idx}");
        }
    }

    #[test]
    fn anisotropic_rejects_wrong_location_request() {
        let grid: Arc<dyn Grid> = Arc::new(uniform_grid(3));
        let params = AnisotropicParams {
            location: Loc3::FFF,
            kappa: [1.0; 3],
        };
        assert_eq!(
            anisotropic_tracer_variance_dissipation_rate(grid, shared(constant(Loc3::CCC, 0.0)), params)
                .unwrap_err(),
            DiagnosticError::UnsupportedLocation {
                diagnostic: "anisotropic_tracer_variance_dissipation_rate",
                requested: Loc3::FFF,
                supported: Loc3::CCC,
            }
        );
    }
}

//! Parameter records for the diagnostic constructors.
//!
//! Each record is a plain struct with public fields and a `validate()`
//! check run by its constructor before any field is touched. Every record
//! carries the requested target `location`, defaulting to the diagnostic's
//! native one.

use eddy_core::{DiagnosticError, Loc3};

use crate::background::Backgrounds;
use crate::coriolis::{Coriolis, RotationRate};

fn finite(diagnostic: &'static str, name: &str, value: f64) -> Result<(), DiagnosticError> {
    if !value.is_finite() {
        return Err(DiagnosticError::InvalidParameter {
            diagnostic,
            reason: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(())
}

/// Resolve a scalar Coriolis parameter: explicit `f` first, then an
/// f-plane rotation model.
pub(crate) fn resolve_scalar_f(
    diagnostic: &'static str,
    f: Option<f64>,
    coriolis: Option<Coriolis>,
) -> Result<f64, DiagnosticError> {
    let value = match (f, coriolis) {
        (Some(f), _) => f,
        (None, Some(c)) => c.scalar().ok_or(DiagnosticError::UnsupportedRotation {
            diagnostic,
            model: c.name(),
        })?,
        (None, None) => {
            return Err(DiagnosticError::InvalidParameter {
                diagnostic,
                reason: "either an explicit f or a Coriolis model is required".to_string(),
            })
        }
    };
    finite(diagnostic, "f", value)?;
    Ok(value)
}

// ── Richardson ─────────────────────────────────────────────────────

/// Result of the Richardson number where the shear vanishes exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZeroShear {
    /// Report `0.0`.
    #[default]
    Zero,
    /// Report the IEEE quotient `N² / 0`: `NaN` where `N²` is also zero,
    /// `±inf` otherwise.
    Quotient,
    /// Report `NaN`.
    Nan,
}

/// Parameters of [`richardson_number`](crate::richardson_number).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RichardsonParams {
    /// Requested target location. Default: `(C, C, F)`.
    pub location: Loc3,
    /// Background stratification `N²`, added to `∂z b`. Default: 0.
    pub n2_bg: f64,
    /// Background shear `dU/dz`, added to `∂z u` before squaring. Default: 0.
    pub dudz_bg: f64,
    /// Background shear `dV/dz`, added to `∂z v` before squaring. Default: 0.
    pub dvdz_bg: f64,
    /// Result where the shear is exactly zero. Default: [`ZeroShear::Zero`].
    pub zero_shear: ZeroShear,
}

impl Default for RichardsonParams {
    fn default() -> Self {
        Self {
            location: Loc3::CCF,
            n2_bg: 0.0,
            dudz_bg: 0.0,
            dvdz_bg: 0.0,
            zero_shear: ZeroShear::Zero,
        }
    }
}

impl RichardsonParams {
    /// Check that every background term is finite.
    pub fn validate(&self) -> Result<(), DiagnosticError> {
        finite("richardson_number", "n2_bg", self.n2_bg)?;
        finite("richardson_number", "dudz_bg", self.dudz_bg)?;
        finite("richardson_number", "dvdz_bg", self.dvdz_bg)
    }
}

// ── Rossby ─────────────────────────────────────────────────────────

/// Parameters of [`rossby_number`](crate::rossby_number).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RossbyParams {
    /// Requested target location. Default: `(F, F, C)`.
    pub location: Loc3,
    /// Explicit Coriolis parameter; takes precedence over `coriolis`.
    pub f: Option<f64>,
    /// Rotation model supplying `f` when no explicit value is given.
    /// Only [`Coriolis::FPlane`] is usable.
    pub coriolis: Option<Coriolis>,
    /// Background `dV/dx`. Default: 0.
    pub dvdx_bg: f64,
    /// Background `dU/dy`. Default: 0.
    pub dudy_bg: f64,
}

impl Default for RossbyParams {
    fn default() -> Self {
        Self {
            location: Loc3::FFC,
            f: None,
            coriolis: None,
            dvdx_bg: 0.0,
            dudy_bg: 0.0,
        }
    }
}

impl RossbyParams {
    /// Check the background terms and that a non-zero finite `f` resolves.
    pub fn validate(&self) -> Result<(), DiagnosticError> {
        finite("rossby_number", "dvdx_bg", self.dvdx_bg)?;
        finite("rossby_number", "dudy_bg", self.dudy_bg)?;
        let f = resolve_scalar_f("rossby_number", self.f, self.coriolis)?;
        if f == 0.0 {
            return Err(DiagnosticError::InvalidParameter {
                diagnostic: "rossby_number",
                reason: "f must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

// ── Thermal-wind PV ────────────────────────────────────────────────

/// Parameters of
/// [`thermal_wind_potential_vorticity`](crate::thermal_wind_potential_vorticity).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalWindParams {
    /// Requested target location. Default: `(F, F, F)`.
    pub location: Loc3,
    /// Explicit Coriolis parameter; takes precedence over `coriolis`.
    pub f: Option<f64>,
    /// Rotation model supplying `f`. Only [`Coriolis::FPlane`] is usable.
    pub coriolis: Option<Coriolis>,
}

impl Default for ThermalWindParams {
    fn default() -> Self {
        Self {
            location: Loc3::FFF,
            f: None,
            coriolis: None,
        }
    }
}

impl ThermalWindParams {
    /// Check that a finite `f` resolves.
    pub fn validate(&self) -> Result<(), DiagnosticError> {
        resolve_scalar_f("thermal_wind_potential_vorticity", self.f, self.coriolis).map(|_| ())
    }
}

// ── Ertel PV ───────────────────────────────────────────────────────

/// Parameters of [`ertel_potential_vorticity`](crate::ertel_potential_vorticity).
///
/// There is no default rotation: the caller always names one.
#[derive(Clone, Debug)]
pub struct ErtelParams {
    /// Requested target location. Default: `(F, F, F)`.
    pub location: Loc3,
    /// Rotation model. `FPlane` or `ConstantCartesian`.
    pub coriolis: Coriolis,
    /// Optional background fields added to the state fields.
    pub backgrounds: Backgrounds,
}

impl ErtelParams {
    /// Native location, the given rotation and no backgrounds.
    pub fn new(coriolis: Coriolis) -> Self {
        Self {
            location: Loc3::FFF,
            coriolis,
            backgrounds: Backgrounds::none(),
        }
    }

    /// Replace the background fields.
    pub fn with_backgrounds(mut self, backgrounds: Backgrounds) -> Self {
        self.backgrounds = backgrounds;
        self
    }

    /// Check the rotation model and its components.
    pub fn validate(&self) -> Result<(), DiagnosticError> {
        resolve_rotation("ertel_potential_vorticity", self.coriolis).map(|_| ())
    }
}

/// Resolve three rotation components, rejecting models without them.
pub(crate) fn resolve_rotation(
    diagnostic: &'static str,
    coriolis: Coriolis,
) -> Result<RotationRate, DiagnosticError> {
    let rate = coriolis
        .rotation_rate()
        .ok_or(DiagnosticError::UnsupportedRotation {
            diagnostic,
            model: coriolis.name(),
        })?;
    finite(diagnostic, "fx", rate.fx)?;
    finite(diagnostic, "fy", rate.fy)?;
    finite(diagnostic, "fz", rate.fz)?;
    Ok(rate)
}

/// Parameters of
/// [`directional_ertel_potential_vorticity`](crate::directional_ertel_potential_vorticity).
#[derive(Clone, Debug)]
pub struct DirectionalErtelParams {
    /// Rotation, backgrounds and target location, as for Ertel PV.
    pub ertel: ErtelParams,
    /// Projection direction; normalized at construction.
    pub direction: [f64; 3],
}

impl DirectionalErtelParams {
    /// Project Ertel PV with `ertel` onto `direction`.
    pub fn new(ertel: ErtelParams, direction: [f64; 3]) -> Self {
        Self { ertel, direction }
    }

    /// Check the Ertel parameters and that the direction is usable.
    pub fn validate(&self) -> Result<(), DiagnosticError> {
        resolve_rotation("directional_ertel_potential_vorticity", self.ertel.coriolis)?;
        unit_direction(self.direction).map(|_| ())
    }
}

/// Normalize `direction`, rejecting non-finite or zero vectors.
pub(crate) fn unit_direction(direction: [f64; 3]) -> Result<[f64; 3], DiagnosticError> {
    const DIAGNOSTIC: &str = "directional_ertel_potential_vorticity";
    let [dx, dy, dz] = direction;
    finite(DIAGNOSTIC, "direction.x", dx)?;
    finite(DIAGNOSTIC, "direction.y", dy)?;
    finite(DIAGNOSTIC, "direction.z", dz)?;
    let norm = (dx * dx + dy * dy + dz * dz).sqrt();
    if norm == 0.0 {
        return Err(DiagnosticError::InvalidParameter {
            diagnostic: DIAGNOSTIC,
            reason: "direction must be non-zero".to_string(),
        });
    }
    Ok([dx / norm, dy / norm, dz / norm])
}

// ── Tracer variance dissipation ────────────────────────────────────

/// Parameters of
/// [`isotropic_tracer_variance_dissipation_rate`](crate::isotropic_tracer_variance_dissipation_rate).
///
/// The diffusivity is a field, passed with the inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsotropicParams {
    /// Requested target location. Default: `(C, C, C)`.
    pub location: Loc3,
}

impl Default for IsotropicParams {
    fn default() -> Self {
        Self {
            location: Loc3::CCC,
        }
    }
}

/// Parameters of
/// [`anisotropic_tracer_variance_dissipation_rate`](crate::anisotropic_tracer_variance_dissipation_rate).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnisotropicParams {
    /// Requested target location. Default: `(C, C, C)`.
    pub location: Loc3,
    /// Per-axis diffusivities `[κx, κy, κz]`. Default: all zero.
    pub kappa: [f64; 3],
}

impl Default for AnisotropicParams {
    fn default() -> Self {
        Self {
            location: Loc3::CCC,
            kappa: [0.0; 3],
        }
    }
}

impl AnisotropicParams {
    /// Check that every diffusivity is finite and non-negative.
    pub fn validate(&self) -> Result<(), DiagnosticError> {
        for (axis, kappa) in ["x", "y", "z"].iter().zip(self.kappa) {
            if !kappa.is_finite() || kappa < 0.0 {
                return Err(DiagnosticError::InvalidParameter {
                    diagnostic: "anisotropic_tracer_variance_dissipation_rate",
                    reason: format!("kappa_{axis} must be finite and non-negative, got {kappa}"),
                });
            }
        }
        Ok(())
    }
}

// ── ComputeConfig ──────────────────────────────────────────────────

/// Worker pool settings for
/// [`compute_interior_parallel`](crate::compute_interior_parallel).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComputeConfig {
    /// Number of worker threads. `None` = auto-detect
    /// (`available_parallelism / 2`, clamped to `[1, 16]`).
    pub workers: Option<usize>,
}

impl ComputeConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_workers(&self) -> usize {
        match self.workers {
            Some(n) => n.clamp(1, 64),
            None => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(2);
                (cpus / 2).clamp(1, 16)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_native_locations() {
        assert_eq!(RichardsonParams::default().location, Loc3::CCF);
        assert_eq!(RossbyParams::default().location, Loc3::FFC);
        assert_eq!(ThermalWindParams::default().location, Loc3::FFF);
        assert_eq!(ErtelParams::new(Coriolis::FPlane { f: 1.0 }).location, Loc3::FFF);
        assert_eq!(IsotropicParams::default().location, Loc3::CCC);
        assert_eq!(AnisotropicParams::default().location, Loc3::CCC);
        assert_eq!(RichardsonParams::default().zero_shear, ZeroShear::Zero);
    }

    #[test]
    fn richardson_rejects_nan_background() {
        let p = RichardsonParams {
            n2_bg: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(DiagnosticError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn explicit_f_wins_over_model() {
        let f = resolve_scalar_f(
            "d",
            Some(2.0),
            Some(Coriolis::BetaPlane { f0: 1.0, beta: 0.1 }),
        );
        assert_eq!(f, Ok(2.0));
        let f = resolve_scalar_f("d", None, Some(Coriolis::FPlane { f: 3.0 }));
        assert_eq!(f, Ok(3.0));
    }

    #[test]
    fn scalar_f_requires_some_source() {
        assert!(matches!(
            resolve_scalar_f("d", None, None),
            Err(DiagnosticError::InvalidParameter { .. })
        ));
        assert_eq!(
            resolve_scalar_f(
                "d",
                None,
                Some(Coriolis::ConstantCartesian {
                    fx: 0.0,
                    fy: 0.0,
                    fz: 1.0
                })
            ),
            Err(DiagnosticError::UnsupportedRotation {
                diagnostic: "d",
                model: "ConstantCartesian",
            })
        );
    }

    #[test]
    fn rossby_rejects_zero_f() {
        let p = RossbyParams {
            f: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(DiagnosticError::InvalidParameter { .. })
        ));
        let p = RossbyParams {
            f: Some(1e-4),
            ..Default::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn ertel_rejects_beta_plane() {
        let p = ErtelParams::new(Coriolis::BetaPlane { f0: 1e-4, beta: 1e-11 });
        assert_eq!(
            p.validate(),
            Err(DiagnosticError::UnsupportedRotation {
                diagnostic: "ertel_potential_vorticity",
                model: "BetaPlane",
            })
        );
    }

    #[test]
    fn direction_is_normalized() {
        assert_eq!(unit_direction([0.0, 0.0, 2.0]), Ok([0.0, 0.0, 1.0]));
        let [x, y, _] = unit_direction([3.0, 4.0, 0.0]).unwrap();
        assert!((x - 0.6).abs() < 1e-15 && (y - 0.8).abs() < 1e-15);
        assert!(unit_direction([0.0; 3]).is_err());
        assert!(unit_direction([f64::INFINITY, 0.0, 0.0]).is_err());
    }

    #[test]
    fn anisotropic_rejects_negative_kappa() {
        let p = AnisotropicParams {
            kappa: [1.0, -1.0, 0.0],
            ..Default::default()
        };
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("kappa_y"));
    }

    #[test]
    fn worker_count_clamps() {
        assert_eq!(ComputeConfig { workers: Some(0) }.resolved_workers(), 1);
        assert_eq!(ComputeConfig { workers: Some(1000) }.resolved_workers(), 64);
        assert_eq!(ComputeConfig { workers: Some(3) }.resolved_workers(), 3);
        let auto = ComputeConfig::default().resolved_workers();
        assert!((1..=16).contains(&auto));
    }
}

//! Flow diagnostics: Richardson number, Rossby number and potential
//! vorticity in thermal-wind and Ertel form.
//!
//! Velocity components and buoyancy sit on the usual C-grid:
//! `u` at `(F, C, C)`, `v` at `(C, F, C)`, `w` at `(C, C, F)` and `b` at
//! `(C, C, C)`. Each constructor builds the stencil compositions of its
//! kernel once to check where every term lands, then wraps the kernel in a
//! lazy [`KernelField`].

#[cfg(debug_assertions)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use eddy_core::{DiagnosticError, Field, Grid, Idx3, Loc3, TermLocations};
use eddy_ops::{
    diff_x, diff_y, diff_z, interp_x, interp_xy, interp_xz, interp_y, interp_yz, interp_z, sample,
    Diff, Interp, PointFn, Sample,
};
use smallvec::smallvec;

use crate::background::with_background;
use crate::config::{
    resolve_rotation, resolve_scalar_f, unit_direction, DirectionalErtelParams, ErtelParams,
    RichardsonParams, RossbyParams, ThermalWindParams, ZeroShear,
};
use crate::coriolis::RotationRate;
use crate::kernel_field::{require_field_at, require_location, KernelField};

// ── Inputs ─────────────────────────────────────────────────────────

/// Full prognostic state: three velocity components and buoyancy.
#[derive(Clone)]
pub struct FlowFields {
    /// x-velocity at `(F, C, C)`.
    pub u: Arc<dyn Field>,
    /// y-velocity at `(C, F, C)`.
    pub v: Arc<dyn Field>,
    /// z-velocity at `(C, C, F)`.
    pub w: Arc<dyn Field>,
    /// Buoyancy at `(C, C, C)`.
    pub b: Arc<dyn Field>,
}

/// Horizontal velocity and buoyancy.
#[derive(Clone)]
pub struct ShearInputs {
    /// x-velocity at `(F, C, C)`.
    pub u: Arc<dyn Field>,
    /// y-velocity at `(C, F, C)`.
    pub v: Arc<dyn Field>,
    /// Buoyancy at `(C, C, C)`.
    pub b: Arc<dyn Field>,
}

/// Horizontal velocity.
#[derive(Clone)]
pub struct VorticityInputs {
    /// x-velocity at `(F, C, C)`.
    pub u: Arc<dyn Field>,
    /// y-velocity at `(C, F, C)`.
    pub v: Arc<dyn Field>,
}

/// A derivative brought onto `(F, F, F)` by one interpolation.
type Curl<'a> = Interp<Diff<Sample<'a>>>;
/// A buoyancy derivative brought onto `(F, F, F)` by two interpolations.
type Grad<'a> = Interp<Interp<Diff<Sample<'a>>>>;

// ── Richardson number ──────────────────────────────────────────────

/// Lazy Richardson number field.
pub type RichardsonNumber = KernelField<ShearInputs, RichardsonParams>;

/// Gradient Richardson number
/// `(∂z b + N²) / ((∂z u + dU/dz)² + (∂z v + dV/dz)²)` at `(C, C, F)`.
///
/// The three derivatives are taken at the same index with no
/// interpolation: `∂z b` lands on `(C, C, F)` but `∂z u` and `∂z v` land on
/// `(F, C, F)` and `(C, F, F)`. Callers that need co-located terms should
/// interpolate their velocities first. Debug builds log the mix once per
/// process.
///
/// # Errors
///
/// - [`DiagnosticError::InvalidParameter`] for non-finite backgrounds.
/// - [`DiagnosticError::UnsupportedLocation`] unless `params.location` is
///   `(C, C, F)`.
/// - [`DiagnosticError::LocationMismatch`] if `u` or `v` is off its C-grid
///   location, [`DiagnosticError::StencilMismatch`] if `b` is.
pub fn richardson_number(
    grid: Arc<dyn Grid>,
    inputs: ShearInputs,
    params: RichardsonParams,
) -> Result<RichardsonNumber, DiagnosticError> {
    const NAME: &str = "richardson_number";
    params.validate()?;
    require_location(NAME, params.location, Loc3::CCF)?;
    require_field_at(&*inputs.u, Loc3::FCC)?;
    require_field_at(&*inputs.v, Loc3::CFC)?;
    let terms: TermLocations = smallvec![("dbdz", diff_z(sample(&*inputs.b)).location())];

    #[cfg(debug_assertions)]
    log_richardson_location_mix(&inputs);

    KernelField::new(
        NAME,
        Loc3::CCF,
        &terms,
        richardson_kernel,
        inputs,
        params,
        grid,
    )
}

#[cfg(debug_assertions)]
static RICHARDSON_MIX_LOGGED: AtomicBool = AtomicBool::new(false);

/// Prints the Richardson term locations on the first call in the process.
/// Returns whether this call printed.
#[cfg(debug_assertions)]
fn log_richardson_location_mix(inputs: &ShearInputs) -> bool {
    if RICHARDSON_MIX_LOGGED.swap(true, Ordering::Relaxed) {
        return false;
    }
    let dudz = diff_z(sample(&*inputs.u)).location();
    let dvdz = diff_z(sample(&*inputs.v)).location();
    eprintln!(
        "eddy: richardson_number combines dbdz at {} with dudz at {dudz} and dvdz at {dvdz} without interpolation",
        Loc3::CCF
    );
    true
}

fn richardson_kernel(
    grid: &dyn Grid,
    idx: Idx3,
    inputs: &ShearInputs,
    params: &RichardsonParams,
) -> f64 {
    let n2 = diff_z(sample(&*inputs.b)).at(grid, idx) + params.n2_bg;
    let dudz = diff_z(sample(&*inputs.u)).at(grid, idx) + params.dudz_bg;
    let dvdz = diff_z(sample(&*inputs.v)).at(grid, idx) + params.dvdz_bg;
    let shear2 = dudz * dudz + dvdz * dvdz;
    if shear2 == 0.0 {
        return match params.zero_shear {
            ZeroShear::Zero => 0.0,
            ZeroShear::Quotient => n2 / shear2,
            ZeroShear::Nan => f64::NAN,
        };
    }
    n2 / shear2
}

// ── Rossby number ──────────────────────────────────────────────────

/// Resolved constants of the Rossby number kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RossbyConstants {
    /// Coriolis parameter (non-zero).
    pub f: f64,
    /// Background `dV/dx`.
    pub dvdx_bg: f64,
    /// Background `dU/dy`.
    pub dudy_bg: f64,
}

/// Lazy Rossby number field.
pub type RossbyNumber = KernelField<VorticityInputs, RossbyConstants>;

/// Rossby number `(∂x v + dV/dx − ∂y u − dU/dy) / f` at `(F, F, C)`.
///
/// `f` is `params.f` when given, otherwise the scalar of an f-plane
/// `params.coriolis`.
///
/// # Errors
///
/// - [`DiagnosticError::InvalidParameter`] if no `f` is available, or it is
///   zero or non-finite.
/// - [`DiagnosticError::UnsupportedRotation`] for a rotation model without
///   a scalar `f`.
/// - [`DiagnosticError::UnsupportedLocation`] unless `params.location` is
///   `(F, F, C)`.
/// - [`DiagnosticError::StencilMismatch`] if `u` or `v` is off its C-grid
///   location.
pub fn rossby_number(
    grid: Arc<dyn Grid>,
    inputs: VorticityInputs,
    params: RossbyParams,
) -> Result<RossbyNumber, DiagnosticError> {
    const NAME: &str = "rossby_number";
    params.validate()?;
    require_location(NAME, params.location, Loc3::FFC)?;
    let f = resolve_scalar_f(NAME, params.f, params.coriolis)?;
    let terms: TermLocations = smallvec![
        ("dvdx", diff_x(sample(&*inputs.v)).location()),
        ("dudy", diff_y(sample(&*inputs.u)).location()),
    ];
    let constants = RossbyConstants {
        f,
        dvdx_bg: params.dvdx_bg,
        dudy_bg: params.dudy_bg,
    };
    KernelField::new(
        NAME,
        Loc3::FFC,
        &terms,
        rossby_kernel,
        inputs,
        constants,
        grid,
    )
}

fn rossby_kernel(grid: &dyn Grid, idx: Idx3, inputs: &VorticityInputs, c: &RossbyConstants) -> f64 {
    let dvdx = diff_x(sample(&*inputs.v)).at(grid, idx);
    let dudy = diff_y(sample(&*inputs.u)).at(grid, idx);
    (dvdx + c.dvdx_bg - dudy - c.dudy_bg) / c.f
}

// ── Thermal-wind PV ────────────────────────────────────────────────

struct ThermalWindTerms<'a> {
    dvdx: Curl<'a>,
    dudy: Curl<'a>,
    dbdz: Grad<'a>,
    dudz: Curl<'a>,
    dvdz: Curl<'a>,
}

impl<'a> ThermalWindTerms<'a> {
    fn new(inputs: &'a ShearInputs) -> Self {
        let (u, v, b) = (sample(&*inputs.u), sample(&*inputs.v), sample(&*inputs.b));
        Self {
            dvdx: interp_z(diff_x(v)),
            dudy: interp_z(diff_y(u)),
            dbdz: interp_xy(diff_z(b)),
            dudz: interp_y(diff_z(u)),
            dvdz: interp_x(diff_z(v)),
        }
    }

    fn locations(&self) -> TermLocations {
        smallvec![
            ("dvdx", self.dvdx.location()),
            ("dudy", self.dudy.location()),
            ("dbdz", self.dbdz.location()),
            ("dudz", self.dudz.location()),
            ("dvdz", self.dvdz.location()),
        ]
    }
}

/// Lazy thermal-wind potential vorticity field; the parameter is `f`.
pub type ThermalWindPotentialVorticity = KernelField<ShearInputs, f64>;

/// Thermal-wind potential vorticity at `(F, F, F)`:
/// `(f + ℑz ∂x v − ℑz ∂y u) · ℑxy ∂z b − f · ((ℑy ∂z u)² + (ℑx ∂z v)²)`.
///
/// # Errors
///
/// - [`DiagnosticError::InvalidParameter`] if no finite `f` is available.
/// - [`DiagnosticError::UnsupportedRotation`] for a rotation model without
///   a scalar `f`.
/// - [`DiagnosticError::UnsupportedLocation`] unless `params.location` is
///   `(F, F, F)`.
/// - [`DiagnosticError::StencilMismatch`] if an input is off its C-grid
///   location.
pub fn thermal_wind_potential_vorticity(
    grid: Arc<dyn Grid>,
    inputs: ShearInputs,
    params: ThermalWindParams,
) -> Result<ThermalWindPotentialVorticity, DiagnosticError> {
    const NAME: &str = "thermal_wind_potential_vorticity";
    params.validate()?;
    require_location(NAME, params.location, Loc3::FFF)?;
    let f = resolve_scalar_f(NAME, params.f, params.coriolis)?;
    let terms = ThermalWindTerms::new(&inputs).locations();
    KernelField::new(
        NAME,
        Loc3::FFF,
        &terms,
        thermal_wind_kernel,
        inputs,
        f,
        grid,
    )
}

fn thermal_wind_kernel(grid: &dyn Grid, idx: Idx3, inputs: &ShearInputs, f: &f64) -> f64 {
    let t = ThermalWindTerms::new(inputs);
    let dudz = t.dudz.at(grid, idx);
    let dvdz = t.dvdz.at(grid, idx);
    let barotropic = (f + t.dvdx.at(grid, idx) - t.dudy.at(grid, idx)) * t.dbdz.at(grid, idx);
    let baroclinic = -f * (dudz * dudz + dvdz * dvdz);
    barotropic + baroclinic
}

// ── Ertel PV ───────────────────────────────────────────────────────

/// The nine `(F, F, F)` terms of Ertel potential vorticity.
struct ErtelTerms<'a> {
    dwdy: Curl<'a>,
    dvdz: Curl<'a>,
    dbdx: Grad<'a>,
    dudz: Curl<'a>,
    dwdx: Curl<'a>,
    dbdy: Grad<'a>,
    dvdx: Curl<'a>,
    dudy: Curl<'a>,
    dbdz: Grad<'a>,
}

impl<'a> ErtelTerms<'a> {
    fn new(fields: &'a FlowFields) -> Self {
        let u = sample(&*fields.u);
        let v = sample(&*fields.v);
        let w = sample(&*fields.w);
        let b = sample(&*fields.b);
        Self {
            dwdy: interp_x(diff_y(w)),
            dvdz: interp_x(diff_z(v)),
            dbdx: interp_yz(diff_x(b)),
            dudz: interp_y(diff_z(u)),
            dwdx: interp_y(diff_x(w)),
            dbdy: interp_xz(diff_y(b)),
            dvdx: interp_z(diff_x(v)),
            dudy: interp_z(diff_y(u)),
            dbdz: interp_xy(diff_z(b)),
        }
    }

    fn locations(&self) -> TermLocations {
        smallvec![
            ("dwdy", self.dwdy.location()),
            ("dvdz", self.dvdz.location()),
            ("dbdx", self.dbdx.location()),
            ("dudz", self.dudz.location()),
            ("dwdx", self.dwdx.location()),
            ("dbdy", self.dbdy.location()),
            ("dvdx", self.dvdx.location()),
            ("dudy", self.dudy.location()),
            ("dbdz", self.dbdz.location()),
        ]
    }

    /// `[pv_x, pv_y, pv_z]`.
    fn components(&self, grid: &dyn Grid, idx: Idx3, rate: &RotationRate) -> [f64; 3] {
        let pv_x = (rate.fx + self.dwdy.at(grid, idx) - self.dvdz.at(grid, idx))
            * self.dbdx.at(grid, idx);
        let pv_y = (rate.fy + self.dudz.at(grid, idx) - self.dwdx.at(grid, idx))
            * self.dbdy.at(grid, idx);
        let pv_z = (rate.fz + self.dvdx.at(grid, idx) - self.dudy.at(grid, idx))
            * self.dbdz.at(grid, idx);
        [pv_x, pv_y, pv_z]
    }
}

/// Add the backgrounds and resolve the rotation shared by both Ertel forms.
fn prepare_ertel(
    diagnostic: &'static str,
    inputs: FlowFields,
    params: &ErtelParams,
) -> Result<(FlowFields, RotationRate, TermLocations), DiagnosticError> {
    require_location(diagnostic, params.location, Loc3::FFF)?;
    let rate = resolve_rotation(diagnostic, params.coriolis)?;
    let bg = &params.backgrounds;
    let fields = FlowFields {
        u: with_background(&inputs.u, bg.u.as_ref())?,
        v: with_background(&inputs.v, bg.v.as_ref())?,
        w: with_background(&inputs.w, bg.w.as_ref())?,
        b: with_background(&inputs.b, bg.b.as_ref())?,
    };
    let terms = ErtelTerms::new(&fields).locations();
    Ok((fields, rate, terms))
}

/// Lazy Ertel potential vorticity field.
pub type ErtelPotentialVorticity = KernelField<FlowFields, RotationRate>;

/// Ertel potential vorticity `pv_x + pv_y + pv_z` at `(F, F, F)`, with
///
/// - `pv_x = (fx + ℑx ∂y w − ℑx ∂z v) · ℑyz ∂x b`
/// - `pv_y = (fy + ℑy ∂z u − ℑy ∂x w) · ℑxz ∂y b`
/// - `pv_z = (fz + ℑz ∂x v − ℑz ∂y u) · ℑxy ∂z b`
///
/// An f-plane rotation uses its `f` for all three components. Each state
/// field is summed with its background only when one is present.
///
/// # Errors
///
/// - [`DiagnosticError::UnsupportedRotation`] for a beta-plane.
/// - [`DiagnosticError::InvalidParameter`] for non-finite rotation.
/// - [`DiagnosticError::UnsupportedLocation`] unless `params.location` is
///   `(F, F, F)`.
/// - [`DiagnosticError::LocationMismatch`] if a background is not at its
///   state field's location.
/// - [`DiagnosticError::StencilMismatch`] if an input is off its C-grid
///   location.
pub fn ertel_potential_vorticity(
    grid: Arc<dyn Grid>,
    inputs: FlowFields,
    params: ErtelParams,
) -> Result<ErtelPotentialVorticity, DiagnosticError> {
    const NAME: &str = "ertel_potential_vorticity";
    params.validate()?;
    let (fields, rate, terms) = prepare_ertel(NAME, inputs, &params)?;
    KernelField::new(NAME, Loc3::FFF, &terms, ertel_kernel, fields, rate, grid)
}

fn ertel_kernel(grid: &dyn Grid, idx: Idx3, fields: &FlowFields, rate: &RotationRate) -> f64 {
    let [pv_x, pv_y, pv_z] = ErtelTerms::new(fields).components(grid, idx, rate);
    pv_x + pv_y + pv_z
}

/// Resolved constants of the directional Ertel kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalConstants {
    /// Rotation components.
    pub rotation: RotationRate,
    /// Unit projection direction.
    pub direction: [f64; 3],
}

/// Lazy directional Ertel potential vorticity field.
pub type DirectionalErtelPotentialVorticity = KernelField<FlowFields, DirectionalConstants>;

/// Ertel potential vorticity projected on a direction:
/// `dx·pv_x + dy·pv_y + dz·pv_z` at `(F, F, F)`, with `(dx, dy, dz)` the
/// normalized `params.direction`.
///
/// Projecting on `z` isolates the vertical contribution `pv_z`.
///
/// # Errors
///
/// As [`ertel_potential_vorticity`], plus
/// [`DiagnosticError::InvalidParameter`] for a zero or non-finite
/// direction.
pub fn directional_ertel_potential_vorticity(
    grid: Arc<dyn Grid>,
    inputs: FlowFields,
    params: DirectionalErtelParams,
) -> Result<DirectionalErtelPotentialVorticity, DiagnosticError> {
    const NAME: &str = "directional_ertel_potential_vorticity";
    params.validate()?;
    let direction = unit_direction(params.direction)?;
    let (fields, rotation, terms) = prepare_ertel(NAME, inputs, &params.ertel)?;
    let constants = DirectionalConstants {
        rotation,
        direction,
    };
    KernelField::new(
        NAME,
        Loc3::FFF,
        &terms,
        directional_ertel_kernel,
        fields,
        constants,
        grid,
    )
}

fn directional_ertel_kernel(
    grid: &dyn Grid,
    idx: Idx3,
    fields: &FlowFields,
    c: &DirectionalConstants,
) -> f64 {
    let pv = ErtelTerms::new(fields).components(grid, idx, &c.rotation);
    pv.iter().zip(c.direction).map(|(p, d)| p * d).sum()
}

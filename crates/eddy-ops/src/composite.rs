//! Named constructors for the stencil compositions kernels use.
//!
//! Multi-axis interpolations apply single-axis interpolations innermost
//! first: `interp_xy(p)` is `ℑx(ℑy(p))`. On a rectilinear grid the order
//! does not matter beyond rounding.

use crate::expr::{Diff, Interp, PointFn, Sample, Squared};
use eddy_core::{Axis, Field};

/// Leaf expression for `field`.
pub fn sample(field: &dyn Field) -> Sample<'_> {
    Sample::new(field)
}

/// `∂x p`.
pub fn diff_x<P: PointFn>(p: P) -> Diff<P> {
    Diff::new(Axis::X, p)
}

/// `∂y p`.
pub fn diff_y<P: PointFn>(p: P) -> Diff<P> {
    Diff::new(Axis::Y, p)
}

/// `∂z p`.
pub fn diff_z<P: PointFn>(p: P) -> Diff<P> {
    Diff::new(Axis::Z, p)
}

/// `ℑx p`.
pub fn interp_x<P: PointFn>(p: P) -> Interp<P> {
    Interp::new(Axis::X, p)
}

/// `ℑy p`.
pub fn interp_y<P: PointFn>(p: P) -> Interp<P> {
    Interp::new(Axis::Y, p)
}

/// `ℑz p`.
pub fn interp_z<P: PointFn>(p: P) -> Interp<P> {
    Interp::new(Axis::Z, p)
}

/// `ℑx ℑy p`.
pub fn interp_xy<P: PointFn>(p: P) -> Interp<Interp<P>> {
    interp_x(interp_y(p))
}

/// `ℑx ℑz p`.
pub fn interp_xz<P: PointFn>(p: P) -> Interp<Interp<P>> {
    interp_x(interp_z(p))
}

/// `ℑy ℑz p`.
pub fn interp_yz<P: PointFn>(p: P) -> Interp<Interp<P>> {
    interp_y(interp_z(p))
}

/// `ℑx ℑy ℑz p`.
pub fn interp_xyz<P: PointFn>(p: P) -> Interp<Interp<Interp<P>>> {
    interp_x(interp_y(interp_z(p)))
}

/// `ℑa (∂a p)²`: the squared derivative brought back to `p`'s location.
///
/// The order is derivative, then square, then interpolate. Interpolating
/// before squaring would drop the variance of the gradient across the
/// stencil.
pub fn interp_squared_diff<P: PointFn>(axis: Axis, p: P) -> Interp<Squared<Diff<P>>> {
    Interp::new(axis, Squared::new(Diff::new(axis, p)))
}

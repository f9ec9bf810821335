//! Typed, lazily evaluated stencil expressions.
//!
//! An expression tree is a handful of stack values wrapping references to
//! fields. Its [`PointFn::location`] is derived from the *actual* input
//! locations through [`eddy_core::transform`], so a kernel can check its
//! terms against its declared target once at construction and then
//! evaluate them per index without further bookkeeping.

use crate::primitive::{derivative, interpolate};
use eddy_core::{transform, Axis, Field, Grid, Idx3, Loc3, Location, OpKind};

/// A point-wise evaluable quantity with a staggered-grid location.
pub trait PointFn {
    /// Location of the values this expression produces.
    fn location(&self) -> Loc3;

    /// Value at `idx`.
    fn at(&self, grid: &dyn Grid, idx: Idx3) -> f64;
}

impl<P: PointFn + ?Sized> PointFn for &P {
    fn location(&self) -> Loc3 {
        (**self).location()
    }

    #[inline]
    fn at(&self, grid: &dyn Grid, idx: Idx3) -> f64 {
        (**self).at(grid, idx)
    }
}

/// Leaf expression reading a field.
#[derive(Clone, Copy)]
pub struct Sample<'a> {
    field: &'a dyn Field,
}

impl<'a> Sample<'a> {
    /// Wrap a field.
    pub fn new(field: &'a dyn Field) -> Self {
        Self { field }
    }
}

impl PointFn for Sample<'_> {
    fn location(&self) -> Loc3 {
        self.field.location()
    }

    #[inline]
    fn at(&self, _grid: &dyn Grid, idx: Idx3) -> f64 {
        self.field.value(idx)
    }
}

/// Derivative of `inner` along one axis.
#[derive(Clone, Copy)]
pub struct Diff<P> {
    axis: Axis,
    to: Location,
    inner: P,
}

impl<P: PointFn> Diff<P> {
    /// Differentiate `inner` along `axis`; the axis location toggles.
    pub fn new(axis: Axis, inner: P) -> Self {
        let to = inner.location().get(axis).toggled();
        Self { axis, to, inner }
    }
}

impl<P: PointFn> PointFn for Diff<P> {
    fn location(&self) -> Loc3 {
        transform(OpKind::Derivative, self.axis, self.inner.location())
    }

    #[inline]
    fn at(&self, grid: &dyn Grid, idx: Idx3) -> f64 {
        derivative(grid, self.axis, self.to, idx, |p| self.inner.at(grid, p))
    }
}

/// Two-point interpolation of `inner` along one axis.
#[derive(Clone, Copy)]
pub struct Interp<P> {
    axis: Axis,
    to: Location,
    inner: P,
}

impl<P: PointFn> Interp<P> {
    /// Interpolate `inner` along `axis`; the axis location toggles.
    pub fn new(axis: Axis, inner: P) -> Self {
        let to = inner.location().get(axis).toggled();
        Self { axis, to, inner }
    }
}

impl<P: PointFn> PointFn for Interp<P> {
    fn location(&self) -> Loc3 {
        transform(OpKind::Interpolation, self.axis, self.inner.location())
    }

    #[inline]
    fn at(&self, grid: &dyn Grid, idx: Idx3) -> f64 {
        interpolate(self.axis, self.to, idx, |p| self.inner.at(grid, p))
    }
}

/// Point-wise square of `inner`; location unchanged.
#[derive(Clone, Copy)]
pub struct Squared<P> {
    inner: P,
}

impl<P: PointFn> Squared<P> {
    /// Square `inner`.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: PointFn> PointFn for Squared<P> {
    fn location(&self) -> Loc3 {
        self.inner.location()
    }

    #[inline]
    fn at(&self, grid: &dyn Grid, idx: Idx3) -> f64 {
        let v = self.inner.at(grid, idx);
        v * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_grid::{GridField, RectilinearGrid};

    #[test]
    fn diff_location_follows_input() {
        let grid = RectilinearGrid::uniform([4, 4, 4], [1.0; 3]).unwrap();
        let w = GridField::zeros("w", &grid, Loc3::CCF);
        let dwdy = Diff::new(Axis::Y, Sample::new(&w));
        assert_eq!(dwdy.location(), Loc3::CFF);
        let dwdy_x = Interp::new(Axis::X, dwdy);
        assert_eq!(dwdy_x.location(), Loc3::FFF);
    }

    #[test]
    fn squared_keeps_location_and_squares() {
        let grid = RectilinearGrid::uniform([4, 4, 4], [1.0; 3]).unwrap();
        let b = GridField::from_fn("b", &grid, Loc3::CCC, |p| -(p.i as f64));
        let sq = Squared::new(Sample::new(&b));
        assert_eq!(sq.location(), Loc3::CCC);
        assert_eq!(sq.at(&grid, Idx3::new(3, 0, 0)), 9.0);
    }

    #[test]
    fn reference_expressions_delegate() {
        let grid = RectilinearGrid::uniform([4, 4, 4], [1.0; 3]).unwrap();
        let b = GridField::from_fn("b", &grid, Loc3::CCC, |p| p.k as f64);
        let d = Diff::new(Axis::Z, Sample::new(&b));
        let by_ref = &d;
        assert_eq!(by_ref.location(), Loc3::CCF);
        assert_eq!(by_ref.at(&grid, Idx3::new(1, 1, 2)), 1.0);
    }
}

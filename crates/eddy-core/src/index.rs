//! Grid indices and interior iteration.

use crate::location::Axis;
use std::fmt;

/// A discrete 3-D grid index.
///
/// Components are signed so that halo points (negative indices, or indices
/// at and beyond the interior size) are addressable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Idx3 {
    /// Index along x.
    pub i: i32,
    /// Index along y.
    pub j: i32,
    /// Index along z.
    pub k: i32,
}

impl Idx3 {
    /// Build an index from its components.
    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }

    /// Component along `axis`.
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.i,
            Axis::Y => self.j,
            Axis::Z => self.k,
        }
    }

    /// Copy offset by `delta` along `axis`.
    #[inline]
    pub fn shift(mut self, axis: Axis, delta: i32) -> Self {
        match axis {
            Axis::X => self.i += delta,
            Axis::Y => self.j += delta,
            Axis::Z => self.k += delta,
        }
        self
    }
}

impl fmt::Display for Idx3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

impl From<(i32, i32, i32)> for Idx3 {
    fn from((i, j, k): (i32, i32, i32)) -> Self {
        Self { i, j, k }
    }
}

/// Interior extent of a grid: `nx × ny × nz` points starting at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    /// Points along each axis.
    pub size: [usize; 3],
}

impl Extent {
    /// Create an extent from per-axis sizes.
    pub fn new(size: [usize; 3]) -> Self {
        Self { size }
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.size.iter().product()
    }

    /// Returns `true` if any axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of points in one `k`-slab.
    pub fn slab_len(&self) -> usize {
        self.size[0] * self.size[1]
    }

    /// Flat position of `idx` in `k`-major, `i`-fastest order, if interior.
    pub fn linear(&self, idx: Idx3) -> Option<usize> {
        let [nx, ny, nz] = self.size;
        let inside = |v: i32, n: usize| v >= 0 && (v as usize) < n;
        if !(inside(idx.i, nx) && inside(idx.j, ny) && inside(idx.k, nz)) {
            return None;
        }
        Some((idx.k as usize * ny + idx.j as usize) * nx + idx.i as usize)
    }

    /// Iterate every interior index in `k`-major, `i`-fastest order.
    pub fn iter(&self) -> ExtentIter {
        ExtentIter {
            size: self.size,
            next: 0,
            len: self.len(),
        }
    }

    /// Iterate the interior indices of slab `k`.
    pub fn slab(&self, k: usize) -> impl Iterator<Item = Idx3> {
        let [nx, ny, _] = self.size;
        (0..ny).flat_map(move |j| (0..nx).map(move |i| Idx3::new(i as i32, j as i32, k as i32)))
    }
}

/// Iterator over an [`Extent`], yielding indices in `k`-major, `i`-fastest order.
pub struct ExtentIter {
    size: [usize; 3],
    next: usize,
    len: usize,
}

impl Iterator for ExtentIter {
    type Item = Idx3;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let [nx, ny, _] = self.size;
        let flat = self.next;
        self.next += 1;
        let i = flat % nx;
        let j = (flat / nx) % ny;
        let k = flat / (nx * ny);
        Some(Idx3::new(i as i32, j as i32, k as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ExtentIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shift_moves_one_axis() {
        let idx = Idx3::new(1, 2, 3);
        assert_eq!(idx.shift(Axis::X, -1), Idx3::new(0, 2, 3));
        assert_eq!(idx.shift(Axis::Z, 2), Idx3::new(1, 2, 5));
        assert_eq!(idx.get(Axis::Y), 2);
    }

    #[test]
    fn iteration_order_is_i_fastest() {
        let ext = Extent::new([2, 2, 2]);
        let all: Vec<Idx3> = ext.iter().collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], Idx3::new(0, 0, 0));
        assert_eq!(all[1], Idx3::new(1, 0, 0));
        assert_eq!(all[2], Idx3::new(0, 1, 0));
        assert_eq!(all[4], Idx3::new(0, 0, 1));
    }

    #[test]
    fn slab_matches_iteration() {
        let ext = Extent::new([3, 2, 4]);
        let slab: Vec<Idx3> = ext.slab(2).collect();
        let from_iter: Vec<Idx3> = ext.iter().filter(|idx| idx.k == 2).collect();
        assert_eq!(slab, from_iter);
        assert_eq!(slab.len(), ext.slab_len());
    }

    #[test]
    fn empty_extent_yields_nothing() {
        let ext = Extent::new([4, 0, 4]);
        assert!(ext.is_empty());
        assert_eq!(ext.iter().count(), 0);
    }

    #[test]
    fn linear_rejects_halo() {
        let ext = Extent::new([3, 3, 3]);
        assert_eq!(ext.linear(Idx3::new(-1, 0, 0)), None);
        assert_eq!(ext.linear(Idx3::new(0, 3, 0)), None);
        assert_eq!(ext.linear(Idx3::new(2, 1, 1)), Some(14));
    }

    proptest! {
        #[test]
        fn linear_inverts_iteration(nx in 1usize..6, ny in 1usize..6, nz in 1usize..6) {
            let ext = Extent::new([nx, ny, nz]);
            for (pos, idx) in ext.iter().enumerate() {
                prop_assert_eq!(ext.linear(idx), Some(pos));
            }
        }
    }
}

//! Reference field storage.
//!
//! [`GridField`] keeps one `f64` per stored point (interior plus halo) as
//! atomic bit patterns, so a simulation can overwrite values in place while
//! lazy diagnostic fields holding an `Arc` to the same storage keep reading
//! the current state. Reads and writes are lock-free.

use crate::error::GridError;
use eddy_core::{Field, Grid, Idx3, Loc3};
use std::sync::atomic::{AtomicU64, Ordering};

/// A stored scalar field covering the interior and halo of a grid.
///
/// Reads outside the stored range return `NaN` so that a stencil reaching
/// too far poisons its result instead of aborting the evaluation.
pub struct GridField {
    name: String,
    location: Loc3,
    size: [usize; 3],
    halo: [usize; 3],
    data: Box<[AtomicU64]>,
}

impl GridField {
    /// Allocate a zero-filled field at `location` on `grid`.
    pub fn zeros(name: impl Into<String>, grid: &dyn Grid, location: Loc3) -> Self {
        let size = grid.size();
        let halo = grid.halo();
        let len = (0..3).map(|a| size[a] + 2 * halo[a]).product();
        let data = (0..len).map(|_| AtomicU64::new(0f64.to_bits())).collect();
        Self {
            name: name.into(),
            location,
            size,
            halo,
            data,
        }
    }

    /// Allocate a field and fill every stored point (halo included) from `f`.
    pub fn from_fn(
        name: impl Into<String>,
        grid: &dyn Grid,
        location: Loc3,
        f: impl FnMut(Idx3) -> f64,
    ) -> Self {
        let field = Self::zeros(name, grid, location);
        field.fill_with(f);
        field
    }

    /// Overwrite every stored point (halo included) from `f`.
    pub fn fill_with(&self, mut f: impl FnMut(Idx3) -> f64) {
        for idx in self.stored_indices() {
            if let Some(offset) = self.offset(idx) {
                self.data[offset].store(f(idx).to_bits(), Ordering::Relaxed);
            }
        }
    }

    /// Overwrite a single point.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if `idx` is outside interior and halo.
    pub fn set(&self, idx: Idx3, value: f64) -> Result<(), GridError> {
        let offset = self.offset(idx).ok_or(GridError::IndexOutOfRange { idx })?;
        self.data[offset].store(value.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Every stored index, halo included, in `k`-major, `i`-fastest order.
    pub fn stored_indices(&self) -> impl Iterator<Item = Idx3> {
        let lo = self.halo.map(|h| -(h as i32));
        let hi = [0, 1, 2].map(|a| (self.size[a] + self.halo[a]) as i32);
        (lo[2]..hi[2]).flat_map(move |k| {
            (lo[1]..hi[1]).flat_map(move |j| (lo[0]..hi[0]).map(move |i| Idx3::new(i, j, k)))
        })
    }

    fn offset(&self, idx: Idx3) -> Option<usize> {
        let mut offset = 0usize;
        for a in (0..3).rev() {
            let extent = self.size[a] + 2 * self.halo[a];
            let p = [idx.i, idx.j, idx.k][a] as i64 + self.halo[a] as i64;
            if p < 0 || p >= extent as i64 {
                return None;
            }
            offset = offset * extent + p as usize;
        }
        Some(offset)
    }
}

impl Field for GridField {
    fn location(&self) -> Loc3 {
        self.location
    }

    #[inline]
    fn value(&self, idx: Idx3) -> f64 {
        match self.offset(idx) {
            Some(offset) => f64::from_bits(self.data[offset].load(Ordering::Relaxed)),
            None => f64::NAN,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for GridField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridField")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("size", &self.size)
            .field("halo", &self.halo)
            .finish()
    }
}

/// A field holding the same value at every index.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantField {
    name: String,
    location: Loc3,
    value: f64,
}

impl ConstantField {
    /// Create a constant field at `location`.
    pub fn new(name: impl Into<String>, location: Loc3, value: f64) -> Self {
        Self {
            name: name.into(),
            location,
            value,
        }
    }
}

impl Field for ConstantField {
    fn location(&self) -> Loc3 {
        self.location
    }

    #[inline]
    fn value(&self, _idx: Idx3) -> f64 {
        self.value
    }

    fn name(&self) -> &str {
        &self.name
    }
}

//! Core abstraction traits for grid metrics and field access.

use crate::index::{Extent, Idx3};
use crate::location::{Axis, Loc3, Location};

/// Read-only view of a staggered rectilinear grid.
///
/// Implemented by the simulation's grid type. Operators query only
/// spacing; iteration helpers use the interior extent.
///
/// # Thread Safety
///
/// `Sync` is required because kernel fields hold an `Arc<dyn Grid>` and
/// may be evaluated from several worker threads at once.
pub trait Grid: Send + Sync {
    /// Interior points per axis `[nx, ny, nz]`.
    fn size(&self) -> [usize; 3];

    /// Halo width per axis. Indices in `-halo..size + halo` are readable.
    fn halo(&self) -> [usize; 3];

    /// Spacing along `axis` for a point at `loc` on that axis.
    ///
    /// For `Location::Center` this is the distance between the bounding
    /// faces `i` and `i + 1`; for `Location::Face` the distance between the
    /// adjacent centers `i - 1` and `i`.
    fn spacing(&self, axis: Axis, loc: Location, idx: Idx3) -> f64;

    /// Interior extent, for iteration.
    fn extent(&self) -> Extent {
        Extent::new(self.size())
    }

    /// Returns `true` if `idx` lies within the interior or halo.
    fn contains(&self, idx: Idx3) -> bool {
        let size = self.size();
        let halo = self.halo();
        Axis::ALL.iter().all(|&axis| {
            let a = axis.index();
            let v = idx.get(axis) as i64;
            v >= -(halo[a] as i64) && v < (size[a] + halo[a]) as i64
        })
    }
}

/// A scalar field sampled on a staggered grid.
///
/// Backed either by stored data owned by the simulation, or by a deferred
/// computation (see `KernelField` in `eddy-diagnostics`). Reading outside
/// the storage range is the implementor's concern; operators never
/// re-validate indices.
pub trait Field: Send + Sync {
    /// Per-axis location of every sample of this field.
    fn location(&self) -> Loc3;

    /// Value at `idx`.
    fn value(&self, idx: Idx3) -> f64;

    /// Human-readable name for error messages and logging.
    fn name(&self) -> &str {
        "field"
    }
}

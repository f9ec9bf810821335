//! Lazily evaluated kernel fields.
//!
//! A [`KernelField`] stores a point-wise kernel function together with its
//! inputs, parameters and grid. Nothing is precomputed: every call to
//! [`KernelField::at`] re-runs the kernel against the current input values,
//! so a field built once keeps tracking inputs that the simulation updates
//! in place between steps.

use std::fmt;
use std::sync::Arc;

use eddy_core::{DiagnosticError, Field, Grid, Idx3, Loc3, TermLocations};

/// Point-wise kernel: `(grid, index, inputs, params) -> value`.
pub type KernelFn<I, P> = fn(&dyn Grid, Idx3, &I, &P) -> f64;

/// A diagnostic field evaluated on demand.
///
/// `I` is the kernel's input record (typically `Arc<dyn Field>` handles),
/// `P` its immutable parameter record (`()` when there is none).
///
/// # Thread Safety
///
/// Evaluation takes `&self` and touches no shared mutable state, so a
/// `KernelField` with `Send + Sync` inputs can be evaluated from several
/// threads over disjoint index ranges.
pub struct KernelField<I, P> {
    name: &'static str,
    location: Loc3,
    kernel: KernelFn<I, P>,
    inputs: I,
    params: P,
    grid: Arc<dyn Grid>,
}

impl<I, P> KernelField<I, P> {
    /// Wrap a kernel, checking that every stencil term lands on `location`.
    ///
    /// `terms` lists the location each term of the kernel's stencil
    /// composition produces for the given inputs.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError::StencilMismatch`] naming the first term
    /// whose location differs from `location`.
    pub fn new(
        name: &'static str,
        location: Loc3,
        terms: &TermLocations,
        kernel: KernelFn<I, P>,
        inputs: I,
        params: P,
        grid: Arc<dyn Grid>,
    ) -> Result<Self, DiagnosticError> {
        if let Some(&(term, produced)) = terms.iter().find(|(_, loc)| *loc != location) {
            return Err(DiagnosticError::StencilMismatch {
                diagnostic: name,
                term,
                declared: location,
                produced,
            });
        }
        Ok(Self {
            name,
            location,
            kernel,
            inputs,
            params,
            grid,
        })
    }

    /// Evaluate the kernel at `idx`.
    #[inline]
    pub fn at(&self, idx: Idx3) -> f64 {
        (self.kernel)(&*self.grid, idx, &self.inputs, &self.params)
    }

    /// Diagnostic name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Location of every value this field produces.
    pub fn location(&self) -> Loc3 {
        self.location
    }

    /// The kernel's input record.
    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    /// The kernel's parameter record.
    pub fn params(&self) -> &P {
        &self.params
    }

    /// The grid the kernel evaluates on.
    pub fn grid(&self) -> &Arc<dyn Grid> {
        &self.grid
    }
}

impl<I, P> Field for KernelField<I, P>
where
    I: Send + Sync,
    P: Send + Sync,
{
    fn location(&self) -> Loc3 {
        self.location
    }

    #[inline]
    fn value(&self, idx: Idx3) -> f64 {
        self.at(idx)
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl<I, P: fmt::Debug> fmt::Debug for KernelField<I, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelField")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("params", &self.params)
            .finish()
    }
}

/// Fail unless `requested` is the one location `diagnostic` supports.
pub(crate) fn require_location(
    diagnostic: &'static str,
    requested: Loc3,
    supported: Loc3,
) -> Result<(), DiagnosticError> {
    if requested != supported {
        return Err(DiagnosticError::UnsupportedLocation {
            diagnostic,
            requested,
            supported,
        });
    }
    Ok(())
}

/// Fail unless `field` sits at `expected`.
pub(crate) fn require_field_at(field: &dyn Field, expected: Loc3) -> Result<(), DiagnosticError> {
    let found = field.location();
    if found != expected {
        return Err(DiagnosticError::LocationMismatch {
            field: field.name().to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

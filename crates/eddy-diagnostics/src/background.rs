//! Optional background fields.
//!
//! A background is either a real field or absent. Absent backgrounds add
//! nothing: [`with_background`] hands back the state field's own `Arc`, so
//! kernels read it directly with no extra indirection.

use std::fmt;
use std::sync::Arc;

use eddy_core::{DiagnosticError, Field, Idx3, Loc3};

/// Lazy point-wise sum of two co-located fields.
pub struct SumField {
    name: String,
    state: Arc<dyn Field>,
    background: Arc<dyn Field>,
}

impl SumField {
    /// Sum `state + background`.
    ///
    /// # Errors
    ///
    /// [`DiagnosticError::LocationMismatch`] if the background does not sit
    /// at the state field's location.
    pub fn new(state: Arc<dyn Field>, background: Arc<dyn Field>) -> Result<Self, DiagnosticError> {
        let expected = state.location();
        let found = background.location();
        if found != expected {
            return Err(DiagnosticError::LocationMismatch {
                field: background.name().to_string(),
                expected,
                found,
            });
        }
        let name = format!("{}+{}", state.name(), background.name());
        Ok(Self {
            name,
            state,
            background,
        })
    }
}

impl Field for SumField {
    fn location(&self) -> Loc3 {
        self.state.location()
    }

    #[inline]
    fn value(&self, idx: Idx3) -> f64 {
        self.state.value(idx) + self.background.value(idx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for SumField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SumField")
            .field("name", &self.name)
            .field("location", &self.state.location())
            .finish()
    }
}

/// Add `background` to `field` if there is one.
///
/// `None` returns a clone of `field`'s `Arc`, pointing at the same field.
///
/// # Errors
///
/// [`DiagnosticError::LocationMismatch`] if a background is present at a
/// different location.
pub fn with_background(
    field: &Arc<dyn Field>,
    background: Option<&Arc<dyn Field>>,
) -> Result<Arc<dyn Field>, DiagnosticError> {
    match background {
        None => Ok(Arc::clone(field)),
        Some(bg) => Ok(Arc::new(SumField::new(Arc::clone(field), Arc::clone(bg))?)),
    }
}

/// Background fields for the velocity components and buoyancy.
#[derive(Clone, Default)]
pub struct Backgrounds {
    /// Background x-velocity, at the location of `u`.
    pub u: Option<Arc<dyn Field>>,
    /// Background y-velocity, at the location of `v`.
    pub v: Option<Arc<dyn Field>>,
    /// Background z-velocity, at the location of `w`.
    pub w: Option<Arc<dyn Field>>,
    /// Background buoyancy, at the location of `b`.
    pub b: Option<Arc<dyn Field>>,
}

impl Backgrounds {
    /// No backgrounds at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether every background is absent.
    pub fn is_empty(&self) -> bool {
        self.u.is_none() && self.v.is_none() && self.w.is_none() && self.b.is_none()
    }
}

impl fmt::Debug for Backgrounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |bg: &Option<Arc<dyn Field>>| bg.as_ref().map(|b| b.name().to_string());
        f.debug_struct("Backgrounds")
            .field("u", &name(&self.u))
            .field("v", &name(&self.v))
            .field("w", &name(&self.w))
            .field("b", &name(&self.b))
            .finish()
    }
}

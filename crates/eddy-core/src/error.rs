//! Error types for diagnostic construction.
//!
//! Every failure is a precondition violation detected when a diagnostic is
//! built. Point-wise evaluation is infallible, and index range checks are
//! left to the grid and field implementations.

use crate::location::Loc3;
use std::error::Error;
use std::fmt;

/// Errors from building a diagnostic field.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticError {
    /// The caller asked for a target location the kernel cannot produce.
    UnsupportedLocation {
        /// Diagnostic being built.
        diagnostic: &'static str,
        /// Location the caller asked for.
        requested: Loc3,
        /// The only location this kernel is valid at.
        supported: Loc3,
    },
    /// The rotation model is not usable by this diagnostic.
    UnsupportedRotation {
        /// Diagnostic being built.
        diagnostic: &'static str,
        /// Name of the rejected rotation variant.
        model: &'static str,
    },
    /// A stencil term does not land on the declared target location,
    /// usually because an input field sits at the wrong location.
    StencilMismatch {
        /// Diagnostic being built.
        diagnostic: &'static str,
        /// Name of the offending term.
        term: &'static str,
        /// Location the kernel declares.
        declared: Loc3,
        /// Location the term's stencil composition actually produces.
        produced: Loc3,
    },
    /// Two fields that must be co-located are not.
    LocationMismatch {
        /// Name of the field whose location was checked.
        field: String,
        /// Location required.
        expected: Loc3,
        /// Location found.
        found: Loc3,
    },
    /// A parameter value is out of its valid range.
    InvalidParameter {
        /// Diagnostic being built.
        diagnostic: &'static str,
        /// Description of the violation.
        reason: String,
    },
    /// A diagnostic set already holds an entry with this name.
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLocation {
                diagnostic,
                requested,
                supported,
            } => write!(
                f,
                "{diagnostic} is only computed at {supported}, not {requested}"
            ),
            Self::UnsupportedRotation { diagnostic, model } => {
                write!(f, "{diagnostic} does not support rotation model '{model}'")
            }
            Self::StencilMismatch {
                diagnostic,
                term,
                declared,
                produced,
            } => write!(
                f,
                "{diagnostic}: term '{term}' lands at {produced}, kernel declares {declared}"
            ),
            Self::LocationMismatch {
                field,
                expected,
                found,
            } => write!(f, "field '{field}' is at {found}, expected {expected}"),
            Self::InvalidParameter { diagnostic, reason } => {
                write!(f, "{diagnostic}: invalid parameter: {reason}")
            }
            Self::DuplicateName { name } => write!(f, "diagnostic '{name}' already registered"),
        }
    }
}

impl Error for DiagnosticError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_locations() {
        let err = DiagnosticError::UnsupportedLocation {
            diagnostic: "ertel_potential_vorticity",
            requested: Loc3::CCC,
            supported: Loc3::FFF,
        };
        let msg = err.to_string();
        assert!(msg.contains("(FFF)"), "{msg}");
        assert!(msg.contains("(CCC)"), "{msg}");
    }

    #[test]
    fn display_stencil_mismatch() {
        let err = DiagnosticError::StencilMismatch {
            diagnostic: "rossby_number",
            term: "dVdx",
            declared: Loc3::FFC,
            produced: Loc3::CFC,
        };
        assert_eq!(
            err.to_string(),
            "rossby_number: term 'dVdx' lands at (CFC), kernel declares (FFC)"
        );
    }
}

//! Error types for grid construction and field storage.

use eddy_core::{Axis, Idx3};
use std::fmt;

/// Errors arising from grid construction or field writes.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// An axis was given zero points.
    EmptyAxis {
        /// The empty axis.
        axis: Axis,
    },
    /// A uniform spacing is not finite and positive.
    InvalidSpacing {
        /// Axis the spacing belongs to.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },
    /// A stretched axis was given the wrong number of face coordinates.
    FaceCount {
        /// Axis the faces belong to.
        axis: Axis,
        /// Required count (`n + 1`).
        expected: usize,
        /// Supplied count.
        found: usize,
    },
    /// Face coordinates are not finite and strictly increasing.
    NonMonotonicFaces {
        /// Axis the faces belong to.
        axis: Axis,
        /// First face index at which the ordering breaks.
        index: usize,
    },
    /// A write addressed a point outside interior and halo.
    IndexOutOfRange {
        /// The offending index.
        idx: Idx3,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAxis { axis } => write!(f, "axis {axis} must have at least one point"),
            Self::InvalidSpacing { axis, value } => {
                write!(f, "spacing along {axis} must be finite and positive, got {value}")
            }
            Self::FaceCount {
                axis,
                expected,
                found,
            } => write!(
                f,
                "axis {axis} needs {expected} face coordinates, got {found}"
            ),
            Self::NonMonotonicFaces { axis, index } => write!(
                f,
                "face coordinates along {axis} must increase strictly (broken at face {index})"
            ),
            Self::IndexOutOfRange { idx } => write!(f, "index {idx} outside field storage"),
        }
    }
}

impl std::error::Error for GridError {}

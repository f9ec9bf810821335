//! Core types and traits for Eddy staggered-grid diagnostics.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! location system ([`Location`], [`Loc3`], [`transform`]), grid indices
//! ([`Idx3`], [`Extent`]), the [`Grid`] and [`Field`] traits that external
//! simulation code implements, and [`DiagnosticError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod index;
pub mod location;
pub mod traits;

pub use error::DiagnosticError;
pub use index::{Extent, ExtentIter, Idx3};
pub use location::{transform, Axis, Loc3, Location, OpKind};
pub use traits::{Field, Grid};

use smallvec::SmallVec;

/// Named locations of the terms of a kernel, as produced by its stencils.
///
/// Kernels report one entry per term; construction compares each against
/// the declared target location.
pub type TermLocations = SmallVec<[(&'static str, Loc3); 9]>;

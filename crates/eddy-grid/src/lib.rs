//! Reference grid and field storage for Eddy.
//!
//! The diagnostic layer only needs the [`Grid`](eddy_core::Grid) and
//! [`Field`](eddy_core::Field) traits. This crate supplies concrete
//! implementations for callers without their own simulation engine, and
//! for tests:
//!
//! - [`RectilinearGrid`]: uniform or stretched axes with a halo
//! - [`GridField`]: lock-free stored field, writable through a shared handle
//! - [`ConstantField`]: the same value everywhere

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod rectilinear;
pub mod storage;

pub use error::GridError;
pub use rectilinear::{RectilinearGrid, RectilinearGridBuilder, DEFAULT_HALO};
pub use storage::{ConstantField, GridField};

//! Background rotation models.
//!
//! Rotation is a closed set of variants. Each diagnostic asks for the form
//! it can use ([`Coriolis::scalar`] or [`Coriolis::rotation_rate`]) and
//! fails at construction when the variant cannot supply it.

use std::fmt;

/// Planetary rotation parameter of the simulated fluid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coriolis {
    /// Constant scalar Coriolis parameter `f`.
    FPlane {
        /// Coriolis parameter (s⁻¹).
        f: f64,
    },
    /// Constant rotation vector with independent components.
    ConstantCartesian {
        /// x-component (s⁻¹).
        fx: f64,
        /// y-component (s⁻¹).
        fy: f64,
        /// z-component (s⁻¹).
        fz: f64,
    },
    /// Latitude-dependent `f = f0 + beta·y`.
    BetaPlane {
        /// Coriolis parameter at `y = 0` (s⁻¹).
        f0: f64,
        /// Meridional gradient of `f` (m⁻¹ s⁻¹).
        beta: f64,
    },
}

impl Coriolis {
    /// Variant name, for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FPlane { .. } => "FPlane",
            Self::ConstantCartesian { .. } => "ConstantCartesian",
            Self::BetaPlane { .. } => "BetaPlane",
        }
    }

    /// The single scalar `f`, available only on an f-plane.
    pub fn scalar(&self) -> Option<f64> {
        match self {
            Self::FPlane { f } => Some(*f),
            _ => None,
        }
    }

    /// Three rotation components.
    ///
    /// An f-plane supplies its scalar as all three components; a
    /// constant Cartesian rotation supplies its own. A beta-plane has no
    /// constant rotation vector.
    pub fn rotation_rate(&self) -> Option<RotationRate> {
        match *self {
            Self::FPlane { f } => Some(RotationRate::uniform(f)),
            Self::ConstantCartesian { fx, fy, fz } => Some(RotationRate { fx, fy, fz }),
            Self::BetaPlane { .. } => None,
        }
    }
}

impl fmt::Display for Coriolis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FPlane { f: value } => write!(f, "FPlane(f={value})"),
            Self::ConstantCartesian { fx, fy, fz } => {
                write!(f, "ConstantCartesian(fx={fx}, fy={fy}, fz={fz})")
            }
            Self::BetaPlane { f0, beta } => write!(f, "BetaPlane(f0={f0}, beta={beta})"),
        }
    }
}

/// Resolved rotation components used by the Ertel kernels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationRate {
    /// x-component (s⁻¹).
    pub fx: f64,
    /// y-component (s⁻¹).
    pub fy: f64,
    /// z-component (s⁻¹).
    pub fz: f64,
}

impl RotationRate {
    /// All three components equal to `f`.
    pub fn uniform(f: f64) -> Self {
        Self { fx: f, fy: f, fz: f }
    }

    /// Components as `[fx, fy, fz]`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.fz]
    }
}

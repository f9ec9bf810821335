//! Rectilinear staggered grid with uniform or stretched axes.
//!
//! Each axis is either uniformly spaced or described by its `n + 1`
//! interior face coordinates. Halo faces continue with the edge spacing,
//! so the metrics are defined for every index the field storage holds.

use crate::error::GridError;
use eddy_core::{Axis, Grid, Idx3, Location};

/// Default halo width: enough for every two-point stencil composition.
pub const DEFAULT_HALO: usize = 1;

/// Metric description of one axis.
#[derive(Clone, Debug, PartialEq)]
enum AxisMetrics {
    Uniform {
        spacing: f64,
    },
    Stretched {
        /// Face coordinates for faces `-h ..= n + h`.
        faces: Vec<f64>,
        /// Center coordinates for centers `-h .. n + h`.
        centers: Vec<f64>,
    },
}

impl AxisMetrics {
    fn stretched(interior_faces: &[f64], halo: usize) -> Self {
        let n = interior_faces.len() - 1;
        let lo = interior_faces[1] - interior_faces[0];
        let hi = interior_faces[n] - interior_faces[n - 1];

        let mut faces = Vec::with_capacity(n + 1 + 2 * halo);
        for h in (1..=halo).rev() {
            faces.push(interior_faces[0] - lo * h as f64);
        }
        faces.extend_from_slice(interior_faces);
        for h in 1..=halo {
            faces.push(interior_faces[n] + hi * h as f64);
        }
        let centers = faces.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();

        Self::Stretched { faces, centers }
    }
}

/// A rectilinear staggered grid.
///
/// Center `i` sits between faces `i` and `i + 1`. Interior indices run over
/// `0..n` for both locations; the halo adds `halo` points on each side.
#[derive(Clone, Debug, PartialEq)]
pub struct RectilinearGrid {
    size: [usize; 3],
    halo: [usize; 3],
    axes: [AxisMetrics; 3],
}

impl RectilinearGrid {
    /// Uniformly spaced grid with the default halo.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] for empty axes or non-positive spacing.
    pub fn uniform(size: [usize; 3], spacing: [f64; 3]) -> Result<Self, GridError> {
        Self::builder()
            .size(size)
            .uniform(Axis::X, spacing[0])
            .uniform(Axis::Y, spacing[1])
            .uniform(Axis::Z, spacing[2])
            .build()
    }

    /// Create a builder. Defaults: one point per axis, unit spacing,
    /// halo [`DEFAULT_HALO`].
    pub fn builder() -> RectilinearGridBuilder {
        RectilinearGridBuilder {
            size: [1, 1, 1],
            halo: [DEFAULT_HALO; 3],
            axes: [
                AxisSpec::Uniform(1.0),
                AxisSpec::Uniform(1.0),
                AxisSpec::Uniform(1.0),
            ],
        }
    }

    /// Coordinate of point `i` at `loc` along `axis`.
    ///
    /// Indices beyond the halo are clamped to the outermost stored point.
    pub fn node(&self, axis: Axis, loc: Location, i: i32) -> f64 {
        let a = axis.index();
        match &self.axes[a] {
            AxisMetrics::Uniform { spacing } => match loc {
                Location::Face => i as f64 * spacing,
                Location::Center => (i as f64 + 0.5) * spacing,
            },
            AxisMetrics::Stretched { faces, centers } => {
                let coords = match loc {
                    Location::Face => faces,
                    Location::Center => centers,
                };
                coords[self.clamp_position(a, i, coords.len())]
            }
        }
    }

    fn clamp_position(&self, axis: usize, i: i32, len: usize) -> usize {
        let p = i as i64 + self.halo[axis] as i64;
        p.clamp(0, len as i64 - 1) as usize
    }
}

impl Grid for RectilinearGrid {
    fn size(&self) -> [usize; 3] {
        self.size
    }

    fn halo(&self) -> [usize; 3] {
        self.halo
    }

    #[inline]
    fn spacing(&self, axis: Axis, loc: Location, idx: Idx3) -> f64 {
        let a = axis.index();
        match &self.axes[a] {
            AxisMetrics::Uniform { spacing } => *spacing,
            AxisMetrics::Stretched { faces, centers } => {
                let i = idx.get(axis);
                match loc {
                    Location::Center => {
                        let p = self.clamp_position(a, i, centers.len());
                        faces[p + 1] - faces[p]
                    }
                    Location::Face => {
                        let p = self.clamp_position(a, i, centers.len());
                        if p == 0 {
                            faces[1] - faces[0]
                        } else {
                            centers[p] - centers[p - 1]
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
enum AxisSpec {
    Uniform(f64),
    Stretched(Vec<f64>),
}

/// Builder for [`RectilinearGrid`].
pub struct RectilinearGridBuilder {
    size: [usize; 3],
    halo: [usize; 3],
    axes: [AxisSpec; 3],
}

impl RectilinearGridBuilder {
    /// Interior points per axis.
    pub fn size(mut self, size: [usize; 3]) -> Self {
        self.size = size;
        self
    }

    /// Halo width on every axis.
    pub fn halo(mut self, halo: usize) -> Self {
        self.halo = [halo; 3];
        self
    }

    /// Uniform spacing along `axis`.
    pub fn uniform(mut self, axis: Axis, spacing: f64) -> Self {
        self.axes[axis.index()] = AxisSpec::Uniform(spacing);
        self
    }

    /// Stretched `axis` given its `n + 1` interior face coordinates.
    pub fn stretched(mut self, axis: Axis, faces: Vec<f64>) -> Self {
        self.axes[axis.index()] = AxisSpec::Stretched(faces);
        self
    }

    /// Build the grid, validating every axis.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - any axis has zero points
    /// - a uniform spacing is not finite and positive
    /// - a stretched axis does not have exactly `n + 1` faces
    /// - stretched faces are not finite and strictly increasing
    pub fn build(self) -> Result<RectilinearGrid, GridError> {
        let [sx, sy, sz] = self.axes;
        let axes = [
            build_axis(Axis::X, sx, self.size[0], self.halo[0])?,
            build_axis(Axis::Y, sy, self.size[1], self.halo[1])?,
            build_axis(Axis::Z, sz, self.size[2], self.halo[2])?,
        ];
        Ok(RectilinearGrid {
            size: self.size,
            halo: self.halo,
            axes,
        })
    }
}

fn build_axis(axis: Axis, spec: AxisSpec, n: usize, halo: usize) -> Result<AxisMetrics, GridError> {
    if n == 0 {
        return Err(GridError::EmptyAxis { axis });
    }
    match spec {
        AxisSpec::Uniform(spacing) => {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(GridError::InvalidSpacing {
                    axis,
                    value: spacing,
                });
            }
            Ok(AxisMetrics::Uniform { spacing })
        }
        AxisSpec::Stretched(faces) => {
            if faces.len() != n + 1 {
                return Err(GridError::FaceCount {
                    axis,
                    expected: n + 1,
                    found: faces.len(),
                });
            }
            if let Some(bad) = faces.iter().position(|v| !v.is_finite()) {
                return Err(GridError::NonMonotonicFaces { axis, index: bad });
            }
            if let Some(bad) = faces.windows(2).position(|w| w[1] <= w[0]) {
                return Err(GridError::NonMonotonicFaces {
                    axis,
                    index: bad + 1,
                });
            }
            Ok(AxisMetrics::stretched(&faces, halo))
        }
    }
}

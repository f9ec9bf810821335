//! Staggered-grid locations and the operator location transform.
//!
//! Every field sample point sits either at a cell [`Location::Center`] or a
//! cell [`Location::Face`] along each of the three axes. A field's placement
//! is the per-axis triple [`Loc3`]. Derivatives and interpolations along an
//! axis toggle that axis and leave the others alone; [`transform`] is the
//! single lookup every operator and kernel goes through.

use std::fmt;

/// One of the three grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First horizontal axis.
    X,
    /// Second horizontal axis.
    Y,
    /// Vertical axis.
    Z,
}

impl Axis {
    /// All axes in `x, y, z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in `[x, y, z]` arrays.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Placement of a sample point along a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Cell midpoint. Center `i` lies between faces `i` and `i + 1`.
    Center,
    /// Cell boundary. Face `i` lies between centers `i - 1` and `i`.
    Face,
}

impl Location {
    /// The other location.
    pub fn toggled(self) -> Self {
        match self {
            Self::Center => Self::Face,
            Self::Face => Self::Center,
        }
    }

    /// Offset of the stencil partner of a point produced at this location.
    ///
    /// A face value is built from the centers at `i - 1` and `i`; a center
    /// value from the faces at `i` and `i + 1`.
    pub fn neighbour_offset(self) -> i32 {
        match self {
            Self::Face => -1,
            Self::Center => 1,
        }
    }

    fn short(self) -> char {
        match self {
            Self::Center => 'C',
            Self::Face => 'F',
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Center => write!(f, "Center"),
            Self::Face => write!(f, "Face"),
        }
    }
}

/// Per-axis location triple of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc3 {
    /// Location along x.
    pub x: Location,
    /// Location along y.
    pub y: Location,
    /// Location along z.
    pub z: Location,
}

impl Loc3 {
    /// Tracer points.
    pub const CCC: Loc3 = Loc3::new(Location::Center, Location::Center, Location::Center);
    /// Cell corners.
    pub const FFF: Loc3 = Loc3::new(Location::Face, Location::Face, Location::Face);
    /// x-velocity points.
    pub const FCC: Loc3 = Loc3::new(Location::Face, Location::Center, Location::Center);
    /// y-velocity points.
    pub const CFC: Loc3 = Loc3::new(Location::Center, Location::Face, Location::Center);
    /// z-velocity points.
    pub const CCF: Loc3 = Loc3::new(Location::Center, Location::Center, Location::Face);
    /// Vertical vorticity points.
    pub const FFC: Loc3 = Loc3::new(Location::Face, Location::Face, Location::Center);
    /// y-vorticity points.
    pub const FCF: Loc3 = Loc3::new(Location::Face, Location::Center, Location::Face);
    /// x-vorticity points.
    pub const CFF: Loc3 = Loc3::new(Location::Center, Location::Face, Location::Face);

    /// Build a triple from its three components.
    pub const fn new(x: Location, y: Location, z: Location) -> Self {
        Self { x, y, z }
    }

    /// Location along `axis`.
    pub fn get(&self, axis: Axis) -> Location {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy with `axis` replaced by `loc`.
    pub fn with(mut self, axis: Axis, loc: Location) -> Self {
        match axis {
            Axis::X => self.x = loc,
            Axis::Y => self.y = loc,
            Axis::Z => self.z = loc,
        }
        self
    }

    /// Copy with `axis` toggled.
    pub fn toggled(self, axis: Axis) -> Self {
        self.with(axis, self.get(axis).toggled())
    }
}

impl fmt::Display for Loc3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}{}{})",
            self.x.short(),
            self.y.short(),
            self.z.short()
        )
    }
}

/// Kind of a single-axis stencil operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    /// Finite difference.
    Derivative,
    /// Two-point average.
    Interpolation,
}

/// Location after applying an operator of `kind` along `axis` to a field at `from`.
///
/// Both kinds toggle the touched axis. Interpolation is used to undo a
/// mismatch left by a derivative rather than to form a new quantity, but
/// the location algebra is the same.
pub fn transform(kind: OpKind, axis: Axis, from: Loc3) -> Loc3 {
    match kind {
        OpKind::Derivative | OpKind::Interpolation => from.toggled(axis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_location() -> impl Strategy<Value = Location> {
        prop_oneof![Just(Location::Center), Just(Location::Face)]
    }

    fn arb_loc3() -> impl Strategy<Value = Loc3> {
        (arb_location(), arb_location(), arb_location()).prop_map(|(x, y, z)| Loc3::new(x, y, z))
    }

    fn arb_axis() -> impl Strategy<Value = Axis> {
        prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
    }

    fn arb_kind() -> impl Strategy<Value = OpKind> {
        prop_oneof![Just(OpKind::Derivative), Just(OpKind::Interpolation)]
    }

    #[test]
    fn derivative_toggles_only_its_axis() {
        assert_eq!(transform(OpKind::Derivative, Axis::X, Loc3::CCC), Loc3::FCC);
        assert_eq!(transform(OpKind::Derivative, Axis::Z, Loc3::FCC), Loc3::FCF);
        assert_eq!(transform(OpKind::Interpolation, Axis::Y, Loc3::FFF), Loc3::FCF);
    }

    #[test]
    fn neighbour_offsets() {
        assert_eq!(Location::Face.neighbour_offset(), -1);
        assert_eq!(Location::Center.neighbour_offset(), 1);
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Loc3::FCF.to_string(), "(FCF)");
        assert_eq!(Location::Face.to_string(), "Face");
        assert_eq!(Axis::Z.to_string(), "z");
    }

    proptest! {
        #[test]
        fn transform_is_involution(loc in arb_loc3(), axis in arb_axis(), kind in arb_kind()) {
            prop_assert_eq!(transform(kind, axis, transform(kind, axis, loc)), loc);
        }

        #[test]
        fn untouched_axes_pass_through(loc in arb_loc3(), axis in arb_axis(), kind in arb_kind()) {
            let out = transform(kind, axis, loc);
            for other in Axis::ALL {
                if other != axis {
                    prop_assert_eq!(out.get(other), loc.get(other));
                } else {
                    prop_assert_ne!(out.get(other), loc.get(other));
                }
            }
        }

        #[test]
        fn transforms_commute_across_axes(
            loc in arb_loc3(),
            a in arb_axis(),
            b in arb_axis(),
            ka in arb_kind(),
            kb in arb_kind(),
        ) {
            prop_assert_eq!(
                transform(kb, b, transform(ka, a, loc)),
                transform(ka, a, transform(kb, b, loc))
            );
        }
    }
}

//! Loads applied along a member

use serde::{Deserialize, Serialize};

use crate::elements::Geometry;
use crate::error::{FEAError, FEAResult};
use crate::math::{self, Vec6};

/// Load pattern along a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MemberLoadKind {
    /// Constant intensity over the full length
    Uniform,
    /// Symmetric triangle, zero at both ends and peak at midspan
    Triangular,
    /// Concentrated load at `location` from the i-node (midspan if `None`)
    Point { location: Option<f64> },
}

/// A load on a member, in local member axes
///
/// `magnitude` acts in local y (transverse), `axial` in local x. For the
/// distributed kinds both are intensities (force per length) and for
/// [`MemberLoadKind::Point`] they are forces. Local y is the member axis
/// rotated 90° counter-clockwise, so on an i→j member running in +X a
/// negative magnitude points down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberLoad {
    pub kind: MemberLoadKind,
    pub magnitude: f64,
    pub axial: f64,
}

/// Effect of the part of a member load lying between the i-node and a section
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadIntegral {
    /// Sum of axial load
    pub axial: f64,
    /// Sum of transverse load
    pub transverse: f64,
    /// Moment of the transverse load about the section
    pub moment: f64,
}

impl MemberLoad {
    /// Uniformly distributed load `w`
    pub fn uniform(w: f64) -> Self {
        Self {
            kind: MemberLoadKind::Uniform,
            magnitude: w,
            axial: 0.0,
        }
    }

    /// Symmetric triangular load with peak `w` at midspan
    pub fn triangular(w: f64) -> Self {
        Self {
            kind: MemberLoadKind::Triangular,
            magnitude: w,
            axial: 0.0,
        }
    }

    /// Point load `p` at `location` from the i-node (midspan if `None`)
    pub fn point(p: f64, location: Option<f64>) -> Self {
        Self {
            kind: MemberLoadKind::Point { location },
            magnitude: p,
            axial: 0.0,
        }
    }

    /// Set the axial component
    pub fn with_axial(mut self, axial: f64) -> Self {
        self.axial = axial;
        self
    }

    /// Build a load of `kind` from global components `(gx, gy)`
    pub fn from_global(kind: MemberLoadKind, gx: f64, gy: f64, geometry: &Geometry) -> Self {
        let (axial, magnitude) = geometry.to_local(gx, gy);
        Self {
            kind,
            magnitude,
            axial,
        }
    }

    /// Point load position, if this is a point load
    pub fn location(&self) -> Option<f64> {
        match self.kind {
            MemberLoadKind::Point { location } => location,
            _ => None,
        }
    }

    /// Validate against the member length and fill in the default location
    pub(crate) fn resolved(self, length: f64) -> FEAResult<Self> {
        if !self.magnitude.is_finite() || !self.axial.is_finite() {
            return Err(FEAError::InvalidInput(
                "member load magnitude must be finite".to_string(),
            ));
        }

        let kind = match self.kind {
            MemberLoadKind::Point { location } => {
                let a = location.unwrap_or(length / 2.0);
                if !a.is_finite() || a < 0.0 || a > length {
                    return Err(FEAError::InvalidInput(format!(
                        "point load location {a} lies outside member of length {length}"
                    )));
                }
                MemberLoadKind::Point { location: Some(a) }
            }
            other => other,
        };

        Ok(Self { kind, ..self })
    }

    /// Equivalent nodal load in local axes for a member of `length`
    pub fn equivalent_nodal_load(&self, length: f64) -> Vec6 {
        match self.kind {
            MemberLoadKind::Uniform => {
                math::equivalent_uniform_load(self.magnitude, self.axial, length)
            }
            MemberLoadKind::Triangular => {
                math::equivalent_triangular_load(self.magnitude, self.axial, length)
            }
            MemberLoadKind::Point { location } => {
                let a = location.unwrap_or(length / 2.0);
                math::equivalent_point_load(self.magnitude, self.axial, a, length)
            }
        }
    }

    /// Total `(axial, transverse)` load
    pub fn resultant(&self, length: f64) -> (f64, f64) {
        let total = self.integrate_to(length, length);
        (total.axial, total.transverse)
    }

    /// Integrate the load from the i-node up to section `x`
    ///
    /// A point load counts once the section is strictly past it.
    pub fn integrate_to(&self, x: f64, length: f64) -> LoadIntegral {
        let (r, m) = match self.kind {
            MemberLoadKind::Uniform => trapezoid_to(0.0, length, 1.0, 1.0, x),
            MemberLoadKind::Triangular => {
                let half = length / 2.0;
                let (r1, m1) = trapezoid_to(0.0, half, 0.0, 1.0, x);
                let (r2, m2) = trapezoid_to(half, length, 1.0, 0.0, x);
                (r1 + r2, m1 + m2)
            }
            MemberLoadKind::Point { location } => {
                let a = location.unwrap_or(length / 2.0);
                if x > a {
                    (1.0, x - a)
                } else {
                    (0.0, 0.0)
                }
            }
        };

        LoadIntegral {
            axial: self.axial * r,
            transverse: self.magnitude * r,
            moment: self.magnitude * m,
        }
    }
}

/// Resultant and moment about `x` of a unit-scaled linear load between
/// `s0` and `s1`, clipped at `x`
fn trapezoid_to(s0: f64, s1: f64, q0: f64, q1: f64, x: f64) -> (f64, f64) {
    if x <= s0 || s1 <= s0 {
        return (0.0, 0.0);
    }
    let end = x.min(s1);
    let q_end = q0 + (q1 - q0) * (end - s0) / (s1 - s0);
    let span = end - s0;

    let sum = q0 + q_end;
    if sum == 0.0 {
        return (0.0, 0.0);
    }
    let resultant = sum / 2.0 * span;
    let centroid = s0 + span * (q0 + 2.0 * q_end) / (3.0 * sum);
    (resultant, resultant * (x - centroid))
}

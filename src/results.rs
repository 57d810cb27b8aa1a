//! Result types for frame analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::loads::MemberLoad;
use crate::math::{Mat, Vec6};

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub x: f64,
    /// Displacement in Y direction
    pub y: f64,
    /// Rotation about Z, counter-clockwise positive
    pub rotation: f64,
}

impl NodeDisplacement {
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation }
    }

    /// Create from array [DX, DY, RZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Reaction forces at a supported node
///
/// Components on unrestrained DOFs of a partially restrained node are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    pub fx: f64,
    pub fy: f64,
    pub moment: f64,
}

impl Reactions {
    /// Create from array [FX, FY, MZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            moment: arr[2],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        self.fx.hypot(self.fy)
    }
}

/// Forces at one end of a member
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EndForces {
    /// Axial force (positive = tension)
    pub fx: f64,
    /// Shear force, beam convention
    pub fy: f64,
    /// End moment acting on the member, counter-clockwise positive
    pub moment: f64,
}

/// One station of a member force diagram
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    pub x: f64,
    pub axial: f64,
    pub shear: f64,
    pub moment: f64,
}

/// Internal forces in a member
///
/// Only `start` and `end` are serialized. The local end-force vector and the
/// member load are kept so that internal forces can be evaluated anywhere
/// along the member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberForces {
    pub start: EndForces,
    pub end: EndForces,
    #[serde(skip)]
    length: f64,
    #[serde(skip)]
    local: [f64; 6],
    #[serde(skip)]
    load: Option<MemberLoad>,
}

impl MemberForces {
    /// Create from local end forces `[N_i, V_i, M_i, N_j, V_j, M_j]`
    pub fn from_local(f: &Vec6, length: f64, load: Option<MemberLoad>) -> Self {
        Self {
            start: EndForces {
                fx: -f[0],
                fy: f[1],
                moment: f[2],
            },
            end: EndForces {
                fx: f[3],
                fy: -f[4],
                moment: f[5],
            },
            length,
            local: [f[0], f[1], f[2], f[3], f[4], f[5]],
            load,
        }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Raw local end forces
    pub fn local_forces(&self) -> [f64; 6] {
        self.local
    }

    /// Axial force at `x` from the start, tension positive
    pub fn axial_at(&self, x: f64) -> f64 {
        let part = self.load_to(x);
        -self.local[0] - part.axial
    }

    /// Shear force at `x` from the start
    pub fn shear_at(&self, x: f64) -> f64 {
        let part = self.load_to(x);
        self.local[1] + part.transverse
    }

    /// Bending moment at `x` from the start, sagging positive
    pub fn moment_at(&self, x: f64) -> f64 {
        let part = self.load_to(x);
        -self.local[2] + self.local[1] * x + part.moment
    }

    /// Sample the member at `stations` equally spaced points (at least 2)
    pub fn diagram(&self, stations: usize) -> Vec<DiagramPoint> {
        let n = stations.max(2);
        (0..n)
            .map(|k| {
                let x = self.length * k as f64 / (n - 1) as f64;
                DiagramPoint {
                    x,
                    axial: self.axial_at(x),
                    shear: self.shear_at(x),
                    moment: self.moment_at(x),
                }
            })
            .collect()
    }

    /// Largest absolute bending moment along the member
    pub fn max_abs_moment(&self) -> f64 {
        let sampled = self
            .diagram(21)
            .iter()
            .fold(0.0_f64, |acc, p| acc.max(p.moment.abs()));
        // The peak under a point load may fall between stations
        match self.load.and_then(|l| l.location()) {
            Some(a) => sampled.max(self.moment_at(a).abs()),
            None => sampled,
        }
    }

    /// Largest absolute axial force at either end
    pub fn max_abs_axial(&self) -> f64 {
        self.start.fx.abs().max(self.end.fx.abs())
    }

    fn load_to(&self, x: f64) -> crate::loads::LoadIntegral {
        self.load
            .map(|l| l.integrate_to(x, self.length))
            .unwrap_or_default()
    }
}

/// Complete results of an analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Displacements for every node
    pub displacements: BTreeMap<String, NodeDisplacement>,
    /// Reactions for nodes with at least one restrained DOF
    pub reactions: BTreeMap<String, Reactions>,
    /// End forces for every member
    pub member_forces: BTreeMap<String, MemberForces>,
    pub total_dofs: usize,
    pub free_dofs: usize,
    /// `[ΣFX, ΣFY]` of reactions and applied loads
    pub equilibrium_residual: [f64; 2],
    #[serde(skip)]
    pub stiffness_matrix: Option<Mat>,
    #[serde(skip)]
    pub reduced_stiffness_matrix: Option<Mat>,
}

impl AnalysisResults {
    pub fn displacement(&self, node_id: &str) -> Option<&NodeDisplacement> {
        self.displacements.get(node_id)
    }

    pub fn reaction(&self, node_id: &str) -> Option<&Reactions> {
        self.reactions.get(node_id)
    }

    pub fn member(&self, member_id: &str) -> Option<&MemberForces> {
        self.member_forces.get(member_id)
    }

    /// Condense the results into extreme values
    pub fn summary(&self) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            num_nodes: self.displacements.len(),
            num_members: self.member_forces.len(),
            total_dofs: self.total_dofs,
            free_dofs: self.free_dofs,
            ..Default::default()
        };

        for (id, d) in &self.displacements {
            let mag = d.translation_magnitude();
            if mag > summary.max_displacement {
                summary.max_displacement = mag;
                summary.max_disp_node = id.clone();
            }
        }

        for (id, r) in &self.reactions {
            let mag = r.force_magnitude();
            if mag > summary.max_reaction {
                summary.max_reaction = mag;
                summary.max_reaction_node = id.clone();
            }
        }

        for (id, f) in &self.member_forces {
            let axial = f.max_abs_axial();
            if axial > summary.max_axial {
                summary.max_axial = axial;
                summary.max_axial_member = id.clone();
            }
            let moment = f.max_abs_moment();
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_member = id.clone();
            }
        }

        summary
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Maximum translation
    pub max_displacement: f64,
    /// Node with maximum translation
    pub max_disp_node: String,
    /// Maximum reaction force
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: String,
    /// Maximum member axial force
    pub max_axial: f64,
    /// Member with maximum axial
    pub max_axial_member: String,
    /// Maximum member moment
    pub max_moment: f64,
    /// Member with maximum moment
    pub max_moment_member: String,
    pub num_nodes: usize,
    pub num_members: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
}

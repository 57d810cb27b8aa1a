//! Member element - planar frame, truss or spring connection

use log::warn;
use serde::{Deserialize, Serialize};

use super::Node;
use crate::dof;
use crate::error::{FEAError, FEAResult};
use crate::loads::MemberLoad;
use crate::math::{self, Mat6, Vec6};

/// Stiffness formulation of a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Rigid frame beam; `ei = 0` gives a pin-ended truss bar
    Frame { ea: f64, ei: f64 },
    /// Linear axial spring
    Spring { k: f64 },
}

impl ElementKind {
    /// Whether the member resists end rotation
    pub fn has_rotational_stiffness(&self) -> bool {
        matches!(self, ElementKind::Frame { ei, .. } if *ei > 0.0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Frame { ei, .. } if *ei > 0.0 => "frame",
            ElementKind::Frame { .. } => "truss",
            ElementKind::Spring { .. } => "spring",
        }
    }
}

/// Length and orientation of a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub length: f64,
    pub cos: f64,
    pub sin: f64,
    /// End nodes share a position; `length` is a substitute set by the model
    #[serde(default)]
    pub coincident: bool,
}

impl Geometry {
    /// Substitute length for coincident end nodes, as a fraction of the
    /// longest real member in the model
    pub const COINCIDENT_LENGTH_RATIO: f64 = 1e-2;

    /// Measure the member between two nodes
    ///
    /// Coincident nodes do not fail: the orientation is the global X axis and
    /// the length is a unit placeholder until the owning model rescales it.
    pub fn between(i_node: &Node, j_node: &Node) -> Self {
        let length = i_node.distance_to(j_node);
        if length < 1e-9 {
            return Self {
                length: 1.0,
                cos: 1.0,
                sin: 0.0,
                coincident: true,
            };
        }

        Self {
            length,
            cos: (j_node.x - i_node.x) / length,
            sin: (j_node.y - i_node.y) / length,
            coincident: false,
        }
    }

    /// Substitute length for coincident members given the longest real member
    pub fn coincident_length(reference: f64) -> f64 {
        let reference = if reference > 0.0 { reference } else { 1.0 };
        reference * Self::COINCIDENT_LENGTH_RATIO
    }

    /// Resolve global components into `(axial, transverse)` local components
    pub fn to_local(&self, gx: f64, gy: f64) -> (f64, f64) {
        (gx * self.cos + gy * self.sin, -gx * self.sin + gy * self.cos)
    }
}

/// A member connecting two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// External id
    pub id: String,
    /// Id of the i-node (start)
    pub i_node: String,
    /// Id of the j-node (end)
    pub j_node: String,
    /// Stiffness formulation
    pub kind: ElementKind,
    /// Geometry measured when the member was added
    pub geometry: Geometry,

    pub(crate) i_index: usize,
    pub(crate) j_index: usize,

    /// Member load, at most one per member
    pub(crate) load: Option<MemberLoad>,

    /// Equivalent nodal load in local axes `[Fx_i, Fy_i, M_i, Fx_j, Fy_j, M_j]`
    pub(crate) equivalent_load: Option<Vec6>,
}

impl Member {
    pub(crate) fn new(id: &str, i_node: &Node, j_node: &Node, kind: ElementKind) -> Self {
        Self {
            id: id.to_string(),
            i_node: i_node.id.clone(),
            j_node: j_node.id.clone(),
            kind,
            geometry: Geometry::between(i_node, j_node),
            i_index: i_node.index,
            j_index: j_node.index,
            load: None,
            equivalent_load: None,
        }
    }

    pub fn length(&self) -> f64 {
        self.geometry.length
    }

    /// Whether the end nodes share a position
    pub fn is_coincident(&self) -> bool {
        self.geometry.coincident
    }

    /// Global scatter indices `[xi, yi, ri, xj, yj, rj]`
    pub fn dofs(&self) -> [usize; 6] {
        dof::element_dofs(self.i_index, self.j_index)
    }

    /// Local stiffness in the common 6-DOF layout
    pub fn local_stiffness(&self) -> Mat6 {
        match self.kind {
            ElementKind::Frame { ea, ei } => {
                math::frame_local_stiffness(ea, ei, self.geometry.length)
            }
            ElementKind::Spring { k } => math::expand_spring(&math::spring_local_stiffness(k)),
        }
    }

    /// Global-to-local rotation
    pub fn transformation(&self) -> Mat6 {
        math::transformation_matrix(self.geometry.cos, self.geometry.sin)
    }

    /// Global stiffness: K_global = T^T * K_local * T
    pub fn global_stiffness(&self) -> Mat6 {
        let (cos, sin) = (self.geometry.cos, self.geometry.sin);
        match self.kind {
            ElementKind::Frame { ea, ei } => {
                let t = math::transformation_matrix(cos, sin);
                t.transpose() * math::frame_local_stiffness(ea, ei, self.geometry.length) * t
            }
            ElementKind::Spring { k } => {
                let t = math::spring_transformation_matrix(cos, sin);
                let k_global = t.transpose() * math::spring_local_stiffness(k) * t;
                math::expand_spring(&k_global)
            }
        }
    }

    /// Attach a member load, replacing any previous one
    pub(crate) fn set_load(&mut self, load: MemberLoad) -> FEAResult<()> {
        if self.geometry.coincident {
            return Err(FEAError::InvalidInput(format!(
                "member '{}' has zero length and cannot carry a member load",
                self.id
            )));
        }
        let length = self.geometry.length;
        let load = load.resolved(length)?;

        let mut eq = load.equivalent_nodal_load(length);
        if !self.kind.has_rotational_stiffness() {
            eq = math::release_end_moments(&eq, length);
        }

        if self.load.is_some() {
            warn!("Member '{}' already has a load, replacing it", self.id);
        }
        self.load = Some(load);
        self.equivalent_load = Some(eq);
        Ok(())
    }

    /// Member load, if any
    pub fn load(&self) -> Option<&MemberLoad> {
        self.load.as_ref()
    }

    /// Local equivalent nodal load (zero if the member is unloaded)
    pub fn equivalent_load(&self) -> Vec6 {
        self.equivalent_load.unwrap_or_else(Vec6::zeros)
    }

    /// Equivalent nodal load rotated to global axes
    pub fn global_equivalent_load(&self) -> Vec6 {
        self.transformation().transpose() * self.equivalent_load()
    }
}

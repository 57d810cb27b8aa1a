//! Frame2D Solver - planar structural analysis by the direct stiffness method
//!
//! Linear static analysis of 2D structures built from:
//! - Rigid frame members (axial + bending)
//! - Truss bars (frame members without bending stiffness)
//! - Axial springs
//!
//! Loads are nodal forces and moments, plus uniform, triangular and point
//! loads along members. Results are nodal displacements, support reactions
//! and member end forces, with internal force diagrams along each member.
//!
//! ## Example
//! ```rust
//! use frame2d_solver::prelude::*;
//!
//! let mut model = FrameModel::new();
//!
//! // Add nodes
//! model.add_node("N1", 0.0, 0.0).unwrap();
//! model.add_node("N2", 4.0, 0.0).unwrap();
//!
//! // Add member: EA and EI
//! model.add_frame("M1", "N1", "N2", 200e9 * 0.01, 200e9 * 1e-4).unwrap();
//!
//! // Add supports
//! model.add_support("N1", Support::pinned()).unwrap();
//! model.add_support("N2", Support::roller()).unwrap();
//!
//! // Add loads
//! model.add_member_load("M1", MemberLoad::point(-10000.0, Some(2.0))).unwrap();
//!
//! // Analyze
//! let results = model.analyze().unwrap();
//! let reaction = results.reaction("N1").unwrap();
//! assert!((reaction.fy - 5000.0).abs() < 1e-6);
//! ```
//!
//! For UI integration the whole pipeline is also available as a JSON
//! contract, see [`api::analyze_json`].

pub mod analysis;
pub mod api;
pub mod dof;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::AnalysisOptions;
    pub use crate::api::{analyze_json, analyze_structure, AnalysisOutput, StructureDefinition};
    pub use crate::elements::{ElementKind, Member, Node, Support};
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::loads::{MemberLoad, MemberLoadKind, NodeLoad};
    pub use crate::model::FrameModel;
    pub use crate::results::{
        AnalysisResults, AnalysisSummary, EndForces, MemberForces, NodeDisplacement, Reactions,
    };
}

#[cfg(feature = "wasm")]
pub mod wasm;

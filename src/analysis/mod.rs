//! Linear static analysis: assembly, solution and post-processing

pub mod assembly;
pub mod postprocess;
pub mod solver;

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::dof::{dof_owner, node_dofs, DofPartition};
use crate::error::{FEAError, FEAResult};
use crate::model::FrameModel;
use crate::results::{AnalysisResults, MemberForces, NodeDisplacement, Reactions};

pub use assembly::GlobalSystem;
pub use solver::Solution;

/// Options for structural analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Largest accepted node count; dense storage grows with its square
    pub max_nodes: usize,
    /// Keep the full and reduced stiffness matrices in the results
    pub include_matrices: bool,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Equilibrium tolerance relative to the largest applied force
    pub statics_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_nodes: 1000,
            include_matrices: false,
            check_statics: true,
            statics_tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Keep stiffness matrices for diagnostics
    pub fn with_matrices(mut self) -> Self {
        self.include_matrices = true;
        self
    }

    /// Set the node limit
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Set equilibrium tolerance
    pub fn with_statics_tolerance(mut self, tol: f64) -> Self {
        self.statics_tolerance = tol;
        self
    }
}

/// Run a full linear static analysis of `model`
///
/// Every call rebuilds the global system from scratch; nothing is cached on
/// the model between runs.
pub fn analyze(model: &FrameModel, options: &AnalysisOptions) -> FEAResult<AnalysisResults> {
    let num_nodes = model.nodes().len();
    if num_nodes > options.max_nodes {
        return Err(FEAError::ModelTooLarge {
            nodes: num_nodes,
            limit: options.max_nodes,
        });
    }

    let system = GlobalSystem::assemble(model)?;
    let partition = DofPartition::from_nodes(model.nodes());
    debug!(
        "Assembled {} DOFs: {} free, {} fixed",
        system.num_dofs(),
        partition.free.len(),
        partition.fixed.len()
    );

    let solution = solver::solve_displacements(model, &system, &partition)?;
    let u = &solution.displacements;

    let reactions = postprocess::reactions(&system, &partition, u)?;
    let end_forces = postprocess::member_forces(model, u)?;

    let mut results = AnalysisResults {
        total_dofs: system.num_dofs(),
        free_dofs: partition.free.len(),
        ..Default::default()
    };

    for node in model.nodes() {
        let dofs = node_dofs(node.index());
        results
            .displacements
            .insert(node.id.clone(), NodeDisplacement::from_array(dofs.map(|d| u[d])));
    }

    let mut reaction_map: BTreeMap<String, [f64; 3]> = BTreeMap::new();
    for (&dof, &value) in partition.fixed.iter().zip(reactions.iter()) {
        let (node_index, slot) = dof_owner(dof);
        if let Some(node) = model.node_by_index(node_index) {
            reaction_map.entry(node.id.clone()).or_insert([0.0; 3])[slot.slot()] = value;
        }
    }
    results.reactions = reaction_map
        .into_iter()
        .map(|(id, r)| (id, Reactions::from_array(r)))
        .collect();

    for (member, f) in model.members().iter().zip(end_forces.iter()) {
        results.member_forces.insert(
            member.id.clone(),
            MemberForces::from_local(f, member.length(), member.load().copied()),
        );
    }

    results.equilibrium_residual = postprocess::equilibrium_residual(&system, &partition, &reactions);
    if options.check_statics {
        let scale = system.effective_load.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        let [rx, ry] = results.equilibrium_residual;
        if rx.abs() > options.statics_tolerance * scale || ry.abs() > options.statics_tolerance * scale {
            warn!("Statics check failed: residual FX = {rx:e}, FY = {ry:e}");
        }
    }

    if options.include_matrices {
        results.stiffness_matrix = Some(system.stiffness);
        results.reduced_stiffness_matrix = Some(solution.reduced_stiffness);
    }

    info!(
        "Analysis complete: {} nodes, {} members, {} free DOFs",
        num_nodes,
        model.members().len(),
        results.free_dofs
    );
    Ok(results)
}

//! Reduced system solve

use log::debug;

use super::GlobalSystem;
use crate::dof::{dof_owner, DofPartition};
use crate::error::{FEAError, FEAResult};
use crate::math::{self, Mat, PIVOT_TOLERANCE};
use crate::model::FrameModel;

/// Displacements recovered from the reduced system
#[derive(Debug, Clone)]
pub struct Solution {
    /// Full 3N displacement vector; fixed and inactive DOFs are zero
    pub displacements: math::Vec,
    /// `K[free, free]`
    pub reduced_stiffness: Mat,
    /// Free DOFs no element stiffens and no load acts on
    pub inactive: Vec<usize>,
}

/// Solve `K_ff · U_f = P_f` and scatter back into the full vector
pub fn solve_displacements(
    model: &FrameModel,
    system: &GlobalSystem,
    partition: &DofPartition,
) -> FEAResult<Solution> {
    let free = &partition.free;
    let k_ff = math::extract_submatrix(&system.stiffness, free, free);
    let p_f = math::extract_subvector(&system.effective_load, free);
    let mut displacements = math::Vec::zeros(system.num_dofs());

    if free.is_empty() {
        debug!("All DOFs restrained, displacements are zero");
        return Ok(Solution {
            displacements,
            reduced_stiffness: k_ff,
            inactive: Vec::new(),
        });
    }

    let k_tol = PIVOT_TOLERANCE * math::max_abs(&system.stiffness);
    let p_tol = PIVOT_TOLERANCE * p_f.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

    let mut active = Vec::with_capacity(free.len());
    let mut inactive = Vec::new();
    for (i, &dof) in free.iter().enumerate() {
        let stiffened = k_ff.row(i).iter().any(|v| v.abs() > k_tol);
        if stiffened {
            active.push(i);
        } else if p_f[i].abs() > p_tol {
            return Err(FEAError::UnstableStructure(format!(
                "{} carries load but has no stiffness",
                describe_dof(model, dof)
            )));
        } else {
            inactive.push(dof);
        }
    }
    if !inactive.is_empty() {
        debug!("{} unloaded DOFs without stiffness held at zero", inactive.len());
    }

    if !active.is_empty() {
        let k_aa = math::extract_submatrix(&k_ff, &active, &active);
        let p_a = math::extract_subvector(&p_f, &active);
        let u_a = math::solve(&k_aa, &p_a).map_err(|e| match e {
            FEAError::Singular { column } => {
                let dof = active.get(column).map(|&i| free[i]).unwrap_or(free[active[0]]);
                FEAError::UnstableStructure(format!(
                    "singular stiffness matrix, mechanism at {}",
                    describe_dof(model, dof)
                ))
            }
            other => other,
        })?;

        for (&i, &value) in active.iter().zip(u_a.iter()) {
            displacements[free[i]] = value;
        }
    }

    Ok(Solution {
        displacements,
        reduced_stiffness: k_ff,
        inactive,
    })
}

fn describe_dof(model: &FrameModel, dof: usize) -> String {
    let (node_index, slot) = dof_owner(dof);
    match model.node_by_index(node_index) {
        Some(node) => format!("node '{}' {}", node.id, slot.label()),
        None => format!("DOF {dof}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Support;
    use crate::loads::NodeLoad;
    use approx::assert_relative_eq;

    fn solve(model: &FrameModel) -> FEAResult<Solution> {
        let system = GlobalSystem::assemble(model)?;
        let partition = DofPartition::from_nodes(model.nodes());
        solve_displacements(model, &system, &partition)
    }

    #[test]
    fn test_spring_transverse_dofs_are_inactive() {
        let mut model = FrameModel::new();
        model.add_node("a", 0.0, 0.0).unwrap();
        model.add_node("b", 1.0, 0.0).unwrap();
        model.add_spring("s", "a", "b", 100.0).unwrap();
        model.add_support("a", Support::fixed()).unwrap();
        model.add_nodal_load("b", NodeLoad::force(50.0, 0.0)).unwrap();

        let solution = solve(&model).unwrap();
        assert_relative_eq!(solution.displacements[3], 0.5, epsilon = 1e-12);
        assert_eq!(solution.inactive, vec![4, 5]);
        assert_eq!(solution.reduced_stiffness.shape(), (3, 3));
    }

    #[test]
    fn test_loaded_inactive_dof_is_unstable() {
        let mut model = FrameModel::new();
        model.add_node("a", 0.0, 0.0).unwrap();
        model.add_node("b", 1.0, 0.0).unwrap();
        model.add_spring("s", "a", "b", 100.0).unwrap();
        model.add_support("a", Support::fixed()).unwrap();
        model.add_nodal_load("b", NodeLoad::force(0.0, -10.0)).unwrap();

        let err = solve(&model).unwrap_err();
        assert!(matches!(err, FEAError::UnstableStructure(ref msg) if msg.contains("node 'b' DY")));
    }

    #[test]
    fn test_free_floating_member_is_unstable() {
        let mut model = FrameModel::new();
        model.add_node("a", 0.0, 0.0).unwrap();
        model.add_node("b", 3.0, 0.0).unwrap();
        model.add_frame("m", "a", "b", 2e9, 2e7).unwrap();

        assert!(matches!(solve(&model), Err(FEAError::UnstableStructure(_))));
    }

    #[test]
    fn test_fully_restrained_model() {
        let mut model = FrameModel::new();
        model.add_node("a", 0.0, 0.0).unwrap();
        model.add_support("a", Support::fixed()).unwrap();
        model.add_nodal_load("a", NodeLoad::force(1.0, 1.0)).unwrap();

        let solution = solve(&model).unwrap();
        assert!(solution.displacements.iter().all(|&u| u == 0.0));
    }
}

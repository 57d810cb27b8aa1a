//! Reaction and member end-force recovery

use super::GlobalSystem;
use crate::dof::{Dof, DofPartition, DOFS_PER_NODE};
use crate::error::FEAResult;
use crate::math::{self, Vec6};
use crate::model::FrameModel;

/// Support reactions, one per fixed DOF in `partition.fixed` order
///
/// `R = K[fixed, :] · U - P[fixed]` with `P` the effective load, so loads
/// applied directly at a restrained DOF are taken by the support.
pub fn reactions(
    system: &GlobalSystem,
    partition: &DofPartition,
    u: &math::Vec,
) -> FEAResult<math::Vec> {
    if partition.fixed.is_empty() {
        return Ok(math::Vec::zeros(0));
    }

    let all: Vec<usize> = (0..system.num_dofs()).collect();
    let k_sf = math::extract_submatrix(&system.stiffness, &partition.fixed, &all);
    let internal = math::multiply_vector(&k_sf, u)?;
    let applied = math::extract_subvector(&system.effective_load, &partition.fixed);
    Ok(internal - applied)
}

/// Local end forces `[N_i, V_i, M_i, N_j, V_j, M_j]` of every member
///
/// `f = k_local · T · u_global - eq_local`
pub fn member_forces(model: &FrameModel, u: &math::Vec) -> FEAResult<Vec<Vec6>> {
    model
        .members()
        .iter()
        .map(|member| {
            let dofs = member.dofs();
            let u_global = Vec6::from_fn(|i, _| u[dofs[i]]);
            let u_local = member.transformation() * u_global;
            Ok(member.local_stiffness() * u_local - member.equivalent_load())
        })
        .collect()
}

/// Global `[ΣFX, ΣFY]` of reactions plus applied loads; zero at equilibrium
pub fn equilibrium_residual(
    system: &GlobalSystem,
    partition: &DofPartition,
    reactions: &math::Vec,
) -> [f64; 2] {
    let mut residual = [0.0; 2];
    for (dof, load) in system.effective_load.iter().enumerate() {
        match dof % DOFS_PER_NODE {
            s if s == Dof::Dx.slot() => residual[0] += load,
            s if s == Dof::Dy.slot() => residual[1] += load,
            _ => {}
        }
    }
    for (&dof, r) in partition.fixed.iter().zip(reactions.iter()) {
        match dof % DOFS_PER_NODE {
            s if s == Dof::Dx.slot() => residual[0] += r,
            s if s == Dof::Dy.slot() => residual[1] += r,
            _ => {}
        }
    }
    residual
}

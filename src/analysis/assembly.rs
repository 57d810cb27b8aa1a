//! Global stiffness matrix and load vector assembly

use crate::dof::node_dofs;
use crate::error::FEAResult;
use crate::math::{self, Mat, Vec};
use crate::model::FrameModel;

/// The assembled, unreduced system `K · U = P`
#[derive(Debug, Clone)]
pub struct GlobalSystem {
    /// Global stiffness matrix, 3N x 3N
    pub stiffness: Mat,
    /// Loads applied directly at nodes
    pub direct_load: Vec,
    /// Equivalent nodal loads from member loads
    pub equivalent_load: Vec,
    /// `direct_load + equivalent_load`
    pub effective_load: Vec,
}

impl GlobalSystem {
    /// Assemble stiffness and loads for `model`
    pub fn assemble(model: &FrameModel) -> FEAResult<Self> {
        let stiffness = assemble_stiffness(model)?;
        let (direct_load, equivalent_load) = assemble_loads(model)?;
        let effective_load = &direct_load + &equivalent_load;
        Ok(Self {
            stiffness,
            direct_load,
            equivalent_load,
            effective_load,
        })
    }

    pub fn num_dofs(&self) -> usize {
        self.stiffness.nrows()
    }

    /// Largest `|K[i][j] - K[j][i]|`
    pub fn max_asymmetry(&self) -> f64 {
        let k = &self.stiffness;
        let n = k.nrows();
        let mut worst = 0.0_f64;
        for i in 0..n {
            for j in (i + 1)..n {
                worst = worst.max((k[(i, j)] - k[(j, i)]).abs());
            }
        }
        worst
    }
}

/// Scatter every member's global 6x6 block into K
pub fn assemble_stiffness(model: &FrameModel) -> FEAResult<Mat> {
    let n = model.num_dofs();
    let mut k = Mat::zeros(n, n);

    for member in model.members() {
        let dofs = member.dofs();
        math::scatter_add(&mut k, &member.global_stiffness(), &dofs, &dofs)?;
    }

    Ok(k)
}

/// Build the direct and equivalent nodal load vectors
pub fn assemble_loads(model: &FrameModel) -> FEAResult<(Vec, Vec)> {
    let n = model.num_dofs();
    let mut direct = Vec::zeros(n);
    let mut equivalent = Vec::zeros(n);

    for node in model.nodes().iter().filter(|n| !n.load.is_zero()) {
        math::scatter_add_vector(&mut direct, &node.load.as_array(), &node_dofs(node.index()))?;
    }

    for member in model.members().iter().filter(|m| m.load().is_some()) {
        let eq = member.global_equivalent_load();
        math::scatter_add_vector(&mut equivalent, eq.as_slice(), &member.dofs())?;
    }

    Ok((direct, equivalent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{MemberLoad, NodeLoad};
    use approx::assert_relative_eq;

    #[test]
    fn test_shared_node_accumulates() {
        let mut model = FrameModel::new();
        model.add_node("a", 0.0, 0.0).unwrap();
        model.add_node("b", 2.0, 0.0).unwrap();
        model.add_node("c", 4.0, 0.0).unwrap();
        model.add_spring("s1", "a", "b", 100.0).unwrap();
        model.add_spring("s2", "b", "c", 50.0).unwrap();

        let k = assemble_stiffness(&model).unwrap();
        assert_eq!(k.shape(), (9, 9));
        assert_relative_eq!(k[(3, 3)], 150.0);
        assert_relative_eq!(k[(0, 3)], -100.0);
        assert_relative_eq!(k[(3, 6)], -50.0);
        assert_relative_eq!(k[(4, 4)], 0.0);
    }

    #[test]
    fn test_loads_split_direct_and_equivalent() {
        let mut model = FrameModel::new();
        model.add_node("a", 0.0, 0.0).unwrap();
        model.add_node("b", 5.0, 0.0).unwrap();
        model.add_frame("m", "a", "b", 2e9, 2e7).unwrap();
        model.add_nodal_load("b", NodeLoad::new(3.0, 0.0, 1.0)).unwrap();
        model.add_member_load("m", MemberLoad::uniform(-10.0)).unwrap();

        let system = GlobalSystem::assemble(&model).unwrap();
        assert_relative_eq!(system.direct_load[3], 3.0);
        assert_relative_eq!(system.equivalent_load[1], -25.0);
        assert_relative_eq!(system.equivalent_load[2], -250.0 / 12.0);
        assert_relative_eq!(system.effective_load[5], 1.0 + 250.0 / 12.0);
        assert_eq!(system.max_asymmetry(), 0.0);
    }
}

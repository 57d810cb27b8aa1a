//! Degree-of-freedom numbering
//!
//! Every node owns three DOFs in a fixed order: horizontal translation,
//! vertical translation, rotation. Nodes carry a dense 1-based index in
//! creation order and all global DOF indices are derived here.

use serde::{Deserialize, Serialize};

use crate::elements::Node;

/// Number of DOFs per node
pub const DOFS_PER_NODE: usize = 3;

/// Local DOF slot of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dof {
    /// Translation in global X
    Dx = 0,
    /// Translation in global Y
    Dy = 1,
    /// Rotation about the out-of-plane axis
    Rz = 2,
}

impl Dof {
    pub const ALL: [Dof; 3] = [Dof::Dx, Dof::Dy, Dof::Rz];

    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Dof::Dx => "DX",
            Dof::Dy => "DY",
            Dof::Rz => "RZ",
        }
    }
}

/// Global DOF index for a 1-based node index and a local slot
pub fn dof_index(node_index: usize, slot: usize) -> usize {
    debug_assert!(node_index >= 1, "node indices are 1-based");
    debug_assert!(slot < DOFS_PER_NODE);
    (node_index - 1) * DOFS_PER_NODE + slot
}

/// The three global DOFs of a node, in slot order
pub fn node_dofs(node_index: usize) -> [usize; 3] {
    [
        dof_index(node_index, 0),
        dof_index(node_index, 1),
        dof_index(node_index, 2),
    ]
}

/// Scatter indices of a member: `[xi, yi, ri, xj, yj, rj]`
pub fn element_dofs(i_index: usize, j_index: usize) -> [usize; 6] {
    let [xi, yi, ri] = node_dofs(i_index);
    let [xj, yj, rj] = node_dofs(j_index);
    [xi, yi, ri, xj, yj, rj]
}

/// Inverse of [`dof_index`]: `(1-based node index, slot)`
pub fn dof_owner(dof: usize) -> (usize, Dof) {
    let slot = dof % DOFS_PER_NODE;
    let node_index = dof / DOFS_PER_NODE + 1;
    // slot < 3 by construction
    let slot = Dof::from_slot(slot).unwrap_or(Dof::Dx);
    (node_index, slot)
}

/// Free/fixed split of all DOFs, both in ascending global order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DofPartition {
    pub free: Vec<usize>,
    pub fixed: Vec<usize>,
}

impl DofPartition {
    /// Build the partition from node support flags
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut partition = Self::default();
        for node in nodes {
            let restraints = node.support.map(|s| s.as_array()).unwrap_or([false; 3]);
            for (slot, &fixed) in restraints.iter().enumerate() {
                let dof = dof_index(node.index, slot);
                if fixed {
                    partition.fixed.push(dof);
                } else {
                    partition.free.push(dof);
                }
            }
        }
        partition
    }

    /// Total number of DOFs covered
    pub fn len(&self) -> usize {
        self.free.len() + self.fixed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Support;

    #[test]
    fn test_dof_index_layout() {
        assert_eq!(dof_index(1, 0), 0);
        assert_eq!(dof_index(1, 2), 2);
        assert_eq!(dof_index(3, 1), 7);
        assert_eq!(element_dofs(2, 1), [3, 4, 5, 0, 1, 2]);
    }

    #[test]
    fn test_dof_owner_roundtrip() {
        assert_eq!(dof_owner(7), (3, Dof::Dy));
        assert_eq!(dof_owner(0), (1, Dof::Dx));
        assert_eq!(dof_owner(5), (2, Dof::Rz));
    }

    #[test]
    fn test_partition_covers_all_dofs() {
        let mut n1 = Node::new("n1", 0.0, 0.0, 1);
        n1.support = Some(Support::pinned());
        let n2 = Node::new("n2", 1.0, 0.0, 2);
        let mut n3 = Node::new("n3", 2.0, 0.0, 3);
        n3.support = Some(Support::roller());

        let p = DofPartition::from_nodes(&[n1, n2, n3]);
        assert_eq!(p.fixed, vec![0, 1, 7]);
        assert_eq!(p.free, vec![2, 3, 4, 5, 6, 8]);
        assert_eq!(p.len(), 9);
    }
}

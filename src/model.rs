//! Frame model - container for the planar structure definition

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisOptions};
use crate::dof::DOFS_PER_NODE;
use crate::elements::{ElementKind, Geometry, Member, Node, Support};
use crate::error::{FEAError, FEAResult};
use crate::loads::{MemberLoad, MemberLoadKind, NodeLoad};
use crate::results::AnalysisResults;

/// The planar structural model
///
/// Nodes and members are stored in creation order; the id lookups are only
/// ever appended to, so a node's index never changes once assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameModel {
    nodes: Vec<Node>,
    members: Vec<Member>,
    node_lookup: HashMap<String, usize>,
    member_lookup: HashMap<String, usize>,
}

impl FrameModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node, returning its 1-based index
    pub fn add_node(&mut self, id: &str, x: f64, y: f64) -> FEAResult<usize> {
        if self.node_lookup.contains_key(id) {
            return Err(FEAError::DuplicateId(id.to_string()));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(FEAError::InvalidInput(format!(
                "node '{id}' has non-finite coordinates ({x}, {y})"
            )));
        }

        let index = self.nodes.len() + 1;
        self.nodes.push(Node::new(id, x, y, index));
        self.node_lookup.insert(id.to_string(), index - 1);
        Ok(index)
    }

    /// Add a rigid frame member with axial stiffness `ea` and bending stiffness `ei`
    pub fn add_frame(&mut self, id: &str, i_node: &str, j_node: &str, ea: f64, ei: f64) -> FEAResult<()> {
        self.add_member(id, i_node, j_node, ElementKind::Frame { ea, ei })
    }

    /// Add a pin-ended truss bar (frame formulation without bending stiffness)
    pub fn add_truss(&mut self, id: &str, i_node: &str, j_node: &str, ea: f64) -> FEAResult<()> {
        self.add_member(id, i_node, j_node, ElementKind::Frame { ea, ei: 0.0 })
    }

    /// Add a linear axial spring of stiffness `k`
    pub fn add_spring(&mut self, id: &str, i_node: &str, j_node: &str, k: f64) -> FEAResult<()> {
        self.add_member(id, i_node, j_node, ElementKind::Spring { k })
    }

    /// Add a member of any kind between two existing nodes
    pub fn add_member(
        &mut self,
        id: &str,
        i_node: &str,
        j_node: &str,
        kind: ElementKind,
    ) -> FEAResult<()> {
        let i = self.node_position(i_node)?;
        let j = self.node_position(j_node)?;
        if self.member_lookup.contains_key(id) {
            return Err(FEAError::DuplicateId(id.to_string()));
        }
        validate_kind(id, &kind)?;

        let member = Member::new(id, &self.nodes[i], &self.nodes[j], kind);
        let coincident = member.is_coincident();
        self.member_lookup.insert(id.to_string(), self.members.len());
        self.members.push(member);

        if self.members.iter().any(Member::is_coincident) {
            self.resize_coincident_members();
        }
        let length = self.members[self.members.len() - 1].length();
        if coincident {
            warn!("Member '{id}' between '{i_node}' and '{j_node}' has zero length, using {length}");
        }
        debug!(
            "Member '{}' ({}) {} -> {}, L = {}",
            id,
            kind.label(),
            i_node,
            j_node,
            length
        );
        Ok(())
    }

    /// Size coincident members relative to the longest real member, so their
    /// stiffness stays on the scale of the rest of the model
    fn resize_coincident_members(&mut self) {
        let reference = self
            .members
            .iter()
            .filter(|m| !m.is_coincident())
            .map(Member::length)
            .fold(0.0_f64, f64::max);
        let length = Geometry::coincident_length(reference);
        for member in self.members.iter_mut().filter(|m| m.is_coincident()) {
            member.geometry.length = length;
        }
    }

    /// Set the support condition at a node, replacing any previous one
    ///
    /// A support without restraints clears the node's support.
    pub fn add_support(&mut self, node_id: &str, support: Support) -> FEAResult<()> {
        let i = self.node_position(node_id)?;
        debug!("Support at '{}' restrains {} DOFs", node_id, support.num_restrained());
        self.nodes[i].support = support.is_supported().then_some(support);
        Ok(())
    }

    /// Add a direct load to a node; loads on the same node accumulate
    pub fn add_nodal_load(&mut self, node_id: &str, load: NodeLoad) -> FEAResult<()> {
        let i = self.node_position(node_id)?;
        if !load.as_array().iter().all(|v| v.is_finite()) {
            return Err(FEAError::InvalidInput(format!(
                "load on node '{node_id}' is not finite"
            )));
        }
        self.nodes[i].load += load;
        Ok(())
    }

    /// Attach a load in local member axes, replacing any previous member load
    pub fn add_member_load(&mut self, member_id: &str, load: MemberLoad) -> FEAResult<()> {
        let m = self.member_position(member_id)?;
        self.members[m].set_load(load)
    }

    /// Attach a load given by global components `(gx, gy)`
    pub fn add_global_member_load(
        &mut self,
        member_id: &str,
        kind: MemberLoadKind,
        gx: f64,
        gy: f64,
    ) -> FEAResult<()> {
        let m = self.member_position(member_id)?;
        let load = MemberLoad::from_global(kind, gx, gy, &self.members[m].geometry);
        self.members[m].set_load(load)
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Run linear static analysis with default options
    pub fn analyze(&self) -> FEAResult<AnalysisResults> {
        analysis::analyze(self, &AnalysisOptions::default())
    }

    /// Run linear static analysis with custom options
    pub fn analyze_with(&self, options: &AnalysisOptions) -> FEAResult<AnalysisResults> {
        analysis::analyze(self, options)
    }

    // ========================
    // Accessors
    // ========================

    /// Nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Members in creation order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_lookup.get(id).map(|&i| &self.nodes[i])
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.member_lookup.get(id).map(|&i| &self.members[i])
    }

    /// Node with a given 1-based index
    pub fn node_by_index(&self, index: usize) -> Option<&Node> {
        index.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    /// Total number of DOFs, always 3 per node
    pub fn num_dofs(&self) -> usize {
        self.nodes.len() * DOFS_PER_NODE
    }

    fn node_position(&self, id: &str) -> FEAResult<usize> {
        self.node_lookup
            .get(id)
            .copied()
            .ok_or_else(|| FEAError::UnknownNode(id.to_string()))
    }

    fn member_position(&self, id: &str) -> FEAResult<usize> {
        self.member_lookup
            .get(id)
            .copied()
            .ok_or_else(|| FEAError::UnknownElement(id.to_string()))
    }
}

fn validate_kind(id: &str, kind: &ElementKind) -> FEAResult<()> {
    let valid = match *kind {
        ElementKind::Frame { ea, ei } => {
            ea.is_finite() && ea > 0.0 && ei.is_finite() && ei >= 0.0
        }
        ElementKind::Spring { k } => k.is_finite() && k > 0.0,
    };
    if valid {
        Ok(())
    } else {
        Err(FEAError::InvalidInput(format!(
            "member '{id}' has invalid stiffness properties {kind:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_model() -> FrameModel {
        let mut model = FrameModel::new();
        model.add_node("n1", 0.0, 0.0).unwrap();
        model.add_node("n2", 4.0, 0.0).unwrap();
        model
    }

    #[test]
    fn test_node_indices_follow_creation_order() {
        let mut model = two_node_model();
        assert_eq!(model.add_node("n3", 8.0, 0.0).unwrap(), 3);
        assert_eq!(model.node("n2").unwrap().index(), 2);
        assert_eq!(model.node_by_index(3).unwrap().id, "n3");
        assert!(model.node_by_index(0).is_none());
        assert_eq!(model.num_dofs(), 9);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut model = two_node_model();
        assert!(matches!(model.add_node("n1", 1.0, 1.0), Err(FEAError::DuplicateId(_))));

        model.add_frame("m1", "n1", "n2", 1e9, 1e6).unwrap();
        assert!(matches!(
            model.add_spring("m1", "n1", "n2", 10.0),
            Err(FEAError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_unknown_references() {
        let mut model = two_node_model();
        assert!(matches!(
            model.add_frame("m1", "n1", "nX", 1e9, 1e6),
            Err(FEAError::UnknownNode(id)) if id == "nX"
        ));
        assert!(matches!(
            model.add_support("nX", Support::fixed()),
            Err(FEAError::UnknownNode(_))
        ));
        assert!(matches!(
            model.add_member_load("mX", MemberLoad::uniform(1.0)),
            Err(FEAError::UnknownElement(_))
        ));
    }

    #[test]
    fn test_invalid_properties_rejected() {
        let mut model = two_node_model();
        assert!(model.add_frame("m1", "n1", "n2", 0.0, 1.0).is_err());
        assert!(model.add_frame("m2", "n1", "n2", 1.0, -1.0).is_err());
        assert!(model.add_spring("m3", "n1", "n2", f64::INFINITY).is_err());
        assert!(model.add_node("bad", f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_support_replaces_and_loads_accumulate() {
        let mut model = two_node_model();
        model.add_support("n1", Support::fixed()).unwrap();
        model.add_support("n1", Support::roller()).unwrap();
        assert_eq!(model.node("n1").unwrap().restraints(), [false, true, false]);
        model.add_support("n1", Support::default()).unwrap();
        assert!(model.node("n1").unwrap().support.is_none());

        model.add_nodal_load("n2", NodeLoad::force(1.0, 2.0)).unwrap();
        model.add_nodal_load("n2", NodeLoad::new(1.0, 0.0, 5.0)).unwrap();
        assert_eq!(model.node("n2").unwrap().load.as_array(), [2.0, 2.0, 5.0]);
    }

    #[test]
    fn test_coincident_member_follows_longest_member() {
        let mut model = two_node_model();
        model.add_node("n2b", 4.0, 0.0).unwrap();
        model.add_node("n3", 4.0, 10.0).unwrap();
        model.add_frame("link", "n2", "n2b", 1e9, 1e6).unwrap();
        assert_eq!(model.member("link").unwrap().length(), 0.01);

        model.add_frame("m1", "n1", "n2", 1e9, 1e6).unwrap();
        model.add_frame("m2", "n2b", "n3", 1e9, 1e6).unwrap();
        let link = model.member("link").unwrap();
        assert!(link.is_coincident());
        assert!((link.length() - 0.1).abs() < 1e-15);
        assert_eq!(model.member("m1").unwrap().length(), 4.0);
    }

    #[test]
    fn test_member_load_replaces() {
        let mut model = two_node_model();
        model.add_frame("m1", "n1", "n2", 1e9, 1e6).unwrap();
        model.add_member_load("m1", MemberLoad::uniform(-10.0)).unwrap();
        model.add_member_load("m1", MemberLoad::point(-5.0, None)).unwrap();

        let member = model.member("m1").unwrap();
        assert_eq!(member.load().unwrap().location(), Some(2.0));
        assert!((member.equivalent_load()[1] + 2.5).abs() < 1e-12);
    }
}

//! JSON contract between the solver and UI / reporting layers
//!
//! Input is a [`StructureDefinition`]; output is always an [`AnalysisOutput`].
//! Failures never escape as Rust errors here: they come back with
//! `isStable = false` and the error text in `message`.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::elements::{ElementKind, Support};
use crate::error::{FEAError, FEAResult};
use crate::loads::{MemberLoadKind, NodeLoad};
use crate::math::Mat;
use crate::model::FrameModel;
use crate::results::{AnalysisSummary, MemberForces, NodeDisplacement, Reactions};

pub const DEFAULT_E_MODULUS: f64 = 200e9;
pub const DEFAULT_AREA: f64 = 0.01;
pub const DEFAULT_MOMENT_INERTIA: f64 = 0.0001;
pub const DEFAULT_SPRING_CONSTANT: f64 = 100.0;

// ========================
// Input Data Structures
// ========================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureDefinition {
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub members: Vec<MemberData>,
    #[serde(default)]
    pub supports: Vec<SupportData>,
    #[serde(default)]
    pub loads: Vec<LoadData>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Beam,
    Truss,
    Spring,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberData {
    pub id: String,
    pub start_node_id: String,
    pub end_node_id: String,
    #[serde(rename = "type")]
    pub member_type: MemberType,
    #[serde(default)]
    pub e_modulus: Option<f64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub moment_inertia: Option<f64>,
    #[serde(default)]
    pub spring_constant: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportType {
    Pin,
    Roller,
    Fixed,
}

impl SupportType {
    pub fn restraints(self) -> Support {
        match self {
            SupportType::Pin => Support::pinned(),
            SupportType::Roller => Support::roller(),
            SupportType::Fixed => Support::fixed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportData {
    pub node_id: String,
    #[serde(rename = "type")]
    pub support_type: SupportType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadType {
    NodalPoint,
    MemberPoint,
    MemberDistributed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    #[default]
    Uniform,
    Triangular,
}

/// A load record; `magnitudeX`/`magnitudeY` are global components
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadData {
    #[serde(rename = "type")]
    pub load_type: LoadType,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub magnitude_x: f64,
    #[serde(default)]
    pub magnitude_y: f64,
    #[serde(default)]
    pub moment: f64,
    #[serde(default)]
    pub location: Option<f64>,
    #[serde(default)]
    pub distribution: Distribution,
}

impl MemberData {
    /// Stiffness formulation with defaults filled in
    pub fn kind(&self) -> FEAResult<ElementKind> {
        let e = self.e_modulus.unwrap_or(DEFAULT_E_MODULUS);
        let a = self.area.unwrap_or(DEFAULT_AREA);
        let i = self.moment_inertia.unwrap_or(DEFAULT_MOMENT_INERTIA);

        match self.member_type {
            MemberType::Spring => Ok(ElementKind::Spring {
                k: self.spring_constant.unwrap_or(DEFAULT_SPRING_CONSTANT),
            }),
            MemberType::Beam | MemberType::Truss => {
                if !(e > 0.0 && a > 0.0) {
                    return Err(FEAError::InvalidInput(format!(
                        "member '{}' needs positive eModulus and area, got {e} and {a}",
                        self.id
                    )));
                }
                let i = if self.member_type == MemberType::Truss { 0.0 } else { i };
                Ok(ElementKind::Frame { ea: e * a, ei: e * i })
            }
        }
    }
}

impl StructureDefinition {
    /// Parse a structure definition from JSON
    pub fn from_json(json: &str) -> FEAResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the model: nodes, then members, supports and loads
    pub fn to_model(&self) -> FEAResult<FrameModel> {
        let mut model = FrameModel::new();

        for node in &self.nodes {
            model.add_node(&node.id, node.x, node.y)?;
        }

        for member in &self.members {
            model.add_member(
                &member.id,
                &member.start_node_id,
                &member.end_node_id,
                member.kind()?,
            )?;
        }

        for support in &self.supports {
            model.add_support(&support.node_id, support.support_type.restraints())?;
        }

        for load in &self.loads {
            apply_load(&mut model, load)?;
        }

        Ok(model)
    }
}

fn apply_load(model: &mut FrameModel, load: &LoadData) -> FEAResult<()> {
    match load.load_type {
        LoadType::NodalPoint => {
            let node_id = load.node_id.as_deref().ok_or_else(|| {
                FEAError::InvalidInput("nodal_point load is missing nodeId".to_string())
            })?;
            model.add_nodal_load(
                node_id,
                NodeLoad::new(load.magnitude_x, load.magnitude_y, load.moment),
            )
        }
        LoadType::MemberPoint | LoadType::MemberDistributed => {
            let member_id = load.member_id.as_deref().ok_or_else(|| {
                FEAError::InvalidInput("member load is missing memberId".to_string())
            })?;
            if load.moment != 0.0 {
                return Err(FEAError::InvalidInput(format!(
                    "moment loads on member '{member_id}' are not supported, apply them at a node"
                )));
            }

            let kind = match (load.load_type, load.distribution) {
                (LoadType::MemberPoint, _) => MemberLoadKind::Point {
                    location: load.location,
                },
                (_, Distribution::Uniform) => MemberLoadKind::Uniform,
                (_, Distribution::Triangular) => MemberLoadKind::Triangular,
            };
            model.add_global_member_load(member_id, kind, load.magnitude_x, load.magnitude_y)
        }
    }
}

// ========================
// Output Data Structures
// ========================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    pub displacements: BTreeMap<String, NodeDisplacement>,
    pub reactions: BTreeMap<String, Reactions>,
    pub member_forces: BTreeMap<String, MemberForces>,
    pub is_stable: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stiffness_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_stiffness_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<AnalysisSummary>,
}

impl AnalysisOutput {
    /// Failed analysis: no numeric results at all
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_stable: false,
            message: message.into(),
            ..Default::default()
        }
    }
}

fn matrix_rows(m: &Mat) -> Vec<Vec<f64>> {
    m.row_iter().map(|row| row.iter().copied().collect()).collect()
}

/// Analyze a structure definition
pub fn analyze_structure(definition: &StructureDefinition) -> AnalysisOutput {
    let run = || -> FEAResult<AnalysisOutput> {
        let model = definition.to_model()?;
        let results = model.analyze_with(&definition.options)?;
        let summary = results.summary();

        Ok(AnalysisOutput {
            stiffness_matrix: results.stiffness_matrix.as_ref().map(matrix_rows),
            reduced_stiffness_matrix: results.reduced_stiffness_matrix.as_ref().map(matrix_rows),
            displacements: results.displacements,
            reactions: results.reactions,
            member_forces: results.member_forces,
            is_stable: true,
            message: "Analysis completed successfully".to_string(),
            summary: Some(summary),
        })
    };

    run().unwrap_or_else(|e| {
        warn!("Analysis failed: {e}");
        AnalysisOutput::failure(e.to_string())
    })
}

/// Analyze a JSON structure definition, returning JSON
pub fn analyze_json(input: &str) -> String {
    let output = match StructureDefinition::from_json(input) {
        Ok(definition) => analyze_structure(&definition),
        Err(e) => AnalysisOutput::failure(format!("Failed to parse structure: {e}")),
    };

    serde_json::to_string(&output).unwrap_or_else(|e| serialization_failure(&e))
}

fn serialization_failure(error: &dyn std::fmt::Display) -> String {
    serde_json::json!({
        "isStable": false,
        "message": format!("Serialization failed: {error}"),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_defaults() {
        let member: MemberData = serde_json::from_str(
            r#"{"id":"m1","startNodeId":"a","endNodeId":"b","type":"beam"}"#,
        )
        .unwrap();
        assert_eq!(
            member.kind().unwrap(),
            ElementKind::Frame {
                ea: 200e9 * 0.01,
                ei: 200e9 * 0.0001
            }
        );
    }

    #[test]
    fn test_truss_drops_bending_stiffness() {
        let member: MemberData = serde_json::from_str(
            r#"{"id":"t","startNodeId":"a","endNodeId":"b","type":"truss","momentInertia":0.5}"#,
        )
        .unwrap();
        assert!(matches!(member.kind().unwrap(), ElementKind::Frame { ei, .. } if ei == 0.0));
    }

    #[test]
    fn test_spring_constant_default() {
        let member: MemberData = serde_json::from_str(
            r#"{"id":"s","startNodeId":"a","endNodeId":"b","type":"spring"}"#,
        )
        .unwrap();
        assert_eq!(member.kind().unwrap(), ElementKind::Spring { k: 100.0 });
    }

    #[test]
    fn test_load_parsing() {
        let load: LoadData = serde_json::from_str(
            r#"{"type":"member_distributed","memberId":"m","magnitudeX":0,"magnitudeY":-5,"distribution":"triangular"}"#,
        )
        .unwrap();
        assert_eq!(load.load_type, LoadType::MemberDistributed);
        assert_eq!(load.distribution, Distribution::Triangular);
        assert_eq!(load.moment, 0.0);
    }

    #[test]
    fn test_missing_ids_are_reported() {
        let json = r#"{
            "nodes": [{"id":"a","x":0,"y":0}],
            "loads": [{"type":"nodal_point","magnitudeX":1,"magnitudeY":0}]
        }"#;
        let output = analyze_structure(&StructureDefinition::from_json(json).unwrap());
        assert!(!output.is_stable);
        assert!(output.message.contains("nodeId"));
    }

    #[test]
    fn test_malformed_json() {
        let out: serde_json::Value = serde_json::from_str(&analyze_json("{not json")).unwrap();
        assert_eq!(out["isStable"], false);
        assert!(out["message"].as_str().unwrap().starts_with("Failed to parse structure"));
    }

    #[test]
    fn test_serialization_failure_is_valid_json() {
        let text = serialization_failure(&r#"key "x" must be a string"#);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["isStable"], false);
        assert_eq!(value["message"], r#"Serialization failed: key "x" must be a string"#);
    }
}

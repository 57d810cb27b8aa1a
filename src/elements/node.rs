//! Node - a joint of the planar structure

use serde::{Deserialize, Serialize};

use super::Support;
use crate::loads::NodeLoad;

/// A 2D node in the structural model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// External id (e.g. "n1")
    pub id: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,

    /// Dense 1-based index in creation order
    pub(crate) index: usize,

    /// Restraints, `None` means all DOFs free
    pub support: Option<Support>,

    /// Accumulated direct load
    pub load: NodeLoad,
}

impl Node {
    pub(crate) fn new(id: &str, x: f64, y: f64, index: usize) -> Self {
        Self {
            id: id.to_string(),
            x,
            y,
            index,
            support: None,
            load: NodeLoad::default(),
        }
    }

    /// 1-based creation index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Restraint flags `[DX, DY, RZ]`
    pub fn restraints(&self) -> [bool; 3] {
        self.support.map(|s| s.as_array()).unwrap_or([false; 3])
    }
}

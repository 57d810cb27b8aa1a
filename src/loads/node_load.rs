//! Node loads - forces and moments applied directly to nodes

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// A load applied directly to a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Force in X direction (N)
    pub fx: f64,
    /// Force in Y direction (N)
    pub fy: f64,
    /// Moment about the out-of-plane axis (N·m, counter-clockwise positive)
    pub mz: f64,
}

impl NodeLoad {
    /// Create a new node load with all components
    pub fn new(fx: f64, fy: f64, mz: f64) -> Self {
        Self { fx, fy, mz }
    }

    /// Create a force-only node load
    pub fn force(fx: f64, fy: f64) -> Self {
        Self::new(fx, fy, 0.0)
    }

    /// Create a moment-only node load
    pub fn moment(mz: f64) -> Self {
        Self::new(0.0, 0.0, mz)
    }

    /// Get the load as an array [FX, FY, MZ]
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.mz]
    }

    pub fn is_zero(&self) -> bool {
        self.fx == 0.0 && self.fy == 0.0 && self.mz == 0.0
    }
}

impl AddAssign for NodeLoad {
    fn add_assign(&mut self, other: Self) {
        self.fx += other.fx;
        self.fy += other.fy;
        self.mz += other.mz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_accumulate() {
        let mut total = NodeLoad::default();
        total += NodeLoad::force(1.0, -2.0);
        total += NodeLoad::new(0.5, 0.0, 3.0);
        assert_eq!(total.as_array(), [1.5, -2.0, 3.0]);
        assert!(!total.is_zero());
    }
}

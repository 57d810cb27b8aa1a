//! Support conditions

use serde::{Deserialize, Serialize};

/// Support conditions at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    pub dx: bool,
    /// Restrained in Y translation
    pub dy: bool,
    /// Restrained in rotation
    pub rz: bool,
}

impl Support {
    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self::with_restraints(true, true, true)
    }

    /// Create a pinned support (translations restrained, rotation free)
    pub fn pinned() -> Self {
        Self::with_restraints(true, true, false)
    }

    /// Create a roller support (Y translation restrained only)
    pub fn roller() -> Self {
        Self::with_restraints(false, true, false)
    }

    /// Create a support with specific restraints
    pub fn with_restraints(dx: bool, dy: bool, rz: bool) -> Self {
        Self { dx, dy, rz }
    }

    /// Restraint flags `[DX, DY, RZ]`
    pub fn as_array(&self) -> [bool; 3] {
        [self.dx, self.dy, self.rz]
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.dx || self.dy || self.rz
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.as_array().iter().filter(|&&r| r).count()
    }
}

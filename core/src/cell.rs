use serde::{Deserialize, Serialize};

use crate::Direction;

/// Beam color. Sources emit a color, prisms split white beams, and goals
/// require a specific color at the target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightColor {
    White,
    Red,
    Green,
    Blue,
}

/// Contents of a single board cell.
///
/// Mirror and prism angles are stored as raw degrees so that arbitrary
/// rotations survive a save/load cycle; the interaction rules only
/// distinguish the angle classes they care about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Mirror {
        angle_deg: u16,
        movable: bool,
        rotatable: bool,
    },
    Prism {
        angle_deg: u16,
        movable: bool,
        rotatable: bool,
    },
    Source {
        direction: Direction,
        color: LightColor,
    },
    Target,
    Obstacle,
}

impl Cell {
    /// A mirror the player may both move and rotate.
    pub const fn mirror(angle_deg: u16) -> Cell {
        Cell::Mirror {
            angle_deg,
            movable: true,
            rotatable: true,
        }
    }

    /// A prism the player may both move and rotate.
    pub const fn prism(angle_deg: u16) -> Cell {
        Cell::Prism {
            angle_deg,
            movable: true,
            rotatable: true,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether the player may relocate this element. Sources, targets, and
    /// obstacles are always fixed.
    pub const fn is_movable(self) -> bool {
        match self {
            Self::Mirror { movable, .. } | Self::Prism { movable, .. } => movable,
            _ => false,
        }
    }

    /// Whether the player may rotate this element.
    pub const fn is_rotatable(self) -> bool {
        match self {
            Self::Mirror { rotatable, .. } | Self::Prism { rotatable, .. } => rotatable,
            _ => false,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

use serde::{Deserialize, Serialize};
use trefoil_math::prelude::*;

/// Axis that a move rotates around.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum MoveAxis {
    /// Cardinal axis (0 = X, 1 = Y, 2 = Z).
    Cardinal(u8),
    /// Arbitrary unit axis, such as a pyraminx vertex or megaminx face
    /// normal.
    Vector {
        /// Index of the axis in the puzzle's axis list.
        index: usize,
        /// Unit vector of the axis.
        normal: Vec3,
    },
}
impl MoveAxis {
    /// Returns the index of the axis in the puzzle's axis list.
    pub fn index(self) -> usize {
        match self {
            MoveAxis::Cardinal(axis) => axis as usize,
            MoveAxis::Vector { index, .. } => index,
        }
    }

    /// Returns the unit vector of the axis.
    pub fn vector(self) -> Vec3 {
        match self {
            MoveAxis::Cardinal(axis) => cardinal_vector(axis),
            MoveAxis::Vector { normal, .. } => normal,
        }
    }
}

/// Which layer along an axis a move selects.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LayerSelector {
    /// Pieces whose coordinate along the axis equals this value.
    Layer(Float),
    /// Pieces at most this many layers from the tip (0 = tip only).
    Depth(u32),
    /// Pieces beyond the cut plane of the face.
    FacePlane,
}

/// Move descriptor.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Move {
    /// Axis to rotate around.
    pub axis: MoveAxis,
    /// Layer to rotate.
    pub selector: LayerSelector,
    /// Number of canonical twist angles to rotate by. Positive is
    /// counterclockwise looking down the axis toward the origin.
    pub dir: i32,
}
impl Move {
    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            dir: -self.dir,
            ..self
        }
    }

    /// Returns whether two moves rotate the same set of pieces.
    pub fn same_slice(&self, other: &Move) -> bool {
        self.axis.index() == other.axis.index()
            && match (self.selector, other.selector) {
                (LayerSelector::Layer(a), LayerSelector::Layer(b)) => approx_eq(&a, &b),
                (a, b) => a == b,
            }
    }

    /// Returns the rotation angle of the move in radians.
    pub fn angle(&self, twist_angle: Float) -> Float {
        twist_angle * self.dir as Float
    }
}

/// Named face or vertex to turn, before it is resolved against a puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseMove {
    /// Face or vertex name, such as `U` or `DBR`.
    pub name: String,
    /// Number of layers from the face or tip, counting the outermost layer as
    /// 1. `None` means the puzzle's default for `name`.
    pub depth: Option<u32>,
}
impl BaseMove {
    /// Constructs a base move with the default depth.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depth: None,
        }
    }
    /// Returns the same base move at an explicit depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }
}

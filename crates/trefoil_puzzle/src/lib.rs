//! Puzzle state and rotation algebra for the N×N×N cube, Pyraminx, and
//! Megaminx.
//!
//! A puzzle is a stateless [`PuzzleType`] plus a piece store (`Vec<Piece>`)
//! built by [`PuzzleType::create_pieces()`]. Moves mutate the piece store in
//! place and nothing else.

#[macro_use]
extern crate lazy_static;

mod config;
mod cube;
mod kind;
mod megaminx;
mod moves;
pub mod notation;
mod piece;
mod pyraminx;
mod rgb;
pub mod scramble;
mod traits;

#[cfg(test)]
mod tests;

/// Re-export of `rand_chacha`.
pub use rand_chacha;
/// Re-export of `trefoil_math`.
pub use trefoil_math;

pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use crate::config::{MAX_BORDER_WIDTH, MAX_SCRAMBLE_LENGTH, PuzzleConfig};
    pub use crate::cube::Cube;
    pub use crate::kind::PuzzleKind;
    pub use crate::megaminx::Megaminx;
    pub use crate::moves::{BaseMove, LayerSelector, Move, MoveAxis};
    pub use crate::notation::NotationError;
    pub use crate::piece::{BaryClass, Barycentric, ColorId, FaceVertices, Piece, Sticker};
    pub use crate::pyraminx::Pyraminx;
    pub use crate::rgb::Rgb;
    pub use crate::traits::PuzzleType;
}

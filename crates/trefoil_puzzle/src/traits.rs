use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::ops::RangeInclusive;

use rand_chacha::ChaCha8Rng;
use trefoil_math::prelude::*;

use crate::{
    BaseMove, ColorId, LayerSelector, Move, MoveAxis, Piece, PuzzleConfig, PuzzleKind, Rgb,
};

/// Capability set implemented by each puzzle topology.
///
/// Implementors are stateless unit structs; all mutable state lives in the
/// piece store passed to each method. No method panics on well-formed input:
/// moves that select no pieces are no-ops and undetectable faces return
/// `None`.
pub trait PuzzleType: fmt::Debug + Send + Sync {
    /// Returns the registry entry for this puzzle.
    fn kind(&self) -> PuzzleKind;
    /// Returns the human-friendly name of the puzzle.
    fn name(&self) -> &'static str;
    /// Returns the color of each [`ColorId`].
    fn palette(&self) -> &'static [Rgb];
    /// Returns the name of each world face, indexed the same way as
    /// [`PuzzleType::face_normals()`].
    fn face_names(&self) -> &'static [&'static str];
    /// Returns the outward unit normal of each world face.
    fn face_normals(&self) -> &'static [Vec3];
    /// Returns the unit vector of every move axis.
    fn axes(&self) -> &'static [Vec3];
    /// Returns the move axis at `index`, or `None` if it is out of range.
    fn move_axis(&self, index: usize) -> Option<MoveAxis>;
    /// Returns the rotation angle of a move with `dir = 1`, in radians.
    fn twist_angle(&self) -> Float;
    /// Returns the number of times a basic move must be applied to return to
    /// the starting state.
    fn twist_order(&self) -> u32;
    /// Returns the range of supported sizes.
    fn size_range(&self) -> RangeInclusive<u32>;

    /// Clamps out-of-range config values to valid bounds.
    fn normalize_config(&self, config: PuzzleConfig) -> PuzzleConfig {
        let range = self.size_range();
        config.clamped(*range.start(), *range.end())
    }

    /// Constructs the pieces of a solved puzzle. This is a pure function of
    /// `config`.
    fn create_pieces(&self, config: &PuzzleConfig) -> Vec<Piece>;

    /// Returns whether a move rotates `piece`.
    ///
    /// By default, this compares the piece's coordinate along the axis with
    /// the selected layer.
    fn is_piece_in_move(&self, piece: &Piece, mv: &Move) -> bool {
        match mv.selector {
            LayerSelector::Layer(layer) => {
                let coordinate = match mv.axis {
                    MoveAxis::Cardinal(axis) => piece.position[axis as usize % 3],
                    MoveAxis::Vector { normal, .. } => piece.position.dot(normal),
                };
                (coordinate - layer).abs() < EPSILON
            }
            LayerSelector::Depth(_) | LayerSelector::FacePlane => false,
        }
    }

    /// Rotates every piece in the move by `twist_angle() * dir` about the move
    /// axis, updating any discrete state exactly.
    fn apply_rotation(&self, pieces: &mut [Piece], mv: &Move) {
        let axis = mv.axis.vector();
        let angle = mv.angle(self.twist_angle());
        for piece in pieces.iter_mut().filter(|p| self.is_piece_in_move(p, mv)) {
            piece.transform(|v| rotate_about_axis(v, axis, angle));
        }
    }

    /// Returns the color of the sticker currently showing on `world_face` of
    /// `piece`, or `None` if there is none.
    ///
    /// By default, this reads the sticker table entry of whichever face slot
    /// currently lies on `world_face`.
    fn sticker_color(
        &self,
        piece: &Piece,
        world_face: usize,
        config: &PuzzleConfig,
    ) -> Option<ColorId> {
        (0..piece.faces.len())
            .find(|&slot| {
                self.detect_world_face(piece, &piece.faces[slot], config) == Some(world_face)
            })
            .and_then(|slot| piece.stickers[slot])
            .map(|sticker| sticker.color)
    }

    /// Returns which world face the polygon `face` of `piece` currently lies
    /// on, or `None` if it is not on the surface.
    fn detect_world_face(
        &self,
        piece: &Piece,
        face: &[usize],
        _config: &PuzzleConfig,
    ) -> Option<usize> {
        let verts = face.iter().filter_map(|&i| piece.vertices.get(i).copied());
        let normal = polygon_unit_normal(verts)?;
        self.face_normals()
            .iter()
            .position(|n| n.dot(normal) > 1.0 - EPSILON)
    }

    /// Resolves a named face or vertex into a move. `reversed` turns
    /// counterclockwise instead of clockwise. Returns `None` if the name is
    /// unknown.
    fn resolve_move(
        &self,
        base: &BaseMove,
        reversed: bool,
        config: &PuzzleConfig,
    ) -> Option<Move>;

    /// Returns the notation for a move. This is the inverse of
    /// [`PuzzleType::resolve_move()`].
    fn move_name(&self, mv: &Move, config: &PuzzleConfig) -> String;

    /// Returns the keyboard character for each move name. Shift reverses the
    /// move.
    fn key_bindings(&self) -> &'static [(char, &'static str)];

    /// Generates a random scramble, never turning the same slice twice in a
    /// row.
    fn generate_scramble(&self, config: &PuzzleConfig, rng: &mut ChaCha8Rng) -> Vec<Move>;

    /// Returns the layer along the axis at `axis_index` that contains
    /// `piece`, or `None` if no move on that axis can turn it.
    fn layer_for_piece(&self, piece: &Piece, axis_index: usize) -> Option<LayerSelector>;

    /// Returns whether every world face shows a single color.
    fn is_solved(&self, pieces: &[Piece], config: &PuzzleConfig) -> bool {
        let mut face_colors = HashMap::new();
        for piece in pieces {
            for (slot, sticker) in piece.stickered_slots() {
                let Some(face) = self.detect_world_face(piece, &piece.faces[slot], config) else {
                    return false;
                };
                match face_colors.entry(face) {
                    Entry::Occupied(e) if *e.get() != sticker.color => return false,
                    Entry::Occupied(_) => (),
                    Entry::Vacant(e) => {
                        e.insert(sticker.color);
                    }
                }
            }
        }
        true
    }

    /// Returns the radius of the smallest origin-centered ball that contains
    /// every piece.
    fn radius(&self, pieces: &[Piece]) -> Float {
        pieces
            .iter()
            .flat_map(|p| &p.vertices)
            .map(|v| v.magnitude())
            .fold(0.0, Float::max)
    }
}

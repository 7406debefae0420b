//! Converting a picked sticker and a direction into a move.

use float_ord::FloatOrd;
use serde::{Deserialize, Serialize};
use trefoil_math::prelude::*;
use trefoil_puzzle::{Move, Piece, PuzzleType};

/// Face of a piece picked by the user.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Index into the piece store.
    pub piece: usize,
    /// Face slot of the piece.
    pub face_slot: usize,
}

/// Returns the move that pushes the selected face in `direction` (in world
/// space), or `None` if no axis can turn it that way.
///
/// The rotation axis is the one best aligned with `n × direction`, where `n`
/// is the current normal of the face.
pub fn resolve_arrow_move(
    puzzle: &dyn PuzzleType,
    pieces: &[Piece],
    selection: Selection,
    direction: Vec3,
) -> Option<Move> {
    let piece = pieces.get(selection.piece)?;
    let normal = piece.face_normal(selection.face_slot)?;
    let torque = normal.cross(direction);

    let (index, dot) = (puzzle.axes().iter().enumerate())
        .filter(|&(index, _)| puzzle.layer_for_piece(piece, index).is_some())
        .map(|(index, axis)| (index, axis.dot(torque)))
        .filter(|(_, dot)| dot.abs() > EPSILON)
        .max_by_key(|(_, dot)| FloatOrd(dot.abs()))?;

    Some(Move {
        axis: puzzle.move_axis(index)?,
        selector: puzzle.layer_for_piece(piece, index)?,
        dir: if dot > 0.0 { 1 } else { -1 },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trefoil_puzzle::{Cube, LayerSelector, Megaminx, MoveAxis, PuzzleConfig};

    use super::*;

    /// Returns the front-center sticker of a 3x3x3.
    fn front_center(pieces: &[Piece]) -> Selection {
        let piece = pieces
            .iter()
            .position(|p| p.position == Vec3::new(0.0, 0.0, 1.0))
            .unwrap();
        Selection { piece, face_slot: 4 }
    }

    #[test]
    fn test_arrow_moves_on_cube_front() {
        let pieces = Cube.create_pieces(&PuzzleConfig::default());
        let selection = front_center(&pieces);

        let up = resolve_arrow_move(&Cube, &pieces, selection, Vec3::unit_y()).unwrap();
        assert_eq!(up.axis, MoveAxis::Cardinal(0));
        assert_eq!(up.selector, LayerSelector::Layer(0.0));
        assert_eq!(up.dir, -1);

        let right = resolve_arrow_move(&Cube, &pieces, selection, Vec3::unit_x()).unwrap();
        assert_eq!(right.axis, MoveAxis::Cardinal(1));
        assert_eq!(right.selector, LayerSelector::Layer(0.0));
        assert_eq!(right.dir, 1);

        // Pushing into the face does nothing.
        assert_eq!(
            resolve_arrow_move(&Cube, &pieces, selection, Vec3::unit_z()),
            None,
        );
    }

    #[test]
    fn test_arrow_move_moves_sticker_in_direction() {
        let mut pieces = Cube.create_pieces(&PuzzleConfig::default());
        let selection = front_center(&pieces);
        let mv = resolve_arrow_move(&Cube, &pieces, selection, Vec3::unit_y()).unwrap();
        Cube.apply_rotation(&mut pieces, &mv);
        let normal = pieces[selection.piece].face_normal(selection.face_slot).unwrap();
        assert!(normal.dot(Vec3::unit_y()) > 0.99);
    }

    #[test]
    fn test_arrow_move_uses_turnable_axis() {
        let config = PuzzleConfig::default();
        let pieces = Megaminx.create_pieces(&config);
        for (piece_index, piece) in pieces.iter().enumerate() {
            for (face_slot, _) in piece.stickered_slots() {
                let selection = Selection {
                    piece: piece_index,
                    face_slot,
                };
                let normal = piece.face_normal(face_slot).unwrap();
                let direction = normal.cross(Vec3::unit_x() + Vec3::unit_y() * 0.3);
                if let Some(mv) = resolve_arrow_move(&Megaminx, &pieces, selection, direction) {
                    assert!(Megaminx.is_piece_in_move(piece, &mv));
                }
            }
        }
    }
}

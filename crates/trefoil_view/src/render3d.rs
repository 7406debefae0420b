//! Perspective projection of the piece store into sorted 2D polygons.

use float_ord::FloatOrd;
use itertools::Itertools;
use serde::Serialize;
use trefoil_math::prelude::*;
use trefoil_puzzle::{Piece, PuzzleType, Rgb};

use crate::{AnimationFrame, Camera, Selection};

/// Face of a piece projected onto the screen.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Polygon3d {
    /// Index into the piece store.
    pub piece: usize,
    /// Face slot of the piece.
    pub face_slot: usize,
    /// Projected vertices, counterclockwise, with +Y up.
    pub points: Vec<Vec2>,
    /// Average view-space depth; larger is nearer.
    pub depth: Float,
    /// Sticker color, or `None` for the body of the piece.
    pub color: Option<Rgb>,
    /// Whether this face is selected.
    pub highlighted: bool,
}

/// Projects every front-facing face of every piece, sorted back to front.
///
/// Pieces in the animating move are drawn rotated part of the way; the piece
/// store itself is not modified.
pub fn project_pieces(
    puzzle: &dyn PuzzleType,
    pieces: &[Piece],
    camera: &Camera,
    anim: Option<&AnimationFrame>,
    selection: Option<Selection>,
) -> Vec<Polygon3d> {
    let radius = puzzle.radius(pieces);
    let palette = puzzle.palette();

    let mut polygons = vec![];
    for (piece_index, piece) in pieces.iter().enumerate() {
        let animated = anim.filter(|a| puzzle.is_piece_in_move(piece, &a.mv));
        let transform = |v: Vec3| match animated {
            Some(a) => {
                let angle = a.mv.angle(puzzle.twist_angle()) * a.eased;
                rotate_about_axis(v, a.mv.axis.vector(), angle)
            }
            None => v,
        };
        let Some(projected) = (piece.vertices.iter())
            .map(|&v| camera.project(transform(v), radius))
            .collect::<Option<Vec<Vec3>>>()
        else {
            continue;
        };

        for (face_slot, face) in piece.faces.iter().enumerate() {
            let points = face
                .iter()
                .map(|&i| projected[i].truncate())
                .collect_vec();
            if signed_area(&points) <= 0.0 {
                continue; // back-facing
            }
            let depth = face.iter().map(|&i| projected[i].z).sum::<Float>() / face.len() as Float;
            let color = piece.stickers[face_slot].and_then(|s| palette.get(s.color).copied());
            polygons.push(Polygon3d {
                piece: piece_index,
                face_slot,
                points,
                depth,
                color,
                highlighted: selection == Some(Selection {
                    piece: piece_index,
                    face_slot,
                }),
            });
        }
    }

    // Painter's algorithm: draw the farthest polygons first.
    polygons.sort_by_key(|p| FloatOrd(p.depth));
    polygons
}

/// Returns the frontmost polygon containing `point`.
pub fn hit_test(polygons: &[Polygon3d], point: Vec2) -> Option<&Polygon3d> {
    polygons
        .iter()
        .rev()
        .find(|p| point_in_polygon(point, &p.points))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trefoil_puzzle::{Cube, LayerSelector, Move, MoveAxis, PuzzleConfig, Pyraminx};

    use super::*;

    fn front_camera() -> Camera {
        Camera {
            yaw: 0.0,
            pitch: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_front_view_of_cube() {
        let config = PuzzleConfig::default();
        let pieces = Cube.create_pieces(&config);
        let polygons = project_pieces(&Cube, &pieces, &front_camera(), None, None);

        // Faces pointing away from the camera are culled. Perspective still
        // shows some faces that are edge-on.
        for p in &polygons {
            let normal = pieces[p.piece].face_normal(p.face_slot).unwrap();
            assert!(normal.z > -1e-9);
        }
        assert!(polygons.is_sorted_by_key(|p| FloatOrd(p.depth)));

        // The front face is frontmost.
        let hit = hit_test(&polygons, Vec2::new(0.0, 0.0)).unwrap();
        assert_eq!(hit.face_slot, 4);
        assert_eq!(hit.color, Some(Cube.palette()[4]));
        assert_eq!(pieces[hit.piece].position, Vec3::new(0.0, 0.0, 1.0));

        assert_eq!(hit_test(&polygons, Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_selection_is_highlighted() {
        let pieces = Pyraminx.create_pieces(&PuzzleConfig::default());
        let camera = Camera::default();
        let polygons = project_pieces(&Pyraminx, &pieces, &camera, None, None);
        let first = &polygons[polygons.len() - 1];
        let selection = Selection {
            piece: first.piece,
            face_slot: first.face_slot,
        };

        let polygons = project_pieces(&Pyraminx, &pieces, &camera, None, Some(selection));
        let highlighted = polygons.iter().filter(|p| p.highlighted).collect_vec();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].piece, selection.piece);
    }

    #[test]
    fn test_animation_rotates_moving_pieces() {
        let config = PuzzleConfig::default();
        let pieces = Cube.create_pieces(&config);
        let camera = front_camera();
        let mv = Move {
            axis: MoveAxis::Cardinal(1),
            selector: LayerSelector::Layer(1.0),
            dir: -1,
        };
        let still = project_pieces(&Cube, &pieces, &camera, None, None);
        let halfway = AnimationFrame {
            mv,
            progress: 0.5,
            eased: 0.5,
        };
        let moving = project_pieces(&Cube, &pieces, &camera, Some(&halfway), None);

        let top_row_moved = |polygons: &[Polygon3d], y: i32| {
            polygons
                .iter()
                .filter(|p| pieces[p.piece].position.y.round() as i32 == y)
                .map(|p| (p.piece, p.face_slot, p.points.clone()))
                .sorted_by_key(|(piece, slot, _)| (*piece, *slot))
                .collect_vec()
        };
        assert_ne!(top_row_moved(&still, 1), top_row_moved(&moving, 1));
        assert_eq!(top_row_moved(&still, -1), top_row_moved(&moving, -1));
    }
}

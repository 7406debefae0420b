//! N×N×N cube.
//!
//! Pieces are axis-aligned boxes centered on a half-integer lattice. Vertex
//! `i` of every piece starts on the positive side of axis `a` iff bit `a` of
//! `i` is set, and face slot `2a` (or `2a + 1`) holds the vertices on the
//! positive (or negative) side of axis `a`. Cardinal rotations only swap and
//! negate coordinates, so positions stay exact forever.

use std::f64::consts::FRAC_PI_2;
use std::ops::RangeInclusive;

use itertools::{Itertools, iproduct};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use trefoil_math::prelude::*;

use crate::notation::format_move;
use crate::scramble::{choose, random_sequence};
use crate::{
    BaseMove, ColorId, FaceVertices, LayerSelector, Move, MoveAxis, Piece, PuzzleConfig,
    PuzzleKind, PuzzleType, Rgb, Sticker,
};

const FACE_NAMES: &[&str] = &["R", "L", "U", "D", "F", "B"];

const PALETTE: &[Rgb] = &[
    Rgb::new(0xff, 0x00, 0x00), // R
    Rgb::new(0xff, 0x88, 0x00), // L
    Rgb::new(0xff, 0xff, 0xff), // U
    Rgb::new(0xff, 0xff, 0x00), // D
    Rgb::new(0x00, 0xff, 0x00), // F
    Rgb::new(0x00, 0x88, 0xff), // B
];

const KEY_BINDINGS: &[(char, &str)] = &[
    ('r', "R"),
    ('l', "L"),
    ('u', "U"),
    ('d', "D"),
    ('f', "F"),
    ('b', "B"),
];

/// Quarter turns in a random scramble move.
const SCRAMBLE_DIRS: &[i32] = &[-1, 1, 2];

lazy_static! {
    static ref AXES: [Vec3; 3] = [0, 1, 2].map(cardinal_vector);
    static ref FACE_NORMALS: [Vec3; 6] = std::array::from_fn(face_normal);
}

/// N×N×N cube.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Cube;

impl Cube {
    /// Returns the coordinate of the outermost layer.
    pub fn half_size(config: &PuzzleConfig) -> Float {
        (config.size as Float - 1.0) / 2.0
    }

    /// Returns the face slot that was originally on the side of the piece that
    /// now faces `world_face`, or `None` if it cannot be determined.
    ///
    /// This looks at the four vertices of the piece that are extreme along
    /// the axis of `world_face` and checks which index bit they share. Only
    /// vertex indices are compared, so this is exact regardless of how the
    /// piece has moved.
    pub fn original_slot(piece: &Piece, world_face: usize) -> Option<usize> {
        let axis = world_face / 2;
        if axis >= 3 {
            return None;
        }
        let positive = world_face % 2 == 0;

        let coords = piece.vertices.iter().map(|v| v[axis]);
        let extreme = if positive {
            coords.fold(Float::NEG_INFINITY, Float::max)
        } else {
            coords.fold(Float::INFINITY, Float::min)
        };
        let extremal = piece
            .vertices
            .iter()
            .positions(|v| (v[axis] - extreme).abs() < EPSILON)
            .collect_vec();
        if extremal.len() != 4 {
            return None;
        }

        (0..3).find_map(|bit| {
            let first = (extremal[0] >> bit) & 1;
            let uniform = extremal.iter().all(|&i| (i >> bit) & 1 == first);
            uniform.then_some(bit * 2 + (1 - first))
        })
    }
}

impl PuzzleType for Cube {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Cube
    }
    fn name(&self) -> &'static str {
        "Cube"
    }
    fn palette(&self) -> &'static [Rgb] {
        PALETTE
    }
    fn face_names(&self) -> &'static [&'static str] {
        FACE_NAMES
    }
    fn face_normals(&self) -> &'static [Vec3] {
        &*FACE_NORMALS
    }
    fn axes(&self) -> &'static [Vec3] {
        &*AXES
    }
    fn move_axis(&self, index: usize) -> Option<MoveAxis> {
        (index < 3).then_some(MoveAxis::Cardinal(index as u8))
    }
    fn twist_angle(&self) -> Float {
        FRAC_PI_2
    }
    fn twist_order(&self) -> u32 {
        4
    }
    fn size_range(&self) -> RangeInclusive<u32> {
        1..=10
    }

    fn create_pieces(&self, config: &PuzzleConfig) -> Vec<Piece> {
        let n = config.size;
        let half = Self::half_size(config);
        let extent = (1.0 - config.border_width) / 2.0;
        let offset = |i: usize, bit: usize| if (i >> bit) & 1 == 1 { extent } else { -extent };

        iproduct!(0..n, 0..n, 0..n)
            .map(|(x, y, z)| [x, y, z])
            .filter(|coords| coords.iter().any(|&c| c == 0 || c == n - 1))
            .map(|coords| {
                let position = Vec3::new(
                    coords[0] as Float - half,
                    coords[1] as Float - half,
                    coords[2] as Float - half,
                );
                let vertices = (0..8)
                    .map(|i| position + Vec3::new(offset(i, 0), offset(i, 1), offset(i, 2)))
                    .collect_vec();
                let faces = (0..6)
                    .map(|slot| {
                        let mut face = face_vertex_indices(slot);
                        orient_face_outward(&mut face, &vertices, position);
                        face
                    })
                    .collect();

                let mut piece = Piece::new(vertices, faces);
                piece.position = position;
                for slot in 0..6 {
                    let c = coords[slot / 2];
                    let on_face = if slot % 2 == 0 { c == n - 1 } else { c == 0 };
                    if on_face {
                        piece.stickers[slot] = Some(Sticker { color: slot });
                    }
                }
                piece
            })
            .collect()
    }

    fn apply_rotation(&self, pieces: &mut [Piece], mv: &Move) {
        let MoveAxis::Cardinal(axis) = mv.axis else {
            log::warn!("ignoring cube move with non-cardinal axis {:?}", mv.axis);
            return;
        };
        for piece in pieces.iter_mut().filter(|p| self.is_piece_in_move(p, mv)) {
            piece.transform(|v| rotate_cardinal(v, axis, mv.dir));
        }
    }

    fn sticker_color(
        &self,
        piece: &Piece,
        world_face: usize,
        _config: &PuzzleConfig,
    ) -> Option<ColorId> {
        let slot = Self::original_slot(piece, world_face).unwrap_or_else(|| {
            log::warn!(
                "unable to detect original face of sticker on {:?} at {:?}",
                FACE_NAMES.get(world_face),
                piece.position,
            );
            world_face
        });
        Some(piece.stickers.get(slot).copied().flatten()?.color)
    }

    fn resolve_move(
        &self,
        base: &BaseMove,
        reversed: bool,
        config: &PuzzleConfig,
    ) -> Option<Move> {
        let slot = FACE_NAMES.iter().position(|&name| name == base.name)?;
        let axis = slot / 2;
        let sign = if slot % 2 == 0 { 1.0 } else { -1.0 };

        let layers = base.depth.unwrap_or(1).clamp(1, config.size);
        let layer = sign * (Self::half_size(config) - (layers - 1) as Float);

        // Clockwise as seen from outside the face.
        let dir = -(sign as i32);
        Some(Move {
            axis: MoveAxis::Cardinal(axis as u8),
            selector: LayerSelector::Layer(layer),
            dir: if reversed { -dir } else { dir },
        })
    }

    fn move_name(&self, mv: &Move, config: &PuzzleConfig) -> String {
        let axis = mv.axis.index();
        let LayerSelector::Layer(layer) = mv.selector else {
            return format!("{mv:?}");
        };
        let half = Self::half_size(config);
        let (slot, layers) = if approx_gt_eq(layer, 0.0) {
            (axis * 2, half - layer)
        } else {
            (axis * 2 + 1, half + layer)
        };
        let name = FACE_NAMES.get(slot).copied().unwrap_or("?");
        let clockwise_turns = if slot % 2 == 0 { -mv.dir } else { mv.dir };
        format_move(layers.round() as u32 + 1, name, clockwise_turns)
    }

    fn key_bindings(&self) -> &'static [(char, &'static str)] {
        KEY_BINDINGS
    }

    fn generate_scramble(&self, config: &PuzzleConfig, rng: &mut ChaCha8Rng) -> Vec<Move> {
        let half = Self::half_size(config);
        random_sequence(config.scramble_length, rng, |rng| Move {
            axis: MoveAxis::Cardinal(rng.random_range(0..3)),
            selector: LayerSelector::Layer(rng.random_range(0..config.size) as Float - half),
            dir: choose(rng, SCRAMBLE_DIRS),
        })
    }

    fn layer_for_piece(&self, piece: &Piece, axis_index: usize) -> Option<LayerSelector> {
        (axis_index < 3).then(|| LayerSelector::Layer(piece.position[axis_index]))
    }
}

/// Returns the outward normal of a face slot.
fn face_normal(slot: usize) -> Vec3 {
    let sign = if slot % 2 == 0 { 1.0 } else { -1.0 };
    cardinal_vector(slot as u8 / 2) * sign
}

/// Returns the indices of the vertices of a face slot, in a cycle around the
/// face.
fn face_vertex_indices(slot: usize) -> FaceVertices {
    let axis = slot / 2;
    let side = if slot % 2 == 0 { 1 << axis } else { 0 };
    let (p, q) = perpendicular_axes(axis as u8);
    [(0, 0), (1, 0), (1, 1), (0, 1)]
        .into_iter()
        .map(|(a, b)| side | (a << p) | (b << q))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trefoil_math::assert_approx_eq;

    use super::*;

    #[test]
    fn test_cube_piece_count() {
        for (size, expected) in [(1, 1), (2, 8), (3, 26), (4, 56), (5, 98)] {
            let config = PuzzleConfig {
                size,
                ..Default::default()
            };
            assert_eq!(Cube.create_pieces(&config).len(), expected);
        }
    }

    #[test]
    fn test_cube_faces_point_outward() {
        let pieces = Cube.create_pieces(&PuzzleConfig::default());
        for piece in &pieces {
            for slot in 0..6 {
                let normal = piece.face_normal(slot).unwrap();
                assert_approx_eq!(normal, face_normal(slot));
            }
        }
    }

    #[test]
    fn test_cube_notation_round_trip() {
        let config = PuzzleConfig {
            size: 4,
            ..Default::default()
        };
        for name in FACE_NAMES {
            for depth in 1..=4 {
                for reversed in [false, true] {
                    let base = BaseMove::new(*name).with_depth(depth);
                    let mv = Cube.resolve_move(&base, reversed, &config).unwrap();
                    let expected = format_move(depth, name, if reversed { -1 } else { 1 });
                    let name = Cube.move_name(&mv, &config);
                    // Layers past the middle are named from the opposite face.
                    let reparsed = crate::notation::parse_move(&Cube, &name, &config).unwrap();
                    assert!(mv.same_slice(&reparsed) && mv.dir == reparsed.dir);
                    if depth <= 2 {
                        assert_eq!(name, expected);
                    }
                }
            }
        }
    }
}

//! Megaminx.
//!
//! The dodecahedron is scaled to have inradius 1 and oriented with the U face
//! on top. Each piece is a shell of sticker polygons on the surface: one
//! pentagon for a center, two quads for an edge, and three kites for a corner.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use float_ord::FloatOrd;
use itertools::Itertools;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use trefoil_math::prelude::*;

use crate::notation::format_move;
use crate::scramble::{choose, random_sequence};
use crate::{
    BaseMove, FaceVertices, LayerSelector, Move, MoveAxis, Piece, PuzzleConfig, PuzzleKind,
    PuzzleType, Rgb, Sticker,
};

/// Golden ratio.
const PHI: Float = 1.618_033_988_749_895;

/// Distance from each outer edge of a face to the cut.
const CUT_INSET: Float = 0.22;

const FACE_NAMES: &[&str] = &[
    "U", "F", "R", "L", "BR", "BL", "D", "B", "DBL", "DBR", "DL", "DR",
];

const PALETTE: &[Rgb] = &[
    Rgb::new(0xff, 0xff, 0xff), // U
    Rgb::new(0x00, 0x88, 0x00), // F
    Rgb::new(0xff, 0x00, 0x00), // R
    Rgb::new(0x88, 0x00, 0xff), // L
    Rgb::new(0xff, 0xff, 0x00), // BR
    Rgb::new(0x00, 0x44, 0xff), // BL
    Rgb::new(0x88, 0x88, 0x88), // D
    Rgb::new(0xff, 0xee, 0x88), // B
    Rgb::new(0xff, 0x88, 0xcc), // DBL
    Rgb::new(0x88, 0xff, 0x44), // DBR
    Rgb::new(0xff, 0x88, 0x00), // DL
    Rgb::new(0x66, 0xdd, 0xff), // DR
];

const KEY_BINDINGS: &[(char, &str)] = &[
    ('u', "U"),
    ('f', "F"),
    ('r', "R"),
    ('l', "L"),
    ('i', "BR"),
    ('e', "BL"),
    ('d', "D"),
    ('b', "B"),
    ('q', "DBL"),
    ('p', "DBR"),
    ('a', "DL"),
    ('k', "DR"),
];

/// Multiples of 72° in a random scramble move.
const SCRAMBLE_DIRS: &[i32] = &[-2, -1, 1, 2];

lazy_static! {
    /// Rotation that brings the U face to the top.
    static ref ORIENTATION: Mat3 =
        Mat3::from_angle_x(trefoil_math::cgmath::Rad((1.0 / PHI).atan()));

    static ref FACE_NORMALS: [Vec3; 12] = {
        let upper = [
            Vec3::new(0.0, PHI, -1.0),
            Vec3::new(0.0, PHI, 1.0),
            Vec3::new(PHI, 1.0, 0.0),
            Vec3::new(-PHI, 1.0, 0.0),
            Vec3::new(1.0, 0.0, -PHI),
            Vec3::new(-1.0, 0.0, -PHI),
        ];
        std::array::from_fn(|i| {
            let n = if i < 6 { upper[i] } else { -upper[i - 6] };
            *ORIENTATION * n.normalize()
        })
    };

    static ref VERTICES: Vec<Vec3> = {
        let p = PHI;
        let q = 1.0 / PHI;
        let mut ret = vec![];
        for (x, y, z) in itertools::iproduct!([-1.0, 1.0], [-1.0, 1.0], [-1.0, 1.0]) {
            ret.push(Vec3::new(x, y, z));
        }
        for (s, t) in itertools::iproduct!([-1.0, 1.0], [-1.0, 1.0]) {
            ret.push(Vec3::new(0.0, s * q, t * p));
            ret.push(Vec3::new(s * q, t * p, 0.0));
            ret.push(Vec3::new(s * p, 0.0, t * q));
        }
        let inradius = ret
            .iter()
            .map(|v| v.dot(Vec3::new(0.0, PHI, 1.0).normalize()))
            .fold(0.0, Float::max);
        ret.into_iter().map(|v| *ORIENTATION * v / inradius).collect()
    };

    /// Vertex indices of each face, counterclockwise from outside.
    static ref FACE_VERTICES: [[usize; 5]; 12] = std::array::from_fn(|f| {
        let n = FACE_NORMALS[f];
        let mut face = VERTICES
            .iter()
            .positions(|v| v.dot(n) > 1.0 - EPSILON)
            .collect_vec();
        let u = (VERTICES[face[0]] - n).normalize();
        let w = n.cross(u);
        face.sort_by_key(|&i| {
            let d = VERTICES[i] - n;
            FloatOrd(w.dot(d).atan2(u.dot(d)))
        });
        let mut ret = [0; 5];
        for (dst, src) in ret.iter_mut().zip(face) {
            *dst = src;
        }
        ret
    });

    /// Plane offset that separates the pieces of a face from the rest.
    static ref CUT_THRESHOLD: Float = 1.0 - CUT_INSET * 2.0 / 5.0_f64.sqrt();
}

/// Piece identity used to group sticker polygons into pieces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PieceKey {
    Center(usize),
    Edge(usize, usize),
    Corner(usize),
}

/// Megaminx.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Megaminx;

impl PuzzleType for Megaminx {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Megaminx
    }
    fn name(&self) -> &'static str {
        "Megaminx"
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
        &*FACE_NORMALS
    }
    fn move_axis(&self, index: usize) -> Option<MoveAxis> {
        Some(MoveAxis::Vector {
            index,
            normal: *FACE_NORMALS.get(index)?,
        })
    }
    fn twist_angle(&self) -> Float {
        TAU / 5.0
    }
    fn twist_order(&self) -> u32 {
        5
    }
    fn size_range(&self) -> RangeInclusive<u32> {
        3..=3
    }

    fn create_pieces(&self, config: &PuzzleConfig) -> Vec<Piece> {
        let mut polygons: BTreeMap<PieceKey, Vec<(Vec<Vec3>, usize)>> = BTreeMap::new();

        for (f, face) in FACE_VERTICES.iter().enumerate() {
            let c = FACE_NORMALS[f];
            let v = face.map(|i| VERTICES[i]);

            let edge_mid = (v[0] + v[1]) / 2.0;
            let apothem = (edge_mid - c).magnitude();
            let inner_scale = (apothem - CUT_INSET) / apothem;
            // Side length of the rhombus cut off at each corner.
            let corner_side = CUT_INSET / 108.0_f64.to_radians().sin();

            let inner = v.map(|vk| c + (vk - c) * inner_scale);
            let toward =
                |from: usize, to: usize| v[from] + (v[to] - v[from]).normalize() * corner_side;

            polygons
                .entry(PieceKey::Center(f))
                .or_default()
                .push((inner.to_vec(), f));
            for k in 0..5 {
                let next = (k + 1) % 5;
                let prev = (k + 4) % 5;

                let edge = vec![toward(k, next), toward(next, k), inner[next], inner[k]];
                let (a, b) = (face[k].min(face[next]), face[k].max(face[next]));
                polygons.entry(PieceKey::Edge(a, b)).or_default().push((edge, f));

                let corner = vec![v[k], toward(k, next), inner[k], toward(k, prev)];
                polygons
                    .entry(PieceKey::Corner(face[k]))
                    .or_default()
                    .push((corner, f));
            }
        }

        let shrink = 1.0 - config.border_width;
        polygons
            .into_values()
            .map(|stickers| {
                let mut vertices = vec![];
                let mut faces = vec![];
                for (polygon, _) in &stickers {
                    let center = centroid(polygon.iter().copied());
                    let start = vertices.len();
                    vertices.extend(polygon.iter().map(|&p| center + (p - center) * shrink));
                    faces.push((start..vertices.len()).collect::<FaceVertices>());
                }
                for face in &mut faces {
                    orient_face_outward(face, &vertices, Vec3::zero());
                }

                let mut piece = Piece::new(vertices, faces);
                for (slot, &(_, color)) in stickers.iter().enumerate() {
                    piece.stickers[slot] = Some(Sticker { color });
                }
                piece
            })
            .collect()
    }

    fn is_piece_in_move(&self, piece: &Piece, mv: &Move) -> bool {
        match (mv.axis, mv.selector) {
            (MoveAxis::Vector { normal, .. }, LayerSelector::FacePlane) => {
                piece.position.dot(normal) > *CUT_THRESHOLD
            }
            _ => false,
        }
    }

    fn resolve_move(
        &self,
        base: &BaseMove,
        reversed: bool,
        _config: &PuzzleConfig,
    ) -> Option<Move> {
        let index = FACE_NAMES.iter().position(|&name| name == base.name)?;
        // Clockwise as seen from outside the face.
        let dir = if reversed { 1 } else { -1 };
        Some(Move {
            axis: self.move_axis(index)?,
            selector: LayerSelector::FacePlane,
            dir,
        })
    }

    fn move_name(&self, mv: &Move, _config: &PuzzleConfig) -> String {
        let name = FACE_NAMES.get(mv.axis.index()).copied().unwrap_or("?");
        format_move(1, name, -mv.dir)
    }

    fn key_bindings(&self) -> &'static [(char, &'static str)] {
        KEY_BINDINGS
    }

    fn generate_scramble(&self, config: &PuzzleConfig, rng: &mut ChaCha8Rng) -> Vec<Move> {
        random_sequence(config.scramble_length, rng, |rng| {
            let index = rng.random_range(0..12);
            Move {
                axis: MoveAxis::Vector {
                    index,
                    normal: FACE_NORMALS[index],
                },
                selector: LayerSelector::FacePlane,
                dir: choose(rng, SCRAMBLE_DIRS),
            }
        })
    }

    fn layer_for_piece(&self, piece: &Piece, axis_index: usize) -> Option<LayerSelector> {
        let normal = FACE_NORMALS.get(axis_index)?;
        (piece.position.dot(*normal) > *CUT_THRESHOLD).then_some(LayerSelector::FacePlane)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trefoil_math::assert_approx_eq;

    use super::*;

    #[test]
    fn test_megaminx_orientation() {
        assert_approx_eq!(FACE_NORMALS[0], Vec3::unit_y());
        assert_approx_eq!(FACE_NORMALS[6], -Vec3::unit_y());
        // F is in front, tilted up.
        assert!(FACE_NORMALS[1].z > 0.8 && FACE_NORMALS[1].y > 0.4);
        assert_eq!(VERTICES.len(), 20);
        for face in FACE_VERTICES.iter() {
            assert!(face.iter().all_unique());
        }
    }

    #[test]
    fn test_megaminx_pieces() {
        let pieces = Megaminx.create_pieces(&PuzzleConfig::default());
        let sticker_counts = pieces.iter().map(|p| p.faces.len()).counts();
        assert_eq!(sticker_counts[&1], 12);
        assert_eq!(sticker_counts[&2], 30);
        assert_eq!(sticker_counts[&3], 20);

        for piece in &pieces {
            for (slot, sticker) in piece.stickered_slots() {
                let world_face = Megaminx.detect_world_face(
                    piece,
                    &piece.faces[slot],
                    &PuzzleConfig::default(),
                );
                assert_eq!(world_face, Some(sticker.color));
            }
        }
    }
}

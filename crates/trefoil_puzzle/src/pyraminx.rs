//! Pyraminx of any size.
//!
//! The tetrahedron is subdivided into a lattice of upright tetrahedra (whose
//! barycentric coordinates sum to `N - 1`) and octahedra in the gaps between
//! them (summing to `N - 2`). Inverted tetrahedra never touch the surface, so
//! they are omitted, as are interior cells with no stickers.
//!
//! Face slot `m` of every piece is the face opposite tetrahedron vertex `m`.
//! Octahedra have four more face slots (`4 + m`) which are always internal.

use std::ops::RangeInclusive;

use itertools::{Itertools, iproduct};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use trefoil_math::prelude::*;

use crate::notation::format_move;
use crate::scramble::{choose, random_sequence};
use crate::{
    BaseMove, BaryClass, Barycentric, FaceVertices, LayerSelector, Move, MoveAxis, Piece,
    PuzzleConfig, PuzzleKind, PuzzleType, Rgb, Sticker,
};

/// Distance from the center to each tip.
const RADIUS: Float = 1.5;

/// Vertex names, which also name the tip moves (in lowercase) and layer moves
/// (in uppercase).
const VERTEX_NAMES: &[&str] = &["U", "L", "R", "B"];
const TIP_NAMES: &[&str] = &["u", "l", "r", "b"];
/// Face names, indexed by the vertex that each face is opposite.
const FACE_NAMES: &[&str] = &["D", "R", "L", "F"];

const PALETTE: &[Rgb] = &[
    Rgb::new(0xff, 0xff, 0x00), // D
    Rgb::new(0x00, 0x88, 0xff), // R
    Rgb::new(0xff, 0x00, 0x00), // L
    Rgb::new(0x00, 0xff, 0x00), // F
];

const KEY_BINDINGS: &[(char, &str)] = &[('u', "U"), ('l', "L"), ('r', "R"), ('b', "B")];

/// Barycentric coordinate cycle for a 120° counterclockwise twist about each
/// vertex.
const CYCLES: [[usize; 3]; 4] = [[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 2, 1]];

/// Pairs of unit offsets that make up the vertices of a gap octahedron.
const GAP_PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

lazy_static! {
    static ref VERTICES: [Vec3; 4] = {
        let a = 6.0_f64.sqrt() / 3.0;
        let b = 2.0_f64.sqrt() / 3.0;
        [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-a, -1.0 / 3.0, b),
            Vec3::new(a, -1.0 / 3.0, b),
            Vec3::new(0.0, -1.0 / 3.0, -2.0 * b),
        ]
    };
    static ref FACE_NORMALS: [Vec3; 4] = VERTICES.map(|v| -v);
}

/// Pyraminx of any size.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Pyraminx;

impl Pyraminx {
    /// Returns the point of the lattice at barycentric coordinates `coords`
    /// for a puzzle of size `n`.
    pub fn lattice_point(coords: [u32; 4], n: u32) -> Vec3 {
        (0..4)
            .map(|i| VERTICES[i] * (RADIUS * coords[i] as Float / n as Float))
            .fold(Vec3::zero(), |a, b| a + b)
    }

    fn new_piece(base: [u32; 4], class: BaryClass, config: &PuzzleConfig) -> Option<Piece> {
        let n = config.size;
        if base.iter().all(|&c| c > 0) {
            return None;
        }

        let (vertices, faces): (Vec<Vec3>, Vec<FaceVertices>) = match class {
            BaryClass::Upright => {
                let vertices = (0..4)
                    .map(|i| Self::lattice_point(plus_units(base, &[i]), n))
                    .collect();
                let faces = (0..4)
                    .map(|m| (0..4).filter(|&i| i != m).collect())
                    .collect();
                (vertices, faces)
            }
            BaryClass::Gap => {
                let vertices = GAP_PAIRS
                    .iter()
                    .map(|&(a, b)| Self::lattice_point(plus_units(base, &[a, b]), n))
                    .collect();
                let excluding = |m| GAP_PAIRS.iter().positions(move |&(a, b)| a != m && b != m);
                let including = |m| GAP_PAIRS.iter().positions(move |&(a, b)| a == m || b == m);
                let faces = (0..4)
                    .map(|m| excluding(m).collect())
                    .chain((0..4).map(|m| including(m).collect()))
                    .collect();
                (vertices, faces)
            }
        };

        let mut piece = Piece::new(vertices, faces);
        let inside = piece.position;
        for face in &mut piece.faces {
            orient_face_outward(face, &piece.vertices, inside);
        }
        for m in (0..4).filter(|&m| base[m] == 0) {
            piece.stickers[m] = Some(Sticker { color: m });
        }
        piece.bary = Some(Barycentric {
            coords: base,
            class,
        });
        piece.shrink_toward_centroid(1.0 - config.border_width);
        Some(piece)
    }
}

impl PuzzleType for Pyraminx {
    fn kind(&self) -> PuzzleKind {
        PuzzleKind::Pyraminx
    }
    fn name(&self) -> &'static str {
        "Pyraminx"
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
        &*VERTICES
    }
    fn move_axis(&self, index: usize) -> Option<MoveAxis> {
        Some(MoveAxis::Vector {
            index,
            normal: *VERTICES.get(index)?,
        })
    }
    fn twist_angle(&self) -> Float {
        TAU / 3.0
    }
    fn twist_order(&self) -> u32 {
        3
    }
    fn size_range(&self) -> RangeInclusive<u32> {
        2..=8
    }

    fn create_pieces(&self, config: &PuzzleConfig) -> Vec<Piece> {
        let n = config.size;
        let upright = (n.checked_sub(1).into_iter())
            .flat_map(lattice_coords)
            .map(|base| (base, BaryClass::Upright));
        let gap = (n.checked_sub(2).into_iter())
            .flat_map(lattice_coords)
            .map(|base| (base, BaryClass::Gap));
        upright
            .chain(gap)
            .filter_map(|(base, class)| Self::new_piece(base, class, config))
            .collect()
    }

    fn is_piece_in_move(&self, piece: &Piece, mv: &Move) -> bool {
        match (mv.axis, mv.selector, piece.bary) {
            (MoveAxis::Vector { index, .. }, LayerSelector::Depth(depth), Some(bary)) => {
                index < 4 && bary.effective_layer(index) <= depth
            }
            _ => false,
        }
    }

    fn apply_rotation(&self, pieces: &mut [Piece], mv: &Move) {
        let index = mv.axis.index();
        let (Some(&axis), Some(&cycle)) = (VERTICES.get(index), CYCLES.get(index)) else {
            log::warn!("ignoring pyraminx move with invalid axis {:?}", mv.axis);
            return;
        };
        let angle = mv.angle(self.twist_angle());
        for piece in pieces.iter_mut().filter(|p| self.is_piece_in_move(p, mv)) {
            piece.transform(|v| rotate_about_axis(v, axis, angle));
            if let Some(bary) = &mut piece.bary {
                bary.permute(cycle, mv.dir);
            }
        }
    }

    fn resolve_move(
        &self,
        base: &BaseMove,
        reversed: bool,
        config: &PuzzleConfig,
    ) -> Option<Move> {
        let (index, layers) = match VERTEX_NAMES.iter().position(|&name| name == base.name) {
            Some(index) => (index, base.depth.unwrap_or(2)),
            None => (TIP_NAMES.iter().position(|&name| name == base.name)?, 1),
        };
        let layers = layers.clamp(1, config.size);

        // Clockwise as seen from outside the tip.
        let dir = if reversed { 1 } else { -1 };
        Some(Move {
            axis: self.move_axis(index)?,
            selector: LayerSelector::Depth(layers - 1),
            dir,
        })
    }

    fn move_name(&self, mv: &Move, _config: &PuzzleConfig) -> String {
        let index = mv.axis.index();
        let LayerSelector::Depth(depth) = mv.selector else {
            return format!("{mv:?}");
        };
        let clockwise_turns = -mv.dir;
        match depth {
            0 => format_move(1, TIP_NAMES.get(index).copied().unwrap_or("?"), clockwise_turns),
            d => {
                let name = VERTEX_NAMES.get(index).copied().unwrap_or("?");
                let layers = if d == 1 { 1 } else { d + 1 };
                format_move(layers, name, clockwise_turns)
            }
        }
    }

    fn key_bindings(&self) -> &'static [(char, &'static str)] {
        KEY_BINDINGS
    }

    fn generate_scramble(&self, config: &PuzzleConfig, rng: &mut ChaCha8Rng) -> Vec<Move> {
        // Turning every layer would only rotate the whole puzzle.
        let max_depth = config.size.saturating_sub(1).max(1);
        random_sequence(config.scramble_length, rng, |rng| {
            let index = rng.random_range(0..4);
            Move {
                axis: MoveAxis::Vector {
                    index,
                    normal: VERTICES[index],
                },
                selector: LayerSelector::Depth(rng.random_range(0..max_depth)),
                dir: choose(rng, &[-1, 1]),
            }
        })
    }

    /// Returns the depth of `piece` from the tip at `axis_index`.
    ///
    /// Depth moves turn every layer up to and including the selected one, so
    /// a piece on the base opposite the tip (depth `N - 1`) yields a move that
    /// turns the whole puzzle. Arrow moves on such pieces are whole-puzzle
    /// rotations on purpose.
    fn layer_for_piece(&self, piece: &Piece, axis_index: usize) -> Option<LayerSelector> {
        let bary = piece.bary?;
        (axis_index < 4).then(|| LayerSelector::Depth(bary.effective_layer(axis_index)))
    }
}

/// Returns every nonnegative barycentric coordinate vector with the given sum.
fn lattice_coords(sum: u32) -> impl Iterator<Item = [u32; 4]> {
    iproduct!(0..=sum, 0..=sum, 0..=sum).filter_map(move |(a, b, c)| {
        let d = sum.checked_sub(a + b + c)?;
        Some([a, b, c, d])
    })
}

fn plus_units(mut coords: [u32; 4], units: &[usize]) -> [u32; 4] {
    for &i in units {
        coords[i] += 1;
    }
    coords
}

//! Trefoil diagram of the cube.
//!
//! Each of the three axes gets a set of concentric rings, one per layer, with
//! the three ring centers 120° apart around the origin. A sticker sits where
//! the rings of the two axes parallel to its face cross. Stickers on positive
//! faces take the crossing nearer the origin and stickers on negative faces
//! take the farther one.

use float_ord::FloatOrd;
use serde::{Deserialize, Serialize};
use trefoil_math::prelude::*;
use trefoil_puzzle::{MoveAxis, Piece, PuzzleConfig, PuzzleType, Rgb};

use crate::{AnimationFrame, Selection};

/// Distance from the origin to the center of each ring set.
const CENTER_DISTANCE: Float = 1.0;
/// Radius of the innermost ring.
const MIN_RING_RADIUS: Float = 1.2;
/// Radius of the outermost ring.
const MAX_RING_RADIUS: Float = 2.0;
/// Radius of a sticker disc, relative to the spacing between rings.
const STICKER_RADIUS_FACTOR: Float = 0.4;
/// Maximum radius of a sticker disc.
const MAX_STICKER_RADIUS: Float = 0.18;

/// Ring for one layer along one axis.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct Ring2d {
    /// Cardinal axis.
    pub axis: usize,
    /// Layer index along the axis, from the negative side.
    pub layer: u32,
    /// Center of the ring.
    pub center: Vec2,
    /// Radius of the ring.
    pub radius: Float,
}

/// Sticker placed on the trefoil diagram.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Sticker2d {
    /// Index into the piece store.
    pub piece: usize,
    /// Face slot of the piece.
    pub face_slot: usize,
    /// World face that the sticker is on, before any move in flight.
    pub world_face: usize,
    /// Center of the sticker disc.
    pub center: Vec2,
    /// Radius of the sticker disc.
    pub radius: Float,
    /// Sticker color.
    pub color: Option<Rgb>,
    /// Whether this sticker is selected.
    pub highlighted: bool,
}

/// Geometry of the trefoil diagram for a cube of a given size.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrefoilLayout {
    size: u32,
}
impl TrefoilLayout {
    /// Constructs the layout for an N×N×N cube.
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    /// Returns the center of the ring set for an axis.
    pub fn ring_center(axis: usize) -> Vec2 {
        let angle = (-90.0 + 120.0 * axis as Float).to_radians();
        Vec2::new(angle.cos(), angle.sin()) * CENTER_DISTANCE
    }

    fn ring_spacing(&self) -> Float {
        match self.size {
            1 => MAX_RING_RADIUS - MIN_RING_RADIUS,
            n => (MAX_RING_RADIUS - MIN_RING_RADIUS) / (n - 1) as Float,
        }
    }

    /// Returns the radius of the ring for a layer.
    pub fn ring_radius(&self, layer: u32) -> Float {
        match self.size {
            1 => (MIN_RING_RADIUS + MAX_RING_RADIUS) / 2.0,
            _ => MIN_RING_RADIUS + self.ring_spacing() * layer as Float,
        }
    }

    /// Returns the radius of a sticker disc.
    pub fn sticker_radius(&self) -> Float {
        (self.ring_spacing() * STICKER_RADIUS_FACTOR).min(MAX_STICKER_RADIUS)
    }

    /// Returns the layer index of a piece coordinate along an axis.
    pub fn layer_index(&self, coordinate: Float) -> u32 {
        let half = (self.size - 1) as Float / 2.0;
        ((coordinate + half).round().max(0.0) as u32).min(self.size - 1)
    }

    /// Returns every ring.
    pub fn rings(&self) -> Vec<Ring2d> {
        (0..3)
            .flat_map(|axis| {
                (0..self.size).map(move |layer| Ring2d {
                    axis,
                    layer,
                    center: Self::ring_center(axis),
                    radius: self.ring_radius(layer),
                })
            })
            .collect()
    }

    /// Returns where a sticker on `world_face` of a piece at `position` goes,
    /// or `None` if `world_face` is not a cube face.
    pub fn sticker_position(&self, world_face: usize, position: Vec3) -> Option<Vec2> {
        let axis = world_face / 2;
        if axis >= 3 {
            return None;
        }
        let b = (axis + 1) % 3;
        let c = (axis + 2) % 3;
        let positive = world_face % 2 == 0;
        Some(circle_intersection(
            Self::ring_center(b),
            self.ring_radius(self.layer_index(position[b])),
            Self::ring_center(c),
            self.ring_radius(self.layer_index(position[c])),
            positive,
            Vec2::zero(),
        ))
    }

    /// Places every sticker of the cube.
    ///
    /// Stickers in the move in flight slide partway to their destination.
    /// Those staying on the same face (the face perpendicular to the move
    /// axis) move in a straight line; the rest sweep around the ring center
    /// of the move axis, all in the same direction.
    pub fn stickers(
        &self,
        puzzle: &dyn PuzzleType,
        pieces: &[Piece],
        config: &PuzzleConfig,
        anim: Option<&AnimationFrame>,
        selection: Option<Selection>,
    ) -> Vec<Sticker2d> {
        let palette = puzzle.palette();
        let radius = self.sticker_radius();

        let mut ret = vec![];
        let mut arcs = vec![];
        for (piece_index, piece) in pieces.iter().enumerate() {
            for (face_slot, sticker) in piece.stickered_slots() {
                let face = &piece.faces[face_slot];
                let Some(world_face) = puzzle.detect_world_face(piece, face, config) else {
                    log::warn!("unable to place sticker of piece at {:?}", piece.position);
                    continue;
                };
                let Some(start) = self.sticker_position(world_face, piece.position) else {
                    continue;
                };

                let mut center = start;
                let moving = anim.filter(|a| puzzle.is_piece_in_move(piece, &a.mv));
                if let Some(a) = moving {
                    let end = self.destination(puzzle, piece, world_face, a);
                    if let (MoveAxis::Cardinal(axis), Some(end)) = (a.mv.axis, end) {
                        if world_face / 2 == axis as usize {
                            center = start + (end - start) * a.eased;
                        } else {
                            let ring = Circle::new(Self::ring_center(axis as usize), 0.0);
                            let delta =
                                shortest_angle_delta(ring.angle_of(start), ring.angle_of(end));
                            arcs.push((ret.len(), ring.center, start, end, delta));
                        }
                    }
                }

                ret.push(Sticker2d {
                    piece: piece_index,
                    face_slot,
                    world_face,
                    center,
                    radius,
                    color: palette.get(sticker.color).copied(),
                    highlighted: selection
                        == Some(Selection {
                            piece: piece_index,
                            face_slot,
                        }),
                });
            }
        }

        if let Some(a) = anim {
            let mut deltas = arcs.iter().map(|&(_, _, _, _, delta)| delta).collect::<Vec<_>>();
            majority_vote_arcs(&mut deltas);
            for ((i, ring_center, start, end, _), delta) in arcs.into_iter().zip(deltas) {
                let r0 = (start - ring_center).magnitude();
                let r1 = (end - ring_center).magnitude();
                let circle = Circle::new(ring_center, r0 + (r1 - r0) * a.eased);
                let angle = circle.angle_of(start) + delta * a.eased;
                ret[i].center = circle.point_at_angle(angle);
            }
        }

        ret
    }

    /// Returns where a sticker ends up once the move in flight completes.
    fn destination(
        &self,
        puzzle: &dyn PuzzleType,
        piece: &Piece,
        world_face: usize,
        anim: &AnimationFrame,
    ) -> Option<Vec2> {
        let MoveAxis::Cardinal(axis) = anim.mv.axis else {
            return None;
        };
        let normals = puzzle.face_normals();
        let normal = rotate_cardinal(*normals.get(world_face)?, axis, anim.mv.dir);
        let end_face = normals.iter().position(|n| n.dot(normal) > 1.0 - EPSILON)?;
        let end_position = rotate_cardinal(piece.position, axis, anim.mv.dir);
        self.sticker_position(end_face, end_position)
    }
}

/// Returns the sticker nearest to `point` whose disc contains it.
pub fn hit_test(stickers: &[Sticker2d], point: Vec2) -> Option<&Sticker2d> {
    stickers
        .iter()
        .filter(|s| Circle::new(s.center, s.radius).contains(point))
        .min_by_key(|s| FloatOrd((s.center - point).magnitude2()))
}

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use trefoil_math::prelude::*;

/// Index into a puzzle's color palette.
pub type ColorId = usize;

/// Vertex indices of one face of a piece, counterclockwise when seen from
/// outside the piece.
pub type FaceVertices = SmallVec<[usize; 5]>;

/// Colored marking on one face slot of a piece.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Sticker {
    /// Color of the sticker.
    pub color: ColorId,
}

/// Which lattice cells a barycentric coordinate refers to.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BaryClass {
    /// Upright tetrahedron, whose coordinates sum to `N - 1`.
    Upright,
    /// Octahedron filling the gap between upright tetrahedra, whose
    /// coordinates sum to `N - 2`.
    Gap,
}

/// Integer location of a pyraminx piece within the subdivision lattice of the
/// parent tetrahedron.
///
/// Coordinates are only ever changed by exact permutation, never recomputed
/// from vertex positions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Barycentric {
    /// Weight of each of the four tetrahedron vertices.
    pub coords: [u32; 4],
    /// Cell class, which determines the coordinate sum.
    pub class: BaryClass,
}
impl Barycentric {
    /// Returns the sum of the coordinates.
    pub fn sum(&self) -> u32 {
        self.coords.iter().sum()
    }

    /// Returns the number of layers between the piece and the tip at `vertex`,
    /// where the tip itself is layer 0.
    pub fn effective_layer(&self, vertex: usize) -> u32 {
        let gap = match self.class {
            BaryClass::Upright => 0,
            BaryClass::Gap => 1,
        };
        self.sum() - self.coords[vertex] + gap
    }

    /// Moves coordinates along `cycle` by `steps` positions, so that each
    /// step sends the weight at `cycle[k]` to `cycle[k + 1]`.
    pub fn permute(&mut self, cycle: [usize; 3], steps: i32) {
        for _ in 0..steps.rem_euclid(3) {
            let [a, b, c] = cycle;
            let old = self.coords;
            self.coords[b] = old[a];
            self.coords[c] = old[b];
            self.coords[a] = old[c];
        }
    }
}

/// Atomic movable unit of a puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Piece {
    /// Centroid of the piece, used for layer membership.
    pub position: Vec3,
    /// Vertices of the piece. The length never changes after construction.
    pub vertices: Vec<Vec3>,
    /// Vertex indices of each face slot.
    pub faces: Vec<FaceVertices>,
    /// Sticker on each face slot, if any.
    pub stickers: Vec<Option<Sticker>>,
    /// Lattice coordinates, for puzzles that track them.
    pub bary: Option<Barycentric>,
}
impl Piece {
    /// Constructs a piece whose position is the centroid of `vertices`, with
    /// no stickers.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<FaceVertices>) -> Self {
        let position = centroid(vertices.iter().copied());
        let stickers = vec![None; faces.len()];
        Self {
            position,
            vertices,
            faces,
            stickers,
            bary: None,
        }
    }

    /// Returns the current positions of the vertices of a face slot.
    pub fn face_vertices(&self, slot: usize) -> impl '_ + Iterator<Item = Vec3> {
        self.faces
            .get(slot)
            .into_iter()
            .flatten()
            .map(|&i| self.vertices[i])
    }

    /// Returns the current outward unit normal of a face slot.
    pub fn face_normal(&self, slot: usize) -> Option<Vec3> {
        polygon_unit_normal(self.face_vertices(slot))
    }

    /// Returns the current center of a face slot.
    pub fn face_center(&self, slot: usize) -> Vec3 {
        centroid(self.face_vertices(slot))
    }

    /// Returns the face slots that carry a sticker, along with the sticker.
    pub fn stickered_slots(&self) -> impl '_ + Iterator<Item = (usize, Sticker)> {
        self.stickers
            .iter()
            .enumerate()
            .filter_map(|(slot, sticker)| Some((slot, (*sticker)?)))
    }

    /// Applies a transformation to the centroid and every vertex together.
    pub fn transform(&mut self, f: impl Fn(Vec3) -> Vec3) {
        self.position = f(self.position);
        for v in &mut self.vertices {
            *v = f(*v);
        }
    }

    /// Scales every vertex toward the centroid by `factor`.
    pub fn shrink_toward_centroid(&mut self, factor: Float) {
        let c = self.position;
        for v in &mut self.vertices {
            *v = c + (*v - c) * factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn test_piece_json() {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ];
        let mut piece = Piece::new(vertices, vec![smallvec![0, 1, 2], smallvec![2, 1, 0]]);
        piece.stickers[0] = Some(Sticker { color: 4 });
        piece.bary = Some(Barycentric {
            coords: [1, 0, 0, 1],
            class: BaryClass::Gap,
        });

        let json = serde_json::to_value(&piece).unwrap();
        assert_eq!(json["faces"], serde_json::json!([[0, 1, 2], [2, 1, 0]]));
        assert_eq!(json["stickers"], serde_json::json!([{ "color": 4 }, null]));

        let parsed: Piece = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, piece);
    }

    #[test]
    fn test_barycentric_permutation() {
        let mut b = Barycentric {
            coords: [5, 1, 2, 3],
            class: BaryClass::Upright,
        };
        b.permute([1, 2, 3], 1);
        assert_eq!(b.coords, [5, 3, 1, 2]);
        b.permute([1, 2, 3], -1);
        assert_eq!(b.coords, [5, 1, 2, 3]);
        b.permute([1, 2, 3], 3);
        assert_eq!(b.coords, [5, 1, 2, 3]);
    }

    #[test]
    fn test_effective_layer() {
        let tip = Barycentric {
            coords: [2, 0, 0, 0],
            class: BaryClass::Upright,
        };
        assert_eq!(tip.effective_layer(0), 0);
        assert_eq!(tip.effective_layer(1), 2);

        let gap = Barycentric {
            coords: [1, 0, 0, 0],
            class: BaryClass::Gap,
        };
        assert_eq!(gap.effective_layer(0), 1);
        assert_eq!(gap.effective_layer(3), 2);
    }
}

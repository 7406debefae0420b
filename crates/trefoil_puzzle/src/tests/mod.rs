use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use trefoil_math::prelude::*;

use crate::*;

mod properties;

/// Tolerance for comparing geometry after many floating-point rotations.
const DRIFT: Float = 1e-6;

fn config_for(kind: PuzzleKind, size: u32) -> PuzzleConfig {
    kind.puzzle().normalize_config(PuzzleConfig {
        size,
        ..kind.default_config()
    })
}

fn scramble(kind: PuzzleKind, config: &PuzzleConfig, len: usize, seed: u64) -> Vec<Move> {
    let config = PuzzleConfig {
        scramble_length: len,
        ..config.clone()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    kind.puzzle().generate_scramble(&config, &mut rng)
}

fn apply_all(puzzle: &dyn PuzzleType, pieces: &mut [Piece], moves: &[Move]) {
    for mv in moves {
        puzzle.apply_rotation(pieces, mv);
    }
}

fn pieces_approx_eq(a: &[Piece], b: &[Piece]) -> bool {
    a.len() == b.len()
        && std::iter::zip(a, b).all(|(p, q)| {
            p.stickers == q.stickers
                && p.bary == q.bary
                && (p.position - q.position).magnitude() < DRIFT
                && std::iter::zip(&p.vertices, &q.vertices)
                    .all(|(u, v)| (u - v).magnitude() < DRIFT)
        })
}

/// Returns the color showing on each world face of each piece, keyed by piece
/// index and world face.
fn color_map(
    puzzle: &dyn PuzzleType,
    pieces: &[Piece],
    config: &PuzzleConfig,
) -> HashMap<(usize, usize), ColorId> {
    let mut ret = HashMap::new();
    for (i, piece) in pieces.iter().enumerate() {
        for face in 0..puzzle.face_normals().len() {
            if let Some(color) = puzzle.sticker_color(piece, face, config) {
                ret.insert((i, face), color);
            }
        }
    }
    ret
}

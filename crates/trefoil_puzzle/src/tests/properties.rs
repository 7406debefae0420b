use itertools::Itertools;
use proptest::prelude::*;

use super::*;

fn kind_and_size() -> impl Strategy<Value = (PuzzleKind, u32)> {
    prop_oneof![
        (1..=5_u32).prop_map(|n| (PuzzleKind::Cube, n)),
        (2..=5_u32).prop_map(|n| (PuzzleKind::Pyraminx, n)),
        Just((PuzzleKind::Megaminx, 3)),
    ]
}

fn pairwise_distances(piece: &Piece) -> Vec<Float> {
    piece
        .vertices
        .iter()
        .tuple_combinations()
        .map(|(a, b)| (a - b).magnitude())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn proptest_pieces_stay_rigid(
        (kind, size) in kind_and_size(),
        len in 0..60_usize,
        seed in any::<u64>(),
    ) {
        let puzzle = kind.puzzle();
        let config = config_for(kind, size);
        let initial = puzzle.create_pieces(&config);
        let mut pieces = initial.clone();
        apply_all(puzzle, &mut pieces, &scramble(kind, &config, len, seed));

        for (before, after) in std::iter::zip(&initial, &pieces) {
            let d1 = pairwise_distances(before);
            let d2 = pairwise_distances(after);
            prop_assert!(std::iter::zip(d1, d2).all(|(a, b)| (a - b).abs() < EPSILON));
            let center = centroid(after.vertices.iter().copied());
            prop_assert!((center - after.position).magnitude() < EPSILON);
        }
    }

    #[test]
    fn proptest_scramble_then_inverse_restores(
        (kind, size) in kind_and_size(),
        len in 0..60_usize,
        seed in any::<u64>(),
    ) {
        let puzzle = kind.puzzle();
        let config = config_for(kind, size);
        let initial = puzzle.create_pieces(&config);
        let moves = scramble(kind, &config, len, seed);
        let inverse = moves.iter().rev().map(|mv| mv.inverse()).collect_vec();

        let mut pieces = initial.clone();
        apply_all(puzzle, &mut pieces, &moves);
        apply_all(puzzle, &mut pieces, &inverse);

        prop_assert!(pieces_approx_eq(&initial, &pieces));
        prop_assert_eq!(
            color_map(puzzle, &initial, &config),
            color_map(puzzle, &pieces, &config)
        );
        prop_assert!(puzzle.is_solved(&pieces, &config));
    }

    #[test]
    fn proptest_cube_sticker_detection_is_exact(
        size in 2..=5_u32,
        len in 0..80_usize,
        seed in any::<u64>(),
    ) {
        let config = config_for(PuzzleKind::Cube, size);
        let mut pieces = Cube.create_pieces(&config);
        let moves = scramble(PuzzleKind::Cube, &config, len, seed);
        apply_all(&Cube, &mut pieces, &moves);

        for piece in &pieces {
            for world_face in 0..6 {
                prop_assert!(Cube::original_slot(piece, world_face).is_some());
            }
            for (slot, sticker) in piece.stickered_slots() {
                let world_face = Cube.detect_world_face(piece, &piece.faces[slot], &config);
                let world_face = world_face.unwrap();
                prop_assert_eq!(Cube::original_slot(piece, world_face), Some(slot));
                let color = Cube.sticker_color(piece, world_face, &config);
                prop_assert_eq!(color, Some(sticker.color));
            }
        }
    }

    #[test]
    fn proptest_pyraminx_lattice_tracks_geometry(
        size in 2..=6_u32,
        len in 0..200_usize,
        seed in any::<u64>(),
    ) {
        let config = config_for(PuzzleKind::Pyraminx, size);
        let initial = Pyraminx.create_pieces(&config);
        let home: HashMap<Barycentric, Vec3> = initial
            .iter()
            .filter_map(|p| Some((p.bary?, p.position)))
            .collect();
        prop_assert_eq!(home.len(), initial.len());

        let mut pieces = initial.clone();
        let moves = scramble(PuzzleKind::Pyraminx, &config, len, seed);
        apply_all(&Pyraminx, &mut pieces, &moves);
        for piece in &pieces {
            let bary = piece.bary.unwrap();
            let expected_sum = match bary.class {
                BaryClass::Upright => size - 1,
                BaryClass::Gap => size - 2,
            };
            prop_assert_eq!(bary.sum(), expected_sum);
            prop_assert!((home[&bary] - piece.position).magnitude() < DRIFT);
        }
    }

    #[test]
    fn proptest_megaminx_faces_keep_eleven_pieces(len in 0..80_usize, seed in any::<u64>()) {
        let config = PuzzleKind::Megaminx.default_config();
        let mut pieces = Megaminx.create_pieces(&config);
        let moves = scramble(PuzzleKind::Megaminx, &config, len, seed);
        apply_all(&Megaminx, &mut pieces, &moves);
        for index in 0..12 {
            let mv = Move {
                axis: Megaminx.move_axis(index).unwrap(),
                selector: LayerSelector::FacePlane,
                dir: 1,
            };
            let count = pieces.iter().filter(|p| Megaminx.is_piece_in_move(p, &mv)).count();
            prop_assert_eq!(count, 11);
        }
    }
}

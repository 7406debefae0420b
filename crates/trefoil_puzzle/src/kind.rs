use serde::{Deserialize, Serialize};

use crate::{Cube, Megaminx, PuzzleConfig, PuzzleType, Pyraminx};

/// Registry of supported puzzles.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PuzzleKind {
    /// N×N×N cube.
    #[default]
    Cube,
    /// Tetrahedral puzzle with vertex turns.
    Pyraminx,
    /// Dodecahedral puzzle with face turns.
    Megaminx,
}
impl PuzzleKind {
    /// Returns the puzzle implementation.
    pub fn puzzle(self) -> &'static dyn PuzzleType {
        match self {
            PuzzleKind::Cube => &Cube,
            PuzzleKind::Pyraminx => &Pyraminx,
            PuzzleKind::Megaminx => &Megaminx,
        }
    }

    /// Returns the default config for the puzzle.
    pub fn default_config(self) -> PuzzleConfig {
        match self {
            PuzzleKind::Cube => PuzzleConfig::default(),
            PuzzleKind::Pyraminx => PuzzleConfig {
                selected_depth: 2,
                scramble_length: 15,
                ..Default::default()
            },
            PuzzleKind::Megaminx => PuzzleConfig {
                border_width: 0.04,
                scramble_length: 40,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::VariantArray;

    use super::*;

    #[test]
    fn test_puzzle_kind_registry() {
        for &kind in PuzzleKind::VARIANTS {
            assert_eq!(kind.puzzle().kind(), kind);
            assert_eq!(kind.to_string().parse::<PuzzleKind>().unwrap(), kind);
            let config = kind.default_config();
            assert_eq!(kind.puzzle().normalize_config(config.clone()), config);
        }
        assert_eq!("Megaminx".parse::<PuzzleKind>().unwrap(), PuzzleKind::Megaminx);
        assert!("skewb".parse::<PuzzleKind>().is_err());
    }
}

use serde::{Deserialize, Serialize};
use trefoil_math::Float;

/// Maximum number of moves in a generated scramble.
pub const MAX_SCRAMBLE_LENGTH: usize = 10_000;
/// Maximum gap between pieces, as a fraction of the piece size.
pub const MAX_BORDER_WIDTH: Float = 0.5;

/// Scalar parameters of a puzzle.
///
/// Any change to `size` or `border_width` rebuilds the piece store. The
/// remaining fields only affect input handling and scrambling.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Number of layers along each axis.
    pub size: u32,
    /// Gap between adjacent pieces, as a fraction of the piece size.
    pub border_width: Float,
    /// Number of layers turned by keyboard moves, counting the outermost
    /// layer as 1.
    pub selected_depth: u32,
    /// Number of moves in a scramble.
    pub scramble_length: usize,
    /// Seed for the scramble generator. `None` picks a random seed.
    pub seed: Option<u64>,
}
impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: 3,
            border_width: 0.06,
            selected_depth: 1,
            scramble_length: 25,
            seed: None,
        }
    }
}
impl PuzzleConfig {
    /// Returns whether switching from `self` to `other` requires rebuilding
    /// the piece store.
    pub fn is_structural_change(&self, other: &PuzzleConfig) -> bool {
        self.size != other.size || self.border_width != other.border_width
    }

    /// Clamps every field to valid bounds, given the valid range of sizes.
    #[must_use]
    pub fn clamped(mut self, min_size: u32, max_size: u32) -> Self {
        self.size = self.size.clamp(min_size, max_size);
        self.border_width = if self.border_width.is_finite() {
            self.border_width.clamp(0.0, MAX_BORDER_WIDTH)
        } else {
            0.0
        };
        self.selected_depth = self.selected_depth.clamp(1, self.size);
        self.scramble_length = self.scramble_length.min(MAX_SCRAMBLE_LENGTH);
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_clamp_config() {
        let config = PuzzleConfig {
            size: 40,
            border_width: -1.0,
            selected_depth: 0,
            scramble_length: usize::MAX,
            seed: Some(7),
        }
        .clamped(1, 10);
        assert_eq!(
            config,
            PuzzleConfig {
                size: 10,
                border_width: 0.0,
                selected_depth: 1,
                scramble_length: MAX_SCRAMBLE_LENGTH,
                seed: Some(7),
            },
        );

        let nan = PuzzleConfig {
            border_width: Float::NAN,
            ..Default::default()
        };
        assert_eq!(nan.clamped(1, 10).border_width, 0.0);
    }
}

//! Move notation such as `U`, `2R'`, `DBR2'`, or `u`.
//!
//! A move is an optional layer count, a face or vertex name, an optional
//! multiplier, and an optional `'` to reverse it. Sequences are separated by
//! whitespace.

use std::num::ParseIntError;

use itertools::Itertools;

use crate::{BaseMove, Move, PuzzleConfig, PuzzleType};

/// Error from parsing move notation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NotationError {
    #[error("empty move")]
    Empty,
    #[error("invalid move syntax {0:?}")]
    InvalidSyntax(String),
    #[error("layer count must be positive in {0:?}")]
    ZeroLayers(String),
    #[error("number too large in {0:?}")]
    Overflow(String),
    #[error("unknown move {name:?} for {puzzle}")]
    UnknownMove { name: String, puzzle: &'static str },
}

/// Parses a single move.
pub fn parse_move(
    puzzle: &dyn PuzzleType,
    s: &str,
    config: &PuzzleConfig,
) -> Result<Move, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::Empty);
    }
    let syntax_err = || NotationError::InvalidSyntax(s.to_owned());
    let overflow_err = |_: ParseIntError| NotationError::Overflow(s.to_owned());

    let (layers, rest) = split_digits(s);
    let name_len = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    let (name, rest) = rest.split_at(name_len);
    let (amount, rest) = split_digits(rest);
    let reversed = match rest {
        "" => false,
        "'" => true,
        _ => return Err(syntax_err()),
    };
    if name.is_empty() {
        return Err(syntax_err());
    }

    let mut base = BaseMove::new(name);
    if !layers.is_empty() {
        let layers: u32 = layers.parse().map_err(overflow_err)?;
        if layers == 0 {
            return Err(NotationError::ZeroLayers(s.to_owned()));
        }
        base = base.with_depth(layers);
    }
    let amount: i32 = match amount {
        "" => 1,
        digits => digits.parse().map_err(overflow_err)?,
    };

    let mut mv = puzzle
        .resolve_move(&base, reversed, config)
        .ok_or_else(|| NotationError::UnknownMove {
            name: name.to_owned(),
            puzzle: puzzle.name(),
        })?;
    mv.dir = mv
        .dir
        .checked_mul(amount)
        .ok_or_else(|| NotationError::Overflow(s.to_owned()))?;
    Ok(mv)
}

/// Parses a whitespace-separated sequence of moves.
pub fn parse_sequence(
    puzzle: &dyn PuzzleType,
    s: &str,
    config: &PuzzleConfig,
) -> Result<Vec<Move>, NotationError> {
    s.split_whitespace()
        .map(|token| parse_move(puzzle, token, config))
        .collect()
}

/// Formats a sequence of moves separated by spaces.
pub fn format_sequence(puzzle: &dyn PuzzleType, moves: &[Move], config: &PuzzleConfig) -> String {
    moves.iter().map(|mv| puzzle.move_name(mv, config)).join(" ")
}

/// Formats a move given its layer count, name, and number of clockwise
/// turns. A layer count of 1 is omitted.
pub(crate) fn format_move(layers: u32, name: &str, clockwise_turns: i32) -> String {
    let prefix = match layers {
        1 => String::new(),
        n => n.to_string(),
    };
    let suffix = match clockwise_turns {
        1 => String::new(),
        -1 => "'".to_owned(),
        n if n < 0 => format!("{}'", n.unsigned_abs()),
        n => n.to_string(),
    };
    format!("{prefix}{name}{suffix}")
}

fn split_digits(s: &str) -> (&str, &str) {
    s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_move() {
        assert_eq!(format_move(1, "U", 1), "U");
        assert_eq!(format_move(1, "U", -1), "U'");
        assert_eq!(format_move(2, "R", 2), "2R2");
        assert_eq!(format_move(3, "DBR", -2), "3DBR2'");
        assert_eq!(format_move(1, "F", 0), "F0");
    }

    #[test]
    fn test_split_digits() {
        assert_eq!(split_digits("12Rw"), ("12", "Rw"));
        assert_eq!(split_digits("U"), ("", "U"));
        assert_eq!(split_digits("'"), ("", "'"));
    }
}

//! User preferences.
//!
//! Defaults are embedded from `default.yaml`. A user file, if any, is layered
//! on top of them, so it only needs to mention the values it changes.

use std::path::Path;

use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use trefoil_math::prelude::*;
use trefoil_puzzle::{PuzzleConfig, PuzzleKind};

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

/// Maximum field of view, in degrees.
const MAX_FOV: Float = 120.0;
/// Maximum duration of one twist, in seconds.
const MAX_TWIST_DURATION: f32 = 10.0;

lazy_static! {
    /// Built-in preferences.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// All user preferences.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Puzzle to load on startup.
    pub puzzle: PuzzleKind,
    /// Twist animation settings.
    pub animation: AnimationPreferences,
    /// Camera settings.
    pub view: ViewPreferences,

    /// Cube settings.
    pub cube: PuzzleConfig,
    /// Pyraminx settings.
    pub pyraminx: PuzzleConfig,
    /// Megaminx settings.
    pub megaminx: PuzzleConfig,
}
impl Preferences {
    /// Loads the default preferences, overridden by the YAML file at `path` if
    /// there is one.
    pub fn load(path: Option<&Path>) -> eyre::Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = path {
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }

        let prefs: Self = config
            .build()
            .and_then(|c| c.try_deserialize())
            .wrap_err("error loading preferences")?;
        Ok(prefs.normalized())
    }

    /// Same as [`Preferences::load()`], but falls back to the defaults if
    /// loading fails.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Returns the config for a puzzle.
    pub fn config(&self, kind: PuzzleKind) -> &PuzzleConfig {
        match kind {
            PuzzleKind::Cube => &self.cube,
            PuzzleKind::Pyraminx => &self.pyraminx,
            PuzzleKind::Megaminx => &self.megaminx,
        }
    }
    /// Returns the config for a puzzle.
    pub fn config_mut(&mut self, kind: PuzzleKind) -> &mut PuzzleConfig {
        match kind {
            PuzzleKind::Cube => &mut self.cube,
            PuzzleKind::Pyraminx => &mut self.pyraminx,
            PuzzleKind::Megaminx => &mut self.megaminx,
        }
    }

    /// Clamps every value to valid bounds.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for kind in [PuzzleKind::Cube, PuzzleKind::Pyraminx, PuzzleKind::Megaminx] {
            let config = self.config(kind).clone();
            *self.config_mut(kind) = kind.puzzle().normalize_config(config);
        }
        // `max()` also replaces NaN.
        self.animation.twist_duration = self.animation.twist_duration.max(0.0);
        self.animation.twist_duration = self.animation.twist_duration.min(MAX_TWIST_DURATION);
        self.view.fov = if self.view.fov.is_finite() {
            self.view.fov.clamp(-MAX_FOV, MAX_FOV)
        } else {
            0.0
        };
        self
    }
}

/// Twist animation preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Whether to speed up twists when several are queued.
    pub dynamic_twist_speed: bool,
    /// Duration of one twist, in seconds.
    pub twist_duration: f32,
    /// Easing applied to twist progress.
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            dynamic_twist_speed: true,
            twist_duration: 0.2,
            twist_interpolation: InterpolateFn::default(),
        }
    }
}

/// Camera preferences for the perspective view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewPreferences {
    /// Rotation about the vertical axis, in degrees.
    pub yaw: Float,
    /// Rotation about the horizontal axis, in degrees.
    pub pitch: Float,
    /// Field of view, in degrees. 0 is orthographic.
    pub fov: Float,
    /// Size of the puzzle relative to the view.
    pub scale: Float,
    /// Degrees of rotation per unit of mouse drag.
    pub drag_sensitivity: Float,
}
impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            yaw: -30.0,
            pitch: 25.0,
            fov: 30.0,
            scale: 0.9,
            drag_sensitivity: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_prefs_match_builtin_configs() {
        let prefs = Preferences::load(None).unwrap();
        assert_eq!(prefs, *DEFAULT_PREFS);
        assert_eq!(prefs.animation, AnimationPreferences::default());
        assert_eq!(prefs.view, ViewPreferences::default());
        for kind in [PuzzleKind::Cube, PuzzleKind::Pyraminx, PuzzleKind::Megaminx] {
            assert_eq!(*prefs.config(kind), kind.default_config());
        }
    }

    #[test]
    fn test_user_prefs_override_defaults() {
        let file_name = format!("trefoil_prefs_{}.yaml", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "puzzle: megaminx").unwrap();
        writeln!(file, "animation:").unwrap();
        writeln!(file, "  twist_interpolation: bounce").unwrap();
        writeln!(file, "cube:").unwrap();
        writeln!(file, "  size: 99").unwrap();
        drop(file);

        let prefs = Preferences::load(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(prefs.puzzle, PuzzleKind::Megaminx);
        assert_eq!(prefs.animation.twist_interpolation, InterpolateFn::Bounce);
        assert_eq!(prefs.animation.twist_duration, 0.2);
        assert_eq!(prefs.cube.size, 10);
        assert_eq!(prefs.cube.scramble_length, 25);
        assert_eq!(prefs.pyraminx, DEFAULT_PREFS.pyraminx);
    }

    #[test]
    fn test_missing_prefs_file_falls_back() {
        let path = Path::new("/nonexistent/trefoil/prefs.yaml");
        assert!(Preferences::load(Some(path)).is_err());
        assert_eq!(Preferences::load_or_default(Some(path)), *DEFAULT_PREFS);
    }
}

use serde::{Deserialize, Serialize};
use trefoil_math::prelude::*;

/// Key on the keyboard.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Letter or symbol key. Uppercase letters count as shifted.
    Char(char),
    /// Number key.
    Digit(u8),
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Escape key.
    Escape,
}
impl Key {
    /// Returns the screen direction of an arrow key, with +Y up.
    pub fn screen_direction(self) -> Option<Vec2> {
        match self {
            Key::ArrowUp => Some(Vec2::unit_y()),
            Key::ArrowDown => Some(-Vec2::unit_y()),
            Key::ArrowLeft => Some(-Vec2::unit_x()),
            Key::ArrowRight => Some(Vec2::unit_x()),
            _ => None,
        }
    }
}

/// View that a click landed in.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Perspective view of the whole puzzle.
    #[default]
    Perspective,
    /// Trefoil diagram, which only exists for the cube.
    Trefoil,
}

/// User input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Key press.
    KeyDown {
        /// Key that was pressed.
        key: Key,
        /// Whether shift was held.
        #[serde(default)]
        shift: bool,
    },
    /// Mouse click, in the coordinates of the view (+Y up).
    Click {
        /// View that was clicked.
        #[serde(default)]
        view: ViewKind,
        /// Position of the click.
        pos: Vec2,
    },
    /// Mouse drag in the perspective view.
    Drag {
        /// Horizontal drag distance.
        dx: Float,
        /// Vertical drag distance, positive downward.
        dy: Float,
    },
}

//! Animation, projection, selection, and input handling for the Trefoil
//! puzzle simulator.
//!
//! [`PuzzleSimulation`] owns everything about one loaded puzzle. Frontends
//! feed it [`InputEvent`]s and call [`PuzzleSimulation::tick()`] once per
//! frame to get a [`Frame`] to draw.

#[macro_use]
extern crate lazy_static;

mod animation;
mod camera;
mod input;
mod prefs;
pub mod render3d;
mod selection;
mod simulation;
pub mod trefoil;


pub use animation::{AnimationFrame, AnimationQueue};
pub use camera::Camera;
pub use input::{InputEvent, Key, ViewKind};
pub use prefs::{AnimationPreferences, DEFAULT_PREFS, Preferences, ViewPreferences};
pub use render3d::Polygon3d;
pub use selection::{Selection, resolve_arrow_move};
pub use simulation::{Frame, PuzzleSimulation};
pub use trefoil::{Ring2d, Sticker2d, TrefoilLayout};

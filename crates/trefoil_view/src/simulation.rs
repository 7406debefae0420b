use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use trefoil_math::prelude::*;
use trefoil_puzzle::scramble::seeded_rng;
use trefoil_puzzle::{BaseMove, Move, Piece, PuzzleConfig, PuzzleKind, PuzzleType};
use web_time::Instant;

use crate::render3d::{self, Polygon3d};
use crate::trefoil::{self, Ring2d, Sticker2d, TrefoilLayout};
use crate::{
    AnimationFrame, AnimationPreferences, AnimationQueue, Camera, InputEvent, Key, Preferences,
    Selection, ViewKind,
};

/// Everything needed to draw one frame.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Frame {
    /// Loaded puzzle.
    pub puzzle: PuzzleKind,
    /// Faces in the perspective view, sorted back to front.
    pub polygons: Vec<Polygon3d>,
    /// Stickers in the trefoil diagram. Empty for puzzles other than the
    /// cube.
    pub stickers_2d: Vec<Sticker2d>,
    /// Rings in the trefoil diagram. Empty for puzzles other than the cube.
    pub rings_2d: Vec<Ring2d>,
    /// Move in flight.
    pub current_move: Option<Move>,
    /// Notation for the move in flight.
    pub current_move_name: Option<String>,
    /// Linear progress of the move in flight.
    pub progress: Float,
    /// Eased progress of the move in flight.
    pub eased_progress: Float,
    /// Whether the committed state is solved.
    pub solved: bool,
}

/// Puzzle simulation, which manages the piece store, animations, undo stack,
/// selection, and camera.
#[derive(Debug)]
pub struct PuzzleSimulation {
    kind: PuzzleKind,
    /// Normalized config of the loaded puzzle.
    config: PuzzleConfig,
    /// Latest committed state, not including the move in flight.
    pieces: Vec<Piece>,

    anim: AnimationQueue,
    /// Animation settings, which may be changed at any time.
    pub animation_prefs: AnimationPreferences,
    /// Latest animation frame, used for hit testing between ticks.
    last_anim: Option<AnimationFrame>,

    selection: Option<Selection>,
    /// Camera for the perspective view.
    pub camera: Camera,
    /// Trefoil diagram layout, if the puzzle has one.
    trefoil: Option<TrefoilLayout>,

    rng: ChaCha8Rng,
    /// Seed that `rng` was constructed from.
    seed: u64,
    /// Moves queued by the user since the last reset or scramble.
    undo_stack: Vec<Move>,
}
impl PuzzleSimulation {
    /// Constructs a simulation of the startup puzzle in `prefs`.
    pub fn new(prefs: &Preferences) -> Self {
        let kind = prefs.puzzle;
        let config = kind.puzzle().normalize_config(prefs.config(kind).clone());
        let (seed, rng) = seeded_rng(config.seed);
        let mut ret = Self {
            kind,
            pieces: vec![],
            config,

            anim: AnimationQueue::default(),
            animation_prefs: prefs.animation.clone(),
            last_anim: None,

            selection: None,
            camera: Camera::from_prefs(&prefs.view),
            trefoil: None,

            rng,
            seed,
            undo_stack: vec![],
        };
        ret.rebuild();
        ret
    }

    /// Returns the loaded puzzle.
    pub fn puzzle(&self) -> &'static dyn PuzzleType {
        self.kind.puzzle()
    }
    /// Returns which puzzle is loaded.
    pub fn kind(&self) -> PuzzleKind {
        self.kind
    }
    /// Returns the normalized config of the loaded puzzle.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }
    /// Returns the committed piece store.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
    /// Returns the selected sticker.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }
    /// Returns the seed of the scramble generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }
    /// Returns the moves that [`PuzzleSimulation::undo()`] would undo, oldest
    /// first.
    pub fn undo_stack(&self) -> &[Move] {
        &self.undo_stack
    }
    /// Returns whether any moves are animating or waiting to animate.
    pub fn is_animating(&self) -> bool {
        !self.anim.is_idle()
    }

    /// Replaces the puzzle with a solved puzzle of a different kind or config.
    pub fn load_puzzle(&mut self, kind: PuzzleKind, config: PuzzleConfig) {
        let config = kind.puzzle().normalize_config(config);
        log::info!("loading {kind} with size {}", config.size);
        if config.seed.is_some() && config.seed != self.config.seed {
            (self.seed, self.rng) = seeded_rng(config.seed);
        }
        self.kind = kind;
        self.config = config;
        self.rebuild();
    }

    /// Changes the config of the loaded puzzle. The puzzle is only reset if
    /// the change affects the shape of the pieces.
    pub fn set_config(&mut self, config: PuzzleConfig) {
        let config = self.puzzle().normalize_config(config);
        if self.config.is_structural_change(&config) {
            self.load_puzzle(self.kind, config);
        } else {
            if config.seed.is_some() && config.seed != self.config.seed {
                (self.seed, self.rng) = seeded_rng(config.seed);
            }
            self.config = config;
        }
    }

    /// Resets the puzzle to the solved state, discarding any moves in flight.
    pub fn reset(&mut self) {
        self.rebuild();
    }

    /// Resets the puzzle and then applies a random scramble without
    /// animating it. Returns the scramble.
    pub fn scramble(&mut self) -> Vec<Move> {
        self.rebuild();
        let scramble = self.puzzle().generate_scramble(&self.config, &mut self.rng);
        log::debug!("scrambling {} with {} moves", self.kind, scramble.len());
        for &mv in &scramble {
            self.anim.push(mv);
        }
        self.anim.finish_all(self.puzzle(), &mut self.pieces);
        scramble
    }

    /// Queues a move to animate and records it for undo.
    pub fn queue_move(&mut self, mv: Move) {
        self.anim.push(mv);
        self.undo_stack.push(mv);
    }

    /// Queues the inverse of the last move queued by the user. Returns the
    /// move that was undone, if any.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.undo_stack.pop()?;
        self.anim.push(mv.inverse());
        Some(mv)
    }

    /// Immediately applies every pending move.
    pub fn finish_animations(&mut self) {
        self.anim.finish_all(self.puzzle(), &mut self.pieces);
        self.last_anim = None;
    }

    /// Returns whether every face of the committed state shows a single
    /// color.
    pub fn is_solved(&self) -> bool {
        self.puzzle().is_solved(&self.pieces, &self.config)
    }

    /// Advances the animation to `now` and returns the frame to draw.
    pub fn tick(&mut self, now: Instant) -> Frame {
        let puzzle = self.puzzle();
        self.last_anim = self
            .anim
            .tick(now, &self.animation_prefs, puzzle, &mut self.pieces);
        let anim = self.last_anim.as_ref();

        let polygons = self.polygons();
        let stickers_2d = self.stickers_2d();
        let rings_2d = self.trefoil.map(|t| t.rings()).unwrap_or_default();

        Frame {
            puzzle: self.kind,
            polygons,
            stickers_2d,
            rings_2d,
            current_move: anim.map(|a| a.mv),
            current_move_name: anim.map(|a| puzzle.move_name(&a.mv, &self.config)),
            progress: anim.map_or(0.0, |a| a.progress),
            eased_progress: anim.map_or(0.0, |a| a.eased),
            solved: self.is_solved(),
        }
    }

    /// Handles user input. Returns the move that was queued, if any.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<Move> {
        match *event {
            InputEvent::KeyDown { key, shift } => self.handle_key(key, shift),
            InputEvent::Click { view, pos } => {
                self.selection = self.pick(view, pos);
                log::trace!("selected {:?}", self.selection);
                None
            }
            InputEvent::Drag { dx, dy } => {
                self.camera.drag(dx, dy);
                None
            }
        }
    }

    fn handle_key(&mut self, key: Key, shift: bool) -> Option<Move> {
        let mv = match key {
            Key::Char(c) => {
                let reversed = shift || c.is_uppercase();
                let c = c.to_ascii_lowercase();
                let &(_, name) = self.puzzle().key_bindings().iter().find(|(k, _)| *k == c)?;
                let base = BaseMove::new(name).with_depth(self.config.selected_depth);
                self.puzzle().resolve_move(&base, reversed, &self.config)?
            }
            Key::Digit(depth) => {
                let config = PuzzleConfig {
                    selected_depth: depth as u32,
                    ..self.config.clone()
                };
                self.set_config(config);
                return None;
            }
            Key::Escape => {
                self.selection = None;
                return None;
            }
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                self.resolve_arrow_move(key.screen_direction()?)?
            }
        };
        self.queue_move(mv);
        Some(mv)
    }

    /// Returns the move that pushes the selected sticker in a direction on
    /// the screen (+Y up), or `None` if nothing is selected or no move can.
    ///
    /// Selections made in either view are resolved against the perspective
    /// camera.
    pub fn resolve_arrow_move(&self, screen_direction: Vec2) -> Option<Move> {
        let selection = self.selection?;
        let direction = self.camera.screen_to_world(screen_direction);
        crate::selection::resolve_arrow_move(self.puzzle(), &self.pieces, selection, direction)
    }

    fn pick(&self, view: ViewKind, pos: Vec2) -> Option<Selection> {
        match view {
            ViewKind::Perspective => {
                let polygons = self.polygons();
                let hit = render3d::hit_test(&polygons, pos)?;
                hit.color.is_some().then_some(Selection {
                    piece: hit.piece,
                    face_slot: hit.face_slot,
                })
            }
            ViewKind::Trefoil => {
                let stickers = self.stickers_2d();
                let hit = trefoil::hit_test(&stickers, pos)?;
                Some(Selection {
                    piece: hit.piece,
                    face_slot: hit.face_slot,
                })
            }
        }
    }

    fn polygons(&self) -> Vec<Polygon3d> {
        render3d::project_pieces(
            self.puzzle(),
            &self.pieces,
            &self.camera,
            self.last_anim.as_ref(),
            self.selection,
        )
    }

    fn stickers_2d(&self) -> Vec<Sticker2d> {
        let Some(layout) = self.trefoil else {
            return vec![];
        };
        layout.stickers(
            self.puzzle(),
            &self.pieces,
            &self.config,
            self.last_anim.as_ref(),
            self.selection,
        )
    }

    /// Replaces the piece store with a solved puzzle and clears all transient
    /// state.
    fn rebuild(&mut self) {
        self.anim.clear();
        self.last_anim = None;
        self.selection = None;
        self.undo_stack.clear();
        self.pieces = self.puzzle().create_pieces(&self.config);
        self.trefoil = match self.kind {
            PuzzleKind::Cube => Some(TrefoilLayout::new(self.config.size)),
            PuzzleKind::Pyraminx | PuzzleKind::Megaminx => None,
        };
    }
}

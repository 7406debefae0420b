use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use eyre::{Context, Result, bail};
use serde::Serialize;
use strum::VariantArray;
use trefoil_puzzle::notation::{format_sequence, parse_sequence};
use trefoil_puzzle::{Move, PuzzleConfig, PuzzleKind, Rgb};
use trefoil_view::{InputEvent, Preferences, PuzzleSimulation};
use web_time::{Duration, Instant};

/// Trefoil puzzle simulator command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// YAML preferences file, layered over the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

/// Which puzzle to load.
#[derive(clap::Args, Debug, Default, Clone)]
pub(crate) struct PuzzleArgs {
    /// Puzzle to load (`cube`, `pyraminx`, or `megaminx`). Defaults to the
    /// startup puzzle in the preferences.
    #[arg(short, long)]
    pub puzzle: Option<PuzzleKind>,
    /// Number of layers.
    #[arg(short = 'n', long)]
    pub size: Option<u32>,
    /// Seed for the scramble generator.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print information about every supported puzzle as JSON.
    Puzzles,
    /// Print a random scramble as JSON.
    Scramble {
        #[command(flatten)]
        puzzle: PuzzleArgs,
        /// Number of moves. Defaults to the preferences.
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Apply moves and input events, then print the resulting sticker state
    /// as JSON.
    Simulate {
        #[command(flatten)]
        puzzle: PuzzleArgs,
        /// Scramble the puzzle first.
        #[arg(long)]
        scramble: bool,
        /// Moves to apply, such as "R U R' U'".
        #[arg(short, long, default_value = "")]
        moves: String,
        /// File of input events, one JSON object per line. Use '-' for stdin.
        #[arg(long, value_parser)]
        events: Option<clio::Input>,
    },
    /// Print the frame drawn partway through the last move as JSON.
    Render {
        #[command(flatten)]
        puzzle: PuzzleArgs,
        /// Moves to apply. All but the last are applied instantly.
        #[arg(short, long, default_value = "")]
        moves: String,
        /// Progress of the last move, from 0 to 1.
        #[arg(long, default_value_t = 0.5)]
        progress: f64,
        /// Camera yaw, in degrees.
        #[arg(long, allow_negative_numbers = true)]
        yaw: Option<f64>,
        /// Camera pitch, in degrees.
        #[arg(long, allow_negative_numbers = true)]
        pitch: Option<f64>,
    },
}

#[derive(Serialize, Debug)]
struct PuzzleInfo {
    id: PuzzleKind,
    name: &'static str,
    min_size: u32,
    max_size: u32,
    faces: &'static [&'static str],
    colors: &'static [Rgb],
    keys: BTreeMap<char, &'static str>,
}

#[derive(Serialize, Debug)]
struct ScrambleOutput {
    puzzle: PuzzleKind,
    size: u32,
    seed: u64,
    scramble: String,
}

#[derive(Serialize, Debug, PartialEq)]
struct SimulationOutput {
    puzzle: PuzzleKind,
    size: u32,
    scramble: Option<String>,
    moves: String,
    solved: bool,
    /// Colors showing on each face, in piece order.
    faces: BTreeMap<&'static str, Vec<Rgb>>,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = Preferences::load(args.prefs.as_deref())?;

    match args.subcommand {
        Subcommand::Puzzles => {
            let info = PuzzleKind::VARIANTS.iter().map(|&kind| {
                let puzzle = kind.puzzle();
                PuzzleInfo {
                    id: kind,
                    name: puzzle.name(),
                    min_size: *puzzle.size_range().start(),
                    max_size: *puzzle.size_range().end(),
                    faces: puzzle.face_names(),
                    colors: puzzle.palette(),
                    keys: puzzle.key_bindings().iter().copied().collect(),
                }
            });
            write_json_output(&info.collect::<Vec<_>>())
        }

        Subcommand::Scramble { puzzle, length } => {
            let mut sim = load(&prefs, &puzzle);
            if let Some(scramble_length) = length {
                let config = PuzzleConfig {
                    scramble_length,
                    ..sim.config().clone()
                };
                sim.set_config(config);
            }
            let scramble = sim.scramble();
            write_json_output(&ScrambleOutput {
                puzzle: sim.kind(),
                size: sim.config().size,
                seed: sim.seed(),
                scramble: format_sequence(sim.puzzle(), &scramble, sim.config()),
            })
        }

        Subcommand::Simulate {
            puzzle,
            scramble,
            moves,
            events,
        } => {
            let mut sim = load(&prefs, &puzzle);
            let scramble = scramble.then(|| {
                let scramble = sim.scramble();
                format_sequence(sim.puzzle(), &scramble, sim.config())
            });

            for mv in parse_moves(&sim, &moves)? {
                sim.queue_move(mv);
            }
            if let Some(events) = events {
                for (i, line) in BufReader::new(events).lines().enumerate() {
                    let line = line.context("error reading input events")?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    let event: InputEvent = serde_json::from_str(&line)
                        .wrap_err_with(|| format!("invalid input event on line {}", i + 1))?;
                    sim.handle_input(&event);
                }
            }
            sim.finish_animations();

            write_json_output(&simulation_output(&sim, scramble))
        }

        Subcommand::Render {
            puzzle,
            moves,
            progress,
            yaw,
            pitch,
        } => {
            if !(0.0..=1.0).contains(&progress) {
                bail!("progress must be between 0 and 1");
            }
            let mut sim = load(&prefs, &puzzle);
            sim.camera.yaw = yaw.unwrap_or(sim.camera.yaw);
            sim.camera.pitch = pitch.unwrap_or(sim.camera.pitch).clamp(-90.0, 90.0);

            let mut moves = parse_moves(&sim, &moves)?;
            let last = moves.pop();
            for mv in moves {
                sim.queue_move(mv);
            }
            sim.finish_animations();

            sim.animation_prefs.dynamic_twist_speed = false;
            let duration = sim.animation_prefs.twist_duration as f64;
            let t0 = Instant::now();
            let mut frame = sim.tick(t0);
            if let Some(mv) = last {
                sim.queue_move(mv);
                sim.tick(t0);
                let elapsed = Duration::from_secs_f64(duration * progress);
                frame = sim.tick(t0 + elapsed);
            }
            write_json_output(&frame)
        }
    }
}

/// Constructs a simulation of the requested puzzle.
fn load(prefs: &Preferences, args: &PuzzleArgs) -> PuzzleSimulation {
    let mut prefs = prefs.clone();
    if let Some(kind) = args.puzzle {
        prefs.puzzle = kind;
    }
    let config = prefs.config_mut(prefs.puzzle);
    if let Some(size) = args.size {
        config.size = size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let sim = PuzzleSimulation::new(&prefs.normalized());
    if args.size.is_some_and(|size| size != sim.config().size) {
        log::warn!(
            "{} does not support size {:?}; using {}",
            sim.kind(),
            args.size,
            sim.config().size,
        );
    }
    sim
}

fn parse_moves(sim: &PuzzleSimulation, moves: &str) -> Result<Vec<Move>> {
    parse_sequence(sim.puzzle(), moves, sim.config()).wrap_err("error parsing moves")
}

fn simulation_output(sim: &PuzzleSimulation, scramble: Option<String>) -> SimulationOutput {
    let puzzle = sim.puzzle();
    let mut faces: BTreeMap<&'static str, Vec<Rgb>> = BTreeMap::new();
    for piece in sim.pieces() {
        for (slot, sticker) in piece.stickered_slots() {
            let face = puzzle.detect_world_face(piece, &piece.faces[slot], sim.config());
            let name = face.and_then(|f| puzzle.face_names().get(f).copied());
            let color = puzzle.palette().get(sticker.color).copied();
            if let (Some(name), Some(color)) = (name, color) {
                faces.entry(name).or_default().push(color);
            }
        }
    }

    SimulationOutput {
        puzzle: sim.kind(),
        size: sim.config().size,
        scramble,
        moves: format_sequence(puzzle, sim.undo_stack(), sim.config()),
        solved: sim.is_solved(),
        faces,
    }
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

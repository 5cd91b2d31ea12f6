use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use cube_solver::{
    heuristic::{AdmissibleHeuristic, MisplacedCubies, MisplacedFacelets, ZeroHeuristic},
    puzzle::{Move, PuzzleState, cubie::CubieCube, facelet::FaceletCube},
    solver::IdaStarSolver,
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};

mod config;
mod render;

use config::{HeuristicKind, Model, SolverConfig};
use render::{RenderState, render_net, render_steps};

/// Solves 3x3 cube scrambles optimally with IDA*
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Solver defaults in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// The cube representation to search over.
    #[arg(long, value_enum)]
    model: Option<Model>,

    /// The admissible heuristic guiding the search.
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicKind>,

    /// Give up once the search bound passes this many moves.
    #[arg(long)]
    max_bound: Option<u32>,

    /// Print the cube after every move of the scramble and the solution.
    #[arg(long)]
    show_path: bool,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble a solved cube with a move sequence and solve it.
    Solve {
        /// The scramble, e.g. "r u ir iu".
        sequence: String,
    },
    /// Scramble a solved cube with random moves and solve it.
    Random {
        /// Seed for the scramble. A random seed is used if omitted.
        #[arg(long)]
        seed: Option<u64>,
        /// The number of random moves.
        #[arg(long, short = 'n')]
        length: Option<usize>,
    },
    /// Print the cube after every move of (r u ir iu) repeated six times.
    Demo,
    /// Print the cube after a move sequence, or after every move with
    /// `--show-path`.
    Show {
        /// The move sequence, e.g. "r b f".
        sequence: String,
    },
}

enum Scramble {
    Sequence(String),
    Random { seed: u64, length: usize },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = match &cli.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(heuristic) = cli.heuristic {
        config.heuristic = heuristic;
    }
    if cli.max_bound.is_some() {
        config.max_bound = cli.max_bound;
    }
    info!("Using {config:?}");

    match cli.command {
        Commands::Solve { sequence } => {
            run_solve(&config, &Scramble::Sequence(sequence), cli.show_path)
        }
        Commands::Random { seed, length } => {
            let scramble = Scramble::Random {
                seed: seed.or(config.seed).unwrap_or_else(|| fastrand::u64(..)),
                length: length.unwrap_or(config.scramble_length),
            };
            run_solve(&config, &scramble, cli.show_path)
        }
        Commands::Demo => run_demo(),
        Commands::Show { sequence } => {
            let cube = scramble_cube::<FaceletCube>(&Scramble::Sequence(sequence), cli.show_path)?;
            if !cli.show_path {
                print!("{}", render_net(&cube));
            }
            Ok(())
        }
    }
}

fn run_solve(config: &SolverConfig, scramble: &Scramble, show_path: bool) -> color_eyre::Result<()> {
    match (config.model, config.heuristic) {
        (Model::Facelet, HeuristicKind::Misplaced) => {
            solve_and_report::<FaceletCube, _>(config, scramble, MisplacedFacelets, show_path)
        }
        (Model::Facelet, HeuristicKind::Zero) => {
            solve_and_report::<FaceletCube, _>(config, scramble, ZeroHeuristic, show_path)
        }
        (Model::Cubie, HeuristicKind::Misplaced) => {
            solve_and_report::<CubieCube, _>(config, scramble, MisplacedCubies, show_path)
        }
        (Model::Cubie, HeuristicKind::Zero) => {
            solve_and_report::<CubieCube, _>(config, scramble, ZeroHeuristic, show_path)
        }
    }
}

fn scramble_moves<P: PuzzleState>(scramble: &Scramble) -> color_eyre::Result<Vec<&'static Move<P>>> {
    let catalog = P::catalog();
    match scramble {
        Scramble::Sequence(sequence) => Ok(catalog
            .parse_sequence(sequence)?
            .into_iter()
            .map(|move_index| &catalog.moves()[move_index])
            .collect()),
        Scramble::Random { seed, length } => {
            info!("Scrambling with seed {seed}");
            Ok(P::new_solved().shuffle(&mut fastrand::Rng::with_seed(*seed), *length))
        }
    }
}

/// Scramble a solved cube, printing the scramble and, with `show_path`, the
/// cube after each of its moves.
fn scramble_cube<P: PuzzleState + RenderState>(
    scramble: &Scramble,
    show_path: bool,
) -> color_eyre::Result<P> {
    let moves = scramble_moves::<P>(scramble)?;
    println!("Scramble: {}", moves.iter().map(|move_| &move_.name).join(" "));

    let solved = P::new_solved();
    let states = moves
        .iter()
        .scan(solved.clone(), |cube, move_| {
            cube.apply_rotation(&move_.rotation);
            Some(cube.clone())
        })
        .collect_vec();
    if show_path {
        print!(
            "{}",
            render_steps(&solved, moves.iter().map(|move_| &move_.name).zip(&states))
        );
    }
    Ok(states.last().cloned().unwrap_or(solved))
}

fn solve_and_report<P: PuzzleState + RenderState, H: AdmissibleHeuristic<P>>(
    config: &SolverConfig,
    scramble: &Scramble,
    heuristic: H,
    show_path: bool,
) -> color_eyre::Result<()> {
    let cube = scramble_cube::<P>(scramble, show_path)?;

    let mut solver = IdaStarSolver::new(heuristic);
    if let Some(max_bound) = config.max_bound {
        solver = solver.with_max_bound(max_bound);
    }
    let solution = solver
        .solve(&cube)
        .map_err(|e| eyre!("Could not solve the scramble: {e}"))?;
    println!("Solution ({} moves): {solution}", solution.cost());

    if show_path {
        let mut states = solution.states();
        if let Some(root) = states.next() {
            print!(
                "{}",
                render_steps(root, solution.moves().map(|move_| &move_.name).zip(states))
            );
        }
    }
    Ok(())
}

fn run_demo() -> color_eyre::Result<()> {
    let pattern = "r u ir iu";
    let catalog = FaceletCube::catalog();
    let moves = catalog.parse_sequence(pattern)?;

    let mut cube = FaceletCube::new_solved();
    println!("Sexy move ({pattern})⁶");
    for (step, &move_index) in moves.iter().cycle().take(moves.len() * 6).enumerate() {
        let move_ = &catalog.moves()[move_index];
        cube.apply_rotation(&move_.rotation);
        println!("{}. {}", step + 1, move_.name);
        print!("{}", render_net(&cube));
    }
    if !cube.is_solved() {
        return Err(eyre!("The cube should be solved after six repetitions"));
    }
    println!("Solved again");
    Ok(())
}

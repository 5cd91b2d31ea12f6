use cube_solver::{
    heuristic::{AdmissibleHeuristic, MisplacedCubies, MisplacedFacelets, ZeroHeuristic},
    puzzle::{PuzzleState, RotationCatalog, apply_moves, cubie::CubieCube, facelet::FaceletCube},
    solver::{IdaStarSolver, SolverError, solve},
};
use itertools::Itertools;
use log::info;

fn scrambled<P: PuzzleState>(moves: &str) -> P {
    apply_moves(P::catalog(), &P::new_solved(), moves, 1).unwrap()
}

/// Check that a solution really solves `root` and never revisits a state.
fn assert_valid_solution<P: PuzzleState>(root: &P, solution_moves: &[&str]) {
    let catalog = P::catalog();
    let mut cube = root.clone();
    let mut seen = vec![cube.clone()];
    for name in solution_moves {
        cube.apply_rotation(&catalog.find_move(name).unwrap().rotation);
        assert!(!seen.contains(&cube), "state repeated in solution");
        seen.push(cube.clone());
    }
    assert!(cube.is_solved());
}

fn single_move<P: PuzzleState, H: AdmissibleHeuristic<P> + Copy>(heuristic: H) {
    let catalog = P::catalog();
    for move_ in catalog.moves() {
        let mut cube = P::new_solved();
        cube.apply_rotation(&move_.rotation);
        let solution = solve(&cube, heuristic).unwrap();
        assert_eq!(solution.cost(), 1);
        assert_eq!(solution.len(), 1);
        assert_eq!(solution.to_string(), catalog.inverse(move_).name);
    }
}

fn random_scrambles<P: PuzzleState, H: AdmissibleHeuristic<P> + Copy>(heuristic: H, seed: u64) {
    let mut rng = fastrand::Rng::with_seed(seed);
    for _ in 0..8 {
        let mut cube = P::new_solved();
        let scramble = cube.shuffle(&mut rng, 4);
        let solution = solve(&cube, heuristic).unwrap();
        info!(
            "{} solved by {}",
            scramble.iter().map(|move_| &move_.name).join(" "),
            solution
        );

        assert!(solution.len() <= scramble.len());
        assert_eq!(solution.cost() as usize, solution.len());
        assert_eq!(solution.states().next(), Some(&cube));
        assert!(solution.states().last().unwrap().is_solved());
        let names = solution.moves().map(|move_| move_.name.as_str()).collect_vec();
        assert_valid_solution(&cube, &names);
    }
}

#[test_log::test]
fn test_single_move_is_solved_by_its_inverse() {
    let solution = solve(&scrambled::<FaceletCube>("r"), MisplacedFacelets).unwrap();
    assert_eq!(solution.to_string(), "ir");
    assert_eq!(solution.cost(), 1);

    single_move::<FaceletCube, _>(MisplacedFacelets);
    single_move::<FaceletCube, _>(ZeroHeuristic);
    single_move::<CubieCube, _>(MisplacedCubies);
    single_move::<CubieCube, _>(ZeroHeuristic);
}

#[test_log::test]
fn test_optimal_two_moves() {
    let cube = scrambled::<FaceletCube>("r u");
    let solution = solve(&cube, MisplacedFacelets).unwrap();
    assert_eq!(solution.to_string(), "iu ir");
    assert_eq!(solution.cost(), 2);
}

#[test_log::test]
fn test_sexy_move() {
    let cube = scrambled::<FaceletCube>("r u ir iu");
    let solution = solve(&cube, MisplacedFacelets).unwrap();
    assert_eq!(solution.len(), 4);
    assert_valid_solution(&cube, &solution.moves().map(|move_| move_.name.as_str()).collect_vec());

    let cube = scrambled::<CubieCube>("r u ir iu");
    let solution = solve(&cube, MisplacedCubies).unwrap();
    assert_eq!(solution.len(), 4);
}

#[test_log::test]
fn test_random_scrambles() {
    random_scrambles::<FaceletCube, _>(MisplacedFacelets, 10);
    random_scrambles::<CubieCube, _>(MisplacedCubies, 10);
}

fn heuristics_agree<P: PuzzleState, H: AdmissibleHeuristic<P> + Copy>(heuristic: H, seed: u64) {
    let mut rng = fastrand::Rng::with_seed(seed);
    for _ in 0..4 {
        let cube = P::new_shuffled(&mut rng, 3);
        let informed = solve(&cube, heuristic).unwrap();
        let uninformed = solve(&cube, ZeroHeuristic).unwrap();
        assert_eq!(informed.len(), uninformed.len());
    }
}

#[test_log::test]
fn test_heuristics_agree_on_length() {
    heuristics_agree::<FaceletCube, _>(MisplacedFacelets, 20);
    heuristics_agree::<CubieCube, _>(MisplacedCubies, 20);
}

#[test_log::test]
fn test_models_agree_on_length() {
    let mut rng = fastrand::Rng::with_seed(25);
    for _ in 0..4 {
        let mut facelet_cube = FaceletCube::new_solved();
        let scramble = facelet_cube
            .shuffle(&mut rng, 4)
            .iter()
            .map(|move_| &move_.name)
            .join(" ");
        let cubie_cube = scrambled::<CubieCube>(&scramble);

        let facelet_solution = solve(&facelet_cube, MisplacedFacelets).unwrap();
        let cubie_solution = solve(&cubie_cube, MisplacedCubies).unwrap();
        assert_eq!(facelet_solution.len(), cubie_solution.len(), "{scramble}");

        let names = facelet_solution.moves().map(|move_| move_.name.as_str()).collect_vec();
        assert_valid_solution(&cubie_cube, &names);
    }
}

#[test_log::test]
fn test_solution_is_deterministic() {
    let cube = FaceletCube::new_shuffled(&mut fastrand::Rng::with_seed(30), 4);
    let first = solve(&cube, MisplacedFacelets).unwrap().to_string();
    let second = solve(&cube, MisplacedFacelets).unwrap().to_string();
    assert_eq!(first, second);
}

#[test_log::test]
fn test_restricted_catalog() {
    let full = FaceletCube::catalog();
    let catalog = RotationCatalog::<FaceletCube>::new([
        ("r", full.find_move("r").unwrap().rotation.clone()),
        ("u", full.find_move("u").unwrap().rotation.clone()),
    ])
    .unwrap();
    let cube = scrambled::<FaceletCube>("r u r");
    let solution = IdaStarSolver::with_catalog(&catalog, MisplacedFacelets)
        .solve(&cube)
        .unwrap();
    assert_eq!(solution.to_string(), "ir iu ir");
}

#[test_log::test]
fn test_unreachable_goal_is_reported() {
    // Only U turns are allowed, which can never undo an R turn
    let u = FaceletCube::catalog().find_move("u").unwrap().rotation.clone();
    let catalog = RotationCatalog::<FaceletCube>::new([("u", u)]).unwrap();
    let cube = scrambled::<FaceletCube>("r");
    let result = IdaStarSolver::with_catalog(&catalog, ZeroHeuristic).solve(&cube);
    assert_eq!(result.unwrap_err(), SolverError::SolutionDoesNotExist);

    let result = IdaStarSolver::with_catalog(&catalog, MisplacedFacelets).solve(&cube);
    assert_eq!(result.unwrap_err(), SolverError::SolutionDoesNotExist);
}

#[test_log::test]
fn test_max_bound_exceeded() {
    let cube = scrambled::<CubieCube>("r u f");
    let result = IdaStarSolver::new(MisplacedCubies).with_max_bound(2).solve(&cube);
    assert_eq!(result.unwrap_err(), SolverError::MaxBoundExceeded(2));
}

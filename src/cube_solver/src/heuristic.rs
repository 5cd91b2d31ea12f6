//! Admissible heuristics for IDA* search. An admissible heuristic never
//! overestimates the number of moves left to reach the solved state. The
//! solver trusts this and does not check it; an inadmissible heuristic may
//! produce a longer than optimal solution.

use crate::puzzle::{PuzzleState, cubie::CubieCube, facelet::FaceletCube};

/// The most facelets a single face turn changes.
pub const FACELETS_PER_TURN: usize = 20;
/// The most cubies a single face turn moves.
pub const CUBIES_PER_TURN: usize = 8;

pub trait AdmissibleHeuristic<P: PuzzleState> {
    /// A lower bound on the number of moves needed to solve `puzzle_state`.
    /// Must be zero for the solved state.
    fn admissible_heuristic(&self, puzzle_state: &P) -> u32;
}

impl<P: PuzzleState, F: Fn(&P) -> u32> AdmissibleHeuristic<P> for F {
    fn admissible_heuristic(&self, puzzle_state: &P) -> u32 {
        self(puzzle_state)
    }
}

/// Turns IDA* into plain iterative deepening.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<P: PuzzleState> AdmissibleHeuristic<P> for ZeroHeuristic {
    fn admissible_heuristic(&self, _puzzle_state: &P) -> u32 {
        0
    }
}

/// Facelets out of place divided by the most a single turn can fix.
#[derive(Debug, Clone, Copy, Default)]
pub struct MisplacedFacelets;

impl AdmissibleHeuristic<FaceletCube> for MisplacedFacelets {
    fn admissible_heuristic(&self, puzzle_state: &FaceletCube) -> u32 {
        ceil_div(puzzle_state.misplaced_facelets(), FACELETS_PER_TURN)
    }
}

/// Cubies out of place or misoriented divided by the most a single turn can
/// fix.
#[derive(Debug, Clone, Copy, Default)]
pub struct MisplacedCubies;

impl AdmissibleHeuristic<CubieCube> for MisplacedCubies {
    fn admissible_heuristic(&self, puzzle_state: &CubieCube) -> u32 {
        ceil_div(puzzle_state.misplaced_cubies(), CUBIES_PER_TURN)
    }
}

// Both counts are at most 54 so this never truncates
#[allow(clippy::cast_possible_truncation)]
fn ceil_div(misplaced: usize, per_turn: usize) -> u32 {
    misplaced.div_ceil(per_turn) as u32
}

use crate::{
    heuristic::AdmissibleHeuristic,
    puzzle::{Move, PuzzleState, RotationCatalog},
    search_path::SearchPath,
    start, success, working,
};
use itertools::Itertools;
use log::{debug, info};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};
use thiserror::Error;

pub struct IdaStarSolver<'a, P: PuzzleState, H: AdmissibleHeuristic<P>> {
    catalog: &'a RotationCatalog<P>,
    heuristic: H,
    max_bound: Option<u32>,
    cancellation: Option<CancellationToken>,
}

struct IdaStarSolverMutable<P: PuzzleState> {
    path: SearchPath<P>,
    bound: u32,
    nodes_visited: u64,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolverError {
    #[error("The search space was exhausted without reaching the solved state")]
    SolutionDoesNotExist,
    #[error("Max bound of {0} exceeded")]
    MaxBoundExceeded(u32),
    #[error("The search was cancelled")]
    Cancelled,
}

/// The result of one bounded depth first search.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum SearchOutcome {
    /// The tip of the search path is solved.
    Solved,
    Cancelled,
    /// No solution within the bound. Holds the smallest `f = g + h` seen
    /// among the nodes that went over it.
    Exceeded(u32),
    /// Every branch below this node was skipped by the cycle check, so
    /// raising the bound cannot help.
    Exhausted,
}

/// A cooperative stop signal. Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

/// A child of a search node, produced by applying one catalog move.
#[derive(Debug, Clone)]
pub struct Successor<P: PuzzleState> {
    pub move_index: usize,
    pub puzzle_state: P,
    pub heuristic: u32,
}

/// An optimal solution. The path starts at the scrambled root and ends at the
/// solved state.
#[derive(Debug, Clone)]
pub struct Solution<'a, P: PuzzleState> {
    catalog: &'a RotationCatalog<P>,
    path: SearchPath<P>,
    cost: u32,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl<P: PuzzleState, H: AdmissibleHeuristic<P>> IdaStarSolver<'static, P, H> {
    /// A solver over the built-in move catalog of `P`.
    pub fn new(heuristic: H) -> Self {
        Self::with_catalog(P::catalog(), heuristic)
    }
}

impl<'a, P: PuzzleState, H: AdmissibleHeuristic<P>> IdaStarSolver<'a, P, H> {
    /// A solver restricted to the moves of `catalog`.
    pub fn with_catalog(catalog: &'a RotationCatalog<P>, heuristic: H) -> Self {
        Self {
            catalog,
            heuristic,
            max_bound: None,
            cancellation: None,
        }
    }

    /// Give up with `SolverError::MaxBoundExceeded` instead of raising the
    /// bound past `max_bound`.
    #[must_use]
    pub fn with_max_bound(mut self, max_bound: u32) -> Self {
        self.max_bound = Some(max_bound);
        self
    }

    /// Stop with `SolverError::Cancelled` once `token` is cancelled. The token
    /// is checked before every iteration and at every node.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Every child of `puzzle_state`, one per catalog move, ordered by
    /// ascending heuristic value. Ties keep catalog order. The ordering only
    /// steers the search toward promising branches first; it never affects
    /// optimality.
    pub fn successors(&self, puzzle_state: &P) -> Vec<Successor<P>> {
        let mut successors = self
            .catalog
            .moves()
            .iter()
            .enumerate()
            .map(|(move_index, move_)| {
                let mut successor = puzzle_state.clone();
                successor.apply_rotation(&move_.rotation);
                let heuristic = self.heuristic.admissible_heuristic(&successor);
                Successor {
                    move_index,
                    puzzle_state: successor,
                    heuristic,
                }
            })
            .collect_vec();
        successors.sort_by_key(|successor| successor.heuristic);
        successors
    }

    /// Bounded depth first search from the tip of the search path.
    /// `node_heuristic` is the heuristic value of that tip and `cost` the
    /// number of moves it took to get there.
    ///
    /// A successor is skipped if its state is already anywhere on the
    /// current branch, not only when it undoes the previous move.
    fn search_for_solution(
        &self,
        mutable: &mut IdaStarSolverMutable<P>,
        cost: u32,
        node_heuristic: u32,
    ) -> SearchOutcome {
        if self.is_cancelled() {
            return SearchOutcome::Cancelled;
        }
        mutable.nodes_visited += 1;

        let estimate = cost.saturating_add(node_heuristic);
        if estimate > mutable.bound {
            return SearchOutcome::Exceeded(estimate);
        }
        if mutable.path.last_state().is_solved() {
            return SearchOutcome::Solved;
        }

        let mut min_exceeded: Option<u32> = None;
        for Successor {
            move_index,
            puzzle_state,
            heuristic,
        } in self.successors(mutable.path.last_state())
        {
            if mutable.path.contains_state(&puzzle_state) {
                continue;
            }

            mutable.path.push(move_index, puzzle_state);
            match self.search_for_solution(mutable, cost + 1, heuristic) {
                // The first solution within the bound is optimal, so we
                // leave the path as is and unwind
                outcome @ (SearchOutcome::Solved | SearchOutcome::Cancelled) => return outcome,
                SearchOutcome::Exceeded(child_estimate) => {
                    min_exceeded = Some(min_exceeded.map_or(child_estimate, |m| m.min(child_estimate)));
                }
                SearchOutcome::Exhausted => {}
            }
            mutable.path.pop();
        }

        min_exceeded.map_or(SearchOutcome::Exhausted, SearchOutcome::Exceeded)
    }

    /// Find a shortest move sequence from `root` to the solved state using
    /// [iterative deepening A*][IDA]. Each iteration is a depth first search
    /// that prunes every node whose `f = g + h` is over the current bound.
    /// The next bound is the smallest `f` that was pruned, so the first
    /// solution found is optimal as long as the heuristic is admissible.
    ///
    /// [IDA]: https://en.wikipedia.org/wiki/Iterative_deepening_A*
    ///
    /// # Errors
    ///
    /// `SolutionDoesNotExist` if the solved state cannot be reached with the
    /// catalog moves, `MaxBoundExceeded` if the bound would pass the
    /// configured maximum and `Cancelled` if the cancellation token fired.
    pub fn solve(&self, root: &P) -> Result<Solution<'a, P>, SolverError> {
        info!(start!("Searching for an optimal solution"));
        let start = Instant::now();

        let root_heuristic = self.heuristic.admissible_heuristic(root);
        let mut mutable = IdaStarSolverMutable {
            path: SearchPath::new(root.clone()),
            bound: root_heuristic,
            nodes_visited: 0,
        };

        loop {
            if self.is_cancelled() {
                return Err(SolverError::Cancelled);
            }
            if let Some(max_bound) = self.max_bound.filter(|&max_bound| mutable.bound > max_bound) {
                return Err(SolverError::MaxBoundExceeded(max_bound));
            }

            debug!(working!("Searching bound {}..."), mutable.bound);
            let bound_start = Instant::now();
            mutable.nodes_visited = 0;
            let outcome = self.search_for_solution(&mut mutable, 0, root_heuristic);
            debug!(
                working!("Traversed {} nodes in {:.3}s"),
                mutable.nodes_visited,
                bound_start.elapsed().as_secs_f64()
            );

            match outcome {
                SearchOutcome::Solved => break,
                SearchOutcome::Cancelled => return Err(SolverError::Cancelled),
                SearchOutcome::Exhausted => return Err(SolverError::SolutionDoesNotExist),
                SearchOutcome::Exceeded(next_bound) => mutable.bound = next_bound,
            }
        }

        info!(
            success!("Solution found in {:.3}s at bound {}"),
            start.elapsed().as_secs_f64(),
            mutable.bound
        );
        Ok(Solution {
            catalog: self.catalog,
            path: mutable.path,
            cost: mutable.bound,
        })
    }
}

/// Solve `root` over the built-in catalog of `P`.
///
/// # Errors
///
/// See `IdaStarSolver::solve`.
pub fn solve<P: PuzzleState, H: AdmissibleHeuristic<P>>(
    root: &P,
    heuristic: H,
) -> Result<Solution<'static, P>, SolverError> {
    IdaStarSolver::new(heuristic).solve(root)
}

impl<'a, P: PuzzleState> Solution<'a, P> {
    /// The moves to apply to the root, in order.
    pub fn moves(&self) -> impl Iterator<Item = &'a Move<P>> + '_ {
        let moves = self.catalog.moves();
        self.path.move_indices().map(move |move_index| &moves[move_index])
    }

    /// The root followed by the state after each move.
    pub fn states(&self) -> impl Iterator<Item = &P> {
        self.path.states()
    }

    /// The final IDA* bound, which for an admissible heuristic is the
    /// optimal number of moves.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

impl<P: PuzzleState> fmt::Display for Solution<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves().map(|move_| &move_.name).join(" "))
    }
}

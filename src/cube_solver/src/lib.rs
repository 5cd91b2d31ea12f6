//! An optimal solver for the 3x3 cube. Cube states are modelled either as 54
//! facelet labels or as corner and edge cubies with orientation; both
//! implement [`puzzle::PuzzleState`] and can be handed to the iterative
//! deepening A* search in [`solver`].

pub mod heuristic;
pub mod puzzle;
pub mod search_path;
pub mod solver;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

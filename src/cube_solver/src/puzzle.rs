use itertools::Itertools;
use std::fmt::Debug;
use thiserror::Error;

pub mod cubie;
pub mod facelet;

/// A rotation that can be inverted. Every concrete cube model has its own
/// rotation representation.
pub trait Rotation: Clone + Debug {
    /// The rotation that undoes `self`.
    #[must_use]
    fn inverse(&self) -> Self;
}

/// The cube state interface shared by every cube model. The solver only ever
/// talks to a cube through this trait, so the facelet model and the cubie
/// model are interchangeable. Comparing two different models is rejected at
/// compile time because `PartialEq` is only implemented between states of
/// the same type.
pub trait PuzzleState: Clone + PartialEq + Eq + Debug + 'static {
    type Rotation: Rotation + 'static;

    /// The canonical solved state.
    fn new_solved() -> Self;

    /// The process-wide catalog of legal moves for this model.
    fn catalog() -> &'static RotationCatalog<Self>;

    /// Apply a rotation in place.
    fn apply_rotation(&mut self, rotation: &Self::Rotation);

    /// Undo a rotation in place. `apply_rotation(m)` followed by
    /// `undo_rotation(m)` restores the prior state exactly.
    fn undo_rotation(&mut self, rotation: &Self::Rotation);

    fn is_solved(&self) -> bool;

    /// A solved state scrambled by `n_shuffle` random moves from the
    /// catalog.
    fn new_shuffled(rng: &mut fastrand::Rng, n_shuffle: usize) -> Self {
        let mut state = Self::new_solved();
        state.shuffle(rng, n_shuffle);
        state
    }

    /// Apply `n_shuffle` random moves from the catalog and return them in the
    /// order they were applied.
    fn shuffle(&mut self, rng: &mut fastrand::Rng, n_shuffle: usize) -> Vec<&'static Move<Self>> {
        let moves = Self::catalog().moves();
        (0..n_shuffle)
            .map(|_| {
                // Catalogs are never empty, see `RotationCatalog::new`
                let move_ = &moves[rng.usize(..moves.len())];
                self.apply_rotation(&move_.rotation);
                move_
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Move<P: PuzzleState> {
    pub name: String,
    pub rotation: P::Rotation,
    inverse_index: usize,
}

/// The fixed set of legal moves of a cube model. Every base rotation is
/// stored together with its inverse, which is named by prefixing the base
/// name with `i`.
#[derive(Debug, Clone)]
pub struct RotationCatalog<P: PuzzleState> {
    moves: Box<[Move<P>]>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RotationDefError {
    #[error(
        "Source and destination lists must have equal lengths, got {source_len} and {destination_len}"
    )]
    LengthMismatch {
        source_len: usize,
        destination_len: usize,
    },
    #[error("Index out of range, expected a value below {expected} but got {actual}")]
    IndexOutOfRange { expected: usize, actual: usize },
    #[error("Destination index {0} is written more than once")]
    DuplicateDestination(usize),
    #[error("Source and destination lists do not cover the same positions")]
    NotAPermutation,
    #[error("Invalid orientation, expected a value below {expected} but got {actual}")]
    InvalidOrientation { expected: u8, actual: u8 },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("A rotation catalog needs at least one rotation")]
    Empty,
    #[error("Move name {0:?} is defined more than once")]
    DuplicateName(String),
    #[error("Unknown move {0:?}")]
    UnknownMove(String),
    #[error("Invalid rotation definition: {0}")]
    InvalidRotation(#[from] RotationDefError),
}

impl<P: PuzzleState> Move<P> {
    /// The catalog index of the move that undoes this one.
    #[must_use]
    pub fn inverse_index(&self) -> usize {
        self.inverse_index
    }
}

impl<P: PuzzleState> RotationCatalog<P> {
    /// Create a catalog from named base rotations. The base rotations come
    /// first, in the given order, followed by their inverses in the same
    /// order.
    ///
    /// # Errors
    ///
    /// If there are no rotations or two moves end up with the same name.
    pub fn new<S: Into<String>>(
        base_rotations: impl IntoIterator<Item = (S, P::Rotation)>,
    ) -> Result<Self, CatalogError> {
        let base_rotations = base_rotations
            .into_iter()
            .map(|(name, rotation)| (name.into(), rotation))
            .collect_vec();
        if base_rotations.is_empty() {
            return Err(CatalogError::Empty);
        }

        let base_count = base_rotations.len();
        let mut moves = Vec::with_capacity(base_count * 2);
        let mut inverse_moves = Vec::with_capacity(base_count);
        for (i, (name, rotation)) in base_rotations.into_iter().enumerate() {
            inverse_moves.push(Move {
                name: format!("i{name}"),
                rotation: rotation.inverse(),
                inverse_index: i,
            });
            moves.push(Move {
                name,
                rotation,
                inverse_index: base_count + i,
            });
        }
        moves.append(&mut inverse_moves);

        if let Some(name) = moves.iter().map(|move_| &move_.name).duplicates().next() {
            return Err(CatalogError::DuplicateName(name.clone()));
        }

        Ok(Self {
            moves: moves.into_boxed_slice(),
        })
    }

    #[must_use]
    pub fn moves(&self) -> &[Move<P>] {
        &self.moves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn find_move(&self, name: &str) -> Option<&Move<P>> {
        self.moves.iter().find(|move_| move_.name == name)
    }

    #[must_use]
    pub fn find_move_index(&self, name: &str) -> Option<usize> {
        self.moves.iter().position(|move_| move_.name == name)
    }

    /// The move that undoes `move_`.
    #[must_use]
    pub fn inverse(&self, move_: &Move<P>) -> &Move<P> {
        &self.moves[move_.inverse_index]
    }

    /// Parse a whitespace separated list of move names into catalog indices.
    ///
    /// # Errors
    ///
    /// If a name does not match any move exactly.
    pub fn parse_sequence(&self, moves: &str) -> Result<Vec<usize>, CatalogError> {
        moves
            .split_whitespace()
            .map(|name| {
                self.find_move_index(name)
                    .ok_or_else(|| CatalogError::UnknownMove(name.to_owned()))
            })
            .collect()
    }
}

/// Apply a whitespace separated move sequence `repeat` times to a copy of
/// `puzzle_state`.
///
/// # Errors
///
/// If the sequence contains a name that is not in `catalog`.
pub fn apply_moves<P: PuzzleState>(
    catalog: &RotationCatalog<P>,
    puzzle_state: &P,
    moves: &str,
    repeat: u32,
) -> Result<P, CatalogError> {
    let move_indices = catalog.parse_sequence(moves)?;
    let mut result = puzzle_state.clone();
    for _ in 0..repeat {
        for &move_index in &move_indices {
            result.apply_rotation(&catalog.moves()[move_index].rotation);
        }
    }
    Ok(result)
}

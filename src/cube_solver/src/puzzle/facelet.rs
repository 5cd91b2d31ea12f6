//! The 54 facelet model. Every unit square of the cube carries the label of
//! the face it belongs to when solved, and a rotation is a gather over those
//! labels.
//!
//! Positions are laid out face by face, nine per face, row-major within each
//! face: U (0..9), L (9..18), F (18..27), R (27..36), B (36..45), D (45..54).

use super::{CatalogError, PuzzleState, Rotation, RotationCatalog, RotationDefError};
use std::{fmt, sync::LazyLock};
use thiserror::Error;

pub const FACELET_COUNT: usize = 54;
pub const FACE_COUNT: usize = 6;
pub const FACELETS_PER_FACE: usize = 9;

/// Face names in label order.
pub const FACE_NAMES: [char; FACE_COUNT] = ['U', 'L', 'F', 'R', 'B', 'D'];

/// The upper left cell of each face in the 9x12 cube net.
const NET_ORIGINS: [(usize, usize); FACE_COUNT] = [(0, 3), (3, 0), (3, 3), (3, 6), (3, 9), (6, 3)];

pub type Net = [[Option<u8>; 12]; 9];

#[allow(clippy::cast_possible_truncation)]
const SOLVED_FACELETS: [u8; FACELET_COUNT] = {
    let mut arr = [0; FACELET_COUNT];
    let mut i = 0;
    while i < arr.len() {
        arr[i] = (i / FACELETS_PER_FACE) as u8;
        i += 1;
    }
    arr
};

// Each face turn moves its own eight outer facelets followed by the twelve
// adjacent facelets on the four neighbouring faces.
const BASE_ROTATIONS: [(&str, [u8; 20], [u8; 20]); 6] = [
    (
        "b",
        [36, 38, 44, 42, 39, 37, 41, 43, 29, 0, 15, 53, 32, 1, 12, 52, 35, 2, 9, 51],
        [38, 44, 42, 36, 37, 41, 43, 39, 0, 15, 53, 29, 1, 12, 52, 32, 2, 9, 51, 35],
    ),
    (
        "f",
        [20, 18, 24, 26, 19, 21, 25, 23, 6, 17, 47, 27, 7, 14, 46, 30, 8, 11, 45, 33],
        [18, 24, 26, 20, 21, 25, 23, 19, 17, 47, 27, 6, 14, 46, 30, 7, 11, 45, 33, 8],
    ),
    (
        "d",
        [47, 45, 51, 53, 50, 46, 48, 52, 44, 35, 26, 17, 43, 34, 25, 16, 42, 33, 24, 15],
        [45, 51, 53, 47, 46, 48, 52, 50, 35, 26, 17, 44, 34, 25, 16, 43, 33, 24, 15, 42],
    ),
    (
        "u",
        [3, 1, 5, 7, 0, 2, 8, 6, 38, 29, 20, 11, 37, 28, 19, 10, 36, 27, 18, 9],
        [1, 5, 7, 3, 2, 8, 6, 0, 29, 20, 11, 38, 28, 19, 10, 37, 27, 18, 9, 36],
    ),
    (
        "l",
        [12, 10, 14, 16, 9, 11, 17, 15, 0, 18, 45, 44, 3, 21, 48, 41, 6, 24, 51, 38],
        [10, 14, 16, 12, 11, 17, 15, 9, 18, 45, 44, 0, 21, 48, 41, 3, 24, 51, 38, 6],
    ),
    (
        "r",
        [32, 28, 30, 34, 29, 27, 33, 35, 2, 20, 47, 42, 5, 23, 50, 39, 8, 26, 53, 36],
        [28, 30, 34, 32, 27, 33, 35, 29, 20, 47, 42, 2, 23, 50, 39, 5, 26, 53, 36, 8],
    ),
];

static FACELET_CATALOG: LazyLock<RotationCatalog<FaceletCube>> = LazyLock::new(|| {
    BASE_ROTATIONS
        .iter()
        .map(|(name, source, destination)| {
            Ok::<_, CatalogError>((*name, FaceletRotation::new(source, destination)?))
        })
        .collect::<Result<Vec<_>, CatalogError>>()
        .and_then(RotationCatalog::new)
        .unwrap_or_else(|e| panic!("Invalid built-in facelet rotation table: {e}"))
});

/// A cube state as 54 face labels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FaceletCube([u8; FACELET_COUNT]);

/// A facelet permutation: the label at `destination[k]` becomes the label
/// previously at `source[k]`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FaceletRotation {
    source: Box<[u8]>,
    destination: Box<[u8]>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FaceletStateError {
    #[error("Invalid face label {0}, expected a value below {FACE_COUNT}")]
    LabelOutOfRange(u8),
    #[error("Face label {label} appears {count} times, expected {FACELETS_PER_FACE}")]
    LabelCount { label: u8, count: usize },
}

impl FaceletRotation {
    /// Create a rotation from paired index lists.
    ///
    /// # Errors
    ///
    /// If the lists have different lengths, an index is not a facelet
    /// position, a destination is written twice, or the two lists do not
    /// cover the same positions. Any of these would silently corrupt a cube
    /// state.
    pub fn new(source: &[u8], destination: &[u8]) -> Result<Self, RotationDefError> {
        if source.len() != destination.len() {
            return Err(RotationDefError::LengthMismatch {
                source_len: source.len(),
                destination_len: destination.len(),
            });
        }

        let mut covered_sources = [false; FACELET_COUNT];
        let mut covered_destinations = [false; FACELET_COUNT];
        for (&src, &dst) in source.iter().zip(destination) {
            for index in [src, dst] {
                if index as usize >= FACELET_COUNT {
                    return Err(RotationDefError::IndexOutOfRange {
                        expected: FACELET_COUNT,
                        actual: index as usize,
                    });
                }
            }
            if covered_destinations[dst as usize] {
                return Err(RotationDefError::DuplicateDestination(dst as usize));
            }
            covered_destinations[dst as usize] = true;
            covered_sources[src as usize] = true;
        }

        if covered_sources != covered_destinations {
            return Err(RotationDefError::NotAPermutation);
        }

        Ok(Self {
            source: source.into(),
            destination: destination.into(),
        })
    }

    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    #[must_use]
    pub fn destination(&self) -> &[u8] {
        &self.destination
    }
}

impl Rotation for FaceletRotation {
    fn inverse(&self) -> Self {
        Self {
            source: self.destination.clone(),
            destination: self.source.clone(),
        }
    }
}

impl FaceletCube {
    /// Create a cube from raw face labels.
    ///
    /// # Errors
    ///
    /// If a label is not a face or a face does not have exactly nine
    /// facelets.
    pub fn try_from_facelets(facelets: [u8; FACELET_COUNT]) -> Result<Self, FaceletStateError> {
        let mut counts = [0; FACE_COUNT];
        for &label in &facelets {
            *counts
                .get_mut(label as usize)
                .ok_or(FaceletStateError::LabelOutOfRange(label))? += 1;
        }
        for (label, &count) in (0..).zip(&counts) {
            if count != FACELETS_PER_FACE {
                return Err(FaceletStateError::LabelCount { label, count });
            }
        }
        Ok(Self(facelets))
    }

    #[must_use]
    pub fn facelets(&self) -> &[u8; FACELET_COUNT] {
        &self.0
    }

    /// The number of facelets that differ from the solved state.
    #[must_use]
    pub fn misplaced_facelets(&self) -> usize {
        self.0
            .iter()
            .zip(&SOLVED_FACELETS)
            .filter(|(label, solved_label)| label != solved_label)
            .count()
    }

    /// Lay the facelets out as an unfolded cube: U on top, L F R B across the
    /// middle and D at the bottom. Cells outside the net are `None`.
    #[must_use]
    pub fn net(&self) -> Net {
        let mut net = [[None; 12]; 9];
        for (face, &(row, col)) in NET_ORIGINS.iter().enumerate() {
            let start = face * FACELETS_PER_FACE;
            for (k, &label) in self.0[start..start + FACELETS_PER_FACE].iter().enumerate() {
                net[row + k / 3][col + k % 3] = Some(label);
            }
        }
        net
    }
}

impl PuzzleState for FaceletCube {
    type Rotation = FaceletRotation;

    fn new_solved() -> Self {
        Self(SOLVED_FACELETS)
    }

    fn catalog() -> &'static RotationCatalog<Self> {
        &FACELET_CATALOG
    }

    fn apply_rotation(&mut self, rotation: &FaceletRotation) {
        // Every read must see the pre-rotation labels
        let snapshot = self.0;
        for (&src, &dst) in rotation.source.iter().zip(&rotation.destination) {
            self.0[dst as usize] = snapshot[src as usize];
        }
    }

    fn undo_rotation(&mut self, rotation: &FaceletRotation) {
        let snapshot = self.0;
        for (&src, &dst) in rotation.source.iter().zip(&rotation.destination) {
            self.0[src as usize] = snapshot[dst as usize];
        }
    }

    fn is_solved(&self) -> bool {
        self.0 == SOLVED_FACELETS
    }
}

impl fmt::Display for FaceletCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.net() {
            for cell in row {
                match cell {
                    Some(label) => write!(f, " {} ", FACE_NAMES[label as usize])?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

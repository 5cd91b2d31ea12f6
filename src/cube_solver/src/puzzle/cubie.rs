//! The corner and edge model. A state records which cubie sits in each of
//! the 8 corner and 12 edge slots together with its twist or flip, and a
//! rotation is composed onto the state.
//!
//! Corner slots are URF UFL ULB UBR DFR DLF DBL DRB and edge slots are UR UF
//! UL UB DR DF DL DB FR FL BL BR.

use super::{CatalogError, PuzzleState, Rotation, RotationCatalog, RotationDefError};
use std::sync::LazyLock;

pub const CORNER_COUNT: usize = 8;
pub const EDGE_COUNT: usize = 12;
const CORNER_ORIENTATION_COUNT: u8 = 3;
const EDGE_ORIENTATION_COUNT: u8 = 2;

#[allow(clippy::cast_possible_truncation)]
const fn identity<const N: usize>() -> [u8; N] {
    let mut arr = [0; N];
    let mut i = 0;
    while i < N {
        arr[i] = i as u8;
        i += 1;
    }
    arr
}

const SOLVED: CubieCube = CubieCube {
    cp: identity(),
    co: [0; CORNER_COUNT],
    ep: identity(),
    eo: [0; EDGE_COUNT],
};

type CornerTransformation = ([u8; CORNER_COUNT], [u8; CORNER_COUNT]);
type EdgeTransformation = ([u8; EDGE_COUNT], [u8; EDGE_COUNT]);

// Clockwise quarter turns in "replaced by" form: after the turn, slot `i`
// holds the cubie that was in slot `perm[i]`, twisted by `ori[i]`.
const BASE_ROTATIONS: [(&str, CornerTransformation, EdgeTransformation); 6] = [
    (
        "b",
        ([0, 1, 3, 7, 4, 5, 2, 6], [0, 0, 1, 2, 0, 0, 2, 1]),
        (
            [0, 1, 2, 11, 4, 5, 6, 10, 8, 9, 3, 7],
            [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
        ),
    ),
    (
        "f",
        ([1, 5, 2, 3, 0, 4, 6, 7], [1, 2, 0, 0, 2, 1, 0, 0]),
        (
            [0, 9, 2, 3, 4, 8, 6, 7, 1, 5, 10, 11],
            [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
        ),
    ),
    (
        "d",
        ([0, 1, 2, 3, 5, 6, 7, 4], [0; CORNER_COUNT]),
        ([0, 1, 2, 3, 5, 6, 7, 4, 8, 9, 10, 11], [0; EDGE_COUNT]),
    ),
    (
        "u",
        ([3, 0, 1, 2, 4, 5, 6, 7], [0; CORNER_COUNT]),
        ([3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11], [0; EDGE_COUNT]),
    ),
    (
        "l",
        ([0, 2, 6, 3, 4, 1, 5, 7], [0, 1, 2, 0, 0, 2, 1, 0]),
        ([0, 1, 10, 3, 4, 5, 9, 7, 8, 2, 6, 11], [0; EDGE_COUNT]),
    ),
    (
        "r",
        ([4, 1, 2, 0, 7, 5, 6, 3], [2, 0, 0, 1, 1, 0, 0, 2]),
        ([8, 1, 2, 3, 11, 5, 6, 7, 4, 9, 10, 0], [0; EDGE_COUNT]),
    ),
];

static CUBIE_CATALOG: LazyLock<RotationCatalog<CubieCube>> = LazyLock::new(|| {
    BASE_ROTATIONS
        .iter()
        .map(|&(name, (cp, co), (ep, eo))| {
            Ok::<_, CatalogError>((name, CubieRotation::new(cp, co, ep, eo)?))
        })
        .collect::<Result<Vec<_>, CatalogError>>()
        .and_then(RotationCatalog::new)
        .unwrap_or_else(|e| panic!("Invalid built-in cubie rotation table: {e}"))
});

/// A cube state as corner and edge permutations with orientations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CubieCube {
    cp: [u8; CORNER_COUNT],
    co: [u8; CORNER_COUNT],
    ep: [u8; EDGE_COUNT],
    eo: [u8; EDGE_COUNT],
}

/// A validated cubie transformation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CubieRotation(CubieCube);

fn validate_orbit<const N: usize>(
    perm: &[u8; N],
    ori: &[u8; N],
    orientation_count: u8,
) -> Result<(), RotationDefError> {
    let mut covered_perms = [false; N];
    for (&p, &o) in perm.iter().zip(ori) {
        if o >= orientation_count {
            return Err(RotationDefError::InvalidOrientation {
                expected: orientation_count,
                actual: o,
            });
        }
        match covered_perms.get_mut(p as usize) {
            Some(covered) if *covered => return Err(RotationDefError::NotAPermutation),
            Some(covered) => *covered = true,
            None => {
                return Err(RotationDefError::IndexOutOfRange {
                    expected: N,
                    actual: p as usize,
                });
            }
        }
    }
    Ok(())
}

/// Compose a single orbit of `a` and `b` into `perm` and `ori`.
fn compose_orbit<const N: usize>(
    perm: &mut [u8; N],
    ori: &mut [u8; N],
    a: (&[u8; N], &[u8; N]),
    b: (&[u8; N], &[u8; N]),
    orientation_count: u8,
) {
    for i in 0..N {
        let from = b.0[i] as usize;
        perm[i] = a.0[from];
        ori[i] = (a.1[from] + b.1[i]) % orientation_count;
    }
}

#[allow(clippy::cast_possible_truncation)]
fn invert_orbit<const N: usize>(
    perm: &mut [u8; N],
    ori: &mut [u8; N],
    a: (&[u8; N], &[u8; N]),
    orientation_count: u8,
) {
    for i in 0..N {
        let to = a.0[i] as usize;
        perm[to] = i as u8;
        ori[to] = (orientation_count - a.1[i]) % orientation_count;
    }
}

impl CubieRotation {
    /// Create a rotation from corner and edge transformations.
    ///
    /// # Errors
    ///
    /// If either permutation is not a permutation of its slots or an
    /// orientation is out of range.
    pub fn new(
        cp: [u8; CORNER_COUNT],
        co: [u8; CORNER_COUNT],
        ep: [u8; EDGE_COUNT],
        eo: [u8; EDGE_COUNT],
    ) -> Result<Self, RotationDefError> {
        validate_orbit(&cp, &co, CORNER_ORIENTATION_COUNT)?;
        validate_orbit(&ep, &eo, EDGE_ORIENTATION_COUNT)?;
        Ok(Self(CubieCube { cp, co, ep, eo }))
    }

    #[must_use]
    pub fn transformation(&self) -> &CubieCube {
        &self.0
    }
}

impl Rotation for CubieRotation {
    fn inverse(&self) -> Self {
        let mut inverse = SOLVED;
        inverse.replace_inverse(&self.0);
        Self(inverse)
    }
}

impl CubieCube {
    /// Compose `a` and `b` into self.
    pub fn replace_compose(&mut self, a: &Self, b: &Self) {
        compose_orbit(
            &mut self.cp,
            &mut self.co,
            (&a.cp, &a.co),
            (&b.cp, &b.co),
            CORNER_ORIENTATION_COUNT,
        );
        compose_orbit(
            &mut self.ep,
            &mut self.eo,
            (&a.ep, &a.eo),
            (&b.ep, &b.eo),
            EDGE_ORIENTATION_COUNT,
        );
    }

    /// Inverse `a` into self.
    pub fn replace_inverse(&mut self, a: &Self) {
        invert_orbit(&mut self.cp, &mut self.co, (&a.cp, &a.co), CORNER_ORIENTATION_COUNT);
        invert_orbit(&mut self.ep, &mut self.eo, (&a.ep, &a.eo), EDGE_ORIENTATION_COUNT);
    }

    #[must_use]
    pub fn corners(&self) -> (&[u8; CORNER_COUNT], &[u8; CORNER_COUNT]) {
        (&self.cp, &self.co)
    }

    #[must_use]
    pub fn edges(&self) -> (&[u8; EDGE_COUNT], &[u8; EDGE_COUNT]) {
        (&self.ep, &self.eo)
    }

    /// The number of cubies that are out of their slot or not oriented.
    #[must_use]
    pub fn misplaced_cubies(&self) -> usize {
        let corners = (0..)
            .zip(self.cp.iter().zip(&self.co))
            .filter(|&(i, (&p, &o))| p != i || o != 0)
            .count();
        let edges = (0..)
            .zip(self.ep.iter().zip(&self.eo))
            .filter(|&(i, (&p, &o))| p != i || o != 0)
            .count();
        corners + edges
    }
}

impl PuzzleState for CubieCube {
    type Rotation = CubieRotation;

    fn new_solved() -> Self {
        SOLVED
    }

    fn catalog() -> &'static RotationCatalog<Self> {
        &CUBIE_CATALOG
    }

    fn apply_rotation(&mut self, rotation: &CubieRotation) {
        let before = *self;
        self.replace_compose(&before, &rotation.0);
    }

    fn undo_rotation(&mut self, rotation: &CubieRotation) {
        let mut inverse = SOLVED;
        inverse.replace_inverse(&rotation.0);
        let before = *self;
        self.replace_compose(&before, &inverse);
    }

    fn is_solved(&self) -> bool {
        *self == SOLVED
    }
}

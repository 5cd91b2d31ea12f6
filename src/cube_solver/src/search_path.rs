use crate::puzzle::PuzzleState;

/// The branch from the root to the node currently being explored by a depth
/// first search. The root has no move; every later entry records the catalog
/// index of the move that produced its state.
///
/// A correct search never holds the same state twice. Callers check
/// `contains_state` before pushing, and debug builds assert it.
#[derive(Debug, Clone)]
pub struct SearchPath<P: PuzzleState> {
    root: P,
    entries: Vec<(usize, P)>,
}

impl<P: PuzzleState> SearchPath<P> {
    #[must_use]
    pub fn new(root: P) -> Self {
        Self {
            root,
            entries: vec![],
        }
    }

    /// Push a new state reached from the last state by `move_index`.
    pub fn push(&mut self, move_index: usize, puzzle_state: P) {
        debug_assert!(
            !self.contains_state(&puzzle_state),
            "A state must not appear twice on the search path"
        );
        self.entries.push((move_index, puzzle_state));
    }

    /// Pop the last entry. The root is never popped.
    pub fn pop(&mut self) -> Option<(usize, P)> {
        self.entries.pop()
    }

    /// Whether `puzzle_state` is anywhere on the branch, root included.
    #[must_use]
    pub fn contains_state(&self, puzzle_state: &P) -> bool {
        self.root == *puzzle_state || self.entries.iter().any(|(_, state)| state == puzzle_state)
    }

    /// The state at the tip of the branch.
    #[must_use]
    pub fn last_state(&self) -> &P {
        self.entries.last().map_or(&self.root, |(_, state)| state)
    }

    /// The number of moves on the branch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog indices of the moves on the branch, in order from the root.
    pub fn move_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(move_index, _)| move_index)
    }

    /// Every state on the branch, starting with the root.
    pub fn states(&self) -> impl Iterator<Item = &P> {
        std::iter::once(&self.root).chain(self.entries.iter().map(|(_, state)| state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::facelet::FaceletCube;

    fn r_and_u() -> (usize, usize) {
        let catalog = FaceletCube::catalog();
        (
            catalog.find_move_index("r").unwrap(),
            catalog.find_move_index("u").unwrap(),
        )
    }

    #[test]
    fn test_new_path_holds_only_root() {
        let solved = FaceletCube::new_solved();
        let path = SearchPath::new(solved);
        assert!(path.is_empty());
        assert_eq!(path.last_state(), &solved);
        assert!(path.contains_state(&solved));
        assert_eq!(path.states().count(), 1);
    }

    #[test]
    fn test_push_and_pop() {
        let catalog = FaceletCube::catalog();
        let (r, u) = r_and_u();
        let solved = FaceletCube::new_solved();
        let mut path = SearchPath::new(solved);

        let mut after_r = solved;
        after_r.apply_rotation(&catalog.moves()[r].rotation);
        path.push(r, after_r);
        let mut after_ru = after_r;
        after_ru.apply_rotation(&catalog.moves()[u].rotation);
        path.push(u, after_ru);

        assert_eq!(path.len(), 2);
        assert_eq!(path.move_indices().collect::<Vec<_>>(), [r, u]);
        assert_eq!(path.last_state(), &after_ru);
        assert!(path.contains_state(&after_r));
        assert!(path.contains_state(&solved));

        assert_eq!(path.pop(), Some((u, after_ru)));
        assert!(!path.contains_state(&after_ru));
        assert_eq!(path.last_state(), &after_r);
        assert_eq!(path.pop(), Some((r, after_r)));
        assert_eq!(path.pop(), None);
        assert_eq!(path.last_state(), &solved);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "must not appear twice")]
    fn test_push_duplicate_state_panics() {
        let solved = FaceletCube::new_solved();
        let mut path = SearchPath::new(solved);
        path.push(0, solved);
    }
}

use cube_solver::puzzle::{
    cubie::CubieCube,
    facelet::{FACE_COUNT, FaceletCube},
};
use itertools::Itertools;
use owo_colors::OwoColorize;
use std::fmt::Display;

const FACE_COLORS: [(u8, u8, u8); FACE_COUNT] = [
    (128, 128, 128),
    (255, 140, 0),
    (0, 155, 72),
    (200, 16, 46),
    (0, 70, 173),
    (255, 213, 0),
];

/// Terminal rendering of a cube state.
pub trait RenderState {
    fn render(&self) -> String;
}

impl RenderState for FaceletCube {
    fn render(&self) -> String {
        render_net(self)
    }
}

impl RenderState for CubieCube {
    /// One line per orbit. Cubies out of their home slot or twisted are
    /// highlighted.
    fn render(&self) -> String {
        let (cp, co) = self.corners();
        let (ep, eo) = self.edges();
        format!(
            "corners {}\nedges   {}\n",
            render_orbit(cp, co),
            render_orbit(ep, eo)
        )
    }
}

fn render_orbit(permutation: &[u8], orientation: &[u8]) -> String {
    (0..)
        .zip(permutation.iter().zip(orientation))
        .map(|(slot, (&piece, &twist))| {
            let cell = format!("{piece:>2}:{twist}");
            if piece == slot && twist == 0 {
                cell
            } else {
                cell.red().to_string()
            }
        })
        .join(" ")
}

/// Render the unfolded cube with one coloured block per facelet.
pub fn render_net(cube: &FaceletCube) -> String {
    let mut out = String::new();
    for row in cube.net() {
        for cell in row {
            match cell {
                Some(label) => {
                    let (r, g, b) = FACE_COLORS[label as usize];
                    out.push_str(&"██".truecolor(r, g, b).to_string());
                }
                None => out.push_str("  "),
            }
        }
        out.push('\n');
    }
    out
}

/// Render `start` followed by every step taken from it, each headed by its
/// number and move name.
pub fn render_steps<'a, P: RenderState + 'a>(
    start: &P,
    steps: impl IntoIterator<Item = (impl Display, &'a P)>,
) -> String {
    let mut out = format!("Start\n{}", start.render());
    for (step, (name, state)) in steps.into_iter().enumerate() {
        out.push_str(&format!("{}. {name}\n{}", step + 1, state.render()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_solver::{
        heuristic::{MisplacedCubies, MisplacedFacelets},
        puzzle::{PuzzleState, apply_moves},
        solver::solve,
    };

    #[test]
    fn test_net_shape() {
        let rendered = render_net(&FaceletCube::new_solved());
        assert_eq!(rendered.lines().count(), 9);
        assert_eq!(rendered.matches("██").count(), 54);
    }

    #[test]
    fn test_solved_cubies_are_plain() {
        let rendered = CubieCube::new_solved().render();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.starts_with("corners  0:0  1:0"));
        assert!(!rendered.contains('\u{1b}'));

        let mut cube = CubieCube::new_solved();
        cube.apply_rotation(&CubieCube::catalog().find_move("r").unwrap().rotation);
        assert!(cube.render().contains('\u{1b}'));
    }

    #[test]
    fn test_solution_steps() {
        let cube = apply_moves(FaceletCube::catalog(), &FaceletCube::new_solved(), "r u", 1).unwrap();
        let solution = solve(&cube, MisplacedFacelets).unwrap();
        let mut states = solution.states();
        let start = states.next().unwrap();
        let rendered = render_steps(start, solution.moves().map(|move_| &move_.name).zip(states));

        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3 * 10);
        assert_eq!(lines[0], "Start");
        assert_eq!(lines[10], "1. iu");
        assert_eq!(lines[20], "2. ir");
        assert_eq!(rendered.matches("██").count(), 3 * 54);
        assert_eq!(
            rendered.rsplit_once("2. ir\n").unwrap().1,
            render_net(&FaceletCube::new_solved())
        );
    }

    #[test]
    fn test_cubie_solution_steps() {
        let cube = apply_moves(CubieCube::catalog(), &CubieCube::new_solved(), "f", 1).unwrap();
        let solution = solve(&cube, MisplacedCubies).unwrap();
        let mut states = solution.states();
        let start = states.next().unwrap();
        let rendered = render_steps(start, solution.moves().map(|move_| &move_.name).zip(states));
        assert_eq!(rendered.lines().count(), 2 * 3);
        assert!(rendered.contains("1. if\n"));
    }
}

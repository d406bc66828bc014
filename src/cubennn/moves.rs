//! Layer moves and the state transition engine that applies them.

use super::geometry::{mat_mul, rotate_coord, Axis};
use super::{layer_contains, CubeState, CubieKind, Face};
use crate::moves::{Cancellation, MoveSequence};

/// One parsed instruction: turn the layer `depth` slices in from `face` by
/// `turns` quarter turns, `clockwise` as seen looking at `face` from outside
/// the cube.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct LayerMove {
    pub face: Face,
    pub depth: u16,
    pub turns: u8,
    pub clockwise: bool,
}

impl LayerMove {
    /// Build a move from a quarter-turn count in `1..=3` (3 quarter turns
    /// clockwise is one turn counterclockwise).
    ///
    /// # Panics
    ///
    /// Counts outside `1..=3` (mod 4) would be the identity and have no move
    /// representation.
    pub const fn from_quarter_turns(face: Face, depth: u16, quarter_turns: u8) -> LayerMove {
        match quarter_turns % 4 {
            1 => LayerMove {
                face,
                depth,
                turns: 1,
                clockwise: true,
            },
            2 => LayerMove {
                face,
                depth,
                turns: 2,
                clockwise: true,
            },
            3 => LayerMove {
                face,
                depth,
                turns: 1,
                clockwise: false,
            },
            _ => panic!("a move must make 1 to 3 quarter turns"),
        }
    }

    /// This move's effect as a clockwise quarter-turn count in `1..=3`.
    pub fn quarter_turns(self) -> u8 {
        match (self.turns, self.clockwise) {
            (2, _) => 2,
            (_, true) => 1,
            (_, false) => 3,
        }
    }
}

impl crate::moves::Move for LayerMove {
    fn inverse(self) -> Self {
        LayerMove::from_quarter_turns(self.face, self.depth, 4 - self.quarter_turns())
    }

    fn commutes_with(&self, b: &Self) -> bool {
        // Any two rotations about the same axis commute, whatever the depth.
        self.face.axis() == b.face.axis()
    }

    fn cancel(self, b: Self) -> Cancellation<Self> {
        // Only merge turns of the very same layer. A deep layer from one
        // face aliases a layer from the opposite face, but seeing that
        // requires the cube size, which a bare move does not carry.
        if self.face == b.face && self.depth == b.depth {
            let count = (self.quarter_turns() + b.quarter_turns()) % 4;
            if count == 0 {
                Cancellation::NoMove
            } else {
                Cancellation::OneMove(LayerMove::from_quarter_turns(self.face, self.depth, count))
            }
        } else {
            Cancellation::TwoMove(self, b)
        }
    }
}

// Print moves in standard notation so sequences read as algorithms.
impl std::fmt::Debug for LayerMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.depth > 1 {
            write!(f, "{}", self.depth)?;
        }
        write!(f, "{:?}", self.face)?;
        if self.turns == 2 {
            write!(f, "2")?;
        }
        if !self.clockwise {
            write!(f, "'")?;
        }
        Ok(())
    }
}

/// Create a move from a face letter and quarter-turn count, optionally
/// prefixed with a layer depth.
///
/// ```rust
/// # fn main() {
/// use nxncube::mv;
///
/// assert_eq!(format!("{:?}", mv!(R, 3)), "R'");
/// assert_eq!(format!("{:?}", mv!(3, U, 2)), "3U2");
/// # }
/// ```
#[macro_export]
macro_rules! mv {
    ($face:ident, $count:expr) => {
        $crate::mv!(1, $face, $count)
    };
    ($depth:expr, $face:ident, $count:expr) => {
        $crate::cubennn::moves::LayerMove::from_quarter_turns(
            $crate::cubennn::Face::$face,
            $depth,
            $count,
        )
    };
}

/// Corner twist induced by a quarter turn, keyed on the corner's new
/// position. Corners fall into two diagonal classes by the sign parity of
/// their coordinates, and a quarter turn swaps the classes; which class
/// twists clockwise depends on the turn's axis, while turns about the
/// up-down axis never twist a corner.
fn corner_twist(new_pos: [u16; 3], axis: Axis) -> u8 {
    let even_zeros = new_pos.iter().filter(|&&c| c == 0).count() % 2 == 0;
    match axis {
        Axis::UD => 0,
        Axis::LR => {
            if even_zeros {
                2
            } else {
                1
            }
        }
        Axis::FB => {
            if even_zeros {
                1
            } else {
                2
            }
        }
    }
}

fn twisted(kind: CubieKind, new_pos: [u16; 3], orientation: u8, axis: Axis) -> u8 {
    match kind {
        CubieKind::Corner => (orientation + corner_twist(new_pos, axis)) % 3,
        // Edge orientation is tracked relative to the front-back axis, so
        // quarter turns about that axis flip every edge piece they move.
        CubieKind::Edge | CubieKind::MidEdge | CubieKind::Wing => match axis {
            Axis::FB => orientation ^ 1,
            _ => orientation,
        },
        CubieKind::Center | CubieKind::InnerCenter => orientation,
    }
}

impl CubeState {
    /// Apply an algorithm to a cube.
    pub fn make_moves(self, mvs: MoveSequence<LayerMove>) -> CubeState {
        mvs.0.into_iter().fold(self, |c, m| c.make_move(m))
    }

    /// Apply a move to a cube, producing the successor state.
    ///
    /// Half turns are two quarter turns through the same code path rather
    /// than a dedicated 180-degree transform. A depth beyond the cube's size
    /// selects no layer and leaves the state unchanged; the notation parser
    /// rejects such moves before they get here.
    pub fn make_move(self, mv: LayerMove) -> CubeState {
        (0..mv.turns).fold(self, |c, _| c.quarter_turn(mv.face, mv.depth, mv.clockwise))
    }

    fn quarter_turn(mut self, face: Face, depth: u16, clockwise: bool) -> CubeState {
        let max = self.size - 1;
        let rot = face.rotation_matrix(clockwise);
        let axis = face.axis();

        for cubie in &mut self.cubies {
            if !layer_contains(face, depth, cubie.current, self.size) {
                continue;
            }
            cubie.current = rotate_coord(face, clockwise, cubie.current, max);
            cubie.orientation_matrix = mat_mul(rot, cubie.orientation_matrix);
            cubie.orientation = twisted(cubie.kind, cubie.current, cubie.orientation, axis);
        }

        self.rebuild_index();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubennn::Color;
    use crate::moves::Move;

    use proptest::collection::vec;
    use proptest::prelude::*;

    fn face_move() -> impl Strategy<Value = LayerMove> {
        (any::<Face>(), 1..=3u8).prop_map(|(face, qt)| LayerMove::from_quarter_turns(face, 1, qt))
    }

    #[test]
    fn b_loop() {
        let mut cube = CubeState::solved(3);
        for _ in 0..4 {
            cube = cube.make_move(mv!(B, 1));
        }
        assert_eq!(cube, CubeState::solved(3));
    }

    #[test]
    fn half_turn_is_an_involution() {
        for size in [2u16, 3, 4] {
            let cube = CubeState::solved(size).make_move(mv!(R, 2)).make_move(mv!(R, 2));
            assert_eq!(cube, CubeState::solved(size));
        }
    }

    #[test]
    fn inner_layer_loop() {
        let cube = (0..4).fold(CubeState::solved(4), |c, _| c.make_move(mv!(2, L, 1)));
        assert_eq!(cube, CubeState::solved(4));
    }

    #[test]
    fn oversized_depth_is_a_no_op() {
        let cube = CubeState::solved(3);
        assert_eq!(cube.clone().make_move(mv!(9, R, 1)), cube);
    }

    #[test]
    fn u_turn_cycles_the_side_rows() {
        let cube = CubeState::solved(3).make_move(mv!(U, 1));

        // The top face itself is unchanged.
        for x in 0..3 {
            for z in 0..3 {
                let cubie = cube.cubie_at([x, 2, z]).unwrap();
                assert_eq!(cubie.display_color(Face::U, 3), Some(Color::Yellow));
            }
        }
        // A clockwise U sends R to F, F to L, L to B and B to R.
        for x in 0..3 {
            let front = cube.cubie_at([x, 2, 2]).unwrap();
            assert_eq!(front.display_color(Face::F, 3), Some(Color::Red));
        }
        for z in 0..3 {
            let left = cube.cubie_at([0, 2, z]).unwrap();
            assert_eq!(left.display_color(Face::L, 3), Some(Color::Green));
            let right = cube.cubie_at([2, 2, z]).unwrap();
            assert_eq!(right.display_color(Face::R, 3), Some(Color::Blue));
        }
    }

    #[test]
    fn f_turn_moves_left_column_up() {
        let cube = CubeState::solved(3).make_move(mv!(F, 1));
        // The row of U bordering F now shows L's color; the rest of U is
        // untouched.
        for x in 0..3 {
            let cubie = cube.cubie_at([x, 2, 2]).unwrap();
            assert_eq!(cubie.display_color(Face::U, 3), Some(Color::Orange));
            for z in 0..2 {
                let back = cube.cubie_at([x, 2, z]).unwrap();
                assert_eq!(back.display_color(Face::U, 3), Some(Color::Yellow));
            }
        }
    }

    #[test]
    fn f_turn_flips_its_edges_and_twists_its_corners() {
        let cube = CubeState::solved(3).make_move(mv!(F, 1));

        for pos in [[1, 2, 2], [2, 1, 2], [1, 0, 2], [0, 1, 2]] {
            assert_eq!(cube.cubie_at(pos).unwrap().orientation, 1, "edge at {pos:?}");
        }
        assert_eq!(cube.cubie_at([2, 2, 2]).unwrap().orientation, 1);
        assert_eq!(cube.cubie_at([2, 0, 2]).unwrap().orientation, 2);
        assert_eq!(cube.cubie_at([0, 0, 2]).unwrap().orientation, 1);
        assert_eq!(cube.cubie_at([0, 2, 2]).unwrap().orientation, 2);

        // U leaves every orientation alone.
        let cube = CubeState::solved(3).make_move(mv!(U, 1));
        assert!(cube.cubies().iter().all(|c| c.orientation == 0));
    }

    #[test]
    fn moves_relocate_but_never_repaint() {
        let solved = CubeState::solved(3);
        let moved = solved.clone().make_move(mv!(R, 1)).make_move(mv!(F, 3));
        for cubie in moved.cubies() {
            let original = solved.cubie_at(cubie.original).unwrap();
            for face in Face::ALL {
                assert_eq!(cubie.original_color(face), original.original_color(face));
            }
        }
    }

    proptest! {
        #[test]
        fn four_quarter_turns_cycle(face: Face, clockwise: bool, size in 2..=4u16, depth in 1..=2u16) {
            let mv = LayerMove { face, depth: depth.min(size), turns: 1, clockwise };
            let cube = (0..4).fold(CubeState::solved(size), |c, _| c.make_move(mv));
            prop_assert_eq!(cube, CubeState::solved(size));
        }

        #[test]
        fn single_move_inverse_round_trips(mv in face_move()) {
            let scrambled = CubeState::solved(3).make_move(mv);
            prop_assert_eq!(scrambled.make_move(mv.inverse()), CubeState::solved(3));
        }

        #[test]
        fn sequence_inverse_round_trips(mvs in vec(face_move(), 0..20).prop_map(MoveSequence)) {
            let scrambled = CubeState::solved(3).make_moves(mvs.clone());
            prop_assert_eq!(scrambled.make_moves(mvs.inverse()), CubeState::solved(3));
        }

        #[test]
        fn cancel_preserves_effect(mvs in vec(face_move(), 0..20).prop_map(MoveSequence)) {
            let cancelled = mvs.clone().cancel();
            prop_assert!(cancelled.len() <= mvs.len());
            prop_assert_eq!(
                CubeState::solved(3).make_moves(mvs),
                CubeState::solved(3).make_moves(cancelled)
            );
        }

        #[test]
        fn cancel_is_idempotent(mvs in vec(face_move(), 0..20).prop_map(MoveSequence)) {
            let cancelled = mvs.clone().cancel();
            prop_assert_eq!(cancelled.clone().cancel(), cancelled);
        }

        #[test]
        fn cancelled_inverse_is_empty(mvs in vec(face_move(), 0..20).prop_map(MoveSequence)) {
            let cancelled = mvs.cancel();
            prop_assert!(cancelled.clone().append(cancelled.inverse()).cancel().is_empty());
        }
    }
}

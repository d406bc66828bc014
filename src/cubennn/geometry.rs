//! Faces, axes, colors, and the small amount of integer 3D rotation math the
//! cube needs.
//!
//! Grid coordinates are `[x, y, z]` in `[0, size - 1]^3` with x growing
//! towards R, y towards U and z towards F. All rotations the puzzle can
//! perform map face normals to face normals, so orientation matrices stay
//! exact integer matrices and "which way does this sticker point now" is a
//! lookup, not a nearest-axis approximation.

#[cfg(test)]
use proptest_derive::Arbitrary;

/// A 3D direction with integer components. Face normals are unit vectors
/// along one axis.
pub type Vec3 = [i8; 3];

/// A 3x3 integer rotation matrix, acting on [`Vec3`] columns.
pub type Mat3 = [[i8; 3]; 3];

/// The identity rotation.
pub const IDENTITY: Mat3 = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

/// Matrix product `a * b` (apply `b` first).
pub fn mat_mul(a: Mat3, b: Mat3) -> Mat3 {
    let mut out = [[0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// Transpose of a matrix. For a rotation this is its inverse.
pub fn transpose(m: Mat3) -> Mat3 {
    let mut out = [[0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = m[j][i];
        }
    }
    out
}

/// Apply a matrix to a vector.
pub fn mat_apply(m: Mat3, v: Vec3) -> Vec3 {
    let mut out = [0; 3];
    for (i, cell) in out.iter_mut().enumerate() {
        *cell = (0..3).map(|k| m[i][k] * v[k]).sum();
    }
    out
}

/// An axis of the cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Front-Back axis
    FB,
    /// Left-Right axis
    LR,
    /// Up-Down axis
    UD,
}

impl Axis {
    /// Which component of a grid coordinate this axis runs along.
    pub fn coord_index(self) -> usize {
        match self {
            Axis::LR => 0,
            Axis::UD => 1,
            Axis::FB => 2,
        }
    }
}

/// One of the six faces of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Face {
    /// Right
    R,
    /// Left
    L,
    /// Up
    U,
    /// Down
    D,
    /// Front
    F,
    /// Back
    B,
}

/// The number of faces, for arrays indexed by [`Face::index`].
pub const FACE_COUNT: usize = 6;

/// A sticker color from the default palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// On R in the solved state.
    Red,
    /// On L in the solved state.
    Orange,
    /// On U in the solved state.
    Yellow,
    /// On D in the solved state. The cross color.
    White,
    /// On F in the solved state.
    Green,
    /// On B in the solved state.
    Blue,
}

// Quarter-turn rotations about each axis; *_CW is clockwise as seen from the
// positive face of that axis (R, U or F).
const X_CW: Mat3 = [[1, 0, 0], [0, 0, 1], [0, -1, 0]];
const X_CCW: Mat3 = [[1, 0, 0], [0, 0, -1], [0, 1, 0]];
const Y_CW: Mat3 = [[0, 0, -1], [0, 1, 0], [1, 0, 0]];
const Y_CCW: Mat3 = [[0, 0, 1], [0, 1, 0], [-1, 0, 0]];
const Z_CW: Mat3 = [[0, 1, 0], [-1, 0, 0], [0, 0, 1]];
const Z_CCW: Mat3 = [[0, -1, 0], [1, 0, 0], [0, 0, 1]];

impl Face {
    /// All six faces, in index order.
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    /// The face opposite to the given one.
    pub fn opposite(self) -> Face {
        match self {
            Face::R => Face::L,
            Face::L => Face::R,
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    /// The axis this face's layers turn around.
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::LR,
            Face::U | Face::D => Axis::UD,
            Face::F | Face::B => Axis::FB,
        }
    }

    /// Whether this face sits at the positive end of its axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Face::R | Face::U | Face::F)
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vec3 {
        match self {
            Face::R => [1, 0, 0],
            Face::L => [-1, 0, 0],
            Face::U => [0, 1, 0],
            Face::D => [0, -1, 0],
            Face::F => [0, 0, 1],
            Face::B => [0, 0, -1],
        }
    }

    /// The face whose outward normal is `v`, if `v` is a face normal.
    pub fn from_normal(v: Vec3) -> Option<Face> {
        match v {
            [1, 0, 0] => Some(Face::R),
            [-1, 0, 0] => Some(Face::L),
            [0, 1, 0] => Some(Face::U),
            [0, -1, 0] => Some(Face::D),
            [0, 0, 1] => Some(Face::F),
            [0, 0, -1] => Some(Face::B),
            _ => None,
        }
    }

    /// The face named by a notation letter.
    pub fn from_letter(c: char) -> Option<Face> {
        match c {
            'R' => Some(Face::R),
            'L' => Some(Face::L),
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// Index of this face for fixed-size per-face arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The default palette color of this face in the solved state.
    pub fn color(self) -> Color {
        match self {
            Face::R => Color::Red,
            Face::L => Color::Orange,
            Face::U => Color::Yellow,
            Face::D => Color::White,
            Face::F => Color::Green,
            Face::B => Color::Blue,
        }
    }

    /// The rotation applied to a layer of this face turned a quarter turn,
    /// clockwise as seen looking at this face from outside the cube.
    ///
    /// Opposite faces share an axis but view it from opposite ends, so a
    /// clockwise L is the same physical rotation as a counterclockwise R.
    pub fn rotation_matrix(self, clockwise: bool) -> Mat3 {
        let cw = clockwise == self.is_positive();
        match (self.axis(), cw) {
            (Axis::LR, true) => X_CW,
            (Axis::LR, false) => X_CCW,
            (Axis::UD, true) => Y_CW,
            (Axis::UD, false) => Y_CCW,
            (Axis::FB, true) => Z_CW,
            (Axis::FB, false) => Z_CCW,
        }
    }
}

/// Rotate a grid coordinate a quarter turn around `face`'s axis, where `max`
/// is `size - 1`. This is [`Face::rotation_matrix`] expressed as the
/// coordinate permutation it induces on the `[0, max]^3` grid, e.g. a
/// clockwise R maps `[x, y, z]` to `[x, z, max - y]`.
pub fn rotate_coord(face: Face, clockwise: bool, pos: [u16; 3], max: u16) -> [u16; 3] {
    let [x, y, z] = pos;
    let cw = clockwise == face.is_positive();
    match (face.axis(), cw) {
        (Axis::LR, true) => [x, z, max - y],
        (Axis::LR, false) => [x, max - z, y],
        (Axis::UD, true) => [max - z, y, x],
        (Axis::UD, false) => [z, y, max - x],
        (Axis::FB, true) => [y, max - x, z],
        (Axis::FB, false) => [max - y, x, z],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn normal_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::from_normal(face.normal()), Some(face));
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn rotations_are_orthogonal() {
        for face in Face::ALL {
            for cw in [true, false] {
                let m = face.rotation_matrix(cw);
                assert_eq!(mat_mul(m, transpose(m)), IDENTITY);
            }
        }
    }

    #[test]
    fn opposite_faces_turn_oppositely() {
        for face in [Face::R, Face::U, Face::F] {
            assert_eq!(
                face.rotation_matrix(true),
                face.opposite().rotation_matrix(false)
            );
        }
    }

    #[test]
    fn clockwise_r_carries_front_to_up() {
        let m = Face::R.rotation_matrix(true);
        assert_eq!(mat_apply(m, Face::F.normal()), Face::U.normal());
        assert_eq!(mat_apply(m, Face::U.normal()), Face::B.normal());
    }

    #[test]
    fn clockwise_u_carries_right_to_front() {
        let m = Face::U.rotation_matrix(true);
        assert_eq!(mat_apply(m, Face::R.normal()), Face::F.normal());
        assert_eq!(mat_apply(m, Face::F.normal()), Face::L.normal());
    }

    proptest! {
        #[test]
        fn coord_rotation_matches_matrix(face: Face, cw: bool, pos in [0..5u16, 0..5u16, 0..5u16]) {
            // Centered coordinates, doubled so they stay integers.
            let max = 4;
            let m = face.rotation_matrix(cw);
            let centered = pos.map(|c| 2 * c as i32 - max as i32);
            let rotated = rotate_coord(face, cw, pos, max).map(|c| 2 * c as i32 - max as i32);
            for i in 0..3 {
                let expect: i32 = (0..3).map(|k| m[i][k] as i32 * centered[k]).sum();
                prop_assert_eq!(rotated[i], expect);
            }
        }

        #[test]
        fn four_quarter_coords_cycle(face: Face, cw: bool, pos in [0..7u16, 0..7u16, 0..7u16]) {
            let max = 6;
            let turned = (0..4).fold(pos, |p, _| rotate_coord(face, cw, p, max));
            prop_assert_eq!(turned, pos);
        }
    }
}

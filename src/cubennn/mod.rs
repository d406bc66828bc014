//! An NxNxN twisty puzzle modeled at the cubie level.
//!
//! A [`CubeState`] is a flat collection of [`Cubie`] records plus a
//! position-to-cubie index. States are persistent values: applying a move
//! (see [`moves`]) consumes a state and produces a new one, so the solver can
//! hold many snapshots without aliasing anything.

pub mod cross_solver;
pub mod geometry;
pub mod moves;
pub mod notation;

pub use self::geometry::{Axis, Color, Face};

use self::geometry::{mat_apply, transpose, Mat3, FACE_COUNT, IDENTITY};
use rustc_hash::FxHashMap;

/// How many outer faces a piece touches in the solved state, refined for
/// large cubes where pieces in the same boundary class are distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubieKind {
    /// Touches three faces; orientation is a twist mod 3.
    Corner,
    /// Touches two faces on a 3x3x3; orientation is a flip mod 2.
    Edge,
    /// The central piece of an edge on an odd cube larger than 3.
    MidEdge,
    /// A non-central edge piece on a cube larger than 3.
    Wing,
    /// The single fixed center of a face on an odd cube.
    Center,
    /// Any other face piece on a cube larger than 3.
    InnerCenter,
}

/// One physical piece of the puzzle.
///
/// `colors` maps the piece's *original* faces to sticker colors and never
/// changes after creation; what a sticker currently shows is derived from
/// `orientation_matrix` (see [`Cubie::display_color`]). That distinction is
/// what makes a turn "rotate the piece" rather than "repaint the piece".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cubie {
    /// Stable identity, derived from the original grid coordinate.
    pub id: u32,
    /// Piece class, fixed at creation.
    pub kind: CubieKind,
    /// Present grid location.
    pub current: [u16; 3],
    /// Solved-state grid location.
    pub original: [u16; 3],
    /// Twist state relative to solved: mod 3 for corners, mod 2 for
    /// edge-class pieces, always 0 for centers.
    pub orientation: u8,
    /// Cumulative physical rotation applied to the piece.
    pub orientation_matrix: Mat3,
    colors: [Option<Color>; FACE_COUNT],
}

impl Cubie {
    /// The sticker color this piece carries on one of its original faces, or
    /// `None` if it never had a sticker there.
    pub fn original_color(&self, face: Face) -> Option<Color> {
        self.colors[face.index()]
    }

    /// The color this piece currently shows on `face`, or `None` if the
    /// piece is not presently on that face of the cube.
    ///
    /// The orientation matrix maps original directions to current ones, so
    /// its inverse (transpose) recovers which original sticker now points
    /// out of `face`.
    pub fn display_color(&self, face: Face, size: u16) -> Option<Color> {
        if !layer_contains(face, 1, self.current, size) {
            return None;
        }
        let original_dir = mat_apply(transpose(self.orientation_matrix), face.normal());
        let original_face = Face::from_normal(original_dir)?;
        self.colors[original_face.index()]
    }
}

/// The whole puzzle at some size N >= 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeState {
    size: u16,
    cubies: Vec<Cubie>,
    position_index: FxHashMap<[u16; 3], usize>,
}

/// Whether `pos` lies in the layer `depth` slices in from `face` (depth 1 is
/// the outer layer). Depths beyond the cube select nothing; the notation
/// parser is the boundary that rejects them.
pub(crate) fn layer_contains(face: Face, depth: u16, pos: [u16; 3], size: u16) -> bool {
    if depth == 0 || depth > size {
        return false;
    }
    let c = pos[face.axis().coord_index()];
    if face.is_positive() {
        c == size - depth
    } else {
        c == depth - 1
    }
}

fn classify(pos: [u16; 3], size: u16) -> CubieKind {
    let max = size - 1;
    let boundary = pos.iter().filter(|&&c| c == 0 || c == max).count();
    let mid = |c: u16| size % 2 == 1 && c == max / 2;
    let interior: Vec<u16> = pos
        .iter()
        .copied()
        .filter(|&c| c != 0 && c != max)
        .collect();

    match boundary {
        3 => CubieKind::Corner,
        2 if size == 3 => CubieKind::Edge,
        2 if mid(interior[0]) => CubieKind::MidEdge,
        2 => CubieKind::Wing,
        1 if size == 3 => CubieKind::Center,
        1 if interior.iter().all(|&c| mid(c)) => CubieKind::Center,
        1 => CubieKind::InnerCenter,
        _ => unreachable!("interior cubies are never materialized"),
    }
}

impl CubeState {
    /// Create a solved cube of the given size. Only pieces touching at least
    /// one outer face are materialized; the hidden interior of big cubes does
    /// not exist.
    ///
    /// # Panics
    ///
    /// Sizes below 2 are a caller error.
    pub fn solved(size: u16) -> CubeState {
        assert!(size >= 2, "a cube must be at least 2x2x2");
        let max = size - 1;
        let mut cubies = Vec::new();

        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    let pos = [x, y, z];
                    if !pos.iter().any(|&c| c == 0 || c == max) {
                        continue;
                    }

                    let mut colors = [None; FACE_COUNT];
                    for face in Face::ALL {
                        if layer_contains(face, 1, pos, size) {
                            colors[face.index()] = Some(face.color());
                        }
                    }

                    cubies.push(Cubie {
                        id: (x as u32 * size as u32 + y as u32) * size as u32 + z as u32,
                        kind: classify(pos, size),
                        current: pos,
                        original: pos,
                        orientation: 0,
                        orientation_matrix: IDENTITY,
                        colors,
                    });
                }
            }
        }

        let mut state = CubeState {
            size,
            cubies,
            position_index: FxHashMap::default(),
        };
        state.rebuild_index();
        state
    }

    /// The edge length N of this cube.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// All pieces of the puzzle, in creation order.
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    /// The piece currently occupying a grid position, if that position is on
    /// the cube's visible boundary.
    pub fn cubie_at(&self, pos: [u16; 3]) -> Option<&Cubie> {
        self.position_index.get(&pos).map(|&i| &self.cubies[i])
    }

    /// Ids of the pieces in the layer `depth` slices in from `face`. Layer 1
    /// from R and layer N from L are the same physical slice; layer 1 from R
    /// and layer 1 from L only coincide on a 2x2x2.
    pub fn cubies_in_layer(&self, face: Face, depth: u16) -> Vec<u32> {
        self.cubies
            .iter()
            .filter(|c| layer_contains(face, depth, c.current, self.size))
            .map(|c| c.id)
            .collect()
    }

    /// Whether every piece is back home and untwisted.
    pub fn is_solved(&self) -> bool {
        // The matrix is the ground truth for "untwisted"; the orientation
        // integer is a convention layered on top of it.
        self.cubies.iter().all(|c| {
            c.current == c.original && c.orientation == 0 && c.orientation_matrix == IDENTITY
        })
    }

    pub(crate) fn rebuild_index(&mut self) {
        self.position_index.clear();
        for (i, cubie) in self.cubies.iter().enumerate() {
            self.position_index.insert(cubie.current, i);
        }
    }
}

//! A breadth-first solver for the white cross.
//!
//! The search explores the graph whose nodes are cube states and whose edges
//! are the 12 single-layer quarter turns, deduplicated by a lossy hash that
//! only looks at the four cross edges. States that agree on those pieces are
//! deliberately conflated, which collapses the search space to a couple of
//! hundred thousand nodes; within that space BFS returns a shortest
//! solution. If the (generous) depth and node bounds are ever hit, a fixed
//! table of short algorithms is tried against the start state instead, so
//! `solve` always terminates with a possibly-empty sequence.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::geometry::mat_apply;
use super::moves::LayerMove;
use super::{notation, CubeState, Cubie, CubieKind, Face};
use crate::moves::{Move, MoveSequence};

/// The literal hash of any state whose cross is in place.
const SOLVED_HASH: &str = "SOLVED";

/// The face whose color defines the cross.
const CROSS_FACE: Face = Face::D;

/// Faces in exploration order: the cross face and its staging face first.
/// This biases the search towards likely solutions without affecting which
/// depth they are found at.
const FACE_PRIORITY: [Face; 6] = [Face::D, Face::U, Face::R, Face::F, Face::L, Face::B];

// Hand-tuned; only the existence of a bounded fallback path matters, the
// specific entries are tunable.
const DEFAULT_FALLBACK: &[&str] = &[
    "D",
    "D'",
    "D2",
    "F2",
    "R2",
    "B2",
    "L2",
    "F D R' D'",
    "R D B' D'",
    "B D L' D'",
    "L D F' D'",
    "F' D' R D",
    "R' D' B D",
    "B' D' L D",
    "L' D' F D",
];

/// A bounded breadth-first solver for the cross sub-goal: place and orient
/// every edge piece carrying the cross color.
///
/// On even cubes there are no such edge pieces (only wings), so the sub-goal
/// is vacuously met and [`solve`](CrossSolver::solve) returns the empty
/// sequence. An empty result on other cubes means either "already solved" or
/// "nothing found"; callers distinguish the two with
/// [`validate`](CrossSolver::validate).
#[derive(Debug, Clone)]
pub struct CrossSolver {
    /// Give up on the search past this many moves. The default of 8 covers
    /// every reachable cross on a 3x3x3.
    pub max_depth: usize,
    /// Give up on the search after this many dequeued nodes.
    pub max_nodes: usize,
    /// Algorithms to try, in order, when the search gives up. Each is applied
    /// move by move against the start state and the first prefix that
    /// completes the cross is returned.
    pub fallback: Vec<String>,
}

impl Default for CrossSolver {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_nodes: 200_000,
            fallback: DEFAULT_FALLBACK.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CrossSolver {
    /// Create a solver with the default bounds and fallback table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a move sequence completing the cross on the given cube. The cube
    /// itself is never modified; applying the returned sequence with
    /// [`CubeState::make_moves`] yields the solved-cross state.
    ///
    /// Deterministic, always terminates, and returns a shortest sequence
    /// whenever the search concludes within its bounds.
    pub fn solve(&self, cube: &CubeState) -> MoveSequence<LayerMove> {
        if subgoal_hash(cube) == SOLVED_HASH {
            return MoveSequence(Vec::new());
        }
        match self.search(cube) {
            Some(solution) => solution,
            None => self.run_fallback(cube),
        }
    }

    /// Whether the cross sub-goal holds on the given cube.
    pub fn validate(&self, cube: &CubeState) -> bool {
        subgoal_hash(cube) == SOLVED_HASH
    }

    fn search(&self, cube: &CubeState) -> Option<MoveSequence<LayerMove>> {
        let mut visited = FxHashSet::default();
        visited.insert(subgoal_hash(cube));

        let mut frontier: VecDeque<Vec<LayerMove>> = VecDeque::new();
        frontier.push_back(Vec::new());
        let mut dequeued = 0usize;

        while let Some(path) = frontier.pop_front() {
            if dequeued >= self.max_nodes {
                log::debug!("cross search hit the node bound after {dequeued} nodes");
                return None;
            }
            dequeued += 1;
            if path.len() >= self.max_depth {
                log::debug!("cross search hit the depth bound at {} moves", path.len());
                return None;
            }

            // Nodes carry only their move list; the state is cheap to replay
            // from the root, which keeps the frontier small.
            let state = path.iter().fold(cube.clone(), |c, &m| c.make_move(m));

            for mv in next_moves(&path) {
                let child = state.clone().make_move(mv);
                let hash = subgoal_hash(&child);
                if hash == SOLVED_HASH {
                    let mut solution = path;
                    solution.push(mv);
                    log::debug!(
                        "cross solved in {} moves after {dequeued} nodes",
                        solution.len()
                    );
                    return Some(MoveSequence(solution).cancel());
                }
                if visited.insert(hash) {
                    let mut next = path.clone();
                    next.push(mv);
                    frontier.push_back(next);
                }
            }
        }

        log::debug!("cross search exhausted its reduced state space");
        None
    }

    fn run_fallback(&self, cube: &CubeState) -> MoveSequence<LayerMove> {
        log::debug!("falling back to the fixed algorithm table");
        for alg in &self.fallback {
            let Some(moves) = parse_alg(alg, cube.size()) else {
                continue;
            };
            let mut state = cube.clone();
            let mut prefix = Vec::new();
            for mv in moves {
                state = state.make_move(mv);
                prefix.push(mv);
                if subgoal_hash(&state) == SOLVED_HASH {
                    log::debug!("fallback {alg:?} completed the cross at move {}", prefix.len());
                    return MoveSequence(prefix);
                }
            }
        }
        MoveSequence(Vec::new())
    }
}

fn parse_alg(alg: &str, size: u16) -> Option<Vec<LayerMove>> {
    alg.split_whitespace()
        .map(|token| notation::parse(token, size).ok())
        .collect()
}

/// The fundamental moves worth trying after `path`, best-first. Two kinds of
/// redundancy are pruned: the exact inverse of the previous move, and a third
/// consecutive turn of one face (three quarter turns are one turn the other
/// way, which the search has already tried).
fn next_moves(path: &[LayerMove]) -> Vec<LayerMove> {
    let last = path.last().copied();
    let before_last = path.len().checked_sub(2).map(|i| path[i]);
    let mut out = Vec::with_capacity(12);

    for face in FACE_PRIORITY {
        for clockwise in [true, false] {
            let mv = LayerMove {
                face,
                depth: 1,
                turns: 1,
                clockwise,
            };
            if let Some(last) = last {
                if mv == last.inverse() {
                    continue;
                }
                if last.face == face && before_last.map(|p| p.face) == Some(face) {
                    continue;
                }
            }
            out.push(mv);
        }
    }
    out
}

fn is_cross_edge(cubie: &Cubie) -> bool {
    matches!(cubie.kind, CubieKind::Edge | CubieKind::MidEdge)
        && cubie.original_color(CROSS_FACE).is_some()
}

/// The face the piece's cross sticker currently points at.
fn cross_sticker_facing(cubie: &Cubie) -> Face {
    let dir = mat_apply(cubie.orientation_matrix, CROSS_FACE.normal());
    Face::from_normal(dir).expect("rotations map face normals to face normals")
}

fn cross_piece_placed(cubie: &Cubie) -> bool {
    cubie.current == cubie.original && cross_sticker_facing(cubie) == CROSS_FACE
}

/// Project a state down to the cross edges: for each, its position and the
/// direction its cross sticker faces, sorted by original position so the
/// encoding is canonical. States identical on these pieces hash identically
/// no matter what the rest of the cube is doing. Collapses to
/// [`SOLVED_HASH`] when every piece is placed and oriented.
fn subgoal_hash(cube: &CubeState) -> String {
    let mut edges: Vec<&Cubie> = cube.cubies().iter().filter(|c| is_cross_edge(c)).collect();
    edges.sort_by_key(|c| c.original);

    if edges.iter().all(|c| cross_piece_placed(c)) {
        return SOLVED_HASH.to_string();
    }

    let parts: Vec<String> = edges
        .iter()
        .map(|c| {
            format!(
                "{},{},{}:{:?}",
                c.current[0],
                c.current[1],
                c.current[2],
                cross_sticker_facing(c)
            )
        })
        .collect();
    parts.join("|")
}

//! A library implementing an arbitrary-size (NxNxN) twisty puzzle at the
//! cubie level: move notation parsing, layer-turn kinematics, and a
//! breadth-first solver for the white cross. This is mostly for personal use.

#![deny(missing_docs)]

pub mod cubennn;
pub mod error;
pub mod moves;

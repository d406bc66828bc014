//! This module defines general error types used throughout the crate.

use thiserror::Error;

/// Error type for rejecting textual move notation at the parser boundary.
///
/// Everything past the parser assumes valid moves; the transition engine
/// never re-validates layer depths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    /// The text does not match the move grammar `[<digits>]<FaceLetter>[2]['|i]`.
    #[error("{0:?} is not valid move notation")]
    InvalidNotation(String),
    /// The move named a layer deeper than the cube has.
    #[error("layer {depth} is out of range for a cube of size {size}")]
    LayerOutOfRange {
        /// The 1-based layer depth that was requested.
        depth: u16,
        /// The size of the cube the move was parsed for.
        size: u16,
    },
}

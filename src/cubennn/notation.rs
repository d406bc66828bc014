//! Parsing of textual move notation.
//!
//! The grammar is `[<digits>]<FaceLetter>[2]['|i]`: an optional layer depth
//! (default 1), a face letter from `FBRLUD`, an optional `2` for a half
//! turn and an optional `'` or `i` for counterclockwise.
//!
//! "Clockwise" always means as seen looking at the named face from outside,
//! which is the standard notation convention. Opposite faces view their
//! shared axis from opposite ends, so `U` and `D` map to opposite rotation
//! senses about the vertical axis; the per-face rotation tables in
//! [`super::geometry`] encode that, and the parser stays convention-free.

use super::moves::LayerMove;
use super::Face;
use crate::error::NotationError;

/// Parse one move against a cube of the given size.
///
/// Malformed text is [`NotationError::InvalidNotation`]; well-formed text
/// naming a layer deeper than the cube is [`NotationError::LayerOutOfRange`].
/// Moves produced here are always safe to hand to
/// [`super::CubeState::make_move`] on a cube of the same size.
pub fn parse(text: &str, size: u16) -> Result<LayerMove, NotationError> {
    let invalid = || NotationError::InvalidNotation(text.to_string());
    let mut chars = text.chars().peekable();

    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    let depth: u16 = if digits.is_empty() {
        1
    } else {
        digits.parse().map_err(|_| invalid())?
    };
    if depth == 0 {
        return Err(invalid());
    }

    let face = chars.next().and_then(Face::from_letter).ok_or_else(invalid)?;

    let mut turns = 1;
    if chars.peek() == Some(&'2') {
        turns = 2;
        chars.next();
    }
    let mut clockwise = true;
    if matches!(chars.peek(), Some('\'') | Some('i')) {
        clockwise = false;
        chars.next();
    }
    if chars.next().is_some() {
        return Err(invalid());
    }

    if depth > size {
        return Err(NotationError::LayerOutOfRange { depth, size });
    }

    Ok(LayerMove {
        face,
        depth,
        turns,
        clockwise,
    })
}

//! Human-facing square names: column letter plus 1-based row.
//!
//! ```
//! use rust_tafl::board::{notation, Position};
//!
//! assert_eq!(notation::to_square("B2"), Some(Position::new(1, 1)));
//! assert_eq!(notation::from_position(Position::new(10, 10)), "K11");
//! ```

use super::position::Position;

/// Parse a square such as `"B2"` or `"k11"`.
#[must_use]
pub fn to_square(text: &str) -> Option<Position> {
    let text = text.trim();
    let mut chars = text.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: usize = digits.parse().ok()?;
    let col = usize::from(letter as u8 - b'A');
    Some(Position::new(row.checked_sub(1)?, col))
}

/// Name a square. Columns past `Z` are not representable and fall back to
/// `?`.
#[must_use]
pub fn from_position(pos: Position) -> String {
    let letter = u8::try_from(pos.col)
        .ok()
        .filter(|&c| c < 26)
        .map_or('?', |c| char::from(b'A' + c));
    format!("{}{}", letter, pos.row + 1)
}

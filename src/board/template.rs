//! Starting layouts.

/// Standard 11x11 opening: 24 attackers in four T-shaped groups, 12
/// defenders in a diamond around the king, and corner markers.
pub const STANDARD_LAYOUT: [[u8; 11]; 11] = [
    [4, 0, 0, 1, 1, 1, 1, 1, 0, 0, 4],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 2, 2, 2, 0, 0, 0, 1],
    [1, 1, 0, 2, 2, 3, 2, 2, 0, 1, 1],
    [1, 0, 0, 0, 2, 2, 2, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    [4, 0, 0, 1, 1, 1, 1, 1, 0, 0, 4],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_fourfold_symmetry() {
        let n = STANDARD_LAYOUT.len();
        for r in 0..n {
            for c in 0..n {
                let code = STANDARD_LAYOUT[r][c];
                assert_eq!(code, STANDARD_LAYOUT[c][n - 1 - r], "rotation at ({}, {})", r, c);
                assert_eq!(code, STANDARD_LAYOUT[n - 1 - r][c], "mirror at ({}, {})", r, c);
            }
        }
    }

    #[test]
    fn test_layout_piece_counts() {
        let flat: Vec<u8> = STANDARD_LAYOUT.iter().flatten().copied().collect();
        assert_eq!(flat.iter().filter(|&&c| c == 1).count(), 24);
        assert_eq!(flat.iter().filter(|&&c| c == 2).count(), 12);
        assert_eq!(flat.iter().filter(|&&c| c == 3).count(), 1);
        assert_eq!(flat.iter().filter(|&&c| c == 4).count(), 4);
    }
}

//! Waste accounting for a finished job.

use crate::normalize::SCALE;
use crate::types::{Solution, UnitPiece};

// Scaled sides reach u32::MAX, so sums of areas need u128.

/// Total area of the demanded pieces, in scaled square units.
pub fn piece_area(pieces: &[UnitPiece]) -> u128 {
    pieces.iter().map(|p| p.rect.area() as u128).sum()
}

/// Produced sheet area minus demanded piece area, in scaled square units.
pub fn waste_area(solution: &Solution, demanded: u128) -> u128 {
    let produced = solution.stock.area() as u128 * solution.sheet_count() as u128;
    produced.saturating_sub(demanded)
}

/// Convert a scaled area back to the caller's square units.
pub fn to_real_area(scaled: u128) -> f64 {
    scaled as f64 / (SCALE as f64 * SCALE as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rect, Sheet};

    #[test]
    fn test_waste_counts_every_sheet() {
        let solution = Solution {
            sheets: vec![
                Sheet { placements: vec![] },
                Sheet { placements: vec![] },
            ],
            stock: Rect::new(1000, 1000),
        };
        let pieces = vec![
            UnitPiece {
                rect: Rect::new(20, 1000),
                original_length: 10.0,
                original_width: 0.2,
            };
            4
        ];
        assert_eq!(piece_area(&pieces), 80_000);
        assert_eq!(waste_area(&solution, piece_area(&pieces)), 2_000_000 - 80_000);
        assert_eq!(to_real_area(920_000), 92.0);
    }

    #[test]
    fn test_largest_sheets_do_not_overflow() {
        let stock = Rect::new(u32::MAX, u32::MAX);
        let solution = Solution {
            sheets: vec![
                Sheet { placements: vec![] },
                Sheet { placements: vec![] },
                Sheet { placements: vec![] },
            ],
            stock,
        };
        let pieces = vec![
            UnitPiece {
                rect: stock,
                original_length: 42_949_672.95,
                original_width: 42_949_672.95,
            };
            2
        ];
        let demanded = piece_area(&pieces);
        assert_eq!(demanded, 2 * stock.area() as u128);
        assert_eq!(waste_area(&solution, demanded), stock.area() as u128);
    }
}

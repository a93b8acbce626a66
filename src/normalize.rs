//! Conversion of real-valued job input into the fixed-point domain the
//! packer works in.
//!
//! Every length is multiplied by [`SCALE`] and rounded once, here. All
//! splitting afterwards is exact integer arithmetic, so repeated subdivision
//! of a free rectangle never accumulates drift.

use crate::error::{PackError, Result};
use crate::types::{Demand, Rect, UnitPiece};

/// Fixed-point scaling factor applied to every length.
pub const SCALE: u32 = 100;

#[derive(Debug, Clone)]
pub struct Normalized {
    pub stock: Rect,
    pub pieces: Vec<UnitPiece>,
}

/// Scale a real length into integer units.
pub fn to_scaled(value: f64, what: &str) -> Result<u32> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PackError::invalid(format!(
            "{what} must be a positive number, got {value}"
        )));
    }
    let scaled = (value * SCALE as f64).round();
    if scaled < 1.0 {
        return Err(PackError::invalid(format!(
            "{what} {value} is below the supported precision"
        )));
    }
    if scaled > u32::MAX as f64 {
        return Err(PackError::invalid(format!("{what} {value} is too large")));
    }
    Ok(scaled as u32)
}

pub fn from_scaled(value: u32) -> f64 {
    value as f64 / SCALE as f64
}

/// Validate the job and expand every demand into `qty` unit pieces, in
/// demand order.
pub fn normalize(sheet_length: f64, sheet_width: f64, demands: &[Demand]) -> Result<Normalized> {
    let stock = Rect::new(
        to_scaled(sheet_width, "sheet width")?,
        to_scaled(sheet_length, "sheet length")?,
    );
    if demands.is_empty() {
        return Err(PackError::invalid("at least one piece is required"));
    }

    let mut pieces = Vec::new();
    for d in demands {
        if d.qty == 0 {
            return Err(PackError::invalid(format!(
                "piece {}x{} has zero quantity",
                d.length, d.width
            )));
        }
        let rect = Rect::new(
            to_scaled(d.width, "piece width")?,
            to_scaled(d.length, "piece length")?,
        );
        // A piece that only fits rotated is accepted; the selector rotates it.
        if !rect.fits_in(&stock) && !rect.rotated().fits_in(&stock) {
            return Err(PackError::PieceTooLarge {
                length: d.length,
                width: d.width,
                sheet_length,
                sheet_width,
            });
        }
        let unit = UnitPiece {
            rect,
            original_length: d.length,
            original_width: d.width,
        };
        pieces.extend(std::iter::repeat_n(unit, d.qty as usize));
    }

    Ok(Normalized { stock, pieces })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_scales_and_rounds() {
        assert_eq!(to_scaled(0.2, "x").unwrap(), 20);
        assert_eq!(to_scaled(12.34, "x").unwrap(), 1234);
        assert_eq!(to_scaled(0.125, "x").unwrap(), 13);
        assert_eq!(to_scaled(1.004, "x").unwrap(), 100);
        assert_eq!(from_scaled(1234), 12.34);
    }

    #[test]
    fn test_rejects_non_positive_and_tiny() {
        for v in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.004] {
            let err = to_scaled(v, "sheet length").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "value {v}");
        }
    }

    #[test]
    fn test_expands_quantities_in_order() {
        let n = normalize(
            10.0,
            5.0,
            &[Demand::new(3.0, 2.0, 2), Demand::new(1.5, 1.0, 1)],
        )
        .unwrap();
        assert_eq!(n.stock, Rect::new(500, 1000));
        assert_eq!(n.pieces.len(), 3);
        assert_eq!(n.pieces[0].rect, Rect::new(200, 300));
        assert_eq!(n.pieces[1], n.pieces[0]);
        assert_eq!(n.pieces[2].rect, Rect::new(100, 150));
        assert_eq!(n.pieces[2].original_length, 1.5);
        assert_eq!(n.pieces[2].original_width, 1.0);
    }

    #[test]
    fn test_empty_pieces_is_invalid() {
        let err = normalize(10.0, 10.0, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_zero_quantity_is_invalid() {
        let err = normalize(10.0, 10.0, &[Demand::new(1.0, 1.0, 0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_piece_too_large_names_piece() {
        let err = normalize(5.0, 5.0, &[Demand::new(10.0, 10.0, 1)]).unwrap_err();
        assert_eq!(
            err,
            PackError::PieceTooLarge {
                length: 10.0,
                width: 10.0,
                sheet_length: 5.0,
                sheet_width: 5.0,
            }
        );
    }

    #[test]
    fn test_rotated_only_fit_is_accepted() {
        // 3 long x 8 wide on a 10 long x 4 wide sheet only fits turned.
        let n = normalize(10.0, 4.0, &[Demand::new(3.0, 8.0, 1)]).unwrap();
        assert_eq!(n.pieces.len(), 1);
    }

    #[test]
    fn test_each_side_fits_but_not_together() {
        // Each side is below the sheet's long side, yet neither orientation fits.
        let err = normalize(10.0, 5.0, &[Demand::new(9.0, 9.0, 1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PieceTooLarge);
    }
}

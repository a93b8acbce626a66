use std::cmp::Reverse;

use crate::error::{PackError, Result};
use crate::guillotine::GuillotineBin;
use crate::normalize::from_scaled;
use crate::types::{Rect, Sheet, Solution, UnitPiece};

/// Greedy sheet allocator: fills one sheet at a time with first-fit
/// placements, then opens the next.
pub struct Solver {
    stock: Rect,
    max_sheets: Option<u32>,
    pieces: Vec<UnitPiece>,
}

impl Solver {
    pub fn new(stock: Rect, max_sheets: Option<u32>, mut pieces: Vec<UnitPiece>) -> Self {
        sort_for_packing(&mut pieces);
        Self {
            stock,
            max_sheets,
            pieces,
        }
    }

    pub fn solve(&self) -> Result<Solution> {
        let pieces = &self.pieces;
        // Tombstones keep piece identity stable while sheets consume them.
        let mut placed = vec![false; pieces.len()];
        let mut remaining = pieces.len();
        let mut sheets = Vec::new();

        while remaining > 0 {
            if let Some(max) = self.max_sheets
                && sheets.len() >= max as usize
            {
                return Err(PackError::SheetQuantityExceeded { max_sheets: max });
            }

            let mut bin = GuillotineBin::new(self.stock);
            for (idx, piece) in pieces.iter().enumerate() {
                if placed[idx] {
                    continue;
                }
                if let Some(fit) = bin.find_first(piece.rect) {
                    bin.place(fit, piece);
                    placed[idx] = true;
                    remaining -= 1;
                }
            }

            if bin.is_empty() {
                // Validation keeps this out of reach; bail instead of spinning.
                if let Some((stuck, _)) = pieces.iter().zip(&placed).find(|(_, done)| !**done) {
                    return Err(PackError::PieceTooLarge {
                        length: stuck.original_length,
                        width: stuck.original_width,
                        sheet_length: from_scaled(self.stock.h),
                        sheet_width: from_scaled(self.stock.w),
                    });
                }
            }

            tracing::debug!(
                sheet = sheets.len() + 1,
                placed = bin.placements.len(),
                remaining,
                "sheet finalized"
            );
            sheets.push(Sheet {
                placements: bin.into_placements(),
            });
        }

        Ok(Solution {
            sheets,
            stock: self.stock,
        })
    }
}

/// Largest area first, ties broken by the longer longest side. The sort is
/// stable so equal pieces keep their demand order.
fn sort_for_packing(pieces: &mut [UnitPiece]) {
    pieces.sort_by_key(|p| (Reverse(p.rect.area()), Reverse(p.rect.longest_side())));
}

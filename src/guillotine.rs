use crate::types::{Placement, Rect, UnitPiece};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRect {
    pub x: u32,
    pub y: u32,
    pub rect: Rect,
}

/// One sheet being packed. Its free rectangles and placements always tile
/// the stock exactly, with no overlaps.
#[derive(Debug, Clone)]
pub struct GuillotineBin {
    pub free_rects: Vec<FreeRect>,
    pub placements: Vec<Placement>,
}

/// Where and how a piece goes on a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    pub free_idx: usize,
    pub rotated: bool,
}

impl GuillotineBin {
    pub fn new(stock: Rect) -> Self {
        Self {
            free_rects: vec![FreeRect {
                x: 0,
                y: 0,
                rect: stock,
            }],
            placements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// First-fit scan over the free rectangles in their tracked order.
    /// The native orientation wins whenever it fits; the piece is only
    /// turned when that is the sole way into a rectangle.
    pub fn find_first(&self, piece: Rect) -> Option<Fit> {
        self.free_rects
            .iter()
            .enumerate()
            .find_map(|(free_idx, free)| {
                if piece.fits_in(&free.rect) {
                    Some(Fit {
                        free_idx,
                        rotated: false,
                    })
                } else if piece.rotated().fits_in(&free.rect) {
                    Some(Fit {
                        free_idx,
                        rotated: true,
                    })
                } else {
                    None
                }
            })
    }

    pub fn place(&mut self, fit: Fit, piece: &UnitPiece) -> Placement {
        let free = self.free_rects[fit.free_idx];
        let placed = if fit.rotated {
            piece.rect.rotated()
        } else {
            piece.rect
        };

        let placement = Placement {
            rect: placed,
            x: free.x,
            y: free.y,
            rotated: fit.rotated,
            original_length: piece.original_length,
            original_width: piece.original_width,
        };

        // The remainders take the consumed rect's slot so scan order is stable.
        let remainders = Self::split(free, placed);
        self.free_rects
            .splice(fit.free_idx..=fit.free_idx, remainders);
        self.placements.push(placement);

        placement
    }

    /// Guillotine split of `free` around `placed` anchored at its corner:
    /// a right strip as tall as the piece, then a full-width top strip.
    fn split(free: FreeRect, placed: Rect) -> impl Iterator<Item = FreeRect> {
        let right = (free.rect.w > placed.w).then(|| FreeRect {
            x: free.x + placed.w,
            y: free.y,
            rect: Rect::new(free.rect.w - placed.w, placed.h),
        });
        let top = (free.rect.h > placed.h).then(|| FreeRect {
            x: free.x,
            y: free.y + placed.h,
            rect: Rect::new(free.rect.w, free.rect.h - placed.h),
        });
        right.into_iter().chain(top)
    }

    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }
}

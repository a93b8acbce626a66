use serde::Serialize;

/// Axis-aligned size in scaled integer units. `w` runs along the sheet's
/// short axis (width), `h` along its long axis (length).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn longest_side(&self) -> u32 {
        self.w.max(self.h)
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    pub fn fits_in(&self, other: &Rect) -> bool {
        self.w <= other.w && self.h <= other.h
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A caller-supplied piece type in real units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Demand {
    pub length: f64,
    pub width: f64,
    pub qty: u32,
}

impl Demand {
    pub fn new(length: f64, width: f64, qty: u32) -> Self {
        Self { length, width, qty }
    }
}

/// One physical piece to place, in scaled units, tagged with the
/// dimensions it was requested with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPiece {
    pub rect: Rect,
    pub original_length: f64,
    pub original_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rect: Rect,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
    pub original_length: f64,
    pub original_width: f64,
}

/// A finalized sheet: only its placements survive packing.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub placements: Vec<Placement>,
}

/// Packing output in the scaled domain.
#[derive(Debug, Clone)]
pub struct Solution {
    pub sheets: Vec<Sheet>,
    pub stock: Rect,
}

impl Solution {
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotated: bool,
    pub original_length: f64,
    pub original_width: f64,
}

/// Packing output converted back to the caller's units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub placements: Vec<Vec<ReportPlacement>>,
    pub waste_area: f64,
    pub sheet_length: f64,
    pub sheet_width: f64,
}

impl Report {
    pub fn sheet_count(&self) -> usize {
        self.placements.len()
    }

    pub fn waste_percent(&self) -> f64 {
        let total_sheet_area =
            self.sheet_length * self.sheet_width * self.placements.len() as f64;
        if total_sheet_area == 0.0 {
            return 0.0;
        }
        self.waste_area / total_sheet_area * 100.0
    }
}

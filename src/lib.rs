//! Guillotine cutting-stock packer.
//!
//! [`pack`] takes real-valued sheet and piece dimensions, packs every piece
//! onto uniform stock sheets with a greedy first-fit guillotine heuristic and
//! reports placements and waste in the caller's units.

pub mod error;
pub mod guillotine;
pub mod normalize;
pub mod solver;
pub mod types;
pub mod waste;

pub use error::{ErrorKind, PackError, Result};
pub use types::{Demand, Report, ReportPlacement};

use normalize::from_scaled;
use solver::Solver;

/// Pack `demands` onto sheets of `sheet_length` x `sheet_width`, using at
/// most `sheet_quantity` sheets when a cap is given.
pub fn pack(
    sheet_length: f64,
    sheet_width: f64,
    sheet_quantity: Option<u32>,
    demands: &[Demand],
) -> Result<Report> {
    let result = pack_inner(sheet_length, sheet_width, sheet_quantity, demands);
    match &result {
        Ok(report) => tracing::info!(
            sheets = report.sheet_count(),
            waste = report.waste_area,
            "job packed"
        ),
        Err(e) => tracing::warn!(error = %e, "job rejected"),
    }
    result
}

fn pack_inner(
    sheet_length: f64,
    sheet_width: f64,
    sheet_quantity: Option<u32>,
    demands: &[Demand],
) -> Result<Report> {
    if sheet_quantity == Some(0) {
        return Err(PackError::invalid("sheet quantity must be at least 1"));
    }
    let normalized = normalize::normalize(sheet_length, sheet_width, demands)?;
    let demanded = waste::piece_area(&normalized.pieces);
    let solution = Solver::new(normalized.stock, sheet_quantity, normalized.pieces).solve()?;
    let waste = waste::waste_area(&solution, demanded);

    let placements = solution
        .sheets
        .iter()
        .map(|sheet| {
            sheet
                .placements
                .iter()
                .map(|p| ReportPlacement {
                    x: from_scaled(p.x),
                    y: from_scaled(p.y),
                    width: from_scaled(p.rect.w),
                    height: from_scaled(p.rect.h),
                    rotated: p.rotated,
                    original_length: p.original_length,
                    original_width: p.original_width,
                })
                .collect()
        })
        .collect();

    Ok(Report {
        placements,
        waste_area: waste::to_real_area(waste),
        sheet_length: from_scaled(solution.stock.h),
        sheet_width: from_scaled(solution.stock.w),
    })
}

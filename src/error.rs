//! Error types for sheet packing.

use thiserror::Error;

/// Coarse classification used by front ends to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    PieceTooLarge,
    SheetQuantityExceeded,
}

/// A packing job failed as a whole. No partial result accompanies it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Piece {length}x{width} is too large for the sheet {sheet_length}x{sheet_width}.")]
    PieceTooLarge {
        length: f64,
        width: f64,
        sheet_length: f64,
        sheet_width: f64,
    },

    #[error("Cannot fit all pieces within {max_sheets} sheets")]
    SheetQuantityExceeded { max_sheets: u32 },
}

impl PackError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        PackError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PackError::InvalidInput { .. } => ErrorKind::InvalidInput,
            PackError::PieceTooLarge { .. } => ErrorKind::PieceTooLarge,
            PackError::SheetQuantityExceeded { .. } => ErrorKind::SheetQuantityExceeded,
        }
    }
}

pub type Result<T> = std::result::Result<T, PackError>;

//! Simulation Error Types
//!
//! Unified error type for the cloth simulation. Fallible operations
//! (construction, row/column-addressed particle and square lookups) return
//! `Result<T, ClothError>` instead of asserting or panicking.

use core::fmt;

/// Unified error type for cloth operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClothError {
    /// A particle row/column address is out of range.
    InvalidParticleIndex {
        /// The requested row
        row: usize,
        /// The requested column
        column: usize,
        /// Number of rows in the grid
        rows: usize,
        /// Number of columns in the grid
        columns: usize,
    },
    /// A square row/column address is out of range.
    InvalidSquareIndex {
        /// The requested row
        row: usize,
        /// The requested column
        column: usize,
        /// Number of square rows, `rows - 1`
        rows: usize,
        /// Number of square columns, `columns - 1`
        columns: usize,
    },
    /// Invalid construction parameter.
    InvalidConfiguration {
        /// Description of the invalid parameter
        reason: &'static str,
    },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParticleIndex {
                row,
                column,
                rows,
                columns,
            } => {
                write!(
                    f,
                    "particle ({row}, {column}) out of range (grid {rows}x{columns})"
                )
            }
            Self::InvalidSquareIndex {
                row,
                column,
                rows,
                columns,
            } => {
                write!(
                    f,
                    "square ({row}, {column}) out of range (grid {rows}x{columns})"
                )
            }
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {reason}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClothError {}

// ============================================================================
// Tests
// ============================================================================

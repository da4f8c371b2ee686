//! # Error Types
//!
//! Error types for the layout computation. Every failure is a configuration
//! defect: nothing here is transient and nothing is retried.
//!
//! ## Error Policy
//!
//! - NO clamping of degenerate values (a zero-fiber tower is an error)
//! - All validation happens before any backend volume exists
//! - Errors carry the offending values for debugging

use config::ConfigError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while computing the detector layout.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// The global configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A tower's angular width is zero, negative, or not finite.
    #[error("Tower angular width must be positive: {delta_theta}")]
    InvalidDeltaTheta {
        /// Offending width in radians.
        delta_theta: f64,
    },

    /// A tower's angular extent leaves the valid hemisphere.
    #[error("Tower centred at {theta_center} rad (width {delta_theta}) leaves [0, pi/2)")]
    ThetaOutOfRange {
        /// Polar angle of the tower mid-plane.
        theta_center: f64,
        /// Angular width of the tower.
        delta_theta: f64,
    },

    /// The tower is too small to hold a single fiber along one axis.
    ///
    /// Contains the un-floored column/row quotients so the deficit is visible.
    #[error("Tower cannot hold a fiber grid: columns {columns_raw:.3}, rows {rows_raw:.3}")]
    DegenerateGrid {
        /// `(width - footprint) / pitch` along the azimuthal axis.
        columns_raw: f64,
        /// `(width - footprint) / pitch` along the polar axis.
        rows_raw: f64,
    },

    /// Two towers share a signed theta index.
    #[error("Duplicate signed tower index {signed_index}")]
    DuplicateTowerIndex {
        /// The repeated index.
        signed_index: i32,
    },
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

// =============================================================================
// TESTS
// =============================================================================

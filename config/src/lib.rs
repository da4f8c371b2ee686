//! # Config Crate
//!
//! Centralized design constants and the validated detector configuration
//! for the dual-readout calorimeter layout. Every magic number of the
//! geometry lives here so the layout crate stays free of literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{FIBER_PITCH, NUM_BARREL};
//! use config::detector::DetectorConfig;
//!
//! let cfg = DetectorConfig::default();
//! assert!(cfg.validate().is_ok());
//! assert_eq!(cfg.barrel_delta_theta.len(), NUM_BARREL);
//! assert_eq!(FIBER_PITCH, 1.5);
//! ```
//!
//! ## Units
//!
//! - Lengths: millimetres
//! - Angles: radians, polar angles measured from the transverse plane

pub mod constants;
pub mod detector;

pub use detector::{ConfigError, DetectorConfig, FiberRadii};

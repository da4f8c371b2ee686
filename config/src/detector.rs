//! # Detector Configuration
//!
//! Immutable snapshot of every global parameter the layout needs. Built once
//! (usually from [`DetectorConfig::default`]), validated, then shared by
//! reference for the rest of the process.

use std::f64::consts::{FRAC_PI_2, PI};

use thiserror::Error;

use crate::constants::*;

// =============================================================================
// FIBER SPECIES RADII
// =============================================================================

/// Clad and core radii of one fiber species.
///
/// # Examples
/// ```
/// use config::detector::FiberRadii;
/// let r = FiberRadii { clad: 0.5, core: 0.49 };
/// assert!(r.core < r.clad);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberRadii {
    /// Outer radius of the cladding tube.
    pub clad: f64,
    /// Radius of the core cylinder.
    pub core: f64,
}

// =============================================================================
// DETECTOR CONFIG
// =============================================================================

/// Global detector parameters.
///
/// # Examples
/// ```
/// use config::detector::DetectorConfig;
/// let cfg = DetectorConfig::default();
/// cfg.validate().expect("design configuration is consistent");
/// assert_eq!(cfg.num_barrel, 52);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Towers per barrel half.
    pub num_barrel: usize,
    /// Towers per endcap half.
    pub num_endcap: usize,
    /// Azimuthal copies of every tower.
    pub num_z_rot: usize,
    /// Radial length of every tower.
    pub tower_height: f64,
    /// Cylindrical inner radius of the barrel.
    pub barrel_inner_radius: f64,
    /// Fixed inner distance of the endcap towers.
    pub endcap_inner_radius: f64,
    /// Per-index barrel tower widths.
    pub barrel_delta_theta: Vec<f64>,
    /// Expected sum of `barrel_delta_theta`.
    pub barrel_coverage: f64,
    /// Uniform endcap tower width.
    pub endcap_delta_theta: f64,
    /// Polar angle of the first endcap tower's lower edge.
    pub endcap_start_theta: f64,
    /// Expected `endcap_delta_theta * num_endcap`.
    pub endcap_coverage: f64,
    /// Sensor layer thickness.
    pub sensor_housing_thickness: f64,
    /// Optical filter thickness.
    pub filter_thickness: f64,
    /// Active silicon thickness.
    pub sensor_active_thickness: f64,
    /// Cerenkov fiber radii.
    pub fiber_c: FiberRadii,
    /// Scintillation fiber radii.
    pub fiber_s: FiberRadii,
    /// Half-length of the cubic world volume.
    pub world_half_size: f64,
    /// Tolerance used for the coverage checks.
    pub coverage_tolerance: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            num_barrel: NUM_BARREL,
            num_endcap: NUM_ENDCAP,
            num_z_rot: NUM_Z_ROT,
            tower_height: TOWER_HEIGHT,
            barrel_inner_radius: BARREL_INNER_RADIUS,
            endcap_inner_radius: ENDCAP_INNER_RADIUS,
            barrel_delta_theta: BARREL_DELTA_THETA.to_vec(),
            barrel_coverage: BARREL_COVERAGE,
            endcap_delta_theta: ENDCAP_DELTA_THETA,
            endcap_start_theta: ENDCAP_START_THETA,
            endcap_coverage: ENDCAP_COVERAGE,
            sensor_housing_thickness: SENSOR_HOUSING_THICKNESS,
            filter_thickness: FILTER_THICKNESS,
            sensor_active_thickness: SENSOR_ACTIVE_THICKNESS,
            fiber_c: FiberRadii {
                clad: CLAD_C_RADIUS,
                core: CORE_C_RADIUS,
            },
            fiber_s: FiberRadii {
                clad: CLAD_S_RADIUS,
                core: CORE_S_RADIUS,
            },
            world_half_size: WORLD_HALF_SIZE,
            coverage_tolerance: COVERAGE_TOLERANCE,
        }
    }
}

impl DetectorConfig {
    /// Azimuthal pitch between neighbouring tower copies.
    ///
    /// # Examples
    /// ```
    /// use config::detector::DetectorConfig;
    /// let cfg = DetectorConfig::default();
    /// let full_turn = cfg.phi_pitch() * cfg.num_z_rot as f64;
    /// assert!((full_turn - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    /// ```
    pub fn phi_pitch(&self) -> f64 {
        2.0 * PI / self.num_z_rot as f64
    }

    /// Combined thickness of the sensor housing (sensor layer plus filter).
    pub fn housing_depth(&self) -> f64 {
        self.sensor_housing_thickness + self.filter_thickness
    }

    /// Total number of towers over both halves of barrel and endcap.
    pub fn tower_count(&self) -> usize {
        2 * (self.num_barrel + self.num_endcap)
    }

    /// Checks every invariant the layout relies on.
    ///
    /// Any failure is a design defect: the layout refuses to run rather than
    /// hand partial geometry to a backend.
    ///
    /// # Examples
    /// ```
    /// use config::detector::{ConfigError, DetectorConfig};
    /// let mut cfg = DetectorConfig::default();
    /// cfg.endcap_delta_theta = 0.0;
    /// assert!(matches!(cfg.validate(), Err(ConfigError::NonPositiveWidth { .. })));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, count) in [
            ("num_barrel", self.num_barrel),
            ("num_endcap", self.num_endcap),
            ("num_z_rot", self.num_z_rot),
        ] {
            if count == 0 {
                return Err(ConfigError::ZeroCount(name));
            }
        }

        for (name, value) in [
            ("tower_height", self.tower_height),
            ("barrel_inner_radius", self.barrel_inner_radius),
            ("endcap_inner_radius", self.endcap_inner_radius),
            ("sensor_housing_thickness", self.sensor_housing_thickness),
            ("filter_thickness", self.filter_thickness),
            ("sensor_active_thickness", self.sensor_active_thickness),
            ("world_half_size", self.world_half_size),
            ("coverage_tolerance", self.coverage_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveLength { name, value });
            }
        }

        if self.sensor_active_thickness > self.sensor_housing_thickness {
            return Err(ConfigError::SensorStack {
                active: self.sensor_active_thickness,
                housing: self.sensor_housing_thickness,
            });
        }

        for (species, radii) in [("C", self.fiber_c), ("S", self.fiber_s)] {
            if !(radii.core > 0.0 && radii.core < radii.clad) {
                return Err(ConfigError::FiberRadii {
                    species,
                    clad: radii.clad,
                    core: radii.core,
                });
            }
        }

        if self.barrel_delta_theta.len() != self.num_barrel {
            return Err(ConfigError::BarrelTableLength {
                expected: self.num_barrel,
                found: self.barrel_delta_theta.len(),
            });
        }

        for (index, &value) in self.barrel_delta_theta.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveWidth {
                    section: "barrel",
                    index,
                    value,
                });
            }
        }
        if !(self.endcap_delta_theta.is_finite() && self.endcap_delta_theta > 0.0) {
            return Err(ConfigError::NonPositiveWidth {
                section: "endcap",
                index: 0,
                value: self.endcap_delta_theta,
            });
        }

        let barrel_total: f64 = self.barrel_delta_theta.iter().sum();
        if (barrel_total - self.barrel_coverage).abs() > self.coverage_tolerance {
            return Err(ConfigError::CoverageMismatch {
                section: "barrel",
                expected: self.barrel_coverage,
                actual: barrel_total,
            });
        }
        if barrel_total >= FRAC_PI_2 {
            return Err(ConfigError::CoverageExceedsHemisphere {
                section: "barrel",
                end: barrel_total,
            });
        }

        let endcap_total = self.endcap_delta_theta * self.num_endcap as f64;
        if (endcap_total - self.endcap_coverage).abs() > self.coverage_tolerance {
            return Err(ConfigError::CoverageMismatch {
                section: "endcap",
                expected: self.endcap_coverage,
                actual: endcap_total,
            });
        }
        let endcap_end = self.endcap_start_theta + endcap_total;
        if self.endcap_start_theta < 0.0 || endcap_end >= FRAC_PI_2 {
            return Err(ConfigError::CoverageExceedsHemisphere {
                section: "endcap",
                end: endcap_end,
            });
        }

        Ok(())
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error returned when the detector configuration is inconsistent.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A segmentation count is zero.
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),

    /// A length is zero, negative, or not finite.
    #[error("{name} must be a positive length: {value}")]
    NonPositiveLength { name: &'static str, value: f64 },

    /// The active silicon is thicker than the sensor layer holding it.
    #[error("sensor active layer ({active}) exceeds sensor housing ({housing})")]
    SensorStack { active: f64, housing: f64 },

    /// Core radius is not strictly inside the cladding.
    #[error("fiber {species}: core radius {core} must lie inside clad radius {clad}")]
    FiberRadii {
        species: &'static str,
        clad: f64,
        core: f64,
    },

    /// The barrel width table does not match the barrel tower count.
    #[error("barrel width table has {found} entries, expected {expected}")]
    BarrelTableLength { expected: usize, found: usize },

    /// A tower width is zero, negative, or not finite.
    #[error("{section} tower {index}: angular width must be positive: {value}")]
    NonPositiveWidth {
        section: &'static str,
        index: usize,
        value: f64,
    },

    /// The prefix-summed widths do not reach the design coverage.
    #[error("{section} angular coverage mismatch: expected {expected}, got {actual}")]
    CoverageMismatch {
        section: &'static str,
        expected: f64,
        actual: f64,
    },

    /// The section would extend past the polar axis.
    #[error("{section} coverage ends at {end} rad, beyond the hemisphere")]
    CoverageExceedsHemisphere { section: &'static str, end: f64 },
}

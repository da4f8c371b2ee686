//! Design constants of the dual-readout calorimeter.
//!
//! Each public item documents its purpose and, where useful, a minimal usage
//! example so that downstream crates stay declarative and never scatter
//! literals. Lengths are millimetres, angles are radians.

// =============================================================================
// SEGMENTATION
// =============================================================================

/// Number of polar (theta) towers in one barrel half.
///
/// # Examples
/// ```
/// use config::constants::{BARREL_DELTA_THETA, NUM_BARREL};
/// assert_eq!(BARREL_DELTA_THETA.len(), NUM_BARREL);
/// ```
pub const NUM_BARREL: usize = 52;

/// Number of polar (theta) towers in one endcap half.
pub const NUM_ENDCAP: usize = 40;

/// Number of azimuthal copies of every tower.
///
/// # Examples
/// ```
/// use config::constants::NUM_Z_ROT;
/// let phi_pitch = 2.0 * std::f64::consts::PI / NUM_Z_ROT as f64;
/// assert!(phi_pitch < 0.023);
/// ```
pub const NUM_Z_ROT: usize = 283;

/// Angular width of each barrel tower, ordered from the transverse plane
/// towards the barrel/endcap transition.
///
/// Widths shrink monotonically so the towers keep a roughly constant
/// transverse size as the inner distance grows with the polar angle.
pub const BARREL_DELTA_THETA: [f64; NUM_BARREL] = [
    0.02222, 0.02220, 0.02217, 0.02214, 0.02209, 0.02203, 0.02196, 0.02188, 0.02179, 0.02169,
    0.02158, 0.02146, 0.02133, 0.02119, 0.02105, 0.02089, 0.02073, 0.02056, 0.02039, 0.02020,
    0.02002, 0.01982, 0.01962, 0.01941, 0.01920, 0.01898, 0.01876, 0.01854, 0.01831, 0.01808,
    0.01785, 0.01762, 0.01738, 0.01715, 0.01691, 0.01668, 0.01644, 0.01621, 0.01597, 0.01574,
    0.01551, 0.01528, 0.01505, 0.01483, 0.01461, 0.01439, 0.01417, 0.01396, 0.01375, 0.01354,
    0.01334, 0.01314,
];

/// Total polar coverage of one barrel half (sum of [`BARREL_DELTA_THETA`]).
pub const BARREL_COVERAGE: f64 = 0.95981;

/// Uniform angular width of every endcap tower.
///
/// Matches the narrowest barrel tower so both regions meet with the same
/// granularity.
pub const ENDCAP_DELTA_THETA: f64 = BARREL_DELTA_THETA[NUM_BARREL - 1];

/// Polar angle at which the first endcap tower starts.
pub const ENDCAP_START_THETA: f64 = 0.95717;

/// Total polar coverage of one endcap half.
pub const ENDCAP_COVERAGE: f64 = ENDCAP_DELTA_THETA * NUM_ENDCAP as f64;

/// Allowed mismatch between a prefix-summed angular total and its design
/// coverage.
///
/// # Examples
/// ```
/// use config::constants::{BARREL_COVERAGE, BARREL_DELTA_THETA, COVERAGE_TOLERANCE};
/// let total: f64 = BARREL_DELTA_THETA.iter().sum();
/// assert!((total - BARREL_COVERAGE).abs() < COVERAGE_TOLERANCE);
/// ```
pub const COVERAGE_TOLERANCE: f64 = 1.0e-6;

// =============================================================================
// ENVELOPE
// =============================================================================

/// Radial length of every tower.
pub const TOWER_HEIGHT: f64 = 2000.0;

/// Cylindrical inner radius of the barrel.
pub const BARREL_INNER_RADIUS: f64 = 1800.0;

/// Distance from the interaction point to the inner face of every endcap
/// tower.
pub const ENDCAP_INNER_RADIUS: f64 = 3125.83;

/// Half-size of the world box enclosing the detector.
pub const WORLD_HALF_SIZE: f64 = 10_000.0;

// =============================================================================
// PHOTOSENSOR STACK
// =============================================================================

/// Thickness of the photosensor (SiPM) layer.
pub const SENSOR_HOUSING_THICKNESS: f64 = 0.3;

/// Thickness of the optical filter layer in front of the sensors.
pub const FILTER_THICKNESS: f64 = 0.01;

/// Thickness of the active silicon inside each sensor cell.
pub const SENSOR_ACTIVE_THICKNESS: f64 = 0.01;

/// Half-size of one square sensor cell in the transverse plane.
pub const SENSOR_CELL_HALF_SIZE: f64 = 0.6;

// =============================================================================
// FIBERS
// =============================================================================

/// Centre-to-centre distance between neighbouring fibers.
///
/// Fixed by the mechanical design; not configurable.
pub const FIBER_PITCH: f64 = 1.5;

/// Footprint reserved for one fiber when fitting the grid into a tower.
pub const FIBER_FOOTPRINT: f64 = 1.2;

/// Outer cladding radius of the Cerenkov fiber.
pub const CLAD_C_RADIUS: f64 = 0.50;

/// Core radius of the Cerenkov fiber.
pub const CORE_C_RADIUS: f64 = 0.49;

/// Outer cladding radius of the scintillation fiber.
pub const CLAD_S_RADIUS: f64 = 0.50;

/// Core radius of the scintillation fiber.
pub const CORE_S_RADIUS: f64 = 0.485;

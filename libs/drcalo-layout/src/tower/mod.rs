//! # Tower Geometry
//!
//! Pure geometric calculator for one polar slice of the detector. Given the
//! slice's polar centre and width it derives the tower trapezoid, the
//! photosensor housing behind it, and one placement per azimuthal copy.
//!
//! ## Conventions
//!
//! Polar angles are measured from the transverse plane. A right-side tower
//! points into `+z`, a left-side tower is its mirror image in `-z`.
//!
//! ```text
//!        V4 ____ V3        high-elevation edge (towards the axis)
//!          /    \
//!         /      \         tower axis leaves the origin at theta_center
//!     V2 /________\ V1     low-elevation edge
//!       outer    inner
//! ```
//!
//! Barrel towers sit on a cylinder of fixed radius, so their inner distance
//! along the axis grows as `1 / cos(theta)`. Endcap towers sit on a sphere of
//! fixed radius.

use std::f64::consts::FRAC_PI_2;

use config::DetectorConfig;
use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::shape::{Placement, TrapFace, TrapShape};

// =============================================================================
// SECTION / SIDE
// =============================================================================

/// Region of the detector shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Mid-polar region on a cylinder.
    Barrel,
    /// Near-axis region on a sphere.
    Endcap,
}

impl Section {
    /// Single-letter code used in volume and detector names.
    pub fn code(self) -> char {
        match self {
            Section::Barrel => 'B',
            Section::Endcap => 'E',
        }
    }
}

/// Half of the detector along the beam axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Positive polar angles (`+z`).
    Right,
    /// Mirrored half (`-z`).
    Left,
}

impl Side {
    /// `+1.0` on the right, `-1.0` on the left.
    pub fn sign(self) -> f64 {
        match self {
            Side::Right => 1.0,
            Side::Left => -1.0,
        }
    }

    /// Single-letter code used in volume and detector names.
    pub fn code(self) -> char {
        match self {
            Side::Right => 'R',
            Side::Left => 'L',
        }
    }
}

// =============================================================================
// TOWER GEOMETRY
// =============================================================================

/// Geometry of one tower and its photosensor housing.
///
/// # Examples
/// ```
/// use config::DetectorConfig;
/// use drcalo_layout::tower::{Side, TowerGeometry};
///
/// let cfg = DetectorConfig::default();
/// let tower = TowerGeometry::barrel(&cfg, 0.01111, 0.02222, Side::Right).unwrap();
/// assert_eq!(tower.placements().len(), cfg.num_z_rot);
/// assert!(tower.inner_radius() > cfg.barrel_inner_radius);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerGeometry {
    theta_center: f64,
    delta_theta: f64,
    side: Side,
    inner_radius: f64,
    tower_height: f64,
    housing_depth: f64,
    phi_pitch: f64,
    num_z_rot: usize,
}

impl TowerGeometry {
    /// Barrel tower: inner face on the barrel cylinder.
    pub fn barrel(
        config: &DetectorConfig,
        theta_center: f64,
        delta_theta: f64,
        side: Side,
    ) -> LayoutResult<Self> {
        Self::validate_angles(theta_center, delta_theta)?;
        let inner_radius = config.barrel_inner_radius / theta_center.cos();
        Ok(Self::with_inner_radius(
            config,
            theta_center,
            delta_theta,
            side,
            inner_radius,
        ))
    }

    /// Endcap tower: inner face at the fixed endcap distance.
    pub fn endcap(
        config: &DetectorConfig,
        theta_center: f64,
        delta_theta: f64,
        side: Side,
    ) -> LayoutResult<Self> {
        Self::validate_angles(theta_center, delta_theta)?;
        Ok(Self::with_inner_radius(
            config,
            theta_center,
            delta_theta,
            side,
            config.endcap_inner_radius,
        ))
    }

    /// Dispatches on `section`.
    pub fn new(
        config: &DetectorConfig,
        section: Section,
        theta_center: f64,
        delta_theta: f64,
        side: Side,
    ) -> LayoutResult<Self> {
        match section {
            Section::Barrel => Self::barrel(config, theta_center, delta_theta, side),
            Section::Endcap => Self::endcap(config, theta_center, delta_theta, side),
        }
    }

    fn with_inner_radius(
        config: &DetectorConfig,
        theta_center: f64,
        delta_theta: f64,
        side: Side,
        inner_radius: f64,
    ) -> Self {
        Self {
            theta_center,
            delta_theta,
            side,
            inner_radius,
            tower_height: config.tower_height,
            housing_depth: config.housing_depth(),
            phi_pitch: config.phi_pitch(),
            num_z_rot: config.num_z_rot,
        }
    }

    fn validate_angles(theta_center: f64, delta_theta: f64) -> LayoutResult<()> {
        if !(delta_theta.is_finite() && delta_theta > 0.0) {
            return Err(LayoutError::InvalidDeltaTheta { delta_theta });
        }
        let lower = theta_center - delta_theta / 2.0;
        let upper = theta_center + delta_theta / 2.0;
        if !theta_center.is_finite() || lower < 0.0 || upper >= FRAC_PI_2 {
            return Err(LayoutError::ThetaOutOfRange {
                theta_center,
                delta_theta,
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Unsigned polar angle of the tower mid-plane.
    pub fn theta_center(&self) -> f64 {
        self.theta_center
    }

    /// Angular width of the tower.
    pub fn delta_theta(&self) -> f64 {
        self.delta_theta
    }

    /// Side this tower belongs to.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Distance from the interaction point to the inner face, along the axis.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Radial length of the tower.
    pub fn tower_height(&self) -> f64 {
        self.tower_height
    }

    /// Azimuthal pitch between copies.
    pub fn phi_pitch(&self) -> f64 {
        self.phi_pitch
    }

    /// Half of the polar extent at distance `r` along the axis.
    pub fn half_span_at(&self, r: f64) -> f64 {
        r * (self.delta_theta / 2.0).tan()
    }

    // -------------------------------------------------------------------------
    // Vertices
    // -------------------------------------------------------------------------

    /// Edge point at distance `r` along the axis, in the `phi = 0` plane.
    ///
    /// `high` selects the edge closer to the polar axis.
    fn edge_point(&self, r: f64, high: bool) -> DVec3 {
        let (s, c) = self.theta_center.sin_cos();
        let t = (self.delta_theta / 2.0).tan();
        let dir = if high { -1.0 } else { 1.0 };
        DVec3::new(
            r * (c + dir * s * t),
            0.0,
            self.side.sign() * r * (s - dir * c * t),
        )
    }

    /// The four edge vertices `[V1, V2, V3, V4]` in the `phi = 0` plane.
    ///
    /// V1/V2 are the inner/outer ends of the low-elevation edge, V3/V4 those
    /// of the high-elevation edge. Left-side vertices have `z` negated.
    pub fn edge_vertices(&self) -> [DVec3; 4] {
        let outer = self.inner_radius + self.tower_height;
        [
            self.edge_point(self.inner_radius, false),
            self.edge_point(outer, false),
            self.edge_point(self.inner_radius, true),
            self.edge_point(outer, true),
        ]
    }

    /// Cylindrical radius of V4, the narrowest azimuthal edge of the outer
    /// face. Bounds the column count of the fiber grid.
    pub fn outer_edge_radius(&self) -> f64 {
        self.edge_point(self.inner_radius + self.tower_height, true).x
    }

    fn face(&self, r: f64) -> TrapFace {
        let phi_half = (self.phi_pitch / 2.0).tan();
        TrapFace {
            half_y: self.half_span_at(r),
            half_x_low: self.edge_point(r, false).x * phi_half,
            half_x_high: self.edge_point(r, true).x * phi_half,
        }
    }

    /// Tower trapezoid in its local frame.
    pub fn shape(&self) -> TrapShape {
        TrapShape::new(
            self.tower_height / 2.0,
            self.face(self.inner_radius),
            self.face(self.inner_radius + self.tower_height),
        )
    }

    /// Housing trapezoid continuing the tower's footprint behind its outer face.
    pub fn housing_shape(&self) -> TrapShape {
        let start = self.inner_radius + self.tower_height;
        TrapShape::new(
            self.housing_depth / 2.0,
            self.face(start),
            self.face(start + self.housing_depth),
        )
    }

    // -------------------------------------------------------------------------
    // Placements
    // -------------------------------------------------------------------------

    /// Local frame of the `phi = 0` copy: columns are local x, y, z.
    pub fn local_frame(&self) -> DMat3 {
        let (s, c) = self.theta_center.sin_cos();
        let sign = self.side.sign();
        DMat3::from_cols(
            DVec3::new(0.0, sign, 0.0),
            DVec3::new(-s, 0.0, sign * c),
            DVec3::new(c, 0.0, sign * s),
        )
    }

    fn placements_at(&self, distance: f64) -> Vec<Placement> {
        let frame = self.local_frame();
        let centre = frame.z_axis * distance;
        (0..self.num_z_rot)
            .map(|j| {
                let rot = DMat3::from_rotation_z(j as f64 * self.phi_pitch);
                Placement {
                    rotation: rot * frame,
                    translation: rot * centre,
                    copy_number: j as u32,
                }
            })
            .collect()
    }

    /// One placement per azimuthal copy, centring the tower between its
    /// inner and outer faces.
    pub fn placements(&self) -> Vec<Placement> {
        self.placements_at(self.inner_radius + self.tower_height / 2.0)
    }

    /// One placement per azimuthal copy for the sensor housing.
    pub fn housing_placements(&self) -> Vec<Placement> {
        self.placements_at(self.inner_radius + self.tower_height + self.housing_depth / 2.0)
    }
}

#[cfg(test)]
mod tests;

//! # Segment Builder
//!
//! Builds every tower of one barrel or endcap half.
//!
//! ## Angular Offsets
//!
//! Each tower starts where the previous one ended. The starts are computed
//! up front as a prefix sum over the width table, after which every tower is
//! independent of the others and the towers are built in parallel. Output
//! order is always increasing polar angle.
//!
//! ## Signed Index Convention
//!
//! | section | right side    | left side          |
//! |---------|---------------|--------------------|
//! | barrel  | `i`           | `-i - 1`           |
//! | endcap  | `i + nBarrel` | `-i - nBarrel - 1` |
//!
//! Index 0 never collides between sides, and endcap indices never overlap
//! barrel ones.

use config::{ConfigError, DetectorConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LayoutResult;
use crate::fiber::{FiberDescriptor, FiberGrid, GridShape};
use crate::sensor::SensorArray;
use crate::shape::{Placement, TrapShape};
use crate::tower::{Section, Side, TowerGeometry};

// =============================================================================
// TOWER PROPERTY
// =============================================================================

/// Signed polar position of a tower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TowerTheta {
    /// Signed theta index (see the module docs).
    pub signed_index: i32,
    /// Polar angle of the tower centre, negative on the left side.
    #[serde(rename = "signedAngleRadians")]
    pub signed_theta: f64,
}

/// Per-tower summary handed to readout and reconstruction.
///
/// Field names on the wire follow the established readout layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerProperty {
    /// Fiber grid dimensions.
    #[serde(rename = "towerXY")]
    pub tower_xy: GridShape,
    /// Signed index and angle.
    #[serde(rename = "towerTheta")]
    pub tower_theta: TowerTheta,
    /// Inner distance along the tower axis.
    #[serde(rename = "innerR")]
    pub inner_r: f64,
    /// Tower height.
    #[serde(rename = "towerH")]
    pub tower_h: f64,
    /// Angular width.
    #[serde(rename = "dTheta")]
    pub d_theta: f64,
}

// =============================================================================
// SLOTS
// =============================================================================

/// Angular slot of one tower before any geometry is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerSlot {
    /// Barrel or endcap.
    pub section: Section,
    /// Right or left half.
    pub side: Side,
    /// Position within the half, counted from the lowest polar angle.
    pub index: usize,
    /// Polar angle of the tower's lower edge.
    pub theta_start: f64,
    /// Angular width.
    pub delta_theta: f64,
}

impl TowerSlot {
    /// Unsigned polar angle of the tower centre.
    pub fn theta_center(&self) -> f64 {
        self.theta_start + self.delta_theta / 2.0
    }

    /// Signed theta index; `num_barrel` offsets endcap indices.
    pub fn signed_index(&self, num_barrel: usize) -> i32 {
        let offset = match self.section {
            Section::Barrel => 0,
            Section::Endcap => num_barrel as i32,
        };
        let i = self.index as i32 + offset;
        match self.side {
            Side::Right => i,
            Side::Left => -i - 1,
        }
    }

    /// Polar angle of the tower centre, negated on the left side.
    pub fn signed_theta(&self) -> f64 {
        self.side.sign() * self.theta_center()
    }

    /// Volume name, e.g. `towerBR12`.
    pub fn name(&self) -> String {
        format!(
            "tower{}{}{}",
            self.section.code(),
            self.side.code(),
            self.index
        )
    }
}

/// Lower-edge angle of every tower followed by the end of the last one.
///
/// # Examples
/// ```
/// use drcalo_layout::segment::angular_offsets;
/// let offsets = angular_offsets(0.5, &[0.1, 0.2, 0.3]);
/// assert_eq!(offsets.len(), 4);
/// assert!((offsets[3] - 1.1).abs() < 1e-12);
/// ```
pub fn angular_offsets(start: f64, widths: &[f64]) -> Vec<f64> {
    std::iter::once(start)
        .chain(widths.iter().scan(start, |acc, w| {
            *acc += w;
            Some(*acc)
        }))
        .collect()
}

// =============================================================================
// TOWER BUILD
// =============================================================================

/// Everything computed for one tower.
///
/// Fibers and sensor cells are derived on demand from the grid rather than
/// stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TowerBuild {
    /// Angular slot.
    pub slot: TowerSlot,
    /// Tower and housing geometry.
    pub geometry: TowerGeometry,
    /// Fiber grid.
    pub grid: FiberGrid,
    /// Exported summary.
    pub property: TowerProperty,
}

impl TowerBuild {
    /// Volume name.
    pub fn name(&self) -> String {
        self.slot.name()
    }

    /// Tower trapezoid.
    pub fn shape(&self) -> TrapShape {
        self.geometry.shape()
    }

    /// Housing trapezoid.
    pub fn housing_shape(&self) -> TrapShape {
        self.geometry.housing_shape()
    }

    /// Azimuthal placements of the tower.
    pub fn placements(&self) -> Vec<Placement> {
        self.geometry.placements()
    }

    /// Azimuthal placements of the housing.
    pub fn housing_placements(&self) -> Vec<Placement> {
        self.geometry.housing_placements()
    }

    /// Sensor and filter layout behind the tower.
    pub fn sensors(&self, config: &DetectorConfig) -> SensorArray {
        SensorArray::new(config, self.grid)
    }

    /// Fiber descriptors in copy-number order.
    pub fn fibers<'a>(
        &'a self,
        config: &'a DetectorConfig,
    ) -> impl Iterator<Item = FiberDescriptor> + 'a {
        let shape = self.shape();
        self.grid
            .cells()
            .map(move |cell| FiberDescriptor::new(config, &shape, &self.grid, cell))
    }
}

// =============================================================================
// SEGMENT BUILDER
// =============================================================================

/// Builds the towers of one section.
#[derive(Debug, Clone, Copy)]
pub struct SegmentBuilder<'a> {
    config: &'a DetectorConfig,
    section: Section,
}

impl<'a> SegmentBuilder<'a> {
    /// Builder for the barrel.
    pub fn barrel(config: &'a DetectorConfig) -> Self {
        Self {
            config,
            section: Section::Barrel,
        }
    }

    /// Builder for the endcap.
    pub fn endcap(config: &'a DetectorConfig) -> Self {
        Self {
            config,
            section: Section::Endcap,
        }
    }

    /// Section this builder produces.
    pub fn section(&self) -> Section {
        self.section
    }

    fn widths(&self) -> Vec<f64> {
        match self.section {
            Section::Barrel => self.config.barrel_delta_theta.clone(),
            Section::Endcap => vec![self.config.endcap_delta_theta; self.config.num_endcap],
        }
    }

    /// Angular slots of one half, in increasing polar angle.
    ///
    /// # Errors
    ///
    /// Fails when the summed widths miss the design coverage.
    pub fn slots(&self, side: Side) -> LayoutResult<Vec<TowerSlot>> {
        let (start, coverage, name) = match self.section {
            Section::Barrel => (0.0, self.config.barrel_coverage, "barrel"),
            Section::Endcap => (
                self.config.endcap_start_theta,
                self.config.endcap_coverage,
                "endcap",
            ),
        };
        let widths = self.widths();
        let offsets = angular_offsets(start, &widths);

        let covered = offsets[widths.len()] - start;
        if (covered - coverage).abs() > self.config.coverage_tolerance {
            return Err(ConfigError::CoverageMismatch {
                section: name,
                expected: coverage,
                actual: covered,
            }
            .into());
        }

        Ok(widths
            .iter()
            .zip(&offsets)
            .enumerate()
            .map(|(index, (&delta_theta, &theta_start))| TowerSlot {
                section: self.section,
                side,
                index,
                theta_start,
                delta_theta,
            })
            .collect())
    }

    /// Computes one tower.
    pub fn build_tower(&self, slot: &TowerSlot) -> LayoutResult<TowerBuild> {
        let geometry = TowerGeometry::new(
            self.config,
            slot.section,
            slot.theta_center(),
            slot.delta_theta,
            slot.side,
        )?;
        let grid = FiberGrid::for_tower(&geometry)?;

        let property = TowerProperty {
            tower_xy: grid.shape(),
            tower_theta: TowerTheta {
                signed_index: slot.signed_index(self.config.num_barrel),
                signed_theta: slot.signed_theta(),
            },
            inner_r: geometry.inner_radius(),
            tower_h: self.config.tower_height,
            d_theta: slot.delta_theta,
        };

        debug!(
            tower = %slot.name(),
            index = property.tower_theta.signed_index,
            theta = property.tower_theta.signed_theta,
            columns = grid.columns(),
            rows = grid.rows(),
            "tower laid out"
        );

        Ok(TowerBuild {
            slot: *slot,
            geometry,
            grid,
            property,
        })
    }

    /// Computes every tower of one half, in increasing polar angle.
    pub fn build_segment(&self, side: Side) -> LayoutResult<Vec<TowerBuild>> {
        self.slots(side)?
            .par_iter()
            .map(|slot| self.build_tower(slot))
            .collect()
    }
}

#[cfg(test)]
mod tests;

//! # Fiber Grid Layout
//!
//! Packs a centred rectangular grid of fibers into a tower's transverse
//! cross-section and classifies every cell as Cerenkov or scintillation.
//!
//! ## Grid Size
//!
//! ```text
//! columns = floor((2 * R4 * tan(phi_pitch / 2) - footprint) / pitch) + 1
//! rows    = floor((2 * (R + H) * tan(dtheta / 2) - footprint) / pitch) + 1
//! ```
//!
//! `R4` is the cylindrical radius of the outer face's narrow edge, so the
//! grid fits the outer face everywhere. Fibers running towards the narrower
//! inner face are clipped by the tower walls instead of overflowing them.
//!
//! ## Species Pattern
//!
//! A cell is Cerenkov iff exactly one of its column and row is odd. The
//! pattern is identical for every tower of barrel and endcap.

use config::constants::{FIBER_FOOTPRINT, FIBER_PITCH};
use config::{DetectorConfig, FiberRadii};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::material::Material;
use crate::shape::{Solid, TrapShape, TubeShape};
use crate::tower::TowerGeometry;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Returns `true` when the cell at (`column`, `row`) holds a Cerenkov fiber.
///
/// # Examples
/// ```
/// use drcalo_layout::fiber::is_cerenkov;
/// assert!(!is_cerenkov(0, 0));
/// assert!(is_cerenkov(1, 0));
/// assert!(is_cerenkov(0, 1));
/// assert!(!is_cerenkov(1, 1));
/// ```
#[inline]
pub fn is_cerenkov(column: usize, row: usize) -> bool {
    (column % 2 == 1) ^ (row % 2 == 1)
}

/// The two fiber species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiberKind {
    /// Clear fiber sensitive to Cerenkov light.
    Cerenkov,
    /// Scintillating fiber.
    Scintillation,
}

impl FiberKind {
    /// Species of the cell at (`column`, `row`).
    pub fn at(column: usize, row: usize) -> Self {
        if is_cerenkov(column, row) {
            FiberKind::Cerenkov
        } else {
            FiberKind::Scintillation
        }
    }

    /// Cladding material.
    pub fn clad_material(self) -> Material {
        match self {
            FiberKind::Cerenkov => Material::FluorinatedPolymer,
            FiberKind::Scintillation => Material::Pmma,
        }
    }

    /// Core material.
    pub fn core_material(self) -> Material {
        match self {
            FiberKind::Cerenkov => Material::Pmma,
            FiberKind::Scintillation => Material::Polystyrene,
        }
    }

    /// Material of the filter cell in front of this fiber's sensor.
    ///
    /// Scintillation channels sit behind a gelatin colour filter; Cerenkov
    /// channels see plain glass.
    pub fn filter_material(self) -> Material {
        match self {
            FiberKind::Cerenkov => Material::Glass,
            FiberKind::Scintillation => Material::Gelatin,
        }
    }

    /// Name of the region grouping this species' volumes.
    pub fn region(self) -> &'static str {
        match self {
            FiberKind::Cerenkov => "cerenRegion",
            FiberKind::Scintillation => "scintRegion",
        }
    }

    /// Clad and core radii of this species.
    pub fn radii(self, config: &DetectorConfig) -> FiberRadii {
        match self {
            FiberKind::Cerenkov => config.fiber_c,
            FiberKind::Scintillation => config.fiber_s,
        }
    }
}

// =============================================================================
// GRID
// =============================================================================

/// One fiber position in a tower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberCell {
    /// Column index (azimuthal axis).
    pub column: usize,
    /// Row index (polar axis).
    pub row: usize,
    /// Transverse offset from the tower axis.
    pub offset: DVec2,
    /// Fiber species.
    pub kind: FiberKind,
}

/// Column and row counts of a tower's grid, in the readout wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of columns.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
}

/// Centred fiber grid of one tower.
///
/// # Examples
/// ```
/// use drcalo_layout::fiber::FiberGrid;
/// let grid = FiberGrid::new(3, 2)?;
/// assert_eq!(grid.column_offset(0), -1.5);
/// assert_eq!(grid.row_offset(0), -0.75);
/// assert_eq!(grid.cells().count(), 6);
/// assert!(FiberGrid::new(3, 0).is_err());
/// # Ok::<(), drcalo_layout::LayoutError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberGrid {
    columns: usize,
    rows: usize,
}

impl FiberGrid {
    /// Grid with explicit dimensions and the design pitch.
    ///
    /// # Errors
    ///
    /// [`LayoutError::DegenerateGrid`] when either count is zero. The
    /// reported quotients are `count - 1`, the value [`FiberGrid::layout`]
    /// would have floored.
    pub fn new(columns: usize, rows: usize) -> LayoutResult<Self> {
        if columns == 0 || rows == 0 {
            return Err(LayoutError::DegenerateGrid {
                columns_raw: columns as f64 - 1.0,
                rows_raw: rows as f64 - 1.0,
            });
        }
        Ok(Self { columns, rows })
    }

    /// Fits a grid into a tower with the given outer dimensions.
    ///
    /// # Arguments
    ///
    /// * `outer_edge_radius` - cylindrical radius of the outer face's narrow edge
    /// * `inner_radius` - distance to the tower's inner face along its axis
    /// * `tower_height` - radial length of the tower
    /// * `delta_theta` - angular width of the tower
    /// * `phi_pitch` - azimuthal pitch between tower copies
    ///
    /// # Errors
    ///
    /// [`LayoutError::DegenerateGrid`] when either axis cannot hold one fiber.
    pub fn layout(
        outer_edge_radius: f64,
        inner_radius: f64,
        tower_height: f64,
        delta_theta: f64,
        phi_pitch: f64,
    ) -> LayoutResult<Self> {
        let width = 2.0 * outer_edge_radius * (phi_pitch / 2.0).tan();
        let outer_side_half = (inner_radius + tower_height) * (delta_theta / 2.0).tan();

        let columns_raw = (width - FIBER_FOOTPRINT) / FIBER_PITCH;
        let rows_raw = (2.0 * outer_side_half - FIBER_FOOTPRINT) / FIBER_PITCH;

        let fits = |raw: f64| raw.is_finite() && raw >= 0.0;
        if !(fits(columns_raw) && fits(rows_raw)) {
            return Err(LayoutError::DegenerateGrid {
                columns_raw,
                rows_raw,
            });
        }

        Ok(Self {
            columns: columns_raw.floor() as usize + 1,
            rows: rows_raw.floor() as usize + 1,
        })
    }

    /// Fits a grid into `tower`.
    pub fn for_tower(tower: &TowerGeometry) -> LayoutResult<Self> {
        Self::layout(
            tower.outer_edge_radius(),
            tower.inner_radius(),
            tower.tower_height(),
            tower.delta_theta(),
            tower.phi_pitch(),
        )
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column and row counts.
    pub fn shape(&self) -> GridShape {
        GridShape {
            columns: self.columns,
            rows: self.rows,
        }
    }

    /// Total number of fibers.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// Returns `true` for a grid without cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Half-extents of the area covered by the grid at full pitch.
    pub fn half_extent(&self) -> DVec2 {
        DVec2::new(self.columns as f64, self.rows as f64) * FIBER_PITCH / 2.0
    }

    /// Transverse offset of column `column`.
    pub fn column_offset(&self, column: usize) -> f64 {
        centred_offset(self.columns, column)
    }

    /// Transverse offset of row `row`.
    pub fn row_offset(&self, row: usize) -> f64 {
        centred_offset(self.rows, row)
    }

    /// The cell at (`column`, `row`).
    pub fn cell(&self, column: usize, row: usize) -> FiberCell {
        FiberCell {
            column,
            row,
            offset: DVec2::new(self.column_offset(column), self.row_offset(row)),
            kind: FiberKind::at(column, row),
        }
    }

    /// Fiber copy number of a cell: row-major.
    pub fn copy_number(&self, column: usize, row: usize) -> u32 {
        (row * self.columns + column) as u32
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = FiberCell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |column| self.cell(column, row)))
    }

    /// Number of Cerenkov cells.
    pub fn cerenkov_count(&self) -> usize {
        let (odd_c, even_c) = (self.columns / 2, self.columns - self.columns / 2);
        let (odd_r, even_r) = (self.rows / 2, self.rows - self.rows / 2);
        odd_c * even_r + even_c * odd_r
    }
}

fn centred_offset(count: usize, index: usize) -> f64 {
    let shift = if count % 2 == 0 { FIBER_PITCH / 2.0 } else { 0.0 };
    -FIBER_PITCH * (count / 2) as f64 + index as f64 * FIBER_PITCH + shift
}

// =============================================================================
// FIBER DESCRIPTORS
// =============================================================================

/// Everything the backend needs to build one fiber.
///
/// Clad and core are the fiber cylinders intersected with the tower
/// trapezoid, so fibers near the slanted walls are clipped.
#[derive(Debug, Clone, PartialEq)]
pub struct FiberDescriptor {
    /// Grid cell of the fiber.
    pub cell: FiberCell,
    /// Copy number inside the tower.
    pub copy_number: u32,
    /// Clipped cladding solid, placed at the cell offset in the tower.
    pub clad: Solid,
    /// Clipped core solid, placed at the origin of the cladding.
    pub core: Solid,
}

impl FiberDescriptor {
    /// Describes `cell` inside a tower of shape `tower`.
    pub fn new(config: &DetectorConfig, tower: &TrapShape, grid: &FiberGrid, cell: FiberCell) -> Self {
        let radii = cell.kind.radii(config);
        let clip_offset = DVec3::new(-cell.offset.x, -cell.offset.y, 0.0);
        let clipped = |radius: f64| Solid::ClippedTube {
            tube: TubeShape {
                radius,
                half_length: tower.half_z,
            },
            clip: *tower,
            clip_offset,
        };
        Self {
            cell,
            copy_number: grid.copy_number(cell.column, cell.row),
            clad: clipped(radii.clad),
            core: clipped(radii.core),
        }
    }

    /// Position of the fiber axis in the tower frame.
    pub fn position(&self) -> DVec3 {
        self.cell.offset.extend(0.0)
    }

    /// Cladding material.
    pub fn clad_material(&self) -> Material {
        self.cell.kind.clad_material()
    }

    /// Core material.
    pub fn core_material(&self) -> Material {
        self.cell.kind.core_material()
    }
}

//! # Photosensor Layout
//!
//! The housing behind every tower holds two thin layers:
//!
//! ```text
//!   housing -z ─┬─ filter layer (one filter cell per fiber)
//!               └─ sensor layer (one sensor cell per fiber, silicon at the back)
//!   housing +z
//! ```
//!
//! Sensor and filter cells share the fiber grid offsets, one cell per fiber.
//! The backend places them through a parameterisation indexed column-major
//! (`copy = column * rows + row`), which is the numbering readout uses.

use config::constants::SENSOR_CELL_HALF_SIZE;
use config::DetectorConfig;
use glam::{DVec2, DVec3};

use crate::fiber::{FiberGrid, FiberKind};
use crate::material::Material;
use crate::shape::{BoxShape, Placement};

/// Kind of optical surface the backend attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Surface wrapping every face of one volume.
    Skin,
    /// Surface between two placed volumes, from the first to the second.
    Border,
}

/// Named optical surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpticalSurface {
    /// Name of the surface definition in the backend.
    pub name: &'static str,
    /// How the surface is attached.
    pub kind: SurfaceKind,
}

/// Photocathode surface on the silicon of every sensor cell.
pub const SIPM_SURFACE: OpticalSurface = OpticalSurface {
    name: "SiPMSurf",
    kind: SurfaceKind::Skin,
};

/// Border between each filter cell and the sensor cell behind it.
pub const FILTER_SURFACE: OpticalSurface = OpticalSurface {
    name: "FilterSurf",
    kind: SurfaceKind::Border,
};

/// A box with its material and placement in its mother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBox {
    /// Box shape.
    pub shape: BoxShape,
    /// Box material.
    pub material: Material,
    /// Placement inside the mother volume.
    pub placement: Placement,
}

/// One photosensor cell paired with a fiber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCell {
    /// Parameterisation copy number.
    pub copy_number: u32,
    /// Column of the paired fiber.
    pub column: usize,
    /// Row of the paired fiber.
    pub row: usize,
    /// Transverse offset, identical to the fiber's.
    pub offset: DVec2,
    /// Species of the paired fiber.
    pub kind: FiberKind,
}

impl SensorCell {
    /// Material of the filter cell in front of this sensor.
    pub fn filter_material(&self) -> Material {
        self.kind.filter_material()
    }

    /// Placement of the sensor (or filter) cell inside its layer.
    pub fn placement(&self) -> Placement {
        Placement::at(self.offset.extend(0.0), self.copy_number)
    }
}

/// Sensor and filter layout of one tower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorArray {
    grid: FiberGrid,
    housing_thickness: f64,
    filter_thickness: f64,
    active_thickness: f64,
}

impl SensorArray {
    /// Sensor array matching `grid`.
    pub fn new(config: &DetectorConfig, grid: FiberGrid) -> Self {
        Self {
            grid,
            housing_thickness: config.sensor_housing_thickness,
            filter_thickness: config.filter_thickness,
            active_thickness: config.sensor_active_thickness,
        }
    }

    /// Number of sensor cells (equal to the number of fibers).
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Returns `true` when the array holds no cells.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Plate carrying the sensor cells, inside the housing.
    pub fn sensor_layer(&self) -> PlacedBox {
        let half = self.grid.half_extent();
        PlacedBox {
            shape: BoxShape::new(half.x, half.y, self.housing_thickness / 2.0),
            material: Material::PolyvinylChloride,
            placement: Placement::at(DVec3::new(0.0, 0.0, self.filter_thickness / 2.0), 0),
        }
    }

    /// Plate carrying the filter cells, inside the housing.
    pub fn filter_layer(&self) -> PlacedBox {
        let half = self.grid.half_extent();
        PlacedBox {
            shape: BoxShape::new(half.x, half.y, self.filter_thickness / 2.0),
            material: Material::PolyvinylChloride,
            placement: Placement::at(DVec3::new(0.0, 0.0, -self.housing_thickness / 2.0), 0),
        }
    }

    /// Shape of one sensor cell; material is [`Material::Glass`].
    pub fn cell_shape(&self) -> BoxShape {
        BoxShape::new(
            SENSOR_CELL_HALF_SIZE,
            SENSOR_CELL_HALF_SIZE,
            self.housing_thickness / 2.0,
        )
    }

    /// Silicon photocathode at the back of each sensor cell.
    pub fn cathode(&self) -> PlacedBox {
        PlacedBox {
            shape: BoxShape::new(
                SENSOR_CELL_HALF_SIZE,
                SENSOR_CELL_HALF_SIZE,
                self.active_thickness / 2.0,
            ),
            material: Material::Silicon,
            placement: Placement::at(
                DVec3::new(0.0, 0.0, (self.housing_thickness - self.active_thickness) / 2.0),
                0,
            ),
        }
    }

    /// Shape of one filter cell; material depends on the cell.
    pub fn filter_cell_shape(&self) -> BoxShape {
        BoxShape::new(
            SENSOR_CELL_HALF_SIZE,
            SENSOR_CELL_HALF_SIZE,
            self.filter_thickness / 2.0,
        )
    }

    /// Cell with parameterisation copy number `copy_number`, or `None`
    /// past the end of the grid.
    pub fn cell(&self, copy_number: u32) -> Option<SensorCell> {
        if copy_number as usize >= self.len() {
            return None;
        }
        let rows = self.grid.rows();
        let column = copy_number as usize / rows;
        let row = copy_number as usize % rows;
        Some(SensorCell {
            copy_number,
            column,
            row,
            offset: DVec2::new(self.grid.column_offset(column), self.grid.row_offset(row)),
            kind: FiberKind::at(column, row),
        })
    }

    /// All cells in copy-number order.
    pub fn cells(&self) -> impl Iterator<Item = SensorCell> + '_ {
        (0..self.len() as u32).filter_map(move |copy| self.cell(copy))
    }
}

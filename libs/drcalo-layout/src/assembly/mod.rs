//! # Detector Assembly
//!
//! Orchestrates the four segment builds and hands the result to a volume
//! backend.
//!
//! ## Phases
//!
//! ```text
//! build():  validate config → barrel R → barrel L → endcap R → endcap L
//! render(): world → per tower { tower, housing, fibers, sensors }
//! ```
//!
//! `build` is pure and never touches a backend, so a configuration defect
//! is reported before any volume exists.

use config::DetectorConfig;
use glam::DVec3;
use tracing::{info, trace};

use crate::backend::{ParameterisedCell, VolumeBackend};
use crate::error::LayoutResult;
use crate::fiber::FiberDescriptor;
use crate::material::Material;
use crate::readout::{SensorRegistration, TowerTable};
use crate::segment::{SegmentBuilder, TowerBuild, TowerProperty};
use crate::sensor::{PlacedBox, FILTER_SURFACE, SIPM_SURFACE};
use crate::shape::{BoxShape, Placement, Solid};
use crate::tower::{Section, Side};

// =============================================================================
// ASSEMBLY
// =============================================================================

/// Builds a [`Detector`] from a configuration.
#[derive(Debug, Clone)]
pub struct DetectorAssembly {
    config: DetectorConfig,
}

impl DetectorAssembly {
    /// Assembly for `config`.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Validates the configuration and lays out every tower.
    ///
    /// Towers come out as barrel right, barrel left, endcap right, endcap
    /// left, each in increasing polar angle.
    ///
    /// # Errors
    ///
    /// Any configuration or per-tower geometry error, or a repeated signed
    /// index; nothing is partially built.
    pub fn build(&self) -> LayoutResult<Detector> {
        self.config.validate()?;

        let barrel = SegmentBuilder::barrel(&self.config);
        let endcap = SegmentBuilder::endcap(&self.config);

        let mut towers = Vec::with_capacity(self.config.tower_count());
        for (builder, side) in [
            (barrel, Side::Right),
            (barrel, Side::Left),
            (endcap, Side::Right),
            (endcap, Side::Left),
        ] {
            towers.extend(builder.build_segment(side)?);
        }

        let table = TowerTable::new(towers.iter().map(|t| t.property).collect())?;
        let detector = Detector {
            config: self.config.clone(),
            towers,
            table,
        };
        info!(
            towers = detector.towers.len(),
            fibers = detector.fiber_count(),
            copies = self.config.num_z_rot,
            "detector assembled"
        );
        Ok(detector)
    }
}

// =============================================================================
// DETECTOR
// =============================================================================

/// Counts reported by [`Detector::render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Distinct towers (logical volumes).
    pub towers: usize,
    /// Tower placements over all azimuthal copies.
    pub tower_copies: usize,
    /// Fibers, counted once per tower.
    pub fibers: usize,
    /// Sensor cells, counted once per tower.
    pub sensor_cells: usize,
}

/// The complete layout.
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
    towers: Vec<TowerBuild>,
    table: TowerTable,
}

impl Detector {
    /// Configuration the detector was built from.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Every tower in assembly order.
    pub fn towers(&self) -> &[TowerBuild] {
        &self.towers
    }

    /// Towers of one section half, in increasing polar angle.
    pub fn segment(&self, section: Section, side: Side) -> impl Iterator<Item = &TowerBuild> {
        self.towers
            .iter()
            .filter(move |t| t.slot.section == section && t.slot.side == side)
    }

    /// Tower properties in assembly order.
    pub fn properties(&self) -> Vec<TowerProperty> {
        self.towers.iter().map(|t| t.property).collect()
    }

    /// Tower properties indexed by signed theta index.
    pub fn tower_table(&self) -> &TowerTable {
        &self.table
    }

    /// Fibers in one tower, summed over all towers (azimuthal copies not
    /// counted).
    pub fn fiber_count(&self) -> usize {
        self.towers.iter().map(|t| t.grid.len()).sum()
    }

    /// Every fiber of every tower, in assembly then copy-number order.
    pub fn fiber_descriptors(&self) -> impl Iterator<Item = (&TowerBuild, FiberDescriptor)> + '_ {
        self.towers
            .iter()
            .flat_map(move |tower| tower.fibers(&self.config).map(move |f| (tower, f)))
    }

    /// One sensor registration per tower, in assembly order.
    pub fn sensor_registrations(&self) -> Vec<SensorRegistration> {
        self.towers
            .iter()
            .map(|t| SensorRegistration::new(&t.slot, t.property))
            .collect()
    }

    /// Builds the full volume hierarchy in `backend`.
    ///
    /// # Errors
    ///
    /// The first backend error; the backend may then hold a partial model.
    pub fn render<B: VolumeBackend>(&self, backend: &mut B) -> Result<RenderSummary, B::Error> {
        let half = self.config.world_half_size;
        let world = backend.logical_volume(
            "world",
            &Solid::Box(BoxShape::new(half, half, half)),
            Material::Galactic,
        )?;
        backend.place("world", &world, None, &Placement::at(DVec3::ZERO, 0))?;

        let mut summary = RenderSummary::default();
        for tower in &self.towers {
            let copies = self.render_tower(backend, &world, tower)?;
            summary.towers += 1;
            summary.tower_copies += copies;
            summary.fibers += tower.grid.len();
            summary.sensor_cells += tower.grid.len();
        }

        info!(
            towers = summary.towers,
            copies = summary.tower_copies,
            fibers = summary.fibers,
            "detector rendered"
        );
        Ok(summary)
    }

    fn render_tower<B: VolumeBackend>(
        &self,
        backend: &mut B,
        world: &B::Volume,
        tower: &TowerBuild,
    ) -> Result<usize, B::Error> {
        let name = tower.name();
        let tower_volume =
            backend.logical_volume(&name, &Solid::Trap(tower.shape()), Material::Copper)?;
        let housing_volume =
            backend.logical_volume(&name, &Solid::Trap(tower.housing_shape()), Material::Air)?;

        let placements = tower.placements();
        for (placement, housing) in placements.iter().zip(tower.housing_placements()) {
            backend.place(&name, &tower_volume, Some(world), placement)?;
            backend.place(&name, &housing_volume, Some(world), &housing)?;
        }

        for fiber in tower.fibers(&self.config) {
            let region = fiber.cell.kind.region();
            let clad = backend.logical_volume("fiberClad", &fiber.clad, fiber.clad_material())?;
            backend.place(
                "fiberClad",
                &clad,
                Some(&tower_volume),
                &Placement::at(fiber.position(), fiber.copy_number),
            )?;
            let core = backend.logical_volume("fiberCore", &fiber.core, fiber.core_material())?;
            backend.place(
                "fiberCore",
                &core,
                Some(&clad),
                &Placement::at(DVec3::ZERO, fiber.copy_number),
            )?;
            backend.assign_region(region, &clad)?;
            backend.assign_region(region, &core)?;
        }

        self.render_sensors(backend, &housing_volume, tower)?;

        trace!(
            tower = %name,
            copies = placements.len(),
            fibers = tower.grid.len(),
            "tower rendered"
        );
        Ok(placements.len())
    }

    fn render_sensors<B: VolumeBackend>(
        &self,
        backend: &mut B,
        housing: &B::Volume,
        tower: &TowerBuild,
    ) -> Result<(), B::Error> {
        let sensors = tower.sensors(&self.config);

        let sensor_layer = place_box(backend, "sensorLayer", housing, sensors.sensor_layer())?;
        let filter_layer = place_box(backend, "filterLayer", housing, sensors.filter_layer())?;

        let cell = backend.logical_volume(
            "sensorCell",
            &Solid::Box(sensors.cell_shape()),
            Material::Glass,
        )?;
        let cells: Vec<ParameterisedCell> = sensors
            .cells()
            .map(|c| ParameterisedCell {
                placement: c.placement(),
                material: Material::Glass,
            })
            .collect();
        let cell_placed =
            backend.place_parameterised("sensorCell", &cell, &sensor_layer, &cells)?;

        let cathode = sensors.cathode();
        let cathode_volume =
            backend.logical_volume("cathode", &Solid::Box(cathode.shape), cathode.material)?;
        backend.place("cathode", &cathode_volume, Some(&cell), &cathode.placement)?;
        backend.skin_surface(&SIPM_SURFACE, &cathode_volume)?;

        let filter = backend.logical_volume(
            "filterCell",
            &Solid::Box(sensors.filter_cell_shape()),
            Material::Glass,
        )?;
        let filters: Vec<ParameterisedCell> = sensors
            .cells()
            .map(|c| ParameterisedCell {
                placement: c.placement(),
                material: c.filter_material(),
            })
            .collect();
        let filter_placed =
            backend.place_parameterised("filterCell", &filter, &filter_layer, &filters)?;
        backend.border_surface(&FILTER_SURFACE, &filter_placed, &cell_placed)?;

        let registration = SensorRegistration::new(&tower.slot, tower.property);
        backend.register_sensor(&registration, &cathode_volume)
    }
}

fn place_box<B: VolumeBackend>(
    backend: &mut B,
    name: &str,
    mother: &B::Volume,
    placed: PlacedBox,
) -> Result<B::Volume, B::Error> {
    let volume = backend.logical_volume(name, &Solid::Box(placed.shape), placed.material)?;
    backend.place(name, &volume, Some(mother), &placed.placement)?;
    Ok(volume)
}

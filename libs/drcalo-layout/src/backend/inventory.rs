//! Recording backend that counts what a render would build.

use std::collections::BTreeMap;

use thiserror::Error;

use super::{ParameterisedCell, VolumeBackend};
use crate::material::Material;
use crate::readout::SensorRegistration;
use crate::sensor::OpticalSurface;
use crate::shape::{Placement, Solid};

/// Logical volume handle issued by [`VolumeInventory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeId(usize);

/// Placed volume handle issued by [`VolumeInventory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedId(usize);

/// Errors raised by [`VolumeInventory`].
#[derive(Debug, Error, PartialEq)]
pub enum InventoryError {
    /// A handle was not issued by this inventory.
    #[error("unknown logical volume #{0}")]
    UnknownVolume(usize),
    /// A placed-volume handle was not issued by this inventory.
    #[error("unknown placed volume #{0}")]
    UnknownPlacement(usize),
    /// A second top-level volume was placed.
    #[error("world volume already placed")]
    SecondWorld,
    /// Two sensors registered under the same name.
    #[error("sensor {0} registered twice")]
    DuplicateSensor(String),
}

/// Backend that records counts instead of building volumes.
///
/// Used for dry runs and to check a render end to end.
#[derive(Debug, Clone, Default)]
pub struct VolumeInventory {
    materials: Vec<Material>,
    placed: Vec<VolumeId>,
    world: Option<VolumeId>,
    placements_by_material: BTreeMap<Material, usize>,
    parameterised_cells: BTreeMap<Material, usize>,
    regions: BTreeMap<String, usize>,
    skin_surfaces: BTreeMap<&'static str, usize>,
    border_surfaces: BTreeMap<&'static str, usize>,
    sensors: BTreeMap<String, String>,
}

impl VolumeInventory {
    fn check(&self, volume: &VolumeId) -> Result<Material, InventoryError> {
        self.materials
            .get(volume.0)
            .copied()
            .ok_or(InventoryError::UnknownVolume(volume.0))
    }

    fn check_placed(&self, placed: &PlacedId) -> Result<(), InventoryError> {
        if placed.0 < self.placed.len() {
            Ok(())
        } else {
            Err(InventoryError::UnknownPlacement(placed.0))
        }
    }

    /// Number of logical volumes.
    pub fn volume_count(&self) -> usize {
        self.materials.len()
    }

    /// Number of logical volumes filled with `material`.
    pub fn volumes_of(&self, material: Material) -> usize {
        self.materials.iter().filter(|&&m| m == material).count()
    }

    /// Number of single placements, world included.
    pub fn placement_count(&self) -> usize {
        self.placements_by_material.values().sum()
    }

    /// Number of single placements of volumes filled with `material`.
    pub fn placements_of(&self, material: Material) -> usize {
        self.placements_by_material
            .get(&material)
            .copied()
            .unwrap_or(0)
    }

    /// Number of parameterised cells whose material is `material`.
    pub fn parameterised_cells_of(&self, material: Material) -> usize {
        self.parameterised_cells
            .get(&material)
            .copied()
            .unwrap_or(0)
    }

    /// Number of parameterised cells of any material.
    pub fn parameterised_cell_count(&self) -> usize {
        self.parameterised_cells.values().sum()
    }

    /// Number of volumes assigned to `region`.
    pub fn region_count(&self, region: &str) -> usize {
        self.regions.get(region).copied().unwrap_or(0)
    }

    /// Number of skin surfaces named `name`.
    pub fn skin_surfaces(&self, name: &str) -> usize {
        self.skin_surfaces.get(name).copied().unwrap_or(0)
    }

    /// Number of border surfaces named `name`.
    pub fn border_surfaces(&self, name: &str) -> usize {
        self.border_surfaces.get(name).copied().unwrap_or(0)
    }

    /// Registered sensors: detector name to hits collection.
    pub fn sensors(&self) -> &BTreeMap<String, String> {
        &self.sensors
    }

    /// Top-level volume, once placed.
    pub fn world(&self) -> Option<VolumeId> {
        self.world
    }
}

impl VolumeBackend for VolumeInventory {
    type Volume = VolumeId;
    type Placed = PlacedId;
    type Error = InventoryError;

    fn logical_volume(
        &mut self,
        _name: &str,
        _solid: &Solid,
        material: Material,
    ) -> Result<VolumeId, InventoryError> {
        self.materials.push(material);
        Ok(VolumeId(self.materials.len() - 1))
    }

    fn place(
        &mut self,
        _name: &str,
        volume: &VolumeId,
        mother: Option<&VolumeId>,
        _placement: &Placement,
    ) -> Result<PlacedId, InventoryError> {
        let material = self.check(volume)?;
        match mother {
            Some(mother) => {
                self.check(mother)?;
            }
            None if self.world.is_some() => return Err(InventoryError::SecondWorld),
            None => self.world = Some(*volume),
        }
        *self.placements_by_material.entry(material).or_default() += 1;
        self.placed.push(*volume);
        Ok(PlacedId(self.placed.len() - 1))
    }

    fn place_parameterised(
        &mut self,
        _name: &str,
        volume: &VolumeId,
        mother: &VolumeId,
        cells: &[ParameterisedCell],
    ) -> Result<PlacedId, InventoryError> {
        self.check(volume)?;
        self.check(mother)?;
        for cell in cells {
            *self.parameterised_cells.entry(cell.material).or_default() += 1;
        }
        self.placed.push(*volume);
        Ok(PlacedId(self.placed.len() - 1))
    }

    fn assign_region(&mut self, region: &str, volume: &VolumeId) -> Result<(), InventoryError> {
        self.check(volume)?;
        *self.regions.entry(region.to_string()).or_default() += 1;
        Ok(())
    }

    fn skin_surface(
        &mut self,
        surface: &OpticalSurface,
        volume: &VolumeId,
    ) -> Result<(), InventoryError> {
        self.check(volume)?;
        *self.skin_surfaces.entry(surface.name).or_default() += 1;
        Ok(())
    }

    fn border_surface(
        &mut self,
        surface: &OpticalSurface,
        from: &PlacedId,
        to: &PlacedId,
    ) -> Result<(), InventoryError> {
        self.check_placed(from)?;
        self.check_placed(to)?;
        *self.border_surfaces.entry(surface.name).or_default() += 1;
        Ok(())
    }

    fn register_sensor(
        &mut self,
        registration: &SensorRegistration,
        volume: &VolumeId,
    ) -> Result<(), InventoryError> {
        self.check(volume)?;
        if self.sensors.contains_key(&registration.name) {
            return Err(InventoryError::DuplicateSensor(registration.name.clone()));
        }
        self.sensors
            .insert(registration.name.clone(), registration.collection.clone());
        Ok(())
    }
}

//! # Volume Backend
//!
//! The layout describes shapes, materials and placements; a backend turns
//! them into a traversable volume hierarchy (a simulation toolkit, an
//! exporter, or the recording [`VolumeInventory`]).
//!
//! Backend handles are opaque to the layout. Logical volumes may be placed
//! many times; placed volumes are only needed to attach border surfaces.

mod inventory;

pub use inventory::{InventoryError, PlacedId, VolumeId, VolumeInventory};

use crate::material::Material;
use crate::readout::SensorRegistration;
use crate::sensor::OpticalSurface;
use crate::shape::{Placement, Solid};

/// One cell of a parameterised placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterisedCell {
    /// Position of the cell in its mother; the copy number is the cell index.
    pub placement: Placement,
    /// Material of this cell.
    pub material: Material,
}

/// Renders layout descriptors into backend volumes.
///
/// # Examples
/// ```
/// use drcalo_layout::backend::{VolumeBackend, VolumeInventory};
/// use drcalo_layout::shape::{BoxShape, Placement, Solid};
/// use drcalo_layout::Material;
/// use glam::DVec3;
///
/// let mut backend = VolumeInventory::default();
/// let world = backend
///     .logical_volume("world", &Solid::Box(BoxShape::new(1.0, 1.0, 1.0)), Material::Galactic)
///     .unwrap();
/// backend.place("world", &world, None, &Placement::at(DVec3::ZERO, 0)).unwrap();
/// assert_eq!(backend.placement_count(), 1);
/// ```
pub trait VolumeBackend {
    /// Handle of a logical volume.
    type Volume: Clone;
    /// Handle of a placed (physical) volume.
    type Placed: Clone;
    /// Error raised by the backend.
    type Error: std::error::Error;

    /// Creates a logical volume of `solid` filled with `material`.
    fn logical_volume(
        &mut self,
        name: &str,
        solid: &Solid,
        material: Material,
    ) -> Result<Self::Volume, Self::Error>;

    /// Places `volume` inside `mother`; `None` places the top volume.
    fn place(
        &mut self,
        name: &str,
        volume: &Self::Volume,
        mother: Option<&Self::Volume>,
        placement: &Placement,
    ) -> Result<Self::Placed, Self::Error>;

    /// Places `volume` once per cell inside `mother`, with a per-cell
    /// material.
    fn place_parameterised(
        &mut self,
        name: &str,
        volume: &Self::Volume,
        mother: &Self::Volume,
        cells: &[ParameterisedCell],
    ) -> Result<Self::Placed, Self::Error>;

    /// Adds `volume` to the named region.
    fn assign_region(&mut self, region: &str, volume: &Self::Volume) -> Result<(), Self::Error>;

    /// Wraps every face of `volume` with `surface`.
    fn skin_surface(
        &mut self,
        surface: &OpticalSurface,
        volume: &Self::Volume,
    ) -> Result<(), Self::Error>;

    /// Attaches `surface` to the boundary crossed from `from` into `to`.
    fn border_surface(
        &mut self,
        surface: &OpticalSurface,
        from: &Self::Placed,
        to: &Self::Placed,
    ) -> Result<(), Self::Error>;

    /// Makes `volume` sensitive, reporting under `registration`.
    fn register_sensor(
        &mut self,
        registration: &SensorRegistration,
        volume: &Self::Volume,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests;

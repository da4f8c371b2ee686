//! Materials referenced by the layout.
//!
//! The layout never owns material properties; it only names them. The
//! backend resolves each name against its material database.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A material the layout asks the backend for.
///
/// # Examples
/// ```
/// use drcalo_layout::Material;
/// assert_eq!(Material::Pmma.name(), "PMMA");
/// assert_eq!(Material::Air.to_string(), "G4_AIR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    /// Vacuum filling the world volume.
    Galactic,
    /// Air filling the sensor housing.
    Air,
    /// Absorber of every tower.
    Copper,
    /// Support plates of the sensor and filter layers.
    PolyvinylChloride,
    /// Sensor cell windows and unfiltered filter cells.
    Glass,
    /// Colour filter in front of scintillation channels.
    Gelatin,
    /// Active layer of every photosensor.
    Silicon,
    /// Cladding of Cerenkov fibers.
    FluorinatedPolymer,
    /// Core of Cerenkov fibers and cladding of scintillation fibers.
    Pmma,
    /// Core of scintillation fibers.
    Polystyrene,
}

impl Material {
    /// Every material, in declaration order.
    pub const ALL: [Material; 10] = [
        Material::Galactic,
        Material::Air,
        Material::Copper,
        Material::PolyvinylChloride,
        Material::Glass,
        Material::Gelatin,
        Material::Silicon,
        Material::FluorinatedPolymer,
        Material::Pmma,
        Material::Polystyrene,
    ];

    /// Name under which the backend's material database knows this material.
    pub fn name(self) -> &'static str {
        match self {
            Material::Galactic => "G4_Galactic",
            Material::Air => "G4_AIR",
            Material::Copper => "Copper",
            Material::PolyvinylChloride => "G4_POLYVINYL_CHLORIDE",
            Material::Glass => "Glass",
            Material::Gelatin => "Gelatin",
            Material::Silicon => "Silicon",
            Material::FluorinatedPolymer => "FluorinatedPolymer",
            Material::Pmma => "PMMA",
            Material::Polystyrene => "Polystyrene",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Tests for the recording backend.

use glam::DVec3;

use super::*;
use crate::fiber::GridShape;
use crate::segment::{TowerProperty, TowerSlot, TowerTheta};
use crate::sensor::{FILTER_SURFACE, SIPM_SURFACE};
use crate::shape::BoxShape;
use crate::tower::{Section, Side};

fn unit_box() -> Solid {
    Solid::Box(BoxShape::new(1.0, 1.0, 1.0))
}

fn origin(copy: u32) -> Placement {
    Placement::at(DVec3::ZERO, copy)
}

fn registration(index: usize) -> SensorRegistration {
    let slot = TowerSlot {
        section: Section::Barrel,
        side: Side::Right,
        index,
        theta_start: 0.0,
        delta_theta: 0.02,
    };
    let property = TowerProperty {
        tower_xy: GridShape {
            columns: 1,
            rows: 1,
        },
        tower_theta: TowerTheta {
            signed_index: index as i32,
            signed_theta: 0.01,
        },
        inner_r: 1800.0,
        tower_h: 2000.0,
        d_theta: 0.02,
    };
    SensorRegistration::new(&slot, property)
}

#[test]
fn counts_volumes_and_placements_per_material() {
    let mut inv = VolumeInventory::default();
    let world = inv.logical_volume("world", &unit_box(), Material::Galactic).unwrap();
    let tower = inv.logical_volume("tower", &unit_box(), Material::Copper).unwrap();
    inv.place("world", &world, None, &origin(0)).unwrap();
    for copy in 0..3 {
        inv.place("tower", &tower, Some(&world), &origin(copy)).unwrap();
    }

    assert_eq!(inv.world(), Some(world));
    assert_eq!(inv.volume_count(), 2);
    assert_eq!(inv.volumes_of(Material::Copper), 1);
    assert_eq!(inv.placement_count(), 4);
    assert_eq!(inv.placements_of(Material::Copper), 3);
    assert_eq!(inv.placements_of(Material::Air), 0);
}

#[test]
fn parameterised_cells_count_per_material() {
    let mut inv = VolumeInventory::default();
    let layer = inv.logical_volume("layer", &unit_box(), Material::PolyvinylChloride).unwrap();
    let cell = inv.logical_volume("cell", &unit_box(), Material::Glass).unwrap();
    let cells: Vec<ParameterisedCell> = (0..5)
        .map(|i| ParameterisedCell {
            placement: origin(i),
            material: if i % 2 == 0 { Material::Glass } else { Material::Gelatin },
        })
        .collect();
    inv.place_parameterised("cells", &cell, &layer, &cells).unwrap();

    assert_eq!(inv.parameterised_cell_count(), 5);
    assert_eq!(inv.parameterised_cells_of(Material::Glass), 3);
    assert_eq!(inv.parameterised_cells_of(Material::Gelatin), 2);
    assert_eq!(inv.placement_count(), 0);
}

#[test]
fn regions_surfaces_and_sensors() {
    let mut inv = VolumeInventory::default();
    let mother = inv.logical_volume("mother", &unit_box(), Material::Air).unwrap();
    let cath = inv.logical_volume("cath", &unit_box(), Material::Silicon).unwrap();
    let a = inv.place("a", &cath, Some(&mother), &origin(0)).unwrap();
    let b = inv.place("b", &cath, Some(&mother), &origin(1)).unwrap();

    inv.assign_region("cerenRegion", &cath).unwrap();
    inv.skin_surface(&SIPM_SURFACE, &cath).unwrap();
    inv.border_surface(&FILTER_SURFACE, &a, &b).unwrap();
    inv.register_sensor(&registration(3), &cath).unwrap();

    assert_eq!(inv.region_count("cerenRegion"), 1);
    assert_eq!(inv.region_count("scintRegion"), 0);
    assert_eq!(inv.skin_surfaces("SiPMSurf"), 1);
    assert_eq!(inv.border_surfaces("FilterSurf"), 1);
    assert_eq!(inv.sensors().get("BR3").map(String::as_str), Some("BRC3"));
}

#[test]
fn rejects_foreign_handles() {
    let mut other = VolumeInventory::default();
    other.logical_volume("a", &unit_box(), Material::Air).unwrap();
    other.logical_volume("b", &unit_box(), Material::Air).unwrap();
    let foreign = other.logical_volume("c", &unit_box(), Material::Air).unwrap();
    let foreign_placed = (0..3)
        .map(|copy| other.place("b", &foreign, Some(&foreign), &origin(copy)).unwrap())
        .last()
        .unwrap();

    let mut inv = VolumeInventory::default();
    let err = inv.place("x", &foreign, None, &origin(0)).unwrap_err();
    assert_eq!(err, InventoryError::UnknownVolume(2));

    let v = inv.logical_volume("v", &unit_box(), Material::Air).unwrap();
    let p = inv.place("v", &v, None, &origin(0)).unwrap();
    let err = inv
        .border_surface(&FILTER_SURFACE, &p, &foreign_placed)
        .unwrap_err();
    assert_eq!(err, InventoryError::UnknownPlacement(2));
}

#[test]
fn rejects_second_world_and_duplicate_sensors() {
    let mut inv = VolumeInventory::default();
    let v = inv.logical_volume("v", &unit_box(), Material::Galactic).unwrap();
    inv.place("v", &v, None, &origin(0)).unwrap();
    assert_eq!(
        inv.place("v", &v, None, &origin(1)).unwrap_err(),
        InventoryError::SecondWorld
    );

    inv.register_sensor(&registration(0), &v).unwrap();
    assert_eq!(
        inv.register_sensor(&registration(0), &v).unwrap_err(),
        InventoryError::DuplicateSensor("BR0".to_string())
    );
}

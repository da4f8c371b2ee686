//! Tests for tower slicing and per-tower records.

use approx::assert_relative_eq;
use config::DetectorConfig;

use super::*;
use crate::error::LayoutError;

#[test]
fn offsets_are_prefix_sums() {
    let offsets = angular_offsets(0.0, &[0.1, 0.2, 0.3]);
    assert_eq!(offsets.len(), 4);
    assert_eq!(offsets[0], 0.0);
    assert_relative_eq!(offsets[1], 0.1, epsilon = 1e-15);
    assert_relative_eq!(offsets[2], 0.3, epsilon = 1e-15);
    assert_relative_eq!(offsets[3], 0.6, epsilon = 1e-15);
    assert_eq!(angular_offsets(1.0, &[]), vec![1.0]);
}

#[test]
fn barrel_slots_tile_the_coverage() {
    let cfg = DetectorConfig::default();
    let slots = SegmentBuilder::barrel(&cfg).slots(Side::Right).unwrap();
    assert_eq!(slots.len(), cfg.num_barrel);
    assert_eq!(slots[0].theta_start, 0.0);
    assert_relative_eq!(slots[0].theta_center(), 0.01111, epsilon = 1e-12);
    for pair in slots.windows(2) {
        assert_relative_eq!(
            pair[0].theta_start + pair[0].delta_theta,
            pair[1].theta_start,
            epsilon = 1e-12
        );
    }
    let last = slots[slots.len() - 1];
    assert_relative_eq!(
        last.theta_start + last.delta_theta,
        cfg.barrel_coverage,
        epsilon = 1e-9
    );
}

#[test]
fn endcap_slots_start_at_the_endcap_angle() {
    let cfg = DetectorConfig::default();
    let slots = SegmentBuilder::endcap(&cfg).slots(Side::Left).unwrap();
    assert_eq!(slots.len(), cfg.num_endcap);
    assert_eq!(slots[0].theta_start, cfg.endcap_start_theta);
    assert!(slots.iter().all(|s| s.delta_theta == cfg.endcap_delta_theta));
    let last = slots[slots.len() - 1];
    assert!(last.theta_start + last.delta_theta < std::f64::consts::FRAC_PI_2);
}

#[test]
fn coverage_mismatch_is_reported() {
    let mut cfg = DetectorConfig::default();
    cfg.barrel_coverage += 0.01;
    let err = SegmentBuilder::barrel(&cfg).slots(Side::Right).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::Config(config::ConfigError::CoverageMismatch { section: "barrel", .. })
    ));
}

#[test]
fn signed_indices_follow_section_and_side() {
    let slot = |section, side, index| TowerSlot {
        section,
        side,
        index,
        theta_start: 0.0,
        delta_theta: 0.01,
    };
    assert_eq!(slot(Section::Barrel, Side::Right, 0).signed_index(52), 0);
    assert_eq!(slot(Section::Barrel, Side::Left, 0).signed_index(52), -1);
    assert_eq!(slot(Section::Barrel, Side::Left, 51).signed_index(52), -52);
    assert_eq!(slot(Section::Endcap, Side::Right, 0).signed_index(52), 52);
    assert_eq!(slot(Section::Endcap, Side::Left, 0).signed_index(52), -53);
    assert_eq!(slot(Section::Endcap, Side::Left, 39).signed_index(52), -92);
}

#[test]
fn names_encode_section_side_and_index() {
    let slot = TowerSlot {
        section: Section::Endcap,
        side: Side::Left,
        index: 7,
        theta_start: 1.0,
        delta_theta: 0.01,
    };
    assert_eq!(slot.name(), "towerEL7");
    assert_relative_eq!(slot.signed_theta(), -1.005, epsilon = 1e-12);
}

// =============================================================================
// BUILD
// =============================================================================

#[test]
fn first_barrel_tower_property() {
    let cfg = DetectorConfig::default();
    let builder = SegmentBuilder::barrel(&cfg);
    let slots = builder.slots(Side::Right).unwrap();
    let tower = builder.build_tower(&slots[0]).unwrap();

    let property = tower.property;
    assert_eq!(property.tower_xy, GridShape { columns: 56, rows: 56 });
    assert_eq!(property.tower_theta.signed_index, 0);
    assert_relative_eq!(property.tower_theta.signed_theta, 0.01111, epsilon = 1e-12);
    assert_relative_eq!(property.inner_r, 1800.111_094_603_593, epsilon = 1e-6);
    assert_eq!(property.tower_h, 2000.0);
    assert_eq!(property.d_theta, 0.02222);
    assert_eq!(tower.name(), "towerBR0");
}

#[test]
fn segment_is_ordered_by_polar_angle() {
    let cfg = DetectorConfig::default();
    let towers = SegmentBuilder::barrel(&cfg).build_segment(Side::Left).unwrap();
    assert_eq!(towers.len(), cfg.num_barrel);
    for (i, tower) in towers.iter().enumerate() {
        assert_eq!(tower.slot.index, i);
        assert_eq!(tower.property.tower_theta.signed_index, -(i as i32) - 1);
        assert!(tower.property.tower_theta.signed_theta < 0.0);
    }
    for pair in towers.windows(2) {
        assert!(pair[0].slot.theta_center() < pair[1].slot.theta_center());
    }
    assert_eq!(towers[51].grid.shape(), GridShape { columns: 43, rows: 44 });
}

#[test]
fn endcap_grids_shrink_towards_the_beam() {
    let cfg = DetectorConfig::default();
    let towers = SegmentBuilder::endcap(&cfg).build_segment(Side::Right).unwrap();
    assert_eq!(towers[0].grid.shape(), GridShape { columns: 43, rows: 45 });
    assert_eq!(towers[39].grid.shape(), GridShape { columns: 6, rows: 45 });
    for tower in &towers {
        assert_eq!(tower.property.inner_r, cfg.endcap_inner_radius);
    }
    for pair in towers.windows(2) {
        assert!(pair[0].grid.columns() >= pair[1].grid.columns());
    }
}

#[test]
fn fibers_enumerate_the_grid_in_copy_order() {
    let cfg = DetectorConfig::default();
    let builder = SegmentBuilder::endcap(&cfg);
    let slots = builder.slots(Side::Right).unwrap();
    let tower = builder.build_tower(&slots[39]).unwrap();

    let fibers: Vec<_> = tower.fibers(&cfg).collect();
    assert_eq!(fibers.len(), tower.grid.len());
    for (j, fiber) in fibers.iter().enumerate() {
        assert_eq!(fiber.copy_number, j as u32);
    }
    assert_eq!(tower.sensors(&cfg).len(), fibers.len());
    assert_eq!(tower.placements().len(), cfg.num_z_rot);
    assert_eq!(tower.housing_placements().len(), cfg.num_z_rot);
}

#[test]
fn property_uses_readout_wire_names() {
    let cfg = DetectorConfig::default();
    let builder = SegmentBuilder::barrel(&cfg);
    let slots = builder.slots(Side::Left).unwrap();
    let property = builder.build_tower(&slots[0]).unwrap().property;

    let json = serde_json::to_value(property).unwrap();
    assert_eq!(json["towerXY"]["columns"], 56);
    assert_eq!(json["towerXY"]["rows"], 56);
    assert_eq!(json["towerTheta"]["signedIndex"], -1);
    assert!(json["towerTheta"]["signedAngleRadians"].as_f64().unwrap() < 0.0);
    assert_eq!(json["towerH"], 2000.0);
    assert_eq!(json["dTheta"], 0.02222);
    assert!(json.get("innerR").is_some());

    let back: TowerProperty = serde_json::from_value(json).unwrap();
    assert_eq!(back.tower_xy, property.tower_xy);
    assert_relative_eq!(back.inner_r, property.inner_r, epsilon = 1e-9);
}

//! Tests for the tower geometry calculator.

use approx::assert_relative_eq;
use config::DetectorConfig;
use glam::DVec3;

use super::*;

fn first_barrel(side: Side) -> TowerGeometry {
    let cfg = DetectorConfig::default();
    TowerGeometry::barrel(&cfg, 0.01111, 0.02222, side).unwrap()
}

fn first_endcap(side: Side) -> TowerGeometry {
    let cfg = DetectorConfig::default();
    TowerGeometry::endcap(&cfg, 0.96374, 0.01314, side).unwrap()
}

// =============================================================================
// RADII
// =============================================================================

/// The barrel inner face lies on the 1800 mm cylinder.
#[test]
fn barrel_inner_radius_follows_cylinder() {
    let tower = first_barrel(Side::Right);
    assert_relative_eq!(tower.inner_radius(), 1800.111_094_6, epsilon = 1e-6);
    let axis_point = tower.local_frame().z_axis * tower.inner_radius();
    assert_relative_eq!(axis_point.x, 1800.0, epsilon = 1e-9);
}

#[test]
fn endcap_inner_radius_is_fixed() {
    assert_eq!(first_endcap(Side::Right).inner_radius(), 3125.83);
    assert_eq!(first_endcap(Side::Left).inner_radius(), 3125.83);
}

#[test]
fn outer_edge_radius_of_first_barrel_tower() {
    assert_relative_eq!(
        first_barrel(Side::Right).outer_edge_radius(),
        3799.407_503_8,
        epsilon = 1e-6
    );
}

// =============================================================================
// VERTICES
// =============================================================================

#[test]
fn left_vertices_mirror_right_vertices() {
    let right = first_barrel(Side::Right).edge_vertices();
    let left = first_barrel(Side::Left).edge_vertices();
    for (r, l) in right.iter().zip(left.iter()) {
        assert_eq!(r.x, l.x);
        assert_eq!(r.y, l.y);
        assert_eq!(r.z, -l.z);
    }
}

#[test]
fn edge_vertices_span_delta_theta() {
    let tower = first_endcap(Side::Right);
    let [v1, v2, v3, v4] = tower.edge_vertices();
    let elevation = |v: DVec3| v.z.atan2(v.x);
    let low = tower.theta_center() - tower.delta_theta() / 2.0;
    let high = tower.theta_center() + tower.delta_theta() / 2.0;
    for (v, edge) in [(v1, low), (v2, low), (v3, high), (v4, high)] {
        assert_relative_eq!(elevation(v), edge, epsilon = 1e-12);
    }
    // Projective tower: each long edge points back at the interaction point.
    assert_relative_eq!((v2 - v1).normalize().dot(v1.normalize()), 1.0, epsilon = 1e-12);
    assert_relative_eq!((v4 - v3).normalize().dot(v3.normalize()), 1.0, epsilon = 1e-12);
}

#[test]
fn shape_faces_use_tower_radii() {
    let tower = first_barrel(Side::Right);
    let trap = tower.shape();
    let t = (tower.delta_theta() / 2.0).tan();
    assert_eq!(trap.half_z, 1000.0);
    assert_relative_eq!(trap.near.half_y, tower.inner_radius() * t, epsilon = 1e-12);
    assert_relative_eq!(
        trap.far.half_y,
        (tower.inner_radius() + 2000.0) * t,
        epsilon = 1e-12
    );
    // Closer to the axis means a smaller cylindrical radius, hence narrower.
    assert!(trap.far.half_x_high < trap.far.half_x_low);
    assert_relative_eq!(
        trap.far.half_x_high,
        tower.outer_edge_radius() * (tower.phi_pitch() / 2.0).tan(),
        epsilon = 1e-12
    );
}

// =============================================================================
// PLACEMENTS
// =============================================================================

/// Placing the local trapezoid reproduces the global edge vertices.
#[test]
fn placement_maps_local_corners_onto_edge_vertices() {
    for side in [Side::Right, Side::Left] {
        let tower = first_barrel(side);
        let placement = tower.placements()[0];
        let local = tower.shape().vertices();
        let [v1, v2, v3, v4] = tower.edge_vertices();
        // Corner index -> edge vertex: (-x,-y,-z) is V1, (-x,+y,-z) is V3, ...
        for (corner, expected) in [(0, v1), (2, v3), (4, v2), (6, v4)] {
            let global = placement.transform_point(local[corner]);
            assert_relative_eq!(global.x, expected.x, epsilon = 1e-9);
            assert_relative_eq!(global.z, expected.z, epsilon = 1e-9);
        }
    }
}

#[test]
fn placement_rotations_are_proper() {
    for side in [Side::Right, Side::Left] {
        let tower = first_endcap(side);
        for p in tower.placements().iter().step_by(37) {
            assert_relative_eq!(p.rotation.determinant(), 1.0, epsilon = 1e-12);
            let product = p.rotation.transpose() * p.rotation;
            assert!(product.abs_diff_eq(glam::DMat3::IDENTITY, 1e-12));
        }
    }
}

#[test]
fn copies_are_spread_over_full_turn() {
    let tower = first_barrel(Side::Right);
    let placements = tower.placements();
    assert_eq!(placements.len(), 283);
    for (j, p) in placements.iter().enumerate() {
        assert_eq!(p.copy_number, j as u32);
        let expected = j as f64 * tower.phi_pitch();
        let phi = p.translation.y.atan2(p.translation.x).rem_euclid(std::f64::consts::TAU);
        assert_relative_eq!(phi, expected, epsilon = 1e-9);
    }
}

#[test]
fn left_copies_sit_in_negative_z() {
    let tower = first_endcap(Side::Left);
    assert!(tower.placements().iter().all(|p| p.translation.z < 0.0));
    assert!(tower.housing_placements().iter().all(|p| p.translation.z < 0.0));
}

/// The housing's near face coincides with the tower's far face.
#[test]
fn housing_sits_on_outer_face() {
    let tower = first_barrel(Side::Left);
    let cfg = DetectorConfig::default();
    let tower_p = tower.placements()[5];
    let housing_p = tower.housing_placements()[5];
    let tower_far = tower_p.transform_point(DVec3::new(0.0, 0.0, 1000.0));
    let housing_near =
        housing_p.transform_point(DVec3::new(0.0, 0.0, -cfg.housing_depth() / 2.0));
    assert!((tower_far - housing_near).length() < 1e-9);

    let housing = tower.housing_shape();
    assert_relative_eq!(housing.near.half_y, tower.shape().far.half_y, epsilon = 1e-12);
    assert!(housing.far.half_y > housing.near.half_y);
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn rejects_non_positive_width() {
    let cfg = DetectorConfig::default();
    assert_eq!(
        TowerGeometry::barrel(&cfg, 0.3, 0.0, Side::Right),
        Err(LayoutError::InvalidDeltaTheta { delta_theta: 0.0 })
    );
    assert!(matches!(
        TowerGeometry::endcap(&cfg, 1.0, -0.01, Side::Left),
        Err(LayoutError::InvalidDeltaTheta { .. })
    ));
}

#[test]
fn rejects_theta_outside_hemisphere() {
    let cfg = DetectorConfig::default();
    assert!(matches!(
        TowerGeometry::barrel(&cfg, 0.005, 0.02, Side::Right),
        Err(LayoutError::ThetaOutOfRange { .. })
    ));
    assert!(matches!(
        TowerGeometry::endcap(&cfg, 1.565, 0.02, Side::Right),
        Err(LayoutError::ThetaOutOfRange { .. })
    ));
    assert!(matches!(
        TowerGeometry::barrel(&cfg, f64::NAN, 0.02, Side::Right),
        Err(LayoutError::ThetaOutOfRange { .. })
    ));
}

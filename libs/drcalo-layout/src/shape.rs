//! # Shape and Placement Descriptors
//!
//! Value types describing *what* the volume backend has to build. None of
//! them own backend resources; a backend turns them into solids and
//! placements of its own.
//!
//! ## Local Frame
//!
//! Every tower-like solid uses the same local frame:
//!
//! ```text
//!   x: azimuthal (phi) direction
//!   y: polar direction, towards the polar axis
//!   z: tower axis, pointing away from the interaction point
//! ```

use glam::{DAffine3, DMat3, DVec3};

// =============================================================================
// PRIMITIVES
// =============================================================================

/// Axis-aligned box given by its half-lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    /// Half-lengths along x, y and z.
    pub half: DVec3,
}

impl BoxShape {
    /// Creates a box from its three half-lengths.
    pub fn new(half_x: f64, half_y: f64, half_z: f64) -> Self {
        Self {
            half: DVec3::new(half_x, half_y, half_z),
        }
    }

    /// Returns `true` when `point` lies inside or on the box.
    pub fn contains(&self, point: DVec3) -> bool {
        point.abs().cmple(self.half).all()
    }
}

/// Solid full-turn cylinder along z, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeShape {
    /// Outer radius.
    pub radius: f64,
    /// Half of the cylinder length.
    pub half_length: f64,
}

/// Cross-section of a [`TrapShape`] at one of its two z faces.
///
/// The face is a trapezoid in x: `half_x_low` applies at `y = -half_y`,
/// `half_x_high` at `y = +half_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapFace {
    /// Half-extent along y.
    pub half_y: f64,
    /// Half-extent along x at the `-y` edge.
    pub half_x_low: f64,
    /// Half-extent along x at the `+y` edge.
    pub half_x_high: f64,
}

impl TrapFace {
    fn lerp(self, other: TrapFace, t: f64) -> TrapFace {
        TrapFace {
            half_y: self.half_y + (other.half_y - self.half_y) * t,
            half_x_low: self.half_x_low + (other.half_x_low - self.half_x_low) * t,
            half_x_high: self.half_x_high + (other.half_x_high - self.half_x_high) * t,
        }
    }
}

/// General trapezoid defined by eight vertices.
///
/// Vertex order is `(-x,-y)`, `(+x,-y)`, `(-x,+y)`, `(+x,+y)` on the `-z`
/// face, then the same four on the `+z` face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapShape {
    /// Half-length along z.
    pub half_z: f64,
    /// Face at `z = -half_z`.
    pub near: TrapFace,
    /// Face at `z = +half_z`.
    pub far: TrapFace,
}

impl TrapShape {
    /// Creates a trapezoid from its two faces.
    ///
    /// # Examples
    /// ```
    /// use drcalo_layout::shape::{TrapFace, TrapShape};
    /// let face = TrapFace { half_y: 1.0, half_x_low: 2.0, half_x_high: 1.0 };
    /// let trap = TrapShape::new(5.0, face, face);
    /// assert_eq!(trap.vertices()[0].z, -5.0);
    /// ```
    pub fn new(half_z: f64, near: TrapFace, far: TrapFace) -> Self {
        Self { half_z, near, far }
    }

    /// The eight defining vertices in backend order.
    pub fn vertices(&self) -> [DVec3; 8] {
        let face = |f: &TrapFace, z: f64| {
            [
                DVec3::new(-f.half_x_low, -f.half_y, z),
                DVec3::new(f.half_x_low, -f.half_y, z),
                DVec3::new(-f.half_x_high, f.half_y, z),
                DVec3::new(f.half_x_high, f.half_y, z),
            ]
        };
        let [a, b, c, d] = face(&self.near, -self.half_z);
        let [e, f, g, h] = face(&self.far, self.half_z);
        [a, b, c, d, e, f, g, h]
    }

    /// Cross-section at height `z`, interpolated between the two faces.
    pub fn face_at(&self, z: f64) -> TrapFace {
        let t = (z + self.half_z) / (2.0 * self.half_z);
        self.near.lerp(self.far, t)
    }

    /// Returns `true` when `point` lies inside or on the trapezoid.
    ///
    /// Side faces are planar, so bilinear interpolation of the half-widths
    /// is exact.
    pub fn contains(&self, point: DVec3) -> bool {
        if point.z.abs() > self.half_z {
            return false;
        }
        let face = self.face_at(point.z);
        if point.y.abs() > face.half_y {
            return false;
        }
        let s = (point.y + face.half_y) / (2.0 * face.half_y);
        let half_x = face.half_x_low + (face.half_x_high - face.half_x_low) * s;
        point.x.abs() <= half_x
    }
}

// =============================================================================
// SOLID
// =============================================================================

/// Any solid the layout emits.
#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    /// Axis-aligned box.
    Box(BoxShape),
    /// Full cylinder.
    Tube(TubeShape),
    /// Eight-vertex trapezoid.
    Trap(TrapShape),
    /// Cylinder clipped by a trapezoid.
    ///
    /// The trapezoid is expressed in the tube's frame by `clip_offset`, so a
    /// fiber sitting at `(x, y)` in its tower uses `(-x, -y, 0)`.
    ClippedTube {
        /// The unclipped fiber cylinder.
        tube: TubeShape,
        /// The tower envelope clipping it.
        clip: TrapShape,
        /// Position of the envelope's origin in the tube's frame.
        clip_offset: DVec3,
    },
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// Rigid placement of a daughter volume in its mother.
///
/// `rotation` is the active rotation: its columns are the daughter's local
/// axes expressed in the mother frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Active rotation of the daughter frame.
    pub rotation: DMat3,
    /// Position of the daughter origin in the mother frame.
    pub translation: DVec3,
    /// Copy number handed to the backend.
    pub copy_number: u32,
}

impl Placement {
    /// Unrotated placement at `translation`.
    pub fn at(translation: DVec3, copy_number: u32) -> Self {
        Self {
            rotation: DMat3::IDENTITY,
            translation,
            copy_number,
        }
    }

    /// The placement as an affine transform from daughter to mother frame.
    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_mat3_translation(self.rotation, self.translation)
    }

    /// Maps a point from the daughter frame into the mother frame.
    ///
    /// # Examples
    /// ```
    /// use drcalo_layout::shape::Placement;
    /// use glam::DVec3;
    /// let p = Placement::at(DVec3::new(1.0, 2.0, 3.0), 0);
    /// assert_eq!(p.transform_point(DVec3::X), DVec3::new(2.0, 2.0, 3.0));
    /// ```
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.rotation * local + self.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedge() -> TrapShape {
        TrapShape::new(
            10.0,
            TrapFace {
                half_y: 2.0,
                half_x_low: 3.0,
                half_x_high: 2.0,
            },
            TrapFace {
                half_y: 4.0,
                half_x_low: 6.0,
                half_x_high: 4.0,
            },
        )
    }

    #[test]
    fn vertices_follow_backend_order() {
        let v = wedge().vertices();
        assert_eq!(v[0], DVec3::new(-3.0, -2.0, -10.0));
        assert_eq!(v[3], DVec3::new(2.0, 2.0, -10.0));
        assert_eq!(v[5], DVec3::new(6.0, -4.0, 10.0));
        assert_eq!(v[6], DVec3::new(-4.0, 4.0, 10.0));
    }

    #[test]
    fn face_at_midplane_is_average() {
        let mid = wedge().face_at(0.0);
        assert_eq!(mid.half_y, 3.0);
        assert_eq!(mid.half_x_low, 4.5);
        assert_eq!(mid.half_x_high, 3.0);
    }

    #[test]
    fn contains_respects_slanted_walls() {
        let trap = wedge();
        for v in trap.vertices() {
            assert!(trap.contains(v));
        }
        assert!(trap.contains(DVec3::ZERO));
        // Wide enough at -y, too wide at +y on the far face.
        assert!(trap.contains(DVec3::new(5.5, -4.0, 10.0)));
        assert!(!trap.contains(DVec3::new(5.5, 4.0, 10.0)));
        assert!(!trap.contains(DVec3::new(0.0, 0.0, 10.1)));
    }

    #[test]
    fn box_contains() {
        let b = BoxShape::new(1.0, 2.0, 3.0);
        assert!(b.contains(DVec3::new(-1.0, 2.0, 0.0)));
        assert!(!b.contains(DVec3::new(0.0, 0.0, 3.5)));
    }

    #[test]
    fn affine_matches_transform_point() {
        let p = Placement {
            rotation: DMat3::from_rotation_z(0.3),
            translation: DVec3::new(4.0, -1.0, 2.0),
            copy_number: 7,
        };
        let local = DVec3::new(0.5, 1.5, -2.0);
        let a = p.to_affine().transform_point3(local);
        assert!((a - p.transform_point(local)).length() < 1e-12);
    }
}

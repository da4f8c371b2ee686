//! # Dual-Readout Calorimeter Layout
//!
//! Geometric layout of a projective-tower fiber calorimeter: barrel and
//! endcap towers on both sides of the interaction point, each filled with a
//! packed grid of Cerenkov and scintillation fibers read out by one
//! photosensor per fiber.
//!
//! ## Architecture
//!
//! ```text
//! DetectorConfig → SegmentBuilder (prefix sum, rayon) → TowerBuild
//!                       ↓                                   ↓
//!                 TowerGeometry → FiberGrid → SensorArray   TowerProperty
//!                       ↓
//!                 DetectorAssembly → Detector → VolumeBackend / TowerTable
//! ```
//!
//! The crate only computes *what* to build. Turning the descriptors into
//! solids is the job of a [`backend::VolumeBackend`].
//!
//! ## Usage
//!
//! ```
//! use config::DetectorConfig;
//! use drcalo_layout::assembly::DetectorAssembly;
//!
//! let detector = DetectorAssembly::new(DetectorConfig::default()).build()?;
//! assert_eq!(detector.towers().len(), 184);
//!
//! let table = detector.tower_table();
//! assert_eq!(table.get(0).unwrap().tower_xy.columns, 56);
//! # Ok::<(), drcalo_layout::LayoutError>(())
//! ```

pub mod assembly;
pub mod backend;
pub mod error;
pub mod fiber;
pub mod material;
pub mod readout;
pub mod segment;
pub mod sensor;
pub mod shape;
pub mod tower;

pub use assembly::{Detector, DetectorAssembly, RenderSummary};
pub use error::{LayoutError, LayoutResult};
pub use material::Material;
pub use readout::{SensorRegistration, TowerTable};
pub use segment::{TowerBuild, TowerProperty};

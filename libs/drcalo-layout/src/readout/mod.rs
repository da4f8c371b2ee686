//! # Readout Bookkeeping
//!
//! What reconstruction needs to know about the towers: the ordered
//! [`TowerProperty`] table keyed by signed theta index, and one sensor
//! registration per tower.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};
use crate::segment::{TowerProperty, TowerSlot};

/// Ordered tower properties with lookup by signed theta index.
///
/// Serializes as a plain sequence of [`TowerProperty`] records; the index is
/// rebuilt on deserialization, which rejects repeated signed indices.
///
/// # Examples
/// ```
/// use config::DetectorConfig;
/// use drcalo_layout::assembly::DetectorAssembly;
///
/// let detector = DetectorAssembly::new(DetectorConfig::default()).build().unwrap();
/// let table = detector.tower_table();
/// assert_eq!(table.get(-1).unwrap().tower_theta.signed_index, -1);
/// assert!(table.get(10_000).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TowerProperty>", into = "Vec<TowerProperty>")]
pub struct TowerTable {
    towers: Vec<TowerProperty>,
    positions: HashMap<i32, usize>,
}

impl TowerTable {
    /// Table over `towers`, kept in the given order.
    ///
    /// # Errors
    ///
    /// [`LayoutError::DuplicateTowerIndex`] when two records share a signed
    /// index.
    pub fn new(towers: Vec<TowerProperty>) -> LayoutResult<Self> {
        let mut positions = HashMap::with_capacity(towers.len());
        for (position, tower) in towers.iter().enumerate() {
            let signed_index = tower.tower_theta.signed_index;
            match positions.entry(signed_index) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(_) => {
                    return Err(LayoutError::DuplicateTowerIndex { signed_index });
                }
            }
        }
        Ok(Self { towers, positions })
    }

    /// Number of towers.
    pub fn len(&self) -> usize {
        self.towers.len()
    }

    /// Returns `true` for an empty table.
    pub fn is_empty(&self) -> bool {
        self.towers.is_empty()
    }

    /// Position of the tower with `signed_index` in assembly order.
    pub fn position(&self, signed_index: i32) -> Option<usize> {
        self.positions.get(&signed_index).copied()
    }

    /// Tower with `signed_index`.
    pub fn get(&self, signed_index: i32) -> Option<&TowerProperty> {
        self.position(signed_index).map(|p| &self.towers[p])
    }

    /// All towers in assembly order.
    pub fn as_slice(&self) -> &[TowerProperty] {
        &self.towers
    }

    /// Iterates in assembly order.
    pub fn iter(&self) -> std::slice::Iter<'_, TowerProperty> {
        self.towers.iter()
    }
}

impl TryFrom<Vec<TowerProperty>> for TowerTable {
    type Error = LayoutError;

    fn try_from(towers: Vec<TowerProperty>) -> LayoutResult<Self> {
        Self::new(towers)
    }
}

impl From<TowerTable> for Vec<TowerProperty> {
    fn from(table: TowerTable) -> Self {
        table.towers
    }
}

impl<'a> IntoIterator for &'a TowerTable {
    type Item = &'a TowerProperty;
    type IntoIter = std::slice::Iter<'a, TowerProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sensitive-detector registration of one tower's photosensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRegistration {
    /// Detector name, e.g. `BR3`.
    pub name: String,
    /// Hits collection name, e.g. `BRC3`.
    pub collection: String,
    /// Tower the sensors belong to.
    pub property: TowerProperty,
}

impl SensorRegistration {
    /// Registration of the tower in `slot`.
    pub fn new(slot: &TowerSlot, property: TowerProperty) -> Self {
        let prefix = format!("{}{}", slot.section.code(), slot.side.code());
        Self {
            name: format!("{prefix}{}", slot.index),
            collection: format!("{prefix}C{}", slot.index),
            property,
        }
    }
}

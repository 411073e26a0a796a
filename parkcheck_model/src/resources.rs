//! Resource quantities: bucket snapshots and delivery requests.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// One bucket of resource quantities. Non-negativity lives in the type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBundle {
    pub qty_burger: u32,
    pub qty_salad: u32,
    pub qty_water: u32,
}

impl ResourceBundle {
    /// Creates a bundle; quantities in burger, salad, water order.
    pub fn new(burgers: u32, salads: u32, water: u32) -> Self {
        Self {
            qty_burger: burgers,
            qty_salad: salads,
            qty_water: water,
        }
    }

    /// The all-zero bundle.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Expected response of the resources endpoint: one bundle per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub fresh: ResourceBundle,
    pub expired: ResourceBundle,
    pub consumed: ResourceBundle,
}

impl ResourceSnapshot {
    /// Creates a snapshot from its three buckets.
    pub fn new(fresh: ResourceBundle, expired: ResourceBundle, consumed: ResourceBundle) -> Self {
        Self {
            fresh,
            expired,
            consumed,
        }
    }

    /// Snapshot with every bucket empty, the state right after a reset.
    pub fn empty() -> Self {
        Self::new(
            ResourceBundle::zero(),
            ResourceBundle::zero(),
            ResourceBundle::zero(),
        )
    }
}

/// A delivery request. Absent quantities are left out of the JSON body
/// entirely; an all-absent request never reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAdjustment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_burger: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_salad: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_water: Option<u32>,
}

impl ResourceAdjustment {
    /// Creates a delivery request; quantities in burger, salad, water
    /// order. At least one must be present, otherwise the calling story
    /// itself is broken and gets a contract violation back.
    pub fn new(
        burgers: Option<u32>,
        salads: Option<u32>,
        water: Option<u32>,
    ) -> Result<Self, ModelError> {
        if burgers.is_none() && salads.is_none() && water.is_none() {
            return Err(ModelError::EmptyAdjustment);
        }
        Ok(Self {
            qty_burger: burgers,
            qty_salad: salads,
            qty_water: water,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_adjustment_rejects_all_absent() {
        assert_eq!(
            ResourceAdjustment::new(None, None, None),
            Err(ModelError::EmptyAdjustment)
        );
    }

    #[test]
    fn test_adjustment_accepts_a_single_quantity() {
        assert!(ResourceAdjustment::new(Some(1), None, None).is_ok());
        assert!(ResourceAdjustment::new(None, Some(2), None).is_ok());
        assert!(ResourceAdjustment::new(None, None, Some(3)).is_ok());
    }

    #[test]
    fn test_adjustment_body_omits_absent_fields() {
        let delivery = ResourceAdjustment::new(Some(1), None, None).unwrap();
        assert_eq!(
            serde_json::to_value(delivery).unwrap(),
            json!({ "qtyBurger": 1 })
        );

        let mixed = ResourceAdjustment::new(None, Some(2), Some(100_000)).unwrap();
        assert_eq!(
            serde_json::to_value(mixed).unwrap(),
            json!({ "qtySalad": 2, "qtyWater": 100_000 })
        );
    }

    #[test]
    fn test_bundle_wire_keys_are_camel_case() {
        assert_eq!(
            serde_json::to_value(ResourceBundle::new(101, 250, 10_000)).unwrap(),
            json!({ "qtyBurger": 101, "qtySalad": 250, "qtyWater": 10_000 })
        );
    }

    #[test]
    fn test_snapshot_groups_buckets_by_state() {
        let snapshot = ResourceSnapshot::new(
            ResourceBundle::new(400, 750, 50_000),
            ResourceBundle::new(101, 500, 0),
            ResourceBundle::zero(),
        );
        assert_eq!(
            serde_json::to_value(snapshot).unwrap(),
            json!({
                "fresh": { "qtyBurger": 400, "qtySalad": 750, "qtyWater": 50_000 },
                "expired": { "qtyBurger": 101, "qtySalad": 500, "qtyWater": 0 },
                "consumed": { "qtyBurger": 0, "qtySalad": 0, "qtyWater": 0 },
            })
        );
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let snapshot = ResourceSnapshot::empty();
        assert_eq!(snapshot.fresh, ResourceBundle::zero());
        assert_eq!(snapshot.expired, ResourceBundle::zero());
        assert_eq!(snapshot.consumed, ResourceBundle::zero());
    }
}

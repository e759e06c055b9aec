use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::VariantId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    pub variant_id: VariantId,
    pub quantity: i64,
    #[serde(default)]
    pub reserved_quantity: i64,
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InventoryLevel {
    pub fn available(&self) -> i64 {
        (self.quantity - self.reserved_quantity).max(0)
    }

    pub fn is_low(&self) -> bool {
        self.low_stock_threshold.is_some_and(|threshold| self.available() <= threshold)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustment {
    pub delta: i64,
    pub reason: String,
}

//! Modelo de Pickup
//!
//! Una parada de ruta que referencia exactamente un Bin. Los estados
//! 'collected' y 'skipped' son terminales: un pickup nunca se reabre.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del pickup - mapea al ENUM pickup_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "pickup_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
    Pending,
    Collected,
    Skipped,
}

impl PickupStatus {
    /// 'collected' y 'skipped' son estados terminales
    pub fn is_terminal(self) -> bool {
        matches!(self, PickupStatus::Collected | PickupStatus::Skipped)
    }
}

/// Pickup principal - mapea exactamente a la tabla pickups
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pickup {
    pub id: Uuid,
    pub route_id: Uuid,
    pub bin_id: Uuid,
    pub driver_id: Uuid,
    pub order_index: i32,
    pub status: PickupStatus,
    pub collected_at: Option<DateTime<Utc>>,
    pub fill_level_at_pickup: Option<i32>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!PickupStatus::Pending.is_terminal());
        assert!(PickupStatus::Collected.is_terminal());
        assert!(PickupStatus::Skipped.is_terminal());
    }
}

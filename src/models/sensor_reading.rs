//! Modelo de SensorReading
//!
//! Lecturas de telemetría append-only, cada una pertenece a un Bin.
//! El orden canónico es por 'timestamp'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// SensorReading principal - mapea exactamente a la tabla sensor_readings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SensorReading {
    pub id: Uuid,
    pub bin_id: Uuid,
    pub fill_level: i32,
    pub battery_level: i32,
    pub timestamp: DateTime<Utc>,
}

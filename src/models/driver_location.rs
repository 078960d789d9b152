//! Modelo de DriverLocation
//!
//! Última posición conocida por par (driver_id, route_id). Se sobrescribe
//! con cada reporte; nunca hay más de una fila por clave.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// DriverLocation principal - mapea exactamente a la tabla driver_locations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverLocation {
    pub driver_id: Uuid,
    pub route_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub updated_at: DateTime<Utc>,
}

//! Modelo de Bin (contenedor de residuos)
//!
//! Este módulo contiene el struct Bin y sus enums asociados.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de residuo - mapea al ENUM waste_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "waste_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WasteType {
    General,
    Recycling,
    Organic,
    Hazardous,
}

/// Estado del contenedor - mapea al ENUM bin_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "bin_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BinStatus {
    Active,
    Damaged,
    MaintenanceRequired,
}

/// Bin principal - mapea exactamente a la tabla bins
///
/// Invariante: fill_level y battery_level siempre en [0, 100]. Los valores
/// fuera de rango se rechazan en la capa de validación antes de cualquier
/// escritura; el core nunca persiste un valor fuera de rango.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bin {
    pub id: Uuid,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub fill_level: i32,
    pub battery_level: i32,
    pub capacity_liters: i32,
    pub waste_type: WasteType,
    pub status: BinStatus,
    pub sensor_id: String,
    pub last_pickup: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Umbral por defecto para considerar que un contenedor necesita recogida
pub const DEFAULT_PICKUP_THRESHOLD: i32 = 60;

/// Heurística "acaba de ser vaciado": el nivel anterior superaba 50 y el
/// nuevo cae por debajo de 10.
pub fn was_just_emptied(previous_fill: i32, new_fill: i32) -> bool {
    previous_fill > 50 && new_fill < 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_was_just_emptied() {
        assert!(was_just_emptied(80, 5));
        assert!(was_just_emptied(51, 9));
        // Nivel previo demasiado bajo
        assert!(!was_just_emptied(50, 5));
        // Nivel nuevo demasiado alto
        assert!(!was_just_emptied(80, 10));
        assert!(!was_just_emptied(30, 2));
    }
}

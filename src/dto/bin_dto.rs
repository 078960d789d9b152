//! DTOs de Bin
//!
//! Requests y responses para el CRUD de contenedores y la predicción
//! de llenado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::bin::{Bin, BinStatus, WasteType};

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

/// Request para registrar un contenedor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBinRequest {
    #[validate(length(min = 1, max = 500))]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,

    #[validate(range(min = 1))]
    pub capacity_liters: Option<i32>,

    pub waste_type: Option<WasteType>,
    pub status: Option<BinStatus>,

    #[validate(length(min = 1, max = 64))]
    pub sensor_id: String,
}

/// Request para actualizar un contenedor existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBinRequest {
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,

    #[validate(range(min = 1))]
    pub capacity_liters: Option<i32>,

    pub waste_type: Option<WasteType>,
    pub status: Option<BinStatus>,

    #[validate(length(min = 1, max = 64))]
    pub sensor_id: Option<String>,
}

/// Response de contenedor para la API
#[derive(Debug, Serialize)]
pub struct BinResponse {
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

impl From<Bin> for BinResponse {
    fn from(bin: Bin) -> Self {
        Self {
            id: bin.id,
            address: bin.address,
            lat: bin.lat,
            lng: bin.lng,
            fill_level: bin.fill_level,
            battery_level: bin.battery_level,
            capacity_liters: bin.capacity_liters,
            waste_type: bin.waste_type,
            status: bin.status,
            sensor_id: bin.sensor_id,
            last_pickup: bin.last_pickup,
            created_at: bin.created_at,
        }
    }
}

/// Filtro para la selección de candidatos a recogida
#[derive(Debug, Deserialize)]
pub struct NeedingPickupQuery {
    pub threshold: Option<i32>,
}

/// Response de predicción de llenado
///
/// predicted_full = None significa "sin predicción" (resultado válido,
/// no un error).
#[derive(Debug, Serialize)]
pub struct PredictedFullResponse {
    pub bin_id: Uuid,
    pub current_fill: i32,
    pub predicted_full: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bin_request_rejects_bad_coordinates() {
        let request = CreateBinRequest {
            address: "Calle Mayor 1".to_string(),
            lat: 91.0,
            lng: 0.0,
            capacity_liters: None,
            waste_type: None,
            status: None,
            sensor_id: "SENSOR-001".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_bin_request_requires_sensor_id() {
        let request = CreateBinRequest {
            address: "Calle Mayor 1".to_string(),
            lat: 40.4168,
            lng: -3.7038,
            capacity_liters: Some(240),
            waste_type: Some(WasteType::General),
            status: None,
            sensor_id: "".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_bin_request_valid() {
        let request = CreateBinRequest {
            address: "Calle Mayor 1".to_string(),
            lat: 40.4168,
            lng: -3.7038,
            capacity_liters: Some(240),
            waste_type: Some(WasteType::Recycling),
            status: Some(BinStatus::Active),
            sensor_id: "SENSOR-001".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}

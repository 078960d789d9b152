//! DTOs de posición de conductor
//!
//! Reportes periódicos de GPS durante una ruta en curso y su lectura
//! por ruta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver_location::DriverLocation;

/// Request de reporte de posición
#[derive(Debug, Deserialize, Validate)]
pub struct ReportLocationRequest {
    pub driver_id: Uuid,
    pub route_id: Uuid,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

/// Response de última posición conocida
#[derive(Debug, Serialize)]
pub struct DriverLocationResponse {
    pub driver_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<DriverLocation> for DriverLocationResponse {
    fn from(location: DriverLocation) -> Self {
        Self {
            driver_id: location.driver_id,
            lat: location.lat,
            lng: location.lng,
            updated_at: location.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_location_rejects_bad_latitude() {
        let request = ReportLocationRequest {
            driver_id: Uuid::new_v4(),
            route_id: Uuid::new_v4(),
            lat: -95.0,
            lng: 2.0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_report_location_valid() {
        let request = ReportLocationRequest {
            driver_id: Uuid::new_v4(),
            route_id: Uuid::new_v4(),
            lat: 40.4168,
            lng: -3.7038,
        };
        assert!(request.validate().is_ok());
    }
}

//! DTOs de Route y Pickup
//!
//! Requests y responses para la creación de rutas, su ciclo de vida
//! y las operaciones de recogida.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::pickup::PickupStatus;
use crate::models::route::RouteStatus;

/// Request para crear una nueva ruta
///
/// El depósito de salida es obligatorio y explícito: no existe ningún
/// valor por defecto de coordenadas.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    pub driver_id: Uuid,

    pub scheduled_date: NaiveDate,

    #[validate(length(min = 1))]
    pub bin_ids: Vec<Uuid>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub depot_lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub depot_lng: f64,
}

/// Response al crear una ruta
#[derive(Debug, Serialize)]
pub struct CreateRouteResponse {
    pub route_id: Uuid,
}

/// Response de ruta para listados, con el progreso de sus paradas
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub status: RouteStatus,
    pub scheduled_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub total_stops: i64,
    pub collected_stops: i64,
}

/// Una parada dentro del detalle de ruta
#[derive(Debug, Serialize)]
pub struct RouteStopResponse {
    pub id: Uuid,
    pub bin_id: Uuid,
    pub order_index: i32,
    pub status: PickupStatus,
    pub collected_at: Option<DateTime<Utc>>,
    pub fill_level_at_pickup: Option<i32>,
    pub photo_url: Option<String>,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub fill_level: i32,
}

/// Response de detalle de ruta con sus paradas ordenadas
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub status: RouteStatus,
    pub scheduled_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub stops: Vec<RouteStopResponse>,
}

/// Request para marcar un pickup como recogido
#[derive(Debug, Deserialize, Validate)]
pub struct CollectPickupRequest {
    pub bin_id: Uuid,

    /// Referencia opcional a la foto de prueba (el almacenamiento de
    /// objetos es un colaborador externo)
    #[validate(length(min = 1, max = 1000))]
    pub photo_url: Option<String>,
}

/// Response al recoger un pickup
#[derive(Debug, Serialize)]
pub struct CollectPickupResponse {
    pub pickup_id: Uuid,
    pub fill_level_at_pickup: i32,
}

/// Response al saltar un pickup
#[derive(Debug, Serialize)]
pub struct SkipPickupResponse {
    pub pickup_id: Uuid,
    pub status: PickupStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_route_request_rejects_empty_selection() {
        let request = CreateRouteRequest {
            driver_id: Uuid::new_v4(),
            scheduled_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            bin_ids: vec![],
            depot_lat: 40.4168,
            depot_lng: -3.7038,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_route_request_rejects_bad_depot() {
        let request = CreateRouteRequest {
            driver_id: Uuid::new_v4(),
            scheduled_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            bin_ids: vec![Uuid::new_v4()],
            depot_lat: 40.4168,
            depot_lng: -200.0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_route_request_valid() {
        let request = CreateRouteRequest {
            driver_id: Uuid::new_v4(),
            scheduled_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            bin_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
            depot_lat: 40.4168,
            depot_lng: -3.7038,
        };
        assert!(request.validate().is_ok());
    }
}

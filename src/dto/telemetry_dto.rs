//! DTOs de telemetría
//!
//! Payloads del ingreso de lecturas de sensores, individual y por lotes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lectura individual de un sensor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TelemetryRequest {
    #[validate(length(min = 1, max = 64))]
    pub sensor_id: String,

    #[validate(range(min = 0, max = 100))]
    pub fill_level: i32,

    #[validate(range(min = 0, max = 100))]
    pub battery_level: i32,
}

/// Lote de lecturas (ingesta IoT)
///
/// Cada lectura se valida individualmente en el controller para poder
/// reportar el resultado por sensor.
#[derive(Debug, Deserialize, Validate)]
pub struct TelemetryBatchRequest {
    #[validate(length(min = 1, max = 100))]
    pub readings: Vec<TelemetryRequest>,
}

/// Response de una lectura aplicada
#[derive(Debug, Serialize)]
pub struct TelemetryResponse {
    pub success: bool,
    pub bin_id: Uuid,
    pub fill_level: i32,
    pub battery_level: i32,
}

/// Resultado por lectura dentro de un lote
#[derive(Debug, Serialize)]
pub struct BatchReadingResult {
    pub sensor_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response del endpoint de lotes
#[derive(Debug, Serialize)]
pub struct TelemetryBatchResponse {
    pub success: bool,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BatchReadingResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_request_rejects_out_of_range_fill() {
        let request = TelemetryRequest {
            sensor_id: "SENSOR-001".to_string(),
            fill_level: 101,
            battery_level: 90,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_telemetry_request_rejects_negative_battery() {
        let request = TelemetryRequest {
            sensor_id: "SENSOR-001".to_string(),
            fill_level: 50,
            battery_level: -1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_telemetry_request_accepts_bounds() {
        let request = TelemetryRequest {
            sensor_id: "SENSOR-001".to_string(),
            fill_level: 0,
            battery_level: 100,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_batch_rejects_empty() {
        let request = TelemetryBatchRequest { readings: vec![] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_batch_accepts_single_reading() {
        let request = TelemetryBatchRequest {
            readings: vec![TelemetryRequest {
                sensor_id: "SENSOR-001".to_string(),
                fill_level: 50,
                battery_level: 90,
            }],
        };
        assert!(request.validate().is_ok());
    }
}

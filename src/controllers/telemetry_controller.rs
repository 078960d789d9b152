//! Controller de telemetría
//!
//! Reconciliación de lecturas de sensores: append inmutable de la lectura
//! y actualización del contenedor, con la heurística "acaba de ser
//! vaciado" sobre last_pickup. Las dos escrituras son independientes y no
//! van en transacción (carrera aceptada con el reset de recogida).

use sqlx::PgPool;
use validator::Validate;

use crate::dto::telemetry_dto::{
    BatchReadingResult, TelemetryBatchRequest, TelemetryBatchResponse, TelemetryRequest,
    TelemetryResponse,
};
use crate::models::bin::{was_just_emptied, Bin};
use crate::repositories::bin_repository::BinRepository;
use crate::utils::errors::AppError;

pub struct TelemetryController {
    bins: BinRepository,
}

impl TelemetryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bins: BinRepository::new(pool),
        }
    }

    /// Aplicar una lectura individual
    pub async fn apply_reading(
        &self,
        request: TelemetryRequest,
    ) -> Result<TelemetryResponse, AppError> {
        request.validate()?;

        let bin = self
            .bins
            .find_by_sensor_id(&request.sensor_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Bin not found for sensor_id '{}'",
                    request.sensor_id
                ))
            })?;

        self.apply_to_bin(&bin, &request).await?;

        Ok(TelemetryResponse {
            success: true,
            bin_id: bin.id,
            fill_level: request.fill_level,
            battery_level: request.battery_level,
        })
    }

    /// Aplicar un lote de lecturas; el resultado se reporta por sensor
    pub async fn apply_batch(
        &self,
        request: TelemetryBatchRequest,
    ) -> Result<TelemetryBatchResponse, AppError> {
        request.validate()?;

        let mut results = Vec::with_capacity(request.readings.len());

        for reading in &request.readings {
            if let Err(e) = reading.validate() {
                results.push(BatchReadingResult {
                    sensor_id: reading.sensor_id.clone(),
                    success: false,
                    error: Some(e.to_string()),
                });
                continue;
            }

            let bin = match self.bins.find_by_sensor_id(&reading.sensor_id).await? {
                Some(bin) => bin,
                None => {
                    results.push(BatchReadingResult {
                        sensor_id: reading.sensor_id.clone(),
                        success: false,
                        error: Some("Bin not found".to_string()),
                    });
                    continue;
                }
            };

            self.apply_to_bin(&bin, reading).await?;
            results.push(BatchReadingResult {
                sensor_id: reading.sensor_id.clone(),
                success: true,
                error: None,
            });
        }

        let successful = results.iter().filter(|r| r.success).count();

        Ok(TelemetryBatchResponse {
            success: true,
            processed: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        })
    }

    async fn apply_to_bin(&self, bin: &Bin, reading: &TelemetryRequest) -> Result<(), AppError> {
        self.bins
            .append_reading(bin.id, reading.fill_level, reading.battery_level)
            .await?;

        // Si el nivel cayó de golpe, el contenedor acaba de ser vaciado
        let set_last_pickup = was_just_emptied(bin.fill_level, reading.fill_level);
        if set_last_pickup {
            log::info!(
                "🗑️ Sensor {} reporta vaciado ({}% -> {}%)",
                bin.sensor_id,
                bin.fill_level,
                reading.fill_level
            );
        }

        self.bins
            .update_telemetry(bin.id, reading.fill_level, reading.battery_level, set_last_pickup)
            .await?;

        Ok(())
    }
}

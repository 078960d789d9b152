//! Controller de Bins
//!
//! CRUD de contenedores (sin borrado: el core nunca elimina bins),
//! selección de candidatos a recogida y predicción de llenado.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::bin_dto::{
    ApiResponse, BinResponse, CreateBinRequest, PredictedFullResponse, UpdateBinRequest,
};
use crate::models::bin::{BinStatus, WasteType, DEFAULT_PICKUP_THRESHOLD};
use crate::repositories::bin_repository::BinRepository;
use crate::services::fill_prediction::{predict_full, ReadingSample, MAX_READINGS};
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::validate_percent_level;

/// Capacidad por defecto de un contenedor, en litros
const DEFAULT_CAPACITY_LITERS: i32 = 240;

pub struct BinController {
    repository: BinRepository,
}

impl BinController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BinRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateBinRequest,
    ) -> Result<ApiResponse<BinResponse>, AppError> {
        request.validate()?;

        let bin = self
            .repository
            .create(
                request.address,
                request.lat,
                request.lng,
                request.capacity_liters.unwrap_or(DEFAULT_CAPACITY_LITERS),
                request.waste_type.unwrap_or(WasteType::General),
                request.status.unwrap_or(BinStatus::Active),
                request.sensor_id,
            )
            .await?;

        log::info!("🗑️ Contenedor {} registrado (sensor {})", bin.id, bin.sensor_id);

        Ok(ApiResponse::success_with_message(
            bin.into(),
            "Contenedor creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BinResponse, AppError> {
        let bin = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contenedor no encontrado".to_string()))?;

        Ok(bin.into())
    }

    pub async fn list(&self) -> Result<Vec<BinResponse>, AppError> {
        let bins = self.repository.list().await?;
        Ok(bins.into_iter().map(BinResponse::from).collect())
    }

    pub async fn list_needing_pickup(
        &self,
        threshold: Option<i32>,
    ) -> Result<Vec<BinResponse>, AppError> {
        let threshold = threshold.unwrap_or(DEFAULT_PICKUP_THRESHOLD);
        if validate_percent_level(threshold).is_err() {
            return Err(bad_request_error("El umbral debe estar entre 0 y 100"));
        }

        let bins = self.repository.list_needing_pickup(threshold).await?;
        Ok(bins.into_iter().map(BinResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateBinRequest,
    ) -> Result<ApiResponse<BinResponse>, AppError> {
        request.validate()?;

        let bin = self
            .repository
            .update(
                id,
                request.address,
                request.lat,
                request.lng,
                request.capacity_liters,
                request.waste_type,
                request.status,
                request.sensor_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            bin.into(),
            "Contenedor actualizado exitosamente".to_string(),
        ))
    }

    /// Predicción del instante de llenado (90%) por extrapolación lineal
    /// sobre la ventana reciente de lecturas. predicted_full = None es un
    /// resultado válido, no un error.
    pub async fn predicted_full(&self, id: Uuid) -> Result<PredictedFullResponse, AppError> {
        let bin = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contenedor no encontrado".to_string()))?;

        let readings = self
            .repository
            .recent_readings(bin.id, MAX_READINGS as i64)
            .await?;

        let samples: Vec<ReadingSample> = readings
            .into_iter()
            .map(|r| ReadingSample {
                fill_level: r.fill_level,
                timestamp: r.timestamp,
            })
            .collect();

        let predicted = predict_full(bin.fill_level, &samples, Utc::now());

        Ok(PredictedFullResponse {
            bin_id: bin.id,
            current_fill: bin.fill_level,
            predicted_full: predicted,
        })
    }
}

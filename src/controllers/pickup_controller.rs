//! Controller de Pickups
//!
//! Operaciones collect/skip del conductor. Ambos estados son terminales:
//! un pickup recogido o saltado nunca vuelve a pending.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::route_dto::{CollectPickupRequest, CollectPickupResponse, SkipPickupResponse};
use crate::repositories::bin_repository::BinRepository;
use crate::repositories::pickup_repository::PickupRepository;
use crate::utils::errors::AppError;

pub struct PickupController {
    pickups: PickupRepository,
    bins: BinRepository,
}

impl PickupController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pickups: PickupRepository::new(pool.clone()),
            bins: BinRepository::new(pool),
        }
    }

    /// Marcar un pickup como recogido.
    ///
    /// Contrato: (1) leer el nivel actual del contenedor, (2) marcar el
    /// pickup collected con collected_at y el nivel leído como snapshot,
    /// (3) resetear el contenedor a 0 y sellar last_pickup. Los tres pasos
    /// no van bajo un lock común: una telemetría concurrente entre (1) y
    /// (3) sigue la semántica last-write-wins.
    pub async fn collect(
        &self,
        pickup_id: Uuid,
        request: CollectPickupRequest,
    ) -> Result<CollectPickupResponse, AppError> {
        request.validate()?;

        let pickup = self
            .pickups
            .find_by_id(pickup_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pickup no encontrado".to_string()))?;

        if pickup.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "El pickup ya está en estado terminal: {:?}",
                pickup.status
            )));
        }

        if pickup.bin_id != request.bin_id {
            return Err(AppError::BadRequest(
                "El contenedor no corresponde a este pickup".to_string(),
            ));
        }

        let bin = self
            .bins
            .find_by_id(request.bin_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contenedor no encontrado".to_string()))?;

        let fill_level_at_pickup = bin.fill_level;
        let now = Utc::now();

        self.pickups
            .mark_collected(pickup.id, now, fill_level_at_pickup, request.photo_url)
            .await?;

        self.bins.reset_after_collection(bin.id, now).await?;

        log::info!(
            "✅ Pickup {} recogido (contenedor {} al {}%)",
            pickup.id,
            bin.id,
            fill_level_at_pickup
        );

        Ok(CollectPickupResponse {
            pickup_id: pickup.id,
            fill_level_at_pickup,
        })
    }

    /// Marcar un pickup como saltado (terminal)
    pub async fn skip(&self, pickup_id: Uuid) -> Result<SkipPickupResponse, AppError> {
        let pickup = self
            .pickups
            .find_by_id(pickup_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pickup no encontrado".to_string()))?;

        if pickup.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "El pickup ya está en estado terminal: {:?}",
                pickup.status
            )));
        }

        let pickup = self.pickups.mark_skipped(pickup.id).await?;
        log::info!("⏭️ Pickup {} saltado", pickup.id);

        Ok(SkipPickupResponse {
            pickup_id: pickup.id,
            status: pickup.status,
        })
    }
}

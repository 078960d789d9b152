//! Modelo de Route
//!
//! Este módulo contiene el struct Route y su máquina de estados.
//! Una ruta se crea atómicamente con sus pickups; si la inserción de
//! pickups falla, la ruta se elimina (acción compensatoria).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la ruta - mapea al ENUM route_status
///
/// Transiciones válidas: pending --start--> in_progress --complete--> completed.
/// No hay transiciones hacia atrás ni salida de 'completed'.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "route_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Pending,
    InProgress,
    Completed,
}

impl RouteStatus {
    /// Verificar si la transición a 'next' es válida
    pub fn can_transition_to(self, next: RouteStatus) -> bool {
        matches!(
            (self, next),
            (RouteStatus::Pending, RouteStatus::InProgress)
                | (RouteStatus::InProgress, RouteStatus::Completed)
        )
    }
}

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub status: RouteStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(RouteStatus::Pending.can_transition_to(RouteStatus::InProgress));
        assert!(RouteStatus::InProgress.can_transition_to(RouteStatus::Completed));
    }

    #[test]
    fn test_no_backward_transitions() {
        assert!(!RouteStatus::InProgress.can_transition_to(RouteStatus::Pending));
        assert!(!RouteStatus::Completed.can_transition_to(RouteStatus::Pending));
        assert!(!RouteStatus::Completed.can_transition_to(RouteStatus::InProgress));
    }

    #[test]
    fn test_no_skipping_states() {
        assert!(!RouteStatus::Pending.can_transition_to(RouteStatus::Completed));
    }

    #[test]
    fn test_no_self_transitions() {
        assert!(!RouteStatus::Pending.can_transition_to(RouteStatus::Pending));
        assert!(!RouteStatus::InProgress.can_transition_to(RouteStatus::InProgress));
        assert!(!RouteStatus::Completed.can_transition_to(RouteStatus::Completed));
    }
}

//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod bin;
pub mod driver_location;
pub mod pickup;
pub mod route;
pub mod sensor_reading;

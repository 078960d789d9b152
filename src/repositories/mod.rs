//! Repositorios de acceso a datos
//!
//! Un repositorio por entidad, cada uno con su PgPool inyectado. El store
//! externo es el único punto de bloqueo del sistema; los fallos se
//! propagan inmediatamente al llamador sin reintentos.

pub mod bin_repository;
pub mod driver_location_repository;
pub mod pickup_repository;
pub mod route_repository;

//! DTOs de la API

pub mod bin_dto;
pub mod location_dto;
pub mod route_dto;
pub mod telemetry_dto;

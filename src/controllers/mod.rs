//! Controllers con la lógica de negocio de cada recurso

pub mod bin_controller;
pub mod location_controller;
pub mod pickup_controller;
pub mod route_controller;
pub mod telemetry_controller;

//! Servicios de dominio
//!
//! Los dos algoritmos del núcleo son funciones puras sin estado: seguras
//! ante cualquier número de llamadores concurrentes.

pub mod fill_prediction;
pub mod route_generation;

pub mod bin_routes;
pub mod location_routes;
pub mod pickup_routes;
pub mod route_routes;
pub mod telemetry_routes;

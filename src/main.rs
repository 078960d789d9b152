mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🗑️ Waste Routing - Gestión de recogida de contenedores");
    info!("======================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Base de datos conectada");

    // CORS: orígenes específicos si están configurados, permisivo en desarrollo
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/bins", routes::bin_routes::create_bin_router())
        .nest("/api/routes", routes::route_routes::create_route_router())
        .nest("/api/pickups", routes::pickup_routes::create_pickup_router())
        .nest("/api/telemetry", routes::telemetry_routes::create_telemetry_router())
        .nest("/api/driver-location", routes::location_routes::create_location_router())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🗑️ Endpoints - Bins:");
    info!("   POST /api/bins - Registrar contenedor");
    info!("   GET  /api/bins - Listar contenedores");
    info!("   GET  /api/bins/needing-pickup - Candidatos a recogida");
    info!("   GET  /api/bins/:id - Obtener contenedor");
    info!("   PUT  /api/bins/:id - Actualizar contenedor");
    info!("   GET  /api/bins/:id/predicted-full - Predicción de llenado");
    info!("🚛 Endpoints - Routes:");
    info!("   POST /api/routes - Crear ruta (vecino más cercano)");
    info!("   GET  /api/routes - Listar rutas recientes");
    info!("   GET  /api/routes/:id - Detalle de ruta con paradas");
    info!("   POST /api/routes/:id/start - Iniciar ruta");
    info!("   POST /api/routes/:id/complete - Completar ruta");
    info!("📦 Endpoints - Pickups:");
    info!("   POST /api/pickups/:id/collect - Marcar recogido");
    info!("   POST /api/pickups/:id/skip - Saltar parada");
    info!("📡 Endpoints - Telemetría:");
    info!("   POST /api/telemetry - Ingresar lectura de sensor");
    info!("   POST /api/telemetry/batch - Ingresar lote de lecturas");
    info!("   GET  /api/telemetry - Health check de telemetría");
    info!("📍 Endpoints - Posición de conductor:");
    info!("   POST /api/driver-location - Reportar posición");
    info!("   GET  /api/driver-location/:route_id - Posiciones por ruta");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::Error::from(e)
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "waste-routing",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}

//! Simulador de sensores IoT
//!
//! Alimenta el endpoint de telemetría con contenedores que se van llenando
//! gradualmente y que de vez en cuando se "recogen" (reset a 0).
//!
//! Uso:
//!   cargo run --bin simulate_sensors
//!
//! Variables de entorno:
//!   API_URL  - URL base de la API (por defecto http://localhost:3000)
//!   API_KEY  - Clave de telemetría (opcional)
//!   INTERVAL - Intervalo entre iteraciones en ms (por defecto 5000)

use std::collections::HashMap;
use std::time::Duration;

use rand::Rng;
use serde_json::json;

const SENSOR_COUNT: usize = 15;

#[derive(Debug, Clone)]
struct SensorState {
    fill_level: i32,
    battery_level: i32,
}

fn initialize_sensors() -> HashMap<String, SensorState> {
    let mut rng = rand::thread_rng();
    let mut states = HashMap::new();

    for i in 1..=SENSOR_COUNT {
        states.insert(
            format!("SENSOR-{:03}", i),
            SensorState {
                fill_level: rng.gen_range(10..=70),
                battery_level: rng.gen_range(70..=100),
            },
        );
    }

    println!("Inicializados {} sensores", SENSOR_COUNT);
    states
}

fn simulate_update(state: &mut SensorState, sensor_id: &str) {
    let mut rng = rand::thread_rng();

    // El nivel sube con el tiempo (acumulación de residuos)
    let fill_increase = rng.gen_range(1..=8);
    state.fill_level = (state.fill_level + fill_increase).min(100);

    // Recogida ocasional (10% de probabilidad si el nivel supera 80%)
    if state.fill_level > 80 && rng.gen_bool(0.1) {
        println!("🗑️  {} recogido! Nivel reseteado a 0%", sensor_id);
        state.fill_level = 0;
    }

    // La batería se agota lentamente
    if rng.gen_bool(0.1) {
        state.battery_level = (state.battery_level - 1).max(0);
    }
}

async fn send_telemetry(
    client: &reqwest::Client,
    api_url: &str,
    api_key: &str,
    sensor_id: &str,
    state: &SensorState,
) -> bool {
    let payload = json!({
        "sensor_id": sensor_id,
        "fill_level": state.fill_level,
        "battery_level": state.battery_level,
    });

    let mut request = client
        .post(format!("{}/api/telemetry", api_url))
        .json(&payload);

    if !api_key.is_empty() {
        request = request.header("x-api-key", api_key);
    }

    match request.send().await {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            eprintln!("❌ {}: {} - {}", sensor_id, status, body);
            false
        }
        Err(e) => {
            eprintln!("❌ {}: Error de red - {}", sensor_id, e);
            false
        }
    }
}

fn fill_bar(fill_level: i32) -> String {
    let filled = (fill_level / 10) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

#[tokio::main]
async fn main() {
    let api_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let api_key = std::env::var("API_KEY").unwrap_or_default();
    let interval_ms: u64 = std::env::var("INTERVAL")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);

    println!("📡 Simulador de sensores IoT");
    println!("   API URL:   {}", api_url);
    println!("   Intervalo: {}ms", interval_ms);
    println!("   Sensores:  {}", SENSOR_COUNT);
    println!();

    let mut states = initialize_sensors();
    let client = reqwest::Client::new();
    let mut iteration = 0u64;

    loop {
        iteration += 1;

        // Subconjunto aleatorio de sensores (no todos reportan a la vez)
        let mut sensors_to_update: Vec<String> = {
            let mut rng = rand::thread_rng();
            states
                .keys()
                .filter(|_| rng.gen_bool(0.4))
                .cloned()
                .collect()
        };

        if sensors_to_update.is_empty() {
            if let Some(any) = states.keys().next().cloned() {
                sensors_to_update.push(any);
            }
        }

        println!(
            "\nIteración {} - Actualizando {} sensores",
            iteration,
            sensors_to_update.len()
        );

        let mut success_count = 0;
        for sensor_id in &sensors_to_update {
            if let Some(state) = states.get_mut(sensor_id) {
                simulate_update(state, sensor_id);
                let state_snapshot = state.clone();

                if send_telemetry(&client, &api_url, &api_key, sensor_id, &state_snapshot).await {
                    success_count += 1;
                    let color = if state_snapshot.fill_level > 80 {
                        "🔴"
                    } else if state_snapshot.fill_level > 50 {
                        "🟡"
                    } else {
                        "🟢"
                    };
                    println!(
                        "  {} {}: {} {}% | 🔋 {}%",
                        color,
                        sensor_id,
                        fill_bar(state_snapshot.fill_level),
                        state_snapshot.fill_level,
                        state_snapshot.battery_level
                    );
                }
            }
        }

        println!("  ✅ {}/{} lecturas enviadas", success_count, sensors_to_update.len());

        tokio::time::sleep(Duration::from_millis(interval_ms)).await;
    }
}

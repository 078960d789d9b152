//! Servicio de predicción de llenado
//!
//! Extrapolación lineal sobre una ventana reciente de lecturas, no una
//! regresión estadística: se ignoran las lecturas más allá de la ventana
//! de 24 muestras y cualquier pendiente positiva por encima del umbral de
//! ruido se considera válida, incluso con solo 3 puntos.

use chrono::{DateTime, Duration, Utc};

/// Nivel objetivo de llenado para la predicción
pub const PREDICTION_TARGET_FILL: i32 = 90;
/// Mínimo de lecturas para tener señal
pub const MIN_READINGS: usize = 3;
/// Ventana de lecturas recientes consideradas
pub const MAX_READINGS: usize = 24;
/// Tasa mínima en %/hora; por debajo se trata como ruido
pub const MIN_RATE_PER_HOUR: f64 = 0.5;
/// Lapso mínimo de la ventana, en horas
const MIN_TIMESPAN_HOURS: f64 = 0.01;

/// Muestra histórica de una lectura de sensor
#[derive(Debug, Clone)]
pub struct ReadingSample {
    pub fill_level: i32,
    pub timestamp: DateTime<Utc>,
}

/// Calcular el instante estimado en que el contenedor alcanzará el nivel
/// objetivo, a partir de sus lecturas históricas ordenadas de más reciente
/// a más antigua (tal como las devuelve el repositorio).
///
/// Devuelve None ("sin predicción") cuando:
/// - el nivel actual ya está en o por encima del objetivo,
/// - hay menos de 3 lecturas,
/// - el lapso de la ventana es degenerado (< 0.01 h),
/// - la tasa es plana, decreciente o inferior al umbral de ruido.
///
/// None es un resultado válido, no un error.
pub fn predict_full(
    current_fill: i32,
    readings_desc: &[ReadingSample],
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if current_fill >= PREDICTION_TARGET_FILL {
        return None;
    }

    let window = &readings_desc[..readings_desc.len().min(MAX_READINGS)];
    if window.len() < MIN_READINGS {
        return None;
    }

    // La ventana llega de más reciente a más antigua; cronológicamente el
    // primero es el último elemento
    let first = &window[window.len() - 1];
    let last = &window[0];

    let time_span_hours =
        (last.timestamp - first.timestamp).num_milliseconds() as f64 / 3_600_000.0;
    if time_span_hours < MIN_TIMESPAN_HOURS {
        return None;
    }

    let fill_delta = (last.fill_level - first.fill_level) as f64;
    let rate_per_hour = fill_delta / time_span_hours;

    if rate_per_hour < MIN_RATE_PER_HOUR {
        return None;
    }

    let hours_to_target = (PREDICTION_TARGET_FILL - current_fill) as f64 / rate_per_hour;
    let millis = (hours_to_target * 3_600_000.0).round() as i64;
    Some(now + Duration::milliseconds(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(fill_level: i32, hours_ago: f64, now: DateTime<Utc>) -> ReadingSample {
        ReadingSample {
            fill_level,
            timestamp: now - Duration::milliseconds((hours_ago * 3_600_000.0) as i64),
        }
    }

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_no_prediction_at_or_above_target() {
        let now = test_now();
        let readings = vec![
            sample(85, 0.0, now),
            sample(70, 2.0, now),
            sample(55, 4.0, now),
        ];
        assert_eq!(predict_full(95, &readings, now), None);
        assert_eq!(predict_full(90, &readings, now), None);
    }

    #[test]
    fn test_no_prediction_with_fewer_than_three_readings() {
        let now = test_now();
        let readings = vec![sample(60, 0.0, now), sample(30, 4.0, now)];
        assert_eq!(predict_full(60, &readings, now), None);
    }

    #[test]
    fn test_linear_extrapolation_example() {
        // Cronológicamente: fill 40 en t=0h, 52 en t=2h, 64 en t=4h;
        // tasa = 6 %/h; con nivel actual 64 → (90-64)/6 = 4.3333 h
        let now = test_now();
        let readings = vec![
            sample(64, 0.0, now),
            sample(52, 2.0, now),
            sample(40, 4.0, now),
        ];
        let predicted = predict_full(64, &readings, now).expect("should predict");

        let expected = now + Duration::milliseconds((26.0 / 6.0 * 3_600_000.0) as i64);
        let delta = (predicted - expected).num_seconds().abs();
        assert!(delta <= 1, "predicted {} expected {}", predicted, expected);
    }

    #[test]
    fn test_no_prediction_for_degenerate_time_span() {
        let now = test_now();
        let readings = vec![
            sample(64, 0.0, now),
            sample(52, 0.0, now),
            sample(40, 0.0, now),
        ];
        assert_eq!(predict_full(64, &readings, now), None);
    }

    #[test]
    fn test_no_prediction_for_decreasing_fill() {
        let now = test_now();
        let readings = vec![
            sample(20, 0.0, now),
            sample(40, 2.0, now),
            sample(60, 4.0, now),
        ];
        assert_eq!(predict_full(20, &readings, now), None);
    }

    #[test]
    fn test_no_prediction_below_noise_floor() {
        // 1% en 4 horas = 0.25 %/h, por debajo del umbral de 0.5
        let now = test_now();
        let readings = vec![
            sample(51, 0.0, now),
            sample(50, 2.0, now),
            sample(50, 4.0, now),
        ];
        assert_eq!(predict_full(51, &readings, now), None);
    }

    #[test]
    fn test_rate_exactly_at_noise_floor_predicts() {
        // 2% en 4 horas = 0.5 %/h, justo en el umbral
        let now = test_now();
        let readings = vec![
            sample(52, 0.0, now),
            sample(51, 2.0, now),
            sample(50, 4.0, now),
        ];
        let predicted = predict_full(52, &readings, now).expect("0.5 %/h is valid");
        assert!(predicted > now);
    }

    #[test]
    fn test_window_capped_to_recent_readings() {
        // 30 lecturas: las 24 recientes suben de forma constante; las 6 más
        // antiguas marcan 100, lo que daría pendiente negativa si entraran
        // en la ventana
        let now = test_now();
        let mut readings = Vec::new();
        for i in 0..24 {
            readings.push(sample(80 - i, i as f64, now));
        }
        for i in 24..30 {
            readings.push(sample(100, i as f64, now));
        }

        let predicted = predict_full(80, &readings, now);
        assert!(predicted.is_some(), "old out-of-window readings must be ignored");
    }
}

//! Utilidades de geodesia
//!
//! Distancia de círculo máximo (Haversine) entre coordenadas GPS.

/// Radio de la Tierra en metros
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distancia Haversine entre dos coordenadas, en metros.
///
/// Coordenadas fuera de lat ∈ [-90, 90] / lng ∈ [-180, 180] deben
/// rechazarse antes con `validate_coordinates`; aquí no se valida.
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let d = haversine_distance(48.8566, 2.3522, 48.8566, 2.3522);
        assert!(d.abs() < 1e-9, "distance to self should be 0, got {}", d);
    }

    #[test]
    fn test_symmetric() {
        let d1 = haversine_distance(48.8566, 2.3522, 45.764, 4.8357);
        let d2 = haversine_distance(45.764, 4.8357, 48.8566, 2.3522);
        assert!((d1 - d2).abs() < 1e-6, "haversine should be symmetric");
    }

    #[test]
    fn test_known_distance() {
        // París (48.8566, 2.3522) a Lyon (45.764, 4.8357) ≈ 392 km
        let d = haversine_distance(48.8566, 2.3522, 45.764, 4.8357);
        assert!(d > 380_000.0 && d < 405_000.0, "Paris-Lyon should be ~392km, got {}m", d);
    }

    #[test]
    fn test_monotonic_with_separation() {
        // Sobre el mismo meridiano, más separación angular = más distancia
        let near = haversine_distance(0.0, 0.0, 0.0, 1.0);
        let mid = haversine_distance(0.0, 0.0, 0.0, 2.0);
        let far = haversine_distance(0.0, 0.0, 0.0, 3.0);
        assert!(near < mid && mid < far);
    }

    #[test]
    fn test_one_degree_latitude() {
        // Un grado de latitud ≈ 111.2 km
        let d = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!(d > 110_000.0 && d < 112_500.0, "1° lat should be ~111km, got {}m", d);
    }
}

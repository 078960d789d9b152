//! Servicio de generación de rutas
//!
//! Construcción de recorridos por vecino más cercano (greedy) a partir de
//! un conjunto de contenedores candidatos y un depósito de salida. Función
//! pura: sin estado oculto y sin I/O, segura para cualquier número de
//! llamadores concurrentes.

use uuid::Uuid;

use crate::utils::geo::haversine_distance;

/// Contenedor candidato para el recorrido
#[derive(Debug, Clone)]
pub struct BinForRouting {
    pub id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub fill_level: i32,
}

/// Una parada del recorrido generado
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub bin_id: Uuid,
    pub order_index: i32,
    pub lat: f64,
    pub lng: f64,
}

/// Generar el recorrido por vecino más cercano.
///
/// Empezando en el depósito, en cada paso se elige el contenedor no
/// visitado a menor distancia Haversine; los empates se resuelven por
/// orden de aparición en la entrada (gana el primero), lo que hace el
/// resultado determinista para una entrada fija. Ids duplicados colapsan
/// en una sola visita (limitación documentada). O(n²) comparaciones:
/// suficiente para conjuntos de candidatos de pocos cientos.
pub fn generate_route(bins: &[BinForRouting], depot_lat: f64, depot_lng: f64) -> Vec<RouteStop> {
    // Ids duplicados: se conserva la primera aparición
    let mut unvisited: Vec<&BinForRouting> = Vec::with_capacity(bins.len());
    for bin in bins {
        if !unvisited.iter().any(|b| b.id == bin.id) {
            unvisited.push(bin);
        }
    }

    let mut route = Vec::with_capacity(unvisited.len());
    let mut current_lat = depot_lat;
    let mut current_lng = depot_lng;
    let mut order_index = 0;

    while !unvisited.is_empty() {
        let mut nearest_pos = 0;
        let mut min_distance = f64::INFINITY;

        for (pos, bin) in unvisited.iter().enumerate() {
            let distance = haversine_distance(current_lat, current_lng, bin.lat, bin.lng);
            if distance < min_distance {
                min_distance = distance;
                nearest_pos = pos;
            }
        }

        let bin = unvisited.remove(nearest_pos);
        route.push(RouteStop {
            bin_id: bin.id,
            order_index,
            lat: bin.lat,
            lng: bin.lng,
        });
        order_index += 1;
        current_lat = bin.lat;
        current_lng = bin.lng;
    }

    route
}

/// Filtrar contenedores por umbral de llenado y generar el recorrido
pub fn generate_route_for_high_fill(
    bins: &[BinForRouting],
    fill_threshold: i32,
    depot_lat: f64,
    depot_lng: f64,
) -> Vec<RouteStop> {
    let high_fill: Vec<BinForRouting> = bins
        .iter()
        .filter(|bin| bin.fill_level >= fill_threshold)
        .cloned()
        .collect();
    generate_route(&high_fill, depot_lat, depot_lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin_at(lat: f64, lng: f64, fill_level: i32) -> BinForRouting {
        BinForRouting {
            id: Uuid::new_v4(),
            lat,
            lng,
            fill_level,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_route() {
        let route = generate_route(&[], 0.0, 0.0);
        assert!(route.is_empty());
    }

    #[test]
    fn test_nearest_first_ordering() {
        // Depósito (0,0); A(0,1), B(0,3), C(0,2) → orden esperado A, C, B
        let a = bin_at(0.0, 1.0, 80);
        let b = bin_at(0.0, 3.0, 80);
        let c = bin_at(0.0, 2.0, 80);
        let bins = vec![a.clone(), b.clone(), c.clone()];

        let route = generate_route(&bins, 0.0, 0.0);

        assert_eq!(route.len(), 3);
        assert_eq!(route[0].bin_id, a.id);
        assert_eq!(route[1].bin_id, c.id);
        assert_eq!(route[2].bin_id, b.id);
    }

    #[test]
    fn test_order_index_is_contiguous() {
        let bins = vec![
            bin_at(40.41, -3.70, 90),
            bin_at(40.42, -3.71, 85),
            bin_at(40.40, -3.69, 70),
            bin_at(40.43, -3.72, 95),
        ];
        let route = generate_route(&bins, 40.0, -3.5);

        assert_eq!(route.len(), bins.len());
        for (i, stop) in route.iter().enumerate() {
            assert_eq!(stop.order_index, i as i32);
        }
    }

    #[test]
    fn test_every_bin_visited_exactly_once() {
        let bins = vec![
            bin_at(40.41, -3.70, 90),
            bin_at(40.42, -3.71, 85),
            bin_at(40.40, -3.69, 70),
        ];
        let route = generate_route(&bins, 40.0, -3.5);

        let mut visited: Vec<Uuid> = route.iter().map(|s| s.bin_id).collect();
        visited.sort();
        visited.dedup();
        assert_eq!(visited.len(), bins.len());
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let bins = vec![
            bin_at(40.41, -3.70, 90),
            bin_at(40.42, -3.71, 85),
            bin_at(40.40, -3.69, 70),
            bin_at(40.43, -3.72, 95),
        ];
        let first = generate_route(&bins, 40.0, -3.5);
        let second = generate_route(&bins, 40.0, -3.5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tie_broken_by_input_order() {
        // X(0,1) e Y(0,-1) equidistan del depósito: gana el primero de la entrada
        let x = bin_at(0.0, 1.0, 80);
        let y = bin_at(0.0, -1.0, 80);

        let route = generate_route(&[x.clone(), y.clone()], 0.0, 0.0);
        assert_eq!(route[0].bin_id, x.id);
        assert_eq!(route[1].bin_id, y.id);

        let route_reversed = generate_route(&[y.clone(), x.clone()], 0.0, 0.0);
        assert_eq!(route_reversed[0].bin_id, y.id);
        assert_eq!(route_reversed[1].bin_id, x.id);
    }

    #[test]
    fn test_duplicate_ids_collapse_to_one_visit() {
        let a = bin_at(0.0, 1.0, 80);
        let duplicate = BinForRouting {
            id: a.id,
            lat: 0.0,
            lng: 2.0,
            fill_level: 80,
        };
        let route = generate_route(&[a.clone(), duplicate], 0.0, 0.0);

        assert_eq!(route.len(), 1);
        assert_eq!(route[0].bin_id, a.id);
        // Se conserva la posición de la primera aparición
        assert_eq!(route[0].lng, 1.0);
    }

    #[test]
    fn test_high_fill_filter() {
        let full = bin_at(0.0, 1.0, 95);
        let half = bin_at(0.0, 2.0, 50);
        let route = generate_route_for_high_fill(&[full.clone(), half], 80, 0.0, 0.0);

        assert_eq!(route.len(), 1);
        assert_eq!(route[0].bin_id, full.id);
    }
}

/*!
Fixtures déterministes pour les tests Skymesh.

Toutes les valeurs sont fixes : un test qui utilise ces flottes rejoue
exactement le même scénario à chaque exécution.
*/

use skymesh_kernel::models::{FlightPath, Node, NodeKind, NodeStatus, PathKind};
use skymesh_kernel::state::SimContext;
use time::OffsetDateTime;

/// Instant de référence commun à toutes les fixtures
pub fn epoch() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("valid fixture timestamp")
}

pub fn drone(id: u32, x: f64, y: f64) -> Node {
    Node {
        id,
        name: format!("Node {}", id),
        kind: NodeKind::Drone,
        status: NodeStatus::Online,
        x,
        y,
        battery_level: 80,
        signal_strength: -50,
        connected_clients: 8,
    }
}

pub fn ground_station(id: u32, x: f64, y: f64) -> Node {
    Node {
        id,
        name: format!("Node {}", id),
        kind: NodeKind::Ground,
        status: NodeStatus::Online,
        x,
        y,
        battery_level: 100,
        signal_strength: -45,
        connected_clients: 25,
    }
}

pub fn solar_relay(id: u32, x: f64, y: f64) -> Node {
    Node {
        id,
        name: format!("Node {}", id),
        kind: NodeKind::Solar,
        status: NodeStatus::Online,
        x,
        y,
        battery_level: 65,
        signal_strength: -70,
        connected_clients: 5,
    }
}

/// Trajectoire linéaire de 100 unités vers l'est, vitesse 10 u/s
pub fn linear_path(id: u32, node_id: u32) -> FlightPath {
    FlightPath {
        id,
        node_id,
        kind: PathKind::Linear,
        start_x: 100.0,
        start_y: 100.0,
        end_x: 200.0,
        end_y: 100.0,
        speed: 10.0,
        start_time: epoch(),
        active: true,
    }
}

/// Révolution autour de (300, 300), un radian par seconde
pub fn circular_path(id: u32, node_id: u32) -> FlightPath {
    FlightPath {
        id,
        node_id,
        kind: PathKind::Circular,
        start_x: 300.0,
        start_y: 300.0,
        end_x: 300.0,
        end_y: 300.0,
        speed: 1.0,
        start_time: epoch(),
        active: true,
    }
}

/// Jitter borné autour de (500, 500)
pub fn random_path(id: u32, node_id: u32) -> FlightPath {
    FlightPath {
        id,
        node_id,
        kind: PathKind::Random,
        start_x: 500.0,
        start_y: 500.0,
        end_x: 500.0,
        end_y: 500.0,
        speed: 2.0,
        start_time: epoch(),
        active: true,
    }
}

/// Flotte de référence : 10 nœuds dont 3 drones (un par type de trajectoire)
pub fn small_fleet() -> (Vec<Node>, Vec<FlightPath>) {
    let nodes = vec![
        drone(1, 100.0, 100.0),
        drone(2, 300.0, 300.0),
        drone(3, 500.0, 500.0),
        ground_station(4, 50.0, 50.0),
        ground_station(5, 950.0, 50.0),
        ground_station(6, 50.0, 950.0),
        ground_station(7, 950.0, 950.0),
        solar_relay(8, 200.0, 800.0),
        solar_relay(9, 800.0, 200.0),
        solar_relay(10, 500.0, 900.0),
    ];
    let paths = vec![
        linear_path(1, 1),
        circular_path(2, 2),
        random_path(3, 3),
    ];
    (nodes, paths)
}

/// La flotte de référence, déjà validée
pub fn small_context() -> SimContext {
    let (nodes, paths) = small_fleet();
    SimContext::new(nodes, paths).expect("reference fleet is always coherent")
}

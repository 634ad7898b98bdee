//! Génération de la flotte au démarrage.
//!
//! Mêmes plages que le schéma d'origine, mais tirées d'un générateur
//! ensemencé : une graine donnée produit toujours la même flotte.

use crate::models::{FlightPath, Node, NodeKind, NodeStatus, PathKind};
use crate::state::{FleetError, SimContext};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use time::OffsetDateTime;

const NODE_KINDS: [NodeKind; 3] = [NodeKind::Drone, NodeKind::Ground, NodeKind::Solar];
const NODE_STATUSES: [NodeStatus; 3] =
    [NodeStatus::Online, NodeStatus::Offline, NodeStatus::Maintenance];
const PATH_KINDS: [PathKind; 3] = [PathKind::Linear, PathKind::Circular, PathKind::Random];

/// Construit et valide une flotte de `count` nœuds.
///
/// Chaque drone reçoit une trajectoire active démarrant à `started_at`
/// depuis sa position initiale.
pub fn generate_fleet(
    count: u32,
    seed: u64,
    started_at: OffsetDateTime,
) -> Result<SimContext, FleetError> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);

    let nodes: Vec<Node> = (1..=count)
        .map(|id| Node {
            id,
            name: format!("Node {}", id),
            kind: NODE_KINDS[rng.gen_range(0..NODE_KINDS.len())],
            status: NODE_STATUSES[rng.gen_range(0..NODE_STATUSES.len())],
            x: rng.gen::<f64>() * 1000.0,
            y: rng.gen::<f64>() * 1000.0,
            battery_level: rng.gen_range(0..100),
            signal_strength: -rng.gen_range(40..100),
            connected_clients: rng.gen_range(0..50),
        })
        .collect();

    let paths: Vec<FlightPath> = nodes
        .iter()
        .filter(|n| n.is_drone())
        .map(|n| FlightPath {
            id: n.id,
            node_id: n.id,
            kind: PATH_KINDS[rng.gen_range(0..PATH_KINDS.len())],
            start_x: n.x,
            start_y: n.y,
            end_x: n.x + rng.gen::<f64>() * 200.0 - 100.0,
            end_y: n.y + rng.gen::<f64>() * 200.0 - 100.0,
            speed: 1.0 + rng.gen::<f64>() * 4.0,
            start_time: started_at,
            active: true,
        })
        .collect();

    SimContext::new(nodes, paths)
}

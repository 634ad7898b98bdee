use crate::models::{FlightPath, Node};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

pub type Shared<T> = Arc<Mutex<T>>;

pub fn new_state<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// Erreurs de cohérence de la flotte, toutes fatales au démarrage
#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("Drone node {0} has no active flight path")]
    MissingPath(u32),
    #[error("Flight path {path_id} references unknown node {node_id}")]
    UnknownNode { path_id: u32, node_id: u32 },
    #[error("Flight path {path_id} targets non-drone node {node_id}")]
    NotADrone { path_id: u32, node_id: u32 },
    #[error("Node {0} has more than one active flight path")]
    DuplicatePath(u32),
}

/// Contexte de simulation : la flotte et ses trajectoires.
///
/// Construit une seule fois au démarrage puis partagé en lecture seule
/// via `Arc`. La construction valide les invariants croisés, donc un
/// contexte qui existe est toujours cohérent.
#[derive(Debug)]
pub struct SimContext {
    nodes: Vec<Node>,
    paths: Vec<FlightPath>,
}

impl SimContext {
    pub fn new(nodes: Vec<Node>, paths: Vec<FlightPath>) -> Result<Self, FleetError> {
        let mut claimed: HashSet<u32> = HashSet::new();

        for path in paths.iter().filter(|p| p.active) {
            let node = nodes
                .iter()
                .find(|n| n.id == path.node_id)
                .ok_or(FleetError::UnknownNode { path_id: path.id, node_id: path.node_id })?;
            if !node.is_drone() {
                return Err(FleetError::NotADrone { path_id: path.id, node_id: path.node_id });
            }
            if !claimed.insert(path.node_id) {
                return Err(FleetError::DuplicatePath(path.node_id));
            }
        }

        for node in nodes.iter().filter(|n| n.is_drone()) {
            if !claimed.contains(&node.id) {
                return Err(FleetError::MissingPath(node.id));
            }
        }

        Ok(Self { nodes, paths })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn paths(&self) -> &[FlightPath] {
        &self.paths
    }

    /// Trajectoire active d'un nœud, s'il en a une
    pub fn active_path(&self, node_id: u32) -> Option<&FlightPath> {
        self.paths.iter().find(|p| p.active && p.node_id == node_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeKind, NodeStatus, PathKind};
    use time::OffsetDateTime;

    fn node(id: u32, kind: NodeKind) -> Node {
        Node {
            id,
            name: format!("Node {}", id),
            kind,
            status: NodeStatus::Online,
            x: 100.0,
            y: 100.0,
            battery_level: 80,
            signal_strength: -50,
            connected_clients: 8,
        }
    }

    fn path(id: u32, node_id: u32) -> FlightPath {
        FlightPath {
            id,
            node_id,
            kind: PathKind::Linear,
            start_x: 100.0,
            start_y: 100.0,
            end_x: 200.0,
            end_y: 100.0,
            speed: 10.0,
            start_time: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            active: true,
        }
    }

    #[test]
    fn test_valid_fleet_is_accepted() {
        let nodes = vec![node(1, NodeKind::Drone), node(2, NodeKind::Ground)];
        let paths = vec![path(1, 1)];
        let ctx = SimContext::new(nodes, paths).unwrap();
        assert_eq!(ctx.node_count(), 2);
        assert!(ctx.active_path(1).is_some());
        assert!(ctx.active_path(2).is_none());
    }

    #[test]
    fn test_drone_without_path_is_rejected() {
        let nodes = vec![node(1, NodeKind::Drone)];
        let err = SimContext::new(nodes, vec![]).unwrap_err();
        assert!(matches!(err, FleetError::MissingPath(1)));
    }

    #[test]
    fn test_path_to_unknown_node_is_rejected() {
        let nodes = vec![node(1, NodeKind::Drone)];
        let paths = vec![path(1, 1), path(99, 99)];
        let err = SimContext::new(nodes, paths).unwrap_err();
        assert!(matches!(err, FleetError::UnknownNode { node_id: 99, .. }));
    }

    #[test]
    fn test_path_to_ground_station_is_rejected() {
        let nodes = vec![node(1, NodeKind::Drone), node(2, NodeKind::Ground)];
        let paths = vec![path(1, 1), path(2, 2)];
        let err = SimContext::new(nodes, paths).unwrap_err();
        assert!(matches!(err, FleetError::NotADrone { node_id: 2, .. }));
    }

    #[test]
    fn test_second_active_path_for_same_drone_is_rejected() {
        let nodes = vec![node(1, NodeKind::Drone)];
        let paths = vec![path(1, 1), path(7, 1)];
        let err = SimContext::new(nodes, paths).unwrap_err();
        assert!(matches!(err, FleetError::DuplicatePath(1)));
    }

    #[test]
    fn test_inactive_extra_path_is_tolerated() {
        let nodes = vec![node(1, NodeKind::Drone)];
        let mut spare = path(7, 1);
        spare.active = false;
        let paths = vec![path(1, 1), spare];
        let ctx = SimContext::new(nodes, paths).unwrap();
        assert_eq!(ctx.active_path(1).unwrap().id, 1);
    }
}

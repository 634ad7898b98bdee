/**
 * API REST SKYMESH - Serveur HTTP du kernel de simulation
 *
 * RÔLE :
 * Ce module expose l'état de la flotte simulée au dashboard et aux outils.
 * Interface de lecture seule : la simulation n'est jamais pilotée par HTTP.
 *
 * FONCTIONNEMENT :
 * - Serveur Axum (port 8080 par défaut)
 * - Routes REST : /health, /api/nodes, /api/network-stats,
 *   /api/performance-metrics, /api/coverage, /api/recommendations
 * - /ws : upgrade WebSocket vers le flux temps réel (voir stream.rs)
 * - Réponses JSON en camelCase (contrat du dashboard d'origine)
 *
 * UTILITÉ DANS SKYMESH :
 * 🎯 Dashboard : carte de la flotte, statistiques, heat map
 * 🎯 Debug : inspection ponctuelle sans ouvrir de flux
 */

use crate::broadcast::BroadcastHub;
use crate::metrics::MetricSynthesizer;
use crate::models::{CoveragePoint, MetricSample, NetworkStats, Node, NodeStatus, Recommendation};
use crate::snapshot;
use crate::state::{Shared, SimContext};
use crate::stream;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<SimContext>,
    pub hub: BroadcastHub,
    pub synth: Shared<MetricSynthesizer>,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/nodes", get(get_nodes))
        .route("/api/network-stats", get(get_network_stats))
        .route("/api/performance-metrics", get(get_performance_metrics))
        .route("/api/coverage", get(get_coverage))
        .route("/api/recommendations", get(get_recommendations))
        .route("/ws", get(stream::ws_handler))
        .with_state(app_state)
}

// GET /api/nodes (flotte avec positions de drones rafraîchies)
async fn get_nodes(State(app): State<AppState>) -> Json<Vec<Node>> {
    Json(snapshot::refreshed_nodes(&app.ctx, OffsetDateTime::now_utc()))
}

// GET /api/network-stats (agrégats de la flotte)
async fn get_network_stats(State(app): State<AppState>) -> Json<NetworkStats> {
    Json(compute_stats(app.ctx.nodes()))
}

// GET /api/performance-metrics (un échantillon frais par nœud)
async fn get_performance_metrics(State(app): State<AppState>) -> Json<Vec<MetricSample>> {
    let mut synth = app.synth.lock();
    Json(synth.sample_nodes(app.ctx.nodes().iter().map(|n| n.id)))
}

// GET /api/coverage (100 points pour la carte de chaleur)
async fn get_coverage(State(app): State<AppState>) -> Json<Vec<CoveragePoint>> {
    let mut synth = app.synth.lock();
    Json(synth.coverage(100))
}

// GET /api/recommendations (liste statique d'optimisations)
async fn get_recommendations() -> Json<Vec<Recommendation>> {
    Json(vec![
        Recommendation {
            id: 1,
            kind: "optimization".to_string(),
            description: "Move Node 3 20m northwest to improve coverage".to_string(),
            impact: "15% signal strength improvement".to_string(),
        },
        Recommendation {
            id: 2,
            kind: "addition".to_string(),
            description: "Add relay node at coordinates (450, 670)".to_string(),
            impact: "Cover dead zone in southeast sector".to_string(),
        },
    ])
}

fn compute_stats(nodes: &[Node]) -> NetworkStats {
    let active_nodes = nodes.iter().filter(|n| n.status == NodeStatus::Online).count();
    let total_clients = nodes.iter().map(|n| n.connected_clients as u64).sum();
    let average_signal = if nodes.is_empty() {
        0
    } else {
        let sum: i64 = nodes.iter().map(|n| n.signal_strength as i64).sum();
        (sum as f64 / nodes.len() as f64).round() as i64
    };

    NetworkStats {
        total_nodes: nodes.len(),
        active_nodes,
        total_clients,
        average_signal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlightPath, NodeKind, PathKind};
    use crate::state::new_state;

    fn node(id: u32, kind: NodeKind, status: NodeStatus) -> Node {
        Node {
            id,
            name: format!("Node {}", id),
            kind,
            status,
            x: 100.0,
            y: 100.0,
            battery_level: 80,
            signal_strength: -50,
            connected_clients: 8,
        }
    }

    fn test_app() -> AppState {
        let nodes = vec![
            node(1, NodeKind::Drone, NodeStatus::Online),
            node(2, NodeKind::Ground, NodeStatus::Online),
            node(3, NodeKind::Solar, NodeStatus::Maintenance),
        ];
        let paths = vec![FlightPath {
            id: 1,
            node_id: 1,
            kind: PathKind::Linear,
            start_x: 100.0,
            start_y: 100.0,
            end_x: 200.0,
            end_y: 100.0,
            speed: 10.0,
            start_time: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            active: true,
        }];
        AppState {
            ctx: Arc::new(SimContext::new(nodes, paths).unwrap()),
            hub: BroadcastHub::new(8),
            synth: new_state(MetricSynthesizer::new(3)),
        }
    }

    #[tokio::test]
    async fn test_nodes_route_returns_whole_fleet() {
        let app = test_app();
        let Json(nodes) = get_nodes(State(app.clone())).await;
        assert_eq!(nodes.len(), app.ctx.node_count());
    }

    #[tokio::test]
    async fn test_performance_metrics_cover_every_node() {
        let app = test_app();
        let Json(samples) = get_performance_metrics(State(app.clone())).await;
        assert_eq!(samples.len(), app.ctx.node_count());
        for s in &samples {
            assert!((s.predicted_signal_strength - s.signal_strength).abs() <= 5);
        }
    }

    #[tokio::test]
    async fn test_coverage_returns_one_hundred_points() {
        let Json(points) = get_coverage(State(test_app())).await;
        assert_eq!(points.len(), 100);
    }

    #[tokio::test]
    async fn test_recommendations_are_static_advisories() {
        let Json(recs) = get_recommendations().await;
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].kind, "optimization");
        assert_eq!(recs[1].kind, "addition");
    }

    #[test]
    fn test_stats_aggregate_fleet_counters() {
        let mut a = node(1, NodeKind::Drone, NodeStatus::Online);
        let mut b = node(2, NodeKind::Ground, NodeStatus::Offline);
        let mut c = node(3, NodeKind::Solar, NodeStatus::Online);
        a.connected_clients = 10;
        a.signal_strength = -50;
        b.connected_clients = 20;
        b.signal_strength = -60;
        c.connected_clients = 30;
        c.signal_strength = -70;

        let stats = compute_stats(&[a, b, c]);
        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.active_nodes, 2);
        assert_eq!(stats.total_clients, 60);
        assert_eq!(stats.average_signal, -60);
    }

    #[test]
    fn test_stats_on_empty_fleet_are_all_zero() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_nodes, 0);
        assert_eq!(stats.active_nodes, 0);
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.average_signal, 0);
    }
}

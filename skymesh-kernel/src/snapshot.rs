//! Construction des snapshots réseau.
//!
//! Un snapshot est une vue figée et cohérente de la flotte à un instant
//! donné. Il est construit en entier avant toute diffusion : les
//! observateurs ne voient jamais d'état partiel.

use crate::metrics::MetricSynthesizer;
use crate::models::{NetworkSnapshot, Node};
use crate::motion::position_at;
use crate::state::SimContext;
use time::OffsetDateTime;

/// Flotte avec les positions de drones recalculées à l'instant `at`.
/// Les nœuds fixes gardent leur position de création.
pub fn refreshed_nodes(ctx: &SimContext, at: OffsetDateTime) -> Vec<Node> {
    ctx.nodes()
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if node.is_drone() {
                if let Some(path) = ctx.active_path(node.id) {
                    let pos = position_at(path, at);
                    node.x = pos.x;
                    node.y = pos.y;
                }
            }
            node
        })
        .collect()
}

/// Snapshot complet : nœuds rafraîchis plus un échantillon de métriques
/// par nœud, dans le même ordre que la flotte.
pub fn build_snapshot(
    ctx: &SimContext,
    at: OffsetDateTime,
    synth: &mut MetricSynthesizer,
) -> NetworkSnapshot {
    let nodes = refreshed_nodes(ctx, at);
    let metrics = synth.sample_nodes(nodes.iter().map(|n| n.id));
    NetworkSnapshot { nodes, metrics }
}

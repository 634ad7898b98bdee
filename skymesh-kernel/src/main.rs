/**
 * SKYMESH KERNEL - Point d'entrée du serveur de simulation
 *
 * RÔLE : Orchestration de tous les modules : config, génération de flotte,
 * boucles de diffusion, serveur HTTP/WebSocket. Bootstrap complet avec
 * gestion d'erreurs et logging.
 *
 * ARCHITECTURE : Simulation en mémoire + fan-out broadcast + API REST.
 * UTILITÉ : Point d'administration unique de la flotte simulée.
 */

use anyhow::{Context, Result};
use skymesh_kernel::broadcast::BroadcastHub;
use skymesh_kernel::config::load_config;
use skymesh_kernel::fleet::generate_fleet;
use skymesh_kernel::http::{build_router, AppState};
use skymesh_kernel::metrics::MetricSynthesizer;
use skymesh_kernel::state::new_state;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::net::TcpListener;
use tracing::info;

// Décalages de graine par flux : chaque consommateur tire d'une séquence
// indépendante, toutes dérivées de la graine maîtresse.
const STATE_SEED_OFFSET: u64 = 1;
const METRICS_SEED_OFFSET: u64 = 2;
const ONDEMAND_SEED_OFFSET: u64 = 3;

#[tokio::main]
async fn main() -> Result<()> {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok(); // Ok si .env n'existe pas

    tracing_subscriber::fmt().init();

    let cfg = load_config().await;
    let sim = cfg.simulation.clone();

    // flotte générée et validée : toute incohérence est fatale ici
    let ctx = generate_fleet(sim.node_count, sim.seed, OffsetDateTime::now_utc())
        .context("generated fleet failed validation")?;
    let ctx = Arc::new(ctx);
    info!(
        "🛰️ fleet ready: {} nodes, {} flight paths (seed {})",
        ctx.node_count(),
        ctx.paths().len(),
        sim.seed
    );

    // hub + boucles de diffusion
    let hub = BroadcastHub::new(sim.observer_capacity());
    hub.spawn_state_loop(
        ctx.clone(),
        sim.seed.wrapping_add(STATE_SEED_OFFSET),
        sim.state_period(),
    );
    hub.spawn_metrics_loop(
        ctx.clone(),
        sim.seed.wrapping_add(METRICS_SEED_OFFSET),
        sim.metrics_period(),
    );

    // fabrique l'état unique pour Axum
    let app_state = AppState {
        ctx,
        hub,
        synth: new_state(MetricSynthesizer::new(sim.seed.wrapping_add(ONDEMAND_SEED_OFFSET))),
    };
    let app = build_router(app_state);

    // HTTP
    let addr = cfg.http.bind_addr();
    info!("kernel listening on http://{}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("http server terminated")?;

    Ok(())
}

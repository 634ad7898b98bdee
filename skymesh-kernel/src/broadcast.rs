/**
 * DIFFUSION TEMPS RÉEL - Hub central des observateurs
 *
 * RÔLE :
 * Ce module possède le canal de diffusion vers tous les observateurs
 * WebSocket et fait tourner les deux boucles de tick de la simulation.
 *
 * FONCTIONNEMENT :
 * - Un canal tokio broadcast transporte les trames JSON déjà sérialisées :
 *   un snapshot est construit et sérialisé UNE fois par tick, puis fan-out
 * - Boucle d'état (1s par défaut) : snapshot complet taggé "update"
 * - Boucle métriques (5s par défaut) : échantillons seuls, taggés "metrics"
 * - Registre des observateurs (map verrouillée) pour les logs et compteurs
 *
 * UTILITÉ DANS SKYMESH :
 * ✅ Isolation : un observateur lent ou déconnecté n'affecte pas les autres
 * ✅ Backpressure : canal borné, les retardataires sautent les trames
 *    les plus anciennes au lieu de bloquer le tick
 * ✅ Cohérence : tous les observateurs d'un tick voient le même snapshot
 */

use crate::metrics::MetricSynthesizer;
use crate::models::StreamMessage;
use crate::snapshot;
use crate::state::{new_state, Shared, SimContext};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use tokio::task;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Métadonnées d'un observateur connecté
#[derive(Debug, Clone)]
pub struct ObserverInfo {
    pub connected_at: OffsetDateTime,
}

impl ObserverInfo {
    /// Durée de session écoulée à l'instant donné
    pub fn session_length(&self, now: OffsetDateTime) -> time::Duration {
        now - self.connected_at
    }
}

/// Sérialise un message de flux en trame JSON.
///
/// Un échec ici signifie un état interne corrompu : le processus s'arrête
/// plutôt que de continuer à diffuser du faux.
pub fn encode_frame(message: &StreamMessage) -> String {
    match serde_json::to_string(message) {
        Ok(frame) => frame,
        Err(e) => {
            error!("stream message serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[derive(Clone)]
pub struct BroadcastHub {
    frames: broadcast::Sender<String>,
    observers: Shared<HashMap<Uuid, ObserverInfo>>,
}

impl BroadcastHub {
    pub fn new(capacity: usize) -> Self {
        let (frames, _) = broadcast::channel(capacity);
        Self {
            frames,
            observers: new_state(HashMap::new()),
        }
    }

    /// Récepteur neuf pour un nouvel observateur
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.frames.subscribe()
    }

    pub fn register(&self, id: Uuid, info: ObserverInfo) {
        let mut observers = self.observers.lock();
        observers.insert(id, info);
        info!("📡 observer {} connected ({} active)", id, observers.len());
    }

    pub fn deregister(&self, id: &Uuid) {
        let mut observers = self.observers.lock();
        if let Some(info) = observers.remove(id) {
            let session = info.session_length(OffsetDateTime::now_utc());
            info!(
                "observer {} disconnected after {:.1}s ({} active)",
                id,
                session.as_seconds_f64(),
                observers.len()
            );
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }

    /// Publie une trame déjà sérialisée. Sans observateur la trame est
    /// simplement perdue ; retourne le nombre de récepteurs servis.
    pub fn publish(&self, frame: String) -> usize {
        self.frames.send(frame).unwrap_or(0)
    }

    /// Sérialise puis publie un message de flux
    pub fn publish_message(&self, message: &StreamMessage) -> usize {
        self.publish(encode_frame(message))
    }

    /// Démarre la boucle d'état : un snapshot complet par tick, partagé
    /// par tous les observateurs du même tick.
    pub fn spawn_state_loop(&self, ctx: Arc<SimContext>, seed: u64, period: Duration) {
        let hub = self.clone();
        task::spawn(async move {
            let mut synth = MetricSynthesizer::new(seed);
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let built = snapshot::build_snapshot(&ctx, OffsetDateTime::now_utc(), &mut synth);
                let delivered = hub.publish_message(&StreamMessage::Update(built));
                debug!("state tick delivered to {} observers", delivered);
            }
        });
    }

    /// Démarre la boucle métriques : échantillons seuls, période plus lente
    pub fn spawn_metrics_loop(&self, ctx: Arc<SimContext>, seed: u64, period: Duration) {
        let hub = self.clone();
        task::spawn(async move {
            let mut synth = MetricSynthesizer::new(seed);
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let samples = synth.sample_nodes(ctx.nodes().iter().map(|n| n.id));
                let delivered = hub.publish_message(&StreamMessage::Metrics(samples));
                debug!("metrics tick delivered to {} observers", delivered);
            }
        });
    }
}

/*!
Harnais de flux pour les tests Skymesh.

Branche des observateurs de test sur un hub de diffusion et vérifie la
diffusion telle qu'un client la voit:
- attach/detach avec enregistrement, comme une connexion WebSocket
- décodage des trames JSON en messages typés
- assertions par chemin pointé sur le JSON brut (`data.nodes.0.batteryLevel`)
*/

use anyhow::Result;
use serde_json::Value;
use skymesh_kernel::broadcast::{BroadcastHub, ObserverInfo};
use skymesh_kernel::models::{MetricSample, NetworkSnapshot, StreamMessage};
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::time::timeout;
use uuid::Uuid;

/// Harnais autour d'un hub de diffusion
pub struct StreamHarness {
    hub: BroadcastHub,
}

impl StreamHarness {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        env_logger::try_init().ok(); // init logging pour tests
        Self { hub: BroadcastHub::new(capacity) }
    }

    /// Hub sous test, à passer au code de production
    pub fn hub(&self) -> &BroadcastHub {
        &self.hub
    }

    /// Branche un observateur enregistré, comme le ferait une connexion ws
    pub fn attach_observer(&self) -> TestObserver {
        let id = Uuid::new_v4();
        let frames = self.hub.subscribe();
        self.hub
            .register(id, ObserverInfo { connected_at: OffsetDateTime::now_utc() });
        log::info!("🔌 test observer {} attached", id);
        TestObserver { id, frames, hub: self.hub.clone() }
    }

    pub fn observer_count(&self) -> usize {
        self.hub.observer_count()
    }

    /// Publie un snapshot taggé "update"
    pub fn publish_update(&self, snapshot: NetworkSnapshot) -> usize {
        self.hub.publish_message(&StreamMessage::Update(snapshot))
    }

    /// Publie un lot d'échantillons taggé "metrics"
    pub fn publish_metrics(&self, samples: Vec<MetricSample>) -> usize {
        self.hub.publish_message(&StreamMessage::Metrics(samples))
    }

    pub fn publish_message(&self, message: &StreamMessage) -> usize {
        self.hub.publish_message(message)
    }
}

impl Default for StreamHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Observateur de test : reçoit et décode les trames du hub
pub struct TestObserver {
    id: Uuid,
    frames: Receiver<String>,
    hub: BroadcastHub,
}

impl TestObserver {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Se déconnecte proprement, comptage décrémenté
    pub fn detach(self) {
        self.hub.deregister(&self.id);
        log::info!("🔌 test observer {} detached", self.id);
    }

    /// Prochaine trame JSON brute, None si le délai expire
    pub async fn recv_raw(&mut self, timeout_ms: u64) -> Result<Option<Value>> {
        match self.recv_frame(timeout_ms).await? {
            Some(frame) => Ok(Some(serde_json::from_str(&frame)?)),
            None => Ok(None),
        }
    }

    /// Prochain message décodé, None si le délai expire
    pub async fn recv_message(&mut self, timeout_ms: u64) -> Result<Option<StreamMessage>> {
        match self.recv_frame(timeout_ms).await? {
            Some(frame) => Ok(Some(serde_json::from_str(&frame)?)),
            None => Ok(None),
        }
    }

    /// Collecte `count` messages d'affilée, échoue si le flux s'assèche
    pub async fn collect_messages(
        &mut self,
        count: usize,
        timeout_ms: u64,
    ) -> Result<Vec<StreamMessage>> {
        let mut collected = Vec::with_capacity(count);
        for _ in 0..count {
            match self.recv_message(timeout_ms).await? {
                Some(message) => collected.push(message),
                None => anyhow::bail!("expected {} messages, got {}", count, collected.len()),
            }
        }
        Ok(collected)
    }

    async fn recv_frame(&mut self, timeout_ms: u64) -> Result<Option<String>> {
        let deadline = Duration::from_millis(timeout_ms);
        loop {
            match timeout(deadline, self.frames.recv()).await {
                Ok(Ok(frame)) => return Ok(Some(frame)),
                // en retard : on saute les anciennes trames comme en production
                Ok(Err(RecvError::Lagged(missed))) => {
                    log::warn!("⏰ test observer {} lagged, skipped {}", self.id, missed);
                }
                Ok(Err(RecvError::Closed)) => return Ok(None),
                Err(_) => return Ok(None),
            }
        }
    }
}

/// Valeur à un chemin pointé, index de tableau acceptés.
/// Ex: `data.nodes.0.batteryLevel`
pub fn field_at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Assert qu'un champ existe au chemin donné
pub fn assert_field_exists(value: &Value, path: &str) -> Result<()> {
    if field_at(value, path).is_none() {
        anyhow::bail!("field '{}' not found in frame", path);
    }
    Ok(())
}

/// Assert qu'un champ vaut exactement la valeur attendue
pub fn assert_field_equals(value: &Value, path: &str, expected: &Value) -> Result<()> {
    match field_at(value, path) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => {
            anyhow::bail!("field '{}': expected {:?}, got {:?}", path, expected, actual)
        }
        None => anyhow::bail!("field '{}' not found in frame", path),
    }
}

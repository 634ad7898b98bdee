use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Position dérivée dans l'arène de simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Drone,
    Ground,
    Solar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Offline,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub status: NodeStatus,
    pub x: f64,
    pub y: f64,
    pub battery_level: u8,
    pub signal_strength: i32,
    pub connected_clients: u32,
}

impl Node {
    pub fn is_drone(&self) -> bool {
        self.kind == NodeKind::Drone
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Linear,
    Circular,
    Random,
}

/// Trajectoire d'un drone, lecture seule après création.
/// La position courante est toujours dérivée, jamais stockée.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPath {
    pub id: u32,
    pub node_id: u32,
    pub kind: PathKind,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub speed: f64,
    pub start_time: OffsetDateTime,
    pub active: bool,
}

impl FlightPath {
    pub fn start(&self) -> Point {
        Point { x: self.start_x, y: self.start_y }
    }

    pub fn end(&self) -> Point {
        Point { x: self.end_x, y: self.end_y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub node_id: u32,
    pub signal_strength: i32,
    pub latency: u32,
    pub packet_loss: f64,
    pub throughput: u64,
    pub predicted_signal_strength: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub nodes: Vec<Node>,
    pub metrics: Vec<MetricSample>,
}

/// Messages poussés sur le flux WebSocket, discriminés par `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StreamMessage {
    #[serde(rename = "initialState")]
    InitialState(NetworkSnapshot),
    #[serde(rename = "update")]
    Update(NetworkSnapshot),
    #[serde(rename = "metrics")]
    Metrics(Vec<MetricSample>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub total_nodes: usize,
    pub active_nodes: usize,
    pub total_clients: u64,
    pub average_signal: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoveragePoint {
    pub x: f64,
    pub y: f64,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub impact: String,
}

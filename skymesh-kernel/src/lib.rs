//! Noyau de simulation du réseau mesh Skymesh.
//!
//! Expose les briques de simulation (flotte, trajectoires, métriques,
//! snapshots) et la couche de diffusion (hub broadcast, flux WebSocket,
//! API REST) pour le binaire kernel et le devkit.

pub mod broadcast;
pub mod config;
pub mod fleet;
pub mod http;
pub mod metrics;
pub mod models;
pub mod motion;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod stream;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct KernelConfig {
    pub http: HttpConf,
    pub simulation: SimulationConf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConf {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConf {
    /// Taille de la flotte générée au démarrage
    pub node_count: u32,
    /// Graine maîtresse : flotte et métriques rejouables à l'identique
    pub seed: u64,
    pub state_interval_secs: u64,
    pub metrics_interval_secs: u64,
    /// Trames en attente par observateur avant saut des plus anciennes
    pub observer_buffer: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            http: HttpConf::default(),
            simulation: SimulationConf::default(),
        }
    }
}

impl Default for HttpConf {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8080 }
    }
}

impl Default for SimulationConf {
    fn default() -> Self {
        Self {
            node_count: 10,
            seed: 42,
            state_interval_secs: 1,
            metrics_interval_secs: 5,
            observer_buffer: 32,
        }
    }
}

impl HttpConf {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SimulationConf {
    // un intervalle nul ferait paniquer le timer tokio
    pub fn state_period(&self) -> Duration {
        Duration::from_secs(self.state_interval_secs.max(1))
    }

    pub fn metrics_period(&self) -> Duration {
        Duration::from_secs(self.metrics_interval_secs.max(1))
    }

    // même classe de panique : le canal broadcast tokio refuse une capacité nulle
    pub fn observer_capacity(&self) -> usize {
        self.observer_buffer.max(1)
    }
}

pub async fn load_config() -> KernelConfig {
    let path = std::env::var("SKYMESH_KERNEL_CONFIG").unwrap_or_else(|_| "skymesh.yaml".into());
    if Path::new(&path).exists() {
        let txt = fs::read_to_string(&path).await.unwrap_or_default();
        if txt.trim().is_empty() {
            return KernelConfig::default();
        }
        serde_yaml::from_str(&txt).unwrap_or_else(|e| {
            eprintln!("[kernel] config invalide: {e}");
            KernelConfig::default()
        })
    } else {
        eprintln!("[kernel] pas de skymesh.yaml, usage config par défaut");
        KernelConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_reference_simulation() {
        let cfg = KernelConfig::default();
        assert_eq!(cfg.http.port, 8080);
        assert_eq!(cfg.simulation.node_count, 10);
        assert_eq!(cfg.simulation.state_interval_secs, 1);
        assert_eq!(cfg.simulation.metrics_interval_secs, 5);
    }

    #[test]
    fn test_full_yaml_round_trip() {
        let yaml = r#"
http:
  host: "127.0.0.1"
  port: 9000
simulation:
  node_count: 25
  seed: 7
  state_interval_secs: 2
  metrics_interval_secs: 10
  observer_buffer: 64
"#;
        let cfg: KernelConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.http.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.simulation.node_count, 25);
        assert_eq!(cfg.simulation.seed, 7);
        assert_eq!(cfg.simulation.observer_buffer, 64);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults_elsewhere() {
        let yaml = "simulation:\n  seed: 99\n";
        let cfg: KernelConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.simulation.seed, 99);
        assert_eq!(cfg.simulation.node_count, 10);
        assert_eq!(cfg.http.port, 8080);
    }

    #[test]
    fn test_zero_intervals_are_clamped() {
        let cfg = SimulationConf {
            state_interval_secs: 0,
            metrics_interval_secs: 0,
            ..SimulationConf::default()
        };
        assert_eq!(cfg.state_period(), Duration::from_secs(1));
        assert_eq!(cfg.metrics_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_observer_buffer_is_clamped_to_a_working_channel() {
        let yaml = "simulation:\n  observer_buffer: 0\n";
        let cfg: KernelConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.simulation.observer_buffer, 0);
        assert_eq!(cfg.simulation.observer_capacity(), 1);
    }
}

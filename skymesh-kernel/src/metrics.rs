//! Synthèse de métriques réseau.
//!
//! Les valeurs sont tirées d'un générateur ensemencé (Pcg64Mcg) : une même
//! graine de configuration rejoue exactement les mêmes flux de métriques.

use crate::models::{CoveragePoint, MetricSample};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Amplitude de perturbation du signal prédit, en dBm
const PREDICTION_SPREAD: f64 = 5.0;

pub struct MetricSynthesizer {
    rng: Pcg64Mcg,
}

impl MetricSynthesizer {
    pub fn new(seed: u64) -> Self {
        Self { rng: Pcg64Mcg::seed_from_u64(seed) }
    }

    /// Échantillon frais pour un nœud, dans les plages du schéma d'origine :
    /// signal -40..-100 dBm, latence 0..100 ms, perte 0..5 %, débit 0..1e6 B/s.
    pub fn sample(&mut self, node_id: u32) -> MetricSample {
        let signal_strength = -((self.rng.gen::<f64>() * 60.0 + 40.0).floor() as i32);
        let latency = (self.rng.gen::<f64>() * 100.0).floor() as u32;
        let packet_loss = self.rng.gen::<f64>() * 5.0;
        let throughput = (self.rng.gen::<f64>() * 1_000_000.0).floor() as u64;
        let predicted_signal_strength =
            signal_strength + ((self.rng.gen::<f64>() * 2.0 - 1.0) * PREDICTION_SPREAD).round() as i32;

        MetricSample {
            node_id,
            signal_strength,
            latency,
            packet_loss,
            throughput,
            predicted_signal_strength,
        }
    }

    /// Un échantillon par nœud, dans l'ordre fourni
    pub fn sample_nodes(&mut self, node_ids: impl IntoIterator<Item = u32>) -> Vec<MetricSample> {
        node_ids.into_iter().map(|id| self.sample(id)).collect()
    }

    /// Points de couverture pour la carte : x, y dans [0, 1000), force dans [0, 100)
    pub fn coverage(&mut self, count: usize) -> Vec<CoveragePoint> {
        (0..count)
            .map(|_| CoveragePoint {
                x: self.rng.gen::<f64>() * 1000.0,
                y: self.rng.gen::<f64>() * 1000.0,
                strength: self.rng.gen::<f64>() * 100.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_documented_ranges() {
        let mut synth = MetricSynthesizer::new(7);
        for _ in 0..1_000 {
            let s = synth.sample(1);
            assert!((-100..=-40).contains(&s.signal_strength), "signal {}", s.signal_strength);
            assert!(s.latency < 100, "latency {}", s.latency);
            assert!((0.0..5.0).contains(&s.packet_loss), "loss {}", s.packet_loss);
            assert!(s.throughput < 1_000_000, "throughput {}", s.throughput);
        }
    }

    #[test]
    fn test_prediction_stays_within_spread() {
        let mut synth = MetricSynthesizer::new(11);
        for _ in 0..1_000 {
            let s = synth.sample(1);
            let delta = (s.predicted_signal_strength - s.signal_strength).abs();
            assert!(delta <= PREDICTION_SPREAD as i32, "delta {}", delta);
        }
    }

    #[test]
    fn test_same_seed_replays_same_stream() {
        let mut a = MetricSynthesizer::new(42);
        let mut b = MetricSynthesizer::new(42);
        let ids = [1u32, 2, 3, 4, 5];
        assert_eq!(a.sample_nodes(ids), b.sample_nodes(ids));
    }

    #[test]
    fn test_sample_nodes_preserves_order_and_ids() {
        let mut synth = MetricSynthesizer::new(3);
        let samples = synth.sample_nodes([9u32, 4, 7]);
        let ids: Vec<u32> = samples.iter().map(|s| s.node_id).collect();
        assert_eq!(ids, vec![9, 4, 7]);
    }

    #[test]
    fn test_coverage_points_fit_the_arena() {
        let mut synth = MetricSynthesizer::new(19);
        let points = synth.coverage(100);
        assert_eq!(points.len(), 100);
        for p in points {
            assert!((0.0..1000.0).contains(&p.x));
            assert!((0.0..1000.0).contains(&p.y));
            assert!((0.0..100.0).contains(&p.strength));
        }
    }
}

//! Évaluation des trajectoires de drones.
//!
//! La position n'est jamais stockée : elle est recalculée à partir du temps
//! écoulé depuis le départ de la trajectoire, ce qui rend chaque requête
//! indépendante et rejouable.

use crate::models::{FlightPath, PathKind, Point};
use crate::rng::Lcg;
use std::f64::consts::TAU;
use time::OffsetDateTime;

const CIRCULAR_RADIUS: f64 = 100.0;
const JITTER_INTERVAL_SECS: f64 = 5.0;
const JITTER_RANGE: f64 = 100.0;

/// Position d'un drone sur sa trajectoire à l'instant demandé.
///
/// Un instant antérieur au départ est ramené à un temps écoulé nul.
pub fn position_at(path: &FlightPath, at: OffsetDateTime) -> Point {
    let elapsed = (at - path.start_time).as_seconds_f64().max(0.0);

    match path.kind {
        PathKind::Linear => linear_position(path, elapsed),
        PathKind::Circular => circular_position(path, elapsed),
        PathKind::Random => bucketed_jitter(path, elapsed),
    }
}

/// Progression proportionnelle le long du segment, puis arrêt définitif
/// sur le point d'arrivée une fois la distance couverte.
fn linear_position(path: &FlightPath, elapsed: f64) -> Point {
    let start = path.start();
    let end = path.end();
    let total = distance(start, end);

    // Segment de longueur nulle : déjà arrivé.
    let progress = if total == 0.0 {
        1.0
    } else {
        (elapsed * path.speed / total).clamp(0.0, 1.0)
    };

    Point {
        x: start.x + (end.x - start.x) * progress,
        y: start.y + (end.y - start.y) * progress,
    }
}

/// Révolution perpétuelle de rayon fixe autour du point de départ.
fn circular_position(path: &FlightPath, elapsed: f64) -> Point {
    let center = path.start();
    let angle = (elapsed * path.speed) % TAU;
    Point {
        x: center.x + CIRCULAR_RADIUS * angle.cos(),
        y: center.y + CIRCULAR_RADIUS * angle.sin(),
    }
}

/// Décalage aléatoire constant par fenêtre de 5 secondes.
///
/// Le générateur est ré-ensemencé à chaque requête avec
/// `path.id + numéro de fenêtre`, donc deux requêtes dans la même fenêtre
/// retournent exactement la même position (tirages x puis y).
fn bucketed_jitter(path: &FlightPath, elapsed: f64) -> Point {
    let interval_count = (elapsed / JITTER_INTERVAL_SECS).floor() as i64;
    let mut rng = Lcg::new(path.id as i64 + interval_count);
    let dx = rng.next() * 2.0 * JITTER_RANGE - JITTER_RANGE;
    let dy = rng.next() * 2.0 * JITTER_RANGE - JITTER_RANGE;
    Point {
        x: path.start_x + dx,
        y: path.start_y + dy,
    }
}

fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

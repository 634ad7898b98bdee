/// Générateur Lehmer minimal (Park-Miller, multiplicateur 16807).
///
/// La même graine rejoue exactement la même séquence, ce qui rend les
/// trajectoires aléatoires reproductibles d'un processus à l'autre.
/// Contrat : la graine ne doit jamais être nulle (les appelants dérivent
/// toujours une valeur >= 1), sinon la séquence dégénère à zéro.
#[derive(Debug, Clone)]
pub struct Lcg {
    seed: i64,
}

impl Lcg {
    const MODULUS: i64 = 2_147_483_647;
    const MULTIPLIER: i64 = 16_807;

    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    /// Prochain tirage uniforme dans [0, 1)
    pub fn next(&mut self) -> f64 {
        self.seed = (self.seed * Self::MULTIPLIER) % Self::MODULUS;
        (self.seed - 1) as f64 / (Self::MODULUS - 1) as f64
    }
}

/*!
# Skymesh DevKit - Fixtures et Harnais de Test

Bibliothèque facilitant les tests du kernel et des outils Skymesh avec:
- Fixtures déterministes (flottes, trajectoires, contextes validés)
- Harnais de flux pour vérifier la diffusion côté observateur
- Assertions sur les trames JSON (chemins pointés, tableaux inclus)
*/

pub mod fixtures;
pub mod harness;

pub use harness::{StreamHarness, TestObserver};

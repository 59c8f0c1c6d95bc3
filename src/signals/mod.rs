// src/signals/mod.rs
//! Text Signal Classifier: heuristics that turn answers (mostly free text)
//! into booleans, levels and matched-entry lists for the scoring engine.

pub mod classifiers;
pub mod matching;
pub mod patterns;
pub mod tenure;

use serde::Serialize;

pub use classifiers::{
    ClarificationSignal, CompensationSignal, ContractKind, Criterion, DepthSignal,
    DueDiligenceSignal, HardshipSignal, RecruiterBasis, RecruiterSignal,
};
pub use matching::ListMatch;
pub use patterns::{PatternFamily, PatternSet, SignalPatterns};
pub use tenure::TenureSignal;

/// Graded confidence of a qualitative signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Strength::Weak => "faible",
            Strength::Medium => "moyen",
            Strength::Strong => "fort",
        }
    }
}

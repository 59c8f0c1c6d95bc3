// src/scoring/mod.rs
//! Scoring Engine: three independent phases recomputed on every call.

pub mod eligibility;
pub mod maturity;
pub mod priority;

pub use eligibility::{EligibilityAssessment, EligibilityStatus};
pub use maturity::{MaturityAssessment, MaturityStatus};
pub use priority::{
    PriorityAssessment, PriorityDetail, PriorityRule, PriorityStatus, MAX_PRIORITY_SCORE,
    PRIORITY_RULES,
};

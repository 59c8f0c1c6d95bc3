// src/analysis.rs
//! Analysis Assembler: runs the three scoring phases over one answer snapshot.

use crate::answers::AnswerStore;
use crate::debug::dev_log_analysis;
use crate::reference::ReferenceData;
use crate::scoring::{
    eligibility, maturity, priority, EligibilityAssessment, MaturityAssessment,
    PriorityAssessment,
};
use crate::signals::SignalPatterns;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Immutable result of one `analyze` call. Recompute after any answer change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub eligibility: EligibilityAssessment,
    pub priority: PriorityAssessment,
    pub maturity: MaturityAssessment,
}

/// Shared, read-only scoring context.
#[derive(Debug, Clone)]
pub struct Analyzer {
    reference: Arc<ReferenceData>,
    patterns: Arc<SignalPatterns>,
}

impl Analyzer {
    pub fn new(reference: Arc<ReferenceData>, patterns: Arc<SignalPatterns>) -> Self {
        Self {
            reference,
            patterns,
        }
    }

    /// Analyzer with the embedded signal patterns.
    pub fn with_default_patterns(reference: Arc<ReferenceData>) -> Self {
        Self::new(reference, SignalPatterns::embedded())
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn patterns(&self) -> &SignalPatterns {
        &self.patterns
    }

    /// Pure function of `answers` and the shared context. Never fails: every
    /// classifier degrades to a neutral result on unusable text.
    pub fn analyze(&self, answers: &AnswerStore) -> AnalysisResult {
        let eligibility = eligibility::assess(answers, &self.patterns);
        debug!(
            tenure_months = eligibility.tenure.total_months,
            hardship = eligibility.hardship.detected,
            "eligibility phase"
        );

        let priority = priority::assess(answers, &self.reference);
        debug!(score = priority.score, status = ?priority.status, "priority phase");

        let maturity = maturity::assess(answers, &self.patterns);
        debug!(
            percentage = maturity.percentage,
            status = ?maturity.status,
            "maturity phase"
        );

        crate::metrics::record_analysis(
            priority.score,
            priority.status,
            maturity.percentage,
            maturity.status,
        );
        let codes: Vec<String> = priority.details.iter().map(|d| d.code.clone()).collect();
        dev_log_analysis(answers, priority.score, maturity.percentage, &codes);

        AnalysisResult {
            eligibility,
            priority,
            maturity,
        }
    }
}

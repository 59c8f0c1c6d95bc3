// src/metrics.rs
//! Engine metrics. Recording is a no-op until a recorder is installed; the
//! CLI installs the Prometheus one on `--metrics`.

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::scoring::{MaturityStatus, PriorityStatus};

pub const ANALYSES_TOTAL: &str = "cep_analyses_total";
pub const PRIORITY_SCORE: &str = "cep_priority_score";
pub const MATURITY_PERCENTAGE: &str = "cep_maturity_percentage";
pub const ANSWERS_PURGED_TOTAL: &str = "cep_answers_purged_total";

/// One-time registration so series carry help text.
pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            ANALYSES_TOTAL,
            "Analyses computed, labelled by priority and maturity status."
        );
        describe_histogram!(PRIORITY_SCORE, "Priority score per analysis (0..=20).");
        describe_histogram!(
            MATURITY_PERCENTAGE,
            "Share of maturity questions with an elaborated answer."
        );
        describe_counter!(
            ANSWERS_PURGED_TOTAL,
            "Answers dropped because their question became hidden."
        );
    });
}

pub fn record_analysis(score: u32, priority: PriorityStatus, maturity_pct: f64, maturity: MaturityStatus) {
    ensure_described();
    counter!(
        ANALYSES_TOTAL,
        "priority" => priority_tag(priority),
        "maturity" => maturity_tag(maturity)
    )
    .increment(1);
    histogram!(PRIORITY_SCORE).record(score as f64);
    histogram!(MATURITY_PERCENTAGE).record(maturity_pct);
}

pub fn record_purged(count: usize) {
    ensure_described();
    counter!(ANSWERS_PURGED_TOTAL).increment(count as u64);
}

fn priority_tag(status: PriorityStatus) -> &'static str {
    match status {
        PriorityStatus::VeryHigh => "very_high",
        PriorityStatus::High => "high",
        PriorityStatus::Medium => "medium",
        PriorityStatus::Standard => "standard",
    }
}

fn maturity_tag(status: MaturityStatus) -> &'static str {
    match status {
        MaturityStatus::Mature => "mature",
        MaturityStatus::Developing => "developing",
        MaturityStatus::ToBuild => "to_build",
    }
}

/// Install the global Prometheus recorder. Fails if a recorder is already set.
pub fn install_prometheus() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("prometheus: install recorder")?;
    ensure_described();
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_harmless() {
        record_purged(3);
        record_analysis(10, PriorityStatus::High, 44.4, MaturityStatus::Developing);
    }

    #[test]
    fn tags_are_snake_case() {
        assert_eq!(priority_tag(PriorityStatus::VeryHigh), "very_high");
        assert_eq!(maturity_tag(MaturityStatus::ToBuild), "to_build");
    }
}

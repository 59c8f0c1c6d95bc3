// src/debug.rs
//! Dev-only anonymised logging. Raw answers are never logged: only a short
//! digest of the answer set and derived figures.

use crate::answers::AnswerStore;
use tracing::info;

pub const ENV_DEV_LOG: &str = "CEP_DEV_LOG";
pub const ENV_APP_ENV: &str = "CEP_ENV";

// Dev logging gate: CEP_DEV_LOG=1 AND dev env (debug build or CEP_ENV in {local,development,dev})
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var(ENV_APP_ENV)
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of SHA-256, hex.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Stable digest of an answer set (ids and values, id order).
pub fn answers_digest(answers: &AnswerStore) -> String {
    let mut joined = String::new();
    for id in answers.ids() {
        joined.push_str(id);
        joined.push('=');
        joined.push_str(answers.get(id).unwrap_or_default());
        joined.push('\n');
    }
    anon_hash(&joined)
}

pub fn dev_log_analysis(answers: &AnswerStore, score: u32, maturity_pct: f64, codes: &[String]) {
    if !dev_logging_enabled() {
        return;
    }
    let id = answers_digest(answers);
    info!(
        target: "cep::dev",
        %id,
        answers = answers.len(),
        score,
        maturity_pct,
        rules = ?codes,
        "analysis"
    );
}

// src/signals/tenure.rs
//! Free-text seniority ("2 ans et 3 mois", "18 mois", "3") to months.

use crate::answers::AnswerStore;
use crate::questions as q;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Twelve months are required at training start.
pub const MIN_MONTHS: u32 = 12;
/// Beyond five years retraining uptake declines.
pub const HIGH_MONTHS: u32 = 60;
/// A bare number is read as months only below this value.
pub const BARE_NUMBER_LIMIT: u32 = 50;

static YEARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*an").expect("years regex"));
static MONTHS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*mois").expect("months regex"));
static BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d+)\b").expect("bare number regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TenureSignal {
    pub total_months: u32,
    pub insufficient: bool,
    pub high: bool,
}

impl TenureSignal {
    pub fn from_months(total_months: u32) -> Self {
        Self {
            total_months,
            insufficient: total_months > 0 && total_months < MIN_MONTHS,
            high: total_months > HIGH_MONTHS,
        }
    }
}

fn first_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Months expressed by `text`; 0 when nothing usable is found.
///
/// Years and months are summed. When that yields nothing, the first bare
/// number is taken as months if it is below [`BARE_NUMBER_LIMIT`], so "2020"
/// is ignored. A unit-less "3" may well mean years; it still reads as months.
pub fn parse_months(text: &str) -> u32 {
    let text = text.to_lowercase();
    let total = first_number(&YEARS, &text)
        .unwrap_or(0)
        .saturating_mul(12)
        .saturating_add(first_number(&MONTHS, &text).unwrap_or(0));
    if total > 0 {
        return total;
    }
    match first_number(&BARE, &text) {
        Some(n) if n < BARE_NUMBER_LIMIT => n,
        _ => 0,
    }
}

pub fn classify(answers: &AnswerStore) -> TenureSignal {
    TenureSignal::from_months(parse_months(answers.get(q::TENURE).unwrap_or_default()))
}

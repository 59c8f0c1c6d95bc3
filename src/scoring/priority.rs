// src/scoring/priority.rs
//! Priority phase: ordered, additive point schedule.
//!
//! Rules are data. Each rule is evaluated independently and, when it fires,
//! contributes its points and one detail line; details follow table order.

use crate::answers::AnswerStore;
use crate::questions as q;
use crate::reference::{DecliningSector, PriorityOccupation, ReferenceData};
use crate::signals::{classifiers, matching, ListMatch};
use serde::Serialize;

/// Denominator shown with the score. Fixed: it is not derived from the rule
/// table, so a table change must be mirrored here.
pub const MAX_PRIORITY_SCORE: u32 = 20;

pub const VERY_HIGH_THRESHOLD: u32 = 15;
pub const HIGH_THRESHOLD: u32 = 10;
pub const MEDIUM_THRESHOLD: u32 = 7;

/// Inputs a rule predicate may read. List matches are computed once.
pub struct RuleInput<'a> {
    pub answers: &'a AnswerStore,
    pub occupation: &'a ListMatch<PriorityOccupation>,
    pub sector: &'a ListMatch<DecliningSector>,
}

/// One schedule row. `check` returns the detail label when the rule fires.
pub struct PriorityRule {
    pub code: &'static str,
    pub points: u32,
    pub check: fn(&RuleInput<'_>) -> Option<&'static str>,
}

fn low_qualification(input: &RuleInput<'_>) -> Option<&'static str> {
    classifiers::low_qualification(input.answers).then_some("Ouvrier/employé peu qualifié")
}

fn unfit(input: &RuleInput<'_>) -> Option<&'static str> {
    input
        .answers
        .equals(q::UNFIT, q::YES)
        .then_some("Reconnu inapte")
}

fn small_company(input: &RuleInput<'_>) -> Option<&'static str> {
    input
        .answers
        .equals(q::LARGE_COMPANY, q::NO)
        .then_some("Entreprise < 50 salariés")
}

fn training_engineering(input: &RuleInput<'_>) -> Option<&'static str> {
    let measures = input.answers.lowercase(q::TRAINING_ENGINEERING);
    let recruiter = input.answers.lowercase(q::RECRUITER);
    let fired = ["oui", "cléa", "vae", "cep"]
        .iter()
        .any(|kw| measures.contains(kw))
        || recruiter.contains("oui")
        || recruiter.chars().count() > classifiers::ELABORATED_LEN;
    fired.then_some("Ingénierie de formation valorisée (CEP, VAE, CléA, recruteur...)")
}

fn co_financing(input: &RuleInput<'_>) -> Option<&'static str> {
    input
        .answers
        .equals(q::CO_FINANCING, q::YES)
        .then_some("Cofinancement mobilisé")
}

fn priority_occupation(input: &RuleInput<'_>) -> Option<&'static str> {
    input
        .occupation
        .is_match()
        .then_some("Métier à forte perspective d'emploi")
}

fn declining_sector(input: &RuleInput<'_>) -> Option<&'static str> {
    input
        .sector
        .is_match()
        .then_some("Secteur dont le taux d'emploi diminue")
}

/// Fixed-term and part-time together still earn a single point.
fn short_or_part_time(input: &RuleInput<'_>) -> Option<&'static str> {
    let fixed_term = input.answers.equals(q::FIXED_TERM, q::YES);
    let part_time = input.answers.equals(q::PART_TIME, q::YES);
    match (fixed_term, part_time) {
        (true, true) => Some("CDD et temps partiel"),
        (true, false) => Some("CDD"),
        (false, true) => Some("Temps partiel"),
        (false, false) => None,
    }
}

pub const PRIORITY_RULES: &[PriorityRule] = &[
    PriorityRule {
        code: "P1",
        points: 5,
        check: low_qualification,
    },
    PriorityRule {
        code: "P2",
        points: 1,
        check: unfit,
    },
    PriorityRule {
        code: "P3",
        points: 1,
        check: small_company,
    },
    PriorityRule {
        code: "P6",
        points: 1,
        check: training_engineering,
    },
    PriorityRule {
        code: "P7",
        points: 2,
        check: co_financing,
    },
    PriorityRule {
        code: "P8",
        points: 3,
        check: priority_occupation,
    },
    PriorityRule {
        code: "P9",
        points: 3,
        check: declining_sector,
    },
    PriorityRule {
        code: "P10",
        points: 1,
        check: short_or_part_time,
    },
];

/// Sum of every rule's points, i.e. the best score actually reachable.
pub fn attainable_score() -> u32 {
    PRIORITY_RULES.iter().map(|r| r.points).sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityDetail {
    pub code: String,
    pub label: String,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityStatus {
    Standard,
    Medium,
    High,
    VeryHigh,
}

impl PriorityStatus {
    pub fn from_score(score: u32) -> Self {
        if score >= VERY_HIGH_THRESHOLD {
            PriorityStatus::VeryHigh
        } else if score >= HIGH_THRESHOLD {
            PriorityStatus::High
        } else if score >= MEDIUM_THRESHOLD {
            PriorityStatus::Medium
        } else {
            PriorityStatus::Standard
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityStatus::VeryHigh => "Priorité très élevée",
            PriorityStatus::High => "Priorité élevée",
            PriorityStatus::Medium => "Priorité moyenne",
            PriorityStatus::Standard => "Priorité standard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityAssessment {
    pub score: u32,
    pub max_score: u32,
    pub status: PriorityStatus,
    pub details: Vec<PriorityDetail>,
    pub low_qualification: bool,
    pub occupation: ListMatch<PriorityOccupation>,
    pub sector: ListMatch<DecliningSector>,
}

pub fn assess(answers: &AnswerStore, reference: &ReferenceData) -> PriorityAssessment {
    let occupation = matching::priority_occupation(answers, reference);
    let sector = matching::declining_sector(answers, reference);
    let input = RuleInput {
        answers,
        occupation: &occupation,
        sector: &sector,
    };

    let details: Vec<PriorityDetail> = PRIORITY_RULES
        .iter()
        .filter_map(|rule| {
            (rule.check)(&input).map(|label| PriorityDetail {
                code: rule.code.to_string(),
                label: label.to_string(),
                points: rule.points,
            })
        })
        .collect();
    let score = details.iter().map(|d| d.points).sum();

    PriorityAssessment {
        score,
        max_score: MAX_PRIORITY_SCORE,
        status: PriorityStatus::from_score(score),
        details,
        low_qualification: classifiers::low_qualification(answers),
        occupation,
        sector,
    }
}

// src/scoring/maturity.rs
//! Maturity phase: share of maturity questions with an elaborated answer,
//! plus the qualitative signals about the project's groundwork.

use crate::answers::AnswerStore;
use crate::questions as q;
use crate::signals::classifiers::{self, trimmed_len, ELABORATED_LEN};
use crate::signals::{
    ClarificationSignal, DepthSignal, DueDiligenceSignal, RecruiterSignal, SignalPatterns,
};
use serde::Serialize;

pub const MATURE_THRESHOLD: f64 = 70.0;
pub const DEVELOPING_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityStatus {
    ToBuild,
    Developing,
    Mature,
}

impl MaturityStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= MATURE_THRESHOLD {
            MaturityStatus::Mature
        } else if percentage >= DEVELOPING_THRESHOLD {
            MaturityStatus::Developing
        } else {
            MaturityStatus::ToBuild
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaturityStatus::Mature => "Projet mature",
            MaturityStatus::Developing => "Projet en développement",
            MaturityStatus::ToBuild => "Projet à construire",
        }
    }

    pub fn details(self) -> &'static str {
        match self {
            MaturityStatus::Mature => "Votre projet est bien avancé et structuré.",
            MaturityStatus::Developing => {
                "Votre projet nécessite encore quelques approfondissements."
            }
            MaturityStatus::ToBuild => {
                "Votre projet est encore au stade de réflexion et nécessite un accompagnement approfondi."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaturityAssessment {
    pub status: MaturityStatus,
    pub details: String,
    /// Maturity questions with an elaborated answer.
    pub score: usize,
    pub question_count: usize,
    pub percentage: f64,
    pub clarification: ClarificationSignal,
    pub training_guide: bool,
    pub due_diligence: DueDiligenceSignal,
    pub recruiter: RecruiterSignal,
    pub depth: Vec<DepthSignal>,
}

/// Answers longer than ten characters once trimmed. Closed "Oui"/"Non"
/// answers never count, only written elaboration does.
pub fn elaborated_count(answers: &AnswerStore) -> usize {
    q::MATURITY_QUESTIONS
        .iter()
        .filter(|id| answers.get(id).is_some_and(|a| trimmed_len(a) > ELABORATED_LEN))
        .count()
}

pub fn assess(answers: &AnswerStore, patterns: &SignalPatterns) -> MaturityAssessment {
    let score = elaborated_count(answers);
    let question_count = q::MATURITY_QUESTIONS.len();
    let percentage = score as f64 / question_count as f64 * 100.0;
    let status = MaturityStatus::from_percentage(percentage);

    MaturityAssessment {
        status,
        details: status.details().to_string(),
        score,
        question_count,
        percentage,
        clarification: classifiers::clarification(answers),
        training_guide: classifiers::training_guide(answers),
        due_diligence: classifiers::due_diligence(answers, patterns),
        recruiter: classifiers::recruiter(answers, patterns),
        depth: classifiers::depth(answers, patterns),
    }
}

// src/visibility.rs
//! Visibility Resolver: conditional branching of the questionnaire.
//!
//! A question is hidden only when it appears in [`GATES`] and its gating
//! answer is not one of the accepted values. Everything else is always shown.

use crate::answers::AnswerStore;
use crate::questions as q;
use crate::reference::Question;
use serde::Serialize;

/// Declarative branching rule: `question` is shown iff `depends_on` holds one of `accepts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub question: &'static str,
    pub depends_on: &'static str,
    pub accepts: &'static [&'static str],
}

const YES_ONLY: &[&str] = &[q::YES];

pub const GATES: &[Gate] = &[
    Gate {
        question: q::LOW_QUALIFICATION,
        depends_on: q::DIPLOMA,
        accepts: q::DIPLOMAS_WITHOUT_BACCALAUREATE,
    },
    Gate {
        question: q::COMPENSATION,
        depends_on: q::DIPLOMA,
        accepts: q::DIPLOMAS_WITH_BACCALAUREATE,
    },
    Gate {
        question: q::INQUIRIES_WHO,
        depends_on: q::INQUIRIES,
        accepts: YES_ONLY,
    },
    Gate {
        question: q::INQUIRIES_OUTCOME,
        depends_on: q::INQUIRIES,
        accepts: YES_ONLY,
    },
    Gate {
        question: q::IMMERSION_WHERE,
        depends_on: q::IMMERSION,
        accepts: YES_ONLY,
    },
    Gate {
        question: q::IMMERSION_OUTCOME,
        depends_on: q::IMMERSION,
        accepts: YES_ONLY,
    },
    Gate {
        question: q::ORGANISATIONS_LIST,
        depends_on: q::ORGANISATIONS_COMPARED,
        accepts: YES_ONLY,
    },
    Gate {
        question: q::ORGANISATION_CHECKS,
        depends_on: q::ORGANISATIONS_COMPARED,
        accepts: YES_ONLY,
    },
];

pub fn gate_for(question_id: &str) -> Option<&'static Gate> {
    GATES.iter().find(|g| g.question == question_id)
}

/// Whether `question_id` currently applies. A gated question also requires its
/// gating question to be visible, so hiding a branch hides everything below it.
pub fn is_visible(question_id: &str, answers: &AnswerStore) -> bool {
    match gate_for(question_id) {
        None => true,
        Some(gate) => {
            let open = answers
                .get(gate.depends_on)
                .is_some_and(|a| gate.accepts.contains(&a));
            open && is_visible(gate.depends_on, answers)
        }
    }
}

/// Catalog filtered by [`is_visible`], catalog order preserved.
pub fn visible_questions<'a>(catalog: &'a [Question], answers: &AnswerStore) -> Vec<&'a Question> {
    catalog
        .iter()
        .filter(|question| is_visible(&question.id, answers))
        .collect()
}

pub fn count_visible(catalog: &[Question], answers: &AnswerStore) -> usize {
    catalog
        .iter()
        .filter(|question| is_visible(&question.id, answers))
        .count()
}

/// Visible questions holding a non-blank answer.
pub fn count_answered(catalog: &[Question], answers: &AnswerStore) -> usize {
    catalog
        .iter()
        .filter(|question| is_visible(&question.id, answers) && answers.is_answered(&question.id))
        .count()
}

/// Stored answers whose question is no longer visible.
pub fn hidden_answers(answers: &AnswerStore) -> Vec<String> {
    answers
        .ids()
        .filter(|id| !is_visible(id, answers))
        .map(str::to_string)
        .collect()
}

/// Derived progress, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub visible: usize,
}

impl Progress {
    pub fn compute(catalog: &[Question], answers: &AnswerStore) -> Self {
        Self {
            answered: count_answered(catalog, answers),
            visible: count_visible(catalog, answers),
        }
    }

    pub fn percent(&self) -> f64 {
        if self.visible == 0 {
            return 0.0;
        }
        self.answered as f64 / self.visible as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.visible > 0 && self.answered == self.visible
    }
}

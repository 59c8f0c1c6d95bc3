// src/reference/mod.rs
//! Reference Data Store: question catalog, priority schedule, priority
//! occupations, declining sectors and the case-handler directory.
//!
//! Loaded once per session (see [`loader`]) and shared read-only behind an `Arc`.

pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::{FsReferenceSource, InMemorySource, ReferenceSource, Resource};

/// What a question contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    #[serde(rename = "éligibilité")]
    Eligibility,
    #[serde(rename = "priorité")]
    Priority,
    #[serde(rename = "critère 1")]
    ProjectCriterion,
    #[serde(rename = "critère 2")]
    TrainingCriterion,
    #[serde(rename = "critère 3")]
    EmploymentCriterion,
    #[serde(rename = "à voir si priorité 2026")]
    FuturePriority,
    #[serde(other)]
    Other,
}

impl Objective {
    /// Section badge shown next to a question.
    pub fn label(self) -> &'static str {
        match self {
            Objective::Eligibility => "Éligibilité",
            Objective::Priority => "Priorité",
            Objective::ProjectCriterion => "Maturité - Projet",
            Objective::TrainingCriterion => "Maturité - Formation",
            Objective::EmploymentCriterion => "Maturité - Emploi",
            Objective::FuturePriority => "Priorité future",
            Objective::Other => "Questionnaire",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default)]
    pub section: String,
    #[serde(rename = "objectif")]
    pub objective: Objective,
}

/// Informational row of the priority schedule; the scoring table is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRuleInfo {
    pub code: String,
    #[serde(rename = "libelle")]
    pub label: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityOccupation {
    #[serde(rename = "metier")]
    pub title: String,
    #[serde(rename = "domaine")]
    pub domain: String,
    #[serde(rename = "code_rome")]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecliningSector {
    #[serde(rename = "intitule")]
    pub title: String,
    pub section: String,
    #[serde(rename = "code_ape")]
    pub code: String,
}

/// Program staff member a respondent's file is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseHandler {
    pub id: String,
    #[serde(rename = "nom")]
    pub name: String,
    pub email: String,
}

/// Common view over reference-list rows used by the list matchers.
pub trait ReferenceEntry {
    fn title(&self) -> &str;
    /// Domain (occupations) or section (sectors).
    fn category(&self) -> &str;
    fn code(&self) -> &str;
}

impl ReferenceEntry for PriorityOccupation {
    fn title(&self) -> &str {
        &self.title
    }
    fn category(&self) -> &str {
        &self.domain
    }
    fn code(&self) -> &str {
        &self.code
    }
}

impl ReferenceEntry for DecliningSector {
    fn title(&self) -> &str {
        &self.title
    }
    fn category(&self) -> &str {
        &self.section
    }
    fn code(&self) -> &str {
        &self.code
    }
}

/// The complete static dataset, read-only after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub questions: Vec<Question>,
    pub priority_schedule: Vec<PriorityRuleInfo>,
    pub occupations: Vec<PriorityOccupation>,
    pub sectors: Vec<DecliningSector>,
    #[serde(default)]
    pub case_handlers: Vec<CaseHandler>,
}

impl ReferenceData {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn case_handler(&self, id: &str) -> Option<&CaseHandler> {
        self.case_handlers.iter().find(|h| h.id == id)
    }

    /// Sum of the informational schedule; compared against the fixed maximum at load time.
    pub fn schedule_total(&self) -> u32 {
        self.priority_schedule.iter().map(|p| p.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_deserializes_with_french_keys() {
        let raw = r#"{"id":"Q1a","question":"Depuis combien de temps ?","section":"Situation","objectif":"éligibilité"}"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.id, "Q1a");
        assert_eq!(q.objective, Objective::Eligibility);
        assert_eq!(q.objective.label(), "Éligibilité");
    }

    #[test]
    fn unknown_objective_maps_to_other() {
        let raw = r#"{"id":"Q99","question":"?","objectif":"divers"}"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.objective, Objective::Other);
        assert_eq!(q.section, "");
        assert_eq!(q.objective.label(), "Questionnaire");
    }

    #[test]
    fn entries_expose_common_fields() {
        let sector = DecliningSector {
            title: "Boulangerie-pâtisserie".into(),
            section: "Industrie manufacturière".into(),
            code: "1071C".into(),
        };
        assert_eq!(sector.category(), "Industrie manufacturière");
        assert_eq!(ReferenceEntry::code(&sector), "1071C");
    }
}

// src/scoring/eligibility.rs
//! Eligibility phase. No rule disqualifies yet: the status is always
//! eligible and the classifier outputs ride along for the guidance layer.

use crate::answers::AnswerStore;
use crate::signals::{
    classifiers, tenure, CompensationSignal, ContractKind, HardshipSignal, SignalPatterns,
    TenureSignal,
};
use serde::Serialize;

const BASE_DETAILS: &str = "Vous remplissez les conditions d'éligibilité de base.";
const SICK_LEAVE_CAVEAT: &str =
    " Attention: vous êtes actuellement en arrêt, cela peut impacter votre dossier.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
}

impl EligibilityStatus {
    pub fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "Éligible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityAssessment {
    pub status: EligibilityStatus,
    pub details: String,
    pub tenure: TenureSignal,
    pub disability: bool,
    pub sick_leave: bool,
    pub compensation: CompensationSignal,
    pub hardship: HardshipSignal,
    pub employer_not_informed: bool,
    pub contract: ContractKind,
}

pub fn assess(answers: &AnswerStore, patterns: &SignalPatterns) -> EligibilityAssessment {
    let sick_leave = classifiers::sick_leave(answers);
    let mut details = BASE_DETAILS.to_string();
    if sick_leave {
        details.push_str(SICK_LEAVE_CAVEAT);
    }

    EligibilityAssessment {
        status: EligibilityStatus::Eligible,
        details,
        tenure: tenure::classify(answers),
        disability: classifiers::disability(answers),
        sick_leave,
        compensation: classifiers::compensation(answers),
        hardship: classifiers::hardship(answers, patterns),
        employer_not_informed: classifiers::employer_not_informed(answers),
        contract: classifiers::contract_kind(answers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_eligible() {
        let a = assess(&AnswerStore::default(), &SignalPatterns::embedded());
        assert_eq!(a.status, EligibilityStatus::Eligible);
        assert_eq!(a.status.label(), "Éligible");
        assert_eq!(a.details, BASE_DETAILS);
        assert!(!a.hardship.detected);
        assert_eq!(a.contract, ContractKind::Unknown);
    }

    #[test]
    fn sick_leave_appends_caveat() {
        let answers: AnswerStore = [("Q1c", "Oui"), ("Q1a", "8 mois")].into_iter().collect();
        let a = assess(&answers, &SignalPatterns::embedded());
        assert!(a.details.ends_with("cela peut impacter votre dossier."));
        assert!(a.details.starts_with(BASE_DETAILS));
        assert!(a.tenure.insufficient);
        assert!(a.sick_leave);
    }
}

// src/signals/classifiers.rs
//! Small classifiers over single answers. None of them can fail: unusable
//! text yields the neutral result.

use super::patterns::SignalPatterns;
use super::Strength;
use crate::answers::AnswerStore;
use crate::questions as q;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Annual gross compensation above which the high-compensation alert fires.
pub const HIGH_COMPENSATION: f64 = 21417.0;

/// Minimum trimmed length for an answer to count as elaborated.
pub const ELABORATED_LEN: usize = 10;

/// Shorter recruiter answers are treated as no recruiter.
pub const RECRUITER_MIN_LEN: usize = 5;

static LEADING_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)").expect("decimal regex"));
static CDI: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcdi\b").expect("cdi regex"));
static CDD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcdd\b").expect("cdd regex"));
static TEMPORARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)int[ée]rim|\bctt\b").expect("temporary regex"));

pub(crate) fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Recognised disabled worker (Q1b).
pub fn disability(answers: &AnswerStore) -> bool {
    answers.equals(q::DISABILITY, q::YES)
}

/// Currently on sick leave (Q1c).
pub fn sick_leave(answers: &AnswerStore) -> bool {
    answers.equals(q::SICK_LEAVE, q::YES)
}

/// Blue/white-collar low-qualification worker (Q3a).
pub fn low_qualification(answers: &AnswerStore) -> bool {
    answers.equals(q::LOW_QUALIFICATION, q::YES)
}

/// Employer explicitly not told about the project yet (Q10b).
pub fn employer_not_informed(answers: &AnswerStore) -> bool {
    answers.equals(q::EMPLOYER_INFORMED, q::NO)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CompensationSignal {
    pub amount: Option<f64>,
    pub high: bool,
}

/// Leading decimal of `text`, like a lenient number input: inner spaces are
/// ignored and a comma is read as the decimal separator.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    LEADING_DECIMAL
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub fn compensation(answers: &AnswerStore) -> CompensationSignal {
    let amount = answers.get(q::COMPENSATION).and_then(parse_amount);
    CompensationSignal {
        amount,
        high: amount.is_some_and(|v| v > HIGH_COMPENSATION),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HardshipSignal {
    pub detected: bool,
    /// Ids of the matching families, config order.
    pub families: Vec<String>,
}

pub fn hardship(answers: &AnswerStore, patterns: &SignalPatterns) -> HardshipSignal {
    let text = answers.lowercase(q::WORKING_CONDITIONS);
    let families: Vec<String> = patterns
        .hardship
        .matching(&text)
        .map(|f| f.id.clone())
        .collect();
    HardshipSignal {
        detected: !families.is_empty(),
        families,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Permanent,
    FixedTerm,
    Temporary,
    #[default]
    Unknown,
}

impl ContractKind {
    pub fn label(self) -> &'static str {
        match self {
            ContractKind::Permanent => "CDI",
            ContractKind::FixedTerm => "CDD",
            ContractKind::Temporary => "Intérim",
            ContractKind::Unknown => "Non précisé",
        }
    }
}

/// Contract kind from the Q8 description; a "Oui" to the fixed-term question
/// stands in when the description says nothing.
pub fn contract_kind(answers: &AnswerStore) -> ContractKind {
    let text = answers.get(q::CONTRACT).unwrap_or_default();
    if TEMPORARY.is_match(text) {
        ContractKind::Temporary
    } else if CDD.is_match(text) {
        ContractKind::FixedTerm
    } else if CDI.is_match(text) {
        ContractKind::Permanent
    } else if answers.equals(q::FIXED_TERM, q::YES) {
        ContractKind::FixedTerm
    } else {
        ContractKind::Unknown
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub id: String,
    pub label: String,
}

/// Checks performed on the chosen training organisation (Q22).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DueDiligenceSignal {
    pub criteria: Vec<Criterion>,
}

impl DueDiligenceSignal {
    pub fn count(&self) -> usize {
        self.criteria.len()
    }

    pub fn has(&self, id: &str) -> bool {
        self.criteria.iter().any(|c| c.id == id)
    }
}

pub fn due_diligence(answers: &AnswerStore, patterns: &SignalPatterns) -> DueDiligenceSignal {
    let text = answers.lowercase(q::ORGANISATION_CHECKS);
    DueDiligenceSignal {
        criteria: patterns
            .due_diligence
            .matching(&text)
            .map(|f| Criterion {
                id: f.id.clone(),
                label: f.label.clone(),
            })
            .collect(),
    }
}

/// What the recruiter answer rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruiterBasis {
    Internship,
    Contact,
    Description,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecruiterSignal {
    pub strength: Strength,
    pub basis: RecruiterBasis,
    pub identified: bool,
}

/// Q23: internship or immersion with the recruiter is strong, a contact or a
/// real description is medium, "Non" or a few characters is weak.
pub fn recruiter(answers: &AnswerStore, patterns: &SignalPatterns) -> RecruiterSignal {
    let raw = answers.get(q::RECRUITER).unwrap_or_default();
    let text = raw.to_lowercase();
    let (strength, basis) = if raw == q::NO || trimmed_len(raw) < RECRUITER_MIN_LEN {
        (Strength::Weak, RecruiterBasis::Nothing)
    } else if patterns.recruiter_internship.is_match(&text) {
        (Strength::Strong, RecruiterBasis::Internship)
    } else if patterns.recruiter_contact.is_match(&text) {
        (Strength::Medium, RecruiterBasis::Contact)
    } else {
        (Strength::Medium, RecruiterBasis::Description)
    };
    RecruiterSignal {
        strength,
        basis,
        identified: strength != Strength::Weak,
    }
}

/// A closed maturity question and the free-text answers that elaborate on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthProbe {
    pub question: &'static str,
    pub elaborations: &'static [&'static str],
}

pub const DEPTH_PROBES: &[DepthProbe] = &[
    DepthProbe {
        question: q::INQUIRIES,
        elaborations: &[q::INQUIRIES_WHO, q::INQUIRIES_OUTCOME],
    },
    DepthProbe {
        question: q::IMMERSION,
        elaborations: &[q::IMMERSION_WHERE, q::IMMERSION_OUTCOME],
    },
    DepthProbe {
        question: q::ORGANISATIONS_COMPARED,
        elaborations: &[q::ORGANISATIONS_LIST, q::ORGANISATION_CHECKS],
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepthSignal {
    pub question: String,
    pub strength: Strength,
    /// Sub-category ids found in the elaboration.
    pub categories: Vec<String>,
}

/// Depth of the groundwork behind each probed closed question.
pub fn depth(answers: &AnswerStore, patterns: &SignalPatterns) -> Vec<DepthSignal> {
    DEPTH_PROBES
        .iter()
        .map(|probe| {
            if !answers.equals(probe.question, q::YES) {
                return DepthSignal {
                    question: probe.question.to_string(),
                    strength: Strength::Weak,
                    categories: Vec::new(),
                };
            }
            let elaboration = probe
                .elaborations
                .iter()
                .filter_map(|id| answers.get(id))
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            let categories: Vec<String> = patterns
                .depth
                .matching(&elaboration)
                .map(|f| f.id.clone())
                .collect();
            let strength = if trimmed_len(&elaboration) > ELABORATED_LEN && !categories.is_empty() {
                Strength::Strong
            } else {
                Strength::Medium
            };
            DepthSignal {
                question: probe.question.to_string(),
                strength,
                categories,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClarificationSignal {
    pub needed: bool,
    pub no_count: usize,
}

/// "Non" answers among the occupation-knowledge questions.
pub fn clarification(answers: &AnswerStore) -> ClarificationSignal {
    let no_count = q::CLARIFICATION_QUESTIONS
        .iter()
        .filter(|id| answers.equals(id, q::NO))
        .count();
    ClarificationSignal {
        needed: no_count > 0,
        no_count,
    }
}

/// The training-organisation guide is offered once Q21 has a closed answer.
pub fn training_guide(answers: &AnswerStore) -> bool {
    answers.equals(q::ORGANISATIONS_COMPARED, q::YES) || answers.equals(q::ORGANISATIONS_COMPARED, q::NO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(pairs: &[(&str, &str)]) -> AnswerStore {
        pairs.iter().copied().collect()
    }

    fn patterns() -> std::sync::Arc<SignalPatterns> {
        SignalPatterns::embedded()
    }

    #[test]
    fn compensation_threshold_is_strict() {
        assert!(!compensation(&store(&[("Q3b", "21417")])).high);
        assert!(compensation(&store(&[("Q3b", "21418")])).high);
        let bad = compensation(&store(&[("Q3b", "abc")]));
        assert!(!bad.high);
        assert_eq!(bad.amount, None);
        assert!(!compensation(&AnswerStore::default()).high);
    }

    #[test]
    fn compensation_accepts_spaces_and_comma() {
        assert_eq!(parse_amount("21 500"), Some(21500.0));
        assert_eq!(parse_amount("25000,50 €"), Some(25000.5));
        assert_eq!(parse_amount(" 30000 euros"), Some(30000.0));
        assert_eq!(parse_amount("environ 30000"), None);
    }

    #[test]
    fn hardship_lists_matching_families() {
        let s = hardship(
            &store(&[("Q9", "Port de charges lourdes et BRUIT permanent")]),
            &patterns(),
        );
        assert!(s.detected);
        assert_eq!(s.families, vec!["pain".to_string(), "noise".to_string()]);

        let calm = hardship(&store(&[("Q9", "Bureau calme, bonne ambiance")]), &patterns());
        assert!(!calm.detected);
    }

    #[test]
    fn hardship_matches_multi_word_phrases() {
        let s = hardship(
            &store(&[("Q9", "Un accident du travail l'an dernier")]),
            &patterns(),
        );
        assert_eq!(s.families, vec!["health_risk".to_string()]);
    }

    #[test]
    fn closed_flags() {
        let a = store(&[("Q1b", "Oui"), ("Q1c", "Non"), ("Q3a", "Oui"), ("Q10b", "Non")]);
        assert!(disability(&a));
        assert!(!sick_leave(&a));
        assert!(low_qualification(&a));
        assert!(employer_not_informed(&a));
        assert!(!employer_not_informed(&AnswerStore::default()));
    }

    #[test]
    fn contract_kind_from_description() {
        assert_eq!(contract_kind(&store(&[("Q8", "CDI temps plein")])), ContractKind::Permanent);
        assert_eq!(contract_kind(&store(&[("Q8", "cdd de 18 mois")])), ContractKind::FixedTerm);
        assert_eq!(contract_kind(&store(&[("Q8", "Mission d'intérim")])), ContractKind::Temporary);
        assert_eq!(contract_kind(&store(&[("Q5", "Oui")])), ContractKind::FixedTerm);
        assert_eq!(contract_kind(&AnswerStore::default()), ContractKind::Unknown);
    }

    #[test]
    fn due_diligence_detects_each_family() {
        let s = due_diligence(
            &store(&[(
                "Q22",
                "J'ai visité le centre, observé un groupe et vu le plateau technique",
            )]),
            &patterns(),
        );
        let ids: Vec<_> = s.criteria.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["group_observation", "centre_visit", "workshop_visit"]);
        assert_eq!(s.count(), 3);
        assert_eq!(s.criteria[1].label, "Visite du centre de formation");
        assert!(!s.has("teaching_resources"));
    }

    #[test]
    fn recruiter_levels() {
        let p = patterns();
        let weak = recruiter(&store(&[("Q23", "Non")]), &p);
        assert_eq!(weak.strength, Strength::Weak);
        assert!(!weak.identified);
        assert!(!recruiter(&store(&[("Q23", " ab ")]), &p).identified);
        assert!(!recruiter(&AnswerStore::default(), &p).identified);

        let strong = recruiter(&store(&[("Q23", "Stage prévu chez Boulangerie Martin")]), &p);
        assert_eq!(strong.strength, Strength::Strong);
        assert_eq!(strong.basis, RecruiterBasis::Internship);

        let contact = recruiter(&store(&[("Q23", "J'ai rencontré le gérant du garage")]), &p);
        assert_eq!(contact.strength, Strength::Medium);
        assert_eq!(contact.basis, RecruiterBasis::Contact);

        let medium = recruiter(&store(&[("Q23", "La mairie de Toulon")]), &p);
        assert_eq!(medium.strength, Strength::Medium);
        assert_eq!(medium.basis, RecruiterBasis::Description);
        assert!(medium.identified);
    }

    #[test]
    fn depth_probes_rate_elaboration() {
        let p = patterns();
        let a = store(&[
            ("Q15", "Oui"),
            ("Q15a", "Entretien avec une boulangère"),
            ("Q19", "Oui"),
            ("Q19a", "ok"),
            ("Q21", "Non"),
        ]);
        let d = depth(&a, &p);
        assert_eq!(d.len(), 3);
        assert_eq!(d[0].strength, Strength::Strong);
        assert_eq!(d[0].categories, vec!["inquiry".to_string()]);
        assert_eq!(d[1].strength, Strength::Medium);
        assert_eq!(d[2].strength, Strength::Weak);
    }

    #[test]
    fn clarification_counts_no_answers() {
        let c = clarification(&store(&[("Q15", "Non"), ("Q16", "Oui"), ("Q19", "Non"), ("Q18", "Non")]));
        assert!(c.needed);
        assert_eq!(c.no_count, 2);
        assert!(!clarification(&AnswerStore::default()).needed);
    }

    #[test]
    fn training_guide_needs_a_closed_answer() {
        assert!(training_guide(&store(&[("Q21", "Non")])));
        assert!(training_guide(&store(&[("Q21", "Oui")])));
        assert!(!training_guide(&store(&[("Q21", "peut-être")])));
    }
}

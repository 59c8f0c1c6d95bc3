// src/questions.rs
//! Question identifiers and closed answer options used by the engine.
//!
//! Every identifier the visibility, signal and scoring modules depend on is
//! declared here once; the rule tables elsewhere reference these constants
//! instead of repeating string literals.

/// Closed "yes" answer.
pub const YES: &str = "Oui";
/// Closed "no" answer.
pub const NO: &str = "Non";

/// Seniority in the current position (free-text duration).
pub const TENURE: &str = "Q1a";
/// Recognised disabled worker.
pub const DISABILITY: &str = "Q1b";
/// Currently on sick leave.
pub const SICK_LEAVE: &str = "Q1c";
/// Highest diploma (closed, gates Q3a/Q3b).
pub const DIPLOMA: &str = "Q2";
/// Low-qualification worker (blue/white collar).
pub const LOW_QUALIFICATION: &str = "Q3a";
/// Gross annual compensation.
pub const COMPENSATION: &str = "Q3b";
/// Company has 50 employees or more.
pub const LARGE_COMPANY: &str = "Q4";
/// Fixed-term contract.
pub const FIXED_TERM: &str = "Q5";
/// Part-time work.
pub const PART_TIME: &str = "Q6";
/// Recognised unfit for the current position.
pub const UNFIT: &str = "Q7";
/// Free-text description of the current contract.
pub const CONTRACT: &str = "Q8";
/// Working conditions (free text).
pub const WORKING_CONDITIONS: &str = "Q9";
/// How the current job will be left.
pub const DEPARTURE: &str = "Q10";
/// Employer already informed of the project.
pub const EMPLOYER_INFORMED: &str = "Q10b";
/// Employer's sector of activity.
pub const SECTOR: &str = "Q11";
/// Target occupation.
pub const TARGET_OCCUPATION: &str = "Q12";
/// Training-engineering measures (CEP, VAE, CléA...).
pub const TRAINING_ENGINEERING: &str = "Q13";
/// Co-financing secured.
pub const CO_FINANCING: &str = "Q14";
/// Occupation inquiries carried out.
pub const INQUIRIES: &str = "Q15";
pub const INQUIRIES_WHO: &str = "Q15a";
pub const INQUIRIES_OUTCOME: &str = "Q15b";
pub const WORKING_CONDITIONS_KNOWN: &str = "Q16";
pub const OPENINGS_KNOWN: &str = "Q17";
pub const TRANSFERABLE_SKILLS: &str = "Q18";
/// Professional immersion carried out.
pub const IMMERSION: &str = "Q19";
pub const IMMERSION_WHERE: &str = "Q19a";
pub const IMMERSION_OUTCOME: &str = "Q19b";
pub const TRAINING_IDENTIFIED: &str = "Q20";
/// Several training organisations compared.
pub const ORGANISATIONS_COMPARED: &str = "Q21";
pub const ORGANISATIONS_LIST: &str = "Q21a";
/// How the chosen organisation was checked (free text).
pub const ORGANISATION_CHECKS: &str = "Q22";
/// Recruiter identified (free text or yes/no).
pub const RECRUITER: &str = "Q23";

pub const YES_NO_OPTIONS: &[&str] = &[YES, NO];

pub const DIPLOMA_OPTIONS: &[&str] = &["Sans diplôme", "CAP/BEP", "Bac", "Bac+2", "Bac+3 ou plus"];

/// Diploma options that route to the low-qualification question.
pub const DIPLOMAS_WITHOUT_BACCALAUREATE: &[&str] = &["Sans diplôme", "CAP/BEP"];
/// Diploma options that route to the compensation question.
pub const DIPLOMAS_WITH_BACCALAUREATE: &[&str] = &["Bac", "Bac+2", "Bac+3 ou plus"];

/// Options offered for the departure question.
pub const DEPARTURE_OPTIONS: &[&str] = &[
    "Démission",
    "Rupture conventionnelle",
    "Licenciement",
    "Autre",
];

/// Questions whose long answers count towards the maturity percentage.
pub const MATURITY_QUESTIONS: &[&str] = &[
    INQUIRIES,
    WORKING_CONDITIONS_KNOWN,
    OPENINGS_KNOWN,
    TRANSFERABLE_SKILLS,
    IMMERSION,
    TRAINING_IDENTIFIED,
    ORGANISATIONS_COMPARED,
    ORGANISATION_CHECKS,
    RECRUITER,
];

/// Occupation-knowledge questions; any "Non" calls for clarification work.
pub const CLARIFICATION_QUESTIONS: &[&str] =
    &[INQUIRIES, WORKING_CONDITIONS_KNOWN, OPENINGS_KNOWN, IMMERSION];

/// Closed yes/no questions, used by front-ends to pick an input widget.
pub const YES_NO_QUESTIONS: &[&str] = &[
    DISABILITY,
    SICK_LEAVE,
    LOW_QUALIFICATION,
    LARGE_COMPANY,
    FIXED_TERM,
    PART_TIME,
    UNFIT,
    EMPLOYER_INFORMED,
    TRAINING_ENGINEERING,
    CO_FINANCING,
    INQUIRIES,
    WORKING_CONDITIONS_KNOWN,
    OPENINGS_KNOWN,
    IMMERSION,
    ORGANISATIONS_COMPARED,
];

/// Options for a closed question, `None` for free-text questions.
pub fn closed_options(question_id: &str) -> Option<&'static [&'static str]> {
    match question_id {
        DIPLOMA => Some(DIPLOMA_OPTIONS),
        DEPARTURE => Some(DEPARTURE_OPTIONS),
        id if YES_NO_QUESTIONS.contains(&id) => Some(YES_NO_OPTIONS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diploma_routes_cover_every_option() {
        for opt in DIPLOMA_OPTIONS {
            let routed = DIPLOMAS_WITHOUT_BACCALAUREATE.contains(opt)
                || DIPLOMAS_WITH_BACCALAUREATE.contains(opt);
            assert!(routed, "{opt} routes nowhere");
        }
    }

    #[test]
    fn free_text_questions_have_no_options() {
        assert!(closed_options(TENURE).is_none());
        assert!(closed_options(RECRUITER).is_none());
        assert_eq!(closed_options(UNFIT), Some(YES_NO_OPTIONS));
    }
}

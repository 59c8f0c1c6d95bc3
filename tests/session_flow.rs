// tests/session_flow.rs
//
// A respondent walking through the shipped questionnaire: branching,
// purging of abandoned branches, progress and the final analysis.

use cep_questionnaire::scoring::{MaturityStatus, PriorityStatus};
use cep_questionnaire::{Analyzer, AnswerStore, ReferenceData, Respondent, Session, SessionError};
use std::path::Path;
use std::sync::Arc;

async fn session() -> Session {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let reference = ReferenceData::load_dir(dir).await.unwrap();
    Session::new(Arc::new(reference))
}

#[tokio::test]
async fn branching_changes_the_visible_count() {
    let mut s = session().await;
    let catalog = s.reference().questions.len();
    // Q3a, Q3b and the six elaborations start hidden.
    assert_eq!(s.progress().visible, catalog - 8);

    s.set_answer("Q2", "CAP/BEP").unwrap();
    assert_eq!(s.progress().visible, catalog - 7);

    s.set_answer("Q15", "Oui").unwrap();
    s.set_answer("Q21", "Oui").unwrap();
    assert_eq!(s.progress().visible, catalog - 3);
    assert_eq!(s.progress().answered, 3);
}

#[tokio::test]
async fn switching_diploma_discards_the_other_branch() {
    let mut s = session().await;
    s.set_answer("Q2", "Bac+2").unwrap();
    s.set_answer("Q3b", "30000").unwrap();
    assert_eq!(
        s.set_answer("Q3a", "Oui"),
        Err(SessionError::HiddenQuestion("Q3a".into()))
    );

    let purged = s.set_answer("Q2", "Sans diplôme").unwrap();
    assert_eq!(purged, vec!["Q3b".to_string()]);
    s.set_answer("Q3a", "Oui").unwrap();
    assert_eq!(s.answers().get("Q3a"), Some("Oui"));
}

#[tokio::test]
async fn completed_sample_scores_as_expected() {
    let mut s = session().await;
    s.set_respondent(Respondent::new("Nadia", "Benali")).unwrap();
    s.select_case_handler("marie").unwrap();

    let raw = std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/answers-sample.json"),
    )
    .unwrap();
    let snapshot: AnswerStore = serde_json::from_str(&raw).unwrap();
    let dropped = s.restore(snapshot);
    assert!(dropped.is_empty(), "{dropped:?}");
    assert!(s.progress().is_complete());

    let analyzer = Analyzer::with_default_patterns(Arc::new(s.reference().clone()));
    let r = analyzer.analyze(s.answers());

    let codes: Vec<_> = r.priority.details.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["P1", "P3", "P6", "P8", "P9", "P10"]);
    assert_eq!(r.priority.score, 14);
    assert_eq!(r.priority.status, PriorityStatus::High);

    assert_eq!(r.maturity.score, 4);
    assert_eq!(r.maturity.status, MaturityStatus::Developing);
    assert_eq!(r.maturity.due_diligence.count(), 2);
    assert!(r.maturity.recruiter.identified);
    assert!(r.eligibility.hardship.detected);
    assert!(r.eligibility.employer_not_informed);
}

#[tokio::test]
async fn reset_keeps_identity() {
    let mut s = session().await;
    s.set_respondent(Respondent::new("Nadia", "Benali")).unwrap();
    s.set_answer("Q1a", "2 ans").unwrap();
    s.reset();
    assert_eq!(s.progress().answered, 0);
    assert_eq!(s.respondent().display_name(), "Nadia Benali");
}

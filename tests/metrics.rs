// tests/metrics.rs
use cep_questionnaire::metrics::{
    install_prometheus, ANALYSES_TOTAL, ANSWERS_PURGED_TOTAL, MATURITY_PERCENTAGE, PRIORITY_SCORE,
};
use cep_questionnaire::reference::{Objective, Question};
use cep_questionnaire::{Analyzer, AnswerStore, ReferenceData, Session};
use std::sync::Arc;

fn reference() -> Arc<ReferenceData> {
    let questions = ["Q2", "Q3a", "Q3b"]
        .iter()
        .map(|id| Question {
            id: id.to_string(),
            text: format!("{id} ?"),
            section: String::new(),
            objective: Objective::Eligibility,
        })
        .collect();
    Arc::new(ReferenceData {
        questions,
        ..Default::default()
    })
}

// One recorder per process, so everything is checked from a single test.
#[test]
fn prometheus_exposition_contains_engine_series() {
    let handle = install_prometheus().expect("recorder should install once");
    let reference = reference();

    let answers: AnswerStore = [("Q3a", "Oui"), ("Q4", "Non")].into_iter().collect();
    let result = Analyzer::with_default_patterns(Arc::clone(&reference)).analyze(&answers);
    assert_eq!(result.priority.score, 6);

    let mut session = Session::new(reference);
    session.set_answer("Q2", "Bac").unwrap();
    session.set_answer("Q3b", "25000").unwrap();
    let purged = session.set_answer("Q2", "CAP/BEP").unwrap();
    assert_eq!(purged, vec!["Q3b".to_string()]);

    let text = handle.render();
    for needle in [
        ANALYSES_TOTAL,
        PRIORITY_SCORE,
        MATURITY_PERCENTAGE,
        ANSWERS_PURGED_TOTAL,
        r#"priority="standard""#,
        r#"maturity="to_build""#,
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
    assert!(install_prometheus().is_err());
}

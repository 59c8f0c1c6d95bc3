// src/answers.rs
//! Answer Store and the questionnaire session that owns it.
//!
//! The session replaces ambient controller state: respondent identity, the
//! selected case handler and the answers travel together in one value, so
//! several sessions (or tests) can run side by side.

use crate::reference::{CaseHandler, Question, ReferenceData};
use crate::visibility::{self, Progress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Mapping question id → answer. One entry per question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    entries: BTreeMap<String, String>,
}

impl AnswerStore {
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.entries.get(question_id).map(String::as_str)
    }

    /// Answer lowercased, empty when absent. Free-text classifiers work on this.
    pub fn lowercase(&self, question_id: &str) -> String {
        self.get(question_id).map(str::to_lowercase).unwrap_or_default()
    }

    /// Exact comparison against a closed option.
    pub fn equals(&self, question_id: &str, expected: &str) -> bool {
        self.get(question_id) == Some(expected)
    }

    /// Present and not blank.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.get(question_id).is_some_and(|a| !a.trim().is_empty())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, question_id: &str, value: String) {
        self.entries.insert(question_id.to_string(), value);
    }

    pub(crate) fn remove(&mut self, question_id: &str) -> Option<String> {
        self.entries.remove(question_id)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    pub first_name: String,
    pub last_name: String,
}

impl Respondent {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown question id `{0}`")]
    UnknownQuestion(String),
    #[error("question `{0}` is not visible with the current answers")]
    HiddenQuestion(String),
    #[error("unknown case handler `{0}`")]
    UnknownCaseHandler(String),
    #[error("respondent first name and last name are both required")]
    IncompleteIdentity,
}

/// One respondent's questionnaire run.
#[derive(Debug, Clone)]
pub struct Session {
    reference: Arc<ReferenceData>,
    respondent: Respondent,
    case_handler: Option<CaseHandler>,
    answers: AnswerStore,
}

impl Session {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            reference,
            respondent: Respondent::default(),
            case_handler: None,
            answers: AnswerStore::default(),
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn respondent(&self) -> &Respondent {
        &self.respondent
    }

    pub fn case_handler(&self) -> Option<&CaseHandler> {
        self.case_handler.as_ref()
    }

    pub fn set_respondent(&mut self, respondent: Respondent) -> Result<(), SessionError> {
        if respondent.first_name.trim().is_empty() || respondent.last_name.trim().is_empty() {
            return Err(SessionError::IncompleteIdentity);
        }
        self.respondent = Respondent::new(
            respondent.first_name.trim(),
            respondent.last_name.trim(),
        );
        Ok(())
    }

    pub fn select_case_handler(&mut self, id: &str) -> Result<&CaseHandler, SessionError> {
        let handler = self
            .reference
            .case_handler(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownCaseHandler(id.to_string()))?;
        Ok(&*self.case_handler.insert(handler))
    }

    /// Store an answer (a blank value clears it), then purge answers of
    /// questions that the change hid. Returns the purged ids.
    pub fn set_answer(
        &mut self,
        question_id: &str,
        value: impl Into<String>,
    ) -> Result<Vec<String>, SessionError> {
        if self.reference.question(question_id).is_none() {
            return Err(SessionError::UnknownQuestion(question_id.to_string()));
        }
        if !visibility::is_visible(question_id, &self.answers) {
            return Err(SessionError::HiddenQuestion(question_id.to_string()));
        }

        let value = value.into();
        if value.trim().is_empty() {
            self.answers.remove(question_id);
        } else {
            self.answers.insert(question_id, value);
        }
        Ok(self.purge_hidden())
    }

    /// Remove an answer and anything it was gating.
    pub fn clear_answer(&mut self, question_id: &str) -> Vec<String> {
        self.answers.remove(question_id);
        self.purge_hidden()
    }

    /// Replace the answers with a persisted snapshot; unknown and hidden
    /// entries are dropped and reported.
    pub fn restore(&mut self, snapshot: AnswerStore) -> Vec<String> {
        self.answers = snapshot;
        let mut dropped: Vec<String> = self
            .answers
            .ids()
            .filter(|id| self.reference.question(id).is_none())
            .map(str::to_string)
            .collect();
        for id in &dropped {
            self.answers.remove(id);
        }
        dropped.extend(self.purge_hidden());
        dropped
    }

    /// Start over: answers are dropped, identity and case handler kept.
    pub fn reset(&mut self) {
        self.answers.clear();
    }

    pub fn visible_questions(&self) -> Vec<&Question> {
        visibility::visible_questions(&self.reference.questions, &self.answers)
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(&self.reference.questions, &self.answers)
    }

    fn purge_hidden(&mut self) -> Vec<String> {
        let mut purged = Vec::new();
        loop {
            let hidden = visibility::hidden_answers(&self.answers);
            if hidden.is_empty() {
                break;
            }
            for id in hidden {
                self.answers.remove(&id);
                purged.push(id);
            }
        }
        if !purged.is_empty() {
            debug!(purged = ?purged, "purged answers of hidden questions");
            crate::metrics::record_purged(purged.len());
        }
        purged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Objective;

    fn reference() -> Arc<ReferenceData> {
        let questions = ["Q1a", "Q2", "Q3a", "Q3b", "Q15", "Q15a", "Q15b", "Q16"]
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
            case_handlers: vec![CaseHandler {
                id: "cindy".into(),
                name: "Cindy Lecouf".into(),
                email: "c.lecouf@example.org".into(),
            }],
            ..Default::default()
        })
    }

    #[test]
    fn store_serializes_as_flat_object() {
        let store: AnswerStore = [("Q1a", "2 ans"), ("Q2", "Bac")].into_iter().collect();
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"Q1a":"2 ans","Q2":"Bac"}"#);
        let back: AnswerStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn changing_the_gate_purges_the_abandoned_branch() {
        let mut s = Session::new(reference());
        s.set_answer("Q2", "CAP/BEP").unwrap();
        s.set_answer("Q3a", "Oui").unwrap();
        let purged = s.set_answer("Q2", "Bac").unwrap();
        assert_eq!(purged, vec!["Q3a".to_string()]);
        assert_eq!(s.answers().get("Q3a"), None);
        assert_eq!(s.answers().get("Q2"), Some("Bac"));
    }

    #[test]
    fn clearing_the_gate_hides_and_purges_dependents() {
        let mut s = Session::new(reference());
        s.set_answer("Q15", "Oui").unwrap();
        s.set_answer("Q15a", "Un boulanger").unwrap();
        s.set_answer("Q15b", "Horaires de nuit").unwrap();

        let mut purged = s.clear_answer("Q15");
        purged.sort();
        assert_eq!(purged, vec!["Q15a".to_string(), "Q15b".to_string()]);
        assert!(s.answers().is_empty());
    }

    #[test]
    fn blank_value_clears_like_clear_answer() {
        let mut s = Session::new(reference());
        s.set_answer("Q15", "Oui").unwrap();
        s.set_answer("Q15a", "Un boulanger").unwrap();
        let purged = s.set_answer("Q15", "   ").unwrap();
        assert_eq!(purged, vec!["Q15a".to_string()]);
        assert_eq!(s.answers().get("Q15"), None);
    }

    #[test]
    fn rejects_unknown_and_hidden_questions() {
        let mut s = Session::new(reference());
        assert_eq!(
            s.set_answer("Q77", "x"),
            Err(SessionError::UnknownQuestion("Q77".into()))
        );
        assert_eq!(
            s.set_answer("Q3a", "Oui"),
            Err(SessionError::HiddenQuestion("Q3a".into()))
        );
    }

    #[test]
    fn restore_drops_stale_and_unknown_entries() {
        let mut s = Session::new(reference());
        let snapshot: AnswerStore = [("Q2", "Bac"), ("Q3a", "Oui"), ("Q42", "?"), ("Q1a", "3 ans")]
            .into_iter()
            .collect();
        let mut dropped = s.restore(snapshot);
        dropped.sort();
        assert_eq!(dropped, vec!["Q3a".to_string(), "Q42".to_string()]);
        assert_eq!(s.answers().len(), 2);
    }

    #[test]
    fn progress_follows_visibility() {
        let mut s = Session::new(reference());
        assert_eq!(s.progress().visible, 4);
        s.set_answer("Q15", "Oui").unwrap();
        let p = s.progress();
        assert_eq!(p.visible, 6);
        assert_eq!(p.answered, 1);
    }

    #[test]
    fn identity_and_case_handler() {
        let mut s = Session::new(reference());
        assert_eq!(
            s.set_respondent(Respondent::new("Ana", " ")),
            Err(SessionError::IncompleteIdentity)
        );
        s.set_respondent(Respondent::new(" Ana ", "Martin")).unwrap();
        assert_eq!(s.respondent().display_name(), "Ana Martin");

        assert_eq!(
            s.select_case_handler("nobody").unwrap_err(),
            SessionError::UnknownCaseHandler("nobody".into())
        );
        assert_eq!(s.select_case_handler("cindy").unwrap().name, "Cindy Lecouf");

        s.set_answer("Q1a", "2 ans").unwrap();
        s.reset();
        assert!(s.answers().is_empty());
        assert!(s.case_handler().is_some());
    }
}

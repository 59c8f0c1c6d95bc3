// src/signals/matching.rs
//! Case-insensitive substring matching of free text against reference lists.

use crate::answers::AnswerStore;
use crate::questions as q;
use crate::reference::{DecliningSector, PriorityOccupation, ReferenceData, ReferenceEntry};
use serde::Serialize;

/// Entries matched by one free-text answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListMatch<T> {
    pub matches: Vec<T>,
}

impl<T> ListMatch<T> {
    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }
}

impl<T> Default for ListMatch<T> {
    fn default() -> Self {
        Self {
            matches: Vec::new(),
        }
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(needle)
}

/// Bidirectional match: the entry's title, category or code contains the
/// answer, or the answer contains the entry's title or code.
pub fn matches_entry<E: ReferenceEntry>(answer: &str, entry: &E) -> bool {
    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        return false;
    }
    contains(entry.title(), &answer)
        || contains(entry.category(), &answer)
        || contains(entry.code(), &answer)
        || contains(&answer, &entry.title().to_lowercase())
        || contains(&answer, &entry.code().to_lowercase())
}

/// All entries matching `answer`, in list order.
pub fn match_entries<E: ReferenceEntry + Clone>(answer: &str, entries: &[E]) -> ListMatch<E> {
    ListMatch {
        matches: entries
            .iter()
            .filter(|e| matches_entry(answer, *e))
            .cloned()
            .collect(),
    }
}

/// One-directional search used by the "check the list" helper: entries whose
/// title, category or code contains `term`.
pub fn lookup<'a, E: ReferenceEntry>(term: &str, entries: &'a [E]) -> Vec<&'a E> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    entries
        .iter()
        .filter(|e| {
            contains(e.title(), &term) || contains(e.category(), &term) || contains(e.code(), &term)
        })
        .collect()
}

pub fn declining_sector(answers: &AnswerStore, reference: &ReferenceData) -> ListMatch<DecliningSector> {
    match answers.get(q::SECTOR) {
        Some(a) => match_entries(a, &reference.sectors),
        None => ListMatch::default(),
    }
}

pub fn priority_occupation(
    answers: &AnswerStore,
    reference: &ReferenceData,
) -> ListMatch<PriorityOccupation> {
    match answers.get(q::TARGET_OCCUPATION) {
        Some(a) => match_entries(a, &reference.occupations),
        None => ListMatch::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sectors() -> Vec<DecliningSector> {
        vec![
            DecliningSector {
                title: "Boulangerie-pâtisserie".into(),
                section: "Industrie manufacturière".into(),
                code: "1071C".into(),
            },
            DecliningSector {
                title: "Imprimerie".into(),
                section: "Industrie manufacturière".into(),
                code: "1812Z".into(),
            },
        ]
    }

    #[test]
    fn answer_contained_in_title() {
        let m = match_entries("boulangerie", &sectors());
        assert!(m.is_match());
        assert_eq!(m.matches[0].code, "1071C");
    }

    #[test]
    fn code_typed_verbatim() {
        let m = match_entries("1071C", &sectors());
        assert_eq!(m.matches.len(), 1);
        assert_eq!(m.matches[0].title, "Boulangerie-pâtisserie");
    }

    #[test]
    fn title_contained_in_answer() {
        let m = match_entries("Je travaille dans l'imprimerie depuis 10 ans", &sectors());
        assert_eq!(m.matches.len(), 1);
        assert_eq!(m.matches[0].code, "1812Z");
    }

    #[test]
    fn category_match_returns_every_entry_of_the_section() {
        let m = match_entries("industrie", &sectors());
        assert_eq!(m.matches.len(), 2);
    }

    #[test]
    fn blank_answer_matches_nothing() {
        assert!(!match_entries("   ", &sectors()).is_match());
        assert!(!match_entries("informatique", &sectors()).is_match());
    }

    #[test]
    fn lookup_is_one_directional() {
        let list = sectors();
        assert_eq!(lookup("pâtiss", &list).len(), 1);
        assert!(lookup("Je travaille dans l'imprimerie", &list).is_empty());
        assert!(lookup("", &list).is_empty());
    }

    #[test]
    fn reads_the_sector_answer() {
        let reference = ReferenceData {
            sectors: sectors(),
            ..Default::default()
        };
        let answers: AnswerStore = [("Q11", "Imprimerie")].into_iter().collect();
        assert!(declining_sector(&answers, &reference).is_match());
        assert!(!priority_occupation(&answers, &reference).is_match());
    }
}

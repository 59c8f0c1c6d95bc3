// src/reference/loader.rs
//! Reference data loading.
//!
//! The four required resources are fetched concurrently and parsed into a
//! [`ReferenceData`]. Any failure is fatal for the session: scoring rules
//! depend on the lists, so there is no partial result and no retry here.

use super::{
    CaseHandler, DecliningSector, PriorityOccupation, PriorityRuleInfo, Question, ReferenceData,
};
use crate::scoring::priority::MAX_PRIORITY_SCORE;
use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

static QUESTION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Q\d+[a-z]?$").expect("question id regex"));

/// One static resource of the reference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Questions,
    PrioritySchedule,
    PriorityOccupations,
    DecliningSectors,
    /// Optional: a missing directory only disables case-handler selection.
    CaseHandlers,
}

impl Resource {
    pub fn file_name(self) -> &'static str {
        match self {
            Resource::Questions => "questions.json",
            Resource::PrioritySchedule => "bareme-priorites.json",
            Resource::PriorityOccupations => "metiers-prioritaires.json",
            Resource::DecliningSectors => "secteurs-declin.json",
            Resource::CaseHandlers => "charges-projets.json",
        }
    }
}

/// Where reference resources come from (filesystem, embedded, remote...).
#[async_trait::async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Raw JSON for `resource`, `Ok(None)` when the resource does not exist.
    async fn fetch(&self, resource: Resource) -> Result<Option<String>>;
    fn name(&self) -> &'static str;
}

/// Reads resources from a data directory.
#[derive(Debug, Clone)]
pub struct FsReferenceSource {
    dir: PathBuf,
}

impl FsReferenceSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait::async_trait]
impl ReferenceSource for FsReferenceSource {
    async fn fetch(&self, resource: Resource) -> Result<Option<String>> {
        let path = self.dir.join(resource.file_name());
        match tokio::fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

/// Resources held in memory; handy for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    resources: HashMap<Resource, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: Resource, json: impl Into<String>) -> Self {
        self.resources.insert(resource, json.into());
        self
    }
}

#[async_trait::async_trait]
impl ReferenceSource for InMemorySource {
    async fn fetch(&self, resource: Resource) -> Result<Option<String>> {
        Ok(self.resources.get(&resource).cloned())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[derive(Deserialize)]
struct QuestionsFile {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct ScheduleFile {
    priorites: Vec<PriorityRuleInfo>,
}

#[derive(Deserialize)]
struct OccupationsFile {
    metiers: Vec<PriorityOccupation>,
}

#[derive(Deserialize)]
struct SectorsFile {
    secteurs: Vec<DecliningSector>,
}

#[derive(Deserialize)]
struct CaseHandlersFile {
    #[serde(rename = "charges")]
    handlers: Vec<CaseHandler>,
}

impl ReferenceData {
    /// Fetch all resources concurrently and build the store.
    pub async fn load(source: &dyn ReferenceSource) -> Result<Self> {
        let (questions, schedule, occupations, sectors, handlers) = tokio::try_join!(
            source.fetch(Resource::Questions),
            source.fetch(Resource::PrioritySchedule),
            source.fetch(Resource::PriorityOccupations),
            source.fetch(Resource::DecliningSectors),
            source.fetch(Resource::CaseHandlers),
        )
        .with_context(|| format!("loading reference data from {} source", source.name()))?;

        let questions: QuestionsFile = parse_required(Resource::Questions, questions)?;
        let schedule: ScheduleFile = parse_required(Resource::PrioritySchedule, schedule)?;
        let occupations: OccupationsFile =
            parse_required(Resource::PriorityOccupations, occupations)?;
        let sectors: SectorsFile = parse_required(Resource::DecliningSectors, sectors)?;
        let case_handlers = match handlers {
            Some(raw) => parse::<CaseHandlersFile>(Resource::CaseHandlers, &raw)?.handlers,
            None => {
                debug!("no case-handler directory; selection disabled");
                Vec::new()
            }
        };

        let data = Self {
            questions: validate_catalog(questions.questions)?,
            priority_schedule: schedule.priorites,
            occupations: occupations.metiers,
            sectors: sectors.secteurs,
            case_handlers,
        };

        if data.schedule_total() != MAX_PRIORITY_SCORE {
            warn!(
                schedule_total = data.schedule_total(),
                max = MAX_PRIORITY_SCORE,
                "priority schedule total differs from the fixed maximum score"
            );
        }

        info!(
            questions = data.questions.len(),
            occupations = data.occupations.len(),
            sectors = data.sectors.len(),
            case_handlers = data.case_handlers.len(),
            "reference data loaded"
        );
        Ok(data)
    }

    /// Convenience: load from a data directory on disk.
    pub async fn load_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::load(&FsReferenceSource::new(dir)).await
    }
}

fn parse_required<T: DeserializeOwned>(resource: Resource, raw: Option<String>) -> Result<T> {
    let raw = raw.ok_or_else(|| anyhow!("missing reference resource {}", resource.file_name()))?;
    parse(resource, &raw)
}

fn parse<T: DeserializeOwned>(resource: Resource, raw: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("parsing {}", resource.file_name()))
}

/// Keep only `Q<n>[suffix]` entries (the catalog also carries non-question
/// rows) and reject duplicate identifiers.
fn validate_catalog(questions: Vec<Question>) -> Result<Vec<Question>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(questions.len());
    for q in questions {
        if !QUESTION_ID.is_match(&q.id) {
            debug!(id = %q.id, "skipping non-question catalog entry");
            continue;
        }
        if !seen.insert(q.id.clone()) {
            bail!("duplicate question id {} in {}", q.id, Resource::Questions.file_name());
        }
        out.push(q);
    }
    if out.is_empty() {
        bail!("question catalog is empty");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTIONS: &str = r#"{"questions":[
        {"id":"Q1a","question":"Ancienneté ?","section":"Situation","objectif":"éligibilité"},
        {"id":"A1","question":"Alerte","section":"","objectif":"éligibilité"},
        {"id":"Q2","question":"Diplôme ?","section":"Situation","objectif":"priorité"}
    ]}"#;

    fn full_source() -> InMemorySource {
        InMemorySource::new()
            .with(Resource::Questions, QUESTIONS)
            .with(
                Resource::PrioritySchedule,
                r#"{"priorites":[{"code":"P1","libelle":"Peu qualifié","points":5}]}"#,
            )
            .with(
                Resource::PriorityOccupations,
                r#"{"metiers":[{"metier":"Aide-soignant","domaine":"Santé","code_rome":"J1501"}]}"#,
            )
            .with(
                Resource::DecliningSectors,
                r#"{"secteurs":[{"intitule":"Boulangerie","section":"Industrie","code_ape":"1071C"}]}"#,
            )
    }

    #[tokio::test]
    async fn loads_and_filters_non_question_rows() {
        let data = ReferenceData::load(&full_source()).await.unwrap();
        let ids: Vec<_> = data.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["Q1a", "Q2"]);
        assert_eq!(data.occupations[0].code, "J1501");
        assert!(data.case_handlers.is_empty());
    }

    #[tokio::test]
    async fn missing_required_resource_is_fatal() {
        let src = InMemorySource::new().with(Resource::Questions, QUESTIONS);
        let err = ReferenceData::load(&src).await.unwrap_err();
        assert!(format!("{err:#}").contains("bareme-priorites.json"));
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let dup = r#"{"questions":[
            {"id":"Q1a","question":"a","objectif":"éligibilité"},
            {"id":"Q1a","question":"b","objectif":"éligibilité"}
        ]}"#;
        let src = full_source().with(Resource::Questions, dup);
        let err = ReferenceData::load(&src).await.unwrap_err();
        assert!(err.to_string().contains("duplicate question id Q1a"));
    }

    #[tokio::test]
    async fn malformed_json_names_the_resource() {
        let src = full_source().with(Resource::DecliningSectors, "{not json");
        let err = ReferenceData::load(&src).await.unwrap_err();
        assert!(format!("{err:#}").contains("secteurs-declin.json"));
    }
}

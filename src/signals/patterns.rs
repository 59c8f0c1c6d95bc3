// src/signals/patterns.rs
//! Named regex families for the free-text classifiers, loaded from TOML.
//!
//! The embedded `config/signals.toml` is the default; `CEP_SIGNALS_PATH`
//! points at an override. Adding a family is a config change only.

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_SIGNALS_PATH: &str = "config/signals.toml";
pub const ENV_SIGNALS_PATH: &str = "CEP_SIGNALS_PATH";

const EMBEDDED_SIGNALS: &str = include_str!("../../config/signals.toml");

static EMBEDDED: Lazy<Arc<SignalPatterns>> = Lazy::new(|| {
    Arc::new(SignalPatterns::from_toml_str(EMBEDDED_SIGNALS).expect("embedded signals.toml"))
});

#[derive(Debug, Clone, Deserialize)]
struct FamilyCfg {
    id: String,
    label: String,
    pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RecruiterCfg {
    internship: FamilyCfg,
    contact: FamilyCfg,
}

#[derive(Debug, Clone, Deserialize)]
struct SignalsRoot {
    #[serde(default)]
    hardship: Vec<FamilyCfg>,
    #[serde(default)]
    due_diligence: Vec<FamilyCfg>,
    recruiter: RecruiterCfg,
    #[serde(default)]
    depth: Vec<FamilyCfg>,
}

/// One compiled family: stable id, display label, regex.
#[derive(Debug, Clone)]
pub struct PatternFamily {
    pub id: String,
    pub label: String,
    re: Regex,
}

impl PatternFamily {
    fn compile(group: &str, cfg: FamilyCfg) -> Result<Self> {
        let re = Regex::new(&cfg.pattern)
            .map_err(|e| anyhow!("{} family `{}` regex error: {}", group, cfg.id, e))?;
        Ok(Self {
            id: cfg.id,
            label: cfg.label,
            re,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }
}

/// Ordered list of families; evaluation keeps config order.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    families: Vec<PatternFamily>,
}

impl PatternSet {
    fn compile(group: &str, cfgs: Vec<FamilyCfg>) -> Result<Self> {
        let mut families = Vec::with_capacity(cfgs.len());
        for cfg in cfgs {
            if families.iter().any(|f: &PatternFamily| f.id == cfg.id) {
                return Err(anyhow!("{} family `{}` defined twice", group, cfg.id));
            }
            families.push(PatternFamily::compile(group, cfg)?);
        }
        Ok(Self { families })
    }

    /// Families matching `text`, in config order.
    pub fn matching<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a PatternFamily> + 'a {
        self.families.iter().filter(move |f| f.is_match(text))
    }

    pub fn any_match(&self, text: &str) -> bool {
        self.families.iter().any(|f| f.is_match(text))
    }

    pub fn get(&self, id: &str) -> Option<&PatternFamily> {
        self.families.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// All pattern groups the classifiers use.
#[derive(Debug, Clone)]
pub struct SignalPatterns {
    pub hardship: PatternSet,
    pub due_diligence: PatternSet,
    pub recruiter_internship: PatternFamily,
    pub recruiter_contact: PatternFamily,
    pub depth: PatternSet,
}

impl SignalPatterns {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let cfg: SignalsRoot = toml::from_str(toml_str).context("parsing signal patterns TOML")?;
        Ok(Self {
            hardship: PatternSet::compile("hardship", cfg.hardship)?,
            due_diligence: PatternSet::compile("due_diligence", cfg.due_diligence)?,
            recruiter_internship: PatternFamily::compile("recruiter", cfg.recruiter.internship)?,
            recruiter_contact: PatternFamily::compile("recruiter", cfg.recruiter.contact)?,
            depth: PatternSet::compile("depth", cfg.depth)?,
        })
    }

    /// Patterns shipped with the crate.
    pub fn embedded() -> Arc<Self> {
        Arc::clone(&EMBEDDED)
    }

    /// Load from `path`; a missing file falls back to the embedded default,
    /// a malformed one is an error.
    pub fn from_path(path: &Path) -> Result<Arc<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let patterns = Self::from_toml_str(&content)
                    .with_context(|| format!("loading signal patterns from {}", path.display()))?;
                info!(
                    path = %path.display(),
                    hardship = patterns.hardship.len(),
                    due_diligence = patterns.due_diligence.len(),
                    depth = patterns.depth.len(),
                    "signal patterns loaded"
                );
                Ok(Arc::new(patterns))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "signal patterns file not found; using embedded default");
                Ok(Self::embedded())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// `CEP_SIGNALS_PATH`, else `config/signals.toml`.
    pub fn from_env() -> Result<Arc<Self>> {
        let path = std::env::var(ENV_SIGNALS_PATH)
            .unwrap_or_else(|_| DEFAULT_SIGNALS_PATH.to_string());
        Self::from_path(Path::new(&path))
    }
}

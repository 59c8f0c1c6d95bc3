// src/lib.rs
// Public library surface for the CLI and integration tests.

pub mod analysis;
pub mod answers;
pub mod config;
pub mod debug;
pub mod guidance;
pub mod metrics;
pub mod questions;
pub mod reference;
pub mod scoring;
pub mod signals;
pub mod visibility;

// ---- Re-exports for stable public API ----
pub use crate::analysis::{AnalysisResult, Analyzer};
pub use crate::answers::{AnswerStore, Respondent, Session, SessionError};
pub use crate::reference::ReferenceData;
pub use crate::signals::SignalPatterns;
pub use crate::visibility::{is_visible, Progress};

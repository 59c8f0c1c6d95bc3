//! CEP questionnaire: command-line entrypoint.
//! Loads the reference data and signal patterns, then scores an answer file.

use anyhow::{Context, Result};
use cep_questionnaire::analysis::Analyzer;
use cep_questionnaire::answers::{AnswerStore, Respondent, Session};
use cep_questionnaire::config::AppConfig;
use cep_questionnaire::guidance::{self, ReportContext};
use cep_questionnaire::reference::ReferenceData;
use cep_questionnaire::signals::{matching, SignalPatterns};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "cep-questionnaire",
    about = "Score a professional-retraining questionnaire (eligibility, priority, maturity)",
    version
)]
struct Cli {
    /// Override CEP_DATA_DIR
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Override CEP_SIGNALS_PATH
    #[arg(long, global = true)]
    signals: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse an answer file and print the report
    Analyze(AnalyzeArgs),
    /// List the questions visible for an answer file, with progress
    Visible {
        #[arg(long)]
        answers: PathBuf,
    },
    /// Search the declining-sector or priority-occupation list
    Lookup {
        #[arg(value_enum)]
        list: ListKind,
        term: String,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// JSON object mapping question id to answer
    #[arg(long)]
    answers: PathBuf,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    /// Case handler id from the directory
    #[arg(long)]
    case_handler: Option<String>,
    /// Report date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Drop answers to questions that are hidden by the branching rules
    #[arg(long)]
    strict: bool,
    /// Emit JSON instead of the text report
    #[arg(long)]
    json: bool,
    /// Print Prometheus metrics after the report
    #[arg(long)]
    metrics: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ListKind {
    Sector,
    Occupation,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.signals {
        config.signals_path = path;
    }
    config.init_tracing();

    let reference = Arc::new(
        ReferenceData::load_dir(config.data_dir.clone())
            .await
            .with_context(|| format!("reference data in {}", config.data_dir.display()))?,
    );

    match cli.command {
        Command::Analyze(args) => {
            let patterns = SignalPatterns::from_path(&config.signals_path)?;
            analyze(reference, patterns, args).await
        }
        Command::Visible { answers } => visible(reference, &answers).await,
        Command::Lookup { list, term } => {
            lookup(&reference, list, &term);
            Ok(())
        }
    }
}

async fn read_answers(path: &Path) -> Result<AnswerStore> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing answers in {}", path.display()))
}

async fn analyze(
    reference: Arc<ReferenceData>,
    patterns: Arc<SignalPatterns>,
    args: AnalyzeArgs,
) -> Result<()> {
    let prometheus = if args.metrics {
        Some(cep_questionnaire::metrics::install_prometheus()?)
    } else {
        None
    };

    let mut session = Session::new(Arc::clone(&reference));
    let snapshot = read_answers(&args.answers).await?;
    let answers = if args.strict {
        let dropped = session.restore(snapshot);
        if !dropped.is_empty() {
            warn!(dropped = ?dropped, "ignored answers to unknown or hidden questions");
        }
        session.answers().clone()
    } else {
        snapshot
    };

    if let (Some(first), Some(last)) = (&args.first_name, &args.last_name) {
        session.set_respondent(Respondent::new(first.as_str(), last.as_str()))?;
    }
    if let Some(id) = &args.case_handler {
        session.select_case_handler(id)?;
    }

    let analyzer = Analyzer::new(reference, patterns);
    let result = analyzer.analyze(&answers);
    info!(
        score = result.priority.score,
        maturity = result.maturity.percentage,
        "analysis complete"
    );

    if args.json {
        let doc = json!({
            "respondent": session.respondent(),
            "case_handler": session.case_handler(),
            "analysis": &result,
            "alerts": guidance::alerts(&result),
            "prescription": guidance::prescription(&result),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        let ctx = ReportContext {
            respondent: session.respondent(),
            case_handler: session.case_handler(),
            date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        };
        print!("{}", guidance::render_text(&result, &ctx));
    }

    if let Some(handle) = prometheus {
        println!("\n{}", handle.render());
    }
    Ok(())
}

async fn visible(reference: Arc<ReferenceData>, path: &Path) -> Result<()> {
    let mut session = Session::new(reference);
    let dropped = session.restore(read_answers(path).await?);
    if !dropped.is_empty() {
        warn!(dropped = ?dropped, "ignored answers to unknown or hidden questions");
    }
    for q in session.visible_questions() {
        let mark = if session.answers().is_answered(&q.id) {
            "x"
        } else {
            " "
        };
        println!("[{mark}] {:<5} {} ({})", q.id, q.text, q.objective.label());
    }
    let progress = session.progress();
    println!(
        "{}/{} answered ({:.0}%)",
        progress.answered,
        progress.visible,
        progress.percent()
    );
    Ok(())
}

fn lookup(reference: &ReferenceData, list: ListKind, term: &str) {
    let rows: Vec<String> = match list {
        ListKind::Sector => matching::lookup(term, &reference.sectors)
            .into_iter()
            .map(|s| format!("{} | {} | {}", s.code, s.title, s.section))
            .collect(),
        ListKind::Occupation => matching::lookup(term, &reference.occupations)
            .into_iter()
            .map(|o| format!("{} | {} | {}", o.code, o.title, o.domain))
            .collect(),
    };
    if rows.is_empty() {
        println!("no entry matches \"{term}\"");
    }
    for row in rows {
        println!("{row}");
    }
}

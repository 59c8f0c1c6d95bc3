// src/guidance.rs
//! Natural-language guidance derived from an [`AnalysisResult`]: alerts per
//! section, the personalised prescription and a plain-text report.

use crate::analysis::AnalysisResult;
use crate::answers::Respondent;
use crate::reference::CaseHandler;
use crate::scoring::{EligibilityStatus, MaturityStatus, PriorityStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;

pub const TRAINING_GUIDE_URL: &str =
    "https://www.transitionspro-paca.fr/telechargement/10630/?tmstv=1767013763";

pub const REPORT_TITLE: &str = "Questionnaire préalable au projet de transition professionnelle";
pub const PROGRAM_NAME: &str = "Transitions Pro PACA";

const PRESCRIPTION_INTRO: &str =
    "Suite à l'évaluation de votre projet de reconversion professionnelle, voici nos recommandations :";

const CASE_HANDLER_INTRO: &str = "Après avoir rencontré un conseiller en évolution professionnelle, nous vous invitons à revenir vers votre chargé·e de projets Transitions Pro PACA :";

pub const NEXT_STEPS: &[&str] = &[
    "Présenter cette prescription à votre conseiller CEP",
    "Constituer votre dossier avec les pièces justificatives",
    "Finaliser le plan de financement",
    "Déposer votre demande d'autorisation d'absence",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Eligibility,
    Priority,
    Maturity,
}

impl Section {
    pub fn heading(self) -> &'static str {
        match self {
            Section::Eligibility => "ÉLIGIBILITÉ",
            Section::Priority => "NIVEAU DE PRIORITÉ",
            Section::Maturity => "MATURITÉ DU PROJET",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

impl Severity {
    fn marker(self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Success => "✓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub section: Section,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Alert {
    fn new(section: Section, severity: Severity, title: &str, message: impl Into<String>) -> Self {
        Self {
            section,
            severity,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// Alerts in display order: eligibility, then priority, then maturity.
pub fn alerts(result: &AnalysisResult) -> Vec<Alert> {
    use Section::*;
    use Severity::*;

    let elig = &result.eligibility;
    let prio = &result.priority;
    let mat = &result.maturity;
    let mut out = Vec::new();

    if elig.tenure.insufficient {
        out.push(Alert::new(
            Eligibility,
            Warning,
            "Alerte",
            "Il faudra avoir 12 mois d'ancienneté à la date d'entrée en formation",
        ));
    }
    if elig.tenure.high {
        out.push(Alert::new(
            Eligibility,
            Warning,
            "Alerte",
            "Le taux de mise en œuvre de la reconversion décline après 5 ans d'ancienneté. \
             Compte tenu de votre ancienneté, nous vous invitons à faire preuve de la plus grande \
             vigilance lors de votre demande d'autorisation d'absence et à anticiper et accepter \
             les futurs freins : mettre votre CV à jour, vous préparer pour les entretiens \
             d'embauche à passer, envisager une perte de vos indemnités de licenciement, vous \
             préparer à vivre une nouvelle période d'essai, à perdre des congés, à voir votre \
             rémunération baisser...",
        ));
    }
    if elig.disability {
        out.push(Alert::new(
            Eligibility,
            Info,
            "Information",
            "Du fait de la reconnaissance de votre statut de travailleur handicapé, nous vous \
             invitons à solliciter un accompagnement renforcé auprès de Cap Emploi, de la médecine \
             du travail ou encore de l'éventuel référent au sein de l'organisme de formation.",
        ));
    }
    if elig.compensation.high {
        out.push(Alert::new(
            Eligibility,
            Warning,
            "Attention",
            "Votre rémunération est supérieure à la moyenne des rémunérations prises en charge \
             dans le cadre des projets de transition professionnelle par Transitions Pro PACA. Cet \
             élément risque de faire réagir négativement la commission d'instruction. Nous vous \
             invitons à étudier différentes pistes pour compenser : suivre une partie de la \
             formation hors temps de travail, identifier un organisme de formation encore plus \
             compétitif en coût et en durée, trouver des solutions de cofinancement y compris chez \
             le recruteur...",
        ));
    }
    if elig.hardship.detected {
        out.push(Alert::new(
            Eligibility,
            Warning,
            "Alerte pour le chargé de projets",
            "Conditions de travail pénibles détectées → Interroger les dispositifs C2P/FIPU",
        ));
    }
    if elig.employer_not_informed {
        out.push(Alert::new(
            Eligibility,
            Info,
            "Information",
            "Votre employeur n'est pas encore informé de votre projet : la demande \
             d'autorisation d'absence devra lui être adressée avant l'entrée en formation.",
        ));
    }
    if elig.sick_leave {
        out.push(Alert::new(
            Eligibility,
            Warning,
            "Attention",
            "Vous êtes actuellement en arrêt, cela peut impacter votre dossier.",
        ));
    }

    if prio.low_qualification {
        out.push(Alert::new(
            Priority,
            Info,
            "Information",
            "Du fait de votre statut d'ouvrier ou employé, vous avez de grandes chances d'obtenir \
             la prise en charge de votre projet. Cependant, nous vous encourageons vivement à \
             solliciter l'accompagnement d'un conseiller en évolution professionnelle pour vous \
             aider à formaliser votre projet.",
        ));
    }

    if mat.clarification.needed {
        out.push(Alert::new(
            Maturity,
            Warning,
            "Attention",
            "Nous vous suggérons de mettre en place des actions qui vous permettront de renforcer \
             la cohérence de votre projet : enquêtes métiers, immersion facilitée, stages...",
        ));
    }
    if mat.training_guide {
        out.push(Alert::new(
            Maturity,
            Info,
            "Information",
            format!(
                "Pour comparer et vous aider à trouver l'organisme de formation qui vous donnera \
                 toutes les chances de réussir, nous vous suggérons d'en interroger plusieurs à \
                 l'aide du guide que nous mettons à votre disposition sur notre site Internet \
                 ({TRAINING_GUIDE_URL})."
            ),
        ));
    }
    if mat.due_diligence.count() > 0 {
        let labels: Vec<&str> = mat
            .due_diligence
            .criteria
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        out.push(Alert::new(
            Maturity,
            Success,
            "Démarche de vérification du choix de l'organisme",
            labels.join(" ; "),
        ));
    }
    if !mat.recruiter.identified {
        out.push(Alert::new(
            Maturity,
            Warning,
            "Attention",
            "Nous vous invitons à solliciter un stage auprès de l'employeur chez lequel vous \
             souhaiteriez être embauché·e.",
        ));
    }

    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prescription {
    pub intro: String,
    pub score_line: String,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
}

pub fn prescription(result: &AnalysisResult) -> Prescription {
    let mut lines: Vec<&str> = Vec::new();

    if result.eligibility.status == EligibilityStatus::Eligible {
        lines.push("Vous êtes éligible au dispositif de reconversion professionnelle");
    }

    match result.priority.status {
        PriorityStatus::VeryHigh => {
            lines.push("Votre profil bénéficie d'une priorité très élevée");
            lines.push("Traitement accéléré de votre dossier recommandé");
        }
        PriorityStatus::High => lines.push("Votre profil est prioritaire pour l'accès au dispositif"),
        PriorityStatus::Medium => lines.push("Votre profil présente une priorité moyenne"),
        PriorityStatus::Standard => {
            lines.push("Envisagez d'optimiser votre dossier pour augmenter votre score de priorité")
        }
    }

    match result.maturity.status {
        MaturityStatus::ToBuild => {
            lines.push("Accompagnement CEP approfondi recommandé");
            lines.push("Réalisation d'un bilan de compétences suggérée");
            lines.push("Enquêtes métier et immersions professionnelles à prévoir");
        }
        MaturityStatus::Developing => {
            lines.push("Accompagnement CEP pour finaliser le projet");
            lines.push("Validation du choix de formation et d'organisme");
        }
        MaturityStatus::Mature => {
            lines.push("Projet suffisamment mature pour constituer un dossier");
            lines.push("Accompagnement CEP pour la partie administrative et financière");
        }
    }

    if result.eligibility.disability {
        lines.push("Mobiliser CAP EMPLOI et le référent handicap");
    }
    if result.priority.details.iter().any(|d| d.code == "P7") {
        lines.push("Explorer les possibilités de cofinancement avec l'employeur et l'OPCO");
    }

    Prescription {
        intro: PRESCRIPTION_INTRO.to_string(),
        score_line: format!(
            "Score de priorité : {}/{} points",
            result.priority.score, result.priority.max_score
        ),
        recommendations: lines.into_iter().map(str::to_string).collect(),
        next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Everything the text report needs besides the analysis.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub respondent: &'a Respondent,
    pub case_handler: Option<&'a CaseHandler>,
    pub date: NaiveDate,
}

fn points_suffix(points: u32) -> &'static str {
    if points > 1 {
        "pts"
    } else {
        "pt"
    }
}

fn write_alerts(out: &mut String, alerts: &[Alert], section: Section) {
    for alert in alerts.iter().filter(|a| a.section == section) {
        let _ = writeln!(out, "{} {} : {}", alert.severity.marker(), alert.title, alert.message);
    }
}

/// Plain-text report. Layout is line-oriented; pagination belongs to exporters.
pub fn render_text(result: &AnalysisResult, ctx: &ReportContext<'_>) -> String {
    let alerts = alerts(result);
    let mut out = String::new();

    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(out, "{PROGRAM_NAME}");
    let name = ctx.respondent.display_name();
    if !name.is_empty() {
        let _ = writeln!(out, "{name}");
    }
    let _ = writeln!(out, "Date: {}", ctx.date.format("%d/%m/%Y"));

    let _ = writeln!(out, "\n{}", Section::Eligibility.heading());
    let _ = writeln!(out, "{}", result.eligibility.status.label());
    let _ = writeln!(out, "{}", result.eligibility.details);
    write_alerts(&mut out, &alerts, Section::Eligibility);

    let _ = writeln!(out, "\n{}", Section::Priority.heading());
    let _ = writeln!(out, "{}", result.priority.status.label());
    let _ = writeln!(
        out,
        "Score : {}/{} points",
        result.priority.score, result.priority.max_score
    );
    if !result.priority.details.is_empty() {
        let _ = writeln!(out, "Détail des points obtenus :");
        for d in &result.priority.details {
            let _ = writeln!(
                out,
                "  • {} - {} : +{} {}",
                d.code,
                d.label,
                d.points,
                points_suffix(d.points)
            );
        }
    }
    write_alerts(&mut out, &alerts, Section::Priority);

    let _ = writeln!(out, "\n{}", Section::Maturity.heading());
    let _ = writeln!(out, "{}", result.maturity.status.label());
    let _ = writeln!(out, "{}", result.maturity.details);
    write_alerts(&mut out, &alerts, Section::Maturity);

    let p = prescription(result);
    let _ = writeln!(out, "\nRECOMMANDATIONS");
    let _ = writeln!(out, "{}", p.intro);
    let _ = writeln!(out, "{}", p.score_line);
    for line in &p.recommendations {
        let _ = writeln!(out, "• {line}");
    }
    let _ = writeln!(out, "\nProchaines étapes :");
    for (i, step) in p.next_steps.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, step);
    }

    if let Some(handler) = ctx.case_handler {
        let _ = writeln!(out, "\n{CASE_HANDLER_INTRO}");
        let _ = writeln!(out, "{}", handler.name);
        let _ = writeln!(out, "{}", handler.email);
    }
    out
}

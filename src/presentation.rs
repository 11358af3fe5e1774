//! Result view: maps a `ScanResult` onto display-ready text.
//!
//! The scanner only produces structured findings; this module picks the
//! display variant, headings and fallback texts a client renders.

use serde::{Deserialize, Serialize};

use crate::models::enums::DisplayVariant;
use crate::scanner::messages::MessageTemplates;
use crate::scanner::{Finding, RiskLevel, ScanResult};

// ═══════════════════════════════════════════
// View types serialised to clients
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanView {
    pub risk_level: RiskLevel,
    pub variant: DisplayVariant,
    pub title: String,
    pub summary: String,
    pub findings: Vec<FindingView>,
    /// Set only when there is nothing to report.
    pub no_findings_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingView {
    pub kind: String,
    pub heading: String,
    pub description: String,
    pub recommendation: Option<String>,
}

pub fn display_variant(level: RiskLevel) -> DisplayVariant {
    match level {
        RiskLevel::Safe => DisplayVariant::Success,
        RiskLevel::Caution => DisplayVariant::Warning,
        RiskLevel::Unsafe => DisplayVariant::Danger,
    }
}

pub fn title(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Safe => "Low Risk",
        RiskLevel::Caution => "Caution Advised",
        RiskLevel::Unsafe => "Unsafe Combination",
    }
}

impl ScanView {
    pub fn from_result(result: &ScanResult, name1: &str, name2: &str) -> Self {
        let findings: Vec<FindingView> = result.findings.iter().map(FindingView::from).collect();
        let no_findings_message = findings
            .is_empty()
            .then(|| MessageTemplates::NO_FINDINGS.to_string());

        Self {
            risk_level: result.risk_level,
            variant: display_variant(result.risk_level),
            title: title(result.risk_level).into(),
            summary: format!("Analysis for {name1} + {name2}"),
            findings,
            no_findings_message,
        }
    }
}

impl From<&Finding> for FindingView {
    fn from(finding: &Finding) -> Self {
        let interaction = |description: Option<&str>, recommendation: Option<&str>| FindingView {
            kind: finding.kind().into(),
            heading: "Interaction".into(),
            description: description
                .unwrap_or(MessageTemplates::DEFAULT_DESCRIPTION)
                .to_string(),
            recommendation: Some(
                recommendation
                    .unwrap_or(MessageTemplates::DEFAULT_RECOMMENDATION)
                    .to_string(),
            ),
        };

        match finding {
            Finding::Unknown { name } => {
                interaction(Some(&MessageTemplates::unknown_medicine(name)), None)
            }
            Finding::Interaction { rule } => interaction(
                rule.description.as_deref(),
                rule.recommendation.as_deref(),
            ),
            Finding::DuplicateIngredient { ingredient } => interaction(
                Some(&MessageTemplates::duplicate_ingredient(ingredient)),
                Some(MessageTemplates::DUPLICATE_RECOMMENDATION),
            ),
            Finding::Contraindication {
                reason, warning, ..
            } => FindingView {
                kind: finding.kind().into(),
                heading: format!("Personal Warning ({})", reason.label()),
                description: warning.clone(),
                recommendation: None,
            },
        }
    }
}

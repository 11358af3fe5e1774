use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::enums::{ContraindicationReason, InteractionSeverity};
use crate::models::Profile;

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Overall classification of a scan. Escalation-only within one scan.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    #[default]
    Safe,
    Caution,
    Unsafe,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Caution => "Caution",
            Self::Unsafe => "Unsafe",
        }
    }
}

// ---------------------------------------------------------------------------
// InteractionRule
// ---------------------------------------------------------------------------

/// A documented effect of taking two medicines (or two categories) together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Unordered pair of medicine names or category names.
    pub participants: [String; 2],
    pub severity: InteractionSeverity,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl InteractionRule {
    /// Risk level this rule proposes to the aggregator, if any.
    pub fn proposed_level(&self) -> Option<RiskLevel> {
        match self.severity {
            InteractionSeverity::Severe => Some(RiskLevel::Unsafe),
            InteractionSeverity::Moderate => Some(RiskLevel::Caution),
            InteractionSeverity::Mild => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Finding
// ---------------------------------------------------------------------------

/// One observation produced during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    Unknown {
        name: String,
    },
    Interaction {
        rule: InteractionRule,
    },
    DuplicateIngredient {
        ingredient: String,
    },
    Contraindication {
        medicine_name: String,
        reason: ContraindicationReason,
        warning: String,
    },
}

impl Finding {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unknown { .. } => "unknown",
            Self::Interaction { .. } => "interaction",
            Self::DuplicateIngredient { .. } => "duplicate_ingredient",
            Self::Contraindication { .. } => "contraindication",
        }
    }

    pub fn is_contraindication(&self) -> bool {
        matches!(self, Self::Contraindication { .. })
    }
}

// ---------------------------------------------------------------------------
// ScanResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub risk_level: RiskLevel,
    /// In emission order.
    pub findings: Vec<Finding>,
}

impl ScanResult {
    pub fn count_kind(&self, kind: &str) -> usize {
        self.findings.iter().filter(|f| f.kind() == kind).count()
    }
}

// ---------------------------------------------------------------------------
// KnowledgeError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge base load failed ({0}): {1}")]
    Load(String, String),

    #[error("Knowledge base parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Duplicate medicine name in catalog: {0}")]
    DuplicateMedicine(String),

    #[error("Medicine {id} has an empty {field}")]
    EmptyField { id: String, field: &'static str },
}

// ---------------------------------------------------------------------------
// InteractionScanner trait
// ---------------------------------------------------------------------------

/// Classifies the safety of taking two named medicines together.
///
/// Implementations are pure: identical inputs yield equal results, and a
/// scan never fails for well-formed input.
pub trait InteractionScanner {
    fn scan(&self, name1: &str, name2: &str, profile: Option<&Profile>) -> ScanResult;
}

use super::types::{Finding, RiskLevel};

/// How a single finding moves the running risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// No effect on the level.
    None,
    /// `level = max(level, proposed)`.
    Bounded(RiskLevel),
    /// `level = Unsafe`, terminal for the scan.
    Forced,
}

/// A finding paired with the escalation it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredFinding {
    pub finding: Finding,
    pub escalation: Escalation,
}

impl ScoredFinding {
    pub fn new(finding: Finding, escalation: Escalation) -> Self {
        Self {
            finding,
            escalation,
        }
    }
}

/// Running risk level over `Safe < Caution < Unsafe`. Never decreases.
#[derive(Debug, Clone, Default)]
pub struct RiskAggregator {
    level: RiskLevel,
    forced: bool,
}

impl RiskAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, escalation: Escalation) {
        match escalation {
            Escalation::None => {}
            Escalation::Bounded(proposed) => {
                self.level = self.level.max(proposed);
            }
            Escalation::Forced => {
                self.level = RiskLevel::Unsafe;
                self.forced = true;
            }
        }
    }

    pub fn level(&self) -> RiskLevel {
        self.level
    }

    /// Whether a forced escalation has been applied.
    pub fn is_forced(&self) -> bool {
        self.forced
    }
}

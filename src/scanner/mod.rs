//! Medicine interaction scanner.
//!
//! Resolves two medicine names against an immutable `KnowledgeBase`, matches
//! pairwise interaction rules, detects duplicate active ingredients and
//! evaluates profile contraindications. Every finding carries an escalation
//! that a `RiskAggregator` folds into a single monotonic `RiskLevel`.

pub mod contraindications;
pub mod engine;
pub mod helpers;
pub mod interactions;
pub mod knowledge;
pub mod messages;
pub mod resolver;
pub mod risk;
pub mod types;

pub use engine::{scan, DefaultScanner};
pub use knowledge::KnowledgeBase;
pub use types::{Finding, InteractionRule, InteractionScanner, KnowledgeError, RiskLevel, ScanResult};

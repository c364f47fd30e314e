//! Unattended-burner risk classification.
//!
//! The classifier is an ordered table of rules evaluated top to bottom.
//! Every rule that matches **overwrites** the running result, so the last
//! matching rule decides the level:
//!
//! ```text
//!  level = Low
//!  ┌────┬──────────────────────────────────────────┬────────┐
//!  │ A  │ time_on > rule_a*60  &&  !in_use         │ Medium │
//!  │ B  │ time_on > rule_b*60                      │ High   │
//!  │ G  │ !at_home  &&  is_on                      │ High   │
//!  └────┴──────────────────────────────────────────┴────────┘
//! ```
//!
//! This is not a max-of-severities reduction. A later rule always wins,
//! whatever level it carries.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;

/// Discrete risk classification.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Anything above `Low`.
    pub fn is_elevated(self) -> bool {
        self != Self::Low
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Identity of a rule in [`RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    /// Burner on too long with nobody near it.
    Inactivity,
    /// Burner on too long, regardless of presence.
    ElapsedTime,
    /// Burner on while the owner is outside the geofence.
    AwayFromHome,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactivity => write!(f, "rule A: inactivity"),
            Self::ElapsedTime => write!(f, "rule B: elapsed time"),
            Self::AwayFromHome => write!(f, "geofence: away from home"),
        }
    }
}

/// The inputs the classifier is a pure function of (besides config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskInputs {
    pub time_on_secs: u32,
    pub is_in_use: bool,
    pub at_home: bool,
    pub is_on: bool,
}

/// Predicate signature for a rule row.
pub type RuleMatchFn = fn(&RiskInputs, &RuleConfig) -> bool;

/// One row of the rule table.
pub struct RiskRule {
    pub id: RuleId,
    pub level: RiskLevel,
    pub matches: RuleMatchFn,
}

/// The rule table, in evaluation order. Order is significant.
pub const RULES: [RiskRule; 3] = [
    RiskRule {
        id: RuleId::Inactivity,
        level: RiskLevel::Medium,
        matches: inactivity_exceeded,
    },
    RiskRule {
        id: RuleId::ElapsedTime,
        level: RiskLevel::High,
        matches: elapsed_exceeded,
    },
    RiskRule {
        id: RuleId::AwayFromHome,
        level: RiskLevel::High,
        matches: away_while_on,
    },
];

/// Result of a classification: the level and the rule that set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// `None` when no rule matched and the default applies.
    pub decided_by: Option<RuleId>,
}

impl RiskAssessment {
    pub const LOW: Self = Self {
        level: RiskLevel::Low,
        decided_by: None,
    };
}

/// Classify with sequential overwrite over [`RULES`].
pub fn classify(inputs: &RiskInputs, config: &RuleConfig) -> RiskAssessment {
    let mut result = RiskAssessment::LOW;
    for rule in &RULES {
        if (rule.matches)(inputs, config) {
            result = RiskAssessment {
                level: rule.level,
                decided_by: Some(rule.id),
            };
        }
    }
    result
}

// ── Rule predicates ───────────────────────────────────────────

fn inactivity_exceeded(i: &RiskInputs, c: &RuleConfig) -> bool {
    i.time_on_secs > c.rule_a_secs() && !i.is_in_use
}

fn elapsed_exceeded(i: &RiskInputs, c: &RuleConfig) -> bool {
    i.time_on_secs > c.rule_b_secs()
}

fn away_while_on(i: &RiskInputs, _c: &RuleConfig) -> bool {
    !i.at_home && i.is_on
}

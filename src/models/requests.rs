use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Candidate, Requirement};

/// Request to match a candidate pool against one requirement.
///
/// The caller ships the already-loaded requirement and candidate pool;
/// this service performs no persistence of its own.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchCandidatesRequest {
    pub requirement: Requirement,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[validate(range(min = 1))]
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[validate(range(min = 0.0))]
    #[serde(alias = "ai_weight", rename = "aiWeight")]
    pub ai_weight: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "rule_weight", rename = "ruleWeight")]
    pub rule_weight: Option<f64>,
}

fn default_limit() -> u16 {
    50
}

/// Request to register a new qualification string under an existing tier.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterQualificationRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1, max = 6))]
    pub tier: u8,
}

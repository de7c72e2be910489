use serde::{Deserialize, Serialize};

use crate::models::domain::MatchResult;

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidatesResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "eligibleCandidates")]
    pub eligible_candidates: usize,
    pub degraded: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Qualification tier lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationLevelResponse {
    pub name: String,
    pub tier: u8,
}

/// Qualification registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterQualificationResponse {
    pub success: bool,
    pub name: String,
    pub tier: u8,
}

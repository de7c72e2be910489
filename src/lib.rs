//! Recruit Algo - candidate-requirement matching engine for the
//! recruitment portal.
//!
//! Given a job requirement and a pool of candidates, the engine derives
//! facts per candidate, filters the pool through hard-constraint rules,
//! ranks the survivors through an external semantic-ranking service, and
//! blends both signals into one sorted result list. When the ranking
//! service is unavailable, the pipeline degrades to a deterministic
//! rule-order result instead of failing.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{MatchError, MatchOutcome, Matcher, QualificationRegistry, RuleSet};
pub use models::{
    BlendWeights, Candidate, DerivedFacts, MatchCandidatesRequest, MatchCandidatesResponse,
    MatchOptions, MatchResult, Requirement, RoleCategory,
};
pub use services::{HttpRankingClient, RankOutcome, RankRequest, RelevanceRanker};

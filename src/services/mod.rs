// Service exports
pub mod ranking;

pub use ranking::{
    build_requirement_text, HttpRankingClient, RankOutcome, RankRequest, RankedCandidate,
    RelevanceRanker,
};

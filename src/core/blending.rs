use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{BlendWeights, Candidate, DerivedFacts, MatchResult};
use crate::services::ranking::RankOutcome;

/// A candidate that passed every hard predicate, with the facts derived
/// for this run.
#[derive(Debug, Clone)]
pub struct Survivor {
    pub candidate: Candidate,
    pub facts: DerivedFacts,
}

/// Blend the rule-pass signal with the ranking outcome into the final
/// sorted, truncated match list.
///
/// Normal mode: `score = rule_weight * 1.0 + ai_weight * relevance` for
/// every candidate the ranking service scored; survivors the service
/// omitted are treated as "not relevant enough" and dropped.
///
/// Degraded mode: survivors ordered by descending total experience, each
/// with an absent relevance score, so matching still produces actionable
/// output while the ranking dependency is down.
pub fn blend(
    survivors: Vec<Survivor>,
    outcome: &RankOutcome,
    weights: BlendWeights,
    limit: usize,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = match outcome {
        RankOutcome::Ranked(scored) => {
            let scores: HashMap<&str, f64> = scored
                .iter()
                .map(|r| (r.candidate_id.as_str(), r.score))
                .collect();

            survivors
                .into_iter()
                .filter_map(|survivor| {
                    let relevance = *scores.get(survivor.candidate.candidate_id.as_str())?;
                    let score = weights.rule * 1.0 + weights.ai * relevance;
                    Some(to_result(survivor, Some(relevance), score))
                })
                .collect()
        }
        RankOutcome::Degraded { .. } => survivors
            .into_iter()
            .map(|survivor| {
                let score = weights.rule * 1.0;
                to_result(survivor, None, score)
            })
            .collect(),
    };

    sort_results(&mut results, outcome.is_degraded());
    results.truncate(limit);

    for (position, result) in results.iter_mut().enumerate() {
        result.rank = position + 1;
    }

    results
}

fn to_result(survivor: Survivor, relevance: Option<f64>, score: f64) -> MatchResult {
    MatchResult {
        candidate_id: survivor.candidate.candidate_id,
        name: survivor.candidate.name,
        qualification_tier: survivor.facts.highest_qualification_tier,
        experience_years: survivor.facts.total_experience_years,
        expected_salary: survivor.facts.expected_salary,
        rule_passed: true,
        relevance_score: relevance,
        match_score: score,
        rank: 0,
    }
}

/// Descending final score, ties broken by candidate id for determinism.
/// In degraded mode scores are uniform, so descending experience is the
/// deterministic secondary key.
fn sort_results(results: &mut [MatchResult], degraded: bool) {
    results.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                if degraded {
                    b.experience_years
                        .partial_cmp(&a.experience_years)
                        .unwrap_or(Ordering::Equal)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });
}

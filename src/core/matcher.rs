use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::core::{
    blending::{blend, Survivor},
    facts::derive_facts,
    qualifications::QualificationRegistry,
    rules::RuleSet,
};
use crate::models::{Candidate, MatchOptions, MatchResult, Requirement};
use crate::services::ranking::{build_requirement_text, RankRequest, RelevanceRanker};

/// Structural input problems. Business outcomes (empty survivor set,
/// degraded ranking) are normal return values, never errors.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result of one matching run
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
    pub degraded: bool,
}

/// Matching orchestrator: the public entry point of the engine.
///
/// # Pipeline stages
/// 1. Derive facts for every candidate
/// 2. Hard-constraint rule filter
/// 3. Semantic ranking of the survivors (single bounded external call)
/// 4. Score blending, sort and truncate
pub struct Matcher<R> {
    ranker: R,
    registry: Arc<QualificationRegistry>,
    defaults: MatchOptions,
}

impl<R: RelevanceRanker> Matcher<R> {
    pub fn new(ranker: R, registry: Arc<QualificationRegistry>, defaults: MatchOptions) -> Self {
        Self {
            ranker,
            registry,
            defaults,
        }
    }

    pub fn defaults(&self) -> MatchOptions {
        self.defaults
    }

    /// Match a candidate pool against a requirement.
    ///
    /// Idempotent; the single outbound ranking call is the only side
    /// effect, and ranking failures degrade rather than error.
    pub async fn match_candidates(
        &self,
        requirement: &Requirement,
        candidates: Vec<Candidate>,
        options: &MatchOptions,
    ) -> Result<MatchOutcome, MatchError> {
        self.match_candidates_at(requirement, candidates, options, Utc::now().date_naive())
            .await
    }

    /// Same as [`match_candidates`](Self::match_candidates) with an
    /// explicit evaluation date for ongoing experience entries.
    pub async fn match_candidates_at(
        &self,
        requirement: &Requirement,
        candidates: Vec<Candidate>,
        options: &MatchOptions,
        as_of: NaiveDate,
    ) -> Result<MatchOutcome, MatchError> {
        validate(requirement, options)?;

        let total_candidates = candidates.len();
        let rule = RuleSet::for_requirement(requirement, &self.registry);

        // Stages 1 + 2: derive facts, keep candidates passing every predicate
        let survivors: Vec<Survivor> = candidates
            .into_iter()
            .map(|candidate| {
                let facts = derive_facts(&candidate, &self.registry, as_of);
                Survivor { candidate, facts }
            })
            .filter(|survivor| rule.passes(&survivor.facts))
            .collect();

        let eligible_candidates = survivors.len();
        tracing::debug!(
            "Rule filter kept {} of {} candidates for requirement {}",
            eligible_candidates,
            total_candidates,
            requirement.requirement_id
        );

        // No eligible candidates is an expected business outcome, and no
        // ranking call is made for it.
        if survivors.is_empty() {
            return Ok(MatchOutcome {
                matches: vec![],
                total_candidates,
                eligible_candidates: 0,
                degraded: false,
            });
        }

        // Stage 3: rank the survivors only; the ranking service must
        // never see candidates that already failed hard constraints.
        let request = RankRequest {
            requirement_text: build_requirement_text(requirement),
            top_k: options.limit,
            filter_ids: survivors
                .iter()
                .map(|s| s.candidate.candidate_id.clone())
                .collect(),
        };

        let outcome = self.ranker.rank(&request).await;
        let degraded = outcome.is_degraded();
        if degraded {
            tracing::warn!(
                "Ranking unavailable for requirement {}, falling back to rule-order results",
                requirement.requirement_id
            );
        }

        // Stage 4: blend, sort, truncate
        let matches = blend(survivors, &outcome, options.weights, options.limit);

        tracing::info!(
            "Matched {} of {} candidates for requirement {} (eligible: {}, degraded: {})",
            matches.len(),
            total_candidates,
            requirement.requirement_id,
            eligible_candidates,
            degraded
        );

        Ok(MatchOutcome {
            matches,
            total_candidates,
            eligible_candidates,
            degraded,
        })
    }
}

fn validate(requirement: &Requirement, options: &MatchOptions) -> Result<(), MatchError> {
    if options.limit == 0 {
        return Err(MatchError::InvalidInput("limit must be at least 1".into()));
    }
    if !options.weights.is_valid() {
        return Err(MatchError::InvalidInput(
            "weights must be non-negative".into(),
        ));
    }
    if requirement.min_experience_years < 0.0 {
        return Err(MatchError::InvalidInput(
            "minimum experience must be non-negative".into(),
        ));
    }
    if requirement.max_salary.is_some_and(|ceiling| ceiling < 0) {
        return Err(MatchError::InvalidInput(
            "maximum salary must be non-negative".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlendWeights, EducationEntry, ExperienceEntry, RoleCategory};
    use crate::services::ranking::{RankOutcome, RankedCandidate};
    use std::sync::Mutex;

    /// Scripted ranker: returns a fixed outcome and records the request.
    struct ScriptedRanker {
        outcome: RankOutcome,
        seen: Mutex<Vec<RankRequest>>,
    }

    impl ScriptedRanker {
        fn ranked(pairs: &[(&str, f64)]) -> Self {
            Self {
                outcome: RankOutcome::Ranked(
                    pairs
                        .iter()
                        .map(|(id, score)| RankedCandidate {
                            candidate_id: id.to_string(),
                            score: *score,
                        })
                        .collect(),
                ),
                seen: Mutex::new(vec![]),
            }
        }

        fn degraded() -> Self {
            Self {
                outcome: RankOutcome::Degraded {
                    reason: "timeout".to_string(),
                },
                seen: Mutex::new(vec![]),
            }
        }

        fn requests(&self) -> Vec<RankRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl RelevanceRanker for &ScriptedRanker {
        async fn rank(&self, request: &RankRequest) -> RankOutcome {
            self.seen.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn requirement() -> Requirement {
        Requirement {
            requirement_id: "r1".to_string(),
            title: "Primary Teacher".to_string(),
            min_qualification: Some("B.Ed".to_string()),
            min_experience_years: 1.0,
            max_salary: Some(800_000),
            role_category: RoleCategory::Teaching,
            target_location: None,
            skills: vec![],
        }
    }

    fn candidate(id: &str, degree: &str, years: u32, salary: i64) -> Candidate {
        Candidate {
            candidate_id: id.to_string(),
            name: format!("Candidate {}", id),
            education: vec![EducationEntry {
                degree: degree.to_string(),
                institution: None,
            }],
            experience: vec![ExperienceEntry {
                start_date: Some(date(2024 - years as i32, 1, 1)),
                end_date: Some(date(2024, 1, 1)),
                title: None,
            }],
            expected_salary: Some(salary),
            preferred_locations: vec![],
        }
    }

    fn matcher(ranker: &ScriptedRanker) -> Matcher<&ScriptedRanker> {
        Matcher::new(
            ranker,
            Arc::new(QualificationRegistry::with_defaults()),
            MatchOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_single_survivor() {
        let ranker = ScriptedRanker::ranked(&[("a", 0.9)]);
        let matcher = matcher(&ranker);

        let candidates = vec![
            candidate("a", "B.Ed", 2, 700_000),
            // Fails qualification tier despite long experience
            candidate("b", "10th", 10, 500_000),
        ];
        let mut half_year = candidate("c", "M.Ed", 0, 750_000);
        half_year.experience = vec![ExperienceEntry {
            start_date: Some(date(2023, 7, 1)),
            end_date: Some(date(2024, 1, 1)),
            title: None,
        }];
        let mut pool = candidates;
        pool.push(half_year);

        let outcome = matcher
            .match_candidates_at(&requirement(), pool, &MatchOptions::default(), date(2024, 1, 1))
            .await
            .unwrap();

        assert_eq!(outcome.eligible_candidates, 1);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].candidate_id, "a");
        assert!((outcome.matches[0].match_score - 0.93).abs() < 1e-9);
        assert!(!outcome.degraded);

        // The ranking call was restricted to the rule-survivors.
        let requests = ranker.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].filter_ids, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_pool_skips_ranking() {
        let ranker = ScriptedRanker::ranked(&[]);
        let matcher = matcher(&ranker);

        let outcome = matcher
            .match_candidates(&requirement(), vec![], &MatchOptions::default())
            .await
            .unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.total_candidates, 0);
        assert!(!outcome.degraded);
        assert!(ranker.requests().is_empty());
    }

    #[tokio::test]
    async fn test_no_eligible_candidates_skips_ranking() {
        let ranker = ScriptedRanker::ranked(&[("a", 0.9)]);
        let matcher = matcher(&ranker);

        let outcome = matcher
            .match_candidates_at(
                &requirement(),
                vec![candidate("a", "10th", 10, 500_000)],
                &MatchOptions::default(),
                date(2024, 1, 1),
            )
            .await
            .unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.eligible_candidates, 0);
        assert!(ranker.requests().is_empty());
    }

    #[tokio::test]
    async fn test_degraded_returns_survivors_without_relevance() {
        let ranker = ScriptedRanker::degraded();
        let matcher = matcher(&ranker);

        let pool = vec![
            candidate("a", "B.Ed", 2, 700_000),
            candidate("b", "M.Ed", 5, 600_000),
        ];

        let outcome = matcher
            .match_candidates_at(&requirement(), pool, &MatchOptions::default(), date(2024, 1, 1))
            .await
            .unwrap();

        assert!(outcome.degraded);
        assert_eq!(outcome.matches.len(), 2);
        assert!(outcome.matches.iter().all(|m| m.relevance_score.is_none()));
        // Deterministic fallback order: descending experience
        assert_eq!(outcome.matches[0].candidate_id, "b");
    }

    #[tokio::test]
    async fn test_invalid_options_rejected() {
        let ranker = ScriptedRanker::ranked(&[]);
        let matcher = matcher(&ranker);

        let zero_limit = MatchOptions {
            limit: 0,
            weights: BlendWeights::default(),
        };
        assert!(matcher
            .match_candidates(&requirement(), vec![], &zero_limit)
            .await
            .is_err());

        let negative_weight = MatchOptions {
            limit: 10,
            weights: BlendWeights { ai: -0.1, rule: 0.3 },
        };
        assert!(matcher
            .match_candidates(&requirement(), vec![], &negative_weight)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_missing_requirement_fields_mean_no_constraint() {
        let ranker = ScriptedRanker::ranked(&[("a", 0.5)]);
        let matcher = matcher(&ranker);

        let open_requirement = Requirement {
            requirement_id: "r2".to_string(),
            title: "Office Assistant".to_string(),
            min_qualification: None,
            min_experience_years: 0.0,
            max_salary: None,
            role_category: RoleCategory::NonTeaching,
            target_location: None,
            skills: vec![],
        };

        let outcome = matcher
            .match_candidates_at(
                &open_requirement,
                vec![candidate("a", "Unknown Degree", 0, 9_000_000)],
                &MatchOptions::default(),
                date(2024, 1, 1),
            )
            .await
            .unwrap();

        assert_eq!(outcome.eligible_candidates, 1);
        assert_eq!(outcome.matches.len(), 1);
    }
}

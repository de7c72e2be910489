use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use crate::models::Requirement;

/// One scored candidate returned by the ranking service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate_id: String,
    pub score: f64,
}

/// Outcome of one ranking attempt.
///
/// Failures never propagate as errors from this layer: every failure
/// mode (connect error, timeout, non-2xx, malformed body) collapses to
/// `Degraded` so the orchestrator can apply its fallback policy.
#[derive(Debug, Clone)]
pub enum RankOutcome {
    Ranked(Vec<RankedCandidate>),
    Degraded { reason: String },
}

impl RankOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, RankOutcome::Degraded { .. })
    }
}

/// Request sent to the ranking service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub requirement_text: String,
    pub top_k: usize,
    pub filter_ids: Vec<String>,
}

/// Semantic relevance ranking over a restricted candidate set.
///
/// The production implementation is [`HttpRankingClient`]; tests supply
/// stubs so the pipeline can be exercised without a network.
pub trait RelevanceRanker {
    fn rank(&self, request: &RankRequest) -> impl Future<Output = RankOutcome> + Send;
}

/// HTTP client for the external semantic-ranking service.
///
/// Performs a single bounded-timeout call per rank request; no retries.
#[derive(Clone)]
pub struct HttpRankingClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpRankingClient {
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            client,
        }
    }

    fn rank_url(&self) -> String {
        format!("{}/rank", self.endpoint.trim_end_matches('/'))
    }
}

impl RelevanceRanker for HttpRankingClient {
    async fn rank(&self, request: &RankRequest) -> RankOutcome {
        let url = self.rank_url();
        tracing::debug!(
            "Ranking {} candidates against: {}",
            request.filter_ids.len(),
            url
        );

        let mut builder = self.client.post(&url).json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("X-Api-Key", api_key);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Ranking request failed: {}", e);
                return RankOutcome::Degraded {
                    reason: format!("request failed: {}", e),
                };
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Ranking service returned {}", status);
            return RankOutcome::Degraded {
                reason: format!("non-success status: {}", status),
            };
        }

        match response.json::<Vec<RankedCandidate>>().await {
            Ok(mut scored) => {
                for entry in &mut scored {
                    entry.score = entry.score.clamp(0.0, 1.0);
                }
                tracing::debug!("Ranking service scored {} candidates", scored.len());
                RankOutcome::Ranked(scored)
            }
            Err(e) => {
                tracing::warn!("Malformed ranking response: {}", e);
                RankOutcome::Degraded {
                    reason: format!("malformed response: {}", e),
                }
            }
        }
    }
}

/// Build the semantic query text for a requirement.
///
/// Concatenates the title, role category, minimum qualification and any
/// free-text skill/subject fields into one descriptive string.
pub fn build_requirement_text(requirement: &Requirement) -> String {
    let mut parts = vec![
        requirement.title.clone(),
        format!("{} role", requirement.role_category.as_str()),
    ];

    if let Some(qualification) = &requirement.min_qualification {
        parts.push(format!("minimum qualification {}", qualification));
    }

    if !requirement.skills.is_empty() {
        parts.push(format!("skills: {}", requirement.skills.join(", ")));
    }

    if let Some(location) = &requirement.target_location {
        parts.push(format!("location {}", location));
    }

    parts.join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleCategory;

    fn requirement() -> Requirement {
        Requirement {
            requirement_id: "r1".to_string(),
            title: "Mathematics Teacher".to_string(),
            min_qualification: Some("B.Ed".to_string()),
            min_experience_years: 2.0,
            max_salary: Some(800_000),
            role_category: RoleCategory::Teaching,
            target_location: Some("Mumbai".to_string()),
            skills: vec!["Algebra".to_string(), "Geometry".to_string()],
        }
    }

    fn rank_request(ids: &[&str]) -> RankRequest {
        RankRequest {
            requirement_text: build_requirement_text(&requirement()),
            top_k: 50,
            filter_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_requirement_text() {
        let text = build_requirement_text(&requirement());
        assert!(text.contains("Mathematics Teacher"));
        assert!(text.contains("teaching role"));
        assert!(text.contains("B.Ed"));
        assert!(text.contains("Algebra, Geometry"));
        assert!(text.contains("Mumbai"));
    }

    #[test]
    fn test_build_requirement_text_minimal() {
        let mut req = requirement();
        req.min_qualification = None;
        req.skills = vec![];
        req.target_location = None;

        let text = build_requirement_text(&req);
        assert_eq!(text, "Mathematics Teacher. teaching role");
    }

    #[tokio::test]
    async fn test_rank_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rank")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"candidate_id":"a","score":0.9},{"candidate_id":"b","score":1.7}]"#)
            .create_async()
            .await;

        let client = HttpRankingClient::new(server.url(), None, Duration::from_secs(2));
        let outcome = client.rank(&rank_request(&["a", "b"])).await;

        mock.assert_async().await;
        match outcome {
            RankOutcome::Ranked(scored) => {
                assert_eq!(scored.len(), 2);
                assert_eq!(scored[0].score, 0.9);
                // Out-of-range scores clamp to [0, 1]
                assert_eq!(scored[1].score, 1.0);
            }
            RankOutcome::Degraded { reason } => panic!("unexpected degraded: {}", reason),
        }
    }

    #[tokio::test]
    async fn test_rank_non_success_status_degrades() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rank")
            .with_status(503)
            .create_async()
            .await;

        let client = HttpRankingClient::new(server.url(), None, Duration::from_secs(2));
        let outcome = client.rank(&rank_request(&["a"])).await;

        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_rank_malformed_body_degrades() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/rank")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected":"shape"}"#)
            .create_async()
            .await;

        let client = HttpRankingClient::new(server.url(), None, Duration::from_secs(2));
        let outcome = client.rank(&rank_request(&["a"])).await;

        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_rank_unreachable_endpoint_degrades() {
        // Port 1 is unassigned locally; the connection fails fast.
        let client = HttpRankingClient::new(
            "http://127.0.0.1:1".to_string(),
            None,
            Duration::from_millis(500),
        );
        let outcome = client.rank(&rank_request(&["a"])).await;

        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_rank_sends_api_key_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rank")
            .match_header("X-Api-Key", "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = HttpRankingClient::new(
            server.url(),
            Some("secret".to_string()),
            Duration::from_secs(2),
        );
        let outcome = client.rank(&rank_request(&[])).await;

        mock.assert_async().await;
        assert!(!outcome.is_degraded());
    }
}

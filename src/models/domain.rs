use serde::{Deserialize, Serialize};

/// Job requirement as resolved by the admin-facing API layer.
///
/// Missing constraint fields mean "no constraint", not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(rename = "requirementId")]
    pub requirement_id: String,
    pub title: String,
    #[serde(rename = "minQualification", default)]
    pub min_qualification: Option<String>,
    #[serde(rename = "minExperienceYears", default)]
    pub min_experience_years: f64,
    #[serde(rename = "maxSalary", default)]
    pub max_salary: Option<i64>,
    #[serde(rename = "roleCategory", default)]
    pub role_category: RoleCategory,
    #[serde(rename = "targetLocation", default)]
    pub target_location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoleCategory {
    #[default]
    Teaching,
    NonTeaching,
}

impl RoleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Teaching => "teaching",
            RoleCategory::NonTeaching => "non-teaching",
        }
    }
}

/// Candidate profile snapshot, already loaded and filtered to active
/// status by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub name: String,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(rename = "expectedSalary", default)]
    pub expected_salary: Option<i64>,
    #[serde(rename = "preferredLocations", default)]
    pub preferred_locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub institution: Option<String>,
}

/// One employment stint. A missing end date means the stint is ongoing
/// and is counted to the evaluation date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(rename = "startDate", default)]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Facts computed per candidate for one matching run. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFacts {
    pub total_experience_years: f64,
    pub highest_qualification_tier: u8,
    pub expected_salary: i64,
    pub preferred_locations: Vec<String>,
}

/// One ranked entry of the final match list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub name: String,
    #[serde(rename = "qualificationTier")]
    pub qualification_tier: u8,
    #[serde(rename = "experienceYears")]
    pub experience_years: f64,
    #[serde(rename = "expectedSalary")]
    pub expected_salary: i64,
    #[serde(rename = "rulePassed")]
    pub rule_passed: bool,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: Option<f64>,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    pub rank: usize,
}

/// Blending weights for the final score.
///
/// The rule component is a constant offset for every rule-survivor; only
/// the relevance component differentiates among them. That mirrors the
/// observed production behavior and is kept deliberately.
#[derive(Debug, Clone, Copy)]
pub struct BlendWeights {
    pub ai: f64,
    pub rule: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self { ai: 0.7, rule: 0.3 }
    }
}

impl BlendWeights {
    /// Weights must be non-negative; zero is allowed.
    pub fn is_valid(&self) -> bool {
        self.ai >= 0.0 && self.rule >= 0.0
    }
}

/// Per-call matching options.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub limit: usize,
    pub weights: BlendWeights,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            limit: 50,
            weights: BlendWeights::default(),
        }
    }
}

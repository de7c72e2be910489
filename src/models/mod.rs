// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BlendWeights, Candidate, DerivedFacts, EducationEntry, ExperienceEntry, MatchOptions,
    MatchResult, Requirement, RoleCategory,
};
pub use requests::{MatchCandidatesRequest, RegisterQualificationRequest};
pub use responses::{
    ErrorResponse, HealthResponse, MatchCandidatesResponse, QualificationLevelResponse,
    RegisterQualificationResponse,
};

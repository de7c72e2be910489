// Core algorithm exports
pub mod blending;
pub mod facts;
pub mod matcher;
pub mod qualifications;
pub mod rules;

pub use blending::{blend, Survivor};
pub use facts::derive_facts;
pub use matcher::{MatchError, MatchOutcome, Matcher};
pub use qualifications::{QualificationError, QualificationRegistry, MAX_TIER, UNRECOGNIZED_TIER};
pub use rules::{Predicate, RuleSet};

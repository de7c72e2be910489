use chrono::NaiveDate;

use crate::core::qualifications::QualificationRegistry;
use crate::models::{Candidate, DerivedFacts};

/// Days per year used for fractional experience durations.
const DAYS_PER_YEAR: f64 = 365.25;

/// Derive the fact set for one candidate.
///
/// Pure function of the candidate snapshot; `as_of` caps ongoing
/// experience entries (entries with no end date).
pub fn derive_facts(
    candidate: &Candidate,
    registry: &QualificationRegistry,
    as_of: NaiveDate,
) -> DerivedFacts {
    DerivedFacts {
        total_experience_years: total_experience_years(candidate, as_of),
        highest_qualification_tier: highest_qualification_tier(candidate, registry),
        expected_salary: candidate.expected_salary.unwrap_or(0),
        preferred_locations: candidate.preferred_locations.clone(),
    }
}

/// Sum per-entry durations in fractional years.
///
/// Entries without a start date contribute zero; an entry whose end
/// precedes its start contributes zero rather than a negative span.
fn total_experience_years(candidate: &Candidate, as_of: NaiveDate) -> f64 {
    candidate
        .experience
        .iter()
        .filter_map(|entry| {
            let start = entry.start_date?;
            let end = entry.end_date.unwrap_or(as_of);
            let days = (end - start).num_days().max(0);
            Some(days as f64 / DAYS_PER_YEAR)
        })
        .sum()
}

/// Max recognized tier across education entries, 0 if none recognized.
fn highest_qualification_tier(candidate: &Candidate, registry: &QualificationRegistry) -> u8 {
    candidate
        .education
        .iter()
        .map(|entry| registry.level_of(&entry.degree))
        .max()
        .unwrap_or(0)
}

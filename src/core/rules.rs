use crate::core::qualifications::QualificationRegistry;
use crate::models::{DerivedFacts, Requirement};

/// Hard-constraint predicate.
///
/// A closed, typed set evaluated by explicit pattern matching. Adding a
/// new constraint kind is a code change; the set is small and stable.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    QualificationAtLeast { tier: u8 },
    ExperienceAtLeast { years: f64 },
    SalaryAtMost { ceiling: i64 },
    LocationMatches { location: String },
}

impl Predicate {
    /// Evaluate this predicate against a candidate's derived facts.
    pub fn evaluate(&self, facts: &DerivedFacts) -> bool {
        match self {
            Predicate::QualificationAtLeast { tier } => facts.highest_qualification_tier >= *tier,
            Predicate::ExperienceAtLeast { years } => facts.total_experience_years >= *years,
            Predicate::SalaryAtMost { ceiling } => facts.expected_salary <= *ceiling,
            Predicate::LocationMatches { location } => {
                // An empty preference list means "no preference stated"
                // and matches any target location.
                facts.preferred_locations.is_empty()
                    || facts
                        .preferred_locations
                        .iter()
                        .any(|preferred| preferred.eq_ignore_ascii_case(location))
            }
        }
    }
}

/// The active rule for one requirement: a conjunction of hard predicates.
#[derive(Debug, Clone)]
pub struct RuleSet {
    predicates: Vec<Predicate>,
}

impl RuleSet {
    /// Build the rule for a requirement.
    ///
    /// Absent requirement fields produce no predicate ("no constraint").
    /// An unrecognized minimum qualification resolves to tier 0, which
    /// every candidate satisfies.
    pub fn for_requirement(requirement: &Requirement, registry: &QualificationRegistry) -> Self {
        let mut predicates = Vec::with_capacity(4);

        if let Some(min_qualification) = &requirement.min_qualification {
            predicates.push(Predicate::QualificationAtLeast {
                tier: registry.level_of(min_qualification),
            });
        }

        if requirement.min_experience_years > 0.0 {
            predicates.push(Predicate::ExperienceAtLeast {
                years: requirement.min_experience_years,
            });
        }

        // Absent ceiling is unbounded, not zero.
        if let Some(ceiling) = requirement.max_salary {
            predicates.push(Predicate::SalaryAtMost { ceiling });
        }

        if let Some(location) = &requirement.target_location {
            predicates.push(Predicate::LocationMatches {
                location: location.clone(),
            });
        }

        Self { predicates }
    }

    /// Short-circuiting conjunction: a candidate passes only if every
    /// predicate holds.
    pub fn passes(&self, facts: &DerivedFacts) -> bool {
        self.predicates.iter().all(|p| p.evaluate(facts))
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}

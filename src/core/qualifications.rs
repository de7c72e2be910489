use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Errors for qualification registry mutations
#[derive(Debug, Error)]
pub enum QualificationError {
    #[error("Invalid tier {0}: tier must be between 1 and 6")]
    InvalidTier(u8),

    #[error("Empty qualification name")]
    EmptyName,
}

/// Tier reserved for qualifications the registry does not recognize.
/// Callers must treat it as "unknown/lowest", never as an error.
pub const UNRECOGNIZED_TIER: u8 = 0;

/// Highest tier in the table (doctorate).
pub const MAX_TIER: u8 = 6;

/// Static seed table: (tier, recognized qualification strings).
///
/// Tiers: 1 secondary, 2 diploma, 3 bachelor's, 4 master's,
/// 5 postgraduate diploma, 6 doctorate.
const SEED_TABLE: &[(u8, &[&str])] = &[
    (1, &["10th", "12th", "SSC", "HSC", "Matriculation", "Higher Secondary"]),
    (2, &["Diploma", "D.Ed", "D.El.Ed", "ITI", "Polytechnic Diploma"]),
    (3, &["B.Ed", "B.A", "B.Sc", "B.Com", "BCA", "BBA", "B.P.Ed", "Bachelor of Education"]),
    (4, &["M.Ed", "M.A", "M.Sc", "M.Com", "MCA", "MBA", "M.P.Ed", "Master of Education"]),
    (5, &["PG Diploma", "PGDM", "PGDCA", "PGDBA", "Postgraduate Diploma"]),
    (6, &["Ph.D", "PhD", "Doctorate", "D.Phil", "D.Litt"]),
];

/// Qualification tier registry
///
/// Maps free-text qualification strings to an ordered tier (1-6).
/// Lookup is case- and whitespace-insensitive exact match. The table is
/// effectively immutable after startup; `register` is the single, rare
/// writer path and is guarded by the lock.
pub struct QualificationRegistry {
    table: RwLock<HashMap<String, u8>>,
}

impl QualificationRegistry {
    /// Build the registry from the static seed table.
    pub fn with_defaults() -> Self {
        let mut table = HashMap::new();
        for (tier, names) in SEED_TABLE {
            for name in *names {
                table.insert(normalize(name), *tier);
            }
        }
        Self {
            table: RwLock::new(table),
        }
    }

    /// Resolve a qualification string to its tier, 0 if unrecognized.
    pub fn level_of(&self, qualification: &str) -> u8 {
        let key = normalize(qualification);
        self.table
            .read()
            .expect("qualification table lock poisoned")
            .get(&key)
            .copied()
            .unwrap_or(UNRECOGNIZED_TIER)
    }

    /// Compare two qualification strings.
    ///
    /// Positive means `a` is more advanced than `b`.
    pub fn compare(&self, a: &str, b: &str) -> i32 {
        i32::from(self.level_of(a)) - i32::from(self.level_of(b))
    }

    /// Register a new qualification string under an existing tier.
    ///
    /// There is no removal. Re-registering an existing string moves it to
    /// the given tier.
    pub fn register(&self, name: &str, tier: u8) -> Result<(), QualificationError> {
        if !(1..=MAX_TIER).contains(&tier) {
            return Err(QualificationError::InvalidTier(tier));
        }
        let key = normalize(name);
        if key.is_empty() {
            return Err(QualificationError::EmptyName);
        }
        self.table
            .write()
            .expect("qualification table lock poisoned")
            .insert(key, tier);
        tracing::debug!("Registered qualification '{}' at tier {}", name, tier);
        Ok(())
    }

    /// Number of recognized qualification strings.
    pub fn len(&self) -> usize {
        self.table
            .read()
            .expect("qualification table lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for QualificationRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Lowercase and strip all whitespace for table lookup.
#[inline]
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

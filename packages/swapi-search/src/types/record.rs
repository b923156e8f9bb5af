//! Search output records and their sentinel values.

use serde::Serialize;
use std::fmt;

use super::resource::Category;

/// Placeholder for any field that could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Species assumed for a person with no species reference.
pub const HUMAN: &str = "Human";

/// Species shown when a person's species reference fails to resolve.
pub const SPECIES_ERROR: &str = "Error fetching species";

/// Fields produced by enrichment for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedFields {
    /// Film titles in reference order; failed lookups are [`UNKNOWN`].
    pub films: Vec<String>,
    pub homeworld: String,
    pub species: String,
}

impl Default for EnrichedFields {
    fn default() -> Self {
        Self {
            films: Vec::new(),
            homeworld: UNKNOWN.to_string(),
            species: UNKNOWN.to_string(),
        }
    }
}

/// One rendered search hit.
///
/// Equality and hashing cover every field: two records are duplicates only
/// when they are structurally identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResultRecord {
    pub name: String,
    pub category: Category,
    pub films: Vec<String>,
    pub homeworld: String,
    pub species: String,
}

impl ResultRecord {
    pub fn new(name: impl Into<String>, category: Category, fields: EnrichedFields) -> Self {
        Self {
            name: name.into(),
            category,
            films: fields.films,
            homeworld: fields.homeworld,
            species: fields.species,
        }
    }

    /// Film titles joined for display.
    pub fn films_display(&self) -> String {
        self.films.join(", ")
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  Type: {}", self.category)?;
        writeln!(f, "  Films: {}", self.films_display())?;
        writeln!(f, "  Homeworld: {}", self.homeworld)?;
        write!(f, "  Species: {}", self.species)
    }
}

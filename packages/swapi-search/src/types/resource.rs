//! Upstream resource shapes.
//!
//! Only the fields the pipeline reads are modeled; everything else in the
//! upstream JSON is ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The five top-level resource types the search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    People,
    Planets,
    Starships,
    Vehicles,
    Species,
}

impl Category {
    /// Fixed processing order.
    pub const ALL: [Category; 5] = [
        Category::People,
        Category::Planets,
        Category::Starships,
        Category::Vehicles,
        Category::Species,
    ];

    /// Key used in the root index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::People => "people",
            Category::Planets => "planets",
            Category::Starships => "starships",
            Category::Vehicles => "vehicles",
            Category::Species => "species",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.as_str() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from category name to its listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RootIndex {
    endpoints: BTreeMap<String, String>,
}

impl RootIndex {
    pub fn new(endpoints: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            endpoints: endpoints.into_iter().collect(),
        }
    }

    /// Endpoint for a category, if the index lists it.
    pub fn endpoint(&self, category: Category) -> Option<&str> {
        self.endpoints.get(category.as_str()).map(String::as_str)
    }

    /// Recognized categories present in the index, in processing order.
    ///
    /// Unrecognized keys (e.g. `films`) are skipped.
    pub fn categories(&self) -> Vec<(Category, String)> {
        Category::ALL
            .into_iter()
            .filter_map(|c| self.endpoint(c).map(|url| (c, url.to_string())))
            .collect()
    }
}

/// First page of a category listing. Pagination fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPage {
    pub results: Vec<Item>,
}

/// One raw record from a category listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub films: Vec<String>,

    /// Planet reference. Null and empty strings both count as absent.
    #[serde(default)]
    pub homeworld: Option<String>,

    /// Species references (`people` only).
    #[serde(default)]
    pub species: Vec<String>,
}

impl Item {
    pub fn homeworld_url(&self) -> Option<&str> {
        self.homeworld.as_deref().filter(|url| !url.is_empty())
    }

    /// Case-insensitive substring match against an already lower-cased needle.
    pub fn matches(&self, needle: &str) -> bool {
        !self.name.is_empty() && self.name.to_lowercase().contains(needle)
    }
}

/// A film resource; only its title is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Film {
    pub title: String,
}

/// Any resource whose display string is its `name` (planets, species).
#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    pub name: String,
}

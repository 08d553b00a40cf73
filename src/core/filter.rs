//! City and condition filters
//!
//! Both selectors use the literal value "all" as their wildcard, which is
//! also what gets persisted.

use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use super::presentation::Category;

/// Sentinel shared by both selectors
pub const ALL: &str = "all";

/// Fallback city, always present in the selector
pub const DEFAULT_CITY: &str = "Athlone";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityFilter {
    All,
    City(String),
}

impl CityFilter {
    pub fn parse(s: &str) -> Self {
        if s == ALL {
            CityFilter::All
        } else {
            CityFilter::City(s.to_string())
        }
    }

    pub fn default_city() -> Self {
        CityFilter::City(DEFAULT_CITY.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            CityFilter::All => ALL,
            CityFilter::City(c) => c,
        }
    }

    pub fn matches(&self, city: &str) -> bool {
        match self {
            CityFilter::All => true,
            CityFilter::City(c) => c == city,
        }
    }
}

impl Default for CityFilter {
    fn default() -> Self {
        Self::default_city()
    }
}

impl fmt::Display for CityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionFilter {
    #[default]
    All,
    Only(Category),
}

impl ConditionFilter {
    /// Selector buttons in display order
    pub const OPTIONS: &'static [ConditionFilter] = &[
        ConditionFilter::All,
        ConditionFilter::Only(Category::Rain),
        ConditionFilter::Only(Category::Clear),
        ConditionFilter::Only(Category::Extreme),
        ConditionFilter::Only(Category::Snow),
        ConditionFilter::Only(Category::Wind),
        ConditionFilter::Only(Category::Default),
    ];

    /// Unknown values fall back to "all"
    pub fn parse(s: &str) -> Self {
        Category::parse(s).map_or(ConditionFilter::All, ConditionFilter::Only)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionFilter::All => ALL,
            ConditionFilter::Only(c) => c.as_str(),
        }
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            ConditionFilter::All => true,
            ConditionFilter::Only(c) => c == category,
        }
    }
}

/// The active pair of selections
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub city: CityFilter,
    pub condition: ConditionFilter,
}

impl Filters {
    pub fn matches(&self, city: &str, category: Category) -> bool {
        self.city.matches(city) && self.condition.matches(category)
    }
}

/// Every city seen so far, plus the default city
#[derive(Debug, Clone)]
pub struct CityHistory {
    cities: BTreeSet<String>,
}

impl CityHistory {
    pub fn new() -> Self {
        let mut cities = BTreeSet::new();
        cities.insert(DEFAULT_CITY.to_string());
        Self { cities }
    }

    /// Record a city; returns true when it was not known before
    pub fn insert(&mut self, city: &str) -> bool {
        if self.cities.contains(city) {
            return false;
        }
        debug!(city, "New city seen");
        self.cities.insert(city.to_string())
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.contains(city)
    }

    /// Selector options, sorted (the "all" option is listed separately)
    pub fn sorted(&self) -> impl Iterator<Item = &str> + '_ {
        self.cities.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Keep a selection that still exists, otherwise fall back to the default city
    pub fn resolve(&self, selection: &CityFilter) -> CityFilter {
        match selection {
            CityFilter::All => CityFilter::All,
            CityFilter::City(c) if self.contains(c) => selection.clone(),
            CityFilter::City(c) => {
                debug!(city = %c, "Selected city not in history, falling back");
                CityFilter::default_city()
            }
        }
    }
}

impl Default for CityHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_always_has_default() {
        let history = CityHistory::new();
        assert!(history.contains(DEFAULT_CITY));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_history_sorted_and_deduplicated() {
        let mut history = CityHistory::new();
        assert!(history.insert("Galway"));
        assert!(history.insert("Cork"));
        assert!(!history.insert("Cork"));
        assert!(!history.insert(DEFAULT_CITY));
        let cities: Vec<&str> = history.sorted().collect();
        assert_eq!(cities, vec!["Athlone", "Cork", "Galway"]);
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let mut history = CityHistory::new();
        history.insert("Cork");
        assert_eq!(history.resolve(&CityFilter::parse("Cork")), CityFilter::parse("Cork"));
        assert_eq!(history.resolve(&CityFilter::All), CityFilter::All);
        assert_eq!(history.resolve(&CityFilter::parse("Sligo")), CityFilter::default_city());
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!(CityFilter::parse("all"), CityFilter::All);
        assert_eq!(CityFilter::parse("Cork").as_str(), "Cork");
        assert_eq!(ConditionFilter::parse("rain"), ConditionFilter::Only(Category::Rain));
        assert_eq!(ConditionFilter::parse("all"), ConditionFilter::All);
        assert_eq!(ConditionFilter::parse("hail"), ConditionFilter::All);
    }

    #[test]
    fn test_filters_match() {
        let filters = Filters {
            city: CityFilter::parse("Cork"),
            condition: ConditionFilter::Only(Category::Rain),
        };
        assert!(filters.matches("Cork", Category::Rain));
        assert!(!filters.matches("Cork", Category::Clear));
        assert!(!filters.matches("Galway", Category::Rain));
        let all = Filters { city: CityFilter::All, condition: ConditionFilter::All };
        assert!(all.matches("anything", Category::Extreme));
    }
}

use serde::{Deserialize, Serialize};

use crate::country::Country;

/// Record counts per continent, iterated in order of first appearance.
///
/// Serializes as a list of `[continent, count]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinentCounts {
    entries: Vec<(String, usize)>,
}

impl ContinentCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `continent` (exact string match).
    pub fn increment(&mut self, continent: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == continent) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((continent.to_string(), 1)),
        }
    }

    pub fn get(&self, continent: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == continent)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }
}

/// Summary figures over a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: usize,
    /// First record holding the maximum population.
    pub largest: Option<Country>,
    /// First record holding the minimum population.
    pub smallest: Option<Country>,
    pub average_population: f64,
    pub average_area: f64,
    pub by_continent: ContinentCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_keep_first_seen_order() {
        let mut counts = ContinentCounts::new();
        counts.increment("Europa");
        counts.increment("America");
        counts.increment("Europa");
        counts.increment("Asia");

        let ordered: Vec<(&str, usize)> = counts.iter().collect();
        assert_eq!(ordered, vec![("Europa", 2), ("America", 1), ("Asia", 1)]);
        assert_eq!(counts.get("Europa"), Some(2));
        assert_eq!(counts.get("europa"), None);
    }
}

use std::collections::HashSet;

use anyhow::{Result, anyhow};
use rand::Rng;

/// Letters a round may start with. Q, X and Y are left out; too few places
/// begin with them.
pub const ALLOWED_LETTERS: &str = "ABCDEFGHIJKLMNOPRSTUVWZ";

/// Pick a starting letter uniformly from the allowed alphabet.
pub fn random_letter() -> char {
    let letters: Vec<char> = ALLOWED_LETTERS.chars().collect();
    letters[rand::thread_rng().gen_range(0..letters.len())]
}

/// Which list a place name was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    City,
    Country,
    State,
}

/// Exact-match lookup over three disjoint place lists. Lists are loaded once
/// at startup; lookups are O(1) and side-effect free. Callers normalize
/// input (trim + lowercase) before calling `classify`.
pub struct PlaceBook {
    cities: HashSet<String>,
    countries: HashSet<String>,
    states: HashSet<String>,
}

impl PlaceBook {
    /// Build a book from three newline-separated lists. Blank lines and `#`
    /// comments are skipped. Entries appearing in an earlier list are
    /// dropped from later ones so the three sets stay disjoint; `classify`
    /// resolves such words as city before country before state.
    pub fn from_lists(cities: &str, countries: &str, states: &str) -> Result<Self> {
        let cities = parse_list(cities);
        let mut countries = parse_list(countries);
        let mut states = parse_list(states);

        countries.retain(|name| !cities.contains(name));
        states.retain(|name| !cities.contains(name) && !countries.contains(name));

        if cities.is_empty() && countries.is_empty() && states.is_empty() {
            return Err(anyhow!("no place names loaded"));
        }

        Ok(Self {
            cities,
            countries,
            states,
        })
    }

    /// Book backed by the bundled datasets.
    pub fn builtin() -> Result<Self> {
        Self::from_lists(
            include_str!("../data/cities.txt"),
            include_str!("../data/countries.txt"),
            include_str!("../data/states.txt"),
        )
    }

    /// Classify a normalized token. Returns `None` for anything that is not
    /// an exact member of one of the three lists; never partial-matches.
    pub fn classify(&self, word: &str) -> Option<PlaceKind> {
        if self.cities.contains(word) {
            Some(PlaceKind::City)
        } else if self.countries.contains(word) {
            Some(PlaceKind::Country)
        } else if self.states.contains(word) {
            Some(PlaceKind::State)
        } else {
            None
        }
    }

    pub fn total_places(&self) -> usize {
        self.cities.len() + self.countries.len() + self.states.len()
    }
}

fn parse_list(raw: &str) -> HashSet<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

use crate::catalog::Track;

/// Tempo buckets used by the browse filter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BpmRange {
    Slow,
    Medium,
    Fast,
}

impl BpmRange {
    /// Slow is up to 70, medium 71 through 120, fast above 120.
    pub fn contains(self, bpm: f64) -> bool {
        match self {
            BpmRange::Slow => bpm <= 70.0,
            BpmRange::Medium => (71.0..=120.0).contains(&bpm),
            BpmRange::Fast => bpm > 120.0,
        }
    }

    /// off -> slow -> medium -> fast -> off
    pub fn cycle(current: Option<BpmRange>) -> Option<BpmRange> {
        match current {
            None => Some(BpmRange::Slow),
            Some(BpmRange::Slow) => Some(BpmRange::Medium),
            Some(BpmRange::Medium) => Some(BpmRange::Fast),
            Some(BpmRange::Fast) => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BpmRange::Slow => "slow (<=70)",
            BpmRange::Medium => "medium (71-120)",
            BpmRange::Fast => "fast (>120)",
        }
    }
}

/// Selected facet values. Within a facet any selected value matches; across
/// facets every non-empty facet must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    pub genres: Vec<String>,
    pub moods: Vec<String>,
    pub seasons: Vec<String>,
    pub bpm: Option<BpmRange>,
}

impl Facets {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.moods.is_empty() && self.seasons.is_empty() && self.bpm.is_none()
    }

    pub fn matches(&self, track: &Track) -> bool {
        any_selected(&self.genres, &track.genre)
            && any_selected(&self.moods, &track.mood)
            && any_selected(&self.seasons, &track.season)
            && match self.bpm {
                None => true,
                Some(range) => track.bpm.is_some_and(|b| range.contains(b)),
            }
    }

    /// Short human summary, e.g. `genre: Jazz • bpm: slow (<=70)`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        for (name, values) in [("genre", &self.genres), ("mood", &self.moods), ("season", &self.seasons)] {
            if !values.is_empty() {
                parts.push(format!("{}: {}", name, values.join(", ")));
            }
        }
        if let Some(range) = self.bpm {
            parts.push(format!("bpm: {}", range.label()));
        }
        parts.join(" • ")
    }
}

fn any_selected(selected: &[String], values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

/// Add `item` if absent, remove it if present.
pub(super) fn toggle(list: &mut Vec<String>, item: &str) {
    match list.iter().position(|v| v == item) {
        Some(i) => {
            list.remove(i);
        }
        None => list.push(item.to_string()),
    }
}

/// Step a single-value selection through `available`, ending on "none".
pub(super) fn cycle(list: &mut Vec<String>, available: &[String]) {
    let next = match list.as_slice() {
        [] => available.first(),
        [only] => available
            .iter()
            .position(|v| v == only)
            .and_then(|p| available.get(p + 1)),
        _ => None,
    };
    list.clear();
    if let Some(v) = next {
        list.push(v.clone());
    }
}

/// Distinct values of one facet across the catalog, sorted.
pub(super) fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = values
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}

//! Browse model: catalog, selection, search, facets and theme.
//!
//! Playback lives in `store::PlaybackStore`; nothing here knows about audio.

use std::sync::Arc;

use crate::catalog::{Catalog, Pack, Track, TrackId};

use super::facets::{self, BpmRange, Facets};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FacetKind {
    Genre,
    Mood,
    Season,
}

pub struct App {
    pub catalog: Catalog,
    pub selected: usize,

    lower_titles: Option<Vec<String>>,
    display_titles: Vec<String>,
    /// Lowercased genre, mood and tag words per track, newline separated.
    lower_keywords: Vec<String>,
    /// Visible track indices; rebuilt whenever the query or facets change.
    visible: Vec<usize>,

    facets: Facets,
    genres: Vec<String>,
    moods: Vec<String>,
    seasons: Vec<String>,

    pub filter_mode: bool,
    filter_query: String,
    pub dark_mode: bool,
    /// Where the catalog came from, for the header.
    pub source: Option<String>,
}

impl App {
    pub fn new(catalog: Catalog, dark_mode: bool) -> Self {
        let display_titles: Vec<String> = catalog.tracks.iter().map(|t| t.display()).collect();
        // larger catalogs pay the lowercase conversion once instead of per keystroke
        let lower_titles = if display_titles.len() > 100 {
            Some(
                display_titles
                    .iter()
                    .map(|t| t.to_ascii_lowercase())
                    .collect(),
            )
        } else {
            None
        };

        let lower_keywords = catalog
            .tracks
            .iter()
            .map(|t| {
                t.genre
                    .iter()
                    .chain(&t.mood)
                    .chain(&t.tags)
                    .map(|w| w.to_lowercase())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect();
        let genres = facets::distinct(catalog.tracks.iter().flat_map(|t| &t.genre));
        let moods = facets::distinct(catalog.tracks.iter().flat_map(|t| &t.mood));
        let seasons = facets::distinct(catalog.tracks.iter().flat_map(|t| &t.season));
        let visible = (0..catalog.tracks.len()).collect();

        Self {
            catalog,
            selected: 0,
            lower_titles,
            display_titles,
            lower_keywords,
            visible,
            facets: Facets::default(),
            genres,
            moods,
            seasons,
            filter_mode: false,
            filter_query: String::new(),
            dark_mode,
            source: None,
        }
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.catalog.tracks
    }

    pub fn has_tracks(&self) -> bool {
        !self.catalog.tracks.is_empty()
    }

    pub fn display_title(&self, index: usize) -> &str {
        self.display_titles
            .get(index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn selected_track(&self) -> Option<&Arc<Track>> {
        if !self.visible.contains(&self.selected) {
            return None;
        }
        self.catalog.tracks.get(self.selected)
    }

    /// Packs bundling the selected track.
    pub fn selected_packs(&self) -> Vec<&Pack> {
        match self.selected_track() {
            Some(t) => self.catalog.packs_containing(t.id),
            None => Vec::new(),
        }
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Move the cursor onto the track with `id` if it is visible.
    pub fn select_track_id(&mut self, id: TrackId) {
        if let Some(idx) = self.catalog.tracks.iter().position(|t| t.id == id) {
            if self.display_indices().contains(&idx) {
                self.selected = idx;
            }
        }
    }

    /// Track indices in display order after filtering.
    pub fn display_indices(&self) -> &[usize] {
        &self.visible
    }

    fn refresh_visible(&mut self) {
        let query = self.filter_query.trim();
        let query_lower = query.to_ascii_lowercase();
        let keyword_query = query.to_lowercase();

        self.visible = (0..self.catalog.tracks.len())
            .filter(|&i| self.facets.matches(&self.catalog.tracks[i]))
            .filter(|&i| {
                if query.is_empty() {
                    return true;
                }
                let title_hit = match self.lower_titles.as_deref() {
                    Some(lower_titles) => {
                        Self::fuzzy_match_positions_lower(&lower_titles[i], &query_lower).is_some()
                    }
                    None => Self::fuzzy_match_positions(&self.display_titles[i], query).is_some(),
                };
                title_hit || self.lower_keywords[i].contains(&keyword_query)
            })
            .collect();
    }

    /// Fuzzy-match `query` against the track at `track_index`.
    pub fn fuzzy_match_positions_for_track(&self, track_index: usize, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        match self.lower_titles.as_deref() {
            Some(lower_titles) => Self::fuzzy_match_positions_lower(
                &lower_titles[track_index],
                &query.to_ascii_lowercase(),
            ),
            None => Self::fuzzy_match_positions(self.display_title(track_index), query),
        }
    }

    /// Subsequence match: the char positions in `title` that match `query`,
    /// case-insensitively, or `None`.
    pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title.chars().enumerate();

        for qc in query.chars() {
            let qc_low = qc.to_ascii_lowercase();
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    fn fuzzy_match_positions_lower(title_lower: &str, query_lower: &str) -> Option<Vec<usize>> {
        if query_lower.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title_lower.chars().enumerate();

        for qc in query_lower.chars() {
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc == qc => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    pub fn uses_lower_titles(&self) -> bool {
        self.lower_titles.is_some()
    }

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    /// Replace the whole query, as a pasted or restored search would.
    #[cfg(test)]
    pub fn set_filter_query(&mut self, query: &str) {
        self.filter_query = query.to_string();
        self.ensure_selected_visible();
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    /// Genres, moods and seasons present in the catalog, sorted.
    #[cfg(test)]
    pub fn available_genres(&self) -> &[String] {
        &self.genres
    }

    #[cfg(test)]
    pub fn available_moods(&self) -> &[String] {
        &self.moods
    }

    #[cfg(test)]
    pub fn available_seasons(&self) -> &[String] {
        &self.seasons
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        facets::toggle(&mut self.facets.genres, genre);
        self.ensure_selected_visible();
    }

    pub fn toggle_mood(&mut self, mood: &str) {
        facets::toggle(&mut self.facets.moods, mood);
        self.ensure_selected_visible();
    }

    pub fn toggle_season(&mut self, season: &str) {
        facets::toggle(&mut self.facets.seasons, season);
        self.ensure_selected_visible();
    }

    pub fn set_bpm_range(&mut self, range: Option<BpmRange>) {
        self.facets.bpm = range;
        self.ensure_selected_visible();
    }

    /// Keyboard stepping: one genre at a time, then none.
    pub fn cycle_genre(&mut self) {
        facets::cycle(&mut self.facets.genres, &self.genres);
        self.ensure_selected_visible();
    }

    pub fn cycle_mood(&mut self) {
        facets::cycle(&mut self.facets.moods, &self.moods);
        self.ensure_selected_visible();
    }

    pub fn cycle_season(&mut self) {
        facets::cycle(&mut self.facets.seasons, &self.seasons);
        self.ensure_selected_visible();
    }

    /// Toggle the selected track's first genre, mood or season into the
    /// matching facet ("more like this").
    pub fn toggle_facet_from_selected(&mut self, facet: FacetKind) {
        let Some(track) = self.selected_track() else {
            return;
        };
        let values = match facet {
            FacetKind::Genre => &track.genre,
            FacetKind::Mood => &track.mood,
            FacetKind::Season => &track.season,
        };
        let Some(value) = values.first().cloned() else {
            return;
        };
        match facet {
            FacetKind::Genre => self.toggle_genre(&value),
            FacetKind::Mood => self.toggle_mood(&value),
            FacetKind::Season => self.toggle_season(&value),
        }
    }

    pub fn cycle_bpm_range(&mut self) {
        self.set_bpm_range(BpmRange::cycle(self.facets.bpm));
    }

    /// Drop the search text and every facet.
    pub fn clear_all_filters(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.facets = Facets::default();
        self.ensure_selected_visible();
    }

    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_selected_visible();
    }

    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        self.refresh_visible();
        match self.visible.first() {
            None => self.selected = 0,
            Some(&first) if !self.visible.contains(&self.selected) => self.selected = first,
            Some(_) => {}
        }
    }

    /// Next visible index after `current`, wrapping.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }
        match display.iter().position(|&i| i == current) {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Previous visible index before `current`, wrapping.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }
        match display.iter().position(|&i| i == current) {
            Some(0) | None => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
        }
    }

    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }

    pub fn select_first(&mut self) {
        if let Some(&first) = self.display_indices().first() {
            self.selected = first;
        }
    }

    pub fn select_last(&mut self) {
        if let Some(&last) = self.display_indices().last() {
            self.selected = last;
        }
    }
}

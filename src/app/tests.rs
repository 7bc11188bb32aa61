use super::facets::BpmRange;
use super::*;
use crate::catalog::{Catalog, Pack, Track};

fn t(id: u64, title: &str) -> Track {
    Track {
        id,
        title: title.into(),
        artist_name: String::new(),
        mp3_url: format!("{id}.mp3"),
        cover_url: String::new(),
        duration: None,
        gumroad_link: None,
        ..Default::default()
    }
}

fn app_with(titles: &[&str]) -> App {
    let tracks = titles
        .iter()
        .enumerate()
        .map(|(i, title)| t(i as u64 + 1, title))
        .collect();
    App::new(Catalog::new(tracks, Vec::new()), true)
}

#[test]
fn fuzzy_match_simple() {
    let title = "Hello World";
    assert!(App::fuzzy_match_positions(title, "hw").is_some());
    assert!(App::fuzzy_match_positions(title, "ello").is_some());
    assert!(App::fuzzy_match_positions(title, "xyz").is_none());
}

#[test]
fn display_indices_uses_fuzzy_not_substring_only() {
    let mut app = app_with(&["Metallica - Blackened", "Black Sabbath - Paranoid"]);
    app.set_filter_query("mtbk");
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn display_uses_artist_and_title() {
    let mut track = t(1, "Night Drive");
    track.artist_name = "Loma".into();
    let mut app = App::new(Catalog::new(vec![track], Vec::new()), true);
    assert_eq!(app.display_title(0), "Loma - Night Drive");
    app.set_filter_query("loma");
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn trimming_filter_query_affects_matching() {
    let mut app = app_with(&["Black Sabbath - Paranoid"]);
    app.set_filter_query("Black ");
    assert_eq!(app.display_indices(), vec![0]);

    app.set_filter_query("   ");
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn large_catalogs_match_through_lowercase_cache() {
    let titles: Vec<String> = (0..150).map(|i| format!("Track {i:03}")).collect();
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let mut app = app_with(&refs);
    assert!(app.uses_lower_titles());

    app.set_filter_query("TRACK 149");
    assert_eq!(app.display_indices(), vec![149]);
    assert!(app.fuzzy_match_positions_for_track(149, "K 149").is_some());
}

#[test]
fn next_prev_in_view_helpers_work() {
    let mut app = app_with(&["Alpha", "Beta", "Gamma"]);
    app.set_filter_query("et"); // only Beta is visible

    assert_eq!(app.next_in_view_from(0), Some(1));
    assert_eq!(app.prev_in_view_from(0), Some(1));
    assert_eq!(app.next_in_view_from(1), Some(1));
    assert_eq!(app.prev_in_view_from(1), Some(1));
}

#[test]
fn next_prev_wrap_around() {
    let mut app = app_with(&["A", "B", "C"]);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.select_last();
    assert_eq!(app.selected, 2);
    app.select_first();
    assert_eq!(app.selected, 0);
}

#[test]
fn filter_keeps_selection_visible() {
    let mut app = app_with(&["Alpha", "Beta", "Gamma"]);
    app.selected = 0;
    app.enter_filter_mode();
    for c in "gam".chars() {
        app.push_filter_char(c);
    }
    assert_eq!(app.selected, 2);
    assert_eq!(app.selected_track().map(|t| t.id), Some(3));

    app.push_filter_char('z');
    assert!(app.selected_track().is_none());

    app.clear_filter();
    assert!(!app.filter_mode);
    assert!(app.selected_track().is_some());
}

#[test]
fn selected_packs_and_theme() {
    let catalog = Catalog::new(
        vec![t(1, "One"), t(2, "Two")],
        vec![Pack {
            id: 10,
            title: "Bundle".into(),
            cover_url: String::new(),
            description: None,
            price: 9.0,
            gumroad_link: None,
            track_ids: vec![2],
        }],
    );
    let mut app = App::new(catalog, true);
    assert!(app.selected_packs().is_empty());

    app.select_track_id(2);
    assert_eq!(app.selected, 1);
    assert_eq!(app.selected_packs().len(), 1);

    app.toggle_theme();
    assert!(!app.dark_mode);
}

fn tagged(id: u64, title: &str, genre: &[&str], mood: &[&str], season: &[&str], bpm: Option<f64>) -> Track {
    let mut track = t(id, title);
    track.genre = genre.iter().map(|s| s.to_string()).collect();
    track.mood = mood.iter().map(|s| s.to_string()).collect();
    track.season = season.iter().map(|s| s.to_string()).collect();
    track.bpm = bpm;
    track
}

fn faceted_app() -> App {
    let tracks = vec![
        tagged(1, "Snowfall", &["Ambient"], &["Peaceful"], &["Winter"], Some(60.0)),
        tagged(2, "Boardroom", &["Corporate"], &["Inspiring", "Uplifting"], &[], Some(110.0)),
        tagged(3, "Riot", &["Rock", "Electronic"], &["Energetic"], &["Summer"], Some(140.0)),
        tagged(4, "Untimed", &["Ambient"], &["Dark"], &["Halloween"], None),
    ];
    App::new(Catalog::new(tracks, Vec::new()), true)
}

#[test]
fn bpm_range_edges() {
    assert!(BpmRange::Slow.contains(70.0));
    assert!(!BpmRange::Slow.contains(71.0));
    assert!(BpmRange::Medium.contains(71.0));
    assert!(BpmRange::Medium.contains(120.0));
    assert!(!BpmRange::Medium.contains(121.0));
    assert!(!BpmRange::Medium.contains(70.0));
    assert!(BpmRange::Fast.contains(121.0));
    assert!(!BpmRange::Fast.contains(120.0));
}

#[test]
fn bpm_facet_filters_and_skips_unknown_tempo() {
    let mut app = faceted_app();
    app.set_bpm_range(Some(BpmRange::Slow));
    assert_eq!(app.display_indices(), vec![0]);
    app.set_bpm_range(Some(BpmRange::Medium));
    assert_eq!(app.display_indices(), vec![1]);
    app.set_bpm_range(Some(BpmRange::Fast));
    assert_eq!(app.display_indices(), vec![2]);
    app.set_bpm_range(None);
    assert_eq!(app.display_indices(), vec![0, 1, 2, 3]);
}

#[test]
fn genre_facet_matches_any_selected_value() {
    let mut app = faceted_app();
    app.toggle_genre("Ambient");
    assert_eq!(app.display_indices(), vec![0, 3]);
    app.toggle_genre("Electronic");
    assert_eq!(app.display_indices(), vec![0, 2, 3]);
    app.toggle_genre("Ambient");
    assert_eq!(app.display_indices(), vec![2]);
    assert_eq!(app.selected, 2);
}

#[test]
fn mood_and_season_facets_combine_with_genre() {
    let mut app = faceted_app();
    app.toggle_mood("Uplifting");
    assert_eq!(app.display_indices(), vec![1]);
    app.toggle_mood("Uplifting");

    app.toggle_season("Halloween");
    assert_eq!(app.display_indices(), vec![3]);
    app.toggle_genre("Rock");
    assert!(app.display_indices().is_empty());
    assert!(app.selected_track().is_none());

    app.clear_all_filters();
    assert!(app.facets().is_empty());
    assert_eq!(app.display_indices().len(), 4);
}

#[test]
fn cycling_steps_through_catalog_values_then_off() {
    let mut app = faceted_app();
    assert_eq!(
        app.available_genres(),
        ["Ambient", "Corporate", "Electronic", "Rock"]
    );
    app.cycle_genre();
    assert_eq!(app.facets().genres, vec!["Ambient".to_string()]);
    for _ in 0..3 {
        app.cycle_genre();
    }
    assert_eq!(app.facets().genres, vec!["Rock".to_string()]);
    app.cycle_genre();
    assert!(app.facets().genres.is_empty());

    app.cycle_bpm_range();
    app.cycle_bpm_range();
    assert_eq!(app.facets().bpm, Some(BpmRange::Medium));
    assert!(app.facets().summary().contains("bpm: medium (71-120)"));
}

#[test]
fn search_also_matches_genre_mood_and_tags() {
    let mut app = faceted_app();
    app.set_filter_query("energetic");
    assert_eq!(app.display_indices(), vec![2]);

    app.set_filter_query("CORPORATE");
    assert_eq!(app.display_indices(), vec![1]);

    let mut track = t(9, "Plain");
    track.tags = vec!["lo-fi".into()];
    let mut app = App::new(Catalog::new(vec![track], Vec::new()), true);
    app.set_filter_query("lo-fi");
    assert_eq!(app.display_indices(), vec![0]);
}

#[test]
fn search_and_facets_apply_together() {
    let mut app = faceted_app();
    app.toggle_genre("Ambient");
    app.set_filter_query("snow");
    assert_eq!(app.display_indices(), vec![0]);
    app.set_filter_query("");
    assert_eq!(app.display_indices(), vec![0, 3]);
}

#[test]
fn more_like_this_toggles_selected_tracks_values() {
    let mut app = faceted_app();
    app.selected = 2;
    app.toggle_facet_from_selected(FacetKind::Genre);
    assert_eq!(app.facets().genres, vec!["Rock".to_string()]);
    assert_eq!(app.display_indices(), vec![2]);

    app.toggle_facet_from_selected(FacetKind::Season);
    assert_eq!(app.facets().seasons, vec!["Summer".to_string()]);

    app.toggle_facet_from_selected(FacetKind::Genre);
    assert!(app.facets().genres.is_empty());
    assert_eq!(app.display_indices(), vec![2]);
}

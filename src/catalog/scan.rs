use std::path::Path;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::CatalogSettings;

use super::model::{Catalog, Track};

fn is_audio_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Build an ad-hoc catalog from the audio files under `dir`.
///
/// Tracks are sorted by display name and numbered from 1 in that order, so
/// the synthetic waveform of a file stays stable as long as the folder does.
pub fn scan(dir: &Path, settings: &CatalogSettings) -> Catalog {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(true);
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !(path.is_file() && is_audio_file(path, settings)) {
            continue;
        }

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut artist_name = String::new();
        let mut duration: Option<f64> = None;
        let mut genre: Vec<String> = Vec::new();

        match lofty::read_from_path(path) {
            Ok(tagged) => {
                let secs = tagged.properties().duration().as_secs_f64();
                if secs > 0.0 {
                    duration = Some(secs);
                }

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.title() {
                        if !v.trim().is_empty() {
                            title = v.trim().to_string();
                        }
                    }
                    if let Some(v) = tag.artist() {
                        artist_name = v.trim().to_string();
                    }
                    if let Some(v) = tag.genre() {
                        genre = v
                            .split(['/', ';'])
                            .map(str::trim)
                            .filter(|g| !g.is_empty())
                            .map(str::to_string)
                            .collect();
                    }
                }
            }
            Err(e) => log::debug!("no tags for {}: {}", path.display(), e),
        }

        tracks.push(Track {
            id: 0,
            title,
            artist_name,
            mp3_url: path.to_string_lossy().into_owned(),
            cover_url: String::new(),
            duration,
            gumroad_link: None,
            genre,
            ..Default::default()
        });
    }

    tracks.sort_by_key(|t| t.display().to_lowercase());
    for (i, t) in tracks.iter_mut().enumerate() {
        t.id = i as u64 + 1;
    }

    Catalog::new(tracks, Vec::new())
}

//! Catalog file loading.
//!
//! A catalog is either TOML (`[[tracks]]` / `[[packs]]` tables) or JSON. JSON
//! accepts the raw row export (a bare array of tracks) as well as an object
//! with `tracks` and `packs`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{Catalog, Pack, Track, TrackId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("track id {0} appears more than once")]
    DuplicateId(TrackId),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogDoc {
    tracks: Vec<Track>,
    packs: Vec<Pack>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Rows(Vec<Track>),
    Doc(CatalogDoc),
}

/// Load a catalog file, resolving relative audio paths against its directory.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut doc = if is_json {
        parse_json(&text)?
    } else {
        parse_toml(&text)?
    };

    if let Some(base) = path.parent() {
        for track in &mut doc.tracks {
            track.mp3_url = resolve_source(base, &track.mp3_url);
        }
    }

    build(doc)
}

fn parse_json(text: &str) -> Result<CatalogDoc, CatalogError> {
    Ok(match serde_json::from_str::<JsonCatalog>(text)? {
        JsonCatalog::Rows(tracks) => CatalogDoc {
            tracks,
            packs: Vec::new(),
        },
        JsonCatalog::Doc(doc) => doc,
    })
}

fn parse_toml(text: &str) -> Result<CatalogDoc, CatalogError> {
    Ok(toml::from_str::<CatalogDoc>(text)?)
}

fn build(doc: CatalogDoc) -> Result<Catalog, CatalogError> {
    let mut seen = HashSet::new();
    for t in &doc.tracks {
        if !seen.insert(t.id) {
            return Err(CatalogError::DuplicateId(t.id));
        }
    }
    Ok(Catalog::new(doc.tracks, doc.packs))
}

/// Leave URLs and absolute paths alone; anchor bare relative paths at `base`.
fn resolve_source(base: &Path, source: &str) -> String {
    if source.contains("://") || Path::new(source).is_absolute() {
        return source.to_string();
    }
    base.join(source).to_string_lossy().into_owned()
}

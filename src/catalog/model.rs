use std::sync::Arc;

use serde::{Deserialize, Deserializer};

pub type TrackId = u64;

/// A single licensable audio item, as supplied by the data-access layer.
///
/// Field names follow the storefront's row shape; unknown columns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artist_name: String,
    /// Playable audio resource: an http(s) URL, a `file://` URL or a local path.
    pub mp3_url: String,
    #[serde(default)]
    pub cover_url: String,
    /// Seconds; `None` when the catalog does not know it.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub gumroad_link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bpm: Option<f64>,
    /// Facet lists accept a single string, a list or null.
    #[serde(default, deserialize_with = "one_or_many")]
    pub genre: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub mood: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub season: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

impl Track {
    /// "Artist - Title", or just the title when the artist is blank.
    pub fn display(&self) -> String {
        match self.artist_name.trim() {
            "" => self.title.clone(),
            artist => format!("{} - {}", artist, self.title),
        }
    }
}

/// A bundle of tracks sold together.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pack {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub gumroad_link: Option<String>,
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tracks: Vec<Arc<Track>>,
    pub packs: Vec<Pack>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>, packs: Vec<Pack>) -> Self {
        Self {
            tracks: tracks.into_iter().map(Arc::new).collect(),
            packs,
        }
    }

    #[cfg(test)]
    pub fn track(&self, id: TrackId) -> Option<&Arc<Track>> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Packs that bundle the given track, in catalog order.
    pub fn packs_containing(&self, id: TrackId) -> Vec<&Pack> {
        self.packs
            .iter()
            .filter(|p| p.track_ids.contains(&id))
            .collect()
    }
}

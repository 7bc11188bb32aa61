use std::env;
use std::path::{Path, PathBuf};

use crate::catalog::{self, Catalog, CatalogError};
use crate::config;

/// Catalog source: the first CLI argument, then `catalog.path`, then the
/// working directory.
pub fn catalog_source(settings: &config::Settings) -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.catalog.path.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A directory is scanned for audio files; anything else is a catalog file.
pub fn load_catalog(source: &Path, settings: &config::CatalogSettings) -> Result<Catalog, CatalogError> {
    if source.is_dir() {
        log::info!("scanning {} for audio", source.display());
        Ok(catalog::scan(source, settings))
    } else {
        log::info!("loading catalog file {}", source.display());
        catalog::load(source)
    }
}

//! Track catalog loaded from a JSON file
//!
//! The catalog plays the role of the music store: it exposes curated sections
//! (featured, made for you, trending), the full song list and albums, and it
//! answers the sequencer's request for fallback candidates.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, StoreError};
use super::track::Track;

/// Best-effort provider of tracks used to rebuild a queue.
pub trait CatalogProvider: Send + Sync {
    /// May return an empty list and may contain duplicates.
    fn fetch_candidate_tracks(&self) -> Vec<Track>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    songs: Vec<Track>,
    #[serde(default)]
    featured: Vec<String>,
    #[serde(default)]
    made_for_you: Vec<String>,
    #[serde(default)]
    trending: Vec<String>,
    #[serde(default)]
    albums: Vec<AlbumFile>,
}

#[derive(Debug, Deserialize)]
struct AlbumFile {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    artist: String,
    #[serde(default)]
    songs: Vec<String>,
}

/// A named list of tracks shown in the library sidebar
#[derive(Clone, Debug)]
pub struct LibraryEntry {
    pub label: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug)]
pub struct JsonCatalog {
    featured: Vec<Track>,
    made_for_you: Vec<Track>,
    trending: Vec<Track>,
    songs: Vec<Track>,
    library: Vec<LibraryEntry>,
}

impl JsonCatalog {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let catalog = Self::from_json(&content).map_err(|e| StoreError::json(path, e))?;
        tracing::info!(
            path = %path.display(),
            songs = catalog.songs.len(),
            library_entries = catalog.library.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: CatalogFile) -> Self {
        let by_id: HashMap<&str, &Track> = file.songs.iter().map(|t| (t.id.as_str(), t)).collect();

        let resolve = |section: &str, ids: &[String]| -> Vec<Track> {
            ids.iter()
                .filter_map(|id| match by_id.get(id.as_str()) {
                    Some(track) => Some((*track).clone()),
                    None => {
                        tracing::warn!(section, track_id = %id, "Catalog references unknown track");
                        None
                    }
                })
                .collect()
        };

        let featured = resolve("featured", &file.featured);
        let made_for_you = resolve("madeForYou", &file.made_for_you);
        let trending = resolve("trending", &file.trending);

        let mut library = vec![
            LibraryEntry { label: "Featured".to_string(), tracks: featured.clone() },
            LibraryEntry { label: "Made For You".to_string(), tracks: made_for_you.clone() },
            LibraryEntry { label: "Trending".to_string(), tracks: trending.clone() },
            LibraryEntry { label: "All Songs".to_string(), tracks: file.songs.clone() },
        ];
        for album in &file.albums {
            let mut tracks = resolve(&album.id, &album.songs);
            for track in &mut tracks {
                if track.album_id.is_none() {
                    track.album_id = Some(album.id.clone());
                }
            }
            library.push(LibraryEntry {
                label: format!("{} - {}", album.title, album.artist),
                tracks,
            });
        }

        Self {
            featured,
            made_for_you,
            trending,
            songs: file.songs,
            library,
        }
    }

    pub fn library(&self) -> &[LibraryEntry] {
        &self.library
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl CatalogProvider for JsonCatalog {
    fn fetch_candidate_tracks(&self) -> Vec<Track> {
        self.featured
            .iter()
            .chain(&self.made_for_you)
            .chain(&self.trending)
            .chain(&self.songs)
            .cloned()
            .collect()
    }
}

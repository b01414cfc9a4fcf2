//! Track metadata as served by the catalog

use serde::{Deserialize, Serialize};

/// A playable song. Immutable once loaded from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_artist: Option<String>,
    pub audio_url: String,
    #[serde(default)]
    pub image_url: String,
    /// Length in seconds
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
}

impl Track {
    /// Artist line shown to the user, including the featured artist when present.
    pub fn display_artist(&self) -> String {
        match self.featured_artist.as_deref() {
            Some(featured) if !featured.is_empty() => format!("{} feat. {}", self.artist, featured),
            _ => self.artist.clone(),
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration.saturating_mul(1000)
    }

    pub fn same_as(&self, other: &Track) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
pub(crate) fn test_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Song {id}"),
        artist: format!("Artist {id}"),
        featured_artist: None,
        audio_url: format!("https://cdn.example/{id}.mp3"),
        image_url: String::new(),
        duration: 30,
        album_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_shape() {
        let json = r#"{
            "_id": "65f1",
            "title": "Stay With Me",
            "artist": "Sarah Mitchell",
            "featuredArtist": "The Wanderers",
            "imageUrl": "https://img.example/1.png",
            "audioUrl": "https://cdn.example/1.mp3",
            "duration": 46,
            "albumId": "alb1"
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, "65f1");
        assert_eq!(track.featured_artist.as_deref(), Some("The Wanderers"));
        assert_eq!(track.album_id.as_deref(), Some("alb1"));
        assert_eq!(track.duration_ms(), 46_000);
    }

    #[test]
    fn display_artist_includes_featured() {
        let mut track = test_track("a");
        assert_eq!(track.display_artist(), "Artist a");
        track.featured_artist = Some("Guest".to_string());
        assert_eq!(track.display_artist(), "Artist a feat. Guest");
        track.featured_artist = Some(String::new());
        assert_eq!(track.display_artist(), "Artist a");
    }
}

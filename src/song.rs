use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Deserialize;
use serde_json::Value;

/// A song as fetched from the library service.
///
/// Only `id` is guaranteed. The well-known text fields are optional and
/// every other scalar attribute the service returns is kept as text in
/// `extra` so it can still be filtered on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSong")]
pub struct Song {
    pub id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl Song {
    pub(crate) const EMPTY: &'static str = "<empty>";

    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            artist: None,
            album: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Value of the named field for matching.
    ///
    /// The typed fields always resolve (absent ones read as `""`), other
    /// names are looked up among the extra attributes. `None` means the
    /// song has no such field at all.
    pub fn field(&self, name: &str) -> Option<&str> {
        fn known(value: &Option<String>) -> &str { value.as_deref().unwrap_or_default() }

        match name.to_ascii_lowercase().as_str() {
            "id" => Some(self.id.as_str()),
            "title" => Some(known(&self.title)),
            "artist" => Some(known(&self.artist)),
            "album" => Some(known(&self.album)),
            _ => self
                .extra
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
        }
    }

    pub fn title(&self) -> &str { self.title.as_deref().unwrap_or(Self::EMPTY) }

    pub fn artist(&self) -> &str { self.artist.as_deref().unwrap_or(Self::EMPTY) }

    pub fn album(&self) -> &str { self.album.as_deref().unwrap_or(Self::EMPTY) }
}

impl Display for Song {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -- {} -- {} ({})",
            self.title(),
            self.artist(),
            self.album(),
            self.id
        )
    }
}

#[derive(Deserialize)]
struct RawSong {
    id: String,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<RawSong> for Song {
    fn from(raw: RawSong) -> Self {
        // nested objects and arrays are not filterable
        let extra = raw
            .extra
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, n.to_string())),
                Value::Bool(b) => Some((key, b.to_string())),
                _ => None,
            })
            .collect();

        Self {
            id: raw.id,
            title: raw.title,
            artist: raw.artist,
            album: raw.album,
            extra,
        }
    }
}

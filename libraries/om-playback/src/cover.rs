//! Cover art resolution
//!
//! A track either names its cover explicitly, or the cover folder is probed
//! for `{basename}.jpg` and then `{basename}.png`. Candidates are produced
//! lazily; the caller only asks for the next one after the previous one
//! failed to load.

use crate::types::{PlayerConfig, Track};

/// Resolve a file reference against the media folder
///
/// Absolute URIs and references already carrying the prefix are used
/// verbatim.
pub fn resolve_media_path(file: &str, media_folder: &str) -> String {
    if file.is_empty() {
        return String::new();
    }
    if file.starts_with("http://") || file.starts_with("https://") || file.starts_with(media_folder)
    {
        file.to_string()
    } else {
        format!("{media_folder}{file}")
    }
}

/// Last path segment of `path`
pub fn file_basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// `name` without its final extension
///
/// A trailing dot with nothing after it is not an extension.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => &name[..dot],
        _ => name,
    }
}

/// Produces cover candidates for tracks
#[derive(Debug, Clone)]
pub struct CoverResolver {
    media_folder: String,
    cover_folder: String,
    extensions: Vec<String>,
}

impl CoverResolver {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            media_folder: config.media_folder.clone(),
            cover_folder: config.cover_folder.clone(),
            extensions: config.cover_extensions.clone(),
        }
    }

    /// Candidate URIs for `track`, in probing order
    pub fn resolve(&self, track: &Track) -> CoverCandidates {
        if track.has_cover() {
            return CoverCandidates {
                probe: Probe::Explicit(Some(track.cover.clone())),
            };
        }

        let src = resolve_media_path(&track.file, &self.media_folder);
        let name = strip_extension(file_basename(&src)).to_string();
        CoverCandidates {
            probe: Probe::Folder {
                folder: self.cover_folder.clone(),
                name,
                extensions: self.extensions.clone().into_iter(),
            },
        }
    }
}

impl Default for CoverResolver {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

/// Lazy, finite sequence of cover URIs
#[derive(Debug, Clone)]
pub struct CoverCandidates {
    probe: Probe,
}

#[derive(Debug, Clone)]
enum Probe {
    Explicit(Option<String>),
    Folder {
        folder: String,
        name: String,
        extensions: std::vec::IntoIter<String>,
    },
}

impl Iterator for CoverCandidates {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match &mut self.probe {
            Probe::Explicit(cover) => cover.take(),
            Probe::Folder {
                folder,
                name,
                extensions,
            } => extensions.next().map(|ext| format!("{folder}{name}.{ext}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_files_get_media_prefix() {
        assert_eq!(resolve_media_path("a.mp3", "music/"), "music/a.mp3");
        assert_eq!(resolve_media_path("sub/a.mp3", "music/"), "music/sub/a.mp3");
    }

    #[test]
    fn absolute_and_prefixed_files_are_verbatim() {
        assert_eq!(
            resolve_media_path("https://cdn.example.com/a.mp3", "music/"),
            "https://cdn.example.com/a.mp3"
        );
        assert_eq!(
            resolve_media_path("http://example.com/a.mp3", "music/"),
            "http://example.com/a.mp3"
        );
        assert_eq!(resolve_media_path("music/a.mp3", "music/"), "music/a.mp3");
        assert_eq!(resolve_media_path("", "music/"), "");
    }

    #[test]
    fn basename_and_extension() {
        assert_eq!(file_basename("music/sub/a.mp3"), "a.mp3");
        assert_eq!(file_basename("a.mp3"), "a.mp3");
        assert_eq!(strip_extension("a.mp3"), "a");
        assert_eq!(strip_extension("my.song.flac"), "my.song");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension("trailing."), "trailing.");
    }

    #[test]
    fn implicit_cover_probes_jpg_then_png() {
        let resolver = CoverResolver::default();
        let track = Track::new("a.mp3");

        let candidates: Vec<String> = resolver.resolve(&track).collect();
        assert_eq!(candidates, vec!["cover/a.jpg", "cover/a.png"]);
    }

    #[test]
    fn explicit_cover_is_sole_candidate() {
        let resolver = CoverResolver::default();
        let track = Track::new("a.mp3").with_cover("art/front.webp");

        let candidates: Vec<String> = resolver.resolve(&track).collect();
        assert_eq!(candidates, vec!["art/front.webp"]);
    }

    #[test]
    fn basename_taken_after_prefixing() {
        let resolver = CoverResolver::default();
        let track = Track::new("https://cdn.example.com/albums/x/02 - Song.ogg");

        let mut candidates = resolver.resolve(&track);
        assert_eq!(candidates.next().as_deref(), Some("cover/02 - Song.jpg"));
    }

    #[test]
    fn configured_folder_and_extensions() {
        let config = PlayerConfig {
            cover_folder: "art/".to_string(),
            cover_extensions: vec!["webp".to_string()],
            ..PlayerConfig::default()
        };
        let resolver = CoverResolver::new(&config);

        let candidates: Vec<String> = resolver.resolve(&Track::new("b.flac")).collect();
        assert_eq!(candidates, vec!["art/b.webp"]);
    }
}

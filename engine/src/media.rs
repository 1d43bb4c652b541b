//! Optional media lookup for monsters.
//!
//! Media lives under `<public_dir>/<prefix>/<name>/` as `image.<ext>` and
//! `move.<ext>`. Extensions are tried in priority order and the first file
//! that exists wins.

use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];
pub const MOVE_EXTENSIONS: &[&str] = &["mp4", "webm", "gif"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUrls {
    pub image_url: Option<String>,
    pub move_video_url: Option<String>,
}

/// First extension in `exts` for which `<dir>/<basename>.<ext>` is a file.
pub fn first_existing_ext(
    dir: &Path,
    basename: &str,
    exts: &[&'static str],
) -> Option<&'static str> {
    exts.iter()
        .copied()
        .find(|ext| dir.join(format!("{}.{}", basename, ext)).is_file())
}

/// Probe the media directory for `name`. Missing files leave the URL unset.
pub fn resolve_media(public_dir: &Path, url_prefix: &str, name: &str) -> MediaUrls {
    let prefix = url_prefix.trim_matches('/');
    let (base, url_base) = if prefix.is_empty() {
        (public_dir.join(name), format!("/{}", name))
    } else {
        (public_dir.join(prefix).join(name), format!("/{}/{}", prefix, name))
    };
    let url = |basename: &str, ext: &str| format!("{}/{}.{}", url_base, basename, ext);

    MediaUrls {
        image_url: first_existing_ext(&base, "image", IMAGE_EXTENSIONS)
            .map(|ext| url("image", ext)),
        move_video_url: first_existing_ext(&base, "move", MOVE_EXTENSIONS)
            .map(|ext| url("move", ext)),
    }
}

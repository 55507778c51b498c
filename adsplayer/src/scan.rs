//! Scan des dossiers locaux `images/` et `videos/`

use adsqueue::{MediaType, QueueItem};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions d'images reconnues (comparaison insensible à la casse)
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
/// Extensions vidéo reconnues (comparaison insensible à la casse)
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// Un média candidat à la diffusion
///
/// Provient soit de la file de lecture, soit du scan des dossiers locaux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub path: PathBuf,
    pub media_type: MediaType,
    pub name: String,
}

impl From<&QueueItem> for MediaItem {
    fn from(item: &QueueItem) -> Self {
        Self {
            path: PathBuf::from(&item.path),
            media_type: item.media_type,
            name: item.name.clone(),
        }
    }
}

/// Construit la liste plate des médias présents sous `media_root`
///
/// Parcourt `images/` puis `videos/` dans l'ordre de lecture du répertoire,
/// en filtrant par extension (insensible à la casse). Un dossier absent est
/// simplement ignoré.
pub fn scan_local_media(media_root: &Path) -> Vec<MediaItem> {
    let mut media = Vec::new();

    scan_folder(
        &media_root.join("images"),
        &IMAGE_EXTENSIONS,
        MediaType::Image,
        &mut media,
    );
    scan_folder(
        &media_root.join("videos"),
        &VIDEO_EXTENSIONS,
        MediaType::Video,
        &mut media,
    );

    debug!(count = media.len(), root = %media_root.display(), "Local media scan");
    media
}

fn scan_folder(
    folder: &Path,
    extensions: &[&str],
    media_type: MediaType,
    out: &mut Vec<MediaItem>,
) {
    let Ok(entries) = std::fs::read_dir(folder) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
            .unwrap_or(false);

        if matches {
            let name = entry.file_name().to_string_lossy().to_string();
            out.push(MediaItem {
                path,
                media_type,
                name,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn scan_filters_by_extension_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("images/a.PNG"));
        touch(&root.join("images/b.jpeg"));
        touch(&root.join("images/notes.txt"));
        touch(&root.join("videos/c.Mp4"));
        touch(&root.join("videos/d.webm"));

        let media = scan_local_media(root);
        let mut names: Vec<_> = media.iter().map(|m| m.name.clone()).collect();
        names.sort();
        assert_eq!(names, ["a.PNG", "b.jpeg", "c.Mp4"]);

        let images = media
            .iter()
            .filter(|m| m.media_type == MediaType::Image)
            .count();
        assert_eq!(images, 2);
    }

    #[test]
    fn missing_folders_scan_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_local_media(dir.path()).is_empty());
    }
}

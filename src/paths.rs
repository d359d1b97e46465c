//! Path utilities for recognizing clip files.

use std::path::Path;

/// Clip containers the pipeline produces and stages.
const CLIP_EXTENSIONS: &[&str] = &["mkv", "mp4"];

/// Check if a path has a recognized clip extension.
pub fn is_clip_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CLIP_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_clip_file() {
        assert!(is_clip_file(Path::new("00001.mkv")));
        assert!(is_clip_file(Path::new("scene-0001.mp4")));
        assert!(is_clip_file(Path::new("clip.MKV")));

        assert!(!is_clip_file(Path::new("notes.txt")));
        assert!(!is_clip_file(Path::new("movie.timestamps")));
        assert!(!is_clip_file(Path::new("no_extension")));
    }
}

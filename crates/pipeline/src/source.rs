//! Audio source discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One input file discovered for transcription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    pub path: PathBuf,
}

impl AudioSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Lowercased extension, when present.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// Where this source's transcript goes by default: `<stem>.txt` next to
    /// the input.
    pub fn transcript_path(&self) -> PathBuf {
        self.path.with_file_name(self.transcript_file_name())
    }

    /// Transcript location under a separate output directory: the source's
    /// path relative to `root` is mirrored so same-named files in different
    /// folders cannot collide. Sources outside `root` fall back to a flat
    /// `<stem>.txt` directly in `output_dir`.
    pub fn transcript_path_under(&self, root: &Path, output_dir: &Path) -> PathBuf {
        match self.path.strip_prefix(root) {
            Ok(relative) => output_dir
                .join(relative)
                .with_file_name(self.transcript_file_name()),
            Err(_) => output_dir.join(self.transcript_file_name()),
        }
    }

    fn transcript_file_name(&self) -> std::ffi::OsString {
        let mut name = self
            .path
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "transcript".into());
        name.push(".txt");
        name
    }
}

/// Lazily walk `root` for audio files with one of the given extensions
/// (case-insensitive, without the leading dot).
///
/// Traversal order is deterministic (sorted by file name per directory).
/// Unreadable directory entries are skipped with a warning rather than
/// aborting the walk.
pub fn discover_sources<'a>(
    root: &Path,
    extensions: &'a [String],
) -> impl Iterator<Item = AudioSource> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry during discovery: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| AudioSource::new(entry.into_path()))
        .filter(move |source| {
            source
                .extension()
                .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
                .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_discovery_is_recursive_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("meetings").join("2023");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a.wav"), b"x").unwrap();
        std::fs::write(nested.join("b.MP4"), b"x").unwrap();
        std::fs::write(nested.join("notes.txt"), b"x").unwrap();

        let extensions = exts(&["wav", "mp4"]);
        let found: Vec<_> = discover_sources(dir.path(), &extensions).collect();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|s| s.path.ends_with("a.wav")));
        assert!(found.iter().any(|s| s.path.ends_with("b.MP4")));
    }

    #[test]
    fn test_discovery_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.wav", "a.wav", "b.wav"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let extensions = exts(&["wav"]);
        let names: Vec<_> = discover_sources(dir.path(), &extensions)
            .map(|s| s.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.wav", "b.wav", "c.wav"]);
    }

    #[test]
    fn test_transcript_path_next_to_input() {
        let source = AudioSource::new("/data/meetings/standup.mp4");
        assert_eq!(
            source.transcript_path(),
            PathBuf::from("/data/meetings/standup.txt")
        );
    }

    #[test]
    fn test_transcript_path_under_mirrors_the_tree() {
        let root = Path::new("/data");
        let source = AudioSource::new("/data/meetings/2023/standup.mp4");
        assert_eq!(
            source.transcript_path_under(root, Path::new("/out")),
            PathBuf::from("/out/meetings/2023/standup.txt")
        );
    }

    #[test]
    fn test_same_stem_in_different_folders_does_not_collide() {
        let root = Path::new("/data");
        let out = Path::new("/out");
        let a = AudioSource::new("/data/a/x.wav");
        let b = AudioSource::new("/data/b/x.wav");
        assert_ne!(
            a.transcript_path_under(root, out),
            b.transcript_path_under(root, out)
        );
    }

    #[test]
    fn test_source_outside_root_lands_flat_in_output_dir() {
        let source = AudioSource::new("/elsewhere/x.wav");
        assert_eq!(
            source.transcript_path_under(Path::new("/data"), Path::new("/out")),
            PathBuf::from("/out/x.txt")
        );
    }
}

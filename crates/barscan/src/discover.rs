//! Best-effort default image discovery.
//!
//! Entries are sorted by file name before picking, so the result does not
//! depend on the platform's directory order. It is still a convenience, not
//! a contract: any file with a matching extension qualifies.

use std::io;
use std::path::{Path, PathBuf};

/// Extensions (compared case-insensitively) treated as images.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Regular files in `dir` with an image extension, sorted by file name.
pub fn list_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// First image file in `dir`, if any. Read errors count as "none found".
pub fn discover_default_image(dir: &Path) -> Option<PathBuf> {
    list_images(dir).ok()?.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").expect("write");
    }

    #[test]
    fn picks_first_image_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "zeta.png");
        touch(dir.path(), "Alpha.JPG");
        touch(dir.path(), "readme.md");
        std::fs::create_dir(dir.path().join("aaa.png")).expect("mkdir");

        let found = discover_default_image(dir.path()).expect("found");
        assert_eq!(found.file_name().and_then(|n| n.to_str()), Some("Alpha.JPG"));
        assert_eq!(list_images(dir.path()).expect("list").len(), 2);
    }

    #[test]
    fn no_images_means_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "data.csv");
        assert!(discover_default_image(dir.path()).is_none());
        assert!(discover_default_image(&dir.path().join("missing")).is_none());
    }
}

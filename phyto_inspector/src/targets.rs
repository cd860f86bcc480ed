// Expands command-line inputs into the list of image files to analyze.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Extensions picked up when a directory is expanded (case-insensitive).
pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "bmp", "gif", "webp", "tif", "tiff"];

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Files are kept as given; directories contribute their image files, one level deep, sorted.
pub fn collect_targets(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            for entry in std::fs::read_dir(input)
                .with_context(|| format!("reading directory {}", input.display()))?
            {
                let path = entry?.path();
                if path.is_file() && has_image_extension(&path) {
                    found.push(path);
                }
            }
            found.sort();
            targets.extend(found);
        } else {
            targets.push(input.clone());
        }
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_extensions_case_insensitively() {
        assert!(has_image_extension(Path::new("leaf.PNG")));
        assert!(has_image_extension(Path::new("dir/leaf.jpeg")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("README")));
    }

    #[test]
    fn expands_directories_and_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();
        let explicit = PathBuf::from("upload.bin");

        let targets = collect_targets(&[dir.path().to_path_buf(), explicit.clone()]).unwrap();
        assert_eq!(
            targets,
            vec![dir.path().join("a.png"), dir.path().join("b.jpg"), explicit]
        );
    }
}

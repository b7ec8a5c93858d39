// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset directory layout.
//!
//! A dataset is a flat directory holding `<label>_image<ext>` and
//! `<label>_mask.png` pairs. There is no index file; labels are
//! recovered by splitting file names on their first underscore.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffix of the copied source image (before the extension).
pub const IMAGE_SUFFIX: &str = "_image";
/// File name suffix of the mask.
pub const MASK_SUFFIX: &str = "_mask.png";

/// Paths of one dataset entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPaths {
    pub image: PathBuf,
    pub mask: PathBuf,
}

impl EntryPaths {
    /// Hidden sibling paths used while an entry is being written.
    pub fn staging(&self) -> EntryPaths {
        let hidden = |p: &Path| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            p.with_file_name(format!(".{name}.tmp"))
        };
        EntryPaths {
            image: hidden(&self.image),
            mask: hidden(&self.mask),
        }
    }

    /// File names (without directory) of the image and mask.
    pub fn file_names(&self) -> (String, String) {
        let name = |p: &Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        (name(&self.image), name(&self.mask))
    }
}

/// Create the dataset directory if it does not exist yet.
pub fn ensure_dataset_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create dataset directory {}", dir.display()))?;
    log::info!("Dataset directory: {}", dir.display());
    Ok(())
}

/// Normalize a user-entered label.
///
/// Returns the trimmed label, or `None` if it is empty, would not stay
/// inside the dataset directory, or would produce hidden files.
pub fn normalize_label(raw: &str) -> Option<&str> {
    let label = raw.trim();
    if label.is_empty() || label.starts_with('.') {
        return None;
    }
    if label.contains(['/', '\\']) {
        return None;
    }
    Some(label)
}

/// Build the entry paths for `label` with the source file's extension.
pub fn entry_paths(dataset_dir: &Path, label: &str, source: &Path) -> EntryPaths {
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    EntryPaths {
        image: dataset_dir.join(format!("{label}{IMAGE_SUFFIX}{ext}")),
        mask: dataset_dir.join(format!("{label}{MASK_SUFFIX}")),
    }
}

/// Label prefix of a dataset file name, if it has one. Hidden files
/// (staging leftovers) have none.
pub fn label_prefix(file_name: &str) -> Option<&str> {
    if file_name.starts_with('.') {
        return None;
    }
    file_name.split_once('_').map(|(prefix, _)| prefix)
}

/// Scan the dataset directory for distinct labels, sorted.
pub fn list_labels(dataset_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dataset_dir)
        .with_context(|| format!("Failed to read dataset directory {}", dataset_dir.display()))?;

    let mut labels = BTreeSet::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if let Some(prefix) = label_prefix(&name.to_string_lossy()) {
            labels.insert(prefix.to_string());
        }
    }

    Ok(labels.into_iter().collect())
}

/// Whether two paths name the same existing file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy the source image byte-for-byte to `destination`.
pub fn copy_source(source: &Path, destination: &Path) -> Result<()> {
    let bytes = fs::copy(source, destination).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            destination.display()
        )
    })?;
    log::debug!("Copied {} bytes to {}", bytes, destination.display());
    Ok(())
}

/// Image copies of `label` with another extension than `keep`.
///
/// These are left over from an earlier save of the same label from a
/// different source format.
pub fn stale_images(dataset_dir: &Path, label: &str, keep: &Path) -> Result<Vec<PathBuf>> {
    let stem = format!("{label}{IMAGE_SUFFIX}");
    let keep_name = keep.file_name();

    let entries = fs::read_dir(dataset_dir)
        .with_context(|| format!("Failed to read dataset directory {}", dataset_dir.display()))?;

    let mut stale = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if Some(name.as_os_str()) == keep_name {
            continue;
        }
        let name = name.to_string_lossy();
        if let Some(rest) = name.strip_prefix(&stem) {
            if rest.is_empty() || rest.starts_with('.') {
                stale.push(entry.path());
            }
        }
    }

    Ok(stale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  cat "), Some("cat"));
        assert_eq!(normalize_label("red car"), Some("red car"));
        assert_eq!(normalize_label("   "), None);
        assert_eq!(normalize_label(""), None);
        assert_eq!(normalize_label("\t\n"), None);
        assert_eq!(normalize_label("../escape"), None);
        assert_eq!(normalize_label("a\\b"), None);
        assert_eq!(normalize_label(".."), None);
        assert_eq!(normalize_label(".hidden"), None);
    }

    #[test]
    fn test_entry_paths_keep_source_extension() {
        let dir = Path::new("/data/set");
        let paths = entry_paths(dir, "cat", Path::new("/photos/cat.JPG"));
        assert_eq!(paths.image, dir.join("cat_image.JPG"));
        assert_eq!(paths.mask, dir.join("cat_mask.png"));
        assert_eq!(
            paths.file_names(),
            ("cat_image.JPG".to_string(), "cat_mask.png".to_string())
        );

        let bare = entry_paths(dir, "dog", Path::new("/photos/dog"));
        assert_eq!(bare.image, dir.join("dog_image"));
    }

    #[test]
    fn test_label_prefix_splits_on_first_underscore() {
        assert_eq!(label_prefix("cat_image.png"), Some("cat"));
        assert_eq!(label_prefix("big_dog_mask.png"), Some("big"));
        assert_eq!(label_prefix("readme.txt"), None);
        assert_eq!(label_prefix(".cat_mask.png.tmp"), None);
    }

    #[test]
    fn test_list_labels_is_distinct_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "zebra_image.png",
            "zebra_mask.png",
            "cat_image.jpg",
            "cat_mask.png",
            "apple_mask.png",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub_dir")).unwrap();

        let labels = list_labels(dir.path()).unwrap();
        assert_eq!(labels, vec!["apple", "cat", "zebra"]);
    }

    #[test]
    fn test_list_labels_on_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_labels(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_ensure_dataset_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("nested").join("dataset");
        ensure_dataset_dir(&dataset).unwrap();
        ensure_dataset_dir(&dataset).unwrap();
        assert!(dataset.is_dir());
    }

    #[test]
    fn test_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat_image.png");
        fs::write(&path, b"pixels").unwrap();

        assert!(same_file(&path, &dir.path().join(".").join("cat_image.png")));
        assert!(!same_file(&path, &dir.path().join("missing.png")));
    }

    #[test]
    fn test_staging_paths_are_hidden_siblings() {
        let dir = Path::new("/data/set");
        let staging = entry_paths(dir, "cat", Path::new("cat.png")).staging();
        assert_eq!(staging.image, dir.join(".cat_image.png.tmp"));
        assert_eq!(staging.mask, dir.join(".cat_mask.png.tmp"));
    }

    #[test]
    fn test_stale_images_finds_other_extensions_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "cat_image.png",
            "cat_image.jpg",
            "cat_image",
            "cat_mask.png",
            "cat_image2.png",
            "dog_image.png",
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let keep = dir.path().join("cat_image.jpg");
        let mut stale = stale_images(dir.path(), "cat", &keep).unwrap();
        stale.sort();
        assert_eq!(
            stale,
            vec![dir.path().join("cat_image"), dir.path().join("cat_image.png")]
        );
    }
}

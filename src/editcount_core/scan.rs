use crate::editcount_core::error::{EditCountError, Result};
use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Raw file extensions (lowercase).
pub const RAW_EXTENSIONS: &[&str] = &["nef", "cr2", "dng"];

/// Check if a file name carries one of the raw extensions, ignoring case.
pub fn is_raw_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| RAW_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// File name with its last extension removed.
///
/// Example: "IMG_0001.NEF" -> "IMG_0001", "pano.tif.jpg" -> "pano.tif"
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem()?.to_str().map(str::to_string)
}

/// List the names of the immediate subdirectories of `dir`, sorted.
///
/// Used to enumerate years and albums. Any failure here aborts the run.
pub fn list_subdirectories(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 && is_not_found(&e) => {
                log::debug!("Skipping dangling entry: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => log::warn!("Skipping non UTF-8 directory name {}", entry.path().display()),
        }
    }

    Ok(names)
}

/// Base names of the raw files directly inside an album folder.
///
/// A missing folder is treated as empty.
pub fn scan_raw_files(album_dir: &Path) -> Result<BTreeSet<String>> {
    collect_base_names(album_dir, 1, is_raw_file)
}

/// Base names of every file in an album's destination folder and its immediate subfolders.
///
/// Anything nested deeper than one subfolder is not counted. A missing folder is treated as empty.
pub fn scan_edited_files(album_dir: &Path) -> Result<BTreeSet<String>> {
    collect_base_names(album_dir, 2, |_| true)
}

fn collect_base_names(
    dir: &Path,
    max_depth: usize,
    accept: impl Fn(&str) -> bool,
) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    if !dir.exists() {
        log::debug!("{} does not exist, treating as empty", dir.display());
        return Ok(names);
    }
    if !dir.is_dir() {
        return Err(EditCountError::io(
            dir,
            io::Error::new(io::ErrorKind::NotADirectory, "expected an album folder"),
        ));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Removed mid-scan, or a dangling symlink
            Err(e) if is_not_found(&e) => {
                log::debug!("Skipping vanished entry: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            log::warn!("Skipping non UTF-8 file name {}", entry.path().display());
            continue;
        };

        if !accept(file_name) {
            continue;
        }

        if let Some(base) = base_name(entry.path()) {
            names.insert(base);
        }
    }

    Ok(names)
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound)
}

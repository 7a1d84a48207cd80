use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, warn};

use crate::error::{BalloonError, BalloonResult};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> BalloonResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir_path)
        .map_err(|e| BalloonError::image_load(dir_path.display().to_string(), e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| BalloonError::image_load(dir_path.display().to_string(), e))?
            .path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        Err(BalloonError::NoImages(dir_path.display().to_string()))
    } else {
        Ok(paths)
    }
}

/// Expands directories into their sorted image files, keeps plain files as given.
/// Inputs that cannot be read are logged and skipped.
pub fn collect_image_paths(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            match load_sorted_image_paths(input) {
                Ok(found) => paths.extend(found),
                Err(e) => warn!("{}", e),
            }
        } else if input.is_file() {
            paths.push(input.clone());
        } else {
            warn!("skipping {}: not a file or directory", input.display());
        }
    }
    paths
}

/// EXIF orientation tag, 1 when absent or unreadable.
fn exif_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // Non-critical, proceed without rotation
            debug!("no EXIF data for {}: {}", image_path.display(), e);
            1
        }
    }
}

// --- Load Image and Apply EXIF Rotation ---
pub fn load_image_with_exif_rotation(image_path: &Path) -> BalloonResult<Image> {
    let display = || image_path.display().to_string();
    let file_bytes = fs::read(image_path).map_err(|e| BalloonError::image_load(display(), e))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(image_path, &file_bytes)
    } else {
        1
    };

    // Extension hint for decoding from memory
    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &file_bytes)
        .map_err(|e| BalloonError::image_load(display(), e))?;

    if image.width() <= 0 || image.height() <= 0 {
        return Err(BalloonError::image_load(display(), "decoded image is empty"));
    }

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(orientation, "rotated {}", image_path.display());
    }

    Ok(image)
}

/// Loads every path, skipping (and logging) the ones that fail.
pub fn load_images(paths: &[PathBuf]) -> Vec<Image> {
    paths
        .iter()
        .filter_map(|path| match load_image_with_exif_rotation(path) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect()
}

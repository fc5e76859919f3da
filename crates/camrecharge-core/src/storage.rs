//! Photo file naming and storage.
//!
//! Captured photos land in a temporary file in the cache directory first.
//! Saving encodes the resampled bitmap into the album directory under the
//! pictures directory; the temporary file is deleted separately.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::CaptureConfig;
use crate::decode::DecodedImage;
use crate::encode::{encode_image, EncodeError};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const JPEG_EXTENSION: &str = ".jpg";
/// Highest `_n` suffix tried before a save gives up on finding a free name.
const MAX_NAME_SUFFIX: u32 = 999;

/// Errors raised by an [`ImageStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] EncodeError),
}

impl StorageError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Prefix for a temporary capture file, e.g. `JPEG_20240131_093005_`.
pub fn temp_image_prefix(timestamp: NaiveDateTime) -> String {
    format!("JPEG_{}_", timestamp.format(TIMESTAMP_FORMAT))
}

/// File name for a saved photo, e.g. `JPEG_20240131_093005.jpg`.
pub fn saved_image_file_name(timestamp: NaiveDateTime) -> String {
    format!("JPEG_{}{}", timestamp.format(TIMESTAMP_FORMAT), JPEG_EXTENSION)
}

/// File-system capability used by the capture session.
pub trait ImageStore {
    /// Create an empty temporary file for the camera to write into.
    fn create_temp_file(&mut self) -> Result<PathBuf, StorageError>;

    /// Delete `path`. Returns `false` if there was nothing to delete.
    fn delete_file(&mut self, path: &Path) -> Result<bool, StorageError>;

    /// Encode `image` and store it permanently. Returns the saved path.
    fn save_image(&mut self, image: &DecodedImage) -> Result<PathBuf, StorageError>;
}

/// [`ImageStore`] backed by local directories.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    cache_dir: PathBuf,
    album_dir: PathBuf,
    jpeg_quality: u8,
}

impl FsImageStore {
    /// Temp files go in `cache_dir`; saved photos go in
    /// `pictures_dir/<config.album_name>`.
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        pictures_dir: impl AsRef<Path>,
        config: &CaptureConfig,
    ) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            album_dir: pictures_dir.as_ref().join(&config.album_name),
            jpeg_quality: config.effective_quality(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn album_dir(&self) -> &Path {
        &self.album_dir
    }

    /// Write `jpeg` to the first free `JPEG_<timestamp>[_n].jpg` in the album
    /// directory.
    ///
    /// Each name is claimed with `create_new`, so a file that already exists
    /// is never truncated, whoever created it.
    fn write_saved_file(
        &self,
        timestamp: NaiveDateTime,
        jpeg: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let base = saved_image_file_name(timestamp);
        let stem = base.trim_end_matches(JPEG_EXTENSION);
        let names = std::iter::once(base.clone())
            .chain((1..=MAX_NAME_SUFFIX).map(|n| format!("{stem}_{n}{JPEG_EXTENSION}")));

        for name in names {
            let path = self.album_dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    if let Err(e) = file.write_all(jpeg) {
                        drop(file);
                        let _ = std::fs::remove_file(&path);
                        return Err(StorageError::io(&path, e));
                    }
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Saved name taken");
                }
                Err(e) => return Err(StorageError::io(&path, e)),
            }
        }

        Err(StorageError::io(
            self.album_dir.join(&base),
            io::Error::new(io::ErrorKind::AlreadyExists, "no free file name"),
        ))
    }
}

impl ImageStore for FsImageStore {
    fn create_temp_file(&mut self) -> Result<PathBuf, StorageError> {
        std::fs::create_dir_all(&self.cache_dir)
            .map_err(|e| StorageError::io(&self.cache_dir, e))?;

        let prefix = temp_image_prefix(Local::now().naive_local());
        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(JPEG_EXTENSION)
            .tempfile_in(&self.cache_dir)
            .map_err(|e| StorageError::io(&self.cache_dir, e))?;

        let (_, path) = file
            .keep()
            .map_err(|e| StorageError::io(&self.cache_dir, e.error))?;

        debug!(path = %path.display(), "Created temp image file");
        Ok(path)
    }

    fn delete_file(&mut self, path: &Path) -> Result<bool, StorageError> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Deleted image file");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "No image file to delete");
                Ok(false)
            }
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn save_image(&mut self, image: &DecodedImage) -> Result<PathBuf, StorageError> {
        let jpeg = encode_image(image, self.jpeg_quality)?;

        std::fs::create_dir_all(&self.album_dir)
            .map_err(|e| StorageError::io(&self.album_dir, e))?;

        let path = self.write_saved_file(Local::now().naive_local(), &jpeg)?;

        info!(path = %path.display(), bytes = jpeg.len(), "Saved photo");
        Ok(path)
    }
}

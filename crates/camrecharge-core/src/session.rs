//! Capture session: the single-screen photo workflow.
//!
//! ```text
//!            take_photo / begin_capture
//!   Idle ───────────────────────────────▶ Capturing
//!    ▲                                       │
//!    │      cancelled / decode failure       │ captured
//!    ├◀──────────────────────────────────────┤
//!    │                                       ▼
//!    └───────────── clear ────────────── Previewing ──▶ save / share
//! ```
//!
//! The session owns at most one temporary capture file and one preview
//! bitmap at a time. File-system and decode failures are shown to the user
//! through the [`Notifier`] and returned to the caller; none are retried.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::CaptureConfig;
use crate::decode::{DecodeError, Dimensions};
use crate::platform::{
    Camera, CaptureOutcome, GalleryIndex, Notice, Notifier, PlatformError, ShareService,
};
use crate::resample::{resample_file, Resampled};
use crate::storage::{ImageStore, StorageError};

/// Errors returned by [`CaptureSession`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Where the session is in the capture workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    Idle,
    /// Waiting for the camera to fill `temp_path`.
    Capturing { temp_path: PathBuf },
    /// Showing a resampled photo.
    Previewing {
        /// Capture file, until it has been deleted.
        temp_path: Option<PathBuf>,
        preview: Resampled,
        /// Where the preview was last saved.
        saved_path: Option<PathBuf>,
    },
}

impl CaptureState {
    pub fn name(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::Capturing { .. } => "capturing",
            CaptureState::Previewing { .. } => "previewing",
        }
    }

    fn temp_path(&self) -> Option<&Path> {
        match self {
            CaptureState::Idle => None,
            CaptureState::Capturing { temp_path } => Some(temp_path),
            CaptureState::Previewing { temp_path, .. } => temp_path.as_deref(),
        }
    }
}

/// The part of a session that survives the host tearing down the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub temp_path: Option<PathBuf>,
}

/// Platform services a session drives.
pub struct Services<C, St, S, G, N> {
    pub camera: C,
    pub store: St,
    pub share: S,
    pub gallery: G,
    pub notifier: N,
}

pub struct CaptureSession<C, St, S, G, N> {
    services: Services<C, St, S, G, N>,
    config: CaptureConfig,
    viewport: Dimensions,
    state: CaptureState,
}

impl<C, St, S, G, N> CaptureSession<C, St, S, G, N>
where
    C: Camera,
    St: ImageStore,
    S: ShareService,
    G: GalleryIndex,
    N: Notifier,
{
    pub fn new(
        services: Services<C, St, S, G, N>,
        config: CaptureConfig,
        viewport: Dimensions,
    ) -> Self {
        Self {
            services,
            config,
            viewport,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn viewport(&self) -> Dimensions {
        self.viewport
    }

    /// Viewport used for the next capture. An existing preview is kept as is.
    pub fn set_viewport(&mut self, viewport: Dimensions) {
        self.viewport = viewport;
    }

    /// The photo currently on screen, if any.
    pub fn preview(&self) -> Option<&Resampled> {
        match &self.state {
            CaptureState::Previewing { preview, .. } => Some(preview),
            _ => None,
        }
    }

    /// Create a capture file, run the camera and process its result.
    pub fn take_photo(&mut self) -> Result<CaptureOutcome, SessionError> {
        let temp_path = self.begin_capture()?;
        let outcome = self.services.camera.capture(&temp_path);
        self.on_capture_result(outcome)?;
        Ok(outcome)
    }

    /// Create the capture file and enter `Capturing`.
    ///
    /// Hosts whose camera reports back asynchronously call this, hand the
    /// returned path to the camera, then call [`Self::on_capture_result`].
    pub fn begin_capture(&mut self) -> Result<PathBuf, SessionError> {
        if !matches!(self.state, CaptureState::Idle) {
            return Err(self.invalid_state("take a photo"));
        }

        let temp_path = match self.services.store.create_temp_file() {
            Ok(path) => path,
            Err(e) => return Err(self.storage_failed(e)),
        };

        info!(path = %temp_path.display(), "Launching camera");
        self.state = CaptureState::Capturing {
            temp_path: temp_path.clone(),
        };
        Ok(temp_path)
    }

    /// Handle the camera's answer for the pending capture.
    pub fn on_capture_result(&mut self, outcome: CaptureOutcome) -> Result<(), SessionError> {
        let temp_path = match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Capturing { temp_path } => temp_path,
            other => {
                self.state = other;
                return Err(self.invalid_state("accept a capture result"));
            }
        };

        debug!(?outcome, path = %temp_path.display(), "Capture finished");
        match outcome {
            CaptureOutcome::Captured => self.process_capture(temp_path),
            CaptureOutcome::Cancelled => {
                self.discard_temp(temp_path);
                Ok(())
            }
            CaptureOutcome::Unavailable => {
                self.discard_temp(temp_path);
                self.services.notifier.notify(Notice::CameraUnavailable);
                Ok(())
            }
        }
    }

    fn process_capture(&mut self, temp_path: PathBuf) -> Result<(), SessionError> {
        match resample_file(&temp_path, self.viewport, &self.config) {
            Ok(preview) => {
                self.state = CaptureState::Previewing {
                    temp_path: Some(temp_path),
                    preview,
                    saved_path: None,
                };
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, path = %temp_path.display(), "Failed to decode capture");
                self.services
                    .notifier
                    .notify(Notice::DecodeFailed(e.to_string()));
                self.discard_temp(temp_path);
                Err(e.into())
            }
        }
    }

    /// Delete the capture file and store the preview permanently.
    pub fn save(&mut self) -> Result<PathBuf, SessionError> {
        let (temp_path, preview) = match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Previewing {
                temp_path, preview, ..
            } => (temp_path, preview),
            other => {
                self.state = other;
                return Err(self.invalid_state("save"));
            }
        };

        let temp_path = temp_path.and_then(|path| self.discard_temp(path));

        match self.services.store.save_image(&preview.image) {
            Ok(saved) => {
                if let Err(e) = self.services.gallery.register(&saved) {
                    warn!(error = %e, path = %saved.display(), "Gallery registration failed");
                }
                self.services.notifier.notify(Notice::Saved(saved.clone()));
                self.state = CaptureState::Previewing {
                    temp_path,
                    preview,
                    saved_path: Some(saved.clone()),
                };
                Ok(saved)
            }
            Err(e) => {
                self.state = CaptureState::Previewing {
                    temp_path,
                    preview,
                    saved_path: None,
                };
                Err(self.storage_failed(e))
            }
        }
    }

    /// Save the preview (unless already saved) and share the saved file.
    pub fn share(&mut self) -> Result<PathBuf, SessionError> {
        let path = match &self.state {
            CaptureState::Previewing {
                saved_path: Some(path),
                ..
            } => path.clone(),
            _ => self.save()?,
        };

        if let Err(e) = self.services.share.share(&path) {
            warn!(error = %e, path = %path.display(), "Share failed");
            self.services
                .notifier
                .notify(Notice::ShareFailed(e.to_string()));
            return Err(e.into());
        }

        info!(path = %path.display(), "Shared photo");
        Ok(path)
    }

    /// Drop the preview and delete the capture file.
    ///
    /// Returns whether a file was deleted. The session is `Idle` afterwards
    /// even when deletion fails.
    pub fn clear(&mut self) -> Result<bool, SessionError> {
        let temp_path = match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Idle => None,
            CaptureState::Capturing { temp_path } => Some(temp_path),
            CaptureState::Previewing { temp_path, .. } => temp_path,
        };

        let Some(temp_path) = temp_path else {
            self.services.notifier.notify(Notice::NothingToDelete);
            return Ok(false);
        };

        match self.services.store.delete_file(&temp_path) {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.services.notifier.notify(Notice::NothingToDelete);
                Ok(false)
            }
            Err(e) => Err(self.storage_failed(e)),
        }
    }

    pub fn saved_state(&self) -> SavedState {
        SavedState {
            temp_path: self.state.temp_path().map(Path::to_path_buf),
        }
    }

    /// Resume from a [`SavedState`].
    ///
    /// A saved capture path puts the session back in `Capturing`, ready for
    /// the camera result that is delivered after the screen is recreated.
    /// Restoring over an active session deletes that session's capture file
    /// unless the saved state points at the same file.
    pub fn restore(&mut self, saved: SavedState) {
        let previous = std::mem::replace(&mut self.state, CaptureState::Idle);
        if !matches!(previous, CaptureState::Idle) {
            warn!(state = previous.name(), "Restoring over an active session");
        }

        let stale = previous
            .temp_path()
            .filter(|path| saved.temp_path.as_deref() != Some(*path))
            .map(Path::to_path_buf);
        if let Some(path) = stale {
            // A failed delete is already reported through the notifier
            let _ = self.discard_temp(path);
        }

        self.state = match saved.temp_path {
            Some(temp_path) => CaptureState::Capturing { temp_path },
            None => CaptureState::Idle,
        };
    }

    /// Delete a capture file. Returns the path back if it could not be removed.
    fn discard_temp(&mut self, path: PathBuf) -> Option<PathBuf> {
        match self.services.store.delete_file(&path) {
            Ok(_) => None,
            Err(e) => {
                self.storage_failed(e);
                Some(path)
            }
        }
    }

    fn storage_failed(&mut self, err: StorageError) -> SessionError {
        warn!(error = %err, "Storage operation failed");
        self.services
            .notifier
            .notify(Notice::StorageFailed(err.to_string()));
        SessionError::Storage(err)
    }

    fn invalid_state(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            state: self.state.name(),
        }
    }
}

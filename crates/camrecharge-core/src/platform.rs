//! Capability traits for the host platform.
//!
//! The capture session only talks to the device through these traits. The
//! host application implements them on top of its camera, share sheet,
//! media index and toast/snackbar APIs.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A failure reported by a platform service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// No application or service can handle the request.
    #[error("No handler available: {0}")]
    Unavailable(String),

    /// The service accepted the request and then failed.
    #[error("Platform request failed: {0}")]
    Failed(String),
}

/// Result of asking the camera for a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A photo was written to the requested path.
    Captured,
    /// The user backed out of the camera.
    Cancelled,
    /// No camera is available to handle the request.
    Unavailable,
}

impl From<bool> for CaptureOutcome {
    fn from(captured: bool) -> Self {
        if captured {
            CaptureOutcome::Captured
        } else {
            CaptureOutcome::Cancelled
        }
    }
}

/// Camera capture service.
pub trait Camera {
    /// Capture a photo into `output`.
    fn capture(&mut self, output: &Path) -> CaptureOutcome;
}

/// Hands a file to another application.
pub trait ShareService {
    fn share(&mut self, path: &Path) -> Result<(), PlatformError>;
}

/// Registers saved files so gallery apps can find them.
pub trait GalleryIndex {
    fn register(&mut self, path: &Path) -> Result<(), PlatformError>;
}

/// A short-lived message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved(PathBuf),
    NothingToDelete,
    DecodeFailed(String),
    StorageFailed(String),
    ShareFailed(String),
    CameraUnavailable,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Saved(path) => write!(f, "Saved to {}", path.display()),
            Notice::NothingToDelete => write!(f, "No image to delete."),
            Notice::DecodeFailed(reason) => write!(f, "Could not read photo: {reason}"),
            Notice::StorageFailed(reason) => write!(f, "Storage error: {reason}"),
            Notice::ShareFailed(reason) => write!(f, "Could not share photo: {reason}"),
            Notice::CameraUnavailable => write!(f, "No camera app available."),
        }
    }
}

/// Displays transient notices.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

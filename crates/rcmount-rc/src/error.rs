//! Error types for the rclone backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RcError {
    #[error("rclone is not installed or not in PATH")]
    DependencyMissing,

    #[error("rclone command failed: {0}")]
    CommandFailed(String),

    #[error("malformed {call} response: {detail}")]
    Protocol { call: &'static str, detail: String },

    #[error("mount of {remote} at {mount_point} failed: {detail}")]
    Mount {
        remote: String,
        mount_point: String,
        detail: String,
    },

    #[error("unmount of {mount_point} failed: {detail}")]
    Unmount { mount_point: String, detail: String },

    #[error("rclone io error: {0}")]
    Io(#[from] std::io::Error),
}

//! Enumerated mount actions, dispatched in-process by the runtime.

use crate::remote::ReconciledRemote;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A user-selectable operation on one remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verb", rename_all = "lowercase")]
pub enum Action {
    Mount {
        remote: String,
        mount_point: PathBuf,
        volume: String,
    },
    Unmount {
        mount_point: PathBuf,
    },
    /// Reveal an already-mounted path in the file manager.
    Open {
        mount_point: PathBuf,
    },
}

impl Action {
    pub fn mount_for(remote: &ReconciledRemote) -> Self {
        Self::Mount {
            remote: remote.name.clone(),
            mount_point: remote.mount_path.clone(),
            volume: remote.volume.clone(),
        }
    }

    pub fn unmount_for(remote: &ReconciledRemote) -> Self {
        Self::Unmount {
            mount_point: remote.mount_path.clone(),
        }
    }

    pub fn open_for(remote: &ReconciledRemote) -> Self {
        Self::Open {
            mount_point: remote.mount_path.clone(),
        }
    }
}

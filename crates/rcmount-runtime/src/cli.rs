//! CLI definition using clap derive.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rcmount_core::{CacheMode, Settings};

#[derive(Parser)]
#[command(name = "rcmount", about = "status and mount manager for rclone remotes")]
pub struct Cli {
    /// Base directory for mount points (default: ~/clouds)
    #[arg(long, env = "RCMOUNT_MOUNT_DIR", global = true)]
    pub mount_dir: Option<PathBuf>,

    /// Port of the rclone control API
    #[arg(long, env = "RCMOUNT_RC_PORT", global = true)]
    pub rc_port: Option<u16>,

    /// VFS cache level for mounted filesystems: off|minimal|writes|full
    #[arg(long, env = "RCMOUNT_CACHE_MODE", global = true)]
    pub cache_mode: Option<CacheMode>,

    /// Verbose logging
    #[arg(long, env = "RCMOUNT_VERBOSE", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll the daemon and render the remote listing (default)
    Status,
    /// Mount a configured remote
    Mount {
        /// Remote name as configured in rclone
        name: String,
        /// Where to mount it (default: <mount-dir>/<name>)
        mount_point: Option<PathBuf>,
        /// Volume label (default: the remote's configured label)
        volume: Option<String>,
    },
    /// Unmount the filesystem at the given path (or remote name)
    Unmount { target: PathBuf },
    /// Open a mounted path (or remote name) in the file manager
    Open { target: PathBuf },
}

impl Cli {
    /// Merge CLI/env overrides into the default settings.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(ref dir) = self.mount_dir {
            settings.mount_dir = dir.clone();
        }
        if let Some(port) = self.rc_port {
            settings.rc_port = port;
        }
        if let Some(mode) = self.cache_mode {
            settings.cache_mode = mode;
        }
        settings.verbose = self.verbose;
        settings
    }
}

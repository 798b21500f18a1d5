//! RcCommandRunner trait and RcExecutor (sync subprocess wrapper around
//! `rclone rc`). Enables mock injection for testing.

use crate::error::RcError;

/// Trait for issuing rclone control-API calls. The first element of
/// `args` is the rc operation (e.g. `"vfs/list"`); the rest are
/// `key=value` parameters.
pub trait RcCommandRunner: Send + Sync {
    fn run(&self, args: &[&str]) -> Result<String, RcError>;
}

impl<T: RcCommandRunner + ?Sized> RcCommandRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, RcError> {
        (**self).run(args)
    }
}

/// Real executor: `rclone rc <op> key=value... --url=localhost:<port>`.
pub struct RcExecutor {
    rclone_bin: String,
    rc_port: u16,
}

impl RcExecutor {
    pub fn new(rclone_bin: impl Into<String>, rc_port: u16) -> Self {
        Self {
            rclone_bin: rclone_bin.into(),
            rc_port,
        }
    }

    pub fn bin(&self) -> &str {
        &self.rclone_bin
    }

    fn url_arg(&self) -> String {
        format!("--url=localhost:{}", self.rc_port)
    }
}

impl Default for RcExecutor {
    fn default() -> Self {
        Self::new("rclone", rcmount_core::DEFAULT_RC_PORT)
    }
}

impl RcCommandRunner for RcExecutor {
    fn run(&self, args: &[&str]) -> Result<String, RcError> {
        let mut cmd = std::process::Command::new(&self.rclone_bin);
        cmd.arg("rc");
        cmd.args(args);
        cmd.arg(self.url_arg());
        let output = cmd.output().map_err(RcError::Io)?;
        if !output.status.success() {
            // rclone rc prints the error JSON on stdout and a summary on
            // stderr; prefer whichever is non-empty.
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            };
            return Err(RcError::CommandFailed(format!(
                "exit code {}: {}",
                output.status.code().unwrap_or(-1),
                detail.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
